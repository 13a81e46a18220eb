//! # Line Capacity Calculation Engine
//!
//! 產能計算引擎：需求分配、產線換線評估、瓶頸分析與結果彙總

pub mod allocation;
pub mod constraint;
pub mod line_changeover;
pub mod planner;
pub mod report;
pub mod summary;

// Re-export 主要類型
pub use allocation::{
    allocate_to_line, AllocationEngine, AreaAllocation, CompatibilityIndex, RemainingDemand,
};
pub use constraint::{AreaAnalysis, ConstraintAnalyzer};
pub use line_changeover::LineChangeoverEvaluator;
pub use planner::CapacityPlanner;
pub use report::{
    AreaSummary, BottleneckLine, ConstrainedModel, ConstrainedYear, ConstraintClassification,
    ConstraintReason, LineResult, OverallSummary, PlanningReport, ReportMetadata,
    SystemConstraint, UnfulfilledDemand, YearResult, YearSummary,
};
pub use summary::ResultAggregator;
