//! 計算結果報表（輸出文件結構）

use chrono::{DateTime, Utc};
use linecap_changeover::ChangeoverResult;
use linecap_core::{LineType, ModelAssignment};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 完整規劃報表
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningReport {
    pub metadata: ReportMetadata,
    pub year_results: Vec<YearResult>,
    pub overall_summary: OverallSummary,
}

/// 報表中繼資料
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub run_id: Uuid,
    /// 輸入文件中的年度（原樣）
    pub input_years: Vec<i32>,
    pub execution_time_ms: u64,
    /// 實際採用的換線方法（未設定換線時為空）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation_method: Option<String>,
}

/// 單一年度結果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearResult {
    pub year: i32,
    /// 產線結果（依產線名稱排序）
    pub lines: Vec<LineResult>,
    pub unfulfilled_demand: Vec<UnfulfilledDemand>,
    pub area_summary: Vec<AreaSummary>,
    pub system_constraint: Option<SystemConstraint>,
    pub summary: YearSummary,
}

/// 產線結果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResult {
    pub line_id: String,
    pub line_name: String,
    pub area: String,
    pub line_type: LineType,
    pub time_available_daily: f64,
    pub time_used_daily: f64,
    pub utilization_percent: f64,
    /// 分配量的 HHI
    pub hhi: f64,
    pub assignments: Vec<ModelAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changeover: Option<ChangeoverResult>,
    /// (生產時間 + 換線時間) / 可用時間
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilization_with_changeover_percent: Option<f64>,
}

/// 未滿足需求（依區域）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfulfilledDemand {
    pub area: String,
    pub model_id: String,
    pub model_name: String,
    /// 機種完整每日需求
    pub demand_units_daily: f64,
    pub allocated_units_daily: f64,
    pub unfulfilled_units_daily: f64,
    pub fulfillment_percent: f64,
}

/// 區域彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSummary {
    pub area: String,
    pub total_lines: usize,
    pub average_utilization: f64,
    pub overloaded_lines: usize,
    pub balanced_lines: usize,
    pub underutilized_lines: usize,
    pub lines_at_capacity: usize,
    pub total_demand_units: f64,
    pub total_allocated_units: f64,
    pub total_unfulfilled_units: f64,
    pub fulfillment_percent: f64,
}

/// 系統限制的選定原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintReason {
    /// 有未滿足需求，選未滿足量最大的區域
    UnfulfilledDemand,
    /// 需求皆滿足但平均稼動率 >= 100%，選稼動率最高的區域
    HighestUtilization,
}

/// 瓶頸分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintClassification {
    DedicatedLineBottleneck,
    SharedCapacityConstraint,
    MixedConstraint,
}

impl ConstraintClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintClassification::DedicatedLineBottleneck => "dedicated_line_bottleneck",
            ConstraintClassification::SharedCapacityConstraint => "shared_capacity_constraint",
            ConstraintClassification::MixedConstraint => "mixed_constraint",
        }
    }
}

/// 年度系統限制（瓶頸區域）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConstraint {
    pub area: String,
    pub reason: ConstraintReason,
    pub classification: ConstraintClassification,
    pub total_unfulfilled_units: f64,
    pub average_utilization: f64,
    pub bottleneck_lines: Vec<BottleneckLine>,
    pub explanation: String,
}

/// 瓶頸產線
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottleneckLine {
    pub line_id: String,
    pub line_name: String,
    pub line_type: LineType,
    pub utilization_percent: f64,
    /// 此產線可生產但仍未滿足的數量（前 5 名機種合計）
    pub unfulfilled_units: f64,
    pub constrained_models: Vec<ConstrainedModel>,
}

/// 受限機種
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstrainedModel {
    pub model_id: String,
    pub model_name: String,
    pub unfulfilled_units: f64,
}

/// 年度彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub total_lines: usize,
    pub total_areas: usize,
    pub average_utilization: f64,
    pub overloaded_lines: usize,
    pub balanced_lines: usize,
    pub underutilized_lines: usize,
    pub lines_at_capacity: usize,
    pub total_models: usize,
    pub assigned_models: usize,
    pub unassigned_models: usize,
    pub total_allocated_units: f64,
    pub total_unfulfilled_units: f64,
    /// 各區域滿足率的平均
    pub demand_fulfillment_percent: f64,
    pub lines_with_changeover: usize,
    pub total_changeover_seconds: f64,
}

/// 跨年度彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub years_processed: usize,
    pub average_utilization_all_years: f64,
    pub total_lines_analyzed: usize,
    pub total_unfulfilled_units: f64,
    pub constrained_years: Vec<ConstrainedYear>,
}

/// 有系統限制的年度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstrainedYear {
    pub year: i32,
    pub area: String,
    pub classification: ConstraintClassification,
}
