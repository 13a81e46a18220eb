//! 產能規劃主流程：年度 → 區域 → 分配 → 換線 → 限制分析 → 彙總

use std::time::Instant;

use chrono::Utc;
use linecap_changeover::MethodRegistry;
use linecap_core::{CapaError, DemandTable, ModelCatalog, PlannerConfig, PlanningInput, ProductionLine};
use rayon::prelude::*;
use uuid::Uuid;

use crate::allocation::{AllocationEngine, AreaAllocation, CompatibilityIndex};
use crate::constraint::{AreaAnalysis, ConstraintAnalyzer};
use crate::line_changeover::LineChangeoverEvaluator;
use crate::report::{PlanningReport, ReportMetadata, YearResult};
use crate::summary::{rounded_area_summary, rounded_unfulfilled, ResultAggregator};

/// 產能規劃器
pub struct CapacityPlanner {
    input: PlanningInput,
    config: PlannerConfig,
    registry: MethodRegistry,
}

/// 單次計算共用的唯讀資料
struct RunContext<'a> {
    catalog: &'a ModelCatalog,
    index: CompatibilityIndex<'a>,
    areas: Vec<String>,
    evaluator: LineChangeoverEvaluator<'a>,
}

impl CapacityPlanner {
    /// 使用內建換線方法創建規劃器
    pub fn new(input: PlanningInput, config: PlannerConfig) -> Self {
        Self {
            input,
            config,
            registry: MethodRegistry::default(),
        }
    }

    /// 建構器模式：替換方法註冊表
    pub fn with_registry(mut self, registry: MethodRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn input(&self) -> &PlanningInput {
        &self.input
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// 執行所有選定年度的計算
    pub fn run(&self) -> linecap_core::Result<PlanningReport> {
        let start_time = Instant::now();

        // 備援方法必須可用，否則換線計算無法降級
        self.registry
            .ensure_available(&self.config.fallback_method)
            .map_err(|e| CapaError::Configuration(format!("備援換線方法無效: {e}")))?;

        let years = self.input.sorted_years();
        tracing::info!(
            "開始產能計算：產線 {} 條，機種 {} 個，相容性 {} 筆，年度 {:?}",
            self.input.lines.len(),
            self.input.models.len(),
            self.input.compatibilities.len(),
            years
        );

        let catalog = self.input.catalog();
        let index = CompatibilityIndex::new(&self.input.compatibilities);
        for line_id in index.unknown_lines(self.input.lines.iter().map(|l| l.id.as_str())) {
            tracing::warn!("相容性指向未知的產線 {}，已忽略", line_id);
        }

        let evaluator = LineChangeoverEvaluator::new(
            &self.registry,
            self.input.changeover.as_ref(),
            &catalog,
            &self.config,
        );
        if self.input.changeover.is_some() && catalog.is_empty() {
            tracing::warn!("缺少機種資料，略過換線計算");
        }

        let context = RunContext {
            catalog: &catalog,
            index,
            areas: self.input.areas(),
            evaluator,
        };

        let year_results: Vec<YearResult> = if self.config.parallel_years {
            years
                .par_iter()
                .filter_map(|&year| self.run_year(year, &context))
                .collect()
        } else {
            years
                .iter()
                .filter_map(|&year| self.run_year(year, &context))
                .collect()
        };

        let aggregator = ResultAggregator::new(&self.config);
        let overall_summary = aggregator.overall_summary(&year_results, self.input.lines.len());

        let execution_time_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            "產能計算完成：{} 個年度，耗時 {} ms",
            year_results.len(),
            execution_time_ms
        );

        Ok(PlanningReport {
            metadata: ReportMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                run_id: Uuid::new_v4(),
                input_years: self.input.selected_years.clone(),
                execution_time_ms,
                calculation_method: context
                    .evaluator
                    .is_enabled()
                    .then(|| context.evaluator.method_id().to_string()),
            },
            year_results,
            overall_summary,
        })
    }

    /// 單一年度（無需求資料時略過）
    fn run_year(&self, year: i32, context: &RunContext<'_>) -> Option<YearResult> {
        let demand = DemandTable::for_year(&self.input.volumes, year, context.catalog);
        if demand.is_empty() {
            tracing::warn!("{} 年沒有需求資料，略過", year);
            return None;
        }

        tracing::info!("計算 {} 年：機種 {} 個", year, demand.len());

        let engine = AllocationEngine::new(&self.config);
        let analyzer = ConstraintAnalyzer::new(&self.config);

        let areas: Vec<(AreaAllocation, AreaAnalysis)> = context
            .areas
            .iter()
            .map(|area| {
                let lines: Vec<ProductionLine> = self
                    .input
                    .lines
                    .iter()
                    .filter(|l| &l.area == area)
                    .map(ProductionLine::from)
                    .collect();
                let compatibilities = context.index.for_lines(&lines);

                let allocation = engine.allocate(area, lines, &compatibilities, &demand);
                let analysis = analyzer.analyze_area(&allocation, &demand);
                tracing::debug!(
                    "{} 年區域 {}：平均稼動率 {:.2}%，未滿足 {:.2}",
                    year,
                    area,
                    analysis.summary.average_utilization,
                    analysis.summary.total_unfulfilled_units
                );
                (allocation, analysis)
            })
            .collect();

        let system_constraint = analyzer.select_constraint(&areas, &demand);

        let aggregator = ResultAggregator::new(&self.config);
        let mut lines: Vec<_> = areas
            .iter()
            .flat_map(|(allocation, _)| allocation.lines.iter())
            .map(|line| aggregator.line_result(line, context.evaluator.evaluate(line)))
            .collect();
        lines.sort_by(|a, b| a.line_name.cmp(&b.line_name));

        let analyses: Vec<AreaAnalysis> = areas.into_iter().map(|(_, analysis)| analysis).collect();
        let summary = aggregator.year_summary(&lines, &analyses, &demand);

        Some(YearResult {
            year,
            lines,
            unfulfilled_demand: analyses
                .iter()
                .flat_map(|a| a.unfulfilled.iter())
                .map(rounded_unfulfilled)
                .collect(),
            area_summary: analyses
                .iter()
                .map(|a| rounded_area_summary(&a.summary))
                .collect(),
            system_constraint,
            summary,
        })
    }
}
