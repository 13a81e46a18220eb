//! 區域分析與系統限制（瓶頸）判定

use linecap_core::{
    round_to, DemandTable, LineType, ModelAssignment, PlannerConfig, UtilizationBand,
};

use crate::allocation::AreaAllocation;
use crate::report::{
    AreaSummary, BottleneckLine, ConstrainedModel, ConstraintClassification, ConstraintReason,
    SystemConstraint, UnfulfilledDemand,
};

/// 每條瓶頸產線列出的受限機種上限
pub const MAX_CONSTRAINED_MODELS: usize = 5;

/// 說明文字中列出的產線上限
pub const MAX_NAMED_LINES: usize = 3;

/// 單一區域的分析結果（未四捨五入）
#[derive(Debug, Clone)]
pub struct AreaAnalysis {
    pub summary: AreaSummary,
    pub unfulfilled: Vec<UnfulfilledDemand>,
}

/// 限制分析器
pub struct ConstraintAnalyzer<'a> {
    config: &'a PlannerConfig,
}

impl<'a> ConstraintAnalyzer<'a> {
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// 分析單一區域：稼動率分級與未滿足需求
    pub fn analyze_area(&self, allocation: &AreaAllocation, demand: &DemandTable) -> AreaAnalysis {
        let mut summary = AreaSummary {
            area: allocation.area.clone(),
            total_lines: allocation.lines.len(),
            average_utilization: 0.0,
            overloaded_lines: 0,
            balanced_lines: 0,
            underutilized_lines: 0,
            lines_at_capacity: 0,
            total_demand_units: allocation.remaining.total_seeded(),
            total_allocated_units: allocation.total_allocated_units(),
            total_unfulfilled_units: 0.0,
            fulfillment_percent: 100.0,
        };

        let mut total_utilization = 0.0;
        for line in &allocation.lines {
            let utilization = line.utilization_percent();
            total_utilization += utilization;

            match self.config.classify_utilization(utilization) {
                UtilizationBand::Overloaded => summary.overloaded_lines += 1,
                UtilizationBand::Balanced => summary.balanced_lines += 1,
                UtilizationBand::Underutilized => summary.underutilized_lines += 1,
            }
            if self.config.is_at_capacity(utilization) {
                summary.lines_at_capacity += 1;
            }
        }
        if !allocation.lines.is_empty() {
            summary.average_utilization = total_utilization / allocation.lines.len() as f64;
        }

        let unfulfilled: Vec<UnfulfilledDemand> = allocation
            .remaining
            .unfulfilled()
            .into_iter()
            .map(|(model_id, remaining)| {
                let full_demand = allocation.remaining.seeded(model_id);
                let allocated = allocation.allocated_units(model_id);
                UnfulfilledDemand {
                    area: allocation.area.clone(),
                    model_id: model_id.to_string(),
                    model_name: demand.model_name(model_id).to_string(),
                    demand_units_daily: full_demand,
                    allocated_units_daily: allocated,
                    unfulfilled_units_daily: remaining,
                    fulfillment_percent: ModelAssignment::fulfillment(allocated, full_demand),
                }
            })
            .collect();

        summary.total_unfulfilled_units = unfulfilled.iter().map(|u| u.unfulfilled_units_daily).sum();
        if summary.total_demand_units > 0.0 {
            summary.fulfillment_percent =
                summary.total_allocated_units / summary.total_demand_units * 100.0;
        }

        AreaAnalysis {
            summary,
            unfulfilled,
        }
    }

    /// 選出年度系統限制
    ///
    /// 1. 有未滿足需求時，選未滿足量最大的區域（平手取先出現者）
    /// 2. 否則平均稼動率 >= 超載門檻時，選平均稼動率最高的區域
    /// 3. 否則無系統限制
    pub fn select_constraint(
        &self,
        areas: &[(AreaAllocation, AreaAnalysis)],
        demand: &DemandTable,
    ) -> Option<SystemConstraint> {
        let mut selected: Option<(usize, ConstraintReason)> = None;

        let mut largest_unfulfilled = 0.0;
        for (i, (_, analysis)) in areas.iter().enumerate() {
            if analysis.summary.total_unfulfilled_units > largest_unfulfilled {
                largest_unfulfilled = analysis.summary.total_unfulfilled_units;
                selected = Some((i, ConstraintReason::UnfulfilledDemand));
            }
        }

        if selected.is_none() {
            let mut highest_utilization = f64::NEG_INFINITY;
            for (i, (_, analysis)) in areas.iter().enumerate() {
                let utilization = analysis.summary.average_utilization;
                if utilization >= self.config.overloaded_threshold && utilization > highest_utilization {
                    highest_utilization = utilization;
                    selected = Some((i, ConstraintReason::HighestUtilization));
                }
            }
        }

        let (index, reason) = selected?;
        let (allocation, analysis) = &areas[index];
        Some(self.describe(allocation, analysis, reason, demand))
    }

    /// 瓶頸產線、分類與說明
    fn describe(
        &self,
        allocation: &AreaAllocation,
        analysis: &AreaAnalysis,
        reason: ConstraintReason,
        demand: &DemandTable,
    ) -> SystemConstraint {
        let bottleneck_lines: Vec<BottleneckLine> = allocation
            .lines
            .iter()
            .filter(|line| line.utilization_percent() >= self.config.bottleneck_threshold)
            .map(|line| {
                let mut constrained: Vec<ConstrainedModel> = allocation
                    .models_for_line(&line.id)
                    .into_iter()
                    .map(|model_id| (model_id, allocation.remaining.get(model_id)))
                    .filter(|(_, remaining)| self.config.is_unfulfilled(*remaining))
                    .map(|(model_id, remaining)| ConstrainedModel {
                        model_id: model_id.to_string(),
                        model_name: demand.model_name(model_id).to_string(),
                        unfulfilled_units: round_to(remaining, 2),
                    })
                    .collect();
                constrained.sort_by(|a, b| b.unfulfilled_units.total_cmp(&a.unfulfilled_units));
                constrained.truncate(MAX_CONSTRAINED_MODELS);

                BottleneckLine {
                    line_id: line.id.clone(),
                    line_name: line.name.clone(),
                    line_type: line.line_type,
                    utilization_percent: round_to(line.utilization_percent(), 2),
                    unfulfilled_units: round_to(
                        constrained.iter().map(|m| m.unfulfilled_units).sum(),
                        2,
                    ),
                    constrained_models: constrained,
                }
            })
            .collect();

        let classification = classify(&bottleneck_lines);
        let explanation = explain(
            &allocation.area,
            classification,
            reason,
            &bottleneck_lines,
            &analysis.summary,
        );

        tracing::info!(
            "系統限制：區域 {}（{}），瓶頸產線 {} 條",
            allocation.area,
            classification.as_str(),
            bottleneck_lines.len()
        );

        SystemConstraint {
            area: allocation.area.clone(),
            reason,
            classification,
            total_unfulfilled_units: round_to(analysis.summary.total_unfulfilled_units, 2),
            average_utilization: round_to(analysis.summary.average_utilization, 2),
            bottleneck_lines,
            explanation,
        }
    }
}

/// 依瓶頸產線類型分類（無瓶頸產線時視為共用產能限制）
pub fn classify(lines: &[BottleneckLine]) -> ConstraintClassification {
    let dedicated = lines
        .iter()
        .filter(|l| l.line_type == LineType::Dedicated)
        .count();

    if lines.is_empty() || dedicated == 0 {
        ConstraintClassification::SharedCapacityConstraint
    } else if dedicated == lines.len() {
        ConstraintClassification::DedicatedLineBottleneck
    } else {
        ConstraintClassification::MixedConstraint
    }
}

fn explain(
    area: &str,
    classification: ConstraintClassification,
    reason: ConstraintReason,
    lines: &[BottleneckLine],
    summary: &AreaSummary,
) -> String {
    let named = lines
        .iter()
        .take(MAX_NAMED_LINES)
        .map(|l| l.line_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let cause = match classification {
        ConstraintClassification::DedicatedLineBottleneck => format!(
            "Area {area} is limited by dedicated line(s) {named}, which cannot take overflow from other lines."
        ),
        ConstraintClassification::SharedCapacityConstraint if lines.is_empty() => {
            format!("Area {area} is limited by the total shared capacity of its lines.")
        }
        ConstraintClassification::SharedCapacityConstraint => format!(
            "Area {area} is limited by total shared capacity; lines {named} are heavily loaded."
        ),
        ConstraintClassification::MixedConstraint => format!(
            "Area {area} is limited by a mix of dedicated and shared lines ({named})."
        ),
    };

    let detail = match reason {
        ConstraintReason::UnfulfilledDemand => format!(
            " Unfulfilled demand: {:.2} units/day.",
            summary.total_unfulfilled_units
        ),
        ConstraintReason::HighestUtilization => format!(
            " Average utilization: {:.2}%.",
            summary.average_utilization
        ),
    };

    cause + &detail
}
