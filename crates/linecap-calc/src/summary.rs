//! 結果彙總：產線結果、年度彙總與跨年度彙總

use std::collections::HashSet;

use linecap_changeover::ChangeoverResult;
use linecap_core::stats::herfindahl_index;
use linecap_core::{round_to, DemandTable, ModelAssignment, PlannerConfig, ProductionLine, UtilizationBand};

use crate::constraint::AreaAnalysis;
use crate::report::{
    AreaSummary, ConstrainedYear, LineResult, OverallSummary, UnfulfilledDemand, YearResult,
    YearSummary,
};

/// 結果彙總器
pub struct ResultAggregator<'a> {
    config: &'a PlannerConfig,
}

impl<'a> ResultAggregator<'a> {
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// 產線結果（數值四捨五入）
    pub fn line_result(&self, line: &ProductionLine, changeover: Option<ChangeoverResult>) -> LineResult {
        let utilization_with_changeover = changeover.as_ref().map(|c| {
            if line.time_available_daily > 0.0 {
                round_to(
                    (line.time_used_daily + c.time_used_changeover) / line.time_available_daily * 100.0,
                    2,
                )
            } else {
                0.0
            }
        });

        LineResult {
            line_id: line.id.clone(),
            line_name: line.name.clone(),
            area: line.area.clone(),
            line_type: line.line_type,
            time_available_daily: line.time_available_daily,
            time_used_daily: round_to(line.time_used_daily, 2),
            utilization_percent: round_to(line.utilization_percent(), 2),
            hhi: round_to(
                herfindahl_index(line.assignments.iter().map(|a| a.allocated_units_daily)),
                4,
            ),
            assignments: line.assignments.iter().map(rounded_assignment).collect(),
            changeover,
            utilization_with_changeover_percent: utilization_with_changeover,
        }
    }

    /// 年度彙總
    ///
    /// `lines` 為已四捨五入的產線結果，`areas` 為未四捨五入的區域分析。
    pub fn year_summary(
        &self,
        lines: &[LineResult],
        areas: &[AreaAnalysis],
        demand: &DemandTable,
    ) -> YearSummary {
        let mut summary = YearSummary {
            total_lines: lines.len(),
            total_areas: areas.len(),
            average_utilization: 0.0,
            overloaded_lines: 0,
            balanced_lines: 0,
            underutilized_lines: 0,
            lines_at_capacity: 0,
            total_models: demand.len(),
            assigned_models: 0,
            unassigned_models: 0,
            total_allocated_units: 0.0,
            total_unfulfilled_units: 0.0,
            demand_fulfillment_percent: 100.0,
            lines_with_changeover: 0,
            total_changeover_seconds: 0.0,
        };

        let mut assigned: HashSet<&str> = HashSet::new();
        let mut total_utilization = 0.0;

        for line in lines {
            total_utilization += line.utilization_percent;
            match self.config.classify_utilization(line.utilization_percent) {
                UtilizationBand::Overloaded => summary.overloaded_lines += 1,
                UtilizationBand::Balanced => summary.balanced_lines += 1,
                UtilizationBand::Underutilized => summary.underutilized_lines += 1,
            }
            if self.config.is_at_capacity(line.utilization_percent) {
                summary.lines_at_capacity += 1;
            }
            if let Some(changeover) = &line.changeover {
                summary.lines_with_changeover += 1;
                summary.total_changeover_seconds += changeover.time_used_changeover;
            }
            assigned.extend(line.assignments.iter().map(|a| a.model_id.as_str()));
        }

        if !lines.is_empty() {
            summary.average_utilization = round_to(total_utilization / lines.len() as f64, 2);
        }

        summary.assigned_models = assigned.len();
        summary.unassigned_models = summary.total_models.saturating_sub(assigned.len());
        summary.total_changeover_seconds = round_to(summary.total_changeover_seconds, 2);

        summary.total_allocated_units = round_to(
            areas.iter().map(|a| a.summary.total_allocated_units).sum(),
            2,
        );
        summary.total_unfulfilled_units = round_to(
            areas.iter().map(|a| a.summary.total_unfulfilled_units).sum(),
            2,
        );
        if !areas.is_empty() {
            let total: f64 = areas.iter().map(|a| a.summary.fulfillment_percent).sum();
            summary.demand_fulfillment_percent = round_to(total / areas.len() as f64, 2);
        }

        summary
    }

    /// 跨年度彙總（`total_lines` 為輸入的產線數）
    pub fn overall_summary(&self, years: &[YearResult], total_lines: usize) -> OverallSummary {
        let average_utilization = if years.is_empty() {
            0.0
        } else {
            years.iter().map(|y| y.summary.average_utilization).sum::<f64>() / years.len() as f64
        };

        OverallSummary {
            years_processed: years.len(),
            average_utilization_all_years: round_to(average_utilization, 2),
            total_lines_analyzed: total_lines,
            total_unfulfilled_units: round_to(
                years.iter().map(|y| y.summary.total_unfulfilled_units).sum(),
                2,
            ),
            constrained_years: years
                .iter()
                .filter_map(|y| {
                    y.system_constraint.as_ref().map(|c| ConstrainedYear {
                        year: y.year,
                        area: c.area.clone(),
                        classification: c.classification,
                    })
                })
                .collect(),
        }
    }
}

/// 區域彙總（輸出用）
pub fn rounded_area_summary(summary: &AreaSummary) -> AreaSummary {
    AreaSummary {
        average_utilization: round_to(summary.average_utilization, 2),
        total_demand_units: round_to(summary.total_demand_units, 2),
        total_allocated_units: round_to(summary.total_allocated_units, 2),
        total_unfulfilled_units: round_to(summary.total_unfulfilled_units, 2),
        fulfillment_percent: round_to(summary.fulfillment_percent, 2),
        ..summary.clone()
    }
}

/// 未滿足需求（輸出用）
pub fn rounded_unfulfilled(entry: &UnfulfilledDemand) -> UnfulfilledDemand {
    UnfulfilledDemand {
        demand_units_daily: round_to(entry.demand_units_daily, 2),
        allocated_units_daily: round_to(entry.allocated_units_daily, 2),
        unfulfilled_units_daily: round_to(entry.unfulfilled_units_daily, 2),
        fulfillment_percent: round_to(entry.fulfillment_percent, 2),
        ..entry.clone()
    }
}

fn rounded_assignment(assignment: &ModelAssignment) -> ModelAssignment {
    ModelAssignment {
        allocated_units_daily: round_to(assignment.allocated_units_daily, 2),
        demand_units_daily: round_to(assignment.demand_units_daily, 2),
        time_required_seconds: round_to(assignment.time_required_seconds, 2),
        fulfillment_percent: round_to(assignment.fulfillment_percent, 2),
        ..assignment.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ConstraintClassification, ConstraintReason, SystemConstraint};
    use linecap_core::{ModelCatalog, VolumeRecord};

    fn line(id: &str, used: f64, models: &[(&str, f64)]) -> ProductionLine {
        let mut line = ProductionLine::new(id.to_string(), id.to_string(), "SMT".to_string(), 1_000.0);
        line.time_used_daily = used;
        for (model, units) in models {
            line.assignments.push(ModelAssignment::new(
                model.to_string(),
                model.to_string(),
                *units,
                *units,
                0.0,
                1.0,
                100.0,
                1,
            ));
        }
        line
    }

    fn area(total_demand: f64, allocated: f64, unfulfilled: f64) -> AreaAnalysis {
        AreaAnalysis {
            summary: AreaSummary {
                area: "SMT".to_string(),
                total_lines: 1,
                average_utilization: 0.0,
                overloaded_lines: 0,
                balanced_lines: 0,
                underutilized_lines: 0,
                lines_at_capacity: 0,
                total_demand_units: total_demand,
                total_allocated_units: allocated,
                total_unfulfilled_units: unfulfilled,
                fulfillment_percent: allocated / total_demand * 100.0,
            },
            unfulfilled: Vec::new(),
        }
    }

    fn demand(models: &[&str]) -> DemandTable {
        let volumes: Vec<VolumeRecord> = models
            .iter()
            .map(|id| VolumeRecord::new(id, 2025, 10.0, 1.0))
            .collect();
        DemandTable::for_year(&volumes, 2025, &ModelCatalog::default())
    }

    #[test]
    fn test_line_result_rounds_and_reports_hhi() {
        let config = PlannerConfig::default();
        let result = ResultAggregator::new(&config).line_result(
            &line("L1", 813.6666, &[("A", 1.0 / 3.0), ("B", 2.0 / 3.0)]),
            None,
        );

        assert_eq!(result.time_used_daily, 813.67);
        assert_eq!(result.utilization_percent, 81.37);
        assert_eq!(result.assignments[0].allocated_units_daily, 0.33);
        // (1/3)^2 + (2/3)^2
        assert_eq!(result.hhi, 0.5556);
        assert!(result.changeover.is_none());
        assert!(result.utilization_with_changeover_percent.is_none());
    }

    #[test]
    fn test_year_summary_counts() {
        let config = PlannerConfig::default();
        let aggregator = ResultAggregator::new(&config);
        let lines = vec![
            aggregator.line_result(&line("L1", 1_000.0, &[("A", 5.0)]), None),
            aggregator.line_result(&line("L2", 500.0, &[("A", 1.0), ("B", 1.0)]), None),
        ];
        let areas = vec![area(10.0, 10.0, 0.0), area(10.0, 5.0, 5.0)];

        let summary = aggregator.year_summary(&lines, &areas, &demand(&["A", "B", "C"]));

        assert_eq!(summary.total_lines, 2);
        assert_eq!(summary.total_areas, 2);
        assert_eq!(summary.average_utilization, 75.0);
        assert_eq!(summary.balanced_lines, 1);
        assert_eq!(summary.underutilized_lines, 1);
        assert_eq!(summary.lines_at_capacity, 1);
        assert_eq!(summary.total_models, 3);
        assert_eq!(summary.assigned_models, 2);
        assert_eq!(summary.unassigned_models, 1);
        assert_eq!(summary.total_allocated_units, 15.0);
        assert_eq!(summary.total_unfulfilled_units, 5.0);
        // (100 + 50) / 2
        assert_eq!(summary.demand_fulfillment_percent, 75.0);
    }

    #[test]
    fn test_year_summary_without_areas() {
        let config = PlannerConfig::default();
        let summary = ResultAggregator::new(&config).year_summary(&[], &[], &DemandTable::default());
        assert_eq!(summary.demand_fulfillment_percent, 100.0);
        assert_eq!(summary.average_utilization, 0.0);
    }

    #[test]
    fn test_overall_summary_lists_constrained_years() {
        let config = PlannerConfig::default();
        let aggregator = ResultAggregator::new(&config);
        let year = |year: i32, utilization: f64, constrained: bool| YearResult {
            year,
            lines: Vec::new(),
            unfulfilled_demand: Vec::new(),
            area_summary: Vec::new(),
            system_constraint: constrained.then(|| SystemConstraint {
                area: "SMT".to_string(),
                reason: ConstraintReason::UnfulfilledDemand,
                classification: ConstraintClassification::MixedConstraint,
                total_unfulfilled_units: 1.0,
                average_utilization: utilization,
                bottleneck_lines: Vec::new(),
                explanation: String::new(),
            }),
            summary: YearSummary {
                total_lines: 2,
                average_utilization: utilization,
                total_unfulfilled_units: if constrained { 1.5 } else { 0.0 },
                ..aggregator.year_summary(&[], &[], &DemandTable::default())
            },
        };

        let overall =
            aggregator.overall_summary(&[year(2025, 80.0, false), year(2026, 90.0, true)], 2);

        assert_eq!(overall.years_processed, 2);
        assert_eq!(overall.average_utilization_all_years, 85.0);
        assert_eq!(overall.total_lines_analyzed, 2);
        assert_eq!(overall.total_unfulfilled_units, 1.5);
        assert_eq!(
            overall.constrained_years,
            vec![ConstrainedYear {
                year: 2026,
                area: "SMT".to_string(),
                classification: ConstraintClassification::MixedConstraint,
            }]
        );
    }
}
