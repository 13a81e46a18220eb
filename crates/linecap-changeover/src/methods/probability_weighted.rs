//! 機率加權法
//!
//! 每次換線期望時間 = Σ P[i]·P[j]·T[i,j] / (1 - HHI)，i ≠ j
//!
//! P[i] 為機種 i 的分配占比，HHI = Σ P[i]²。除以 (1 - HHI) 是因為
//! 同機種連續生產不產生換線。

use std::collections::HashMap;

use crate::method::{build_result, models_hhi, off_diagonal_pairs, sort_descending_by, zero_result};
use crate::types::{ChangeoverInput, ChangeoverResult, MethodConfig, TransitionAnalysis};
use crate::ChangeoverMethod;

/// (1 - HHI) 低於此值視為單一機種主導
const DOMINANCE_MARGIN: f64 = 0.01;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilityWeighted;

impl ChangeoverMethod for ProbabilityWeighted {
    fn id(&self) -> &'static str {
        "probability_weighted"
    }

    fn name(&self) -> &'static str {
        "Probability-Weighted Heuristic"
    }

    fn description(&self) -> &'static str {
        "Weights changeover times by the probability of each transition, \
         based on demand proportions. Accounts for model mix concentration."
    }

    fn calculate(
        &self,
        input: &ChangeoverInput,
        config: &MethodConfig,
    ) -> crate::Result<ChangeoverResult> {
        let min_models = config.min_models_for_probability;
        if input.models.len() < min_models {
            return Ok(zero_result(
                self.id(),
                input,
                format!("Less than {} models - no changeover needed", min_models),
            ));
        }

        let total: f64 = input.models.iter().map(|m| m.allocated_units_daily).sum();
        if total <= 0.0 {
            return Ok(zero_result(
                self.id(),
                input,
                "No allocated demand - cannot calculate proportions".to_string(),
            ));
        }

        let proportions: HashMap<&str, f64> = input
            .models
            .iter()
            .map(|m| (m.model_id.as_str(), m.allocated_units_daily / total))
            .collect();
        let hhi = models_hhi(&input.models);

        let mut warnings = Vec::new();
        let mut weighted_sum = 0.0;
        let mut transitions = Vec::new();

        for (from, to) in off_diagonal_pairs(&input.models) {
            let minutes = input.matrix.minutes(&from.model_id, &to.model_id);
            let probability = proportions[from.model_id.as_str()] * proportions[to.model_id.as_str()];
            let contribution = probability * minutes;
            weighted_sum += contribution;

            transitions.push(TransitionAnalysis::new(
                from,
                to,
                minutes,
                probability,
                contribution,
            ));
        }

        let normalization = 1.0 - hhi;
        let expected_minutes = if normalization <= DOMINANCE_MARGIN {
            warnings.push("HHI >= 0.99: production dominated by single model".to_string());
            0.0
        } else {
            weighted_sum / normalization
        };

        let total_contribution: f64 = transitions.iter().map(|t| t.weighted_contribution).sum();
        if total_contribution > 0.0 {
            for t in &mut transitions {
                t.percent_of_total = t.weighted_contribution / total_contribution * 100.0;
            }
        }
        sort_descending_by(&mut transitions, |t| t.weighted_contribution);

        let expected_seconds = expected_minutes * 60.0;
        let total_seconds = expected_seconds * f64::from(input.changeovers_per_day);

        Ok(build_result(
            self.id(),
            input,
            total_seconds,
            expected_seconds,
            transitions,
            warnings,
        ))
    }
}
