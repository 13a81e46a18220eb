//! 最差情況法：每次換線都以矩陣最大值估計，用於風險分析與產能緩衝

use crate::method::{build_result, off_diagonal_pairs, sort_descending_by, zero_result};
use crate::types::{ChangeoverInput, ChangeoverResult, MethodConfig, TransitionAnalysis};
use crate::ChangeoverMethod;

#[derive(Debug, Clone, Copy, Default)]
pub struct WorstCase;

impl ChangeoverMethod for WorstCase {
    fn id(&self) -> &'static str {
        "worst_case"
    }

    fn name(&self) -> &'static str {
        "Worst Case (Conservative)"
    }

    fn description(&self) -> &'static str {
        "Uses the maximum changeover time for all transitions. \
         Conservative estimate for risk analysis."
    }

    fn calculate(
        &self,
        input: &ChangeoverInput,
        _config: &MethodConfig,
    ) -> crate::Result<ChangeoverResult> {
        if input.models.len() < 2 {
            return Ok(zero_result(
                self.id(),
                input,
                "Less than 2 models - no changeover needed".to_string(),
            ));
        }

        let pairs: Vec<_> = off_diagonal_pairs(&input.models)
            .map(|(from, to)| (from, to, input.matrix.minutes(&from.model_id, &to.model_id)))
            .collect();

        let max_minutes = pairs.iter().map(|(_, _, m)| *m).fold(0.0, f64::max);
        let worst_pair = pairs
            .iter()
            .find(|(_, _, m)| max_minutes > 0.0 && *m == max_minutes);

        // 與最大值相同的配對機率皆為 1，平手時機率總和可能大於 1
        let mut transitions: Vec<TransitionAnalysis> = pairs
            .iter()
            .map(|(from, to, minutes)| {
                let probability = if *minutes == max_minutes { 1.0 } else { 0.0 };
                let mut t = TransitionAnalysis::new(from, to, *minutes, probability, *minutes);
                if max_minutes > 0.0 {
                    t.percent_of_total = minutes / max_minutes * 100.0;
                }
                t
            })
            .collect();
        sort_descending_by(&mut transitions, |t| t.changeover_minutes);

        let warning = match worst_pair {
            Some((from, to, _)) => format!(
                "Using worst-case: {:.1} min ({} -> {})",
                max_minutes, from.model_name, to.model_name
            ),
            None => "No transitions found".to_string(),
        };

        let max_seconds = max_minutes * 60.0;
        let total_seconds = max_seconds * f64::from(input.changeovers_per_day);

        Ok(build_result(
            self.id(),
            input,
            total_seconds,
            max_seconds,
            transitions,
            vec![warning],
        ))
    }
}
