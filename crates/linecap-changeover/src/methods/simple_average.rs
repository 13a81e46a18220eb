//! 簡單平均法：所有非對角換線時間的算術平均，不考慮需求組合

use crate::method::{build_result, off_diagonal_pairs, sort_descending_by, zero_result};
use crate::types::{ChangeoverInput, ChangeoverResult, MethodConfig, TransitionAnalysis};
use crate::ChangeoverMethod;

#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleAverage;

impl ChangeoverMethod for SimpleAverage {
    fn id(&self) -> &'static str {
        "simple_average"
    }

    fn name(&self) -> &'static str {
        "Simple Average"
    }

    fn description(&self) -> &'static str {
        "Uses the arithmetic mean of all changeover times. \
         Simpler but does not account for demand mix."
    }

    fn calculate(
        &self,
        input: &ChangeoverInput,
        _config: &MethodConfig,
    ) -> crate::Result<ChangeoverResult> {
        let n = input.models.len();
        if n < 2 {
            return Ok(zero_result(
                self.id(),
                input,
                "Less than 2 models - no changeover needed".to_string(),
            ));
        }

        // 每個有序配對的機率相同
        let uniform_probability = 1.0 / (n * (n - 1)) as f64;

        let mut total_minutes = 0.0;
        let mut count = 0usize;
        let mut transitions = Vec::new();

        for (from, to) in off_diagonal_pairs(&input.models) {
            let minutes = input.matrix.minutes(&from.model_id, &to.model_id);
            total_minutes += minutes;
            count += 1;

            transitions.push(TransitionAnalysis::new(
                from,
                to,
                minutes,
                uniform_probability,
                minutes * uniform_probability,
            ));
        }

        let average_minutes = if count > 0 {
            total_minutes / count as f64
        } else {
            0.0
        };

        if total_minutes > 0.0 {
            for t in &mut transitions {
                t.percent_of_total = t.changeover_minutes / total_minutes * 100.0;
            }
        }
        sort_descending_by(&mut transitions, |t| t.changeover_minutes);

        let average_seconds = average_minutes * 60.0;
        let total_seconds = average_seconds * f64::from(input.changeovers_per_day);

        Ok(build_result(
            self.id(),
            input,
            total_seconds,
            average_seconds,
            transitions,
            Vec::new(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::test_support::input;

    #[test]
    fn test_average_of_off_diagonal() {
        let input = input(
            &[("A", 90.0), ("B", 5.0), ("C", 5.0)],
            &[
                ("A", "B", 10.0),
                ("A", "C", 20.0),
                ("B", "A", 30.0),
                ("B", "C", 40.0),
                ("C", "A", 50.0),
                ("C", "B", 60.0),
            ],
        );
        let result = SimpleAverage.calculate(&input, &MethodConfig::default()).unwrap();

        // 平均 35 分鐘，與需求組合無關
        assert_eq!(result.expected_changeover_time, 2_100.0);
        assert_eq!(result.time_used_changeover, 4_200.0);
        assert_eq!(result.method_used, "simple_average");

        let top = &result.top_costly_transitions[0];
        assert_eq!(top.changeover_minutes, 60.0);
        assert_eq!(top.probability, 0.166667);
        assert_eq!(top.weighted_contribution, 10.0);
        // 60 / 210
        assert_eq!(top.percent_of_total, 28.57);
    }

    #[test]
    fn test_single_model() {
        let input = input(&[("A", 10.0)], &[]);
        let result = SimpleAverage.calculate(&input, &MethodConfig::default()).unwrap();
        assert_eq!(result.expected_changeover_time, 0.0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_zero_matrix() {
        let input = input(&[("A", 10.0), ("B", 10.0)], &[]);
        let result = SimpleAverage.calculate(&input, &MethodConfig::default()).unwrap();
        assert_eq!(result.expected_changeover_time, 0.0);
        assert!(result
            .top_costly_transitions
            .iter()
            .all(|t| t.percent_of_total == 0.0));
    }
}
