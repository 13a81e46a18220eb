//! 換線估算方法介面與共用結果建構

use linecap_core::{round_to, stats::herfindahl_index};

use crate::matrix::ChangeoverMatrix;
use crate::types::{
    ChangeoverInput, ChangeoverResult, MethodConfig, MethodInfo, ModelInfo, TransitionAnalysis,
};
use crate::TOP_TRANSITIONS;

/// 換線估算方法
///
/// 各方法可互換，由 [`crate::MethodRegistry`] 依ID分派。
pub trait ChangeoverMethod: Send + Sync {
    /// 方法ID
    fn id(&self) -> &'static str;

    /// 顯示名稱
    fn name(&self) -> &'static str;

    /// 方法說明
    fn description(&self) -> &'static str;

    /// 是否已實作
    fn implemented(&self) -> bool {
        true
    }

    /// 是否需要歷史生產資料
    fn requires_historical_data(&self) -> bool {
        false
    }

    /// 計算產線的換線時間損失
    fn calculate(
        &self,
        input: &ChangeoverInput,
        config: &MethodConfig,
    ) -> crate::Result<ChangeoverResult>;

    /// 方法目錄項目
    fn info(&self) -> MethodInfo {
        MethodInfo {
            id: self.id().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            implemented: self.implemented(),
            requires_historical_data: self.requires_historical_data(),
        }
    }
}

/// 所有不同機種的有序配對 (from, to)
pub(crate) fn off_diagonal_pairs(
    models: &[ModelInfo],
) -> impl Iterator<Item = (&ModelInfo, &ModelInfo)> {
    models.iter().flat_map(move |from| {
        models
            .iter()
            .filter(move |to| to.model_id != from.model_id)
            .map(move |to| (from, to))
    })
}

/// 機種組合的 HHI（以分配量計算）
pub fn models_hhi(models: &[ModelInfo]) -> f64 {
    herfindahl_index(models.iter().map(|m| m.allocated_units_daily))
}

/// 矩陣中最長的換線時間（分鐘）
pub fn worst_case_minutes(models: &[ModelInfo], matrix: &ChangeoverMatrix) -> f64 {
    off_diagonal_pairs(models)
        .map(|(from, to)| matrix.minutes(&from.model_id, &to.model_id))
        .fold(0.0, f64::max)
}

/// 依降序排列（穩定排序，相同值保留原順序）
pub(crate) fn sort_descending_by<F>(transitions: &mut [TransitionAnalysis], key: F)
where
    F: Fn(&TransitionAnalysis) -> f64,
{
    transitions.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

/// 建立標準化的換線結果
///
/// 生產時間 = 可用時間 - 換線時間（不足時歸零並發出警告）。
/// 最長換線時間一律由原始矩陣重新計算，與使用的方法無關。
pub fn build_result(
    method_id: &str,
    input: &ChangeoverInput,
    time_used_changeover: f64,
    expected_changeover_time: f64,
    transitions: Vec<TransitionAnalysis>,
    mut warnings: Vec<String>,
) -> ChangeoverResult {
    let time_available = input.time_available_daily;

    let mut time_used_production = time_available - time_used_changeover;
    if time_used_production < 0.0 {
        time_used_production = 0.0;
        warnings.push("Changeover time exceeds available time".to_string());
    }

    let total_time_used = time_used_production + time_used_changeover;

    let (util_production, util_with_changeover) = if time_available > 0.0 {
        (
            time_used_production / time_available * 100.0,
            total_time_used / time_available * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    let impact_percent = (util_production - util_with_changeover).max(0.0);

    let hhi = models_hhi(&input.models);
    let worst_case = worst_case_minutes(&input.models, &input.matrix);

    ChangeoverResult {
        line_id: input.line_id.clone(),
        line_name: input.line_name.clone(),
        area: input.area.clone(),
        method_used: method_id.to_string(),

        time_used_production: round_to(time_used_production, 2),
        time_used_changeover: round_to(time_used_changeover, 2),
        total_time_used: round_to(total_time_used, 2),
        time_available,

        utilization_production_only: round_to(util_production, 2),
        utilization_with_changeover: round_to(util_with_changeover, 2),
        changeover_impact_percent: round_to(impact_percent, 2),

        estimated_changeover_count: input.changeovers_per_day,
        expected_changeover_time: round_to(expected_changeover_time, 2),
        worst_case_changeover_time: round_to(worst_case * 60.0, 2),

        top_costly_transitions: transitions
            .into_iter()
            .take(TOP_TRANSITIONS)
            .map(TransitionAnalysis::rounded)
            .collect(),
        hhi: round_to(hhi, 4),
        warnings,
    }
}

/// 零換線結果（機種不足等退化情況）
pub(crate) fn zero_result(method_id: &str, input: &ChangeoverInput, warning: String) -> ChangeoverResult {
    build_result(method_id, input, 0.0, 0.0, Vec::new(), vec![warning])
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// 建立測試輸入：機種 (ID, 分配量)，矩陣 (from, to, 分鐘)
    pub fn input(models: &[(&str, f64)], entries: &[(&str, &str, f64)]) -> ChangeoverInput {
        let mut matrix = ChangeoverMatrix::new();
        for (from, to, minutes) in entries {
            matrix.set(from, to, *minutes);
        }

        ChangeoverInput {
            line_id: "L1".to_string(),
            line_name: "SMT-1".to_string(),
            area: "SMT".to_string(),
            models: models
                .iter()
                .map(|(id, units)| ModelInfo::new(id, &format!("Model {}", id), *units))
                .collect(),
            matrix,
            changeovers_per_day: crate::estimate_changeovers_per_day(models.len()),
            time_available_daily: 28_800.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::input;
    use super::*;

    #[test]
    fn test_worst_case_minutes_ignores_absent_models() {
        let input = input(
            &[("A", 10.0), ("B", 10.0)],
            &[("A", "B", 12.0), ("B", "A", 8.0), ("A", "C", 90.0)],
        );
        assert_eq!(worst_case_minutes(&input.models, &input.matrix), 12.0);
    }

    #[test]
    fn test_build_result_time_breakdown() {
        let input = input(&[("A", 10.0), ("B", 30.0)], &[("A", "B", 10.0), ("B", "A", 20.0)]);
        let result = build_result("test", &input, 1_800.0, 900.0, Vec::new(), Vec::new());

        assert_eq!(result.time_used_changeover, 1_800.0);
        assert_eq!(result.time_used_production, 27_000.0);
        assert_eq!(result.total_time_used, 28_800.0);
        assert_eq!(result.utilization_production_only, 93.75);
        assert_eq!(result.utilization_with_changeover, 100.0);
        assert_eq!(result.changeover_impact_percent, 0.0);
        assert_eq!(result.worst_case_changeover_time, 1_200.0);
        // 0.25² + 0.75²
        assert_eq!(result.hhi, 0.625);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_build_result_changeover_exceeds_available() {
        let mut input = input(&[("A", 10.0), ("B", 10.0)], &[]);
        input.time_available_daily = 600.0;

        let result = build_result("test", &input, 1_200.0, 1_200.0, Vec::new(), Vec::new());
        assert_eq!(result.time_used_production, 0.0);
        assert_eq!(result.utilization_with_changeover, 200.0);
        assert_eq!(result.changeover_impact_percent, 0.0);
        assert_eq!(
            result.warnings,
            vec!["Changeover time exceeds available time".to_string()]
        );
    }

    #[test]
    fn test_build_result_zero_capacity() {
        let mut input = input(&[("A", 10.0), ("B", 10.0)], &[]);
        input.time_available_daily = 0.0;

        let result = build_result("test", &input, 0.0, 0.0, Vec::new(), Vec::new());
        assert_eq!(result.utilization_production_only, 0.0);
        assert_eq!(result.utilization_with_changeover, 0.0);
    }

    #[test]
    fn test_top_transitions_truncated() {
        let input = input(&[("A", 1.0)], &[]);
        let from = ModelInfo::new("A", "Model A", 1.0);
        let to = ModelInfo::new("B", "Model B", 1.0);
        let transitions: Vec<_> = (0..15)
            .map(|i| TransitionAnalysis::new(&from, &to, i as f64, 0.1, i as f64))
            .collect();

        let result = build_result("test", &input, 0.0, 0.0, transitions, Vec::new());
        assert_eq!(result.top_costly_transitions.len(), TOP_TRANSITIONS);
    }
}
