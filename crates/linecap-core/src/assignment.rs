//! 機種分配記錄

use serde::{Deserialize, Serialize};

/// 機種分配（一次成功分配產生一筆，建立後不再修改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAssignment {
    /// 機種ID
    pub model_id: String,

    /// 機種名稱
    pub model_name: String,

    /// 每日分配數量
    pub allocated_units_daily: f64,

    /// 本次分配請求的需求量（不一定是機種的完整需求）
    pub demand_units_daily: f64,

    /// 佔用時間（秒）
    pub time_required_seconds: f64,

    /// 標準週期時間（秒/件）
    pub cycle_time: f64,

    /// 效率（0-100）
    pub efficiency: f64,

    /// 優先級（數字越小越優先）
    pub priority: u32,

    /// 滿足率（%）
    pub fulfillment_percent: f64,
}

impl ModelAssignment {
    /// 創建新的分配記錄，滿足率由分配量與需求量推導
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        model_id: String,
        model_name: String,
        allocated_units_daily: f64,
        demand_units_daily: f64,
        time_required_seconds: f64,
        cycle_time: f64,
        efficiency: f64,
        priority: u32,
    ) -> Self {
        Self {
            fulfillment_percent: Self::fulfillment(allocated_units_daily, demand_units_daily),
            model_id,
            model_name,
            allocated_units_daily,
            demand_units_daily,
            time_required_seconds,
            cycle_time,
            efficiency,
            priority,
        }
    }

    /// 滿足率 = 分配量 / 需求量 × 100；需求為 0 視為 100%
    pub fn fulfillment(allocated: f64, demand: f64) -> f64 {
        if demand > 0.0 {
            allocated / demand * 100.0
        } else {
            100.0
        }
    }

    /// 是否完全滿足本次請求
    pub fn is_fully_fulfilled(&self) -> bool {
        self.allocated_units_daily >= self.demand_units_daily
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(40.0, 40.0, 100.0)]
    #[case(20.0, 80.0, 25.0)]
    #[case(0.0, 0.0, 100.0)]
    fn test_fulfillment(#[case] allocated: f64, #[case] demand: f64, #[case] expected: f64) {
        assert_eq!(ModelAssignment::fulfillment(allocated, demand), expected);
    }

    #[test]
    fn test_create_assignment() {
        let assignment = ModelAssignment::new(
            "model-c".to_string(),
            "Model C".to_string(),
            41.6,
            48.0,
            14_682.35,
            300.0,
            85.0,
            1,
        );

        assert_eq!(assignment.priority, 1);
        assert!((assignment.fulfillment_percent - 86.666).abs() < 0.01);
        assert!(!assignment.is_fully_fulfilled());
    }
}
