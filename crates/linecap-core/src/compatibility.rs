//! 機種-產線相容性

use serde::{Deserialize, Serialize};

/// 未指定優先級時的預設值（最後處理）
pub const DEFAULT_PRIORITY: u32 = 999;

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

/// 相容性：宣告某機種可在某產線生產（唯讀輸入）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compatibility {
    /// 產線ID
    pub line_id: String,

    /// 機種ID
    pub model_id: String,

    /// 標準週期時間（秒/件）
    pub cycle_time: f64,

    /// 效率（0-100）
    pub efficiency: f64,

    /// 優先級（1 最優先）
    #[serde(default = "default_priority")]
    pub priority: u32,
}

impl Compatibility {
    /// 創建新的相容性記錄
    pub fn new(line_id: &str, model_id: &str, cycle_time: f64, efficiency: f64, priority: u32) -> Self {
        Self {
            line_id: line_id.to_string(),
            model_id: model_id.to_string(),
            cycle_time,
            efficiency,
            priority,
        }
    }

    /// 考慮效率後的週期時間 = 週期時間 / (效率 / 100)
    ///
    /// 效率或週期時間非正值時無法生產，回傳 None。
    pub fn adjusted_cycle_time(&self) -> Option<f64> {
        if self.efficiency <= 0.0 || self.cycle_time <= 0.0 {
            return None;
        }
        Some(self.cycle_time / (self.efficiency / 100.0))
    }
}
