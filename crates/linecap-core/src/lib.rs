//! # Line Capacity Core
//!
//! 核心資料模型與類型定義

pub mod assignment;
pub mod changeover;
pub mod compatibility;
pub mod config;
pub mod input;
pub mod line;
pub mod model;
pub mod stats;
pub mod volume;

// Re-export 主要類型
pub use assignment::ModelAssignment;
pub use changeover::{
    ChangeoverSettings, FamilyChangeover, LineChangeoverOverride, DEFAULT_CHANGEOVER_MINUTES,
    DEFAULT_CHANGEOVER_METHOD,
};
pub use compatibility::Compatibility;
pub use config::{PlannerConfig, UtilizationBand};
pub use input::PlanningInput;
pub use line::{LineDefinition, LineType, ProductionLine};
pub use model::{ModelCatalog, ProductModel};
pub use volume::{DailyDemand, DemandTable, VolumeRecord};

/// 產能規劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum CapaError {
    #[error("檔案讀寫錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析錯誤: {0}")]
    Json(#[from] serde_json::Error),

    #[error("無效的輸入資料: {0}")]
    InvalidInput(String),

    #[error("重複的產線ID: {0}")]
    DuplicateLine(String),

    #[error("無效的配置: {0}")]
    Configuration(String),

    #[error("換線計算錯誤: {0}")]
    Changeover(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CapaError>;

/// 四捨五入到指定小數位（輸出報表用）
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(81.604, 2), 81.6);
        assert_eq!(round_to(0.123456789, 6), 0.123457);
        assert_eq!(round_to(-1.005, 0), -1.0);
    }
}
