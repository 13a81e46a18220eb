//! # Line Capacity Changeover
//!
//! 換線時間估算模組：換線矩陣建構、可替換的估算方法與方法註冊表

pub mod matrix;
pub mod method;
pub mod methods;
pub mod registry;
pub mod types;

// Re-export 主要類型
pub use matrix::{estimate_changeovers_per_day, ChangeoverMatrix, MatrixBuilder};
pub use method::ChangeoverMethod;
pub use methods::{ProbabilityWeighted, SequenceOptimal, SimpleAverage, WorstCase};
pub use registry::MethodRegistry;
pub use types::{
    ChangeoverInput, ChangeoverResult, MethodConfig, MethodInfo, ModelInfo, TransitionAnalysis,
};

/// 換線計算錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChangeoverError {
    #[error("未知的換線計算方法: {0}")]
    UnknownMethod(String),

    #[error("換線計算方法尚未實作: {0}")]
    NotImplemented(String),

    #[error("換線計算失敗: {0}")]
    Calculation(String),
}

impl From<ChangeoverError> for linecap_core::CapaError {
    fn from(err: ChangeoverError) -> Self {
        linecap_core::CapaError::Changeover(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChangeoverError>;

/// 每次換線的結果最多列出的高成本轉換數
pub const TOP_TRANSITIONS: usize = 10;
