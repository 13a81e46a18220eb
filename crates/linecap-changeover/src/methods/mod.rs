//! 內建換線估算方法
//!
//! - **probability_weighted**：依需求組合加權（預設、建議）
//! - **simple_average**：矩陣非對角元素的算術平均（備援）
//! - **worst_case**：矩陣最大值（保守估計）
//! - **tsp_optimal**：最佳排序（尚未實作）

mod probability_weighted;
mod sequence_optimal;
mod simple_average;
mod worst_case;

pub use probability_weighted::ProbabilityWeighted;
pub use sequence_optimal::SequenceOptimal;
pub use simple_average::SimpleAverage;
pub use worst_case::WorstCase;
