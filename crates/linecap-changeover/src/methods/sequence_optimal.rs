//! 最佳排序法（旅行推銷員問題）
//!
//! 尚未實作：呼叫時一律回傳 [`ChangeoverError::NotImplemented`]，不提供降級結果。

use crate::types::{ChangeoverInput, ChangeoverResult, MethodConfig};
use crate::{ChangeoverError, ChangeoverMethod};

#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceOptimal;

impl ChangeoverMethod for SequenceOptimal {
    fn id(&self) -> &'static str {
        "tsp_optimal"
    }

    fn name(&self) -> &'static str {
        "TSP Optimal Sequence"
    }

    fn description(&self) -> &'static str {
        "Finds the optimal production sequence using TSP algorithms. \
         Minimizes total changeover by optimizing model order."
    }

    fn implemented(&self) -> bool {
        false
    }

    fn calculate(
        &self,
        _input: &ChangeoverInput,
        _config: &MethodConfig,
    ) -> crate::Result<ChangeoverResult> {
        Err(ChangeoverError::NotImplemented(self.id().to_string()))
    }
}
