//! 換線方法註冊表

use std::collections::HashMap;

use crate::methods::{ProbabilityWeighted, SequenceOptimal, SimpleAverage, WorstCase};
use crate::types::{ChangeoverInput, ChangeoverResult, MethodConfig, MethodInfo};
use crate::{ChangeoverError, ChangeoverMethod};

/// 方法ID → 方法實例
pub struct MethodRegistry {
    methods: Vec<Box<dyn ChangeoverMethod>>,
    index: HashMap<&'static str, usize>,
}

impl MethodRegistry {
    /// 創建空的註冊表
    pub fn new() -> Self {
        Self {
            methods: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// 註冊所有內建方法（含尚未實作的最佳排序法）
    pub fn with_builtin_methods() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ProbabilityWeighted));
        registry.register(Box::new(SimpleAverage));
        registry.register(Box::new(WorstCase));
        registry.register(Box::new(SequenceOptimal));
        registry
    }

    /// 註冊方法（相同ID會取代既有方法）
    pub fn register(&mut self, method: Box<dyn ChangeoverMethod>) {
        let id = method.id();
        match self.index.get(id) {
            Some(&position) => self.methods[position] = method,
            None => {
                self.index.insert(id, self.methods.len());
                self.methods.push(method);
            }
        }
    }

    pub fn get(&self, method_id: &str) -> Option<&dyn ChangeoverMethod> {
        self.index
            .get(method_id)
            .map(|&position| self.methods[position].as_ref())
    }

    /// 方法目錄（依註冊順序）
    pub fn list_methods(&self) -> Vec<MethodInfo> {
        self.methods.iter().map(|m| m.info()).collect()
    }

    /// 已實作的方法ID
    pub fn list_implemented(&self) -> Vec<&'static str> {
        self.methods
            .iter()
            .filter(|m| m.implemented())
            .map(|m| m.id())
            .collect()
    }

    /// 確認方法可用（已註冊且已實作）
    pub fn ensure_available(&self, method_id: &str) -> crate::Result<&dyn ChangeoverMethod> {
        let method = self
            .get(method_id)
            .ok_or_else(|| ChangeoverError::UnknownMethod(method_id.to_string()))?;

        if !method.implemented() {
            return Err(ChangeoverError::NotImplemented(method_id.to_string()));
        }

        Ok(method)
    }

    /// 使用指定方法計算
    pub fn calculate(
        &self,
        method_id: &str,
        input: &ChangeoverInput,
        config: &MethodConfig,
    ) -> crate::Result<ChangeoverResult> {
        self.ensure_available(method_id)?.calculate(input, config)
    }

    /// 使用首選方法計算，失敗時改用備援方法
    ///
    /// 首選方法的任何錯誤（未知、未實作、計算失敗）都會被攔截；備援方法本身的錯誤直接回傳。
    pub fn calculate_with_fallback(
        &self,
        preferred_method_id: &str,
        input: &ChangeoverInput,
        config: &MethodConfig,
        fallback_method_id: &str,
    ) -> crate::Result<ChangeoverResult> {
        match self.calculate(preferred_method_id, input, config) {
            Ok(result) => Ok(result),
            Err(err) => {
                tracing::warn!(
                    "產線 {} 換線方法 {} 失敗（{}），改用 {}",
                    input.line_id,
                    preferred_method_id,
                    err,
                    fallback_method_id
                );
                self.calculate(fallback_method_id, input, config)
            }
        }
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::with_builtin_methods()
    }
}
