//! 換線矩陣建構

use linecap_core::{ChangeoverSettings, ModelCatalog};
use std::collections::HashMap;

/// 換線矩陣：(from, to) → 分鐘，對角線恆為 0
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeoverMatrix {
    entries: HashMap<(String, String), f64>,
}

impl ChangeoverMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// 設定一組轉換時間；同機種轉換忽略
    pub fn set(&mut self, from_model_id: &str, to_model_id: &str, minutes: f64) {
        if from_model_id == to_model_id {
            return;
        }
        self.entries
            .insert((from_model_id.to_string(), to_model_id.to_string()), minutes);
    }

    /// 建構器模式：設定轉換時間
    pub fn with(mut self, from_model_id: &str, to_model_id: &str, minutes: f64) -> Self {
        self.set(from_model_id, to_model_id, minutes);
        self
    }

    /// 查詢轉換時間（分鐘），對角線與未設定的組合為 0
    pub fn minutes(&self, from_model_id: &str, to_model_id: &str) -> f64 {
        if from_model_id == to_model_id {
            return 0.0;
        }
        self.entries
            .get(&(from_model_id.to_string(), to_model_id.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 每日估計換線次數 = max(1, 機種數 - 1)
pub fn estimate_changeovers_per_day(model_count: usize) -> u32 {
    model_count.saturating_sub(1).max(1) as u32
}

/// 換線矩陣建構器
///
/// 取值優先順序：產線覆寫值 > 族群預設值 > 全域預設值。
pub struct MatrixBuilder<'a> {
    settings: &'a ChangeoverSettings,
    catalog: &'a ModelCatalog,
    line_overrides: HashMap<(&'a str, &'a str, &'a str), f64>,
    family_defaults: HashMap<(&'a str, &'a str), f64>,
}

impl<'a> MatrixBuilder<'a> {
    /// 創建新的建構器（同一鍵值重複設定時以最後一筆為準）
    pub fn new(settings: &'a ChangeoverSettings, catalog: &'a ModelCatalog) -> Self {
        let line_overrides = settings
            .line_overrides
            .iter()
            .map(|o| {
                (
                    (
                        o.line_id.as_str(),
                        o.from_model_id.as_str(),
                        o.to_model_id.as_str(),
                    ),
                    o.changeover_minutes,
                )
            })
            .collect();

        let family_defaults = settings
            .family_defaults
            .iter()
            .map(|f| {
                (
                    (f.from_family.as_str(), f.to_family.as_str()),
                    f.changeover_minutes,
                )
            })
            .collect();

        Self {
            settings,
            catalog,
            line_overrides,
            family_defaults,
        }
    }

    /// 解析單一轉換的時間（分鐘）
    pub fn resolve(&self, line_id: &str, from_model_id: &str, to_model_id: &str) -> f64 {
        if from_model_id == to_model_id {
            return 0.0;
        }

        if let Some(&minutes) = self
            .line_overrides
            .get(&(line_id, from_model_id, to_model_id))
        {
            return minutes;
        }

        if let (Some(from_family), Some(to_family)) = (
            self.catalog.family(from_model_id),
            self.catalog.family(to_model_id),
        ) {
            if let Some(&minutes) = self.family_defaults.get(&(from_family, to_family)) {
                return minutes;
            }
        }

        self.settings.global_default_minutes
    }

    /// 為產線上的機種組合建立完整矩陣
    pub fn build(&self, line_id: &str, model_ids: &[&str]) -> ChangeoverMatrix {
        let mut matrix = ChangeoverMatrix::new();
        for from in model_ids {
            for to in model_ids {
                if from != to {
                    matrix.set(from, to, self.resolve(line_id, from, to));
                }
            }
        }
        matrix
    }
}
