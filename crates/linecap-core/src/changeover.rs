//! 換線時間設定（輸入文件中的 changeover 區塊）

use serde::{Deserialize, Serialize};

/// 全域預設換線時間（分鐘）
pub const DEFAULT_CHANGEOVER_MINUTES: f64 = 30.0;

/// 預設換線計算方法
pub const DEFAULT_CHANGEOVER_METHOD: &str = "probability_weighted";

fn default_global_minutes() -> f64 {
    DEFAULT_CHANGEOVER_MINUTES
}

fn default_method() -> String {
    DEFAULT_CHANGEOVER_METHOD.to_string()
}

/// 換線設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeoverSettings {
    /// 全域預設換線時間（分鐘），最低優先
    #[serde(default = "default_global_minutes")]
    pub global_default_minutes: f64,

    /// 計算方法ID
    #[serde(default = "default_method")]
    pub calculation_method: String,

    /// 族群對族群的預設值
    #[serde(default)]
    pub family_defaults: Vec<FamilyChangeover>,

    /// 產線專屬覆寫值，最高優先
    #[serde(default)]
    pub line_overrides: Vec<LineChangeoverOverride>,
}

impl Default for ChangeoverSettings {
    fn default() -> Self {
        Self {
            global_default_minutes: DEFAULT_CHANGEOVER_MINUTES,
            calculation_method: DEFAULT_CHANGEOVER_METHOD.to_string(),
            family_defaults: Vec::new(),
            line_overrides: Vec::new(),
        }
    }
}

impl ChangeoverSettings {
    /// 建構器模式：設置全域預設值
    pub fn with_global_default(mut self, minutes: f64) -> Self {
        self.global_default_minutes = minutes;
        self
    }

    /// 建構器模式：設置計算方法
    pub fn with_method(mut self, method_id: &str) -> Self {
        self.calculation_method = method_id.to_string();
        self
    }

    /// 建構器模式：添加族群預設值
    pub fn with_family_default(mut self, from_family: &str, to_family: &str, minutes: f64) -> Self {
        self.family_defaults.push(FamilyChangeover {
            from_family: from_family.to_string(),
            to_family: to_family.to_string(),
            changeover_minutes: minutes,
        });
        self
    }

    /// 建構器模式：添加產線覆寫值
    pub fn with_line_override(
        mut self,
        line_id: &str,
        from_model_id: &str,
        to_model_id: &str,
        minutes: f64,
    ) -> Self {
        self.line_overrides.push(LineChangeoverOverride {
            line_id: line_id.to_string(),
            from_model_id: from_model_id.to_string(),
            to_model_id: to_model_id.to_string(),
            changeover_minutes: minutes,
        });
        self
    }
}

/// 族群間換線預設值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyChangeover {
    pub from_family: String,
    pub to_family: String,
    pub changeover_minutes: f64,
}

/// 產線專屬換線覆寫值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChangeoverOverride {
    pub line_id: String,
    pub from_model_id: String,
    pub to_model_id: String,
    pub changeover_minutes: f64,
}
