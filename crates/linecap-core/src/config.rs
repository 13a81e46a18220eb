//! 規劃計算配置

use serde::{Deserialize, Serialize};

/// 預設備援換線方法
pub const DEFAULT_FALLBACK_METHOD: &str = "simple_average";

/// 產能規劃參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// 剩餘需求容差（件），低於此值視為已完全滿足
    pub demand_tolerance: f64,

    /// 超載門檻（稼動率 > 此值）
    pub overloaded_threshold: f64,

    /// 平衡門檻（稼動率 >= 此值且未超載）
    pub balanced_threshold: f64,

    /// 滿載門檻（稼動率 >= 此值）
    pub at_capacity_threshold: f64,

    /// 瓶頸產線門檻（稼動率 >= 此值的產線列入瓶頸分析）
    pub bottleneck_threshold: f64,

    /// 首選方法失敗時的備援換線方法
    pub fallback_method: String,

    /// 覆寫輸入文件指定的換線方法
    pub method_override: Option<String>,

    /// 機率加權法所需的最少機種數
    pub min_models_for_probability: usize,

    /// 是否跨年度並行計算
    /// - true: 各年度以 rayon 並行計算，結果仍依年度排序
    /// - false: 依年度順序逐一計算（預設）
    ///
    /// 單一區域內的分配永遠是循序的。
    pub parallel_years: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            demand_tolerance: 0.01,
            overloaded_threshold: 100.0,
            balanced_threshold: 70.0,
            at_capacity_threshold: 95.0,
            bottleneck_threshold: 85.0,
            fallback_method: DEFAULT_FALLBACK_METHOD.to_string(),
            method_override: None,
            min_models_for_probability: 2,
            parallel_years: false,
        }
    }
}

impl PlannerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置需求容差
    pub fn with_demand_tolerance(mut self, tolerance: f64) -> Self {
        self.demand_tolerance = tolerance;
        self
    }

    /// 建構器模式：設置稼動率分級門檻
    pub fn with_utilization_thresholds(mut self, overloaded: f64, balanced: f64) -> Self {
        self.overloaded_threshold = overloaded;
        self.balanced_threshold = balanced;
        self
    }

    /// 建構器模式：設置瓶頸產線門檻
    pub fn with_bottleneck_threshold(mut self, threshold: f64) -> Self {
        self.bottleneck_threshold = threshold;
        self
    }

    /// 建構器模式：設置備援換線方法
    pub fn with_fallback_method(mut self, method_id: &str) -> Self {
        self.fallback_method = method_id.to_string();
        self
    }

    /// 建構器模式：覆寫換線方法
    pub fn with_method_override(mut self, method_id: &str) -> Self {
        self.method_override = Some(method_id.to_string());
        self
    }

    /// 建構器模式：設置是否跨年度並行
    pub fn with_parallel_years(mut self, parallel: bool) -> Self {
        self.parallel_years = parallel;
        self
    }

    /// 稼動率分級
    pub fn classify_utilization(&self, utilization: f64) -> UtilizationBand {
        if utilization > self.overloaded_threshold {
            UtilizationBand::Overloaded
        } else if utilization >= self.balanced_threshold {
            UtilizationBand::Balanced
        } else {
            UtilizationBand::Underutilized
        }
    }

    /// 是否滿載
    pub fn is_at_capacity(&self, utilization: f64) -> bool {
        utilization >= self.at_capacity_threshold
    }

    /// 剩餘需求是否仍未滿足（超過容差）
    pub fn is_unfulfilled(&self, remaining: f64) -> bool {
        remaining > self.demand_tolerance
    }
}

/// 稼動率分級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    /// 超載（> 100%）
    Overloaded,
    /// 平衡（70% - 100%）
    Balanced,
    /// 低稼動（< 70%）
    Underutilized,
}
