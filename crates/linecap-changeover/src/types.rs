//! 換線計算的輸入與輸出

use linecap_core::round_to;
use serde::{Deserialize, Serialize};

use crate::matrix::ChangeoverMatrix;

/// 產線上已分配的機種
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub model_id: String,
    pub model_name: String,
    pub family: String,
    /// 此產線每日分配量
    pub allocated_units_daily: f64,
    /// 此產線收到的需求量
    pub demand_units_daily: f64,
}

impl ModelInfo {
    pub fn new(model_id: &str, model_name: &str, allocated_units_daily: f64) -> Self {
        Self {
            model_id: model_id.to_string(),
            model_name: model_name.to_string(),
            family: String::new(),
            allocated_units_daily,
            demand_units_daily: allocated_units_daily,
        }
    }
}

/// 換線計算輸入
#[derive(Debug, Clone)]
pub struct ChangeoverInput {
    pub line_id: String,
    pub line_name: String,
    pub area: String,
    pub models: Vec<ModelInfo>,
    /// (from, to) → 分鐘
    pub matrix: ChangeoverMatrix,
    /// 每日估計換線次數
    pub changeovers_per_day: u32,
    /// 每日可用時間（秒）
    pub time_available_daily: f64,
}

/// 方法參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodConfig {
    /// 機率加權法所需的最少機種數
    pub min_models_for_probability: usize,
}

impl Default for MethodConfig {
    fn default() -> Self {
        Self {
            min_models_for_probability: 2,
        }
    }
}

/// 單一轉換分析（供 SMED 改善排序）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionAnalysis {
    pub from_model_id: String,
    pub from_model_name: String,
    pub to_model_id: String,
    pub to_model_name: String,
    pub changeover_minutes: f64,
    /// 發生機率
    pub probability: f64,
    /// 加權貢獻
    pub weighted_contribution: f64,
    /// 佔總量百分比
    pub percent_of_total: f64,
}

impl TransitionAnalysis {
    pub fn new(
        from: &ModelInfo,
        to: &ModelInfo,
        changeover_minutes: f64,
        probability: f64,
        weighted_contribution: f64,
    ) -> Self {
        Self {
            from_model_id: from.model_id.clone(),
            from_model_name: from.model_name.clone(),
            to_model_id: to.model_id.clone(),
            to_model_name: to.model_name.clone(),
            changeover_minutes,
            probability,
            weighted_contribution,
            percent_of_total: 0.0,
        }
    }

    /// 報表用的四捨五入版本
    pub fn rounded(mut self) -> Self {
        self.probability = round_to(self.probability, 6);
        self.weighted_contribution = round_to(self.weighted_contribution, 4);
        self.percent_of_total = round_to(self.percent_of_total, 2);
        self
    }
}

/// 換線計算結果（建立後唯讀）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeoverResult {
    pub line_id: String,
    pub line_name: String,
    pub area: String,
    pub method_used: String,

    // 時間分解（秒）
    pub time_used_production: f64,
    pub time_used_changeover: f64,
    pub total_time_used: f64,
    pub time_available: f64,

    // 稼動率（%）
    pub utilization_production_only: f64,
    pub utilization_with_changeover: f64,
    pub changeover_impact_percent: f64,

    /// 每日換線次數
    pub estimated_changeover_count: u32,
    /// 每次換線期望時間（秒）
    pub expected_changeover_time: f64,
    /// 矩陣中最長換線時間（秒）
    pub worst_case_changeover_time: f64,

    pub top_costly_transitions: Vec<TransitionAnalysis>,
    pub hhi: f64,
    pub warnings: Vec<String>,
}

/// 方法目錄項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub implemented: bool,
    pub requires_historical_data: bool,
}
