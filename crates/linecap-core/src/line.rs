//! 產線模型

use serde::{Deserialize, Serialize};

use crate::assignment::ModelAssignment;

/// 產線類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    /// 共用線：可承接其他相容產線的溢出需求
    #[default]
    Shared,
    /// 專用線：只跑少數固定機種，無法吸收溢出
    Dedicated,
}

impl LineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineType::Shared => "shared",
            LineType::Dedicated => "dedicated",
        }
    }
}

/// 產線定義（輸入文件中的產線目錄）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDefinition {
    /// 產線ID
    pub id: String,

    /// 產線名稱
    pub name: String,

    /// 製程區域
    pub area: String,

    /// 每日可用時間（秒）
    pub time_available_daily: f64,

    /// 產線類型（未提供時視為共用線）
    #[serde(default)]
    pub line_type: Option<LineType>,
}

impl LineDefinition {
    /// 創建新的產線定義
    pub fn new(id: &str, name: &str, area: &str, time_available_daily: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            area: area.to_string(),
            time_available_daily,
            line_type: None,
        }
    }

    /// 建構器模式：設置產線類型
    pub fn with_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = Some(line_type);
        self
    }
}

/// 產線（單一 區域×年度 計算過程中的可變狀態）
///
/// 每個 (區域, 年度) 計算開始時重新建立，結果擷取後即丟棄。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionLine {
    /// 產線ID
    pub id: String,

    /// 產線名稱
    pub name: String,

    /// 製程區域
    pub area: String,

    /// 產線類型
    pub line_type: LineType,

    /// 每日可用時間（秒）
    pub time_available_daily: f64,

    /// 每日已用時間（秒），從 0 開始累加，不會超過可用時間
    pub time_used_daily: f64,

    /// 已分配的機種（依分配順序）
    pub assignments: Vec<ModelAssignment>,
}

impl ProductionLine {
    /// 創建新的產線
    pub fn new(id: String, name: String, area: String, time_available_daily: f64) -> Self {
        Self {
            id,
            name,
            area,
            line_type: LineType::Shared,
            time_available_daily,
            time_used_daily: 0.0,
            assignments: Vec::new(),
        }
    }

    /// 建構器模式：設置產線類型
    pub fn with_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }

    /// 剩餘可用時間（秒）
    pub fn remaining_time(&self) -> f64 {
        self.time_available_daily - self.time_used_daily
    }

    /// 稼動率（%），可用時間為 0 時回傳 0
    pub fn utilization_percent(&self) -> f64 {
        if self.time_available_daily <= 0.0 {
            return 0.0;
        }
        self.time_used_daily / self.time_available_daily * 100.0
    }

    /// 檢查是否為專用線
    pub fn is_dedicated(&self) -> bool {
        self.line_type == LineType::Dedicated
    }
}

impl From<&LineDefinition> for ProductionLine {
    fn from(definition: &LineDefinition) -> Self {
        ProductionLine::new(
            definition.id.clone(),
            definition.name.clone(),
            definition.area.clone(),
            definition.time_available_daily,
        )
        .with_line_type(definition.line_type.unwrap_or_default())
    }
}
