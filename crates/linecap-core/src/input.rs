//! 規劃輸入文件

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::changeover::ChangeoverSettings;
use crate::compatibility::Compatibility;
use crate::line::LineDefinition;
use crate::model::{ModelCatalog, ProductModel};
use crate::volume::VolumeRecord;
use crate::{CapaError, Result};

/// 規劃輸入（由資料匯入端產生的 JSON 文件）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningInput {
    /// 產線目錄（順序決定區域處理順序）
    pub lines: Vec<LineDefinition>,

    /// 機種目錄
    pub models: Vec<ProductModel>,

    /// 年度需求量
    pub volumes: Vec<VolumeRecord>,

    /// 機種-產線相容性
    pub compatibilities: Vec<Compatibility>,

    /// 要計算的年度
    pub selected_years: Vec<i32>,

    /// 換線設定（未提供時不計算換線）
    #[serde(default)]
    pub changeover: Option<ChangeoverSettings>,
}

impl PlanningInput {
    /// 從 JSON 字串解析並驗證
    pub fn from_json_str(json: &str) -> Result<Self> {
        let input: PlanningInput = serde_json::from_str(json)?;
        input.validate()?;
        Ok(input)
    }

    /// 驗證輸入資料
    ///
    /// 產線ID不可重複；產能、週期時間、效率、需求量必須為有限數值。
    /// 零值或負值不視為錯誤，由計算過程降級為「分配 0 件」。
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for line in &self.lines {
            if !seen.insert(line.id.as_str()) {
                return Err(CapaError::DuplicateLine(line.id.clone()));
            }
            if !line.time_available_daily.is_finite() {
                return Err(CapaError::InvalidInput(format!(
                    "產線 {} 的每日可用時間不是有效數值",
                    line.id
                )));
            }
        }

        for compat in &self.compatibilities {
            if !compat.cycle_time.is_finite() || !compat.efficiency.is_finite() {
                return Err(CapaError::InvalidInput(format!(
                    "相容性 {} / {} 的週期時間或效率不是有效數值",
                    compat.line_id, compat.model_id
                )));
            }
        }

        for volume in &self.volumes {
            if !volume.volume.is_finite() || !volume.operations_days.is_finite() {
                return Err(CapaError::InvalidInput(format!(
                    "機種 {} 在 {} 年的需求量不是有效數值",
                    volume.model_id, volume.year
                )));
            }
        }

        Ok(())
    }

    /// 要計算的年度（遞增排序、去重）
    pub fn sorted_years(&self) -> Vec<i32> {
        let mut years = self.selected_years.clone();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// 區域清單（依產線目錄中首次出現的順序）
    pub fn areas(&self) -> Vec<String> {
        let mut areas: Vec<String> = Vec::new();
        for line in &self.lines {
            if !areas.contains(&line.area) {
                areas.push(line.area.clone());
            }
        }
        areas
    }

    /// 建立機種目錄
    pub fn catalog(&self) -> ModelCatalog {
        ModelCatalog::new(&self.models)
    }
}
