//! 年度需求量與每日需求

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ModelCatalog;

/// 年度需求量記錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeRecord {
    /// 機種ID
    pub model_id: String,

    /// 機種名稱（選填）
    #[serde(default)]
    pub model_name: Option<String>,

    /// 年度
    pub year: i32,

    /// 年需求量
    pub volume: f64,

    /// 年度作業天數
    pub operations_days: f64,
}

impl VolumeRecord {
    /// 創建新的需求量記錄
    pub fn new(model_id: &str, year: i32, volume: f64, operations_days: f64) -> Self {
        Self {
            model_id: model_id.to_string(),
            model_name: None,
            year,
            volume,
            operations_days,
        }
    }

    /// 每日需求 = 年需求量 / 作業天數；作業天數非正值時為 0
    pub fn daily_demand(&self) -> f64 {
        if self.operations_days > 0.0 {
            self.volume / self.operations_days
        } else {
            0.0
        }
    }
}

/// 單一機種的每日需求
#[derive(Debug, Clone, PartialEq)]
pub struct DailyDemand {
    pub model_id: String,
    pub model_name: String,
    pub volume: f64,
    pub operations_days: f64,
    pub daily_demand: f64,
}

/// 某年度的每日需求表（依機種ID排序）
#[derive(Debug, Clone, Default)]
pub struct DemandTable {
    year: i32,
    entries: BTreeMap<String, DailyDemand>,
}

impl DemandTable {
    /// 建立指定年度的需求表
    ///
    /// 同一機種同年度有多筆記錄時，以最後一筆為準。
    /// 機種名稱優先取機種目錄，其次取需求記錄，最後退回機種ID。
    pub fn for_year(volumes: &[VolumeRecord], year: i32, catalog: &ModelCatalog) -> Self {
        let mut entries = BTreeMap::new();

        for record in volumes.iter().filter(|v| v.year == year) {
            let model_name = catalog
                .get(&record.model_id)
                .map(|m| m.name.clone())
                .or_else(|| record.model_name.clone())
                .unwrap_or_else(|| record.model_id.clone());

            entries.insert(
                record.model_id.clone(),
                DailyDemand {
                    model_id: record.model_id.clone(),
                    model_name,
                    volume: record.volume,
                    operations_days: record.operations_days,
                    daily_demand: record.daily_demand(),
                },
            );
        }

        Self { year, entries }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn get(&self, model_id: &str) -> Option<&DailyDemand> {
        self.entries.get(model_id)
    }

    /// 機種每日需求
    pub fn daily_demand(&self, model_id: &str) -> Option<f64> {
        self.entries.get(model_id).map(|d| d.daily_demand)
    }

    /// 機種顯示名稱（找不到時回傳機種ID）
    pub fn model_name<'a>(&'a self, model_id: &'a str) -> &'a str {
        self.entries
            .get(model_id)
            .map(|d| d.model_name.as_str())
            .unwrap_or(model_id)
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.entries.contains_key(model_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyDemand> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
