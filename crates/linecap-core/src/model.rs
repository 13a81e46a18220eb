//! 機種主檔

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 機種
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductModel {
    /// 機種ID
    pub id: String,

    /// 機種名稱
    pub name: String,

    /// 機種族群（換線時間的族群預設值依此查詢）
    #[serde(default)]
    pub family: String,

    /// 客戶
    #[serde(default)]
    pub customer: String,

    /// 專案
    #[serde(default)]
    pub program: String,
}

impl ProductModel {
    /// 創建新的機種
    pub fn new(id: &str, name: &str, family: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            family: family.to_string(),
            customer: String::new(),
            program: String::new(),
        }
    }

    /// 建構器模式：設置客戶與專案
    pub fn with_customer(mut self, customer: &str, program: &str) -> Self {
        self.customer = customer.to_string();
        self.program = program.to_string();
        self
    }
}

/// 機種目錄（依ID查詢）
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: HashMap<String, ProductModel>,
}

impl ModelCatalog {
    /// 從機種清單建立目錄（ID 重複時後者覆蓋前者）
    pub fn new(models: &[ProductModel]) -> Self {
        Self {
            models: models
                .iter()
                .map(|m| (m.id.clone(), m.clone()))
                .collect(),
        }
    }

    pub fn get(&self, model_id: &str) -> Option<&ProductModel> {
        self.models.get(model_id)
    }

    /// 機種族群；未登錄或族群為空時回傳 None
    pub fn family(&self, model_id: &str) -> Option<&str> {
        self.models
            .get(model_id)
            .map(|m| m.family.as_str())
            .filter(|f| !f.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let catalog = ModelCatalog::new(&[
            ProductModel::new("A", "Model A", "F1").with_customer("Customer 1", "Program 1"),
            ProductModel::new("B", "Model B", ""),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.family("A"), Some("F1"));
        assert_eq!(catalog.family("B"), None);
        assert_eq!(catalog.family("Z"), None);
        assert_eq!(catalog.get("A").unwrap().customer, "Customer 1");
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"id":"A","name":"Model A"}"#;
        let model: ProductModel = serde_json::from_str(json).unwrap();
        assert!(model.family.is_empty());
        assert!(model.program.is_empty());
    }
}
