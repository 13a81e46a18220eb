//! 產線換線評估

use linecap_changeover::{
    estimate_changeovers_per_day, ChangeoverInput, ChangeoverResult, MatrixBuilder, MethodConfig,
    MethodRegistry, ModelInfo,
};
use linecap_core::{ChangeoverSettings, ModelCatalog, PlannerConfig, ProductionLine};

/// 對已分配完成的產線估算換線時間
pub struct LineChangeoverEvaluator<'a> {
    registry: &'a MethodRegistry,
    catalog: &'a ModelCatalog,
    /// 未設定換線或缺少機種資料時為 None
    builder: Option<MatrixBuilder<'a>>,
    method_id: &'a str,
    fallback_method_id: &'a str,
    method_config: MethodConfig,
}

impl<'a> LineChangeoverEvaluator<'a> {
    pub fn new(
        registry: &'a MethodRegistry,
        settings: Option<&'a ChangeoverSettings>,
        catalog: &'a ModelCatalog,
        config: &'a PlannerConfig,
    ) -> Self {
        let builder = match settings {
            Some(s) if !catalog.is_empty() => Some(MatrixBuilder::new(s, catalog)),
            _ => None,
        };

        let method_id = config
            .method_override
            .as_deref()
            .or(settings.map(|s| s.calculation_method.as_str()))
            .unwrap_or(linecap_core::DEFAULT_CHANGEOVER_METHOD);

        Self {
            registry,
            catalog,
            builder,
            method_id,
            fallback_method_id: &config.fallback_method,
            method_config: MethodConfig {
                min_models_for_probability: config.min_models_for_probability,
            },
        }
    }

    /// 是否會進行換線評估
    pub fn is_enabled(&self) -> bool {
        self.builder.is_some()
    }

    /// 首選方法ID
    pub fn method_id(&self) -> &str {
        self.method_id
    }

    /// 評估單一產線
    ///
    /// 機種少於 2 個時不評估。計算失敗（含備援失敗）只記錄錯誤並回傳 None，不中斷整體計算。
    pub fn evaluate(&self, line: &ProductionLine) -> Option<ChangeoverResult> {
        let builder = self.builder.as_ref()?;

        let models = model_infos(line, self.catalog);
        if models.len() < 2 {
            return None;
        }

        let model_ids: Vec<&str> = models.iter().map(|m| m.model_id.as_str()).collect();
        let input = ChangeoverInput {
            line_id: line.id.clone(),
            line_name: line.name.clone(),
            area: line.area.clone(),
            matrix: builder.build(&line.id, &model_ids),
            changeovers_per_day: estimate_changeovers_per_day(models.len()),
            time_available_daily: line.time_available_daily,
            models,
        };

        match self.registry.calculate_with_fallback(
            self.method_id,
            &input,
            &self.method_config,
            self.fallback_method_id,
        ) {
            Ok(result) => {
                tracing::debug!(
                    "產線 {} 換線：{}，每日 {:.0} 秒",
                    line.id,
                    result.method_used,
                    result.time_used_changeover
                );
                Some(result)
            }
            Err(err) => {
                tracing::error!("產線 {} 換線計算失敗，略過：{}", line.id, err);
                None
            }
        }
    }
}

/// 產線上的機種（依首次分配順序合併同機種）
pub fn model_infos(line: &ProductionLine, catalog: &ModelCatalog) -> Vec<ModelInfo> {
    let mut models: Vec<ModelInfo> = Vec::new();

    for assignment in &line.assignments {
        match models.iter_mut().find(|m| m.model_id == assignment.model_id) {
            Some(existing) => {
                existing.allocated_units_daily += assignment.allocated_units_daily;
                existing.demand_units_daily += assignment.demand_units_daily;
            }
            None => {
                let mut info = ModelInfo::new(
                    &assignment.model_id,
                    &assignment.model_name,
                    assignment.allocated_units_daily,
                );
                info.demand_units_daily = assignment.demand_units_daily;
                info.family = catalog
                    .family(&assignment.model_id)
                    .unwrap_or_default()
                    .to_string();
                models.push(info);
            }
        }
    }

    models
}
