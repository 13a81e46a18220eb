//! # Line Capacity Planner
//!
//! 產線產能規劃：讀取輸入文件、執行多年度分配與換線估算、輸出規劃報表

pub mod cli;
pub mod io;
pub mod logging;

pub use linecap_calc::{CapacityPlanner, PlanningReport};
pub use linecap_changeover::MethodRegistry;
pub use linecap_core::{PlannerConfig, PlanningInput};

use std::path::Path;

use anyhow::Context;

/// 讀取輸入、計算並寫出報表
///
/// 任一步驟失敗時不會寫出輸出檔。
pub fn plan_file(
    input_path: &Path,
    output_path: &Path,
    config: PlannerConfig,
) -> anyhow::Result<PlanningReport> {
    let input = io::load_input(input_path)
        .with_context(|| format!("無法讀取輸入檔 {}", input_path.display()))?;

    let report = CapacityPlanner::new(input, config)
        .run()
        .context("產能計算失敗")?;

    io::write_report(&report, output_path)
        .with_context(|| format!("無法寫出結果檔 {}", output_path.display()))?;

    Ok(report)
}

/// 換線方法目錄（JSON）
pub fn method_catalogue_json(registry: &MethodRegistry) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&registry.list_methods())?)
}
