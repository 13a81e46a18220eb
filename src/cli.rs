//! 命令列參數
//!
//! ```bash
//! linecap --input plan.json --output result.json
//! LINECAP_METHOD=worst_case linecap -i plan.json -o result.json --parallel
//! linecap --list-methods
//! ```

use std::path::PathBuf;

use clap::Parser;
use linecap_core::config::DEFAULT_FALLBACK_METHOD;
use linecap_core::PlannerConfig;

/// 產線產能規劃與換線估算
#[derive(Debug, Clone, Parser)]
#[command(name = "linecap", version, about = "Line capacity planner with changeover estimation")]
pub struct Cli {
    /// 輸入 JSON 檔
    #[arg(
        short,
        long,
        env = "LINECAP_INPUT",
        required_unless_present = "list_methods"
    )]
    pub input: Option<PathBuf>,

    /// 輸出 JSON 檔
    #[arg(
        short,
        long,
        env = "LINECAP_OUTPUT",
        required_unless_present = "list_methods"
    )]
    pub output: Option<PathBuf>,

    /// 換線方法（取代輸入檔中的 calculationMethod）
    #[arg(long, env = "LINECAP_METHOD")]
    pub method: Option<String>,

    /// 備援換線方法
    #[arg(long = "fallback-method", default_value = DEFAULT_FALLBACK_METHOD)]
    pub fallback_method: String,

    /// 跨年度並行計算
    #[arg(long)]
    pub parallel: bool,

    /// 顯示除錯日誌
    #[arg(short, long)]
    pub verbose: bool,

    /// 列出換線方法後結束
    #[arg(long = "list-methods")]
    pub list_methods: bool,
}

impl Cli {
    /// 由參數建立規劃配置
    pub fn planner_config(&self) -> PlannerConfig {
        let mut config = PlannerConfig::default()
            .with_fallback_method(&self.fallback_method)
            .with_parallel_years(self.parallel);
        if let Some(method) = &self.method {
            config = config.with_method_override(method);
        }
        config
    }
}
