//! linecap 命令列入口

use clap::Parser;
use linecap::cli::Cli;
use linecap::{logging, method_catalogue_json, plan_file, MethodRegistry};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.list_methods {
        println!("{}", method_catalogue_json(&MethodRegistry::default())?);
        return Ok(());
    }

    let (Some(input), Some(output)) = (cli.input.as_deref(), cli.output.as_deref()) else {
        anyhow::bail!("必須指定 --input 與 --output");
    };

    let report = plan_file(input, output, cli.planner_config())?;

    let summary = &report.overall_summary;
    tracing::info!(
        "完成：{} 個年度，平均稼動率 {:.1}%，未滿足 {:.2} 件/日，耗時 {} ms",
        summary.years_processed,
        summary.average_utilization_all_years,
        summary.total_unfulfilled_units,
        report.metadata.execution_time_ms
    );

    Ok(())
}
