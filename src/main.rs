use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use penguin_analyzer::{dataset::PenguinTable, report};

/// All paths and chart parameters are fixed constants; the command
/// takes no options beyond --help and --version.
#[derive(Parser)]
#[command(
    name = "penguin-analyzer",
    about = "Palmer penguins analysis report generator - writes ./analysis_output",
    version,
    author
)]
struct Cli {}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let _cli = Cli::parse();

    let table = PenguinTable::load_builtin()?;
    info!(
        raw = table.raw_count(),
        filtered = table.len(),
        dropped = table.dropped_count(),
        "loaded penguins dataset"
    );

    let artifacts = report::generate(&table, report::OUTPUT_DIR)?;

    println!(
        "{} {}",
        "출력 경로:".bold().cyan(),
        artifacts.layout.root.display()
    );
    println!(
        "{} {}",
        "마크다운 파일:".bold().cyan(),
        artifacts.layout.report_path.display()
    );
    println!("{}", "생성된 이미지들:".bold().cyan());
    for image in &artifacts.images {
        println!("{}", image.display());
    }
    println!("{}", "완료".green().bold());

    Ok(())
}
