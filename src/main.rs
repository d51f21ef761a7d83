//! cisdoc - CIS benchmark documentation generator

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cisdoc::{GeneratorConfig, generate};

#[derive(Parser)]
#[command(name = "cisdoc")]
#[command(version, about = "CIS benchmark docs generator", long_about = None)]
#[command(after_help = "EXAMPLES:
    cisdoc --benchmark CIS_Ubuntu_Linux_22.04_LTS_Benchmark_v1.0.0.xlsx --docs
    cisdoc --benchmark benchmark.xlsx --docs --output out/")]
struct Cli {
    /// Path to the CIS benchmark XLSX file
    #[arg(long, value_name = "XLSX")]
    benchmark: PathBuf,

    /// Generate documentation
    #[arg(long)]
    docs: bool,

    /// Generate controls
    #[arg(long)]
    controls: bool,

    /// Output directory
    #[arg(long, value_name = "DIR", default_value = "./")]
    output: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    if !(cli.docs || cli.controls) {
        eprintln!("warning: neither --docs nor --controls specified, no output generated");
        return ExitCode::SUCCESS;
    }

    let config = GeneratorConfig {
        docs: cli.docs,
        controls: cli.controls,
        output_dir: cli.output,
    };

    match generate(&cli.benchmark, &config) {
        Ok(summary) => {
            if !cli.quiet {
                println!(
                    "Generated {} documents ({} records skipped) in {}",
                    summary.documents_written,
                    summary.records_skipped,
                    config.output_dir.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
