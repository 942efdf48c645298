//! Generate command - converts every icon into a component.

use crate::cli::{Cli, GenerateArgs, ReportFormat};
use iconsync_core::{
    config::IconsyncConfig,
    error::Result,
    generator::{GenerationReport, IconGenerator},
};
use std::env;
use tracing::{debug, error, info};

/// Runs generation with default settings.
pub fn run_default(cli: &Cli) -> Result<()> {
    run(cli, GenerateArgs::default())
}

/// Runs the generation pipeline.
pub fn run(cli: &Cli, args: GenerateArgs) -> Result<()> {
    info!("Starting iconsync code generation");

    let mut config = match IconsyncConfig::load(cli.config.as_deref()) {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    apply_overrides(&mut config, &args)?;

    let report = IconGenerator::new(config).generate_all()?;

    match args.report {
        Some(ReportFormat::Json) => println!("{}", serde_json::to_string_pretty(&report)?),
        Some(ReportFormat::Pretty) => print_report(&report),
        None => {}
    }

    info!("Iconsync code generation completed successfully");
    Ok(())
}

/// Command-line paths are relative to the working directory, not the config file.
fn apply_overrides(config: &mut IconsyncConfig, args: &GenerateArgs) -> Result<()> {
    let cwd = env::current_dir()?;

    if let Some(icons) = &args.icons {
        config.paths.icons_dir = cwd.join(icons);
        debug!("Icons directory overridden: {:?}", config.paths.icons_dir);
    }

    if let Some(output) = &args.output {
        config.paths.rebase_output(&cwd.join(output));
        debug!("Output root overridden: {:?}", config.paths.output_root);
    }

    if args.no_format {
        config.formatter.enabled = false;
        debug!("Formatter disabled from the command line");
    }

    Ok(())
}

fn print_report(report: &GenerationReport) {
    println!("\n=== Generation Report ===\n");
    println!("Generated: {}", report.generated.len());
    for icon in &report.generated {
        println!("  - {} ({})", icon.component_name, icon.source.display());
    }

    if !report.skipped.is_empty() {
        println!("\nSkipped: {}", report.skipped.len());
        for icon in &report.skipped {
            println!("  - {}: {}", icon.source.display(), icon.reason);
        }
    }

    println!("\nFiles written: {}", report.files.len());
    let bytes: usize = report.files.iter().map(|f| f.bytes_written).sum();
    println!("Bytes written: {}", bytes);
    println!(
        "Formatted: {}",
        if report.formatted { "yes" } else { "no" }
    );
}
