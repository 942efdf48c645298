//! Info command - displays discovered icons and the resolved configuration.

use crate::cli::{Cli, InfoArgs, InfoFormat};
use iconsync_core::{
    config::IconsyncConfig,
    error::Result,
    generator::IconGenerator,
    naming::is_valid_identifier,
    scanner::{IconSource, scan_icons},
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct IconEntry {
    source: PathBuf,
    component_name: String,
    output: PathBuf,
    valid_identifier: bool,
}

/// Runs the info command.
pub fn run(cli: &Cli, args: InfoArgs) -> Result<()> {
    // If no specific flags, show all
    let show_all = !args.icons && !args.show_config;

    let config = IconsyncConfig::load(cli.config.as_deref())?;

    let icons = if args.icons || show_all {
        Some(describe_icons(&config, &scan_icons(&config.paths.icons_dir)?))
    } else {
        None
    };
    let show_config = args.show_config || show_all;

    match args.format {
        InfoFormat::Pretty => {
            if show_config {
                print_config(&config);
            }
            if let Some(icons) = &icons {
                print_icons(icons);
            }
        }
        InfoFormat::Json => {
            let mut out = serde_json::Map::new();
            if show_config {
                out.insert("config".to_string(), serde_json::to_value(&config)?);
            }
            if let Some(icons) = &icons {
                out.insert("icons".to_string(), serde_json::to_value(icons)?);
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

fn describe_icons(config: &IconsyncConfig, icons: &[IconSource]) -> Vec<IconEntry> {
    let generator = IconGenerator::new(config.clone());
    icons
        .iter()
        .map(|icon| {
            let component_name = icon.component_name(config.component.naming);
            IconEntry {
                source: icon.path.clone(),
                output: generator.component_path(&component_name),
                valid_identifier: is_valid_identifier(&component_name),
                component_name,
            }
        })
        .collect()
}

fn print_config(config: &IconsyncConfig) {
    let paths = &config.paths;
    println!("\n=== Configuration ===\n");
    println!("Icons:       {}", paths.icons_dir.display());
    println!("Output root: {}", paths.output_root.display());
    println!("Components:  {}", paths.components_dir.display());
    println!("Index:       {}", paths.index_file.display());
    println!("Types:       {}", paths.types_file.display());

    println!("\nComponent:");
    println!("  Default size:  {}", config.component.default_size);
    println!("  Default color: {}", config.component.default_color);
    println!("  Naming:        {:?}", config.component.naming);
    println!("  Extension:     {}", config.component.extension);
    println!(
        "  JSX names:     {}",
        enabled(config.component.jsx_attribute_names)
    );

    println!("\nOptimizer: {:?}", config.optimizer.engine);
    println!(
        "Formatter: {}",
        if config.formatter.enabled {
            format!(
                "{} {}",
                config.formatter.command,
                config.formatter.args.join(" ")
            )
        } else {
            "disabled".to_string()
        }
    );
}

fn print_icons(icons: &[IconEntry]) {
    println!("\n=== Icons ===\n");
    println!("Total: {} icons found\n", icons.len());
    for icon in icons {
        let marker = if icon.valid_identifier {
            ""
        } else {
            " (not a valid identifier)"
        };
        println!(
            "  - {} <- {}{}",
            icon.component_name,
            icon.source.display(),
            marker
        );
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag { "enabled" } else { "disabled" }
}
