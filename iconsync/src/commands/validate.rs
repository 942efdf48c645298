//! Validate command - checks configuration and the icons directory.

use crate::cli::{Cli, ValidateArgs};
use iconsync_core::{
    config::IconsyncConfig,
    error::{IconsyncError, Result},
    naming::is_valid_identifier,
    scanner::{find_name_collisions, scan_icons},
};
use tracing::{error, info, warn};

/// Runs the validate command.
pub fn run(cli: &Cli, args: ValidateArgs) -> Result<()> {
    info!("Validating iconsync configuration and icons");

    info!("Checking configuration...");
    let config = match IconsyncConfig::load(cli.config.as_deref()) {
        Ok(config) => {
            info!("  Configuration: OK");
            config
        }
        Err(e) => {
            error!("  Configuration: FAILED");
            error!("    Error: {}", e);
            return Err(IconsyncError::validation("configuration could not be loaded"));
        }
    };

    let problems = check(&config, args.strict);

    if problems > 0 {
        error!("Validation failed with {} error(s)", problems);
        return Err(IconsyncError::validation(format!(
            "{problems} problem(s) found"
        )));
    }

    info!("Validation passed");
    Ok(())
}

/// Logs every finding and returns the number of errors.
fn check(config: &IconsyncConfig, strict: bool) -> usize {
    let paths = &config.paths;
    let naming = config.component.naming;
    let mut problems = 0;

    if paths.components_contain_icons() {
        error!(
            "  components_dir {:?} contains icons_dir {:?}; generation would delete the icons",
            paths.components_dir, paths.icons_dir
        );
        problems += 1;
    }

    info!("Checking icons...");
    let icons = match scan_icons(&paths.icons_dir) {
        Ok(icons) => {
            info!("  Icons directory: OK ({})", paths.icons_dir.display());
            info!("    SVG files: {}", icons.len());
            icons
        }
        Err(e) => {
            error!("  Icons directory: FAILED");
            error!("    Error: {}", e);
            return problems + 1;
        }
    };

    if icons.is_empty() {
        warn!("  No SVG files found in {}", paths.icons_dir.display());
    }

    for (name, sources) in find_name_collisions(&icons, naming) {
        error!("  Name collision: {} is derived from {} files", name, sources.len());
        for source in &sources {
            error!("    - {}", source.display());
        }
        problems += 1;
    }

    for icon in &icons {
        let name = icon.component_name(naming);
        if is_valid_identifier(&name) {
            continue;
        }
        if strict {
            error!(
                "  Invalid identifier: {} (from {})",
                name,
                icon.path.display()
            );
            problems += 1;
        } else {
            warn!(
                "  Invalid identifier: {} (from {})",
                name,
                icon.path.display()
            );
        }
    }

    problems
}
