//! Init command - initializes iconsync.toml configuration.

use crate::cli::{Cli, InitArgs};
use iconsync_core::{
    config::CONFIG_FILE_NAME,
    error::{IconsyncError, Result},
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const MINIMAL_CONFIG: &str = r#"[paths]
icons_dir = "icons"
output_root = "src"
"#;

const FULL_CONFIG: &str = r#"# Iconsync Configuration
# Relative paths are resolved against the directory of this file.
# Path values support ${VAR} and ${VAR:-default} substitution.

[paths]
# Directory scanned (non-recursively) for *.svg files
icons_dir = "icons"
# Root handed to the formatter
output_root = "src"
# Emptied on every run, then filled with one component per icon
components_dir = "src/icons"
index_file = "src/index.tsx"
types_file = "src/types.tsx"

[component]
# Injected when the root <svg> has no width/height
default_size = 24
default_color = "currentColor"
# "capitalize" upper-cases the first character, "pascal" converts arrow-left to ArrowLeft
naming = "capitalize"
extension = "tsx"
# Rename stroke-width to strokeWidth and friends
jsx_attribute_names = false

[optimizer]
# "builtin" or "command"
engine = "builtin"
remove_xml_declaration = true
remove_doctype = true
remove_comments = true
remove_metadata = true
remove_title = false
remove_desc = true
remove_editor_data = true
remove_empty_attributes = true
cleanup_attribute_whitespace = true
collapse_whitespace = true
remove_empty_groups = true
# Used when engine = "command". The SVG is written to stdin, output read from stdout.
command = "npx"
args = ["svgo", "--input", "-", "--output", "-"]

[formatter]
enabled = true
command = "npx"
# The output root is appended as the last argument
args = ["prettier", "--write"]
"#;

/// Runs the init command.
pub fn run(cli: &Cli, args: InitArgs) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    if config_path.exists() && !args.force {
        return Err(IconsyncError::config(format!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        )));
    }

    let content = if args.minimal {
        MINIMAL_CONFIG
    } else {
        FULL_CONFIG
    };

    fs::write(&config_path, content).map_err(|e| IconsyncError::io_at(&config_path, e))?;
    info!("Created {}", config_path.display());

    let icons_dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join("icons"),
        _ => Path::new("icons").to_path_buf(),
    };
    if !icons_dir.exists() {
        fs::create_dir_all(&icons_dir).map_err(|e| IconsyncError::io_at(&icons_dir, e))?;
        info!("Created {}", icons_dir.display());
    }

    info!("Iconsync initialized successfully!");
    info!("Next steps:");
    info!("  1. Drop your SVG files into {}", icons_dir.display());
    info!("  2. Edit {} to adjust the output layout", config_path.display());
    info!("  3. Run 'iconsync generate' to build the components");

    Ok(())
}
