//! Iconsync - typed React icon components generated from a directory of SVGs.
//!
//! This crate provides:
//! - Loading `iconsync.toml` with path and environment substitution
//! - An SVG optimizer (built-in `quick-xml` pass or an external command)
//! - The textual SVG to JSX transform and component templates
//! - The generation pipeline and its report
//!
//! ## Quick Start (in build.rs)
//!
//! ```rust,ignore
//! fn main() {
//!     iconsync_core::generate().expect("Icon generation failed");
//!     println!("cargo:rerun-if-changed=icons/");
//!     println!("cargo:rerun-if-changed=iconsync.toml");
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod naming;
pub mod optimize;
pub mod scanner;
pub mod template;
pub mod transform;

pub use config::{IconsyncConfig, NamingStyle, CONFIG_FILE_NAME};
pub use error::{IconsyncError, OptimizeError, Result, SkipReason};
pub use generator::{GeneratedFile, GeneratedIcon, GenerationReport, IconGenerator, SkippedIcon};
pub use scanner::{find_name_collisions, scan_icons, IconSource};

/// Generates every icon component using configuration from `iconsync.toml`.
///
/// The file is searched for from the current directory upward; defaults are
/// used when there is none.
///
/// # Errors
///
/// Returns `IconsyncError` if:
/// - Configuration cannot be parsed
/// - The icons directory does not exist
/// - Output files cannot be written
/// - The formatter fails
pub fn generate() -> Result<GenerationReport> {
    let config = IconsyncConfig::load(None)?;
    IconGenerator::new(config).generate_all()
}

/// Generates icon components with a custom configuration.
pub fn generate_with_config(config: IconsyncConfig) -> Result<GenerationReport> {
    IconGenerator::new(config).generate_all()
}
