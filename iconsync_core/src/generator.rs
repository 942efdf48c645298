//! Icon component generation.
//!
//! [`IconGenerator::generate_all`] runs the whole pipeline: scan the icons
//! directory, clear the components directory, write the shared types file,
//! convert every icon, write the index and hand the output root to the
//! formatter. Per-icon failures are recorded in the [`GenerationReport`] and
//! never abort the run; everything touching the output tree does.

use crate::config::IconsyncConfig;
use crate::error::{IconsyncError, Result, SkipReason};
use crate::format::{self, Formatter};
use crate::naming::is_valid_identifier;
use crate::optimize::{self, Optimizer};
use crate::scanner::{scan_icons, IconSource};
use crate::template::{component_source, index_source, module_specifier, TYPES_SOURCE};
use crate::transform::{transform_svg, TransformOptions};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// What a generated file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// The shared `IconProps` definition.
    Types,
    /// One icon component.
    Component,
    /// The aggregating re-export module.
    Index,
}

/// Information about a generated file.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    /// The path where the file was written.
    pub path: PathBuf,
    /// The number of bytes written.
    pub bytes_written: usize,
    pub kind: FileKind,
}

/// An icon that made it into the output.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedIcon {
    pub source: PathBuf,
    pub component_name: String,
    pub path: PathBuf,
}

/// An icon left out of the output.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedIcon {
    pub source: PathBuf,
    pub reason: String,
}

/// Report of the generation process.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    /// Every file written, in write order.
    pub files: Vec<GeneratedFile>,
    /// Icons converted, in processing order.
    pub generated: Vec<GeneratedIcon>,
    pub skipped: Vec<SkippedIcon>,
    /// Whether the formatter ran over the output root.
    pub formatted: bool,
}

impl GenerationReport {
    fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Component names in the order they appear in the index.
    pub fn component_names(&self) -> Vec<String> {
        self.generated
            .iter()
            .map(|icon| icon.component_name.clone())
            .collect()
    }
}

/// A converted icon not yet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedIcon {
    pub component_name: String,
    pub source: String,
}

/// Generator for icon components.
pub struct IconGenerator {
    config: IconsyncConfig,
    optimizer: Box<dyn Optimizer>,
    formatter: Box<dyn Formatter>,
}

impl IconGenerator {
    /// Creates a generator whose optimizer and formatter come from `config`.
    pub fn new(config: IconsyncConfig) -> Self {
        let optimizer = optimize::from_config(&config.optimizer);
        let formatter = format::from_config(&config.formatter);
        Self {
            config,
            optimizer,
            formatter,
        }
    }

    pub fn with_optimizer(mut self, optimizer: Box<dyn Optimizer>) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn config(&self) -> &IconsyncConfig {
        &self.config
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    ///
    /// Fails when the icons directory is missing, when the components
    /// directory cannot be cleared, when any output file cannot be written, or
    /// when the formatter fails. Unusable icons are skipped instead.
    pub fn generate_all(&self) -> Result<GenerationReport> {
        info!("Starting icon generation");
        let paths = &self.config.paths;

        let icons = scan_icons(&paths.icons_dir)?;
        info!("Found {} SVG files in {:?}", icons.len(), paths.icons_dir);

        self.clear_output_directory()?;

        let mut report = GenerationReport::default();
        report.add_file(self.write_types_file()?);

        for icon in &icons {
            match self.convert_icon(icon) {
                Ok(converted) => {
                    let file = self.write_component(&converted)?;
                    report.generated.push(GeneratedIcon {
                        source: icon.path.clone(),
                        component_name: converted.component_name,
                        path: file.path.clone(),
                    });
                    report.add_file(file);
                }
                Err(reason) => {
                    error!("Skipping {:?}: {}", icon.path, reason);
                    report.skipped.push(SkippedIcon {
                        source: icon.path.clone(),
                        reason: reason.to_string(),
                    });
                }
            }
        }

        report.add_file(self.write_index_file(&report.component_names())?);

        self.formatter.format(&paths.output_root)?;
        report.formatted = self.config.formatter.enabled;

        info!(
            "Generation complete. Generated {} components, skipped {}",
            report.generated.len(),
            report.skipped.len()
        );

        Ok(report)
    }

    /// Empties the components directory, creating it when missing.
    ///
    /// Refuses to run when the icons directory lives inside it.
    pub fn clear_output_directory(&self) -> Result<()> {
        let paths = &self.config.paths;
        let dir = &paths.components_dir;

        if paths.components_contain_icons() {
            return Err(IconsyncError::config(format!(
                "components_dir {:?} contains icons_dir {:?}; refusing to clear it",
                dir, paths.icons_dir
            )));
        }

        if !dir.exists() {
            debug!("Creating components directory {:?}", dir);
            return fs::create_dir_all(dir).map_err(|e| IconsyncError::io_at(dir, e));
        }

        debug!("Clearing components directory {:?}", dir);
        for entry in fs::read_dir(dir).map_err(|e| IconsyncError::io_at(dir, e))? {
            let entry = entry?;
            let path = entry.path();
            let removed = if entry.file_type()?.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|e| IconsyncError::io_at(&path, e))?;
        }
        Ok(())
    }

    /// Writes the static `IconProps` definition.
    pub fn write_types_file(&self) -> Result<GeneratedFile> {
        write_file(&self.config.paths.types_file, TYPES_SOURCE, FileKind::Types)
    }

    /// Turns one SVG file into component source without touching the output tree.
    pub fn convert_icon(&self, icon: &IconSource) -> std::result::Result<ConvertedIcon, SkipReason> {
        let component = &self.config.component;

        let raw = fs::read_to_string(&icon.path)?;
        let optimized = self.optimizer.optimize(&raw, &icon.path)?;

        let options = TransformOptions {
            default_size: component.default_size,
            jsx_attribute_names: component.jsx_attribute_names,
        };
        let markup = transform_svg(&optimized, &options).ok_or(SkipReason::NoSvgElement)?;

        let component_name = icon.component_name(component.naming);
        if !is_valid_identifier(&component_name) {
            warn!(
                "Component name {:?} derived from {:?} is not a valid identifier",
                component_name, icon.path
            );
        }

        let source = component_source(
            &component_name,
            &markup,
            &component.default_color,
            &self.types_import(),
        );

        Ok(ConvertedIcon {
            component_name,
            source,
        })
    }

    /// Writes `<components_dir>/<Name>.<extension>`.
    pub fn write_component(&self, converted: &ConvertedIcon) -> Result<GeneratedFile> {
        let path = self.component_path(&converted.component_name);
        write_file(&path, &converted.source, FileKind::Component)
    }

    /// Writes one re-export line per name, in the given order.
    pub fn write_index_file(&self, component_names: &[String]) -> Result<GeneratedFile> {
        let source = index_source(component_names, &self.components_import());
        write_file(&self.config.paths.index_file, &source, FileKind::Index)
    }

    pub fn component_path(&self, component_name: &str) -> PathBuf {
        self.config
            .paths
            .components_dir
            .join(format!("{}.{}", component_name, self.config.component.extension))
    }

    /// Specifier used by components to import `IconProps`.
    fn types_import(&self) -> String {
        let paths = &self.config.paths;
        module_specifier(&paths.components_dir, &paths.types_file.with_extension(""))
    }

    /// Specifier prefix used by the index to reach the components.
    fn components_import(&self) -> String {
        let paths = &self.config.paths;
        let index_dir = paths.index_file.parent().unwrap_or_else(|| Path::new(""));
        module_specifier(index_dir, &paths.components_dir)
    }
}

fn write_file(path: &Path, contents: &str, kind: FileKind) -> Result<GeneratedFile> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| IconsyncError::io_at(parent, e))?;
        }
    }
    fs::write(path, contents).map_err(|e| IconsyncError::io_at(path, e))?;
    info!("Generated {:?} at {:?}", kind, path);

    Ok(GeneratedFile {
        path: path.to_path_buf(),
        bytes_written: contents.len(),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptimizeError;
    use crate::format::MockFormatter;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn config_in(root: &Path) -> IconsyncConfig {
        let mut config = IconsyncConfig::default();
        config.formatter.enabled = false;
        config.resolve_paths(root);
        config
    }

    fn write_icon(root: &Path, name: &str, contents: &str) {
        let dir = root.join("icons");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    struct FailingOptimizer;

    impl Optimizer for FailingOptimizer {
        fn optimize(&self, _svg: &str, _path: &Path) -> std::result::Result<String, OptimizeError> {
            Err(OptimizeError::UnclosedElement("svg".to_string()))
        }
    }

    #[test]
    fn test_formatter_receives_output_root() {
        let dir = TempDir::new().unwrap();
        write_icon(dir.path(), "home.svg", r#"<svg viewBox="0 0 24 24"><path d="M0 0"/></svg>"#);

        let expected_root = dir.path().join("src");
        let mut formatter = MockFormatter::new();
        formatter
            .expect_format()
            .withf(move |root| root.to_path_buf() == expected_root)
            .times(1)
            .returning(|_| Ok(()));

        let report = IconGenerator::new(config_in(dir.path()))
            .with_formatter(Box::new(formatter))
            .generate_all()
            .unwrap();
        assert_eq!(report.component_names(), vec!["Home".to_string()]);
    }

    #[test]
    fn test_formatter_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_icon(dir.path(), "home.svg", "<svg></svg>");

        let mut formatter = MockFormatter::new();
        formatter
            .expect_format()
            .times(1)
            .returning(|_| Err(IconsyncError::config("prettier exploded")));

        let result = IconGenerator::new(config_in(dir.path()))
            .with_formatter(Box::new(formatter))
            .generate_all();
        assert!(result.is_err());
        // Files are already on disk when the formatter runs.
        assert!(dir.path().join("src/icons/Home.tsx").is_file());
    }

    #[test]
    fn test_missing_icons_dir_leaves_output_untouched() {
        let dir = TempDir::new().unwrap();
        let stale = dir.path().join("src/icons/Stale.tsx");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        let mut formatter = MockFormatter::new();
        formatter.expect_format().times(0);

        let err = IconGenerator::new(config_in(dir.path()))
            .with_formatter(Box::new(formatter))
            .generate_all()
            .unwrap_err();
        assert!(matches!(err, IconsyncError::InvalidPath { .. }));
        assert!(stale.is_file());
    }

    #[test]
    fn test_clear_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let generator = IconGenerator::new(config_in(dir.path()));
        generator.clear_output_directory().unwrap();
        assert!(dir.path().join("src/icons").is_dir());
    }

    #[test]
    fn test_clear_removes_files_and_subdirectories() {
        let dir = TempDir::new().unwrap();
        let components = dir.path().join("src/icons");
        fs::create_dir_all(components.join("nested")).unwrap();
        fs::write(components.join("Old.tsx"), "old").unwrap();
        fs::write(components.join("nested/Deep.tsx"), "old").unwrap();

        IconGenerator::new(config_in(dir.path()))
            .clear_output_directory()
            .unwrap();

        assert!(components.is_dir());
        assert_eq!(fs::read_dir(&components).unwrap().count(), 0);
    }

    #[test]
    fn test_clear_refuses_when_icons_inside_components() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        config.paths.components_dir = dir.path().to_path_buf();
        write_icon(dir.path(), "home.svg", "<svg></svg>");

        let err = IconGenerator::new(config)
            .clear_output_directory()
            .unwrap_err();
        assert!(matches!(err, IconsyncError::Config(_)));
        assert!(dir.path().join("icons/home.svg").is_file());
    }

    #[test]
    fn test_clear_refuses_when_icons_dir_uses_parent_segments() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src/icons/svg");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(nested.join("home.svg"), "<svg></svg>").unwrap();

        let mut config = config_in(dir.path());
        config.paths.icons_dir = dir.path().join("icons/../src/icons/svg");

        let err = IconGenerator::new(config).generate_all().unwrap_err();
        assert!(matches!(err, IconsyncError::Config(_)));
        assert!(nested.join("home.svg").is_file());
    }

    #[test]
    fn test_convert_icon_uses_relative_types_import() {
        let dir = TempDir::new().unwrap();
        write_icon(dir.path(), "star.svg", "<svg><path d=\"M1 1\"/></svg>");
        let icon = IconSource {
            path: dir.path().join("icons/star.svg"),
            stem: "star".to_string(),
        };

        let converted = IconGenerator::new(config_in(dir.path()))
            .convert_icon(&icon)
            .unwrap();
        assert_eq!(converted.component_name, "Star");
        assert!(converted.source.contains("import { IconProps } from '../types';"));
        assert!(converted.source.contains("Star.displayName = 'Star';"));
    }

    #[test]
    fn test_convert_icon_without_svg_root() {
        let dir = TempDir::new().unwrap();
        write_icon(dir.path(), "blank.svg", "<g><path d=\"M0 0\"/></g>");
        let icon = IconSource {
            path: dir.path().join("icons/blank.svg"),
            stem: "blank".to_string(),
        };

        let reason = IconGenerator::new(config_in(dir.path()))
            .convert_icon(&icon)
            .unwrap_err();
        assert!(matches!(reason, SkipReason::NoSvgElement));
    }

    #[test]
    fn test_convert_icon_unreadable() {
        let dir = TempDir::new().unwrap();
        let icon = IconSource {
            path: dir.path().join("icons/ghost.svg"),
            stem: "ghost".to_string(),
        };

        let reason = IconGenerator::new(config_in(dir.path()))
            .convert_icon(&icon)
            .unwrap_err();
        assert!(matches!(reason, SkipReason::Read(_)));
    }

    #[test]
    fn test_optimizer_failure_skips_every_icon() {
        let dir = TempDir::new().unwrap();
        write_icon(dir.path(), "a.svg", "<svg></svg>");
        write_icon(dir.path(), "b.svg", "<svg></svg>");

        let report = IconGenerator::new(config_in(dir.path()))
            .with_optimizer(Box::new(FailingOptimizer))
            .generate_all()
            .unwrap();

        assert!(report.generated.is_empty());
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped[0].reason.contains("unclosed element <svg>"));
        let index = fs::read_to_string(dir.path().join("src/index.tsx")).unwrap();
        assert_eq!(index, "");
    }

    #[test]
    fn test_report_lists_files_in_write_order() {
        let dir = TempDir::new().unwrap();
        write_icon(dir.path(), "b.svg", "<svg></svg>");
        write_icon(dir.path(), "a.svg", "<svg></svg>");

        let report = IconGenerator::new(config_in(dir.path()))
            .generate_all()
            .unwrap();

        let kinds: Vec<FileKind> = report.files.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FileKind::Types,
                FileKind::Component,
                FileKind::Component,
                FileKind::Index
            ]
        );
        assert_eq!(report.component_names(), vec!["A".to_string(), "B".to_string()]);
        assert!(!report.formatted);
        assert_eq!(report.files[0].bytes_written, TYPES_SOURCE.len());
    }

    #[test]
    fn test_custom_extension_and_layout() {
        let dir = TempDir::new().unwrap();
        write_icon(dir.path(), "home.svg", "<svg></svg>");

        let mut config = IconsyncConfig::default();
        config.formatter.enabled = false;
        config.component.extension = "jsx".to_string();
        config.paths.components_dir = PathBuf::from("lib/components/icons");
        config.paths.index_file = PathBuf::from("lib/index.js");
        config.paths.types_file = PathBuf::from("lib/types.ts");
        config.paths.output_root = PathBuf::from("lib");
        config.resolve_paths(dir.path());

        IconGenerator::new(config).generate_all().unwrap();

        let component =
            fs::read_to_string(dir.path().join("lib/components/icons/Home.jsx")).unwrap();
        assert!(component.contains("from '../../types';"));
        let index = fs::read_to_string(dir.path().join("lib/index.js")).unwrap();
        assert_eq!(
            index,
            "export { default as Home } from './components/icons/Home';"
        );
    }
}
