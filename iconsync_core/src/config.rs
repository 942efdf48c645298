use crate::error::{IconsyncError, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, trace, warn};

/// Name of the configuration file searched for in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = "iconsync.toml";

/// Where icons are read from and where generated files land.
///
/// Relative paths are resolved against the directory holding `iconsync.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned (non-recursively) for `*.svg` files.
    pub icons_dir: PathBuf,
    /// Root handed to the formatter. Every generated file lives below it.
    pub output_root: PathBuf,
    /// Directory receiving one component file per icon. Emptied on every run.
    pub components_dir: PathBuf,
    /// Aggregating module re-exporting every component.
    pub index_file: PathBuf,
    /// Shared `IconProps` definition imported by each component.
    pub types_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            icons_dir: PathBuf::from("icons"),
            output_root: PathBuf::from("src"),
            components_dir: PathBuf::from("src/icons"),
            index_file: PathBuf::from("src/index.tsx"),
            types_file: PathBuf::from("src/types.tsx"),
        }
    }
}

impl PathsConfig {
    /// Moves the output root to `new_root`. Components, index and types
    /// paths that sat under the old root keep their relative position.
    pub fn rebase_output(&mut self, new_root: &Path) {
        let old_root = std::mem::replace(&mut self.output_root, new_root.to_path_buf());
        for path in [
            &mut self.components_dir,
            &mut self.index_file,
            &mut self.types_file,
        ] {
            if let Ok(relative) = path.strip_prefix(&old_root) {
                *path = new_root.join(relative);
            }
        }
    }

    /// Whether clearing `components_dir` would delete the icons.
    ///
    /// Existing paths are compared after canonicalization so `..` segments
    /// and symlinks cannot hide the overlap.
    pub fn components_contain_icons(&self) -> bool {
        let icons = dunce::canonicalize(&self.icons_dir).unwrap_or_else(|_| self.icons_dir.clone());
        let components = dunce::canonicalize(&self.components_dir)
            .unwrap_or_else(|_| self.components_dir.clone());
        icons.starts_with(&components)
    }
}

/// How a file stem becomes a component name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NamingStyle {
    /// Upper-case the first character only (`arrowLeft` -> `ArrowLeft`).
    #[default]
    Capitalize,
    /// Full PascalCase conversion (`arrow-left` -> `ArrowLeft`).
    Pascal,
}

/// Shape of every generated component.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ComponentConfig {
    /// Injected as `width`/`height` when the markup carries none.
    pub default_size: u32,
    /// Default value of the `color` prop.
    pub default_color: String,
    pub naming: NamingStyle,
    /// Extension of component files, without the dot.
    pub extension: String,
    /// Rename hyphenated presentation attributes to their JSX spelling.
    pub jsx_attribute_names: bool,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            default_size: 24,
            default_color: "currentColor".to_string(),
            naming: NamingStyle::Capitalize,
            extension: "tsx".to_string(),
            jsx_attribute_names: false,
        }
    }
}

/// Which optimizer implementation handles each icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerEngine {
    /// In-process XML pass.
    #[default]
    Builtin,
    /// External program reading SVG on stdin and writing it to stdout.
    Command,
}

/// Static optimizer configuration, applied identically to every icon.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub engine: OptimizerEngine,
    pub remove_xml_declaration: bool,
    pub remove_doctype: bool,
    pub remove_comments: bool,
    pub remove_metadata: bool,
    pub remove_title: bool,
    pub remove_desc: bool,
    pub remove_editor_data: bool,
    pub remove_empty_attributes: bool,
    pub cleanup_attribute_whitespace: bool,
    pub collapse_whitespace: bool,
    pub remove_empty_groups: bool,
    /// Program run when `engine = "command"`.
    pub command: String,
    pub args: Vec<String>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            engine: OptimizerEngine::Builtin,
            remove_xml_declaration: true,
            remove_doctype: true,
            remove_comments: true,
            remove_metadata: true,
            remove_title: false,
            remove_desc: true,
            remove_editor_data: true,
            remove_empty_attributes: true,
            cleanup_attribute_whitespace: true,
            collapse_whitespace: true,
            remove_empty_groups: true,
            command: "npx".to_string(),
            args: vec![
                "svgo".to_string(),
                "--input".to_string(),
                "-".to_string(),
                "--output".to_string(),
                "-".to_string(),
            ],
        }
    }
}

/// External formatter run over `paths.output_root` after generation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub enabled: bool,
    pub command: String,
    /// Arguments placed before the output root.
    pub args: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "npx".to_string(),
            args: vec!["prettier".to_string(), "--write".to_string()],
        }
    }
}

/// Root configuration, the contents of `iconsync.toml`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct IconsyncConfig {
    pub paths: PathsConfig,
    pub component: ComponentConfig,
    pub optimizer: OptimizerConfig,
    pub formatter: FormatterConfig,
}

impl IconsyncConfig {
    /// Loads configuration from an explicit file, or by searching for
    /// `iconsync.toml` in the current directory and its ancestors. Falls back
    /// to defaults rooted at the current directory when none exists.
    pub fn load(explicit: Option<&Path>) -> Result<IconsyncConfig> {
        info!("Loading iconsync configuration");
        dotenv::dotenv().ok();
        debug!("Environment variables loaded from .env if present");

        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        let current_dir = env::current_dir()?;
        match Self::find_config_file(&current_dir) {
            Ok(path) => Self::from_path(&path),
            Err(IconsyncError::ConfigNotFound { .. }) => {
                info!(
                    "No {} found, using defaults rooted at {:?}",
                    CONFIG_FILE_NAME, current_dir
                );
                let mut config = IconsyncConfig::default();
                config.resolve_paths(&current_dir);
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    /// Loads and resolves a specific configuration file.
    pub fn from_path(path: &Path) -> Result<IconsyncConfig> {
        info!("Using configuration file at: {:?}", path);

        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            IconsyncError::io_at(path, e)
        })?;
        debug!("Configuration file size: {} bytes", contents.len());

        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => env::current_dir()?,
        };

        Self::parse(&contents, &base_dir)
    }

    /// Parses TOML content and resolves relative paths against `base_dir`.
    pub fn parse(contents: &str, base_dir: &Path) -> Result<IconsyncConfig> {
        let mut config: IconsyncConfig = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            IconsyncError::from(e)
        })?;
        debug!("Successfully parsed TOML configuration");

        config.substitute_path_vars()?;
        config.resolve_paths(base_dir);
        config.check()?;

        debug!(
            "Resolved paths - icons: {:?}, components: {:?}, index: {:?}",
            config.paths.icons_dir, config.paths.components_dir, config.paths.index_file
        );
        Ok(config)
    }

    /// Searches for `iconsync.toml` starting from `start_dir` and walking up to the root.
    pub fn find_config_file(start_dir: &Path) -> Result<PathBuf> {
        debug!("Starting config file search from: {:?}", start_dir);

        for path in start_dir.ancestors() {
            let config_path = path.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", config_path);
            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        Err(IconsyncError::ConfigNotFound {
            search_start: start_dir.to_path_buf(),
        })
    }

    /// Joins every relative path onto `base_dir`.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        let paths = &mut self.paths;
        for path in [
            &mut paths.icons_dir,
            &mut paths.output_root,
            &mut paths.components_dir,
            &mut paths.index_file,
            &mut paths.types_file,
        ] {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        }
    }

    fn substitute_path_vars(&mut self) -> Result<()> {
        let paths = &mut self.paths;
        for path in [
            &mut paths.icons_dir,
            &mut paths.output_root,
            &mut paths.components_dir,
            &mut paths.index_file,
            &mut paths.types_file,
        ] {
            let raw = path.to_string_lossy().into_owned();
            *path = PathBuf::from(Self::substitute_env_vars(&raw)?);
        }
        Ok(())
    }

    fn check(&self) -> Result<()> {
        if self.component.extension.is_empty() || self.component.extension.starts_with('.') {
            return Err(IconsyncError::config(format!(
                "component.extension must be non-empty and given without a leading dot, got {:?}",
                self.component.extension
            )));
        }
        if self.component.default_color.contains('\'') {
            return Err(IconsyncError::config(
                "component.default_color must not contain a single quote",
            ));
        }
        if self.formatter.enabled && self.formatter.command.trim().is_empty() {
            return Err(IconsyncError::config(
                "formatter.command is empty; set formatter.enabled = false to skip formatting",
            ));
        }
        if self.optimizer.engine == OptimizerEngine::Command
            && self.optimizer.command.trim().is_empty()
        {
            return Err(IconsyncError::config(
                "optimizer.command is empty but optimizer.engine = \"command\"",
            ));
        }
        Ok(())
    }

    /// Substitute environment variables in config strings.
    /// Supports ${VAR_NAME:-default} syntax
    fn substitute_env_vars(value: &str) -> Result<String> {
        trace!("Substituting environment variables in: {}", value);
        let mut result = value.to_string();

        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")?;

        for cap in re.captures_iter(value) {
            let var_name = &cap[1];
            let default_value = cap.get(2).map(|m| m.as_str());

            let replacement = match env::var(var_name) {
                Ok(val) => {
                    debug!("Resolved environment variable: {}", var_name);
                    val
                }
                Err(_) => match default_value {
                    Some(default) => {
                        warn!(
                            "Environment variable {} not set, using default: {}",
                            var_name, default
                        );
                        default.to_string()
                    }
                    None => {
                        error!(
                            "Environment variable {} not set and no default provided",
                            var_name
                        );
                        return Err(IconsyncError::EnvVarNotSet(var_name.to_string()));
                    }
                },
            };

            result = result.replace(&cap[0], &replacement);
        }

        Ok(result)
    }
}
