//! Discovery of source icons.

use crate::config::NamingStyle;
use crate::error::{IconsyncError, Result};
use crate::naming::component_name;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// An `.svg` file found directly inside the icons directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    pub path: PathBuf,
    /// File name without the `.svg` extension.
    pub stem: String,
}

impl IconSource {
    pub fn component_name(&self, style: NamingStyle) -> String {
        component_name(&self.stem, style)
    }
}

/// Lists the `*.svg` files at the top level of `dir`, sorted by file name.
///
/// Subdirectories are not descended into. The extension match is
/// case-sensitive, so `logo.SVG` is ignored.
///
/// # Errors
///
/// Returns [`IconsyncError::InvalidPath`] when `dir` is not a directory.
pub fn scan_icons(dir: &Path) -> Result<Vec<IconSource>> {
    if !dir.is_dir() {
        return Err(IconsyncError::InvalidPath {
            path: dir.to_path_buf(),
        });
    }

    let mut icons = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("svg") {
            trace!("Ignoring non-SVG file {:?}", path);
            continue;
        }

        let Some(stem) = path.file_stem() else {
            continue;
        };
        icons.push(IconSource {
            path: path.to_path_buf(),
            stem: stem.to_string_lossy().into_owned(),
        });
    }

    debug!("Found {} SVG files in {:?}", icons.len(), dir);
    Ok(icons)
}

/// Groups icons whose stems collapse to the same component name.
///
/// Only names shared by two or more sources are returned. During generation
/// the later file in scan order silently overwrites the earlier one.
pub fn find_name_collisions(
    icons: &[IconSource],
    style: NamingStyle,
) -> BTreeMap<String, Vec<PathBuf>> {
    let mut by_name: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for icon in icons {
        by_name
            .entry(icon.component_name(style))
            .or_default()
            .push(icon.path.clone());
    }
    by_name.retain(|_, sources| sources.len() > 1);
    by_name
}
