//! Source text of the generated TSX files.

use std::path::Path;

/// Shared props interface, identical on every run.
pub const TYPES_SOURCE: &str = r#"
import * as React from 'react';

export interface IconProps extends React.SVGAttributes<SVGElement> {
  children?: never;
  color?: string;
}
"#;

/// A `forwardRef` component wrapping already-rewritten SVG markup.
pub fn component_source(name: &str, markup: &str, default_color: &str, types_import: &str) -> String {
    format!(
        r#"
import * as React from 'react';
import {{ IconProps }} from '{types_import}';

export const {name} = React.forwardRef<SVGSVGElement, IconProps>(
  ({{ color = '{default_color}', ...props }}, forwardedRef) => {{
    return (
      {markup}
    );
  }}
);
{name}.displayName = '{name}';

export default {name};
"#
    )
}

/// One default re-export per component, in the given order.
pub fn index_source(component_names: &[String], components_import: &str) -> String {
    component_names
        .iter()
        .map(|name| format!("export {{ default as {name} }} from '{components_import}/{name}';"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// ES module specifier pointing from a file in `from_dir` to `target`:
/// `./icons`, `../types`. Callers strip file extensions first.
pub fn module_specifier(from_dir: &Path, target: &Path) -> String {
    let Some(relative) = pathdiff::diff_paths(target, from_dir) else {
        return target.to_string_lossy().replace('\\', "/");
    };

    let joined = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{joined}")
    }
}
