use super::Optimizer;
use crate::config::OptimizerConfig;
use crate::error::OptimizeError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use std::path::Path;
use tracing::trace;

/// Namespace prefixes written by drawing tools and meaningless to a renderer.
const EDITOR_PREFIXES: &[&[u8]] = &[b"inkscape", b"sodipodi", b"sketch", b"sketchtool", b"serif"];

/// In-process optimizer built on a `quick-xml` event stream.
#[derive(Debug, Clone, Default)]
pub struct BuiltinOptimizer {
    config: OptimizerConfig,
}

impl BuiltinOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    fn is_removable_element(&self, name: &[u8]) -> bool {
        match name {
            b"metadata" => self.config.remove_metadata,
            b"title" => self.config.remove_title,
            b"desc" => self.config.remove_desc,
            _ => self.config.remove_editor_data && has_editor_prefix(name),
        }
    }

    fn is_removable_attribute(&self, key: &[u8], value: &[u8]) -> bool {
        if self.config.remove_empty_attributes && value.is_empty() {
            return true;
        }
        if self.config.remove_editor_data {
            if has_editor_prefix(key) {
                return true;
            }
            if let Some(declared) = key.strip_prefix(b"xmlns:") {
                return EDITOR_PREFIXES.contains(&declared);
            }
        }
        false
    }

    /// Copies `start` with the filtered attribute list.
    fn rewrite_start(&self, start: &BytesStart<'_>) -> Result<BytesStart<'static>, OptimizeError> {
        let mut kept: Vec<(Vec<u8>, Vec<u8>)> = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = attr.key.as_ref();
            if self.is_removable_attribute(key, &attr.value) {
                trace!(
                    attribute = %String::from_utf8_lossy(key),
                    "dropping attribute"
                );
                continue;
            }
            let value = if self.config.cleanup_attribute_whitespace {
                collapse_whitespace(&attr.value)
            } else {
                attr.value.to_vec()
            };
            if self.config.remove_empty_attributes && value.is_empty() {
                continue;
            }
            kept.push((key.to_vec(), escape_double_quotes(value)));
        }

        let mut out = start.clone().into_owned();
        out.clear_attributes();
        for (key, value) in &kept {
            out.push_attribute((key.as_slice(), value.as_slice()));
        }
        Ok(out)
    }
}

impl Optimizer for BuiltinOptimizer {
    fn optimize(&self, svg: &str, path: &Path) -> Result<String, OptimizeError> {
        trace!("Optimizing {:?} ({} bytes)", path, svg.len());

        let mut reader = Reader::from_str(svg);
        let mut writer = Writer::new(Vec::with_capacity(svg.len()));

        // Names of currently open elements, including skipped ones.
        let mut open: Vec<Vec<u8>> = Vec::new();
        // Stack depth at which a removed subtree started.
        let mut skip_from: Option<usize> = None;

        loop {
            let event = reader.read_event()?;

            if let Some(depth) = skip_from {
                match event {
                    Event::Start(e) => open.push(e.name().as_ref().to_vec()),
                    Event::End(_) => {
                        open.pop();
                        if open.len() < depth {
                            skip_from = None;
                        }
                    }
                    Event::Eof => break,
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Eof => break,
                Event::Decl(_) | Event::PI(_) if self.config.remove_xml_declaration => {}
                Event::DocType(_) if self.config.remove_doctype => {}
                Event::Comment(_) if self.config.remove_comments => {}
                Event::Text(text)
                    if self.config.collapse_whitespace
                        && text.iter().all(u8::is_ascii_whitespace) => {}
                Event::Start(e) => {
                    let name = e.name().as_ref().to_vec();
                    open.push(name.clone());
                    if self.is_removable_element(&name) {
                        trace!(element = %String::from_utf8_lossy(&name), "dropping subtree");
                        skip_from = Some(open.len());
                        continue;
                    }
                    writer.write_event(Event::Start(self.rewrite_start(&e)?))?;
                }
                Event::Empty(e) => {
                    let name = e.name();
                    if self.is_removable_element(name.as_ref()) {
                        continue;
                    }
                    let rewritten = self.rewrite_start(&e)?;
                    if self.config.remove_empty_groups
                        && name.as_ref() == b"g"
                        && rewritten.attributes().next().is_none()
                    {
                        continue;
                    }
                    writer.write_event(Event::Empty(rewritten))?;
                }
                Event::End(e) => {
                    open.pop();
                    writer.write_event(Event::End(e))?;
                }
                other => writer.write_event(other)?,
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(OptimizeError::UnclosedElement(
                String::from_utf8_lossy(unclosed).into_owned(),
            ));
        }

        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn has_editor_prefix(name: &[u8]) -> bool {
    match name.iter().position(|&b| b == b':') {
        Some(colon) => EDITOR_PREFIXES.contains(&&name[..colon]),
        None => false,
    }
}

/// Attributes are re-emitted double-quoted; single-quoted sources may hold `"`.
fn escape_double_quotes(value: Vec<u8>) -> Vec<u8> {
    if !value.contains(&b'"') {
        return value;
    }
    let mut escaped = Vec::with_capacity(value.len() + 8);
    for byte in value {
        if byte == b'"' {
            escaped.extend_from_slice(b"&quot;");
        } else {
            escaped.push(byte);
        }
    }
    escaped
}

fn collapse_whitespace(value: &[u8]) -> Vec<u8> {
    value
        .split(u8::is_ascii_whitespace)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(&b' ')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn optimize(svg: &str) -> Result<String, OptimizeError> {
        BuiltinOptimizer::default().optimize(svg, Path::new("test.svg"))
    }

    fn optimize_with(config: OptimizerConfig, svg: &str) -> Result<String, OptimizeError> {
        BuiltinOptimizer::new(config).optimize(svg, Path::new("test.svg"))
    }

    #[test]
    fn test_default_config_enables_passes() {
        let optimizer = BuiltinOptimizer::new(OptimizerConfig::default());
        assert!(optimizer.is_removable_element(b"metadata"));
        assert!(!optimizer.is_removable_element(b"title"));
        assert!(optimizer.is_removable_element(b"sodipodi:namedview"));
        assert!(!optimizer.is_removable_element(b"path"));
    }

    #[test]
    fn test_strips_prolog_doctype_and_comments() {
        let svg = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<!-- Generator: Illustrator -->
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
  <path d="M0 0h24v24H0z"/>
</svg>
"#;
        assert_eq!(
            optimize(svg).unwrap(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M0 0h24v24H0z"/></svg>"#
        );
    }

    #[test]
    fn test_removes_metadata_desc_and_editor_data() {
        let svg = r##"<svg xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" inkscape:version="1.0" viewBox="0 0 10 10"><metadata><rdf:RDF><cc:Work/></rdf:RDF></metadata><desc>An icon</desc><sodipodi:namedview pagecolor="#fff"/><title>Home</title><path inkscape:label="p" d="M1 1"/></svg>"##;
        assert_eq!(
            optimize(svg).unwrap(),
            r#"<svg viewBox="0 0 10 10"><title>Home</title><path d="M1 1"/></svg>"#
        );
    }

    #[test]
    fn test_remove_title_when_enabled() {
        let config = OptimizerConfig {
            remove_title: true,
            ..OptimizerConfig::default()
        };
        assert_eq!(
            optimize_with(config, "<svg><title>Home</title><path d=\"M0 0\"/></svg>").unwrap(),
            "<svg><path d=\"M0 0\"/></svg>"
        );
    }

    #[test]
    fn test_cleans_attribute_whitespace_and_empty_attributes() {
        let svg = "<svg class=\"\" viewBox=\"  0 0\n   24 24 \"><path d=\"M0 0\n  L1 1\"/></svg>";
        assert_eq!(
            optimize(svg).unwrap(),
            r#"<svg viewBox="0 0 24 24"><path d="M0 0 L1 1"/></svg>"#
        );
    }

    #[test]
    fn test_drops_empty_groups_only() {
        let svg = r#"<svg><g/><g id="a"/><g><path d="M0 0"/></g></svg>"#;
        assert_eq!(
            optimize(svg).unwrap(),
            r#"<svg><g id="a"/><g><path d="M0 0"/></g></svg>"#
        );
    }

    #[test]
    fn test_keeps_style_and_data_name() {
        // These are stripped later by the transform stage.
        let svg = r#"<svg style="fill:red"><path data-name="Layer 1" d="M0 0"/></svg>"#;
        assert_eq!(optimize(svg).unwrap(), svg);
    }

    #[test]
    fn test_keeps_meaningful_text() {
        let svg = "<svg><text x=\"0\">A &amp; B</text></svg>";
        assert_eq!(optimize(svg).unwrap(), svg);
    }

    #[test]
    fn test_passes_disabled_keep_content() {
        let config = OptimizerConfig {
            remove_comments: false,
            collapse_whitespace: false,
            ..OptimizerConfig::default()
        };
        let svg = "<svg><!-- keep --> <path d=\"M0 0\"/></svg>";
        assert_eq!(optimize_with(config, svg).unwrap(), svg);
    }

    #[test]
    fn test_mismatched_end_tag_is_error() {
        assert!(optimize("<svg><g></svg>").is_err());
    }

    #[test]
    fn test_unclosed_root_is_error() {
        let err = optimize("<svg viewBox=\"0 0 1 1\"><path d=\"M0 0\"/>").unwrap_err();
        assert!(err.to_string().contains("svg"));
    }

    #[test]
    fn test_duplicate_attribute_is_error() {
        assert!(optimize(r#"<svg width="1" width="2"></svg>"#).is_err());
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(optimize("").unwrap(), "");
    }

    #[test]
    fn test_single_quoted_attribute_requoted() {
        let svg = r#"<svg><text font-family='"Inter", sans-serif'>A</text></svg>"#;
        assert_eq!(
            optimize(svg).unwrap(),
            r#"<svg><text font-family="&quot;Inter&quot;, sans-serif">A</text></svg>"#
        );
    }

    #[test]
    fn test_collapse_whitespace_helper() {
        assert_eq!(collapse_whitespace(b"  a \n\t b  "), b"a b".to_vec());
        assert_eq!(collapse_whitespace(b"   "), Vec::<u8>::new());
    }
}
