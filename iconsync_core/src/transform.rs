//! Textual rewrites turning optimized SVG markup into component JSX.
//!
//! Everything here is substring and regex work on the markup, not a parse
//! tree. `width=` inside an unrelated attribute value counts as a width, and
//! a document with several `<svg>` roots is matched from the first opening
//! tag to the last closing one.

use convert_case::{Case, Casing};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SVG_ELEMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<svg[^>]*>[\s\S]*</svg>").expect("Invalid svg element regex"));

static STYLE_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"style="[^"]*""#).expect("Invalid style attribute regex"));

static DATA_NAME_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-name="[^"]*""#).expect("Invalid data-name attribute regex"));

static COMPOUND_ATTR_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\s)([A-Za-z]+(?:[-:][A-Za-z]+)+)=").expect("Invalid attribute name regex")
});

/// Options for [`transform_svg`], taken from `[component]`.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    pub default_size: u32,
    pub jsx_attribute_names: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            default_size: 24,
            jsx_attribute_names: false,
        }
    }
}

/// Runs the whole rewrite chain on optimized markup.
///
/// Returns `None` when the markup holds no `<svg>…</svg>` element.
pub fn transform_svg(optimized: &str, options: &TransformOptions) -> Option<String> {
    let element = extract_svg_element(optimized)?;
    let element = add_default_dimensions(element, options.default_size);
    let element = remove_unwanted_attributes(&element);
    let element = if options.jsx_attribute_names {
        jsx_attribute_names(&element)
    } else {
        element
    };
    Some(inject_component_bindings(&element))
}

/// First `<svg …>` through the last `</svg>`.
pub fn extract_svg_element(svg: &str) -> Option<&str> {
    SVG_ELEMENT_RE.find(svg).map(|m| m.as_str())
}

/// Injects `width`/`height` on the root tag when the literal `width=` /
/// `height=` is absent from the whole element.
pub fn add_default_dimensions(element: &str, size: u32) -> String {
    let mut injected = String::new();
    if !element.contains("width=") {
        injected.push_str(&format!(" width=\"{size}\""));
    }
    if !element.contains("height=") {
        injected.push_str(&format!(" height=\"{size}\""));
    }

    if injected.is_empty() {
        element.to_string()
    } else {
        element.replacen("<svg", &format!("<svg{injected}"), 1)
    }
}

/// Strips every inline `style` and editor `data-name` attribute.
pub fn remove_unwanted_attributes(element: &str) -> String {
    let element = STYLE_ATTR_RE.replace_all(element, "");
    DATA_NAME_ATTR_RE.replace_all(&element, "").into_owned()
}

/// `stroke-width` -> `strokeWidth`, `xlink:href` -> `xlinkHref`.
/// `data-*` and `aria-*` keep their spelling.
pub fn jsx_attribute_names(element: &str) -> String {
    COMPOUND_ATTR_NAME_RE
        .replace_all(element, |caps: &Captures<'_>| {
            let name = &caps[2];
            if name.starts_with("data-") || name.starts_with("aria-") {
                return caps[0].to_string();
            }
            let camel = name.replace(':', "-").to_case(Case::Camel);
            format!("{}{}=", &caps[1], camel)
        })
        .into_owned()
}

/// Forwards props and the ref onto the root and binds `fill` on every path.
pub fn inject_component_bindings(element: &str) -> String {
    element
        .replacen("<svg", "<svg {...props} ref={forwardedRef}", 1)
        .replace("<path", "<path fill={color}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_extract_svg_element_strips_prolog() {
        let svg = r#"<?xml version="1.0"?><svg viewBox="0 0 24 24"><path d="M0 0"/></svg>
"#;
        assert_eq!(
            extract_svg_element(svg),
            Some(r#"<svg viewBox="0 0 24 24"><path d="M0 0"/></svg>"#)
        );
    }

    #[test]
    fn test_extract_svg_element_spans_to_last_close() {
        let svg = "<svg a=\"1\"><g/></svg><svg b=\"2\"></svg>";
        assert_eq!(extract_svg_element(svg), Some(svg));
    }

    #[test]
    fn test_extract_svg_element_multiline() {
        let svg = "<svg\n  viewBox=\"0 0 1 1\">\n  <path d=\"M0 0\"/>\n</svg>";
        assert_eq!(extract_svg_element(svg), Some(svg));
    }

    #[test]
    fn test_extract_svg_element_missing() {
        assert_eq!(extract_svg_element("<div></div>"), None);
        assert_eq!(extract_svg_element("<svg viewBox=\"0 0 1 1\">"), None);
        assert_eq!(extract_svg_element(""), None);
    }

    #[test]
    fn test_add_default_dimensions_both_missing() {
        assert_eq!(
            add_default_dimensions(r#"<svg viewBox="0 0 24 24"></svg>"#, 24),
            r#"<svg width="24" height="24" viewBox="0 0 24 24"></svg>"#
        );
    }

    #[test]
    fn test_add_default_dimensions_keeps_existing_width() {
        assert_eq!(
            add_default_dimensions(r#"<svg width="32" viewBox="0 0 32 32"></svg>"#, 24),
            r#"<svg height="24" width="32" viewBox="0 0 32 32"></svg>"#
        );
    }

    #[test]
    fn test_add_default_dimensions_noop_when_present() {
        let svg = r#"<svg width="16" height="16"></svg>"#;
        assert_eq!(add_default_dimensions(svg, 24), svg);
    }

    #[test]
    fn test_add_default_dimensions_matches_nested_attribute() {
        // stroke-width= satisfies the substring check
        let svg = r#"<svg><path stroke-width="2"/></svg>"#;
        assert_eq!(
            add_default_dimensions(svg, 24),
            r#"<svg height="24"><path stroke-width="2"/></svg>"#
        );
    }

    #[test]
    fn test_remove_unwanted_attributes() {
        let svg = r#"<svg style="fill:red"><path data-name="Layer 1" d="M0 0" style=""/></svg>"#;
        assert_eq!(
            remove_unwanted_attributes(svg),
            r#"<svg ><path  d="M0 0" /></svg>"#
        );
    }

    #[test]
    fn test_jsx_attribute_names() {
        let svg = r##"<svg xmlns:xlink="x"><path fill-rule="evenodd" stroke-width="2" data-id="a" aria-hidden="true"/><use xlink:href="#a"/></svg>"##;
        assert_eq!(
            jsx_attribute_names(svg),
            r##"<svg xmlnsXlink="x"><path fillRule="evenodd" strokeWidth="2" data-id="a" aria-hidden="true"/><use xlinkHref="#a"/></svg>"##
        );
    }

    #[test]
    fn test_inject_component_bindings() {
        let svg = r#"<svg viewBox="0 0 24 24"><path d="M0 0"/><path d="M1 1"/></svg>"#;
        assert_eq!(
            inject_component_bindings(svg),
            r#"<svg {...props} ref={forwardedRef} viewBox="0 0 24 24"><path fill={color} d="M0 0"/><path fill={color} d="M1 1"/></svg>"#
        );
    }

    #[test]
    fn test_transform_svg_home_scenario() {
        let svg = r#"<svg viewBox="0 0 24 24"><path d="M0 0" data-name="x"/></svg>"#;
        let out = transform_svg(svg, &TransformOptions::default()).unwrap();
        assert_eq!(
            out,
            r#"<svg {...props} ref={forwardedRef} width="24" height="24" viewBox="0 0 24 24"><path fill={color} d="M0 0" /></svg>"#
        );
    }

    #[test]
    fn test_transform_svg_custom_size() {
        let options = TransformOptions {
            default_size: 16,
            ..TransformOptions::default()
        };
        let out = transform_svg("<svg></svg>", &options).unwrap();
        assert!(out.contains(r#"width="16" height="16""#));
    }

    #[test]
    fn test_transform_svg_without_root() {
        assert_eq!(transform_svg("just text", &TransformOptions::default()), None);
    }

    proptest! {
        #[test]
        fn prop_style_and_data_name_never_survive(
            attrs in proptest::collection::vec(
                (
                    prop_oneof![Just("style"), Just("data-name"), Just("d"), Just("fill")],
                    "[a-z0-9 :;#.-]{0,12}",
                ),
                0..6,
            )
        ) {
            let rendered: String = attrs
                .iter()
                .map(|(name, value)| format!(" {name}=\"{value}\""))
                .collect();
            let svg = format!("<svg{rendered}><path{rendered}/></svg>");
            let out = transform_svg(&svg, &TransformOptions::default()).unwrap();
            prop_assert!(!out.contains("style=\""));
            prop_assert!(!out.contains("data-name=\""));
        }

        #[test]
        fn prop_existing_width_is_never_duplicated(width in 1u32..512) {
            let svg = format!("<svg width=\"{width}\"><path d=\"M0 0\"/></svg>");
            let out = add_default_dimensions(&svg, 24);
            prop_assert_eq!(out.matches("width=").count(), 1);
            prop_assert_eq!(out.matches("height=\"24\"").count(), 1);
        }
    }
}
