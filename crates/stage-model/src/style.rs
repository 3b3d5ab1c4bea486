//! CSS style records attached to elements.
//!
//! Styles are kept as plain property → value string maps, exactly as
//! they will be serialized back into the document's stylesheet. Every
//! element carries two slots: the desktop style and a narrower mobile
//! override; when the editor is in mobile mode the two are merged with
//! mobile values taking precedence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An ordered CSS property → value map (`"left"` → `"104px"`).
pub type StyleMap = BTreeMap<String, String>;

/// The desktop style box plus the mobile override for one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub desktop: StyleMap,
    pub mobile: StyleMap,
}

impl ElementStyle {
    /// The effective style map: desktop only, or desktop overlaid with
    /// the mobile values when `mobile` is set.
    pub fn merged(&self, mobile: bool) -> StyleMap {
        if mobile {
            let mut merged = self.desktop.clone();
            for (key, value) in &self.mobile {
                merged.insert(key.clone(), value.clone());
            }
            merged
        } else {
            self.desktop.clone()
        }
    }

    pub fn slot(&self, mobile: bool) -> &StyleMap {
        if mobile { &self.mobile } else { &self.desktop }
    }

    pub fn slot_mut(&mut self, mobile: bool) -> &mut StyleMap {
        if mobile {
            &mut self.mobile
        } else {
            &mut self.desktop
        }
    }

    /// True when neither slot has any property — the element was never
    /// given a style box.
    pub fn is_empty(&self) -> bool {
        self.desktop.is_empty() && self.mobile.is_empty()
    }
}

/// Parse a pixel length (`"104px"` or bare `"104"`). Returns `None`
/// for percentages, `auto`, and anything else that is not a px length.
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    if number.ends_with('%') {
        return None;
    }
    number.parse::<f64>().ok()
}

/// Format a pixel length the way the editor writes styles back
/// (rounded to whole pixels).
pub fn format_px(value: f64) -> String {
    format!("{}px", value.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_values_take_precedence() {
        let mut style = ElementStyle::default();
        style.desktop.insert("left".into(), "10px".into());
        style.desktop.insert("width".into(), "300px".into());
        style.mobile.insert("width".into(), "100%".into());

        let merged = style.merged(true);
        assert_eq!(merged.get("left").map(String::as_str), Some("10px"));
        assert_eq!(merged.get("width").map(String::as_str), Some("100%"));

        // desktop mode ignores the mobile slot entirely
        let desktop = style.merged(false);
        assert_eq!(desktop.get("width").map(String::as_str), Some("300px"));
    }

    #[test]
    fn px_parsing() {
        assert_eq!(parse_px("104px"), Some(104.0));
        assert_eq!(parse_px(" 20.5px "), Some(20.5));
        assert_eq!(parse_px("42"), Some(42.0));
        assert_eq!(parse_px("50%"), None);
        assert_eq!(parse_px("auto"), None);
    }

    #[test]
    fn px_formatting_rounds() {
        assert_eq!(format_px(103.6), "104px");
        assert_eq!(format_px(-0.4), "0px");
    }
}
