//! Persisted layout document.
//!
//! The saved shape is `{"version": 1, "elements": [...]}`. A bare element
//! array is also accepted, which is how layouts were cached before the
//! document wrapper existed. Elements whose id is missing or not a UUID get a
//! fresh one on load.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::element::{Element, ElementId, MAX_Z_INDEX};
use crate::error::{CraftError, CraftResult};
use crate::geometry::MAX_COORDINATE;

/// Current document format version.
pub const LAYOUT_VERSION: u32 = 1;

/// A serialisable layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Format version.
    pub version: u32,
    /// Elements in list order.
    pub elements: Vec<Element>,
}

impl LayoutDocument {
    /// Wrap elements in a current-version document.
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            version: LAYOUT_VERSION,
            elements,
        }
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CraftResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a document or a bare element array.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::Serialization`] for malformed JSON or element
    /// fields, and [`CraftError::InvalidLayout`] for an unsupported version,
    /// an unexpected top-level shape, duplicate ids or non-positive sizes.
    pub fn from_json(json: &str) -> CraftResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        let (version, items) = match value {
            Value::Array(items) => (LAYOUT_VERSION, items),
            Value::Object(mut map) => {
                let version = match map.get("version") {
                    None => LAYOUT_VERSION,
                    Some(v) => v
                        .as_u64()
                        .and_then(|v| u32::try_from(v).ok())
                        .ok_or_else(|| CraftError::InvalidLayout("version must be an integer".into()))?,
                };
                if version > LAYOUT_VERSION {
                    return Err(CraftError::InvalidLayout(format!(
                        "unsupported version {version}"
                    )));
                }
                match map.remove("elements") {
                    Some(Value::Array(items)) => (version, items),
                    _ => {
                        return Err(CraftError::InvalidLayout(
                            "missing elements array".into(),
                        ))
                    }
                }
            }
            _ => {
                return Err(CraftError::InvalidLayout(
                    "expected an object or an array".into(),
                ))
            }
        };

        let elements = items
            .into_iter()
            .map(into_element)
            .collect::<CraftResult<Vec<_>>>()?;
        validate(&elements)?;
        tracing::debug!(count = elements.len(), version, "Parsed layout document");
        Ok(Self { version, elements })
    }
}

fn into_element(mut item: Value) -> CraftResult<Element> {
    let has_uuid = matches!(
        item.get("id").and_then(Value::as_str).map(ElementId::parse),
        Some(Ok(_))
    );
    if !has_uuid {
        if let Value::Object(map) = &mut item {
            map.insert("id".into(), Value::String(ElementId::new().to_string()));
        }
    }
    let element: Element = serde_json::from_value(item)?;
    if !has_uuid {
        tracing::debug!(id = %element.id(), "Assigned fresh id to legacy element");
    }
    Ok(element)
}

/// Check that ids are unique, every size is positive and geometry, corner
/// radius and z-index stay within [`MAX_COORDINATE`] and [`MAX_Z_INDEX`].
///
/// # Errors
///
/// Returns [`CraftError::InvalidLayout`] describing the first violation.
pub fn validate(elements: &[Element]) -> CraftResult<()> {
    let mut seen = HashSet::with_capacity(elements.len());
    for element in elements {
        if !seen.insert(element.id()) {
            return Err(CraftError::InvalidLayout(format!(
                "duplicate element id {}",
                element.id()
            )));
        }
        if element.width <= 0 || element.height <= 0 {
            return Err(CraftError::InvalidLayout(format!(
                "element {} has non-positive size {}x{}",
                element.id(),
                element.width,
                element.height
            )));
        }
        if !element.rect().is_within_limits() {
            return Err(CraftError::InvalidLayout(format!(
                "element {} geometry exceeds {MAX_COORDINATE}",
                element.id()
            )));
        }
        if !(0..=MAX_COORDINATE).contains(&element.corner_radius) {
            return Err(CraftError::InvalidLayout(format!(
                "element {} has corner radius {} out of range",
                element.id(),
                element.corner_radius
            )));
        }
        if !(-MAX_Z_INDEX..=MAX_Z_INDEX).contains(&element.z_index) {
            return Err(CraftError::InvalidLayout(format!(
                "element {} has z-index {} out of range",
                element.id(),
                element.z_index
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Animation, ElementKind, Style};
    use crate::geometry::Rect;

    fn sample() -> Vec<Element> {
        vec![
            Element::new(
                ElementKind::Rectangle,
                Rect::new(0, 0, 100, 50),
                Style::for_kind(ElementKind::Rectangle),
            )
            .with_z_index(1),
            Element::new(
                ElementKind::Circle,
                Rect::new(10, 10, 40, 40),
                Style::for_kind(ElementKind::Circle).with_delay("0.2s"),
            )
            .with_z_index(2)
            .with_locked(true),
        ]
    }

    #[test]
    fn test_roundtrip_preserves_layout() {
        let doc = LayoutDocument::new(sample());
        let json = doc.to_json().unwrap();
        let back = LayoutDocument::from_json(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_bare_array_with_legacy_ids() {
        let json = r#"[
            {"id":"el_1","type":"rect","x":1,"y":2,"width":30,"height":40,"borderRadius":8,
             "color":"bg-slate-700","animation":"wave","zIndex":1},
            {"id":"el_2","type":"text","x":5,"y":6,"width":70,"height":8,"cornerRadius":4,
             "color":"bg-zinc-700","animation":"pulse","zIndex":2,"locked":true}
        ]"#;
        let doc = LayoutDocument::from_json(json).unwrap();
        assert_eq!(doc.version, LAYOUT_VERSION);
        assert_eq!(doc.elements.len(), 2);
        assert_ne!(doc.elements[0].id(), doc.elements[1].id());
        assert_eq!(doc.elements[0].corner_radius, 8);
        assert_eq!(doc.elements[0].animation, Animation::Wave);
        assert!(doc.elements[1].locked);
    }

    #[test]
    fn test_out_of_range_geometry_rejected() {
        let cases = [
            r#"[{"type":"rect","x":2147483640,"y":0,"width":100,"height":10,"cornerRadius":4}]"#,
            r#"[{"type":"rect","x":0,"y":0,"width":10,"height":2000000,"cornerRadius":4}]"#,
            r#"[{"type":"rect","x":0,"y":0,"width":10,"height":10,"cornerRadius":-1}]"#,
            r#"[{"type":"rect","x":0,"y":0,"width":10,"height":10,"cornerRadius":4,"zIndex":2147483647}]"#,
        ];
        for json in cases {
            assert!(
                matches!(LayoutDocument::from_json(json), Err(CraftError::InvalidLayout(_))),
                "{json}"
            );
        }
        let edge = r#"[{"type":"rect","x":-1000000,"y":1000000,"width":10,"height":10,"cornerRadius":0}]"#;
        assert!(LayoutDocument::from_json(edge).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let el = sample().remove(0);
        let doc = LayoutDocument::new(vec![el.clone(), el]);
        let json = doc.to_json().unwrap();
        assert!(matches!(
            LayoutDocument::from_json(&json),
            Err(CraftError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_zero_size_rejected() {
        let json = r#"[{"type":"rect","x":0,"y":0,"width":0,"height":10,"cornerRadius":0}]"#;
        assert!(matches!(
            LayoutDocument::from_json(json),
            Err(CraftError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_wrong_shapes_rejected() {
        assert!(matches!(
            LayoutDocument::from_json("42"),
            Err(CraftError::InvalidLayout(_))
        ));
        assert!(matches!(
            LayoutDocument::from_json(r#"{"version":1}"#),
            Err(CraftError::InvalidLayout(_))
        ));
        assert!(matches!(
            LayoutDocument::from_json(r#"{"version":99,"elements":[]}"#),
            Err(CraftError::InvalidLayout(_))
        ));
        assert!(matches!(
            LayoutDocument::from_json("not json"),
            Err(CraftError::Serialization(_))
        ));
        assert!(matches!(
            LayoutDocument::from_json(r#"[{"type":"hexagon","x":0,"y":0,"width":5,"height":5,"cornerRadius":0}]"#),
            Err(CraftError::Serialization(_))
        ));
    }
}
