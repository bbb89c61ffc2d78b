//! Suggested layouts returned by an external inference service.
//!
//! The service answers with a JSON array of `{type, x, y, width, height}`
//! objects. Anything else is rejected before it can touch the canvas.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::element::{create_element, Animation, Element, ElementKind, Style};
use crate::error::{CraftError, CraftResult};
use crate::geometry::{Rect, MAX_COORDINATE};
use crate::palette::Swatch;

/// One proposed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedShape {
    /// Shape kind.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl SuggestedShape {
    /// Geometry rounded to whole pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x.round() as i32,
            self.y.round() as i32,
            self.width.round() as i32,
            self.height.round() as i32,
        )
    }

    /// Style given to imported shapes.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn style(&self) -> Style {
        let radius = match self.kind {
            ElementKind::Circle => (self.width / 2.0).round() as i32,
            ElementKind::TextBar => 4,
            ElementKind::Rectangle => 8,
        };
        Style {
            corner_radius: radius,
            color: Swatch::Slate,
            animation: Animation::Pulse,
            animation_delay: None,
        }
    }

    /// New element for this shape, stacked above `existing`.
    #[must_use]
    pub fn to_element(&self, existing: &[Element]) -> Element {
        let style = self.style();
        let radius = style.corner_radius;
        let mut element = create_element(existing, self.kind, self.rect(), style);
        // Imported circles keep the width-derived radius.
        element.corner_radius = radius;
        element
    }

    fn validate(&self, index: usize) -> CraftResult<()> {
        let values = [self.x, self.y, self.width, self.height];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CraftError::InvalidSuggestion(format!(
                "item {index}: coordinates must be finite numbers"
            )));
        }
        if values.iter().any(|v| v.abs() > f64::from(MAX_COORDINATE)) {
            return Err(CraftError::InvalidSuggestion(format!(
                "item {index}: coordinates exceed {MAX_COORDINATE}"
            )));
        }
        let rect = self.rect();
        if rect.width <= 0 || rect.height <= 0 {
            return Err(CraftError::InvalidSuggestion(format!(
                "item {index}: size {}x{} is not positive",
                rect.width, rect.height
            )));
        }
        Ok(())
    }
}

/// Parse and validate a suggested layout.
///
/// # Errors
///
/// Returns [`CraftError::InvalidSuggestion`] when the payload is not JSON,
/// not an array, or any item has an unknown type, a missing field, a
/// non-finite or out-of-range coordinate or a non-positive rounded size.
pub fn parse_suggestions(json: &str) -> CraftResult<Vec<SuggestedShape>> {
    let value: Value = serde_json::from_str(json.trim())
        .map_err(|e| CraftError::InvalidSuggestion(format!("not JSON: {e}")))?;
    let Value::Array(items) = value else {
        return Err(CraftError::InvalidSuggestion(
            "expected a JSON array of shapes".into(),
        ));
    };

    let shapes = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let shape: SuggestedShape = serde_json::from_value(item)
                .map_err(|e| CraftError::InvalidSuggestion(format!("item {index}: {e}")))?;
            shape.validate(index)?;
            Ok(shape)
        })
        .collect::<CraftResult<Vec<_>>>()?;

    tracing::debug!(count = shapes.len(), "Parsed suggested layout");
    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_layout() {
        let json = r#"[
            {"type":"rect","x":10.4,"y":20.6,"width":100,"height":50},
            {"type":"circle","x":0,"y":0,"width":41,"height":41},
            {"type":"text","x":5,"y":5,"width":200,"height":12}
        ]"#;
        let shapes = parse_suggestions(json).unwrap();
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].rect(), Rect::new(10, 21, 100, 50));
        assert_eq!(shapes[0].style().corner_radius, 8);
        assert_eq!(shapes[1].style().corner_radius, 21);
        assert_eq!(shapes[2].style().corner_radius, 4);
        assert_eq!(shapes[2].style().animation, Animation::Pulse);
    }

    #[test]
    fn test_to_element_stacks_on_top() {
        let shapes = parse_suggestions(
            r#"[{"type":"circle","x":0,"y":0,"width":30,"height":50},
                {"type":"text","x":1,"y":2,"width":80,"height":10}]"#,
        )
        .unwrap();
        let mut layout = Vec::new();
        for shape in &shapes {
            let element = shape.to_element(&layout);
            layout.push(element);
        }
        assert_eq!(layout[0].z_index, 1);
        assert_eq!(layout[0].corner_radius, 15);
        assert_eq!(layout[1].z_index, 2);
        assert_eq!(layout[1].kind(), ElementKind::TextBar);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_suggestions("[]").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        let err = parse_suggestions(r#"{"type":"rect"}"#).unwrap_err();
        assert!(matches!(err, CraftError::InvalidSuggestion(_)));
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(matches!(
            parse_suggestions("Here is your layout!"),
            Err(CraftError::InvalidSuggestion(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_type_and_missing_fields() {
        let err = parse_suggestions(r#"[{"type":"star","x":0,"y":0,"width":1,"height":1}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("item 0"));
        let err = parse_suggestions(r#"[{"type":"rect","x":0,"y":0,"width":1}]"#).unwrap_err();
        assert!(matches!(err, CraftError::InvalidSuggestion(_)));
    }

    #[test]
    fn test_rejects_degenerate_size() {
        let err = parse_suggestions(r#"[{"type":"rect","x":0,"y":0,"width":0.2,"height":10}]"#)
            .unwrap_err();
        assert!(matches!(err, CraftError::InvalidSuggestion(_)));
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        let err = parse_suggestions(
            r#"[{"type":"rect","x":2147483000,"y":0,"width":2000,"height":10}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CraftError::InvalidSuggestion(_)));
        assert!(parse_suggestions(r#"[{"type":"text","x":0,"y":-1e7,"width":10,"height":10}]"#).is_err());
        assert!(parse_suggestions(r#"[{"type":"rect","x":-1000000,"y":0,"width":10,"height":10}]"#).is_ok());
    }
}
