//! Per-element data shared by every dialect.

use std::collections::BTreeSet;

use craft_core::{Animation, Element, ElementKind, Palette, Theme};

/// Attribute marking each positioned element block in the output.
pub(crate) const BLOCK_ATTR: &str = "data-sk";

/// One positioned child of the skeleton container.
pub(crate) struct Block<'a> {
    /// Position in stacking order, starting at 0.
    pub index: usize,
    pub element: &'a Element,
    /// `50%` for circles, `<n>px` otherwise.
    pub radius: String,
    pub delay: Option<String>,
}

impl Block<'_> {
    /// Animation class applied to the block itself.
    pub fn animation_class(&self) -> Option<&'static str> {
        match self.element.animation {
            Animation::None => None,
            Animation::Pulse => Some("sk-pulse"),
            Animation::Wave => Some("sk-wave"),
            Animation::Spin => Some("sk-spin"),
            Animation::Fade => Some("sk-fade"),
            Animation::Bounce => Some("sk-bounce"),
        }
    }

    /// Whether the block carries a sweeping overlay child.
    pub fn has_overlay(&self) -> bool {
        self.element.animation == Animation::Wave
    }

    /// Delay for the block itself; wave blocks delay their overlay instead.
    pub fn own_delay(&self) -> Option<&str> {
        if self.has_overlay() {
            None
        } else {
            self.delay.as_deref()
        }
    }

    /// Delay for the overlay child.
    pub fn overlay_delay(&self) -> Option<&str> {
        if self.has_overlay() {
            self.delay.as_deref()
        } else {
            None
        }
    }

    /// Geometry, radius and delay as CSS declarations.
    pub fn declarations(&self) -> String {
        let e = self.element;
        let mut css = format!(
            "left: {}px; top: {}px; width: {}px; height: {}px; border-radius: {};",
            e.x, e.y, e.width, e.height, self.radius
        );
        if let Some(delay) = self.own_delay() {
            css.push_str(" animation-delay: ");
            css.push_str(delay);
            css.push(';');
        }
        css
    }

    /// Markup for template dialects that take a plain `class` and `style`.
    pub fn template_markup(&self, palette: &Palette) -> String {
        let open = format!(
            "<div {BLOCK_ATTR}=\"{}\" class=\"{}\" style=\"{}\">",
            self.index,
            self.utility_classes(palette),
            self.declarations()
        );
        if !self.has_overlay() {
            return format!("{open}</div>");
        }
        let overlay = match self.overlay_delay() {
            Some(delay) => {
                format!("<div class=\"sk-wave-overlay\" style=\"animation-delay: {delay};\"></div>")
            }
            None => "<div class=\"sk-wave-overlay\"></div>".to_string(),
        };
        format!("{open}\n  {overlay}\n</div>")
    }

    /// Utility classes for component dialects: positioning, paired
    /// light/dark colour and animation.
    pub fn utility_classes(&self, palette: &Palette) -> String {
        let mut classes = format!(
            "absolute {} dark:{}",
            palette.class(self.element.color, Theme::Light),
            palette.class(self.element.color, Theme::Dark)
        );
        if let Some(class) = self.animation_class() {
            classes.push(' ');
            classes.push_str(class);
        }
        escape_attr(&classes)
    }
}

/// Order elements by z-index, keeping list order for ties.
pub(crate) fn blocks(elements: &[Element]) -> Vec<Block<'_>> {
    let mut ordered: Vec<&Element> = elements.iter().collect();
    ordered.sort_by_key(|e| e.z_index);
    ordered
        .into_iter()
        .enumerate()
        .map(|(index, element)| Block {
            index,
            element,
            radius: match element.kind() {
                ElementKind::Circle => "50%".to_string(),
                ElementKind::Rectangle | ElementKind::TextBar => {
                    format!("{}px", element.corner_radius)
                }
            },
            delay: element.animation_delay.as_deref().and_then(sanitize_delay),
        })
        .collect()
}

/// Distinct animations in use, in a fixed order.
pub(crate) fn used_animations(elements: &[Element]) -> BTreeSet<Animation> {
    elements
        .iter()
        .map(|e| e.animation)
        .filter(|a| *a != Animation::None)
        .collect()
}

/// Accept CSS time values such as `0.2s` or `150ms`; drop anything else.
fn sanitize_delay(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let valid = !trimmed.is_empty()
        && trimmed.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '.');
    if valid {
        Some(trimmed.to_string())
    } else {
        tracing::debug!(delay = raw, "Dropped malformed animation delay");
        None
    }
}

/// Escape a value for a double-quoted attribute.
pub(crate) fn escape_attr(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Indent every non-empty line by `spaces`.
pub(crate) fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_core::{Rect, Style};

    #[test]
    fn blocks_follow_z_order() {
        let style = Style::for_kind(ElementKind::Rectangle);
        let top = Element::new(ElementKind::Rectangle, Rect::new(0, 0, 1, 1), style.clone())
            .with_z_index(5);
        let bottom = Element::new(ElementKind::Circle, Rect::new(0, 0, 8, 8), style).with_z_index(1);
        let list = vec![top.clone(), bottom.clone()];
        let blocks = blocks(&list);
        assert_eq!(blocks[0].element.id(), bottom.id());
        assert_eq!(blocks[0].radius, "50%");
        assert_eq!(blocks[1].radius, "8px");
        assert_eq!(blocks[1].index, 1);
    }

    #[test]
    fn declarations_carry_geometry_and_delay() {
        let style = Style::for_kind(ElementKind::Rectangle).with_delay("0.4s");
        let el = Element::new(ElementKind::Rectangle, Rect::new(4, 6, 30, 12), style);
        let list = vec![el];
        let blocks = blocks(&list);
        assert_eq!(
            blocks[0].declarations(),
            "left: 4px; top: 6px; width: 30px; height: 12px; border-radius: 8px; animation-delay: 0.4s;"
        );
    }

    #[test]
    fn delay_sanitizing() {
        assert_eq!(sanitize_delay(" 0.2s "), Some("0.2s".into()));
        assert_eq!(sanitize_delay("150ms"), Some("150ms".into()));
        assert_eq!(sanitize_delay("1s; color: red"), None);
        assert_eq!(sanitize_delay("s"), None);
        assert_eq!(sanitize_delay(""), None);
    }

    #[test]
    fn indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb", 2), "  a\n\n  b");
    }
}
