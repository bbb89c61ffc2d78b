//! React function component.

use std::fmt::Write;

use craft_core::Element;

use crate::block::{blocks, indent, used_animations, Block, BLOCK_ATTR};
use crate::css::animation_css;
use crate::GeneratorConfig;

pub(crate) fn generate(elements: &[Element], config: &GeneratorConfig) -> String {
    let name = config.component_identifier();
    let css = animation_css(&used_animations(elements), ".dark");

    let mut out = String::from("import React from 'react';\n\n");
    if !css.is_empty() {
        let _ = writeln!(out, "const styles = `\n{css}`;\n");
    }
    let _ = writeln!(out, "const {name} = () => (");
    let _ = writeln!(out, "  <div className=\"{}\">", config.container_classes());
    if !css.is_empty() {
        out.push_str("    <style>{styles}</style>\n");
    }
    for block in blocks(elements) {
        out.push_str(&indent(&markup(&block, config), 4));
        out.push('\n');
    }
    out.push_str("  </div>\n);\n\n");
    let _ = writeln!(out, "export default {name};");
    out
}

fn markup(block: &Block<'_>, config: &GeneratorConfig) -> String {
    let e = block.element;
    let mut style = format!(
        "left: '{}px', top: '{}px', width: '{}px', height: '{}px', borderRadius: '{}'",
        e.x, e.y, e.width, e.height, block.radius
    );
    if let Some(delay) = block.own_delay() {
        let _ = write!(style, ", animationDelay: '{delay}'");
    }
    let open = format!(
        "<div {BLOCK_ATTR}=\"{}\" className=\"{}\" style={{{{ {style} }}}}",
        block.index,
        block.utility_classes(&config.palette)
    );
    if !block.has_overlay() {
        return format!("{open} />");
    }
    let overlay = match block.overlay_delay() {
        Some(delay) => format!("<div className=\"sk-wave-overlay\" style={{{{ animationDelay: '{delay}' }}}} />"),
        None => "<div className=\"sk-wave-overlay\" />".to_string(),
    };
    format!("{open}>\n  {overlay}\n</div>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_core::{Animation, ElementKind, Rect, Style};

    #[test]
    fn component_envelope() {
        let config = GeneratorConfig::default().with_component_name("CardSkeleton");
        let out = generate(&[], &config);
        assert!(out.starts_with("import React from 'react';"));
        assert!(out.contains("const CardSkeleton = () => ("));
        assert!(out.ends_with("export default CardSkeleton;\n"));
        assert!(out.contains("w-[600px] h-[400px]"));
        assert!(!out.contains("const styles"));
    }

    #[test]
    fn block_uses_paired_classes_and_style_object() {
        let el = Element::new(
            ElementKind::TextBar,
            Rect::new(12, 34, 120, 16),
            Style::for_kind(ElementKind::TextBar).with_delay("0.1s"),
        );
        let out = generate(&[el], &GeneratorConfig::default());
        assert!(out.contains(
            "className=\"absolute bg-slate-200 dark:bg-slate-700 sk-pulse\" \
             style={{ left: '12px', top: '34px', width: '120px', height: '16px', \
             borderRadius: '8px', animationDelay: '0.1s' }} />"
        ));
        assert!(out.contains("<style>{styles}</style>"));
        assert_eq!(out.matches("@keyframes sk-pulse").count(), 1);
    }

    #[test]
    fn wave_overlay_is_nested() {
        let el = Element::new(
            ElementKind::Rectangle,
            Rect::new(0, 0, 50, 50),
            Style::for_kind(ElementKind::Rectangle).with_animation(Animation::Wave),
        );
        let out = generate(&[el], &GeneratorConfig::default());
        assert!(out.contains("      <div className=\"sk-wave-overlay\" />\n    </div>"));
        assert!(out.contains(".dark .sk-wave-overlay"));
    }
}
