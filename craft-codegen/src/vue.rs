//! Vue single-file component.

use std::fmt::Write;

use craft_core::Element;

use crate::block::{blocks, indent, used_animations};
use crate::css::animation_css;
use crate::GeneratorConfig;

pub(crate) fn generate(elements: &[Element], config: &GeneratorConfig) -> String {
    let mut out = String::from("<template>\n");
    let _ = writeln!(out, "  <div class=\"{}\">", config.container_classes());
    for block in blocks(elements) {
        out.push_str(&indent(&block.template_markup(&config.palette), 4));
        out.push('\n');
    }
    out.push_str("  </div>\n</template>\n\n");

    let _ = writeln!(
        out,
        "<script>\nexport default {{\n  name: '{}',\n}};\n</script>",
        config.component_identifier()
    );

    let css = animation_css(&used_animations(elements), ".dark");
    if !css.is_empty() {
        let _ = write!(out, "\n<style scoped>\n{css}</style>\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_core::{Animation, ElementKind, Rect, Style};

    #[test]
    fn single_file_component_sections() {
        let el = Element::new(
            ElementKind::Circle,
            Rect::new(5, 5, 40, 40),
            Style::for_kind(ElementKind::Circle).with_animation(Animation::Spin),
        );
        let out = generate(&[el], &GeneratorConfig::default());
        assert!(out.starts_with("<template>\n"));
        assert!(out.contains("name: 'SkeletonLoader',"));
        assert!(out.contains("<style scoped>\n.sk-spin {"));
        assert!(out.contains("border-radius: 50%;"));
        assert!(out.contains("class=\"absolute bg-slate-200 dark:bg-slate-700 sk-spin\""));
    }

    #[test]
    fn no_style_block_without_animation() {
        let el = Element::new(
            ElementKind::Rectangle,
            Rect::new(0, 0, 10, 10),
            Style::for_kind(ElementKind::Rectangle).with_animation(Animation::None),
        );
        let out = generate(&[el], &GeneratorConfig::default());
        assert!(!out.contains("<style"));
        assert!(out.ends_with("</script>\n"));
    }
}
