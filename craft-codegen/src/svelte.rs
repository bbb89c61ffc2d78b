//! Svelte component.

use std::fmt::Write;

use craft_core::Element;

use crate::block::{blocks, indent, used_animations};
use crate::css::animation_css;
use crate::GeneratorConfig;

pub(crate) fn generate(elements: &[Element], config: &GeneratorConfig) -> String {
    let mut out = format!("<!-- {}.svelte -->\n", config.component_identifier());
    let _ = writeln!(out, "<div class=\"{}\">", config.container_classes());
    for block in blocks(elements) {
        out.push_str(&indent(&block.template_markup(&config.palette), 2));
        out.push('\n');
    }
    out.push_str("</div>\n");

    // Svelte scopes component styles, so the theme class lives outside.
    let css = animation_css(&used_animations(elements), ":global(.dark)");
    if !css.is_empty() {
        let _ = write!(out, "\n<style>\n{css}</style>\n");
    }
    out
}
