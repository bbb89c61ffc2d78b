//! Plain HTML with a `<style>` block.
//!
//! Colours are per-element custom properties (`--sk-color-N`) whose values
//! switch with `prefers-color-scheme` or an explicit `.dark`/`.light`
//! ancestor, so the markup needs no utility classes.

use std::fmt::Write;

use craft_core::{Element, Theme};

use crate::block::{blocks, escape_attr, indent, used_animations, Block, BLOCK_ATTR};
use crate::css::animation_css;
use crate::GeneratorConfig;

pub(crate) fn generate(elements: &[Element], config: &GeneratorConfig) -> String {
    let blocks = blocks(elements);
    let mut out = String::from("<div class=\"skeleton-container\">\n");
    for block in &blocks {
        out.push_str(&indent(&markup(block), 2));
        out.push('\n');
    }
    out.push_str("</div>\n\n<style>\n");
    out.push_str(&container_css(&blocks, config));
    let animations = animation_css(&used_animations(elements), ".dark");
    if !animations.is_empty() {
        out.push_str(&animations);
    }
    out.push_str("</style>\n");
    out
}

fn markup(block: &Block<'_>) -> String {
    let e = block.element;
    let mut style = format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
         background-color: var(--sk-color-{}); border-radius: {};",
        e.x, e.y, e.width, e.height, block.index, block.radius
    );
    if let Some(delay) = block.own_delay() {
        let _ = write!(style, " animation-delay: {delay};");
    }
    let class = block
        .animation_class()
        .map(|c| format!(" class=\"{c}\""))
        .unwrap_or_default();
    let open = format!(
        "<div {BLOCK_ATTR}=\"{}\"{class} style=\"{}\">",
        block.index,
        escape_attr(&style)
    );
    if !block.has_overlay() {
        return format!("{open}</div>");
    }
    let overlay_style = block
        .overlay_delay()
        .map(|d| format!(" style=\"animation-delay: {};\"", escape_attr(d)))
        .unwrap_or_default();
    format!("{open}\n  <div class=\"sk-wave-overlay\"{overlay_style}></div>\n</div>")
}

/// Custom property declarations for one theme.
fn color_vars(blocks: &[Block<'_>], config: &GeneratorConfig, theme: Theme) -> String {
    let background = match theme {
        Theme::Light => &config.palette.light_background,
        Theme::Dark => &config.palette.dark_background,
    };
    let mut vars = format!("background-color: {background};\n");
    for block in blocks {
        let _ = writeln!(
            vars,
            "--sk-color-{}: {};",
            block.index,
            config.palette.hex(block.element.color, theme)
        );
    }
    vars
}

fn container_css(blocks: &[Block<'_>], config: &GeneratorConfig) -> String {
    let light = color_vars(blocks, config, Theme::Light);
    let dark = color_vars(blocks, config, Theme::Dark);
    let mut css = String::new();
    let _ = writeln!(
        css,
        ".skeleton-container {{\n  position: relative;\n  width: {}px;\n  height: {}px;\n  \
         border-radius: 8px;\n  overflow: hidden;\n{}}}",
        config.width,
        config.height,
        indent(&light, 2) + "\n"
    );
    let _ = writeln!(
        css,
        "@media (prefers-color-scheme: dark) {{\n  .skeleton-container {{\n{}\n  }}\n}}",
        indent(&dark, 4)
    );
    let _ = writeln!(css, ".dark .skeleton-container {{\n{}\n}}", indent(&dark, 2));
    let _ = writeln!(css, ".light .skeleton-container {{\n{}\n}}", indent(&light, 2));
    css
}
