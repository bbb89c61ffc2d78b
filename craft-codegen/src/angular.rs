//! Angular standalone component, emitted as three concatenated files.

use std::fmt::Write;

use craft_core::Element;

use crate::block::{blocks, indent, used_animations, Block, BLOCK_ATTR};
use crate::css::animation_css;
use crate::GeneratorConfig;

pub(crate) fn generate(elements: &[Element], config: &GeneratorConfig) -> String {
    let kebab = config.kebab_name();
    let class = format!("{}Component", config.component_identifier());

    let mut out = format!("// {kebab}.component.ts\n");
    out.push_str("import { Component } from '@angular/core';\n");
    out.push_str("import { NgStyle } from '@angular/common';\n\n");
    let _ = writeln!(
        out,
        "@Component({{\n  selector: 'app-{kebab}',\n  standalone: true,\n  imports: [NgStyle],\n  \
         templateUrl: './{kebab}.component.html',\n  styleUrls: ['./{kebab}.component.css'],\n}})\n\
         export class {class} {{}}\n"
    );

    let _ = writeln!(out, "// {kebab}.component.html");
    let _ = writeln!(out, "<div class=\"{}\">", config.container_classes());
    for block in blocks(elements) {
        out.push_str(&indent(&markup(&block, config), 2));
        out.push('\n');
    }
    out.push_str("</div>\n\n");

    let _ = writeln!(out, "// {kebab}.component.css");
    out.push_str(&animation_css(
        &used_animations(elements),
        ":host-context(.dark)",
    ));
    out
}

fn markup(block: &Block<'_>, config: &GeneratorConfig) -> String {
    let e = block.element;
    let mut style = format!(
        "'left.px': {}, 'top.px': {}, 'width.px': {}, 'height.px': {}, 'border-radius': '{}'",
        e.x, e.y, e.width, e.height, block.radius
    );
    if let Some(delay) = block.own_delay() {
        let _ = write!(style, ", 'animation-delay': '{delay}'");
    }
    let open = format!(
        "<div {BLOCK_ATTR}=\"{}\" class=\"{}\" [ngStyle]=\"{{ {style} }}\">",
        block.index,
        block.utility_classes(&config.palette)
    );
    if !block.has_overlay() {
        return format!("{open}</div>");
    }
    let overlay = match block.overlay_delay() {
        Some(delay) => format!(
            "<div class=\"sk-wave-overlay\" [ngStyle]=\"{{ 'animation-delay': '{delay}' }}\"></div>"
        ),
        None => "<div class=\"sk-wave-overlay\"></div>".to_string(),
    };
    format!("{open}\n  {overlay}\n</div>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_core::{Animation, ElementKind, Rect, Style};

    #[test]
    fn three_file_sections() {
        let config = GeneratorConfig::default().with_component_name("ProfileCard");
        let out = generate(&[], &config);
        assert!(out.starts_with("// profile-card.component.ts\n"));
        assert!(out.contains("selector: 'app-profile-card',"));
        assert!(out.contains("export class ProfileCardComponent {}"));
        assert!(out.contains("// profile-card.component.html\n<div class="));
        assert!(out.ends_with("// profile-card.component.css\n"));
    }

    #[test]
    fn ng_style_binding() {
        let el = Element::new(
            ElementKind::Rectangle,
            Rect::new(3, 4, 50, 60),
            Style::for_kind(ElementKind::Rectangle)
                .with_animation(Animation::Bounce)
                .with_delay("0.15s"),
        );
        let out = generate(&[el], &GeneratorConfig::default());
        assert!(out.contains(
            "[ngStyle]=\"{ 'left.px': 3, 'top.px': 4, 'width.px': 50, 'height.px': 60, \
             'border-radius': '8px', 'animation-delay': '0.15s' }\""
        ));
        assert!(out.contains("@keyframes sk-bounce"));
    }
}
