//! Keyframe and animation class definitions.
//!
//! Each animation in use is emitted once, never per element.

use std::collections::BTreeSet;
use std::fmt::Write;

use craft_core::Animation;

const WAVE_LIGHT: &str = "linear-gradient(90deg, transparent, rgba(255, 255, 255, 0.25), transparent)";
const WAVE_DARK: &str = "linear-gradient(90deg, transparent, rgba(255, 255, 255, 0.1), transparent)";

/// CSS for every animation in `used`, unindented.
///
/// `dark_selector` scopes the dark-theme wave overlay, e.g. `.dark` or
/// `:host-context(.dark)`. Returns an empty string when nothing animates.
pub(crate) fn animation_css(used: &BTreeSet<Animation>, dark_selector: &str) -> String {
    let mut css = String::new();
    for animation in used.iter().filter(|a| **a != Animation::None) {
        if !css.is_empty() {
            css.push('\n');
        }
        match animation {
            Animation::None => {}
            Animation::Pulse => css.push_str(concat!(
                ".sk-pulse {\n",
                "  animation: sk-pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite;\n",
                "}\n",
                "@keyframes sk-pulse {\n",
                "  0%, 100% { opacity: 1; }\n",
                "  50% { opacity: 0.5; }\n",
                "}\n",
            )),
            Animation::Wave => {
                css.push_str(concat!(
                    ".sk-wave {\n",
                    "  overflow: hidden;\n",
                    "}\n",
                    ".sk-wave-overlay {\n",
                    "  position: absolute;\n",
                    "  top: 0;\n",
                    "  left: -150%;\n",
                    "  width: 150%;\n",
                    "  height: 100%;\n",
                ));
                let _ = writeln!(css, "  background: {WAVE_LIGHT};");
                css.push_str("  animation: sk-wave 1.5s linear infinite;\n}\n");
                let _ = writeln!(
                    css,
                    "{dark_selector} .sk-wave-overlay {{\n  background: {WAVE_DARK};\n}}"
                );
                css.push_str(concat!(
                    "@keyframes sk-wave {\n",
                    "  0% { left: -150%; }\n",
                    "  100% { left: 150%; }\n",
                    "}\n",
                ));
            }
            Animation::Spin => css.push_str(concat!(
                ".sk-spin {\n",
                "  animation: sk-spin 1s linear infinite;\n",
                "}\n",
                "@keyframes sk-spin {\n",
                "  from { transform: rotate(0deg); }\n",
                "  to { transform: rotate(360deg); }\n",
                "}\n",
            )),
            Animation::Fade => css.push_str(concat!(
                ".sk-fade {\n",
                "  animation: sk-fade 1.5s ease-in-out infinite;\n",
                "}\n",
                "@keyframes sk-fade {\n",
                "  0%, 100% { opacity: 1; }\n",
                "  50% { opacity: 0.4; }\n",
                "}\n",
            )),
            Animation::Bounce => css.push_str(concat!(
                ".sk-bounce {\n",
                "  animation: sk-bounce 1s ease-in-out infinite;\n",
                "}\n",
                "@keyframes sk-bounce {\n",
                "  0%, 100% { transform: translateY(0); }\n",
                "  50% { transform: translateY(-15%); }\n",
                "}\n",
            )),
        }
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_nothing_animates() {
        assert!(animation_css(&BTreeSet::new(), ".dark").is_empty());
        assert!(animation_css(&BTreeSet::from([Animation::None]), ".dark").is_empty());
    }

    #[test]
    fn each_animation_emitted_once() {
        let used = BTreeSet::from([Animation::Pulse, Animation::Wave, Animation::Bounce]);
        let css = animation_css(&used, ":global(.dark)");
        assert_eq!(css.matches("@keyframes sk-pulse").count(), 1);
        assert_eq!(css.matches("@keyframes sk-wave").count(), 1);
        assert_eq!(css.matches("@keyframes sk-bounce").count(), 1);
        assert!(!css.contains("sk-spin"));
        assert!(css.contains(":global(.dark) .sk-wave-overlay"));
        assert!(css.contains("cubic-bezier(0.4, 0, 0.6, 1)"));
        assert!(css.contains("translateY(-15%)"));
    }
}
