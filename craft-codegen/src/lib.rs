//! # Skeleton Craft Codegen
//!
//! Turns a skeleton layout into drop-in source for five targets. Generation
//! is a total, deterministic function of the layout, the dialect and the
//! [`GeneratorConfig`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              craft-codegen                  │
//! ├─────────────────────────────────────────────┤
//! │  Blocks (z-ordered)  │  Keyframes (once per │
//! │  - geometry, radius  │  animation in use)   │
//! │  - light/dark colour │                      │
//! ├─────────────────────────────────────────────┤
//! │  html │ react │ vue │ svelte │ angular      │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod angular;
mod block;
mod css;
mod html;
mod react;
mod svelte;
mod vue;

use std::fmt;
use std::str::FromStr;

use craft_core::{Element, Palette, CANVAS_HEIGHT, CANVAS_WIDTH};

/// Returned for dialect names the generator does not know.
pub const UNSUPPORTED: &str = "Unsupported format";

/// Attribute prefix opening every positioned element block in generated
/// markup; the attribute value is the block's stacking index.
pub const BLOCK_MARKER: &str = "data-sk=\"";

/// Output syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Plain HTML with a `<style>` block.
    Html,
    /// React function component.
    React,
    /// Vue single-file component.
    Vue,
    /// Svelte component.
    Svelte,
    /// Angular component as concatenated `.ts`, `.html` and `.css` files.
    Angular,
}

impl Dialect {
    /// Every dialect.
    pub const ALL: [Self; 5] = [
        Self::Html,
        Self::React,
        Self::Vue,
        Self::Svelte,
        Self::Angular,
    ];

    /// Short name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::React => "react",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
            Self::Angular => "angular",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Html => "HTML/CSS",
            Self::React => "React",
            Self::Vue => "Vue",
            Self::Svelte => "Svelte",
            Self::Angular => "Angular",
        }
    }

    /// Conventional file extension for the output.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::React => "jsx",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
            Self::Angular => "ts",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "html/css" | "html-css" | "css" => Ok(Self::Html),
            "react" | "jsx" => Ok(Self::React),
            "vue" => Ok(Self::Vue),
            "svelte" => Ok(Self::Svelte),
            "angular" => Ok(Self::Angular),
            _ => Err(format!("Unknown format: {s}")),
        }
    }
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Light/dark colours for swatches and the container background.
    pub palette: Palette,
    /// Component name for component dialects.
    pub component_name: String,
    /// Container width in pixels.
    pub width: i32,
    /// Container height in pixels.
    pub height: i32,
    /// Utility classes giving component containers their themed background.
    pub container_theme: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            component_name: "SkeletonLoader".to_string(),
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            container_theme: "bg-white dark:bg-slate-800 rounded-lg overflow-hidden".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Set the component name.
    #[must_use]
    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    /// Set the palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Component name reduced to a valid identifier.
    ///
    /// Falls back to `SkeletonLoader` when nothing usable remains.
    #[must_use]
    pub fn component_identifier(&self) -> String {
        let ident: String = self
            .component_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
            "SkeletonLoader".to_string()
        } else {
            ident
        }
    }

    /// Component name in kebab case, e.g. `skeleton-loader`.
    #[must_use]
    pub fn kebab_name(&self) -> String {
        let mut out = String::new();
        for (i, c) in self.component_identifier().chars().enumerate() {
            if c.is_ascii_uppercase() {
                if i > 0 && !out.ends_with('-') {
                    out.push('-');
                }
                out.push(c.to_ascii_lowercase());
            } else if c == '_' {
                if !out.ends_with('-') {
                    out.push('-');
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Classes for a component dialect's root container.
    pub(crate) fn container_classes(&self) -> String {
        block::escape_attr(&format!(
            "relative w-[{}px] h-[{}px] {}",
            self.width, self.height, self.container_theme
        ))
    }
}

/// Generates source code from layouts.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    config: GeneratorConfig,
}

impl CodeGenerator {
    /// Create a new generator with the given configuration.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate source for `elements` in `dialect`.
    #[must_use]
    pub fn generate(&self, dialect: Dialect, elements: &[Element]) -> String {
        let output = match dialect {
            Dialect::Html => html::generate(elements, &self.config),
            Dialect::React => react::generate(elements, &self.config),
            Dialect::Vue => vue::generate(elements, &self.config),
            Dialect::Svelte => svelte::generate(elements, &self.config),
            Dialect::Angular => angular::generate(elements, &self.config),
        };
        tracing::debug!(
            %dialect,
            elements = elements.len(),
            bytes = output.len(),
            "Generated code"
        );
        output
    }

    /// Generate source for a dialect given by name.
    ///
    /// Unknown names yield [`UNSUPPORTED`].
    #[must_use]
    pub fn generate_named(&self, dialect: &str, elements: &[Element]) -> String {
        match dialect.parse::<Dialect>() {
            Ok(dialect) => self.generate(dialect, elements),
            Err(_) => {
                tracing::debug!(dialect, "Unsupported format requested");
                UNSUPPORTED.to_string()
            }
        }
    }
}

/// Generate with the default configuration.
#[must_use]
pub fn generate(dialect: Dialect, elements: &[Element]) -> String {
    CodeGenerator::with_defaults().generate(dialect, elements)
}

/// Generate with the default configuration for a dialect given by name.
#[must_use]
pub fn generate_named(dialect: &str, elements: &[Element]) -> String {
    CodeGenerator::with_defaults().generate_named(dialect, elements)
}
