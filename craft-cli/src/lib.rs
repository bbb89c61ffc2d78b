//! # Skeleton Craft CLI
//!
//! Command-line front end for the skeleton editor core and code generator.
//!
//! ## Usage
//!
//! ```bash
//! skeleton-craft generate --preset article-card --format react
//! skeleton-craft generate --input layout.json --format vue --output Loader.vue
//! skeleton-craft validate --input layout.json
//! GEMINI_API_KEY=... skeleton-craft suggest --image screenshot.png --format svelte
//! ```
//!
//! ## Architecture
//!
//! - `cli` - Arguments parsed with clap
//! - `commands` - Subcommand implementations
//! - `presets` - Built-in skeleton, loader and spinner layouts
//! - `suggest` - Image-to-layout inference client behind [`LayoutSuggester`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod presets;
pub mod suggest;

pub use cli::{Cli, Commands, GenerateArgs, SuggestArgs};
pub use presets::{Preset, PresetCategory};
pub use suggest::{GeminiSuggester, ImageFormat, LayoutImage, LayoutSuggester, SuggestError};
