//! # Skeleton Craft Core
//!
//! Editing core for skeleton-loader layouts: the element model, undo
//! history and the pointer-driven interaction engine. Compiles to WASM so the
//! browser shell and native tools share one implementation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               craft-core                    │
//! ├─────────────────────────────────────────────┤
//! │  Element Model    │  Interaction Engine     │
//! │  - Kinds/styles   │  - Marquee/move/resize  │
//! │  - Factory        │  - Shortcuts, drop      │
//! │  - Palette        │  - Clipboard            │
//! ├─────────────────────────────────────────────┤
//! │  History Store    │  Arrangement Engine     │
//! │  - Snapshots      │  - Align/distribute     │
//! │  - Undo/redo      │  - Z-order              │
//! ├─────────────────────────────────────────────┤
//! │  Layout documents │  Suggested layouts      │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod arrange;
pub mod clipboard;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod history;
pub mod palette;
pub mod selection;
pub mod suggestion;

pub use arrange::{Alignment, Arrangement, Distribution};
pub use clipboard::{Clipboard, PASTE_OFFSET};
pub use document::{LayoutDocument, LAYOUT_VERSION};
pub use editor::{DragMode, Editor};
pub use element::{
    create_element, Animation, BatchUpdate, Element, ElementId, ElementKind, ElementPatch, Style,
    MAX_Z_INDEX,
};
pub use error::{CraftError, CraftResult};
pub use event::{InputEvent, KeyModifiers, PointerTarget, Shortcut};
pub use geometry::{
    Handle, Marquee, Point, Rect, CANVAS_HEIGHT, CANVAS_WIDTH, MAX_COORDINATE, MIN_ELEMENT_SIZE,
};
pub use history::{History, HistoryLimit};
pub use palette::{Palette, Swatch, SwatchColors, Theme};
pub use selection::Selection;
pub use suggestion::{parse_suggestions, SuggestedShape};

/// Craft core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
