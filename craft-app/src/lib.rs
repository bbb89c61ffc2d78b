//! # Skeleton Craft WASM Application
//!
//! Browser bindings for the skeleton editor. The page owns rendering and
//! forwards pointer, keyboard and drop events to [`EditorApp`]; after each
//! event it reads back the element list, selection and marquee as JSON.
//!
//! ## Usage
//!
//! Build for WASM:
//! ```bash
//! wasm-pack build --target web craft-app
//! ```
//!
//! Then import in JavaScript:
//! ```javascript
//! import init, { EditorApp } from './pkg/craft_app.js';
//!
//! await init();
//! const app = new EditorApp();
//!
//! canvas.onpointerdown = (e) => {
//!     app.pointerDown(e.offsetX, e.offsetY, e.ctrlKey || e.metaKey, e.shiftKey);
//!     render(JSON.parse(app.elementsJson()));
//! };
//! output.textContent = app.generate('react');
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// wasm-bindgen exports take ownership of JS strings and numbers
#![allow(clippy::needless_pass_by_value)]

use craft_codegen::{CodeGenerator, GeneratorConfig};
use craft_core::{
    Alignment, Arrangement, Distribution, Editor, ElementId, ElementKind, InputEvent,
    KeyModifiers, Palette, Point, PointerTarget,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    tracing::info!("Skeleton Craft WASM initialized");
}

/// Editor session driven by the browser shell.
#[wasm_bindgen]
pub struct EditorApp {
    editor: Editor,
    generator: CodeGenerator,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl EditorApp {
    /// Create an empty editor.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            editor: Editor::new(),
            generator: CodeGenerator::with_defaults(),
        }
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Press at a canvas point; the editor hit-tests it.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32, command: bool, shift: bool) {
        self.editor
            .pointer_down(Point::new(x, y), modifiers(command, shift));
    }

    /// Press on a target the page already hit-tested, given as JSON such as
    /// `{"kind":"handle","target":"top-left"}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target JSON is malformed.
    #[wasm_bindgen(js_name = pointerDownOn)]
    pub fn pointer_down_on(
        &mut self,
        target_json: &str,
        x: f32,
        y: f32,
        command: bool,
        shift: bool,
    ) -> Result<(), String> {
        let target: PointerTarget = serde_json::from_str(target_json)
            .map_err(|e| format!("Invalid pointer target: {e}"))?;
        self.editor
            .pointer_down_on(target, Point::new(x, y), modifiers(command, shift));
        Ok(())
    }

    /// Pointer moved; tracked globally while a gesture is active.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.editor.pointer_move(Point::new(x, y));
    }

    /// Pointer released; always ends the gesture.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.editor.pointer_up(Point::new(x, y));
    }

    /// Key pressed. Returns whether a shortcut was handled so the page can
    /// call `preventDefault`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, command: bool, shift: bool, in_text_input: bool) -> bool {
        self.editor
            .handle_key(key, modifiers(command, shift), in_text_input)
    }

    /// Dispatch a serialized [`InputEvent`].
    ///
    /// # Errors
    ///
    /// Returns an error if the event JSON is malformed.
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, event_json: &str) -> Result<bool, String> {
        let event: InputEvent =
            serde_json::from_str(event_json).map_err(|e| format!("Invalid event: {e}"))?;
        Ok(self.editor.handle_event(&event))
    }

    /// Drop a palette item at a canvas point. Returns the new element's id.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown element kind.
    #[wasm_bindgen(js_name = dropElement)]
    pub fn drop_element(&mut self, kind: &str, x: f32, y: f32) -> Result<String, String> {
        let kind: ElementKind = kind.parse()?;
        Ok(self
            .editor
            .drop_element(kind, Point::new(x, y))
            .to_string())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Select elements by id, given as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the id list is malformed.
    #[wasm_bindgen(js_name = selectElements)]
    pub fn select_elements(&mut self, ids_json: &str, additive: bool) -> Result<(), String> {
        let ids = parse_ids(ids_json)?;
        self.editor.select_elements(&ids, additive);
        Ok(())
    }

    /// Select every element, locked ones included.
    #[wasm_bindgen(js_name = selectAll)]
    pub fn select_all(&mut self) {
        self.editor.select_all();
    }

    /// Clear the selection.
    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.editor.clear_selection();
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Step back one edit.
    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    /// Step forward one edit.
    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// Whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    /// Whether redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Align the selection, e.g. `left` or `center-v`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown alignment.
    pub fn align(&mut self, alignment: &str) -> Result<bool, String> {
        let alignment: Alignment = alignment.parse()?;
        Ok(self.editor.align(alignment))
    }

    /// Distribute the selection `horizontal` or `vertical`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown direction.
    pub fn distribute(&mut self, distribution: &str) -> Result<bool, String> {
        let distribution: Distribution = distribution.parse()?;
        Ok(self.editor.distribute(distribution))
    }

    /// Change the stacking of the single selected element.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown arrangement.
    pub fn arrange(&mut self, arrangement: &str) -> Result<bool, String> {
        let arrangement: Arrangement = arrangement.parse()?;
        Ok(self.editor.arrange(arrangement))
    }

    /// Lock or unlock elements given as a JSON id array.
    ///
    /// # Errors
    ///
    /// Returns an error if the id list is malformed.
    #[wasm_bindgen(js_name = setLocked)]
    pub fn set_locked(&mut self, ids_json: &str, locked: bool) -> Result<bool, String> {
        let ids = parse_ids(ids_json)?;
        Ok(self.editor.set_locked(&ids, locked))
    }

    /// Apply a JSON property patch to the unlocked elements among `ids_json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the id list or patch is malformed.
    #[wasm_bindgen(js_name = updateElements)]
    pub fn update_elements(&mut self, ids_json: &str, patch_json: &str) -> Result<bool, String> {
        let ids = parse_ids(ids_json)?;
        let patch = serde_json::from_str(patch_json).map_err(|e| format!("Invalid patch: {e}"))?;
        Ok(self
            .editor
            .update_elements(&ids, &craft_core::BatchUpdate::Patch(patch)))
    }

    /// Delete the selected elements.
    #[wasm_bindgen(js_name = removeSelected)]
    pub fn remove_selected(&mut self) -> bool {
        self.editor.delete_selected()
    }

    /// Copy the selection to the clipboard.
    pub fn copy(&mut self) {
        self.editor.copy();
    }

    /// Paste the clipboard. Returns the new ids as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn paste(&mut self) -> Result<String, String> {
        let ids = self.editor.paste();
        to_json(&ids)
    }

    /// Duplicate the selection. Returns the new ids as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn duplicate(&mut self) -> Result<String, String> {
        let ids = self.editor.duplicate();
        to_json(&ids)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Elements as JSON, including an in-progress gesture preview.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[wasm_bindgen(js_name = elementsJson)]
    pub fn elements_json(&self) -> Result<String, String> {
        to_json(&self.editor.elements())
    }

    /// Elements from topmost to bottommost, for a layers list.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[wasm_bindgen(js_name = layersJson)]
    pub fn layers_json(&self) -> Result<String, String> {
        to_json(&self.editor.layers())
    }

    /// Selected ids as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[wasm_bindgen(js_name = selectionJson)]
    pub fn selection_json(&self) -> Result<String, String> {
        to_json(self.editor.selection())
    }

    /// The active marquee as JSON, or `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[wasm_bindgen(js_name = marqueeJson)]
    pub fn marquee_json(&self) -> Result<String, String> {
        to_json(&self.editor.marquee())
    }

    /// Number of elements on the canvas.
    #[wasm_bindgen(js_name = elementCount)]
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.editor.elements().len()
    }

    // ------------------------------------------------------------------
    // Persistence and import
    // ------------------------------------------------------------------

    /// Replace the canvas with a saved layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is invalid; the canvas is unchanged.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&mut self, json: &str) -> Result<(), String> {
        self.editor.load_json(json).map_err(|e| e.to_string())
    }

    /// Serialize the canvas as a layout document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[wasm_bindgen(js_name = saveJson)]
    pub fn save_json(&self) -> Result<String, String> {
        self.editor.to_json().map_err(|e| e.to_string())
    }

    /// Append shapes from a layout-inference response. Returns the new ids
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the response is malformed; the canvas is unchanged.
    #[wasm_bindgen(js_name = importSuggestions)]
    pub fn import_suggestions(&mut self, json: &str) -> Result<String, String> {
        let ids = self
            .editor
            .import_suggestions(json)
            .map_err(|e| e.to_string())?;
        to_json(&ids)
    }

    // ------------------------------------------------------------------
    // Code generation
    // ------------------------------------------------------------------

    /// Generate source for the canvas in `format`.
    #[must_use]
    pub fn generate(&self, format: &str) -> String {
        self.generator.generate_named(format, self.editor.elements())
    }

    /// Name used for generated components.
    #[wasm_bindgen(js_name = setComponentName)]
    pub fn set_component_name(&mut self, name: &str) {
        let config = self.generator.config().clone().with_component_name(name);
        self.generator = CodeGenerator::new(config);
    }

    /// Palette as JSON, for rendering swatches in the page.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[wasm_bindgen(js_name = paletteJson)]
    pub fn palette_json(&self) -> Result<String, String> {
        to_json(&self.generator.config().palette)
    }

    /// Replace the palette used for generated code.
    ///
    /// # Errors
    ///
    /// Returns an error if the palette JSON is malformed.
    #[wasm_bindgen(js_name = setPaletteJson)]
    pub fn set_palette_json(&mut self, json: &str) -> Result<(), String> {
        let palette: Palette =
            serde_json::from_str(json).map_err(|e| format!("Invalid palette: {e}"))?;
        let config = GeneratorConfig {
            palette,
            ..self.generator.config().clone()
        };
        self.generator = CodeGenerator::new(config);
        Ok(())
    }
}

fn modifiers(command: bool, shift: bool) -> KeyModifiers {
    KeyModifiers {
        shift,
        ctrl: command,
        ..KeyModifiers::NONE
    }
}

fn parse_ids(json: &str) -> Result<Vec<ElementId>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid id list: {e}"))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(app: &EditorApp) -> Vec<String> {
        let elements: Vec<serde_json::Value> =
            serde_json::from_str(&app.elements_json().unwrap()).unwrap();
        elements
            .iter()
            .map(|e| e["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_drop_select_and_generate() {
        let mut app = EditorApp::new();
        let id = app.drop_element("rect", 300.0, 200.0).unwrap();
        assert_eq!(ids(&app), vec![id.clone()]);

        app.select_elements(&format!("[\"{id}\"]"), false).unwrap();
        assert_eq!(app.selection_json().unwrap(), format!("[\"{id}\"]"));

        let html = app.generate("html");
        assert!(html.contains("left: 250px; top: 175px; width: 100px; height: 50px;"));
        assert_eq!(app.generate("cobol"), craft_codegen::UNSUPPORTED);
    }

    #[test]
    fn test_drag_updates_marquee_and_selection() {
        let mut app = EditorApp::new();
        app.drop_element("circle", 100.0, 100.0).unwrap();
        app.pointer_down(10.0, 10.0, false, false);
        app.pointer_move(200.0, 200.0);
        assert_ne!(app.marquee_json().unwrap(), "null");
        app.pointer_up(200.0, 200.0);
        assert_eq!(app.marquee_json().unwrap(), "null");
        assert_eq!(app.selection_json().unwrap(), format!("[\"{}\"]", ids(&app)[0]));
    }

    #[test]
    fn test_keyboard_undo_redo() {
        let mut app = EditorApp::new();
        app.drop_element("text", 50.0, 50.0).unwrap();
        assert!(app.can_undo());
        assert!(app.key_down("z", true, false, false));
        assert_eq!(app.element_count(), 0);
        assert!(app.can_redo());
        assert!(app.key_down("z", true, true, false));
        assert_eq!(app.element_count(), 1);
    }

    #[test]
    fn test_bad_input_is_reported() {
        let mut app = EditorApp::new();
        assert!(app.drop_element("hexagon", 0.0, 0.0).is_err());
        assert!(app.align("diagonal").is_err());
        assert!(app.select_elements("not json", false).is_err());
        assert!(app.load_json("{\"elements\": 3}").is_err());
        assert!(app.import_suggestions("{}").is_err());
        assert_eq!(app.element_count(), 0);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut app = EditorApp::new();
        app.drop_element("rect", 100.0, 100.0).unwrap();
        app.drop_element("circle", 200.0, 200.0).unwrap();
        let saved = app.save_json().unwrap();

        let mut other = EditorApp::new();
        other.load_json(&saved).unwrap();
        assert_eq!(other.elements_json().unwrap(), app.elements_json().unwrap());
    }

    #[test]
    fn test_import_and_patch() {
        let mut app = EditorApp::new();
        let new_ids = app
            .import_suggestions(r#"[{"type":"rect","x":0,"y":0,"width":40,"height":20}]"#)
            .unwrap();
        assert!(app
            .update_elements(&new_ids, r#"{"animation":"wave"}"#)
            .unwrap());
        assert!(app.generate("react").contains("sk-wave-overlay"));
        assert!(app.set_locked(&new_ids, true).unwrap());
        assert!(!app.update_elements(&new_ids, r#"{"x":99}"#).unwrap());
    }

    #[test]
    fn test_component_name_reaches_output() {
        let mut app = EditorApp::new();
        app.set_component_name("ProfileSkeleton");
        assert!(app.generate("vue").contains("name: 'ProfileSkeleton'"));
    }
}
