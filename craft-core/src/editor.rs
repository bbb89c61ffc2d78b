//! Canvas interaction engine.
//!
//! [`Editor`] is the single writer of the layout. It turns pointer, keyboard
//! and drop input into edits and commits each finished edit to a
//! [`History`] of whole-layout snapshots.
//!
//! Move and resize gestures render through a preview layout and commit once,
//! on pointer release. Any other operation arriving mid-gesture first
//! finalizes the gesture; nothing ever rolls back.

use tracing::{debug, info, warn};

use crate::arrange::{self, Alignment, Arrangement, Distribution};
use crate::clipboard::{clone_with_offset, Clipboard};
use crate::document::LayoutDocument;
use crate::element::{create_element, BatchUpdate, Element, ElementId, ElementKind, Style};
use crate::error::CraftResult;
use crate::event::{InputEvent, KeyModifiers, PointerTarget, Shortcut};
use crate::geometry::{Handle, Marquee, Point, Rect};
use crate::history::{History, HistoryLimit};
use crate::selection::Selection;
use crate::suggestion::parse_suggestions;

/// The active pointer gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DragMode {
    /// No gesture.
    Idle,
    /// Rubber-band selection.
    Marquee {
        /// Where the pointer went down.
        origin: Point,
        /// Latest pointer position.
        current: Point,
    },
    /// Dragging the selection.
    Move {
        /// Where the pointer went down.
        origin: Point,
        /// Start position of every unlocked selected element.
        starts: Vec<(ElementId, i32, i32)>,
    },
    /// Dragging a resize handle.
    Resize {
        /// Element being resized.
        id: ElementId,
        /// Handle being dragged.
        handle: Handle,
        /// Where the pointer went down.
        origin: Point,
        /// Geometry at gesture start.
        start: Rect,
    },
}

/// Editor state: layout history, selection, clipboard and active gesture.
#[derive(Debug, Clone)]
pub struct Editor {
    history: History<Vec<Element>>,
    selection: Selection,
    clipboard: Clipboard,
    drag: DragMode,
    preview: Option<Vec<Element>>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round(v: f32) -> i32 {
    v.round() as i32
}

impl Editor {
    /// Empty canvas with unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_limit(Vec::new(), HistoryLimit::Unbounded)
    }

    /// Start from an existing layout.
    #[must_use]
    pub fn with_elements(elements: Vec<Element>) -> Self {
        Self::with_history_limit(elements, HistoryLimit::Unbounded)
    }

    /// Start from an existing layout with a history depth limit.
    #[must_use]
    pub fn with_history_limit(elements: Vec<Element>, limit: HistoryLimit) -> Self {
        Self {
            history: History::with_limit(elements, limit),
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            drag: DragMode::Idle,
            preview: None,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Elements as currently displayed, including an in-flight gesture.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        match &self.preview {
            Some(preview) => preview,
            None => self.history.current(),
        }
    }

    /// Elements as last committed to history.
    #[must_use]
    pub fn committed(&self) -> &[Element] {
        self.history.current()
    }

    /// Look up a displayed element.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements().iter().find(|e| e.id() == id)
    }

    /// Elements topmost first, for a layers list.
    #[must_use]
    pub fn layers(&self) -> Vec<&Element> {
        let mut layers: Vec<&Element> = self.elements().iter().rev().collect();
        layers.sort_by_key(|e| std::cmp::Reverse(e.z_index));
        layers
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected elements in list order.
    #[must_use]
    pub fn selected_elements(&self) -> Vec<&Element> {
        self.elements()
            .iter()
            .filter(|e| self.selection.contains(e.id()))
            .collect()
    }

    /// Clipboard contents.
    #[must_use]
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Active gesture.
    #[must_use]
    pub fn drag_mode(&self) -> &DragMode {
        &self.drag
    }

    /// Rubber-band rectangle while a marquee gesture is active.
    #[must_use]
    pub fn marquee(&self) -> Option<Marquee> {
        match self.drag {
            DragMode::Marquee { origin, current } => Some(Marquee::from_points(origin, current)),
            _ => None,
        }
    }

    /// Whether undo would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo would change anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of snapshots in history.
    #[must_use]
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// What a pointer at `point` would grab.
    ///
    /// A handle of the single selected unlocked element wins, then the
    /// topmost element under the point, then the background.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> PointerTarget {
        let handle = self
            .selection
            .single()
            .and_then(|id| self.element(id))
            .filter(|e| !e.locked)
            .and_then(|e| Handle::at(e.rect(), point));
        if let Some(handle) = handle {
            return PointerTarget::Handle(handle);
        }
        self.elements()
            .iter()
            .filter(|e| e.contains_point(point))
            .max_by_key(|e| e.z_index)
            .map_or(PointerTarget::Background, |e| PointerTarget::Element(e.id()))
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Dispatch an input event. Returns whether it was consumed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown {
                point,
                modifiers,
                target,
            } => {
                let target = target.unwrap_or_else(|| self.hit_test(*point));
                self.pointer_down_on(target, *point, *modifiers);
                true
            }
            InputEvent::PointerMove { point } => {
                self.pointer_move(*point);
                true
            }
            InputEvent::PointerUp { point } => {
                self.pointer_up(*point);
                true
            }
            InputEvent::Key {
                key,
                modifiers,
                in_text_input,
            } => self.handle_key(key, *modifiers, *in_text_input),
            InputEvent::Drop { kind, point } => {
                self.drop_element(*kind, *point);
                true
            }
        }
    }

    /// Pointer pressed; the editor hit-tests the point itself.
    pub fn pointer_down(&mut self, point: Point, modifiers: KeyModifiers) {
        let target = self.hit_test(point);
        self.pointer_down_on(target, point, modifiers);
    }

    /// Pointer pressed on a target the shell already resolved.
    pub fn pointer_down_on(&mut self, target: PointerTarget, point: Point, modifiers: KeyModifiers) {
        self.settle();
        match target {
            PointerTarget::Background => {
                self.selection.clear();
                self.drag = DragMode::Marquee {
                    origin: point,
                    current: point,
                };
                debug!(x = point.x, y = point.y, "Marquee started");
            }
            PointerTarget::Element(id) => self.begin_move(id, point, modifiers.is_command()),
            PointerTarget::Handle(handle) => self.begin_resize(handle, point),
        }
    }

    fn begin_move(&mut self, id: ElementId, point: Point, toggle: bool) {
        let Some(target) = self.history.current().iter().find(|e| e.id() == id) else {
            warn!(%id, "Pointer down on unknown element ignored");
            return;
        };
        let target_locked = target.locked;

        if toggle {
            self.selection.toggle([id]);
        } else if !self.selection.contains(id) {
            self.selection.replace([id]);
        }
        if target_locked || !self.selection.contains(id) {
            return;
        }

        let starts: Vec<(ElementId, i32, i32)> = self
            .history
            .current()
            .iter()
            .filter(|e| !e.locked && self.selection.contains(e.id()))
            .map(|e| (e.id(), e.x, e.y))
            .collect();
        debug!(count = starts.len(), "Move started");
        self.drag = DragMode::Move {
            origin: point,
            starts,
        };
    }

    fn begin_resize(&mut self, handle: Handle, point: Point) {
        let Some(id) = self.selection.single() else {
            warn!(?handle, "Resize handle without a single selection ignored");
            return;
        };
        let Some(element) = self.history.current().iter().find(|e| e.id() == id) else {
            warn!(%id, "Resize of unknown element ignored");
            return;
        };
        if element.locked {
            debug!(%id, "Resize of locked element ignored");
            return;
        }
        debug!(%id, ?handle, "Resize started");
        self.drag = DragMode::Resize {
            id,
            handle,
            origin: point,
            start: element.rect(),
        };
    }

    /// Pointer moved. Tracked regardless of where the pointer is.
    #[allow(clippy::cast_precision_loss)]
    pub fn pointer_move(&mut self, point: Point) {
        let next = match &mut self.drag {
            DragMode::Idle => return,
            DragMode::Marquee { current, .. } => {
                *current = point;
                return;
            }
            DragMode::Move { origin, starts } => {
                let dx = point.x - origin.x;
                let dy = point.y - origin.y;
                self.history
                    .current()
                    .iter()
                    .map(|e| match starts.iter().find(|(id, _, _)| *id == e.id()) {
                        Some((_, sx, sy)) => {
                            e.moved_to(round(*sx as f32 + dx), round(*sy as f32 + dy))
                        }
                        None => e.clone(),
                    })
                    .collect()
            }
            DragMode::Resize {
                id,
                handle,
                origin,
                start,
            } => {
                let rect = handle.resize(*start, point.x - origin.x, point.y - origin.y);
                self.history
                    .current()
                    .iter()
                    .map(|e| if e.id() == *id { e.resized(rect) } else { e.clone() })
                    .collect()
            }
        };
        self.preview = Some(next);
    }

    /// Pointer released. Always ends the gesture.
    pub fn pointer_up(&mut self, point: Point) {
        self.pointer_move(point);
        self.settle();
    }

    /// Finalize any in-flight gesture.
    fn settle(&mut self) {
        match std::mem::replace(&mut self.drag, DragMode::Idle) {
            DragMode::Idle => {}
            DragMode::Marquee { origin, current } => {
                self.finish_marquee(Marquee::from_points(origin, current));
            }
            DragMode::Move { .. } => {
                if let Some(next) = self.preview.take() {
                    self.commit(next, "move");
                }
            }
            DragMode::Resize { .. } => {
                if let Some(next) = self.preview.take() {
                    self.commit(next, "resize");
                }
            }
        }
        self.preview = None;
    }

    fn finish_marquee(&mut self, marquee: Marquee) {
        if marquee.is_click() {
            self.selection.clear();
            debug!("Marquee click cleared selection");
            return;
        }
        let hits: Vec<ElementId> = self
            .history
            .current()
            .iter()
            .filter(|e| !e.locked && marquee.intersects(e.rect()))
            .map(Element::id)
            .collect();
        debug!(count = hits.len(), "Marquee selected elements");
        self.selection.replace(hits);
    }

    /// Key pressed. Returns whether it triggered a shortcut.
    ///
    /// Keys typed while focus is in a text input are never shortcuts.
    pub fn handle_key(&mut self, key: &str, modifiers: KeyModifiers, in_text_input: bool) -> bool {
        if in_text_input {
            return false;
        }
        match Shortcut::from_key(key, modifiers) {
            Some(shortcut) => {
                self.apply_shortcut(shortcut);
                true
            }
            None => false,
        }
    }

    /// Run a keyboard command.
    pub fn apply_shortcut(&mut self, shortcut: Shortcut) {
        debug!(?shortcut, "Shortcut");
        match shortcut {
            Shortcut::Copy => self.copy(),
            Shortcut::Paste => {
                self.paste();
            }
            Shortcut::Duplicate => {
                self.duplicate();
            }
            Shortcut::Delete => {
                self.delete_selected();
            }
            Shortcut::SelectAll => self.select_all(),
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Replace the selection, or XOR `ids` into it when `additive`.
    ///
    /// Unknown ids are dropped.
    pub fn select_elements(&mut self, ids: &[ElementId], additive: bool) {
        self.settle();
        let known: Vec<ElementId> = ids
            .iter()
            .copied()
            .filter(|id| self.history.current().iter().any(|e| e.id() == *id))
            .collect();
        if additive {
            self.selection.toggle(known);
        } else {
            self.selection.replace(known);
        }
    }

    /// Select every element, locked ones included.
    pub fn select_all(&mut self) {
        self.settle();
        let all: Vec<ElementId> = self.history.current().iter().map(Element::id).collect();
        self.selection.replace(all);
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.settle();
        self.selection.clear();
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    fn commit(&mut self, next: Vec<Element>, action: &'static str) -> bool {
        let changed = self.history.commit(next);
        if changed {
            info!(action, depth = self.history.depth(), "Committed edit");
        } else {
            debug!(action, "Edit produced no change");
        }
        self.prune_selection();
        changed
    }

    fn edit<F>(&mut self, action: &'static str, f: F) -> bool
    where
        F: FnOnce(&[Element]) -> Vec<Element>,
    {
        self.settle();
        let next = f(self.history.current());
        self.commit(next, action)
    }

    fn prune_selection(&mut self) {
        let current = self.history.current();
        self.selection
            .retain(|id| current.iter().any(|e| e.id() == *id));
    }

    /// Append a new element on top of the stack.
    pub fn add_element(&mut self, kind: ElementKind, rect: Rect, style: Style) -> ElementId {
        self.settle();
        let mut next = self.history.current().clone();
        let element = create_element(&next, kind, rect, style);
        let id = element.id();
        next.push(element);
        self.commit(next, "add");
        id
    }

    /// Drop a new element of `kind` centred on `point` with default size and
    /// style.
    #[allow(clippy::cast_precision_loss)]
    pub fn drop_element(&mut self, kind: ElementKind, point: Point) -> ElementId {
        let (width, height) = kind.default_size();
        let x = round(point.x - width as f32 / 2.0);
        let y = round(point.y - height as f32 / 2.0);
        self.add_element(kind, Rect::new(x, y, width, height), Style::for_kind(kind))
    }

    /// Apply a batch update to the unlocked members of `ids`.
    pub fn update_elements(&mut self, ids: &[ElementId], update: &BatchUpdate<'_>) -> bool {
        self.edit("update", |elements| {
            elements
                .iter()
                .map(|e| {
                    if !e.locked && ids.contains(&e.id()) {
                        update.apply(e)
                    } else {
                        e.clone()
                    }
                })
                .collect()
        })
    }

    /// Lock or unlock elements.
    pub fn set_locked(&mut self, ids: &[ElementId], locked: bool) -> bool {
        self.edit(if locked { "lock" } else { "unlock" }, |elements| {
            elements
                .iter()
                .map(|e| {
                    if ids.contains(&e.id()) {
                        e.clone().with_locked(locked)
                    } else {
                        e.clone()
                    }
                })
                .collect()
        })
    }

    /// Remove elements, locked or not.
    pub fn remove_elements(&mut self, ids: &[ElementId]) -> bool {
        self.edit("remove", |elements| {
            elements
                .iter()
                .filter(|e| !ids.contains(&e.id()))
                .cloned()
                .collect()
        })
    }

    /// Remove the selection and clear it.
    pub fn delete_selected(&mut self) -> bool {
        let targets = self.selection.ids().to_vec();
        if targets.is_empty() {
            return false;
        }
        let changed = self.remove_elements(&targets);
        self.selection.clear();
        changed
    }

    /// Copy the selection to the clipboard.
    pub fn copy(&mut self) {
        self.settle();
        let selected: Vec<&Element> = self
            .history
            .current()
            .iter()
            .filter(|e| self.selection.contains(e.id()))
            .collect();
        self.clipboard.copy(selected);
        debug!(count = self.clipboard.len(), "Copied to clipboard");
    }

    /// Paste clipboard contents offset from their source and select them.
    ///
    /// An empty clipboard is a no-op.
    pub fn paste(&mut self) -> Vec<ElementId> {
        if self.clipboard.is_empty() {
            debug!("Paste with empty clipboard ignored");
            return Vec::new();
        }
        let sources = self.clipboard.items().to_vec();
        self.insert_clones(&sources, "paste")
    }

    /// Clone the selection in place, offset, and select the clones.
    pub fn duplicate(&mut self) -> Vec<ElementId> {
        self.settle();
        let sources: Vec<Element> = self
            .history
            .current()
            .iter()
            .filter(|e| self.selection.contains(e.id()))
            .cloned()
            .collect();
        if sources.is_empty() {
            return Vec::new();
        }
        self.insert_clones(&sources, "duplicate")
    }

    fn insert_clones(&mut self, sources: &[Element], action: &'static str) -> Vec<ElementId> {
        self.settle();
        let mut next = self.history.current().clone();
        let clones = clone_with_offset(sources, &next);
        let ids: Vec<ElementId> = clones.iter().map(Element::id).collect();
        next.extend(clones);
        self.commit(next, action);
        self.selection.replace(ids.iter().copied());
        ids
    }

    /// Align the selection.
    pub fn align(&mut self, alignment: Alignment) -> bool {
        let targets = self.selection.ids().to_vec();
        self.edit("align", |elements| arrange::align(elements, &targets, alignment))
    }

    /// Distribute the selection.
    pub fn distribute(&mut self, distribution: Distribution) -> bool {
        let targets = self.selection.ids().to_vec();
        self.edit("distribute", |elements| {
            arrange::distribute(elements, &targets, distribution)
        })
    }

    /// Change the stacking order of the single selected element.
    pub fn arrange(&mut self, arrangement: Arrangement) -> bool {
        let Some(target) = self.selection.single() else {
            debug!(?arrangement, "Arrange needs exactly one selected element");
            return false;
        };
        self.edit("arrange", |elements| {
            arrange::arrange(elements, target, arrangement)
        })
    }

    /// Step back in history.
    pub fn undo(&mut self) -> bool {
        self.settle();
        let moved = self.history.undo();
        if moved {
            info!(position = self.history.position(), "Undo");
            self.prune_selection();
        }
        moved
    }

    /// Step forward in history.
    pub fn redo(&mut self) -> bool {
        self.settle();
        let moved = self.history.redo();
        if moved {
            info!(position = self.history.position(), "Redo");
            self.prune_selection();
        }
        moved
    }

    /// Replace the layout and discard history, selection and gesture.
    pub fn reset(&mut self, elements: Vec<Element>) {
        info!(count = elements.len(), "Editor reset");
        self.history.reset(elements);
        self.selection.clear();
        self.drag = DragMode::Idle;
        self.preview = None;
    }

    /// Append a suggested layout as one undoable edit and select it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CraftError::InvalidSuggestion`] for a malformed
    /// payload; the canvas is left untouched.
    pub fn import_suggestions(&mut self, json: &str) -> CraftResult<Vec<ElementId>> {
        let shapes = match parse_suggestions(json) {
            Ok(shapes) => shapes,
            Err(e) => {
                warn!(error = %e, "Rejected suggested layout");
                return Err(e);
            }
        };
        self.settle();
        let mut next = self.history.current().clone();
        let mut ids = Vec::with_capacity(shapes.len());
        for shape in &shapes {
            let element = shape.to_element(&next);
            ids.push(element.id());
            next.push(element);
        }
        self.commit(next, "import");
        self.selection.replace(ids.iter().copied());
        Ok(ids)
    }

    /// Replace the layout with a persisted document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or invalid; the editor
    /// is left unchanged.
    pub fn load_json(&mut self, json: &str) -> CraftResult<()> {
        let document = LayoutDocument::from_json(json)?;
        self.reset(document.elements);
        Ok(())
    }

    /// Serialize the committed layout as a document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CraftResult<String> {
        LayoutDocument::new(self.committed().to_vec()).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementPatch;

    fn editor_with(rects: &[(i32, i32, i32, i32)]) -> (Editor, Vec<ElementId>) {
        let mut editor = Editor::new();
        let ids = rects
            .iter()
            .map(|&(x, y, w, h)| {
                editor.add_element(
                    ElementKind::Rectangle,
                    Rect::new(x, y, w, h),
                    Style::for_kind(ElementKind::Rectangle),
                )
            })
            .collect();
        (editor, ids)
    }

    fn drag(editor: &mut Editor, from: (f32, f32), to: (f32, f32)) {
        editor.pointer_down(Point::new(from.0, from.1), KeyModifiers::NONE);
        editor.pointer_move(Point::new(to.0, to.1));
        editor.pointer_up(Point::new(to.0, to.1));
    }

    #[test]
    fn test_drop_centres_element() {
        let mut editor = Editor::new();
        let id = editor.drop_element(ElementKind::Circle, Point::new(100.0, 100.0));
        let el = editor.element(id).unwrap();
        assert_eq!(el.rect(), Rect::new(70, 70, 60, 60));
        assert_eq!(el.corner_radius, 30);
        assert_eq!(el.z_index, 1);
    }

    #[test]
    fn test_click_selects_and_drag_moves_with_one_commit() {
        let (mut editor, ids) = editor_with(&[(0, 0, 50, 50)]);
        let depth = editor.history_depth();
        editor.pointer_down(Point::new(10.0, 10.0), KeyModifiers::NONE);
        assert_eq!(editor.selection().ids(), &[ids[0]]);
        editor.pointer_move(Point::new(20.0, 15.0));
        editor.pointer_move(Point::new(40.4, 30.6));
        assert_eq!(editor.element(ids[0]).unwrap().x, 30);
        assert_eq!(editor.committed()[0].x, 0);
        editor.pointer_up(Point::new(40.4, 30.6));
        assert_eq!(editor.committed()[0].rect(), Rect::new(30, 21, 50, 50));
        assert_eq!(editor.history_depth(), depth + 1);
        assert_eq!(editor.drag_mode(), &DragMode::Idle);
    }

    #[test]
    fn test_move_carries_whole_selection() {
        let (mut editor, ids) = editor_with(&[(0, 0, 20, 20), (100, 100, 20, 20)]);
        editor.select_all();
        drag(&mut editor, (5.0, 5.0), (15.0, 25.0));
        assert_eq!(editor.element(ids[0]).unwrap().rect().x, 10);
        assert_eq!(editor.element(ids[1]).unwrap().rect().y, 120);
    }

    #[test]
    fn test_modifier_click_toggles_membership() {
        let (mut editor, ids) = editor_with(&[(0, 0, 20, 20), (100, 100, 20, 20)]);
        editor.pointer_down(Point::new(5.0, 5.0), KeyModifiers::NONE);
        editor.pointer_up(Point::new(5.0, 5.0));
        editor.pointer_down(Point::new(105.0, 105.0), KeyModifiers::COMMAND);
        editor.pointer_up(Point::new(105.0, 105.0));
        assert_eq!(editor.selection().len(), 2);
        editor.pointer_down(Point::new(5.0, 5.0), KeyModifiers::COMMAND);
        assert_eq!(editor.selection().ids(), &[ids[1]]);
        assert_eq!(editor.drag_mode(), &DragMode::Idle);
    }

    #[test]
    fn test_locked_element_selectable_but_immovable() {
        let (mut editor, ids) = editor_with(&[(0, 0, 50, 50)]);
        editor.set_locked(&ids, true);
        drag(&mut editor, (10.0, 10.0), (60.0, 60.0));
        assert!(editor.selection().contains(ids[0]));
        assert_eq!(editor.element(ids[0]).unwrap().rect(), Rect::new(0, 0, 50, 50));
    }

    #[test]
    fn test_locked_element_has_no_handles() {
        let (mut editor, ids) = editor_with(&[(0, 0, 50, 50)]);
        editor.set_locked(&ids, true);
        editor.select_elements(&ids, false);
        assert_eq!(
            editor.hit_test(Point::new(50.0, 50.0)),
            PointerTarget::Element(ids[0])
        );
        editor.pointer_down_on(
            PointerTarget::Handle(Handle::BottomRight),
            Point::new(50.0, 50.0),
            KeyModifiers::NONE,
        );
        assert_eq!(editor.drag_mode(), &DragMode::Idle);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let (editor, ids) = editor_with(&[(0, 0, 50, 50), (25, 25, 50, 50)]);
        assert_eq!(
            editor.hit_test(Point::new(30.0, 30.0)),
            PointerTarget::Element(ids[1])
        );
        assert_eq!(editor.hit_test(Point::new(300.0, 300.0)), PointerTarget::Background);
    }

    #[test]
    fn test_marquee_selects_unlocked_intersections() {
        let (mut editor, ids) = editor_with(&[(10, 10, 20, 20), (60, 60, 20, 20), (200, 200, 20, 20)]);
        editor.set_locked(&[ids[1]], true);
        drag(&mut editor, (0.0, 0.0), (100.0, 100.0));
        assert_eq!(editor.selection().ids(), &[ids[0]]);
        assert!(editor.marquee().is_none());
    }

    #[test]
    fn test_background_click_clears_selection() {
        let (mut editor, _) = editor_with(&[(10, 10, 20, 20)]);
        editor.select_all();
        drag(&mut editor, (300.0, 300.0), (302.0, 301.0));
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_marquee_visible_while_dragging() {
        let mut editor = Editor::new();
        editor.pointer_down(Point::new(50.0, 50.0), KeyModifiers::NONE);
        editor.pointer_move(Point::new(10.0, 80.0));
        let m = editor.marquee().unwrap();
        assert!((m.x1 - 10.0).abs() < f32::EPSILON);
        assert!((m.y2 - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_resize_circle_keeps_radius_round() {
        let mut editor = Editor::new();
        let id = editor.add_element(
            ElementKind::Circle,
            Rect::new(0, 0, 60, 60),
            Style::for_kind(ElementKind::Circle),
        );
        editor.select_elements(&[id], false);
        editor.pointer_down(Point::new(60.0, 30.0), KeyModifiers::NONE);
        assert!(matches!(editor.drag_mode(), DragMode::Resize { handle: Handle::Right, .. }));
        editor.pointer_up(Point::new(81.0, 30.0));
        let el = editor.element(id).unwrap();
        assert_eq!(el.width, 81);
        assert_eq!(el.corner_radius, 41);
    }

    #[test]
    fn test_key_mid_gesture_commits_first() {
        let (mut editor, ids) = editor_with(&[(0, 0, 50, 50)]);
        editor.pointer_down(Point::new(10.0, 10.0), KeyModifiers::NONE);
        editor.pointer_move(Point::new(30.0, 10.0));
        editor.handle_key("d", KeyModifiers::COMMAND, false);
        assert_eq!(editor.element(ids[0]).unwrap().x, 20);
        assert_eq!(editor.elements().len(), 2);
        assert_eq!(editor.drag_mode(), &DragMode::Idle);
    }

    #[test]
    fn test_shortcuts_ignored_in_text_input() {
        let (mut editor, _) = editor_with(&[(0, 0, 50, 50)]);
        editor.select_all();
        assert!(!editor.handle_key("Backspace", KeyModifiers::NONE, true));
        assert_eq!(editor.elements().len(), 1);
        assert!(editor.handle_key("Backspace", KeyModifiers::NONE, false));
        assert!(editor.elements().is_empty());
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_copy_paste_offsets_and_selects() {
        let (mut editor, ids) = editor_with(&[(10, 10, 20, 20)]);
        editor.select_all();
        editor.copy();
        let pasted = editor.paste();
        assert_eq!(pasted.len(), 1);
        assert_ne!(pasted[0], ids[0]);
        let clone = editor.element(pasted[0]).unwrap();
        assert_eq!((clone.x, clone.y, clone.z_index), (30, 30, 2));
        assert_eq!(editor.selection().ids(), pasted.as_slice());
        let again = editor.paste();
        assert_eq!(editor.element(again[0]).unwrap().z_index, 3);
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let (mut editor, _) = editor_with(&[(10, 10, 20, 20)]);
        let depth = editor.history_depth();
        assert!(editor.paste().is_empty());
        assert_eq!(editor.history_depth(), depth);
    }

    #[test]
    fn test_undo_prunes_selection() {
        let mut editor = Editor::new();
        let id = editor.drop_element(ElementKind::TextBar, Point::new(100.0, 100.0));
        editor.select_elements(&[id], false);
        assert!(editor.undo());
        assert!(editor.selection().is_empty());
        assert!(editor.redo());
        assert!(editor.element(id).is_some());
    }

    #[test]
    fn test_update_skips_locked() {
        let (mut editor, ids) = editor_with(&[(0, 0, 20, 20), (50, 0, 20, 20)]);
        editor.set_locked(&[ids[1]], true);
        let patch = ElementPatch {
            width: Some(99),
            ..ElementPatch::default()
        };
        editor.update_elements(&ids, &BatchUpdate::Patch(patch));
        assert_eq!(editor.element(ids[0]).unwrap().width, 99);
        assert_eq!(editor.element(ids[1]).unwrap().width, 20);

        let shift = |e: &Element| ElementPatch::position(e.x + 5, e.y);
        editor.update_elements(&ids, &BatchUpdate::Transform(&shift));
        assert_eq!(editor.element(ids[0]).unwrap().x, 5);
        assert_eq!(editor.element(ids[1]).unwrap().x, 50);
    }

    #[test]
    fn test_layers_topmost_first() {
        let (mut editor, ids) = editor_with(&[(0, 0, 5, 5), (0, 0, 5, 5), (0, 0, 5, 5)]);
        editor.select_elements(&[ids[0]], false);
        editor.arrange(Arrangement::Front);
        let order: Vec<ElementId> = editor.layers().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![ids[0], ids[2], ids[1]]);
    }

    #[test]
    fn test_import_suggestions_appends_one_entry() {
        let (mut editor, _) = editor_with(&[(0, 0, 5, 5)]);
        let depth = editor.history_depth();
        let ids = editor
            .import_suggestions(
                r#"[{"type":"circle","x":10,"y":10,"width":41,"height":30},
                    {"type":"text","x":60,"y":10,"width":120,"height":12}]"#,
            )
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(editor.history_depth(), depth + 1);
        assert_eq!(editor.element(ids[0]).unwrap().corner_radius, 21);
        assert_eq!(editor.element(ids[1]).unwrap().z_index, 3);
        assert_eq!(editor.selection().ids(), ids.as_slice());
    }

    #[test]
    fn test_bad_suggestions_leave_canvas_untouched() {
        let (mut editor, _) = editor_with(&[(0, 0, 5, 5)]);
        let before = editor.committed().to_vec();
        assert!(editor.import_suggestions(r#"{"oops":true}"#).is_err());
        assert_eq!(editor.committed(), before.as_slice());
    }

    #[test]
    fn test_load_and_save_roundtrip() {
        let (editor, _) = editor_with(&[(0, 0, 5, 5), (10, 10, 30, 30)]);
        let json = editor.to_json().unwrap();
        let mut other = Editor::new();
        other.load_json(&json).unwrap();
        assert_eq!(other.committed(), editor.committed());
        assert!(!other.can_undo());
        assert!(other.load_json("[{\"broken\":1}]").is_err());
        assert_eq!(other.committed(), editor.committed());
    }
}
