//! Pointer-driven canvas interaction.
//!
//! The controller turns raw pointer and keyboard events into [`Action`]s
//! applied through the [`History`]. Each gesture starts on pointer-down and
//! ends on pointer-up; nothing carries over between gestures.

use crate::action::{Action, reduce};
use crate::editor::{EditorState, Selection};
use crate::element::{ElementId, Geometry};
use crate::history::History;
use crate::input::{Focus, Key, Modifiers, MouseButton, PointerInput};
use crate::selection::{HANDLE_HIT_TOLERANCE, ResizeHandle, hit_test_handles};
use crate::shortcuts::{Command, ShortcutRegistry};
use crate::snap::{AlignmentGuide, compute_alignment_guides};
use kurbo::{Point, Rect, Vec2};

/// Marquee rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub start: Point,
    pub current: Point,
}

impl Marquee {
    /// The normalized rectangle spanned by the two corners.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.current.x),
            self.start.y.min(self.current.y),
            self.start.x.max(self.current.x),
            self.start.y.max(self.current.y),
        )
    }
}

/// An active resize drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDrag {
    pub element_id: ElementId,
    pub handle: ResizeHandle,
    /// Pointer position when the drag started.
    pub start_point: Point,
    /// Element geometry when the drag started.
    pub origin: Geometry,
    recorded: bool,
}

impl ResizeDrag {
    fn new(element_id: ElementId, handle: ResizeHandle, start_point: Point, origin: Geometry) -> Self {
        Self {
            element_id,
            handle,
            start_point,
            origin,
            recorded: false,
        }
    }

    /// Accumulated pointer delta since the drag started.
    pub fn delta(&self, current: Point) -> Vec2 {
        current - self.start_point
    }
}

/// Gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    MarqueeSelecting(Marquee),
    DraggingSelection {
        /// Canvas position the selection has been moved to so far.
        last: Point,
        recorded: bool,
    },
    ResizingElement(ResizeDrag),
}

/// What a pointer-down landed on.
enum Press {
    Handle(ResizeDrag),
    Element(Vec<ElementId>),
    Empty { keep_selection: bool },
}

/// Translates pointer and keyboard input into editor actions.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    /// Top-left of the canvas viewport in screen coordinates.
    viewport_origin: Point,
    guides: Vec<AlignmentGuide>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            state: InteractionState::Idle,
            viewport_origin: Point::ZERO,
            guides: Vec::new(),
        }
    }

    /// Tell the controller where the canvas viewport sits on screen.
    pub fn set_viewport_origin(&mut self, origin: Point) {
        self.viewport_origin = origin;
    }

    pub fn viewport_origin(&self) -> Point {
        self.viewport_origin
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    /// Alignment guides for the current drag (for rendering).
    pub fn guides(&self) -> &[AlignmentGuide] {
        &self.guides
    }

    /// Current marquee rectangle (for rendering).
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.state {
            InteractionState::MarqueeSelecting(marquee) => Some(marquee.to_rect()),
            _ => None,
        }
    }

    /// Convert a screen position to canvas coordinates using the current view.
    pub fn to_canvas(&self, state: &EditorState, screen: Point) -> Point {
        state.view.camera.screen_to_canvas(screen, self.viewport_origin)
    }

    /// Drop the current gesture. Changes already applied stay applied.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.guides.clear();
    }

    /// Start a gesture.
    pub fn pointer_down(&mut self, history: &mut History, input: PointerInput) {
        if input.button != MouseButton::Left {
            return;
        }
        if !self.is_idle() {
            log::debug!("Pointer down during {:?}; starting a new gesture", self.state);
            self.reset();
        }

        let point = self.to_canvas(history.present(), input.position);
        let Some(press) = classify_press(history.present(), point, input.modifiers) else {
            return;
        };

        match press {
            Press::Handle(drag) => {
                log::debug!("Resizing {} from {:?}", drag.element_id, drag.handle);
                self.state = InteractionState::ResizingElement(drag);
            }
            Press::Element(selection) => {
                history.apply(&Action::Select(selection));
                self.state = InteractionState::DraggingSelection {
                    last: point,
                    recorded: false,
                };
            }
            Press::Empty { keep_selection } => {
                if !keep_selection {
                    history.apply(&Action::ClearSelection);
                }
                self.state = InteractionState::MarqueeSelecting(Marquee {
                    start: point,
                    current: point,
                });
            }
        }
    }

    /// Enter a resize directly, for hosts whose handles report which one was pressed.
    ///
    /// Returns false if the element is not on the current page or not interactive.
    pub fn begin_resize(
        &mut self,
        history: &mut History,
        element_id: ElementId,
        handle: ResizeHandle,
        input: PointerInput,
    ) -> bool {
        let point = self.to_canvas(history.present(), input.position);
        let Some(origin) = history
            .present()
            .element(element_id)
            .filter(|e| e.is_interactive())
            .map(|e| e.geometry())
        else {
            return false;
        };

        self.reset();
        if history.present().selection.single() != Some(element_id) {
            history.apply(&Action::Select(vec![element_id]));
        }
        self.state = InteractionState::ResizingElement(ResizeDrag::new(element_id, handle, point, origin));
        true
    }

    /// Continue the current gesture.
    pub fn pointer_move(&mut self, history: &mut History, input: PointerInput) {
        let point = self.to_canvas(history.present(), input.position);

        match &mut self.state {
            InteractionState::Idle => {}
            InteractionState::MarqueeSelecting(marquee) => {
                marquee.current = point;
                let rect = marquee.to_rect();
                let ids = history
                    .present()
                    .current_page()
                    .map(|page| page.elements_within(rect))
                    .unwrap_or_default();
                history.apply(&Action::Select(ids));
            }
            InteractionState::DraggingSelection { last, recorded } => {
                let view = history.present().view;
                let delta = view.grid.snap_delta(point - *last);
                if delta == Vec2::ZERO {
                    return;
                }
                let action = Action::MoveElements {
                    ids: history.present().selection.ids().to_vec(),
                    delta,
                };
                apply_step(history, &action, recorded);
                *last += delta;

                self.guides = if view.snap_to_elements {
                    alignment_guides(history.present())
                } else {
                    Vec::new()
                };
            }
            InteractionState::ResizingElement(drag) => {
                let action = Action::ResizeElement {
                    id: drag.element_id,
                    handle: drag.handle,
                    delta: drag.delta(point),
                    origin: Some(drag.origin),
                };
                apply_step(history, &action, &mut drag.recorded);
            }
        }
    }

    /// Finish the current gesture.
    pub fn pointer_up(&mut self) {
        if !self.is_idle() {
            log::trace!("Gesture finished: {:?}", self.state);
        }
        self.reset();
    }

    /// Handle a key press. Returns true if the key was consumed.
    ///
    /// Keys are ignored while a gesture is active or while focus is in a
    /// text input, so typing never deletes elements.
    pub fn key_down(&mut self, history: &mut History, key: &Key, modifiers: Modifiers, focus: Focus) -> bool {
        if focus == Focus::TextInput || !self.is_idle() {
            return false;
        }
        let Some(command) = ShortcutRegistry::resolve(key, modifiers) else {
            return false;
        };

        let selected = history.present().selection.ids().to_vec();
        match command {
            Command::DeleteSelection => {
                if selected.is_empty() {
                    return false;
                }
                history.apply(&Action::DeleteElements(selected));
            }
            Command::ClearSelection => {
                history.apply(&Action::ClearSelection);
            }
            Command::Undo => {
                history.undo();
            }
            Command::Redo => {
                history.redo();
            }
            Command::Copy => {
                history.apply(&Action::Copy(selected));
            }
            Command::Paste => {
                if history.present().clipboard.is_empty() {
                    return false;
                }
                history.apply(&Action::Paste { at: None });
            }
            Command::SelectAll => {
                history.apply(&Action::SelectAll);
            }
            Command::ToggleGrid => {
                history.apply(&Action::ToggleGrid);
            }
        }
        true
    }

    /// CSS cursor for a hover position.
    pub fn cursor_at(&self, state: &EditorState, screen: Point) -> &'static str {
        match &self.state {
            InteractionState::ResizingElement(drag) => return drag.handle.cursor(),
            InteractionState::DraggingSelection { .. } => return "move",
            InteractionState::MarqueeSelecting(_) => return "crosshair",
            InteractionState::Idle => {}
        }
        let point = self.to_canvas(state, screen);
        if let Some(handle) = single_selected_handle(state, point) {
            return handle.cursor();
        }
        match state.current_page().and_then(|page| page.element_at(point)) {
            Some(_) => "move",
            None => "default",
        }
    }
}

/// Apply the first step of a gesture as a new history entry and fold the
/// rest into it.
/// Apply one gesture step. The gesture's undo entry opens on the first step
/// that changes something; later steps amend it.
fn apply_step(history: &mut History, action: &Action, recorded: &mut bool) {
    if *recorded {
        history.amend(action);
    } else if reduce(history.present(), action) != *history.present() {
        history.apply(action);
        *recorded = true;
    }
}

fn single_selected_handle(state: &EditorState, point: Point) -> Option<ResizeHandle> {
    let element = state
        .selection
        .single()
        .and_then(|id| state.element(id))
        .filter(|e| e.is_interactive())?;
    let tolerance = HANDLE_HIT_TOLERANCE / state.view.camera.scale();
    hit_test_handles(&element.geometry(), point, tolerance)
}

fn classify_press(state: &EditorState, point: Point, modifiers: Modifiers) -> Option<Press> {
    let page = state.current_page()?;

    if let Some(handle) = single_selected_handle(state, point) {
        let id = state.selection.single()?;
        let origin = page.element(id)?.geometry();
        return Some(Press::Handle(ResizeDrag::new(id, handle, point, origin)));
    }

    let extend = modifiers.extends_selection();
    Some(match page.element_at(point) {
        Some(id) => {
            let selection = if extend {
                let mut selection = state.selection.clone();
                selection.toggle(id);
                selection
            } else {
                Selection::from_ids([id])
            };
            Press::Element(selection.ids().to_vec())
        }
        None => Press::Empty {
            keep_selection: extend,
        },
    })
}

/// Guides between the selected elements and every other visible element.
fn alignment_guides(state: &EditorState) -> Vec<AlignmentGuide> {
    let Some(page) = state.current_page() else {
        return Vec::new();
    };
    let (moving, stationary): (Vec<_>, Vec<_>) = page
        .elements
        .iter()
        .filter(|e| e.visible)
        .map(|e| (e.id, e.bounds()))
        .partition(|(id, _)| state.selection.contains(*id));
    compute_alignment_guides(&moving, &stationary, state.view.alignment_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ElementPatch, ElementTemplate};
    use crate::snap::GuideOrientation;

    /// History with snapping off and one element per rect `(x, y, w, h)`.
    fn setup(rects: &[(f64, f64, f64, f64)]) -> (History, Vec<ElementId>) {
        let mut history = History::default();
        history.apply(&Action::ToggleSnapToGrid);
        let page_id = history.present().project.current_page_id.clone();
        let mut ids = Vec::new();
        for &(x, y, w, h) in rects {
            let action = Action::add_element(
                page_id.clone(),
                ElementTemplate::new(ElementKind::Rectangle, Point::new(x, y)).with_size(w, h),
            );
            if let Action::AddElement { id, .. } = &action {
                ids.push(*id);
            }
            history.apply(&action);
        }
        history.apply(&Action::ClearSelection);
        (history, ids)
    }

    fn element_x(history: &History, id: ElementId) -> f64 {
        history.present().element(id).unwrap().x
    }

    #[test]
    fn test_click_selects_and_drag_moves() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(110.0, 110.0));
        assert_eq!(history.present().selection.ids(), &[ids[0]]);
        assert!(matches!(controller.state(), InteractionState::DraggingSelection { .. }));

        controller.pointer_move(&mut history, PointerInput::at(123.0, 115.0));
        controller.pointer_move(&mut history, PointerInput::at(130.0, 120.0));
        controller.pointer_up();

        let el = history.present().element(ids[0]).unwrap();
        assert_eq!((el.x, el.y), (120.0, 110.0));
        assert!(controller.is_idle());
    }

    #[test]
    fn test_drag_is_one_undo_step() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        let depth = history.undo_depth();
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(110.0, 110.0));
        for step in 1..=5 {
            controller.pointer_move(&mut history, PointerInput::at(110.0 + step as f64 * 4.0, 110.0));
        }
        controller.pointer_up();

        assert_eq!(element_x(&history, ids[0]), 120.0);
        assert_eq!(history.undo_depth(), depth + 1);
        history.undo();
        assert_eq!(element_x(&history, ids[0]), 100.0);
    }

    #[test]
    fn test_drag_snaps_delta_to_grid() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        history.apply(&Action::ToggleSnapToGrid);
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(110.0, 110.0));
        controller.pointer_move(&mut history, PointerInput::at(115.0, 110.0));
        assert_eq!(element_x(&history, ids[0]), 100.0);

        controller.pointer_move(&mut history, PointerInput::at(133.0, 110.0));
        assert_eq!(element_x(&history, ids[0]), 120.0);

        // Remainder from the previous move carries over.
        controller.pointer_move(&mut history, PointerInput::at(141.0, 110.0));
        assert_eq!(element_x(&history, ids[0]), 140.0);
    }

    #[test]
    fn test_drag_moves_every_selected_element() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0), (300.0, 100.0, 50.0, 50.0)]);
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(110.0, 110.0));
        controller.pointer_down(
            &mut history,
            PointerInput::at(310.0, 110.0).with_modifiers(Modifiers::SHIFT),
        );
        assert_eq!(history.present().selection.ids(), &[ids[0], ids[1]]);

        controller.pointer_move(&mut history, PointerInput::at(320.0, 110.0));
        controller.pointer_up();
        assert_eq!(element_x(&history, ids[0]), 110.0);
        assert_eq!(element_x(&history, ids[1]), 310.0);
    }

    #[test]
    fn test_modifier_click_toggles_off() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        let mut controller = InteractionController::new();
        history.apply(&Action::Select(vec![ids[0]]));

        controller.pointer_down(
            &mut history,
            PointerInput::at(110.0, 110.0).with_modifiers(Modifiers::CTRL),
        );
        controller.pointer_up();
        assert!(history.present().selection.is_empty());
    }

    #[test]
    fn test_plain_click_replaces_selection() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0), (300.0, 100.0, 50.0, 50.0)]);
        history.apply(&Action::Select(ids.clone()));
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(310.0, 110.0));
        assert_eq!(history.present().selection.ids(), &[ids[1]]);
    }

    #[test]
    fn test_empty_click_clears_and_marquee_selects_contained() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0), (180.0, 100.0, 50.0, 50.0)]);
        history.apply(&Action::Select(vec![ids[1]]));
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(50.0, 50.0));
        assert!(history.present().selection.is_empty());

        controller.pointer_move(&mut history, PointerInput::at(200.0, 200.0));
        assert_eq!(history.present().selection.ids(), &[ids[0]]);
        assert_eq!(controller.marquee_rect(), Some(Rect::new(50.0, 50.0, 200.0, 200.0)));

        controller.pointer_up();
        assert_eq!(controller.marquee_rect(), None);
        assert_eq!(history.present().selection.ids(), &[ids[0]]);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_marquee_with_reversed_corners() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(300.0, 300.0));
        controller.pointer_move(&mut history, PointerInput::at(90.0, 90.0));
        assert_eq!(history.present().selection.ids(), &[ids[0]]);
    }

    #[test]
    fn test_modifier_empty_click_keeps_selection() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        history.apply(&Action::Select(vec![ids[0]]));
        let mut controller = InteractionController::new();

        controller.pointer_down(
            &mut history,
            PointerInput::at(500.0, 500.0).with_modifiers(Modifiers::SHIFT),
        );
        assert_eq!(history.present().selection.ids(), &[ids[0]]);
    }

    #[test]
    fn test_locked_element_is_not_hit() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        history.apply(&Action::UpdateElement {
            id: ids[0],
            patch: ElementPatch::new().locked(true),
        });
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(110.0, 110.0));
        assert!(history.present().selection.is_empty());
        assert!(matches!(controller.state(), InteractionState::MarqueeSelecting(_)));
    }

    #[test]
    fn test_clamped_drag_step_opens_no_undo_entry() {
        let (mut history, ids) = setup(&[(0.0, 0.0, 50.0, 50.0)]);
        let depth = history.undo_depth();
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(10.0, 10.0));
        controller.pointer_move(&mut history, PointerInput::at(0.0, 0.0));
        assert_eq!(history.undo_depth(), depth);

        controller.pointer_move(&mut history, PointerInput::at(30.0, 10.0));
        controller.pointer_up();

        let el = history.present().element(ids[0]).unwrap();
        assert_eq!((el.x, el.y), (30.0, 10.0));
        assert_eq!(history.undo_depth(), depth + 1);

        history.undo();
        assert_eq!(element_x(&history, ids[0]), 0.0);
    }

    #[test]
    fn test_paste_with_empty_clipboard_is_ignored() {
        let (mut history, _) = setup(&[(0.0, 0.0, 50.0, 50.0)]);
        let depth = history.undo_depth();
        let mut controller = InteractionController::new();

        let consumed = controller.key_down(
            &mut history,
            &Key::Character("v".to_string()),
            Modifiers::CTRL,
            Focus::Canvas,
        );
        assert!(!consumed);
        assert_eq!(history.undo_depth(), depth);
    }

    #[test]
    fn test_handle_press_resizes_from_drag_start() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        history.apply(&Action::Select(vec![ids[0]]));
        let depth = history.undo_depth();
        let mut controller = InteractionController::new();

        // Right edge handle sits at (150, 125).
        controller.pointer_down(&mut history, PointerInput::at(151.0, 125.0));
        assert!(matches!(controller.state(), InteractionState::ResizingElement(_)));

        controller.pointer_move(&mut history, PointerInput::at(181.0, 125.0));
        controller.pointer_move(&mut history, PointerInput::at(191.0, 125.0));
        controller.pointer_up();

        let el = history.present().element(ids[0]).unwrap();
        assert_eq!(el.width, 90.0);
        assert_eq!(el.x, 100.0);
        assert_eq!(history.undo_depth(), depth + 1);
    }

    #[test]
    fn test_handles_need_single_selection() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0), (300.0, 100.0, 50.0, 50.0)]);
        history.apply(&Action::Select(ids.clone()));
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(149.0, 125.0));
        assert!(matches!(controller.state(), InteractionState::DraggingSelection { .. }));
    }

    #[test]
    fn test_begin_resize_explicit() {
        let (mut history, ids) = setup(&[(100.0, 0.0, 30.0, 50.0)]);
        let mut controller = InteractionController::new();

        assert!(controller.begin_resize(&mut history, ids[0], ResizeHandle::Left, PointerInput::at(100.0, 25.0)));
        assert_eq!(history.present().selection.ids(), &[ids[0]]);

        controller.pointer_move(&mut history, PointerInput::at(150.0, 25.0));
        let el = history.present().element(ids[0]).unwrap();
        assert_eq!((el.x, el.width), (110.0, 20.0));

        assert!(!controller.begin_resize(
            &mut history,
            uuid::Uuid::new_v4(),
            ResizeHandle::Left,
            PointerInput::at(0.0, 0.0)
        ));
    }

    #[test]
    fn test_pointer_respects_zoom_and_origin() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        history.apply(&Action::SetZoom(200.0));
        let mut controller = InteractionController::new();
        controller.set_viewport_origin(Point::new(40.0, 60.0));

        // Canvas (110, 110) -> screen (40 + 220, 60 + 220).
        controller.pointer_down(&mut history, PointerInput::at(260.0, 280.0));
        assert_eq!(history.present().selection.ids(), &[ids[0]]);

        // 20 screen pixels at 200% is 10 canvas units.
        controller.pointer_move(&mut history, PointerInput::at(280.0, 280.0));
        assert_eq!(element_x(&history, ids[0]), 110.0);
    }

    #[test]
    fn test_guides_during_drag() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0), (300.0, 300.0, 80.0, 80.0)]);
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(110.0, 110.0));
        controller.pointer_move(&mut history, PointerInput::at(308.0, 110.0));
        let vertical: Vec<_> = controller
            .guides()
            .iter()
            .filter(|g| g.orientation == GuideOrientation::Vertical)
            .collect();
        assert_eq!(vertical.len(), 1);
        assert_eq!(vertical[0].target, ids[1]);
        assert!((vertical[0].position - 300.0).abs() < f64::EPSILON);

        controller.pointer_up();
        assert!(controller.guides().is_empty());
    }

    #[test]
    fn test_no_guides_when_disabled() {
        let (mut history, _) = setup(&[(100.0, 100.0, 50.0, 50.0), (300.0, 300.0, 80.0, 80.0)]);
        history.apply(&Action::ToggleSnapToElements);
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(110.0, 110.0));
        controller.pointer_move(&mut history, PointerInput::at(308.0, 110.0));
        assert!(controller.guides().is_empty());
    }

    #[test]
    fn test_delete_key_in_idle() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        history.apply(&Action::Select(vec![ids[0]]));
        let mut controller = InteractionController::new();

        assert!(!controller.key_down(&mut history, &Key::Delete, Modifiers::NONE, Focus::TextInput));
        assert_eq!(history.present().current_page().unwrap().elements.len(), 1);

        assert!(controller.key_down(&mut history, &Key::Backspace, Modifiers::NONE, Focus::Canvas));
        assert!(history.present().current_page().unwrap().elements.is_empty());
        assert!(history.present().selection.is_empty());
    }

    #[test]
    fn test_keys_ignored_mid_gesture() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut history, PointerInput::at(110.0, 110.0));
        assert!(!controller.key_down(&mut history, &Key::Delete, Modifiers::NONE, Focus::Canvas));
        assert!(!controller.key_down(&mut history, &Key::Escape, Modifiers::NONE, Focus::Canvas));
        assert_eq!(history.present().selection.ids(), &[ids[0]]);
    }

    #[test]
    fn test_escape_and_shortcuts() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        history.apply(&Action::Select(vec![ids[0]]));
        let mut controller = InteractionController::new();
        let key = |c: &str| Key::Character(c.to_string());

        assert!(controller.key_down(&mut history, &key("c"), Modifiers::CTRL, Focus::Canvas));
        assert!(controller.key_down(&mut history, &key("v"), Modifiers::CTRL, Focus::Canvas));
        assert_eq!(history.present().current_page().unwrap().elements.len(), 2);

        assert!(controller.key_down(&mut history, &key("z"), Modifiers::CTRL, Focus::Canvas));
        assert_eq!(history.present().current_page().unwrap().elements.len(), 1);

        assert!(controller.key_down(&mut history, &key("y"), Modifiers::CTRL, Focus::Canvas));
        assert_eq!(history.present().current_page().unwrap().elements.len(), 2);

        assert!(controller.key_down(&mut history, &Key::Escape, Modifiers::NONE, Focus::Canvas));
        assert!(history.present().selection.is_empty());

        assert!(controller.key_down(&mut history, &key("g"), Modifiers::CTRL, Focus::Canvas));
        assert!(history.present().view.grid.visible);

        assert!(!controller.key_down(&mut history, &key("q"), Modifiers::NONE, Focus::Canvas));
    }

    #[test]
    fn test_cursor_at() {
        let (mut history, ids) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        let controller = InteractionController::new();
        assert_eq!(controller.cursor_at(history.present(), Point::new(120.0, 120.0)), "move");
        assert_eq!(controller.cursor_at(history.present(), Point::new(500.0, 500.0)), "default");

        history.apply(&Action::Select(vec![ids[0]]));
        assert_eq!(
            controller.cursor_at(history.present(), Point::new(150.0, 150.0)),
            "nwse-resize"
        );
    }

    #[test]
    fn test_right_button_is_ignored() {
        let (mut history, _) = setup(&[(100.0, 100.0, 50.0, 50.0)]);
        let mut controller = InteractionController::new();
        let input = PointerInput {
            button: MouseButton::Right,
            ..PointerInput::at(110.0, 110.0)
        };
        controller.pointer_down(&mut history, input);
        assert!(controller.is_idle());
        assert!(history.present().selection.is_empty());
    }
}
