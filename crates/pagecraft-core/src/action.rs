//! Editor actions and the reducer that applies them.
//!
//! Every change to an [`EditorState`] is expressed as an [`Action`] and
//! applied by [`reduce`], a total function: stale ids and unknown pages
//! turn the action into a no-op instead of an error.

use crate::editor::{EditorState, Selection};
use crate::element::{ElementId, ElementPatch, ElementTemplate, Geometry};
use crate::page::FramePatch;
use crate::selection::{ResizeHandle, resize_geometry};
use kurbo::{Point, Vec2};
use uuid::Uuid;

/// Where pasted elements land when no position is given.
pub const DEFAULT_PASTE_POSITION: Point = Point::new(50.0, 50.0);

/// Offset between consecutive pasted elements.
pub const PASTE_CASCADE_OFFSET: f64 = 20.0;

/// A change to the editor state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Place a new element on a page. Use [`Action::add_element`] to get a fresh id.
    AddElement {
        page_id: String,
        id: ElementId,
        template: ElementTemplate,
    },
    /// Shallow-merge a patch into an element on the current page.
    UpdateElement { id: ElementId, patch: ElementPatch },
    DeleteElements(Vec<ElementId>),
    /// Translate elements, clamped to the frame's top-left quadrant.
    MoveElements { ids: Vec<ElementId>, delta: Vec2 },
    /// Resize through a handle. With `origin` set, the delta is applied to
    /// that geometry (the drag-start geometry) instead of the current one.
    ResizeElement {
        id: ElementId,
        handle: ResizeHandle,
        delta: Vec2,
        origin: Option<Geometry>,
    },
    UpdateFrame(FramePatch),
    /// Give `ids` consecutive z-indexes starting at `z_index`.
    Reorder { ids: Vec<ElementId>, z_index: i64 },
    BringToFront(ElementId),
    SendToBack(ElementId),
    /// Copy elements of the current page to the clipboard.
    Copy(Vec<ElementId>),
    /// Paste the clipboard at `at` (or [`DEFAULT_PASTE_POSITION`]).
    Paste { at: Option<Point> },
    Select(Vec<ElementId>),
    SelectAll,
    ClearSelection,
    /// Switch the current page.
    SelectPage(String),
    /// Set the zoom in percent.
    SetZoom(f64),
    SetPan(Vec2),
    ToggleGrid,
    SetGridSize(f64),
    ToggleSnapToGrid,
    ToggleSnapToElements,
}

impl Action {
    /// An `AddElement` action carrying a freshly generated id.
    pub fn add_element(page_id: impl Into<String>, template: ElementTemplate) -> Self {
        Action::AddElement {
            page_id: page_id.into(),
            id: Uuid::new_v4(),
            template,
        }
    }

    /// Whether applying this action records an undo snapshot.
    ///
    /// Content changes are undoable; selection, clipboard and view changes are not.
    pub fn is_undoable(&self) -> bool {
        match self {
            Action::AddElement { .. }
            | Action::UpdateElement { .. }
            | Action::DeleteElements(_)
            | Action::MoveElements { .. }
            | Action::ResizeElement { .. }
            | Action::UpdateFrame(_)
            | Action::Reorder { .. }
            | Action::BringToFront(_)
            | Action::SendToBack(_)
            | Action::Paste { .. } => true,
            Action::Copy(_)
            | Action::Select(_)
            | Action::SelectAll
            | Action::ClearSelection
            | Action::SelectPage(_)
            | Action::SetZoom(_)
            | Action::SetPan(_)
            | Action::ToggleGrid
            | Action::SetGridSize(_)
            | Action::ToggleSnapToGrid
            | Action::ToggleSnapToElements => false,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddElement { .. } => "add_element",
            Action::UpdateElement { .. } => "update_element",
            Action::DeleteElements(_) => "delete_elements",
            Action::MoveElements { .. } => "move_elements",
            Action::ResizeElement { .. } => "resize_element",
            Action::UpdateFrame(_) => "update_frame",
            Action::Reorder { .. } => "reorder",
            Action::BringToFront(_) => "bring_to_front",
            Action::SendToBack(_) => "send_to_back",
            Action::Copy(_) => "copy",
            Action::Paste { .. } => "paste",
            Action::Select(_) => "select",
            Action::SelectAll => "select_all",
            Action::ClearSelection => "clear_selection",
            Action::SelectPage(_) => "select_page",
            Action::SetZoom(_) => "set_zoom",
            Action::SetPan(_) => "set_pan",
            Action::ToggleGrid => "toggle_grid",
            Action::SetGridSize(_) => "set_grid_size",
            Action::ToggleSnapToGrid => "toggle_snap_to_grid",
            Action::ToggleSnapToElements => "toggle_snap_to_elements",
        }
    }
}

/// Apply `action` to `state`, returning the next state. `state` is left untouched.
pub fn reduce(state: &EditorState, action: &Action) -> EditorState {
    let mut next = state.clone();
    apply(&mut next, action);
    next
}

fn apply(state: &mut EditorState, action: &Action) {
    match action {
        Action::AddElement {
            page_id,
            id,
            template,
        } => add_element(state, page_id, *id, template),
        Action::UpdateElement { id, patch } => {
            match state.project.current_page_mut().and_then(|p| p.element_mut(*id)) {
                Some(element) => element.apply_patch(patch),
                None => log::debug!("Ignoring update for unknown element {}", id),
            }
        }
        Action::DeleteElements(ids) => {
            if let Some(page) = state.project.current_page_mut() {
                page.elements.retain(|e| !ids.contains(&e.id));
            }
            state.selection.retain(|id| !ids.contains(id));
        }
        Action::MoveElements { ids, delta } => {
            let Some(page) = state.project.current_page_mut() else {
                return;
            };
            for element in page.elements.iter_mut() {
                if ids.contains(&element.id) && !element.locked {
                    element.x = (element.x + delta.x).max(0.0);
                    element.y = (element.y + delta.y).max(0.0);
                }
            }
        }
        Action::ResizeElement {
            id,
            handle,
            delta,
            origin,
        } => {
            match state.project.current_page_mut().and_then(|p| p.element_mut(*id)) {
                Some(element) if !element.locked => {
                    let start = origin.unwrap_or_else(|| element.geometry());
                    element.set_geometry(resize_geometry(start, *handle, *delta));
                }
                Some(_) => log::debug!("Ignoring resize of locked element {}", id),
                None => log::debug!("Ignoring resize of unknown element {}", id),
            }
        }
        Action::UpdateFrame(patch) => {
            if let Some(page) = state.project.current_page_mut() {
                page.frame.apply_patch(patch);
            }
        }
        Action::Reorder { ids, z_index } => {
            let Some(page) = state.project.current_page_mut() else {
                return;
            };
            for (offset, id) in ids.iter().enumerate() {
                if let Some(element) = page.element_mut(*id) {
                    element.z_index = z_index + offset as i64;
                }
            }
        }
        Action::BringToFront(id) => {
            let Some(page) = state.project.current_page_mut() else {
                return;
            };
            let top = page
                .elements
                .iter()
                .filter(|e| e.id != *id)
                .map(|e| e.z_index)
                .max();
            if let Some(element) = page.element_mut(*id) {
                if let Some(top) = top.filter(|&top| top >= element.z_index) {
                    element.z_index = top + 1;
                }
            }
        }
        Action::SendToBack(id) => {
            let Some(page) = state.project.current_page_mut() else {
                return;
            };
            let bottom = page
                .elements
                .iter()
                .filter(|e| e.id != *id)
                .map(|e| e.z_index)
                .min();
            if let Some(element) = page.element_mut(*id) {
                if let Some(bottom) = bottom.filter(|&bottom| bottom <= element.z_index) {
                    element.z_index = bottom - 1;
                }
            }
        }
        Action::Copy(ids) => {
            if let Some(page) = state.project.current_page() {
                let copied: Vec<_> = page
                    .elements
                    .iter()
                    .filter(|e| ids.contains(&e.id))
                    .cloned()
                    .collect();
                if !copied.is_empty() {
                    state.clipboard = copied;
                }
            }
        }
        Action::Paste { at } => paste(state, at.unwrap_or(DEFAULT_PASTE_POSITION)),
        Action::Select(ids) => {
            let page = state.project.current_page();
            state.selection = Selection::from_ids(
                ids.iter()
                    .copied()
                    .filter(|&id| page.is_some_and(|p| p.contains(id))),
            );
        }
        Action::SelectAll => {
            state.selection = Selection::from_ids(
                state
                    .project
                    .current_page()
                    .into_iter()
                    .flat_map(|p| p.elements.iter())
                    .filter(|e| e.is_interactive())
                    .map(|e| e.id),
            );
        }
        Action::ClearSelection => state.selection.clear(),
        Action::SelectPage(page_id) => {
            if state.project.page(page_id).is_some() {
                state.project.current_page_id = page_id.clone();
                state.selection.clear();
            } else {
                log::debug!("Ignoring switch to unknown page {}", page_id);
            }
        }
        Action::SetZoom(zoom) => state.view.camera.set_zoom(*zoom),
        Action::SetPan(pan) => state.view.camera.pan = *pan,
        Action::ToggleGrid => state.view.grid.visible = !state.view.grid.visible,
        Action::SetGridSize(size) => {
            if size.is_finite() && *size > 0.0 {
                state.view.grid.size = *size;
            }
        }
        Action::ToggleSnapToGrid => state.view.grid.snap = !state.view.grid.snap,
        Action::ToggleSnapToElements => state.view.snap_to_elements = !state.view.snap_to_elements,
    }
}

fn add_element(state: &mut EditorState, page_id: &str, id: ElementId, template: &ElementTemplate) {
    let is_current = state.project.current_page().is_some_and(|p| p.id == page_id);
    let Some(page) = state.project.page_mut(page_id) else {
        log::debug!("Ignoring add to unknown page {}", page_id);
        return;
    };
    if page.contains(id) {
        log::debug!("Ignoring add of duplicate element {}", id);
        return;
    }
    let z_index = page.max_z_index() + 1;
    page.elements.push(template.clone().into_element(id, z_index));
    if is_current {
        state.selection = Selection::from_ids([id]);
    }
}

fn paste(state: &mut EditorState, at: Point) {
    if state.clipboard.is_empty() {
        return;
    }
    let Some(page) = state.project.current_page_mut() else {
        return;
    };
    let base_z = page.max_z_index();
    let mut pasted = Vec::with_capacity(state.clipboard.len());
    for (index, original) in state.clipboard.iter().enumerate() {
        let offset = PASTE_CASCADE_OFFSET * index as f64;
        let mut element = original.clone();
        element.id = Uuid::new_v4();
        element.parent_id = None;
        element.z_index = base_z + index as i64 + 1;
        element.set_geometry(Geometry {
            x: at.x + offset,
            y: at.y + offset,
            ..original.geometry()
        });
        pasted.push(element.id);
        page.elements.push(element);
    }
    state.selection = Selection::from_ids(pasted);
}
