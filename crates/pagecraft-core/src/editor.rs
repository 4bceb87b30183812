//! Editor state: the project being edited plus selection, clipboard and view.

use crate::action::{Action, reduce};
use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::element::{Element, ElementId, ElementTemplate};
use crate::page::{Frame, Page, Project};
use crate::snap::GridSettings;

/// Ordered set of selected element ids.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection, dropping duplicates while keeping first-seen order.
    pub fn from_ids(ids: impl IntoIterator<Item = ElementId>) -> Self {
        let mut selection = Self::new();
        for id in ids {
            selection.insert(id);
        }
        selection
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn insert(&mut self, id: ElementId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    /// Add the id if absent, remove it otherwise.
    pub fn toggle(&mut self, id: ElementId) {
        if self.contains(id) {
            self.ids.retain(|&other| other != id);
        } else {
            self.ids.push(id);
        }
    }

    pub fn retain(&mut self, keep: impl FnMut(&ElementId) -> bool) {
        self.ids.retain(keep);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// The single selected id, if exactly one element is selected.
    pub fn single(&self) -> Option<ElementId> {
        match self.ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }
}

/// View settings that never touch the project content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub camera: Camera,
    pub grid: GridSettings,
    pub snap_to_elements: bool,
    pub alignment_threshold: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl ViewState {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            camera: Camera::default(),
            grid: GridSettings {
                size: config.grid_size,
                visible: config.show_grid,
                snap: config.snap_to_grid,
            },
            snap_to_elements: config.snap_to_elements,
            alignment_threshold: config.alignment_threshold,
        }
    }
}

/// Complete state of one editor. History snapshots are whole `EditorState`s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub project: Project,
    pub selection: Selection,
    /// Detached copies of the last copied elements.
    pub clipboard: Vec<Element>,
    pub view: ViewState,
}

impl EditorState {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            ..Self::default()
        }
    }

    /// Editor for `project` with view defaults from `config`.
    pub fn with_config(project: Project, config: &EditorConfig) -> Self {
        Self {
            project,
            selection: Selection::new(),
            clipboard: Vec::new(),
            view: ViewState::from_config(config),
        }
    }

    /// A fresh single-page project with the configured frame.
    pub fn blank(name: impl Into<String>, config: &EditorConfig) -> Self {
        let mut project = Project::new(name);
        if let Some(page) = project.current_page_mut() {
            page.frame = Frame::new(
                config.frame_width,
                config.frame_height,
                config.frame_background.clone(),
            );
        }
        Self::with_config(project, config)
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.project.current_page()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.current_page().and_then(|page| page.element(id))
    }

    /// Selected elements in selection order.
    pub fn selected_elements(&self) -> Vec<&Element> {
        self.selection
            .ids()
            .iter()
            .filter_map(|&id| self.element(id))
            .collect()
    }

    /// Add an element to `page_id`, returning the new state and the id it was given.
    ///
    /// The id is `None` when the page does not exist.
    pub fn add_element(&self, page_id: &str, template: ElementTemplate) -> (EditorState, Option<ElementId>) {
        let action = Action::add_element(page_id, template);
        let next = reduce(self, &action);
        let id = match action {
            Action::AddElement { id, .. } if next.project.page(page_id).is_some_and(|p| p.contains(id)) => {
                Some(id)
            }
            _ => None,
        };
        (next, id)
    }
}
