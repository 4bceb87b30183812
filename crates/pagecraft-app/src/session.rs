//! Editor session: one open project with its history, gesture state,
//! persistence and publishing.

use kurbo::Point;
use pagecraft_core::storage::{AutoSaveManager, Storage, StorageError};
use pagecraft_core::{
    Action, EditorConfig, EditorState, ElementId, ElementTemplate, Focus, History,
    InteractionController, Key, Modifiers, PointerInput, Project, ResizeHandle,
};
use pagecraft_render::{
    ExportError, PublishError, PublishRequest, PublishedSite, Publisher, download_file_name,
    render_document,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Root service of an editor instance.
///
/// Owns the undo history (and through it the editor state), the pointer
/// controller, and the collaborators used to save and publish. Every edit
/// goes through the session so unsaved changes are tracked in one place.
pub struct EditorSession<S: Storage, P: Publisher> {
    config: EditorConfig,
    history: History,
    controller: InteractionController,
    autosave: AutoSaveManager<S>,
    publisher: Arc<P>,
}

impl<S: Storage, P: Publisher> EditorSession<S, P> {
    /// A session editing a fresh, unsaved project.
    pub fn new(storage: Arc<S>, publisher: Arc<P>, config: EditorConfig) -> Self {
        let state = EditorState::blank("Untitled Project", &config);
        let autosave = AutoSaveManager::new(storage)
            .with_interval(Duration::from_secs(config.autosave_interval_secs));

        Self {
            history: History::with_limit(state, config.history_limit),
            controller: InteractionController::new(),
            autosave,
            publisher,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        self.history.present()
    }

    pub fn project(&self) -> &Project {
        &self.history.present().project
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Tell the controller where the canvas viewport sits on screen.
    pub fn set_viewport_origin(&mut self, origin: Point) {
        self.controller.set_viewport_origin(origin);
    }

    /// Whether the project has changes that have not been saved.
    pub fn is_dirty(&self) -> bool {
        self.autosave.is_dirty()
    }

    /// Discard the current project and start a blank one.
    pub fn new_project(&mut self, name: impl Into<String>) {
        let state = EditorState::blank(name, &self.config);
        log::info!("Created project {}", state.project.id);
        self.replace_project(state);
        self.autosave.set_project_id(None);
        self.autosave.mark_dirty();
    }

    /// Load a saved project. It becomes the initial history state.
    pub async fn open(&mut self, id: &str) -> SessionResult<()> {
        let project = self.autosave.load(id).await?;
        self.replace_project(EditorState::with_config(project, &self.config));
        Ok(())
    }

    /// Reopen the last saved project. Returns false if there is none.
    pub async fn restore_last(&mut self) -> bool {
        match self.autosave.load_last().await {
            Some(project) => {
                self.replace_project(EditorState::with_config(project, &self.config));
                true
            }
            None => false,
        }
    }

    /// Ids of all saved projects.
    pub async fn list_projects(&self) -> SessionResult<Vec<String>> {
        Ok(self.autosave.list_projects().await?)
    }

    fn replace_project(&mut self, state: EditorState) {
        self.controller.reset();
        self.history.reset(state);
    }

    /// Apply an action. Returns false if it changed nothing.
    pub fn dispatch(&mut self, action: &Action) -> bool {
        self.tracked(|session| session.history.apply(action))
    }

    /// Add an element to the current page and return its id.
    pub fn add_element(&mut self, template: ElementTemplate) -> Option<ElementId> {
        let page_id = self.state().current_page()?.id.clone();
        let action = Action::add_element(page_id, template);
        if !self.dispatch(&action) {
            return None;
        }
        match action {
            Action::AddElement { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn undo(&mut self) -> bool {
        self.tracked(|session| session.history.undo())
    }

    pub fn redo(&mut self) -> bool {
        self.tracked(|session| session.history.redo())
    }

    pub fn pointer_down(&mut self, input: PointerInput) {
        self.tracked(|session| session.controller.pointer_down(&mut session.history, input));
    }

    pub fn pointer_move(&mut self, input: PointerInput) {
        self.tracked(|session| session.controller.pointer_move(&mut session.history, input));
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    /// Start resizing from a handle the host hit-tested itself.
    pub fn begin_resize(&mut self, id: ElementId, handle: ResizeHandle, input: PointerInput) -> bool {
        self.controller
            .begin_resize(&mut self.history, id, handle, input)
    }

    /// Handle a key press. Returns true if the key was consumed.
    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers, focus: Focus) -> bool {
        self.tracked(|session| {
            session
                .controller
                .key_down(&mut session.history, key, modifiers, focus)
        })
    }

    /// Run `edit` and mark the session dirty if the project changed.
    ///
    /// Selection and view changes alone never dirty the session.
    fn tracked<R>(&mut self, edit: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.history.present().project.clone();
        let result = edit(self);
        if !self.history.present().project.same_content(&before) {
            self.autosave.mark_dirty();
        }
        result
    }

    /// Save if there are unsaved changes and the autosave interval has passed.
    ///
    /// Returns true if a save was performed. On failure the session stays
    /// dirty and editing continues unaffected.
    pub async fn tick(&mut self) -> SessionResult<bool> {
        let saved = self
            .autosave
            .maybe_save(&self.history.present().project)
            .await?;
        Ok(saved)
    }

    /// Save immediately, regardless of the autosave interval.
    pub async fn save_now(&mut self) -> SessionResult<()> {
        self.autosave.save(&self.history.present().project).await?;
        Ok(())
    }

    /// Export the current page as a standalone HTML document.
    pub fn export_html(&self) -> SessionResult<String> {
        Ok(render_document(self.project())?)
    }

    /// File name offered for [`EditorSession::export_html`] downloads.
    pub fn download_file_name(&self) -> String {
        download_file_name(self.project())
    }

    /// Export the current page and publish it.
    ///
    /// Without an explicit subdomain the site is published under a slug of
    /// the project name.
    pub async fn publish(&self, subdomain: Option<&str>) -> SessionResult<PublishedSite> {
        let html = self.export_html()?;
        let mut request = PublishRequest::new(html, self.project().name.clone());
        if let Some(subdomain) = subdomain {
            request = request.with_subdomain(subdomain);
        }

        let site = self.publisher.publish(&request).await?;
        log::info!("Published project {} at {}", self.project().id, site.url);
        Ok(site)
    }
}
