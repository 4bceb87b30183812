//! Periodic project persistence.
//!
//! Saves are last-write-wins snapshots. A failed save leaves the editor
//! untouched and the manager dirty, so the next tick retries.

use crate::config::DEFAULT_AUTOSAVE_INTERVAL_SECS;
use crate::page::Project;
use crate::storage::{Storage, StorageResult};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Key for the "last opened" project.
pub const LAST_PROJECT_KEY: &str = "__last_project__";

/// Manages automatic project persistence.
pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    interval: Duration,
    last_save: Option<Instant>,
    /// Whether the project has unsaved changes.
    dirty: bool,
    /// Id the project is saved under. Defaults to the project's own id.
    current_project_id: Option<String>,
}

impl<S: Storage> AutoSaveManager<S> {
    /// Manager saving through `storage` every 30 seconds while dirty.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: false,
            current_project_id: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Mark the project as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_project_id(&mut self, id: Option<String>) {
        self.current_project_id = id;
    }

    pub fn project_id(&self) -> Option<&str> {
        self.current_project_id.as_deref()
    }

    /// Dirty and either never saved or idle for at least the interval.
    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }

        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save the project if needed (dirty + interval elapsed).
    /// Returns true if a save was performed.
    pub async fn maybe_save(&mut self, project: &Project) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }

        self.save(project).await?;
        Ok(true)
    }

    /// Save the project immediately.
    pub async fn save(&mut self, project: &Project) -> StorageResult<()> {
        let id = self
            .current_project_id
            .clone()
            .unwrap_or_else(|| project.id.clone());

        // Both futures snapshot the project before any await point.
        let save = self.storage.save(&id, project);
        let save_last = self.storage.save(LAST_PROJECT_KEY, project);

        if let Err(e) = save.await {
            log::warn!("Saving project {} failed: {}", id, e);
            return Err(e);
        }
        if let Err(e) = save_last.await {
            log::warn!("Saving last-project marker failed: {}", e);
            return Err(e);
        }

        self.last_save = Some(Instant::now());
        self.dirty = false;
        log::info!("Saved project {}", id);
        Ok(())
    }

    /// Load a project by ID.
    pub async fn load(&mut self, id: &str) -> StorageResult<Project> {
        let project = self.storage.load(id).await?;
        self.current_project_id = Some(id.to_string());
        self.dirty = false;
        self.last_save = Some(Instant::now());
        log::info!("Loaded project {}", id);
        Ok(project)
    }

    /// Try to load the last opened project.
    /// Returns None if no last project exists.
    pub async fn load_last(&mut self) -> Option<Project> {
        match self.storage.load(LAST_PROJECT_KEY).await {
            Ok(project) => {
                self.current_project_id = Some(project.id.clone());
                self.dirty = false;
                self.last_save = Some(Instant::now());
                Some(project)
            }
            Err(e) => {
                log::debug!("No last project to restore: {}", e);
                None
            }
        }
    }

    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        self.storage.delete(id).await
    }

    /// List all saved project IDs.
    pub async fn list_projects(&self) -> StorageResult<Vec<String>> {
        let mut ids = self.storage.list().await?;
        ids.retain(|id| id != LAST_PROJECT_KEY);
        Ok(ids)
    }

    pub async fn exists(&self, id: &str) -> StorageResult<bool> {
        self.storage.exists(id).await
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create the default native storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::FileStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}

/// Auto-save manager over the default native storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformAutoSaveManager = AutoSaveManager<crate::storage::FileStorage>;

/// Auto-save manager writing to the platform data directory.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_autosave_manager() -> StorageResult<PlatformAutoSaveManager> {
    let storage = create_default_storage()?;
    Ok(AutoSaveManager::new(storage))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::storage::{BoxFuture, MemoryStorage, StorageError};
    use pollster::block_on;

    /// Storage whose writes always fail.
    struct FailingStorage;

    impl Storage for FailingStorage {
        fn save(&self, _id: &str, _project: &Project) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Err(StorageError::Io("disk full".to_string())) })
        }

        fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Project>> {
            let id = id.to_string();
            Box::pin(async move { Err(StorageError::NotFound(id)) })
        }

        fn delete(&self, _id: &str) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }

        fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn exists(&self, _id: &str) -> BoxFuture<'_, StorageResult<bool>> {
            Box::pin(async { Ok(false) })
        }
    }

    #[test]
    fn test_autosave_manager_creation() {
        let manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));

        assert!(!manager.is_dirty());
        assert!(!manager.should_save());
        assert_eq!(manager.interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_autosave_dirty_flag() {
        let mut manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));

        manager.mark_dirty();
        assert!(manager.is_dirty());
        assert!(manager.should_save());
    }

    #[test]
    fn test_interval_gates_saves() {
        let mut manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));
        let project = Project::new("Landing");

        manager.mark_dirty();
        assert!(block_on(manager.maybe_save(&project)).unwrap());

        manager.mark_dirty();
        assert!(!manager.should_save());
        assert!(!block_on(manager.maybe_save(&project)).unwrap());

        manager.set_interval(Duration::ZERO);
        assert!(block_on(manager.maybe_save(&project)).unwrap());
    }

    #[test]
    fn test_save_clears_dirty_and_uses_project_id() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage.clone());
        let project = Project::new("Landing").with_id("landing");

        manager.mark_dirty();
        block_on(manager.save(&project)).unwrap();

        assert!(!manager.is_dirty());
        assert!(block_on(storage.exists("landing")).unwrap());
    }

    #[test]
    fn test_failed_save_stays_dirty() {
        let mut manager = AutoSaveManager::new(Arc::new(FailingStorage));
        let project = Project::new("Landing");

        manager.mark_dirty();
        let result = block_on(manager.save(&project));

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(manager.is_dirty());
        assert!(manager.should_save());
    }

    #[test]
    fn test_autosave_load_last() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage.clone());

        let project = Project::new("Test Project");
        manager.mark_dirty();
        block_on(manager.save(&project)).unwrap();

        let mut restored = AutoSaveManager::new(storage);
        let loaded = block_on(restored.load_last()).expect("Should load last project");
        assert_eq!(loaded.name, "Test Project");
        assert_eq!(restored.project_id(), Some(project.id.as_str()));
    }

    #[test]
    fn test_load_last_missing() {
        let mut manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));
        assert!(block_on(manager.load_last()).is_none());
    }

    #[test]
    fn test_list_excludes_last_project_key() {
        let mut manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));

        manager.mark_dirty();
        block_on(manager.save(&Project::new("Landing").with_id("a"))).unwrap();

        let list = block_on(manager.list_projects()).unwrap();
        assert_eq!(list, vec!["a".to_string()]);
    }
}
