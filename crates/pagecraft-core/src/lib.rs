//! PageCraft Core Library
//!
//! Platform-agnostic data model and editing logic for the PageCraft page
//! builder: elements and pages, the action reducer, undo history, pointer
//! interaction, snapping, and project persistence.

pub mod action;
pub mod camera;
pub mod config;
pub mod editor;
pub mod element;
pub mod history;
pub mod input;
pub mod interaction;
pub mod page;
pub mod selection;
pub mod shortcuts;
pub mod snap;
pub mod storage;

pub use action::{Action, reduce};
pub use camera::{Camera, screen_to_canvas};
pub use config::{ConfigError, EditorConfig};
pub use editor::{EditorState, Selection, ViewState};
pub use element::{
    Border, BorderStyle, Edges, Element, ElementId, ElementKind, ElementPatch, ElementProps,
    ElementTemplate, Geometry, MIN_ELEMENT_SIZE, Shadow, TextAlign, TextDecoration,
};
pub use history::History;
pub use input::{Focus, Key, Modifiers, MouseButton, PointerInput};
pub use interaction::{InteractionController, InteractionState, Marquee, ResizeDrag};
pub use page::{Frame, FramePatch, Page, Project};
pub use selection::{ResizeHandle, resize_geometry};
pub use shortcuts::{Command, Shortcut, ShortcutRegistry};
pub use snap::{
    ALIGNMENT_THRESHOLD, AlignmentGuide, GRID_SIZE, GridSettings, GuideAnchor, GuideOrientation,
    compute_alignment_guides, snap_to_grid,
};
pub use storage::{AutoSaveManager, MemoryStorage, Storage, StorageError, StorageResult};
