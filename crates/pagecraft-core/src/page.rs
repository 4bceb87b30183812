//! Frames, pages and projects.

use crate::element::{Element, ElementId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default frame width.
pub const DEFAULT_FRAME_WIDTH: f64 = 1200.0;
/// Default frame height.
pub const DEFAULT_FRAME_HEIGHT: f64 = 800.0;
/// Default frame background.
pub const DEFAULT_FRAME_BACKGROUND: &str = "#ffffff";

/// The fixed-size rectangular artboard of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_BACKGROUND)
    }
}

impl Frame {
    pub fn new(width: f64, height: f64, background_color: impl Into<String>) -> Self {
        Self {
            id: "frame-1".to_string(),
            name: "Desktop Frame".to_string(),
            width,
            height,
            background_color: background_color.into(),
            background_image: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn apply_patch(&mut self, patch: &FramePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(width) = patch.width {
            self.width = width.max(1.0);
        }
        if let Some(height) = patch.height {
            self.height = height.max(1.0);
        }
        if let Some(color) = &patch.background_color {
            self.background_color = color.clone();
        }
        if let Some(image) = &patch.background_image {
            self.background_image = image.clone();
        }
    }
}

/// Partial update for a frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FramePatch {
    pub name: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background_color: Option<String>,
    /// `Some(None)` removes the background image.
    pub background_image: Option<Option<String>>,
}

/// A page: one frame plus the elements placed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    pub frame: Frame,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            frame: Frame::default(),
            elements: Vec::new(),
        }
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|e| e.id == id)
    }

    /// Highest z-index on the page, or 0 when it is empty.
    pub fn max_z_index(&self) -> i64 {
        self.elements.iter().map(|e| e.z_index).max().unwrap_or(0).max(0)
    }

    /// Lowest z-index on the page, or 0 when it is empty.
    pub fn min_z_index(&self) -> i64 {
        self.elements.iter().map(|e| e.z_index).min().unwrap_or(0)
    }

    /// Elements in paint order (back to front). Ties keep container order.
    pub fn elements_by_z(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Topmost visible, unlocked element under `point`.
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        self.elements_by_z()
            .into_iter()
            .rev()
            .find(|e| e.is_interactive() && e.contains_point(point))
            .map(|e| e.id)
    }

    /// Visible, unlocked elements whose bounds lie entirely inside `rect`.
    pub fn elements_within(&self, rect: Rect) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| e.is_interactive())
            .filter(|e| {
                let b = e.bounds();
                b.x0 >= rect.x0 && b.y0 >= rect.y0 && b.x1 <= rect.x1 && b.y1 <= rect.y1
            })
            .map(|e| e.id)
            .collect()
    }

    /// Bounding box of all visible elements.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .filter(|e| e.visible)
            .map(|e| e.bounds())
            .reduce(|acc, b| acc.union(b))
    }
}

/// A project: an ordered set of pages, one of which is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub pages: Vec<Page>,
    pub current_page_id: String,
}

impl Default for Project {
    fn default() -> Self {
        Self::new("Untitled Project")
    }
}

impl Project {
    /// Create a project with a fresh id and a single empty page.
    pub fn new(name: impl Into<String>) -> Self {
        let page = Page::new("page-1", "Page 1");
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            current_page_id: page.id.clone(),
            pages: vec![page],
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    /// The page being edited. Falls back to the first page if the current id is stale.
    pub fn current_page(&self) -> Option<&Page> {
        self.page(&self.current_page_id).or_else(|| self.pages.first())
    }

    pub fn current_page_mut(&mut self) -> Option<&mut Page> {
        let index = self
            .pages
            .iter()
            .position(|p| p.id == self.current_page_id)
            .unwrap_or(0);
        self.pages.get_mut(index)
    }

    /// Equal apart from which page is open.
    pub fn same_content(&self, other: &Project) -> bool {
        self.id == other.id && self.name == other.name && self.pages == other.pages
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ElementTemplate};

    fn place(page: &mut Page, kind: ElementKind, x: f64, y: f64, z: i64) -> ElementId {
        let id = Uuid::new_v4();
        let el = ElementTemplate::new(kind, Point::new(x, y))
            .with_size(50.0, 50.0)
            .into_element(id, z);
        page.elements.push(el);
        id
    }

    #[test]
    fn test_new_project_defaults() {
        let project = Project::new("Site");
        assert_eq!(project.pages.len(), 1);
        let page = project.current_page().unwrap();
        assert_eq!(page.frame.width, 1200.0);
        assert_eq!(page.frame.height, 800.0);
        assert_eq!(page.frame.background_color, "#ffffff");
    }

    #[test]
    fn test_max_z_index_floor() {
        let mut page = Page::new("p", "P");
        assert_eq!(page.max_z_index(), 0);
        place(&mut page, ElementKind::Rectangle, 0.0, 0.0, -4);
        assert_eq!(page.max_z_index(), 0);
        place(&mut page, ElementKind::Rectangle, 0.0, 0.0, 9);
        assert_eq!(page.max_z_index(), 9);
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut page = Page::new("p", "P");
        let low = place(&mut page, ElementKind::Rectangle, 0.0, 0.0, 1);
        let high = place(&mut page, ElementKind::Rectangle, 20.0, 20.0, 2);

        assert_eq!(page.element_at(Point::new(30.0, 30.0)), Some(high));
        assert_eq!(page.element_at(Point::new(5.0, 5.0)), Some(low));
        assert_eq!(page.element_at(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_element_at_skips_hidden_and_locked() {
        let mut page = Page::new("p", "P");
        let low = place(&mut page, ElementKind::Rectangle, 0.0, 0.0, 1);
        let top = place(&mut page, ElementKind::Rectangle, 0.0, 0.0, 2);
        page.element_mut(top).unwrap().locked = true;
        assert_eq!(page.element_at(Point::new(10.0, 10.0)), Some(low));

        page.element_mut(low).unwrap().visible = false;
        assert_eq!(page.element_at(Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_elements_within_requires_containment() {
        let mut page = Page::new("p", "P");
        let inside = place(&mut page, ElementKind::Rectangle, 10.0, 10.0, 1);
        let _straddling = place(&mut page, ElementKind::Rectangle, 80.0, 10.0, 2);

        let ids = page.elements_within(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(ids, vec![inside]);
    }

    #[test]
    fn test_json_roundtrip_keeps_field_names() {
        let mut project = Project::new("Site").with_id("proj-1");
        let page = project.current_page_mut().unwrap();
        place(page, ElementKind::Button, 1.0, 2.0, 1);

        let json = project.to_json().unwrap();
        assert!(json.contains("\"currentPageId\""));
        assert!(json.contains("\"backgroundColor\""));

        let loaded = Project::from_json(&json).unwrap();
        assert_eq!(loaded, project);
    }

    #[test]
    fn test_frame_patch() {
        let mut frame = Frame::default();
        frame.apply_patch(&FramePatch {
            width: Some(640.0),
            background_image: Some(Some("bg.png".to_string())),
            ..FramePatch::default()
        });
        assert_eq!(frame.width, 640.0);
        assert_eq!(frame.height, 800.0);
        assert_eq!(frame.background_image.as_deref(), Some("bg.png"));

        frame.apply_patch(&FramePatch {
            background_image: Some(None),
            ..FramePatch::default()
        });
        assert!(frame.background_image.is_none());
    }
}
