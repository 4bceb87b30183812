//! Page elements: the positioned, styled objects placed inside a frame.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest width or height an element may have.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// What an element renders as. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Button,
    Rectangle,
    Circle,
    Image,
    Shape,
}

impl ElementKind {
    /// All element kinds, in palette order.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Text,
        ElementKind::Button,
        ElementKind::Rectangle,
        ElementKind::Circle,
        ElementKind::Image,
        ElementKind::Shape,
    ];

    /// Size given to a freshly placed element of this kind.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            ElementKind::Text => (200.0, 50.0),
            ElementKind::Button => (120.0, 40.0),
            _ => (100.0, 100.0),
        }
    }

    /// Human readable name, used for default element names.
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Text => "Text",
            ElementKind::Button => "Button",
            ElementKind::Rectangle => "Rectangle",
            ElementKind::Circle => "Circle",
            ElementKind::Image => "Image",
            ElementKind::Shape => "Shape",
        }
    }
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl BorderStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
        }
    }
}

/// Element border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub width: f64,
    #[serde(default)]
    pub style: BorderStyle,
    pub color: String,
    #[serde(default)]
    pub radius: f64,
}

/// Drop shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub x: f64,
    pub y: f64,
    pub blur: f64,
    #[serde(default)]
    pub spread: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

impl TextDecoration {
    pub fn as_css(self) -> &'static str {
        match self {
            TextDecoration::None => "none",
            TextDecoration::Underline => "underline",
            TextDecoration::LineThrough => "line-through",
        }
    }
}

/// Per-edge spacing (padding or margin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    /// Same spacing on every edge.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

/// Appearance, typography, layout and content of an element.
///
/// Every field is optional; absent values fall back to the browser default
/// when the page is exported.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    /// Opacity in `0.0..=1.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// CSS font weight, e.g. `"500"` or `"bold"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Edges>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ElementProps {
    /// Starting appearance for a freshly placed element of `kind`.
    pub fn defaults_for(kind: ElementKind) -> Self {
        let base = Self {
            opacity: Some(1.0),
            ..Self::default()
        };
        match kind {
            ElementKind::Text => Self {
                text: Some("New Text".to_string()),
                text_color: Some("#000000".to_string()),
                font_size: Some(16.0),
                text_align: Some(TextAlign::Left),
                ..base
            },
            ElementKind::Button => Self {
                text: Some("Button".to_string()),
                background_color: Some("#3B82F6".to_string()),
                text_color: Some("#FFFFFF".to_string()),
                font_size: Some(14.0),
                font_weight: Some("500".to_string()),
                text_align: Some(TextAlign::Center),
                border: Some(Border {
                    width: 0.0,
                    style: BorderStyle::Solid,
                    color: "transparent".to_string(),
                    radius: 6.0,
                }),
                ..base
            },
            ElementKind::Rectangle | ElementKind::Circle | ElementKind::Shape => Self {
                background_color: Some("#E5E7EB".to_string()),
                ..base
            },
            ElementKind::Image => Self {
                alt: Some("Image".to_string()),
                ..base
            },
        }
    }
}

/// Frame-local position and size of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding rectangle in canvas coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Enforce the geometric invariants: non-negative position, minimum size.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
            width: self.width.max(MIN_ELEMENT_SIZE),
            height: self.height.max(MIN_ELEMENT_SIZE),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A placed object on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, clockwise.
    #[serde(default)]
    pub rotation: f64,
    pub z_index: i64,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    #[serde(default)]
    pub props: ElementProps,
}

impl Element {
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.width, self.height)
    }

    /// Replace position and size, clamping to the geometric invariants.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        let g = geometry.clamped();
        self.x = g.x;
        self.y = g.y;
        self.width = g.width;
        self.height = g.height;
    }

    /// Axis-aligned bounds, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        self.geometry().rect()
    }

    pub fn contains_point(&self, point: Point) -> bool {
        let b = self.bounds();
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }

    /// Visible and unlocked elements take part in hit-testing and selection.
    pub fn is_interactive(&self) -> bool {
        self.visible && !self.locked
    }

    /// Shallow-merge a partial update into this element.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        let mut geometry = self.geometry();
        if let Some(x) = patch.x {
            geometry.x = x;
        }
        if let Some(y) = patch.y {
            geometry.y = y;
        }
        if let Some(width) = patch.width {
            geometry.width = width;
        }
        if let Some(height) = patch.height {
            geometry.height = height;
        }
        self.set_geometry(geometry);
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = z_index;
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
        if let Some(props) = &patch.props {
            self.props = props.clone();
        }
    }
}

/// An element that has not been placed yet: no id, no z-index.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTemplate {
    pub kind: ElementKind,
    pub name: String,
    pub geometry: Geometry,
    pub rotation: f64,
    pub visible: bool,
    pub locked: bool,
    pub props: ElementProps,
}

impl ElementTemplate {
    /// A template with the default size and appearance for `kind`, placed at `position`.
    pub fn new(kind: ElementKind, position: Point) -> Self {
        let (width, height) = kind.default_size();
        Self {
            kind,
            name: kind.label().to_string(),
            geometry: Geometry::new(position.x, position.y, width, height),
            rotation: 0.0,
            visible: true,
            locked: false,
            props: ElementProps::defaults_for(kind),
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.geometry.width = width;
        self.geometry.height = height;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_props(mut self, props: ElementProps) -> Self {
        self.props = props;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.props.text = Some(text.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Materialize the template with its assigned id and z-index.
    pub fn into_element(self, id: ElementId, z_index: i64) -> Element {
        let g = self.geometry.clamped();
        Element {
            id,
            kind: self.kind,
            name: self.name,
            x: g.x,
            y: g.y,
            width: g.width,
            height: g.height,
            rotation: self.rotation,
            z_index,
            visible: self.visible,
            locked: self.locked,
            parent_id: None,
            props: self.props,
        }
    }
}

/// Partial update for an element. `None` fields are left untouched.
///
/// `props` replaces the whole property set when present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementPatch {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i64>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub props: Option<ElementProps>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn props(mut self, props: ElementProps) -> Self {
        self.props = Some(props);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: ElementKind) -> Element {
        ElementTemplate::new(kind, Point::new(10.0, 20.0)).into_element(Uuid::new_v4(), 1)
    }

    #[test]
    fn test_default_sizes() {
        assert_eq!(ElementKind::Text.default_size(), (200.0, 50.0));
        assert_eq!(ElementKind::Button.default_size(), (120.0, 40.0));
        assert_eq!(ElementKind::Circle.default_size(), (100.0, 100.0));
    }

    #[test]
    fn test_default_props_per_kind() {
        let text = ElementProps::defaults_for(ElementKind::Text);
        assert_eq!(text.text.as_deref(), Some("New Text"));
        assert_eq!(text.font_size, Some(16.0));

        let button = ElementProps::defaults_for(ElementKind::Button);
        assert_eq!(button.background_color.as_deref(), Some("#3B82F6"));
        assert_eq!(button.border.map(|b| b.radius), Some(6.0));

        let image = ElementProps::defaults_for(ElementKind::Image);
        assert!(image.src.is_none());
        assert_eq!(image.alt.as_deref(), Some("Image"));
    }

    #[test]
    fn test_template_clamps_geometry() {
        let el = ElementTemplate::new(ElementKind::Rectangle, Point::new(-5.0, 3.0))
            .with_size(4.0, 300.0)
            .into_element(Uuid::new_v4(), 7);
        assert_eq!(el.x, 0.0);
        assert_eq!(el.y, 3.0);
        assert_eq!(el.width, MIN_ELEMENT_SIZE);
        assert_eq!(el.height, 300.0);
        assert_eq!(el.z_index, 7);
    }

    #[test]
    fn test_patch_merges_and_clamps() {
        let mut el = sample(ElementKind::Rectangle);
        let original_props = el.props.clone();

        el.apply_patch(&ElementPatch::new().size(5.0, 60.0).name("Hero"));

        assert_eq!(el.width, MIN_ELEMENT_SIZE);
        assert_eq!(el.height, 60.0);
        assert_eq!(el.name, "Hero");
        assert_eq!(el.x, 10.0);
        assert_eq!(el.props, original_props);
    }

    #[test]
    fn test_patch_replaces_props() {
        let mut el = sample(ElementKind::Text);
        let props = ElementProps {
            text: Some("Hello".to_string()),
            ..ElementProps::default()
        };
        el.apply_patch(&ElementPatch::new().props(props));
        assert_eq!(el.props.text.as_deref(), Some("Hello"));
        assert!(el.props.font_size.is_none());
    }

    #[test]
    fn test_contains_point_and_interactive() {
        let mut el = sample(ElementKind::Circle);
        assert!(el.contains_point(Point::new(10.0, 20.0)));
        assert!(el.contains_point(Point::new(110.0, 120.0)));
        assert!(!el.contains_point(Point::new(111.0, 50.0)));

        assert!(el.is_interactive());
        el.locked = true;
        assert!(!el.is_interactive());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let el = sample(ElementKind::Text);
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["zIndex"], 1);
        assert_eq!(json["props"]["fontSize"], 16.0);
        assert!(json["props"].get("src").is_none());
    }

    #[test]
    fn test_deserialize_defaults_flags() {
        let json = r#"{
            "id": "6f1c2c1e-8d4e-4c1a-9d59-0f4b7d9a1a11",
            "type": "rectangle",
            "name": "Box",
            "x": 1, "y": 2, "width": 30, "height": 40,
            "zIndex": 3,
            "props": { "textDecoration": "line-through" }
        }"#;
        let el: Element = serde_json::from_str(json).unwrap();
        assert!(el.visible);
        assert!(!el.locked);
        assert_eq!(el.props.text_decoration, Some(TextDecoration::LineThrough));
    }
}
