//! Inline CSS declaration builder.

use pagecraft_core::Edges;
use std::fmt;

/// Ordered list of `property: value` declarations for a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleBuilder {
    declarations: Vec<(&'static str, String)>,
}

impl StyleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration. Later declarations win in the browser, so order matters.
    ///
    /// `;`, `{` and `}` are dropped from `value` so it cannot end the
    /// declaration and start another.
    pub fn push(&mut self, property: &'static str, value: impl Into<String>) -> &mut Self {
        let mut value = value.into();
        value.retain(|c| !matches!(c, ';' | '{' | '}'));
        self.declarations.push((property, value));
        self
    }

    /// Append a length in pixels.
    pub fn push_px(&mut self, property: &'static str, value: f64) -> &mut Self {
        self.push(property, px(value))
    }

    /// Append a declaration only when `value` is present and non-empty.
    pub fn push_opt(&mut self, property: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.push(property, value);
        }
        self
    }

    /// Append four-sided spacing (`padding`, `margin`) unless every side is zero.
    pub fn push_edges(&mut self, property: &'static str, edges: Option<&Edges>) -> &mut Self {
        if let Some(edges) = edges.filter(|e| !e.is_zero()) {
            let value = format!(
                "{} {} {} {}",
                px(edges.top),
                px(edges.right),
                px(edges.bottom),
                px(edges.left)
            );
            self.push(property, value);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Value of the last declaration for `property`, if any.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for StyleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", property, value)?;
        }
        Ok(())
    }
}

/// Format a length in CSS pixels. Whole numbers print without a fraction.
pub(crate) fn px(value: f64) -> String {
    format!("{}px", number(value))
}

/// Format a plain CSS number. Non-finite values collapse to zero.
pub(crate) fn number(value: f64) -> String {
    if value.is_finite() {
        // Avoid "-0".
        format!("{}", value + 0.0)
    } else {
        "0".to_string()
    }
}
