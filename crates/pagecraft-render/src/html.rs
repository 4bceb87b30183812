//! Static HTML export.
//!
//! A page becomes a self-contained HTML5 document: one frame container with
//! every visible element absolutely positioned inside it. Output depends only
//! on the page, so exporting the same page twice yields identical bytes.

use crate::style::{StyleBuilder, number, px};
use pagecraft_core::{Element, ElementKind, Frame, Page, Project};
use std::fmt::Write;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("Project has no pages: {0}")]
    NoPages(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

const BASE_STYLES: &str = "\
    *, *::before, *::after { box-sizing: border-box; }
    body { margin: 0; font-family: system-ui, -apple-system, sans-serif; }
    .pagecraft-frame { position: relative; overflow: hidden; margin: 0 auto; }
    .pagecraft-element { position: absolute; margin: 0; }
    .pagecraft-text { white-space: pre-wrap; overflow-wrap: break-word; }
    .pagecraft-button { display: flex; align-items: center; justify-content: center; border: none; cursor: pointer; text-decoration: none; font: inherit; }
    .pagecraft-image { display: block; object-fit: cover; }";

/// Render a page as a complete HTML document titled with the page name.
pub fn render(page: &Page) -> String {
    render_with_title(page, &page.name)
}

/// Render the project's current page titled with the project name.
pub fn render_document(project: &Project) -> ExportResult<String> {
    let page = project
        .current_page()
        .ok_or_else(|| ExportError::NoPages(project.id.clone()))?;
    Ok(render_with_title(page, &project.name))
}

/// Render a page as a complete HTML document with an explicit title.
pub fn render_with_title(page: &Page, title: &str) -> String {
    let mut out = String::with_capacity(1024 + page.elements.len() * 256);

    out.push_str("<!DOCTYPE html>\n");
    out.push_str("<html lang=\"en\">\n");
    out.push_str("<head>\n");
    out.push_str("  <meta charset=\"UTF-8\">\n");
    out.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(out, "  <title>{}</title>", escape_html(title));
    let _ = writeln!(out, "  <style>\n{}\n  </style>", BASE_STYLES);
    out.push_str("</head>\n");
    out.push_str("<body>\n");

    let _ = writeln!(
        out,
        "  <div class=\"pagecraft-frame\" data-frame-id=\"{}\" style=\"{}\">",
        escape_html(&page.frame.id),
        escape_html(&frame_style(&page.frame).to_string())
    );

    let mut rendered = 0usize;
    for element in page.elements_by_z().into_iter().filter(|e| e.visible) {
        if let Some(markup) = render_element(element) {
            let _ = writeln!(out, "    {}", markup);
            rendered += 1;
        }
    }

    out.push_str("  </div>\n");
    out.push_str("</body>\n");
    out.push_str("</html>\n");

    log::debug!(
        "Rendered page {} with {} of {} elements",
        page.id,
        rendered,
        page.elements.len()
    );
    out
}

fn frame_style(frame: &Frame) -> StyleBuilder {
    let mut style = StyleBuilder::new();
    style
        .push_px("width", frame.width)
        .push_px("height", frame.height)
        .push_opt("background-color", Some(frame.background_color.as_str()));
    if let Some(image) = frame.background_image.as_deref().filter(|s| !s.is_empty()) {
        style
            .push("background-image", css_url(image))
            .push("background-size", "cover")
            .push("background-position", "center");
    }
    style
}

/// Markup for one element, or `None` when the element has nothing to show.
fn render_element(element: &Element) -> Option<String> {
    let mut style = box_style(element);
    let id = element.id.to_string();

    let markup = match element.kind {
        ElementKind::Text => {
            typography(&mut style, element);
            format!(
                "<div class=\"pagecraft-element pagecraft-text\" data-element-id=\"{}\" style=\"{}\">{}</div>",
                id,
                escape_html(&style.to_string()),
                escape_html(element.props.text.as_deref().unwrap_or_default())
            )
        }
        ElementKind::Button => {
            typography(&mut style, element);
            let label = escape_html(element.props.text.as_deref().unwrap_or_default());
            match element.props.href.as_deref().filter(|h| !h.trim().is_empty()) {
                Some(href) => format!(
                    "<a class=\"pagecraft-element pagecraft-button\" data-element-id=\"{}\" href=\"{}\" style=\"{}\">{}</a>",
                    id,
                    escape_html(href),
                    escape_html(&style.to_string()),
                    label
                ),
                None => format!(
                    "<button type=\"button\" class=\"pagecraft-element pagecraft-button\" data-element-id=\"{}\" style=\"{}\">{}</button>",
                    id,
                    escape_html(&style.to_string()),
                    label
                ),
            }
        }
        ElementKind::Rectangle | ElementKind::Shape => format!(
            "<div class=\"pagecraft-element pagecraft-{}\" data-element-id=\"{}\" style=\"{}\"></div>",
            element.kind.label().to_lowercase(),
            id,
            escape_html(&style.to_string())
        ),
        ElementKind::Circle => {
            style.push("border-radius", "50%");
            format!(
                "<div class=\"pagecraft-element pagecraft-circle\" data-element-id=\"{}\" style=\"{}\"></div>",
                id,
                escape_html(&style.to_string())
            )
        }
        ElementKind::Image => {
            let Some(src) = element.props.src.as_deref().filter(|s| !s.trim().is_empty()) else {
                log::debug!("Skipping image {} without a source", element.id);
                return None;
            };
            format!(
                "<img class=\"pagecraft-element pagecraft-image\" data-element-id=\"{}\" src=\"{}\" alt=\"{}\" style=\"{}\">",
                id,
                escape_html(src),
                escape_html(element.props.alt.as_deref().unwrap_or_default()),
                escape_html(&style.to_string())
            )
        }
    };

    Some(markup)
}

/// Position, box decoration and stacking shared by every element kind.
fn box_style(element: &Element) -> StyleBuilder {
    let props = &element.props;
    let mut style = StyleBuilder::new();

    style
        .push_px("left", element.x)
        .push_px("top", element.y)
        .push_px("width", element.width)
        .push_px("height", element.height)
        .push("z-index", element.z_index.to_string());

    if element.rotation != 0.0 && element.rotation.is_finite() {
        style.push("transform", format!("rotate({}deg)", number(element.rotation)));
    }
    if let Some(opacity) = props.opacity {
        style.push("opacity", number(opacity.clamp(0.0, 1.0)));
    }

    style.push_opt("background-color", props.background_color.as_deref());
    if let Some(image) = props.background_image.as_deref().filter(|s| !s.is_empty()) {
        style
            .push("background-image", css_url(image))
            .push("background-size", "cover")
            .push("background-position", "center");
    }

    if let Some(border) = &props.border {
        if border.width > 0.0 {
            style.push(
                "border",
                format!("{} {} {}", px(border.width), border.style.as_css(), border.color),
            );
        }
        if border.radius > 0.0 {
            style.push_px("border-radius", border.radius);
        }
    }

    if let Some(shadow) = &props.shadow {
        style.push(
            "box-shadow",
            format!(
                "{} {} {} {} {}",
                px(shadow.x),
                px(shadow.y),
                px(shadow.blur),
                px(shadow.spread),
                shadow.color
            ),
        );
    }

    style
        .push_edges("padding", props.padding.as_ref())
        .push_edges("margin", props.margin.as_ref());

    style
}

fn typography(style: &mut StyleBuilder, element: &Element) {
    let props = &element.props;

    style.push_opt("color", props.text_color.as_deref());
    if let Some(size) = props.font_size {
        style.push_px("font-size", size);
    }
    style
        .push_opt("font-family", props.font_family.as_deref())
        .push_opt("font-weight", props.font_weight.as_deref());
    if let Some(line_height) = props.line_height {
        style.push("line-height", number(line_height));
    }
    if let Some(spacing) = props.letter_spacing {
        style.push_px("letter-spacing", spacing);
    }
    if let Some(align) = props.text_align {
        style.push("text-align", align.as_css());
    }
    if let Some(decoration) = props.text_decoration {
        style.push("text-decoration", decoration.as_css());
    }
}

fn css_url(url: &str) -> String {
    format!("url(\"{}\")", url.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Escape text for use in HTML content and double- or single-quoted attributes.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
