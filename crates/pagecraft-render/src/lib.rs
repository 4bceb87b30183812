//! PageCraft Render Library
//!
//! Turns pages into standalone HTML documents and hands them to a
//! publishing backend.

pub mod html;
pub mod publish;
mod style;

pub use html::{ExportError, ExportResult, escape_html, render, render_document, render_with_title};
pub use publish::{
    DEFAULT_BASE_DOMAIN, MemoryPublisher, PublishError, PublishRequest, PublishResult,
    PublishedSite, Publisher, download_file_name, slugify, validate_subdomain,
};
pub use style::StyleBuilder;
