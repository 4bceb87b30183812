//! Publishing exported pages to a hosted subdomain.

use pagecraft_core::Project;
use pagecraft_core::storage::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::RwLock;
use thiserror::Error;

/// Domain sites are published under unless a publisher is configured otherwise.
pub const DEFAULT_BASE_DOMAIN: &str = "grid-app.site";

/// Longest DNS label accepted as a subdomain.
const MAX_SUBDOMAIN_LEN: usize = 63;

/// Publishing errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PublishError {
    #[error("Invalid subdomain '{subdomain}': {reason}")]
    InvalidSubdomain {
        subdomain: String,
        reason: &'static str,
    },
    #[error("Publishing rejected: {0}")]
    Rejected(String),
    #[error("Publishing failed: {0}")]
    Other(String),
}

/// Result type for publishing operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// A rendered document to publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub html: String,
    /// Site title, used to derive a subdomain when none is given.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
}

impl PublishRequest {
    pub fn new(html: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            title: title.into(),
            subdomain: None,
        }
    }

    pub fn with_subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = Some(subdomain.into());
        self
    }

    /// The requested subdomain, or a slug of the title.
    pub fn resolved_subdomain(&self) -> String {
        match self.subdomain.as_deref().map(str::trim) {
            Some(sub) if !sub.is_empty() => sub.to_string(),
            _ => slugify(&self.title),
        }
    }
}

/// Where a published document can be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedSite {
    pub url: String,
    pub subdomain: String,
}

/// Trait for publishing backends.
///
/// The hosted deployment service is reached through an implementation of
/// this trait.
#[cfg(not(target_arch = "wasm32"))]
pub trait Publisher: Send + Sync {
    /// Publish a document. Implementations copy what they need from `request`
    /// before returning the future.
    fn publish(&self, request: &PublishRequest) -> BoxFuture<'_, PublishResult<PublishedSite>>;
}

/// Trait for publishing backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Publisher {
    /// Publish a document. Implementations copy what they need from `request`
    /// before returning the future.
    fn publish(&self, request: &PublishRequest) -> BoxFuture<'_, PublishResult<PublishedSite>>;
}

/// Check that `subdomain` is a usable DNS label.
pub fn validate_subdomain(subdomain: &str) -> PublishResult<()> {
    let invalid = |reason| {
        Err(PublishError::InvalidSubdomain {
            subdomain: subdomain.to_string(),
            reason,
        })
    };

    if subdomain.is_empty() {
        return invalid("must not be empty");
    }
    if subdomain.len() > MAX_SUBDOMAIN_LEN {
        return invalid("must be at most 63 characters");
    }
    if !subdomain
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return invalid("may only contain lowercase letters, digits and hyphens");
    }
    if subdomain.starts_with('-') || subdomain.ends_with('-') {
        return invalid("must not start or end with a hyphen");
    }
    Ok(())
}

/// Lowercase, hyphen-separated form of `name` that passes [`validate_subdomain`].
///
/// Falls back to `"site"` when nothing usable remains.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(MAX_SUBDOMAIN_LEN);
    let trimmed = slug.trim_end_matches('-');

    if trimmed.is_empty() {
        "site".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File name offered when a project is downloaded as HTML.
pub fn download_file_name(project: &Project) -> String {
    format!("{}.html", slugify(&project.name))
}

/// In-memory publisher for testing and offline use.
///
/// Keeps the last document published to each subdomain.
pub struct MemoryPublisher {
    base_domain: String,
    sites: RwLock<BTreeMap<String, String>>,
}

impl Default for MemoryPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::with_base_domain(DEFAULT_BASE_DOMAIN)
    }

    pub fn with_base_domain(base_domain: impl Into<String>) -> Self {
        Self {
            base_domain: base_domain.into(),
            sites: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// The document currently published at `subdomain`.
    pub fn published(&self, subdomain: &str) -> Option<String> {
        self.sites.read().ok()?.get(subdomain).cloned()
    }

    /// Published subdomains in sorted order.
    pub fn subdomains(&self) -> Vec<String> {
        self.sites
            .read()
            .map(|sites| sites.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Publisher for MemoryPublisher {
    fn publish(&self, request: &PublishRequest) -> BoxFuture<'_, PublishResult<PublishedSite>> {
        let subdomain = request.resolved_subdomain();
        let html = request.html.clone();

        Box::pin(async move {
            validate_subdomain(&subdomain)?;
            if html.trim().is_empty() {
                return Err(PublishError::Rejected("document is empty".to_string()));
            }

            let mut sites = self
                .sites
                .write()
                .map_err(|e| PublishError::Other(format!("Lock error: {}", e)))?;
            sites.insert(subdomain.clone(), html);

            let url = format!("https://{}.{}", subdomain, self.base_domain);
            log::info!("Published site to {}", url);
            Ok(PublishedSite { url, subdomain })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Landing Page"), "my-landing-page");
        assert_eq!(slugify("  Acme -- Co.  "), "acme-co");
        assert_eq!(slugify("Café 2024!"), "caf-2024");
        assert_eq!(slugify("***"), "site");
        assert_eq!(slugify(""), "site");
    }

    #[test]
    fn test_slugify_truncates_to_label_length() {
        let long = "a".repeat(62) + " bcd";
        let slug = slugify(&long);
        assert_eq!(slug.len(), 62);
        assert!(validate_subdomain(&slug).is_ok());
    }

    #[test]
    fn test_validate_subdomain() {
        assert!(validate_subdomain("my-site-2").is_ok());
        assert!(validate_subdomain("a").is_ok());
        assert!(validate_subdomain(&"a".repeat(63)).is_ok());

        for bad in ["", "-site", "site-", "My-Site", "my_site", "my.site"] {
            assert!(
                matches!(
                    validate_subdomain(bad),
                    Err(PublishError::InvalidSubdomain { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
        assert!(validate_subdomain(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_download_file_name() {
        let project = Project::new("Spring Sale");
        assert_eq!(download_file_name(&project), "spring-sale.html");
    }

    #[test]
    fn test_publish_explicit_subdomain() {
        let publisher = MemoryPublisher::new();
        let request = PublishRequest::new("<html></html>", "Anything").with_subdomain("launch");

        let site = block_on(publisher.publish(&request)).unwrap();
        assert_eq!(site.url, "https://launch.grid-app.site");
        assert_eq!(publisher.published("launch").as_deref(), Some("<html></html>"));
    }

    #[test]
    fn test_publish_defaults_to_title_slug() {
        let publisher = MemoryPublisher::with_base_domain("example.test");
        let request = PublishRequest::new("<html></html>", "Acme Landing");

        let site = block_on(publisher.publish(&request)).unwrap();
        assert_eq!(site.subdomain, "acme-landing");
        assert_eq!(site.url, "https://acme-landing.example.test");
    }

    #[test]
    fn test_publish_rejects_invalid_subdomain() {
        let publisher = MemoryPublisher::new();
        let request = PublishRequest::new("<html></html>", "Site").with_subdomain("Bad_Name");

        let result = block_on(publisher.publish(&request));
        assert!(matches!(result, Err(PublishError::InvalidSubdomain { .. })));
        assert!(publisher.subdomains().is_empty());
    }

    #[test]
    fn test_publish_rejects_empty_document() {
        let publisher = MemoryPublisher::new();
        let request = PublishRequest::new("   ", "Site");

        let result = block_on(publisher.publish(&request));
        assert!(matches!(result, Err(PublishError::Rejected(_))));
    }

    #[test]
    fn test_republish_replaces_document() {
        let publisher = MemoryPublisher::new();
        block_on(publisher.publish(&PublishRequest::new("v1", "Site"))).unwrap();
        block_on(publisher.publish(&PublishRequest::new("v2", "Site"))).unwrap();

        assert_eq!(publisher.subdomains(), vec!["site".to_string()]);
        assert_eq!(publisher.published("site").as_deref(), Some("v2"));
    }
}
