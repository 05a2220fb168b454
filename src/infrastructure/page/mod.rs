use std::path::Path;

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::GraderConfig;

/// The host page as the overlay sees it: its address and its markup.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub url: String,
    pub html: String,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    pub fn from_file(url: &str, path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(Self::new(url, html))
    }

    pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Self> {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to fetch page: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP error {}: {}",
                response.status(),
                url
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read page body: {}", e)))?;
        Ok(Self::new(url, html))
    }
}

/// True iff `page_url` parses and its host equals `trusted_host`.
pub fn is_trusted_page(page_url: &str, trusted_host: &str) -> bool {
    Url::parse(page_url)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.eq_ignore_ascii_case(trusted_host)))
        .unwrap_or(false)
}

/// Decides whether grading may start on the current page.
#[derive(Debug, Clone)]
pub struct PageContextGuard {
    selector: Selector,
    label: String,
}

impl PageContextGuard {
    pub fn new(active_tab_selector: &str, tab_label: &str) -> Result<Self> {
        let selector = Selector::parse(active_tab_selector).map_err(|e| {
            AppError::ValidationError(format!(
                "Invalid active tab selector {:?}: {:?}",
                active_tab_selector, e
            ))
        })?;
        Ok(Self {
            selector,
            label: tab_label.to_lowercase(),
        })
    }

    pub fn from_config(config: &GraderConfig) -> Result<Self> {
        Self::new(&config.active_tab_selector, &config.tab_label)
    }

    /// True iff some active tab's visible text contains the label,
    /// ignoring case.
    pub fn can_grade(&self, html: &str) -> bool {
        let document = Html::parse_document(html);
        let found = document.select(&self.selector).any(|element| {
            element
                .text()
                .collect::<String>()
                .to_lowercase()
                .contains(&self.label)
        });
        debug!(found, "Checked for active model card tab");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> PageContextGuard {
        PageContextGuard::from_config(&GraderConfig::default()).unwrap()
    }

    const ACTIVE_CARD: &str = r#"
        <html><body>
          <nav>
            <a class="tab-alternate active" href="/org/model"><svg></svg>Model <b>card</b></a>
            <a class="tab-alternate" href="/org/model/tree/main">Files</a>
          </nav>
        </body></html>"#;

    const FILES_ACTIVE: &str = r#"
        <html><body>
          <a class="tab-alternate" href="/org/model">Model card</a>
          <a class="tab-alternate active" href="/org/model/tree/main">Files and versions</a>
        </body></html>"#;

    #[test]
    fn active_model_card_tab_passes() {
        assert!(guard().can_grade(ACTIVE_CARD));
    }

    #[test]
    fn inactive_model_card_tab_fails() {
        assert!(!guard().can_grade(FILES_ACTIVE));
        assert!(!guard().can_grade("<html><body><p>Model card</p></body></html>"));
        assert!(!guard().can_grade(""));
    }

    #[test]
    fn label_match_ignores_case() {
        let html = r#"<div class="tab-alternate active">MODEL CARD</div>"#;
        assert!(guard().can_grade(html));
    }

    #[test]
    fn rejects_unparsable_selector() {
        assert!(PageContextGuard::new("[[", "model card").is_err());
    }

    #[test]
    fn trusted_host_must_match_exactly() {
        assert!(is_trusted_page("https://huggingface.co/org/model", "huggingface.co"));
        assert!(!is_trusted_page("https://evil-huggingface.co/org", "huggingface.co"));
        assert!(!is_trusted_page("https://huggingface.co.example.com/", "huggingface.co"));
        assert!(!is_trusted_page("https://discuss.huggingface.co/", "huggingface.co"));
        assert!(!is_trusted_page("not a url", "huggingface.co"));
    }
}
