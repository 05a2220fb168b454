use std::sync::Arc;

use tracing::{error, info};

use crate::application::use_cases::overlay::Overlay;
use crate::domain::error::Result;
use crate::infrastructure::config::GraderConfig;
use crate::infrastructure::grader_client::{GradeBackend, HttpGradeClient};
use crate::infrastructure::page::{PageContextGuard, PageSnapshot};

/// Wires the page guard and HTTP client from config and attaches an overlay.
/// `Ok(None)` means the page is outside the trusted host.
pub fn build_overlay(config: &GraderConfig, page: PageSnapshot) -> Result<Option<Overlay>> {
    let guard = PageContextGuard::from_config(config).map_err(|err| {
        error!(error = %err, selector = %config.active_tab_selector, "Failed to build page guard");
        err
    })?;

    let client = HttpGradeClient::new(config.grade_endpoint());
    info!(endpoint = %client.endpoint(), "Scoring backend configured");
    let backend: Arc<dyn GradeBackend + Send + Sync> = Arc::new(client);

    Ok(Overlay::attach(page, &config.trusted_host, guard, backend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_overlay_for_trusted_page() {
        let page = PageSnapshot::new("https://huggingface.co/org/model", "<html></html>");
        let overlay = build_overlay(&GraderConfig::default(), page).unwrap();
        assert!(overlay.is_some());
    }

    #[test]
    fn leaves_other_sites_untouched() {
        let page = PageSnapshot::new("https://github.com/org/model", "<html></html>");
        assert!(build_overlay(&GraderConfig::default(), page).unwrap().is_none());
    }
}
