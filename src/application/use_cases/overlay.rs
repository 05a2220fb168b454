use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::use_cases::badge::{Badge, BadgeView};
use crate::application::use_cases::panel::Panel;
use crate::domain::session::{ClickAction, GradingSession, GradingStatus};
use crate::infrastructure::grader_client::GradeBackend;
use crate::infrastructure::page::{is_trusted_page, PageContextGuard, PageSnapshot};
use crate::interfaces::dom::Node;

pub const OVERLAY_ROOT_ID: &str = "mc-grade-overlay";

struct OverlayState {
    session: GradingSession,
    badge: Option<Badge>,
    panel: Option<Panel>,
}

impl OverlayState {
    /// Brings the badge (and panel, when shown) in line with the session.
    fn sync(&mut self) {
        let view = BadgeView::for_session(&self.session);
        match self.badge.as_mut() {
            Some(badge) => {
                badge.update(view);
            }
            None => self.badge = Some(Badge::new(view)),
        }

        if self.session.panel_visible() {
            if let Some(report) = self.session.last_report().cloned() {
                self.panel.get_or_insert_with(Panel::new).show_report(&report);
            }
        }
    }
}

/// Grading overlay for one page load.
///
/// Cloning is cheap and every clone drives the same session, the way
/// several event handlers on a page share one content script.
#[derive(Clone)]
pub struct Overlay {
    session_id: Uuid,
    page: Arc<PageSnapshot>,
    guard: Arc<PageContextGuard>,
    backend: Arc<dyn GradeBackend + Send + Sync>,
    state: Arc<Mutex<OverlayState>>,
}

impl Overlay {
    /// Creates the overlay, or `None` when the page is outside the trusted host.
    pub fn attach(
        page: PageSnapshot,
        trusted_host: &str,
        guard: PageContextGuard,
        backend: Arc<dyn GradeBackend + Send + Sync>,
    ) -> Option<Self> {
        if !is_trusted_page(&page.url, trusted_host) {
            debug!(url = %page.url, trusted_host = %trusted_host, "Page not trusted, overlay stays detached");
            return None;
        }

        let mut state = OverlayState {
            session: GradingSession::new(),
            badge: None,
            panel: None,
        };
        state.sync();

        let session_id = Uuid::new_v4();
        info!(session_id = %session_id, url = %page.url, "Overlay attached");
        Some(Self {
            session_id,
            page: Arc::new(page),
            guard: Arc::new(guard),
            backend,
            state: Arc::new(Mutex::new(state)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, OverlayState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Handles a click on the badge and, when it starts a grade, awaits the
    /// backend and applies the outcome.
    pub async fn click(&self) -> ClickAction {
        let action = {
            let mut state = self.lock();
            let guard = &self.guard;
            let html = &self.page.html;
            let action = state.session.click(|| guard.can_grade(html));
            state.sync();
            action
        };
        debug!(session_id = %self.session_id, action = ?action, "Badge clicked");

        match action {
            ClickAction::RequestGrade => self.run_grade().await,
            ClickAction::Blocked => {
                warn!(session_id = %self.session_id, "Model card tab not active, grade not requested");
            }
            ClickAction::Ignored => {
                debug!(session_id = %self.session_id, "Grade already in flight, click ignored");
            }
            ClickAction::ShowPanel | ClickAction::HidePanel => {}
        }
        action
    }

    async fn run_grade(&self) {
        info!(session_id = %self.session_id, url = %self.page.url, "Grading model card");
        let outcome = self.backend.grade(&self.page.url).await;

        match &outcome {
            Ok(report) => info!(
                session_id = %self.session_id,
                score = ?report.score,
                label = ?report.label,
                "Model card graded"
            ),
            Err(err) => warn!(session_id = %self.session_id, error = %err, "Model card grade failed"),
        }

        let mut state = self.lock();
        state.session.complete(outcome);
        state.sync();
    }

    /// Expands or collapses the full review inside the open panel.
    pub fn toggle_full_review(&self) -> Option<bool> {
        let mut state = self.lock();
        if !state.session.panel_visible() {
            return None;
        }
        state.panel.as_mut()?.toggle_full_review()
    }

    pub fn status(&self) -> GradingStatus {
        self.lock().session.status()
    }

    pub fn session(&self) -> GradingSession {
        self.lock().session.clone()
    }

    pub fn badge_view(&self) -> Option<BadgeView> {
        self.lock().badge.as_ref().map(|badge| badge.view().clone())
    }

    /// Current overlay surface: the badge and, when visible, the panel.
    pub fn render(&self) -> Node {
        let state = self.lock();
        let mut root = Node::new("div").id(OVERLAY_ROOT_ID);
        if let Some(badge) = &state.badge {
            root = root.child(badge.render());
        }
        if state.session.panel_visible() {
            if let Some(panel) = &state.panel {
                root = root.child(panel.render());
            }
        }
        root
    }
}
