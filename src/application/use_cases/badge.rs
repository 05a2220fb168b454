use crate::domain::error::FailureKind;
use crate::domain::report::ScoringReport;
use crate::domain::session::{GradingSession, GradingStatus};
use crate::domain::tone::Tone;
use crate::interfaces::dom::Node;

pub const BADGE_ID: &str = "mc-grade-badge";

pub const IDLE_LABEL: &str = "Begin model card evaluation";
pub const GRADING_LABEL: &str = "Grading model card…";
pub const TAB_NOT_ACTIVE_LABEL: &str = "Model card tab not active on this page";
pub const BACKEND_ERROR_LABEL: &str = "Model card grade: backend error";
pub const REQUEST_FAILED_LABEL: &str = "Model card grade: request failed";

/// Everything the badge displays, derived from the session alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub label: String,
    pub tone: Tone,
    pub spinner: bool,
    pub attention: bool,
}

impl BadgeView {
    pub fn for_session(session: &GradingSession) -> Self {
        match session.status() {
            GradingStatus::Idle => Self::plain(IDLE_LABEL, Tone::Good),
            GradingStatus::Grading => Self {
                spinner: true,
                ..Self::plain(GRADING_LABEL, Tone::Pending)
            },
            GradingStatus::Graded => match session.last_report() {
                Some(report) => Self {
                    label: graded_label(report),
                    tone: Tone::for_score(report.score),
                    spinner: false,
                    attention: session.attention(),
                },
                None => Self::plain(IDLE_LABEL, Tone::Good),
            },
            GradingStatus::Failed(kind) => {
                let label = match kind {
                    FailureKind::TabNotActive => TAB_NOT_ACTIVE_LABEL,
                    FailureKind::BackendError => BACKEND_ERROR_LABEL,
                    FailureKind::RequestFailed => REQUEST_FAILED_LABEL,
                };
                Self::plain(label, Tone::Poor)
            }
        }
    }

    fn plain(label: &str, tone: Tone) -> Self {
        Self {
            label: label.to_string(),
            tone,
            spinner: false,
            attention: false,
        }
    }
}

/// Formats an overall score the way both badge and panel show it.
///
/// Fractions are truncated to one decimal so the shown number never lands
/// on the other side of a colour threshold than the score itself.
pub fn format_score(score: Option<f64>) -> String {
    let Some(score) = score else {
        return "N/A".to_string();
    };
    let shown = (score * 10.0).floor() / 10.0;
    if shown.fract() == 0.0 {
        format!("{}", shown as i64)
    } else {
        format!("{:.1}", shown)
    }
}

fn graded_label(report: &ScoringReport) -> String {
    let score = format_score(report.score);
    match report.label_text() {
        Some(label) => format!(
            "Model card score: {} ({}) – click to open audit",
            score, label
        ),
        None => format!("Model card score: {} – click to open audit", score),
    }
}

/// The single on-screen badge. Owned by the overlay and updated in place.
#[derive(Debug, Clone)]
pub struct Badge {
    view: BadgeView,
}

impl Badge {
    pub fn new(view: BadgeView) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &BadgeView {
        &self.view
    }

    /// Returns `true` when the displayed state actually changed.
    pub fn update(&mut self, view: BadgeView) -> bool {
        if self.view == view {
            return false;
        }
        self.view = view;
        true
    }

    pub fn render(&self) -> Node {
        let view = &self.view;
        let mut badge = Node::new("div")
            .id(BADGE_ID)
            .attr("role", "button")
            .attr("data-tone", view.tone.name())
            .style("position", "fixed")
            .style("bottom", "16px")
            .style("right", "16px")
            .style("display", "flex")
            .style("align-items", "center")
            .style("gap", "8px")
            .style("padding", "8px 12px")
            .style("border-radius", "999px")
            .style("background", "rgba(17, 24, 39, 0.92)")
            .style("color", "#f9fafb")
            .style("font", "12px sans-serif")
            .style("cursor", "pointer")
            .style("z-index", "999999");

        if view.attention {
            badge = badge
                .class("mc-attention")
                .style("box-shadow", &format!("0 0 0 4px {}55", view.tone.color()))
                .style("animation", "mc-pulse 1.6s ease-in-out infinite");
        }

        let indicator = Node::new("span")
            .class("mc-indicator")
            .style("width", "10px")
            .style("height", "10px")
            .style("border-radius", "50%")
            .style("background", view.tone.color());

        badge = badge.child(indicator);
        if view.spinner {
            badge = badge.child(
                Node::new("span")
                    .class("mc-spinner")
                    .style("width", "10px")
                    .style("height", "10px")
                    .style("border", "2px solid #f9fafb")
                    .style("border-top-color", "transparent")
                    .style("border-radius", "50%")
                    .style("animation", "mc-spin 0.8s linear infinite"),
            );
        }
        badge.child(Node::new("span").class("mc-label").text(view.label.clone()))
    }
}
