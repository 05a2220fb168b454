use std::sync::Arc;

use serde::Serialize;

use crate::domain::error::{FailureKind, GradeError};
use crate::domain::report::ScoringReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GradingStatus {
    Idle,
    Grading,
    Graded,
    Failed(FailureKind),
}

/// What the caller has to do after a click has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Issue exactly one grade request for the current page.
    RequestGrade,
    /// Page context check failed; nothing to send.
    Blocked,
    /// A request is already in flight.
    Ignored,
    ShowPanel,
    HidePanel,
}

/// Grading state for one page load.
///
/// All fields change together inside [`click`](Self::click) and
/// [`complete`](Self::complete); there is no other way to mutate them.
#[derive(Debug, Clone)]
pub struct GradingSession {
    status: GradingStatus,
    last_report: Option<Arc<ScoringReport>>,
    panel_visible: bool,
    attention: bool,
}

impl Default for GradingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GradingSession {
    pub fn new() -> Self {
        Self {
            status: GradingStatus::Idle,
            last_report: None,
            panel_visible: false,
            attention: false,
        }
    }

    pub fn status(&self) -> GradingStatus {
        self.status
    }

    pub fn last_report(&self) -> Option<&Arc<ScoringReport>> {
        self.last_report.as_ref()
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// True while a completed result has not been acknowledged by a click.
    pub fn attention(&self) -> bool {
        self.attention
    }

    pub fn is_grading(&self) -> bool {
        self.status == GradingStatus::Grading
    }

    /// Applies a user click. `can_grade` is only evaluated when the click
    /// would start a new attempt.
    pub fn click(&mut self, can_grade: impl FnOnce() -> bool) -> ClickAction {
        self.attention = false;

        match self.status {
            GradingStatus::Grading => ClickAction::Ignored,
            GradingStatus::Graded => {
                self.panel_visible = !self.panel_visible;
                if self.panel_visible {
                    ClickAction::ShowPanel
                } else {
                    ClickAction::HidePanel
                }
            }
            GradingStatus::Idle | GradingStatus::Failed(_) => {
                if can_grade() {
                    self.status = GradingStatus::Grading;
                    ClickAction::RequestGrade
                } else {
                    self.status = GradingStatus::Failed(FailureKind::TabNotActive);
                    ClickAction::Blocked
                }
            }
        }
    }

    /// Applies the outcome of the in-flight request.
    ///
    /// Returns `false` (and changes nothing) when no request was in flight.
    pub fn complete(&mut self, outcome: Result<ScoringReport, GradeError>) -> bool {
        if self.status != GradingStatus::Grading {
            return false;
        }

        match outcome {
            Ok(report) => {
                self.last_report = Some(Arc::new(report));
                self.status = GradingStatus::Graded;
                self.attention = true;
            }
            Err(err) => {
                self.status = GradingStatus::Failed(FailureKind::from(&err));
            }
        }
        true
    }
}
