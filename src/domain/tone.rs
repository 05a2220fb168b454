use serde::{Deserialize, Serialize};

/// Scores at or above this are rendered as good.
pub const GOOD_THRESHOLD: f64 = 85.0;
/// Scores at or above this (and below [`GOOD_THRESHOLD`]) are rendered as a warning.
pub const WARNING_THRESHOLD: f64 = 70.0;

/// Colour family shared by the badge indicator, score bar and category dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Warning,
    Caution,
    Poor,
    Neutral,
    Pending,
}

impl Tone {
    /// Maps an overall 0-100 score onto a tone. Absent scores are neutral.
    pub fn for_score(score: Option<f64>) -> Self {
        match score {
            None => Tone::Neutral,
            Some(s) if s >= GOOD_THRESHOLD => Tone::Good,
            Some(s) if s >= WARNING_THRESHOLD => Tone::Warning,
            Some(_) => Tone::Poor,
        }
    }

    /// Maps a discrete 0-3 category score onto a tone.
    pub fn for_category(score: Option<u8>) -> Self {
        match score {
            Some(3) => Tone::Good,
            Some(2) => Tone::Warning,
            Some(1) => Tone::Caution,
            Some(0) => Tone::Poor,
            _ => Tone::Neutral,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tone::Good => "good",
            Tone::Warning => "warning",
            Tone::Caution => "caution",
            Tone::Poor => "poor",
            Tone::Neutral => "neutral",
            Tone::Pending => "pending",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tone::Good => "#22c55e",
            Tone::Warning => "#f97316",
            Tone::Caution => "#eab308",
            Tone::Poor => "#ef4444",
            Tone::Neutral => "#9ca3af",
            Tone::Pending => "#f59e0b",
        }
    }
}
