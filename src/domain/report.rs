use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Highest discrete score a single category can receive.
pub const MAX_CATEGORY_SCORE: u8 = 3;

/// Row name used when a category arrives without a usable name.
pub const UNNAMED_CATEGORY: &str = "Unnamed category";

/// Scoring report returned by the grading backend.
///
/// Every field carries explicit presence. Instances built through
/// [`ScoringReport::from_value`] are already sanitized, so rendering code
/// can trust ranges without re-checking them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringReport {
    pub score: Option<f64>,
    pub label: Option<String>,
    pub details: Option<String>,
    pub basic_info: BasicInfo,
    pub category_scores: Vec<CategoryScore>,
    pub standards_summary: Option<StandardsSummary>,
    pub gaps: Gaps,
    pub filled_markdown: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub owner: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardsSummary {
    pub total_items: u64,
    pub present: u64,
    pub partial: u64,
    pub missing: u64,
    pub missing_items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gaps {
    pub missing: Option<String>,
    pub inconsistent: Option<String>,
    pub ambiguous: Option<String>,
}

impl Gaps {
    pub fn is_empty(&self) -> bool {
        self.missing.is_none() && self.inconsistent.is_none() && self.ambiguous.is_none()
    }
}

impl ScoringReport {
    /// Builds a report from a decoded response body.
    ///
    /// Returns `None` when the body is not a JSON object. Individual fields
    /// with the wrong shape are treated as absent rather than failing the
    /// whole report.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let info = &value["basic_info"];
        let gaps = &value["gaps"];

        let category_scores = value["category_scores"]
            .as_array()
            .map(|items| items.iter().filter_map(category_from_value).collect())
            .unwrap_or_default();

        let standards_summary = match object.get("standards_summary") {
            Some(summary) if summary.is_object() => Some(standards_from_value(summary)),
            _ => None,
        };

        Some(Self {
            score: score_from_value(&value["score"]),
            label: text(&value["label"]),
            details: text(&value["details"]),
            basic_info: BasicInfo {
                title: text(&info["title"]),
                url: text(&info["url"]),
                card_type: text(&info["type"]),
                owner: text(&info["owner"]),
                version: text(&info["version"]),
            },
            category_scores,
            standards_summary,
            gaps: Gaps {
                missing: text(&gaps["missing"]),
                inconsistent: text(&gaps["inconsistent"]),
                ambiguous: text(&gaps["ambiguous"]),
            },
            filled_markdown: text(&value["filled_markdown"]),
        })
    }

    /// Label text with empty values folded into `None`.
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.trim().is_empty())
    }
}

fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn score_from_value(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|score| score.is_finite())
        .map(|score| score.clamp(0.0, 100.0))
}

fn category_from_value(value: &Value) -> Option<CategoryScore> {
    value.as_object()?;
    let name = text(&value["name"]).unwrap_or_else(|| UNNAMED_CATEGORY.to_string());
    let score = value["score"]
        .as_f64()
        .filter(|s| s.fract() == 0.0 && *s >= 0.0 && *s <= f64::from(MAX_CATEGORY_SCORE))
        .map(|s| s as u8);
    Some(CategoryScore { name, score })
}

fn standards_from_value(value: &Value) -> StandardsSummary {
    let count = |key: &str| value[key].as_u64().unwrap_or(0);
    let missing_items = value["missing_items"]
        .as_array()
        .map(|items| items.iter().filter_map(text).collect())
        .unwrap_or_default();

    StandardsSummary {
        total_items: count("total_items"),
        present: count("present"),
        partial: count("partial"),
        missing: count("missing"),
        missing_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_report() {
        let body = json!({
            "score": 92,
            "label": "Excellent",
            "details": "Well documented.",
            "basic_info": {
                "title": "bert-base-uncased",
                "url": "https://huggingface.co/bert-base-uncased",
                "type": "model",
                "owner": "google",
                "version": "1.0"
            },
            "category_scores": [{"name": "Intended Use", "score": 3}],
            "standards_summary": {
                "total_items": 5, "present": 4, "partial": 1, "missing": 0,
                "missing_items": []
            },
            "gaps": {"missing": "No eval data.", "inconsistent": "", "ambiguous": null},
            "filled_markdown": "# Review"
        });

        let report = ScoringReport::from_value(&body).unwrap();
        assert_eq!(report.score, Some(92.0));
        assert_eq!(report.label_text(), Some("Excellent"));
        assert_eq!(report.basic_info.card_type.as_deref(), Some("model"));
        assert_eq!(
            report.category_scores,
            vec![CategoryScore {
                name: "Intended Use".to_string(),
                score: Some(3)
            }]
        );
        let summary = report.standards_summary.unwrap();
        assert_eq!((summary.present, summary.partial, summary.missing), (4, 1, 0));
        assert_eq!(report.gaps.missing.as_deref(), Some("No eval data."));
        assert_eq!(report.gaps.inconsistent, None);
        assert_eq!(report.gaps.ambiguous, None);
    }

    #[test]
    fn rejects_non_object_bodies() {
        assert!(ScoringReport::from_value(&json!([1, 2, 3])).is_none());
        assert!(ScoringReport::from_value(&json!("graded")).is_none());
    }

    #[test]
    fn null_score_and_empty_label_are_absent() {
        let report = ScoringReport::from_value(&json!({"score": null, "label": ""})).unwrap();
        assert_eq!(report.score, None);
        assert_eq!(report.label_text(), None);
        assert!(report.category_scores.is_empty());
        assert!(report.standards_summary.is_none());
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let body = json!({
            "score": 140.5,
            "category_scores": [
                {"name": "Bias", "score": 7},
                {"name": "Limits", "score": 1.5},
                {"name": "Training", "score": "3"},
                {"score": 2}
            ],
            "standards_summary": {"total_items": -3, "present": 2, "missing_items": ["License", 4]}
        });

        let report = ScoringReport::from_value(&body).unwrap();
        assert_eq!(report.score, Some(100.0));
        let scores: Vec<_> = report.category_scores.iter().map(|c| c.score).collect();
        assert_eq!(scores, vec![None, None, None, Some(2)]);
        let summary = report.standards_summary.unwrap();
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.missing_items, vec!["License".to_string()]);
    }

    #[test]
    fn nameless_categories_keep_their_scores() {
        let body = json!({
            "category_scores": [
                {"score": 3},
                {"name": "", "score": 1},
                {"name": 42, "score": 0},
                "not a row"
            ]
        });

        let report = ScoringReport::from_value(&body).unwrap();
        let rows: Vec<_> = report
            .category_scores
            .iter()
            .map(|c| (c.name.as_str(), c.score))
            .collect();
        assert_eq!(
            rows,
            vec![
                (UNNAMED_CATEGORY, Some(3)),
                (UNNAMED_CATEGORY, Some(1)),
                (UNNAMED_CATEGORY, Some(0)),
            ]
        );
    }

    #[test]
    fn wrong_typed_sections_are_ignored() {
        let body = json!({
            "score": "high",
            "basic_info": "bert",
            "category_scores": {"name": "x"},
            "standards_summary": 12,
            "gaps": ["missing"]
        });

        let report = ScoringReport::from_value(&body).unwrap();
        assert_eq!(report, ScoringReport::default());
    }
}
