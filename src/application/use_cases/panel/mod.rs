mod sections;

use crate::domain::report::ScoringReport;
use crate::interfaces::dom::Node;

pub const PANEL_ID: &str = "mc-grade-panel";
pub const FULL_REVIEW_TOGGLE_ID: &str = "mc-full-review-toggle";
pub const FULL_REVIEW_BODY_ID: &str = "mc-full-review-body";
pub const VIEW_REVIEW_LABEL: &str = "View full review";
pub const HIDE_REVIEW_LABEL: &str = "Hide full review";

/// Renders a scoring report into the panel's content tree.
///
/// Pure and idempotent: the same report always yields the same tree.
/// Sections whose source data is absent are left out entirely.
pub fn render(report: &ScoringReport) -> Node {
    let mut body = Node::new("div").class("mc-panel-body");

    body = body.child(sections::header(&report.basic_info));
    body = body.child(sections::overall_score(report));
    if let Some(details) = report.details.as_deref() {
        body = body.child(sections::details(details));
    }
    if !report.category_scores.is_empty() {
        body = body.child(sections::categories(&report.category_scores));
    }
    if let Some(standards) = report.standards_summary.as_ref().and_then(sections::standards) {
        body = body.child(standards);
    }
    if let Some(gaps) = sections::gaps(&report.gaps) {
        body = body.child(gaps);
    }
    if let Some(markdown) = report.filled_markdown.as_deref() {
        body = body.child(sections::full_review(markdown));
    }
    body
}

/// Names of the sections present in a rendered tree, in display order.
pub fn section_names(tree: &Node) -> Vec<String> {
    tree.find_by_class("mc-section")
        .into_iter()
        .filter_map(|node| node.get_attr("data-section").map(str::to_string))
        .collect()
}

/// Detail panel handle. Content is replaced wholesale on every reveal.
#[derive(Debug, Clone)]
pub struct Panel {
    content: Node,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    pub fn new() -> Self {
        Self {
            content: Node::new("div").class("mc-panel-body"),
        }
    }

    /// Replaces the content with a fresh rendering of `report`, which also
    /// collapses the full review.
    pub fn show_report(&mut self, report: &ScoringReport) {
        self.content = render(report);
    }

    pub fn content(&self) -> &Node {
        &self.content
    }

    /// Expands or collapses the full review. Returns the new expanded state,
    /// or `None` when the report has no full review.
    pub fn toggle_full_review(&mut self) -> Option<bool> {
        sections::toggle_full_review(&mut self.content)
    }

    pub fn render(&self) -> Node {
        Node::new("div")
            .id(PANEL_ID)
            .attr("role", "dialog")
            .style("position", "fixed")
            .style("bottom", "64px")
            .style("right", "16px")
            .style("width", "380px")
            .style("max-height", "70vh")
            .style("overflow-y", "auto")
            .style("padding", "16px")
            .style("border-radius", "12px")
            .style("background", "#ffffff")
            .style("color", "#111827")
            .style("box-shadow", "0 10px 30px rgba(0, 0, 0, 0.25)")
            .style("font", "13px sans-serif")
            .style("z-index", "999998")
            .child(self.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{BasicInfo, CategoryScore, Gaps, StandardsSummary};
    use crate::domain::tone::Tone;
    use serde_json::json;

    fn scenario_a() -> ScoringReport {
        ScoringReport::from_value(&json!({
            "score": 92,
            "label": "Excellent",
            "category_scores": [{"name": "Intended Use", "score": 3}],
            "standards_summary": {
                "total_items": 5, "present": 4, "partial": 1, "missing": 0,
                "missing_items": []
            }
        }))
        .unwrap()
    }

    fn fill(tree: &Node) -> &Node {
        tree.find_by_class("mc-score-fill")[0]
    }

    #[test]
    fn scenario_a_renders_green_bar_category_and_chips() {
        let tree = render(&scenario_a());

        assert_eq!(
            section_names(&tree),
            vec!["header", "overall", "categories", "standards"]
        );
        assert_eq!(fill(&tree).get_style("width"), Some("92%"));
        assert_eq!(fill(&tree).get_style("background"), Some(Tone::Good.color()));

        let rows = tree.find_by_class("mc-category");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text_content(), "Intended Use3");
        assert_eq!(
            rows[0].find_by_class("mc-dot")[0].get_style("background"),
            Some(Tone::Good.color())
        );

        let chips: Vec<String> = tree
            .find_by_class("mc-chip")
            .into_iter()
            .map(Node::text_content)
            .collect();
        assert_eq!(chips, vec!["Present: 4", "Partial: 1", "Missing: 0"]);
        assert!(tree.find_by_class("mc-missing-items").is_empty());
    }

    #[test]
    fn scenario_b_shows_not_available_and_empty_bar() {
        let report = ScoringReport::from_value(&json!({"score": null, "label": ""})).unwrap();
        let tree = render(&report);

        assert_eq!(tree.find_by_class("mc-score-value")[0].text_content(), "N/A");
        assert!(tree.find_by_class("mc-score-label").is_empty());
        assert_eq!(fill(&tree).get_style("width"), Some("0%"));
        assert_eq!(fill(&tree).get_style("background"), Some(Tone::Neutral.color()));
    }

    #[test]
    fn minimal_report_omits_every_optional_section() {
        let report = ScoringReport {
            score: Some(40.0),
            ..ScoringReport::default()
        };
        let tree = render(&report);

        assert_eq!(section_names(&tree), vec!["header", "overall"]);
        assert_eq!(tree.find_by_class("mc-title")[0].text_content(), "Model card audit");
        assert!(tree.find_by_class("mc-source-link").is_empty());
        assert!(tree.find_by_class("mc-meta").is_empty());
        assert!(tree.find_by_id(FULL_REVIEW_TOGGLE_ID).is_none());
    }

    #[test]
    fn low_scores_keep_a_visible_bar() {
        let report = ScoringReport {
            score: Some(2.0),
            ..ScoringReport::default()
        };
        let tree = render(&report);
        assert_eq!(fill(&tree).get_style("width"), Some("5%"));
        assert_eq!(fill(&tree).get_style("background"), Some(Tone::Poor.color()));
    }

    #[test]
    fn bar_colour_follows_thresholds_at_boundaries() {
        for (score, tone) in [
            (85.0, Tone::Good),
            (84.9, Tone::Warning),
            (70.0, Tone::Warning),
            (69.9, Tone::Poor),
        ] {
            let tree = render(&ScoringReport {
                score: Some(score),
                ..ScoringReport::default()
            });
            assert_eq!(fill(&tree).get_style("background"), Some(tone.color()));
        }
    }

    #[test]
    fn header_falls_back_to_url_and_joins_metadata() {
        let report = ScoringReport {
            basic_info: BasicInfo {
                title: None,
                url: Some("https://huggingface.co/org/model".to_string()),
                card_type: Some("model".to_string()),
                owner: None,
                version: Some("v2".to_string()),
            },
            ..ScoringReport::default()
        };
        let tree = render(&report);

        assert_eq!(
            tree.find_by_class("mc-title")[0].text_content(),
            "https://huggingface.co/org/model"
        );
        assert_eq!(
            tree.find_by_class("mc-source-link")[0].get_attr("href"),
            Some("https://huggingface.co/org/model")
        );
        assert_eq!(tree.find_by_class("mc-meta")[0].text_content(), "model · v2");
    }

    #[test]
    fn category_dots_and_placeholders() {
        let report = ScoringReport {
            category_scores: vec![
                CategoryScore { name: "A".to_string(), score: Some(2) },
                CategoryScore { name: "B".to_string(), score: Some(1) },
                CategoryScore { name: "C".to_string(), score: Some(0) },
                CategoryScore { name: "D".to_string(), score: None },
            ],
            ..ScoringReport::default()
        };
        let tree = render(&report);
        let rows = tree.find_by_class("mc-category");

        let tones: Vec<_> = rows
            .iter()
            .map(|row| row.find_by_class("mc-dot")[0].get_attr("data-tone").unwrap())
            .collect();
        assert_eq!(tones, vec!["warning", "caution", "poor", "neutral"]);
        assert_eq!(rows[3].text_content(), "D–");
    }

    #[test]
    fn standards_list_missing_items_and_tolerate_bad_totals() {
        let report = ScoringReport {
            standards_summary: Some(StandardsSummary {
                total_items: 2,
                present: 3,
                partial: 4,
                missing: 5,
                missing_items: vec!["License".to_string(), "Eval data".to_string()],
            }),
            ..ScoringReport::default()
        };
        let tree = render(&report);

        assert_eq!(tree.find_by_class("mc-chip").len(), 3);
        assert_eq!(
            tree.find_by_class("mc-missing-items")[0].text_content(),
            "LicenseEval data"
        );
    }

    #[test]
    fn zero_total_hides_chips_but_keeps_missing_list() {
        let report = ScoringReport {
            standards_summary: Some(StandardsSummary {
                missing_items: vec!["License".to_string()],
                ..StandardsSummary::default()
            }),
            ..ScoringReport::default()
        };
        let tree = render(&report);
        assert!(tree.find_by_class("mc-chip").is_empty());
        assert_eq!(tree.find_by_class("mc-missing-items").len(), 1);

        let empty = ScoringReport {
            standards_summary: Some(StandardsSummary::default()),
            ..ScoringReport::default()
        };
        assert!(!section_names(&render(&empty)).contains(&"standards".to_string()));
    }

    #[test]
    fn gaps_show_only_present_paragraphs() {
        let report = ScoringReport {
            gaps: Gaps {
                missing: None,
                inconsistent: Some("Dates disagree.".to_string()),
                ambiguous: Some("Unclear license.".to_string()),
            },
            ..ScoringReport::default()
        };
        let tree = render(&report);
        let kinds: Vec<_> = tree
            .find_by_class("mc-gap")
            .into_iter()
            .filter_map(|node| node.get_attr("data-kind"))
            .collect();
        assert_eq!(kinds, vec!["inconsistent", "ambiguous"]);
    }

    #[test]
    fn full_review_starts_collapsed_and_toggles() {
        let report = ScoringReport {
            filled_markdown: Some("# Review\nAll good.".to_string()),
            ..ScoringReport::default()
        };
        let mut panel = Panel::new();
        panel.show_report(&report);

        let body = panel.content().find_by_id(FULL_REVIEW_BODY_ID).unwrap();
        assert!(body.get_attr("hidden").is_some());
        assert_eq!(
            panel.content().find_by_id(FULL_REVIEW_TOGGLE_ID).unwrap().text_content(),
            VIEW_REVIEW_LABEL
        );

        assert_eq!(panel.toggle_full_review(), Some(true));
        assert!(panel
            .content()
            .find_by_id(FULL_REVIEW_BODY_ID)
            .unwrap()
            .get_attr("hidden")
            .is_none());
        assert_eq!(
            panel.content().find_by_id(FULL_REVIEW_TOGGLE_ID).unwrap().text_content(),
            HIDE_REVIEW_LABEL
        );

        assert_eq!(panel.toggle_full_review(), Some(false));
        assert_eq!(
            panel.content().find_by_id(FULL_REVIEW_TOGGLE_ID).unwrap().text_content(),
            VIEW_REVIEW_LABEL
        );
    }

    #[test]
    fn toggling_without_full_review_is_a_no_op() {
        let mut panel = Panel::new();
        panel.show_report(&ScoringReport::default());
        assert_eq!(panel.toggle_full_review(), None);
    }

    #[test]
    fn rendering_is_idempotent() {
        let report = scenario_a();
        let first = render(&report);
        let second = render(&report);
        assert_eq!(first, second);
        assert_eq!(first.to_html(), second.to_html());
    }

    #[test]
    fn show_report_replaces_content_each_time() {
        let mut panel = Panel::new();
        panel.show_report(&scenario_a());
        assert_eq!(panel.content().find_by_class("mc-category").len(), 1);

        panel.show_report(&ScoringReport::default());
        assert!(panel.content().find_by_class("mc-category").is_empty());
        assert_eq!(panel.render().get_attr("id"), Some(PANEL_ID));
    }

    #[test]
    fn showing_the_same_report_again_collapses_the_full_review() {
        let report = ScoringReport {
            filled_markdown: Some("# Review".to_string()),
            ..ScoringReport::default()
        };
        let mut panel = Panel::new();
        panel.show_report(&report);
        assert_eq!(panel.toggle_full_review(), Some(true));

        panel.show_report(&report);
        let body = panel.content().find_by_id(FULL_REVIEW_BODY_ID).unwrap();
        assert!(body.get_attr("hidden").is_some());
    }

    #[test]
    fn shown_score_stays_below_the_threshold_it_is_coloured_for() {
        let tree = render(&ScoringReport {
            score: Some(84.96),
            ..ScoringReport::default()
        });
        assert_eq!(tree.find_by_class("mc-score-value")[0].text_content(), "84.9");
        assert_eq!(fill(&tree).get_style("background"), Some(Tone::Warning.color()));
    }
}
