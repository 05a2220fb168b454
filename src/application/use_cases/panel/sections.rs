use crate::application::use_cases::badge::format_score;
use crate::domain::report::{BasicInfo, CategoryScore, Gaps, ScoringReport, StandardsSummary};
use crate::domain::tone::Tone;
use crate::interfaces::dom::Node;

use super::{FULL_REVIEW_BODY_ID, FULL_REVIEW_TOGGLE_ID, HIDE_REVIEW_LABEL, VIEW_REVIEW_LABEL};

const DEFAULT_TITLE: &str = "Model card audit";
const META_SEPARATOR: &str = " · ";
const MIN_BAR_PERCENT: f64 = 5.0;
const EMPTY_SCORE_MARK: &str = "–";

fn section(name: &str) -> Node {
    Node::new("section")
        .class("mc-section")
        .attr("data-section", name)
        .style("margin-top", "12px")
}

fn heading(text: &str) -> Node {
    Node::new("h4")
        .class("mc-heading")
        .style("margin", "0 0 6px")
        .style("font-size", "13px")
        .text(text)
}

fn dot(tone: Tone) -> Node {
    Node::new("span")
        .class("mc-dot")
        .attr("data-tone", tone.name())
        .style("display", "inline-block")
        .style("width", "8px")
        .style("height", "8px")
        .style("border-radius", "50%")
        .style("background", tone.color())
}

pub(super) fn header(info: &BasicInfo) -> Node {
    let title = info
        .title
        .as_deref()
        .or(info.url.as_deref())
        .unwrap_or(DEFAULT_TITLE);

    let mut node = section("header").child(
        Node::new("h3")
            .class("mc-title")
            .style("margin", "0")
            .text(title),
    );

    if let Some(url) = info.url.as_deref() {
        node = node.child(
            Node::new("a")
                .class("mc-source-link")
                .attr("href", url)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text("Open source page"),
        );
    }

    let meta: Vec<&str> = [&info.card_type, &info.owner, &info.version]
        .into_iter()
        .filter_map(|value| value.as_deref())
        .collect();
    if !meta.is_empty() {
        node = node.child(
            Node::new("div")
                .class("mc-meta")
                .style("color", "#6b7280")
                .text(meta.join(META_SEPARATOR)),
        );
    }
    node
}

/// Filled width of the score bar, in percent.
pub(super) fn bar_percent(score: Option<f64>) -> f64 {
    match score {
        Some(score) => score.clamp(MIN_BAR_PERCENT, 100.0),
        None => 0.0,
    }
}

pub(super) fn overall_score(report: &ScoringReport) -> Node {
    let tone = Tone::for_score(report.score);
    let width = format!("{}%", format_score(Some(bar_percent(report.score))));

    let mut value_row = Node::new("div").class("mc-score-row").child(
        Node::new("span")
            .class("mc-score-value")
            .style("font-size", "22px")
            .style("font-weight", "700")
            .text(format_score(report.score)),
    );
    if let Some(label) = report.label_text() {
        value_row = value_row.child(
            Node::new("span")
                .class("mc-score-label")
                .style("margin-left", "8px")
                .text(label),
        );
    }

    let bar = Node::new("div")
        .class("mc-score-bar")
        .style("height", "8px")
        .style("border-radius", "4px")
        .style("background", "#e5e7eb")
        .child(
            Node::new("div")
                .class("mc-score-fill")
                .attr("data-tone", tone.name())
                .style("height", "100%")
                .style("border-radius", "4px")
                .style("width", &width)
                .style("background", tone.color()),
        );

    section("overall")
        .child(heading("Overall score"))
        .child(value_row)
        .child(bar)
}

pub(super) fn details(text: &str) -> Node {
    section("details").child(
        Node::new("p")
            .class("mc-details")
            .style("margin", "0")
            .text(text),
    )
}

pub(super) fn categories(scores: &[CategoryScore]) -> Node {
    let rows = scores.iter().map(|category| {
        let value = category
            .score
            .map(|score| score.to_string())
            .unwrap_or_else(|| EMPTY_SCORE_MARK.to_string());
        Node::new("div")
            .class("mc-category")
            .style("display", "contents")
            .child(Node::new("span").class("mc-category-name").text(category.name.clone()))
            .child(
                Node::new("span")
                    .class("mc-category-score")
                    .child(dot(Tone::for_category(category.score)))
                    .child(Node::new("span").class("mc-category-value").text(value)),
            )
    });

    section("categories").child(heading("Category breakdown")).child(
        Node::new("div")
            .class("mc-category-grid")
            .style("display", "grid")
            .style("grid-template-columns", "1fr auto")
            .style("gap", "4px 12px")
            .children(rows),
    )
}

/// `None` when the summary has nothing worth showing.
pub(super) fn standards(summary: &StandardsSummary) -> Option<Node> {
    let show_counts = summary.total_items > 0;
    let show_missing = !summary.missing_items.is_empty();
    if !show_counts && !show_missing {
        return None;
    }

    let mut node = section("standards").child(heading("Standards coverage"));
    if show_counts {
        let chips = [
            ("Present", summary.present, Tone::Good),
            ("Partial", summary.partial, Tone::Warning),
            ("Missing", summary.missing, Tone::Poor),
        ]
        .into_iter()
        .map(|(name, count, tone)| {
            Node::new("span")
                .class("mc-chip")
                .attr("data-kind", &name.to_lowercase())
                .style("padding", "2px 8px")
                .style("border-radius", "999px")
                .style("border", &format!("1px solid {}", tone.color()))
                .text(format!("{}: {}", name, count))
        });
        node = node.child(
            Node::new("div")
                .class("mc-chips")
                .style("display", "flex")
                .style("gap", "6px")
                .children(chips),
        );
    }
    if show_missing {
        let items = summary
            .missing_items
            .iter()
            .map(|item| Node::new("li").text(item.clone()));
        node = node.child(
            Node::new("ul")
                .class("mc-missing-items")
                .style("margin", "6px 0 0")
                .children(items),
        );
    }
    Some(node)
}

pub(super) fn gaps(gaps: &Gaps) -> Option<Node> {
    let paragraphs: Vec<Node> = [
        ("Missing", &gaps.missing),
        ("Inconsistent", &gaps.inconsistent),
        ("Ambiguous", &gaps.ambiguous),
    ]
    .into_iter()
    .filter_map(|(label, text)| text.as_deref().map(|text| (label, text)))
    .map(|(label, text)| {
        Node::new("p")
            .class("mc-gap")
            .attr("data-kind", &label.to_lowercase())
            .style("margin", "0 0 6px")
            .child(Node::new("strong").text(format!("{}: ", label)))
            .text(text)
    })
    .collect();

    if paragraphs.is_empty() {
        return None;
    }
    Some(section("gaps").child(heading("Gaps")).children(paragraphs))
}

pub(super) fn full_review(markdown: &str) -> Node {
    section("full-review")
        .child(
            Node::new("button")
                .id(FULL_REVIEW_TOGGLE_ID)
                .attr("type", "button")
                .attr("aria-expanded", "false")
                .text(VIEW_REVIEW_LABEL),
        )
        .child(
            Node::new("pre")
                .id(FULL_REVIEW_BODY_ID)
                .attr("hidden", "")
                .style("white-space", "pre-wrap")
                .style("max-height", "320px")
                .style("overflow", "auto")
                .text(markdown),
        )
}

/// Flips the full review between collapsed and expanded in place.
pub(super) fn toggle_full_review(root: &mut Node) -> Option<bool> {
    let body = root.find_by_id_mut(FULL_REVIEW_BODY_ID)?;
    let expanded = body.get_attr("hidden").is_some();
    if expanded {
        body.remove_attr("hidden");
    } else {
        body.set_attr("hidden", "");
    }

    let button = root.find_by_id_mut(FULL_REVIEW_TOGGLE_ID)?;
    button.set_text(if expanded {
        HIDE_REVIEW_LABEL
    } else {
        VIEW_REVIEW_LABEL
    });
    button.set_attr("aria-expanded", if expanded { "true" } else { "false" });
    Some(expanded)
}
