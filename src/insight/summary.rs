use serde::Serialize;

use crate::data::aggregate::{summarize, NumericSummary};
use crate::data::model::Dataset;

use super::format::{format_count, format_plain, format_thousands, round2};

pub const SUMMARY_PROMPT: &str = "Upload data and ask a question to generate insights";
pub const RISK_TEXT: &str = "Performance variability detected — monitor fluctuations.";

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Headline statistics of the selected metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub total: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl From<NumericSummary> for AggregateSummary {
    fn from(s: NumericSummary) -> Self {
        AggregateSummary {
            total: s.total,
            average: s.mean,
            min: s.min,
            max: s.max,
        }
    }
}

/// Aggregates of `metric`; `None` when the column is missing or holds no
/// numbers.
pub fn aggregate_metric(dataset: &Dataset, metric: &str) -> Option<AggregateSummary> {
    let idx = dataset.column_index(metric)?;
    summarize(&dataset.numeric_values(idx)).map(AggregateSummary::from)
}

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
}

impl KpiCard {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        KpiCard {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Cards shown before any upload, or when no metric could be inferred.
pub fn placeholder_cards() -> Vec<KpiCard> {
    vec![
        KpiCard::new("Revenue", "$120,000"),
        KpiCard::new("Active Users", "3,420"),
        KpiCard::new("Churn Rate", "4.2%"),
    ]
}

/// Total, average and record count for a metric, or the placeholders.
pub fn kpi_cards(
    metric: Option<&str>,
    aggregates: Option<&AggregateSummary>,
    row_count: usize,
) -> Vec<KpiCard> {
    match (metric, aggregates) {
        (Some(metric), Some(agg)) => vec![
            KpiCard::new(
                format!("Total {metric}"),
                format_thousands(round2(agg.total), 2),
            ),
            KpiCard::new(
                format!("Average {metric}"),
                format_thousands(round2(agg.average), 2),
            ),
            KpiCard::new("Total Records", format_count(row_count)),
        ],
        _ => placeholder_cards(),
    }
}

// ---------------------------------------------------------------------------
// Executive summary
// ---------------------------------------------------------------------------

/// The three fixed narrative sections, filled from the metric aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub key_insight: String,
    pub risk: String,
    pub recommendation: String,
}

impl ExecutiveSummary {
    pub fn sections(&self) -> [(&'static str, &str); 3] {
        [
            ("Key Business Insight", self.key_insight.as_str()),
            ("Risk or Concern", self.risk.as_str()),
            ("Executive Recommendation", self.recommendation.as_str()),
        ]
    }

    pub fn to_markdown(&self) -> String {
        self.sections()
            .iter()
            .map(|(heading, body)| format!("### {heading}\n{body}\n"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "content")]
pub enum SummaryPanel {
    /// Instruction shown until a question and a metric are both available.
    Prompt(String),
    Ready(ExecutiveSummary),
}

/// Fill the summary template.
///
/// The question is only checked for being non-empty; its wording does not
/// influence the text.
pub fn generate_summary(
    question: &str,
    metric: Option<&str>,
    aggregates: Option<&AggregateSummary>,
) -> SummaryPanel {
    let (Some(metric), Some(agg)) = (metric, aggregates) else {
        return SummaryPanel::Prompt(SUMMARY_PROMPT.to_string());
    };
    if question.is_empty() {
        return SummaryPanel::Prompt(SUMMARY_PROMPT.to_string());
    }

    let average = format_plain(round2(agg.average));
    let max = format_plain(agg.max);
    let min = format_plain(agg.min);

    SummaryPanel::Ready(ExecutiveSummary {
        key_insight: format!(
            "Average **{metric}** is **{average}**, with peak performance at **{max}**."
        ),
        risk: RISK_TEXT.to_string(),
        recommendation: format!(
            "Investigate drivers behind lower values like **{min}** and optimize strategy."
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg() -> AggregateSummary {
        AggregateSummary {
            total: 201.0,
            average: 50.25,
            min: 5.0,
            max: 120.0,
        }
    }

    #[test]
    fn test_summary_fills_template_slots() {
        let panel = generate_summary("Explain revenue trends", Some("amount"), Some(&agg()));
        let SummaryPanel::Ready(summary) = panel else {
            panic!("expected a summary");
        };
        assert_eq!(
            summary.key_insight,
            "Average **amount** is **50.25**, with peak performance at **120**."
        );
        assert!(summary.recommendation.contains("**5**"));
        assert_eq!(
            summary.risk,
            "Performance variability detected — monitor fluctuations."
        );

        let md = summary.to_markdown();
        assert!(md.starts_with("### Key Business Insight\n"));
        assert!(md.contains("### Risk or Concern\n"));
        assert!(md.contains("### Executive Recommendation\n"));
    }

    #[test]
    fn test_summary_needs_question_and_metric() {
        let prompt = SummaryPanel::Prompt(SUMMARY_PROMPT.to_string());
        assert_eq!(generate_summary("", Some("amount"), Some(&agg())), prompt);
        assert_eq!(generate_summary("why?", None, None), prompt);
        assert_eq!(generate_summary("why?", Some("amount"), None), prompt);
    }

    #[test]
    fn test_whitespace_question_still_counts() {
        assert!(matches!(
            generate_summary("   ", Some("amount"), Some(&agg())),
            SummaryPanel::Ready(_)
        ));
    }

    #[test]
    fn test_average_rounds_half_to_even() {
        // mean of [1.0, 1.25] is exactly 1.125
        let agg = AggregateSummary {
            total: 2.25,
            average: 1.125,
            min: 1.0,
            max: 1.25,
        };
        let SummaryPanel::Ready(summary) = generate_summary("why?", Some("amount"), Some(&agg))
        else {
            panic!("expected a summary");
        };
        assert!(summary.key_insight.contains("**1.12**"));
        assert_eq!(kpi_cards(Some("amount"), Some(&agg), 2)[1].value, "1.12");
    }

    #[test]
    fn test_question_wording_does_not_matter() {
        let a = generate_summary("Explain revenue trends", Some("amount"), Some(&agg()));
        let b = generate_summary("anything at all", Some("amount"), Some(&agg()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_kpi_cards_with_metric() {
        let agg = AggregateSummary {
            total: 12345.6,
            average: 1234.567,
            min: 0.0,
            max: 0.0,
        };
        let cards = kpi_cards(Some("revenue"), Some(&agg), 1500);
        assert_eq!(
            cards,
            vec![
                KpiCard::new("Total revenue", "12,345.60"),
                KpiCard::new("Average revenue", "1,234.57"),
                KpiCard::new("Total Records", "1,500"),
            ]
        );
    }

    #[test]
    fn test_kpi_cards_fall_back_to_placeholders() {
        assert_eq!(kpi_cards(None, None, 10), placeholder_cards());
        assert_eq!(kpi_cards(Some("amount"), None, 0), placeholder_cards());
    }

    #[test]
    fn test_aggregate_metric_skips_nulls() {
        let ds = crate::data::loader::load_csv("amount\n5\n\n120\nNA\n26\n50\n".as_bytes()).unwrap();
        assert_eq!(aggregate_metric(&ds, "amount"), Some(agg()));
        assert_eq!(aggregate_metric(&ds, "missing"), None);
    }
}
