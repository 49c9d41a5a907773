use serde::Serialize;

use crate::data::model::Dataset;

/// Keywords that mark a numeric column as the headline business metric.
/// Between several matching columns, column order decides.
pub const METRIC_KEYWORDS: &[&str] = &["revenue", "sales", "total"];

// ---------------------------------------------------------------------------
// Column classification
// ---------------------------------------------------------------------------

/// Derived tags for one column. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnClassification {
    pub name: String,
    pub is_date: bool,
    pub is_numeric: bool,
    pub is_identifier: bool,
}

fn name_contains(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

/// Name contains "date", any case.
pub fn is_date_name(name: &str) -> bool {
    name_contains(name, "date")
}

/// Name contains "id", any case. `paid_amount` counts too.
pub fn is_identifier_name(name: &str) -> bool {
    name_contains(name, "id")
}

/// Tag every column of the dataset, in column order.
pub fn classify(dataset: &Dataset) -> Vec<ColumnClassification> {
    dataset
        .column_names
        .iter()
        .enumerate()
        .map(|(idx, name)| ColumnClassification {
            name: name.clone(),
            is_date: is_date_name(name),
            is_numeric: dataset.is_numeric_column(idx),
            is_identifier: is_identifier_name(name),
        })
        .collect()
}

/// All date-named columns, in column order.
pub fn date_columns(dataset: &Dataset) -> Vec<String> {
    dataset
        .column_names
        .iter()
        .filter(|c| is_date_name(c))
        .cloned()
        .collect()
}

/// The first date-named column drives both the sort order and line charts.
pub fn primary_date_column(dataset: &Dataset) -> Option<String> {
    date_columns(dataset).into_iter().next()
}

/// Numeric columns, in column order.
pub fn numeric_columns(dataset: &Dataset) -> Vec<String> {
    dataset
        .column_names
        .iter()
        .enumerate()
        .filter(|(idx, _)| dataset.is_numeric_column(*idx))
        .map(|(_, name)| name.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Metric inference
// ---------------------------------------------------------------------------

/// Pick the headline metric.
///
/// First numeric column whose name contains one of [`METRIC_KEYWORDS`]
/// (case-insensitive substring), otherwise the first numeric column,
/// otherwise nothing.
pub fn select_metric(dataset: &Dataset) -> Option<String> {
    let numeric = numeric_columns(dataset);
    let keyword_match = numeric.iter().find(|col| {
        let lower = col.to_lowercase();
        METRIC_KEYWORDS.iter().any(|kw| lower.contains(kw))
    });
    let metric = keyword_match.or_else(|| numeric.first()).cloned();
    log::debug!("Metric inference over {numeric:?} chose {metric:?}");
    metric
}

// ---------------------------------------------------------------------------
// Axis choices
// ---------------------------------------------------------------------------

/// Columns offered for the X-axis: everything that is not an identifier.
pub fn x_axis_choices(dataset: &Dataset) -> Vec<String> {
    dataset
        .column_names
        .iter()
        .filter(|c| !is_identifier_name(c))
        .cloned()
        .collect()
}

/// Columns offered for the Y-axis: numeric columns only.
pub fn y_axis_choices(dataset: &Dataset) -> Vec<String> {
    numeric_columns(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv;

    fn load(text: &str) -> Dataset {
        load_csv(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_keyword_metric_wins_in_column_order() {
        let ds = load("units,Total_Cost,NetRevenue,region\n1,2,3,x\n");
        assert_eq!(select_metric(&ds).as_deref(), Some("Total_Cost"));

        let ds = load("units,gross_SALES,region\n1,2,x\n");
        assert_eq!(select_metric(&ds).as_deref(), Some("gross_SALES"));
    }

    #[test]
    fn test_keyword_on_text_column_is_ignored() {
        let ds = load("revenue_note,units\nhigh,4\n");
        assert_eq!(select_metric(&ds).as_deref(), Some("units"));
    }

    #[test]
    fn test_falls_back_to_first_numeric() {
        let ds = load("region,amount,units\nNorth,10,1\n");
        assert_eq!(select_metric(&ds).as_deref(), Some("amount"));
    }

    #[test]
    fn test_no_numeric_columns_means_no_metric() {
        let ds = load("region,product\nNorth,Widget\n");
        assert_eq!(select_metric(&ds), None);
        assert!(y_axis_choices(&ds).is_empty());
    }

    #[test]
    fn test_classification_tags() {
        let ds = load("customer_id,OrderDate,amount\n1,2024-01-01,5\n");
        let tags = classify(&ds);
        assert_eq!(tags.len(), 3);
        assert!(tags[0].is_identifier && tags[0].is_numeric && !tags[0].is_date);
        assert!(tags[1].is_date && !tags[1].is_identifier);
        assert!(tags[2].is_numeric && !tags[2].is_identifier && !tags[2].is_date);
    }

    #[test]
    fn test_axis_choices_skip_identifiers() {
        let ds = load("Order_ID,region,paid_amount,amount\n1,North,3,4\n");
        assert_eq!(x_axis_choices(&ds), vec!["region", "amount"]);
        assert_eq!(
            y_axis_choices(&ds),
            vec!["Order_ID", "paid_amount", "amount"]
        );
    }

    #[test]
    fn test_date_columns_in_order() {
        let ds = load("ship_date,OrderDate,x\na,b,c\n");
        assert_eq!(date_columns(&ds), vec!["ship_date", "OrderDate"]);
        assert_eq!(primary_date_column(&ds).as_deref(), Some("ship_date"));
    }
}
