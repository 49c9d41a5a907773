// ---------------------------------------------------------------------------
// Dashboard settings
// ---------------------------------------------------------------------------

/// Compiled-in knobs for the view computation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Rows shown in the data preview table.
    pub preview_rows: usize,
    /// Upper bound on histogram buckets in the distribution view.
    pub max_histogram_bins: usize,
    pub histogram_title: String,
    pub line_title: String,
    pub bar_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            max_histogram_bins: 50,
            histogram_title: "Distribution Analysis".to_string(),
            line_title: "InsightCopilot Trend Analysis".to_string(),
            bar_title: "InsightCopilot Comparative Analysis".to_string(),
        }
    }
}
