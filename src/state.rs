use crate::config::Settings;
use crate::data::model::Dataset;
use crate::insight::dates::prepare;
use crate::insight::{compute_view, Selections, ViewModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// User inputs for the session. Everything shown on screen is derived from
/// this through [`compute_view`].
#[derive(Default)]
pub struct AppState {
    /// Uploaded dataset (None until the user picks a file).
    pub dataset: Option<Dataset>,

    /// File name of the current dataset, for the top bar.
    pub source_name: Option<String>,

    /// Axis picks and the question text.
    pub selections: Selections,

    pub settings: Settings,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a freshly loaded dataset: parse date columns, sort, and reset
    /// the axis pickers. The question text survives a new upload.
    pub fn set_dataset(&mut self, dataset: Dataset, source_name: impl Into<String>) {
        if dataset.is_empty() {
            log::warn!("Uploaded dataset has a header but no rows");
        }
        self.dataset = Some(prepare(dataset));
        self.source_name = Some(source_name.into());
        self.selections.x_axis = None;
        self.selections.y_axis = None;
        self.status_message = None;
    }

    /// Record a failed upload. The previous dataset, if any, stays loaded.
    pub fn set_load_error(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn set_x_axis(&mut self, col: String) {
        self.selections.x_axis = Some(col);
    }

    pub fn set_y_axis(&mut self, col: String) {
        self.selections.y_axis = Some(col);
    }

    /// Derive the full dashboard for the current inputs.
    pub fn view(&self) -> ViewModel {
        compute_view(self.dataset.as_ref(), &self.selections, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv;
    use crate::data::model::CellValue;

    fn upload(state: &mut AppState, csv: &str) {
        let ds = load_csv(csv.as_bytes()).unwrap();
        state.set_dataset(ds, "upload.csv");
    }

    #[test]
    fn test_set_dataset_prepares_and_resets_axes() {
        let mut state = AppState::default();
        state.set_x_axis("region".into());
        state.selections.question = "Why?".into();
        state.set_load_error("Error: earlier failure".into());

        upload(&mut state, "OrderDate,amount\n2024-02-01,1\n2024-01-01,2\n");

        let ds = state.dataset.as_ref().unwrap();
        assert!(matches!(ds.rows[0][0], CellValue::Date(_)));
        assert_eq!(ds.rows[0][1], CellValue::Integer(2));
        assert_eq!(state.selections.x_axis, None);
        assert_eq!(state.selections.question, "Why?");
        assert_eq!(state.status_message, None);
        assert_eq!(state.source_name.as_deref(), Some("upload.csv"));
    }

    #[test]
    fn test_failed_upload_keeps_previous_dataset() {
        let mut state = AppState::default();
        upload(&mut state, "region,amount\nNorth,1\n");
        state.set_load_error("Error: bad file".into());
        assert!(state.dataset.is_some());
        assert_eq!(state.view().metric.as_deref(), Some("amount"));
    }

    #[test]
    fn test_view_follows_axis_picks() {
        let mut state = AppState::default();
        upload(&mut state, "region,product,amount\nNorth,A,1\nSouth,B,2\n");
        assert_eq!(state.view().x_axis.as_deref(), Some("region"));
        state.set_x_axis("product".into());
        state.set_y_axis("amount".into());
        let view = state.view();
        assert_eq!(view.x_axis.as_deref(), Some("product"));
        assert_eq!(view.y_axis.as_deref(), Some("amount"));
    }
}
