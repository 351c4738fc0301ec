use crate::prediction::PredictionRecord;

/// Sidebar listing the user's past predictions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryState {
    /// Rows in backend order (newest first).
    pub records: Vec<PredictionRecord>,
    pub loading: bool,
    /// Entry shown in the selected-result panel.
    pub selected: Option<PredictionRecord>,
}

impl HistoryState {
    pub fn is_selected(&self, record: &PredictionRecord) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|selected| selected.row_key() == record.row_key())
    }
}
