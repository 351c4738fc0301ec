use super::jobs::HistoryResult;
use super::*;

impl EguiController {
    /// Re-fetch the current user's history in the background.
    pub fn refresh_history(&mut self) {
        let Some(username) = self.session.clone() else {
            return;
        };
        self.jobs.begin_history(username);
        self.ui.history.loading = true;
    }

    /// Show the history row at `index` in the selected-result panel.
    pub fn select_history_entry(&mut self, index: usize) {
        if let Some(record) = self.ui.history.records.get(index) {
            self.ui.history.selected = Some(record.clone());
        }
    }

    pub fn clear_selected_result(&mut self) {
        self.ui.history.selected = None;
    }

    pub(super) fn apply_history_result(&mut self, message: HistoryResult) {
        self.jobs.finish_history();
        if !self.jobs.is_latest_history(message.request_id)
            || self.session.as_deref() != Some(message.username.as_str())
        {
            tracing::debug!("Dropping stale history for {}", message.username);
            return;
        }
        self.ui.history.loading = false;
        self.ui.history.records = match message.result {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("History unavailable: {err}");
                Vec::new()
            }
        };
    }
}
