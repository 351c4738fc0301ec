use crate::audio_file::SelectedAudio;
use crate::prediction::PredictionRecord;

/// Uploader panel state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadState {
    /// File that passed validation and will be sent on submit.
    pub selected: Option<SelectedAudio>,
    /// True while a predict request is in flight.
    pub analyzing: bool,
    /// Latest successful analysis.
    pub result: Option<PredictionRecord>,
    pub previewing: bool,
}
