//! Prediction records returned by the backend and their chart projection.

use serde::{Deserialize, Deserializer, Serialize};
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::FormatItem,
    format_description::well_known::{Rfc2822, Rfc3339},
    macros::format_description,
};

/// Label the backend uses for synthetic audio.
pub const FAKE_LABEL: &str = "Fake";

/// One analyzed audio file as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Backend identifier; absent when the backend could not persist the record.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User the prediction belongs to. History rows omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default = "unknown_filename", deserialize_with = "string_or_default")]
    pub filename: String,
    /// Predicted label, `Real` or `Fake` for the reference model.
    #[serde(default, deserialize_with = "string_or_default")]
    pub prediction: String,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub recall: f64,
    #[serde(default)]
    pub precision: f64,
    #[serde(default)]
    pub f1_score: f64,
    /// Creation time as sent by the backend (ISO-8601 or RFC 2822).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

fn unknown_filename() -> String {
    "unknown".to_string()
}

fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl PredictionRecord {
    /// True when the backend flagged the audio as synthetic.
    pub fn is_fake(&self) -> bool {
        self.prediction.eq_ignore_ascii_case(FAKE_LABEL)
    }

    /// Key used to tell history rows apart in the UI.
    pub fn row_key(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!(
                "{}:{}",
                self.filename,
                self.timestamp.as_deref().unwrap_or_default()
            ),
        }
    }

    /// Creation time rendered in `offset`, or the raw string when unparseable.
    pub fn display_timestamp(&self, offset: UtcOffset) -> Option<String> {
        let raw = self.timestamp.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        Some(format_timestamp(raw, offset).unwrap_or_else(|| raw.to_string()))
    }
}

/// Named metric series, in chart order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Accuracy,
    Recall,
    Precision,
    F1Score,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Accuracy,
        Metric::Recall,
        Metric::Precision,
        Metric::F1Score,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Accuracy => "Accuracy",
            Self::Recall => "Recall",
            Self::Precision => "Precision",
            Self::F1Score => "F1 Score",
        }
    }

    /// Bar fill as RGB.
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::Accuracy => [255, 165, 0],
            Self::Recall => [0, 0, 255],
            Self::Precision => [255, 255, 0],
            Self::F1Score => [255, 0, 0],
        }
    }

    pub fn value(self, record: &PredictionRecord) -> f64 {
        match self {
            Self::Accuracy => record.accuracy,
            Self::Recall => record.recall,
            Self::Precision => record.precision,
            Self::F1Score => record.f1_score,
        }
    }
}

/// One bar of the result chart.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricBar {
    pub label: &'static str,
    /// Raw metric value as reported.
    pub value: f64,
    pub color: [u8; 3],
}

impl MetricBar {
    /// Bar height as a fraction of the `[0, 1]` value axis.
    pub fn height_fraction(&self) -> f32 {
        if self.value.is_finite() {
            self.value.clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

/// Project a record onto the four chart bars.
pub fn chart_bars(record: &PredictionRecord) -> [MetricBar; 4] {
    Metric::ALL.map(|metric| MetricBar {
        label: metric.label(),
        value: metric.value(record),
        color: metric.color(),
    })
}

fn format_timestamp(raw: &str, offset: UtcOffset) -> Option<String> {
    const DISPLAY: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    parse_timestamp(raw)?.to_offset(offset).format(DISPLAY).ok()
}

/// Accepts RFC 3339, offset-less ISO-8601 (read as UTC) and RFC 2822 with `GMT`.
fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    const NAIVE_ISO: &[FormatItem<'static>] = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    const HTTP_DATE: &[FormatItem<'static>] = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    if let Ok(parsed) = PrimitiveDateTime::parse(raw, NAIVE_ISO) {
        return Some(parsed.assume_utc());
    }
    if let Ok(parsed) = PrimitiveDateTime::parse(raw, HTTP_DATE) {
        return Some(parsed.assume_utc());
    }
    OffsetDateTime::parse(raw, &Rfc2822).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PredictionRecord {
        serde_json::from_str(
            r#"{
                "_id": "65f0c0ffee",
                "prediction": "Fake",
                "accuracy": 0.91,
                "recall": 0.86,
                "precision": 0.88,
                "f1_score": 0.87,
                "filename": "clip.wav",
                "timestamp": "2024-03-12T09:30:00.123456"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn bars_follow_metric_order_and_values() {
        let bars = chart_bars(&record());
        let labels: Vec<_> = bars.iter().map(|bar| bar.label).collect();
        assert_eq!(labels, ["Accuracy", "Recall", "Precision", "F1 Score"]);
        let values: Vec<_> = bars.iter().map(|bar| bar.value).collect();
        assert_eq!(values, [0.91, 0.86, 0.88, 0.87]);
        assert_eq!(bars[0].color, [255, 165, 0]);
        assert_eq!(bars[3].color, [255, 0, 0]);
    }

    #[test]
    fn bar_height_is_clamped_to_unit_axis() {
        let mut rec = record();
        rec.accuracy = 1.4;
        rec.recall = -0.2;
        rec.precision = f64::NAN;
        let bars = chart_bars(&rec);
        assert_eq!(bars[0].height_fraction(), 1.0);
        assert_eq!(bars[1].height_fraction(), 0.0);
        assert_eq!(bars[2].height_fraction(), 0.0);
        assert_eq!(bars[0].value, 1.4);
    }

    #[test]
    fn sparse_history_row_uses_defaults() {
        let rec: PredictionRecord =
            serde_json::from_str(r#"{"prediction": null, "filename": null}"#).unwrap();
        assert_eq!(rec.filename, "");
        assert_eq!(rec.prediction, "");
        assert_eq!(rec.accuracy, 0.0);
        assert!(rec.id.is_none());

        let rec: PredictionRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(rec.filename, "unknown");
    }

    #[test]
    fn predict_response_with_username_parses() {
        let rec: PredictionRecord = serde_json::from_str(
            r#"{"prediction":"Real","accuracy":0.7,"recall":0.65,"precision":0.67,
                "f1_score":0.66,"filename":"a.mp3","username":"alice",
                "timestamp":"Tue, 14 Nov 2023 22:13:20 GMT","_id":"x1"}"#,
        )
        .unwrap();
        assert_eq!(rec.username.as_deref(), Some("alice"));
        assert!(!rec.is_fake());
        assert_eq!(
            rec.display_timestamp(UtcOffset::UTC).as_deref(),
            Some("2023-11-14 22:13:20")
        );
    }

    #[test]
    fn naive_iso_timestamp_is_read_as_utc() {
        let rec = record();
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
        assert_eq!(
            rec.display_timestamp(offset).as_deref(),
            Some("2024-03-12 11:30:00")
        );
        assert!(rec.is_fake());
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        let mut rec = record();
        rec.timestamp = Some("yesterday".into());
        assert_eq!(
            rec.display_timestamp(UtcOffset::UTC).as_deref(),
            Some("yesterday")
        );
        rec.timestamp = Some(String::new());
        assert_eq!(rec.display_timestamp(UtcOffset::UTC), None);
    }

    #[test]
    fn row_key_falls_back_without_id() {
        let mut rec = record();
        assert_eq!(rec.row_key(), "65f0c0ffee");
        rec.id = None;
        assert_eq!(rec.row_key(), "clip.wav:2024-03-12T09:30:00.123456");
    }
}
