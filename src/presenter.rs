//! Pure mapping from the current outcome to what the result panel shows.

use chrono::{DateTime, NaiveDate, Utc};

use crate::outcome::{SubmissionOutcome, TemporalItem};

const TIMESTAMP_FORMAT: &str = "%b %-d, %Y %H:%M UTC";

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub label: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Progress,
    Error(String),
    Timeline(Vec<TimelineEntry>),
    Image(String),
    Message(String),
}

/// Every piece of display state that could be populated at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayLayers {
    pub pending: bool,
    pub error: Option<String>,
    pub timeline: Option<Vec<TimelineEntry>>,
    pub image: Option<String>,
    pub message: Option<String>,
}

impl DisplayLayers {
    /// Pending > error > timeline > image > message.
    pub fn resolve(self) -> ResultView {
        if self.pending {
            return ResultView::Progress;
        }
        if let Some(error) = self.error {
            return ResultView::Error(error);
        }
        if let Some(timeline) = self.timeline {
            return ResultView::Timeline(timeline);
        }
        if let Some(image) = self.image {
            return ResultView::Image(image);
        }
        ResultView::Message(self.message.unwrap_or_default())
    }
}

impl From<&SubmissionOutcome> for DisplayLayers {
    fn from(outcome: &SubmissionOutcome) -> Self {
        let mut layers = DisplayLayers::default();
        match outcome {
            SubmissionOutcome::Pending => layers.pending = true,
            SubmissionOutcome::Failed(msg) => layers.error = Some(msg.clone()),
            SubmissionOutcome::TemporalResult(items) => {
                layers.timeline = Some(items.iter().map(timeline_entry).collect())
            }
            SubmissionOutcome::SingleResult(handle) => layers.image = Some(handle.url().to_string()),
            SubmissionOutcome::Idle(msg) => layers.message = Some(msg.clone()),
        }
        layers
    }
}

pub fn present(outcome: &SubmissionOutcome) -> ResultView {
    DisplayLayers::from(outcome).resolve()
}

fn timeline_entry(item: &TemporalItem) -> TimelineEntry {
    TimelineEntry {
        label: format_timestamp(&item.date),
        image: item.image.clone(),
    }
}

/// Human-readable form of a server timestamp; unknown formats pass through.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Utc).format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    raw.to_string()
}
