//! Job parameters and the store that holds them between edits.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_LATITUDE: f64 = 6.5244;
pub const DEFAULT_LONGITUDE: f64 = 3.3792;

/// Days between the default start date and today.
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Processing type requested from the service. Decides the response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProcessingMode {
    #[default]
    #[serde(rename = "true_color")]
    SingleTrueColor,
    #[serde(rename = "ndvi")]
    SingleNdvi,
    #[serde(rename = "temporal_list")]
    TemporalList,
}

impl ProcessingMode {
    pub const ALL: [ProcessingMode; 3] = [
        ProcessingMode::SingleTrueColor,
        ProcessingMode::SingleNdvi,
        ProcessingMode::TemporalList,
    ];

    /// Wire name, also used as the `<option>` value.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingMode::SingleTrueColor => "true_color",
            ProcessingMode::SingleNdvi => "ndvi",
            ProcessingMode::TemporalList => "temporal_list",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessingMode::SingleTrueColor => "True Color (single image)",
            ProcessingMode::SingleNdvi => "NDVI (single image)",
            ProcessingMode::TemporalList => "Temporal list (all dates)",
        }
    }

    /// Whether the service answers with a JSON list instead of an image body.
    pub fn expects_structured_response(self) -> bool {
        matches!(self, ProcessingMode::TemporalList)
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProcessingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("Unknown processing mode: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobParameters {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub mode: ProcessingMode,
}

impl JobParameters {
    /// Defaults anchored on `today`: a one-week window over the default AOI.
    pub fn defaults_for(today: NaiveDate) -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            start_date: today - Duration::days(DEFAULT_WINDOW_DAYS),
            end_date: today,
            mode: ProcessingMode::default(),
        }
    }
}

impl Default for JobParameters {
    fn default() -> Self {
        Self::defaults_for(Local::now().date_naive())
    }
}

/// Partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JobParametersPatch {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub mode: Option<ProcessingMode>,
}

impl JobParametersPatch {
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }

    /// Coerce a form-edited number. Unparseable input becomes NaN and is
    /// left for the service to reject.
    pub fn parse_coordinate(raw: &str) -> f64 {
        raw.trim().parse().unwrap_or(f64::NAN)
    }

    /// Coerce a `<input type="date">` value. Empty input yields `None`.
    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
    }
}

/// Holds the current parameters. No validation: values pass through as set.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    current: JobParameters,
}

impl ParameterStore {
    pub fn new(initial: JobParameters) -> Self {
        Self { current: initial }
    }

    pub fn get(&self) -> JobParameters {
        self.current
    }

    pub fn set(&mut self, patch: JobParametersPatch) {
        let p = &mut self.current;
        if let Some(latitude) = patch.latitude {
            p.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            p.longitude = longitude;
        }
        if let Some(start_date) = patch.start_date {
            p.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            p.end_date = end_date;
        }
        if let Some(mode) = patch.mode {
            p.mode = mode;
        }
        debug!(?patch, "Job parameters updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_cover_the_last_week() {
        let params = JobParameters::defaults_for(day(2024, 3, 5));
        assert_eq!(params.latitude, 6.5244);
        assert_eq!(params.longitude, 3.3792);
        assert_eq!(params.start_date, day(2024, 2, 27));
        assert_eq!(params.end_date, day(2024, 3, 5));
        assert_eq!(params.mode, ProcessingMode::SingleTrueColor);
    }

    #[test]
    fn test_set_is_visible_on_next_read() {
        let mut store = ParameterStore::new(JobParameters::defaults_for(day(2024, 1, 10)));
        store.set(JobParametersPatch {
            mode: Some(ProcessingMode::TemporalList),
            end_date: Some(day(2024, 1, 20)),
            ..Default::default()
        });
        let params = store.get();
        assert_eq!(params.mode, ProcessingMode::TemporalList);
        assert_eq!(params.end_date, day(2024, 1, 20));
        assert_eq!(params.start_date, day(2024, 1, 3));
        assert_eq!(params.latitude, DEFAULT_LATITUDE);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let mut store = ParameterStore::default();
        store.set(JobParametersPatch::coordinates(123.0, -540.5));
        store.set(JobParametersPatch {
            start_date: Some(day(2025, 1, 1)),
            end_date: Some(day(2024, 1, 1)),
            ..Default::default()
        });
        let params = store.get();
        assert_eq!((params.latitude, params.longitude), (123.0, -540.5));
        assert!(params.start_date > params.end_date);
    }

    #[test]
    fn test_form_coercion() {
        assert_eq!(JobParametersPatch::parse_coordinate(" 6.25 "), 6.25);
        assert!(JobParametersPatch::parse_coordinate("abc").is_nan());
        assert_eq!(JobParametersPatch::parse_date("2024-02-29"), Some(day(2024, 2, 29)));
        assert_eq!(JobParametersPatch::parse_date(""), None);
    }

    #[test]
    fn test_mode_wire_names() {
        for mode in ProcessingMode::ALL {
            assert_eq!(mode.as_str().parse::<ProcessingMode>(), Ok(mode));
            assert_eq!(
                serde_json::to_value(mode).unwrap(),
                serde_json::Value::String(mode.as_str().to_string())
            );
        }
        assert!("sar".parse::<ProcessingMode>().is_err());
        assert!(ProcessingMode::TemporalList.expects_structured_response());
        assert!(!ProcessingMode::SingleNdvi.expects_structured_response());
    }
}
