use serde::Deserialize;

use crate::params::{JobParametersPatch, ParameterStore};

/// Decimal places kept for picked coordinates (about 11 m at the equator).
pub const COORDINATE_PRECISION: i32 = 4;

/// A click on the map widget, as delivered by the widget (`e.latlng`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MapClick {
    pub lat: f64,
    pub lng: f64,
}

pub fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_PRECISION);
    (value * scale).round() / scale
}

/// Turns map clicks into AOI updates. Only latitude and longitude are touched.
pub struct CoordinatePicker;

impl CoordinatePicker {
    pub fn patch_for(click: MapClick) -> JobParametersPatch {
        JobParametersPatch::coordinates(round_coordinate(click.lat), round_coordinate(click.lng))
    }

    pub fn apply(store: &mut ParameterStore, click: MapClick) {
        store.set(Self::patch_for(click));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{JobParameters, ProcessingMode};
    use chrono::NaiveDate;

    fn store() -> ParameterStore {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut params = JobParameters::defaults_for(today);
        params.mode = ProcessingMode::SingleNdvi;
        ParameterStore::new(params)
    }

    #[test]
    fn test_click_rounds_to_four_decimals() {
        let mut store = store();
        let before = store.get();
        CoordinatePicker::apply(
            &mut store,
            MapClick {
                lat: 6.52441234,
                lng: 3.37929876,
            },
        );
        let after = store.get();
        assert_eq!(after.latitude, 6.5244);
        assert_eq!(after.longitude, 3.3793);
        assert_eq!(after.start_date, before.start_date);
        assert_eq!(after.end_date, before.end_date);
        assert_eq!(after.mode, ProcessingMode::SingleNdvi);
    }

    #[test]
    fn test_negative_coordinates_round_symmetrically() {
        assert_eq!(round_coordinate(-33.868819), -33.8688);
        assert_eq!(round_coordinate(-151.209295), -151.2093);
    }

    #[test]
    fn test_rapid_clicks_last_write_wins() {
        let mut store = store();
        let clicks = [
            MapClick { lat: 1.0, lng: 2.0 },
            MapClick { lat: 10.123456, lng: 20.654321 },
            MapClick { lat: -5.55556, lng: 7.77777 },
        ];
        for click in clicks {
            CoordinatePicker::apply(&mut store, click);
        }
        let params = store.get();
        assert_eq!((params.latitude, params.longitude), (-5.5556, 7.7778));
    }

    #[test]
    fn test_click_event_shape() {
        let click: MapClick = serde_json::from_str(r#"{"lat": 6.5, "lng": 3.25}"#).unwrap();
        assert_eq!(click, MapClick { lat: 6.5, lng: 3.25 });
    }
}
