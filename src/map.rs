//! Bindings to the Leaflet map widget loaded by `index.html`.

use serde::Serialize;
use tracing::{error, warn};
use wasm_bindgen::prelude::*;

use crate::picker::MapClick;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
const INITIAL_ZOOM: f64 = 10.0;

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;
    pub type LeafletTileLayer;
    pub type LeafletMarker;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn leaflet_map(container: &web_sys::HtmlElement) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;

    #[wasm_bindgen(method)]
    fn on(this: &LeafletMap, event: &str, handler: &js_sys::Function) -> LeafletMap;

    #[wasm_bindgen(method)]
    fn remove(this: &LeafletMap) -> LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> LeafletTileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &LeafletTileLayer, map: &LeafletMap) -> LeafletTileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn leaflet_marker(latlng: &JsValue) -> LeafletMarker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_marker_to(this: &LeafletMarker, map: &LeafletMap) -> LeafletMarker;

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_lat_lng(this: &LeafletMarker, latlng: &JsValue) -> LeafletMarker;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileLayerOptions {
    max_zoom: u8,
    attribution: &'static str,
}

fn latlng(lat: f64, lon: f64) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(lat), &JsValue::from_f64(lon)).into()
}

/// Read `e.latlng` from a Leaflet mouse event.
fn click_from_event(event: &JsValue) -> Result<MapClick, String> {
    let latlng = js_sys::Reflect::get(event, &JsValue::from_str("latlng"))
        .map_err(|e| format!("{:?}", e))?;
    serde_wasm_bindgen::from_value(latlng).map_err(|e| e.to_string())
}

/// A mounted map with its AOI marker and click listener.
///
/// The listener closure lives as long as this value; call [`MapWidget::destroy`]
/// before dropping it.
pub struct MapWidget {
    map: LeafletMap,
    marker: LeafletMarker,
    _on_click: Closure<dyn FnMut(JsValue)>,
}

impl MapWidget {
    /// Returns `None` when Leaflet is not loaded on the page.
    pub fn mount(
        container: &web_sys::HtmlElement,
        lat: f64,
        lon: f64,
        mut on_click: impl FnMut(MapClick) + 'static,
    ) -> Option<Self> {
        let global = js_sys::global();
        if !js_sys::Reflect::has(&global, &JsValue::from_str("L")).unwrap_or(false) {
            error!("Leaflet (window.L) is not loaded; map disabled");
            return None;
        }

        let map = leaflet_map(container);
        map.set_view(&latlng(lat, lon), INITIAL_ZOOM);

        let options = TileLayerOptions {
            max_zoom: 19,
            attribution: TILE_ATTRIBUTION,
        };
        match serde_wasm_bindgen::to_value(&options) {
            Ok(options) => {
                tile_layer(TILE_URL, &options).add_to(&map);
            }
            Err(e) => warn!("Failed to build tile layer options: {}", e),
        }

        let marker = leaflet_marker(&latlng(lat, lon));
        marker.add_marker_to(&map);

        let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            match click_from_event(&event) {
                Ok(click) => on_click(click),
                Err(e) => warn!("Ignoring malformed map click: {}", e),
            }
        });
        map.on("click", handler.as_ref().unchecked_ref());

        Some(Self {
            map,
            marker,
            _on_click: handler,
        })
    }

    pub fn show_marker(&self, lat: f64, lon: f64) {
        if lat.is_finite() && lon.is_finite() {
            self.marker.set_lat_lng(&latlng(lat, lon));
        }
    }

    pub fn destroy(self) {
        self.map.remove();
    }
}
