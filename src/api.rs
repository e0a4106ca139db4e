//! Client for the imagery processing service.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use chrono::NaiveDate;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SubmitError;
use crate::outcome::TemporalItem;
use crate::params::{JobParameters, ProcessingMode};

pub const PROCESS_PATH: &str = "/api/sentinel-hub/process";

/// Content type assumed when a binary response does not declare one.
const DEFAULT_IMAGE_TYPE: &str = "image/png";

/// Request body for `POST /api/sentinel-hub/process`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub lat: f64,
    pub lon: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub script_type: ProcessingMode,
}

impl From<&JobParameters> for ProcessRequest {
    fn from(p: &JobParameters) -> Self {
        Self {
            lat: p.latitude,
            lon: p.longitude,
            start_date: p.start_date,
            end_date: p.end_date,
            script_type: p.mode,
        }
    }
}

/// Body of a successful temporal-list response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemporalResponse {
    #[serde(default)]
    pub results: Option<Vec<TemporalItem>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResponse {
    Image {
        bytes: Vec<u8>,
        content_type: String,
    },
    Temporal(TemporalResponse),
}

/// The processing service, as seen by the submitter.
///
/// Implementations pick the response decoding from `request.script_type`
/// before the request is sent.
pub trait ProcessingService {
    fn process(
        &self,
        request: &ProcessRequest,
    ) -> impl Future<Output = Result<ProcessResponse, SubmitError>>;
}

/// Classify a non-2xx response, keeping the server's `detail` string if any.
pub fn decode_failure(status: u16, body: &str) -> SubmitError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail")?.as_str().map(str::to_owned));
    SubmitError::Server { status, detail }
}

pub fn decode_temporal(body: &[u8]) -> Result<TemporalResponse, SubmitError> {
    serde_json::from_slice(body).map_err(|e| SubmitError::Decode(e.to_string()))
}

/// Validate a binary success body before it becomes a display resource.
pub fn decode_image(bytes: Vec<u8>, content_type: Option<String>) -> Result<ProcessResponse, SubmitError> {
    let content_type = content_type
        .map(|ct| ct.trim().to_string())
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_TYPE.to_string());

    if content_type.starts_with("application/json") {
        return Err(SubmitError::Decode(format!(
            "expected an image body, got {}",
            content_type
        )));
    }
    if bytes.is_empty() {
        return Err(SubmitError::Decode("empty image body".to_string()));
    }
    Ok(ProcessResponse::Image {
        bytes,
        content_type,
    })
}

/// Decode a 2xx body the way `mode` expects it: JSON for the temporal list,
/// an image for the single-image modes.
pub fn decode_success(
    mode: ProcessingMode,
    content_type: Option<String>,
    body: Vec<u8>,
) -> Result<ProcessResponse, SubmitError> {
    if mode.expects_structured_response() {
        decode_temporal(&body).map(ProcessResponse::Temporal)
    } else {
        decode_image(body, content_type)
    }
}

/// gloo-net client. A new request aborts the previous one still in flight.
#[derive(Clone)]
pub struct HttpProcessingService {
    endpoint: String,
    generation: Rc<Cell<u64>>,
    in_flight: Rc<RefCell<Option<web_sys::AbortController>>>,
}

impl HttpProcessingService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            generation: Rc::new(Cell::new(0)),
            in_flight: Rc::new(RefCell::new(None)),
        }
    }

    /// Abort the in-flight request, if there is one.
    pub fn abort(&self) {
        if let Some(controller) = self.in_flight.borrow_mut().take() {
            debug!("Aborting in-flight processing request");
            controller.abort();
        }
    }

    fn arm(&self) -> (u64, Option<web_sys::AbortSignal>) {
        self.abort();
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let signal = match web_sys::AbortController::new() {
            Ok(controller) => {
                let signal = controller.signal();
                *self.in_flight.borrow_mut() = Some(controller);
                Some(signal)
            }
            Err(e) => {
                warn!("AbortController unavailable: {:?}", e);
                None
            }
        };
        (generation, signal)
    }

    /// Forget the abort controller if no newer request has replaced it.
    fn disarm(&self, generation: u64) {
        if self.generation.get() == generation {
            self.in_flight.borrow_mut().take();
        }
    }

    async fn send(
        &self,
        request: &ProcessRequest,
        signal: Option<&web_sys::AbortSignal>,
    ) -> Result<ProcessResponse, SubmitError> {
        info!(
            "POST {} (mode={}, lat={}, lon={})",
            self.endpoint, request.script_type, request.lat, request.lon
        );

        let response = Request::post(&self.endpoint)
            .abort_signal(signal)
            .json(request)?
            .send()
            .await?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Processing service returned {}: {}", status, body.trim());
            return Err(decode_failure(status, &body));
        }

        let content_type = response.headers().get("content-type");
        let body = response.binary().await?;
        decode_success(request.script_type, content_type, body)
    }
}

impl ProcessingService for HttpProcessingService {
    fn process(
        &self,
        request: &ProcessRequest,
    ) -> impl Future<Output = Result<ProcessResponse, SubmitError>> {
        let service = self.clone();
        let request = request.clone();
        async move {
            let (generation, signal) = service.arm();
            let result = service.send(&request, signal.as_ref()).await;
            service.disarm(generation);
            result
        }
    }
}
