//! In-memory stand-ins for the browser collaborators.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::{ready, Future};
use std::rc::Rc;

use chrono::NaiveDate;

use crate::api::{ProcessRequest, ProcessResponse, ProcessingService, TemporalResponse};
use crate::error::SubmitError;
use crate::outcome::{ImageHandle, TemporalItem};
use crate::params::{JobParameters, ProcessingMode};
use crate::resources::ResourceAllocator;

pub fn params(mode: ProcessingMode) -> JobParameters {
    let mut params = JobParameters::defaults_for(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
    params.mode = mode;
    params
}

pub fn image_response(bytes: &[u8]) -> ProcessResponse {
    ProcessResponse::Image {
        bytes: bytes.to_vec(),
        content_type: "image/png".to_string(),
    }
}

pub fn temporal_response(dates: &[&str]) -> ProcessResponse {
    let items = dates
        .iter()
        .map(|date| TemporalItem {
            date: date.to_string(),
            image: format!("https://tiles.example/{}.png", date),
        })
        .collect();
    ProcessResponse::Temporal(TemporalResponse {
        results: Some(items),
    })
}

#[derive(Debug, Default)]
struct AllocatorLog {
    allocated: Vec<Vec<u8>>,
    released: Vec<String>,
    fail_next: bool,
}

/// Hands out `blob:fake/N` URLs and records releases.
#[derive(Debug, Clone, Default)]
pub struct FakeAllocator {
    log: Rc<RefCell<AllocatorLog>>,
}

impl FakeAllocator {
    pub fn allocated(&self) -> Vec<Vec<u8>> {
        self.log.borrow().allocated.clone()
    }

    pub fn released(&self) -> Vec<String> {
        self.log.borrow().released.clone()
    }

    pub fn fail_next(&self) {
        self.log.borrow_mut().fail_next = true;
    }
}

impl ResourceAllocator for FakeAllocator {
    fn allocate(&self, bytes: Vec<u8>, _content_type: &str) -> Result<ImageHandle, SubmitError> {
        let mut log = self.log.borrow_mut();
        if std::mem::take(&mut log.fail_next) {
            return Err(SubmitError::Resource("out of memory".to_string()));
        }
        log.allocated.push(bytes);
        let url = format!("blob:fake/{}", log.allocated.len());
        let released = Rc::clone(&self.log);
        Ok(ImageHandle::new(url, move |url| {
            released.borrow_mut().released.push(url.to_string());
        }))
    }
}

/// Replies with queued results in order and records every request.
#[derive(Debug, Clone, Default)]
pub struct FakeService {
    replies: Rc<RefCell<VecDeque<Result<ProcessResponse, SubmitError>>>>,
    requests: Rc<RefCell<Vec<ProcessRequest>>>,
}

impl FakeService {
    pub fn reply(&self, result: Result<ProcessResponse, SubmitError>) -> &Self {
        self.replies.borrow_mut().push_back(result);
        self
    }

    pub fn requests(&self) -> Vec<ProcessRequest> {
        self.requests.borrow().clone()
    }
}

impl ProcessingService for FakeService {
    fn process(
        &self,
        request: &ProcessRequest,
    ) -> impl Future<Output = Result<ProcessResponse, SubmitError>> {
        self.requests.borrow_mut().push(request.clone());
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(SubmitError::Transport("no reply queued".to_string())));
        ready(reply)
    }
}
