//! The result of a submit cycle, as consumed by the presenter.

use std::fmt;

use serde::Deserialize;

pub const INITIAL_MESSAGE: &str = "Click the map to choose a location, then submit a job.";
pub const NO_IMAGES_MESSAGE: &str = "No images found for the selected criteria.";
pub const CANCELLED_MESSAGE: &str = "Submission cancelled.";

/// One dated image from a temporal-list response. Order is the server's.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemporalItem {
    pub date: String,
    pub image: String,
}

/// A client-allocated display resource (an object URL for a binary image).
///
/// The release callback runs exactly once, when the handle is dropped.
pub struct ImageHandle {
    url: String,
    release: Option<Box<dyn FnOnce(&str)>>,
}

impl ImageHandle {
    pub fn new(url: impl Into<String>, release: impl FnOnce(&str) + 'static) -> Self {
        Self {
            url: url.into(),
            release: Some(Box::new(release)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for ImageHandle {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(&self.url);
        }
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle").field("url", &self.url).finish()
    }
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    Idle(String),
    Pending,
    Failed(String),
    SingleResult(ImageHandle),
    TemporalResult(Vec<TemporalItem>),
}

impl SubmissionOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionOutcome::Pending)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionOutcome::Idle(_) => "idle",
            SubmissionOutcome::Pending => "pending",
            SubmissionOutcome::Failed(_) => "failed",
            SubmissionOutcome::SingleResult(_) => "single",
            SubmissionOutcome::TemporalResult(_) => "temporal",
        }
    }
}

impl Default for SubmissionOutcome {
    fn default() -> Self {
        SubmissionOutcome::Idle(INITIAL_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_handle_released_once_on_drop() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&released);
        let handle = ImageHandle::new("blob:abc", move |url| log.borrow_mut().push(url.to_string()));
        assert_eq!(handle.url(), "blob:abc");
        assert!(released.borrow().is_empty());

        let outcome = SubmissionOutcome::SingleResult(handle);
        drop(outcome);
        assert_eq!(*released.borrow(), vec!["blob:abc".to_string()]);
    }

    #[test]
    fn test_default_outcome_is_idle() {
        match SubmissionOutcome::default() {
            SubmissionOutcome::Idle(msg) => assert_eq!(msg, INITIAL_MESSAGE),
            other => panic!("expected Idle, got {:?}", other),
        }
    }
}
