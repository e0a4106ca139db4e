//! Submission lifecycle: Pending transition, sequence tokens, classification.

use tracing::{info, warn};

use crate::api::{ProcessRequest, ProcessResponse, TemporalResponse};
use crate::error::SubmitError;
use crate::outcome::{SubmissionOutcome, CANCELLED_MESSAGE, NO_IMAGES_MESSAGE};
use crate::params::{JobParameters, ProcessingMode};
use crate::resources::ResourceAllocator;

/// Issued by [`JobSubmitter::begin`]; hand it back to `complete`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionTicket {
    pub sequence: u64,
    pub request: ProcessRequest,
}

/// Owns the current outcome. Only the latest issued sequence may replace it.
#[derive(Debug)]
pub struct JobSubmitter<A> {
    allocator: A,
    latest: u64,
    /// Mode of the latest ticket, which fixes the response kind it accepts.
    mode: Option<ProcessingMode>,
    outcome: SubmissionOutcome,
}

impl<A: ResourceAllocator> JobSubmitter<A> {
    pub fn new(allocator: A) -> Self {
        Self {
            allocator,
            latest: 0,
            mode: None,
            outcome: SubmissionOutcome::default(),
        }
    }

    pub fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    /// Start a submission. The previous outcome (and any image it owns) is
    /// dropped and replaced by `Pending`.
    pub fn begin(&mut self, params: &JobParameters) -> SubmissionTicket {
        self.latest += 1;
        let request = ProcessRequest::from(params);
        info!(
            sequence = self.latest,
            mode = %request.script_type,
            "Submitting job {} to {}",
            request.start_date,
            request.end_date
        );
        self.mode = Some(request.script_type);
        self.replace(SubmissionOutcome::Pending);
        SubmissionTicket {
            sequence: self.latest,
            request,
        }
    }

    /// Apply the result of the submission identified by `sequence`.
    ///
    /// Returns `false` when a later submission (or a cancel) superseded it;
    /// the result is then discarded without allocating anything.
    pub fn complete(
        &mut self,
        sequence: u64,
        result: Result<ProcessResponse, SubmitError>,
    ) -> bool {
        if sequence != self.latest || !self.outcome.is_pending() {
            warn!(
                sequence,
                latest = self.latest,
                "Discarding result of superseded submission"
            );
            return false;
        }

        let outcome = match result.and_then(|response| self.classify(response)) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(sequence, "Submission failed: {}", err);
                SubmissionOutcome::Failed(err.user_message())
            }
        };
        info!(sequence, outcome = outcome.kind(), "Submission finished");
        self.replace(outcome);
        true
    }

    /// Abandon the pending submission, if any. Its result will be discarded.
    pub fn cancel(&mut self) -> bool {
        if !self.outcome.is_pending() {
            return false;
        }
        self.latest += 1;
        info!(sequence = self.latest, "Submission cancelled");
        self.replace(SubmissionOutcome::Idle(CANCELLED_MESSAGE.to_string()));
        true
    }

    /// Drop whatever the current outcome holds, returning to the initial state.
    pub fn release(&mut self) {
        self.latest += 1;
        self.replace(SubmissionOutcome::default());
    }

    fn classify(&self, response: ProcessResponse) -> Result<SubmissionOutcome, SubmitError> {
        let structured = matches!(response, ProcessResponse::Temporal(_));
        if let Some(mode) = self.mode {
            if structured != mode.expects_structured_response() {
                return Err(SubmitError::Decode(format!(
                    "{} response for {} submission",
                    if structured { "temporal" } else { "image" },
                    mode
                )));
            }
        }
        match response {
            ProcessResponse::Temporal(TemporalResponse { results }) => {
                let items = results.unwrap_or_default();
                if items.is_empty() {
                    Ok(SubmissionOutcome::Idle(NO_IMAGES_MESSAGE.to_string()))
                } else {
                    Ok(SubmissionOutcome::TemporalResult(items))
                }
            }
            ProcessResponse::Image {
                bytes,
                content_type,
            } => self
                .allocator
                .allocate(bytes, &content_type)
                .map(SubmissionOutcome::SingleResult),
        }
    }

    fn replace(&mut self, next: SubmissionOutcome) {
        // Dropping the old outcome releases its image handle.
        let _previous = std::mem::replace(&mut self.outcome, next);
    }
}
