use crate::api::ProcessResponse;
use crate::error::SubmitError;
use crate::outcome::SubmissionOutcome;
use crate::params::{JobParameters, JobParametersPatch, ParameterStore};
use crate::picker::{CoordinatePicker, MapClick};
use crate::resources::ResourceAllocator;
use crate::submitter::{JobSubmitter, SubmissionTicket};

/// Single owner of the job parameters and the current outcome.
///
/// The UI holds exactly one of these; every write goes through it.
#[derive(Debug)]
pub struct JobSession<A> {
    params: ParameterStore,
    submitter: JobSubmitter<A>,
}

impl<A: ResourceAllocator> JobSession<A> {
    pub fn new(initial: JobParameters, allocator: A) -> Self {
        Self {
            params: ParameterStore::new(initial),
            submitter: JobSubmitter::new(allocator),
        }
    }

    pub fn params(&self) -> JobParameters {
        self.params.get()
    }

    pub fn outcome(&self) -> &SubmissionOutcome {
        self.submitter.outcome()
    }

    pub fn is_pending(&self) -> bool {
        self.submitter.outcome().is_pending()
    }

    pub fn edit(&mut self, patch: JobParametersPatch) {
        self.params.set(patch);
    }

    pub fn pick(&mut self, click: MapClick) {
        CoordinatePicker::apply(&mut self.params, click);
    }

    /// Snapshot the current parameters and enter `Pending`. Editing after
    /// this point does not affect the request.
    pub fn begin(&mut self) -> SubmissionTicket {
        let params = self.params.get();
        self.submitter.begin(&params)
    }

    pub fn complete(&mut self, sequence: u64, result: Result<ProcessResponse, SubmitError>) -> bool {
        self.submitter.complete(sequence, result)
    }

    pub fn cancel(&mut self) -> bool {
        self.submitter.cancel()
    }

    pub fn release(&mut self) {
        self.submitter.release();
    }
}
