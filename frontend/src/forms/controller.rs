use crate::forms::submission::{
    submit_contact, BusyFlag, BusyGuard, ContactTransport, SubmissionOutcome,
};
use crate::forms::validation::FormState;

/// What a submit attempt turns into.
pub enum SubmitPlan {
    /// A previous submission still holds the busy state.
    Blocked,
    /// Validation failed; errors are on the form state.
    Rejected,
    /// Hand the form to the browser. The guard stays held until the page unloads.
    Native(BusyGuard),
    Async(PendingSubmission),
}

/// Values and busy guard of an accepted async submission.
pub struct PendingSubmission {
    values: Vec<(String, String)>,
    guard: BusyGuard,
}

impl PendingSubmission {
    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    pub async fn send<T: ContactTransport>(self, transport: &T, endpoint: &str) -> SubmissionOutcome {
        submit_contact(transport, endpoint, self.values, self.guard).await
    }
}

pub fn plan_submit(state: &mut FormState, busy: &BusyFlag) -> SubmitPlan {
    if busy.is_busy() {
        log::debug!("form {} already submitting", state.id);
        return SubmitPlan::Blocked;
    }
    if !state.validate() {
        return SubmitPlan::Rejected;
    }
    let Some(guard) = busy.acquire() else {
        return SubmitPlan::Blocked;
    };
    if state.is_async_target() {
        SubmitPlan::Async(PendingSubmission {
            values: state.values(),
            guard,
        })
    } else {
        log::info!("form {} submitted natively to {}", state.id, state.action);
        SubmitPlan::Native(guard)
    }
}

/// Applies a finished request to the form: values are cleared only on success.
pub fn settle(state: &mut FormState, outcome: &SubmissionOutcome) {
    if outcome.is_success() {
        state.reset();
    } else {
        log::debug!("form {} keeps its values after: {}", state.id, outcome.message());
    }
}
