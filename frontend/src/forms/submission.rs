use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;
use web_sys::FormData;
use yew::Callback;

pub const DEFAULT_SUCCESS_MESSAGE: &str =
    "Your message has been sent! We will get back to you within 24 hours.";
pub const DEFAULT_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Connection error. Please check your internet connection.";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ContactResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("could not build form body: {0}")]
    Body(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(String),
    Failure(String),
    NetworkError(String),
}

impl SubmissionOutcome {
    pub fn from_result(result: Result<ContactResponse, SubmitError>) -> Self {
        match result {
            Ok(response) if response.status == "success" => SubmissionOutcome::Success(
                non_empty(response.message).unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            ),
            Ok(response) => {
                log::warn!("contact endpoint answered with status {}", response.status);
                SubmissionOutcome::Failure(
                    non_empty(response.message)
                        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
                )
            }
            Err(e) => {
                log::error!("Form submission error: {}", e);
                SubmissionOutcome::NetworkError(NETWORK_ERROR_MESSAGE.to_string())
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            SubmissionOutcome::Success(m)
            | SubmissionOutcome::Failure(m)
            | SubmissionOutcome::NetworkError(m) => m,
        }
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

/// Sends form values somewhere and decodes the processor's JSON answer.
#[allow(async_fn_in_trait)]
pub trait ContactTransport {
    async fn post_form(
        &self,
        endpoint: &str,
        values: &[(String, String)],
    ) -> Result<ContactResponse, SubmitError>;
}

/// Browser transport: multipart/form-data POST through fetch.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl ContactTransport for FetchTransport {
    async fn post_form(
        &self,
        endpoint: &str,
        values: &[(String, String)],
    ) -> Result<ContactResponse, SubmitError> {
        let body = FormData::new().map_err(|e| SubmitError::Body(format!("{:?}", e)))?;
        for (name, value) in values {
            body.append_with_str(name, value)
                .map_err(|e| SubmitError::Body(format!("{:?}", e)))?;
        }

        let response = Request::post(endpoint)
            .body(body)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        gloo_console::log!("contact endpoint responded with", response.status());

        let text = response
            .text()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        serde_json::from_str::<ContactResponse>(&text).map_err(|e| SubmitError::Parse(e.to_string()))
    }
}

/// Busy state of one form's submit control.
///
/// Only one guard can exist at a time, which is what keeps a second submit
/// out while the first request is pending.
#[derive(Clone, Default)]
pub struct BusyFlag {
    busy: Rc<Cell<bool>>,
    on_change: Option<Callback<bool>>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same flag, but every change is also reported to `on_change`.
    pub fn observed(on_change: Callback<bool>) -> Self {
        Self {
            busy: Rc::default(),
            on_change: Some(on_change),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn acquire(&self) -> Option<BusyGuard> {
        if self.busy.get() {
            return None;
        }
        self.set(true);
        Some(BusyGuard { flag: self.clone() })
    }

    fn set(&self, busy: bool) {
        self.busy.set(busy);
        if let Some(on_change) = &self.on_change {
            on_change.emit(busy);
        }
    }
}

/// Releases the busy state when dropped, whichever way the request ended.
pub struct BusyGuard {
    flag: BusyFlag,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Runs one submission to completion. The guard is released after the outcome
/// has been produced and before it is returned.
pub async fn submit_contact<T: ContactTransport>(
    transport: &T,
    endpoint: &str,
    values: Vec<(String, String)>,
    guard: BusyGuard,
) -> SubmissionOutcome {
    log::info!("submitting {} field(s) to {}", values.len(), endpoint);
    let outcome = SubmissionOutcome::from_result(transport.post_form(endpoint, &values).await);
    drop(guard);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct MockTransport {
        reply: Result<ContactResponse, SubmitError>,
        calls: RefCell<Vec<Vec<(String, String)>>>,
        busy_seen: RefCell<Option<bool>>,
        flag: BusyFlag,
    }

    impl MockTransport {
        fn new(flag: &BusyFlag, reply: Result<ContactResponse, SubmitError>) -> Self {
            Self {
                reply,
                calls: RefCell::new(Vec::new()),
                busy_seen: RefCell::new(None),
                flag: flag.clone(),
            }
        }
    }

    impl ContactTransport for MockTransport {
        async fn post_form(
            &self,
            _endpoint: &str,
            values: &[(String, String)],
        ) -> Result<ContactResponse, SubmitError> {
            self.calls.borrow_mut().push(values.to_vec());
            *self.busy_seen.borrow_mut() = Some(self.flag.is_busy());
            self.reply.clone()
        }
    }

    fn response(status: &str, message: Option<&str>) -> ContactResponse {
        ContactResponse {
            status: status.to_string(),
            message: message.map(str::to_string),
        }
    }

    fn values() -> Vec<(String, String)> {
        vec![("name".to_string(), "Mehmet".to_string())]
    }

    #[test]
    fn success_uses_server_message_or_default() {
        let with_message = SubmissionOutcome::from_result(Ok(response("success", Some("Thanks"))));
        assert_eq!(with_message, SubmissionOutcome::Success("Thanks".into()));

        let without = SubmissionOutcome::from_result(Ok(response("success", None)));
        assert_eq!(without, SubmissionOutcome::Success(DEFAULT_SUCCESS_MESSAGE.into()));
    }

    #[test]
    fn non_success_status_is_a_business_failure() {
        let outcome = SubmissionOutcome::from_result(Ok(response("error", Some("X"))));
        assert_eq!(outcome, SubmissionOutcome::Failure("X".into()));

        let blank = SubmissionOutcome::from_result(Ok(response("rejected", Some("  "))));
        assert_eq!(blank, SubmissionOutcome::Failure(DEFAULT_FAILURE_MESSAGE.into()));
    }

    #[test]
    fn transport_and_parse_errors_become_network_errors() {
        for err in [
            SubmitError::Transport("offline".into()),
            SubmitError::Parse("not json".into()),
            SubmitError::Body("no FormData".into()),
        ] {
            let outcome = SubmissionOutcome::from_result(Err(err));
            assert_eq!(outcome, SubmissionOutcome::NetworkError(NETWORK_ERROR_MESSAGE.into()));
            assert!(!outcome.is_success());
        }
    }

    #[test]
    fn response_message_is_optional() {
        let parsed: ContactResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert_eq!(parsed, response("success", None));

        let parsed: ContactResponse =
            serde_json::from_str(r#"{"status":"error","message":"X"}"#).unwrap();
        assert_eq!(parsed.message.as_deref(), Some("X"));
    }

    #[test]
    fn second_acquire_fails_while_first_is_held() {
        let flag = BusyFlag::new();
        let guard = flag.acquire();
        assert!(guard.is_some());
        assert!(flag.is_busy());
        assert!(flag.acquire().is_none());

        drop(guard);
        assert!(!flag.is_busy());
        assert!(flag.acquire().is_some());
    }

    #[test]
    fn observer_sees_busy_then_released() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let flag = BusyFlag::observed({
            let seen = seen.clone();
            Callback::from(move |busy| seen.borrow_mut().push(busy))
        });

        drop(flag.acquire());
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn busy_is_held_during_request_and_released_on_every_outcome() {
        let replies = [
            Ok(response("success", None)),
            Ok(response("error", Some("X"))),
            Err(SubmitError::Transport("offline".into())),
        ];
        for reply in replies {
            let flag = BusyFlag::new();
            let transport = MockTransport::new(&flag, reply);
            let guard = flag.acquire().unwrap();

            block_on(submit_contact(&transport, "contact.php", values(), guard));

            assert_eq!(*transport.busy_seen.borrow(), Some(true));
            assert!(!flag.is_busy());
            assert_eq!(transport.calls.borrow().len(), 1);
        }
    }

    #[test]
    fn pending_submission_blocks_a_second_one() {
        let flag = BusyFlag::new();
        let transport = MockTransport::new(&flag, Ok(response("success", None)));
        let first = flag.acquire().unwrap();
        let pending = submit_contact(&transport, "contact.php", values(), first);

        assert!(flag.acquire().is_none());

        let outcome = block_on(pending);
        assert!(outcome.is_success());
        assert!(!flag.is_busy());
    }

    #[test]
    fn dropping_a_pending_submission_still_releases_busy() {
        let flag = BusyFlag::new();
        let transport = MockTransport::new(&flag, Ok(response("success", None)));
        let pending = submit_contact(&transport, "contact.php", values(), flag.acquire().unwrap());
        drop(pending);
        assert!(!flag.is_busy());
    }
}
