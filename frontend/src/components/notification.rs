use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use gloo_timers::callback::Timeout;
use log::{debug, info};
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use crate::config;
use crate::forms::submission::SubmissionOutcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn class(&self) -> &'static str {
        match self {
            Severity::Success => "alert-success",
            Severity::Error => "alert-error",
            Severity::Warning => "alert-warning",
            Severity::Info => "alert-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub lifetime_ms: u32,
}

impl Notification {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::milliseconds(self.lifetime_ms as i64)
    }
}

impl From<&SubmissionOutcome> for Severity {
    fn from(outcome: &SubmissionOutcome) -> Self {
        if outcome.is_success() {
            Severity::Success
        } else {
            Severity::Error
        }
    }
}

pub enum NotificationAction {
    Show { severity: Severity, message: String },
    /// Close button.
    Dismiss(u64),
    /// Auto-dismiss timer fired.
    Expire(u64),
}

/// Holds the one banner that is currently on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationCenter {
    pub current: Option<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    fn remove(&self, id: u64, reason: &str) -> Rc<Self> {
        match &self.current {
            Some(current) if current.id == id => {
                debug!("alert {} removed ({})", id, reason);
                Rc::new(Self {
                    current: None,
                    next_id: self.next_id,
                })
            }
            // Already gone or superseded.
            _ => Rc::new(self.clone()),
        }
    }
}

impl Reducible for NotificationCenter {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            NotificationAction::Show { severity, message } => {
                info!("showing {:?} alert: {}", severity, message);
                let id = self.next_id + 1;
                Rc::new(Self {
                    current: Some(Notification {
                        id,
                        severity,
                        message,
                        created_at: Utc::now(),
                        lifetime_ms: config::ALERT_LIFETIME_MS,
                    }),
                    next_id: id,
                })
            }
            NotificationAction::Dismiss(id) => self.remove(id, "dismissed"),
            NotificationAction::Expire(id) => self.remove(id, "expired"),
        }
    }
}

/// Handle given to every component that wants to raise an alert.
#[derive(Clone, PartialEq)]
pub struct Notifier {
    pub current: Option<Notification>,
    dispatch: Callback<NotificationAction>,
}

impl Notifier {
    pub fn new(current: Option<Notification>, dispatch: Callback<NotificationAction>) -> Self {
        Self { current, dispatch }
    }

    pub fn notify(&self, severity: Severity, message: impl Into<String>) {
        self.dispatch.emit(NotificationAction::Show {
            severity,
            message: message.into(),
        });
    }

    pub fn present(&self, outcome: &SubmissionOutcome) {
        self.notify(Severity::from(outcome), outcome.message());
    }

    pub fn dismiss(&self, id: u64) {
        self.dispatch.emit(NotificationAction::Dismiss(id));
    }

    pub fn expire(&self, id: u64) {
        self.dispatch.emit(NotificationAction::Expire(id));
    }
}

fn scroll_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Renders the current alert. Meant to be the first child of `<main>`.
#[function_component(AlertBanner)]
pub fn alert_banner() -> Html {
    let notifier = use_context::<Notifier>();
    let banner_ref = use_node_ref();
    let current_id = notifier
        .as_ref()
        .and_then(|n| n.current.as_ref())
        .map(|n| n.id);

    {
        let notifier = notifier.clone();
        let banner_ref = banner_ref.clone();
        use_effect_with_deps(
            move |id: &Option<u64>| {
                let timeout = match (*id, notifier) {
                    (Some(id), Some(notifier)) => {
                        if let Some(element) = banner_ref.cast::<Element>() {
                            scroll_into_view(&element);
                        }
                        Some(Timeout::new(config::ALERT_LIFETIME_MS, move || {
                            notifier.expire(id);
                        }))
                    }
                    _ => None,
                };
                // Dropping the Timeout cancels it.
                move || drop(timeout)
            },
            current_id,
        );
    }

    let Some(notifier) = notifier else {
        return html! {};
    };
    let Some(current) = notifier.current.clone() else {
        return html! {};
    };

    let on_dismiss = {
        let notifier = notifier.clone();
        let id = current.id;
        Callback::from(move |_: MouseEvent| notifier.dismiss(id))
    };

    html! {
        <div ref={banner_ref} key={current.id.to_string()} class={classes!("alert", current.severity.class())}>
            <div class="alert-body">
                <span>{&current.message}</span>
                <button type="button" class="alert-close" onclick={on_dismiss}>{"×"}</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(center: Rc<NotificationCenter>, severity: Severity, message: &str) -> Rc<NotificationCenter> {
        center.reduce(NotificationAction::Show {
            severity,
            message: message.to_string(),
        })
    }

    fn current_id(center: &NotificationCenter) -> u64 {
        center.current.as_ref().map(|n| n.id).unwrap()
    }

    #[test]
    fn new_alert_supersedes_previous() {
        let center = show(Rc::default(), Severity::Info, "first");
        let first = current_id(&center);
        let center = show(center, Severity::Error, "second");

        let current = center.current.as_ref().unwrap();
        assert_ne!(current.id, first);
        assert_eq!(current.message, "second");
        assert_eq!(current.severity, Severity::Error);
    }

    #[test]
    fn alert_expires_after_its_lifetime() {
        let center = show(Rc::default(), Severity::Success, "sent");
        let current = center.current.clone().unwrap();
        assert_eq!(current.lifetime_ms, 5_000);
        assert_eq!(
            current.expires_at() - current.created_at,
            Duration::milliseconds(5_000)
        );

        let center = center.reduce(NotificationAction::Expire(current.id));
        assert!(center.current.is_none());
    }

    #[test]
    fn expiry_after_manual_dismiss_is_a_no_op() {
        let center = show(Rc::default(), Severity::Success, "sent");
        let id = current_id(&center);

        let center = center.reduce(NotificationAction::Dismiss(id));
        assert!(center.current.is_none());

        let center = center.reduce(NotificationAction::Expire(id));
        assert!(center.current.is_none());
    }

    #[test]
    fn stale_timer_does_not_remove_newer_alert() {
        let center = show(Rc::default(), Severity::Info, "old");
        let old = current_id(&center);
        let center = show(center, Severity::Warning, "new");

        let center = center.reduce(NotificationAction::Expire(old));
        assert_eq!(center.current.as_ref().unwrap().message, "new");
    }

    #[test]
    fn outcome_maps_to_severity() {
        assert_eq!(
            Severity::from(&SubmissionOutcome::Success("ok".into())),
            Severity::Success
        );
        assert_eq!(
            Severity::from(&SubmissionOutcome::Failure("X".into())),
            Severity::Error
        );
        assert_eq!(
            Severity::from(&SubmissionOutcome::NetworkError("down".into())),
            Severity::Error
        );
    }

    #[test]
    fn notifier_dispatches_outcome_message() {
        use std::cell::RefCell;

        let center = Rc::new(RefCell::new(Rc::new(NotificationCenter::default())));
        let notifier = Notifier::new(None, {
            let center = center.clone();
            Callback::from(move |action| {
                let next = center.borrow().clone().reduce(action);
                *center.borrow_mut() = next;
            })
        });

        notifier.present(&SubmissionOutcome::Failure("X".into()));
        let shown = center.borrow().current.clone().unwrap();
        assert_eq!(shown.message, "X");
        assert_eq!(shown.severity, Severity::Error);
    }
}
