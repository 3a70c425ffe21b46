use web_sys::{HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, SubmitEvent};
use yew::prelude::*;

use crate::components::notification::Notifier;
use crate::config;
use crate::forms::controller::{plan_submit, settle, SubmitPlan};
use crate::forms::submission::{BusyFlag, BusyGuard, FetchTransport, SubmissionOutcome};
use crate::forms::validation::{FormField, FormState};

#[derive(Properties, PartialEq)]
pub struct ManagedFormProps {
    pub id: AttrValue,
    pub action: AttrValue,
    pub fields: Vec<FormField>,
    #[prop_or(AttrValue::Static("Send"))]
    pub submit_label: AttrValue,
}

pub enum ManagedFormMsg {
    SetField(String, String),
    Submit,
    BusyChanged(bool),
    Settled(SubmissionOutcome),
    NotifierChanged(Notifier),
}

/// A declared page form: validates on submit, then either hands over to the
/// browser or, for the contact form, posts through fetch.
pub struct ManagedForm {
    state: FormState,
    busy: BusyFlag,
    form_ref: NodeRef,
    /// Held after a native submit until the page navigates away.
    _native_guard: Option<BusyGuard>,
    notifier: Option<Notifier>,
    _notifier_handle: Option<ContextHandle<Notifier>>,
}

impl Component for ManagedForm {
    type Message = ManagedFormMsg;
    type Properties = ManagedFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let (notifier, handle) = match ctx
            .link()
            .context::<Notifier>(ctx.link().callback(ManagedFormMsg::NotifierChanged))
        {
            Some((notifier, handle)) => (Some(notifier), Some(handle)),
            None => {
                log::warn!("form {} has no notifier; outcomes will only be logged", props.id);
                (None, None)
            }
        };

        Self {
            state: FormState::new(&props.id, &props.action, props.fields.clone()),
            busy: BusyFlag::observed(ctx.link().callback(ManagedFormMsg::BusyChanged)),
            form_ref: NodeRef::default(),
            _native_guard: None,
            notifier,
            _notifier_handle: handle,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ManagedFormMsg::SetField(name, value) => {
                self.state.set_value(&name, value);
                true
            }
            ManagedFormMsg::Submit => match plan_submit(&mut self.state, &self.busy) {
                SubmitPlan::Blocked => false,
                SubmitPlan::Rejected => true,
                SubmitPlan::Native(guard) => {
                    let Some(form) = self.form_ref.cast::<HtmlFormElement>() else {
                        log::warn!("form {} is not mounted", self.state.id);
                        return true;
                    };
                    match form.submit() {
                        Ok(()) => self._native_guard = Some(guard),
                        Err(e) => log::error!("native submit of {} failed: {:?}", self.state.id, e),
                    }
                    true
                }
                SubmitPlan::Async(pending) => {
                    ctx.link().send_future(async move {
                        let outcome = pending.send(&FetchTransport, &config::contact_endpoint()).await;
                        ManagedFormMsg::Settled(outcome)
                    });
                    true
                }
            },
            ManagedFormMsg::BusyChanged(_) => true,
            ManagedFormMsg::Settled(outcome) => {
                settle(&mut self.state, &outcome);
                match &self.notifier {
                    Some(notifier) => notifier.present(&outcome),
                    None => log::info!("form {}: {}", self.state.id, outcome.message()),
                }
                true
            }
            ManagedFormMsg::NotifierChanged(notifier) => {
                self.notifier = Some(notifier);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let busy = self.busy.is_busy();
        // The browser never submits on its own; a native post goes through
        // `HtmlFormElement::submit` once validation passed.
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ManagedFormMsg::Submit
        });

        html! {
            <form
                ref={self.form_ref.clone()}
                id={self.state.id.clone()}
                action={self.state.action.clone()}
                method="post"
                class={classes!("site-form", busy.then(|| "loading"))}
                novalidate=true
                {onsubmit}
            >
                { for self.state.fields.iter().map(|field| self.render_field(ctx, field)) }
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    if busy {
                        {"⏳ Sending..."}
                    } else {
                        {&ctx.props().submit_label}
                    }
                </button>
            </form>
        }
    }
}

impl ManagedForm {
    fn render_field(&self, ctx: &Context<Self>, field: &FormField) -> Html {
        let error = self.state.errors.error_for(&field.name);
        let name = field.name.clone();
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let value = match e.target_dyn_into::<HtmlTextAreaElement>() {
                Some(area) => area.value(),
                None => e.target_unchecked_into::<HtmlInputElement>().value(),
            };
            ManagedFormMsg::SetField(name.clone(), value)
        });
        let input_id = format!("{}-{}", self.state.id, field.name);

        html! {
            <div class="form-group">
                <label for={input_id.clone()}>
                    {&field.label}
                    if field.required { <span class="required">{" *"}</span> }
                </label>
                if field.multiline {
                    <textarea
                        id={input_id}
                        name={field.name.clone()}
                        class={classes!(error.is_some().then(|| "invalid"))}
                        value={field.value.clone()}
                        required={field.required}
                        {oninput}
                    />
                } else {
                    <input
                        id={input_id}
                        type={field.kind.input_type()}
                        name={field.name.clone()}
                        class={classes!(error.is_some().then(|| "invalid"))}
                        value={field.value.clone()}
                        required={field.required}
                        {oninput}
                    />
                }
                if let Some(message) = error {
                    <div class="form-error">{message}</div>
                }
            </div>
        }
    }
}
