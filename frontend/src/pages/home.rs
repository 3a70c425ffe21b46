use yew::prelude::*;
use web_sys::MouseEvent;

use crate::components::modal::{Modal, ModalTrigger};
use crate::components::reveal::{Reveal, RevealStyle};
use crate::components::stat_counter::StatCounter;
use crate::components::tooltip::Tooltip;
use crate::config;
use crate::forms::contact_form::ManagedForm;
use crate::forms::quick_evaluation::QuickEvaluation;
use crate::forms::validation::{FieldKind, FormField};
use crate::pages::faq::Faq;
use crate::utils;

pub const CONSULTATION_MODAL: &str = "consultation-modal";
pub const PRIVACY_MODAL: &str = "privacy-modal";

pub fn contact_fields() -> Vec<FormField> {
    vec![
        FormField::new("name", "Full name", FieldKind::Generic).required(),
        FormField::new("email", "Email", FieldKind::Email).required(),
        FormField::new("phone", "Phone", FieldKind::Phone).required(),
        FormField::new("profession", "Profession", FieldKind::Generic),
        FormField::new("message", "Your message", FieldKind::Generic)
            .required()
            .multiline(),
    ]
}

pub fn callback_fields() -> Vec<FormField> {
    vec![
        FormField::new("name", "Full name", FieldKind::Generic).required(),
        FormField::new("phone", "Phone", FieldKind::Phone).required(),
    ]
}

const SERVICES: &[(&str, &str, &str, RevealStyle)] = &[
    (
        "Diploma recognition",
        "We prepare and file your Anerkennung application.",
        "Anerkennung: official recognition of a foreign qualification",
        RevealStyle::SlideInLeft,
    ),
    (
        "Job matching",
        "German CV, cover letter and introductions to hiring partners.",
        "Partners in IT, engineering and healthcare",
        RevealStyle::FadeIn,
    ),
    (
        "Visa application",
        "Document checklist, appointment booking and interview preparation.",
        "Blue Card, skilled worker visa or Opportunity Card",
        RevealStyle::SlideInRight,
    ),
];

const PROCESS_STEPS: &[(&str, &str)] = &[
    ("Free evaluation", "We look at your education, experience and language level."),
    ("Plan", "You get a written roadmap with timeline and costs."),
    ("Documents", "Translations, recognition and applications handled together."),
    ("Arrival", "Help with registration, bank account and housing in Germany."),
];

const STATS: &[(&str, &str)] = &[
    ("500+", "Successful placements"),
    ("%98", "Visa approval rate"),
    ("12", "Years of experience"),
];

#[function_component(Home)]
pub fn home() -> Html {
    let scroll_to_contact = Callback::from(|e: MouseEvent| {
        if utils::scroll_to_section("contact") {
            e.prevent_default();
        }
    });
    let open_whatsapp = Callback::from(|e: MouseEvent| {
        e.prevent_default();
        utils::open_whatsapp(None);
    });

    html! {
        <>
            <section id="top" class="hero">
                <div class="hero-content">
                    <Reveal>
                        <h1>{"Build your career in Germany"}</h1>
                        <p class="hero-subtitle">
                            {"From diploma recognition to your first day at work, we guide you through every step."}
                        </p>
                    </Reveal>
                    <div class="hero-cta-group">
                        <a href="#contact" class="btn btn-primary" onclick={scroll_to_contact}>{"Get in touch"}</a>
                        <ModalTrigger target={CONSULTATION_MODAL} class={classes!("btn", "btn-secondary")}>
                            {"Request a callback"}
                        </ModalTrigger>
                        <a href="#" class="btn btn-whatsapp" onclick={open_whatsapp}>{"WhatsApp"}</a>
                    </div>
                </div>
                <QuickEvaluation />
            </section>

            <section id="services" class="services">
                <h2>{"Our services"}</h2>
                <div class="service-grid">
                    { for SERVICES.iter().map(|(title, text, hint, style)| html! {
                        <Reveal style={*style} class={classes!("service-card")}>
                            <h3><Tooltip text={*hint}>{*title}</Tooltip></h3>
                            <p>{*text}</p>
                        </Reveal>
                    }) }
                </div>
            </section>

            <section id="process" class="process">
                <h2>{"How it works"}</h2>
                <ol class="process-steps">
                    { for PROCESS_STEPS.iter().enumerate().map(|(i, (title, text))| html! {
                        <li>
                            <Reveal>
                                <span class="step-number">{(i + 1).to_string()}</span>
                                <h3>{*title}</h3>
                                <p>{*text}</p>
                            </Reveal>
                        </li>
                    }) }
                </ol>
            </section>

            <section id="stats" class="stats">
                { for STATS.iter().map(|(value, label)| html! {
                    <StatCounter value={*value} label={*label} />
                }) }
            </section>

            <Faq />

            <section id="contact" class="contact">
                <h2>{"Contact us"}</h2>
                <ManagedForm
                    id={config::CONTACT_FORM_ID}
                    action={config::CONTACT_ENDPOINT_PATH}
                    fields={contact_fields()}
                    submit_label="Send message"
                />
                <p class="form-note">
                    {"By sending this form you accept our "}
                    <ModalTrigger target={PRIVACY_MODAL}>{"privacy policy"}</ModalTrigger>
                    {"."}
                </p>
            </section>

            <Modal id={CONSULTATION_MODAL} title="Request a callback">
                <p>{"Leave your number and we will call you within one business day."}</p>
                <ManagedForm
                    id="callback-form"
                    action="callback.php"
                    fields={callback_fields()}
                    submit_label="Call me back"
                />
            </Modal>

            <Modal id={PRIVACY_MODAL} title="Privacy policy">
                <p>{"We only use your details to answer your request. Nothing is shared with third parties without your consent."}</p>
            </Modal>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::validation::FormState;

    #[test]
    fn contact_form_is_sent_with_fetch() {
        let form = FormState::new(config::CONTACT_FORM_ID, config::CONTACT_ENDPOINT_PATH, contact_fields());
        assert!(form.is_async_target());
    }

    #[test]
    fn callback_form_falls_back_to_native_submit() {
        let form = FormState::new("callback-form", "callback.php", callback_fields());
        assert!(!form.is_async_target());
    }

    #[test]
    fn empty_contact_form_reports_every_required_field() {
        let mut form = FormState::new(config::CONTACT_FORM_ID, config::CONTACT_ENDPOINT_PATH, contact_fields());
        assert!(!form.validate());
        let names: Vec<_> = form.errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(names, vec!["name", "email", "phone", "message"]);
    }
}
