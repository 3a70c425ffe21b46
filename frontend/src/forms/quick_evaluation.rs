use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::notification::{Notifier, Severity};
use crate::utils;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";

const EDUCATION_OPTIONS: &[(&str, &str)] = &[
    ("high-school", "High school"),
    ("vocational", "Vocational training"),
    ("bachelor", "Bachelor's degree"),
    ("master", "Master's degree"),
    ("doctorate", "Doctorate"),
];

const PROFESSION_OPTIONS: &[(&str, &str)] = &[
    ("it", "IT / Software"),
    ("engineering", "Engineering"),
    ("health", "Healthcare"),
    ("trades", "Skilled trades"),
    ("other", "Other"),
];

const GERMAN_OPTIONS: &[(&str, &str)] = &[
    ("none", "None"),
    ("a1-a2", "A1-A2"),
    ("b1-b2", "B1-B2"),
    ("c1-c2", "C1-C2"),
];

/// Selected values, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvaluationInput {
    pub education: String,
    pub profession: String,
    pub german: String,
}

impl EvaluationInput {
    pub fn set(&mut self, field: &str, value: String) {
        match field {
            "education" => self.education = value,
            "profession" => self.profession = value,
            "german" => self.german = value,
            other => log::warn!("quick evaluation has no field {}", other),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.education.is_empty() && !self.profession.is_empty() && !self.german.is_empty()
    }
}

pub fn education_points(value: &str) -> u32 {
    match value {
        "master" | "doctorate" => 30,
        "bachelor" => 20,
        _ => 10,
    }
}

pub fn profession_points(value: &str) -> u32 {
    match value {
        "it" => 30,
        "engineering" | "health" => 25,
        _ => 15,
    }
}

pub fn german_points(value: &str) -> u32 {
    match value {
        "c1-c2" => 40,
        "b1-b2" => 30,
        "a1-a2" => 15,
        _ => 5,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    Incomplete,
    Scored { score: u32, message: String },
}

pub fn evaluate(input: &EvaluationInput) -> Evaluation {
    if !input.is_complete() {
        return Evaluation::Incomplete;
    }
    let score = education_points(&input.education)
        + profession_points(&input.profession)
        + german_points(&input.german);

    let message = match score {
        s if s >= 80 => format!(
            "🎉 Excellent! Your profile score: {}/100. Your chances of finding a job in Germany are very high. Let's get started!",
            score
        ),
        s if s >= 60 => format!(
            "✅ Very good! Your profile score: {}/100. You need the right strategy. Let us help you.",
            score
        ),
        s if s >= 40 => format!(
            "💪 There is hope! Your profile score: {}/100. With some improvements you can succeed.",
            score
        ),
        _ => format!(
            "🔄 Your profile score: {}/100. We recommend improving your language skills and qualifications. Let's make a plan together.",
            score
        ),
    };
    Evaluation::Scored { score, message }
}

fn select(
    name: &'static str,
    label: &'static str,
    options: &'static [(&'static str, &'static str)],
    onchange: Callback<Event>,
) -> Html {
    html! {
        <div class="form-group">
            <label for={format!("quick-{}", name)}>{label}</label>
            <select id={format!("quick-{}", name)} {name} {onchange}>
                <option value="" selected=true>{"Select..."}</option>
                { for options.iter().map(|(value, text)| html! {
                    <option value={*value}>{*text}</option>
                }) }
            </select>
        </div>
    }
}

#[function_component(QuickEvaluation)]
pub fn quick_evaluation() -> Html {
    let input = use_state(EvaluationInput::default);
    let notifier = use_context::<Notifier>();

    let on_select = |field: &'static str| {
        let input = input.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*input).clone();
            next.set(field, select.value());
            input.set(next);
        })
    };

    let on_evaluate = {
        let input = input.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let Some(notifier) = &notifier else {
                log::warn!("quick evaluation rendered without a notifier");
                return;
            };
            match evaluate(&input) {
                Evaluation::Incomplete => notifier.notify(Severity::Warning, MISSING_FIELDS_MESSAGE),
                Evaluation::Scored { score, message } => {
                    notifier.notify(Severity::Success, message);
                    utils::track_event("quick_evaluation", "engagement", "hero_form", Some(score as f64));
                }
            }
        })
    };

    html! {
        <div class="quick-evaluation">
            <h3>{"Free quick evaluation"}</h3>
            { select("education", "Education", EDUCATION_OPTIONS, on_select("education")) }
            { select("profession", "Profession", PROFESSION_OPTIONS, on_select("profession")) }
            { select("german", "German level", GERMAN_OPTIONS, on_select("german")) }
            <button type="button" class="btn btn-primary" onclick={on_evaluate}>
                {"Evaluate my chances"}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(education: &str, profession: &str, german: &str) -> EvaluationInput {
        EvaluationInput {
            education: education.into(),
            profession: profession.into(),
            german: german.into(),
        }
    }

    fn score(input: &EvaluationInput) -> u32 {
        match evaluate(input) {
            Evaluation::Scored { score, .. } => score,
            Evaluation::Incomplete => panic!("expected a score"),
        }
    }

    #[test]
    fn missing_any_field_is_incomplete() {
        assert_eq!(evaluate(&input("", "it", "c1-c2")), Evaluation::Incomplete);
        assert_eq!(evaluate(&input("master", "", "c1-c2")), Evaluation::Incomplete);
        assert_eq!(evaluate(&input("master", "it", "")), Evaluation::Incomplete);
    }

    #[test]
    fn best_profile_scores_one_hundred() {
        assert_eq!(score(&input("doctorate", "it", "c1-c2")), 100);
    }

    #[test]
    fn weakest_profile_scores_thirty() {
        assert_eq!(score(&input("high-school", "other", "none")), 30);
    }

    #[test]
    fn message_band_follows_score() {
        let Evaluation::Scored { message, .. } = evaluate(&input("bachelor", "health", "b1-b2")) else {
            panic!("expected a score");
        };
        // 20 + 25 + 30
        assert!(message.contains("75/100"));
        assert!(message.starts_with("✅"));

        let Evaluation::Scored { message, .. } = evaluate(&input("vocational", "trades", "a1-a2")) else {
            panic!("expected a score");
        };
        // 10 + 15 + 15
        assert!(message.contains("40/100"));
        assert!(message.starts_with("💪"));
    }

    #[test]
    fn fields_are_keyed_by_name_not_position() {
        let mut state = EvaluationInput::default();
        state.set("german", "c1-c2".into());
        state.set("education", "master".into());
        state.set("profession", "it".into());
        assert_eq!(state, input("master", "it", "c1-c2"));
        assert_eq!(score(&state), 100);
    }
}
