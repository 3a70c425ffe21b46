use yew::prelude::*;

/// Index left open after clicking `clicked`. Only one item is ever open.
pub fn toggle_open(current: Option<usize>, clicked: usize) -> Option<usize> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    question: AttrValue,
    open: bool,
    on_toggle: Callback<()>,
    children: Children,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_toggle.emit(());
        })
    };

    html! {
        <div class={classes!("faq-item", props.open.then(|| "open"))}>
            <button class="faq-question" onclick={toggle}>
                <span class="question-text">{&props.question}</span>
                <span class="toggle-icon">{if props.open { "−" } else { "+" }}</span>
            </button>
            if props.open {
                <div class="faq-answer">
                    { for props.children.iter() }
                </div>
            }
        </div>
    }
}

const QUESTIONS: &[(&str, &str)] = &[
    (
        "Who can apply for a German work permit?",
        "Skilled workers with a recognised vocational or university degree, and since the \
         Opportunity Card also applicants who reach enough points through language, age and \
         experience.",
    ),
    (
        "How long does the process take?",
        "Recognition of your diploma usually takes two to four months. The visa appointment and \
         decision add another one to three months depending on the consulate.",
    ),
    (
        "Do I need to speak German?",
        "For regulated professions such as nursing, B1-B2 is required. IT specialists can often \
         start with English, but basic German helps a lot with the visa and daily life.",
    ),
    (
        "Do you help with finding an employer?",
        "Yes. We prepare your CV in the German format and introduce you to partner companies \
         that are actively hiring from abroad.",
    ),
    (
        "What does the consultation cost?",
        "The first evaluation call is free. You only pay once we agree on a plan together.",
    ),
];

#[function_component(Faq)]
pub fn faq() -> Html {
    let open = use_state_eq(|| None::<usize>);

    html! {
        <section id="faq" class="faq-section">
            <h2>{"Frequently Asked Questions"}</h2>
            { for QUESTIONS.iter().enumerate().map(|(index, (question, answer))| {
                let on_toggle = {
                    let open = open.clone();
                    Callback::from(move |_: ()| open.set(toggle_open(*open, index)))
                };
                html! {
                    <FaqItem
                        question={*question}
                        open={*open == Some(index)}
                        {on_toggle}
                    >
                        <p>{*answer}</p>
                    </FaqItem>
                }
            }) }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_an_item_closes_the_other() {
        let open = toggle_open(None, 0);
        assert_eq!(open, Some(0));
        assert_eq!(toggle_open(open, 2), Some(2));
    }

    #[test]
    fn clicking_the_open_item_closes_it() {
        assert_eq!(toggle_open(Some(1), 1), None);
    }
}
