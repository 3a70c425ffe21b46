use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{js_sys, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RevealStyle {
    #[default]
    FadeIn,
    SlideInLeft,
    SlideInRight,
}

impl RevealStyle {
    pub fn class(&self) -> &'static str {
        match self {
            RevealStyle::FadeIn => "fade-in",
            RevealStyle::SlideInLeft => "slide-in-left",
            RevealStyle::SlideInRight => "slide-in-right",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub style: RevealStyle,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Wrapper that gets `visible` once it scrolls into view. It stays visible.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let visible = use_state(|| false);
    let node = use_node_ref();

    {
        let visible = visible.clone();
        let node = node.clone();
        use_effect_with_deps(
            move |_| {
                let mut parts = None;
                if let Some(element) = node.cast::<Element>() {
                    let on_hit = visible.clone();
                    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
                        let hit = entries.iter().any(|entry| {
                            entry
                                .dyn_into::<IntersectionObserverEntry>()
                                .map(|e| e.is_intersecting())
                                .unwrap_or(false)
                        });
                        if hit {
                            on_hit.set(true);
                        }
                    }) as Box<dyn FnMut(js_sys::Array)>);

                    let init = IntersectionObserverInit::new();
                    init.set_threshold(&JsValue::from_f64(0.1));
                    init.set_root_margin("0px 0px -50px 0px");
                    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                        Ok(observer) => {
                            observer.observe(&element);
                            parts = Some((observer, callback));
                        }
                        Err(e) => {
                            log::warn!("IntersectionObserver unavailable, showing block: {:?}", e);
                            visible.set(true);
                        }
                    }
                }
                move || {
                    if let Some((observer, _callback)) = parts {
                        observer.disconnect();
                    }
                }
            },
            (),
        );
    }

    html! {
        <div ref={node} class={classes!(props.style.class(), props.class.clone(), (*visible).then(|| "visible"))}>
            { for props.children.iter() }
        </div>
    }
}
