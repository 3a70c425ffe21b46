use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::utils;

const SHOW_AFTER_PX: f64 = 500.0;

pub fn should_show(scroll_y: f64) -> bool {
    scroll_y > SHOW_AFTER_PX
}

#[function_component(BackToTop)]
pub fn back_to_top() -> Html {
    let visible = use_state_eq(|| false);

    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let scroll_callback = {
                    let window = window.clone();
                    Closure::wrap(Box::new(move || {
                        let scroll_y = window.as_ref().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
                        visible.set(should_show(scroll_y));
                    }) as Box<dyn FnMut()>)
                };

                if let Some(window) = &window {
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    );
                }

                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let onclick = Callback::from(|_: MouseEvent| utils::smooth_scroll_to(0.0));

    html! {
        <button
            type="button"
            class={classes!("back-to-top", (*visible).then(|| "visible"))}
            aria-label="Back to top"
            {onclick}
        >
            {"↑"}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appears_only_past_threshold() {
        assert!(!should_show(0.0));
        assert!(!should_show(500.0));
        assert!(should_show(501.0));
    }
}
