use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, MouseEvent, Node};
use yew::prelude::*;

use crate::components::notification::{Notifier, Severity};
use crate::config;
use crate::utils;

const SCROLLED_AFTER_PX: f64 = 100.0;
const HIDE_AFTER_PX: f64 = 200.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderState {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Tracks scroll direction between events.
#[derive(Debug, Default)]
pub struct HeaderScroll {
    last_y: f64,
}

impl HeaderScroll {
    pub fn new(start_y: f64) -> Self {
        Self { last_y: start_y }
    }

    pub fn update(&mut self, y: f64) -> HeaderState {
        let state = HeaderState {
            scrolled: y > SCROLLED_AFTER_PX,
            hidden: y > self.last_y && y > HIDE_AFTER_PX,
        };
        self.last_y = y;
        state
    }
}

/// Info text for a language that has no content yet.
pub fn language_notice(lang: &str) -> Option<String> {
    (lang != config::DEFAULT_LANGUAGE)
        .then(|| format!("{} language support is coming soon!", lang))
}

const NAV_LINKS: &[(&str, &str)] = &[
    ("#services", "Services"),
    ("#process", "Process"),
    ("#stats", "Results"),
    ("#faq", "FAQ"),
    ("#contact", "Contact"),
];

#[function_component(SiteHeader)]
pub fn site_header() -> Html {
    let menu_open = use_state_eq(|| false);
    let header_state = use_state_eq(HeaderState::default);
    let language = use_state(|| config::DEFAULT_LANGUAGE.to_string());
    let notifier = use_context::<Notifier>();
    let nav_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    // Header shadow and hide-on-scroll-down
    {
        let header_state = header_state.clone();
        use_effect_with_deps(
            move |_| {
                let window = window();
                let start_y = window.as_ref().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
                let mut tracker = HeaderScroll::new(start_y);
                let scroll_callback = {
                    let window = window.clone();
                    Closure::wrap(Box::new(move || {
                        if let Some(y) = window.as_ref().and_then(|w| w.scroll_y().ok()) {
                            header_state.set(tracker.update(y));
                        }
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

    // Close the mobile menu on any click outside nav and toggle
    {
        let menu_open = menu_open.clone();
        let nav_ref = nav_ref.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with_deps(
            move |_| {
                let document = window().and_then(|w| w.document());
                let click_callback = Closure::wrap(Box::new(move |e: MouseEvent| {
                    let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
                    let inside = |r: &NodeRef| {
                        r.cast::<Node>()
                            .map(|n| n.contains(target.as_ref()))
                            .unwrap_or(false)
                    };
                    if !inside(&nav_ref) && !inside(&toggle_ref) {
                        menu_open.set(false);
                    }
                }) as Box<dyn FnMut(MouseEvent)>);
                if let Some(document) = &document {
                    let _ = document.add_event_listener_with_callback(
                        "click",
                        click_callback.as_ref().unchecked_ref(),
                    );
                }
                move || {
                    if let Some(document) = document {
                        let _ = document.remove_event_listener_with_callback(
                            "click",
                            click_callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    // Body class so the page behind the open menu doesn't scroll
    use_effect_with_deps(
        move |open: &bool| {
            if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
                let _ = body.class_list().toggle_with_force("menu-open", *open);
            }
            || ()
        },
        *menu_open,
    );

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let nav_click = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            menu_open.set(false);
            let href = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|a| a.get_attribute("href"));
            if let Some(id) = href.as_deref().and_then(utils::anchor_target) {
                if utils::scroll_to_section(id) {
                    e.prevent_default();
                }
            }
        })
    };

    let switch_language = |lang: &'static str| {
        let language = language.clone();
        let notifier = notifier.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            log::info!("Language changed to: {}", lang);
            language.set(lang.to_string());
            if let (Some(notice), Some(notifier)) = (language_notice(lang), &notifier) {
                notifier.notify(Severity::Info, notice);
            }
        })
    };

    let header_style = if header_state.hidden {
        "transform: translateY(-100%);"
    } else {
        "transform: translateY(0);"
    };

    html! {
        <header class={classes!("site-header", header_state.scrolled.then(|| "scrolled"))} style={header_style}>
            <div class="header-content">
                <a href="#top" class="logo" onclick={nav_click.clone()}>{"Work in Germany"}</a>

                <button
                    ref={toggle_ref}
                    class={classes!("mobile-menu-toggle", (*menu_open).then(|| "active"))}
                    onclick={toggle_menu}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>

                <nav ref={nav_ref} class={classes!("nav", (*menu_open).then(|| "active"))}>
                    { for NAV_LINKS.iter().map(|(href, label)| html! {
                        <a href={*href} class="nav-link" onclick={nav_click.clone()}>{*label}</a>
                    }) }
                </nav>

                <div class="lang-switcher">
                    { for config::SUPPORTED_LANGUAGES.iter().map(|lang| html! {
                        <button
                            class={classes!("lang-btn", (*language == *lang).then(|| "active"))}
                            onclick={switch_language(*lang)}
                        >
                            {*lang}
                        </button>
                    }) }
                </div>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_gets_scrolled_class_past_threshold() {
        let mut tracker = HeaderScroll::new(0.0);
        assert!(!tracker.update(100.0).scrolled);
        assert!(tracker.update(101.0).scrolled);
    }

    #[test]
    fn header_hides_only_when_scrolling_down_far_enough() {
        let mut tracker = HeaderScroll::new(0.0);
        assert!(!tracker.update(150.0).hidden);
        assert!(tracker.update(250.0).hidden);
        assert!(tracker.update(400.0).hidden);
        assert!(!tracker.update(380.0).hidden);
        assert!(!tracker.update(380.0).hidden);
    }

    #[test]
    fn only_non_default_languages_get_a_notice() {
        assert_eq!(language_notice("TR"), None);
        assert_eq!(
            language_notice("EN").as_deref(),
            Some("EN language support is coming soon!")
        );
    }
}
