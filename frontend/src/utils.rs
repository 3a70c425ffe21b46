use log::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{js_sys, window, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::config;

/// Gap kept between the sticky header and a scrolled-to section.
const SECTION_GAP: f64 = 20.0;

pub const DEFAULT_WHATSAPP_MESSAGE: &str =
    "Hello! I would like to get information about work permits in Germany.";

pub fn section_scroll_top(section_top: f64, header_height: f64) -> f64 {
    section_top - header_height - SECTION_GAP
}

fn header_height() -> f64 {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(".site-header").ok().flatten())
        .and_then(|h| h.dyn_into::<HtmlElement>().ok())
        .map(|h| h.offset_height() as f64)
        .unwrap_or(0.0)
}

pub fn smooth_scroll_to(top: f64) {
    let Some(window) = window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Scrolls so the section sits just below the header. Returns false when
/// there is no element with that id.
pub fn scroll_to_section(section_id: &str) -> bool {
    let section = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(section_id))
        .and_then(|s| s.dyn_into::<HtmlElement>().ok());

    match section {
        Some(section) => {
            let top = section_scroll_top(section.offset_top() as f64, header_height());
            debug!("scrolling to #{} at {}", section_id, top);
            smooth_scroll_to(top);
            true
        }
        None => {
            debug!("no section #{}", section_id);
            false
        }
    }
}

/// Target id of an in-page link, or None for `#` and external hrefs.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn whatsapp_url(message: Option<&str>) -> String {
    let text = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(DEFAULT_WHATSAPP_MESSAGE);
    format!(
        "https://wa.me/{}?text={}",
        config::WHATSAPP_NUMBER,
        urlencoding::encode(text)
    )
}

pub fn open_whatsapp(message: Option<&str>) {
    let url = whatsapp_url(message);
    if let Some(window) = window() {
        if let Err(e) = window.open_with_url_and_target(&url, "_blank") {
            warn!("could not open WhatsApp: {:?}", e);
        }
    }
}

/// Forwards to `window.gtag` when the analytics snippet is on the page.
pub fn track_event(action: &str, category: &str, label: &str, value: Option<f64>) {
    let Some(window) = window() else {
        return;
    };
    let gtag = js_sys::Reflect::get(&window, &JsValue::from_str("gtag"))
        .ok()
        .and_then(|g| g.dyn_into::<js_sys::Function>().ok());
    let Some(gtag) = gtag else {
        debug!("gtag not loaded, dropping event {}", action);
        return;
    };

    let params = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&params, &"event_category".into(), &category.into());
    let _ = js_sys::Reflect::set(&params, &"event_label".into(), &label.into());
    if let Some(value) = value {
        let _ = js_sys::Reflect::set(&params, &"value".into(), &value.into());
    }
    if let Err(e) = gtag.call3(&JsValue::NULL, &"event".into(), &action.into(), &params) {
        warn!("gtag call failed: {:?}", e);
    }
}

pub fn register_service_worker() {
    let Some(window) = window() else {
        return;
    };
    let navigator = window.navigator();
    let has_sw = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false);
    if !has_sw {
        return;
    }
    let promise = navigator.service_worker().register("/sw.js");
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(registration) => info!("SW registered: {:?}", registration),
            Err(e) => warn!("SW registration failed: {:?}", e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_offset_accounts_for_header_and_gap() {
        assert_eq!(section_scroll_top(900.0, 80.0), 800.0);
        assert_eq!(section_scroll_top(50.0, 80.0), -50.0);
    }

    #[test]
    fn anchor_target_ignores_bare_hash_and_external_links() {
        assert_eq!(anchor_target("#services"), Some("services"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/about"), None);
        assert_eq!(anchor_target("https://example.com/#x"), None);
    }

    #[test]
    fn whatsapp_url_encodes_message() {
        assert_eq!(
            whatsapp_url(Some("Merhaba, iş?")),
            "https://wa.me/905325858786?text=Merhaba%2C%20i%C5%9F%3F"
        );
    }

    #[test]
    fn whatsapp_url_falls_back_to_default_message() {
        let url = whatsapp_url(None);
        assert!(url.starts_with("https://wa.me/905325858786?text=Hello%21"));
        assert_eq!(whatsapp_url(Some("  ")), url);
    }
}
