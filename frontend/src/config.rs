#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:8080"  // Local PHP dev server
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Same origin in production
}

/// Form id that is always submitted through fetch instead of a page load.
pub const CONTACT_FORM_ID: &str = "contact-form";

/// Endpoint path of the contact form processor.
pub const CONTACT_ENDPOINT_PATH: &str = "contact.php";

/// How long an alert banner stays up before it removes itself.
pub const ALERT_LIFETIME_MS: u32 = 5_000;

pub const WHATSAPP_NUMBER: &str = "905325858786";

pub const DEFAULT_LANGUAGE: &str = "TR";

pub const SUPPORTED_LANGUAGES: &[&str] = &["TR", "EN", "DE"];

pub fn contact_endpoint() -> String {
    let base = get_backend_url();
    if base.is_empty() {
        CONTACT_ENDPOINT_PATH.to_string()
    } else {
        format!("{}/{}", base, CONTACT_ENDPOINT_PATH)
    }
}
