use once_cell::sync::Lazy;
use regex::Regex;

use crate::config;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9\s\-()]{10,}$").unwrap()
});

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";

const MIN_PHONE_DIGITS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Generic,
    Email,
    Phone,
}

impl FieldKind {
    /// Value for the `type` attribute of the rendered input.
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Generic => "text",
            FieldKind::Email => "email",
            FieldKind::Phone => "tel",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub multiline: bool,
    pub value: String,
}

impl FormField {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            multiline: false,
            value: String::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// First problem with this field, if any. Optional fields always pass.
    pub fn check(&self) -> Option<&'static str> {
        if !self.required {
            return None;
        }
        if self.value.trim().is_empty() {
            return Some(REQUIRED_MESSAGE);
        }
        match self.kind {
            FieldKind::Email if !is_valid_email(&self.value) => Some(EMAIL_MESSAGE),
            FieldKind::Phone if !is_valid_phone(&self.value) => Some(PHONE_MESSAGE),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_submittable(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Optional leading `+`, then at least ten characters out of digits, spaces,
/// hyphens and parentheses, at least ten of which are digits.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
        && value.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PHONE_DIGITS
}

/// Checks every field in document order. Nothing short-circuits across fields.
pub fn validate_fields(fields: &[FormField]) -> ValidationResult {
    let errors = fields
        .iter()
        .filter_map(|field| {
            field.check().map(|message| FieldError {
                field: field.name.clone(),
                message: message.to_string(),
            })
        })
        .collect();
    ValidationResult { errors }
}

/// Transient state of one declared form.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub id: String,
    pub action: String,
    pub fields: Vec<FormField>,
    pub errors: ValidationResult,
}

impl FormState {
    pub fn new(id: &str, action: &str, fields: Vec<FormField>) -> Self {
        Self {
            id: id.to_string(),
            action: action.to_string(),
            fields,
            errors: ValidationResult::default(),
        }
    }

    pub fn set_value(&mut self, name: &str, value: String) {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => log::warn!("form {}: no field named {}", self.id, name),
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Clears previous errors, re-validates and reports whether the form can be sent.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_fields(&self.fields);
        if !self.errors.is_submittable() {
            log::info!(
                "form {} rejected with {} field error(s)",
                self.id,
                self.errors.errors().len()
            );
        }
        self.errors.is_submittable()
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.errors = ValidationResult::default();
    }

    pub fn values(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Only the contact form is sent with fetch; others use a normal page submit.
    pub fn is_async_target(&self) -> bool {
        self.id == config::CONTACT_FORM_ID || self.action.contains(config::CONTACT_ENDPOINT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_form() -> FormState {
        FormState::new(
            "contact-form",
            "contact.php",
            vec![
                FormField::new("name", "Name", FieldKind::Generic).required(),
                FormField::new("email", "Email", FieldKind::Email).required(),
                FormField::new("phone", "Phone", FieldKind::Phone).required(),
                FormField::new("company", "Company", FieldKind::Generic),
            ],
        )
    }

    #[test]
    fn accepts_well_formed_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.de"));
    }

    #[test]
    fn rejects_email_without_at_or_dot_after_at() {
        assert!(!is_valid_email("user.example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("us.er@example"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn accepts_international_phone() {
        assert!(is_valid_phone("+49 151 23456789"));
        assert!(is_valid_phone("(0532) 585-8786"));
        assert!(is_valid_phone("05325858786"));
    }

    #[test]
    fn rejects_phone_with_too_few_digits() {
        assert!(!is_valid_phone("123456789"));
        assert!(!is_valid_phone("+49 151 234"));
        assert!(!is_valid_phone("----------"));
        assert!(!is_valid_phone("(12) 34-56 78"));
    }

    #[test]
    fn rejects_phone_with_foreign_characters() {
        assert!(!is_valid_phone("0532 585 87 86 ext"));
        assert!(!is_valid_phone("++49 151 23456789"));
        assert!(!is_valid_phone("49 151 2345678+9"));
    }

    #[test]
    fn empty_required_field_is_reported_by_name() {
        let mut form = contact_form();
        form.set_value("email", "user@example.com".into());
        form.set_value("phone", "+49 151 23456789".into());
        form.set_value("name", "   ".into());

        assert!(!form.validate());
        assert_eq!(form.errors.error_for("name"), Some(REQUIRED_MESSAGE));
        assert_eq!(form.errors.errors().len(), 1);
    }

    #[test]
    fn every_invalid_field_is_reported() {
        let mut form = contact_form();
        form.set_value("email", "nope".into());
        form.set_value("phone", "123".into());

        assert!(!form.validate());
        let names: Vec<_> = form.errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(names, vec!["name", "email", "phone"]);
        assert_eq!(form.errors.error_for("email"), Some(EMAIL_MESSAGE));
        assert_eq!(form.errors.error_for("phone"), Some(PHONE_MESSAGE));
    }

    #[test]
    fn empty_email_gets_required_message_not_format_message() {
        let mut form = contact_form();
        assert!(!form.validate());
        assert_eq!(form.errors.error_for("email"), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn optional_fields_are_never_checked() {
        let field = FormField::new("website", "Website", FieldKind::Email);
        assert_eq!(field.check(), None);
    }

    #[test]
    fn revalidation_clears_previous_errors() {
        let mut form = contact_form();
        assert!(!form.validate());

        form.set_value("name", "Ayşe".into());
        form.set_value("email", "ayse@example.com".into());
        form.set_value("phone", "+90 532 585 87 86".into());
        assert!(form.validate());
        assert!(form.errors.errors().is_empty());
    }

    #[test]
    fn reset_clears_values_and_errors() {
        let mut form = contact_form();
        form.set_value("name", "Ayşe".into());
        form.validate();
        form.reset();

        assert!(form.fields.iter().all(|f| f.value.is_empty()));
        assert!(form.errors.is_submittable());
    }

    #[test]
    fn contact_form_is_detected_by_id_or_action() {
        assert!(contact_form().is_async_target());
        assert!(FormState::new("other", "/api/contact.php", vec![]).is_async_target());
        assert!(!FormState::new("callback-form", "callback.php", vec![]).is_async_target());
    }

    #[test]
    fn values_keep_document_order() {
        let mut form = contact_form();
        form.set_value("company", "ACME".into());
        let names: Vec<_> = form.values().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "email", "phone", "company"]);
        assert_eq!(form.value("company"), Some("ACME"));
    }
}
