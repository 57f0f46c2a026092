//! Form field validation rules.
//!
//! Every submit re-runs the full rule set on a fresh snapshot of the
//! fields; nothing from a previous pass survives.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern compiles"));

static PHONE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("separator pattern compiles"));

/// Which type-specific rule applies to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Tel,
    Other,
}

impl FieldKind {
    /// Map an element tag and its `type` attribute to a kind.
    pub fn from_element(tag: &str, type_attr: Option<&str>) -> Self {
        if !tag.eq_ignore_ascii_case("input") {
            return FieldKind::Other;
        }
        match type_attr.map(str::to_ascii_lowercase).as_deref() {
            Some("email") => FieldKind::Email,
            Some("tel") => FieldKind::Tel,
            _ => FieldKind::Other,
        }
    }
}

/// Everything validation needs to know about one field.
#[derive(Debug, Clone)]
pub struct FieldSnapshot {
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
}

impl FieldSnapshot {
    pub fn new(kind: FieldKind, required: bool, value: impl Into<String>) -> Self {
        Self {
            kind,
            required,
            value: value.into(),
        }
    }
}

/// User-facing texts for each rule.
#[derive(Debug, Clone)]
pub struct ValidationMessages {
    pub required: String,
    pub email: String,
    pub phone: String,
}

impl Default for ValidationMessages {
    fn default() -> Self {
        Self {
            required: "This field is required".to_string(),
            email: "Please enter a valid email address".to_string(),
            phone: "Please enter a valid phone number".to_string(),
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Phone check after stripping whitespace, hyphens and parentheses.
pub fn is_valid_phone(value: &str) -> bool {
    let cleaned = PHONE_SEPARATORS.replace_all(value, "");
    PHONE_PATTERN.is_match(&cleaned)
}

/// Messages produced for a single field, in rule order.
pub type FieldErrors = Vec<String>;

/// Run every rule against one field.
///
/// Rules are independent: a failing required check does not stop the
/// email or phone rule from adding its own message.
pub fn validate_field(field: &FieldSnapshot, messages: &ValidationMessages) -> FieldErrors {
    let mut errors = Vec::new();

    if field.required && field.value.trim().is_empty() {
        errors.push(messages.required.clone());
    }

    if !field.value.is_empty() {
        match field.kind {
            FieldKind::Email if !is_valid_email(&field.value) => {
                errors.push(messages.email.clone());
            }
            FieldKind::Tel if !is_valid_phone(&field.value) => {
                errors.push(messages.phone.clone());
            }
            _ => {}
        }
    }

    errors
}

/// Outcome of one validation pass over a whole form.
#[derive(Debug, Clone, Default)]
pub struct FormValidation {
    /// Errors per field, same order as the input snapshot.
    pub fields: Vec<FieldErrors>,
}

impl FormValidation {
    pub fn run(fields: &[FieldSnapshot], messages: &ValidationMessages) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|field| validate_field(field, messages))
                .collect(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(Vec::is_empty)
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().map(Vec::len).sum()
    }

    pub fn invalid_fields(&self) -> usize {
        self.fields.iter().filter(|errors| !errors.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msgs() -> ValidationMessages {
        ValidationMessages::default()
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
    }

    #[test]
    fn test_invalid_email_message() {
        let field = FieldSnapshot::new(FieldKind::Email, false, "a@b");
        assert_eq!(
            validate_field(&field, &msgs()),
            vec!["Please enter a valid email address".to_string()]
        );
    }

    #[test]
    fn test_phone_pattern_after_cleaning() {
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("+1 555 123 4567"));
        assert!(!is_valid_phone("0555123456"));
        assert!(!is_valid_phone("555-abc-4567"));
        assert!(!is_valid_phone("12345678901234567")); // 17 digits
        assert!(is_valid_phone("1234567890123456")); // 16 digits
    }

    #[test]
    fn test_required_trims_whitespace() {
        let field = FieldSnapshot::new(FieldKind::Other, true, "   ");
        assert_eq!(validate_field(&field, &msgs()), vec!["This field is required".to_string()]);
    }

    #[test]
    fn test_whitespace_email_collects_both_messages() {
        let field = FieldSnapshot::new(FieldKind::Email, true, "  ");
        let errors = validate_field(&field, &msgs());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "This field is required");
        assert_eq!(errors[1], "Please enter a valid email address");
    }

    #[test]
    fn test_empty_optional_fields_pass() {
        let fields = [
            FieldSnapshot::new(FieldKind::Email, false, ""),
            FieldSnapshot::new(FieldKind::Tel, false, ""),
        ];
        assert!(FormValidation::run(&fields, &msgs()).is_valid());
    }

    #[test]
    fn test_form_with_two_offenders() {
        let fields = [
            FieldSnapshot::new(FieldKind::Other, true, ""),
            FieldSnapshot::new(FieldKind::Email, true, "not-an-email"),
            FieldSnapshot::new(FieldKind::Other, false, "fine"),
        ];
        let result = FormValidation::run(&fields, &msgs());
        assert!(!result.is_valid());
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.invalid_fields(), 2);
        assert!(result.fields[2].is_empty());
    }

    #[test]
    fn test_field_kind_from_element() {
        assert_eq!(FieldKind::from_element("input", Some("EMAIL")), FieldKind::Email);
        assert_eq!(FieldKind::from_element("input", Some("tel")), FieldKind::Tel);
        assert_eq!(FieldKind::from_element("input", None), FieldKind::Other);
        assert_eq!(FieldKind::from_element("textarea", Some("email")), FieldKind::Other);
    }
}
