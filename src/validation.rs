//! Declarative field rules checked before any handler logic runs.
//!
//! Each endpoint owns a fixed rule set. Every check of every rule is run
//! (trim, then required, then format/length) and all failing messages are
//! collected, so a caller sees the complete list in one response.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::error::AppError;

/// Raw submitted fields, keyed by field name.
pub type FormFields = HashMap<String, String>;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Email,
    Phone,
}

impl Format {
    fn matches(self, value: &str) -> bool {
        match self {
            Format::Email => {
                value.validate_email()
                    && value
                        .rsplit_once('@')
                        .is_some_and(|(_, domain)| domain.contains('.'))
            }
            Format::Phone => PHONE_RE.is_match(value),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    required: Option<&'static str>,
    format: Option<(Format, &'static str)>,
    max_chars: Option<(usize, &'static str)>,
    lowercase: bool,
}

impl FieldRule {
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            required: Some(message),
            format: None,
            max_chars: None,
            lowercase: false,
        }
    }

    /// Checked only when the field was submitted at all.
    pub const fn optional(field: &'static str) -> Self {
        Self {
            field,
            required: None,
            format: None,
            max_chars: None,
            lowercase: false,
        }
    }

    pub const fn format(mut self, format: Format, message: &'static str) -> Self {
        self.format = Some((format, message));
        self
    }

    pub const fn max_chars(mut self, max: usize, message: &'static str) -> Self {
        self.max_chars = Some((max, message));
        self
    }

    pub const fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }
}

pub const CONTACT_RULES: &[FieldRule] = &[
    FieldRule::required("fullName", "Full name is required")
        .max_chars(100, "Full name cannot exceed 100 characters"),
    FieldRule::required("email", "Email is required")
        .format(Format::Email, "Please provide a valid email address")
        .lowercase(),
    FieldRule::required("mobileNumber", "Mobile number is required")
        .format(Format::Phone, "Please provide a valid mobile number"),
    FieldRule::required("city", "City is required")
        .max_chars(100, "City name cannot exceed 100 characters"),
];

pub const NEWSLETTER_RULES: &[FieldRule] = &[FieldRule::required("email", "Email is required")
    .format(Format::Email, "Please provide a valid email address")
    .lowercase()];

pub const PROJECT_RULES: &[FieldRule] = &[
    FieldRule::required("name", "Project name is required")
        .max_chars(200, "Project name cannot exceed 200 characters"),
    FieldRule::required("description", "Project description is required")
        .max_chars(1000, "Project description cannot exceed 1000 characters"),
    FieldRule::optional("location").max_chars(200, "Location cannot exceed 200 characters"),
];

pub const CLIENT_RULES: &[FieldRule] = &[
    FieldRule::required("name", "Client name is required")
        .max_chars(100, "Client name cannot exceed 100 characters"),
    FieldRule::required("description", "Client description is required")
        .max_chars(500, "Client description cannot exceed 500 characters"),
    FieldRule::required("designation", "Client designation is required")
        .max_chars(100, "Client designation cannot exceed 100 characters"),
];

/// Normalized values of the declared fields that were submitted.
#[derive(Debug, Default, Clone)]
pub struct Validated {
    values: HashMap<&'static str, String>,
}

impl Validated {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Remove a field; `None` means it was never submitted.
    pub fn take(&mut self, field: &str) -> Option<String> {
        self.values.remove(field)
    }

    /// Remove a field guarded by a `required` rule.
    pub fn take_required(&mut self, field: &str) -> String {
        self.values.remove(field).unwrap_or_default()
    }
}

/// Run `rules` against the submitted fields.
pub fn validate(rules: &[FieldRule], fields: &FormFields) -> Result<Validated, AppError> {
    let mut errors = Vec::new();
    let mut validated = Validated::default();

    for rule in rules {
        let submitted = fields.get(rule.field);
        if submitted.is_none() && rule.required.is_none() {
            continue;
        }

        let mut value = submitted.map(|raw| raw.trim().to_string()).unwrap_or_default();
        if rule.lowercase {
            value = value.to_lowercase();
        }

        if let Some(message) = rule.required {
            if value.is_empty() {
                errors.push(message.to_string());
            }
        }
        if let Some((format, message)) = rule.format {
            if !format.matches(&value) {
                errors.push(message.to_string());
            }
        }
        if let Some((max, message)) = rule.max_chars {
            if value.chars().count() > max {
                errors.push(message.to_string());
            }
        }

        if submitted.is_some() {
            validated.values.insert(rule.field, value);
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(AppError::ValidationFailed(errors))
    }
}

/// Flatten a JSON object into form fields. Scalars are stringified; `null`,
/// arrays and nested objects are treated as not submitted.
pub fn fields_from_json(body: serde_json::Map<String, serde_json::Value>) -> FormFields {
    body.into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn errors_of(result: Result<Validated, AppError>) -> Vec<String> {
        match result {
            Err(AppError::ValidationFailed(errors)) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn valid_contact_is_trimmed_and_lowercased() {
        let mut validated = validate(
            CONTACT_RULES,
            &fields(&[
                ("fullName", "  Ada Lovelace "),
                ("email", " Ada@Example.COM "),
                ("mobileNumber", "+44 (0)20 7946-0958"),
                ("city", "London"),
            ]),
        )
        .unwrap();

        assert_eq!(validated.take_required("fullName"), "Ada Lovelace");
        assert_eq!(validated.take_required("email"), "ada@example.com");
        assert_eq!(validated.get("mobileNumber"), Some("+44 (0)20 7946-0958"));
    }

    #[test]
    fn empty_contact_reports_every_failing_check() {
        let errors = errors_of(validate(
            CONTACT_RULES,
            &fields(&[("fullName", ""), ("email", "x"), ("mobileNumber", "1"), ("city", "")]),
        ));

        assert_eq!(
            errors,
            vec![
                "Full name is required",
                "Please provide a valid email address",
                "City is required",
            ]
        );
    }

    #[test]
    fn missing_email_fails_both_required_and_format() {
        let errors = errors_of(validate(NEWSLETTER_RULES, &fields(&[])));
        assert_eq!(
            errors,
            vec!["Email is required", "Please provide a valid email address"]
        );
    }

    #[test]
    fn email_needs_a_dotted_domain() {
        assert!(!Format::Email.matches("a@b"));
        assert!(!Format::Email.matches("not-an-email"));
        assert!(Format::Email.matches("a@b.com"));
    }

    #[test]
    fn phone_rejects_letters() {
        assert!(Format::Phone.matches("(555) 123-4567"));
        assert!(!Format::Phone.matches("555-CALL-NOW"));
        assert!(!Format::Phone.matches(""));
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        let name = "é".repeat(100);
        assert!(validate(
            CLIENT_RULES,
            &fields(&[("name", &name), ("description", "d"), ("designation", "CTO")]),
        )
        .is_ok());

        let errors = errors_of(validate(
            CLIENT_RULES,
            &fields(&[("name", &"x".repeat(101)), ("description", "d"), ("designation", "CTO")]),
        ));
        assert_eq!(errors, vec!["Client name cannot exceed 100 characters"]);
    }

    #[test]
    fn optional_location_is_kept_only_when_submitted() {
        let base = [("name", "Harbour"), ("description", "Pier rebuild")];

        let validated = validate(PROJECT_RULES, &fields(&base)).unwrap();
        assert_eq!(validated.get("location"), None);

        let mut with_empty = fields(&base);
        with_empty.insert("location".into(), "   ".into());
        let validated = validate(PROJECT_RULES, &with_empty).unwrap();
        assert_eq!(validated.get("location"), Some(""));

        let mut too_long = fields(&base);
        too_long.insert("location".into(), "x".repeat(201));
        assert_eq!(
            errors_of(validate(PROJECT_RULES, &too_long)),
            vec!["Location cannot exceed 200 characters"]
        );
    }

    #[test]
    fn json_scalars_become_strings() {
        let body = serde_json::json!({
            "mobileNumber": 5551234,
            "email": "a@b.com",
            "city": null,
            "tags": ["x"],
        });
        let serde_json::Value::Object(map) = body else {
            unreachable!()
        };

        let fields = fields_from_json(map);
        assert_eq!(fields.get("mobileNumber").map(String::as_str), Some("5551234"));
        assert_eq!(fields.get("email").map(String::as_str), Some("a@b.com"));
        assert!(!fields.contains_key("city"));
        assert!(!fields.contains_key("tags"));
    }
}
