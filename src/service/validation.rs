//! Request validation against per-field rules.

use crate::error::AppError;
use crate::model::{Customer, NamePrefix, NameSuffix};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
    Phone,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub max_length: Option<usize>,
    pub format: Option<Format>,
    pub allowed: Option<&'static [&'static str]>,
}

impl FieldRule {
    const fn string(name: &'static str) -> Self {
        FieldRule {
            name,
            kind: FieldKind::String,
            required: false,
            max_length: None,
            format: None,
            allowed: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    const fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    const fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }
}

pub const NAME_MAX_LENGTH: usize = 50;

pub const CUSTOMER_RULES: &[FieldRule] = &[
    FieldRule {
        name: "id",
        kind: FieldKind::Integer,
        required: false,
        max_length: None,
        format: None,
        allowed: None,
    },
    FieldRule::string("prefix").allowed(NamePrefix::ALL),
    FieldRule::string("suffix").allowed(NameSuffix::ALL),
    FieldRule::string("firstName").required().max_length(NAME_MAX_LENGTH),
    FieldRule::string("middleName").max_length(NAME_MAX_LENGTH),
    FieldRule::string("lastName").required().max_length(NAME_MAX_LENGTH),
    FieldRule::string("email").required().format(Format::Email),
    FieldRule::string("phoneNumber").required().format(Format::Phone),
];

/// A payload type that can be checked field-by-field before deserialization.
pub trait RequestModel: DeserializeOwned {
    /// Push one message per violation. `path` prefixes field names (e.g. `[2]`).
    fn validate(value: &Value, path: &str, errors: &mut Vec<String>);
}

impl RequestModel for Customer {
    fn validate(value: &Value, path: &str, errors: &mut Vec<String>) {
        RequestValidator::validate(value, CUSTOMER_RULES, path, errors);
    }
}

impl<T: RequestModel> RequestModel for Vec<T> {
    fn validate(value: &Value, path: &str, errors: &mut Vec<String>) {
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    T::validate(item, &format!("{}[{}]", path, i), errors);
                }
            }
            _ => errors.push("The request body must be a JSON array.".to_string()),
        }
    }
}

/// Validate a JSON payload and convert it into `T`. All violations are collected.
pub fn validate_model<T: RequestModel>(value: Value) -> Result<T, AppError> {
    if value.is_null() {
        return Err(AppError::Validation(vec![
            "A non-empty request body is required.".to_string(),
        ]));
    }
    let mut errors = Vec::new();
    T::validate(&value, "", &mut errors);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    serde_json::from_value(value).map_err(|e| AppError::Validation(vec![e.to_string()]))
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate one JSON object against field rules.
    pub fn validate(body: &Value, rules: &[FieldRule], path: &str, errors: &mut Vec<String>) {
        let Some(map) = body.as_object() else {
            if path.is_empty() {
                errors.push("The request body must be a JSON object.".to_string());
            } else {
                errors.push(format!("{} must be a JSON object.", path));
            }
            return;
        };
        for rule in rules {
            let label = if path.is_empty() {
                rule.name.to_string()
            } else {
                format!("{}.{}", path, rule.name)
            };
            match map.get(rule.name) {
                None | Some(Value::Null) => {
                    if rule.required {
                        errors.push(format!("The {} field is required.", label));
                    }
                }
                Some(v) => validate_field(&label, v, rule, errors),
            }
        }
    }
}

fn validate_field(label: &str, v: &Value, rule: &FieldRule, errors: &mut Vec<String>) {
    match rule.kind {
        FieldKind::Integer => {
            if v.as_i64().is_none() {
                errors.push(format!("The {} field must be an integer.", label));
            }
        }
        FieldKind::String => {
            let Some(s) = v.as_str() else {
                errors.push(format!("The {} field must be a string.", label));
                return;
            };
            if rule.required && s.trim().is_empty() {
                errors.push(format!("The {} field is required.", label));
                return;
            }
            if let Some(max) = rule.max_length {
                if s.chars().count() > max {
                    errors.push(format!(
                        "The field {} must be a string with a maximum length of '{}'.",
                        label, max
                    ));
                }
            }
            if let Some(format) = rule.format {
                validate_format(label, s, format, errors);
            }
            if let Some(allowed) = rule.allowed {
                if !allowed.contains(&s) {
                    errors.push(format!(
                        "The value '{}' is not valid for {}. Expected one of: {}.",
                        s,
                        label,
                        allowed.join(", ")
                    ));
                }
            }
        }
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern compiles"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9\s().-]*[0-9][0-9\s().-]*(\s*(?i:x|ext\.?)\s*[0-9]+)?$")
            .expect("phone pattern compiles")
    })
}

fn validate_format(label: &str, s: &str, format: Format, errors: &mut Vec<String>) {
    match format {
        Format::Email => {
            if !email_regex().is_match(s) {
                errors.push(format!("The {} field is not a valid e-mail address.", label));
            }
        }
        Format::Phone => {
            if !phone_regex().is_match(s) {
                errors.push(format!("The {} field is not a valid phone number.", label));
            }
        }
    }
}
