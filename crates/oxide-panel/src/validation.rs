//! Named field constraints.
//!
//! A [`ValidatorSet`] decides which captions carry a required marker and can
//! check a value source, producing the [`OperationResult`] the banner shows.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;

use crate::error::Result;
use crate::message::OperationResult;
use crate::value::{FieldValue, Values};

/// Name of the constraint that marks a field as required.
pub const REQUIRED: &str = "required";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Constraint name, e.g. `"required"`.
    fn name(&self) -> &str;

    /// Validates a value and returns an error message if invalid.
    ///
    /// Missing values arrive as [`FieldValue::Null`].
    fn validate(&self, value: &FieldValue) -> std::result::Result<(), String>;
}

/// Requires a non-blank value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    pub fn new() -> Self {
        Self::with_message("This field is required.")
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn name(&self) -> &str {
        REQUIRED
    }

    fn validate(&self, value: &FieldValue) -> std::result::Result<(), String> {
        if value.as_text().trim().is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Bounds the length of a text value. Blank values pass.
#[derive(Debug, Clone)]
pub struct LengthValidator {
    min: Option<usize>,
    max: Option<usize>,
}

impl LengthValidator {
    /// Requires at most `max` characters.
    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Requires at least `min` characters.
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }
}

impl Validator for LengthValidator {
    fn name(&self) -> &str {
        match (self.min, self.max) {
            (Some(_), None) => "min_length",
            _ => "max_length",
        }
    }

    fn validate(&self, value: &FieldValue) -> std::result::Result<(), String> {
        if value.is_blank() {
            return Ok(());
        }
        let len = value.as_text().chars().count();

        if let Some(min) = self.min.filter(|min| len < *min) {
            return Err(format!(
                "Ensure this value has at least {min} characters."
            ));
        }
        if let Some(max) = self.max.filter(|max| len > *max) {
            return Err(format!("Ensure this value has at most {max} characters."));
        }
        Ok(())
    }
}

/// Matches blank-or-pattern values.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    name: &'static str,
    pattern: Regex,
    message: String,
}

impl PatternValidator {
    /// Creates a validator for a custom pattern.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: "pattern",
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    /// Creates a validator for email addresses.
    pub fn email() -> Self {
        Self {
            name: "email",
            pattern: EMAIL_RE.clone(),
            message: "Enter a valid email address.".to_string(),
        }
    }
}

impl Validator for PatternValidator {
    fn name(&self) -> &str {
        self.name
    }

    fn validate(&self, value: &FieldValue) -> std::result::Result<(), String> {
        if value.is_blank() || self.pattern.is_match(&value.as_text()) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Accepts blank values or http(s) URLs.
#[derive(Debug, Clone, Default)]
pub struct UrlValidator;

impl Validator for UrlValidator {
    fn name(&self) -> &str {
        "url"
    }

    fn validate(&self, value: &FieldValue) -> std::result::Result<(), String> {
        let text = value.as_text();
        if text.is_empty() || text.starts_with("http://") || text.starts_with("https://") {
            Ok(())
        } else {
            Err("Enter a valid URL.".to_string())
        }
    }
}

/// Bounds a numeric value. Blank values pass.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    message: String,
}

impl RangeValidator {
    /// Creates a new RangeValidator with min and max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Value must be between {min} and {max}."),
            (Some(min), None) => format!("Value must be at least {min}."),
            (None, Some(max)) => format!("Value must be at most {max}."),
            (None, None) => "Invalid value.".to_string(),
        };
        Self { min, max, message }
    }
}

impl Validator for RangeValidator {
    fn name(&self) -> &str {
        "range"
    }

    fn validate(&self, value: &FieldValue) -> std::result::Result<(), String> {
        if value.is_blank() {
            return Ok(());
        }
        let num: f64 = value
            .as_text()
            .trim()
            .parse()
            .map_err(|_| "Enter a valid number.".to_string())?;

        let below = self.min.is_some_and(|min| num < min);
        let above = self.max.is_some_and(|max| num > max);
        if below || above {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Declarative form of a constraint, as written in definition files.
///
/// `"required"`, `"email"`, `"url"`, `{"max_length": 255}`,
/// `{"min_length": 3}`, `{"pattern": {"regex": "^\\d+$", "message": "..."}}`,
/// `{"range": {"min": 0, "max": 10}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Required,
    Email,
    Url,
    MaxLength(usize),
    MinLength(usize),
    Pattern { regex: String, message: String },
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
}

impl Constraint {
    /// Builds the validator for this constraint.
    pub fn build(&self) -> Result<Box<dyn Validator>> {
        Ok(match self {
            Self::Required => Box::new(RequiredValidator::new()),
            Self::Email => Box::new(PatternValidator::email()),
            Self::Url => Box::new(UrlValidator),
            Self::MaxLength(max) => Box::new(LengthValidator::max(*max)),
            Self::MinLength(min) => Box::new(LengthValidator::min(*min)),
            Self::Pattern { regex, message } => Box::new(PatternValidator::new(regex, message)?),
            Self::Range { min, max } => Box::new(RangeValidator::new(*min, *max)),
        })
    }
}

/// Constraints per field name, in declaration order.
#[derive(Default)]
pub struct ValidatorSet {
    fields: IndexMap<String, Vec<Box<dyn Validator>>>,
}

impl fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (field, validators) in &self.fields {
            let names: Vec<_> = validators.iter().map(|v| v.name()).collect();
            map.entry(field, &names);
        }
        map.finish()
    }
}

impl ValidatorSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a validator for a field.
    pub fn add(&mut self, field: impl Into<String>, validator: impl Validator + 'static) {
        self.add_boxed(field, Box::new(validator));
    }

    /// Adds a boxed validator for a field.
    pub fn add_boxed(&mut self, field: impl Into<String>, validator: Box<dyn Validator>) {
        self.fields.entry(field.into()).or_default().push(validator);
    }

    /// Builder method to add a validator.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, validator: impl Validator + 'static) -> Self {
        self.add(field, validator);
        self
    }

    /// Builder method to mark a field as required.
    #[must_use]
    pub fn require(self, field: impl Into<String>) -> Self {
        self.with(field, RequiredValidator::new())
    }

    /// Builds a set from declarative constraints.
    pub fn from_constraints(constraints: &IndexMap<String, Vec<Constraint>>) -> Result<Self> {
        let mut set = Self::new();
        for (field, list) in constraints {
            for constraint in list {
                set.add_boxed(field.clone(), constraint.build()?);
            }
        }
        Ok(set)
    }

    /// Returns whether `field` carries the constraint named `name`.
    pub fn has(&self, field: &str, name: &str) -> bool {
        self.fields
            .get(field)
            .is_some_and(|validators| validators.iter().any(|v| v.name() == name))
    }

    /// Returns whether `field` is required.
    pub fn is_required(&self, field: &str) -> bool {
        self.has(field, REQUIRED)
    }

    /// Returns whether the set holds no constraints.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks `values` against every constraint.
    ///
    /// Messages are prefixed with the field name and ordered by field
    /// declaration, then constraint declaration.
    pub fn validate(&self, values: &Values) -> OperationResult {
        let missing = FieldValue::Null;
        let errors: Vec<String> = self
            .fields
            .iter()
            .flat_map(|(field, validators)| {
                let value = values.get(field).unwrap_or(&missing);
                validators
                    .iter()
                    .filter_map(move |v| v.validate(value).err())
                    .map(move |message| format!("{field}: {message}"))
            })
            .collect();

        if errors.is_empty() {
            OperationResult::success()
        } else {
            OperationResult::Failure { errors }
        }
    }
}
