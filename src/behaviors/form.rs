//! Contact form gate: required-field presence and a permissive email check.

use crate::{Error, Result};

/// Named control values in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries with the same name replace earlier ones.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (name, value) in iter {
            data.insert(name, value);
        }
        data
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Required names whose trimmed value is empty or absent, in the
    /// configured order.
    MissingFields(Vec<String>),
    InvalidEmail,
}

#[derive(Debug, Clone)]
pub struct EmailPattern {
    regex: fancy_regex::Regex,
}

impl EmailPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = fancy_regex::Regex::new(pattern)
            .map_err(|err| Error::InvalidConfig(format!("email pattern {pattern:?}: {err}")))?;
        Ok(Self { regex })
    }

    /// A backtracking failure counts as no match.
    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate).unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct FormValidator {
    required: Vec<String>,
    email_field: String,
    email: EmailPattern,
}

impl FormValidator {
    pub fn new(required: Vec<String>, email_field: impl Into<String>, email: EmailPattern) -> Self {
        Self {
            required,
            email_field: email_field.into(),
            email,
        }
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn email_field(&self) -> &str {
        &self.email_field
    }

    pub fn is_filled(value: Option<&str>) -> bool {
        value.is_some_and(|value| !value.trim().is_empty())
    }

    /// Required fields are checked first; the email is only looked at once
    /// every required field is filled.
    pub fn validate(&self, data: &FormData) -> Validation {
        let missing = self
            .required
            .iter()
            .filter(|name| !Self::is_filled(data.get(name)))
            .cloned()
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Validation::MissingFields(missing);
        }

        let email = data.get(&self.email_field).unwrap_or_default();
        if !self.email.matches(email) {
            return Validation::InvalidEmail;
        }
        Validation::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageConfig;

    fn validator() -> Result<FormValidator> {
        let config = PageConfig::default();
        Ok(FormValidator::new(
            config.required_fields.clone(),
            config.email_field.clone(),
            EmailPattern::new(&config.email_pattern)?,
        ))
    }

    fn complete_form(email: &str) -> FormData {
        [
            ("playerName", "Jordan"),
            ("parentName", "Casey"),
            ("email", email),
            ("phone", "555-0100"),
            ("gradYear", "2027"),
            ("position", "PG"),
            ("state", "TX"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn email_pattern_needs_a_dot_segment() -> Result<()> {
        let pattern = EmailPattern::new(&PageConfig::default().email_pattern)?;
        assert!(!pattern.matches("foo@bar"));
        assert!(pattern.matches("a@b.co"));
        assert!(!pattern.matches("a b@c.de"));
        assert!(!pattern.matches("a@@b.co"));
        assert!(!pattern.matches(""));
        Ok(())
    }

    #[test]
    fn whitespace_only_values_count_as_missing() -> Result<()> {
        let mut data = complete_form("a@b.co");
        data.insert("phone", "   ");
        data.insert("state", "");
        assert_eq!(
            validator()?.validate(&data),
            Validation::MissingFields(vec!["phone".into(), "state".into()])
        );
        Ok(())
    }

    #[test]
    fn absent_controls_count_as_missing() -> Result<()> {
        let data: FormData = [("email", "a@b.co")].into_iter().collect();
        let Validation::MissingFields(missing) = validator()?.validate(&data) else {
            panic!("expected missing fields");
        };
        assert_eq!(missing.len(), 6);
        assert!(!missing.contains(&"email".to_string()));
        Ok(())
    }

    #[test]
    fn email_is_checked_only_after_required_fields() -> Result<()> {
        let validator = validator()?;
        assert_eq!(
            validator.validate(&complete_form("foo@bar")),
            Validation::InvalidEmail
        );
        assert_eq!(
            validator.validate(&complete_form("coach@school.edu")),
            Validation::Valid
        );
        let mut partial = complete_form("foo@bar");
        partial.insert("gradYear", "");
        assert_eq!(
            validator.validate(&partial),
            Validation::MissingFields(vec!["gradYear".into()])
        );
        Ok(())
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        assert!(matches!(
            EmailPattern::new("(unclosed"),
            Err(Error::InvalidConfig(_))
        ));
    }
}
