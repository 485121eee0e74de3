use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// A validated email address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Email(String);

#[derive(Error, Debug, PartialEq)]
pub enum EmailError {
    #[error("'{0}' is not a valid email: must contain exactly one '@'")]
    InvalidFormat(String),
    #[error("'{0}' is not a valid email: missing local part")]
    MissingLocalPart(String),
    #[error("'{0}' is not a valid email: invalid domain part")]
    InvalidDomainPart(String),
    #[error("'{0}' is not a valid email: contains whitespace")]
    ContainsWhitespace(String),
}

impl TryFrom<&str> for Email {
    type Error = EmailError;

    /// Validates a string and converts it into an `Email`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace(value.to_string()));
        }

        let mut parts = value.split('@');
        let local_part = parts.next().unwrap_or_default();
        let Some(domain) = parts.next() else {
            return Err(EmailError::InvalidFormat(value.to_string()));
        };

        if parts.next().is_some() {
            return Err(EmailError::InvalidFormat(value.to_string()));
        }

        if local_part.is_empty() {
            return Err(EmailError::MissingLocalPart(value.to_string()));
        }

        if domain.is_empty()
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || domain.contains("..")
        {
            return Err(EmailError::InvalidDomainPart(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }
}

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Email {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_addresses_are_accepted() {
        for address in [
            "jane@example.com",
            "jane.doe+cards@mail.acme.example",
            "a,b@x.co",
            "o'neil;sales@acme.example",
        ] {
            assert_eq!(Email::try_from(address).map(|e| e.to_string()), Ok(address.to_string()));
        }
    }

    #[test]
    fn malformed_addresses_report_why() {
        let cases = [
            ("not-an-email", EmailError::InvalidFormat("not-an-email".into())),
            ("jane@@example.com", EmailError::InvalidFormat("jane@@example.com".into())),
            ("@example.com", EmailError::MissingLocalPart("@example.com".into())),
            ("jane@", EmailError::InvalidDomainPart("jane@".into())),
            ("jane@localhost", EmailError::InvalidDomainPart("jane@localhost".into())),
            ("jane@.example", EmailError::InvalidDomainPart("jane@.example".into())),
            ("jane@acme..example", EmailError::InvalidDomainPart("jane@acme..example".into())),
            ("jane doe@example.com", EmailError::ContainsWhitespace("jane doe@example.com".into())),
            ("jane@example.com\nURL:x", EmailError::ContainsWhitespace("jane@example.com\nURL:x".into())),
        ];

        for (input, expected) in cases {
            assert_eq!(Email::try_from(input).unwrap_err(), expected, "input {input:?}");
        }
    }
}
