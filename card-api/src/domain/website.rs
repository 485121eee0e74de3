use std::fmt;
use std::ops::Deref;
use thiserror::Error;
use url::Url;

/// An absolute http(s) URL, kept exactly as it was submitted.
///
/// `Url` normalizes its input (a bare host gains a trailing `/`), so only
/// the parse result is used for validation and the submitted text is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Website(String);

#[derive(Error, Debug, PartialEq)]
pub enum WebsiteError {
    #[error("'{0}' is not a valid URL")]
    Unparseable(String),
    #[error("'{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("'{0}' has no host")]
    MissingHost(String),
}

impl TryFrom<&str> for Website {
    type Error = WebsiteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let url = Url::parse(value).map_err(|_| WebsiteError::Unparseable(value.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(WebsiteError::UnsupportedScheme(value.to_string()));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(WebsiteError::MissingHost(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }
}

impl Website {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Website {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Website {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Website {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
