use serde::{Deserialize, Serialize};

use super::{CardError, ContactField, Email, Website};

/// Raw contact fields as submitted by the form or the info image query.
///
/// Every field is optional here so that a missing required field is
/// reported as a validation error naming the field, not as an extractor
/// rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactForm {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
}

/// A validated contact card. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    full_name: String,
    phone: String,
    email: Email,
    job_title: Option<String>,
    company: Option<String>,
    website: Option<Website>,
}

impl ContactForm {
    /// Validates the raw fields in form order and builds a [`ContactRecord`].
    pub fn normalize(self) -> Result<ContactRecord, CardError> {
        let full_name = required(self.full_name, ContactField::FullName)?;
        let phone = required(self.phone, ContactField::Phone)?;

        let email = required(self.email, ContactField::Email)?;
        let email = Email::try_from(email.as_str())
            .map_err(|err| CardError::validation(ContactField::Email, err.to_string()))?;

        let job_title = optional(self.job_title);
        let company = optional(self.company);

        let website = optional(self.website)
            .map(|website| Website::try_from(website.as_str()))
            .transpose()
            .map_err(|err| CardError::validation(ContactField::Website, err.to_string()))?;

        Ok(ContactRecord {
            full_name,
            phone,
            email,
            job_title,
            company,
            website,
        })
    }
}

fn required(value: Option<String>, field: ContactField) -> Result<String, CardError> {
    optional(value).ok_or_else(|| CardError::validation(field, "field is required"))
}

// Forms send blank inputs as empty strings; those count as absent.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ContactRecord {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn job_title(&self) -> Option<&str> {
        self.job_title.as_deref()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn website(&self) -> Option<&Website> {
        self.website.as_ref()
    }

    /// The present fields as `(field, value)` pairs in form order.
    pub fn present_fields(&self) -> Vec<(ContactField, &str)> {
        let mut fields = vec![
            (ContactField::FullName, self.full_name()),
            (ContactField::Phone, self.phone()),
            (ContactField::Email, self.email().as_str()),
        ];

        if let Some(job_title) = self.job_title() {
            fields.push((ContactField::JobTitle, job_title));
        }
        if let Some(company) = self.company() {
            fields.push((ContactField::Company, company));
        }
        if let Some(website) = self.website() {
            fields.push((ContactField::Website, website.as_str()));
        }

        fields
    }
}
