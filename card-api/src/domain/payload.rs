use url::Url;

use super::{models::QrPayload, ContactRecord};

/// Path of the info image endpoint, relative to the public URL.
pub const INFO_IMAGE_PATH: &str = "info_image";

/// Builds the string the QR code encodes for `record`.
pub fn qr_payload(mode: QrPayload, record: &ContactRecord, vcard: &str, public_url: &Url) -> String {
    match mode {
        QrPayload::Vcard => vcard.to_owned(),
        QrPayload::InfoUrl => info_image_url(public_url, record).to_string(),
        QrPayload::Summary => summary(record),
    }
}

/// The callback URL that renders `record` as an info image.
///
/// Only present fields are carried as query parameters.
pub fn info_image_url(public_url: &Url, record: &ContactRecord) -> Url {
    let mut url = public_url.clone();
    url.set_query(None);
    url.set_fragment(None);

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(INFO_IMAGE_PATH);
    }

    url.query_pairs_mut().extend_pairs(
        record
            .present_fields()
            .into_iter()
            .map(|(field, value)| (<&'static str>::from(field), value)),
    );

    url
}

fn summary(record: &ContactRecord) -> String {
    let mut lines = vec![
        format!("Name: {}", record.full_name()),
        format!("Phone: {}", record.phone()),
        format!("Email: {}", record.email()),
    ];

    if let Some(job_title) = record.job_title() {
        lines.push(format!("Job: {job_title}"));
    }
    if let Some(company) = record.company() {
        lines.push(format!("Company: {company}"));
    }
    if let Some(website) = record.website() {
        lines.push(format!("Website: {website}"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        fixtures::{jane, minimal},
        ContactForm,
    };

    fn public_url() -> Url {
        Url::parse("https://cards.example").unwrap()
    }

    #[test]
    fn vcard_mode_passes_vcard_through() {
        assert_eq!(
            qr_payload(QrPayload::Vcard, &jane(), "BEGIN:VCARD", &public_url()),
            "BEGIN:VCARD"
        );
    }

    #[test]
    fn info_url_points_at_info_image() {
        let url = info_image_url(&public_url(), &minimal("Sam Roe"));

        assert_eq!(url.path(), "/info_image");
        assert_eq!(
            url.query(),
            Some("full_name=Sam+Roe&phone=%2B1-555-0199&email=someone%40example.com")
        );
    }

    #[test]
    fn info_url_keeps_public_path_prefix() {
        let base = Url::parse("https://example.org/cards/").unwrap();
        let url = info_image_url(&base, &minimal("Sam"));

        assert_eq!(url.path(), "/cards/info_image");
    }

    #[test]
    fn info_url_query_normalizes_back_to_the_record() {
        let record = jane();
        let url = info_image_url(&public_url(), &record);

        let form: ContactForm = serde_json::from_value(serde_json::Value::Object(
            url.query_pairs()
                .map(|(k, v)| (k.into_owned(), serde_json::Value::String(v.into_owned())))
                .collect(),
        ))
        .unwrap();

        assert_eq!(form.normalize().unwrap(), record);
    }

    #[test]
    fn summary_lists_present_fields_only() {
        assert_eq!(
            qr_payload(QrPayload::Summary, &minimal("Sam"), "", &public_url()),
            "Name: Sam\nPhone: +1-555-0199\nEmail: someone@example.com"
        );
        assert!(qr_payload(QrPayload::Summary, &jane(), "", &public_url())
            .ends_with("Job: Engineer\nCompany: Acme\nWebsite: https://acme.example"));
    }
}
