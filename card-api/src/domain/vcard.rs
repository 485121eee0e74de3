//! vCard 3.0 rendering of a [`ContactRecord`].

use super::ContactRecord;

/// Renders the record as a minimal vCard 3.0 document.
///
/// Line order is fixed and absent optional fields produce no line. Every
/// line, including `END:VCARD`, is terminated by `\n`.
pub fn format(record: &ContactRecord) -> String {
    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", escape_text(record.full_name())),
    ];

    if let Some(company) = record.company() {
        lines.push(format!("ORG:{}", escape_text(company)));
    }
    if let Some(job_title) = record.job_title() {
        lines.push(format!("TITLE:{}", escape_text(job_title)));
    }

    lines.push(format!("TEL;TYPE=CELL:{}", escape_text(record.phone())));
    lines.push(format!("EMAIL:{}", escape_text(record.email())));

    if let Some(website) = record.website() {
        lines.push(format!("URL:{}", escape_uri(website)));
    }

    lines.push("END:VCARD".to_string());

    let mut vcard = lines.join("\n");
    vcard.push('\n');
    vcard
}

/// Escapes a TEXT value (RFC 2426 section 5).
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ',' => escaped.push_str("\\,"),
            ';' => escaped.push_str("\\;"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

// URI values keep their punctuation; only line breaks would corrupt the record.
fn escape_uri(value: &str) -> String {
    value.replace('\r', "").replace('\n', "\\n")
}
