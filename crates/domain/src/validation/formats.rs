//! Pure format predicates used by field kinds.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// Hyphenated 36-character UUID text; simple, braced and urn forms are rejected
pub fn is_uuid(raw: &str) -> bool {
    raw.len() == 36 && Uuid::try_parse(raw).is_ok()
}

/// Basic structural email check: one `@`, non-empty local part, dotted domain
pub fn is_email(raw: &str) -> bool {
    if raw.trim() != raw || raw.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

pub fn is_timestamp(raw: &str) -> bool {
    OffsetDateTime::parse(raw, &Rfc3339).is_ok()
}
