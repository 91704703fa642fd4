//! Collapse the shapes a model may reply with into one `LeadRecord`.
//!
//! Each canonical field owns an ordered list of key paths. Flat keys come
//! first (camelCase, then snake_case and common synonyms), followed by the
//! nested groupings models tend to invent: `contact`, `contact_details`,
//! `company`, `job`, `job_details`, `compensation`. The first path holding a
//! usable scalar wins.

use leadscout_core::LeadRecord;
use serde_json::Value;

type Path = &'static [&'static str];

#[derive(Clone, Copy)]
enum Field {
    JobTitle,
    JobDescription,
    JobDescriptionSummary,
    Company,
    ContactName,
    ContactEmail,
    ContactPhone,
    Salary,
    HoursPerWeek,
}

struct FieldRule {
    field: Field,
    paths: &'static [Path],
}

const RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::JobTitle,
        paths: &[
            &["jobTitle"],
            &["job_title"],
            &["title"],
            &["position"],
            &["job", "title"],
            &["job", "jobTitle"],
            &["job_details", "job_title"],
            &["job_details", "title"],
        ],
    },
    FieldRule {
        field: Field::JobDescription,
        paths: &[
            &["jobDescription"],
            &["job_description"],
            &["description"],
            &["job", "description"],
            &["job_details", "job_description"],
            &["job_details", "description"],
        ],
    },
    FieldRule {
        field: Field::JobDescriptionSummary,
        paths: &[
            &["jobDescriptionSummary"],
            &["job_description_summary"],
            &["summary"],
            &["job", "summary"],
            &["job_details", "job_description_summary"],
            &["job_details", "summary"],
        ],
    },
    FieldRule {
        field: Field::Company,
        paths: &[
            &["company"],
            &["companyName"],
            &["company_name"],
            &["organization"],
            &["company", "name"],
            &["company", "company_name"],
            &["contact_details", "company"],
            &["contact", "company"],
        ],
    },
    FieldRule {
        field: Field::ContactName,
        paths: &[
            &["contactName"],
            &["contact_name"],
            &["contactPerson"],
            &["contact_person"],
            &["contact"],
            &["contact", "name"],
            &["contact", "contact_person"],
            &["contact", "contactName"],
            &["contact_details", "contact_person"],
            &["contact_details", "name"],
        ],
    },
    FieldRule {
        field: Field::ContactEmail,
        paths: &[
            &["contactEmail"],
            &["contact_email"],
            &["email"],
            &["contact", "email"],
            &["contact", "contactEmail"],
            &["contact_details", "email"],
        ],
    },
    FieldRule {
        field: Field::ContactPhone,
        paths: &[
            &["contactPhone"],
            &["contact_phone"],
            &["phone"],
            &["contact", "phone"],
            &["contact", "contactPhone"],
            &["contact_details", "phone"],
        ],
    },
    FieldRule {
        field: Field::Salary,
        paths: &[
            &["salary"],
            &["compensation"],
            &["pay"],
            &["compensation", "salary"],
            &["job", "salary"],
            &["job_details", "salary"],
        ],
    },
    FieldRule {
        field: Field::HoursPerWeek,
        paths: &[
            &["hoursPerWeek"],
            &["hours_per_week"],
            &["hours"],
            &["compensation", "hours_per_week"],
            &["compensation", "hoursPerWeek"],
            &["job", "hours_per_week"],
            &["job_details", "hours_per_week"],
        ],
    },
];

/// Map a parsed payload onto the canonical record.
///
/// Never fails: values that cannot be read as text are skipped, and a
/// payload that is not an object yields an empty record.
pub fn normalize(payload: &Value) -> LeadRecord {
    let mut record = LeadRecord::default();
    if !payload.is_object() {
        return record;
    }
    for rule in RULES {
        if let Some(text) = rule.paths.iter().find_map(|path| resolve(payload, *path)) {
            assign(&mut record, rule.field, text);
        }
    }
    record
}

fn assign(record: &mut LeadRecord, field: Field, value: String) {
    let slot = match field {
        Field::JobTitle => &mut record.job_title,
        Field::JobDescription => &mut record.job_description,
        Field::JobDescriptionSummary => &mut record.job_description_summary,
        Field::Company => &mut record.company,
        Field::ContactName => &mut record.contact_name,
        Field::ContactEmail => &mut record.contact_email,
        Field::ContactPhone => &mut record.contact_phone,
        Field::Salary => &mut record.salary,
        Field::HoursPerWeek => &mut record.hours_per_week,
    };
    *slot = Some(value);
}

fn resolve(payload: &Value, path: Path) -> Option<String> {
    let mut node = payload;
    for key in path {
        node = node.as_object()?.get(*key)?;
    }
    leaf_text(node)
}

/// Text form of a leaf. Objects and nulls are not leaves.
fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => clean(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter(|v| !v.is_array() && !v.is_object())
                .filter_map(leaf_text)
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Null | Value::Object(_) => None,
    }
}

fn clean(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || is_placeholder(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Models asked for "string or null" sometimes quote the null.
///
/// Only the literal `null` is treated as absent. It is the one string value
/// that does not survive a second pass through `normalize`.
fn is_placeholder(s: &str) -> bool {
    s.eq_ignore_ascii_case("null")
}
