//! Plain-text and CSV renderings of stored leads.

use leadscout_core::{Error, Result, StoredLead};

const CSV_HEADER: [&str; 8] = [
    "Job Title",
    "Company",
    "Summary",
    "Contact Person",
    "Email",
    "Phone",
    "URL",
    "Date",
];

/// Text block for a single lead, as copied to the clipboard.
pub fn lead_text(lead: &StoredLead) -> String {
    let r = &lead.record;
    format!(
        "Job Title: {}\nCompany: {}\nJob Summary: {}\nContact Name: {}\nContact Email: {}\nContact Phone: {}\nURL: {}",
        or_na(&r.job_title),
        or_na(&r.company),
        or_na(&r.job_description_summary),
        or_na(&r.contact_name),
        or_na(&r.contact_email),
        or_na(&r.contact_phone),
        if lead.source_url.is_empty() { "N/A" } else { &lead.source_url },
    )
}

/// All leads as text blocks, each closed by `---` and separated by a blank line.
pub fn to_text(leads: &[StoredLead]) -> String {
    leads
        .iter()
        .map(|lead| format!("{}\n---", lead_text(lead)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// All leads as CSV with a header row. Every field is quoted.
pub fn to_csv(leads: &[StoredLead]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for lead in leads {
        let r = &lead.record;
        let date = lead.captured_at.format("%Y-%m-%d").to_string();
        writer
            .write_record([
                text(&r.job_title),
                text(&r.company),
                text(&r.job_description_summary),
                text(&r.contact_name),
                text(&r.contact_email),
                text(&r.contact_phone),
                lead.source_url.as_str(),
                date.as_str(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn or_na(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => "N/A",
    }
}

fn csv_error(e: csv::Error) -> Error {
    Error::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use leadscout_core::LeadRecord;

    fn sample() -> StoredLead {
        StoredLead {
            id: "lead-1".into(),
            record: LeadRecord {
                job_title: Some("Line Cook".into()),
                company: Some("Diner \"Blue\", Ltd".into()),
                job_description_summary: Some("Evenings".into()),
                contact_email: Some("jobs@diner.test".into()),
                ..Default::default()
            },
            source_url: "https://diner.test/jobs/1".into(),
            captured_at: chrono::Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_text_marks_missing_fields() {
        let text = lead_text(&sample());
        assert!(text.starts_with("Job Title: Line Cook\n"));
        assert!(text.contains("Contact Name: N/A\n"));
        assert!(text.contains("Contact Email: jobs@diner.test\n"));
        assert!(text.ends_with("URL: https://diner.test/jobs/1"));
    }

    #[test]
    fn test_text_separates_entries() {
        let text = to_text(&[sample(), sample()]);
        assert_eq!(text.matches("---").count(), 2);
        assert!(text.contains("---\n\nJob Title:"));
        assert!(text.ends_with("---"));
        assert_eq!(to_text(&[]), "");
    }

    #[test]
    fn test_csv_quotes_every_field() {
        let csv = to_csv(&[sample()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            r#""Job Title","Company","Summary","Contact Person","Email","Phone","URL","Date""#
        );
        assert_eq!(
            lines.next().unwrap(),
            r#""Line Cook","Diner ""Blue"", Ltd","Evenings","","jobs@diner.test","","https://diner.test/jobs/1","2024-03-09""#
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
