//! Extraction prompts.

/// Fixed system instruction for every extraction session.
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You extract job postings and recruiting contacts from web page text.

Identify:
- jobTitle: the position being advertised
- jobDescription: the full description of the role, duties and requirements
- jobDescriptionSummary: two or three sentences covering the key points
- company: the hiring company or organization
- contactName: the recruiter, HR contact or hiring manager
- contactEmail: the address for applications or questions
- contactPhone: the phone number for applications or questions
- salary: the advertised pay, including currency and period
- hoursPerWeek: the weekly working hours

Reply with exactly one JSON object of this shape:
{
  "jobTitle": "string or null",
  "jobDescription": "string or null",
  "jobDescriptionSummary": "string or null",
  "company": "string or null",
  "contactName": "string or null",
  "contactEmail": "string or null",
  "contactPhone": "string or null",
  "salary": "string or null",
  "hoursPerWeek": "string or null"
}

Use null for anything the page does not state. Every value must be a plain string, never an object or array. Keep the key names exactly as shown. Return only the JSON object with no explanation."#;

/// Build the user prompt for one page.
///
/// Selected text, when present, comes first so the model weighs it over the
/// surrounding page. Page content is passed through untouched, even if empty.
pub fn build_user_prompt(page_content: &str, selected_text: Option<&str>) -> String {
    let mut prompt = String::from("Extract job and contact information from this content:\n\n");
    if let Some(selected) = selected_text.filter(|s| !s.is_empty()) {
        prompt.push_str("Selected text: ");
        prompt.push_str(selected);
        prompt.push_str("\n\n");
    }
    prompt.push_str("Page content: ");
    prompt.push_str(page_content);
    prompt.push_str("\n\nReturn only the JSON object.");
    prompt
}
