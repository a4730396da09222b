//! Placeholder extraction and variable substitution for message templates

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::types::{MessageTemplate, ProcessedTemplate, TemplatePreview};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{([^}]+)\}\}").unwrap();
}

/// Distinct `{{name}}` placeholders in `content`, in first-occurrence order.
pub fn extract_variables(content: &str) -> Vec<String> {
    let mut variables: Vec<String> = Vec::new();

    for caps in PLACEHOLDER.captures_iter(content) {
        let name = &caps[1];
        if !variables.iter().any(|v| v == name) {
            variables.push(name.to_string());
        }
    }

    variables
}

/// Substitute `variables` into the template's placeholders.
///
/// Placeholders whose name is not a key of `variables` stay in the output
/// verbatim. Substitution is a single pass, so a value that itself looks like
/// a placeholder is not expanded again.
pub fn process_template(template: &MessageTemplate, variables: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(&template.content, |caps: &Captures| {
            let name = &caps[1];
            match variables.get(name) {
                Some(value) if template.variables.iter().any(|v| v == name) => value.clone(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Template variables that are not keys of `variables`, in template order.
pub fn missing_variables(
    template: &MessageTemplate,
    variables: &HashMap<String, String>,
) -> Vec<String> {
    template
        .variables
        .iter()
        .filter(|name| !variables.contains_key(name.as_str()))
        .cloned()
        .collect()
}

/// Substitute variables and report which ones were not supplied.
pub fn render(template: &MessageTemplate, variables: &HashMap<String, String>) -> ProcessedTemplate {
    let missing = missing_variables(template, variables);

    ProcessedTemplate {
        processed: process_template(template, variables),
        original: template.content.clone(),
        variables: template.variables.clone(),
        all_variables_provided: missing.is_empty(),
        missing_variables: missing,
    }
}

/// Plausible sample values for a template's variables, used for previews.
pub fn sample_variables(template: &MessageTemplate, now: DateTime<Utc>) -> HashMap<String, String> {
    template
        .variables
        .iter()
        .map(|name| (name.clone(), sample_value(name, now)))
        .collect()
}

fn sample_value(name: &str, now: DateTime<Utc>) -> String {
    match name.to_lowercase().as_str() {
        "name" => "John Doe".to_string(),
        "company" => "Acme Corp".to_string(),
        "date" => now.format("%m/%d/%Y").to_string(),
        "time" => now.format("%-I:%M:%S %p").to_string(),
        "amount" => "$99.99".to_string(),
        "address" => "123 Main St, City, State".to_string(),
        "phone" => "+1 (555) 123-4567".to_string(),
        "email" => "john.doe@example.com".to_string(),
        "ordernumber" | "order_number" => "#12345".to_string(),
        "ticketid" | "ticket_id" => "TICKET-001".to_string(),
        "deliverydate" | "delivery_date" => (now + Duration::days(3)).format("%m/%d/%Y").to_string(),
        "timeframe" => "24 hours".to_string(),
        _ => format!("[{}]", name),
    }
}

/// Render the template with sample values.
pub fn preview(template: &MessageTemplate, now: DateTime<Utc>) -> TemplatePreview {
    let samples = sample_variables(template, now);

    TemplatePreview {
        content: template.content.clone(),
        preview: process_template(template, &samples),
        variables: template.variables.clone(),
        has_variables: !template.variables.is_empty(),
        sample_variables: samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn template(content: &str) -> MessageTemplate {
        MessageTemplate {
            id: "t-1".to_string(),
            name: "Test".to_string(),
            category: "Test".to_string(),
            content: content.to_string(),
            variables: extract_variables(content),
            usage: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_first_occurrence_order() {
        let variables = extract_variables("{{b}} and {{a}}, then {{b}} again and {{a}}");
        assert_eq!(variables, vec!["b", "a"]);
    }

    #[test]
    fn test_extract_none() {
        assert!(extract_variables("Plain text with { braces }").is_empty());
        assert!(extract_variables("{{}} is not a placeholder").is_empty());
    }

    #[test]
    fn test_process_simple() {
        let t = template("Hi {{name}}");
        assert_eq!(process_template(&t, &vars(&[("name", "Ann")])), "Hi Ann");
    }

    #[test]
    fn test_process_replaces_every_occurrence() {
        let t = template("{{name}}, {{name}}!");
        assert_eq!(process_template(&t, &vars(&[("name", "Bo")])), "Bo, Bo!");
    }

    #[test]
    fn test_process_without_placeholders_is_identity() {
        let t = template("Nothing to fill in here.");
        assert_eq!(process_template(&t, &HashMap::new()), t.content);
    }

    #[test]
    fn test_process_leaves_missing_placeholders() {
        let t = template("Hello {{name}}, welcome to {{company}}");
        let result = process_template(&t, &vars(&[("name", "Ann")]));
        assert_eq!(result, "Hello Ann, welcome to {{company}}");
    }

    #[test]
    fn test_process_empty_value_is_substituted() {
        let t = template("[{{note}}]");
        assert_eq!(process_template(&t, &vars(&[("note", "")])), "[]");
    }

    #[test]
    fn test_process_does_not_reexpand_values() {
        let t = template("{{a}} {{b}}");
        let result = process_template(&t, &vars(&[("a", "{{b}}"), ("b", "x")]));
        assert_eq!(result, "{{b}} x");
    }

    #[test]
    fn test_process_ignores_extra_keys() {
        let t = template("Hi {{name}}");
        let result = process_template(&t, &vars(&[("name", "Ann"), ("unused", "zzz")]));
        assert_eq!(result, "Hi Ann");
    }

    #[test]
    fn test_render_reports_missing() {
        let t = template("{{name}} on {{date}} at {{time}}");
        let rendered = render(&t, &vars(&[("date", "Monday")]));

        assert_eq!(rendered.processed, "{{name}} on Monday at {{time}}");
        assert_eq!(rendered.original, t.content);
        assert_eq!(rendered.variables, vec!["name", "date", "time"]);
        assert_eq!(rendered.missing_variables, vec!["name", "time"]);
        assert!(!rendered.all_variables_provided);
    }

    #[test]
    fn test_render_all_provided() {
        let t = template("Hi {{name}}");
        let rendered = render(&t, &vars(&[("name", "Ann")]));
        assert!(rendered.missing_variables.is_empty());
        assert!(rendered.all_variables_provided);
    }

    #[test]
    fn test_sample_variables() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 4, 5).unwrap();
        let t = template("{{Name}} {{orderNumber}} {{deliveryDate}} {{date}} {{custom}}");
        let samples = sample_variables(&t, now);

        assert_eq!(samples["Name"], "John Doe");
        assert_eq!(samples["orderNumber"], "#12345");
        assert_eq!(samples["deliveryDate"], "03/13/2024");
        assert_eq!(samples["date"], "03/10/2024");
        assert_eq!(samples["custom"], "[custom]");
    }

    #[test]
    fn test_preview() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 4, 5).unwrap();
        let t = template("Hello {{name}} from {{company}}");
        let preview = preview(&t, now);

        assert_eq!(preview.preview, "Hello John Doe from Acme Corp");
        assert!(preview.has_variables);

        let plain = template("No variables");
        assert!(!super::preview(&plain, now).has_variables);
    }
}
