//! Example templates written into a fresh store by `seed_defaults`.

use chrono::Utc;

use super::types::MessageTemplate;
use super::variables::extract_variables;

const DEFAULT_TEMPLATES: &[(&str, &str, &str, &str)] = &[
    (
        "1",
        "Welcome Message",
        "Greetings",
        "Hello {{name}}! Welcome to {{company}}. How can I help you today?",
    ),
    (
        "2",
        "Meeting Reminder",
        "Business",
        "Hi {{name}}, this is a reminder about our meeting scheduled for {{date}} at {{time}}. See you soon!",
    ),
    (
        "3",
        "Order Confirmation",
        "Sales",
        "Thank you for your order #{{orderNumber}}! Your order total is {{amount}} and will be delivered to {{address}} by {{deliveryDate}}.",
    ),
    (
        "4",
        "Support Response",
        "Support",
        "Hi {{name}}, thank you for contacting support. Your ticket #{{ticketId}} has been created. We'll get back to you within {{timeframe}}.",
    ),
];

pub fn default_templates() -> Vec<MessageTemplate> {
    let now = Utc::now();

    DEFAULT_TEMPLATES
        .iter()
        .map(|(id, name, category, content)| MessageTemplate {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            content: content.to_string(),
            variables: extract_variables(content),
            usage: 0,
            created_at: now,
            updated_at: now,
        })
        .collect()
}
