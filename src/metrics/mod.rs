//! Prometheus metrics for the template service.
//!
//! - Template rendering and usage counters
//! - Message validation outcomes
//! - Webhook events by type
//! - Storage failures and collection sizes

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, Encoder, IntCounter,
    IntCounterVec, IntGauge, TextEncoder,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "wa";

lazy_static! {
    /// Templates processed with caller-supplied variables
    pub static ref TEMPLATES_RENDERED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_templates_rendered_total", METRIC_PREFIX),
        "Total templates processed with variables"
    ).unwrap();

    /// Usage increments by kind (template, quick_reply)
    pub static ref USAGE_INCREMENTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_usage_increments_total", METRIC_PREFIX),
        "Total usage counter increments",
        &["kind"]
    ).unwrap();

    /// Message validations by result (valid, invalid)
    pub static ref MESSAGES_VALIDATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_messages_validated_total", METRIC_PREFIX),
        "Total message validations",
        &["result"]
    ).unwrap();

    /// Webhook events received by event type
    pub static ref WEBHOOK_EVENTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_webhook_events_total", METRIC_PREFIX),
        "Total webhook events received",
        &["event"]
    ).unwrap();

    /// Storage read/write failures surfaced to callers
    pub static ref STORAGE_ERRORS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_storage_errors_total", METRIC_PREFIX),
        "Total storage failures"
    ).unwrap();

    /// Number of stored templates (refreshed on scrape)
    pub static ref TEMPLATES_STORED: IntGauge = register_int_gauge!(
        format!("{}_templates_stored", METRIC_PREFIX),
        "Number of stored templates"
    ).unwrap();

    /// Number of stored quick replies (refreshed on scrape)
    pub static ref QUICK_REPLIES_STORED: IntGauge = register_int_gauge!(
        format!("{}_quick_replies_stored", METRIC_PREFIX),
        "Number of stored quick replies"
    ).unwrap();
}

/// Encode all registered metrics in the Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_contains_registered_metrics() {
        TEMPLATES_RENDERED_TOTAL.inc();
        MESSAGES_VALIDATED_TOTAL.with_label_values(&["valid"]).inc();

        let output = encode_metrics().unwrap();
        assert!(output.contains("wa_templates_rendered_total"));
        assert!(output.contains("wa_messages_validated_total"));
    }
}
