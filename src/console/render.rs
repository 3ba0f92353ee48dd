use chrono::{DateTime, Local, NaiveDateTime, Utc};
use eventpeek_client::{SessionConfig, SessionError};
use eventpeek_protocol::{ActivityEvent, ConsumedRecord, DecodedValue, Section};
use serde_json::Value;
use std::borrow::Cow;
use std::io::{self, Write};

/// Shown wherever a field is absent or null.
pub const NOT_AVAILABLE: &str = "N/A";

const RECORD_RULE: &str = "================================================================================";
const SECTION_RULE: &str = "----------------------------------------";
const BANNER_RULE: &str = "------------------------------------------------------------";

pub fn render_banner<W: Write>(out: &mut W, config: &SessionConfig) -> io::Result<()> {
    writeln!(out, "Connecting to Kafka brokers: {:?}", config.brokers)?;
    writeln!(out, "Subscribing to topic: {}", config.topic)?;
    writeln!(out, "Consumer group: {}", config.group_id)?;
    writeln!(out, "Offset reset: {}", config.offset_reset)?;
    writeln!(out, "{BANNER_RULE}")
}

pub fn render_connected<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Successfully connected to Kafka!")?;
    writeln!(out, "Starting to consume messages...")?;
    writeln!(out, "Send some events to the ingestion service to see them here!")?;
    writeln!(out, "Press Ctrl+C to stop")?;
    writeln!(out)
}

pub fn render_connect_failure<W: Write>(
    out: &mut W,
    config: &SessionConfig,
    err: &SessionError,
) -> io::Result<()> {
    writeln!(out, "Failed to connect to Kafka: {err}")?;
    writeln!(out, "Make sure:")?;
    writeln!(out, "   1. Kafka is running on {}", config.bootstrap_servers())?;
    writeln!(out, "   2. The topic '{}' exists", config.topic)?;
    writeln!(out, "Failed to start consumer. Exiting.")
}

/// Print one record: delivery metadata first, then the decoded event or the
/// reason it could not be decoded.
pub fn render_record<W: Write>(
    out: &mut W,
    record: &ConsumedRecord,
    value: &DecodedValue,
    received_at: DateTime<Local>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{RECORD_RULE}")?;
    writeln!(
        out,
        "MESSAGE RECEIVED at {}",
        received_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "{RECORD_RULE}")?;

    writeln!(out, "Topic: {}", record.topic)?;
    writeln!(out, "Partition: {}", record.partition)?;
    writeln!(out, "Offset: {}", record.offset)?;
    writeln!(
        out,
        "Key: {}",
        record.key_text().unwrap_or(Cow::Borrowed(NOT_AVAILABLE))
    )?;
    writeln!(
        out,
        "Timestamp: {}",
        record
            .timestamp
            .map(format_epoch_millis)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    )?;

    match value {
        DecodedValue::Event(event) => render_event(out, event)?,
        DecodedValue::Undecodable(reason) => {
            writeln!(out)?;
            writeln!(out, "MESSAGE DECODE ISSUE:")?;
            writeln!(out, "   {reason}")?;
        }
    }

    writeln!(out, "{RECORD_RULE}")
}

fn render_event<W: Write>(out: &mut W, event: &ActivityEvent) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "EVENT DATA:")?;
    writeln!(out, "{SECTION_RULE}")?;

    field(out, "", "Event ID", event.event_id.as_ref())?;
    field(out, "", "Request ID", event.request_id.as_ref())?;
    field(out, "", "Event Type", event.event_type.as_ref())?;
    field(out, "", "User ID", event.user_id.as_ref())?;
    field(out, "", "Session ID", event.session_id.as_ref())?;
    field(out, "", "Page URL", event.page_url.as_ref())?;
    writeln!(
        out,
        "Event Timestamp: {}",
        display_timestamp(event.timestamp.as_ref())
    )?;

    match &event.client_info {
        Some(Section::Fields(client)) if !client.is_empty() => {
            section_header(out, "CLIENT INFO:")?;
            field(out, "   ", "User Agent", client.user_agent.as_ref())?;
            field(out, "   ", "Screen Resolution", client.screen_resolution.as_ref())?;
            field(out, "   ", "Language", client.language.as_ref())?;
        }
        Some(Section::Other(raw)) => raw_section(out, "CLIENT INFO:", raw)?,
        _ => {}
    }

    match &event.service_info {
        Some(Section::Fields(service)) if !service.is_empty() => {
            section_header(out, "SERVICE INFO:")?;
            field(out, "   ", "Service", service.service_name.as_ref())?;
            field(out, "   ", "Version", service.service_version.as_ref())?;
            field(out, "   ", "Environment", service.environment.as_ref())?;
        }
        Some(Section::Other(raw)) => raw_section(out, "SERVICE INFO:", raw)?,
        _ => {}
    }

    match &event.processing_info {
        Some(Section::Fields(processing)) if !processing.is_empty() => {
            section_header(out, "PROCESSING INFO:")?;
            writeln!(
                out,
                "   Received At: {}",
                display_timestamp(processing.received_at.as_ref())
            )?;
            writeln!(
                out,
                "   Processed At: {}",
                display_timestamp(processing.processed_at.as_ref())
            )?;
            match &processing.processing_ms {
                Some(ms) => writeln!(out, "   Processing Time: {}ms", display_value(Some(ms)))?,
                None => writeln!(out, "   Processing Time: {NOT_AVAILABLE}")?,
            }
        }
        Some(Section::Other(raw)) => raw_section(out, "PROCESSING INFO:", raw)?,
        _ => {}
    }

    match &event.event_data {
        Some(Section::Fields(data)) if !data.is_empty() => {
            section_header(out, "EVENT DATA:")?;
            for (key, value) in data {
                writeln!(out, "   {key}: {}", display_value(Some(value)))?;
            }
        }
        Some(Section::Other(raw)) => raw_section(out, "EVENT DATA:", raw)?,
        _ => {}
    }

    Ok(())
}

fn section_header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")
}

// not a document, shown as compact JSON
fn raw_section<W: Write>(out: &mut W, title: &str, raw: &Value) -> io::Result<()> {
    section_header(out, title)?;
    writeln!(out, "   {}", display_value(Some(raw)))
}

fn field<W: Write>(out: &mut W, indent: &str, label: &str, value: Option<&Value>) -> io::Result<()> {
    writeln!(out, "{indent}{label}: {}", display_value(value))
}

/// Strings print bare, everything else as compact JSON.
pub fn display_value(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(NOT_AVAILABLE),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

fn display_timestamp(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        Some(Value::String(s)) => Cow::Owned(format_timestamp(s)),
        other => display_value(other),
    }
}

/// Normalise an ISO-8601 timestamp to UTC; anything unparsable is returned
/// unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string();
    }
    // no offset given, taken as UTC
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    }
    raw.to_string()
}

pub fn format_epoch_millis(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_value_covers_json_kinds() {
        assert_eq!(display_value(None), NOT_AVAILABLE);
        assert_eq!(display_value(Some(&Value::Null)), NOT_AVAILABLE);
        assert_eq!(display_value(Some(&json!("u1"))), "u1");
        assert_eq!(display_value(Some(&json!(42))), "42");
        assert_eq!(display_value(Some(&json!(true))), "true");
        assert_eq!(display_value(Some(&json!({"a": [1, 2]}))), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn iso_timestamps_are_normalised_to_utc() {
        assert_eq!(format_timestamp("2024-01-15T10:30:00Z"), "2024-01-15 10:30:00 UTC");
        assert_eq!(
            format_timestamp("2024-01-15T12:30:00.123+02:00"),
            "2024-01-15 10:30:00 UTC"
        );
        assert_eq!(format_timestamp("2024-01-15T10:30:00"), "2024-01-15 10:30:00 UTC");
    }

    #[test]
    fn unparsable_timestamp_is_kept() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn epoch_millis_render_in_utc() {
        assert_eq!(format_epoch_millis(1_700_000_000_000), "2023-11-14 22:13:20 UTC");
    }
}
