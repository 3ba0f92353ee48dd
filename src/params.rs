use chrono::{DateTime, Local};
use clap::Parser;
use eventpeek_client::{OffsetReset, SessionConfig};
use std::time::Duration;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "eventpeek",
    about = "Tail a Kafka topic and pretty-print user activity events"
)]
pub struct Params {
    /// Comma separated list of bootstrap brokers.
    #[arg(long, env = "KAFKA_BROKERS", value_delimiter = ',', default_value = "localhost:9092")]
    pub brokers: Vec<String>,

    #[arg(long, env = "KAFKA_TOPIC", default_value = "user-activity-events")]
    pub topic: String,

    /// Consumer group. Defaults to a fresh group stamped with the start time.
    #[arg(long, env = "KAFKA_GROUP_ID")]
    pub group_id: Option<String>,

    /// Read messages from the beginning of the topic
    #[arg(long)]
    pub read_from_beginning: bool,

    #[arg(long, env = "EVENTPEEK_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,

    #[arg(long, env = "EVENTPEEK_LOG", default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Params {
    pub fn session_config(&self, started_at: DateTime<Local>) -> SessionConfig {
        let brokers = self
            .brokers
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect();

        let group_id = match self.group_id.as_deref().map(str::trim) {
            Some(group) if !group.is_empty() => group.to_string(),
            _ => default_group_id(started_at),
        };

        SessionConfig {
            brokers,
            topic: self.topic.clone(),
            group_id,
            offset_reset: OffsetReset::from_beginning(self.read_from_beginning),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// A new group per run, so every run starts from the reset policy.
pub fn default_group_id(started_at: DateTime<Local>) -> String {
    format!(
        "testing-consumer-group-{}",
        started_at.format("%Y%m%d_%H%M%S")
    )
}
