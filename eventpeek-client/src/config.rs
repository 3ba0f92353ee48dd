use crate::errors::SessionError;
use rdkafka::ClientConfig;
use std::fmt;

/// Where a group with no committed offset starts reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OffsetReset {
    Earliest,
    #[default]
    Latest,
}

impl OffsetReset {
    pub fn from_beginning(read_from_beginning: bool) -> Self {
        if read_from_beginning {
            OffsetReset::Earliest
        } else {
            OffsetReset::Latest
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetReset::Earliest => "earliest",
            OffsetReset::Latest => "latest",
        }
    }
}

impl fmt::Display for OffsetReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a [`crate::ConsumerSession`] needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub brokers: Vec<String>,
    pub topic: String,
    pub group_id: String,
    pub offset_reset: OffsetReset,
}

impl SessionConfig {
    pub fn bootstrap_servers(&self) -> String {
        self.brokers.join(",")
    }

    pub fn client_config(&self) -> Result<ClientConfig, SessionError> {
        if self.brokers.is_empty() {
            return Err(SessionError::NoBrokers);
        }

        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", self.bootstrap_servers())
            .set("group.id", &self.group_id)
            .set("auto.offset.reset", self.offset_reset.as_str())
            .set("enable.auto.commit", "true")
            .set("enable.partition.eof", "false")
            .set("session.timeout.ms", "6000");
        Ok(config)
    }
}
