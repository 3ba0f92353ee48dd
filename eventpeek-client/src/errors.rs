use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No broker addresses configured")]
    NoBrokers,

    #[error("Broker connection to {brokers} failed: {source}")]
    Connect {
        brokers: String,
        #[source]
        source: KafkaError,
    },

    #[error("Topic {topic} is not available: {code}")]
    Topic {
        topic: String,
        code: RDKafkaErrorCode,
    },

    #[error("Failed to subscribe to topic {topic}: {source}")]
    Subscribe {
        topic: String,
        #[source]
        source: KafkaError,
    },

    #[error("Error receiving record: {0}")]
    Receive(#[source] KafkaError),
}
