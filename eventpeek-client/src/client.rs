use crate::config::SessionConfig;
use crate::errors::SessionError;
use crate::source::RecordSource;
use bytes::Bytes;
use eventpeek_protocol::ConsumedRecord;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::error::RDKafkaErrorCode;
use rdkafka::message::{BorrowedMessage, Message};
use std::time::Duration;
use tracing::{debug, info};

/// A subscribed consumer on a single topic.
pub struct ConsumerSession {
    consumer: StreamConsumer,
    topic: String,
}

impl ConsumerSession {
    /// Create the consumer, prove the brokers answer, then subscribe.
    ///
    /// librdkafka connects lazily, so a metadata round trip is the only way to
    /// surface an unreachable cluster before the pull loop starts.
    pub fn connect(config: &SessionConfig, timeout: Duration) -> Result<Self, SessionError> {
        let brokers = config.bootstrap_servers();
        let consumer: StreamConsumer = config
            .client_config()?
            .create()
            .map_err(|source| SessionError::Connect {
                brokers: brokers.clone(),
                source,
            })?;

        let metadata = consumer
            .fetch_metadata(Some(config.topic.as_str()), timeout)
            .map_err(|source| SessionError::Connect {
                brokers: brokers.clone(),
                source,
            })?;

        for topic in metadata.topics() {
            check_topic(topic.name(), topic.error().map(RDKafkaErrorCode::from))?;
            debug!(
                topic = %topic.name(),
                partitions = topic.partitions().len(),
                "topic metadata fetched"
            );
        }
        info!(brokers = %brokers, "connected to kafka");

        consumer
            .subscribe(&[config.topic.as_str()])
            .map_err(|source| SessionError::Subscribe {
                topic: config.topic.clone(),
                source,
            })?;
        info!(topic = %config.topic, group = %config.group_id, "subscribed");

        Ok(ConsumerSession {
            consumer,
            topic: config.topic.clone(),
        })
    }
}

impl RecordSource for ConsumerSession {
    async fn next_record(&mut self) -> Result<ConsumedRecord, SessionError> {
        let message = self.consumer.recv().await.map_err(SessionError::Receive)?;
        Ok(to_record(&message))
    }

    fn close(self) {
        self.consumer.unsubscribe();
        drop(self.consumer);
        info!(topic = %self.topic, "consumer connection closed");
    }
}

/// The consumer would only report a missing topic as an error on its first
/// `recv`, so refuse to start instead.
fn check_topic(name: &str, error: Option<RDKafkaErrorCode>) -> Result<(), SessionError> {
    match error {
        None => Ok(()),
        Some(code) => Err(SessionError::Topic {
            topic: name.to_string(),
            code,
        }),
    }
}

fn to_record(message: &BorrowedMessage<'_>) -> ConsumedRecord {
    ConsumedRecord {
        topic: message.topic().to_string(),
        partition: message.partition(),
        offset: message.offset(),
        timestamp: message.timestamp().to_millis(),
        key: message.key().map(Bytes::copy_from_slice),
        value: message.payload().map(Bytes::copy_from_slice),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OffsetReset;

    fn config_for(brokers: Vec<String>) -> SessionConfig {
        SessionConfig {
            brokers,
            topic: "user-activity-events".to_string(),
            group_id: "eventpeek-test".to_string(),
            offset_reset: OffsetReset::Earliest,
        }
    }

    #[tokio::test]
    async fn unreachable_broker_fails_to_connect() {
        let config = config_for(vec!["127.0.0.1:1".to_string()]);

        let result = ConsumerSession::connect(&config, Duration::from_secs(1));

        match result {
            Err(SessionError::Connect { brokers, .. }) => assert_eq!(brokers, "127.0.0.1:1"),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("connected to an unreachable broker"),
        }
    }

    #[tokio::test]
    async fn empty_broker_list_fails_before_connecting() {
        let result = ConsumerSession::connect(&config_for(Vec::new()), Duration::from_secs(1));
        assert!(matches!(result, Err(SessionError::NoBrokers)));
    }

    #[test]
    fn unknown_topic_is_refused() {
        let err = check_topic(
            "user-activity-events",
            Some(RDKafkaErrorCode::UnknownTopicOrPartition),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Topic { ref topic, code: RDKafkaErrorCode::UnknownTopicOrPartition }
                if topic == "user-activity-events"
        ));
    }

    #[test]
    fn healthy_topic_is_accepted() {
        assert!(check_topic("user-activity-events", None).is_ok());
    }
}
