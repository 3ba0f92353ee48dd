use bytes::Bytes;
use std::borrow::Cow;

/// One record as delivered by the broker, detached from the client's buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumedRecord {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub timestamp: Option<i64>, // Unix epoch in millis, broker assigned
    pub key: Option<Bytes>,
    pub value: Option<Bytes>, // None for tombstones
}

impl ConsumedRecord {
    pub fn key_text(&self) -> Option<Cow<'_, str>> {
        self.key.as_deref().map(String::from_utf8_lossy)
    }
}
