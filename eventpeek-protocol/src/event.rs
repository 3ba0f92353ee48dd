/*
{
  "event_id": "...", "request_id": "...", "event_type": "...",
  "user_id": "...", "session_id": "...", "page_url": "...", "timestamp": "...",
  "client_info":     { "user_agent", "screen_resolution", "language" },
  "service_info":    { "service_name", "service_version", "environment" },
  "processing_info": { "received_at", "processed_at", "processing_ms" },
  "event_data":      { ...anything... }
}
*/
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// User activity event as published by the ingestion service.
///
/// Fields stay as raw JSON values; producers are not consistent about
/// sending ids as strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActivityEvent {
    pub event_id: Option<Value>,
    pub request_id: Option<Value>,
    pub event_type: Option<Value>,
    pub user_id: Option<Value>,
    pub session_id: Option<Value>,
    pub page_url: Option<Value>,
    pub timestamp: Option<Value>,
    #[serde(deserialize_with = "lenient_section")]
    pub client_info: Option<Section<ClientInfo>>,
    #[serde(deserialize_with = "lenient_section")]
    pub service_info: Option<Section<ServiceInfo>>,
    #[serde(deserialize_with = "lenient_section")]
    pub processing_info: Option<Section<ProcessingInfo>>,
    #[serde(deserialize_with = "lenient_section")]
    pub event_data: Option<Section<Map<String, Value>>>,
}

/// A nested document. Producers occasionally send something other than an
/// object; that value is kept as-is instead of failing the whole event.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Fields(T),
    Other(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub user_agent: Option<Value>,
    pub screen_resolution: Option<Value>,
    pub language: Option<Value>,
}

impl ClientInfo {
    pub fn is_empty(&self) -> bool {
        self.user_agent.is_none() && self.screen_resolution.is_none() && self.language.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    pub service_name: Option<Value>,
    pub service_version: Option<Value>,
    pub environment: Option<Value>,
}

impl ServiceInfo {
    pub fn is_empty(&self) -> bool {
        self.service_name.is_none() && self.service_version.is_none() && self.environment.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProcessingInfo {
    pub received_at: Option<Value>,
    pub processed_at: Option<Value>,
    pub processing_ms: Option<Value>,
}

impl ProcessingInfo {
    pub fn is_empty(&self) -> bool {
        self.received_at.is_none() && self.processed_at.is_none() && self.processing_ms.is_none()
    }
}

// null and absent both mean "no section"
fn lenient_section<'de, D, T>(deserializer: D) -> Result<Option<Section<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(object @ Value::Object(_)) => serde_json::from_value(object)
            .map(|fields| Some(Section::Fields(fields)))
            .map_err(D::Error::custom),
        Some(other) => Ok(Some(Section::Other(other))),
    }
}
