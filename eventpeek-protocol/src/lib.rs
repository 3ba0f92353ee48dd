pub mod record;
pub mod event;
pub mod decode;
pub mod errors;

// Public re-exports for easy access
pub use record::ConsumedRecord;
pub use event::{ActivityEvent, ClientInfo, ProcessingInfo, Section, ServiceInfo};
pub use decode::{decode_value, DecodedValue};
pub use errors::DecodeError;
