pub mod client;
pub mod config;
pub mod errors;
mod source;

pub use client::ConsumerSession;
pub use config::{OffsetReset, SessionConfig};
pub use errors::SessionError;
pub use source::RecordSource;
