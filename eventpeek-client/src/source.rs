use crate::errors::SessionError;
use eventpeek_protocol::ConsumedRecord;
use std::future::Future;

/// A subscription that hands out records one at a time.
///
/// `next_record` suspends until the broker delivers something; it never
/// resolves to "no data". `close` consumes the source, so the underlying
/// connection can be released only once.
pub trait RecordSource {
    fn next_record(&mut self) -> impl Future<Output = Result<ConsumedRecord, SessionError>>;

    fn close(self);
}
