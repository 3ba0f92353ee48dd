use crate::console::render::render_record;
use chrono::Local;
use eventpeek_client::{RecordSource, SessionError};
use eventpeek_protocol::{decode_value, DecodedValue};
use std::future::Future;
use std::io::{self, Write};
use tracing::{debug, error, info, warn};

/// Why the pull loop stopped.
#[derive(Debug)]
pub enum StopReason {
    Interrupted,
    Source(SessionError),
    Output(io::Error),
}

#[derive(Debug)]
pub struct ConsumeReport {
    pub records: u64,
    pub undecodable: u64,
    pub stop: StopReason,
}

/// Pull records from `source` and print each one to `out` until `shutdown`
/// resolves or the source fails. The source is closed exactly once on the
/// way out, whatever the reason.
pub async fn consume<S, W, F>(mut source: S, out: &mut W, shutdown: F) -> ConsumeReport
where
    S: RecordSource,
    W: Write,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut records = 0;
    let mut undecodable = 0;

    let stop = loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => break StopReason::Interrupted,

            next = source.next_record() => {
                let record = match next {
                    Ok(record) => record,
                    Err(e) => break StopReason::Source(e),
                };
                records += 1;

                let value = decode_value(record.value.as_deref());
                if let DecodedValue::Undecodable(reason) = &value {
                    undecodable += 1;
                    warn!(
                        topic = %record.topic,
                        partition = record.partition,
                        offset = record.offset,
                        "could not decode record value: {}", reason
                    );
                } else {
                    debug!(partition = record.partition, offset = record.offset, "record received");
                }

                let printed = render_record(out, &record, &value, Local::now()).and_then(|_| out.flush());
                if let Err(e) = printed {
                    break StopReason::Output(e);
                }
            }
        }
    };

    match &stop {
        StopReason::Interrupted => {
            info!("shutdown signal received");
            let _ = writeln!(out, "\nStopping consumer...");
        }
        StopReason::Source(e) => {
            error!("Error consuming messages: {}", e);
            let _ = writeln!(out, "Error consuming messages: {e}");
        }
        StopReason::Output(e) => error!("Failed to write record to console: {}", e),
    }

    source.close();
    let _ = writeln!(out, "Consumer connection closed.");
    let _ = out.flush();

    ConsumeReport {
        records,
        undecodable,
        stop,
    }
}
