use bytes::Bytes;
use eventpeek_client::{RecordSource, SessionError};
use eventpeek_protocol::ConsumedRecord;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

pub fn record(offset: i64, value: Option<&[u8]>) -> ConsumedRecord {
    ConsumedRecord {
        topic: "user-activity-events".to_string(),
        partition: 0,
        offset,
        timestamp: Some(1_700_000_000_000),
        key: Some(Bytes::from(format!("user-{}", offset))),
        value: value.map(Bytes::copy_from_slice),
    }
}

/// Plays back a fixed script of pulls, then blocks like an idle topic.
/// When the script is exhausted it fires `drained`, which tests use as the
/// interrupt.
pub struct ScriptedSource {
    script: VecDeque<Result<ConsumedRecord, SessionError>>,
    drained: Option<oneshot::Sender<()>>,
    closes: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(
        script: Vec<Result<ConsumedRecord, SessionError>>,
    ) -> (Self, oneshot::Receiver<()>, Arc<AtomicUsize>) {
        let (tx, rx) = oneshot::channel();
        let closes = Arc::new(AtomicUsize::new(0));
        let source = ScriptedSource {
            script: script.into(),
            drained: Some(tx),
            closes: closes.clone(),
        };
        (source, rx, closes)
    }
}

impl RecordSource for ScriptedSource {
    async fn next_record(&mut self) -> Result<ConsumedRecord, SessionError> {
        if let Some(next) = self.script.pop_front() {
            return next;
        }
        if let Some(tx) = self.drained.take() {
            let _ = tx.send(());
        }
        std::future::pending().await
    }

    fn close(self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn closes(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
