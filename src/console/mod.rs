pub mod consume;
pub mod render;

use crate::params::Params;
use anyhow::{Context, Result};
use chrono::Local;
use eventpeek_client::ConsumerSession;
use std::io;
use std::process::ExitCode;
use tracing::{error, info, Level};

pub use consume::{consume, ConsumeReport, StopReason};

pub async fn start(params: Params) -> ExitCode {
    init_tracing(params.log_level);

    let outcome = run(params).await;
    match &outcome {
        Ok(report) => info!(
            records = report.records,
            undecodable = report.undecodable,
            "consumer stopped: {:?}",
            report.stop
        ),
        Err(e) => error!("{:#}", e),
    }
    ExitCode::from(exit_status(&outcome))
}

/// 1 only when the consumer never started. Once records flow, any stop,
/// including a loop error, is a clean exit.
pub fn exit_status(outcome: &Result<ConsumeReport>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

async fn run(params: Params) -> Result<ConsumeReport> {
    let config = params.session_config(Local::now());
    info!("eventpeek starting with config: {:?}", config);

    let mut stdout = io::stdout();
    render::render_banner(&mut stdout, &config).context("writing to stdout")?;

    let session = match ConsumerSession::connect(&config, params.connect_timeout()) {
        Ok(session) => session,
        Err(e) => {
            let _ = render::render_connect_failure(&mut stdout, &config, &e);
            return Err(e).context("Failed to start consumer");
        }
    };
    render::render_connected(&mut stdout).context("writing to stdout")?;

    Ok(consume(session, &mut stdout, interrupted()).await)
}

fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Resolves on Ctrl+C. If the handler cannot be installed the loop simply runs
/// until the process is killed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use eventpeek_client::SessionError;
    use rdkafka::error::{KafkaError, RDKafkaErrorCode};

    fn stopped(stop: StopReason) -> Result<ConsumeReport> {
        Ok(ConsumeReport {
            records: 3,
            undecodable: 1,
            stop,
        })
    }

    #[test]
    fn every_stop_after_startup_exits_zero() {
        assert_eq!(exit_status(&stopped(StopReason::Interrupted)), 0);
        assert_eq!(
            exit_status(&stopped(StopReason::Source(SessionError::Receive(
                KafkaError::MessageConsumption(RDKafkaErrorCode::BrokerTransportFailure)
            )))),
            0
        );
        assert_eq!(
            exit_status(&stopped(StopReason::Output(io::Error::from(
                io::ErrorKind::BrokenPipe
            )))),
            0
        );
    }

    #[test]
    fn startup_failure_exits_one() {
        let outcome: Result<ConsumeReport> =
            Err(SessionError::NoBrokers).context("Failed to start consumer");
        assert_eq!(exit_status(&outcome), 1);
    }

    #[tokio::test]
    async fn unreachable_broker_fails_run() {
        let params = Params::try_parse_from([
            "eventpeek",
            "--brokers",
            "127.0.0.1:1",
            "--group-id",
            "eventpeek-test",
            "--connect-timeout-secs",
            "1",
        ])
        .unwrap();

        let outcome = run(params).await;

        let err = outcome.as_ref().err().expect("run should fail without a broker");
        assert!(matches!(
            err.downcast_ref::<SessionError>(),
            Some(SessionError::Connect { .. })
        ));
        assert_eq!(exit_status(&outcome), 1);
    }
}
