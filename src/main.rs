use clap::Parser;
use eventpeek::console;
use eventpeek::params::Params;
use std::process::ExitCode;

// cargo run -- --topic user-activity-events --read-from-beginning
// KAFKA_BROKERS=kafka-1:9092,kafka-2:9092 cargo run

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env is fine, the real environment still applies.
    dotenvy::dotenv().ok();

    let params = Params::parse();
    console::start(params).await
}
