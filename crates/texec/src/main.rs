use std::sync::Arc;

mod command;
mod dispatch;
mod executor;

use executor::Executor;
use texec_core::ExecutorConfig;

#[tokio::main]
async fn main() {
    // Diagnostics only, never the operator-visible protocol (spec.md §6
    // "Diagnostics stream"). Written to stderr so stdout stays exactly the
    // five line forms spec.md §6 mandates.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let executor = Arc::new(Executor::new(ExecutorConfig::default()));
    let exit_code = dispatch::run(executor).await;
    std::process::exit(exit_code);
}
