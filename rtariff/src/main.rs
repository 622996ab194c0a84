use clap::Parser as _;
use rtariff::BaseArgs;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

pub fn main() -> anyhow::Result<()> {
    // By convention, the solver crate uses `tracing` to report accepted
    // roots and economically suspect results; subscribe so those events
    // reach stderr (filtered by RUST_LOG).
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = BaseArgs::parse();
    args.evaluate()
}
