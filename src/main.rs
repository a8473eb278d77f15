use chrono::Local;
use clap::Parser;
use diemthi::{cli::Cli, info_time, process::{process_range, ScrapeOptions}, Result};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let start_time = Local::now();
    let opts: ScrapeOptions = Cli::parse().into();
    process_range(&opts).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
