use chrono::Local;
use event_scrap::{config::Config, info_time, process::process_site};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let start_time = Local::now();
    let res = match Config::from_env() {
        Ok(config) => process_site(&config, start_time.date_naive()).await,
        Err(e) => Err(e),
    };

    match res {
        Ok(_) => info_time!(start_time, "Full program time:"),
        Err(e) => {
            error!(error = %e, "run failed, no output written");
            std::process::exit(1);
        }
    }
}
