use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

use smartshop::core::config::{self, ResolvedConfig};
use smartshop::service::HttpRecommendationService;
use smartshop::tui;

#[derive(Parser)]
#[command(name = "smartshop", about = "Terminal shopping assistant")]
struct Args {
    /// Base URL of the recommendation service
    #[arg(short, long)]
    base_url: Option<String>,

    /// Config file to use instead of ~/.smartshop/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config(args.config.as_deref()).map_err(|e| {
        eprintln!("smartshop: {e}");
        std::io::Error::other(e.to_string())
    })?;
    let resolved = config::resolve(&file_config, args.base_url.as_deref());
    init_logging(&resolved);

    log::info!(
        "SmartShop starting up against {}{}",
        resolved.base_url,
        resolved.chat_path
    );

    let service = HttpRecommendationService::new(
        resolved.base_url.clone(),
        resolved.chat_path.clone(),
        resolved.request_timeout,
    )
    .map_err(|e| std::io::Error::other(e.to_string()))?;

    tui::run(Arc::new(service), resolved)
}
