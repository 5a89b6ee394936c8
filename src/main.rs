use clap::Parser;
use docchat::core::config::{self, CliOverrides, DocchatConfig};
use docchat::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "docchat", about = "Terminal client for chatting with your documents")]
struct Args {
    /// Backend base URL (overrides DOCCHAT_BASE_URL and the config file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Log level for docchat.log: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The TUI owns the terminal afterwards, so this is the last chance to print
    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("docchat: {e}; using defaults");
        DocchatConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            log_level: args.log_level,
        },
    );

    for level in &resolved.ignored_log_levels {
        eprintln!("docchat: ignoring unknown log level '{level}'");
    }

    // Initialize file logger - writes to docchat.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("docchat.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    // Config loading ran before the logger existed
    for level in &resolved.ignored_log_levels {
        log::warn!("Ignoring unknown log level '{}'", level);
    }
    log::info!("docchat starting up against {}", resolved.base_url);
    log::debug!("Resolved config: {:?}", resolved);

    tui::run(resolved)
}
