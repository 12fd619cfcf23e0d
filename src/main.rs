use clap::Parser;
use paperqa::core::config::{self, CliOverrides, PaperQaConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paperqa", about = "Upload a paper and ask questions about it")]
struct Args {
    /// Backend base URL (overrides PAPERQA_BASE_URL and the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Log file path (overrides PAPERQA_LOG_FILE and the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Upload this PDF as soon as the interface starts
    #[arg(long, value_name = "PATH")]
    upload: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The logger isn't up yet, so config problems go to stderr
    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Ignoring config file: {e}");
        PaperQaConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            log_file: args.log_file,
        },
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
        }
        Err(e) => eprintln!("Logging disabled, cannot open {}: {e}", resolved.log_file.display()),
    }

    log::info!(
        "paperqa v{} starting up against {}",
        env!("CARGO_PKG_VERSION"),
        resolved.base_url
    );

    if let Some(path) = &args.upload {
        paperqa::tui::check_upload_path(path).map_err(std::io::Error::other)?;
    }

    paperqa::tui::run(resolved, args.upload)
}
