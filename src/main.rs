use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use ingres_chat::app::App;
use ingres_chat::config::{AppConfig, BackendMode, DEFAULT_CONFIG_PATH};
use ingres_chat::util::log::init_logging;

#[derive(Parser)]
#[command(name = "ingres-chat")]
#[command(about = "Terminal chat client for the INGRES groundwater assistant", long_about = None)]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Backend base URL (overrides config and INGRES_API_URL)
    #[arg(short, long)]
    url: Option<String>,

    /// Answer with canned replies instead of calling the backend
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;
    config.apply_env();
    if let Some(url) = cli.url {
        config.api_base_url = url;
    }
    if cli.offline {
        config.mode = BackendMode::Local;
    }
    config.validate()?;

    init_logging(&config.log_dir, &config.log_level)?;

    let terminal = ratatui::init();
    execute!(stdout(), EnableFocusChange)?;
    let result = match App::new(config) {
        Ok(app) => app.run(terminal).await,
        Err(e) => Err(e),
    };
    let _ = execute!(stdout(), DisableFocusChange);
    ratatui::restore();
    result
}
