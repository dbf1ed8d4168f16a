use clap::Parser;
use parley::core::appearance::TerminalAppearance;
use parley::core::config::{self, CliOverrides, ParleyConfig};
use parley::core::preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use parley::core::theme::ThemeController;
use parley::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parley", about = "Minimal terminal chat client")]
struct Args {
    /// Model shown in the selector (GPT-5-Nano or GPT-5-Mini)
    #[arg(short, long)]
    model: Option<String>,

    /// Simulated reply latency in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "parley.log")]
    log_file: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "debug")]
    log_level: String,

    /// Keep preferences in memory; nothing is written to disk
    #[arg(long)]
    memory_prefs: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let level = args.log_level.parse().unwrap_or(LevelFilter::Debug);
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    log::info!("Parley starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        ParleyConfig::default()
    });
    let cli = CliOverrides {
        model: args.model,
        reply_delay_ms: args.reply_delay_ms,
        memory_prefs: args.memory_prefs,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!("Resolved config: {:?}", resolved);

    let store: Box<dyn PreferenceStore> = match &resolved.preferences_path {
        Some(path) => Box::new(FilePreferenceStore::open(path)),
        None => {
            log::info!("Preferences kept in memory");
            Box::new(MemoryPreferenceStore::new())
        }
    };
    let theme = ThemeController::new(store, &TerminalAppearance);

    tui::run(resolved, theme)
}
