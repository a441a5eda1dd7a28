use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::DefaultTerminal;

use orderdesk::app::{App, LookupHandle, Status};
use orderdesk::config::{self, Config};
use orderdesk::fetcher::FetchSettings;
use orderdesk::lookup::build_lookup;
use orderdesk::stores::StoreDirectory;

/// Furniture order entry with address autocomplete
#[derive(Parser, Debug)]
#[command(name = "orderdesk")]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file to use instead of ~/.config/orderdesk/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write debug logs to the cache directory
    #[arg(long)]
    debug: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let args = Args::parse();

    if args.debug {
        init_file_logging()?;
    }

    let (config, warning) = match &args.config {
        Some(path) => (config::load_config_from_path(path)?, None),
        None => {
            let loaded = config::load_config();
            (loaded.config, loaded.warning)
        }
    };

    if args.print_config {
        print!("{}", config::describe(&config)?);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .wrap_err("Failed to start async runtime")?;

    let mut app = build_app(&config, runtime.handle().clone());
    if let Some(warning) = warning {
        app.status = Some(Status::Error(format!("Config: {}", warning)));
    }

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();

    let result = run(terminal, &mut app);

    // Restore terminal (automatic cleanup)
    ratatui::restore();

    app.dispose_lookups();
    runtime.shutdown_background();
    log::info!("Exiting with {} order line(s)", app.form.details.len());

    result
}

fn build_app(config: &Config, runtime: tokio::runtime::Handle) -> App {
    let stores = StoreDirectory::from_config(config);
    let lookup = build_lookup(&config.lookup).map(|service| LookupHandle {
        service,
        runtime,
        settings: FetchSettings::from(&config.lookup),
    });
    App::new(stores, lookup)
}

fn run(mut terminal: DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        // Render the UI
        terminal.draw(|frame| app.render(frame))?;

        // Handle events, waiting at most one tick
        app.handle_events()?;

        // Pick up lookup results that arrived during the tick
        app.poll_lookups();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Send logs to `<cache dir>/orderdesk/orderdesk.log`, keeping the terminal clean
fn init_file_logging() -> Result<()> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("orderdesk");
    fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("Failed to create log directory {}", dir.display()))?;

    let path = dir.join("orderdesk.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("orderdesk=debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    log::info!("orderdesk {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}
