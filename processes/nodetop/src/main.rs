use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{watch, Notify};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use nodetop::data::local_hostname;
use nodetop::{events, export, source, ui, App, NodetopConfig, Poller};

const DEFAULT_LOG_FILTER: &str = "nodetop=info,nodetop_common=info";

#[derive(Parser, Debug)]
#[command(name = "nodetop")]
#[command(about = "Terminal dashboard for a Cassandra node, fed by nodetool")]
struct Args {
    /// Configuration file (defaults to ./nodetop.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Read captured status.txt, cfstats.txt and info.txt from this directory
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Exit on the first failed poll instead of retrying
    #[arg(long)]
    fail_fast: bool,

    /// Run one poll cycle, print it as JSON and exit
    #[arg(long)]
    once: bool,

    /// Log file used while the dashboard owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Command line beats file and environment
    fn apply(&self, config: &mut NodetopConfig) {
        if let Some(refresh) = self.refresh {
            config.refresh_secs = refresh;
        }
        if let Some(ref dir) = self.replay {
            config.replay_dir = Some(dir.clone());
        }
        if self.fail_fast {
            config.fail_fast = true;
        }
        if let Some(ref path) = self.log_file {
            config.log_file = path.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = NodetopConfig::try_load(args.config.as_deref())
        .context("Failed to load configuration")?;
    args.apply(&mut config);

    init_logging((!args.once).then_some(config.log_file.as_path()))?;
    info!(?config, "nodetop starting");

    let poller = Poller::new(source::from_config(&config), local_hostname());

    if args.once {
        return run_once(poller).await;
    }
    run_dashboard(poller, &config).await
}

/// Log to `log_file` when given, otherwise to stderr
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let fmt_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(filter);
            Registry::default().with(fmt_layer).init();
        }
        None => {
            let fmt_layer = fmt::layer().with_writer(io::stderr).with_filter(filter);
            Registry::default().with(fmt_layer).init();
        }
    }
    Ok(())
}

/// Non-interactive mode: a single cycle, printed as JSON
async fn run_once(mut poller: Poller) -> Result<()> {
    let state = poller.poll_once().await.context("Poll cycle failed")?;
    let json = serde_json::to_string_pretty(&export::snapshot_json(&state))?;
    println!("{json}");
    Ok(())
}

async fn run_dashboard(poller: Poller, config: &NodetopConfig) -> Result<()> {
    let description = poller.source_description().to_string();
    let (tx, rx) = watch::channel(poller.latest());
    let refresh = Arc::new(Notify::new());
    let handle = tokio::spawn(poller.run(
        config.refresh_interval(),
        config.fail_fast,
        tx,
        refresh.clone(),
    ));

    // Query the background colour before raw mode takes over the terminal
    let theme = ui::Theme::auto_detect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(rx, refresh, description, theme);

    // The draw loop blocks on terminal input
    let result = tokio::task::block_in_place(|| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    if handle.is_finished() {
        handle
            .await
            .context("Poller task panicked")?
            .context("Polling nodetool failed")?;
    } else {
        handle.abort();
    }
    info!("nodetop stopped");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        app.sync();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Resize just redraws on the next iteration
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(100))? {
            events::handle_key_event(app, key);
        }

        if app.poller_stopped() {
            warn!("Poller stopped, closing dashboard");
            app.quit();
        }
    }

    Ok(())
}
