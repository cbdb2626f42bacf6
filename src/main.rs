//! Phasor map explorer
//!
//! ```bash
//! # Voltage, inductor current and capacitor current
//! phasor-map
//!
//! # Custom set, starting paused, logging to a file
//! phasor-map --paused --log-file phasor.log \
//!     --phasor "V:75:0.1:0" --phasor "I:50:0.1:-1.5708:#ff00ff"
//! ```

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event};
use phasor_map::phasor::PhasorConfig;
use phasor_map::phasor_set::PhasorSet;
use phasor_map::state::ACTIVE_FRAME_RATE;
use phasor_map::terminal::TerminalView;
use phasor_map::widget::{Control, PhasorWidget};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Animated phasor diagram in the terminal
#[derive(Parser, Debug)]
#[command(name = "phasor-map")]
#[command(version, about = "Explore rotating phasors and their sinusoids", long_about = None)]
struct Cli {
    /// Start with the animation paused
    #[arg(long)]
    paused: bool,

    /// Draw rate while playing, in frames per second
    #[arg(long, default_value_t = ACTIVE_FRAME_RATE)]
    frame_rate: u32,

    /// Initial phasor as name:amplitude:frequency:phase[:color] (repeatable)
    #[arg(long = "phasor", value_name = "SPEC")]
    phasors: Vec<PhasorConfig>,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Write logs to this file; nothing is logged without it
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Installs a file-backed subscriber; the returned guard flushes on drop
fn init_logging(level: &str, path: &Path) -> anyhow::Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path '{}' has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_lowercase()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .with(filter)
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(guard)
}

/// Polls input and draws frames until the user quits
fn run(view: &mut TerminalView, widget: &mut PhasorWidget) -> anyhow::Result<()> {
    view.present(widget.canvas(), &widget.status_lines())
        .context("failed to draw first frame")?;

    loop {
        let mut dirty = false;
        if event::poll(widget.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    if widget.handle_key(key) == Control::Quit {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(cols, rows) => {
                    view.resize(cols, rows);
                    dirty = true;
                }
                _ => {}
            }
        }

        if widget.tick(Instant::now()) {
            dirty = true;
        }
        if dirty {
            view.present(widget.canvas(), &widget.status_lines())
                .context("failed to draw frame")?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = match &cli.log_file {
        Some(path) => Some(init_logging(&cli.log_level, path)?),
        None => None,
    };
    info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let set = if cli.phasors.is_empty() {
        PhasorSet::default()
    } else {
        PhasorSet::from_configs(cli.phasors).context("invalid --phasor set")?
    };

    let Some(mut view) = TerminalView::attach().context("failed to set up terminal")? else {
        warn!("No terminal to draw on, skipping setup");
        return Ok(());
    };

    let mut widget = PhasorWidget::new(set, cli.paused, cli.frame_rate);
    let result = run(&mut view, &mut widget);
    drop(view);
    info!("Exiting");
    result
}
