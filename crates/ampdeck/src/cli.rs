use std::path::PathBuf;

use ampdeck_backend::{DeviceEnumerator, DisplayList};
use ampdeck_evdev::{SysfsEnumerator, is_event_node};
use ampdeck_runtime::{FanIn, InputSource, PanelConfig, Program, SourceKind};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::controller::MemoryController;
use crate::error::{AppError, Result};
use crate::view::AmpPanel;

#[derive(Debug, Parser)]
#[command(
    name = "ampdeck",
    about = "Touchscreen control panel for a guitar amplifier MIDI controller",
    version
)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `ampdeck_runtime=trace`.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Stop after rendering this many frames. Frames after the first are
    /// only drawn once an input batch arrives.
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Print the input devices found and exit.
    #[arg(long)]
    pub list_devices: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PanelConfig::from_toml_file(path)?,
        None => PanelConfig::default(),
    };
    init_logging(cli.log.as_deref(), &config.logging.filter)?;

    let enumerator = SysfsEnumerator::default();
    if cli.list_devices {
        for device in enumerator.list_devices()? {
            println!("{device}");
        }
        return Ok(());
    }

    run_panel(&enumerator, &config, cli.frames)
}

/// Discover inputs and drive the panel until reset.
pub fn run_panel<E: DeviceEnumerator>(
    enumerator: &E,
    config: &PanelConfig,
    frames: Option<u64>,
) -> Result<()> {
    for path in [&config.input.touch_path, &config.input.footswitch_path]
        .into_iter()
        .flatten()
    {
        if !is_event_node(path) {
            warn!(path = %path.display(), "configured input path is not an evdev node");
        }
    }
    let touch = InputSource::discover(enumerator, SourceKind::Touch, &config.input);
    let footswitch = InputSource::discover(enumerator, SourceKind::Footswitch, &config.input);

    let controller = MemoryController::new(config.programs.clone());
    info!(programs = controller.program_count(), "controller ready");

    let mut program = Program::new(
        DisplayList::new(),
        controller,
        AmpPanel::new(config),
        FanIn::new(touch, footswitch),
        config,
    );
    if let Some(n) = frames {
        program = program.with_frame_limit(n);
    }
    program.run()?;
    Ok(())
}

/// Install the fmt subscriber. `--log` wins, then `RUST_LOG`, then the config.
fn init_logging(cli_filter: Option<&str>, config_filter: &str) -> Result<()> {
    let filter = match cli_filter {
        Some(directive) => EnvFilter::try_new(directive),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config_filter)),
    }
    .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
