use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use dmr_renderer::logging::{init_logging, LoggingMode};
use dmr_renderer::{RendererConfig, RendererSession, SessionError, VolumeLevel};
use last_change::{EventedVariable, LastChangeBus};

mod script;

use script::SimCommand;

/// DLNA renderer session simulator
///
/// Opens one playback session, feeds it commands read from stdin and prints
/// every LastChange notification and toast the session produces.
#[derive(Parser, Debug)]
#[command(name = "dmr-sim")]
#[command(about = "Drive a DLNA renderer playback session from stdin")]
#[command(version)]
pub struct Args {
    /// Media URI to open
    #[arg(short, long)]
    pub uri: Option<String>,

    /// JSON renderer config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Forward volume changes to RenderingControl
    #[arg(long)]
    pub volume_events: bool,

    /// Display size used for toast placement, as WIDTHxHEIGHT
    #[arg(long, default_value = "1920x1080")]
    pub display: String,

    /// Start with the renderer service unbound
    #[arg(long)]
    pub no_connect: bool,

    /// Logging mode (silent, development, debug)
    #[arg(long, default_value = "development")]
    pub log_mode: String,
}

impl Args {
    fn display_size(&self) -> Result<(u32, u32)> {
        let (w, h) = self
            .display
            .split_once(['x', 'X'])
            .ok_or_else(|| anyhow!("Invalid display size '{}', expected WIDTHxHEIGHT", self.display))?;
        let width = w.parse().context("Invalid display width")?;
        let height = h.parse().context("Invalid display height")?;
        Ok((width, height))
    }

    fn renderer_config(&self) -> Result<RendererConfig> {
        let config = match &self.config {
            Some(path) => RendererConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RendererConfig::default(),
        };
        Ok(if self.volume_events {
            config.with_volume_events(true)
        } else {
            config
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mode: LoggingMode = args.log_mode.parse()?;
    init_logging(mode)?;

    let config = args.renderer_config()?;
    let (width, height) = args.display_size()?;

    let mut session = match RendererSession::open(config, args.uri.as_deref()) {
        Ok(session) => session.with_display(width, height),
        Err(SessionError::MissingUri) => {
            println!("toast: {}", SessionError::MissingUri);
            return Err(anyhow!("No media URI supplied, session not started"));
        }
        Err(e) => return Err(e.into()),
    };

    let bus = Arc::new(LastChangeBus::new());
    if !args.no_connect {
        session.bus_connected(&bus);
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let command = match SimCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("{:#}", e);
                continue;
            }
        };

        if command == SimCommand::Quit {
            break;
        }
        apply(&mut session, &bus, command);
        print_events(&bus);

        if session.is_finished() {
            info!("session finished");
            break;
        }
    }

    session.destroy();
    print_events(&bus);

    match session.end_reason() {
        Some(reason) => Err(anyhow!("Session ended: {}", reason)),
        None => Ok(()),
    }
}

fn apply(session: &mut RendererSession, bus: &Arc<LastChangeBus>, command: SimCommand) {
    match command {
        SimCommand::Ready(duration) => session.on_prepared(duration),
        SimCommand::Error { what, extra } => {
            session.on_error(what, extra);
        }
        SimCommand::Complete => {
            session.on_completion();
        }
        SimCommand::Tick(position) => session.on_progress(position),
        SimCommand::Key(code) => {
            if let Some(toast) = session.handle_key(code) {
                println!(
                    "toast: {} (offset {},{})",
                    toast.text, toast.placement.offset_x, toast.placement.offset_y
                );
            }
        }
        SimCommand::Volume(level) => session.handle_volume(VolumeLevel::new(level)),
        SimCommand::Connect => session.bus_connected(bus),
        SimCommand::Disconnect => session.bus_disconnected(),
        SimCommand::Open(uri) => {
            if let Err(e) = session.reopen(uri.as_deref()) {
                println!("toast: {}", e);
            }
        }
        SimCommand::Quit => {}
    }
}

fn print_events(bus: &LastChangeBus) {
    for event in bus.drain() {
        let value = match event.variable {
            EventedVariable::TransportState(state) => state.to_string(),
            EventedVariable::Volume(volume) => format!("{:?}={}", volume.channel, volume.volume),
        };
        println!(
            "event: {} {}={} (instance {})",
            event.service().name(),
            event.variable.name(),
            value,
            event.instance_id
        );
    }
}
