//! Simulator command parsing
//!
//! Each stdin line is one command standing in for a host callback or a
//! remote-control key.

use anyhow::{anyhow, bail, Context, Result};
use dmr_renderer::remote::keycode;

/// One simulated host input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCommand {
    /// Media prepared with the given duration
    Ready(i64),
    /// Media player error
    Error { what: i32, extra: i32 },
    /// Media reached its end
    Complete,
    /// Playback advanced to the given position
    Tick(i64),
    /// Raw key code
    Key(i32),
    /// Host volume level after a volume key
    Volume(u16),
    /// Renderer service bound
    Connect,
    /// Renderer service unbound
    Disconnect,
    /// New media request; no URI means the request carried none
    Open(Option<String>),
    Quit,
}

impl SimCommand {
    /// Parse a command line; blank lines and `#` comments yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let mut arg = |what: &str| {
            parts
                .next()
                .ok_or_else(|| anyhow!("'{}' needs a {} argument", name, what))
        };

        let command = match name.as_str() {
            "ready" => SimCommand::Ready(arg("duration")?.parse().context("invalid duration")?),
            "error" => {
                let what = arg("what")?.parse().context("invalid error code")?;
                let extra = arg("extra")?.parse().context("invalid extra code")?;
                SimCommand::Error { what, extra }
            }
            "complete" => SimCommand::Complete,
            "tick" => SimCommand::Tick(arg("position")?.parse().context("invalid position")?),
            "key" => SimCommand::Key(arg("key code")?.parse().context("invalid key code")?),
            "toggle" | "center" => SimCommand::Key(keycode::DPAD_CENTER),
            "left" => SimCommand::Key(keycode::DPAD_LEFT),
            "right" => SimCommand::Key(keycode::DPAD_RIGHT),
            "up" => SimCommand::Key(keycode::DPAD_UP),
            "down" => SimCommand::Key(keycode::DPAD_DOWN),
            "volume" => SimCommand::Volume(arg("level")?.parse().context("invalid volume")?),
            "connect" => SimCommand::Connect,
            "disconnect" => SimCommand::Disconnect,
            "open" => SimCommand::Open(arg("uri").ok().map(str::to_string)),
            "quit" | "exit" => SimCommand::Quit,
            other => bail!("unknown command '{}'", other),
        };

        Ok(Some(command))
    }
}
