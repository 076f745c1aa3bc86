//! System mixer control via a persistent amixer pipe
//!
//! The mixer binary is started once in stdin-command mode and kept open for
//! the process lifetime; each volume change is a single text line. Nothing
//! is read back; updates are fire-and-forget.

use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::{Context, Result};

use fader_core::config::MixerConfig;
use fader_core::control::Mixer;

pub struct AmixerPipe {
    // Held so the child isn't reaped while we still write to it
    _child: Child,
    stdin: ChildStdin,
    control: String,
}

impl AmixerPipe {
    /// Spawn the mixer process. Fatal if the binary can't be started:
    /// without a mixer the knob has nothing to act on.
    pub fn spawn(config: &MixerConfig) -> Result<Self> {
        let mut child = Command::new(&config.command)
            .arg("-s")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .with_context(|| format!("cannot start mixer command `{}`", config.command))?;

        let stdin = child.stdin.take().context("mixer stdin was not piped")?;

        log::info!("mixer pipe open: {} (control {})", config.command, config.control);

        Ok(Self {
            _child: child,
            stdin,
            control: config.control.clone(),
        })
    }
}

impl Mixer for AmixerPipe {
    fn set_percent(&mut self, percent: u8) -> io::Result<()> {
        writeln!(self.stdin, "set {} {}%", self.control, percent)?;
        self.stdin.flush()
    }
}
