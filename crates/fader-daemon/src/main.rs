//! Fader - volume knob overlay daemon
//!
//! Reads the volume pot through an ADS1015 ADC, forwards the level to the
//! system mixer, and renders a transient slider overlay into the shared
//! memory planes the display compositor composites over the framebuffer.
//!
//! The loop runs until the process is killed; there is no shutdown path.
//! The shared memory segments persist across restarts.

mod knob;
mod mixer;

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use fader_core::channel::ShmFrameChannel;
use fader_core::clock::MonotonicClock;
use fader_core::config;
use fader_core::control::Controller;

use knob::Ads1015Knob;
use mixer::AmixerPipe;

fn main() -> Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("fader starting up");

    let config = config::load_config(&config::default_config_path());

    // All three of these are fatal when missing: no mixer, no render
    // target, or no sensor means there is nothing useful to do.
    let mut mixer = AmixerPipe::spawn(&config.mixer).context("mixer unavailable")?;
    let mut channel = ShmFrameChannel::open().context("overlay channel unavailable")?;
    let mut knob =
        Ads1015Knob::open(&config.knob, config.calibration.clone()).context("knob unavailable")?;

    let clock = MonotonicClock::new();
    let mut controller = Controller::new(config.timing.clone());

    log::info!("entering control loop");

    let mut percent: Option<u8> = None;
    loop {
        match knob.read_percent() {
            Ok(p) => percent = Some(p),
            // Transient bus hiccup: keep the previous reading and move on
            Err(e) => log::warn!("knob read failed: {:#}", e),
        }

        if let Some(p) = percent {
            controller.step(p, clock.ticks(), &mut mixer, &mut channel);
        }

        thread::sleep(Duration::from_millis(controller.poll_ms()));
    }
}
