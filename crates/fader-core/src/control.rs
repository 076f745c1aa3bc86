//! Control loop state
//!
//! `Controller` owns everything the loop mutates between cycles: the last
//! percent forwarded to the mixer, the slider animation, and the adaptive
//! poll interval. The daemon feeds it one knob reading per cycle; tests
//! feed it synthetic readings and ticks.

use std::io;

use crate::animation::SliderAnimation;
use crate::channel::FrameLink;
use crate::clock::Ticks;
use crate::config::TimingConfig;

/// System mixer capability: fire-and-forget volume updates.
pub trait Mixer {
    fn set_percent(&mut self, percent: u8) -> io::Result<()>;
}

/// Per-cycle control state. See the module docs.
pub struct Controller {
    timing: TimingConfig,
    slider: SliderAnimation,
    last_percent: Option<u8>,
    poll_ms: u64,
}

impl Controller {
    pub fn new(timing: TimingConfig) -> Self {
        let slider = SliderAnimation::new(timing.slide_ms, timing.hold_ms);
        let poll_ms = timing.idle_poll_ms;
        Self {
            timing,
            slider,
            last_percent: None,
            poll_ms,
        }
    }

    /// How long the loop should sleep before the next cycle, in ms.
    pub fn poll_ms(&self) -> u64 {
        self.poll_ms
    }

    pub fn slider(&self) -> &SliderAnimation {
        &self.slider
    }

    /// Run one control cycle with a fresh knob reading.
    ///
    /// Forwards a changed percent to the mixer and the slider (the very
    /// first reading only seeds the mixer, so boot doesn't flash the UI),
    /// then renders-and-publishes a frame if the consumer has pulled the
    /// previous one and the slider is on screen.
    pub fn step<M: Mixer, L: FrameLink>(
        &mut self,
        percent: u8,
        now: Ticks,
        mixer: &mut M,
        link: &mut L,
    ) {
        let percent = percent.min(100);

        if self.last_percent != Some(percent) {
            let first = self.last_percent.is_none();
            self.last_percent = Some(percent);

            if let Err(e) = mixer.set_percent(percent) {
                log::warn!("mixer update failed: {}", e);
            }

            if first {
                log::debug!("initial volume {}%, overlay stays hidden", percent);
            } else {
                log::debug!("volume {}%", percent);
                self.slider.report(percent, now);
                self.poll_ms = self.timing.active_poll_ms;
            }
        }

        // A still-pending frame means the consumer hasn't pulled the last
        // one; skip this cycle rather than write under its feet.
        if !link.is_frame_pending() && !self.slider.is_hidden() {
            if self.slider.advance(now) {
                // Slide-out finished: the render below publishes one final
                // frame with the strip wiped, then the loop slows down.
                self.poll_ms = self.timing.idle_poll_ms;
            }
            {
                let mut surface = link.surface();
                self.slider.render(&mut surface, now);
            }
            link.publish();
        }
    }
}
