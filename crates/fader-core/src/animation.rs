//! Time-driven slider animation state machine
//!
//! The slider lives in one of four phases. Every non-hidden phase carries
//! the tick at which it was entered, so the current offset is a pure
//! function of "now" and can be tested without a running loop:
//!
//! - `Hidden`: parked fully off the right edge.
//! - `SlidingIn`: interpolating from off-screen to fully on-screen.
//! - `Shown`: parked on-screen while the hold timer runs.
//! - `SlidingOut`: interpolating back off-screen.
//!
//! Volume reports drive the phase changes; `advance` handles the purely
//! time-driven ones (slide finished, hold expired).

use crate::assets::{self, VOLUME_SLIDER};
use crate::clock::Ticks;
use crate::compositor::{self, Surface};
use crate::types::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Gap around the icon inside the slider panel, in pixels.
const ICON_MARGIN: usize = 5;

/// Animation phase plus the tick it was entered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    SlidingIn { since: Ticks },
    Shown { since: Ticks },
    SlidingOut { since: Ticks },
}

/// The slider's animation state and the level it displays.
///
/// The level is independent of the phase: it tracks the knob even while the
/// panel is off-screen or mid-slide.
#[derive(Debug)]
pub struct SliderAnimation {
    phase: Phase,
    level: u8,
    slide_ms: u64,
    hold_ms: u64,
}

impl SliderAnimation {
    pub fn new(slide_ms: u64, hold_ms: u64) -> Self {
        Self {
            phase: Phase::Hidden,
            level: 0,
            slide_ms,
            hold_ms,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_hidden(&self) -> bool {
        self.phase == Phase::Hidden
    }

    /// Register a new volume report.
    ///
    /// Hidden starts a slide-in; Shown refreshes the hold timer without
    /// restarting the slide; SlidingOut reverses into a slide-in whose start
    /// tick is back-dated so the offset continues from where the slide-out
    /// currently is, with no visible jump. A report mid-slide-in just
    /// updates the displayed level.
    pub fn report(&mut self, level: u8, now: Ticks) {
        self.level = level.min(100);
        self.phase = match self.phase {
            Phase::Hidden => Phase::SlidingIn { since: now },
            Phase::Shown { .. } => Phase::Shown { since: now },
            Phase::SlidingOut { since } => {
                // A slide-out at elapsed e sits at the same offset as a
                // slide-in at elapsed (slide_ms - e); credit that much.
                let spent = now.saturating_sub(since).min(self.slide_ms);
                Phase::SlidingIn {
                    since: (now + spent).saturating_sub(self.slide_ms),
                }
            }
            sliding_in @ Phase::SlidingIn { .. } => sliding_in,
        };
    }

    /// Advance the time-driven transitions. Returns `true` when the slider
    /// just finished sliding out, i.e. Hidden was (re-)entered, which is the
    /// caller's cue to stretch its polling cadence.
    pub fn advance(&mut self, now: Ticks) -> bool {
        match self.phase {
            Phase::SlidingIn { since } if now.saturating_sub(since) >= self.slide_ms => {
                self.phase = Phase::Shown {
                    since: since + self.slide_ms,
                };
            }
            Phase::Shown { since } if now.saturating_sub(since) >= self.hold_ms => {
                self.phase = Phase::SlidingOut {
                    since: since + self.hold_ms,
                };
            }
            Phase::SlidingOut { since } if now.saturating_sub(since) >= self.slide_ms => {
                self.phase = Phase::Hidden;
                return true;
            }
            _ => {}
        }
        false
    }

    /// Left edge of the slider panel at `now`. Always within
    /// `[SCREEN_WIDTH - panel width, SCREEN_WIDTH]`.
    pub fn offset(&self, now: Ticks) -> usize {
        let travel = VOLUME_SLIDER.width;
        let shown_x = SCREEN_WIDTH - travel;
        match self.phase {
            Phase::Hidden => SCREEN_WIDTH,
            Phase::Shown { .. } => shown_x,
            Phase::SlidingIn { since } => {
                SCREEN_WIDTH - travelled(travel, now.saturating_sub(since), self.slide_ms)
            }
            Phase::SlidingOut { since } => {
                shown_x + travelled(travel, now.saturating_sub(since), self.slide_ms)
            }
        }
    }

    /// Draw the slider at its current offset.
    ///
    /// Clears the alpha over the strip between the fully-shown rectangle and
    /// the current panel position (the area vacated while retreating), then
    /// stamps the panel, the level icon, and the two bar segments. At the
    /// Hidden offset every blit clips away and only the clear remains, which
    /// is exactly the final "wipe the overlay" frame.
    pub fn render(&self, surface: &mut Surface<'_>, now: Ticks) {
        let panel = &VOLUME_SLIDER;
        let icon = assets::icon_for(self.level);

        let x = self.offset(now);
        let shown_x = SCREEN_WIDTH - panel.width;
        let y = (SCREEN_HEIGHT - panel.height) / 2;

        compositor::clear_alpha_rect(
            surface,
            shown_x as i32,
            y as i32,
            (x - shown_x) as i32,
            panel.height as i32,
        );
        compositor::blit_image(surface, panel, x as i32, y as i32, true);

        let icon_x = x + (panel.width - icon.width) / 2;
        let icon_y = y + ICON_MARGIN;
        compositor::blit_image(surface, icon, icon_x as i32, icon_y as i32, false);

        let bar_w = icon.width;
        let bar_h = panel.height - icon.height - ICON_MARGIN * 3;
        let bar_x = x + (panel.width - bar_w) / 2;
        let bar_y = icon_y + icon.height + ICON_MARGIN;
        let filled = (bar_h as f32 * self.level as f32 / 100.0).round() as usize;
        let unfilled = bar_h - filled;

        compositor::fill_rect(
            surface,
            bar_x as i32,
            bar_y as i32,
            bar_w as i32,
            unfilled as i32,
            0x00,
            0x00,
            0x00,
        );
        compositor::fill_rect(
            surface,
            bar_x as i32,
            (bar_y + unfilled) as i32,
            bar_w as i32,
            filled as i32,
            0xFF,
            0xFF,
            0x00,
        );
    }
}

/// Pixels travelled along `travel` after `elapsed` of `duration` ms,
/// linearly, fraction clamped to [0, 1].
fn travelled(travel: usize, elapsed: Ticks, duration: u64) -> usize {
    if duration == 0 {
        return travel;
    }
    let fraction = (elapsed as f32 / duration as f32).clamp(0.0, 1.0);
    (travel as f32 * fraction).round() as usize
}
