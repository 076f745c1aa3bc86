//! Shared-memory frame channel to the display compositor
//!
//! Three System V shared memory regions at well-known keys: a one-byte
//! frame-ready flag, the 16-bit color plane, and the 8-bit alpha plane.
//! The handshake is a single flag, not a lock: we raise it after finishing
//! a frame, the consumer clears it after pulling the planes. A consumer
//! that reads the planes while ignoring the flag can observe a torn frame;
//! that is a known, tolerated property of the protocol.
//!
//! The regions are created if absent, attached otherwise, and never
//! destroyed by this process; the segments outlive us across restarts.

use std::io;
use std::ptr;
use std::slice;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::compositor::Surface;
use crate::types::SCREEN_PIXELS;

/// Shared memory key for the frame-ready flag.
const SHM_KEY_UPDATE: libc::key_t = 1022;
/// Shared memory key for the color plane.
const SHM_KEY_COLOR: libc::key_t = 1023;
/// Shared memory key for the alpha plane.
const SHM_KEY_ALPHA: libc::key_t = SHM_KEY_COLOR + 20;

/// Errors raised while opening the channel. All are fatal: without a render
/// target the process has nothing to do.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// shmget failed (permissions, exhausted segments)
    #[error("failed to create shared memory region `{region}`: {source}")]
    Create {
        region: &'static str,
        source: io::Error,
    },

    /// shmat failed
    #[error("failed to attach shared memory region `{region}`: {source}")]
    Attach {
        region: &'static str,
        source: io::Error,
    },
}

/// Result type for channel operations
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Producer-side view of a frame channel.
///
/// `Surface` hands the planes to the compositor; `publish` raises the
/// frame-ready flag. The producer must finish every plane write before
/// publishing and must not start new writes until the flag reads clear.
pub trait FrameLink {
    /// Current flag value, no side effects.
    fn is_frame_pending(&self) -> bool;

    /// Mark the current plane contents as a complete frame.
    fn publish(&mut self);

    /// Mutable view of both planes for drawing.
    fn surface(&mut self) -> Surface<'_>;
}

/// The real channel: three attached System V segments.
pub struct ShmFrameChannel {
    flag: *mut AtomicBool,
    color: *mut u16,
    alpha: *mut u8,
}

impl ShmFrameChannel {
    /// Create-or-attach the three regions and publish one forced-empty
    /// frame: both planes zeroed, flag raised. On first creation this gives
    /// the consumer a well-defined initial pull; on re-attach it clears
    /// whatever overlay a previous run left on screen.
    pub fn open() -> ChannelResult<Self> {
        let flag = attach_region("update", SHM_KEY_UPDATE, 1)? as *mut AtomicBool;
        let color = attach_region("color", SHM_KEY_COLOR, SCREEN_PIXELS * 2)? as *mut u16;
        let alpha = attach_region("alpha", SHM_KEY_ALPHA, SCREEN_PIXELS)? as *mut u8;

        // Safety: the regions were just attached at the sizes above and stay
        // mapped for the process lifetime; this process is the only writer.
        unsafe {
            ptr::write_bytes(color, 0, SCREEN_PIXELS);
            ptr::write_bytes(alpha, 0, SCREEN_PIXELS);
            (*flag).store(true, Ordering::Release);
        }

        log::debug!("overlay channel attached (keys {SHM_KEY_UPDATE}/{SHM_KEY_COLOR}/{SHM_KEY_ALPHA})");

        Ok(Self { flag, color, alpha })
    }
}

impl FrameLink for ShmFrameChannel {
    fn is_frame_pending(&self) -> bool {
        // Safety: flag points at a live mapping for the process lifetime.
        unsafe { &*self.flag }.load(Ordering::Acquire)
    }

    fn publish(&mut self) {
        // Release pairs with the consumer's acquire: every plane write above
        // this store is visible once the flag reads true.
        unsafe { &*self.flag }.store(true, Ordering::Release);
    }

    fn surface(&mut self) -> Surface<'_> {
        // Safety: both planes stay mapped at SCREEN_PIXELS elements for the
        // process lifetime and nothing else in this process aliases them.
        unsafe {
            Surface {
                color: slice::from_raw_parts_mut(self.color, SCREEN_PIXELS),
                alpha: slice::from_raw_parts_mut(self.alpha, SCREEN_PIXELS),
            }
        }
    }
}

/// shmget + shmat one region, creating it with mode 0666 if absent.
fn attach_region(
    region: &'static str,
    key: libc::key_t,
    size: usize,
) -> ChannelResult<*mut libc::c_void> {
    let id = unsafe { libc::shmget(key, size, libc::IPC_CREAT | 0o666) };
    if id == -1 {
        return Err(ChannelError::Create {
            region,
            source: io::Error::last_os_error(),
        });
    }

    let addr = unsafe { libc::shmat(id, ptr::null(), 0) };
    if addr as isize == -1 {
        return Err(ChannelError::Attach {
            region,
            source: io::Error::last_os_error(),
        });
    }

    Ok(addr)
}

/// In-process channel backed by ordinary Vecs.
///
/// Used by the unit tests to drive the render path without real shared
/// memory; `consume` plays the consumer's half of the handshake.
pub struct MemoryFrameChannel {
    pending: bool,
    publishes: u64,
    color: Vec<u16>,
    alpha: Vec<u8>,
}

impl MemoryFrameChannel {
    pub fn new() -> Self {
        Self {
            pending: false,
            publishes: 0,
            color: vec![0; SCREEN_PIXELS],
            alpha: vec![0; SCREEN_PIXELS],
        }
    }

    /// Consumer side: pull the frame, clearing the flag.
    pub fn consume(&mut self) {
        self.pending = false;
    }

    /// Total frames published so far.
    pub fn publish_count(&self) -> u64 {
        self.publishes
    }

    pub fn color(&self) -> &[u16] {
        &self.color
    }

    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }
}

impl Default for MemoryFrameChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLink for MemoryFrameChannel {
    fn is_frame_pending(&self) -> bool {
        self.pending
    }

    fn publish(&mut self) {
        self.pending = true;
        self.publishes += 1;
    }

    fn surface(&mut self) -> Surface<'_> {
        Surface {
            color: &mut self.color,
            alpha: &mut self.alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_channel_handshake() {
        let mut link = MemoryFrameChannel::new();
        assert!(!link.is_frame_pending());

        link.publish();
        assert!(link.is_frame_pending());
        assert_eq!(link.publish_count(), 1);

        link.consume();
        assert!(!link.is_frame_pending());
        // Consuming doesn't forget how many frames were produced
        assert_eq!(link.publish_count(), 1);
    }

    #[test]
    fn test_memory_channel_planes_sized_for_screen() {
        let mut link = MemoryFrameChannel::new();
        let surface = link.surface();
        assert_eq!(surface.color.len(), SCREEN_PIXELS);
        assert_eq!(surface.alpha.len(), SCREEN_PIXELS);
    }
}
