//! Build-time image assets for the overlay
//!
//! The slider panel and the four level icons are raw RGBA exports under
//! `assets/`, converted by `build.rs` into packed-565 color and 8-bit alpha
//! arrays at compile time. Nothing is loaded from disk at runtime.

/// An immutable image baked into the binary. Color is packed 5-6-5,
/// alpha is straight 8-bit coverage (0 = transparent), both row-major.
#[derive(Debug)]
pub struct HardcodedImage {
    pub width: usize,
    pub height: usize,
    pub rgb565: &'static [u16],
    pub alpha: &'static [u8],
}

// VOLUME_SLIDER, VOLUME_MUTE, VOLUME_LOW, VOLUME_MED, VOLUME_FULL
include!(concat!(env!("OUT_DIR"), "/assets_gen.rs"));

/// Pick the icon tier for a volume level.
///
/// 0 is mute, 1-35 low, 36-70 medium, everything above that full.
pub fn icon_for(level: u8) -> &'static HardcodedImage {
    if level == 0 {
        &VOLUME_MUTE
    } else if level <= 35 {
        &VOLUME_LOW
    } else if level <= 70 {
        &VOLUME_MED
    } else {
        &VOLUME_FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_tier_boundaries() {
        assert!(std::ptr::eq(icon_for(0), &VOLUME_MUTE));
        assert!(std::ptr::eq(icon_for(1), &VOLUME_LOW));
        assert!(std::ptr::eq(icon_for(35), &VOLUME_LOW));
        assert!(std::ptr::eq(icon_for(36), &VOLUME_MED));
        assert!(std::ptr::eq(icon_for(70), &VOLUME_MED));
        assert!(std::ptr::eq(icon_for(71), &VOLUME_FULL));
        assert!(std::ptr::eq(icon_for(100), &VOLUME_FULL));
    }

    #[test]
    fn test_asset_dimensions_consistent() {
        for img in [
            &VOLUME_SLIDER,
            &VOLUME_MUTE,
            &VOLUME_LOW,
            &VOLUME_MED,
            &VOLUME_FULL,
        ] {
            assert_eq!(img.rgb565.len(), img.width * img.height);
            assert_eq!(img.alpha.len(), img.width * img.height);
        }
    }

    #[test]
    fn test_icons_share_dimensions() {
        // The level bar is sized off the icon, so all tiers must agree
        for icon in [&VOLUME_MUTE, &VOLUME_LOW, &VOLUME_MED, &VOLUME_FULL] {
            assert_eq!(icon.width, VOLUME_MUTE.width);
            assert_eq!(icon.height, VOLUME_MUTE.height);
        }
    }
}
