//! Build script for fader-core
//!
//! Converts the raw RGBA asset exports under `assets/` into packed-565
//! color and 8-bit alpha arrays, written to `OUT_DIR/assets_gen.rs` and
//! included by `src/assets.rs`. The display panel wants 5-6-5 color and
//! the compositor wants a separate coverage plane, so each RGBA pixel is
//! split here at build time instead of shipping 32-bit art and converting
//! on every draw.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// (static name, source file, width, height)
const IMAGES: &[(&str, &str, usize, usize)] = &[
    ("VOLUME_SLIDER", "assets/volume_slider.rgba", 64, 176),
    ("VOLUME_MUTE", "assets/volume_mute.rgba", 32, 32),
    ("VOLUME_LOW", "assets/volume_low.rgba", 32, 32),
    ("VOLUME_MED", "assets/volume_med.rgba", 32, 32),
    ("VOLUME_FULL", "assets/volume_full.rgba", 32, 32),
];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let mut generated = String::from("// Generated by build.rs - do not edit\n\n");

    for &(name, path, width, height) in IMAGES {
        println!("cargo:rerun-if-changed={path}");

        let data = fs::read(path).unwrap_or_else(|e| panic!("cannot read {path}: {e}"));
        let expected = width * height * 4;
        assert_eq!(
            data.len(),
            expected,
            "{path}: expected {width}x{height} RGBA ({expected} bytes), got {} bytes",
            data.len()
        );

        let mut color = String::new();
        let mut alpha = String::new();
        for (i, px) in data.chunks_exact(4).enumerate() {
            let (r, g, b, a) = (px[0] as u16, px[1] as u16, px[2] as u16, px[3]);
            // Keep in sync with pack_rgb565 in src/types.rs
            let packed = ((r & 0xF8) << 8) | ((g & 0xFC) << 3) | (b >> 3);
            let sep = if i % 12 == 11 { ",\n    " } else { ", " };
            write!(color, "0x{packed:04X}{sep}").unwrap();
            write!(alpha, "0x{a:02X}{sep}").unwrap();
        }

        let pixels = width * height;
        write!(
            generated,
            "static {name}_COLOR: [u16; {pixels}] = [\n    {color}\n];\n\n\
             static {name}_ALPHA: [u8; {pixels}] = [\n    {alpha}\n];\n\n\
             pub static {name}: HardcodedImage = HardcodedImage {{\n    \
             width: {width},\n    height: {height},\n    \
             rgb565: &{name}_COLOR,\n    alpha: &{name}_ALPHA,\n}};\n\n"
        )
        .unwrap();
    }

    fs::write(out_dir.join("assets_gen.rs"), generated).expect("cannot write assets_gen.rs");
}
