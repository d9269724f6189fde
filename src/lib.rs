// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Pixel-accurate glyph layout for GPU text rendering
//!
//! This library converts lines of text into positioned, sized glyph quads
//! ready for upload to the GPU. It does not load fonts, rasterize glyphs,
//! wrap text into lines or render anything: fonts are consumed through the
//! [`fonts::FontFace`] trait, lines arrive pre-split, and the output
//! [`Layout`] is handed to a rendering collaborator opaquely.
//!
//! Layout proceeds in three steps, each available separately:
//!
//! 1.  [`compute_text_size`] measures per-line pixel widths and the overall
//!     bounding metrics of the text.
//! 2.  [`compute_transform_data`] derives a scale and per-line translations
//!     from the measured size, the target size/position and alignment.
//! 3.  [`lay_out_text`] places glyphs, choosing per line between a fast
//!     per-character path and (with the `shaping` feature) a complex
//!     shaping path for scripts that require it.
//!
//! [`prepare`] runs all three.

pub(crate) mod conv;

mod geom;
pub use geom::*;

mod data;
pub use data::*;

mod decode;
pub use decode::DecodeChars;

mod classify;
pub use classify::is_fast_text;

pub mod fonts;

mod size;
pub use size::*;

mod transform;
pub use transform::*;

mod layout;
pub use layout::*;

mod shaper;
#[cfg(feature = "shaping")]
pub use shaper::complex_line_advance;
pub use shaper::{initialize_shaping, lay_out_text, prepare, ShapeEngine};
