// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Complex text shaping
//!
//! Lines containing characters outside the fast Unicode ranges are shaped
//! by an external engine (rustybuzz), then remapped into the same
//! coordinate space as the simple path: engine positions are corrected by
//! the font's own bitmap offsets, and the engine's cumulative advance is
//! recomputed from glyph metrics rather than trusted.

cfg_if::cfg_if! {
    if #[cfg(feature = "shaping")] {

use super::add_glyph_to_layout;
use crate::conv::DPU;
use crate::fonts::{FontFace, GlyphId};
use crate::{CapacityError, Layout, TransformData, Vec2};
use memmap2::Mmap;
use std::fs::File;
use std::path::PathBuf;
use std::sync::OnceLock;
use unicode_bidi::{BidiInfo, Level};

/// Handle to the complex-shaping engine over one font face
///
/// Construct from the same parsed face used for metrics lookups: glyph
/// identifiers must agree between the engine and the [`FontFace`] or
/// shaped output will resolve to the wrong metrics.
pub struct ShapeEngine<'a> {
    shaper: rustybuzz::Face<'a>,
    metrics: &'a ttf_parser::Face<'a>,
    dpu: DPU,
}

// A glyph as reported by the engine: identifier plus pen position.
struct EngineGlyph {
    id: u32,
    position: Vec2,
}

// Engine-reported glyph ids of 0 or ≥ 0xFFFF stand for "no glyph".
fn is_sentinel(id: u32) -> bool {
    id == 0 || id >= 0xFFFF
}

impl<'a> ShapeEngine<'a> {
    /// Construct over a parsed font face at a rendering size in
    /// pixels-per-em
    pub fn new(face: &'a ttf_parser::Face<'a>, dpem: f32) -> Self {
        let dpu = DPU(dpem / f32::from(face.units_per_em()));
        ShapeEngine {
            shaper: rustybuzz::Face::from_face(face.clone()),
            metrics: face,
            dpu,
        }
    }

    // Shape one directional run. Returns glyphs in visual order with pen
    // positions relative to the run origin, plus the run's total advance.
    fn shape_run(&self, text: &str, level: Level) -> (Vec<EngineGlyph>, f32) {
        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(if level.is_rtl() {
            rustybuzz::Direction::RightToLeft
        } else {
            rustybuzz::Direction::LeftToRight
        });
        buffer.guess_segment_properties();
        let output = rustybuzz::shape(&self.shaper, &[], buffer);

        let infos = output.glyph_infos();
        let positions = output.glyph_positions();
        let mut glyphs = Vec::with_capacity(infos.len());
        let mut caret = 0.0f32;
        for (info, pos) in infos.iter().zip(positions) {
            glyphs.push(EngineGlyph {
                id: info.glyph_id,
                position: Vec2(
                    caret + self.dpu.i32_to_px(pos.x_offset),
                    self.dpu.i32_to_px(pos.y_offset),
                ),
            });
            caret += self.dpu.i32_to_px(pos.x_advance);
        }
        (glyphs, caret)
    }

    // Horizontal advance of a glyph from the engine's own metrics.
    fn glyph_h_advance(&self, glyph: GlyphId) -> f32 {
        self.metrics
            .glyph_hor_advance(glyph.into())
            .map(|x| self.dpu.u16_to_px(x))
            .unwrap_or(0.0)
    }
}

// Lays out one complex line. With `layout` supplied, adds glyph records;
// without, only the total advance is computed. Either way the return value
// is the line's final advance in canonical pixels (0 on any degradation).
pub(crate) fn lay_out_line<F: FontFace>(
    face: &F,
    engine: &ShapeEngine<'_>,
    line: &[u8],
    line_index: usize,
    transform: &TransformData,
    layout: Option<&mut Layout>,
) -> Result<f32, CapacityError> {
    if !initialize_shaping() {
        return Ok(0.0);
    }
    let Ok(text) = std::str::from_utf8(line) else {
        log::debug!("complex shaping skipped: line is not valid UTF-8");
        return Ok(0.0);
    };
    if text.is_empty() {
        return Ok(0.0);
    }

    // Order the line's directional runs visually; each run is shaped
    // independently and the pen carries across runs.
    let bidi = BidiInfo::new(text, None);
    let Some(para) = bidi.paragraphs.first() else {
        return Ok(0.0);
    };
    let (levels, runs) = bidi.visual_runs(para, para.range.clone());

    let mut shaped: Vec<EngineGlyph> = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    for run in runs {
        let level = levels[run.start];
        let (glyphs, advance) = engine.shape_run(&text[run.clone()], level);
        shaped.extend(glyphs.into_iter().map(|mut glyph| {
            glyph.position.0 += caret;
            glyph
        }));
        caret += advance;
    }

    if let Some(layout) = layout {
        layout.reserve(shaped.len());
        for engine_glyph in &shaped {
            if is_sentinel(engine_glyph.id) {
                continue;
            }
            let glyph = GlyphId(engine_glyph.id as u16);
            let Some(metrics) = face.glyph_metrics(glyph) else {
                continue;
            };
            // Correct the engine position into the simple path's
            // convention: bearing on x, bottom-anchored on y.
            let glyph_min = Vec2(
                engine_glyph.position.0 + metrics.bitmap_offset.0,
                engine_glyph.position.1
                    + transform.line_y_offset_in_pixels * line_index as f32
                    + (metrics.bitmap_offset.1 - metrics.size.1),
            );
            add_glyph_to_layout(
                glyph,
                line_index,
                glyph_min,
                &metrics,
                transform,
                face.sdf_padding(),
                layout,
            )?;
        }
    }

    // The engine's cumulative advance is known to lie; recompute the total
    // from the last valid glyph's own advance metric and reported position.
    let Some(last) = shaped.iter().rev().find(|glyph| !is_sentinel(glyph.id)) else {
        return Ok(0.0);
    };
    Ok(engine.glyph_h_advance(GlyphId(last.id as u16)) + last.position.0)
}

/// Total advance in canonical pixels of one complex-shaped line
///
/// The advance-only counterpart of full layout: no glyph records are
/// produced. Returns 0 when shaping is unavailable or the line yields no
/// valid glyphs.
pub fn complex_line_advance<F: FontFace>(
    face: &F,
    engine: &ShapeEngine<'_>,
    line: &[u8],
) -> f32 {
    // Without a layout target, capacity cannot be exceeded.
    lay_out_line(face, engine, line, 0, &TransformData::default(), None).unwrap_or(0.0)
}

static ENGINE_DATA: OnceLock<Option<Mmap>> = OnceLock::new();

/// Initialize the shaping engine's data tables
///
/// The first caller performs the lookup; concurrent callers block until it
/// completes and all observe the same outcome, cached for the life of the
/// process. Failure is permanent and the mapped file is never released.
///
/// Complex-line layout calls this implicitly; calling it earlier merely
/// front-loads the work.
pub fn initialize_shaping() -> bool {
    ENGINE_DATA.get_or_init(map_engine_data).is_some()
}

// The data file's exact name varies between systems, so it is selected by
// prefix/suffix match from a per-platform directory.
fn map_engine_data() -> Option<Mmap> {
    cfg_if::cfg_if! {
        if #[cfg(target_os = "android")] {
            let dir = PathBuf::from("/system/usr/share/text-shaping");
        } else if #[cfg(target_os = "macos")] {
            let dir = PathBuf::from("/usr/share/text-shaping");
        } else {
            // Assume a developer machine: an environment variable (set in a
            // test or manually) says where to look.
            let Some(var) = std::env::var_os("QUAD_TEXT_DATA_DIR") else {
                log::error!("QUAD_TEXT_DATA_DIR is not set; complex shaping disabled");
                return None;
            };
            let dir = PathBuf::from(var);
        }
    }

    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::error!("unable to read shaping data directory {}: {err}", dir.display());
            return None;
        }
    };
    let mut path = None;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with("shapedt") && name.ends_with(".dat") {
            path = Some(entry.path());
            break;
        }
    }
    let Some(path) = path else {
        log::error!("unable to find shaping data file in {}", dir.display());
        return None;
    };

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) => {
            log::error!("unable to open shaping data file {}: {err}", path.display());
            return None;
        }
    };
    // Safety: the mapping is read-only and retained for the life of the
    // process; the file is treated as immutable once installed.
    let data = match unsafe { Mmap::map(&file) } {
        Ok(data) => data,
        Err(err) => {
            log::error!("unable to map shaping data file {}: {err}", path.display());
            return None;
        }
    };
    if data.is_empty() {
        log::error!("shaping data file {} is empty", path.display());
        return None;
    }
    Some(data)
}

    } else {

use crate::fonts::FontFace;
use crate::{CapacityError, Layout, TransformData};
use std::marker::PhantomData;

/// Handle to the complex-shaping engine (unavailable: the `shaping`
/// feature is disabled)
///
/// This type cannot be constructed; every line takes the simple path.
pub struct ShapeEngine<'a> {
    _data: PhantomData<&'a ()>,
}

/// Initialize the shaping engine's data tables
///
/// Always false without the `shaping` feature.
pub fn initialize_shaping() -> bool {
    false
}

// Do-nothing variant: with no constructible engine this is unreachable,
// but it keeps the layout engine's dispatch uniform.
pub(crate) fn lay_out_line<F: FontFace>(
    _face: &F,
    _engine: &ShapeEngine<'_>,
    _line: &[u8],
    _line_index: usize,
    _transform: &TransformData,
    _layout: Option<&mut Layout>,
) -> Result<f32, CapacityError> {
    Ok(0.0)
}

    }
}
