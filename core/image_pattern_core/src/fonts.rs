use crate::draw::blend_pixel;
use crate::elements::{ColorRgba8, Point};
use crate::error::{PatternError, Result};
use ab_glyph::{point, Font as _, FontVec, Glyph, GlyphId, PxScale, ScaleFont};
use image::RgbaImage;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Font metrics needed to lay out text.
pub trait TextMeasure {
    fn text_width(&self, text: &str, size: f32) -> f32;
    fn ascent(&self, size: f32) -> f32;
    fn line_height(&self, size: f32) -> f32;
}

pub struct Font {
    inner: FontVec,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("glyphs", &self.inner.glyph_count())
            .finish()
    }
}

impl Font {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let inner = FontVec::try_from_vec(bytes)
            .map_err(|e| PatternError::InvalidFont(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes).map_err(|e| match e {
            PatternError::InvalidFont(reason) => {
                PatternError::InvalidFont(format!("{}: {reason}", path.display()))
            }
            other => other,
        })
    }

    /// Rasterizes one line of text with its top-left corner at `origin`.
    pub fn draw_line(
        &self,
        image: &mut RgbaImage,
        text: &str,
        size: f32,
        origin: Point,
        color: ColorRgba8,
    ) {
        let (width, height) = image.dimensions();
        let baseline = origin.y + self.ascent(size);
        self.layout_glyphs(text, size, origin.x, baseline, |glyph| {
            let Some(outlined) = self.inner.outline_glyph(glyph) else {
                return;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                    return;
                }
                blend_pixel(image.get_pixel_mut(x as u32, y as u32), color, coverage);
            });
        });
    }

    // Walks the glyphs of a single line, applying kerning. Returns the advance.
    fn layout_glyphs(
        &self,
        text: &str,
        size: f32,
        x: f32,
        baseline: f32,
        mut each: impl FnMut(Glyph),
    ) -> f32 {
        let scaled = self.inner.as_scaled(PxScale::from(size));
        let mut caret = x;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            if c.is_control() {
                continue;
            }
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            each(id.with_scale_and_position(scaled.scale(), point(caret, baseline)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
        caret - x
    }
}

impl TextMeasure for Font {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        self.layout_glyphs(text, size, 0.0, 0.0, |_| {})
    }

    fn ascent(&self, size: f32) -> f32 {
        self.inner.as_scaled(PxScale::from(size)).ascent()
    }

    fn line_height(&self, size: f32) -> f32 {
        let scaled = self.inner.as_scaled(PxScale::from(size));
        scaled.height() + scaled.line_gap()
    }
}

/// Fonts loaded during a render, keyed by path.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: HashMap<PathBuf, Arc<Font>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an already loaded font under `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, font: Font) {
        self.fonts.insert(path.into(), Arc::new(font));
    }

    pub fn get(&mut self, path: &Path) -> Result<Arc<Font>> {
        if let Some(font) = self.fonts.get(path) {
            return Ok(Arc::clone(font));
        }
        let font = Arc::new(Font::from_file(path)?);
        log::debug!("loaded font {}", path.display());
        self.fonts.insert(path.to_path_buf(), Arc::clone(&font));
        Ok(font)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
