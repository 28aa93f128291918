use crate::elements::{ColorRgba8, Element, Rectangle, Text};
use crate::error::Result;
use crate::fonts::FontCache;
use crate::geometry::Rect;
use crate::text::layout_text;
use image::{Rgba, RgbaImage};

/// Something that paints itself onto a layer image.
pub trait Drawable {
    fn draw(&self, image: &mut RgbaImage, fonts: &mut FontCache) -> Result<()>;
}

/// Source-over blend of `src` onto `dst`, scaled by `coverage` in [0, 1].
pub fn blend_pixel(dst: &mut Rgba<u8>, src: ColorRgba8, coverage: f32) {
    let sa = (src.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let [dr, dg, db, da] = dst.0;
    let da = da as f32 / 255.0;
    let keep = da * (1.0 - sa);
    let out_a = sa + keep;
    let mix = |s: u8, d: u8| -> u8 {
        ((s as f32 * sa + d as f32 * keep) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    dst.0 = [
        mix(src.r, dr),
        mix(src.g, dg),
        mix(src.b, db),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ];
}

/// Blends `color` over the pixels covered by `rect`. Returns false when
/// the rect misses the image.
pub fn fill_rect(image: &mut RgbaImage, rect: Rect, color: ColorRgba8) -> bool {
    let (width, height) = image.dimensions();
    let Some(span) = rect.pixel_span(width, height) else {
        return false;
    };
    for y in span.y0..span.y1 {
        for x in span.x0..span.x1 {
            blend_pixel(image.get_pixel_mut(x, y), color, 1.0);
        }
    }
    true
}

impl Drawable for Rectangle {
    fn draw(&self, image: &mut RgbaImage, _fonts: &mut FontCache) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            log::debug!("skipping empty rectangle {}x{}", self.width, self.height);
            return Ok(());
        }
        let origin = self
            .position
            .top_left(self.start_point, self.width, self.height);
        let rect = Rect::from_origin_size(origin, self.width, self.height);
        if !fill_rect(image, rect, self.color) {
            log::debug!("rectangle at ({}, {}) is outside the canvas", origin.x, origin.y);
            return Ok(());
        }

        let Some(outline) = self.outline else {
            return Ok(());
        };
        if outline.width <= 0.0 {
            return Ok(());
        }
        // Bands are inset so they never overlap each other.
        let t = outline.width.min(self.width * 0.5).min(self.height * 0.5);
        let bands = [
            Rect {
                max_y: rect.min_y + t,
                ..rect
            },
            Rect {
                min_y: rect.max_y - t,
                ..rect
            },
            Rect {
                min_y: rect.min_y + t,
                max_y: rect.max_y - t,
                max_x: rect.min_x + t,
                ..rect
            },
            Rect {
                min_y: rect.min_y + t,
                max_y: rect.max_y - t,
                min_x: rect.max_x - t,
                ..rect
            },
        ];
        for band in bands {
            fill_rect(image, band, outline.color);
        }
        Ok(())
    }
}

impl Drawable for Text {
    fn draw(&self, image: &mut RgbaImage, fonts: &mut FontCache) -> Result<()> {
        let font = fonts.get(&self.font)?;
        let layout = layout_text(self, &*font)?;

        if layout.lines.is_empty() {
            log::debug!("text {:?} has no lines that fit its box", self.text);
            return Ok(());
        }

        let (width, height) = image.dimensions();
        let canvas = Rect::from_origin_size(Default::default(), width as f32, height as f32);
        let visible = layout
            .lines
            .iter()
            .map(|l| Rect::from_origin_size(l.origin, l.width, layout.line_height))
            .any(|r| r.intersect(canvas).is_some());
        if !visible {
            log::debug!("text {:?} is outside the canvas", self.text);
            return Ok(());
        }

        for line in &layout.lines {
            font.draw_line(image, &line.text, self.font_size, line.origin, self.color);
        }
        Ok(())
    }
}

impl Drawable for Element {
    fn draw(&self, image: &mut RgbaImage, fonts: &mut FontCache) -> Result<()> {
        match self {
            Element::Rectangle(rect) => rect.draw(image, fonts),
            Element::Text(text) => text.draw(image, fonts),
        }
    }
}
