use crate::draw::Drawable;
use crate::elements::{Canvas, Element, Point};
use crate::error::{PatternError, Result};
use crate::fonts::FontCache;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// A canvas and the elements painted on it, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub canvas: Canvas,

    #[serde(default)]
    pub elements: Vec<Element>,

    // Where this layer lands when composited over the first one.
    #[serde(default)]
    pub offset: Point,
}

impl Layer {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            elements: Vec::new(),
            offset: Point::ORIGIN,
        }
    }

    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.push(element);
        self
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub fn at(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn render(&self, fonts: &mut FontCache) -> Result<RgbaImage> {
        let mut image = self.canvas.background()?;
        for element in &self.elements {
            element.draw(&mut image, fonts)?;
        }
        log::debug!(
            "rendered layer {}x{} with {} elements",
            self.canvas.width,
            self.canvas.height,
            self.elements.len()
        );
        Ok(image)
    }
}

impl Canvas {
    /// Largest canvas, in pixels, a layer may allocate (a 256 MiB RGBA buffer).
    pub const MAX_PIXELS: u64 = 64 * 1024 * 1024;

    /// Size of the RGBA buffer in bytes, or None when the canvas is empty
    /// or larger than [`Canvas::MAX_PIXELS`].
    pub fn buffer_len(&self) -> Option<u64> {
        (self.width as u64)
            .checked_mul(self.height as u64)
            .filter(|&pixels| pixels > 0 && pixels <= Self::MAX_PIXELS)
            .and_then(|pixels| pixels.checked_mul(4))
    }

    pub fn background(&self) -> Result<RgbaImage> {
        if self.buffer_len().is_none() {
            return Err(PatternError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        let c = self.color;
        let mut image = RgbaImage::from_pixel(self.width, self.height, Rgba([c.r, c.g, c.b, c.a]));
        if let Some(path) = &self.image {
            let picture = image::open(path)?.to_rgba8();
            let picture = if picture.dimensions() == (self.width, self.height) {
                picture
            } else {
                imageops::resize(&picture, self.width, self.height, FilterType::Triangle)
            };
            imageops::overlay(&mut image, &picture, 0, 0);
        }
        Ok(image)
    }
}
