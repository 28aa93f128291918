use crate::elements::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

/// Integer pixel bounds, `x1`/`y1` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSpan {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Rect {
    pub fn from_points(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let max_x = a.x.max(b.x);
        let min_y = a.y.min(b.y);
        let max_y = a.y.max(b.y);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_origin_size(origin: Point, width: f32, height: f32) -> Self {
        Self {
            min_x: origin.x,
            min_y: origin.y,
            max_x: origin.x + width,
            max_y: origin.y + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point {
            x: (self.min_x + self.max_x) * 0.5,
            y: (self.min_y + self.max_y) * 0.5,
        }
    }

    pub fn intersect(&self, other: Rect) -> Option<Rect> {
        let r = Rect {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        if r.width() <= 0.0 || r.height() <= 0.0 {
            None
        } else {
            Some(r)
        }
    }

    /// Rounds to whole pixels and clips to a `width` x `height` image.
    pub fn pixel_span(&self, width: u32, height: u32) -> Option<PixelSpan> {
        let clamp = |v: f32, max: u32| -> u32 {
            if v.is_nan() || v <= 0.0 {
                0
            } else {
                (v.round() as u32).min(max)
            }
        };
        let span = PixelSpan {
            x0: clamp(self.min_x, width),
            y0: clamp(self.min_y, height),
            x1: clamp(self.max_x, width),
            y1: clamp(self.max_y, height),
        };
        if span.x0 >= span.x1 || span.y0 >= span.y1 {
            None
        } else {
            Some(span)
        }
    }
}
