use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ColorRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorRgba8 {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Which point of an element's bounding box sits on its `start_point`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Position {
    /// Top-left corner of a `width` x `height` box anchored at `anchor`.
    pub fn top_left(self, anchor: Point, width: f32, height: f32) -> Point {
        let fx = match self {
            Position::TopLeft | Position::Left | Position::BottomLeft => 0.0,
            Position::Top | Position::Center | Position::Bottom => 0.5,
            Position::TopRight | Position::Right | Position::BottomRight => 1.0,
        };
        let fy = match self {
            Position::TopLeft | Position::Top | Position::TopRight => 0.0,
            Position::Left | Position::Center | Position::Right => 0.5,
            Position::BottomLeft | Position::Bottom | Position::BottomRight => 1.0,
        };
        Point {
            x: anchor.x - width * fx,
            y: anchor.y - height * fy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl HorizontalAlignment {
    pub(crate) fn offset(self, available: f32, used: f32) -> f32 {
        match self {
            HorizontalAlignment::Left => 0.0,
            HorizontalAlignment::Center => (available - used) * 0.5,
            HorizontalAlignment::Right => available - used,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlignment {
    pub(crate) fn offset(self, available: f32, used: f32) -> f32 {
        match self {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => (available - used) * 0.5,
            VerticalAlignment::Bottom => available - used,
        }
    }
}

/// Background surface of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,

    #[serde(default)]
    pub color: ColorRgba8,

    // Resized to the canvas size and drawn over `color`.
    #[serde(default)]
    pub image: Option<PathBuf>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color: ColorRgba8::TRANSPARENT,
            image: None,
        }
    }

    pub fn with_color(mut self, color: ColorRgba8) -> Self {
        self.color = color;
        self
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: ColorRgba8,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub start_point: Point,
    pub width: f32,
    pub height: f32,
    pub color: ColorRgba8,

    #[serde(default)]
    pub position: Position,

    #[serde(default)]
    pub outline: Option<Outline>,
}

impl Rectangle {
    pub fn new(start_point: Point, width: f32, height: f32, color: ColorRgba8) -> Self {
        Self {
            start_point,
            width,
            height,
            color,
            position: Position::default(),
            outline: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_outline(mut self, color: ColorRgba8, width: f32) -> Self {
        self.outline = Some(Outline { color, width });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    pub font: PathBuf,
    pub font_size: f32,
    pub color: ColorRgba8,
    pub start_point: Point,

    #[serde(default)]
    pub position: Position,

    // Wrap width; lines are aligned inside this width when set.
    #[serde(default)]
    pub max_width: Option<f32>,

    // Lines that do not fit fully are dropped.
    #[serde(default)]
    pub max_height: Option<f32>,

    // Absolute line advance in pixels; defaults to the font's metrics.
    #[serde(default)]
    pub line_height: Option<f32>,

    #[serde(default)]
    pub horizontal_alignment: HorizontalAlignment,

    #[serde(default)]
    pub vertical_alignment: VerticalAlignment,
}

impl Text {
    pub fn new(
        text: impl Into<String>,
        font: impl Into<PathBuf>,
        font_size: f32,
        color: ColorRgba8,
        start_point: Point,
    ) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            font_size,
            color,
            start_point,
            position: Position::default(),
            max_width: None,
            max_height: None,
            line_height: None,
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_max_width(mut self, max_width: f32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn with_alignment(
        mut self,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    ) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Element {
    Rectangle(Rectangle),
    Text(Text),
}

impl From<Rectangle> for Element {
    fn from(value: Rectangle) -> Self {
        Element::Rectangle(value)
    }
}

impl From<Text> for Element {
    fn from(value: Text) -> Self {
        Element::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_anchors_box_corners() {
        let anchor = Point::new(50.0, 50.0);
        assert_eq!(
            Position::TopLeft.top_left(anchor, 20.0, 10.0),
            Point::new(50.0, 50.0)
        );
        assert_eq!(
            Position::Center.top_left(anchor, 20.0, 10.0),
            Point::new(40.0, 45.0)
        );
        assert_eq!(
            Position::BottomRight.top_left(anchor, 20.0, 10.0),
            Point::new(30.0, 40.0)
        );
        assert_eq!(
            Position::Top.top_left(anchor, 20.0, 10.0),
            Point::new(40.0, 50.0)
        );
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(HorizontalAlignment::Left.offset(100.0, 40.0), 0.0);
        assert_eq!(HorizontalAlignment::Center.offset(100.0, 40.0), 30.0);
        assert_eq!(HorizontalAlignment::Right.offset(100.0, 40.0), 60.0);
        assert_eq!(VerticalAlignment::Bottom.offset(50.0, 20.0), 30.0);
    }

    #[test]
    fn element_json_uses_type_tag_and_defaults() {
        let json = r#"{
            "type": "rectangle",
            "data": {
                "start_point": {"x": 1.0, "y": 2.0},
                "width": 10.0,
                "height": 5.0,
                "color": {"r": 255, "g": 0, "b": 0, "a": 255}
            }
        }"#;
        let element: Element = serde_json::from_str(json).unwrap();
        let Element::Rectangle(rect) = element else {
            panic!("expected rectangle");
        };
        assert_eq!(rect.position, Position::TopLeft);
        assert_eq!(rect.outline, None);
        assert_eq!(rect.color, ColorRgba8::rgb(255, 0, 0));
    }

    #[test]
    fn alignment_names_are_snake_case() {
        let json = serde_json::to_string(&Position::BottomRight).unwrap();
        assert_eq!(json, "\"bottom_right\"");
        let v: VerticalAlignment = serde_json::from_str("\"center\"").unwrap();
        assert_eq!(v, VerticalAlignment::Center);
    }
}
