use crate::context::{placeholders, Context};
use crate::elements::Element;
use crate::error::{PatternError, Result};
use crate::layers::Layer;
use crate::patterns::Pattern;
use serde::{Deserialize, Serialize};

/// A pattern described as data. Text contents may use `{name}` placeholders
/// which are filled from the context at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDocument {
    pub version: u32,
    pub layers: Vec<Layer>,
}

impl PatternDocument {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(layers: Vec<Layer>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            layers,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: PatternDocument = serde_json::from_str(json)?;
        if doc.version > Self::CURRENT_VERSION {
            return Err(PatternError::UnsupportedVersion(doc.version));
        }
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Every placeholder used by the document's texts, first use first.
    pub fn variables(&self) -> Result<Vec<String>> {
        let mut out: Vec<String> = Vec::new();
        for text in self.texts() {
            for name in placeholders(text)? {
                if !out.contains(&name) {
                    out.push(name);
                }
            }
        }
        Ok(out)
    }

    fn texts(&self) -> impl Iterator<Item = &str> {
        self.layers
            .iter()
            .flat_map(|layer| layer.elements.iter())
            .filter_map(|element| match element {
                Element::Text(text) => Some(text.text.as_str()),
                Element::Rectangle(_) => None,
            })
    }
}

impl Pattern for PatternDocument {
    fn create(&self, context: &Context) -> Result<Vec<Layer>> {
        let mut layers = self.layers.clone();
        for element in layers.iter_mut().flat_map(|layer| layer.elements.iter_mut()) {
            if let Element::Text(text) = element {
                text.text = context.interpolate(&text.text)?;
            }
        }
        Ok(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Canvas, ColorRgba8, Point, Rectangle, Text};

    fn card() -> PatternDocument {
        PatternDocument::new(vec![Layer::new(Canvas::new(10, 10).with_color(ColorRgba8::WHITE))
            .with_element(Rectangle::new(Point::ORIGIN, 5.0, 5.0, ColorRgba8::BLACK))
            .with_element(Text::new(
                "Hello {name}, {{literal}}",
                "fonts/regular.ttf",
                12.0,
                ColorRgba8::BLACK,
                Point::ORIGIN,
            ))
            .with_element(Text::new(
                "{title} by {name}",
                "fonts/regular.ttf",
                12.0,
                ColorRgba8::BLACK,
                Point::ORIGIN,
            ))])
    }

    #[test]
    fn variables_are_collected_across_texts() {
        assert_eq!(card().variables().unwrap(), vec!["name", "title"]);
    }

    #[test]
    fn create_interpolates_texts() {
        let ctx = Context::new().with("name", "Ada").with("title", "Notes");
        let layers = card().create(&ctx).unwrap();
        let texts: Vec<&str> = layers[0]
            .elements
            .iter()
            .filter_map(|e| match e {
                Element::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Hello Ada, {literal}", "Notes by Ada"]);
    }

    #[test]
    fn json_roundtrip_loads() {
        let doc = card();
        let json = doc.to_json().unwrap();
        assert_eq!(PatternDocument::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let json = r#"{
            "version": 1,
            "layers": [{"canvas": {"width": 2, "height": 3}}]
        }"#;
        let doc = PatternDocument::from_json(json).unwrap();
        let image = doc.render(&Context::new()).unwrap();
        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(image.get_pixel(1, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn oversized_canvas_fails_to_render() {
        let json = r#"{
            "version": 1,
            "layers": [{"canvas": {"width": 4294967295, "height": 4294967295}}]
        }"#;
        let doc = PatternDocument::from_json(json).unwrap();
        assert!(matches!(
            doc.render(&Context::new()),
            Err(PatternError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn newer_versions_are_rejected() {
        let json = r#"{"version": 7, "layers": []}"#;
        assert!(matches!(
            PatternDocument::from_json(json),
            Err(PatternError::UnsupportedVersion(7))
        ));
    }
}
