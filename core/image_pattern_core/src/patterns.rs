use crate::context::Context;
use crate::error::{PatternError, Result};
use crate::fonts::FontCache;
use crate::layers::Layer;
use image::{imageops, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// A template that turns a [`Context`] into layers.
///
/// Only [`Pattern::create`] is required. Rendering composites the created
/// layers in order: the first layer sets the size of the output and every
/// later layer is drawn over it at its offset, clipped to the first.
///
/// ```ignore
/// let card = |ctx: &Context| -> Result<Vec<Layer>> {
///     let title: String = ctx.get("title")?;
///     Ok(vec![Layer::new(Canvas::new(400, 200).with_color(ColorRgba8::WHITE))
///         .with_element(Text::new(title, "fonts/Inter.ttf", 32.0, ColorRgba8::BLACK, Point::new(20.0, 20.0)))])
/// };
/// card.save(&Context::new().with("title", "Hello"), Path::new("card.png"))?;
/// ```
pub trait Pattern {
    fn create(&self, context: &Context) -> Result<Vec<Layer>>;

    fn render(&self, context: &Context) -> Result<RgbaImage> {
        self.render_with(context, &mut FontCache::new())
    }

    /// Renders with a caller-owned font cache so fonts survive between renders.
    fn render_with(&self, context: &Context, fonts: &mut FontCache) -> Result<RgbaImage> {
        let layers = self.create(context)?;
        compose(&layers, fonts)
    }

    fn render_png(&self, context: &Context) -> Result<Vec<u8>> {
        encode_png(&self.render(context)?)
    }

    /// Writes the image to `path`; the format follows the file extension.
    fn save(&self, context: &Context, path: &Path) -> Result<()> {
        let image = self.render(context)?;
        image.save(path)?;
        log::debug!("saved pattern to {}", path.display());
        Ok(())
    }
}

impl<F> Pattern for F
where
    F: Fn(&Context) -> Result<Vec<Layer>>,
{
    fn create(&self, context: &Context) -> Result<Vec<Layer>> {
        self(context)
    }
}

pub fn compose(layers: &[Layer], fonts: &mut FontCache) -> Result<RgbaImage> {
    let (base, rest) = layers.split_first().ok_or(PatternError::NoLayers)?;
    if base.offset != Default::default() {
        log::warn!("offset of the first layer is ignored");
    }
    let mut image = base.render(fonts)?;
    for layer in rest {
        let top = layer.render(fonts)?;
        imageops::overlay(
            &mut image,
            &top,
            layer.offset.x.round() as i64,
            layer.offset.y.round() as i64,
        );
    }
    Ok(image)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Canvas, ColorRgba8, Point, Rectangle};
    use image::Rgba;

    fn badge(ctx: &Context) -> Result<Vec<Layer>> {
        let size: u32 = ctx.get_or("size", 8)?;
        let shade: u8 = ctx.get("shade")?;
        Ok(vec![
            Layer::new(Canvas::new(size, size).with_color(ColorRgba8::WHITE)),
            Layer::new(Canvas::new(2, 2).with_color(ColorRgba8::rgb(shade, shade, shade)))
                .at(Point::new(3.0, 4.0)),
        ])
    }

    #[test]
    fn closures_are_patterns() {
        let image = badge.render(&Context::new().with("shade", 9)).unwrap();
        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(*image.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*image.get_pixel(3, 4), Rgba([9, 9, 9, 255]));
        assert_eq!(*image.get_pixel(4, 5), Rgba([9, 9, 9, 255]));
        assert_eq!(*image.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn later_layers_are_clipped_to_the_first() {
        let ctx = Context::new().with("shade", 0).with("size", 4);
        let image = badge.render(&ctx).unwrap();
        assert_eq!(image.dimensions(), (4, 4));
        assert_eq!(*image.get_pixel(3, 3), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn transparent_layers_keep_what_is_below() {
        let pattern = |_: &Context| -> Result<Vec<Layer>> {
            Ok(vec![
                Layer::new(Canvas::new(2, 1).with_color(ColorRgba8::rgb(255, 0, 0))),
                Layer::new(Canvas::new(2, 1)).with_element(Rectangle::new(
                    Point::new(1.0, 0.0),
                    1.0,
                    1.0,
                    ColorRgba8::rgb(0, 255, 0),
                )),
            ])
        };
        let image = pattern.render(&Context::new()).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(1, 0), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn missing_variable_aborts_render() {
        assert!(matches!(
            badge.render(&Context::new()),
            Err(PatternError::MissingVariable(name)) if name == "shade"
        ));
    }

    #[test]
    fn empty_pattern_has_no_layers() {
        let empty = |_: &Context| -> Result<Vec<Layer>> { Ok(Vec::new()) };
        assert!(matches!(
            empty.render(&Context::new()),
            Err(PatternError::NoLayers)
        ));
    }

    #[test]
    fn save_writes_a_readable_image() {
        let path = std::env::temp_dir().join(format!(
            "image-pattern-save-{}.png",
            std::process::id()
        ));
        badge
            .save(&Context::new().with("shade", 9).with("size", 6), &path)
            .unwrap();
        let saved = image::open(&path);
        std::fs::remove_file(&path).unwrap();
        let saved = saved.unwrap().to_rgba8();
        assert_eq!(saved.dimensions(), (6, 6));
        assert_eq!(*saved.get_pixel(3, 4), Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn png_output_has_png_signature() {
        let png = badge.render_png(&Context::new().with("shade", 1)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
