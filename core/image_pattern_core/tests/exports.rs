use image_pattern_core::{
    Canvas, ColorRgba8, Context, HorizontalAlignment, Layer, Pattern, PatternDocument, Point,
    Position, Rectangle, Result, Text, VerticalAlignment, VERSION,
};

#[test]
fn package_names_resolve_from_the_crate_root() {
    let ctx = Context::new().with("label", "hi");
    let text = Text::new("{label}", "unused.ttf", 10.0, ColorRgba8::BLACK, Point::ORIGIN)
        .with_position(Position::Center)
        .with_alignment(HorizontalAlignment::Right, VerticalAlignment::Bottom);
    let layer = Layer::new(Canvas::new(6, 6).with_color(ColorRgba8::WHITE))
        .with_element(Rectangle::new(Point::new(1.0, 1.0), 2.0, 2.0, ColorRgba8::BLACK))
        .with_element(text);

    let doc = PatternDocument::new(vec![layer]);
    let layers = doc.create(&ctx).unwrap();
    assert_eq!(layers.len(), 1);
    assert_eq!(VERSION, "0.0.11");
}

#[test]
fn rendering_a_closure_pattern() {
    let stripes = |ctx: &Context| -> Result<Vec<Layer>> {
        let count: u32 = ctx.get("count")?;
        let mut layer = Layer::new(Canvas::new(count * 2, 1).with_color(ColorRgba8::WHITE));
        for i in 0..count {
            layer.push(Rectangle::new(
                Point::new(i as f32 * 2.0, 0.0),
                1.0,
                1.0,
                ColorRgba8::BLACK,
            ));
        }
        Ok(vec![layer])
    };

    let image = stripes.render(&Context::new().with("count", 3)).unwrap();
    assert_eq!(image.dimensions(), (6, 1));
    let dark: Vec<bool> = image.pixels().map(|p| p.0[0] == 0).collect();
    assert_eq!(dark, vec![true, false, true, false, true, false]);
}
