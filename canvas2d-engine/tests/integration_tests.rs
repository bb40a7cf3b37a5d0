//! Integration tests for canvas2d-engine.

use canvas2d_engine::{
    ArcParams, Canvas2dContext, CanvasFillRule, CubicBezierParams, DOMMatrix, EllipseParams,
    FontConfig, GlyphRasterizer, GlyphRun, LineCap, Path2D, QuadraticBezierParams, RectParams,
    TextMetrics,
};

fn pixel(ctx: &Canvas2dContext, x: i32, y: i32) -> [u8; 4] {
    let data = ctx.get_image_data(x, y, 1, 1).unwrap();
    let d = data.data();
    [d[0], d[1], d[2], d[3]]
}

/// Test creating a canvas and drawing basic shapes.
#[test]
fn test_draw_rectangle() {
    let mut ctx = Canvas2dContext::new(200, 200).unwrap();

    ctx.set_fill_style("#ff0000").unwrap();
    ctx.fill_rect(&RectParams::new(10.0, 10.0, 100.0, 100.0));

    let data = ctx.get_image_data(0, 0, 200, 200).unwrap();
    assert_eq!(data.data().len(), 200 * 200 * 4);

    // Inside the rectangle
    assert_eq!(pixel(&ctx, 50, 50), [255, 0, 0, 255]);
    // Outside
    assert_eq!(pixel(&ctx, 150, 150), [0, 0, 0, 0]);
}

/// Test path operations.
#[test]
fn test_path_operations() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.set_fill_style("#00ff00").unwrap();
    ctx.begin_path();
    ctx.move_to(10.0, 10.0);
    ctx.line_to(90.0, 10.0);
    ctx.line_to(90.0, 90.0);
    ctx.line_to(10.0, 90.0);
    ctx.close_path();
    ctx.fill();

    assert_eq!(pixel(&ctx, 50, 50), [0, 255, 0, 255]);
    assert_eq!(pixel(&ctx, 5, 5), [0, 0, 0, 0]);
}

/// Test stroke operations.
#[test]
fn test_stroke_operations() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.set_stroke_style("#0000ff").unwrap();
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(10.0, 50.0);
    ctx.line_to(90.0, 50.0);
    ctx.stroke();

    // The line covers rows 49 and 50
    assert_eq!(pixel(&ctx, 50, 50), [0, 0, 255, 255]);
    assert_eq!(pixel(&ctx, 50, 49), [0, 0, 255, 255]);
    assert_eq!(pixel(&ctx, 50, 52), [0, 0, 0, 0]);
    // Butt caps do not extend past the end points
    assert_eq!(pixel(&ctx, 92, 50), [0, 0, 0, 0]);
}

#[test]
fn test_square_cap_extends_line() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();
    ctx.set_line_width(4.0);
    ctx.set_line_cap(LineCap::Square);
    ctx.move_to(10.0, 50.0);
    ctx.line_to(90.0, 50.0);
    ctx.stroke();
    assert_eq!(pixel(&ctx, 91, 50)[3], 255);
}

/// Test save/restore state.
#[test]
fn test_save_restore_state() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.set_fill_style("#ff0000").unwrap();
    ctx.set_line_width(5.0);

    ctx.save();
    ctx.set_fill_style("#00ff00").unwrap();
    ctx.set_line_width(10.0);
    ctx.translate(50.0, 0.0);
    ctx.rect(&RectParams::new(0.0, 0.0, 10.0, 10.0));
    ctx.clip();
    assert_eq!(ctx.get_line_width(), 10.0);

    ctx.restore();
    assert_eq!(ctx.get_line_width(), 5.0);
    assert!(ctx.get_transform().is_identity());

    // The clip went away with the restore
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(pixel(&ctx, 5, 5), [255, 0, 0, 255]);

    // Restore with an empty stack is a no-op
    ctx.restore();
    assert_eq!(ctx.get_line_width(), 5.0);
}

/// Test transforms.
#[test]
fn test_transforms() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.set_fill_style("#ff0000").unwrap();
    ctx.translate(50.0, 50.0);
    ctx.scale(2.0, 2.0);
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 10.0, 10.0));

    // Rect spans 50..70 in device space
    assert_eq!(pixel(&ctx, 65, 65), [255, 0, 0, 255]);
    assert_eq!(pixel(&ctx, 45, 45), [0, 0, 0, 0]);
    assert_eq!(pixel(&ctx, 75, 75), [0, 0, 0, 0]);

    ctx.set_transform(DOMMatrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0));
    assert!(ctx.get_transform().is_identity());
}

#[test]
fn test_rotate_quarter_turn() {
    let mut ctx = Canvas2dContext::new(40, 40).unwrap();
    ctx.translate(20.0, 20.0);
    ctx.rotate(std::f32::consts::FRAC_PI_2);
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 10.0, 4.0));
    // x axis now points down
    assert_eq!(pixel(&ctx, 18, 25)[3], 255);
    assert_eq!(pixel(&ctx, 25, 18)[3], 0);
}

/// Test clear rect.
#[test]
fn test_clear_rect() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.set_fill_style("#ff0000").unwrap();
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 100.0, 100.0));
    ctx.set_global_alpha(0.1);
    ctx.set_shadow_color("black").unwrap();
    ctx.set_shadow_offset_x(30.0);
    ctx.clear_rect(&RectParams::new(25.0, 25.0, 50.0, 50.0));

    // Cleared regardless of alpha and shadow
    assert_eq!(pixel(&ctx, 50, 50), [0, 0, 0, 0]);
    assert_eq!(pixel(&ctx, 10, 10), [255, 0, 0, 255]);
    assert_eq!(pixel(&ctx, 90, 50), [255, 0, 0, 255]);
}

/// Test PNG export decodes back to the drawn pixels.
#[test]
fn test_png_export() {
    let mut ctx = Canvas2dContext::new(8, 6).unwrap();
    ctx.set_fill_style("#0000ff").unwrap();
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 4.0, 6.0));

    let png_data = ctx.to_png(None).unwrap();
    let decoder = png::Decoder::new(std::io::Cursor::new(png_data));
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();

    assert_eq!((info.width, info.height), (8, 6));
    assert_eq!(info.color_type, png::ColorType::Rgba);
    assert_eq!(&buf[0..4], &[0, 0, 255, 255]);
    let right = (5 * 4) as usize;
    assert_eq!(&buf[right..right + 4], &[0, 0, 0, 0]);
}

/// Test arc.
#[test]
fn test_arc() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.set_fill_style("#ff0000").unwrap();
    ctx.begin_path();
    ctx.arc(&ArcParams {
        x: 50.0,
        y: 50.0,
        radius: 30.0,
        start_angle: 0.0,
        end_angle: std::f32::consts::PI * 2.0,
        anticlockwise: false,
    })
    .unwrap();
    ctx.fill();

    assert_eq!(pixel(&ctx, 50, 50), [255, 0, 0, 255]);
    assert_eq!(pixel(&ctx, 50, 75), [255, 0, 0, 255]);
    assert_eq!(pixel(&ctx, 80, 80), [0, 0, 0, 0]);
}

/// Test bezier curve.
#[test]
fn test_bezier_curve() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.set_stroke_style("#0000ff").unwrap();
    ctx.set_line_width(4.0);
    ctx.begin_path();
    ctx.move_to(10.0, 50.0);
    ctx.bezier_curve_to(&CubicBezierParams {
        cp1x: 30.0,
        cp1y: 50.0,
        cp2x: 70.0,
        cp2y: 50.0,
        x: 90.0,
        y: 50.0,
    });
    ctx.stroke();

    assert_eq!(pixel(&ctx, 50, 50), [0, 0, 255, 255]);
}

/// Test quadratic curve.
#[test]
fn test_quadratic_curve() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.begin_path();
    ctx.move_to(10.0, 90.0);
    ctx.quadratic_curve_to(&QuadraticBezierParams {
        cpx: 50.0,
        cpy: 10.0,
        x: 90.0,
        y: 90.0,
    });
    ctx.close_path();
    ctx.fill();

    // The curve peaks at y = 50
    assert_eq!(pixel(&ctx, 50, 70)[3], 255);
    assert_eq!(pixel(&ctx, 50, 40)[3], 0);
}

struct FixedWidthGlyphs;

impl GlyphRasterizer for FixedWidthGlyphs {
    fn measure(&mut self, run: &GlyphRun) -> TextMetrics {
        let width = run.text.chars().count() as f32 * run.font.size_px * 0.5;
        TextMetrics {
            width,
            font_bounding_box_ascent: run.font.size_px * 0.8,
            font_bounding_box_descent: run.font.size_px * 0.2,
            actual_bounding_box_right: width,
            ..Default::default()
        }
    }

    fn outline(&mut self, _run: &GlyphRun) -> Option<tiny_skia::Path> {
        None
    }
}

/// Test measure text through a custom glyph rasterizer.
#[test]
fn test_measure_text() {
    let mut ctx = Canvas2dContext::builder(100, 100)
        .with_glyph_rasterizer(FixedWidthGlyphs)
        .build()
        .unwrap();
    ctx.set_font("20px sans-serif").unwrap();

    let metrics = ctx.measure_text("Hello");
    assert_eq!(metrics.width, 50.0);
    assert_eq!(ctx.measure_text("").width, 0.0);

    // Text with no outline draws nothing
    ctx.fill_text("Hello", 10.0, 50.0);
    assert!(ctx.surface().data().iter().all(|&b| b == 0));
}

/// Test builder pattern.
#[test]
fn test_builder_pattern() {
    let ctx = Canvas2dContext::builder(400, 300)
        .with_font_config(FontConfig {
            load_system_fonts: false,
            ..Default::default()
        })
        .build()
        .unwrap();

    assert_eq!(ctx.width(), 400);
    assert_eq!(ctx.height(), 300);
    assert!(Canvas2dContext::builder(0, 300).build().is_err());
}

/// Test linear gradient.
#[test]
fn test_linear_gradient() {
    let mut ctx = Canvas2dContext::new(100, 10).unwrap();

    let mut gradient = ctx.create_linear_gradient(0.0, 0.0, 100.0, 0.0);
    gradient.add_color_stop(0.0, "#ff0000").unwrap();
    gradient.add_color_stop(1.0, "#0000ff").unwrap();
    assert!(gradient.add_color_stop(1.5, "#00ff00").is_err());

    ctx.set_fill_style_gradient(gradient);
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 100.0, 10.0));

    let left = pixel(&ctx, 2, 5);
    let middle = pixel(&ctx, 50, 5);
    let right = pixel(&ctx, 97, 5);
    assert!(left[0] > 240 && left[2] < 15);
    assert!(right[2] > 240 && right[0] < 15);
    assert!((middle[0] as i32 - middle[2] as i32).abs() <= 4);
}

/// Test global alpha.
#[test]
fn test_global_alpha() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.set_fill_style("#ff0000").unwrap();
    ctx.set_global_alpha(0.5);
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 100.0, 100.0));

    let px = pixel(&ctx, 50, 50);
    assert_eq!(px[0], 255);
    assert!((127..=128).contains(&px[3]));

    // Out of range values are ignored
    ctx.set_global_alpha(1.5);
    assert_eq!(ctx.get_global_alpha(), 0.5);
}

/// Test line dash.
#[test]
fn test_line_dash() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.set_line_dash(vec![10.0, 10.0]);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(0.0, 50.0);
    ctx.line_to(100.0, 50.0);
    ctx.stroke();

    // Dashes cover 0..10, 20..30; gaps 10..20
    assert_eq!(pixel(&ctx, 5, 50)[3], 255);
    assert_eq!(pixel(&ctx, 15, 50)[3], 0);
    assert_eq!(pixel(&ctx, 25, 50)[3], 255);

    ctx.set_line_dash(vec![5.0]);
    assert_eq!(ctx.get_line_dash(), &[5.0, 5.0]);
}

/// Test ellipse.
#[test]
fn test_ellipse() {
    let mut ctx = Canvas2dContext::new(100, 100).unwrap();

    ctx.begin_path();
    ctx.ellipse(&EllipseParams {
        x: 50.0,
        y: 50.0,
        radius_x: 40.0,
        radius_y: 10.0,
        rotation: 0.0,
        start_angle: 0.0,
        end_angle: std::f32::consts::PI * 2.0,
        anticlockwise: false,
    })
    .unwrap();
    ctx.fill();

    assert_eq!(pixel(&ctx, 85, 50)[3], 255);
    assert_eq!(pixel(&ctx, 50, 35)[3], 0);
}

#[test]
fn test_path2d_from_svg() {
    let mut ctx = Canvas2dContext::new(50, 50).unwrap();
    let path = Path2D::from_svg_path_data("M10 10 h30 v30 h-30 z").unwrap();
    ctx.set_fill_style("rgb(0, 128, 0)").unwrap();
    ctx.fill_path2d(&path);
    assert_eq!(pixel(&ctx, 25, 25), [0, 128, 0, 255]);
    assert!(ctx.is_point_in_path2d(&path, 25.0, 25.0, CanvasFillRule::NonZero));
    // The current path is untouched
    assert!(!ctx.is_point_in_path(25.0, 25.0, CanvasFillRule::NonZero));
}

#[test]
fn test_reset_clears_everything() {
    let mut ctx = Canvas2dContext::new(20, 20).unwrap();
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 20.0, 20.0));
    ctx.save();
    ctx.translate(5.0, 5.0);
    ctx.set_line_width(3.0);
    ctx.reset();
    assert_eq!(pixel(&ctx, 10, 10), [0, 0, 0, 0]);
    assert_eq!(ctx.save_depth(), 0);
    assert_eq!(ctx.get_line_width(), 1.0);
    assert!(ctx.get_transform().is_identity());
}
