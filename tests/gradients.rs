use scanpaint::*;

fn red() -> Color {
    Color::from_rgba(1.0, 0.0, 0.0, 1.0)
}

fn blue() -> Color {
    Color::from_rgba(0.0, 0.0, 1.0, 1.0)
}

fn full_canvas_src(shader: SharedShader) -> Canvas {
    let mut canvas = Canvas::new(100, 100).unwrap();
    let mut paint = Paint::default();
    paint.shader = Some(shader);
    paint.blend_mode = BlendMode::Source;
    canvas.fill_rect(Rect::from_ltrb(0.0, 0.0, 100.0, 100.0), &paint);
    canvas
}

#[test]
fn horizontal_two_color_gradient() {
    let shader = LinearGradient::new(
        Point::from_xy(0.0, 50.0),
        Point::from_xy(100.0, 50.0),
        &[red(), blue()],
        SpreadMode::Pad,
    )
    .unwrap();

    let canvas = full_canvas_src(shader);

    // Left edge: almost pure red (t = 0.005 at the first pixel center).
    let p = canvas.pixmap.pixel(0, 50).unwrap();
    assert!(p.red() >= 250, "red = {}", p.red());
    assert!(p.blue() <= 5);
    assert_eq!(p.alpha(), 255);

    // Right edge: almost pure blue.
    let p = canvas.pixmap.pixel(99, 50).unwrap();
    assert!(p.blue() >= 250);
    assert!(p.red() <= 5);

    // Midway: both channels near half.
    let p = canvas.pixmap.pixel(50, 50).unwrap();
    assert!((120..=135).contains(&p.red()), "red = {}", p.red());
    assert!((120..=135).contains(&p.blue()), "blue = {}", p.blue());

    // The gradient is horizontal: rows are identical.
    for y in 1..100 {
        assert_eq!(canvas.pixmap.pixel(37, y).unwrap(), canvas.pixmap.pixel(37, 0).unwrap());
    }
}

#[test]
fn gradient_follows_the_ctm() {
    let shader = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(50.0, 0.0),
        &[red(), blue()],
        SpreadMode::Pad,
    )
    .unwrap();

    let mut canvas = Canvas::new(100, 100).unwrap();
    let mut paint = Paint::default();
    paint.shader = Some(shader);
    paint.blend_mode = BlendMode::Source;

    // Shift the gradient 50px right along with the geometry.
    canvas.translate(50.0, 0.0);
    canvas.fill_rect(Rect::from_ltrb(0.0, 0.0, 50.0, 100.0), &paint);

    // Left of the drawn area: untouched.
    assert_eq!(canvas.pixmap.pixel(25, 50).unwrap().get(), 0);

    // Start of the gradient is now at x = 50.
    let p = canvas.pixmap.pixel(50, 50).unwrap();
    assert!(p.red() >= 250);

    let p = canvas.pixmap.pixel(99, 50).unwrap();
    assert!(p.blue() >= 250);
}

#[test]
fn pad_clamps_outside_the_line() {
    let shader = LinearGradient::new(
        Point::from_xy(40.0, 0.0),
        Point::from_xy(60.0, 0.0),
        &[red(), blue()],
        SpreadMode::Pad,
    )
    .unwrap();

    let canvas = full_canvas_src(shader);

    assert_eq!(canvas.pixmap.pixel(0, 0).unwrap().get(), 0xFFFF0000);
    assert_eq!(canvas.pixmap.pixel(99, 0).unwrap().get(), 0xFF0000FF);
}

#[test]
fn repeat_wraps_the_line() {
    let shader = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(10.0, 0.0),
        &[red(), blue()],
        SpreadMode::Repeat,
    )
    .unwrap();

    let canvas = full_canvas_src(shader);

    // The pattern has period 10: x and x + 10 match exactly.
    for x in 0..90 {
        assert_eq!(
            canvas.pixmap.pixel(x, 10).unwrap(),
            canvas.pixmap.pixel(x + 10, 10).unwrap(),
            "x = {}",
            x
        );
    }
}

#[test]
fn three_color_gradient_passes_through_the_middle() {
    let shader = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(100.0, 0.0),
        &[red(), Color::from_rgba(0.0, 1.0, 0.0, 1.0), blue()],
        SpreadMode::Pad,
    )
    .unwrap();

    let canvas = full_canvas_src(shader);

    let p = canvas.pixmap.pixel(0, 0).unwrap();
    assert!(p.red() >= 245);

    let p = canvas.pixmap.pixel(50, 0).unwrap();
    assert!(p.green() >= 245, "green = {}", p.green());
    assert!(p.red() <= 10 && p.blue() <= 10);

    let p = canvas.pixmap.pixel(99, 0).unwrap();
    assert!(p.blue() >= 245);
}

#[test]
fn position_gradient_respects_positions() {
    let shader = LinearPositionGradient::new(
        Point::from_xy(0.0, 50.0),
        Point::from_xy(100.0, 50.0),
        &[red(), blue(), blue()],
        &[0.0, 0.1, 1.0],
    )
    .unwrap();

    let canvas = full_canvas_src(shader);

    // Well past the 10% mark everything is blue.
    assert_eq!(canvas.pixmap.pixel(50, 50).unwrap().get(), 0xFF0000FF);
    assert_eq!(canvas.pixmap.pixel(99, 50).unwrap().get(), 0xFF0000FF);

    // The ramp lives in the first tenth.
    let p = canvas.pixmap.pixel(0, 50).unwrap();
    assert!(p.red() >= 240);
    let p = canvas.pixmap.pixel(5, 50).unwrap();
    assert!(p.red() > 100 && p.blue() > 100);
}

#[test]
fn sweep_gradient_splits_left_and_right() {
    let shader = SweepGradient::new(Point::from_xy(50.0, 50.0), 0.0, &[red(), blue()]).unwrap();
    let canvas = full_canvas_src(shader);

    let p = canvas.pixmap.pixel(99, 50).unwrap();
    assert!(p.red() >= 245, "red = {}", p.red());

    let p = canvas.pixmap.pixel(1, 50).unwrap();
    assert!(p.blue() >= 245, "blue = {}", p.blue());
}

#[test]
fn translucent_gradient_premultiplies() {
    let shader = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(100.0, 0.0),
        &[Color::from_rgba(1.0, 0.0, 0.0, 0.5), Color::from_rgba(1.0, 0.0, 0.0, 0.5)],
        SpreadMode::Pad,
    )
    .unwrap();

    let canvas = full_canvas_src(shader);

    for p in canvas.pixmap.pixels() {
        assert!(p.red() <= p.alpha());
        assert!((126..=129).contains(&p.alpha()));
    }
}
