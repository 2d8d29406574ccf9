use tinyraster::raster::{clip_line, LineClip};
use tinyraster::{
    BlendMode, ClipRect, Colour4, EdgePolicy, FillMode, RasterConfig, Rasterizer, Scene, Vec2,
    Vertex,
};

fn lit(r: &Rasterizer, background: Colour4) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for y in 0..r.height() as i32 {
        for x in 0..r.width() as i32 {
            if r.pixel(x, y) != Some(background) {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn test_interior_point_sets_exactly_one_pixel() {
    let (w, h) = (6, 5);
    for y in 1..h as i32 - 1 {
        for x in 1..w as i32 - 1 {
            let mut r = Rasterizer::new(w, h).unwrap();
            r.set_foreground_colour(Colour4::GREEN);
            r.draw_point(Vec2::new(x as f32, y as f32), 1);
            assert_eq!(lit(&r, Colour4::BLACK), vec![(x, y)]);
            assert_eq!(r.pixel(x, y), Some(Colour4::GREEN));
        }
    }
}

#[test]
fn test_point_on_left_border_is_noop() {
    let mut r = Rasterizer::new(4, 4).unwrap();
    r.draw_point(Vec2::new(0.0, 2.0), 1);
    assert!(lit(&r, Colour4::BLACK).is_empty());
}

#[test]
fn test_horizontal_flat_line() {
    let c = Colour4::new(0.2, 0.4, 0.6, 1.0);
    let mut r = Rasterizer::new(8, 8).unwrap();
    r.draw_line(&Vertex::at(1.0, 2.0, c), &Vertex::at(3.0, 2.0, c), 1);

    assert_eq!(lit(&r, Colour4::BLACK), vec![(1, 2), (2, 2), (3, 2)]);
    for x in 1..=3 {
        assert_eq!(r.pixel(x, 2), Some(c));
    }
}

#[test]
fn test_interpolated_line_midpoint() {
    let config = RasterConfig {
        edge_policy: EdgePolicy::Inclusive,
        ..RasterConfig::default()
    };
    let mut r = Rasterizer::with_config(8, 4, config).unwrap();
    r.set_fill_mode(FillMode::InterpolatedFilled);
    r.draw_line(
        &Vertex::at(0.0, 0.0, Colour4::RED),
        &Vertex::at(4.0, 0.0, Colour4::BLUE),
        1,
    );

    let mid = r.pixel(2, 0).unwrap();
    assert!(mid.approx_eq(&Colour4::new(0.5, 0.0, 0.5, 1.0), 1e-6));
    assert_eq!(r.pixel(0, 0), Some(Colour4::RED));
    assert_eq!(r.pixel(4, 0), Some(Colour4::BLUE));
}

#[test]
fn test_clip_line_inside_is_untouched() {
    let rect = ClipRect::new(0.0, 10.0, 0.0, 10.0);
    let a = Vertex::at(1.0, 1.0, Colour4::RED);
    let b = Vertex::at(8.0, 9.0, Colour4::BLUE);
    assert_eq!(clip_line(&a, &b, &rect), LineClip::Inside);
}

#[test]
fn test_clip_line_rejects_segment_left_of_rect() {
    let rect = ClipRect::new(5.0, 10.0, 0.0, 10.0);
    let a = Vertex::at(1.0, 3.0, Colour4::RED);
    let b = Vertex::at(2.0, 7.0, Colour4::RED);
    assert_eq!(clip_line(&a, &b, &rect), LineClip::Rejected);

    let mut r = Rasterizer::new(10, 10).unwrap();
    r.set_clip_rectangle(5.0, 10.0, 0.0, 10.0);
    r.draw_line(&a, &b, 1);
    assert!(lit(&r, Colour4::BLACK).is_empty());
}

#[test]
fn test_flat_triangle_fill() {
    let mut r = Rasterizer::new(10, 10).unwrap();
    r.set_fill_mode(FillMode::FlatFilled);
    r.draw_polygon(&[
        Vertex::at(2.0, 2.0, Colour4::RED),
        Vertex::at(6.0, 2.0, Colour4::RED),
        Vertex::at(4.0, 6.0, Colour4::RED),
    ]);

    // Row 4 runs from the left edge's intercept to the right edge's
    let row4: Vec<i32> = lit(&r, Colour4::BLACK)
        .into_iter()
        .filter(|&(_, y)| y == 4)
        .map(|(x, _)| x)
        .collect();
    assert_eq!(row4, vec![3, 4, 5]);

    for (x, y) in lit(&r, Colour4::BLACK) {
        assert!((2..=6).contains(&x) && (2..=6).contains(&y), "({x}, {y}) outside hull");
        assert_eq!(r.pixel(x, y), Some(Colour4::RED));
    }
}

#[test]
fn test_unfilled_triangle_uses_three_edges() {
    let mut r = Rasterizer::new(10, 10).unwrap();
    r.draw_polygon(&[
        Vertex::at(2.0, 2.0, Colour4::WHITE),
        Vertex::at(6.0, 2.0, Colour4::WHITE),
        Vertex::at(4.0, 6.0, Colour4::WHITE),
    ]);
    assert_eq!(r.pixel(2, 2), Some(Colour4::WHITE));
    assert_eq!(r.pixel(6, 2), Some(Colour4::WHITE));
    assert_eq!(r.pixel(4, 6), Some(Colour4::WHITE));
    assert_eq!(r.pixel(4, 4), Some(Colour4::BLACK));
}

#[test]
fn test_blended_fill_mixes_with_background() {
    let mut r = Rasterizer::new(10, 10).unwrap();
    r.clear(Colour4::BLUE);
    r.set_blend_mode(BlendMode::AlphaBlend);
    r.set_fill_mode(FillMode::FlatFilled);
    let half_red = Colour4::new(1.0, 0.0, 0.0, 0.5);
    r.draw_polygon(&[
        Vertex::at(2.0, 2.0, half_red),
        Vertex::at(7.0, 2.0, half_red),
        Vertex::at(7.0, 7.0, half_red),
        Vertex::at(2.0, 7.0, half_red),
    ]);

    let p = r.pixel(4, 4).unwrap();
    assert!(p.approx_eq(&Colour4::new(0.5, 0.0, 0.5, 0.5), 1e-6));
}

#[test]
fn test_clear_then_reinitialize() {
    let mut r = Rasterizer::new(5, 3).unwrap();
    r.clear(Colour4::RED);
    assert_eq!((r.width(), r.height()), (5, 3));
    assert!(r.buffer().pixels().iter().all(|&p| p == Colour4::RED));

    r.set_clip_rectangle(1.0, 2.0, 1.0, 2.0);
    r.initialize(7, 4).unwrap();
    assert_eq!((r.width(), r.height()), (7, 4));
    assert!(r.buffer().pixels().iter().all(|&p| p == Colour4::BLACK));
    assert_eq!(r.clip_rectangle(), ClipRect::full(7, 4));
}

#[test]
fn test_demo_scene_renders_and_encodes() {
    let r = Scene::demo(80, 60).render().unwrap();
    let mut out = Vec::new();
    tinyraster::ppm::write_ppm(r.buffer(), &mut out).unwrap();

    let header = b"P6\n80 60\n255\n";
    assert_eq!(&out[..header.len()], header);
    assert_eq!(out.len(), header.len() + 80 * 60 * 3);
}
