use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];

fn pixel(ctx: &DrawingContext<'_>, x: i32, y: i32) -> [u8; 4] {
    let snap = ctx.get_image_data(x, y, 1, 1).unwrap();
    let mut px = [0u8; 4];
    px.copy_from_slice(snap.data());
    px
}

fn solid(w: u32, h: u32, c: [u8; 4]) -> PixelBuffer {
    let data = c.iter().copied().cycle().take((w * h * 4) as usize).collect();
    PixelBuffer::from_raw(data, w, h)
}

#[test]
fn defaults() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(10, 10);
    let ctx = DrawingContext::new(&mut styles, &mut buf);
    assert_eq!(ctx.fill_style(), "#000000");
    assert_eq!(ctx.global_alpha(), 1.0);
    assert_eq!(ctx.global_composite_operation(), "source-over");
    assert_eq!((ctx.width(), ctx.height()), (10, 10));
    assert_eq!(pixel(&ctx, 5, 5), [0, 0, 0, 0]);
}

#[test]
fn short_hex_fill() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(20, 20);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    ctx.set_fill_style("#741").unwrap();
    assert_eq!(ctx.fill_style(), "#774411");
    ctx.fill_rect(0, 0, 20, 20);
    assert_eq!(pixel(&ctx, 10, 10), [119, 68, 17, 255]);
}

#[test]
fn save_restore_fill_style() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(4, 4);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    ctx.set_fill_style("red").unwrap();
    ctx.save();
    assert_eq!(ctx.style_depth(), 2);
    ctx.set_fill_style("blue").unwrap();
    assert_eq!(ctx.fill_style(), "#0000ff");
    ctx.restore();
    assert_eq!(ctx.fill_style(), "#ff0000");
    ctx.restore();
    ctx.restore();
    assert_eq!(ctx.style_depth(), 1);
    assert_eq!(ctx.fill_style(), "#ff0000");
}

#[test]
fn fill_style_rejects_gradients_patterns_and_garbage() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(4, 4);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    assert!(ctx.set_fill_style(PaintStyle::Gradient).unwrap_err().is_unsupported());
    assert!(ctx.set_fill_style(PaintStyle::Pattern).unwrap_err().is_unsupported());
    assert!(ctx.set_fill_style("not a color").unwrap_err().is_invalid_argument());
    assert_eq!(ctx.fill_style(), "#000000");
}

#[test]
fn clear_rect_over_opaque_keeps_pixels() {
    let mut styles = StyleStack::new();
    let mut buf = solid(4, 4, RED);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    ctx.clear_rect(0, 0, 4, 4);
    assert_eq!(pixel(&ctx, 1, 1), RED);
}

#[test]
fn get_image_data_pads_outside_with_transparent() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(100, 100);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    ctx.set_fill_style("red").unwrap();
    ctx.fill_rect(0, 0, 100, 100);

    let snap = ctx.get_image_data(-25, -25, 50, 50).unwrap();
    assert_eq!((snap.width(), snap.height()), (50, 50));
    for y in 0..50 {
        for x in 0..50 {
            let expected = if x >= 25 && y >= 25 { Rgba8::from(RED) } else { Rgba8::TRANSPARENT };
            assert_eq!(snap.pixel(x, y), Some(expected), "({x}, {y})");
        }
    }
}

#[test]
fn get_image_data_normalizes_negative_extent() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(10, 10);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    ctx.set_fill_style("red").unwrap();
    ctx.fill_rect(2, 2, 1, 1);
    let a = ctx.get_image_data(0, 0, 5, 5).unwrap();
    let b = ctx.get_image_data(5, 5, -5, -5).unwrap();
    assert_eq!(a, b);
}

#[test]
fn get_image_data_too_large() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(1, 1);
    let ctx = DrawingContext::new(&mut styles, &mut buf);
    let err = ctx.get_image_data(i32::MIN, i32::MIN, i32::MAX, i32::MAX).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn put_get_round_trip_leaves_surface_unchanged() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(8, 8);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    ctx.set_fill_style("#336699").unwrap();
    ctx.fill_rect(0, 0, 4, 8);

    let before = ctx.get_image_data(0, 0, 8, 8).unwrap();
    ctx.put_image_data(&before, 0, 0).unwrap();
    ctx.put_image_data(&before, 0, 0).unwrap();
    assert_eq!(ctx.get_image_data(0, 0, 8, 8).unwrap(), before);
    assert_eq!(pixel(&ctx, 1, 1), [0x33, 0x66, 0x99, 255]);
    assert_eq!(pixel(&ctx, 6, 6), [0, 0, 0, 0]);
}

#[test]
fn put_image_data_transparent_pixels_keep_backdrop() {
    let mut styles = StyleStack::new();
    let mut buf = solid(4, 4, RED);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let blank = ctx.create_image_data(2, 2);
    ctx.put_image_data(&blank, 1, 1).unwrap();
    for (x, y) in [(0, 0), (1, 1), (2, 2), (3, 3)] {
        assert_eq!(pixel(&ctx, x, y), RED, "({x}, {y})");
    }
}

#[test]
fn put_image_data_composites_translucent_pixels() {
    let mut styles = StyleStack::new();
    let mut buf = solid(20, 20, RED);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let half_blue = solid(10, 10, [0, 0, 255, 128]);
    ctx.put_image_data(&half_blue, 10, 10).unwrap();
    assert_eq!(pixel(&ctx, 15, 15), [127, 0, 128, 255]);
    assert_eq!(pixel(&ctx, 5, 5), RED);
}

#[test]
fn put_image_data_clips_to_surface() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(4, 4);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let img = solid(3, 3, RED);
    ctx.put_image_data(&img, -1, 2).unwrap();
    assert_eq!(pixel(&ctx, 0, 2), RED);
    assert_eq!(pixel(&ctx, 1, 3), RED);
    assert_eq!(pixel(&ctx, 2, 2), [0, 0, 0, 0]);
    assert_eq!(pixel(&ctx, 0, 1), [0, 0, 0, 0]);
}

#[test]
fn put_image_data_dirty_offsets_by_dirty_origin() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(10, 10);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let img = solid(4, 4, RED);
    ctx.put_image_data_dirty(&img, 2, 2, PixelRect::new(1, 1, 2, 2)).unwrap();

    assert_eq!(pixel(&ctx, 3, 3), RED);
    assert_eq!(pixel(&ctx, 4, 4), RED);
    assert_eq!(pixel(&ctx, 2, 2), [0, 0, 0, 0]);
    assert_eq!(pixel(&ctx, 5, 5), [0, 0, 0, 0]);
}

#[test]
fn put_image_data_dirty_is_clamped_to_image() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(10, 10);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let img = solid(2, 2, RED);
    ctx.put_image_data_dirty(&img, 0, 0, PixelRect::new(-3, -3, 10, 10)).unwrap();
    assert_eq!(pixel(&ctx, 0, 0), RED);
    assert_eq!(pixel(&ctx, 1, 1), RED);
    assert_eq!(pixel(&ctx, 2, 2), [0, 0, 0, 0]);

    ctx.put_image_data_dirty(&img, 5, 5, PixelRect::new(7, 7, 3, 3)).unwrap();
    assert_eq!(pixel(&ctx, 5, 5), [0, 0, 0, 0]);
}

#[test]
fn put_image_data_dirty_negative_extent_copies_nothing() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(10, 10);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let img = solid(4, 4, RED);
    ctx.put_image_data_dirty(&img, 0, 0, PixelRect::new(3, 3, -2, 2)).unwrap();
    ctx.put_image_data_dirty(&img, 0, 0, PixelRect::new(3, 3, 2, -2)).unwrap();
    assert_eq!(ctx.get_image_data(0, 0, 10, 10).unwrap(), PixelBuffer::new(10, 10));
}

#[test]
fn create_image_data_like_matches_size() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(1, 1);
    let ctx = DrawingContext::new(&mut styles, &mut buf);
    let like = solid(3, 5, RED);
    let blank = ctx.create_image_data_like(&like);
    assert_eq!((blank.width(), blank.height()), (3, 5));
    assert!(blank.data().iter().all(|&b| b == 0));
}

#[test]
fn draw_image_at_composites() {
    let mut styles = StyleStack::new();
    let mut buf = solid(4, 4, RED);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let img = solid(2, 2, [0, 0, 255, 128]);
    ctx.draw_image(&img, DrawImageArgs::At { dx: 1, dy: 1 }).unwrap();
    assert_eq!(pixel(&ctx, 1, 1), [127, 0, 128, 255]);
    assert_eq!(pixel(&ctx, 0, 0), RED);
    assert_eq!(pixel(&ctx, 3, 3), RED);
}

#[test]
fn draw_image_sized_ignores_destination_size() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(10, 10);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let img = solid(2, 2, RED);
    let args = DrawImageArgs::Sized { dx: 0, dy: 0, dw: 8, dh: 8 };
    ctx.draw_image(&img, args).unwrap();
    assert_eq!(pixel(&ctx, 1, 1), RED);
    assert_eq!(pixel(&ctx, 2, 2), [0, 0, 0, 0]);
}

#[test]
fn draw_image_sub_rect() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(10, 10);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let mut img = PixelBuffer::new(4, 4);
    img.pixel_mut(3, 3).unwrap().copy_from_slice(&RED);

    let args = DrawImageArgs::from_slice(&[2, 2, 2, 2, 5, 5, 2, 2]).unwrap();
    ctx.draw_image(&img, args).unwrap();
    assert_eq!(pixel(&ctx, 6, 6), RED);
    assert_eq!(pixel(&ctx, 5, 5), [0, 0, 0, 0]);
}

#[test]
fn draw_image_scaling_is_rejected() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(10, 10);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let img = solid(4, 4, RED);
    let args = DrawImageArgs::from_slice(&[0, 0, 2, 2, 0, 0, 4, 4]).unwrap();
    assert!(ctx.draw_image(&img, args).unwrap_err().is_invalid_argument());
    assert_eq!(pixel(&ctx, 0, 0), [0, 0, 0, 0]);
}

#[test]
fn draw_image_without_pixels_is_invalid() {
    struct Pending;
    impl ImageSource for Pending {
        fn image_pixels(&self) -> Option<&PixelBuffer> {
            None
        }
    }

    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(4, 4);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    let err = ctx.draw_image(&Pending, DrawImageArgs::At { dx: 0, dy: 0 }).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn draw_image_args_arity() {
    assert_eq!(
        DrawImageArgs::from_slice(&[1, 2]).unwrap(),
        DrawImageArgs::At { dx: 1, dy: 2 }
    );
    assert_eq!(
        DrawImageArgs::from_slice(&[1, 2, 3, 4]).unwrap(),
        DrawImageArgs::Sized { dx: 1, dy: 2, dw: 3, dh: 4 }
    );
    for bad in [&[][..], &[1], &[1, 2, 3], &[1, 2, 3, 4, 5, 6]] {
        assert!(DrawImageArgs::from_slice(bad).unwrap_err().is_invalid_argument());
    }
}

#[test]
fn stubs_report_unsupported() {
    let mut styles = StyleStack::new();
    let mut buf = PixelBuffer::new(4, 4);
    let mut ctx = DrawingContext::new(&mut styles, &mut buf);
    assert!(ctx.measure_text("x").unwrap_err().is_unsupported());
    assert!(ctx.begin_path().unwrap_err().is_unsupported());
    assert!(ctx.arc(0.0, 0.0, 1.0, 0.0, 1.0, false).unwrap_err().is_unsupported());
    assert!(ctx.set_line_dash(&[1.0, 2.0]).unwrap_err().is_unsupported());
    let err = ctx.fill_text("hi", 0.0, 0.0).unwrap_err();
    assert_eq!(err.to_string(), "not implemented: fillText");
}

#[test]
fn capability_lists_are_disjoint() {
    assert!(DrawingContext::supports("fillRect"));
    assert!(DrawingContext::supports("putImageData"));
    assert!(!DrawingContext::supports("arc"));
    assert!(DrawingContext::UNSUPPORTED.contains(&"arc"));
    for name in DrawingContext::SUPPORTED {
        assert!(!DrawingContext::UNSUPPORTED.contains(name), "{name}");
    }
}
