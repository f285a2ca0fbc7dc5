//! Drawing primitives and image encoding on top of `image`/`imageproc`

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, ImageResult, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Canvas of the given size filled with `background`
pub fn blank(width: u32, height: u32, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, background)
}

/// Draw a segment between two pixel positions, `stroke` pixels wide
///
/// Points may lie outside the canvas; drawing is clipped. Thick strokes are
/// filled as the box swept by a square brush, which is exact for the
/// horizontal and vertical segments a maze is made of.
pub fn draw_segment(
    canvas: &mut RgbImage,
    from: (i32, i32),
    to: (i32, i32),
    color: Rgb<u8>,
    stroke: u32,
) {
    if stroke <= 1 {
        draw_line_segment_mut(
            canvas,
            (from.0 as f32, from.1 as f32),
            (to.0 as f32, to.1 as f32),
            color,
        );
        return;
    }
    let offset = i32::try_from((stroke - 1) / 2).unwrap_or(i32::MAX);
    let rect = Rect::at(
        from.0.min(to.0).saturating_sub(offset),
        from.1.min(to.1).saturating_sub(offset),
    )
    .of_size(
        from.0.abs_diff(to.0) + stroke,
        from.1.abs_diff(to.1) + stroke,
    );
    draw_filled_rect_mut(canvas, rect, color);
}

/// Encode the canvas as a binary PPM image
pub fn encode_ppm(canvas: &RgbImage) -> ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    PnmEncoder::new(&mut buf)
        .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgb8,
        )?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use image::ImageFormat;

    use crate::canvas::{blank, draw_segment, encode_ppm, BLACK, RED, WHITE};

    #[test]
    fn blank_canvas_is_background() {
        let canvas = blank(3, 2, WHITE);
        assert_eq!(canvas.dimensions(), (3, 2));
        assert!(canvas.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn thin_segment() {
        let mut canvas = blank(6, 3, WHITE);
        draw_segment(&mut canvas, (1, 1), (4, 1), BLACK, 1);
        for x in 2..4 {
            assert_eq!(*canvas.get_pixel(x, 1), BLACK);
        }
        assert_eq!(*canvas.get_pixel(0, 1), WHITE);
        assert_eq!(*canvas.get_pixel(5, 1), WHITE);
        assert_eq!(*canvas.get_pixel(2, 0), WHITE);
    }

    #[test]
    fn thick_segment_is_clipped() {
        let mut canvas = blank(5, 5, WHITE);
        draw_segment(&mut canvas, (-3, 2), (9, 2), BLACK, 3);
        for x in 0..5 {
            assert_eq!(*canvas.get_pixel(x, 1), BLACK);
            assert_eq!(*canvas.get_pixel(x, 2), BLACK);
            assert_eq!(*canvas.get_pixel(x, 3), BLACK);
            assert_eq!(*canvas.get_pixel(x, 0), WHITE);
            assert_eq!(*canvas.get_pixel(x, 4), WHITE);
        }
    }

    #[test]
    fn ppm_decodes_to_same_pixels() {
        let mut canvas = blank(4, 3, WHITE);
        draw_segment(&mut canvas, (0, 1), (3, 1), RED, 1);
        let bytes = encode_ppm(&canvas).unwrap();
        assert!(bytes.starts_with(b"P6"));

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Pnm)
            .unwrap()
            .to_rgb8();
        assert_eq!(decoded, canvas);
    }
}
