use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

/// Blue raster with a red band at the top, a yellow band in the middle, and a green band at
/// the bottom.
fn banded(w: u32, h: u32, band: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |_, y| {
        if y < band {
            image::Rgba([255, 0, 0, 255])
        } else if y >= h - band {
            image::Rgba([0, 255, 0, 255])
        } else if y >= h / 2 - band / 2 && y < h / 2 + band / 2 {
            image::Rgba([255, 255, 0, 255])
        } else {
            image::Rgba([0, 0, 255, 255])
        }
    })
}

fn dominant(px: [u8; 4]) -> usize {
    let [r, g, b, _] = px;
    if r >= g && r >= b {
        0
    } else if g >= b {
        1
    } else {
        2
    }
}

#[test]
fn output_always_matches_target() {
    let targets = [canvas(108, 240), canvas(132, 287), canvas(50, 50)];
    let inputs = [(1, 1), (40, 300), (300, 40), (108, 240), (1000, 7), (3, 999)];
    for target in targets {
        for (w, h) in inputs {
            let src = PremulImage::from_straight(banded(w, h, 1));
            let out = normalize(&src, target).unwrap();
            assert_eq!(out.canvas(), target, "input {w}x{h} -> {target:?}");
        }
    }
}

#[test]
fn tall_input_keeps_top_and_drops_bottom() {
    let src = PremulImage::from_straight(banded(40, 300, 6));
    let out = normalize(&src, canvas(108, 240)).unwrap();

    // Red band near the top survives (scaled by 2.7).
    assert_eq!(dominant(out.pixel(54, 3)), 0);
    assert_eq!(dominant(out.pixel(54, 120)), 2);

    // Nothing from the bottom band makes it into the output.
    for y in 0..240 {
        for x in 0..108 {
            assert_ne!(dominant(out.pixel(x, y)), 1, "green leaked at {x},{y}");
        }
    }
}

#[test]
fn wide_input_is_trimmed_evenly_from_both_sides() {
    let src = RgbaImage::from_fn(300, 40, |x, _| {
        if x < 130 {
            image::Rgba([255, 0, 0, 255])
        } else if x < 170 {
            image::Rgba([0, 0, 255, 255])
        } else {
            image::Rgba([0, 255, 0, 255])
        }
    });
    let out = normalize(&PremulImage::from_straight(src), canvas(40, 40)).unwrap();
    assert_eq!(out.canvas(), canvas(40, 40));
    for y in 0..40 {
        for x in 0..40 {
            assert_eq!(out.pixel(x, y), [0, 0, 255, 255], "at {x},{y}");
        }
    }
}

#[test]
fn center_anchor_keeps_middle() {
    let src = PremulImage::from_straight(banded(40, 300, 10));
    let out = normalize_anchored(&src, canvas(40, 40), Anchor::Center).unwrap();
    assert_eq!(out.canvas(), canvas(40, 40));
    let px = out.pixel(20, 20);
    assert!(px[0] > 200 && px[1] > 200 && px[2] < 60, "{px:?}");
    assert_ne!(dominant(out.pixel(20, 0)), 0);
}

#[test]
fn encoded_capture_is_decoded_and_normalized() {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(banded(40, 300, 6))
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let out = normalize_capture(&RawCapture::Encoded(buf), canvas(108, 240)).unwrap();
    assert_eq!(out.canvas(), canvas(108, 240));
}

#[test]
fn unreadable_capture_is_a_metadata_error() {
    let err = normalize_capture(&RawCapture::Encoded(b"not an image".to_vec()), canvas(10, 10))
        .unwrap_err();
    assert!(matches!(err, DevframeError::MetadataRead(_)), "{err}");

    let err = normalize_capture(&RawCapture::Rgba(RgbaImage::new(0, 5)), canvas(10, 10))
        .unwrap_err();
    assert!(matches!(err, DevframeError::MetadataRead(_)), "{err}");
}
