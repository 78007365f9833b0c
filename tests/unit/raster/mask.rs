use super::*;

#[test]
fn corners_are_transparent_and_center_is_opaque() {
    for (w, h) in [(97, 216), (200, 200), (972, 2160)] {
        let size = Canvas::new(w, h).unwrap();
        for radius in [8.0, 24.0, 60.0] {
            let mask = rounded_mask(size, radius).unwrap();
            assert_eq!(mask.dimensions(), (w, h));
            for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
                assert!(
                    mask.get_pixel(x, y).0[0] <= 4,
                    "corner {x},{y} of {w}x{h} r={radius} not transparent"
                );
            }
            assert_eq!(mask.get_pixel(w / 2, h / 2).0[0], 255);
            // Edge midpoints sit on straight sides, far from any arc.
            assert!(mask.get_pixel(w / 2, 0).0[0] >= 250);
            assert!(mask.get_pixel(0, h / 2).0[0] >= 250);
        }
    }
}

#[test]
fn zero_radius_is_a_plain_rectangle() {
    let mask = rounded_mask(Canvas::new(10, 6).unwrap(), 0.0).unwrap();
    assert!(mask.pixels().all(|p| p.0[0] == 255));
}

#[test]
fn oversized_radius_is_clamped() {
    let mask = rounded_mask(Canvas::new(40, 40).unwrap(), 500.0).unwrap();
    assert_eq!(mask.get_pixel(0, 0).0[0], 0);
    assert_eq!(mask.get_pixel(20, 20).0[0], 255);
    assert!(mask.get_pixel(0, 20).0[0] > 0);
}

#[test]
fn invalid_radius_is_rejected() {
    let size = Canvas::new(10, 10).unwrap();
    assert!(rounded_mask(size, -1.0).is_err());
    assert!(rounded_mask(size, f64::INFINITY).is_err());
}
