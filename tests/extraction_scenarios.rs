use ridgematch::{
    extract, ExtractConfig, Extractor, ImageView, MinutiaKind, Orientation, RidgeMatchError,
    Smoothing,
};

/// Dark ridges drawn onto a white canvas.
fn canvas(width: usize, height: usize, ridge: &[(usize, usize)]) -> Vec<u8> {
    let mut data = vec![255u8; width * height];
    for &(x, y) in ridge {
        data[y * width + x] = 0;
    }
    data
}

/// Sinusoidal ridge field with phase dislocations, inside a white border.
fn finger(
    size: usize,
    pad: usize,
    period: f64,
    angle_deg: f64,
    defects: &[(f64, f64, f64)],
) -> Vec<u8> {
    let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
    let mut data = vec![255u8; size * size];
    for y in pad..size - pad {
        for x in pad..size - pad {
            let (fx, fy) = (x as f64, y as f64);
            let mut phase = std::f64::consts::TAU * (fx * cos_a + fy * sin_a) / period;
            for &(cx, cy, charge) in defects {
                phase += charge * (fy - cy).atan2(fx - cx);
            }
            let value = 127.5 + 127.5 * phase.cos();
            data[y * size + x] = value.round().clamp(0.0, 255.0) as u8;
        }
    }
    data
}

#[test]
fn straight_ridge_ends_in_one_ending() {
    let ridge: Vec<(usize, usize)> = (0..=4).map(|x| (x, 4)).collect();
    let data = canvas(9, 9, &ridge);
    let image = ImageView::from_slice(&data, 9, 9).unwrap();

    let set = extract(image).unwrap();
    assert_eq!(set.len(), 1, "{set:?}");
    let m = set.get(0).unwrap();
    assert_eq!(m.kind(), MinutiaKind::Ending);
    assert!(m.x().abs_diff(4) <= 1 && m.y().abs_diff(4) <= 1);
    match m.orientation() {
        Orientation::Single(angle) => assert!(angle.is_finite()),
        Orientation::Triple(_) => panic!("ending must carry one angle"),
    }
}

#[test]
fn forked_ridge_yields_one_bifurcation() {
    let mut ridge: Vec<(usize, usize)> = (2..=10).map(|x| (x, 10)).collect();
    for k in 1..=8 {
        ridge.push((10 + k, 10 - k));
        ridge.push((10 + k, 10 + k));
    }
    let data = canvas(21, 21, &ridge);
    let image = ImageView::from_slice(&data, 21, 21).unwrap();

    let set = extract(image).unwrap();
    assert_eq!(set.len(), 1, "{set:?}");
    let m = set.get(0).unwrap();
    assert_eq!(m.kind(), MinutiaKind::Bifurcation);
    assert_eq!((m.x(), m.y()), (10, 10));
    assert_eq!(m.orientation().angles().len(), 3);
}

#[test]
fn blank_image_yields_empty_set() {
    for value in [0u8, 128, 255] {
        let data = vec![value; 32 * 24];
        let image = ImageView::from_slice(&data, 32, 24).unwrap();
        assert!(extract(image).unwrap().is_empty());
    }
}

#[test]
fn zero_area_image_is_invalid_input() {
    let data: Vec<u8> = Vec::new();
    let err = ImageView::from_slice(&data, 0, 0)
        .and_then(extract)
        .unwrap_err();
    assert!(matches!(err, RidgeMatchError::InvalidInput { .. }));
}

#[test]
fn minutiae_respect_border_and_separation() {
    let size = 96;
    let data = finger(size, 12, 7.0, 0.0, &[(40.0, 40.0, 1.0), (60.0, 58.0, -1.0)]);
    let image = ImageView::from_slice(&data, size, size).unwrap();
    let cfg = ExtractConfig::default();
    let set = Extractor::new(cfg.clone()).unwrap().extract(image).unwrap();
    assert!(set.len() >= 5, "expected a reliable set, got {}", set.len());

    for m in set.iter() {
        assert!(m.x() > cfg.border_margin && m.x() + cfg.border_margin < size);
        assert!(m.y() > cfg.border_margin && m.y() + cfg.border_margin < size);
    }
    let pts = set.as_slice();
    for (i, a) in pts.iter().enumerate() {
        for b in &pts[i + 1..] {
            let dx = a.x() as f32 - b.x() as f32;
            let dy = a.y() as f32 - b.y() as f32;
            assert!((dx * dx + dy * dy).sqrt() > cfg.min_separation);
        }
    }
}

#[test]
fn dislocation_produces_minutia_nearby() {
    let size = 64;
    let data = finger(size, 0, 7.0, 0.0, &[(32.0, 32.0, 1.0)]);
    let image = ImageView::from_slice(&data, size, size).unwrap();
    let set = extract(image).unwrap();
    let near_core = set
        .iter()
        .any(|m| m.x().abs_diff(32) <= 4 && m.y().abs_diff(32) <= 4);
    assert!(near_core, "{set:?}");
}

#[test]
fn extraction_is_deterministic() {
    let size = 80;
    let data = finger(size, 8, 8.0, 25.0, &[(35.0, 40.0, 1.0), (50.0, 30.0, 1.0)]);
    let image = ImageView::from_slice(&data, size, size).unwrap();
    let first = extract(image).unwrap();
    let copy = data.clone();
    let second = extract(ImageView::from_slice(&copy, size, size).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn configured_separation_is_honored() {
    let size = 96;
    let data = finger(size, 12, 7.5, -40.0, &[(36.0, 60.0, -1.0), (62.0, 44.0, 1.0)]);
    let image = ImageView::from_slice(&data, size, size).unwrap();
    let strict = Extractor::new(ExtractConfig {
        min_separation: 20.0,
        border_margin: 10,
        ..ExtractConfig::default()
    })
    .unwrap()
    .extract(image)
    .unwrap();
    assert!(!strict.is_empty());
    let pts = strict.as_slice();
    for (i, a) in pts.iter().enumerate() {
        assert!(a.x() > 10 && a.y() > 10 && a.x() + 10 < size && a.y() + 10 < size);
        for b in &pts[i + 1..] {
            let dx = a.x() as f32 - b.x() as f32;
            let dy = a.y() as f32 - b.y() as f32;
            assert!((dx * dx + dy * dy).sqrt() > 20.0);
        }
    }
}

#[test]
fn skeleton_is_returned_alongside_minutiae() {
    let ridge: Vec<(usize, usize)> = (0..=4).map(|x| (x, 4)).collect();
    let data = canvas(9, 9, &ridge);
    let image = ImageView::from_slice(&data, 9, 9).unwrap();
    let extractor = Extractor::new(ExtractConfig {
        smoothing: Smoothing::Never,
        ..ExtractConfig::default()
    })
    .unwrap();
    let (set, skeleton) = extractor.extract_with_skeleton(image).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(skeleton.count(), 5);
    assert_eq!(skeleton.get(4, 4), Some(true));
}

#[test]
fn bilevel_input_skips_blur_by_default() {
    let ridge: Vec<(usize, usize)> = (0..=4).map(|x| (x, 4)).collect();
    let data = canvas(9, 9, &ridge);
    let image = ImageView::from_slice(&data, 9, 9).unwrap();
    let with = |smoothing: Smoothing| {
        Extractor::new(ExtractConfig {
            smoothing,
            ..ExtractConfig::default()
        })
        .unwrap()
        .extract(image)
        .unwrap()
    };

    assert_eq!(with(Smoothing::Auto), with(Smoothing::Never));
    assert_eq!(with(Smoothing::Auto).len(), 1);
    assert!(with(Smoothing::Always).is_empty());
}
