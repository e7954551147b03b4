use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GrayImage as LumaImage, ImageFormat, Luma, Rgb, RgbImage};
use ndarray::{Array2, array};

use radiochrome::{
    Band, ColorScheme, EnhanceParams, Error, HistoryLog, OutputFormat, PixelImage, colorize,
    colorize_with_scheme, compute_histogram, compute_stats, generate_legend, normalize,
    process_bytes, process_directory_to_path, process_file_to_path, process_image, save_legend,
    scheme_names,
};

fn png_bytes(img: DynamicImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn gray_gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageLuma8(LumaImage::from_fn(width, height, |x, y| {
        Luma([((x * 7 + y * 3) % 256) as u8])
    }))
}

fn write_png(path: &Path, img: DynamicImage) {
    std::fs::write(path, png_bytes(img)).unwrap();
}

#[test]
fn two_by_two_end_to_end() {
    let image = PixelImage::from_gray(array![[0u8, 100], [150, 255]]).unwrap();
    let gray = normalize(&image, false, 1.0, 0).unwrap();
    assert_eq!(gray, array![[0u8, 100], [150, 255]]);

    let scheme = ColorScheme::new(
        "three-band",
        vec![
            Band::new("low", 0, 100, [0, 0, 255]),
            Band::new("mid", 100, 200, [0, 255, 0]),
            Band::new("high", 200, 256, [255, 0, 0]),
        ],
    );
    let colored = colorize_with_scheme(&gray, &scheme).unwrap();
    let expected = vec![0, 0, 255, 0, 255, 0, 0, 255, 0, 255, 0, 0];
    assert_eq!(colored.iter().copied().collect::<Vec<u8>>(), expected);

    let stats = compute_stats(&gray).unwrap();
    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 255.0);
    assert!((stats.mean - 126.25).abs() < 1e-9);
    assert!((stats.std - 91.88).abs() < 0.01);
}

#[test]
fn colorize_is_repeatable_for_partition_schemes() {
    let gray = Array2::from_shape_fn((32, 32), |(r, c)| ((r * 37 + c * 11) % 256) as u8);
    for name in scheme_names() {
        let first = colorize(&gray, name).unwrap();
        let second = colorize(&gray, name).unwrap();
        assert_eq!(first, second, "scheme {}", name);
    }
}

#[test]
fn equalized_run_keeps_invariants() {
    let image = PixelImage::from_gray(Array2::from_shape_fn((37, 53), |(r, c)| {
        (40 + (r * c) % 90) as u8
    }))
    .unwrap();
    let out = process_image(&image, &EnhanceParams::default()).unwrap();

    assert_eq!(out.enhanced.dim(), (37, 53, 3));
    assert_eq!(out.histogram.iter().sum::<u64>(), 37 * 53);
    assert_eq!(out.histogram, compute_histogram(&out.normalized));
    let s = out.stats;
    assert!(s.min <= s.mean && s.mean <= s.max);
    assert!(s.min <= s.median && s.median <= s.max);
}

#[test]
fn fallback_and_legend_shape() {
    let gray = Array2::from_shape_fn((8, 8), |(r, c)| (r * 32 + c) as u8);
    assert_eq!(
        colorize(&gray, "nonexistent_scheme").unwrap(),
        colorize(&gray, "standard").unwrap()
    );
    assert_eq!(generate_legend("nonexistent_scheme"), generate_legend("standard"));
    assert_eq!(generate_legend("soft").dim(), (40, 256, 3));
}

#[test]
fn remap_saturates() {
    let image = PixelImage::from_gray(array![[250u8, 0]]).unwrap();
    let gray = normalize(&image, false, 2.0, 50).unwrap();
    assert_eq!(gray, array![[255u8, 50]]);
    let gray = normalize(&image, false, 0.5, -50).unwrap();
    assert_eq!(gray, array![[75u8, 0]]);
}

#[test]
fn process_bytes_records_shapes() {
    let rgb = RgbImage::from_fn(30, 20, |x, y| Rgb([x as u8 * 8, y as u8 * 12, 90]));
    let params = EnhanceParams {
        max_size: Some(15),
        ..Default::default()
    };
    let result = process_bytes(&png_bytes(DynamicImage::ImageRgb8(rgb)), "color.png", &params)
        .unwrap();

    assert_eq!(result.original_shape.width, 30);
    assert_eq!(result.original_shape.height, 20);
    assert_eq!(result.original_shape.channels, 3);
    assert_eq!(result.entry.filename, "color.png");
    assert_eq!(result.entry.color_scheme, "standard");
    assert_eq!(
        (result.entry.enhanced_shape.width, result.entry.enhanced_shape.height),
        (15, 10)
    );
    let jpeg = result.encode_jpeg().unwrap();
    let decoded = image::load_from_memory(&jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (15, 10));
}

#[test]
fn file_outputs_in_every_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.png");
    write_png(&input, gray_gradient(24, 16));

    for format in [OutputFormat::JPEG, OutputFormat::TIFF, OutputFormat::PNG] {
        let output = dir.path().join(format!("out.{}", format.extension()));
        let entry =
            process_file_to_path(&input, &output, &EnhanceParams::default(), format, false)
                .unwrap();
        assert_eq!(entry.filename, "scan.png");
        let decoded = image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (24, 16), "{}", format);
    }
}

#[test]
fn sidecar_is_written_on_request() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("knee.png");
    write_png(&input, gray_gradient(10, 10));
    let output = dir.path().join("enhanced_knee.png");

    process_file_to_path(&input, &output, &EnhanceParams::default(), OutputFormat::PNG, true)
        .unwrap();

    let sidecar = dir.path().join("enhanced_knee.json");
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(sidecar).unwrap()).unwrap();
    assert_eq!(value["source"], "knee.png");
    assert_eq!(value["histogram"].as_array().unwrap().len(), 256);
}

#[test]
fn pixel_identical_palette_via_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.png");
    write_png(&input, DynamicImage::ImageLuma8(LumaImage::from_pixel(4, 4, Luma([250]))));
    let output = dir.path().join("flat_out.png");
    let params = EnhanceParams {
        apply_adaptive_equalization: false,
        color_scheme: "high_contrast".into(),
        ..Default::default()
    };
    process_file_to_path(&input, &output, &params, OutputFormat::PNG, false).unwrap();

    // 250 falls in the top high_contrast band (white)
    let decoded = image::open(&output).unwrap().to_rgb8();
    assert!(decoded.pixels().all(|p| p.0 == [255, 255, 255]));
}

#[test]
fn batch_directory_counts_and_names() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    write_png(&input_dir.path().join("a.png"), gray_gradient(12, 9));
    write_png(&input_dir.path().join("b.PNG"), gray_gradient(5, 7));
    std::fs::write(input_dir.path().join("notes.txt"), "not an image").unwrap();
    std::fs::write(input_dir.path().join("broken.png"), b"garbage").unwrap();

    let report = process_directory_to_path(
        input_dir.path(),
        output_dir.path(),
        &EnhanceParams::default(),
        OutputFormat::PNG,
        false,
        true,
    )
    .unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors, 1);
    assert_eq!(report.entries.len(), 2);
    assert!(output_dir.path().join("enhanced_a.png").exists());
    assert!(output_dir.path().join("enhanced_b.png").exists());

    let mut log = HistoryLog::default();
    log.extend_batch(report.entries);
    assert_eq!(log.len(), 2);
}

#[test]
fn batch_stops_on_first_error_when_asked() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    std::fs::write(input_dir.path().join("broken.png"), b"garbage").unwrap();

    let err = process_directory_to_path(
        input_dir.path(),
        output_dir.path(),
        &EnhanceParams::default(),
        OutputFormat::JPEG,
        false,
        false,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn batch_writes_sidecars_on_request() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    write_png(&input_dir.path().join("hand.png"), gray_gradient(9, 6));
    write_png(&input_dir.path().join("spine.png"), gray_gradient(6, 9));

    let report = process_directory_to_path(
        input_dir.path(),
        output_dir.path(),
        &EnhanceParams::default(),
        OutputFormat::JPEG,
        true,
        false,
    )
    .unwrap();
    assert_eq!(report.processed, 2);

    for stem in ["enhanced_hand", "enhanced_spine"] {
        assert!(output_dir.path().join(format!("{stem}.jpg")).exists());
        let sidecar = output_dir.path().join(format!("{stem}.json"));
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(sidecar).unwrap()).unwrap();
        assert_eq!(value["histogram"].as_array().unwrap().len(), 256);
    }
    assert!(!output_dir.path().join("hand.json").exists());
}

#[test]
fn unwritable_legend_path_is_an_io_error_in_every_format() {
    let dir = tempfile::tempdir().unwrap();
    for format in [OutputFormat::JPEG, OutputFormat::TIFF, OutputFormat::PNG] {
        let path = dir
            .path()
            .join("missing")
            .join(format!("legend.{}", format.extension()));
        let err = save_legend("standard", &path, format).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{}: {:?}", format, err);
    }
}

#[test]
fn legend_file_has_legend_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legend.png");
    save_legend("soft", &path, OutputFormat::PNG).unwrap();
    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (256, 40));
}
