//! Integration tests for Uplift
//!
//! These tests verify the end-to-end behavior of the analysis and reporting stack.

use std::io::Cursor;
use uplift::{
    Canvas, ChartOptions, Rgb, SimulationConfig, TTestError, WelchTTest, encode_png,
    render_uplift_chart, run_analysis, simulate_user_metrics, welch_t_test,
};

/// Decode a PNG with an independent decoder, returning (width, height, rgb bytes)
fn decode(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info().unwrap();
    {
        let info = reader.info();
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert!(!info.interlaced);
    }
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).unwrap();
    buf.truncate(frame.buffer_size());
    (frame.width, frame.height, buf)
}

/// Test the textbook equal-variance case
#[test]
fn test_welch_known_case() {
    let result = welch_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], &[6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();

    assert!((result.statistic + 5.0).abs() < 1e-12);
    assert!((result.degrees_of_freedom - 8.0).abs() < 1e-12);
    assert!((result.p_value - 0.001_052_83).abs() < 1e-6);
}

/// Swapping samples flips the sign but keeps df and p
#[test]
fn test_welch_antisymmetry() {
    let a = [0.31, 0.42, 0.38, 0.29, 0.45, 0.40];
    let b = [0.22, 0.35, 0.30, 0.27];
    let ab = welch_t_test(&a, &b).unwrap();
    let ba = welch_t_test(&b, &a).unwrap();

    assert!((ab.statistic + ba.statistic).abs() < 1e-12);
    assert!((ab.degrees_of_freedom - ba.degrees_of_freedom).abs() < 1e-12);
    assert!((ab.p_value - ba.p_value).abs() < 1e-9);
}

/// Constant, identical samples have no standard error
#[test]
fn test_welch_zero_standard_error() {
    let result = welch_t_test(&[3.0, 3.0, 3.0], &[3.0, 3.0]).unwrap();
    assert_eq!(result.statistic, 0.0);
    assert_eq!(result.degrees_of_freedom, 0.0);
    assert_eq!(result.p_value, 1.0);
}

#[test]
fn test_welch_rejects_single_observation() {
    let err = welch_t_test(&[1.0], &[1.0, 2.0]).unwrap_err();
    assert!(matches!(err, TTestError::InsufficientSamples { len: 1, .. }));
}

/// A 2x2 red image survives a round trip through an independent decoder
#[test]
fn test_png_round_trip_red_square() {
    let red = Rgb::new(255, 0, 0);
    let canvas = Canvas::new(2, 2, red);
    let bytes = encode_png(&canvas).unwrap();

    let (width, height, pixels) = decode(&bytes);
    assert_eq!((width, height), (2, 2));
    assert_eq!(pixels, [255u8, 0, 0].repeat(4));
}

/// Mixed pixels keep their positions
#[test]
fn test_png_round_trip_pattern() {
    let mut canvas = Canvas::new(5, 3, Rgb::WHITE);
    canvas.fill_rect(1, 1, 3, 1, Rgb::new(10, 20, 30));
    let bytes = encode_png(&canvas).unwrap();

    let (_, _, pixels) = decode(&bytes);
    let expected: Vec<u8> = canvas.pixels().iter().flat_map(|p| p.to_array()).collect();
    assert_eq!(pixels, expected);
    assert_eq!(&pixels[(5 + 1) * 3..(5 + 1) * 3 + 3], &[10u8, 20, 30]);
}

/// Unsupported characters occupy space but draw nothing
#[test]
fn test_unknown_glyph_spacing() {
    let mut with_symbol = Canvas::new(40, 10, Rgb::WHITE);
    let mut with_space = Canvas::new(40, 10, Rgb::WHITE);

    let end_symbol = with_symbol.draw_text("A@B", 1, 1, Rgb::BLACK);
    let end_space = with_space.draw_text("A B", 1, 1, Rgb::BLACK);

    assert_eq!(end_symbol, end_space);
    assert_eq!(with_symbol.pixels(), with_space.pixels());
}

/// Simulate, analyse, render and decode the chart
#[test]
fn test_end_to_end_chart() {
    let config = SimulationConfig {
        users: 400,
        seed: 42,
        ..SimulationConfig::default()
    };
    let records = simulate_user_metrics(&config).unwrap();
    let rows = run_analysis(&records, &WelchTTest::new()).unwrap();

    assert_eq!(rows.len(), 2);
    // Engagement lift of ~0.08 over 200 users per side is unmistakable
    assert!(rows[0].mean_change > 0.0);
    assert!(rows[0].p_value < 1e-3);

    let options = ChartOptions::default();
    let canvas = render_uplift_chart(&rows, &options);
    let (width, height, pixels) = decode(&encode_png(&canvas).unwrap());

    assert_eq!((width, height), (options.width, options.height));
    // Pre-launch bar of the first metric, just above the baseline
    let offset = ((339 * width + 100) * 3) as usize;
    assert_eq!(&pixels[offset..offset + 3], &options.pre_color.to_array());
}

/// Same seed, same report
#[test]
fn test_analysis_is_reproducible() {
    let config = SimulationConfig {
        users: 300,
        seed: 11,
        ..SimulationConfig::default()
    };
    let runner = WelchTTest::new();
    let first = run_analysis(&simulate_user_metrics(&config).unwrap(), &runner).unwrap();
    let second = run_analysis(&simulate_user_metrics(&config).unwrap(), &runner).unwrap();
    assert_eq!(first, second);
}

/// Artifacts land where the options say
#[test]
fn test_pipeline_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let options = uplift::RunOptions {
        simulation: SimulationConfig {
            users: 100,
            ..SimulationConfig::default()
        },
        gamma_cache_capacity: 8,
        data_dir: dir.path().join("data"),
        reports_dir: dir.path().join("reports"),
        chart_file: "uplift.png".to_string(),
        chart: ChartOptions::default(),
        skip_chart: false,
    };

    let artifacts = uplift::run_pipeline(&options).unwrap();
    let chart = std::fs::read(dir.path().join("reports/uplift.png")).unwrap();
    let (width, height, _) = decode(&chart);
    assert_eq!((width, height), (700, 420));
    assert_eq!(artifacts.report.summary.len(), 2);
    assert!(dir.path().join("data/feature_rollout_metrics.csv").exists());
}

/// The IDAT payload is a valid zlib stream of filter-0 scanlines
#[test]
fn test_idat_is_zlib_scanlines() {
    use std::io::Read;

    let canvas = Canvas::new(3, 2, Rgb::new(1, 2, 3));
    let bytes = encode_png(&canvas).unwrap();

    // Signature (8) + IHDR chunk (12 + 13) puts the IDAT length at offset 33
    let len = u32::from_be_bytes(bytes[33..37].try_into().unwrap()) as usize;
    assert_eq!(&bytes[37..41], b"IDAT");
    let mut raw = Vec::new();
    flate2::read::ZlibDecoder::new(&bytes[41..41 + len])
        .read_to_end(&mut raw)
        .unwrap();

    assert_eq!(raw.len(), 2 * (1 + 3 * 3));
    assert_eq!(raw[0], 0);
    assert_eq!(&raw[1..4], &[1u8, 2, 3]);
}
