//! End-to-end scans of small programs

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use gcodescan_analyzer::{AnalysisResult, GcodeAnalyzer};
use gcodescan_core::{AnalysisError, Error};
use gcodescan_settings::Config;

fn analyze(program: &str) -> AnalysisResult {
    GcodeAnalyzer::default().analyze_str(program).unwrap()
}

fn dual_extruder_config() -> Config {
    let mut config = Config::default();
    config.profile.extruder.count = 2;
    config.profile.extruder.offsets = vec![[0.0, 0.0], [20.0, 0.0]];
    config
}

#[test]
fn test_repeated_absolute_e_is_counted_once() {
    let result = analyze("G1 X10 E5\nG1 X20 E5\n");
    assert_eq!(result.extrusion_length, vec![5.0]);
}

#[test]
fn test_travel_only_program() {
    let result = analyze("G28\nG0 X50 Y50 Z10 F3000\nG0 X0 Y0\nM84\n");
    assert_eq!(result.extrusion_length, vec![0.0]);
    assert_eq!(result.extrusion_volume, vec![0.0]);
    assert!(!result.printing_area.is_set());
    assert_eq!(result.printing_area.max_z, None);
    assert_eq!(result.dimensions.width, 0.0);
    assert!(result.total_time > 0.0);
}

#[test]
fn test_full_circle_arc_extrudes() {
    let result = analyze("M83\nG1 X10 Y0 F3000\nG3 X10 Y0 I-10 J0 E5\n");
    assert!((result.extrusion_length[0] - 5.0).abs() < 1e-9);
    assert!((result.dimensions.width - 20.0).abs() < 0.05);
    assert!((result.dimensions.depth - 20.0).abs() < 0.05);
    // 10 mm of travel plus 2 * pi * 10 mm of arc, all at 3000 mm/min
    let expected = (10.0 + 2.0 * std::f64::consts::PI * 10.0) / 3000.0;
    assert!((result.total_time - expected).abs() < 1e-3);
}

#[test]
fn test_tool_change_round_trip() {
    let program = "G1 X10 Y10 E1\nT1\nT0\nG1 X20 Y10 E2\n";
    let result = GcodeAnalyzer::new(dual_extruder_config())
        .analyze_str(program)
        .unwrap();
    assert_eq!(result.printing_area.min_x, Some(10.0));
    assert_eq!(result.printing_area.max_x, Some(20.0));
    assert_eq!(result.extrusion_length, vec![2.0, 0.0]);
}

#[test]
fn test_tool_offset_shifts_positions() {
    let program = "M83\nT1\nG1 X10 Y10 E1\n";
    let result = GcodeAnalyzer::new(dual_extruder_config())
        .analyze_str(program)
        .unwrap();
    assert_eq!(result.printing_area.min_x, Some(30.0));
    assert_eq!(result.extrusion_length, vec![0.0, 1.0]);
}

#[test]
fn test_out_of_range_tool_is_ignored() {
    let with_bad_tool = analyze("G1 X10 E1\nT99\nG1 X20 E2\n");
    let without = analyze("G1 X10 E1\nG1 X20 E2\n");
    assert_eq!(with_bad_tool, without);
    assert_eq!(with_bad_tool.extrusion_length.len(), 1);
}

#[test]
fn test_filament_volume() {
    let result = analyze(";filament_diameter = 1.75\nM83\nG1 X10 E100\n");
    assert_eq!(result.filament_diameter, 1.75);
    let expected = 100.0 * std::f64::consts::PI * 0.875 * 0.875 / 1000.0;
    assert!((result.extrusion_volume[0] - expected).abs() < 1e-12);
}

#[test]
fn test_filament_diameter_from_profile_block() {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(b"layer_height=0.1\x08filament_diameter=2.85\x08")
        .unwrap();
    let payload = STANDARD.encode(encoder.finish().unwrap());
    let program = format!(";CURA_PROFILE_STRING:{}\nG1 X1 E1\n", payload);

    let result = analyze(&program);
    assert_eq!(result.filament_diameter, 2.85);
}

#[test]
fn test_broken_profile_block_is_ignored() {
    let result = analyze(";filament_diameter=1.75\n;CURA_OCTO_PROFILE_STRING:%%%\nG1 X1 E1\n");
    assert_eq!(result.filament_diameter, 1.75);
    assert_eq!(result.extrusion_length, vec![1.0]);
}

#[test]
fn test_time_estimate_components() {
    // 100 mm at 6000 mm/min, 2 s dwell, 500 ms dwell
    let result = analyze("G1 X100 F6000\nG4 S2\nG4 P500\n");
    let expected = 100.0 / 6000.0 + 2.0 / 60.0 + 0.5 / 60.0;
    assert!((result.total_time - expected).abs() < 1e-12);
}

#[test]
fn test_cancellation_from_throttle_hook() {
    let processed = Arc::new(AtomicUsize::new(0));
    let counter = processed.clone();
    let analyzer = GcodeAnalyzer::default();
    let handle = analyzer.abort_handle();
    let mut analyzer = analyzer.with_throttle(move || {
        if counter.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
            handle.abort();
        }
    });

    let lines: Vec<String> = (0..10).map(|i| format!("G1 X{} E{}", i, i)).collect();
    let err = analyzer.analyze_lines(&lines).unwrap_err();

    assert!(matches!(
        err,
        Error::Analysis(AnalysisError::Aborted { lines_processed: 3 })
    ));
    assert_eq!(processed.load(Ordering::SeqCst), 3);
}

#[test]
fn test_cancellation_from_another_thread() {
    let started = Arc::new(AtomicUsize::new(0));
    let flag = started.clone();
    let mut analyzer = GcodeAnalyzer::default().with_throttle(move || {
        flag.fetch_add(1, Ordering::SeqCst);
    });
    let handle = analyzer.abort_handle();

    let worker = std::thread::spawn(move || {
        let lines = vec!["G1 X1"; 1000];
        let mut outcome = analyzer.analyze_lines(&lines);
        while outcome.is_ok() {
            outcome = analyzer.analyze_lines(&lines);
        }
        outcome
    });

    while started.load(Ordering::SeqCst) == 0 {
        std::thread::yield_now();
    }
    handle.abort();

    let err = worker.join().unwrap().unwrap_err();
    assert!(err.is_aborted());
}

#[test]
fn test_progress_reaches_one_hundred() {
    let mut config = Config::default();
    config.analysis.progress_interval = 10;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();

    let lines: Vec<String> = (0..25).map(|i| format!("G1 X{}", i)).collect();
    GcodeAnalyzer::new(config)
        .with_progress(move |pct| {
            sink.lock().unwrap().push(pct);
            Ok(())
        })
        .analyze_lines(&lines)
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![40.0, 80.0, 100.0]);
}

#[test]
fn test_file_with_invalid_utf8() {
    let mut file = tempfile::Builder::new().suffix(".gcode").tempfile().unwrap();
    file.write_all(b"; generated by \xc3\x28 slicer\r\nM83\r\nG1 X10 Y5 E2\r\nG1 X12 Y5 E1 ; \xff\r\n")
        .unwrap();

    let mut config = Config::default();
    config.analysis.progress_interval = 1;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();

    let result = GcodeAnalyzer::new(config)
        .with_progress(move |pct| {
            sink.lock().unwrap().push(pct);
            Ok(())
        })
        .analyze_file(file.path())
        .unwrap();

    assert_eq!(result.extrusion_length, vec![3.0]);
    assert_eq!(result.dimensions.width, 2.0);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 5);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen[3], 100.0);
}

#[test]
fn test_missing_file() {
    let err = GcodeAnalyzer::default()
        .analyze_file("/definitely/not/here.gcode")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Analysis(AnalysisError::InvalidInput { .. })
    ));
}

#[test]
fn test_result_serializes_to_json() {
    let result = analyze("G1 X10 Y10 E1\nG1 X20 Y20 E2\n");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["dimensions"]["width"], 10.0);
    assert_eq!(json["printing_area"]["max_y"], 20.0);
    assert_eq!(json["extrusion_length"][0], 2.0);
}

#[test]
fn test_relative_retractions_do_not_reduce_length() {
    let result = analyze("M83\nG1 X10 E5\nG1 E-2\nG1 E2\nG1 X20 E1\n");
    assert_eq!(result.extrusion_length, vec![8.0]);
}

#[test]
fn test_feed_override_only_scales_later_feedrates() {
    let before = analyze("G1 X0 F600\nM220 S50\nG1 X60\n");
    assert!((before.total_time - 0.1).abs() < 1e-12);

    let after = analyze("M220 S50\nG1 X60 F600\n");
    assert!((after.total_time - 0.2).abs() < 1e-12);
}
