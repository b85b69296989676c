//! Edge case tests for liveness, mapping, panel binding and configuration


use parallax_photo::{
    camera::CameraMapping,
    config::Config,
    liveness::{LivenessMonitor, TrackingState},
    panel::Param,
    tracker::{PositionSample, ScriptedSensor},
};
use std::time::{Duration, Instant};
use test_helpers::{test_app, test_config};

#[test]
fn test_frozen_sensor_degrades_despite_redelivery() {
    let config = test_config(50);
    let frozen = PositionSample::new(0.4, 0.4, 0.4);
    // The sensor keeps re-delivering the exact same coordinates
    let sensor = ScriptedSensor::from_samples(&[frozen; 6]);
    let mut app = test_app(&config, Box::new(sensor));

    let start = Instant::now();
    for i in 0..6u64 {
        app.step(start + Duration::from_millis(i * 20), 0.016).unwrap();
    }

    assert_eq!(app.tracking_state(), TrackingState::Lost);
}

#[test]
fn test_random_distinct_samples_stay_active() {
    let config = test_config(100);
    let samples: Vec<PositionSample> = (0..20)
        .map(|_| PositionSample::new(rand::random::<f64>(), rand::random::<f64>(), rand::random::<f64>()))
        .collect();
    let mut app = test_app(&config, Box::new(ScriptedSensor::from_samples(&samples)));

    let start = Instant::now();
    for i in 0..20u64 {
        app.step(start + Duration::from_millis(i * 30), 0.016).unwrap();
        assert_eq!(app.tracking_state(), TrackingState::Active);
    }
}

#[test]
fn test_mapper_handles_extreme_values() {
    let mapping = CameraMapping::default();

    let extreme_samples = [
        PositionSample::new(f64::INFINITY, f64::NEG_INFINITY, 0.0),
        PositionSample::new(f64::NAN, f64::NAN, f64::NAN),
        PositionSample::new(f64::MAX, f64::MIN, 1e100),
        PositionSample::new(0.0, 0.0, 0.0),
    ];

    // The mapping is total; extreme inputs must not panic
    for sample in extreme_samples {
        let _ = mapping.target_for_sample(sample, 5.0);
    }
}

#[test]
fn test_monitor_tolerates_out_of_order_ticks() {
    let start = Instant::now();
    let mut monitor = LivenessMonitor::new(Duration::from_millis(50), start);

    monitor.observe_sample(PositionSample::new(1.0, 0.0, 0.0), start + Duration::from_millis(100));

    // A tick carrying an earlier timestamp than the last observation
    let state = monitor.tick(Some(PositionSample::new(1.0, 0.0, 0.0)), start + Duration::from_millis(40));
    assert_eq!(state, TrackingState::Active);
}

#[test]
fn test_panel_changes_feed_the_next_target() {
    let config = test_config(2000);
    let sensor = ScriptedSensor::from_samples(&[
        PositionSample::new(1.0, 1.0, 0.0),
        PositionSample::new(2.0, 1.0, 0.0),
    ]);
    let mut app = test_app(&config, Box::new(sensor));

    let start = Instant::now();
    app.step(start, 0.016).unwrap();
    assert_eq!(app.backend().last_frame().unwrap().displacement_scale, 5.0);

    // The tweak panel raises the displacement scale between frames
    let applied = Param::DisplacementScale.set(&mut app.scene_mut().material, 12.0);
    assert_eq!(applied, 12.0);

    app.step(start + Duration::from_millis(16), 0.016).unwrap();
    assert_eq!(app.backend().last_frame().unwrap().displacement_scale, 12.0);
}

#[test]
fn test_panel_clamps_out_of_range_requests() {
    let config = test_config(2000);
    let sensor = ScriptedSensor::from_samples(&[PositionSample::new(1.0, 1.0, 0.0)]);
    let mut app = test_app(&config, Box::new(sensor));

    assert_eq!(Param::DisplacementScale.set(&mut app.scene_mut().material, 99.0), 30.0);
    assert_eq!(Param::AmbientIntensity.set(&mut app.scene_mut().material, -1.0), 0.0);
    assert_eq!(Param::DisplacementBias.set(&mut app.scene_mut().material, 10.5), 10.0);
}

#[test]
fn test_config_yaml_round_trip() {
    let mut config = test_config(750);
    config.camera.gain_x = 0.3;
    config.material.displacement_bias = 1.5;

    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(parsed.liveness.quiet_period_ms, 750);
    assert!((parsed.camera.gain_x - 0.3).abs() < f64::EPSILON);
    assert!((parsed.material.displacement_bias - 1.5).abs() < f64::EPSILON);
    assert!(parsed.validate().is_ok());
}
