use whorl::{FrameIndex, Severity, Storyboard};

#[test]
fn json_fixture_validates() {
    let s = include_str!("data/storyboard.json");
    let sb: Storyboard = serde_json::from_str(s).unwrap();
    sb.validate().unwrap();

    assert_eq!(sb.series.len(), 28);
    assert_eq!(sb.duration(), FrameIndex(1480));
    assert_eq!(sb.timeline.phases().len(), 4);

    // Defaults fill the sections the file omits.
    assert_eq!(sb.style.label_stride, 2);
    assert_eq!(sb.camera.top_down.elevation_deg, 90.0);
}

#[test]
fn fixture_severities_spot_check() {
    let s = include_str!("data/storyboard.json");
    let sb: Storyboard = serde_json::from_str(s).unwrap();

    let classify = |i: usize| sb.bands.classify(sb.series.get(i).unwrap().value);
    assert_eq!(classify(0), Severity::Warning); // 11.40
    assert_eq!(classify(1), Severity::Low); // 4.44
    assert_eq!(classify(10), Severity::Critical); // 21.14
    assert_eq!(classify(12), Severity::Moderate); // 6.33
    assert_eq!(classify(18), Severity::Critical); // 17.53
}

#[test]
fn timeline_json_rejects_zero_frame_phase() {
    let s = include_str!("data/storyboard.json");
    let mut v: serde_json::Value = serde_json::from_str(s).unwrap();
    v["timeline"][1]["frames"] = serde_json::json!(0);
    assert!(serde_json::from_value::<Storyboard>(v).is_err());
}
