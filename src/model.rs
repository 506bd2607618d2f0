use crate::{
    animation::ease::Ease,
    foundation::core::{CameraPose, Fps, FrameIndex},
    foundation::error::{WhorlError, WhorlResult},
    scale::{RadiusScale, SeverityBands},
    series::Series,
    timeline::{ItemLoop, Phase, PhaseKind, Timeline},
};

/// Full description of one animation: data, scales, phase plan, camera and
/// trail styling. Everything the evaluator needs; nothing the renderer owns
/// (fonts, palettes, codecs stay outside).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Storyboard {
    pub fps: Fps,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub series: Series,
    #[serde(default)]
    pub scale: RadiusScale,
    #[serde(default)]
    pub bands: SeverityBands,
    pub timeline: Timeline,
    /// Sub-loop driving `Draw` phases: one item per series point.
    pub items: ItemLoop,
    #[serde(default)]
    pub camera: CameraScript,
    #[serde(default)]
    pub style: TrailStyle,
}

/// The three key camera poses the timeline moves between.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraScript {
    /// Flat 2D view during `Draw`.
    pub top_down: CameraPose,
    /// End of `Lift`, start of `Orbit`.
    pub tilted: CameraPose,
    /// End of `Orbit`, held through `Hold`.
    pub side: CameraPose,
}

impl Default for CameraScript {
    fn default() -> Self {
        Self {
            top_down: CameraPose::new(90.0, -90.0),
            tilted: CameraPose::new(45.0, -75.0),
            side: CameraPose::new(0.0, 0.0),
        }
    }
}

/// Opacity/width styling for rings and text across the phases.
///
/// The defaults reproduce the reference look: older rings in the 2D trail
/// fade toward `trail_alpha_min`, the active ring pops, lifted rings dim
/// slightly with depth, settled rings share one alpha.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrailStyle {
    /// Vertical distance between consecutive rings once lifted.
    pub ring_spacing: f64,
    pub trail_alpha: f64,
    pub trail_fade_per_ring: f64,
    pub trail_alpha_min: f64,
    pub trail_width: f64,
    pub active_alpha: f64,
    pub active_width: f64,
    pub lift_alpha: f64,
    pub lift_fade_per_ring: f64,
    pub lift_alpha_min: f64,
    pub lift_width: f64,
    pub settled_alpha: f64,
    pub settled_width: f64,
    /// Item progress past which the center readout fades in.
    pub readout_reveal: f64,
    pub readout_value_alpha: f64,
    pub readout_label_alpha: f64,
    /// Every Nth ring gets a side date label.
    pub label_stride: usize,
    /// Orbit progress past which side labels fade in.
    pub label_reveal: f64,
    /// Orbit progress span over which that fade completes.
    pub label_fade_window: f64,
    pub label_alpha: f64,
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            ring_spacing: 0.1,
            trail_alpha: 0.5,
            trail_fade_per_ring: 0.015,
            trail_alpha_min: 0.15,
            trail_width: 2.0,
            active_alpha: 0.95,
            active_width: 2.8,
            lift_alpha: 0.75,
            lift_fade_per_ring: 0.01,
            lift_alpha_min: 0.3,
            lift_width: 2.2,
            settled_alpha: 0.85,
            settled_width: 2.5,
            readout_reveal: 0.7,
            readout_value_alpha: 0.8,
            readout_label_alpha: 0.7,
            label_stride: 2,
            label_reveal: 0.4,
            label_fade_window: 0.3,
            label_alpha: 0.85,
        }
    }
}

impl TrailStyle {
    pub fn validate(&self) -> WhorlResult<()> {
        if self.label_stride == 0 {
            return Err(WhorlError::validation("label_stride must be >= 1"));
        }
        if !(0.0..1.0).contains(&self.readout_reveal) {
            return Err(WhorlError::validation("readout_reveal must be in [0, 1)"));
        }
        if !(0.0..1.0).contains(&self.label_reveal) {
            return Err(WhorlError::validation("label_reveal must be in [0, 1)"));
        }
        if self.label_fade_window <= 0.0 {
            return Err(WhorlError::validation("label_fade_window must be > 0"));
        }
        if self.ring_spacing < 0.0 {
            return Err(WhorlError::validation("ring_spacing must be >= 0"));
        }
        Ok(())
    }
}

impl Storyboard {
    /// The classic four-phase plan: draw every point, lift into a cylinder,
    /// orbit to the side view, hold.
    pub fn standard(
        fps: Fps,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        series: Series,
    ) -> WhorlResult<Self> {
        series.validate()?;
        let items = ItemLoop::new(40, 40, Ease::OutCubic)?;
        let timeline = standard_plan(series.len(), &items)?;

        let sb = Self {
            fps,
            title: title.into(),
            subtitle: subtitle.into(),
            series,
            scale: RadiusScale::default(),
            bands: SeverityBands::default(),
            timeline,
            items,
            camera: CameraScript::default(),
            style: TrailStyle::default(),
        };
        sb.validate()?;
        Ok(sb)
    }

    pub fn duration(&self) -> FrameIndex {
        self.timeline.total_frames()
    }

    pub fn validate(&self) -> WhorlResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(WhorlError::validation("fps must have num>0 and den>0"));
        }
        self.series.validate()?;
        self.scale.validate()?;
        self.bands.validate()?;
        self.items.validate()?;
        self.style.validate()?;
        Ok(())
    }
}

/// The classic phase plan sized to a series: one item period per ring, then
/// lift, orbit and hold spans matching the reference animation.
pub fn standard_plan(series_len: usize, items: &ItemLoop) -> WhorlResult<Timeline> {
    items.validate()?;
    let draw_frames = (series_len as u64) * items.period;
    Timeline::new(vec![
        Phase::new(PhaseKind::Draw, draw_frames, Ease::Linear),
        Phase::new(PhaseKind::Lift, 120, Ease::SmoothStep),
        Phase::new(PhaseKind::Orbit, 150, Ease::SmoothStep),
        Phase::new(PhaseKind::Hold, 90, Ease::Linear),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::DataPoint;

    fn basic_board() -> Storyboard {
        let series = Series::new(vec![
            DataPoint::new("1404/09/01", 11.40),
            DataPoint::new("1404/09/02", 4.44),
            DataPoint::new("1404/09/03", 16.81),
        ]);
        Storyboard::standard(
            Fps::new(30, 1).unwrap(),
            "Kerman Branch",
            "Daily Performance Analysis",
            series,
        )
        .unwrap()
    }

    #[test]
    fn standard_plan_duration_covers_all_points() {
        let sb = basic_board();
        // 3 rings * 40 + 120 + 150 + 90
        assert_eq!(sb.duration(), FrameIndex(480));
    }

    #[test]
    fn json_roundtrip() {
        let sb = basic_board();
        let s = serde_json::to_string_pretty(&sb).unwrap();
        let de: Storyboard = serde_json::from_str(&s).unwrap();
        assert_eq!(de.series.len(), 3);
        assert_eq!(de.duration(), sb.duration());
        de.validate().unwrap();
    }

    #[test]
    fn validate_rejects_empty_series() {
        let mut sb = basic_board();
        sb.series = Series::new(vec![]);
        assert!(sb.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_fps() {
        let mut sb = basic_board();
        sb.fps = Fps { num: 30, den: 0 };
        assert!(sb.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_label_stride() {
        let mut sb = basic_board();
        sb.style.label_stride = 0;
        assert!(sb.validate().is_err());
    }

    #[test]
    fn standard_rejects_empty_series() {
        assert!(
            Storyboard::standard(
                Fps::new(30, 1).unwrap(),
                "t",
                "",
                Series::new(vec![]),
            )
            .is_err()
        );
    }
}
