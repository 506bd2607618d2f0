use crate::{
    animation::lerp::Lerp,
    foundation::core::{CameraPose, FrameIndex},
    foundation::error::WhorlResult,
    model::Storyboard,
    scale::Severity,
    timeline::{PhaseCursor, PhaseKind},
};

/// Everything the renderer needs for one frame. A pure function of
/// `(Storyboard, FrameIndex)` — re-evaluating the same frame yields an
/// identical state, and frames may be evaluated in any order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameState {
    pub frame: FrameIndex,
    pub phase: PhaseKind,
    pub phase_progress: f64,
    pub camera: CameraPose,
    pub rings: Vec<RingState>,
    pub readout: Option<Readout>,
    pub side_labels: Vec<SideLabel>,
}

/// One visible ring. `sweep` is the fraction of the full turn drawn so far;
/// `height` is the vertical offset once rings lift into the cylinder.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RingState {
    pub index: usize,
    pub label: String,
    pub value: f64,
    pub severity: Severity,
    pub radius: f64,
    pub sweep: f64,
    pub height: f64,
    pub alpha: f64,
    pub width: f64,
    /// The ring currently animating in. Renderers typically add a glow pass.
    pub focus: bool,
}

/// Center text block: the value of the ring being drawn plus its date.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Readout {
    pub value_text: String,
    pub value_alpha: f64,
    pub label_text: String,
    pub label_alpha: f64,
    pub severity: Severity,
}

/// Date label beside the cylinder in the side view.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SideLabel {
    pub index: usize,
    pub text: String,
    pub height: f64,
    pub alpha: f64,
}

pub struct Evaluator;

impl Evaluator {
    /// Evaluate one frame of the storyboard.
    ///
    /// Total over all frame indices: anything at or past the timeline end
    /// holds the final phase at progress 1.0. Only storyboard validation can
    /// fail.
    #[tracing::instrument(skip(sb))]
    pub fn eval_frame(sb: &Storyboard, frame: FrameIndex) -> WhorlResult<FrameState> {
        sb.validate()?;
        let cursor = sb.timeline.resolve(frame);

        let state = match cursor.kind {
            PhaseKind::Draw => eval_draw(sb, frame, &cursor),
            PhaseKind::Lift => eval_lift(sb, frame, &cursor),
            PhaseKind::Orbit => eval_orbit(sb, frame, &cursor),
            PhaseKind::Hold => eval_hold(sb, frame, &cursor),
        };
        Ok(state)
    }
}

fn ring_base(sb: &Storyboard, index: usize) -> (String, f64, Severity, f64) {
    // Index is always in range: callers iterate the series itself.
    let point = sb.series.get(index).expect("ring index within series");
    (
        point.label.clone(),
        point.value,
        sb.bands.classify(point.value),
        sb.scale.radius_for(point.value),
    )
}

fn eval_draw(sb: &Storyboard, frame: FrameIndex, cursor: &PhaseCursor) -> FrameState {
    let style = &sb.style;
    let item = sb.items.resolve(cursor.local_frame, sb.series.len());

    let mut rings = Vec::with_capacity(item.index + 1);
    for i in 0..item.index {
        let (label, value, severity, radius) = ring_base(sb, i);
        let alpha =
            (style.trail_alpha - (i as f64) * style.trail_fade_per_ring).max(style.trail_alpha_min);
        rings.push(RingState {
            index: i,
            label,
            value,
            severity,
            radius,
            sweep: 1.0,
            height: 0.0,
            alpha,
            width: style.trail_width,
            focus: false,
        });
    }

    let (label, value, severity, radius) = ring_base(sb, item.index);
    rings.push(RingState {
        index: item.index,
        label: label.clone(),
        value,
        severity,
        radius,
        sweep: item.progress,
        height: 0.0,
        alpha: style.active_alpha,
        width: style.active_width,
        focus: true,
    });

    // The readout fades in over the tail of the ring's draw, tracking the
    // eased progress the sweep itself uses.
    let readout = if item.progress > style.readout_reveal {
        let ramp = (item.progress - style.readout_reveal) / (1.0 - style.readout_reveal);
        Some(Readout {
            value_text: format!("{value:.1}%"),
            value_alpha: ramp * style.readout_value_alpha,
            label_text: label,
            label_alpha: ramp * style.readout_label_alpha,
            severity,
        })
    } else {
        None
    };

    FrameState {
        frame,
        phase: PhaseKind::Draw,
        phase_progress: cursor.progress,
        camera: sb.camera.top_down,
        rings,
        readout,
        side_labels: Vec::new(),
    }
}

fn eval_lift(sb: &Storyboard, frame: FrameIndex, cursor: &PhaseCursor) -> FrameState {
    let style = &sb.style;
    let t = cursor.progress;

    let rings = (0..sb.series.len())
        .map(|i| {
            let (label, value, severity, radius) = ring_base(sb, i);
            let alpha = (style.lift_alpha - (i as f64) * style.lift_fade_per_ring)
                .max(style.lift_alpha_min);
            RingState {
                index: i,
                label,
                value,
                severity,
                radius,
                sweep: 1.0,
                height: (i as f64) * style.ring_spacing * t,
                alpha,
                width: style.lift_width,
                focus: false,
            }
        })
        .collect();

    // The last readout fades out as the stack rises.
    let last = sb.series.len() - 1;
    let (label, value, severity, _) = ring_base(sb, last);
    let fade = 1.0 - t;
    let readout = (fade > 0.0).then(|| Readout {
        value_text: format!("{value:.1}%"),
        value_alpha: fade * style.readout_value_alpha,
        label_text: label,
        label_alpha: fade * style.readout_label_alpha,
        severity,
    });

    FrameState {
        frame,
        phase: PhaseKind::Lift,
        phase_progress: t,
        camera: <CameraPose as Lerp>::lerp(&sb.camera.top_down, &sb.camera.tilted, t),
        rings,
        readout,
        side_labels: Vec::new(),
    }
}

fn settled_rings(sb: &Storyboard) -> Vec<RingState> {
    let style = &sb.style;
    (0..sb.series.len())
        .map(|i| {
            let (label, value, severity, radius) = ring_base(sb, i);
            RingState {
                index: i,
                label,
                value,
                severity,
                radius,
                sweep: 1.0,
                height: (i as f64) * style.ring_spacing,
                alpha: style.settled_alpha,
                width: style.settled_width,
                focus: false,
            }
        })
        .collect()
}

fn side_labels(sb: &Storyboard, alpha: f64) -> Vec<SideLabel> {
    if alpha <= 0.0 {
        return Vec::new();
    }
    let style = &sb.style;
    (0..sb.series.len())
        .step_by(style.label_stride)
        .map(|i| SideLabel {
            index: i,
            text: sb.series.get(i).expect("label index within series").label.clone(),
            height: (i as f64) * style.ring_spacing,
            alpha,
        })
        .collect()
}

fn eval_orbit(sb: &Storyboard, frame: FrameIndex, cursor: &PhaseCursor) -> FrameState {
    let style = &sb.style;
    let t = cursor.progress;

    let label_alpha = if t > style.label_reveal {
        ((t - style.label_reveal) / style.label_fade_window).min(1.0) * style.label_alpha
    } else {
        0.0
    };

    FrameState {
        frame,
        phase: PhaseKind::Orbit,
        phase_progress: t,
        camera: <CameraPose as Lerp>::lerp(&sb.camera.tilted, &sb.camera.side, t),
        rings: settled_rings(sb),
        readout: None,
        side_labels: side_labels(sb, label_alpha),
    }
}

fn eval_hold(sb: &Storyboard, frame: FrameIndex, cursor: &PhaseCursor) -> FrameState {
    FrameState {
        frame,
        phase: PhaseKind::Hold,
        phase_progress: cursor.progress,
        camera: sb.camera.side,
        rings: settled_rings(sb),
        readout: None,
        side_labels: side_labels(sb, sb.style.label_alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::core::Fps,
        series::{DataPoint, Series},
    };

    fn board() -> Storyboard {
        let series = Series::new(vec![
            DataPoint::new("1404/09/01", 11.40),
            DataPoint::new("1404/09/02", 4.44),
            DataPoint::new("1404/09/03", 16.81),
            DataPoint::new("1404/09/04", 5.26),
            DataPoint::new("1404/09/05", 20.75),
        ]);
        Storyboard::standard(Fps::new(30, 1).unwrap(), "Kerman Branch", "", series).unwrap()
    }

    // Standard plan for 5 points: draw [0,200), lift [200,320),
    // orbit [320,470), hold [470,560).

    #[test]
    fn first_frame_starts_the_first_ring() {
        let sb = board();
        let s = Evaluator::eval_frame(&sb, FrameIndex(0)).unwrap();
        assert_eq!(s.phase, PhaseKind::Draw);
        assert_eq!(s.rings.len(), 1);
        assert_eq!(s.rings[0].sweep, 0.0);
        assert!(s.rings[0].focus);
        assert_eq!(s.camera, sb.camera.top_down);
        assert!(s.readout.is_none());
        assert!(s.side_labels.is_empty());
    }

    #[test]
    fn draw_trail_fades_behind_the_active_ring() {
        let sb = board();
        // Third ring animating: two complete trail rings behind it.
        let s = Evaluator::eval_frame(&sb, FrameIndex(2 * 40 + 10)).unwrap();
        assert_eq!(s.rings.len(), 3);
        assert_eq!(s.rings[0].alpha, 0.5);
        assert_eq!(s.rings[1].alpha, 0.5 - 0.015);
        assert_eq!(s.rings[0].sweep, 1.0);
        assert!(!s.rings[0].focus);
        let active = &s.rings[2];
        assert!(active.focus);
        assert_eq!(active.alpha, 0.95);
        assert_eq!(active.width, 2.8);
        // OutCubic(10/40) = 1 - 0.75^3
        assert!((active.sweep - (1.0 - 0.75f64.powi(3))).abs() < 1e-12);
    }

    #[test]
    fn readout_appears_late_in_each_ring() {
        let sb = board();
        // Ring 2 at item-local frame 30: OutCubic(0.75) = 0.984375 > 0.7.
        let s = Evaluator::eval_frame(&sb, FrameIndex(2 * 40 + 30)).unwrap();
        let r = s.readout.expect("readout visible");
        assert_eq!(r.value_text, "16.8%");
        assert_eq!(r.label_text, "1404/09/03");
        let ramp = (0.984375 - 0.7) / 0.3;
        assert!((r.value_alpha - ramp * 0.8).abs() < 1e-12);
        assert!((r.label_alpha - ramp * 0.7).abs() < 1e-12);
        assert_eq!(r.severity, Severity::Warning);

        // Early in a ring there is no readout.
        let s = Evaluator::eval_frame(&sb, FrameIndex(2 * 40 + 2)).unwrap();
        assert!(s.readout.is_none());
    }

    #[test]
    fn lift_midpoint_tilts_camera_and_raises_rings() {
        let sb = board();
        let s = Evaluator::eval_frame(&sb, FrameIndex(200 + 60)).unwrap();
        assert_eq!(s.phase, PhaseKind::Lift);
        // SmoothStep(0.5) = 0.5 exactly.
        assert_eq!(s.camera, CameraPose::new(67.5, -82.5));
        assert_eq!(s.rings.len(), 5);
        assert!((s.rings[3].height - 3.0 * 0.1 * 0.5).abs() < 1e-12);
        assert_eq!(s.rings[0].alpha, 0.75);
        let r = s.readout.expect("readout still fading out");
        assert!((r.value_alpha - 0.5 * 0.8).abs() < 1e-12);
        assert_eq!(r.value_text, "20.8%");
    }

    #[test]
    fn orbit_reveals_side_labels_on_stride() {
        let sb = board();
        // Orbit local 75/150: SmoothStep(0.5) = 0.5 > 0.4.
        let s = Evaluator::eval_frame(&sb, FrameIndex(320 + 75)).unwrap();
        assert_eq!(s.phase, PhaseKind::Orbit);
        assert_eq!(s.camera, CameraPose::new(22.5, -37.5));
        assert!(s.readout.is_none());
        let idx: Vec<usize> = s.side_labels.iter().map(|l| l.index).collect();
        assert_eq!(idx, vec![0, 2, 4]);
        let expect = ((0.5 - 0.4) / 0.3) * 0.85;
        assert!((s.side_labels[0].alpha - expect).abs() < 1e-12);

        // Before the reveal threshold there are none.
        let s = Evaluator::eval_frame(&sb, FrameIndex(320 + 10)).unwrap();
        assert!(s.side_labels.is_empty());
    }

    #[test]
    fn hold_and_past_the_end_are_identical() {
        let sb = board();
        let at_hold = Evaluator::eval_frame(&sb, FrameIndex(470)).unwrap();
        assert_eq!(at_hold.phase, PhaseKind::Hold);
        assert_eq!(at_hold.camera, sb.camera.side);
        assert_eq!(at_hold.rings[4].alpha, 0.85);
        assert_eq!(at_hold.rings[4].height, 0.4);
        assert_eq!(at_hold.side_labels.len(), 3);
        assert_eq!(at_hold.side_labels[0].alpha, 0.85);

        let past = Evaluator::eval_frame(&sb, FrameIndex(10_000)).unwrap();
        assert_eq!(past.phase, PhaseKind::Hold);
        assert_eq!(past.phase_progress, 1.0);
        assert_eq!(past.rings, at_hold.rings);
        assert_eq!(past.side_labels, at_hold.side_labels);
    }

    #[test]
    fn eval_is_idempotent() {
        let sb = board();
        for f in [0u64, 37, 199, 200, 319, 320, 469, 470, 559, 900] {
            let a = Evaluator::eval_frame(&sb, FrameIndex(f)).unwrap();
            let b = Evaluator::eval_frame(&sb, FrameIndex(f)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn draw_phase_longer_than_series_holds_last_ring() {
        let sb = {
            let mut sb = board();
            // Stretch the draw phase past 5 * period.
            sb.timeline = crate::timeline::Timeline::new(vec![crate::timeline::Phase::new(
                PhaseKind::Draw,
                400,
                crate::animation::ease::Ease::Linear,
            )])
            .unwrap();
            sb
        };
        let s = Evaluator::eval_frame(&sb, FrameIndex(399)).unwrap();
        let active = s.rings.last().unwrap();
        assert_eq!(active.index, 4);
        assert_eq!(active.sweep, 1.0);
    }
}
