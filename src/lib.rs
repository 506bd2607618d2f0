//! Whorl turns an ordered series of dated percentage values into a
//! deterministic, frame-by-frame animation state stream for a radial
//! ("spiral" to "cylinder") visualization.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: build a [`Storyboard`] (data series, radius scale,
//!    severity bands, phase timeline, camera script, trail styling).
//! 2. **Evaluate**: `Storyboard + FrameIndex -> FrameState` — which phase is
//!    active, where the camera points, every visible ring's sweep, height,
//!    opacity and width, plus text readouts.
//! 3. **Hand off**: a renderer draws each [`FrameState`] and an encoder turns
//!    the frame sequence into video. Both live outside this crate.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: evaluation is a pure function of
//!   `(Storyboard, FrameIndex)`; frames may be computed in any order or in
//!   parallel without changing the output.
//! - **Total after construction**: a validated storyboard evaluates every
//!   frame index, clamping past-the-end frames to the held final view.
#![forbid(unsafe_code)]

pub mod animation;
pub mod dsl;
pub mod eval;
pub mod fingerprint;
pub mod foundation;
pub mod geometry;
pub mod model;
pub mod pipeline;
pub mod scale;
pub mod series;
pub mod timeline;

pub use animation::ease::Ease;
pub use animation::lerp::Lerp;
pub use dsl::StoryboardBuilder;
pub use eval::{Evaluator, FrameState, Readout, RingState, SideLabel};
pub use fingerprint::{FrameFingerprint, fingerprint_frame, fingerprint_frames};
pub use foundation::core::{CameraPose, Fps, FrameIndex, FrameRange};
pub use foundation::error::{WhorlError, WhorlResult};
pub use geometry::{SAMPLES_FULL_TURN, ring_arc, sample_ring};
pub use model::{CameraScript, Storyboard, TrailStyle, standard_plan};
pub use pipeline::{EvalThreading, eval_frames, full_range};
pub use scale::{RadiusScale, Severity, SeverityBands};
pub use series::{DataPoint, Series};
pub use timeline::{ItemCursor, ItemLoop, Phase, PhaseCursor, PhaseKind, Timeline};
