use crate::{
    animation::ease::Ease,
    foundation::core::FrameIndex,
    foundation::error::{WhorlError, WhorlResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PhaseKind {
    /// Rings sweep in one by one on the flat 2D plane.
    Draw,
    /// Completed rings lift into a cylinder while the camera tilts down.
    Lift,
    /// Camera orbits from the tilted view to the side-on view.
    Orbit,
    /// Terminal still of the final view.
    Hold,
}

impl PhaseKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Lift => "lift",
            Self::Orbit => "orbit",
            Self::Hold => "hold",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    pub frames: u64, // must be > 0
    pub ease: Ease,
}

impl Phase {
    pub fn new(kind: PhaseKind, frames: u64, ease: Ease) -> Self {
        Self { kind, frames, ease }
    }
}

/// Where a global frame falls on the timeline.
///
/// `raw_progress` is `local_frame / frames` and never reaches 1.0 inside a
/// phase; it is exactly 1.0 only in the terminal hold past the last frame.
/// `progress` is `raw_progress` passed through the phase's ease.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PhaseCursor {
    pub phase_index: usize,
    pub kind: PhaseKind,
    pub local_frame: u64,
    pub raw_progress: f64,
    pub progress: f64,
}

/// Ordered phase list with precomputed cumulative starts.
///
/// Each phase covers the half-open frame interval `[start, start+frames)`;
/// a frame landing exactly on a boundary belongs to the later phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Phase>", into = "Vec<Phase>")]
pub struct Timeline {
    phases: Vec<Phase>,
    starts: Vec<u64>, // starts[i] = sum of frames before phase i
    total: u64,
}

impl Timeline {
    pub fn new(phases: Vec<Phase>) -> WhorlResult<Self> {
        if phases.is_empty() {
            return Err(WhorlError::timeline("timeline must have at least one phase"));
        }

        let mut starts = Vec::with_capacity(phases.len());
        let mut acc = 0u64;
        for (i, phase) in phases.iter().enumerate() {
            if phase.frames == 0 {
                return Err(WhorlError::timeline(format!(
                    "phase {i} ({}) must have frames > 0",
                    phase.kind.name()
                )));
            }
            starts.push(acc);
            acc = acc.checked_add(phase.frames).ok_or_else(|| {
                WhorlError::timeline("timeline total frame count overflows u64")
            })?;
        }

        Ok(Self {
            phases,
            starts,
            total: acc,
        })
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn total_frames(&self) -> FrameIndex {
        FrameIndex(self.total)
    }

    /// Start of phase `index` on the global frame axis.
    pub fn phase_start(&self, index: usize) -> Option<FrameIndex> {
        self.starts.get(index).copied().map(FrameIndex)
    }

    /// Resolve a global frame to its phase and local progress.
    ///
    /// Total over all inputs: frames at or past the end clamp to the last
    /// phase at progress 1.0 (the hold-final-frame behavior).
    pub fn resolve(&self, frame: FrameIndex) -> PhaseCursor {
        let last = self.phases.len() - 1;
        if frame.0 >= self.total {
            let phase = &self.phases[last];
            return PhaseCursor {
                phase_index: last,
                kind: phase.kind,
                local_frame: phase.frames,
                raw_progress: 1.0,
                progress: phase.ease.apply(1.0),
            };
        }

        // partition_point over the cumulative starts: the containing phase is
        // the last one whose start is <= frame.
        let idx = self.starts.partition_point(|&s| s <= frame.0) - 1;
        let phase = &self.phases[idx];
        let local = frame.0 - self.starts[idx];
        let raw = (local as f64) / (phase.frames as f64);

        PhaseCursor {
            phase_index: idx,
            kind: phase.kind,
            local_frame: local,
            raw_progress: raw,
            progress: phase.ease.apply(raw),
        }
    }
}

impl TryFrom<Vec<Phase>> for Timeline {
    type Error = WhorlError;

    fn try_from(phases: Vec<Phase>) -> WhorlResult<Self> {
        Self::new(phases)
    }
}

impl From<Timeline> for Vec<Phase> {
    fn from(t: Timeline) -> Self {
        t.phases
    }
}

/// Per-item sub-loop inside a phase: item `i` animates for `draw_frames`,
/// then holds until its `period` elapses and the next item starts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ItemLoop {
    pub period: u64,
    pub draw_frames: u64,
    pub ease: Ease,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ItemCursor {
    pub index: usize,
    pub local_frame: u64,
    pub raw_progress: f64,
    pub progress: f64,
}

impl ItemLoop {
    pub fn new(period: u64, draw_frames: u64, ease: Ease) -> WhorlResult<Self> {
        let loop_ = Self {
            period,
            draw_frames,
            ease,
        };
        loop_.validate()?;
        Ok(loop_)
    }

    pub fn validate(&self) -> WhorlResult<()> {
        if self.period == 0 {
            return Err(WhorlError::timeline("item loop period must be > 0"));
        }
        if self.draw_frames == 0 {
            return Err(WhorlError::timeline("item loop draw_frames must be > 0"));
        }
        if self.draw_frames > self.period {
            return Err(WhorlError::timeline(
                "item loop draw_frames must be <= period",
            ));
        }
        Ok(())
    }

    /// Resolve a phase-local frame to the item being animated.
    ///
    /// Same half-open boundary policy as [`Timeline::resolve`]: a frame on an
    /// item boundary belongs to the next item. Past the last item (the phase
    /// outlives `item_count * period`) the cursor clamps to the final item at
    /// progress 1.0.
    pub fn resolve(&self, local_frame: u64, item_count: usize) -> ItemCursor {
        debug_assert!(item_count > 0);
        let index = (local_frame / self.period) as usize;
        if index >= item_count {
            return ItemCursor {
                index: item_count - 1,
                local_frame: self.period,
                raw_progress: 1.0,
                progress: self.ease.apply(1.0),
            };
        }

        let item_local = local_frame % self.period;
        // Past draw_frames the item sits in its hold sub-phase at full sweep.
        let raw = ((item_local as f64) / (self.draw_frames as f64)).min(1.0);

        ItemCursor {
            index,
            local_frame: item_local,
            raw_progress: raw,
            progress: self.ease.apply(raw),
        }
    }
}
