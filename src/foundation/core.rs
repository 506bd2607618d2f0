use crate::foundation::error::{WhorlError, WhorlResult};

pub use kurbo::{BezPath, Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> WhorlResult<Self> {
        if start.0 > end.0 {
            return Err(WhorlError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    pub fn clamp(self, f: FrameIndex) -> FrameIndex {
        if self.is_empty() {
            return self.start;
        }
        let max_inclusive = self.end.0.saturating_sub(1);
        FrameIndex(f.0.clamp(self.start.0, max_inclusive))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> WhorlResult<Self> {
        if den == 0 {
            return Err(WhorlError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(WhorlError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

/// Camera orientation handed to the renderer, in degrees.
///
/// Elevation 90 looks straight down (the flat 2D view); elevation 0 with
/// azimuth 0 is the side-on cylinder view.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
}

impl CameraPose {
    pub fn new(elevation_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            elevation_deg,
            azimuth_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_range_contains_boundaries() {
        let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
        assert!(!r.contains(FrameIndex(1)));
        assert!(r.contains(FrameIndex(2)));
        assert!(r.contains(FrameIndex(4)));
        assert!(!r.contains(FrameIndex(5)));
    }

    #[test]
    fn frame_range_clamp_stays_inside() {
        let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
        assert_eq!(r.clamp(FrameIndex(0)), FrameIndex(2));
        assert_eq!(r.clamp(FrameIndex(3)), FrameIndex(3));
        assert_eq!(r.clamp(FrameIndex(99)), FrameIndex(4));
    }

    #[test]
    fn fps_rejects_zero_parts() {
        assert!(Fps::new(0, 1).is_err());
        assert!(Fps::new(30, 0).is_err());
        let fps = Fps::new(30, 1).unwrap();
        assert_eq!(fps.frames_to_secs(60), 2.0);
    }
}
