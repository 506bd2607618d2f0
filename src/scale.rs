use crate::foundation::error::{WhorlError, WhorlResult};

/// Severity band of an observation. The renderer picks the actual colors;
/// this crate only classifies.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Severity {
    Low,
    Moderate,
    Warning,
    Critical,
}

/// Threshold bands, checked high to low so boundary values land in the
/// higher band (`>=`, not `>`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeverityBands {
    pub critical_min: f64,
    pub warning_min: f64,
    pub moderate_min: f64,
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            critical_min: 17.0,
            warning_min: 9.0,
            moderate_min: 6.0,
        }
    }
}

impl SeverityBands {
    pub fn validate(&self) -> WhorlResult<()> {
        for (name, v) in [
            ("critical_min", self.critical_min),
            ("warning_min", self.warning_min),
            ("moderate_min", self.moderate_min),
        ] {
            if !v.is_finite() {
                return Err(WhorlError::validation(format!("{name} must be finite")));
            }
        }
        if !(self.moderate_min <= self.warning_min && self.warning_min <= self.critical_min) {
            return Err(WhorlError::validation(
                "severity bands must be ordered moderate_min <= warning_min <= critical_min",
            ));
        }
        Ok(())
    }

    pub fn classify(&self, value: f64) -> Severity {
        if value >= self.critical_min {
            Severity::Critical
        } else if value >= self.warning_min {
            Severity::Warning
        } else if value >= self.moderate_min {
            Severity::Moderate
        } else {
            Severity::Low
        }
    }
}

/// Linear value-to-radius mapping with clamped input.
///
/// Values outside `[0, value_max]` clamp to the end radii rather than
/// erroring; this is a deliberate policy, not an omission.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RadiusScale {
    pub value_max: f64,
    pub radius_min: f64,
    pub radius_max: f64,
}

impl Default for RadiusScale {
    fn default() -> Self {
        Self {
            value_max: 22.0,
            radius_min: 0.35,
            radius_max: 1.1,
        }
    }
}

impl RadiusScale {
    pub fn validate(&self) -> WhorlResult<()> {
        if !(self.value_max.is_finite()
            && self.radius_min.is_finite()
            && self.radius_max.is_finite())
        {
            return Err(WhorlError::validation("radius scale must be finite"));
        }
        if self.value_max <= 0.0 {
            return Err(WhorlError::validation("value_max must be > 0"));
        }
        if self.radius_min > self.radius_max {
            return Err(WhorlError::validation("radius_min must be <= radius_max"));
        }
        Ok(())
    }

    pub fn radius_for(&self, value: f64) -> f64 {
        let t = (value / self.value_max).clamp(0.0, 1.0);
        self.radius_min + t * (self.radius_max - self.radius_min)
    }
}
