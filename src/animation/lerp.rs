use crate::foundation::core::CameraPose;

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for CameraPose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            elevation_deg: a.elevation_deg + (b.elevation_deg - a.elevation_deg) * t,
            azimuth_deg: a.azimuth_deg + (b.azimuth_deg - a.azimuth_deg) * t,
        }
    }
}
