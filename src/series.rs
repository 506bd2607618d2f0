use crate::foundation::error::{WhorlError, WhorlResult};

/// One dated observation. `label` is an opaque date token; order in the
/// owning [`Series`] is chronological and meaningful, labels need not be
/// unique.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Ordered, immutable sequence of observations.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<DataPoint>);

impl Series {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DataPoint> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataPoint> {
        self.0.iter()
    }

    pub fn validate(&self) -> WhorlResult<()> {
        if self.0.is_empty() {
            return Err(WhorlError::validation("series must have at least one point"));
        }
        for (i, p) in self.0.iter().enumerate() {
            if !p.value.is_finite() {
                return Err(WhorlError::validation(format!(
                    "series point {i} ('{}') has non-finite value",
                    p.label
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<DataPoint> for Series {
    fn from_iter<I: IntoIterator<Item = DataPoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
