use crate::{
    foundation::core::Fps,
    foundation::error::WhorlResult,
    model::{CameraScript, Storyboard, TrailStyle},
    scale::{RadiusScale, SeverityBands},
    series::{DataPoint, Series},
    timeline::{ItemLoop, Timeline},
};

/// Programmatic storyboard construction. `build()` validates.
///
/// Without an explicit timeline the builder falls back to the standard
/// four-phase plan sized to the series.
pub struct StoryboardBuilder {
    fps: Fps,
    title: String,
    subtitle: String,
    points: Vec<DataPoint>,
    scale: RadiusScale,
    bands: SeverityBands,
    camera: CameraScript,
    style: TrailStyle,
    timeline: Option<Timeline>,
    items: Option<ItemLoop>,
}

impl StoryboardBuilder {
    pub fn new(fps: Fps, title: impl Into<String>) -> Self {
        Self {
            fps,
            title: title.into(),
            subtitle: String::new(),
            points: Vec::new(),
            scale: RadiusScale::default(),
            bands: SeverityBands::default(),
            camera: CameraScript::default(),
            style: TrailStyle::default(),
            timeline: None,
            items: None,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn point(mut self, label: impl Into<String>, value: f64) -> Self {
        self.points.push(DataPoint::new(label, value));
        self
    }

    pub fn series(mut self, series: Series) -> Self {
        self.points.extend(series.iter().cloned());
        self
    }

    pub fn scale(mut self, scale: RadiusScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn bands(mut self, bands: SeverityBands) -> Self {
        self.bands = bands;
        self
    }

    pub fn camera(mut self, camera: CameraScript) -> Self {
        self.camera = camera;
        self
    }

    pub fn style(mut self, style: TrailStyle) -> Self {
        self.style = style;
        self
    }

    pub fn timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = Some(timeline);
        self
    }

    pub fn items(mut self, items: ItemLoop) -> Self {
        self.items = Some(items);
        self
    }

    pub fn build(self) -> WhorlResult<Storyboard> {
        let series = Series::new(self.points);
        series.validate()?;

        let items = match self.items {
            Some(items) => items,
            None => ItemLoop::new(40, 40, crate::animation::ease::Ease::OutCubic)?,
        };
        let timeline = match self.timeline {
            Some(timeline) => timeline,
            None => crate::model::standard_plan(series.len(), &items)?,
        };

        let sb = Storyboard {
            fps: self.fps,
            title: self.title,
            subtitle: self.subtitle,
            series,
            scale: self.scale,
            bands: self.bands,
            timeline,
            items,
            camera: self.camera,
            style: self.style,
        };
        sb.validate()?;
        Ok(sb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        animation::ease::Ease,
        foundation::core::FrameIndex,
        timeline::{Phase, PhaseKind},
    };

    #[test]
    fn builds_standard_plan_from_points() {
        let sb = StoryboardBuilder::new(Fps::new(30, 1).unwrap(), "Kerman Branch")
            .subtitle("Daily Performance Analysis")
            .point("1404/09/01", 11.40)
            .point("1404/09/02", 4.44)
            .build()
            .unwrap();
        assert_eq!(sb.series.len(), 2);
        // 2 * 40 + 120 + 150 + 90
        assert_eq!(sb.duration(), FrameIndex(440));
    }

    #[test]
    fn custom_timeline_and_items_override_the_plan() {
        let sb = StoryboardBuilder::new(Fps::new(30, 1).unwrap(), "t")
            .point("a", 1.0)
            .point("b", 2.0)
            .items(ItemLoop::new(20, 12, Ease::OutCubic).unwrap())
            .timeline(
                Timeline::new(vec![
                    Phase::new(PhaseKind::Draw, 40, Ease::Linear),
                    Phase::new(PhaseKind::Hold, 10, Ease::Linear),
                ])
                .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(sb.duration(), FrameIndex(50));
        assert_eq!(sb.items.period, 20);
    }

    #[test]
    fn empty_builder_fails_validation() {
        assert!(
            StoryboardBuilder::new(Fps::new(30, 1).unwrap(), "t")
                .build()
                .is_err()
        );
    }
}
