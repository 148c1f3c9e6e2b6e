use crate::camera::CameraIndex;
use crate::status::StatusSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub highlights: Vec<(CameraIndex, bool)>,
    pub any_motion: bool,
}

impl Aggregate {
    pub fn wants_fullscreen(&self) -> bool {
        !self.any_motion
    }
}

pub struct MotionAggregator {
    cameras: Vec<CameraIndex>,
    settled: Option<bool>,
}

impl MotionAggregator {
    pub fn new(cameras: impl IntoIterator<Item = CameraIndex>) -> Self {
        Self {
            cameras: cameras.into_iter().collect(),
            settled: None,
        }
    }

    pub fn aggregate(&self, snapshot: &StatusSnapshot) -> Aggregate {
        let highlights: Vec<(CameraIndex, bool)> = self
            .cameras
            .iter()
            .map(|cam| (*cam, snapshot.has_motion(*cam)))
            .collect();
        let any_motion = highlights.iter().any(|(_, on)| *on);

        Aggregate {
            highlights,
            any_motion,
        }
    }

    /// Fullscreen request to forward, if the aggregate differs from the last
    /// settled value. Stays pending until `settle` is called.
    pub fn fullscreen_request(&self, aggregate: &Aggregate) -> Option<bool> {
        (self.settled != Some(aggregate.any_motion)).then(|| aggregate.wants_fullscreen())
    }

    pub fn settle(&mut self, any_motion: bool) {
        self.settled = Some(any_motion);
    }

    pub fn settled(&self) -> Option<bool> {
        self.settled
    }
}
