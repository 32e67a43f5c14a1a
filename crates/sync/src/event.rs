/// One entry of a visibility batch delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEvent<E> {
    pub target: E,
    /// `true` when the element is now past the observer threshold.
    pub is_entering: bool,
    /// Visible fraction of the element at the time of the crossing.
    pub ratio: f32,
}

impl<E> VisibilityEvent<E> {
    pub fn entered(target: E, ratio: f32) -> Self {
        Self {
            target,
            is_entering: true,
            ratio,
        }
    }

    pub fn left(target: E, ratio: f32) -> Self {
        Self {
            target,
            is_entering: false,
            ratio,
        }
    }

    /// Events with a ratio that is not a fraction are dropped by the controller.
    pub fn is_well_formed(&self) -> bool {
        self.ratio.is_finite() && (0.0..=1.0).contains(&self.ratio)
    }
}
