//! Eased smooth-scroll animation between two offsets.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f32,
    to: u16,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(from: u16, to: u16, started: Instant, duration: Duration) -> Self {
        Self {
            from: f32::from(from),
            to,
            started,
            duration,
        }
    }

    /// A new animation towards `to` that starts where this one is at `now`.
    pub fn redirect(&self, to: u16, now: Instant) -> Self {
        Self {
            from: self.exact_position(now),
            to,
            started: now,
            duration: self.duration,
        }
    }

    pub fn target(&self) -> u16 {
        self.to
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Row offset at `now`; exactly the target once finished.
    pub fn position(&self, now: Instant) -> u16 {
        if self.is_finished(now) {
            return self.to;
        }
        // Rounded and clamped into the u16 range of the endpoints.
        self.exact_position(now).round().clamp(0.0, f32::from(u16::MAX)) as u16
    }

    fn exact_position(&self, now: Instant) -> f32 {
        let eased = ease_in_out(self.progress(now));
        self.from + (f32::from(self.to) - self.from) * eased
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Cubic ease-in-out over `0.0..=1.0`.
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(300);

    #[test]
    fn reaches_the_exact_target() {
        let start = Instant::now();
        let animation = ScrollAnimation::new(0, 57, start, DURATION);

        assert_eq!(animation.position(start), 0);
        let midway = animation.position(start + DURATION / 2);
        assert!(midway > 0 && midway < 57, "midway was {midway}");
        assert!(animation.is_finished(start + DURATION));
        assert_eq!(animation.position(start + DURATION * 2), 57);
    }

    #[test]
    fn moves_monotonically_towards_the_target() {
        let start = Instant::now();
        let animation = ScrollAnimation::new(40, 0, start, DURATION);
        let samples: Vec<u16> = (0..=10).map(|step| animation.position(start + DURATION * step / 10)).collect();
        assert!(samples.windows(2).all(|pair| pair[1] <= pair[0]), "{samples:?}");
        assert_eq!(samples.last(), Some(&0));
    }

    #[test]
    fn redirect_continues_from_the_current_position() {
        let start = Instant::now();
        let first = ScrollAnimation::new(0, 100, start, DURATION);
        let now = start + DURATION / 2;
        let current = first.position(now);

        let second = first.redirect(20, now);
        assert_eq!(second.target(), 20);
        assert_eq!(second.position(now), current);
        assert_eq!(second.position(now + DURATION), 20);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let start = Instant::now();
        let animation = ScrollAnimation::new(5, 9, start, Duration::ZERO);
        assert!(animation.is_finished(start));
        assert_eq!(animation.position(start), 9);
    }
}
