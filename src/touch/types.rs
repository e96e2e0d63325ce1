/// One host touch callback: position in surface pixels plus a monotonic
/// timestamp in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchSample {
    pub x: f32,
    pub y: f32,
    pub t_ms: u64,
}

impl TouchSample {
    pub const fn new(x: f32, y: f32, t_ms: u64) -> Self {
        Self { x, y, t_ms }
    }

    pub fn distance_to(&self, other: &TouchSample) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn elapsed_since(&self, earlier: &TouchSample) -> u64 {
        self.t_ms.saturating_sub(earlier.t_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Horizontal wins unless the vertical component is strictly larger.
    pub fn from_delta(dx: f32, dy: f32) -> Self {
        if dy.abs() > dx.abs() {
            if dy > 0.0 {
                Self::Down
            } else {
                Self::Up
            }
        } else if dx >= 0.0 {
            Self::Right
        } else {
            Self::Left
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Classified interaction. Built once when a session ends (or the long-press
/// deadline passes) and handed straight to the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Tap {
        point: TouchSample,
    },
    LongPress {
        point: TouchSample,
    },
    Swipe {
        direction: SwipeDirection,
        distance: f32,
        /// Pixels per millisecond.
        velocity: f32,
        duration_ms: u64,
    },
}

impl GestureEvent {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tap { .. } => "tap",
            Self::LongPress { .. } => "long_press",
            Self::Swipe {
                direction: SwipeDirection::Left,
                ..
            } => "swipe_left",
            Self::Swipe {
                direction: SwipeDirection::Right,
                ..
            } => "swipe_right",
            Self::Swipe {
                direction: SwipeDirection::Up,
                ..
            } => "swipe_up",
            Self::Swipe {
                direction: SwipeDirection::Down,
                ..
            } => "swipe_down",
        }
    }
}

/// Input to the async gesture pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchInput {
    Start(TouchSample),
    Move(TouchSample),
    End(TouchSample),
    /// Host `touchcancel`: drop the session, keep the pipeline alive.
    Cancel,
    /// Host surface destroyed: cancel timers and stop the pipeline.
    Teardown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_axes_pick_horizontal() {
        assert_eq!(SwipeDirection::from_delta(30.0, 30.0), SwipeDirection::Right);
        assert_eq!(SwipeDirection::from_delta(-30.0, 30.0), SwipeDirection::Left);
        assert_eq!(SwipeDirection::from_delta(-30.0, -30.0), SwipeDirection::Left);
    }

    #[test]
    fn strictly_larger_vertical_picks_vertical() {
        assert_eq!(SwipeDirection::from_delta(10.0, 11.0), SwipeDirection::Down);
        assert_eq!(SwipeDirection::from_delta(10.0, -11.0), SwipeDirection::Up);
    }

    #[test]
    fn distance_is_plain_euclidean() {
        let a = TouchSample::new(0.0, 0.0, 0);
        let b = TouchSample::new(3.0, 4.0, 120);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.elapsed_since(&a), 120);
        assert_eq!(a.elapsed_since(&b), 0);
    }
}
