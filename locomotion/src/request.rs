use crate::types::Vec2;

/// A movement intent: which way to go (body-local, x = right, y = forward),
/// how fast to get there, and how hard to push.
///
/// Requests are replaced wholesale whenever new intent arrives.
/// [`MovementRequest::INVALID`] means "no movement requested".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementRequest {
    direction: Vec2,
    goal_speed: f32,
    acceleration: f32,
    valid: bool,
}

impl MovementRequest {
    pub const INVALID: Self = Self {
        direction: Vec2::new(0.0, 0.0),
        goal_speed: 0.0,
        acceleration: 0.0,
        valid: false,
    };

    /// Build a request. Non-finite input or a negative speed/acceleration
    /// produces [`MovementRequest::INVALID`].
    pub fn new(direction: Vec2, goal_speed: f32, acceleration: f32) -> Self {
        let finite = direction.x.is_finite()
            && direction.y.is_finite()
            && goal_speed.is_finite()
            && acceleration.is_finite();
        if !finite || goal_speed < 0.0 || acceleration < 0.0 {
            return Self::INVALID;
        }

        Self {
            direction,
            goal_speed,
            acceleration,
            valid: true,
        }
    }

    /// Body-local ground-plane direction (x = right, y = forward).
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    #[inline]
    pub fn goal_speed(&self) -> f32 {
        self.goal_speed
    }

    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Default for MovementRequest {
    fn default() -> Self {
        Self::INVALID
    }
}
