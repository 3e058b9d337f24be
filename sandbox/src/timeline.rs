use locomotion::{MovementRequest, Vec2};

/// One scripted input.
#[derive(Clone, Copy, Debug)]
pub enum Action {
    /// Walk along a body-local direction.
    Move {
        direction: Vec2,
        goal_speed: f32,
        acceleration: f32,
    },
    Stop,
    Turn(f32),
    Jump,
    Brake,
}

impl Action {
    pub fn movement_request(&self) -> Option<MovementRequest> {
        match *self {
            Action::Move {
                direction,
                goal_speed,
                acceleration,
            } => Some(MovementRequest::new(direction, goal_speed, acceleration)),
            Action::Stop => Some(MovementRequest::INVALID),
            _ => None,
        }
    }
}

/// Actions keyed by the time (seconds) they fire at, in order.
pub struct Timeline {
    events: Vec<(f32, Action)>,
    cursor: usize,
}

impl Timeline {
    pub fn new(mut events: Vec<(f32, Action)>) -> Self {
        events.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { events, cursor: 0 }
    }

    /// Walk forward, turn right, hop, stop, then try both ramps.
    pub fn demo() -> Self {
        let forward = |goal_speed| Action::Move {
            direction: Vec2::new(0.0, 1.0),
            goal_speed,
            acceleration: 20.0,
        };

        Self::new(vec![
            (0.25, forward(4.0)),
            (1.5, Action::Jump),
            (3.0, Action::Brake),
            (3.0, Action::Stop),
            (3.5, forward(3.0)),
            (7.0, Action::Stop),
            (7.0, Action::Brake),
            (7.5, Action::Turn(1.0)),
            (8.5, Action::Turn(0.0)),
            (8.5, forward(5.0)),
            (12.0, Action::Stop),
        ])
    }

    /// Everything due at or before `now` that has not fired yet.
    pub fn due(&mut self, now: f32) -> &[(f32, Action)] {
        let start = self.cursor;
        while self.cursor < self.events.len() && self.events[self.cursor].0 <= now {
            self.cursor += 1;
        }
        &self.events[start..self.cursor]
    }

    pub fn duration(&self) -> f32 {
        self.events.last().map_or(0.0, |(t, _)| *t)
    }
}
