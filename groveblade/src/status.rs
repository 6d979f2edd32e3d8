//! Discrete status labels for players and enemies.
//!
//! A status picks the animation to play and, for enemies, the behaviour for
//! the tick. Player statuses are a facing combined with a phase; enemy
//! statuses are a flat set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Actively walking in the facing direction.
    Moving,
    #[default]
    Idle,
    Attacking,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Moving, Phase::Idle, Phase::Attacking];
}

/// Player status. The facing persists across ticks: the last nonzero input
/// decides it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlayerStatus {
    pub facing: Facing,
    pub phase: Phase,
}

impl PlayerStatus {
    pub fn new(facing: Facing, phase: Phase) -> Self {
        Self { facing, phase }
    }

    /// Apply the per-tick transition rules.
    ///
    /// 1. No movement while walking settles into idle.
    /// 2. An active attack forces the direction to zero and enters the
    ///    attacking phase from either idle or walking.
    /// 3. Otherwise a finished attack falls back to idle, never to walking.
    ///
    /// Returns the new status and the direction to keep for this tick.
    pub fn settle(self, direction: Vec2, attacking: bool) -> (Self, Vec2) {
        let mut status = self;
        let mut direction = direction;

        if direction.is_zero() && status.phase == Phase::Moving {
            status.phase = Phase::Idle;
        }

        if attacking {
            direction = Vec2::ZERO;
            status.phase = Phase::Attacking;
        } else if status.phase == Phase::Attacking {
            status.phase = Phase::Idle;
        }

        (status, direction)
    }

    /// Animation token such as `left`, `left_idle` or `left_attack`.
    pub fn as_token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Phase::Moving => write!(f, "{}", self.facing.as_token()),
            Phase::Idle => write!(f, "{}_idle", self.facing.as_token()),
            Phase::Attacking => write!(f, "{}_attack", self.facing.as_token()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyStatus {
    #[default]
    Idle,
    Move,
    Attack,
}

impl EnemyStatus {
    pub const ALL: [EnemyStatus; 3] = [EnemyStatus::Idle, EnemyStatus::Move, EnemyStatus::Attack];

    /// Pick the status for a player at `distance`.
    ///
    /// Attacking needs both proximity and an open attack gate; when the gate
    /// is closed a nearby enemy keeps moving instead.
    pub fn for_distance(distance: f32, attack_radius: f32, notice_radius: f32, can_attack: bool) -> Self {
        if distance < attack_radius && can_attack {
            Self::Attack
        } else if distance < notice_radius {
            Self::Move
        } else {
            Self::Idle
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::Attack => "attack",
        }
    }
}

impl fmt::Display for EnemyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn tokens_compose_facing_and_phase() {
        assert_eq!(PlayerStatus::new(Facing::Left, Phase::Moving).as_token(), "left");
        assert_eq!(PlayerStatus::new(Facing::Up, Phase::Idle).as_token(), "up_idle");
        assert_eq!(PlayerStatus::new(Facing::Right, Phase::Attacking).as_token(), "right_attack");
    }

    #[test]
    fn walking_without_direction_goes_idle() {
        let (status, _) = PlayerStatus::new(Facing::Down, Phase::Moving).settle(Vec2::ZERO, false);
        assert_eq!(status, PlayerStatus::new(Facing::Down, Phase::Idle));
    }

    #[test]
    fn idle_settle_is_idempotent() {
        let idle = PlayerStatus::new(Facing::Down, Phase::Idle);
        let (once, _) = idle.settle(Vec2::ZERO, false);
        let (twice, _) = once.settle(Vec2::ZERO, false);
        assert_eq!(once, idle);
        assert_eq!(twice, idle);
        assert_eq!(twice.as_token(), "down_idle");
    }

    #[rstest]
    #[case(Phase::Idle)]
    #[case(Phase::Moving)]
    #[case(Phase::Attacking)]
    fn attacking_forces_attack_phase_and_stops(#[case] phase: Phase) {
        let (status, direction) =
            PlayerStatus::new(Facing::Left, phase).settle(Vec2::new(1.0, 0.0), true);
        assert_eq!(status, PlayerStatus::new(Facing::Left, Phase::Attacking));
        assert_eq!(direction, Vec2::ZERO);
    }

    #[test]
    fn finished_attack_returns_to_idle_not_walking() {
        let (status, _) =
            PlayerStatus::new(Facing::Left, Phase::Attacking).settle(Vec2::ZERO, false);
        assert_eq!(status.as_token(), "left_idle");
    }

    #[test]
    fn walking_with_direction_keeps_walking() {
        let (status, direction) =
            PlayerStatus::new(Facing::Right, Phase::Moving).settle(Vec2::new(1.0, 0.0), false);
        assert_eq!(status.phase, Phase::Moving);
        assert_eq!(direction, Vec2::new(1.0, 0.0));
    }

    #[rstest]
    #[case(10.0, true, EnemyStatus::Attack)]
    #[case(39.9, true, EnemyStatus::Attack)]
    #[case(40.0, true, EnemyStatus::Move)]
    #[case(10.0, false, EnemyStatus::Move)]
    #[case(150.0, true, EnemyStatus::Move)]
    #[case(199.9, false, EnemyStatus::Move)]
    #[case(200.0, true, EnemyStatus::Idle)]
    #[case(300.0, true, EnemyStatus::Idle)]
    fn enemy_status_crosses_both_radii(
        #[case] distance: f32,
        #[case] can_attack: bool,
        #[case] expected: EnemyStatus,
    ) {
        assert_eq!(EnemyStatus::for_distance(distance, 40.0, 200.0, can_attack), expected);
    }
}
