//! Game state and core simulation types

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::spawn::Cadence;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Before the first start command
    Idle,
    /// Active gameplay
    Running,
    /// Frozen; resumable
    Paused,
    /// An object reached the floor; auto-restarts after a countdown
    GameOver,
    /// Session abandoned. Sticky: nothing transitions out of it.
    Quitted,
}

/// A bullet fired from the turret. Fixed size, constant upward speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
        }
    }
}

/// A falling object. Fixed size; falls at the shared level-dependent speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingObject {
    pub pos: Vec2,
}

impl FallingObject {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(OBJECT_SIZE),
        }
    }
}

/// Complete game state. Owned by the driver; mutated only through
/// `tick` and `apply_command`.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Canvas dimensions, fixed for the lifetime of the state
    pub width: f32,
    pub height: f32,
    /// Turret left edge, clamped to `[0, width - TURRET_WIDTH]`
    pub turret_x: f32,
    pub bullets: Vec<Bullet>,
    pub objects: Vec<FallingObject>,
    pub score: u32,
    /// Starts at 1, +1 per `POINTS_PER_LEVEL` score points
    pub level: u32,
    /// Fall speed in pixels per tick; ramps with level
    pub object_speed: f32,
    pub phase: GamePhase,
    pub bullet_cadence: Cadence,
    pub object_cadence: Cadence,
    /// Ticks left until a game-over session restarts itself
    pub restart_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh Idle state for a canvas of the given size
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self {
            width,
            height,
            turret_x: (width / 2.0 - TURRET_WIDTH / 2.0).max(0.0),
            bullets: Vec::new(),
            objects: Vec::new(),
            score: 0,
            level: 1,
            object_speed: OBJECT_START_SPEED,
            phase: GamePhase::Idle,
            bullet_cadence: Cadence::new(BULLET_CADENCE_TICKS),
            object_cadence: Cadence::new(OBJECT_CADENCE_TICKS),
            restart_ticks: 0,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Move the turret toward a target x, clamped to the canvas. A canvas
    /// narrower than the turret pins it to the left edge instead of
    /// producing an inverted clamp range.
    pub fn set_turret_target(&mut self, target_x: f32) {
        self.turret_x = target_x.clamp(0.0, (self.width - TURRET_WIDTH).max(0.0));
    }

    /// The turret as a drawable/collidable rectangle
    pub fn turret_rect(&self) -> Rect {
        Rect::new(
            self.turret_x,
            self.height - TURRET_BOTTOM_OFFSET,
            TURRET_WIDTH,
            TURRET_HEIGHT,
        )
    }

    /// Append a bullet at the turret muzzle
    pub fn spawn_bullet(&mut self) {
        self.bullets.push(Bullet {
            pos: Vec2::new(
                self.turret_x + BULLET_MUZZLE_OFFSET,
                self.height - BULLET_SPAWN_OFFSET,
            ),
        });
    }

    /// Append a falling object at a uniformly random x along the top edge.
    /// A canvas narrower than an object degenerates to x = 0 rather than an
    /// empty sample range.
    pub fn spawn_object(&mut self) {
        let max_x = (self.width - OBJECT_SIZE).max(0.0);
        let x = self.rng.random_range(0.0..=max_x);
        self.objects.push(FallingObject {
            pos: Vec2::new(x, 0.0),
        });
    }

    /// Reset score, level, speed, entities and cadences and go Running.
    /// Used by both the restart command and the game-over countdown.
    /// The turret keeps its position.
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.level = 1;
        self.object_speed = OBJECT_START_SPEED;
        self.bullets.clear();
        self.objects.clear();
        self.bullet_cadence.reset();
        self.object_cadence.reset();
        self.restart_ticks = 0;
        self.phase = GamePhase::Running;
    }
}
