//! Simulation constants and tuning defaults.

/// Fixed simulation tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per fixed tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Cooldown remainders at or below this are treated as elapsed.
pub const COOLDOWN_EPSILON: f64 = 1e-9;

/// Move inputs with a smaller magnitude count as "no input".
pub const MOVE_INPUT_DEADZONE: f64 = 0.1;

/// Seconds a dead entity lingers before the cleanup system despawns it.
pub const DEATH_GRACE_SECS: f64 = 2.0;

// --- Health ---

pub const DEFAULT_MAX_HEALTH: f64 = 100.0;

/// Damage a hitbox deals per overlap-enter.
pub const DEFAULT_DAMAGE_AMOUNT: f64 = 25.0;

// --- Attack timing ---

/// Minimum seconds between two attack triggers.
pub const DEFAULT_ATTACK_COOLDOWN_SECS: f64 = 0.5;

/// Multiplier applied to the player's speeds while an attack is in progress.
pub const DEFAULT_ATTACK_SPEED_REDUCTION: f64 = 0.2;

// --- Chaser movement ---

pub const ENEMY_MOVE_SPEED: f64 = 3.0;
pub const ENEMY_DETECTION_RANGE: f64 = 5.0;
pub const ENEMY_STOP_DISTANCE: f64 = 1.5;
pub const ENEMY_ROTATION_SPEED: f64 = 5.0;
pub const ENEMY_ACCELERATION: f64 = 6.0;
pub const ENEMY_DECELERATION: f64 = 8.0;

// --- Player movement ---

pub const PLAYER_MOVE_SPEED: f64 = 10.0;
pub const PLAYER_ROTATION_SPEED: f64 = 12.0;
pub const PLAYER_ACCELERATION: f64 = 12.0;
pub const PLAYER_DECELERATION: f64 = 12.0;
