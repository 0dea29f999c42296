//! State encoders and their paired distance functions.
//!
//! An encoder maps a raw RAM observation (plus the previous observation and
//! the previous action) to a small discrete [`StateKey`]. Each encoder also
//! defines the distance the nearest-state approximator uses for keys it
//! produced; the two are tied together through [`EncoderKind`] so a restored
//! snapshot always resolves the matching pair by name.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, ram, types::StateKey};

/// State-encoding scheme identifier.
///
/// The encoder name is embedded in every saved agent snapshot; restoring
/// resolves it back to the encode/distance pair via [`EncoderKind::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderKind {
    /// Bucketed position, dot count, and ghost/fruit distance buckets.
    Coarse,
    /// Coarser position plus motion direction, ghost bearing sector, and
    /// maze progress.
    Sector,
}

impl EncoderKind {
    /// Stable identity string stored in snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            EncoderKind::Coarse => "coarse",
            EncoderKind::Sector => "sector",
        }
    }

    /// Resolve an encoder from its persisted identity string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEncoder`] for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "coarse" => Ok(EncoderKind::Coarse),
            "sector" => Ok(EncoderKind::Sector),
            other => Err(Error::UnknownEncoder {
                name: other.to_string(),
            }),
        }
    }

    /// Encode a raw observation into a state key.
    ///
    /// Pure function of its inputs: the same buffers and previous action
    /// always produce the same key.
    pub fn encode(&self, current: &[u8], previous: &[u8], prev_action: usize) -> StateKey {
        match self {
            EncoderKind::Coarse => encode_coarse(current),
            EncoderKind::Sector => encode_sector(current, previous, prev_action),
        }
    }

    /// Distance between two keys produced by this encoder.
    ///
    /// Non-negative; zero for equal keys. Fields absent from either key
    /// contribute their default (0), so keys from older encoder revisions
    /// still compare.
    pub fn distance(&self, a: &StateKey, b: &StateKey) -> f64 {
        match self {
            EncoderKind::Coarse => coarse_distance(a, b),
            EncoderKind::Sector => sector_distance(a, b),
        }
    }
}

impl std::fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn byte(ram: &[u8], offset: usize) -> i64 {
    ram.get(offset).copied().unwrap_or(0) as i64
}

fn manhattan(ax: i64, ay: i64, bx: i64, by: i64) -> i64 {
    (ax - bx).abs() + (ay - by).abs()
}

fn nearest_ghost_delta(ram: &[u8]) -> (i64, i64) {
    let px = byte(ram, ram::PLAYER_X);
    let py = byte(ram, ram::PLAYER_Y);
    ram::GHOSTS
        .iter()
        .map(|&(gx, gy)| (byte(ram, gx) - px, byte(ram, gy) - py))
        .min_by_key(|&(dx, dy)| dx.abs() + dy.abs())
        .unwrap_or((0, 0))
}

/// Bucket a Manhattan distance into {0, 1, 2, 3}.
fn distance_bucket(d: i64) -> i64 {
    if d <= 5 {
        0
    } else if d <= 10 {
        1
    } else if d <= 15 {
        2
    } else {
        3
    }
}

fn encode_coarse(ram: &[u8]) -> StateKey {
    let px = byte(ram, ram::PLAYER_X);
    let py = byte(ram, ram::PLAYER_Y);

    let (gdx, gdy) = nearest_ghost_delta(ram);
    let ghost_distance = gdx.abs() + gdy.abs();

    let fruit_x = byte(ram, ram::FRUIT_X);
    let fruit_y = byte(ram, ram::FRUIT_Y);
    // Heuristic: non-zero fruit coordinates mean the fruit is on screen.
    let fruit_visible = fruit_x > 0 || fruit_y > 0;
    let fruit_distance = if fruit_visible {
        manhattan(px, py, fruit_x, fruit_y)
    } else {
        0
    };

    StateKey::new()
        .with("px", px / 2)
        .with("py", py / 2)
        .with("dots", byte(ram, ram::DOTS_EATEN_COUNT) / 5)
        .with("distance_ghost", distance_bucket(ghost_distance))
        .with("distance_fruit", distance_bucket(fruit_distance))
        .with("fruit", fruit_visible)
        .with("lives", byte(ram, ram::NUM_LIVES))
}

/// Number of heading sectors (right, up, left, down).
const HEADING_SECTORS: i64 = 4;
/// Number of bearing sectors around the player.
const BEARING_SECTORS: i64 = 8;

fn sign(v: i64) -> i64 {
    v.signum()
}

/// Heading sector from the motion vector, falling back to the previous
/// action when the player is stationary (0=right, 1=up, 2=left, 3=down).
fn heading_sector(dx: i64, dy: i64, prev_action: usize) -> i64 {
    if dx == 0 && dy == 0 {
        // Action indices follow the minimal set order: up, right, left, down.
        return match prev_action {
            0 => 1,
            1 => 0,
            2 => 2,
            _ => 3,
        };
    }
    if dx.abs() >= dy.abs() {
        if dx > 0 { 0 } else { 2 }
    } else if dy > 0 {
        1
    } else {
        3
    }
}

/// Octant of the (dx, dy) bearing, 0..8 starting at west and sweeping
/// counter-clockwise. Zero vector maps to sector 0.
fn bearing_sector(dx: i64, dy: i64) -> i64 {
    if dx == 0 && dy == 0 {
        return 0;
    }
    let angle = (dy as f64).atan2(dx as f64) + std::f64::consts::PI;
    let sector = (angle / std::f64::consts::FRAC_PI_4).floor() as i64;
    sector.rem_euclid(BEARING_SECTORS)
}

fn encode_sector(ram: &[u8], prev_ram: &[u8], prev_action: usize) -> StateKey {
    let px = byte(ram, ram::PLAYER_X);
    let py = byte(ram, ram::PLAYER_Y);
    let dx = px - byte(prev_ram, ram::PLAYER_X);
    let dy = py - byte(prev_ram, ram::PLAYER_Y);

    let (gdx, gdy) = nearest_ghost_delta(ram);

    StateKey::new()
        .with("px", px / 4)
        .with("py", py / 4)
        .with("vx", sign(dx))
        .with("vy", sign(dy))
        .with("prev_action", prev_action as i64)
        .with("heading", heading_sector(dx, dy, prev_action))
        .with("ghost_sector", bearing_sector(gdx, gdy))
        .with("progress", byte(ram, ram::DOTS_EATEN_COUNT))
}

fn coarse_distance(a: &StateKey, b: &StateKey) -> f64 {
    let d = (a.int("px") - b.int("px")).abs()
        + (a.int("py") - b.int("py")).abs()
        + (a.int("distance_ghost") - b.int("distance_ghost")).abs();
    d as f64
}

/// Shortest wrap-around distance between two sectors on a ring.
fn circular_distance(a: i64, b: i64, modulus: i64) -> f64 {
    let d = (a - b).rem_euclid(modulus);
    d.min(modulus - d) as f64
}

fn mismatch(a: i64, b: i64) -> f64 {
    if a == b { 0.0 } else { 1.0 }
}

/// Mismatch penalty weight for velocity sign fields.
const VELOCITY_WEIGHT: f64 = 0.5;
/// Mismatch penalty weight for the previous-action field.
const PREV_ACTION_WEIGHT: f64 = 0.1;
/// Scale applied to the progress (dots eaten) difference.
const PROGRESS_WEIGHT: f64 = 0.05;

fn sector_distance(a: &StateKey, b: &StateKey) -> f64 {
    let position = ((a.int("px") - b.int("px")).abs() + (a.int("py") - b.int("py")).abs()) as f64;
    let velocity = VELOCITY_WEIGHT
        * (mismatch(a.int("vx"), b.int("vx")) + mismatch(a.int("vy"), b.int("vy")));
    let action = PREV_ACTION_WEIGHT * mismatch(a.int("prev_action"), b.int("prev_action"));
    let heading = circular_distance(a.int("heading"), b.int("heading"), HEADING_SECTORS);
    let bearing = circular_distance(a.int("ghost_sector"), b.int("ghost_sector"), BEARING_SECTORS);
    let progress = PROGRESS_WEIGHT * (a.int("progress") - b.int("progress")).abs() as f64;

    position + velocity + action + heading + bearing + progress
}
