//! Ms. Pac-Man RAM annotations.
//!
//! Byte offsets into the 128-byte Atari 2600 RAM image where the game keeps
//! the quantities the state encoders read. Offsets follow the community RAM
//! annotations for `ms_pacman`.

/// Size of the raw observation buffer.
pub const RAM_SIZE: usize = 128;

pub const PLAYER_X: usize = 10;
pub const PLAYER_Y: usize = 16;

pub const ENEMY_SUE_X: usize = 6;
pub const ENEMY_INKY_X: usize = 7;
pub const ENEMY_PINKY_X: usize = 8;
pub const ENEMY_BLINKY_X: usize = 9;
pub const ENEMY_SUE_Y: usize = 12;
pub const ENEMY_INKY_Y: usize = 13;
pub const ENEMY_PINKY_Y: usize = 14;
pub const ENEMY_BLINKY_Y: usize = 15;

pub const FRUIT_X: usize = 11;
pub const FRUIT_Y: usize = 17;

pub const DOTS_EATEN_COUNT: usize = 119;
pub const NUM_LIVES: usize = 123;

/// (x, y) offset pairs for the four ghosts.
pub const GHOSTS: [(usize, usize); 4] = [
    (ENEMY_BLINKY_X, ENEMY_BLINKY_Y),
    (ENEMY_PINKY_X, ENEMY_PINKY_Y),
    (ENEMY_INKY_X, ENEMY_INKY_Y),
    (ENEMY_SUE_X, ENEMY_SUE_Y),
];
