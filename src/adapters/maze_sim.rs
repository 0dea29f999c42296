//! Deterministic maze-chase simulator.
//!
//! A miniature stand-in for the real emulator that honors the same RAM
//! layout the state encoders read: the player collects pellets on an 8x8
//! cell grid while one ghost chases. Used by the CLI demo and the
//! integration tests; a real emulator binding implements the same
//! [`Environment`] port.

use std::collections::HashSet;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Error, Result, ram,
    ports::{Environment, StepOutcome},
};

const X_MIN: i64 = 8;
const X_MAX: i64 = 150;
const Y_MIN: i64 = 8;
const Y_MAX: i64 = 170;

const PLAYER_START: (i64, i64) = (80, 120);
const GHOST_START: (i64, i64) = (16, 16);

/// Player movement per step, in RAM coordinate units.
const PLAYER_SPEED: i64 = 4;
/// Ghost movement per step; slower than the player.
const GHOST_SPEED: i64 = 2;
/// Manhattan radius at which the ghost catches the player.
const CATCH_RADIUS: i64 = 6;

const PELLET_REWARD: f64 = 10.0;
const STARTING_LIVES: u8 = 3;
/// Episode ends once this many pellet cells are cleared.
const PELLET_GOAL: u8 = 60;

/// Reference [`Environment`] implementation backed by a small chase
/// simulation.
#[derive(Debug)]
pub struct MazeSim {
    seed: u64,
    rng: StdRng,
    player: (i64, i64),
    ghost: (i64, i64),
    lives: u8,
    dots_eaten: u8,
    eaten_cells: HashSet<(i64, i64)>,
    steps: u64,
}

impl MazeSim {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            player: PLAYER_START,
            ghost: GHOST_START,
            lives: STARTING_LIVES,
            dots_eaten: 0,
            eaten_cells: HashSet::new(),
            steps: 0,
        }
    }

    fn cell(position: (i64, i64)) -> (i64, i64) {
        (position.0 / 8, position.1 / 8)
    }

    fn move_player(&mut self, action: usize) {
        let (x, y) = self.player;
        self.player = match action {
            0 => (x, (y - PLAYER_SPEED).max(Y_MIN)),
            1 => ((x + PLAYER_SPEED).min(X_MAX), y),
            2 => ((x - PLAYER_SPEED).max(X_MIN), y),
            _ => (x, (y + PLAYER_SPEED).min(Y_MAX)),
        };
    }

    fn move_ghost(&mut self) {
        // Every seventh step the ghost wanders instead of chasing.
        if self.steps % 7 == 0 {
            let jitter: usize = self.rng.random_range(0..4);
            let (gx, gy) = self.ghost;
            self.ghost = match jitter {
                0 => (gx, (gy - GHOST_SPEED).max(Y_MIN)),
                1 => ((gx + GHOST_SPEED).min(X_MAX), gy),
                2 => ((gx - GHOST_SPEED).max(X_MIN), gy),
                _ => (gx, (gy + GHOST_SPEED).min(Y_MAX)),
            };
            return;
        }

        let (gx, gy) = self.ghost;
        let (px, py) = self.player;
        if (px - gx).abs() >= (py - gy).abs() {
            self.ghost = (gx + GHOST_SPEED * (px - gx).signum(), gy);
        } else {
            self.ghost = (gx, gy + GHOST_SPEED * (py - gy).signum());
        }
    }

    fn caught(&self) -> bool {
        (self.player.0 - self.ghost.0).abs() + (self.player.1 - self.ghost.1).abs() <= CATCH_RADIUS
    }

    fn ram_image(&self) -> Vec<u8> {
        let mut image = vec![0u8; ram::RAM_SIZE];
        image[ram::PLAYER_X] = self.player.0 as u8;
        image[ram::PLAYER_Y] = self.player.1 as u8;
        // One live ghost; the other three sit parked out of range.
        image[ram::ENEMY_BLINKY_X] = self.ghost.0 as u8;
        image[ram::ENEMY_BLINKY_Y] = self.ghost.1 as u8;
        for &(gx, gy) in &ram::GHOSTS[1..] {
            image[gx] = 200;
            image[gy] = 200;
        }
        image[ram::DOTS_EATEN_COUNT] = self.dots_eaten;
        image[ram::NUM_LIVES] = self.lives;
        image
    }
}

impl Environment for MazeSim {
    fn reset(&mut self) -> Result<Vec<u8>> {
        // Reseeding on reset makes every episode reproducible per seed.
        self.rng = StdRng::seed_from_u64(self.seed);
        self.player = PLAYER_START;
        self.ghost = GHOST_START;
        self.lives = STARTING_LIVES;
        self.dots_eaten = 0;
        self.eaten_cells.clear();
        self.steps = 0;
        Ok(self.ram_image())
    }

    fn step(&mut self, action: usize) -> Result<StepOutcome> {
        if action >= self.action_count() {
            return Err(Error::ActionOutOfRange {
                action,
                actions: self.action_count(),
            });
        }

        self.steps += 1;
        self.move_player(action);
        self.move_ghost();

        let mut reward = 0.0;
        if self.eaten_cells.insert(Self::cell(self.player)) {
            reward = PELLET_REWARD;
            self.dots_eaten = self.dots_eaten.saturating_add(1);
        }

        if self.caught() {
            self.lives = self.lives.saturating_sub(1);
            self.player = PLAYER_START;
            self.ghost = GHOST_START;
        }

        let terminal = self.lives == 0 || self.dots_eaten >= PELLET_GOAL;
        Ok(StepOutcome {
            ram: self.ram_image(),
            reward,
            terminal,
        })
    }

    fn action_count(&self) -> usize {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_writes_annotated_ram() {
        let mut env = MazeSim::new(0);
        let image = env.reset().unwrap();
        assert_eq!(image.len(), ram::RAM_SIZE);
        assert_eq!(image[ram::PLAYER_X] as i64, PLAYER_START.0);
        assert_eq!(image[ram::PLAYER_Y] as i64, PLAYER_START.1);
        assert_eq!(image[ram::NUM_LIVES], STARTING_LIVES);
        assert_eq!(image[ram::DOTS_EATEN_COUNT], 0);
    }

    #[test]
    fn test_step_rejects_out_of_range_action() {
        let mut env = MazeSim::new(0);
        env.reset().unwrap();
        assert!(matches!(
            env.step(4),
            Err(Error::ActionOutOfRange { action: 4, .. })
        ));
    }

    #[test]
    fn test_first_fresh_cell_pays_pellet_reward() {
        let mut env = MazeSim::new(0);
        env.reset().unwrap();
        let outcome = env.step(1).unwrap();
        assert_eq!(outcome.reward, PELLET_REWARD);
        assert_eq!(outcome.ram[ram::DOTS_EATEN_COUNT], 1);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut a = MazeSim::new(9);
        let mut b = MazeSim::new(9);
        a.reset().unwrap();
        b.reset().unwrap();

        for i in 0..200 {
            let action = i % 4;
            let oa = a.step(action).unwrap();
            let ob = b.step(action).unwrap();
            assert_eq!(oa.ram, ob.ram);
            assert_eq!(oa.reward, ob.reward);
            assert_eq!(oa.terminal, ob.terminal);
        }
    }
}
