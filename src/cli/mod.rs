//! CLI infrastructure for the muncher toolkit
//!
//! This module provides the command-line interface for training,
//! evaluating, and inspecting Q-learning agents.

pub mod commands;
pub mod output;
