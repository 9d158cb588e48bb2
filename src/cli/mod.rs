//! CLI infrastructure for MiniChess
//!
//! This module provides the command-line interface for training agents by
//! self-play, playing against them, evaluating and inspecting saved policies.

pub mod commands;
pub mod config;
pub mod output;
