//! Core library for the `fetchplan` CLI.
//!
//! This crate provides the internal building blocks used by the binary:
//! CLI argument types, schedule parsing, the multiplexed transfer
//! engine, time-ordered dispatch, response verification, and result
//! reporting. The primary user-facing interface is the `fetchplan`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod logger;
pub mod report;
pub mod schedule;
pub mod verify;
