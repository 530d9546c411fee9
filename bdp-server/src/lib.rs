//! BDP check server.
//!
//! Answers the question a map editor asks before applying a Best
//! Continuation / Detour Prevention penalty: "given these bracketing
//! segments, is there a direct route between them?"

pub mod cache;
pub mod check;
pub mod continuity;
pub mod domain;
pub mod network;
pub mod planner;
pub mod routing;
pub mod web;
