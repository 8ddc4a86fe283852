//! Food-photo calorie tracking backend.
//!
//! [`nutrition`] is the pure core (reading model output, computing targets and weight
//! pacing); the remaining modules are the HTTP service around it.

pub mod app;
pub mod auth;
pub mod config;
pub mod generations;
pub mod nutrition;
pub mod profile;
pub mod state;
pub mod storage;
pub mod vision;
pub mod weights;
