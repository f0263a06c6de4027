//! Closest Approach - two-body orbit animation
//!
//! Two bodies circle the Sun at fixed angular rates. Every local minimum of
//! their separation is marked on screen, and the whole run is exported as a
//! looping GIF when it ends.

pub mod animation;
pub mod approach;
pub mod canvas;
pub mod config;
pub mod display;
pub mod driver;
pub mod export;
pub mod kinematics;
pub mod scene;
pub mod time;
pub mod types;

#[cfg(test)]
pub mod test_utils;
