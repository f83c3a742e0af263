pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod logo;
pub mod platform;
pub mod registry;
pub mod station;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;
