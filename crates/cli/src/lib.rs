//! Public library modules for the CLI crate
pub mod display;
pub mod input;
