//! The player window and its parts.

mod controller;
mod controls;
mod display;
pub mod state;
mod sliders;
mod text;
mod title_bar;
mod winamp;

pub use controller::*;
pub use text::*;
pub use winamp::*;
