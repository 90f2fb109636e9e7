pub mod listeners;
pub mod state;

pub use state::{Input, InputEvent, MouseButton, TouchState, WindowEvent};
