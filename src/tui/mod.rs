pub mod event_loop;
pub mod rendering;
pub mod state;
pub mod state_render;
pub mod theme;
pub mod view;

pub use state::TuiApp;

#[cfg(test)]
mod state_test;
