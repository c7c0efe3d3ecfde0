//! Terminal event loop for ratatui applications.
//!
//! The [`Runtime`] multiplexes three event sources: terminal input, render
//! frames and one restartable tick timer, and feeds them to an [`App`].

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
