use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum LoopEvent {
    /// The tick timer fired.
    Tick,
    /// A frame should be drawn.
    Render,
    /// Key input, resize and other terminal events.
    Crossterm(CrosstermEvent),
}
