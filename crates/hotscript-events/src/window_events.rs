use crate::KeyboardEvent;

/// Events a window hands to the frame loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// The user asked to close the window
    Closed,
    /// A key changed state
    Key(KeyboardEvent),
    /// The drawable area changed size (in terminal cells)
    Resized { columns: u16, rows: u16 },
    /// Input focus was gained or lost
    Focus(bool),
}
