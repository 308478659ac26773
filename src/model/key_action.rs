//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll gallery up by one line. Default: k/↑
    ScrollUp,
    /// Scroll gallery down by one line. Default: j/↓
    ScrollDown,
    /// Scroll up by one page height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to top of gallery. Default: g/Home
    ScrollToTop,
    /// Jump to bottom of gallery. Default: G/End
    ScrollToBottom,

    // Search
    /// Focus the search input. Default: /
    FocusSearch,

    // Pagination
    /// Activate the load-more control. Default: m
    LoadMore,

    // Zoom overlay
    /// Open the first card visible in the gallery. Default: Enter/o
    OpenOverlay,
    /// Close the zoom overlay. Default: Esc
    CloseOverlay,
    /// Show the next image in the overlay. Default: l/→
    NextImage,
    /// Show the previous image in the overlay. Default: h/←
    PrevImage,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Toggle help overlay. Default: ?
    Help,
}
