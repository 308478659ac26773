//! Layout dimension constants for TUI rendering.

/// Height of the search input widget in lines (border + text).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the load-more control drawn after the last card.
///
/// Three rows so the automatic trigger sees partial visibility instead of an
/// all-or-nothing flip.
pub const LOAD_MORE_HEIGHT: u16 = 3;

/// Width of the load-more control in columns.
pub const LOAD_MORE_WIDTH: u16 = 28;

/// Maximum width of a toast in columns (border included).
pub const TOAST_WIDTH: u16 = 48;

/// Rows scrolled per mouse wheel notch.
pub const MOUSE_SCROLL_ROWS: usize = 3;

/// Width percentage for the help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for the help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Width percentage for the zoom overlay popup.
pub const LIGHTBOX_WIDTH_PERCENT: u16 = 80;

/// Height percentage for the zoom overlay popup.
pub const LIGHTBOX_HEIGHT_PERCENT: u16 = 50;
