//! # Rendering Module
//!
//! Text projections of the dungeon for a plain terminal.
//!
//! Room rendering itself lives on [`crate::Room::render`]; this module adds
//! the blanking rectangle used after a room transition and the frame
//! composition done by [`TerminalDisplay`].

pub mod display;

pub use display::*;

/// A block of spaces with the same shape as a `width` by `height` room
/// rendering.
///
/// Printed over a larger room that was just left, so no stale walls remain
/// when a smaller room is drawn in its place.
///
/// # Examples
///
/// ```
/// use roomcrawl::render_blank_rect;
///
/// assert_eq!(render_blank_rect(3, 2), "   \n   \n");
/// assert_eq!(render_blank_rect(0, 4), "");
/// ```
pub fn render_blank_rect(width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }
    let row = format!("{}\n", " ".repeat(width as usize));
    row.repeat(height as usize)
}

/// Prefixes every line of `block` with `margin` spaces.
pub fn indent_block(block: &str, margin: usize) -> String {
    let pad = " ".repeat(margin);
    block
        .lines()
        .map(|line| format!("{}{}\n", pad, line))
        .collect()
}
