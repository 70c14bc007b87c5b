//! Row-major grid navigation.
//!
//! Card `i` sits at row `i / cols`, column `i % cols`. A page holds
//! `rows * cols` cards, so pages are whole blocks of rows and the page shown
//! is always the one containing the selection.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// New selection after moving one step; stays put at edges and never
/// passes the last card.
#[must_use]
pub fn step(selected: usize, len: usize, cols: usize, dir: Direction) -> usize {
    let cols = cols.max(1);
    if len == 0 {
        return 0;
    }
    let selected = selected.min(len - 1);
    match dir {
        Direction::Left if selected % cols > 0 => selected - 1,
        Direction::Right if selected % cols + 1 < cols && selected + 1 < len => selected + 1,
        Direction::Up if selected >= cols => selected - cols,
        Direction::Down if selected + cols < len => selected + cols,
        _ => selected,
    }
}

/// Indices visible on the page containing `selected`.
#[must_use]
pub fn visible_range(selected: usize, len: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = (selected / page_size) * page_size;
    start.min(len)..(start + page_size).min(len)
}

/// `(page, pages)`, 1-based for display.
#[must_use]
pub fn page_position(selected: usize, len: usize, page_size: usize) -> (usize, usize) {
    let page_size = page_size.max(1);
    let pages = len.div_ceil(page_size).max(1);
    ((selected / page_size + 1).min(pages), pages)
}

/// `(row, col)` of a card inside its page.
#[must_use]
pub fn cell(index: usize, cols: usize, page_size: usize) -> (usize, usize) {
    let cols = cols.max(1);
    let within = index % page_size.max(1);
    (within / cols, within % cols)
}
