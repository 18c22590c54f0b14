//! Raw row paging over a filtered table

use crate::consts::WINDOW_SIZE;
use crate::core::types::{TripRecord, TripTable};

/// Window of up to `WINDOW_SIZE` rows starting at `cursor`, and the next cursor.
/// Once the cursor is past the last row the window is empty and the cursor stays put.
pub(crate) fn next_raw_window(table: &TripTable, cursor: usize) -> (&[TripRecord], usize) {
    let len = table.len();
    if cursor >= len {
        return (&[], cursor);
    }
    let end = (cursor + WINDOW_SIZE).min(len);
    (&table.records[cursor..end], cursor + WINDOW_SIZE)
}

/// Session-owned cursor, reset at the start of every round
#[derive(Debug, Default)]
pub(crate) struct RawPager {
    cursor: usize,
}

impl RawPager {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn next<'a>(&mut self, table: &'a TripTable) -> &'a [TripRecord] {
        let (window, next) = next_raw_window(table, self.cursor);
        self.cursor = next;
        window
    }
}
