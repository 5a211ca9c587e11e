// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pagination state machine backing a [`TimelineDelegate`].
//!
//! [`TimelineDelegate`]: ../delegate/struct.TimelineDelegate.html

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::cursor::TimelineCursor;

/// Tracks the id window of a timeline and gates overlapping page loads.
///
/// The state moves along two independent axes: whether the cursors have been
/// seeded by a first successful page, and whether a request is currently in
/// flight. There is no terminal state; the holder is reused for as long as
/// its delegate lives.
///
/// The in-flight flag is the single concurrency gate of the engine. A caller
/// may only dispatch after [`start_timeline_request`] returns `true`, and
/// every dispatched request must be balanced by exactly one
/// [`finish_timeline_request`] no matter how it completed, or pagination
/// wedges permanently.
///
/// [`start_timeline_request`]: #method.start_timeline_request
/// [`finish_timeline_request`]: #method.finish_timeline_request
#[derive(Debug, Default)]
pub struct TimelineStateHolder {
    window: Mutex<CursorWindow>,
    request_in_flight: AtomicBool,
}

#[derive(Debug, Default, Clone, Copy)]
struct CursorWindow {
    next: Option<TimelineCursor>,
    previous: Option<TimelineCursor>,
}

impl TimelineStateHolder {
    /// Creates a holder with unseeded cursors and no request in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// The id to use as the `since_id` bound when fetching newer items, once
    /// a page has seeded the window.
    pub fn position_for_next(&self) -> Option<u64> {
        self.window().next.and_then(|cursor| cursor.max_position)
    }

    /// The id to use as the `max_id` bound when fetching older items, once a
    /// page has seeded the window.
    pub fn position_for_previous(&self) -> Option<u64> {
        self.window()
            .previous
            .and_then(|cursor| cursor.min_position)
    }

    /// Records the cursor of a newer-direction page.
    ///
    /// The very first page seeds both directions: there is only one page to
    /// anchor either of them on, and without the seed the opposite direction
    /// could never be fetched correctly.
    pub fn set_next_cursor(&self, cursor: TimelineCursor) {
        let mut window = self.window();
        window.next = Some(cursor);
        if window.previous.is_none() {
            window.previous = Some(cursor);
        }
    }

    /// Records the cursor of an older-direction page, seeding the next cursor
    /// as well when it was still unset.
    pub fn set_previous_cursor(&self, cursor: TimelineCursor) {
        let mut window = self.window();
        window.previous = Some(cursor);
        if window.next.is_none() {
            window.next = Some(cursor);
        }
    }

    /// Clears both cursors, as when a refresh starts the window over.
    pub fn reset_cursors(&self) {
        *self.window() = CursorWindow::default();
    }

    /// Attempts to claim the in-flight slot.
    ///
    /// Returns whether the caller won the slot and may dispatch. A `false`
    /// return means another request is outstanding and the caller must not
    /// proceed.
    pub fn start_timeline_request(&self) -> bool {
        self.request_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Releases the in-flight slot.
    ///
    /// Called exactly once per dispatched request, whether it succeeded or
    /// failed.
    pub fn finish_timeline_request(&self) {
        self.request_in_flight.store(false, Ordering::Release);
    }

    fn window(&self) -> MutexGuard<'_, CursorWindow> {
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
