// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The data-source contract the engine drives, plus helpers for implementing
//! it.
//!
//! A [`Timeline`] hands out pages of an id-descending feed in two directions:
//! `next` toward newer items and `previous` toward older ones. Implementations
//! are stateless request translators; all windowing state lives in the
//! [`TimelineDelegate`] that drives them. The one implementation shipped with
//! the crate is [`FixedTimeline`], which serves pages out of an in-memory
//! list and needs no transport underneath.
//!
//! [`TimelineDelegate`]: ../delegate/struct.TimelineDelegate.html

use futures::future::BoxFuture;

use crate::cursor::TimelineCursor;
use crate::error::Result;

mod fixed;

pub use self::fixed::FixedTimeline;

/// An item that can live in a timeline buffer.
///
/// The engine orders and addresses items purely by this id. Ids are expected
/// to be unique within a feed and to decrease with age, the way feed services
/// hand out monotonically-assigned ids.
pub trait TimelineItem {
    /// The unique id of this item.
    fn id(&self) -> u64;
}

/// One successfully-fetched page: the items in received (newest-first) order
/// and the cursor spanning them.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePage<T> {
    /// Boundary ids of this page.
    pub cursor: TimelineCursor,
    /// The items of the page, newest first.
    pub items: Vec<T>,
}

impl<T: TimelineItem> TimelinePage<T> {
    /// Bundles a page of items with the cursor derived from their ids.
    ///
    /// An empty page gets an empty cursor; the engine treats such a page as
    /// "no more data in this direction" and leaves its window untouched.
    pub fn from_items(items: Vec<T>) -> Self {
        let cursor = TimelineCursor::from_items(&items).unwrap_or_default();
        TimelinePage { cursor, items }
    }
}

/// The future returned by [`Timeline`] calls.
pub type TimelineFuture<'a, T> = BoxFuture<'a, Result<TimelinePage<T>>>;

/// A paged, id-ordered data source.
///
/// Implementations translate the id bounds into whatever query their backing
/// store understands and resolve to one [`TimelinePage`]. They hold no
/// pagination state of their own.
///
/// The two bounds are deliberately asymmetric, matching the boundary
/// semantics of classic feed APIs: `since_id` is exclusive, so `next` returns
/// items with ids strictly greater than it, while `max_id` is inclusive and
/// the returned items may contain the bound itself. Callers that already hold
/// the boundary item step the bound down with [`decrement_max_id`] before
/// passing it in; no symmetric adjustment exists for `since_id`.
pub trait Timeline: Send + Sync {
    /// The item type this source produces.
    type Item: TimelineItem;

    /// Fetches items newer than `since_id`, or the newest page when `None`.
    fn next(&self, since_id: Option<u64>) -> TimelineFuture<'_, Self::Item>;

    /// Fetches items at or below the `max_id` bound, or the newest page when
    /// `None`.
    fn previous(&self, max_id: Option<u64>) -> TimelineFuture<'_, Self::Item>;
}

/// Steps a `max_id` bound below the boundary item so the item itself is not
/// fetched a second time.
///
/// `max_id` bounds are inclusive, so a caller paging backwards from an item
/// it already holds would receive that item again at the top of every page
/// without this adjustment.
pub fn decrement_max_id(max_id: Option<u64>) -> Option<u64> {
    max_id.map(|id| id.saturating_sub(1))
}
