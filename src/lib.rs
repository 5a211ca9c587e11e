// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A cursor-paginated feed synchronization engine.
//!
//! `feedline` keeps a bounded, id-ordered buffer of feed items in sync with a
//! remote paged source. It sits between a list-rendering layer and whatever
//! backend serves the feed, and takes care of the coordination both sides
//! would rather not think about: which id bounds to request next in either
//! direction, making sure only one page load is ever in flight, and telling
//! the rendering layer when the buffer actually changed.
//!
//! ## Types
//!
//! - [`TimelineDelegate`]: the engine itself. Owns the item buffer, drives
//!   page loads, and carries the observer surface. Most programs only touch
//!   this type and a [`Timeline`] implementation.
//! - [`Timeline`]: the contract a data source implements: fetch a page of
//!   items newer or older than an id bound. [`FixedTimeline`] is the shipped
//!   in-memory implementation for canned feeds and tests; sources backed by a
//!   real transport implement the trait around their own client.
//! - [`TimelineItem`]: implemented by anything that can live in a buffer.
//!   One method, returning the item's unique id. [`Post`] is a minimal
//!   ready-made item for feeds that don't need their own shape.
//! - [`TimelineCursor`] / [`TimelineStateHolder`]: the id window bookkeeping.
//!   These are driven by the delegate; they're public so adapters and tests
//!   can reason about the window directly.
//! - [`TimelineObserver`]: change notifications for a rendering layer.
//!
//! ## Getting started
//!
//! Build a delegate over a source, refresh to load the newest page, then
//! page in either direction:
//!
//! ```
//! use feedline::{FixedTimeline, TimelineDelegate, TimelineItem};
//!
//! #[derive(Clone)]
//! struct Entry(u64);
//!
//! impl TimelineItem for Entry {
//!     fn id(&self) -> u64 {
//!         self.0
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> feedline::Result<()> {
//! let feed = FixedTimeline::new((1..=50).map(Entry).collect::<Vec<_>>())
//!     .with_page_size(20);
//! let timeline = TimelineDelegate::new(feed);
//!
//! timeline.refresh().await?;
//! assert_eq!(timeline.len(), 20);
//!
//! // scroll back one page
//! timeline.previous().await?;
//! assert_eq!(timeline.len(), 40);
//!
//! // catch up with the live edge; the source has nothing newer, so this is
//! // a no-op rather than an error
//! assert_eq!(timeline.next().await?, 0);
//! # Ok(())
//! # }
//! ```
//!
//! Reading the last buffered position through [`TimelineDelegate::get_item`]
//! triggers an older-direction prefetch on the current async runtime, which
//! is what a list adapter wants as the user scrolls toward the end.
//!
//! Local rejections (a full buffer, a dispatch while another is in flight)
//! come back as [`Error::MaxCapacity`] and [`Error::RequestInFlight`] without
//! the source ever being invoked; source failures pass through unchanged as
//! [`Error::Service`].

mod common;

pub mod cursor;
pub mod delegate;
pub mod error;
pub mod observer;
pub mod post;
pub mod state;
pub mod timeline;

pub use crate::cursor::TimelineCursor;
pub use crate::delegate::{TimelineDelegate, TimelineDelegateBuilder, DEFAULT_CAPACITY};
pub use crate::error::{Error, Result};
pub use crate::observer::TimelineObserver;
pub use crate::post::Post;
pub use crate::state::TimelineStateHolder;
pub use crate::timeline::{
    decrement_max_id, FixedTimeline, Timeline, TimelineFuture, TimelineItem, TimelinePage,
};
