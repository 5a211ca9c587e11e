// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The coordination point between a timeline source and a list consumer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::observer::{ObserverRegistry, TimelineObserver};
use crate::state::TimelineStateHolder;
use crate::timeline::{decrement_max_id, Timeline, TimelineItem, TimelinePage};

/// The buffer bound used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Drives page loads against a [`Timeline`] source and maintains the
/// resulting item buffer.
///
/// The delegate owns an ordered buffer of items (index 0 is the newest) and
/// the pagination window around it, and guarantees at most one page load is
/// in flight at any moment. Newer pages are fetched with [`next`] and
/// prepended; older pages with [`previous`] and appended; [`refresh`] starts
/// the window over and replaces the buffer wholesale. Registered
/// [`TimelineObserver`]s are notified whenever the buffer actually changes;
/// a rejected dispatch or an empty page never produces a notification.
///
/// Delegates are cheap to clone; clones share the same buffer and window, so
/// a completion handler or an observer can keep its own handle.
///
/// ```
/// use feedline::{FixedTimeline, TimelineDelegate, TimelineItem};
///
/// #[derive(Clone)]
/// struct Entry(u64);
///
/// impl TimelineItem for Entry {
///     fn id(&self) -> u64 {
///         self.0
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> feedline::Result<()> {
/// let feed = FixedTimeline::new((1..=50).map(Entry).collect::<Vec<_>>())
///     .with_page_size(20);
/// let timeline = TimelineDelegate::new(feed);
///
/// // load the newest page...
/// timeline.refresh().await?;
/// assert_eq!(timeline.len(), 20);
///
/// // ...and scroll back one page
/// timeline.previous().await?;
/// assert_eq!(timeline.len(), 40);
/// assert_eq!(timeline.item_id(0), Some(50));
/// # Ok(())
/// # }
/// ```
///
/// [`next`]: #method.next
/// [`previous`]: #method.previous
/// [`refresh`]: #method.refresh
pub struct TimelineDelegate<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for TimelineDelegate<T> {
    fn clone(&self) -> Self {
        TimelineDelegate {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<T> {
    timeline: Box<dyn Timeline<Item = T>>,
    state: TimelineStateHolder,
    items: Mutex<Vec<T>>,
    capacity: usize,
    observers: ObserverRegistry,
}

/// Configures and builds a [`TimelineDelegate`].
pub struct TimelineDelegateBuilder<T> {
    timeline: Box<dyn Timeline<Item = T>>,
    capacity: usize,
    initial_items: Vec<T>,
}

impl<T> TimelineDelegateBuilder<T> {
    /// Caps the item buffer at the given size instead of the default 1000.
    pub fn capacity(self, capacity: usize) -> Self {
        TimelineDelegateBuilder { capacity, ..self }
    }

    /// Pre-seeds the buffer, as when restoring a previously-rendered screen.
    pub fn initial_items(self, items: Vec<T>) -> Self {
        TimelineDelegateBuilder {
            initial_items: items,
            ..self
        }
    }

    /// Builds the delegate.
    pub fn build(self) -> TimelineDelegate<T> {
        TimelineDelegate {
            inner: Arc::new(Inner {
                timeline: self.timeline,
                state: TimelineStateHolder::new(),
                items: Mutex::new(self.initial_items),
                capacity: self.capacity,
                observers: ObserverRegistry::default(),
            }),
        }
    }
}

impl<T> TimelineDelegate<T>
where
    T: TimelineItem + Clone + Send + 'static,
{
    /// Starts building a delegate over the given timeline source.
    pub fn builder(timeline: impl Timeline<Item = T> + 'static) -> TimelineDelegateBuilder<T> {
        TimelineDelegateBuilder {
            timeline: Box::new(timeline),
            capacity: DEFAULT_CAPACITY,
            initial_items: Vec::new(),
        }
    }

    /// Creates a delegate with an empty buffer and the default capacity.
    pub fn new(timeline: impl Timeline<Item = T> + 'static) -> Self {
        Self::builder(timeline).build()
    }

    /// Number of buffered items.
    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    /// Whether the buffer holds no items.
    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }

    /// The configured buffer bound.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Whether the buffer can still grow.
    pub fn within_max_capacity(&self) -> bool {
        self.len() < self.inner.capacity
    }

    /// Whether `position` is the last index of the buffer.
    pub fn is_last_position(&self, position: usize) -> bool {
        let len = self.len();
        len > 0 && position == len - 1
    }

    /// Returns the item at `position`.
    ///
    /// Reading the last buffered position doubles as the infinite-scroll
    /// trigger: a previous-direction load is spawned onto the current async
    /// runtime, if one exists, so the buffer refills ahead of the consumer.
    /// The trigger never blocks the caller, and is suppressed rather than
    /// queued while another request is in flight or the buffer is full.
    pub fn get_item(&self, position: usize) -> Option<T> {
        let item = self.buffer().get(position).cloned();
        if item.is_some() && self.is_last_position(position) {
            self.trigger_load_previous();
        }
        item
    }

    /// The id of the item at `position`.
    pub fn item_id(&self, position: usize) -> Option<u64> {
        self.buffer().get(position).map(|item| item.id())
    }

    /// Replaces every buffered item carrying the same id as `item`.
    ///
    /// This is how a single-item mutation made elsewhere (a like, an edit)
    /// gets folded back into the buffer. Observers are notified only when
    /// something was actually replaced; handing in an id the buffer does not
    /// hold is a valid no-op.
    pub fn set_item_by_id(&self, item: T) {
        let mut replaced = false;
        {
            let mut items = self.buffer();
            for slot in items.iter_mut() {
                if slot.id() == item.id() {
                    *slot = item.clone();
                    replaced = true;
                }
            }
        }
        if replaced {
            self.inner.observers.notify_changed();
        }
    }

    /// Clears the pagination window and reloads the newest page, replacing
    /// the buffer wholesale on success.
    ///
    /// Returns the number of items received. A zero-item page leaves the
    /// buffer, the window, and the observers untouched, so the stale items
    /// stay on screen until a retry succeeds.
    pub async fn refresh(&self) -> Result<usize> {
        self.inner.state.reset_cursors();
        let TimelinePage { cursor, items } = self.load_next(None).await?;
        if items.is_empty() {
            trace!("refresh returned an empty page");
            return Ok(0);
        }
        let count = items.len();
        *self.buffer() = items;
        self.inner.state.set_next_cursor(cursor);
        self.inner.observers.notify_changed();
        trace!(count, "refresh replaced the buffer");
        Ok(count)
    }

    /// Fetches items newer than the newest page seen so far.
    ///
    /// New items arrive newest-first and are prepended in received order, so
    /// the buffer stays ordered. An empty page means the consumer is caught
    /// up with the live edge: the window and the observers are left
    /// untouched, and a later call probes the same boundary again.
    pub async fn next(&self) -> Result<usize> {
        let since_id = self.inner.state.position_for_next();
        let TimelinePage { cursor, items } = self.load_next(since_id).await?;
        if items.is_empty() {
            return Ok(0);
        }
        let count = items.len();
        {
            let mut buffer = self.buffer();
            let mut merged = items;
            merged.extend(buffer.drain(..));
            *buffer = merged;
        }
        self.inner.state.set_next_cursor(cursor);
        self.inner.observers.notify_changed();
        trace!(count, "prepended newer page");
        Ok(count)
    }

    /// Fetches items older than the oldest page seen so far.
    ///
    /// Items are appended in received order. An empty page means the end of
    /// history was reached; nothing is mutated, so a later call can re-probe
    /// in case the source backfills.
    pub async fn previous(&self) -> Result<usize> {
        let max_id = decrement_max_id(self.inner.state.position_for_previous());
        let TimelinePage { cursor, items } = self.load_previous(max_id).await?;
        if items.is_empty() {
            return Ok(0);
        }
        let count = items.len();
        self.buffer().extend(items);
        self.inner.state.set_previous_cursor(cursor);
        self.inner.observers.notify_changed();
        trace!(count, "appended older page");
        Ok(count)
    }

    /// Registers an observer for buffer-change notifications.
    pub fn register_observer(&self, observer: Arc<dyn TimelineObserver>) {
        self.inner.observers.register(observer);
    }

    /// Removes a previously-registered observer.
    pub fn unregister_observer(&self, observer: &Arc<dyn TimelineObserver>) {
        self.inner.observers.unregister(observer);
    }

    /// Tells observers the buffer contents changed.
    pub fn notify_changed(&self) {
        self.inner.observers.notify_changed();
    }

    /// Tells observers the buffered data is no longer valid.
    pub fn notify_invalidated(&self) {
        self.inner.observers.notify_invalidated();
    }

    /// The guarded dispatch primitive underlying [`refresh`] and [`next`]:
    /// fetches one newer-direction page at the given bound without applying
    /// it to the buffer.
    ///
    /// [`refresh`]: #method.refresh
    /// [`next`]: #method.next
    pub async fn load_next(&self, since_id: Option<u64>) -> Result<TimelinePage<T>> {
        let _guard = self.claim_request()?;
        debug!(?since_id, "dispatching newer-direction page load");
        self.inner.timeline.next(since_id).await
    }

    /// The guarded dispatch primitive underlying [`previous`]: fetches one
    /// older-direction page at the given bound without applying it to the
    /// buffer.
    ///
    /// [`previous`]: #method.previous
    pub async fn load_previous(&self, max_id: Option<u64>) -> Result<TimelinePage<T>> {
        let _guard = self.claim_request()?;
        debug!(?max_id, "dispatching older-direction page load");
        self.inner.timeline.previous(max_id).await
    }

    /// Runs the local dispatch preconditions and claims the in-flight slot.
    ///
    /// Both rejections happen before the source is invoked, and neither
    /// touches the observers.
    fn claim_request(&self) -> Result<RequestGuard<'_>> {
        if !self.within_max_capacity() {
            debug!("page load rejected: buffer at capacity");
            return Err(Error::MaxCapacity);
        }
        if !self.inner.state.start_timeline_request() {
            debug!("page load rejected: request already in flight");
            return Err(Error::RequestInFlight);
        }
        Ok(RequestGuard {
            state: &self.inner.state,
        })
    }

    /// Spawns an older-direction load on the current runtime, if one exists.
    fn trigger_load_previous(&self) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                trace!("no async runtime; scroll prefetch skipped");
                return;
            }
        };
        let timeline = self.clone();
        handle.spawn(async move {
            match timeline.previous().await {
                Ok(count) => trace!(count, "scroll prefetch applied"),
                Err(Error::RequestInFlight) | Err(Error::MaxCapacity) => {
                    trace!("scroll prefetch suppressed")
                }
                Err(err) => debug!(error = %err, "scroll prefetch failed"),
            }
        });
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<T>> {
        self.inner
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the in-flight slot once the dispatch completes, errors, or is
/// dropped mid-poll.
struct RequestGuard<'a> {
    state: &'a TimelineStateHolder,
}

impl Drop for RequestGuard<'_> {
    fn drop(&mut self) {
        self.state.finish_timeline_request();
    }
}
