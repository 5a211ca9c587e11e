// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use futures::future;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::timeline::{Timeline, TimelineFuture, TimelineItem, TimelinePage};

/// The page size used when none is configured, matching what feed services
/// commonly default to.
const DEFAULT_PAGE_SIZE: usize = 20;

/// A [`Timeline`] over a fixed, id-descending list of items.
///
/// Useful for canned feeds, previews, and tests: it obeys the same windowing
/// contract as a remote source without any transport underneath. Items are
/// ordered newest-first by id at construction, whatever order they were
/// handed over in.
///
/// ```
/// use feedline::{FixedTimeline, Timeline, TimelineItem};
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
///
/// let page = feed.next(None).await?;
/// assert_eq!(page.items.len(), 20);
/// assert_eq!(page.cursor.max_position, Some(50));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FixedTimeline<T> {
    items: Vec<T>,
    page_size: usize,
}

impl<T> FixedTimeline<T>
where
    T: TimelineItem + Clone + Send + Sync,
{
    /// Creates a fixed timeline over the given items.
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort_by(|a, b| b.id().cmp(&a.id()));
        FixedTimeline {
            items,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Helper builder function to set the page size.
    pub fn with_page_size(self, page_size: usize) -> Self {
        FixedTimeline { page_size, ..self }
    }

    fn page(&self, since_id: Option<u64>, max_id: Option<u64>) -> TimelinePage<T> {
        let items = self
            .items
            .iter()
            .filter(|item| since_id.map_or(true, |bound| item.id() > bound))
            .filter(|item| max_id.map_or(true, |bound| item.id() <= bound))
            .take(self.page_size)
            .cloned()
            .collect::<Vec<_>>();

        TimelinePage::from_items(items)
    }
}

impl<T> FixedTimeline<T>
where
    T: TimelineItem + Clone + Send + Sync + DeserializeOwned,
{
    /// Loads a fixed timeline from a JSON array of items, as when seeding a
    /// preview feed from a canned payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        let items: Vec<T> = serde_json::from_str(payload)?;
        Ok(FixedTimeline::new(items))
    }
}

impl<T> Timeline for FixedTimeline<T>
where
    T: TimelineItem + Clone + Send + Sync,
{
    type Item = T;

    fn next(&self, since_id: Option<u64>) -> TimelineFuture<'_, T> {
        Box::pin(future::ready(Ok(self.page(since_id, None))))
    }

    fn previous(&self, max_id: Option<u64>) -> TimelineFuture<'_, T> {
        Box::pin(future::ready(Ok(self.page(None, max_id))))
    }
}

#[cfg(test)]
mod tests {
    use super::FixedTimeline;
    use crate::timeline::{decrement_max_id, Timeline, TimelineItem};

    #[derive(Debug, Clone, PartialEq)]
    struct Entry(u64);

    impl TimelineItem for Entry {
        fn id(&self) -> u64 {
            self.0
        }
    }

    fn feed() -> FixedTimeline<Entry> {
        FixedTimeline::new((1..=10).map(Entry).collect::<Vec<_>>()).with_page_size(4)
    }

    fn ids(items: &[Entry]) -> Vec<u64> {
        items.iter().map(|entry| entry.0).collect()
    }

    #[tokio::test]
    async fn unbounded_next_serves_the_newest_page() {
        let page = feed().next(None).await.unwrap();

        assert_eq!(ids(&page.items), vec![10, 9, 8, 7]);
        assert_eq!(page.cursor.max_position, Some(10));
        assert_eq!(page.cursor.min_position, Some(7));
    }

    #[tokio::test]
    async fn since_id_is_exclusive() {
        let page = feed().next(Some(8)).await.unwrap();

        assert_eq!(ids(&page.items), vec![10, 9]);
    }

    #[tokio::test]
    async fn max_id_is_inclusive() {
        let page = feed().previous(Some(6)).await.unwrap();

        assert_eq!(ids(&page.items), vec![6, 5, 4, 3]);
    }

    #[tokio::test]
    async fn decremented_max_id_skips_the_boundary_item() {
        let page = feed().previous(decrement_max_id(Some(7))).await.unwrap();

        assert_eq!(ids(&page.items), vec![6, 5, 4, 3]);
    }

    #[tokio::test]
    async fn drained_feed_serves_an_empty_page() {
        let page = feed().previous(Some(0)).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.cursor.min_position, None);
    }

    #[test]
    fn construction_orders_items_newest_first() {
        let feed = FixedTimeline::new(vec![Entry(3), Entry(9), Entry(6)]);

        assert_eq!(ids(&feed.items), vec![9, 6, 3]);
    }
}
