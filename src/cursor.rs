// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cursor type describing the id boundaries of one fetched page.

use serde::{Deserialize, Serialize};

use crate::timeline::TimelineItem;

/// The inclusive id-range boundary of one fetched page in an id-descending
/// feed.
///
/// A cursor is produced alongside every page a [`Timeline`] source returns,
/// and the engine keeps the cursors of the newest and oldest pages it has seen
/// as the anchors for fetching in either direction. Cursors are never mutated
/// once constructed; advancing the window means replacing the stored cursor
/// with the one from a newer response.
///
/// [`Timeline`]: ../timeline/trait.Timeline.html
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineCursor {
    /// The smallest/oldest item id contained in the page, if the page held any
    /// items.
    pub min_position: Option<u64>,
    /// The largest/newest item id contained in the page, if the page held any
    /// items.
    pub max_position: Option<u64>,
}

impl TimelineCursor {
    /// Creates a cursor from raw id bounds.
    pub fn new(min_position: Option<u64>, max_position: Option<u64>) -> Self {
        TimelineCursor {
            min_position,
            max_position,
        }
    }

    /// Derives the cursor spanning a page of items.
    ///
    /// Pages arrive newest-first, so the first item carries the max position
    /// and the last item the min position. Returns `None` for an empty page,
    /// which has no boundary to describe.
    pub fn from_items<T: TimelineItem>(items: &[T]) -> Option<Self> {
        match (items.first(), items.last()) {
            (Some(first), Some(last)) => Some(TimelineCursor {
                min_position: Some(last.id()),
                max_position: Some(first.id()),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TimelineCursor;
    use crate::timeline::TimelineItem;

    struct Entry(u64);

    impl TimelineItem for Entry {
        fn id(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn equality_is_field_wise() {
        assert_eq!(
            TimelineCursor::new(Some(1), Some(5)),
            TimelineCursor::new(Some(1), Some(5))
        );
        assert_ne!(
            TimelineCursor::new(Some(1), Some(5)),
            TimelineCursor::new(Some(2), Some(5))
        );
        // absent positions compare equal to each other
        assert_eq!(
            TimelineCursor::new(None, None),
            TimelineCursor::default()
        );
    }

    #[test]
    fn derives_bounds_from_a_page() {
        let page = vec![Entry(1234), Entry(1100), Entry(1000)];
        let cursor = TimelineCursor::from_items(&page).unwrap();

        assert_eq!(cursor.max_position, Some(1234));
        assert_eq!(cursor.min_position, Some(1000));
    }

    #[test]
    fn empty_page_has_no_cursor() {
        assert_eq!(TimelineCursor::from_items::<Entry>(&[]), None);
    }
}
