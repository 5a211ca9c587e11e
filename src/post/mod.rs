// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A minimal concrete feed item.
//!
//! The engine itself is generic over anything implementing
//! [`TimelineItem`], but a canned feed needs something concrete to hold.
//! `Post` is deliberately the smallest useful shape: an id, a timestamp, an
//! author handle, and the text. Feeds with richer items define their own
//! types and implement [`TimelineItem`] the same way.
//!
//! [`TimelineItem`]: ../timeline/trait.TimelineItem.html

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::timeline::TimelineItem;

/// A single feed entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    /// Numeric id for this post. Ids decrease with age.
    pub id: u64,
    /// UTC timestamp from when the post was published.
    #[serde(deserialize_with = "crate::common::deserialize_datetime")]
    pub created_at: DateTime<Utc>,
    /// Handle of the author.
    pub author: String,
    /// The text of the post.
    pub text: String,
}

impl TimelineItem for Post {
    fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::Post;
    use crate::common::tests::load_file;
    use crate::timeline::{FixedTimeline, Timeline, TimelineItem};

    fn sample_page() -> Vec<Post> {
        serde_json::from_str(&load_file("src/post/sample-page.json")).unwrap()
    }

    #[test]
    fn parse_page() {
        let posts = sample_page();

        assert_eq!(posts.len(), 4);

        let newest = &posts[0];
        assert_eq!(newest.id, 1126);
        assert_eq!(newest.author, "ada");
        assert_eq!(newest.text, "shipping the pagination engine today");
        assert_eq!(newest.created_at.year(), 2020);
        assert_eq!(newest.created_at.month(), 3);
        assert_eq!(newest.created_at.day(), 18);
        assert_eq!(newest.created_at.hour(), 9);

        assert_eq!(TimelineItem::id(newest), 1126);
    }

    #[test]
    fn page_arrives_newest_first() {
        let ids = sample_page()
            .iter()
            .map(|post| post.id)
            .collect::<Vec<_>>();

        assert_eq!(ids, vec![1126, 1119, 1104, 1092]);
    }

    #[tokio::test]
    async fn canned_payload_seeds_a_fixed_timeline() {
        let feed: FixedTimeline<Post> =
            FixedTimeline::from_json(&load_file("src/post/sample-page.json")).unwrap();

        let page = feed.next(None).await.unwrap();
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.cursor.max_position, Some(1126));
        assert_eq!(page.cursor.min_position, Some(1092));
    }

    #[test]
    fn malformed_payload_is_a_deserialize_error() {
        let err = FixedTimeline::<Post>::from_json("{\"not\": \"an array\"}").unwrap_err();

        assert!(matches!(err, crate::error::Error::DeserializeError(_)));
    }
}
