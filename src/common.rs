// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Small set of helpers shared across the crate.
//!
//! `deserialize_datetime` is glue for reading timestamps out in a
//! `Deserialize` implementation. Classic feed APIs always hand timestamps
//! over in the same `"%a %b %d %T %z %Y"` shape, so keeping the format in one
//! place saves writing it out everywhere an item model needs it.
//!
//! The `tests` submodule carries `load_file`, used by modules that keep canned
//! JSON payloads next to their source.

use chrono::TimeZone;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

pub fn deserialize_datetime<'de, D>(ser: D) -> Result<chrono::DateTime<chrono::Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(ser)?;
    let date = (chrono::Utc)
        .datetime_from_str(&s, "%a %b %d %T %z %Y")
        .map_err(|e| D::Error::custom(e))?;
    Ok(date)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fs::File;
    use std::io::Read;

    use chrono::{Datelike, Timelike};
    use serde::Deserialize;

    pub(crate) fn load_file(path: &str) -> String {
        let mut file = File::open(path).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[derive(Deserialize)]
    struct Stamped {
        #[serde(deserialize_with = "super::deserialize_datetime")]
        when: chrono::DateTime<chrono::Utc>,
    }

    #[test]
    fn parses_classic_feed_timestamps() {
        let parsed: Stamped =
            serde_json::from_str(r#"{"when": "Sat Oct 01 22:40:30 +0000 2016"}"#).unwrap();

        assert_eq!(parsed.when.year(), 2016);
        assert_eq!(parsed.when.month(), 10);
        assert_eq!(parsed.when.day(), 1);
        assert_eq!(parsed.when.hour(), 22);
        assert_eq!(parsed.when.minute(), 40);
        assert_eq!(parsed.when.second(), 30);
    }
}
