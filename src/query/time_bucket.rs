use serde::{Deserialize, Serialize};

/// A discrete cook-time range. The five buckets cover the full integer line:
/// classification is total, so every recipe lands in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBucket {
    #[serde(rename = "15min")]
    UpTo15,
    #[serde(rename = "30min")]
    UpTo30,
    #[serde(rename = "1h")]
    UpTo1h,
    #[serde(rename = "2h")]
    UpTo2h,
    #[serde(rename = "2h+")]
    Over2h,
}

impl TimeBucket {
    /// All buckets in display order.
    pub const ALL: [TimeBucket; 5] = [
        TimeBucket::UpTo15,
        TimeBucket::UpTo30,
        TimeBucket::UpTo1h,
        TimeBucket::UpTo2h,
        TimeBucket::Over2h,
    ];

    /// Classify a total-cook-time value. Total over all inputs: absent,
    /// zero, and negative values fall into the `2h` bucket, a compatibility
    /// policy for recipes with missing time data, kept out of every other
    /// code path.
    pub fn classify(minutes: Option<i64>) -> TimeBucket {
        match minutes {
            Some(m) if (1..=15).contains(&m) => TimeBucket::UpTo15,
            Some(m) if (16..=30).contains(&m) => TimeBucket::UpTo30,
            Some(m) if (31..=60).contains(&m) => TimeBucket::UpTo1h,
            Some(m) if (61..=120).contains(&m) => TimeBucket::UpTo2h,
            Some(m) if m > 120 => TimeBucket::Over2h,
            _ => TimeBucket::UpTo2h,
        }
    }

    /// Wire key, as used in filter expressions and facet options.
    pub fn key(&self) -> &'static str {
        match self {
            TimeBucket::UpTo15 => "15min",
            TimeBucket::UpTo30 => "30min",
            TimeBucket::UpTo1h => "1h",
            TimeBucket::UpTo2h => "2h",
            TimeBucket::Over2h => "2h+",
        }
    }

    pub fn from_key(key: &str) -> Option<TimeBucket> {
        TimeBucket::ALL.iter().copied().find(|b| b.key() == key)
    }

    /// Lithuanian display label.
    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::UpTo15 => "iki 15 min.",
            TimeBucket::UpTo30 => "iki 30 min.",
            TimeBucket::UpTo1h => "iki 1 val.",
            TimeBucket::UpTo2h => "iki 2 val.",
            TimeBucket::Over2h => "virš 2 val.",
        }
    }

    /// Position in display order, for deterministic option ordering.
    pub fn position(&self) -> usize {
        TimeBucket::ALL.iter().position(|b| b == self).unwrap_or(0)
    }
}
