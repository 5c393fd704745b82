use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::entry::MoodEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: String,
    pub entries: Vec<MoodEntry>,
}

/// Date-keyed journal. Buckets keep the order their dates were first written;
/// entries inside a bucket are newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodLog {
    buckets: Vec<DayBucket>,
}

impl MoodLog {
    pub fn new() -> Self {
        Self { buckets: Vec::new() }
    }

    pub fn prepend(&mut self, date: &str, entry: MoodEntry) {
        match self.buckets.iter_mut().find(|bucket| bucket.date == date) {
            Some(bucket) => bucket.entries.insert(0, entry),
            None => self.buckets.push(DayBucket {
                date: date.to_string(),
                entries: vec![entry],
            }),
        }
    }

    pub fn entries_for(&self, date: &str) -> &[MoodEntry] {
        self.buckets
            .iter()
            .find(|bucket| bucket.date == date)
            .map(|bucket| bucket.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn buckets(&self) -> &[DayBucket] {
        &self.buckets
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|bucket| bucket.date.as_str())
    }

    /// Every entry as `(date, entry)` in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MoodEntry)> {
        self.buckets.iter().flat_map(|bucket| {
            bucket
                .entries
                .iter()
                .map(move |entry| (bucket.date.as_str(), entry))
        })
    }

    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Serialize for MoodLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.date, &bucket.entries)?;
        }
        map.end()
    }
}

struct MoodLogVisitor;

impl<'de> Visitor<'de> for MoodLogVisitor {
    type Value = MoodLog;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of date strings to mood entry arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut buckets: Vec<DayBucket> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((date, entries)) = access.next_entry::<String, Vec<MoodEntry>>()? {
            // A repeated key replaces the earlier value but keeps its position.
            match buckets.iter_mut().find(|bucket| bucket.date == date) {
                Some(bucket) => bucket.entries = entries,
                None => buckets.push(DayBucket { date, entries }),
            }
        }
        Ok(MoodLog { buckets })
    }
}

impl<'de> Deserialize<'de> for MoodLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MoodLogVisitor)
    }
}
