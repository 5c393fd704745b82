pub mod clock;
pub mod entry;
pub mod log;
pub mod store;

pub use clock::{Clock, FixedClock, LocalClock};
pub use entry::{MoodEntry, MoodTag};
pub use log::{DayBucket, MoodLog};
pub use store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, MoodLogStore, StorageError};
