use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Produces ids that stay unique even when many are created within the same millisecond
#[derive(Debug, Default)]
pub struct IdGenerator {
    sequence: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `{prefix}::{epoch_millis}_{sequence}`; the sequence never repeats within a process
    pub fn next(&self, prefix: &str) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}::{}_{}", prefix, Utc::now().timestamp_millis(), sequence)
    }

    /// Move the sequence beyond every id in `existing` that has our format,
    /// so ids restored from a snapshot are never handed out again
    pub fn skip_past<'a>(&self, existing: impl IntoIterator<Item = &'a str>) {
        if let Some(highest) = existing.into_iter().filter_map(sequence_of).max() {
            self.sequence.fetch_max(highest.saturating_add(1), Ordering::Relaxed);
        }
    }
}

fn sequence_of(id: &str) -> Option<u64> {
    let (_, suffix) = id.split_once("::")?;
    let (_, sequence) = suffix.rsplit_once('_')?;
    sequence.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_ids_in_tight_loop_are_distinct() {
        let ids = IdGenerator::new();
        let generated: HashSet<String> = (0..1000).map(|_| ids.next("checkin")).collect();
        assert_eq!(generated.len(), 1000);
    }

    #[test]
    fn test_ids_across_threads_are_distinct() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..250).map(|_| ids.next("media")).collect::<Vec<_>>())
            })
            .collect();

        let mut generated = HashSet::new();
        for handle in handles {
            generated.extend(handle.join().unwrap());
        }
        assert_eq!(generated.len(), 1000);
    }

    #[test]
    fn test_skip_past_continues_after_highest_sequence() {
        let ids = IdGenerator::new();
        ids.skip_past(["pet::1700000000000_7", "checkin::1700000000001_12", "imported-id", "media::x_y"]);
        assert!(ids.next("pet").ends_with("_13"));

        // Never moves backwards
        ids.skip_past(["pet::1700000000000_2"]);
        assert!(ids.next("pet").ends_with("_14"));
    }

    #[test]
    fn test_id_format() {
        let id = IdGenerator::new().next("pet");
        assert!(id.starts_with("pet::"));
        assert!(id.ends_with("_0"));
    }
}
