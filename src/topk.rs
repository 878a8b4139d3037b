//! Top-K selection of run records by solve time
//!
//! **Problem**: "show the N slowest runs" over a large run set does not need a
//! full O(N log N) sort.
//!
//! **Solution**: bounded binary heap, O(N log K). When `k` covers every record
//! it degrades to a plain stable sort.
//!
//! Ties on `time_ms` keep input order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::record::RunRecord;

/// Sort order for Top-K selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order (fastest K runs)
    Ascending,
    /// Descending order (slowest K runs)
    Descending,
}

// Heap entry ranked so the heap top is the entry to evict first.
#[derive(Debug)]
struct HeapItem {
    time_ms: f64,
    index: usize,
    order: SortOrder,
}

impl HeapItem {
    /// Ordering of two entries in the final output (Less = earlier).
    fn output_cmp(&self, other: &Self) -> Ordering {
        let by_time = match self.order {
            SortOrder::Descending => other.time_ms.total_cmp(&self.time_ms),
            SortOrder::Ascending => self.time_ms.total_cmp(&other.time_ms),
        };
        by_time.then(self.index.cmp(&other.index))
    }
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl Ord for HeapItem {
    // Max-heap on output position: the top is the entry that would come last.
    fn cmp(&self, other: &Self) -> Ordering {
        self.output_cmp(other)
    }
}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Select the K records with the largest (or smallest) `time_ms`.
///
/// Returns at most `k` records, ordered by `time_ms` in the requested order.
///
/// # Examples
///
/// ```rust
/// use benchlens::record::{RunRecord, RunStatus};
/// use benchlens::topk::{top_k_by_time, SortOrder};
///
/// let runs: Vec<RunRecord> = [5.0, 1.0, 9.0, 3.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &t)| RunRecord::new(10, "random", i as i64, t, RunStatus::Success))
///     .collect();
///
/// let slowest = top_k_by_time(&runs, 2, SortOrder::Descending);
/// assert_eq!(slowest[0].time_ms(), 9.0);
/// assert_eq!(slowest[1].time_ms(), 5.0);
/// ```
#[must_use]
pub fn top_k_by_time<'a, I>(records: I, k: usize, order: SortOrder) -> Vec<RunRecord>
where
    I: IntoIterator<Item = &'a RunRecord>,
{
    let records: Vec<&RunRecord> = records.into_iter().collect();
    if k == 0 {
        return Vec::new();
    }

    if k >= records.len() {
        return sort_all(records, order);
    }

    let mut heap: BinaryHeap<HeapItem> = BinaryHeap::with_capacity(k + 1);
    for (index, record) in records.iter().enumerate() {
        heap.push(HeapItem {
            time_ms: record.time_ms(),
            index,
            order,
        });
        if heap.len() > k {
            heap.pop();
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|item| records[item.index].clone())
        .collect()
}

fn sort_all(mut records: Vec<&RunRecord>, order: SortOrder) -> Vec<RunRecord> {
    match order {
        SortOrder::Descending => records.sort_by(|a, b| b.time_ms().total_cmp(&a.time_ms())),
        SortOrder::Ascending => records.sort_by(|a, b| a.time_ms().total_cmp(&b.time_ms())),
    }
    records.into_iter().cloned().collect()
}
