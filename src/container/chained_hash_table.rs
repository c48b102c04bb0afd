//! # Chained Hash Table
//!
//! A fixed-capacity, multi-value hash table using separate chaining.
//!
//! ```text
//!   buckets (capacity = size_hint * multiplier, never resized)
//!   ┌─────┬─────┬─────┬─────┐
//!   │  0  │  1  │  2  │ ... │
//!   └──┬──┴─────┴──┬──┴─────┘
//!      │ head      │ head           tail
//!      ▼           ▼                 ▼
//!   [k=0,v=-1]  [k=2,v=7] ──► [k=12,v=3] ──► [k=2,v=9]
//!
//!   entries: arena of slots, Occupied(Entry) | Vacant(next_free)
//! ```
//!
//! Chains are linked through `EntryId`s into an arena owned by the table.
//! Each bucket keeps both ends of its chain so `put` appends in O(1), and
//! entries within a chain stay in insertion order, oldest first. Slots freed
//! by `erase` are threaded onto a free list and reused by later inserts.
//!
//! There is no load-factor policy: lookups degrade to O(n) when every key
//! lands in one bucket. `load_factor` and `max_chain_len` expose how close a
//! table is to that ceiling.

use std::fmt::Write as _;

use log::{debug, info, trace, warn};

use crate::common::config::{BucketId, EntryId, HashTableConfig, KeyType, ValueType};
use crate::common::exception::{HashTableError, HashTableResult};
use crate::container::hash_function::HashFunction;
use crate::container::hash_table::MultiValueHashTable;

/// One stored (key, value) pair and the link to the next entry in its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: KeyType,
    value: ValueType,
    next: Option<EntryId>,
}

#[derive(Debug, Clone)]
enum Slot {
    Occupied(Entry),
    Vacant { next_free: Option<EntryId> },
}

impl Slot {
    fn as_entry(&self) -> Option<&Entry> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Vacant { .. } => None,
        }
    }

    fn as_entry_mut(&mut self) -> Option<&mut Entry> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Vacant { .. } => None,
        }
    }
}

/// Head and tail of one bucket's chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Bucket {
    head: Option<EntryId>,
    tail: Option<EntryId>,
    len: usize,
}

impl Bucket {
    fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

#[derive(Debug)]
pub struct ChainedHashTable {
    buckets: Vec<Bucket>,
    entries: Vec<Slot>,
    free_head: Option<EntryId>,
    len: usize,
    hash_fn: HashFunction,
    config: HashTableConfig,
}

impl ChainedHashTable {
    /// Allocates a table sized for `size_hint` elements with the default config.
    ///
    /// # Arguments
    ///
    /// * `size_hint` - Expected number of elements. Not a cap.
    ///
    /// # Returns
    ///
    /// The table, `InvalidArgument` if `size_hint` is zero, or
    /// `AllocationFailure` if the bucket array cannot be obtained.
    pub fn allocate(size_hint: usize) -> HashTableResult<Self> {
        Self::with_config(size_hint, HashTableConfig::default())
    }

    /// Allocates a table with `size_hint * config.bucket_multiplier` empty buckets.
    pub fn with_config(size_hint: usize, config: HashTableConfig) -> HashTableResult<Self> {
        if size_hint == 0 {
            warn!("Rejecting hash table allocation with size hint {}", size_hint);
            return Err(HashTableError::invalid_argument(
                "size hint must be at least 1",
            ));
        }
        if config.bucket_multiplier == 0 {
            warn!(
                "Rejecting hash table allocation with bucket multiplier {}",
                config.bucket_multiplier
            );
            return Err(HashTableError::invalid_argument(
                "bucket multiplier must be at least 1",
            ));
        }

        let capacity = size_hint
            .checked_mul(config.bucket_multiplier)
            .ok_or(HashTableError::AllocationFailure { buckets: usize::MAX })?;

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(capacity)
            .map_err(|_| HashTableError::AllocationFailure { buckets: capacity })?;
        buckets.resize(capacity, Bucket::default());

        info!(
            "Allocated chained hash table with {} buckets (hint {}, multiplier {}, {:?} hashing)",
            capacity, size_hint, config.bucket_multiplier, config.hash_strategy
        );

        Ok(Self {
            buckets,
            entries: Vec::new(),
            free_head: None,
            len: 0,
            hash_fn: HashFunction::new(config.hash_strategy),
            config,
        })
    }

    /// Inserts a key-value pair at the tail of its bucket's chain.
    ///
    /// Duplicate keys are kept as independent entries. Fails only with
    /// `AllocationFailure` when the entry arena cannot grow.
    pub fn put(&mut self, key: KeyType, value: ValueType) -> HashTableResult<()> {
        let bucket_id = self.bucket_of(key);
        let entry_id = self.alloc_entry(Entry {
            key,
            value,
            next: None,
        })?;

        let old_tail = self.buckets[bucket_id].tail;
        match old_tail {
            Some(tail_id) => {
                if let Some(tail) = self.entry_mut(tail_id) {
                    tail.next = Some(entry_id);
                }
            }
            None => self.buckets[bucket_id].head = Some(entry_id),
        }

        let bucket = &mut self.buckets[bucket_id];
        bucket.tail = Some(entry_id);
        bucket.len += 1;

        trace!(
            "Put key {} value {} into bucket {} as entry {}",
            key, value, bucket_id, entry_id
        );
        Ok(())
    }

    /// Copies up to `values.len()` values stored under `key` into `values`,
    /// oldest first.
    ///
    /// # Returns
    ///
    /// The true number of matches, which may exceed `values.len()`; callers
    /// re-invoke with a buffer of that size to fetch the rest. Zero matches is
    /// `Ok(0)`. An empty buffer is an `InvalidArgument`; use `count` to probe
    /// without one.
    pub fn get(&self, key: KeyType, values: &mut [ValueType]) -> HashTableResult<usize> {
        if values.is_empty() {
            warn!("Rejecting lookup of key {} with an empty value buffer", key);
            return Err(HashTableError::invalid_argument(
                "value buffer must hold at least one value",
            ));
        }

        let mut num_results = 0;
        for value in self.matches(key) {
            if let Some(slot) = values.get_mut(num_results) {
                *slot = value;
            }
            num_results += 1;
        }
        Ok(num_results)
    }

    /// Number of values stored under `key`.
    pub fn count(&self, key: KeyType) -> usize {
        self.matches(key).count()
    }

    /// Every value stored under `key`, oldest first.
    pub fn get_all(&self, key: KeyType) -> Vec<ValueType> {
        self.matches(key).collect()
    }

    pub fn contains_key(&self, key: KeyType) -> bool {
        self.matches(key).next().is_some()
    }

    /// Unlinks and releases every entry stored under `key`.
    ///
    /// # Returns
    ///
    /// The number of entries removed; zero when the key is absent.
    pub fn erase(&mut self, key: KeyType) -> usize {
        let bucket_id = self.bucket_of(key);
        let mut prev: Option<EntryId> = None;
        let mut cursor = self.buckets[bucket_id].head;
        let mut removed = 0;

        while let Some(entry_id) = cursor {
            let Some(entry) = self.entry(entry_id) else {
                break;
            };
            let (entry_key, next) = (entry.key, entry.next);

            if entry_key == key {
                match prev {
                    Some(prev_id) => {
                        if let Some(prev_entry) = self.entry_mut(prev_id) {
                            prev_entry.next = next;
                        }
                    }
                    None => self.buckets[bucket_id].head = next,
                }
                if self.buckets[bucket_id].tail == Some(entry_id) {
                    self.buckets[bucket_id].tail = prev;
                }
                self.release_entry(entry_id);
                self.buckets[bucket_id].len -= 1;
                removed += 1;
            } else {
                prev = Some(entry_id);
            }
            cursor = next;
        }

        debug!(
            "Erased {} entries for key {} from bucket {}",
            removed, key, bucket_id
        );
        removed
    }

    /// Releases every entry and then the table itself.
    ///
    /// # Returns
    ///
    /// The number of entries released.
    pub fn deallocate(mut self) -> usize {
        let capacity = self.capacity();
        let released = self.release_all();
        info!(
            "Deallocated chained hash table with {} buckets, released {} entries",
            capacity, released
        );
        released
    }

    /// Releases every entry, keeping the bucket array.
    pub fn clear(&mut self) {
        let released = self.release_all();
        debug!("Cleared {} entries from chained hash table", released);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn config(&self) -> &HashTableConfig {
        &self.config
    }

    /// Length of the chain in bucket `bucket_id`.
    pub fn bucket_len(&self, bucket_id: BucketId) -> HashTableResult<usize> {
        self.buckets
            .get(bucket_id)
            .map(|bucket| bucket.len)
            .ok_or_else(|| {
                HashTableError::invalid_argument(format!(
                    "bucket {} out of range for capacity {}",
                    bucket_id,
                    self.capacity()
                ))
            })
    }

    /// Bucket that owns `key`.
    pub fn bucket_of(&self, key: KeyType) -> BucketId {
        self.hash_fn.bucket_index(key, self.buckets.len())
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    pub fn max_chain_len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.len).max().unwrap_or(0)
    }

    /// Iterates over every (key, value) pair, bucket by bucket.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            table: self,
            bucket_id: 0,
            chain: None,
        }
    }

    /// Checks the structural invariants of the table.
    ///
    /// Every reachable entry must hash to the bucket it hangs off, be reachable
    /// from exactly one place, and the buckets together must reach exactly
    /// `len` entries. Every other arena slot must be on the free list.
    pub fn verify_integrity(&self) -> HashTableResult<()> {
        if self.buckets.is_empty() {
            return Err(HashTableError::Corrupted("bucket array is empty".into()));
        }

        let mut seen = vec![false; self.entries.len()];
        let mut reached = 0;

        for (bucket_id, bucket) in self.buckets.iter().enumerate() {
            if bucket.head.is_none() != bucket.tail.is_none() {
                return Err(HashTableError::Corrupted(format!(
                    "bucket {} has mismatched head {:?} and tail {:?}",
                    bucket_id, bucket.head, bucket.tail
                )));
            }

            let mut chain_len = 0;
            let mut last = None;
            let mut cursor = bucket.head;
            while let Some(entry_id) = cursor {
                if seen.get(entry_id).copied().unwrap_or(true) {
                    return Err(HashTableError::Corrupted(format!(
                        "entry {} in bucket {} is out of range or reachable twice",
                        entry_id, bucket_id
                    )));
                }
                seen[entry_id] = true;

                let entry = self.entry(entry_id).ok_or_else(|| {
                    HashTableError::Corrupted(format!(
                        "bucket {} links to vacant slot {}",
                        bucket_id, entry_id
                    ))
                })?;
                let home = self.bucket_of(entry.key);
                if home != bucket_id {
                    return Err(HashTableError::Corrupted(format!(
                        "key {} hashes to bucket {} but is chained from bucket {}",
                        entry.key, home, bucket_id
                    )));
                }

                chain_len += 1;
                last = Some(entry_id);
                cursor = entry.next;
            }

            if last != bucket.tail {
                return Err(HashTableError::Corrupted(format!(
                    "bucket {} tail {:?} is not the last chained entry {:?}",
                    bucket_id, bucket.tail, last
                )));
            }
            if chain_len != bucket.len {
                return Err(HashTableError::Corrupted(format!(
                    "bucket {} records {} entries but chains {}",
                    bucket_id, bucket.len, chain_len
                )));
            }
            reached += chain_len;
        }

        if reached != self.len {
            return Err(HashTableError::Corrupted(format!(
                "table records {} entries but buckets reach {}",
                self.len, reached
            )));
        }

        let mut free = 0;
        let mut cursor = self.free_head;
        while let Some(slot_id) = cursor {
            if seen.get(slot_id).copied().unwrap_or(true) {
                return Err(HashTableError::Corrupted(format!(
                    "free slot {} is out of range, live or listed twice",
                    slot_id
                )));
            }
            seen[slot_id] = true;
            cursor = match self.entries[slot_id] {
                Slot::Vacant { next_free } => next_free,
                Slot::Occupied(_) => {
                    return Err(HashTableError::Corrupted(format!(
                        "free list links to occupied slot {}",
                        slot_id
                    )));
                }
            };
            free += 1;
        }

        if reached + free != self.entries.len() {
            return Err(HashTableError::Corrupted(format!(
                "{} arena slots are neither live nor free",
                self.entries.len() - reached - free
            )));
        }
        Ok(())
    }

    /// Logs every non-empty chain at debug level.
    pub fn print_ht(&self) {
        debug!(
            "Chained hash table: {} entries in {} buckets (load factor {:.2})",
            self.len,
            self.capacity(),
            self.load_factor()
        );
        for (bucket_id, bucket) in self.buckets.iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let mut line = String::new();
            for (key, value) in self.chain(bucket.head) {
                let _ = write!(line, " ({} => {})", key, value);
            }
            debug!("  bucket {:>4} [{}]:{}", bucket_id, bucket.len, line);
        }
    }

    fn matches(&self, key: KeyType) -> impl Iterator<Item = ValueType> + '_ {
        let head = self.buckets[self.bucket_of(key)].head;
        self.chain(head)
            .filter(move |(entry_key, _)| *entry_key == key)
            .map(|(_, value)| value)
    }

    fn chain(&self, head: Option<EntryId>) -> Chain<'_> {
        Chain {
            entries: &self.entries,
            next: head,
        }
    }

    fn entry(&self, entry_id: EntryId) -> Option<&Entry> {
        self.entries.get(entry_id).and_then(Slot::as_entry)
    }

    fn entry_mut(&mut self, entry_id: EntryId) -> Option<&mut Entry> {
        self.entries.get_mut(entry_id).and_then(Slot::as_entry_mut)
    }

    fn alloc_entry(&mut self, entry: Entry) -> HashTableResult<EntryId> {
        let entry_id = match self.free_head {
            Some(slot_id) => {
                self.free_head = match self.entries[slot_id] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => None,
                };
                self.entries[slot_id] = Slot::Occupied(entry);
                slot_id
            }
            None => {
                self.entries.try_reserve(1).map_err(|_| {
                    HashTableError::AllocationFailure {
                        buckets: self.buckets.len(),
                    }
                })?;
                self.entries.push(Slot::Occupied(entry));
                self.entries.len() - 1
            }
        };
        self.len += 1;
        Ok(entry_id)
    }

    fn release_entry(&mut self, entry_id: EntryId) {
        self.entries[entry_id] = Slot::Vacant {
            next_free: self.free_head,
        };
        self.free_head = Some(entry_id);
        self.len -= 1;
    }

    /// Walks every chain through each entry's own `next` link, releasing as it
    /// goes, then drops the arena.
    fn release_all(&mut self) -> usize {
        let mut released = 0;
        for bucket in self.buckets.iter_mut() {
            let mut cursor = bucket.head.take();
            while let Some(entry_id) = cursor {
                let slot = std::mem::replace(
                    &mut self.entries[entry_id],
                    Slot::Vacant { next_free: None },
                );
                cursor = match slot {
                    Slot::Occupied(entry) => entry.next,
                    Slot::Vacant { .. } => None,
                };
                released += 1;
            }
            *bucket = Bucket::default();
        }
        debug_assert_eq!(released, self.len);

        self.entries = Vec::new();
        self.free_head = None;
        self.len = 0;
        released
    }
}

impl MultiValueHashTable for ChainedHashTable {
    fn put(&mut self, key: KeyType, value: ValueType) -> HashTableResult<()> {
        ChainedHashTable::put(self, key, value)
    }

    fn get(&self, key: KeyType, values: &mut [ValueType]) -> HashTableResult<usize> {
        ChainedHashTable::get(self, key, values)
    }

    fn count(&self, key: KeyType) -> usize {
        ChainedHashTable::count(self, key)
    }

    fn erase(&mut self, key: KeyType) -> usize {
        ChainedHashTable::erase(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Walks one chain, yielding (key, value) pairs in insertion order.
struct Chain<'a> {
    entries: &'a [Slot],
    next: Option<EntryId>,
}

impl Iterator for Chain<'_> {
    type Item = (KeyType, ValueType);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.get(self.next?)?.as_entry()?;
        self.next = entry.next;
        Some((entry.key, entry.value))
    }
}

pub struct Iter<'a> {
    table: &'a ChainedHashTable,
    bucket_id: BucketId,
    chain: Option<Chain<'a>>,
}

impl Iterator for Iter<'_> {
    type Item = (KeyType, ValueType);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.chain.as_mut().and_then(Iterator::next) {
                return Some(pair);
            }
            let bucket = self.table.buckets.get(self.bucket_id)?;
            self.chain = Some(self.table.chain(bucket.head));
            self.bucket_id += 1;
        }
    }
}

impl<'a> IntoIterator for &'a ChainedHashTable {
    type Item = (KeyType, ValueType);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
