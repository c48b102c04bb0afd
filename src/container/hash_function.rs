use std::hash::Hasher;

use xxhash_rust::xxh3;

use crate::common::config::{BucketId, KeyType};

/// How a key is mapped onto a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashStrategy {
    /// `key mod capacity`, using the Euclidean remainder so negative keys
    /// still land in `0..capacity`.
    #[default]
    Modular,
    /// xxh3 over the key's little-endian bytes, then `mod capacity`.
    Xxh3,
}

/// Maps keys to bucket indices for a table with a fixed bucket count.
#[derive(Debug, Clone, Copy)]
pub struct HashFunction {
    strategy: HashStrategy,
}

impl HashFunction {
    /// Creates a new `HashFunction`.
    ///
    /// # Returns
    /// A new `HashFunction` instance using `strategy`.
    pub fn new(strategy: HashStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> HashStrategy {
        self.strategy
    }

    /// Returns the hash value of the given key.
    ///
    /// # Parameters
    /// - `key`: The key to be hashed.
    ///
    /// # Returns
    /// The hashed value. For `Modular` this is the key itself, sign-extended.
    pub fn get_hash(&self, key: KeyType) -> i64 {
        match self.strategy {
            HashStrategy::Modular => i64::from(key),
            HashStrategy::Xxh3 => {
                let mut hasher = xxh3::Xxh3::new();
                hasher.write(&key.to_le_bytes());
                // Keep the top bit clear so the value stays non-negative.
                (hasher.finish() >> 1) as i64
            }
        }
    }

    /// Returns the bucket that owns `key` in a table of `capacity` buckets.
    ///
    /// `capacity` must be at least 1; the table guarantees this from construction.
    pub fn bucket_index(&self, key: KeyType, capacity: usize) -> BucketId {
        debug_assert!(capacity >= 1);
        self.get_hash(key).rem_euclid(capacity as i64) as BucketId
    }
}

impl Default for HashFunction {
    fn default() -> Self {
        Self::new(HashStrategy::default())
    }
}
