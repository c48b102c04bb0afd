use crate::container::hash_function::HashStrategy;

pub type KeyType = i32; // key type stored by the hash table
pub type ValueType = i32; // value type stored by the hash table
pub type BucketId = usize; // index into the bucket array
pub type EntryId = usize; // index into the entry arena

/** Buckets allocated per expected element. */
pub const DEFAULT_BUCKET_MULTIPLIER: usize = 2;

/// Construction-time tuning for a `ChainedHashTable`.
///
/// The bucket count is fixed for the lifetime of the table at
/// `size_hint * bucket_multiplier`; nothing resizes it afterwards.
#[derive(Debug, Clone)]
pub struct HashTableConfig {
    pub bucket_multiplier: usize,
    pub hash_strategy: HashStrategy,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            bucket_multiplier: DEFAULT_BUCKET_MULTIPLIER,
            hash_strategy: HashStrategy::Modular,
        }
    }
}

impl HashTableConfig {
    pub fn with_bucket_multiplier(mut self, bucket_multiplier: usize) -> Self {
        self.bucket_multiplier = bucket_multiplier;
        self
    }

    pub fn with_hash_strategy(mut self, hash_strategy: HashStrategy) -> Self {
        self.hash_strategy = hash_strategy;
        self
    }
}
