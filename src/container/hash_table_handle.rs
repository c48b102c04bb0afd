//! A nullable handle over [`ChainedHashTable`].
//!
//! The owned table makes "use after destroy" impossible by construction.
//! Callers that hold a table in a long-lived slot (a struct field, a registry
//! entry) use this handle instead: every operation on an empty handle, whether
//! it was never allocated or was already deallocated, is an `InvalidArgument`
//! rather than a panic.

use log::warn;

use crate::common::config::{HashTableConfig, KeyType, ValueType};
use crate::common::exception::{HashTableError, HashTableResult};
use crate::container::chained_hash_table::ChainedHashTable;

#[derive(Debug, Default)]
pub struct HashTableHandle {
    table: Option<ChainedHashTable>,
}

impl HashTableHandle {
    /// Creates an empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a table sized for `size_hint` elements into this handle.
    ///
    /// Fails with `InvalidArgument` if `size_hint < 1` or the handle already
    /// holds a live table. On failure the handle is left unchanged.
    pub fn allocate(&mut self, size_hint: i32) -> HashTableResult<()> {
        self.allocate_with_config(size_hint, HashTableConfig::default())
    }

    pub fn allocate_with_config(
        &mut self,
        size_hint: i32,
        config: HashTableConfig,
    ) -> HashTableResult<()> {
        if self.table.is_some() {
            warn!("Refusing to allocate over a live hash table handle");
            return Err(HashTableError::invalid_argument(
                "handle already holds an allocated table",
            ));
        }
        let size_hint = usize::try_from(size_hint).map_err(|_| {
            HashTableError::invalid_argument(format!(
                "size hint must be at least 1, got {}",
                size_hint
            ))
        })?;
        self.table = Some(ChainedHashTable::with_config(size_hint, config)?);
        Ok(())
    }

    pub fn put(&mut self, key: KeyType, value: ValueType) -> HashTableResult<()> {
        self.table_mut()?.put(key, value)
    }

    /// Two-phase lookup; see [`ChainedHashTable::get`].
    pub fn get(&self, key: KeyType, values: &mut [ValueType]) -> HashTableResult<usize> {
        self.table()?.get(key, values)
    }

    pub fn count(&self, key: KeyType) -> HashTableResult<usize> {
        Ok(self.table()?.count(key))
    }

    pub fn erase(&mut self, key: KeyType) -> HashTableResult<usize> {
        Ok(self.table_mut()?.erase(key))
    }

    /// Releases the table and empties the handle.
    ///
    /// # Returns
    ///
    /// The number of entries released, or `InvalidArgument` if the handle was
    /// already empty.
    pub fn deallocate(&mut self) -> HashTableResult<usize> {
        let table = self.table.take().ok_or_else(|| {
            warn!("Attempted to deallocate an empty hash table handle");
            HashTableError::invalid_argument("hash table is not allocated")
        })?;
        Ok(table.deallocate())
    }

    pub fn is_allocated(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> HashTableResult<&ChainedHashTable> {
        self.table
            .as_ref()
            .ok_or_else(|| HashTableError::invalid_argument("hash table is not allocated"))
    }

    pub fn table_mut(&mut self) -> HashTableResult<&mut ChainedHashTable> {
        self.table
            .as_mut()
            .ok_or_else(|| HashTableError::invalid_argument("hash table is not allocated"))
    }
}

impl From<ChainedHashTable> for HashTableHandle {
    fn from(table: ChainedHashTable) -> Self {
        Self { table: Some(table) }
    }
}
