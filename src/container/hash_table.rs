use crate::common::config::{KeyType, ValueType};
use crate::common::exception::HashTableResult;

/// A hash table that keeps every value inserted under a key.
pub trait MultiValueHashTable {
    /// Inserts a key-value pair. Existing entries for `key` are kept.
    fn put(&mut self, key: KeyType, value: ValueType) -> HashTableResult<()>;

    /// Copies up to `values.len()` matches into `values` and returns the true
    /// match count.
    fn get(&self, key: KeyType, values: &mut [ValueType]) -> HashTableResult<usize>;

    fn count(&self, key: KeyType) -> usize;

    /// Removes every entry for `key`, returning how many were removed.
    fn erase(&mut self, key: KeyType) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetches every value for `key` using the two-phase protocol: probe the
    /// count, then re-fetch into a buffer of exactly that size.
    fn fetch_all(&self, key: KeyType) -> HashTableResult<Vec<ValueType>> {
        let mut values = vec![ValueType::default(); 1];
        let num_results = self.get(key, &mut values)?;
        if num_results > values.len() {
            values.resize(num_results, ValueType::default());
            self.get(key, &mut values)?;
        }
        values.truncate(num_results);
        Ok(values)
    }
}
