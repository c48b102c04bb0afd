//! In-memory multi-value key-value store on a fixed-size, separate-chaining
//! hash table.
//!
//! ```rust
//! use chainkv::container::chained_hash_table::ChainedHashTable;
//!
//! let mut ht = ChainedHashTable::allocate(10)?;
//! ht.put(1, -100)?;
//! ht.put(1, -10)?;
//!
//! let mut values = vec![0; 1];
//! let num_results = ht.get(1, &mut values)?;
//! if num_results > values.len() {
//!     values.resize(num_results, 0);
//!     ht.get(1, &mut values)?;
//! }
//! assert_eq!(values, vec![-100, -10]);
//!
//! ht.erase(1);
//! ht.deallocate();
//! # Ok::<(), chainkv::common::exception::HashTableError>(())
//! ```

pub mod common;
pub mod container;
