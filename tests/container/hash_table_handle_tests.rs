use chainkv::common::exception::HashTableError;
use chainkv::container::hash_table_handle::HashTableHandle;

use crate::common::logger::init_test_logger;
use crate::{assert_err, assert_ok};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_lifecycle() {
        init_test_logger();
        let mut ht = HashTableHandle::new();
        assert_ok!(ht.allocate(10));

        assert_ok!(ht.put(0, -1));
        assert_ok!(ht.put(1, -100));
        assert_ok!(ht.put(1, -10));

        let mut values = vec![0; 1];
        let mut num_results = assert_ok!(ht.get(1, &mut values));
        if num_results > values.len() {
            values.resize(num_results, 0);
            num_results = assert_ok!(ht.get(1, &mut values));
        }
        assert_eq!(num_results, 2);
        assert_eq!(values, vec![-100, -10]);

        assert_eq!(assert_ok!(ht.erase(0)), 1);
        assert_eq!(assert_ok!(ht.count(0)), 0);

        assert_eq!(assert_ok!(ht.deallocate()), 2);
        assert_err!(ht.deallocate(), HashTableError::InvalidArgument(_));
        assert_err!(ht.put(1, 1), HashTableError::InvalidArgument(_));
    }

    #[test]
    fn test_never_allocated_handle() {
        let mut ht = HashTableHandle::default();
        let mut values = [0; 4];
        assert_err!(ht.get(0, &mut values), HashTableError::InvalidArgument(_));
        assert_err!(ht.erase(0), HashTableError::InvalidArgument(_));
        assert_err!(ht.deallocate(), HashTableError::InvalidArgument(_));
        assert_err!(ht.table(), HashTableError::InvalidArgument(_));
    }

    #[test]
    fn test_bad_arguments_on_live_handle() {
        let mut ht = HashTableHandle::new();
        assert_err!(ht.allocate(-1), HashTableError::InvalidArgument(_));
        assert_ok!(ht.allocate(1));
        assert_err!(ht.get(0, &mut []), HashTableError::InvalidArgument(_));
        assert_err!(ht.allocate(1), HashTableError::InvalidArgument(_));
        let table = assert_ok!(ht.table_mut());
        table.clear();
        assert!(ht.is_allocated());
    }
}
