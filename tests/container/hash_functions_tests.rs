use chainkv::container::hash_function::{HashFunction, HashStrategy};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_function() {
        let hash_function = HashFunction::new(HashStrategy::Xxh3);
        let hash = hash_function.get_hash(42);
        assert_ne!(hash, 0);
        assert_ne!(hash, hash_function.get_hash(43));
    }

    #[test]
    fn test_default_is_modular() {
        let hash_function = HashFunction::default();
        assert_eq!(hash_function.strategy(), HashStrategy::Modular);
        assert_eq!(hash_function.get_hash(-9), -9);
        assert_eq!(hash_function.bucket_index(-9, 4), 3);
    }

    #[test]
    fn test_xxh3_spreads_sequential_keys() {
        let hash_function = HashFunction::new(HashStrategy::Xxh3);
        let capacity = 64;
        let mut used = vec![false; capacity];
        for key in 0..1024 {
            used[hash_function.bucket_index(key, capacity)] = true;
        }
        assert!(used.iter().all(|&hit| hit));
    }
}
