//! Concurrent map keyed by sealed binary keys.

use binkey::{BinaryKey, SealedKey, UnsealedKeyError};
use dashmap::DashMap;
use thiserror::Error;


/// Error for looking up a key in a [`KeyedStore`]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum StoreError {
    /// The key used for the lookup was not sealed
    #[error(transparent)]
    Unsealed(#[from] UnsealedKeyError),
    /// No value is stored under the key
    #[error("no value stored for key {0:?}")]
    NotFound(BinaryKey),
}

/// Concurrent map from [`BinaryKey`] to `V`
///
/// Every operation takes any [`SealedKey`], and fails without touching the map if it turns out
/// to be unsealed. Keys are matched by content, so a key rebuilt from the same fields finds the
/// same entry.
pub struct KeyedStore<V> {
    map: DashMap<BinaryKey, V>,
}

impl<V> KeyedStore<V> {
    pub fn new() -> Self {
        KeyedStore { map: DashMap::new() }
    }

    /// Store a value, returning the one it replaced, if any.
    pub fn put<K>(&self, key: &K, value: V) -> Result<Option<V>, UnsealedKeyError>
    where
        K: SealedKey + ?Sized,
    {
        let key = key.sealed_key()?;
        Ok(self.map.insert(key.clone(), value))
    }

    /// Get a clone of the value stored under a key.
    pub fn get<K>(&self, key: &K) -> Result<V, StoreError>
    where
        K: SealedKey + ?Sized,
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Apply a function to the value stored under a key, without cloning it
    ///
    /// The entry's shard is locked while `f` runs, so `f` must not access the store.
    pub fn get_with<K, R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Result<R, StoreError>
    where
        K: SealedKey + ?Sized,
    {
        let key = key.sealed_key()?;
        match self.map.get(key) {
            Some(entry) => Ok(f(entry.value())),
            None => Err(StoreError::NotFound(key.clone())),
        }
    }

    /// Remove and return the value stored under a key, if any.
    pub fn remove<K>(&self, key: &K) -> Result<Option<V>, UnsealedKeyError>
    where
        K: SealedKey + ?Sized,
    {
        let key = key.sealed_key()?;
        Ok(self.map.remove(key).map(|(_, value)| value))
    }

    pub fn contains<K>(&self, key: &K) -> Result<bool, UnsealedKeyError>
    where
        K: SealedKey + ?Sized,
    {
        Ok(self.map.contains_key(key.sealed_key()?))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&self) {
        self.map.clear();
    }
}

impl<V> Default for KeyedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    fn key(a: u32, b: u32) -> BinaryKey {
        let mut builder = BinaryKey::builder(8).unwrap();
        builder.write_u32(a).unwrap().write_u32(b).unwrap();
        builder.seal().unwrap()
    }

    #[test]
    fn put_then_get_by_rebuilt_key() {
        let store = KeyedStore::new();
        assert_eq!(store.put(&key(1, 2), "v1"), Ok(None));
        assert_eq!(store.get(&key(1, 2)), Ok("v1"));
        assert_eq!(store.put(&key(1, 2), "v2"), Ok(Some("v1")));
        assert_eq!(store.get(&key(1, 2)), Ok("v2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_with(&key(1, 2), |v| v.len()), Ok(2));
    }

    #[test]
    fn keys_differing_only_in_leading_bytes_are_distinct() {
        let store = KeyedStore::new();
        store.put(&key(1, 7), 'a').unwrap();
        store.put(&key(2, 7), 'b').unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&key(1, 7)), Ok('a'));
        assert_eq!(store.get(&key(2, 7)), Ok('b'));
    }

    #[test]
    fn unsealed_keys_rejected() {
        let store = KeyedStore::new();
        let mut builder = BinaryKey::builder(4).unwrap();
        builder.write_u32(9).unwrap();
        assert_eq!(store.put(&builder, 1), Err(UnsealedKeyError));
        assert_eq!(store.get(&builder), Err(StoreError::Unsealed(UnsealedKeyError)));
        assert_eq!(store.contains(&builder), Err(UnsealedKeyError));
        assert!(store.is_empty());

        let sealed = builder.seal().unwrap();
        assert_eq!(store.put(&builder, 1), Ok(None));
        assert_eq!(store.get(&sealed), Ok(1));
    }

    #[test]
    fn missing_and_removed() {
        let store = KeyedStore::new();
        assert_eq!(store.get(&key(0, 0)), Err::<u8, _>(StoreError::NotFound(key(0, 0))));
        store.put(&key(0, 0), 5u8).unwrap();
        assert_eq!(store.contains(&key(0, 0)), Ok(true));
        assert_eq!(store.remove(&key(0, 0)), Ok(Some(5)));
        assert_eq!(store.remove(&key(0, 0)), Ok(None));
        store.put(&key(0, 1), 6).unwrap();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_puts() {
        let store = Arc::new(KeyedStore::new());
        let joins = (0..4u32)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..250u32 {
                        store.put(&key(t, i), t * 1000 + i).unwrap();
                    }
                })
            })
            .collect::<Vec<_>>();
        for join in joins {
            join.join().unwrap();
        }
        assert_eq!(store.len(), 1000);
        assert_eq!(store.get(&key(3, 249)), Ok(3249));
    }
}
