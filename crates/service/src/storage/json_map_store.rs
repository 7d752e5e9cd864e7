use std::{collections::HashMap, hash::Hash, path::{Path, PathBuf}, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Persists a `HashMap<K, V>` to a JSON file. Every mutation rewrites the file
/// while the write lock is held, so the file never lags behind a newer snapshot.
#[derive(Clone)]
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, creating the file with an empty map if missing.
    /// A file that exists but does not parse is an error, not an empty store.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::store)?;
            }
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Store(format!("corrupt store file {}: {}", file_path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                write_file(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::store(e)),
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or update a value by key and persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        self.update_map(|m| {
            m.insert(key, value);
            Ok(())
        })
        .await
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        self.update_map(|m| Ok(m.remove(key).is_some())).await
    }

    /// Apply a mutation to the underlying map and persist before releasing the lock.
    /// If `f` or the write fails, the in-memory map is rolled back.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<R, ServiceError>,
    {
        let mut map = self.inner.write().await;
        let before = map.clone();
        let res = match f(&mut map) {
            Ok(out) => write_file(&self.file_path, &*map).await.map(|_| out),
            Err(e) => Err(e),
        };
        if res.is_err() {
            *map = before;
        }
        res
    }
}

async fn write_file<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(value).map_err(ServiceError::store)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, data).await.map_err(ServiceError::store)?;
    fs::rename(&tmp, path).await.map_err(ServiceError::store)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_store_path;

    #[tokio::test]
    async fn json_map_store_crud_persists() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("json_map_store");
        let store = JsonMapStore::<String, String>::new(&tmp).await?;

        assert!(store.values().await.is_empty());

        store.insert("a".into(), "1".into()).await?;
        store.insert("b".into(), "2".into()).await?;
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("1"));

        let touched = store
            .update_map(|m| Ok(m.get_mut("a").map(|v| *v = "10".into()).is_some()))
            .await?;
        assert!(touched);
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("10"));

        // remove and reload persistence
        assert!(store.remove(&"b".into()).await?);
        assert!(!store.remove(&"b".into()).await?);
        let reloaded = JsonMapStore::<String, String>::new(&tmp).await?;
        assert_eq!(reloaded.values().await, vec!["10".to_string()]);
        assert_eq!(reloaded.get(&"a".into()).await.as_deref(), Some("10"));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("json_map_store_corrupt");
        if let Some(parent) = tmp.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&tmp, b"{not json").await?;
        let res = JsonMapStore::<String, String>::new(&tmp).await;
        assert!(matches!(res, Err(ServiceError::Store(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_mutation_leaves_map_untouched() -> Result<(), anyhow::Error> {
        let tmp = temp_store_path("json_map_store_rollback");
        let store = JsonMapStore::<String, String>::new(&tmp).await?;
        store.insert("a".into(), "1".into()).await?;

        let res = store
            .update_map::<_, ()>(|_| Err(ServiceError::Validation("nope".into())))
            .await;
        assert!(res.is_err());
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("1"));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
