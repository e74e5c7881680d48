use std::{path::PathBuf, time::Duration};

use pretty_assertions::assert_eq;
use taz_storage_contracts::StorageService;
use taz_storage_impl::{FileStorage, MemoryStorage};

macro_rules! storage_tests {
    ($($backend:ident => $setup:expr;)*) => {
        $(
            mod $backend {
                use super::*;

                #[tokio::test]
                async fn get() {
                    test_get(&$setup).await;
                }

                #[tokio::test]
                async fn set_no_ttl() {
                    test_set_no_ttl(&$setup).await;
                }

                #[tokio::test]
                async fn set_ttl() {
                    test_set_ttl(&$setup).await;
                }

                #[tokio::test]
                async fn remove() {
                    test_remove(&$setup).await;
                }

                #[tokio::test]
                async fn keys_and_clear() {
                    test_keys_and_clear(&$setup).await;
                }
            }
        )*
    };
}

storage_tests! {
    memory => MemoryStorage::new();
    file => FileStorage::new(temp_path("file"));
}

async fn test_get(storage: &impl StorageService) {
    storage
        .set("foo", &"hello world".to_owned(), None)
        .await
        .unwrap();
    storage.set("bar", &42i32, None).await.unwrap();

    let foo = storage.get::<String>("foo").await.unwrap();
    let bar = storage.get::<i32>("bar").await.unwrap();
    let baz = storage.get::<char>("baz").await.unwrap();

    assert_eq!(foo.unwrap(), "hello world");
    assert_eq!(bar.unwrap(), 42);
    assert_eq!(baz, None);
}

async fn test_set_no_ttl(storage: &impl StorageService) {
    assert_eq!(storage.get::<Vec<i64>>("foo").await.unwrap(), None);

    storage.set("foo", &vec![1i64, 3, 3, 7], None).await.unwrap();
    assert_eq!(
        storage.get::<Vec<i64>>("foo").await.unwrap().unwrap(),
        [1, 3, 3, 7]
    );

    storage.set("foo", &vec![4i64, 2], None).await.unwrap();
    assert_eq!(storage.get::<Vec<i64>>("foo").await.unwrap().unwrap(), [4, 2]);

    assert!(storage.get::<String>("foo").await.is_err());
}

async fn test_set_ttl(storage: &impl StorageService) {
    assert!(storage.get::<()>("x").await.unwrap().is_none());

    storage
        .set("x", &(), Some(Duration::from_millis(200)))
        .await
        .unwrap();
    assert!(storage.get::<()>("x").await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(storage.get::<()>("x").await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(storage.get::<()>("x").await.unwrap().is_none());
}

async fn test_remove(storage: &impl StorageService) {
    storage.set("x", &(), None).await.unwrap();
    assert!(storage.get::<()>("x").await.unwrap().is_some());

    storage.remove("x").await.unwrap();
    assert!(storage.get::<()>("x").await.unwrap().is_none());

    storage.remove("x").await.unwrap();
}

async fn test_keys_and_clear(storage: &impl StorageService) {
    storage.set("b", &1, None).await.unwrap();
    storage.set("a", &2, None).await.unwrap();
    storage
        .set("c", &3, Some(Duration::from_millis(1)))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(storage.keys().await.unwrap(), ["a", "b"]);
    storage.ping().await.unwrap();

    storage.clear().await.unwrap();
    assert_eq!(storage.keys().await.unwrap(), Vec::<String>::new());
}

#[tokio::test]
async fn file_survives_reopen() {
    let path = temp_path("reopen");

    FileStorage::new(&path)
        .set("history", &vec![1i64, 2], None)
        .await
        .unwrap();

    let reopened = FileStorage::new(&path);
    assert_eq!(
        reopened.get::<Vec<i64>>("history").await.unwrap(),
        Some(vec![1, 2])
    );

    reopened.clear().await.unwrap();
}

#[tokio::test]
async fn file_corrupted() {
    let path = temp_path("corrupted");
    tokio::fs::create_dir_all(path.parent().unwrap())
        .await
        .unwrap();
    tokio::fs::write(&path, "{ not json").await.unwrap();
    let storage = FileStorage::new(&path);

    assert!(storage.get::<Vec<i64>>("history").await.is_err());
    assert!(storage.set("history", &vec![1i64], None).await.is_err());

    // clearing recovers a corrupted file
    storage.clear().await.unwrap();
    storage.set("history", &vec![1i64], None).await.unwrap();
    assert_eq!(
        storage.get::<Vec<i64>>("history").await.unwrap(),
        Some(vec![1])
    );
}

#[tokio::test]
async fn file_missing_directory() {
    let path = temp_path("missing").join("nested").join("storage.json");
    let storage = FileStorage::new(&path);

    assert_eq!(storage.keys().await.unwrap(), Vec::<String>::new());
    storage.set("x", &true, None).await.unwrap();
    assert!(path.exists());
}

fn temp_path(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir()
        .join(format!("taz-storage-test-{}", std::process::id()))
        .join(format!("{name}-{nanos}.json"))
}
