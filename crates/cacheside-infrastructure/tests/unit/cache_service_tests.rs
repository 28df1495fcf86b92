//! Cache service behaviour against the in-memory backend

use async_trait::async_trait;
use cacheside_application::keys::TaskKeys;
use cacheside_application::{InvalidationCoordinator, TaskChange};
use cacheside_domain::{
    CacheBackend, CacheRead, CacheStore, Error, JsonCodec, Result, ValueCodec, build_key,
};
use cacheside_infrastructure::{CacheService, FailureMode};
use cacheside_providers::{MokaCacheStore, NullKeyScanner};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Task {
    id: String,
    title: String,
}

fn task(id: &str) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
    }
}

fn moka_service() -> (CacheService, MokaCacheStore) {
    let store = MokaCacheStore::new();
    (CacheService::new(store.backend()), store)
}

/// Store that fails every call with `BackendUnavailable`
#[derive(Debug)]
struct UnreachableStore;

#[async_trait]
impl CacheStore for UnreachableStore {
    async fn get_bytes(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(Error::backend_unavailable("connection refused"))
    }

    async fn set_bytes(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<()> {
        Err(Error::backend_unavailable("connection refused"))
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Err(Error::backend_unavailable("connection refused"))
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Err(Error::backend_unavailable("connection refused"))
    }

    fn provider_name(&self) -> &str {
        "unreachable"
    }
}

fn unreachable_service(mode: FailureMode) -> CacheService {
    CacheService::new(CacheBackend::new(
        Arc::new(UnreachableStore),
        Arc::new(NullKeyScanner),
    ))
    .with_failure_mode(mode)
}

/// Store that remembers the TTL of every write
#[derive(Debug, Default)]
struct TtlRecordingStore {
    ttls: Mutex<Vec<Duration>>,
}

#[async_trait]
impl CacheStore for TtlRecordingStore {
    async fn get_bytes(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set_bytes(&self, _key: &str, _value: &[u8], ttl: Duration) -> Result<()> {
        self.ttls.lock().unwrap().push(ttl);
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn provider_name(&self) -> &str {
        "ttl-recording"
    }
}

#[tokio::test]
async fn test_set_then_get_round_trips() {
    let (cache, _) = moka_service();
    cache.set("task:123", &task("123"), None).await.unwrap();

    let read: CacheRead<Task> = cache.get("task:123").await.unwrap();
    assert_eq!(read, CacheRead::Hit(task("123")));
    assert!(cache.exists("task:123").await.unwrap());
}

#[tokio::test]
async fn test_absent_key_is_a_miss_not_an_error() {
    let (cache, _) = moka_service();
    let read: CacheRead<Task> = cache.get("task:404").await.unwrap();
    assert!(read.is_miss());
    assert!(!cache.exists("task:404").await.unwrap());
    assert!(!cache.delete("task:404").await.unwrap());
}

#[tokio::test]
async fn test_entry_is_unreadable_after_ttl() {
    let (cache, _) = moka_service();
    cache
        .set("task:1", &task("1"), Some(Duration::from_millis(50)))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let read: CacheRead<Task> = cache.get("task:1").await.unwrap();
    assert!(read.is_miss());
}

#[tokio::test]
async fn test_missing_or_zero_ttl_uses_default() {
    let store = Arc::new(TtlRecordingStore::default());
    let cache = CacheService::new(CacheBackend::new(store.clone(), Arc::new(NullKeyScanner)));

    cache.set("a", &1, None).await.unwrap();
    cache.set("b", &2, Some(Duration::ZERO)).await.unwrap();
    cache.set("c", &3, Some(Duration::from_secs(60))).await.unwrap();
    cache
        .set("d", &4, CacheService::ttl_from_millis(-5))
        .await
        .unwrap();

    assert_eq!(
        *store.ttls.lock().unwrap(),
        vec![
            Duration::from_secs(300),
            Duration::from_secs(300),
            Duration::from_secs(60),
            Duration::from_secs(300),
        ]
    );
}

#[test]
fn test_ttl_from_millis() {
    assert_eq!(CacheService::ttl_from_millis(0), None);
    assert_eq!(CacheService::ttl_from_millis(-1), None);
    assert_eq!(
        CacheService::ttl_from_millis(1_500),
        Some(Duration::from_millis(1_500))
    );
}

#[tokio::test]
async fn test_wrap_calls_producer_once_for_repeated_reads() {
    let (cache, _) = moka_service();
    let key = TaskKeys::page(1, 5);
    assert_eq!(key, "tasks:all:page=1:limit=5");
    let calls = &AtomicUsize::new(0);

    for _ in 0..2 {
        let tasks: Vec<Task> = cache
            .wrap(
                &key,
                move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Error>(vec![task("1"), task("2")])
                },
                Some(TaskKeys::PAGE_TTL),
            )
            .await
            .unwrap();
        assert_eq!(tasks.len(), 2);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_wrap_does_not_cache_producer_errors() {
    let (cache, _) = moka_service();
    let key = TaskKeys::by_id("9");

    let err = cache
        .wrap(
            &key,
            || async { Err::<Task, _>(Error::not_found("task 9")) },
            None,
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(!cache.exists(&key).await.unwrap());
}

#[tokio::test]
async fn test_concurrent_cold_wraps_may_each_run_the_producer() {
    let (cache, _) = moka_service();
    let calls = &AtomicUsize::new(0);

    let wraps = (0..5).map(|_| {
        cache.wrap(
            "tasks:titles:page=1:limit=5",
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, Error>(vec!["a".to_string(), "b".to_string()])
            },
            None,
        )
    });
    let results = futures::future::join_all(wraps).await;

    for result in results {
        assert_eq!(result.unwrap(), vec!["a", "b"]);
    }
    // Every caller missed before the first write landed
    assert_eq!(calls.load(Ordering::SeqCst), 5);

    let read: CacheRead<Vec<String>> = cache.get("tasks:titles:page=1:limit=5").await.unwrap();
    assert!(read.is_hit());
}

#[tokio::test]
async fn test_backend_failure_is_an_error_not_a_miss() {
    let cache = unreachable_service(FailureMode::FailClosed);
    let err = cache.get::<Task>("task:1").await.unwrap_err();
    assert!(err.is_backend_unavailable());
    assert!(cache.exists("task:1").await.unwrap_err().is_backend_unavailable());
}

#[tokio::test]
async fn test_fail_closed_wrap_propagates_backend_failure() {
    let cache = unreachable_service(FailureMode::FailClosed);
    let calls = &AtomicUsize::new(0);

    let err = cache
        .wrap(
            "task:1",
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Error>(task("1"))
            },
            None,
        )
        .await
        .unwrap_err();

    assert!(err.is_backend_unavailable());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fail_open_wrap_serves_from_producer() {
    let cache = unreachable_service(FailureMode::FailOpen);

    let value = cache
        .wrap("task:1", || async { Ok::<_, Error>(task("1")) }, None)
        .await
        .unwrap();

    assert_eq!(value, task("1"));
}

#[tokio::test]
async fn test_corrupt_entry_is_recomputed_by_wrap() {
    let (cache, store) = moka_service();
    store
        .set_bytes("task:7", b"{not json", Duration::from_secs(60))
        .await
        .unwrap();

    let err = cache.get::<Task>("task:7").await.unwrap_err();
    assert!(matches!(err, Error::Codec { .. }));

    let value = cache
        .wrap("task:7", || async { Ok::<_, Error>(task("7")) }, None)
        .await
        .unwrap();
    assert_eq!(value, task("7"));
    assert_eq!(
        cache.get::<Task>("task:7").await.unwrap(),
        CacheRead::Hit(task("7"))
    );
}

#[tokio::test]
async fn test_reset_namespace_leaves_other_namespaces_alone() {
    let (cache, _) = moka_service();
    for key in [
        "tasks:all:page=1:limit=5",
        "tasks:all:page=2:limit=5",
        "tasks:titles:page=1:limit=5",
        "task:1",
        "tasks:allx",
    ] {
        cache.set(key, &1, None).await.unwrap();
    }

    assert_eq!(cache.reset_namespace("tasks:all").await.unwrap(), 2);
    assert!(!cache.exists("tasks:all:page=1:limit=5").await.unwrap());
    assert!(cache.exists("tasks:titles:page=1:limit=5").await.unwrap());
    assert!(cache.exists("task:1").await.unwrap());
    assert!(cache.exists("tasks:allx").await.unwrap());
}

#[tokio::test]
async fn test_reset_namespace_deletes_every_key_across_pages() {
    let store = MokaCacheStore::new();
    let cache = CacheService::new(store.backend()).with_scan_batch_size(2);
    for i in 0..7 {
        cache
            .set(&build_key("tasks:user:", &format!("u{i}")), &i, None)
            .await
            .unwrap();
    }

    assert_eq!(cache.reset_namespace("tasks:user").await.unwrap(), 7);
    assert_eq!(cache.reset_namespace("tasks:user").await.unwrap(), 0);
}

#[tokio::test]
async fn test_reset_of_empty_namespace_returns_zero() {
    let (cache, _) = moka_service();
    assert_eq!(cache.reset_namespace("users:all").await.unwrap(), 0);

    let err = cache.reset_namespace("").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_task_key_lifecycle() {
    let (cache, _) = moka_service();
    let key = build_key("task:", "123");
    assert_eq!(key, "task:123");

    cache.set(&key, &task("123"), None).await.unwrap();
    assert_eq!(cache.get::<Task>(&key).await.unwrap(), CacheRead::Hit(task("123")));

    assert_eq!(cache.reset_namespace("task").await.unwrap(), 1);
    assert!(cache.get::<Task>(&key).await.unwrap().is_miss());
}

#[tokio::test]
async fn test_coordinator_evicts_task_views_through_the_service() {
    let (cache, _) = moka_service();
    for key in [
        "tasks:all:page=1:limit=5",
        "tasks:titles:page=1:limit=5",
        "task:42",
        "task:42:comments",
        "tasks:status:42",
        "tasks:user:u1",
        "tasks:user:u2",
    ] {
        cache.set(key, &1, None).await.unwrap();
    }

    let coordinator = InvalidationCoordinator::new(Arc::new(cache.clone()));
    let report = coordinator
        .invalidate_for(&TaskChange::task("42").with_user("u1"))
        .await;

    assert!(report.is_clean());
    assert_eq!(report.evicted, 6);
    assert!(!cache.exists("task:42").await.unwrap());
    assert!(!cache.exists("tasks:status:42").await.unwrap());
    assert!(cache.exists("tasks:user:u2").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_resets_of_one_namespace_both_complete() {
    let (cache, _store) = moka_service();
    let cache = cache.with_scan_batch_size(3);
    for i in 0..20 {
        cache
            .set(&build_key("tasks:all:", &i.to_string()), &task("x"), None)
            .await
            .unwrap();
    }

    let (first, second) = tokio::join!(
        cache.reset_namespace("tasks:all"),
        cache.reset_namespace("tasks:all")
    );

    assert!(first.unwrap() + second.unwrap() >= 20);
    for i in 0..20 {
        let key = build_key("tasks:all:", &i.to_string());
        assert!(!cache.exists(&key).await.unwrap());
    }
}

/// JSON with the byte order reversed, so payloads are unreadable as plain JSON
#[derive(Debug, Clone, Copy)]
struct ReversedJsonCodec;

impl ValueCodec for ReversedJsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let mut bytes = JsonCodec.encode(value)?;
        bytes.reverse();
        Ok(bytes)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        let mut bytes = bytes.to_vec();
        bytes.reverse();
        JsonCodec.decode(&bytes)
    }

    fn name(&self) -> &'static str {
        "reversed-json"
    }
}

#[tokio::test]
async fn test_custom_codec_round_trips_and_owns_the_payload_format() {
    let (json_cache, store) = moka_service();
    let cache = json_cache.clone().with_codec(ReversedJsonCodec);

    cache.set("task:9", &task("9"), None).await.unwrap();
    assert_eq!(
        cache.get::<Task>("task:9").await.unwrap(),
        CacheRead::Hit(task("9"))
    );

    let raw = store.get_bytes("task:9").await.unwrap().unwrap();
    assert_eq!(raw.last(), Some(&b'{'));

    let err = json_cache.get::<Task>("task:9").await.unwrap_err();
    assert!(matches!(err, Error::Codec { .. }));

    let loaded = cache
        .wrap("task:9", || async { Ok::<_, Error>(task("other")) }, None)
        .await
        .unwrap();
    assert_eq!(loaded, task("9"));
}
