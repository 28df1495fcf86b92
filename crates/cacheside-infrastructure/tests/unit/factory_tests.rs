//! Backend factory tests

use cacheside_application::ports::registry::list_cache_providers;
use cacheside_domain::CacheRead;
use cacheside_infrastructure::config::{CacheConfig, CacheProviderKind, FailureMode};
use cacheside_infrastructure::{build_cache_service, create_backend};
use std::time::Duration;

#[test]
fn test_all_builtin_providers_are_registered() {
    let names: Vec<&str> = list_cache_providers()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["moka", "null", "redis"]);
}

#[tokio::test]
async fn test_disabled_cache_uses_null_backend() {
    let config = CacheConfig {
        enabled: false,
        provider: CacheProviderKind::Moka,
        ..CacheConfig::default()
    };
    let cache = build_cache_service(&config).unwrap();
    assert_eq!(cache.provider_name(), "null");

    cache.set("task:1", &"v", None).await.unwrap();
    assert!(cache.get::<String>("task:1").await.unwrap().is_miss());
}

#[tokio::test]
async fn test_moka_service_takes_tunables_from_config() {
    let config = CacheConfig {
        provider: CacheProviderKind::Moka,
        default_ttl_ms: 90_000,
        failure_mode: FailureMode::FailOpen,
        scan_batch_size: 3,
        ..CacheConfig::default()
    };
    let cache = build_cache_service(&config).unwrap();

    assert_eq!(cache.provider_name(), "moka");
    assert_eq!(cache.default_ttl(), Duration::from_secs(90));
    assert_eq!(cache.failure_mode(), FailureMode::FailOpen);

    cache.set("users:all", &vec!["u1"], None).await.unwrap();
    assert_eq!(
        cache.get::<Vec<String>>("users:all").await.unwrap(),
        CacheRead::Hit(vec!["u1".to_string()])
    );
}

#[test]
fn test_redis_backend_is_created_without_connecting() {
    let config = CacheConfig {
        redis_url: Some("redis://127.0.0.1:1".to_string()),
        ..CacheConfig::default()
    };
    let backend = create_backend(&config).unwrap();
    assert_eq!(backend.provider_name(), "redis");
    assert_eq!(backend.scanner.provider_name(), "redis");
}

#[test]
fn test_malformed_redis_url_fails_at_creation() {
    let config = CacheConfig {
        redis_url: Some("definitely not a url".to_string()),
        ..CacheConfig::default()
    };
    let err = create_backend(&config).unwrap_err();
    assert!(err.to_string().contains("redis"));
}
