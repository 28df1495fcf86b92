//! Configuration loading tests
//!
//! `figment::Jail` isolates the working directory and environment of each
//! test, so these run safely alongside the rest of the suite.

use cacheside_infrastructure::config::{
    AppConfig, CacheProviderKind, ConfigLoader, FailureMode, validate_app_config,
};
use figment::Jail;
use std::time::Duration;

fn load(loader: &ConfigLoader) -> figment::error::Result<AppConfig> {
    loader.load().map_err(|e| e.to_string().into())
}

#[test]
fn test_defaults_without_file_or_env() {
    Jail::expect_with(|_jail| {
        let config = load(&ConfigLoader::new())?;

        assert!(config.cache.enabled);
        assert_eq!(config.cache.provider, CacheProviderKind::Redis);
        assert_eq!(config.cache.default_ttl(), Duration::from_secs(300));
        assert_eq!(config.cache.scan_batch_size, 100);
        assert_eq!(config.cache.failure_mode, FailureMode::FailClosed);
        assert_eq!(config.logging.level, "info");
        Ok(())
    });
}

#[test]
fn test_toml_file_is_picked_up_from_the_working_directory() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "cacheside.toml",
            r#"
                [cache]
                provider = "moka"
                default_ttl_ms = 60000
                max_capacity = 500

                [logging]
                level = "debug"
                json_format = true
            "#,
        )?;

        let config = load(&ConfigLoader::new())?;
        assert_eq!(config.cache.provider, CacheProviderKind::Moka);
        assert_eq!(config.cache.default_ttl_ms, 60_000);
        assert_eq!(config.cache.max_capacity, 500);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
        // Untouched keys keep their defaults
        assert_eq!(config.cache.operation_timeout_ms, 2_000);
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
                [cache]
                provider = "moka"
                default_ttl_ms = 60000
            "#,
        )?;
        jail.set_env("CACHESIDE_CACHE__DEFAULT_TTL_MS", "1000");
        jail.set_env("CACHESIDE_CACHE__FAILURE_MODE", "fail_open");
        jail.set_env("CACHESIDE_CACHE__REDIS_URL", "redis://cache.internal:6380");

        let loader = ConfigLoader::new().with_config_path("custom.toml");
        let config = load(&loader)?;
        assert_eq!(config.cache.provider, CacheProviderKind::Moka);
        assert_eq!(config.cache.default_ttl_ms, 1_000);
        assert_eq!(config.cache.failure_mode, FailureMode::FailOpen);
        assert_eq!(
            config.cache.redis_url.as_deref(),
            Some("redis://cache.internal:6380")
        );
        Ok(())
    });
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let err = ConfigLoader::new()
            .with_config_path("missing.toml")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
        Ok(())
    });
}

#[test]
fn test_zero_ttl_is_rejected_when_enabled() {
    Jail::expect_with(|jail| {
        jail.set_env("CACHESIDE_CACHE__DEFAULT_TTL_MS", "0");
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("TTL cannot be 0"));
        Ok(())
    });
}

#[test]
fn test_disabled_cache_skips_validation_and_resolves_to_null() {
    Jail::expect_with(|jail| {
        jail.set_env("CACHESIDE_CACHE__ENABLED", "false");
        jail.set_env("CACHESIDE_CACHE__DEFAULT_TTL_MS", "0");

        let config = load(&ConfigLoader::new())?;
        assert_eq!(config.cache.effective_provider(), CacheProviderKind::Null);
        Ok(())
    });
}

#[test]
fn test_validation_rules() {
    let mut config = AppConfig::default();
    config.cache.redis_url = Some(String::new());
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.cache.scan_batch_size = 0;
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.cache.operation_timeout_ms = 0;
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.logging.level = "loud".to_string();
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.cache.provider = CacheProviderKind::Moka;
    config.cache.redis_url = None;
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cacheside.toml");

    let mut config = AppConfig::default();
    config.cache.provider = CacheProviderKind::Moka;
    config.cache.scan_batch_size = 250;
    config.logging.json_format = true;

    let loader = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("CACHESIDE_SAVE_TEST");
    loader.save_to_file(&config, &path).unwrap();

    assert_eq!(loader.load().unwrap(), config);
}
