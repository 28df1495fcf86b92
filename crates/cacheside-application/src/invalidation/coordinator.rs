use std::sync::Arc;

use tracing::{debug, warn};

use super::InvalidationRequest;
use super::plans::CacheDependents;
use crate::ports::services::CacheInvalidator;

/// An eviction that could not be carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationFailure {
    /// Request being executed
    pub request: InvalidationRequest,
    /// Rendered error
    pub error: String,
}

/// Outcome of one invalidation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidationReport {
    /// Keys removed, across exact deletes and namespace resets
    pub evicted: u64,
    /// Requests executed
    pub requests: usize,
    /// Failed evictions; the stale entries expire with their TTL
    pub failures: Vec<InvalidationFailure>,
}

impl InvalidationReport {
    /// True when every eviction succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Executes invalidation requests against the cache after a committed write
#[derive(Clone)]
pub struct InvalidationCoordinator {
    cache: Arc<dyn CacheInvalidator>,
}

impl InvalidationCoordinator {
    /// Create a coordinator over a cache
    pub fn new(cache: Arc<dyn CacheInvalidator>) -> Self {
        Self { cache }
    }

    /// Evict every cached view derived from `change`
    pub async fn invalidate_for<D: CacheDependents + ?Sized>(
        &self,
        change: &D,
    ) -> InvalidationReport {
        self.invalidate(change.invalidation_requests()).await
    }

    /// Execute `requests` in order, continuing past failures
    pub async fn invalidate<I>(&self, requests: I) -> InvalidationReport
    where
        I: IntoIterator<Item = InvalidationRequest>,
    {
        let mut report = InvalidationReport::default();

        for request in requests {
            report.requests += 1;

            if let Some(key) = request.entity_key() {
                match self.cache.delete_key(&key).await {
                    Ok(removed) => report.evicted += u64::from(removed),
                    Err(e) => {
                        warn!(
                            request = %request,
                            key = %key,
                            error = %e,
                            "cache key invalidation failed"
                        );
                        report.failures.push(InvalidationFailure {
                            request: request.clone(),
                            error: e.to_string(),
                        });
                    }
                }
            }

            let namespace = request.reset_namespace();
            match self.cache.reset_namespace(namespace.as_str()).await {
                Ok(deleted) => report.evicted += deleted,
                Err(e) => {
                    let evicted = e.partial_count().unwrap_or(0);
                    report.evicted += evicted;
                    warn!(
                        request = %request,
                        namespace = %namespace,
                        evicted,
                        error = %e,
                        "cache namespace invalidation failed"
                    );
                    report.failures.push(InvalidationFailure {
                        request,
                        error: e.to_string(),
                    });
                }
            }
        }

        debug!(
            requests = report.requests,
            evicted = report.evicted,
            failures = report.failures.len(),
            "cache invalidation finished"
        );
        report
    }
}

impl std::fmt::Debug for InvalidationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvalidationCoordinator").finish_non_exhaustive()
    }
}
