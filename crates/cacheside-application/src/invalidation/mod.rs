//! Cache invalidation on the write path
//!
//! After a write commits, the domain service describes what changed
//! ([`TaskChange`], [`UserChange`], or raw [`InvalidationRequest`]s) and hands
//! it to the [`InvalidationCoordinator`]. Eviction failures are reported,
//! never raised: the write already happened and a stale entry is bounded by
//! its TTL.

mod coordinator;
mod plans;

pub use coordinator::{InvalidationCoordinator, InvalidationFailure, InvalidationReport};
pub use plans::{CacheDependents, TaskChange, UserChange};

use cacheside_domain::Namespace;
use std::fmt;

/// One eviction instruction produced by a domain write
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvalidationRequest {
    namespace: Namespace,
    entity_id: Option<String>,
}

impl InvalidationRequest {
    /// Evict every key under `namespace`
    pub fn namespace(namespace: impl Into<Namespace>) -> Self {
        Self {
            namespace: namespace.into(),
            entity_id: None,
        }
    }

    /// Evict the entry `"<namespace>:<id>"` and everything nested beneath it
    pub fn entity(namespace: impl Into<Namespace>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entity_id: Some(id.into()),
        }
    }

    /// Exact key to delete, for entity requests
    pub fn entity_key(&self) -> Option<String> {
        self.entity_id.as_deref().map(|id| self.namespace.key(id))
    }

    /// Namespace to reset: the entity's own sub-namespace, or the target itself
    pub fn reset_namespace(&self) -> Namespace {
        match &self.entity_id {
            Some(id) => self.namespace.child(id),
            None => self.namespace.clone(),
        }
    }
}

impl fmt::Display for InvalidationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entity_id {
            Some(id) => write!(f, "{}[{}]", self.namespace, id),
            None => write!(f, "{}", self.namespace),
        }
    }
}
