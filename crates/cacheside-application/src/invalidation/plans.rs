//! Entity-to-namespace invalidation plans

use super::InvalidationRequest;
use crate::keys::{ALL_USERS_FRAGMENT, namespaces};

/// Something whose change makes cached views stale
pub trait CacheDependents {
    /// Evictions required once the change has committed
    fn invalidation_requests(&self) -> Vec<InvalidationRequest>;
}

impl CacheDependents for InvalidationRequest {
    fn invalidation_requests(&self) -> Vec<InvalidationRequest> {
        vec![self.clone()]
    }
}

impl CacheDependents for [InvalidationRequest] {
    fn invalidation_requests(&self) -> Vec<InvalidationRequest> {
        self.to_vec()
    }
}

/// A committed task write
///
/// Listings are always evicted. A known task id evicts its detail and
/// status views; every affected user (previous and new assignee) evicts
/// that user's task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChange {
    task_id: Option<String>,
    user_ids: Vec<String>,
}

impl TaskChange {
    /// A change with no known task id or users (e.g. bulk import)
    pub fn new() -> Self {
        Self::default()
    }

    /// A change to one task
    pub fn task(task_id: impl Into<String>) -> Self {
        Self::new().with_task(task_id)
    }

    /// Set the changed task
    pub fn with_task(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Add an affected user; duplicates are ignored
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        if !self.user_ids.contains(&user_id) {
            self.user_ids.push(user_id);
        }
        self
    }

    /// Add an affected user if one is known
    pub fn with_optional_user(self, user_id: Option<impl Into<String>>) -> Self {
        match user_id {
            Some(user_id) => self.with_user(user_id),
            None => self,
        }
    }
}

impl CacheDependents for TaskChange {
    fn invalidation_requests(&self) -> Vec<InvalidationRequest> {
        let mut requests = vec![
            InvalidationRequest::namespace(namespaces::TASKS_ALL),
            InvalidationRequest::namespace(namespaces::TASKS_TITLES),
        ];

        if let Some(task_id) = &self.task_id {
            requests.push(InvalidationRequest::entity(namespaces::TASK, task_id.clone()));
            requests.push(InvalidationRequest::entity(
                namespaces::TASKS_STATUS,
                task_id.clone(),
            ));
        }

        requests.extend(
            self.user_ids.iter().map(|user_id| {
                InvalidationRequest::entity(namespaces::TASKS_USER, user_id.clone())
            }),
        );
        requests
    }
}

/// A committed user write (role change, account deletion)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChange {
    user_id: Option<String>,
}

impl UserChange {
    /// A change to one user
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }
}

impl CacheDependents for UserChange {
    fn invalidation_requests(&self) -> Vec<InvalidationRequest> {
        let mut requests = vec![InvalidationRequest::entity(
            namespaces::USERS,
            ALL_USERS_FRAGMENT,
        )];
        if let Some(user_id) = &self.user_id {
            requests.push(InvalidationRequest::entity(
                namespaces::USER_PROFILE,
                user_id.clone(),
            ));
        }
        requests
    }
}
