//! Key catalog of the cached read models
//!
//! Read paths build their keys here and write paths invalidate the same
//! namespaces through [`crate::invalidation`], so the two never drift.
//!
//! | Read model | Key | TTL |
//! |------------|-----|-----|
//! | task page | `tasks:all:page=<p>:limit=<l>` | 60 s |
//! | task title page | `tasks:titles:page=<p>:limit=<l>` | 5 min |
//! | task by id | `task:<id>` | 60 s |
//! | task status | `tasks:status:<id>` | 3 min |
//! | tasks of a user | `tasks:user:<user_id>` | 60 s |
//! | all users | `users:all` | 5 min |
//! | user profile | `user:profile:<user_id>` | 60 s |

use cacheside_domain::Namespace;
use std::time::Duration;

/// Namespace names (without the trailing separator)
pub mod namespaces {
    pub const TASKS_ALL: &str = "tasks:all";
    pub const TASKS_TITLES: &str = "tasks:titles";
    pub const TASK: &str = "task";
    pub const TASKS_STATUS: &str = "tasks:status";
    pub const TASKS_USER: &str = "tasks:user";
    pub const USERS: &str = "users";
    pub const USER_PROFILE: &str = "user:profile";
}

/// Fragment of the `users` namespace holding the full user list
pub const ALL_USERS_FRAGMENT: &str = "all";

fn page_fragment(page: u32, limit: u32) -> String {
    format!("page={page}:limit={limit}")
}

/// Keys and TTLs of task read models
pub struct TaskKeys;

impl TaskKeys {
    pub const PAGE_TTL: Duration = Duration::from_secs(60);
    pub const TITLES_TTL: Duration = Duration::from_secs(5 * 60);
    pub const BY_ID_TTL: Duration = Duration::from_secs(60);
    pub const STATUS_TTL: Duration = Duration::from_secs(3 * 60);
    pub const FOR_USER_TTL: Duration = Duration::from_secs(60);

    /// Paginated task listing
    pub fn page(page: u32, limit: u32) -> String {
        Namespace::new(namespaces::TASKS_ALL).key(&page_fragment(page, limit))
    }

    /// Paginated task title listing
    pub fn titles_page(page: u32, limit: u32) -> String {
        Namespace::new(namespaces::TASKS_TITLES).key(&page_fragment(page, limit))
    }

    /// Single task
    pub fn by_id(task_id: &str) -> String {
        Namespace::new(namespaces::TASK).key(task_id)
    }

    /// Status of a single task
    pub fn status(task_id: &str) -> String {
        Namespace::new(namespaces::TASKS_STATUS).key(task_id)
    }

    /// Tasks assigned to a user
    pub fn for_user(user_id: &str) -> String {
        Namespace::new(namespaces::TASKS_USER).key(user_id)
    }
}

/// Keys and TTLs of user read models
pub struct UserKeys;

impl UserKeys {
    pub const ALL_TTL: Duration = Duration::from_secs(5 * 60);
    pub const PROFILE_TTL: Duration = Duration::from_secs(60);

    /// Full user list
    pub fn all() -> String {
        Namespace::new(namespaces::USERS).key(ALL_USERS_FRAGMENT)
    }

    /// Profile of a single user
    pub fn profile(user_id: &str) -> String {
        Namespace::new(namespaces::USER_PROFILE).key(user_id)
    }
}
