mod entity_cache;

pub use entity_cache::EntityCache;

use crate::model::{Repository, User};

/// Lookups memoized for one report run.
#[derive(Default)]
pub struct Caches {
    pub users: EntityCache<User>,
    /// `None` records that the repository lookup matched nothing.
    pub repos: EntityCache<Option<Repository>>,
}

impl Caches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, user: User) {
        self.users.insert(user.phid.clone(), user);
    }
}
