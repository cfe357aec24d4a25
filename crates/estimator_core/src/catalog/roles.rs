//! Static role table.

use super::seed;
use crate::model::role::Role;

/// Read-only role lookup with a designated default role.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: Vec<Role>,
    default_role_id: String,
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl RoleCatalog {
    /// Builds a catalog; `default_role_id` falls back to the first role when
    /// it is not in `roles`.
    pub fn new(roles: Vec<Role>, default_role_id: impl Into<String>) -> Self {
        Self {
            roles,
            default_role_id: default_role_id.into(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::roles(), seed::DEFAULT_ROLE_ID)
    }

    pub fn list(&self) -> &[Role] {
        &self.roles
    }

    pub fn get(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    pub fn default_role(&self) -> Option<&Role> {
        self.get(&self.default_role_id).or_else(|| self.roles.first())
    }

    /// Changes which role new personnel start with.
    pub fn set_default_role_id(&mut self, id: impl Into<String>) {
        self.default_role_id = id.into();
    }
}
