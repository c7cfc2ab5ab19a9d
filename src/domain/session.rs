//! The explicit login session.
//!
//! Created from a successful login and passed into each wizard at
//! construction; there is no process-wide user store. Dropping the session
//! (logout or process exit) ends it.

use crate::domain::entities::{AuthenticatedUser, LoginRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: LoginRole,
}

impl Session {
    pub fn from_login(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == LoginRole::Admin
    }
}
