//! Username and password store, unrelated to account numbers

use crate::errors::LedgerErr;
use std::collections::HashMap;

/// Plain text credentials keyed by username
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: HashMap<String, String>,
}

impl UserStore {
    /// Register `username`. Existing user is never overwritten.
    pub fn create(&mut self, username: &str, password: &str) -> Result<(), LedgerErr> {
        if self.users.contains_key(username) {
            return Err(LedgerErr::UsernameTaken);
        }
        self.users.insert(username.to_owned(), password.to_owned());
        Ok(())
    }

    /// `true` only for a known user with exactly this password
    pub fn validate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .map_or(false, |stored| stored == password)
    }

    /// number of registered users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::UserStore;
    use crate::errors::LedgerErr;

    #[test]
    fn taken_username_keeps_first_password() {
        let mut users = UserStore::default();
        users.create("bob", "one").unwrap();

        assert_eq!(users.create("bob", "two"), Err(LedgerErr::UsernameTaken));
        assert!(users.validate("bob", "one"));
        assert!(!users.validate("bob", "two"));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn unknown_user_is_not_valid() {
        let users = UserStore::default();
        assert!(users.is_empty());
        assert!(!users.validate("nobody", ""));
    }
}
