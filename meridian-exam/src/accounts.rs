use crate::models::{Role, User, UserAccount};
use uuid::Uuid;

/// Built-in administrator accepted even when absent from the directory.
const DEFAULT_ADMIN_EMAIL: &str = "admin@exam.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Registered user accounts for the exam app.
///
/// Login is a plaintext comparison against the stored password; hashing is
/// out of scope for this system.
#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: Vec<UserAccount>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_accounts(accounts: Vec<UserAccount>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &[UserAccount] {
        &self.accounts
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.accounts.iter().find(|a| a.id == id).map(User::from)
    }

    /// Register a new student account; duplicate emails are rejected.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AccountError::MissingFields);
        }
        if self.accounts.iter().any(|a| a.email == email) {
            return Err(AccountError::EmailTaken(email.to_string()));
        }
        let account = UserAccount {
            id: meridian_core::ids::new_entity_id(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            role: Role::Student,
        };
        let user = User::from(&account);
        self.accounts.push(account);
        tracing::info!(email = %user.email, "account registered");
        Ok(user)
    }

    /// Authenticate by email and password.
    ///
    /// The default administrator credentials are honoured even when the
    /// directory holds no such account.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AccountError> {
        if let Some(account) = self
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
        {
            return Ok(User::from(account));
        }

        if email == DEFAULT_ADMIN_EMAIL && password == DEFAULT_ADMIN_PASSWORD {
            return Ok(User {
                id: Uuid::nil(),
                name: "Administrator".to_string(),
                email: email.to_string(),
                role: Role::Admin,
            });
        }

        Err(AccountError::InvalidCredentials)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Name, email and password are required")]
    MissingFields,

    #[error("An account already exists for {0}")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_login() {
        let mut directory = AccountDirectory::new();
        let user = directory
            .register("Dana Kim", "dana@example.com", "hunter2")
            .unwrap();
        assert_eq!(user.role, Role::Student);

        let logged_in = directory.login("dana@example.com", "hunter2").unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut directory = AccountDirectory::new();
        directory
            .register("Dana Kim", "dana@example.com", "hunter2")
            .unwrap();
        let err = directory
            .register("Other Dana", "dana@example.com", "different")
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken(_)));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let mut directory = AccountDirectory::new();
        directory
            .register("Dana Kim", "dana@example.com", "hunter2")
            .unwrap();
        assert!(matches!(
            directory.login("dana@example.com", "wrong"),
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_default_admin_login() {
        let directory = AccountDirectory::new();
        let admin = directory.login("admin@exam.com", "admin123").unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(matches!(
            directory.login("admin@exam.com", "nope"),
            Err(AccountError::InvalidCredentials)
        ));
    }
}
