//! Session handling: registration, login, logout, and command guards
//!
//! The session is an explicit object owned by the command dispatcher and
//! passed into handlers; there is no ambient auth state. Passwords are
//! stored as salted SHA-256 digests — demo-grade hashing, but every
//! account (the seeded admin included) goes through the same
//! hash-and-verify path, so no plaintext comparison exists anywhere.

use crate::config::AdminConfig;
use crate::error::{Result, OpdeckError};
use crate::store::types::{Role, SessionUser, User};
use crate::store::UserRepository;
use chrono::Utc;
use rand::RngCore;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

/// Email shape accepted at registration
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Minimum password length accepted at registration
const MIN_PASSWORD_LEN: usize = 8;

/// Session manager over the user repository
pub struct SessionManager {
    users: Arc<dyn UserRepository>,
}

impl SessionManager {
    /// Create a manager over the given repository
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Seed the admin account if it is not present yet
    ///
    /// The admin is a regular record in the user list, distinguished only
    /// by its role and its configured email. Its initial password comes
    /// from `OPDECK_ADMIN_PASSWORD` or the configured fallback.
    pub fn ensure_admin(&self, admin: &AdminConfig) -> Result<()> {
        let mut users = self.users.load_all()?;
        if users.iter().any(|u| u.email == admin.email) {
            return Ok(());
        }

        tracing::info!("Seeding admin account {}", admin.email);
        let salt = generate_salt();
        let password_hash = hash_password(&admin.initial_password(), &salt);
        users.push(User {
            id: Uuid::new_v4().to_string(),
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            salt,
            role: Role::Admin,
            created_at: Utc::now(),
        });
        self.users.save_all(&users)
    }

    /// Register a new account
    ///
    /// Validation mirrors the registration form: all fields required,
    /// matching passwords, minimum length, email shape, and no duplicate
    /// username or email.
    ///
    /// # Errors
    ///
    /// Returns `OpdeckError::Validation` describing the first failed rule
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<SessionUser> {
        if username.trim().is_empty()
            || email.trim().is_empty()
            || password.is_empty()
            || confirm_password.is_empty()
        {
            return Err(OpdeckError::Validation("All fields are required".to_string()).into());
        }

        if password != confirm_password {
            return Err(OpdeckError::Validation("Passwords do not match".to_string()).into());
        }

        if password.len() < MIN_PASSWORD_LEN {
            return Err(OpdeckError::Validation(
                "Password must be at least 8 characters long".to_string(),
            )
            .into());
        }

        let email_re = Regex::new(EMAIL_PATTERN)
            .map_err(|e| OpdeckError::Validation(format!("Invalid email pattern: {}", e)))?;
        if !email_re.is_match(email) {
            return Err(OpdeckError::Validation(
                "Please enter a valid email address".to_string(),
            )
            .into());
        }

        let mut users = self.users.load_all()?;
        if users
            .iter()
            .any(|u| u.username == username || u.email == email)
        {
            return Err(
                OpdeckError::Validation("Username or email already exists".to_string()).into(),
            );
        }

        let salt = generate_salt();
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password, &salt),
            salt,
            role: Role::User,
            created_at: Utc::now(),
        };
        let sanitized = user.sanitized();

        users.push(user);
        self.users.save_all(&users)?;
        tracing::debug!("Registered user {}", username);
        Ok(sanitized)
    }

    /// Log in with a username or email plus password
    ///
    /// Scans the persisted user list for a matching identifier and
    /// verifies the password against the stored digest. On success the
    /// sanitized session record is written.
    ///
    /// # Errors
    ///
    /// Returns `OpdeckError::Auth` when no account matches
    pub fn login(&self, identifier: &str, password: &str) -> Result<SessionUser> {
        let users = self.users.load_all()?;
        let found = users
            .iter()
            .find(|u| (u.username == identifier || u.email == identifier)
                && verify_password(password, &u.salt, &u.password_hash));

        match found {
            Some(user) => {
                let session = user.sanitized();
                self.users.save_session(&session)?;
                tracing::debug!("Session opened for {}", session.username);
                Ok(session)
            }
            None => Err(OpdeckError::Auth("Invalid username or password".to_string()).into()),
        }
    }

    /// Clear the session record; logging out while logged out is a no-op
    pub fn logout(&self) -> Result<()> {
        self.users.clear_session()
    }

    /// Read the current session record; absence means unauthenticated
    pub fn current_user(&self) -> Result<Option<SessionUser>> {
        self.users.session()
    }

    /// Guard: require a logged-in session
    ///
    /// Every protected command calls this before doing anything, the CLI
    /// analog of redirecting an unauthenticated view to login.
    pub fn require_user(&self) -> Result<SessionUser> {
        self.current_user()?
            .ok_or_else(|| OpdeckError::LoginRequired.into())
    }

    /// Guard: require a logged-in admin session
    pub fn require_admin(&self) -> Result<SessionUser> {
        let session = self.require_user()?;
        if !session.is_admin() {
            return Err(OpdeckError::AdminRequired.into());
        }
        Ok(session)
    }
}

/// Generate a fresh random salt (hex)
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    to_hex(&bytes)
}

/// Salted SHA-256 digest of a password (hex)
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    to_hex(hasher.finalize().as_slice())
}

/// Verify a password against a stored salt and digest
pub fn verify_password(password: &str, salt: &str, expected: &str) -> bool {
    hash_password(password, salt) == expected
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
