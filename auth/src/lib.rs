//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (PBKDF2 with per-password random salt)
//! - JWT token generation and validation
//! - Authentication coordination
//!
//! The service defines its own claims type and adapts these implementations.
//! This keeps token payloads a service-level concern while reusing the
//! cryptographic plumbing.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let encoded = hasher.hash("my_password");
//! assert!(hasher.verify("my_password", &encoded));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Claims {
//!     sub: i64,
//!     exp: i64,
//! }
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.encode(&Claims { sub: 7, exp: i64::MAX }).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, 7);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordHasher;
