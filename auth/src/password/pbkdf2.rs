use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 20;
const ITERATIONS: u32 = 10_000;

/// Password hashing implementation.
///
/// Derives a digest with PBKDF2-HMAC-SHA256 over a random per-password salt
/// and stores `salt || digest` as a single base64 string.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Base64-encoded `salt || digest` string
    pub fn hash(&self, password: &str) -> String {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let mut digest = [0u8; DIGEST_LEN];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, ITERATIONS, &mut digest);

        let mut encoded = [0u8; SALT_LEN + DIGEST_LEN];
        encoded[..SALT_LEN].copy_from_slice(&salt);
        encoded[SALT_LEN..].copy_from_slice(&digest);
        BASE64.encode(encoded)
    }

    /// Verify a password against a stored hash.
    ///
    /// Re-derives the digest with the salt extracted from the stored value
    /// and compares in constant time. Any malformed stored value verifies
    /// as false rather than erroring.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored` - Stored base64 `salt || digest` string
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let decoded = match BASE64.decode(stored) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        if decoded.len() != SALT_LEN + DIGEST_LEN {
            return false;
        }

        let (salt, expected) = decoded.split_at(SALT_LEN);
        let mut digest = [0u8; DIGEST_LEN];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut digest);

        bool::from(digest[..].ct_eq(expected))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let encoded = hasher.hash(password);

        assert!(hasher.verify(password, &encoded));
        assert!(!hasher.verify("wrong_password", &encoded));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same_password");
        let second = hasher.hash("same_password");

        // Fresh salt per hash, so encodings differ while both verify
        assert_ne!(first, second);
        assert!(hasher.verify("same_password", &first));
        assert!(hasher.verify("same_password", &second));
    }

    #[test]
    fn test_verify_malformed_stored_value() {
        let hasher = PasswordHasher::new();

        // Not base64 at all
        assert!(!hasher.verify("password", "not!base64!"));
        // Valid base64 but wrong length
        assert!(!hasher.verify("password", &BASE64.encode([0u8; 4])));
        // Empty stored value
        assert!(!hasher.verify("password", ""));
    }
}
