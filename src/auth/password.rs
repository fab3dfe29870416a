//! Password credential hashing.
//!
//! The sign-in endpoint expects the lowercase hex MD5 digest of the password.
//! The raw password is hashed at construction time and never stored.

use md5::{Digest, Md5};

/// Lowercase hex MD5 digest of `password`.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
