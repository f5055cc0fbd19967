// Challenge-response login hash.

use md5::{Digest, Md5};

/// Compute the login digest the switch expects.
///
/// The firmware hashes the byte concatenation
/// `challenge + username + password + challenge` with MD5 and compares
/// it against the submitted `Password` form field. The concatenation
/// order and the digest algorithm are fixed by the device; MD5 here is
/// wire compatibility, not a security choice.
pub fn login_hash(username: &str, password: &str, challenge: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(challenge.as_bytes());
    hasher.update(username.as_bytes());
    hasher.update(password.as_bytes());
    hasher.update(challenge.as_bytes());
    hex::encode(hasher.finalize())
}
