//! # Password hashing for stored accounts
//!
//! Every `password_hash` in the user store is an Argon2id PHC string
//! (`$argon2id$v=19$m=19456,t=2,p=1$...`). The algorithm and version are
//! pinned in [`hasher`] so a change to the crate default cannot silently
//! produce hashes of another kind.
//!
//! Comparison is exact: no trimming or case folding is applied to either side.
//!
//! Login for an unknown username still runs one verification through
//! [`verify_unknown_user`], so both credential failures cost the same.

use std::sync::OnceLock;

use argon2::{
    password_hash::{
        rand_core::OsRng, Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Hash a new account password.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(hasher().hash_password(password.as_bytes(), &salt)?.to_string())
}

/// `Ok(false)` on mismatch. `Err` only when `stored` is not a valid PHC string.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(stored)?;
    Ok(hasher().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Burn one verification against a throwaway hash. Always fails.
pub fn verify_unknown_user(password: &str) {
    static DECOY: OnceLock<Option<String>> = OnceLock::new();
    let decoy = DECOY.get_or_init(|| hash_password("no such user").ok());
    if let Some(decoy) = decoy {
        let _ = verify_password(password, decoy);
    }
}
