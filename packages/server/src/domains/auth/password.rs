use anyhow::{Context, Result};

/// bcrypt work factor; stored inside the hash, so verification needs no config
pub const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password for storage
///
/// bcrypt is CPU bound, so it runs on the blocking pool.
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .context("Password hashing task failed")?
        .context("Failed to hash password")
}

/// Compare a plaintext password against a stored bcrypt hash
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("Password verification task failed")?
        .context("Stored password hash is invalid")
}
