use crate::core::error::{AppError, Result};

/// Salted bcrypt hashing, run on the blocking pool so request tasks never stall
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Returns `Ok(false)` on mismatch; a malformed stored hash is an internal error
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let passwords = PasswordService::new(4);
        let hash = passwords.hash("s3cret-pass").await.unwrap();

        assert_ne!(hash, "s3cret-pass");
        assert!(passwords.verify("s3cret-pass", &hash).await.unwrap());
        assert!(!passwords.verify("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let passwords = PasswordService::new(4);
        let first = passwords.hash("same").await.unwrap();
        let second = passwords.hash("same").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_verify_accepts_legacy_2a_hashes() {
        let passwords = PasswordService::new(4);
        let hash = bcrypt::hash_with_result("legacy", 4)
            .unwrap()
            .format_for_version(bcrypt::Version::TwoA);
        assert!(passwords.verify("legacy", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_internal_error() {
        let passwords = PasswordService::new(4);
        assert!(matches!(
            passwords.verify("x", "not-a-hash").await,
            Err(AppError::Internal(_))
        ));
    }
}
