/// Secure storage for the API access token
///
/// Uses OS-backed secure storage:
/// - macOS/iOS: Keychain
/// - Linux: Secret Service API (gnome-keyring, KWallet, etc.)
/// - Windows: Credential Manager
use keyring::Entry;
use std::fmt;

const SERVICE_NAME: &str = "com.courier.tui-client";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureKey {
    AccessToken,
}

impl SecureKey {
    fn key_name(&self) -> &'static str {
        match self {
            SecureKey::AccessToken => "access_token",
        }
    }
}

impl fmt::Display for SecureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key_name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SecureStorageError {
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(SecureKey),
}

pub struct SecureStorage;

impl SecureStorage {
    /// Store a secret value in secure storage
    pub fn set(key: SecureKey, value: &str) -> Result<(), SecureStorageError> {
        let entry = Entry::new(SERVICE_NAME, key.key_name())?;
        entry.set_password(value)?;
        Ok(())
    }

    /// Retrieve a secret value from secure storage
    pub fn get(key: SecureKey) -> Result<String, SecureStorageError> {
        let entry = Entry::new(SERVICE_NAME, key.key_name())?;
        match entry.get_password() {
            Ok(value) => Ok(value),
            Err(keyring::Error::NoEntry) => Err(SecureStorageError::KeyNotFound(key)),
            Err(e) => Err(SecureStorageError::Keyring(e)),
        }
    }

    /// Delete a secret value from secure storage
    pub fn delete(key: SecureKey) -> Result<(), SecureStorageError> {
        let entry = Entry::new(SERVICE_NAME, key.key_name())?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted is success
            Err(e) => Err(SecureStorageError::Keyring(e)),
        }
    }

    /// Check if a key exists in secure storage
    pub fn exists(key: SecureKey) -> bool {
        Self::get(key).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires an OS keyring service
    fn set_get_delete_round_trip() {
        SecureStorage::set(SecureKey::AccessToken, "test-token").unwrap();
        assert_eq!(
            SecureStorage::get(SecureKey::AccessToken).unwrap(),
            "test-token"
        );
        SecureStorage::delete(SecureKey::AccessToken).unwrap();
        assert!(!SecureStorage::exists(SecureKey::AccessToken));
    }

    #[test]
    #[ignore] // Requires an OS keyring service
    fn delete_missing_key_is_not_an_error() {
        SecureStorage::delete(SecureKey::AccessToken).unwrap();
        SecureStorage::delete(SecureKey::AccessToken).unwrap();
    }
}
