//! Wallet password prompting and keystore decryption.

use std::path::Path;

use alloy_signer_local::PrivateKeySigner;
use dialoguer::Password as InputPassword;
use zeroize::Zeroizing;

use crate::error::Error;

/// Wallet password, wiped from memory on drop.
pub type Password = Zeroizing<String>;

/// Source of the wallet password.
pub trait PasswordPrompt: Send + Sync {
    /// Block until a password is available.
    ///
    /// # Errors
    ///
    /// [`Error::Decryption`] if the input stream closes or cannot be read.
    fn read_password(&self) -> Result<Password, Error>;
}

/// Non-echoing terminal prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&self) -> Result<Password, Error> {
        InputPassword::new()
            .with_prompt("Enter Password")
            .allow_empty_password(true)
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| Error::decryption_with("failed to read password", e))
    }
}

/// Decrypt a V3 JSON keystore into a signing identity.
///
/// # Errors
///
/// [`Error::Decryption`] on a wrong password or a missing/malformed file.
pub fn decrypt_wallet(path: &Path, password: &Password) -> Result<PrivateKeySigner, Error> {
    PrivateKeySigner::decrypt_keystore(path, password.as_bytes()).map_err(|e| {
        Error::decryption_with(format!("failed to open wallet '{}'", path.display()), e)
    })
}

/// Prompt for the password and decrypt the wallet.
///
/// # Errors
///
/// [`Error::Decryption`] if either step fails.
pub fn unlock_wallet(path: &Path, prompt: &dyn PasswordPrompt) -> Result<PrivateKeySigner, Error> {
    let password = prompt.read_password()?;
    let signer = decrypt_wallet(path, &password)?;
    tracing::info!(address = %signer.address(), "wallet unlocked");
    Ok(signer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedPrompt, keystore_file};
    use alloy_primitives::address;

    #[test]
    fn correct_password_unlocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = keystore_file(dir.path());
        let signer = unlock_wallet(&path, &FixedPrompt("testpassword")).unwrap();
        assert_eq!(
            signer.address(),
            address!("008aeeda4d805471df9b2a5b0f38a0c3bcba786b")
        );
    }

    #[test]
    fn wrong_password_is_decryption_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = keystore_file(dir.path());
        let err = unlock_wallet(&path, &FixedPrompt("not-the-password")).unwrap_err();
        assert!(matches!(err, Error::Decryption(_)), "{err}");
    }

    #[test]
    fn missing_wallet_is_decryption_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decrypt_wallet(
            &dir.path().join("absent.json"),
            &Zeroizing::new(String::from("testpassword")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Decryption(_)));
    }

    #[test]
    fn corrupt_wallet_is_decryption_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = unlock_wallet(&path, &FixedPrompt("testpassword")).unwrap_err();
        assert!(matches!(err, Error::Decryption(_)));
    }
}
