//! Salted password hashes.
//!
//! `hash = hex(sha256(salt || password))` with a 16 byte random salt per user.

use crate::model::Credential;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_BYTES: usize = 16;

impl Credential {
    /// Hashes `password` under a fresh random salt.
    pub fn derive(password: &str) -> Self {
        let mut salt = [0_u8; SALT_BYTES];
        OsRng.fill_bytes(&mut salt);
        Self::with_salt(&salt, password)
    }

    fn with_salt(salt: &[u8], password: &str) -> Self {
        Self {
            salt: hex::encode(salt),
            hash: digest(salt, password),
        }
    }

    /// Whether `password` hashes to this credential.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(salt) = hex::decode(&self.salt) else {
            return false;
        };
        let candidate = digest(&salt, password);
        // Compare every byte regardless of where the first difference is.
        candidate.len() == self.hash.len()
            && candidate
                .bytes()
                .zip(self.hash.bytes())
                .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
