use zeroize::Zeroizing;

use super::{DIGEST_LEN, MAX_COST, MAX_KEY_LEN};
use crate::{
    error::{Error, Result},
    format::SaltParts,
};

/// The cost-parameterized one-way function behind the facade.
///
/// Given a password and decoded salt parameters it returns the digest bytes
/// that follow the salt in a stored hash. Implementations must be
/// deterministic and safe to share between threads.
pub trait HashPrimitive: Send + Sync {
    fn digest(&self, password: &[u8], salt: &SaltParts) -> Result<[u8; DIGEST_LEN]>;
}

impl<T: HashPrimitive + ?Sized> HashPrimitive for &T {
    fn digest(&self, password: &[u8], salt: &SaltParts) -> Result<[u8; DIGEST_LEN]> {
        (**self).digest(password, salt)
    }
}

/// bcrypt as implemented by the `bcrypt` crate.
///
/// The key is the password followed by a NUL byte, truncated to 72 bytes,
/// which is what `$2a$`, `$2b$` and `$2y$` hashes expect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bcrypt;

impl HashPrimitive for Bcrypt {
    fn digest(&self, password: &[u8], salt: &SaltParts) -> Result<[u8; DIGEST_LEN]> {
        let cost = salt.cost().get();
        if cost > MAX_COST {
            return Err(Error::Primitive(format!("cost {cost} not supported")));
        }

        let mut key = Zeroizing::new([0u8; MAX_KEY_LEN]);
        let len = password.len().min(MAX_KEY_LEN);
        key[..len].copy_from_slice(&password[..len]);
        let key_len = (len + 1).min(MAX_KEY_LEN);

        let output = Zeroizing::new(bcrypt::bcrypt(cost, *salt.entropy(), &key[..key_len]));

        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(&output[..DIGEST_LEN]);
        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::decode;

    fn digest_for(password: &[u8], salt: &str) -> [u8; DIGEST_LEN] {
        Bcrypt.digest(password, &decode(salt).unwrap()).unwrap()
    }

    #[test]
    fn digest_is_deterministic() {
        let salt = "$2a$04$......................";
        assert_eq!(digest_for(b"password", salt), digest_for(b"password", salt));
    }

    #[test]
    fn salt_affects_output() {
        let a = digest_for(b"pw", "$2a$04$......................");
        let b = digest_for(b"pw", "$2a$04$EGdrhbKUv8Oc9vGiXX0HQO");
        assert_ne!(a, b);
    }

    #[test]
    fn cost_affects_output() {
        let a = digest_for(b"pw", "$2a$04$......................");
        let b = digest_for(b"pw", "$2a$05$......................");
        assert_ne!(a, b);
    }

    #[test]
    fn password_truncated_at_72_bytes() {
        let salt = "$2a$04$......................";
        let long = [b'x'; 100];
        assert_eq!(digest_for(&long, salt), digest_for(&long[..72], salt));
        assert_ne!(digest_for(&long[..71], salt), digest_for(&long[..72], salt));
    }

    #[test]
    fn empty_password_is_accepted() {
        digest_for(b"", "$2a$04$......................");
    }
}
