use sha2::Sha256;
use subtle::ConstantTimeEq;

const SALT_LENGTH: usize = 16;
const KEY_LENGTH: usize = 32;
#[cfg(not(test))]
const ITERATIONS: u32 = 100_000;
#[cfg(test)]
const ITERATIONS: u32 = 1_000;

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LENGTH] {
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut key);

    key
}

/// Hash a password with PBKDF2-HMAC-SHA256 and a random salt.
/// The result is stored as `<salt>$<hash>`, both hex-encoded.
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LENGTH] = rand::random();
    let key = derive_key(password, &salt);

    format!("{}${}", hex::encode(salt), hex::encode(key))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Some((salt, expected_key)) = stored_hash.split_once('$') else {
        error!("Stored password hash is malformed");
        return false;
    };

    match (hex::decode(salt), hex::decode(expected_key)) {
        (Ok(salt), Ok(expected_key)) => derive_key(password, &salt)
            .as_slice()
            .ct_eq(expected_key.as_slice())
            .into(),
        _ => {
            error!("Stored password hash is not hex-encoded");
            false
        }
    }
}
