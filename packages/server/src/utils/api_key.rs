use rand::RngCore;

/// Bytes of entropy in a generated key.
const API_KEY_BYTES: usize = 32;

/// Generate a fresh API key: 32 random bytes from the thread-local CSPRNG,
/// hex-encoded to 64 lowercase characters.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
