use rand::Rng;

pub const ANON_ID_PREFIX: &str = "shadow-";

/// Length of the random part after the prefix.
const SUFFIX_LEN: usize = 6;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh anonymous id such as `shadow-k3x9qa`.
pub fn generate_anon_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}{}", ANON_ID_PREFIX, suffix)
}

/// Check that a stored id still has the shape `generate_anon_id` produces.
pub fn is_valid_anon_id(id: &str) -> bool {
    match id.strip_prefix(ANON_ID_PREFIX) {
        Some(suffix) => {
            suffix.len() == SUFFIX_LEN
                && suffix
                    .bytes()
                    .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
        }
        None => false,
    }
}
