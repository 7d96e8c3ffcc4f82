//! Content fingerprints for drift comparison.

use sha2::{Digest, Sha256};

/// SHA-256 of `data`, rendered as 64 lowercase hex characters.
///
/// Always called on the exact bytes that reach the disk, banner included.
pub fn hash_content(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_hashes_to_well_known_digest() {
        assert_eq!(
            hash_content(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hello_world_digest() {
        assert_eq!(
            hash_content(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn digest_is_lowercase_hex_of_fixed_width() {
        let h = hash_content(&[0xff, 0x00, 0x10]);
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn single_byte_change_changes_digest() {
        assert_ne!(hash_content(b"node_modules\n"), hash_content(b"node_modules \n"));
    }
}
