//! Asset key generation.
//!
//! A key is 32 bytes from the OS random source, base64 URL-safe unpadded,
//! plus an extension fixed by content type. Uniqueness is probabilistic
//! (256 bits); keys are never checked against existing objects.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::traits::{StorageError, StorageResult};

const KEY_RANDOM_BYTES: usize = 32;

/// Extension for a content type the service accepts for persistence.
pub fn extension_for(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image/jpeg" => Some(".jpg"),
        "image/png" => Some(".png"),
        // Video uploads validate their content type upstream; the remux
        // stage fixes the container, so the extension is always .mp4.
        "video/mp4" => Some(".mp4"),
        _ => None,
    }
}

/// Generate a fresh asset key for `media_type`.
///
/// Fails only if the extension mapping is missing (caller validated the
/// wrong set) or the OS random source itself fails.
pub fn new_asset_key(media_type: &str) -> StorageResult<String> {
    let ext = extension_for(media_type).ok_or_else(|| {
        StorageError::InvalidKey(format!("no extension mapping for {}", media_type))
    })?;

    let mut raw = [0u8; KEY_RANDOM_BYTES];
    OsRng.try_fill_bytes(&mut raw).map_err(|e| {
        StorageError::IoError(std::io::Error::other(format!("random source failure: {}", e)))
    })?;

    Ok(format!("{}{}", URL_SAFE_NO_PAD.encode(raw), ext))
}

/// Join a classification directory segment ahead of a generated key.
pub fn prefixed_key(prefix: &str, key: &str) -> String {
    format!("{}/{}", prefix, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for("image/jpeg"), Some(".jpg"));
        assert_eq!(extension_for("image/png"), Some(".png"));
        assert_eq!(extension_for("video/mp4"), Some(".mp4"));
        assert_eq!(extension_for("image/gif"), None);
    }

    #[test]
    fn test_new_asset_key_shape() {
        let key = new_asset_key("image/png").unwrap();
        assert!(key.ends_with(".png"));
        // 32 bytes -> 43 base64 chars unpadded
        let stem = key.strip_suffix(".png").unwrap();
        assert_eq!(stem.len(), 43);
        assert!(!stem.contains('='));
        assert!(!stem.contains('/'));
        assert!(!stem.contains('+'));
    }

    #[test]
    fn test_new_asset_key_rejects_unmapped_type() {
        assert!(matches!(
            new_asset_key("application/pdf"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_keys_do_not_collide() {
        let keys: HashSet<String> = (0..256)
            .map(|_| new_asset_key("video/mp4").unwrap())
            .collect();
        assert_eq!(keys.len(), 256);
    }

    #[test]
    fn test_prefixed_key() {
        assert_eq!(prefixed_key("portrait", "abc.mp4"), "portrait/abc.mp4");
    }
}
