//! Aspect-ratio classification.
//!
//! Committed videos are keyed under a coarse orientation directory so a
//! player can pick a layout without probing the file.

use std::fmt;

/// Coarse aspect-ratio bucket, derived once from the first video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectBucket {
    Landscape,
    Portrait,
    Other,
}

impl AspectBucket {
    /// Classify by `width / height`.
    ///
    /// The bands are open intervals: ratios in (1.7, 1.8) are landscape
    /// (16:9 ≈ 1.778 falls inside), ratios below 0.6 are portrait
    /// (9:16 = 0.5625), and everything else — including the boundary
    /// values themselves, squares, and unusual wide formats — is other.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "dimensions validated by probe");

        let ratio = width as f64 / height as f64;
        if ratio > 1.7 && ratio < 1.8 {
            AspectBucket::Landscape
        } else if ratio < 0.6 {
            AspectBucket::Portrait
        } else {
            AspectBucket::Other
        }
    }

    /// Storage-key directory segment for this bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectBucket::Landscape => "landscape",
            AspectBucket::Portrait => "portrait",
            AspectBucket::Other => "other",
        }
    }
}

impl fmt::Display for AspectBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixteen_nine_is_landscape() {
        assert_eq!(
            AspectBucket::from_dimensions(1920, 1080),
            AspectBucket::Landscape
        );
        assert_eq!(
            AspectBucket::from_dimensions(1280, 720),
            AspectBucket::Landscape
        );
    }

    #[test]
    fn test_nine_sixteen_is_portrait() {
        assert_eq!(
            AspectBucket::from_dimensions(1080, 1920),
            AspectBucket::Portrait
        );
        assert_eq!(
            AspectBucket::from_dimensions(720, 1280),
            AspectBucket::Portrait
        );
    }

    #[test]
    fn test_near_square_is_other() {
        assert_eq!(AspectBucket::from_dimensions(640, 640), AspectBucket::Other);
        assert_eq!(AspectBucket::from_dimensions(640, 480), AspectBucket::Other);
        assert_eq!(AspectBucket::from_dimensions(480, 640), AspectBucket::Other);
    }

    #[test]
    fn test_band_boundaries_are_open() {
        // ratio exactly 1.7 and 1.8: outside the landscape band
        assert_eq!(AspectBucket::from_dimensions(17, 10), AspectBucket::Other);
        assert_eq!(AspectBucket::from_dimensions(18, 10), AspectBucket::Other);
        // ratio exactly 0.6: outside the portrait band
        assert_eq!(AspectBucket::from_dimensions(6, 10), AspectBucket::Other);
        // just inside each band
        assert_eq!(
            AspectBucket::from_dimensions(1701, 1000),
            AspectBucket::Landscape
        );
        assert_eq!(
            AspectBucket::from_dimensions(599, 1000),
            AspectBucket::Portrait
        );
    }

    #[test]
    fn test_ultrawide_is_other() {
        assert_eq!(
            AspectBucket::from_dimensions(3440, 1440),
            AspectBucket::Other
        );
    }

    #[test]
    fn test_key_segments() {
        assert_eq!(AspectBucket::Landscape.as_str(), "landscape");
        assert_eq!(AspectBucket::Portrait.as_str(), "portrait");
        assert_eq!(AspectBucket::Other.as_str(), "other");
    }
}
