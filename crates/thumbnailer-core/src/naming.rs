//! Thumbnail naming policy
//!
//! Maps an original object path to its thumbnail path (and back), and
//! recognizes thumbnail paths so that uploading a thumbnail never triggers
//! another thumbnail.
//!
//! The directory part of a path is kept byte-for-byte:
//!
//! - `photos/cat.jpg` -> `photos/thumb_cat.jpg`
//! - `cat.jpg` -> `thumb_cat.jpg` (bucket root)
//!
//! Naming is pure string mapping. Whether a path is a valid object key
//! (no leading `/`, no empty or dot segments) is decided by the storage
//! layer, which rejects such events as permanent failures.

use crate::constants::{DEFAULT_THUMBNAIL_PREFIX, IMAGE_CONTENT_TYPE_PREFIX};
use crate::models::SkipReason;

/// Classification of one object path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingResult {
    pub is_eligible: bool,
    pub is_already_thumbnail: bool,
    /// Present only when `is_eligible` is true.
    pub derived_path: Option<String>,
    /// Present only when `is_eligible` is false.
    pub skip_reason: Option<SkipReason>,
}

impl NamingResult {
    fn skip(reason: SkipReason, is_already_thumbnail: bool) -> Self {
        Self {
            is_eligible: false,
            is_already_thumbnail,
            derived_path: None,
            skip_reason: Some(reason),
        }
    }
}

/// Naming policy parameterized by the reserved prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    prefix: String,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_THUMBNAIL_PREFIX.to_string(),
        }
    }
}

impl NamingPolicy {
    /// Build a policy with a custom prefix.
    ///
    /// The prefix must be non-empty (an empty prefix would mark every object
    /// as a thumbnail) and must not contain `/` (it is prepended to a base
    /// filename).
    pub fn new(prefix: impl Into<String>) -> Result<Self, anyhow::Error> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Classify a path given the content type declared by its upload event.
    ///
    /// Total over all inputs. Skip precedence follows the order of checks:
    /// content type, then empty base filename, then thumbnail prefix.
    pub fn classify(&self, path: &str, content_type: Option<&str>) -> NamingResult {
        let is_already_thumbnail = self.is_thumbnail(path);

        if !is_image_content_type(content_type) {
            return NamingResult::skip(SkipReason::NotAnImage, is_already_thumbnail);
        }

        let (_, basename) = split_path(path);
        if basename.is_empty() {
            return NamingResult::skip(SkipReason::EmptyName, false);
        }

        if is_already_thumbnail {
            return NamingResult::skip(SkipReason::AlreadyThumbnail, true);
        }

        NamingResult {
            is_eligible: true,
            is_already_thumbnail: false,
            derived_path: Some(self.derive(path)),
            skip_reason: None,
        }
    }

    /// True when the base filename carries the reserved prefix.
    pub fn is_thumbnail(&self, path: &str) -> bool {
        let (_, basename) = split_path(path);
        basename.starts_with(&self.prefix)
    }

    /// Thumbnail path for an original path, ignoring content type.
    ///
    /// Returns `None` for paths without a base filename and for paths that are
    /// already thumbnails.
    pub fn thumbnail_path(&self, path: &str) -> Option<String> {
        let (_, basename) = split_path(path);
        if basename.is_empty() || basename.starts_with(&self.prefix) {
            return None;
        }
        Some(self.derive(path))
    }

    /// Inverse of [`NamingPolicy::thumbnail_path`].
    pub fn original_path(&self, thumbnail_path: &str) -> Option<String> {
        let (dir, basename) = split_path(thumbnail_path);
        let original = basename.strip_prefix(self.prefix.as_str())?;
        if original.is_empty() || original.starts_with(&self.prefix) {
            return None;
        }
        Some(format!("{}{}", dir, original))
    }

    fn derive(&self, path: &str) -> String {
        let (dir, basename) = split_path(path);
        format!("{}{}{}", dir, self.prefix, basename)
    }
}

/// True when the declared content type names an image (`image/*`).
///
/// MIME types are case-insensitive; surrounding whitespace is ignored.
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| {
            ct.trim()
                .to_ascii_lowercase()
                .starts_with(IMAGE_CONTENT_TYPE_PREFIX)
        })
        .unwrap_or(false)
}

pub(crate) fn validate_prefix(prefix: &str) -> Result<(), anyhow::Error> {
    if prefix.is_empty() {
        return Err(anyhow::anyhow!("Thumbnail prefix must not be empty"));
    }
    if prefix.contains('/') {
        return Err(anyhow::anyhow!(
            "Thumbnail prefix must not contain '/': {}",
            prefix
        ));
    }
    Ok(())
}

/// Split into (directory including trailing `/`, base filename).
fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn policy() -> NamingPolicy {
        NamingPolicy::default()
    }

    #[test]
    fn test_eligible_image_in_directory() {
        let result = policy().classify("photos/cat.jpg", Some("image/jpeg"));
        assert!(result.is_eligible);
        assert!(!result.is_already_thumbnail);
        assert_eq!(result.derived_path.as_deref(), Some("photos/thumb_cat.jpg"));
        assert_eq!(result.skip_reason, None);
    }

    #[test]
    fn test_eligible_image_at_bucket_root() {
        let result = policy().classify("cat.png", Some("image/png"));
        assert_eq!(result.derived_path.as_deref(), Some("thumb_cat.png"));
    }

    #[test]
    fn test_nested_directories_kept() {
        assert_eq!(
            policy().thumbnail_path("a/b/c/d.webp").as_deref(),
            Some("a/b/c/thumb_d.webp")
        );
    }

    #[test]
    fn test_already_thumbnail() {
        let result = policy().classify("photos/thumb_cat.jpg", Some("image/jpeg"));
        assert!(!result.is_eligible);
        assert!(result.is_already_thumbnail);
        assert_eq!(result.skip_reason, Some(SkipReason::AlreadyThumbnail));
        assert!(result.derived_path.is_none());
    }

    #[test]
    fn test_prefix_only_checked_on_basename() {
        let result = policy().classify("thumb_dir/cat.jpg", Some("image/jpeg"));
        assert!(result.is_eligible);
        assert_eq!(
            result.derived_path.as_deref(),
            Some("thumb_dir/thumb_cat.jpg")
        );
    }

    #[test]
    fn test_thumbnail_flag_independent_of_content_type() {
        let result = policy().classify("photos/thumb_notes.pdf", Some("application/pdf"));
        assert!(!result.is_eligible);
        assert!(result.is_already_thumbnail);
        assert_eq!(result.skip_reason, Some(SkipReason::NotAnImage));
    }

    #[test]
    fn test_not_an_image() {
        for ct in [Some("application/pdf"), Some("text/plain"), Some(""), None] {
            let result = policy().classify("docs/file.pdf", ct);
            assert!(!result.is_eligible, "content type {:?}", ct);
            assert_eq!(result.skip_reason, Some(SkipReason::NotAnImage));
        }
    }

    #[test]
    fn test_content_type_case_insensitive() {
        assert!(is_image_content_type(Some("IMAGE/JPEG")));
        assert!(is_image_content_type(Some("  image/png ")));
        assert!(!is_image_content_type(Some("imagex/png")));
        assert!(!is_image_content_type(Some("application/image")));
    }

    #[test]
    fn test_empty_basename_is_skipped() {
        for path in ["", "photos/", "/"] {
            let result = policy().classify(path, Some("image/jpeg"));
            assert!(!result.is_eligible, "path {:?}", path);
            assert_eq!(result.skip_reason, Some(SkipReason::EmptyName));
        }
    }

    #[test]
    fn test_classify_never_panics_on_odd_input() {
        for path in ["//", "a//b", "../x.png", "ü/ñ.jpg", "\0", "thumb_"] {
            let _ = policy().classify(path, Some("image/png"));
        }
    }

    #[test]
    fn test_derived_path_is_itself_a_thumbnail() {
        let derived = policy().thumbnail_path("photos/cat.jpg").unwrap();
        let result = policy().classify(&derived, Some("image/jpeg"));
        assert!(result.is_already_thumbnail);
    }

    #[test]
    fn test_injective_on_eligible_domain() {
        let paths = [
            "cat.jpg",
            "/cat.jpg",
            "photos/cat.jpg",
            "photos//cat.jpg",
            "photos/cat.jpeg",
            "Photos/cat.jpg",
            "photos/sub/cat.jpg",
            "photos/thumbcat.jpg",
            "thumb/cat.jpg",
        ];
        let derived: HashSet<String> = paths
            .iter()
            .map(|p| policy().thumbnail_path(p).unwrap())
            .collect();
        assert_eq!(derived.len(), paths.len());
    }

    #[test]
    fn test_original_path_inverts_mapping() {
        for path in ["cat.jpg", "photos/cat.jpg", "/a/b.png"] {
            let derived = policy().thumbnail_path(path).unwrap();
            assert_eq!(policy().original_path(&derived).as_deref(), Some(path));
        }
        assert_eq!(policy().original_path("photos/cat.jpg"), None);
        assert_eq!(policy().original_path("photos/thumb_"), None);
        assert_eq!(policy().original_path("photos/thumb_thumb_cat.jpg"), None);
    }

    #[test]
    fn test_custom_prefix() {
        let policy = NamingPolicy::new("small-").unwrap();
        let result = policy.classify("a/cat.jpg", Some("image/jpeg"));
        assert_eq!(result.derived_path.as_deref(), Some("a/small-cat.jpg"));
        assert!(policy.is_thumbnail("a/small-cat.jpg"));
        assert!(!policy.is_thumbnail("a/thumb_cat.jpg"));
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        assert!(NamingPolicy::new("").is_err());
        assert!(NamingPolicy::new("thumbs/").is_err());
    }
}
