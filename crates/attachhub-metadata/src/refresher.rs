//! Metadata refresher — recompute and merge metadata for a stored file.

use std::sync::Arc;

use tracing::{debug, info};

use attachhub_core::result::AppResult;
use attachhub_core::traits::ContentStore;
use attachhub_core::AppError;
use attachhub_file::data::MetadataMap;
use attachhub_file::handle::UploadedFileHandle;
use attachhub_file::source::ContentSource;

use crate::context::RefreshContext;
use crate::extractor::MetadataExtractor;

/// Recomputes a file handle's metadata from its current content and
/// merges the result into the existing metadata mapping.
///
/// The refresher holds the two external collaborators: the content store
/// it fetches from when the handle does not buffer its content, and the
/// extraction routine it delegates to.
pub struct MetadataRefresher {
    /// Content store used for the remote branch.
    store: Arc<dyn ContentStore>,
    /// Extraction routine.
    extractor: Arc<dyn MetadataExtractor>,
}

impl MetadataRefresher {
    /// Create a refresher from its collaborators.
    pub fn new(store: Arc<dyn ContentStore>, extractor: Arc<dyn MetadataExtractor>) -> Self {
        Self { store, extractor }
    }

    /// Refresh the handle's metadata.
    ///
    /// Content access resolves once per call: an already-open buffered
    /// stream is read directly with no store round-trip, otherwise a read
    /// stream is opened at the handle's storage address and released when
    /// this call returns, whether extraction succeeded or not.
    ///
    /// On success the handle's data is replaced with a new snapshot whose
    /// metadata is the old mapping overlaid with the freshly extracted
    /// one: extracted values win per key, keys unique to the old mapping
    /// are retained, and mapping-valued keys are replaced wholesale (no
    /// deep merge). Every failure propagates unrecovered and leaves the
    /// handle's data untouched.
    pub async fn refresh_metadata(
        &self,
        handle: &mut UploadedFileHandle,
        context: &RefreshContext,
    ) -> AppResult<()> {
        let extracted = match ContentSource::resolve(handle) {
            ContentSource::Buffered => {
                let io = handle.io.as_mut().ok_or_else(|| {
                    AppError::internal("buffered content source without an open stream")
                })?;
                self.extractor.extract(&handle.data, io, context).await?
            }
            ContentSource::Remote(address) => {
                debug!(
                    store = self.store.store_type(),
                    address = %address,
                    "Opening store stream for metadata refresh"
                );
                let mut stream = self.store.open_read(&address).await?;
                let result = self.extractor.extract(&handle.data, &mut stream, context).await;
                drop(stream);
                result?
            }
        };

        let refreshed_keys = extracted.len();
        let mut next = (*handle.data).clone();
        next.metadata = merge_metadata(&handle.data.metadata, extracted);
        handle.replace_data(next);

        info!(
            file_id = %handle.data.id,
            refreshed_keys,
            total_keys = handle.data.metadata.len(),
            "Metadata refreshed"
        );
        Ok(())
    }
}

impl std::fmt::Debug for MetadataRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataRefresher")
            .field("store", &self.store)
            .finish()
    }
}

/// Shallow right-biased merge: every key in `fresh` overwrites, keys
/// unique to `existing` are retained unchanged.
fn merge_metadata(existing: &MetadataMap, fresh: MetadataMap) -> MetadataMap {
    let mut merged = existing.clone();
    for (key, value) in fresh {
        merged.insert(key, value);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, serde_json::Value)]) -> MetadataMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_merge_is_right_biased_and_retains_unique_keys() {
        let existing = map(&[("size", json!(100)), ("checksum", json!("abc"))]);
        let fresh = map(&[("size", json!(120)), ("mime", json!("text/plain"))]);

        let merged = merge_metadata(&existing, fresh);

        assert_eq!(
            merged,
            map(&[
                ("size", json!(120)),
                ("checksum", json!("abc")),
                ("mime", json!("text/plain")),
            ])
        );
    }

    #[test]
    fn test_merge_key_set_is_the_union() {
        let existing = map(&[("a", json!(1)), ("b", json!(2))]);
        let fresh = map(&[("b", json!(20)), ("c", json!(30))]);

        let merged = merge_metadata(&existing, fresh.clone());

        let mut keys: Vec<_> = merged.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "b", "c"]);
        for (key, value) in &fresh {
            assert_eq!(merged.get(key), Some(value));
        }
        assert_eq!(merged.get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_merge_replaces_nested_mappings_wholesale() {
        let existing = map(&[("exif", json!({ "iso": 200, "lens": "50mm" }))]);
        let fresh = map(&[("exif", json!({ "iso": 400 }))]);

        let merged = merge_metadata(&existing, fresh);

        assert_eq!(merged.get("exif"), Some(&json!({ "iso": 400 })));
    }

    #[test]
    fn test_merge_with_empty_fresh_changes_nothing() {
        let existing = map(&[("size", json!(5))]);
        let merged = merge_metadata(&existing, MetadataMap::new());
        assert_eq!(merged, existing);
    }
}
