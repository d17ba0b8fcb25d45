//! Image reference supply for segmentation.
//!
//! The segmenter itself never touches image bytes. It consumes an
//! [`ImageMap`] of opaque reference strings keyed by page index, produced
//! ahead of time by an [`ImageLocator`]. Locator failures are per-image:
//! a bad image is logged and omitted, never fatal.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Document;

/// Ordered image references per zero-based page index.
pub type ImageMap = BTreeMap<usize, Vec<String>>;

/// Supplies image references for a document ahead of segmentation.
///
/// `prefix` is the document's slug, used by locators that derive file
/// names. Implementations must swallow per-image failures: log a warning
/// and leave the image out of the map.
pub trait ImageLocator {
    fn locate(&self, document: &Document, prefix: &str) -> ImageMap;
}

impl<L: ImageLocator + ?Sized> ImageLocator for &L {
    fn locate(&self, document: &Document, prefix: &str) -> ImageMap {
        (**self).locate(document, prefix)
    }
}

impl<L: ImageLocator + ?Sized> ImageLocator for Box<L> {
    fn locate(&self, document: &Document, prefix: &str) -> ImageMap {
        (**self).locate(document, prefix)
    }
}

/// Locator that reports no images at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageLocator for NoImages {
    fn locate(&self, _document: &Document, _prefix: &str) -> ImageMap {
        ImageMap::new()
    }
}

/// Locator that hands back a prebuilt reference map.
///
/// Useful when references come from somewhere other than the document's
/// own image data, and in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedImages {
    map: ImageMap,
}

impl FixedImages {
    /// Wrap an existing map.
    pub fn new(map: ImageMap) -> Self {
        Self { map }
    }

    /// Register references for one page (builder form).
    pub fn with_page(mut self, page_index: usize, refs: Vec<String>) -> Self {
        self.map.insert(page_index, refs);
        self
    }
}

impl ImageLocator for FixedImages {
    fn locate(&self, _document: &Document, _prefix: &str) -> ImageMap {
        self.map.clone()
    }
}

/// Locator that writes each page image to an assets directory and returns
/// link-base-relative references to the written files.
///
/// File names follow `{prefix}_p{page}_i{index}.{ext}`, where `index` is
/// the image's position on its page. An image whose format cannot be
/// determined, or whose write fails, is logged and skipped; its index is
/// still consumed so surviving file names stay stable.
#[derive(Debug, Clone)]
pub struct ImageExporter {
    assets_dir: PathBuf,
    link_base: String,
}

impl ImageExporter {
    /// Export into `assets_dir`; references default to paths under that
    /// same directory.
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        let assets_dir = assets_dir.into();
        let link_base = assets_dir.display().to_string();
        Self {
            assets_dir,
            link_base,
        }
    }

    /// Override the base the emitted references are joined under, e.g. a
    /// site-absolute path like `/assets/generated`.
    pub fn with_link_base(mut self, base: impl Into<String>) -> Self {
        self.link_base = base.into();
        self
    }

    /// Directory the image files are written to.
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    fn reference(&self, file_name: &str) -> String {
        format!("{}/{}", self.link_base.trim_end_matches('/'), file_name)
    }
}

impl ImageLocator for ImageExporter {
    fn locate(&self, document: &Document, prefix: &str) -> ImageMap {
        let mut map = ImageMap::new();
        if document.image_count() == 0 {
            return map;
        }

        if let Err(e) = fs::create_dir_all(&self.assets_dir) {
            log::warn!(
                "Could not create assets directory {}: {}",
                self.assets_dir.display(),
                e
            );
            return map;
        }

        for (page_index, page) in document.pages.iter().enumerate() {
            let mut refs = Vec::new();
            for (image_index, image) in page.images.iter().enumerate() {
                let ext = match image.extension() {
                    Some(ext) => ext,
                    None => {
                        log::warn!(
                            "Skipping image {} on page {}: unrecognized format",
                            image_index,
                            page_index
                        );
                        continue;
                    }
                };

                let file_name = format!("{}_p{}_i{}.{}", prefix, page_index, image_index, ext);
                let path = self.assets_dir.join(&file_name);
                if let Err(e) = fs::write(&path, &image.data) {
                    log::warn!("Could not save image {}: {}", path.display(), e);
                    continue;
                }

                refs.push(self.reference(&file_name));
            }
            if !refs.is_empty() {
                map.insert(page_index, refs);
            }
        }

        log::debug!(
            "Exported {} image refs for {}",
            map.values().map(Vec::len).sum::<usize>(),
            prefix
        );
        map
    }
}
