//! A page: a layout tagged with its format version.

use super::layout::PageLayout;
use super::metadata::Metadata;
use crate::attr::{AttributeFactory, FormatModel};
use crate::version::FormatVersion;
use std::sync::Arc;

/// A document page.
#[derive(Debug, Clone)]
pub struct Page {
    format_version: Option<FormatVersion>,
    layout: PageLayout,
}

impl Page {
    /// Create an empty page of the model's format version.
    pub fn new(model: Arc<FormatModel>) -> Self {
        let version = model.version().clone();
        Self {
            format_version: Some(version),
            layout: PageLayout::new(model),
        }
    }

    /// Create a page without a recorded format version.
    pub fn unversioned(attributes: Arc<dyn AttributeFactory>) -> Self {
        Self {
            format_version: None,
            layout: PageLayout::new(attributes),
        }
    }

    pub fn format_version(&self) -> Option<&FormatVersion> {
        self.format_version.as_ref()
    }

    pub(crate) fn set_format_version(&mut self, version: Option<FormatVersion>) {
        self.format_version = version;
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut PageLayout {
        &mut self.layout
    }

    pub fn metadata(&self) -> &Metadata {
        &self.layout.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.layout.metadata
    }

    /// Image file name from the page attributes.
    pub fn image_filename(&self) -> Option<&str> {
        self.layout.attributes().str_value("imageFilename")
    }

    /// Image size from the page attributes.
    pub fn image_size(&self) -> Option<(i64, i64)> {
        let attrs = self.layout.attributes();
        let width = attrs.value("imageWidth")?.as_i64()?;
        let height = attrs.value("imageHeight")?.as_i64()?;
        Some((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_is_versioned() {
        let model = Arc::new(FormatModel::page_xml(&FormatVersion::PAGE_2016_07_15).unwrap());
        let mut page = Page::new(model);
        assert_eq!(page.format_version(), Some(&FormatVersion::PAGE_2016_07_15));

        let attrs = page.layout_mut().attributes_mut();
        attrs.set("imageFilename", "scan_001.tif").unwrap();
        attrs.set("imageWidth", 2480).unwrap();
        attrs.set("imageHeight", 3508).unwrap();
        assert_eq!(page.image_filename(), Some("scan_001.tif"));
        assert_eq!(page.image_size(), Some((2480, 3508)));
    }

    #[test]
    fn test_unversioned_page() {
        let model = Arc::new(FormatModel::new(FormatVersion::other("draft")));
        let page = Page::unversioned(model);
        assert!(page.format_version().is_none());
        assert!(page.image_size().is_none());
    }

    #[test]
    fn test_metadata_lives_in_layout() {
        let model = Arc::new(FormatModel::page_xml(&FormatVersion::PAGE_2019_07_15).unwrap());
        let mut page = Page::new(model);
        page.metadata_mut().creator = "scanner".to_string();
        let item = page.layout().factory().create_metadata_item();
        page.metadata_mut().add_item(item);
        assert_eq!(page.layout().metadata.creator, "scanner");
        assert_eq!(page.metadata().items().len(), 1);
    }
}
