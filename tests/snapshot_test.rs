//! Integration tests for JSON page snapshots.

use pagemodel::model::{AlternativeImage, Polygon, RelationType};
use pagemodel::snapshot::{self, JsonFormat};
use pagemodel::{
    ContentType, Error, FormatVersion, ModelRegistry, Page, PageSnapshot, RegionType, RoleType,
};

fn registry() -> ModelRegistry {
    ModelRegistry::with_defaults().unwrap()
}

fn sample(registry: &ModelRegistry) -> Page {
    let mut page = Page::new(registry.require(&FormatVersion::PAGE_2019_07_15).unwrap());
    page.metadata_mut().creator = "scanner".to_string();
    let layout = page.layout_mut();
    layout.attributes_mut().set("imageFilename", "scan.tif").unwrap();
    layout.attributes_mut().set("imageWidth", 2480).unwrap();
    layout.attributes_mut().set("imageHeight", 3508).unwrap();

    let table = layout.create_region(RegionType::Table, None).unwrap();
    layout.get_mut(&table).unwrap().core_mut().coords = Some(Polygon::rect(0, 0, 1000, 400));
    let cell = layout.create_region(RegionType::Text, Some(&table)).unwrap();
    let mut role = layout
        .factory()
        .create_region_role(RoleType::TableCell)
        .unwrap();
    role.attributes_mut().set("columnIndex", 1).unwrap();
    layout.region_mut(&cell).unwrap().add_role(role);

    let line = layout.create(&ContentType::TEXT_LINE, Some(&cell)).unwrap();
    layout
        .get_mut(&line)
        .unwrap()
        .text_variants_mut()
        .unwrap()
        .set_text("Total");
    let image = layout.create_region(RegionType::Image, None).unwrap();
    layout
        .region_mut(&image)
        .unwrap()
        .alternative_images
        .push(AlternativeImage::new("scan-bin.png"));

    let relation = layout
        .factory_mut()
        .create_relation(&cell, &image, RelationType::Join)
        .unwrap();
    layout.relations.add(relation);

    let mut layers = layout.factory().create_layers();
    let mut layer = layout.factory_mut().create_layer(1).unwrap();
    layer.regions.push(image.clone());
    layers.add(layer);
    layout.layers = Some(layers);

    let mut order = layout.factory_mut().create_reading_order().unwrap();
    let mut group = layout.factory_mut().create_group(false).unwrap();
    group.add_region_ref(image);
    order.root_mut().add_region_ref(table);
    order.root_mut().add_group(group);
    layout.reading_order = Some(order);

    let mut item = layout.factory().create_metadata_item();
    item.attributes_mut().set("type", "processingStep").unwrap();
    item.attributes_mut().set("name", "binarisation").unwrap();
    layout.metadata.add_item(item);
    page
}

#[test]
fn test_file_round_trip() {
    let registry = registry();
    let page = sample(&registry);
    let dir = tempfile::tempdir().unwrap();

    for format in [JsonFormat::Pretty, JsonFormat::Compact] {
        let path = dir.path().join("page.json");
        snapshot::save(&page, &path, format).unwrap();
        let restored = snapshot::load(&path, &registry).unwrap();

        assert_eq!(PageSnapshot::from_page(&restored), PageSnapshot::from_page(&page));
        assert_eq!(restored.image_size(), Some((2480, 3508)));
        assert_eq!(restored.metadata().creator, "scanner");
        assert_eq!(restored.layout().metadata.items()[0].name(), Some("binarisation"));
    }
}

#[test]
fn test_restored_structure() {
    let registry = registry();
    let json = snapshot::to_json(&sample(&registry), JsonFormat::Compact).unwrap();
    let restored = snapshot::from_json(&json, &registry).unwrap();
    let layout = restored.layout();

    assert_eq!(layout.regions().len(), 2);
    let table = layout.region(&layout.regions()[0]).unwrap();
    assert_eq!(table.region_type(), &RegionType::Table);
    let cell = layout.region(&table.regions()[0]).unwrap();
    assert!(cell.role(RoleType::TableCell).is_some());
    assert_eq!(layout.get(&cell.text_lines()[0]).unwrap().text(), Some("Total"));
    assert_eq!(layout.relations.len(), 1);
    assert_eq!(layout.layers.as_ref().unwrap().len(), 1);
    assert_eq!(layout.reading_order.as_ref().unwrap().region_ids().len(), 2);
}

#[test]
fn test_restored_page_keeps_generating_fresh_ids() {
    let registry = registry();
    let page = sample(&registry);
    let json = snapshot::to_json(&page, JsonFormat::Pretty).unwrap();
    let mut restored = snapshot::from_json(&json, &registry).unwrap();

    let known: Vec<_> = page.layout().ids();
    let layout = restored.layout_mut();
    let region = layout.create_region(RegionType::Text, None).unwrap();
    let group = layout.factory_mut().create_group(true).unwrap();
    assert!(!known.contains(&region));
    assert_ne!(group.id().as_str(), "g1");
    assert_ne!(group.id().as_str(), "g2");
}

#[test]
fn test_duplicate_ids_rejected() {
    let registry = registry();
    let mut snapshot = PageSnapshot::from_page(&sample(&registry));
    let mut copy = snapshot.regions[1].clone();
    copy.id = snapshot.regions[0].id.clone();
    snapshot.regions.push(copy);

    assert!(matches!(
        snapshot.into_page(&registry),
        Err(Error::InvalidId { .. })
    ));
}

#[test]
fn test_dangling_relation_rejected() {
    let registry = registry();
    let mut snapshot = PageSnapshot::from_page(&sample(&registry));
    // image region goes, the relation to it stays
    snapshot.regions.pop();
    assert!(snapshot.into_page(&registry).is_err());
}

#[test]
fn test_unversioned_snapshot_uses_latest_model() {
    let registry = registry();
    let mut snapshot = PageSnapshot::from_page(&sample(&registry));
    snapshot.format_version = None;

    let page = snapshot.into_page(&registry).unwrap();
    assert!(page.format_version().is_none());
    assert!(page
        .layout()
        .attributes()
        .contains("imageResolutionUnit"));
}

#[test]
fn test_converted_page_round_trips() {
    let registry = registry();
    let hub = pagemodel::ConverterHub::with_defaults().unwrap();
    let mut page = sample(&registry);
    let target = registry.require(&FormatVersion::PAGE_2013_07_15).unwrap();
    hub.convert(&mut page, &target).unwrap();

    let json = snapshot::to_json(&page, JsonFormat::Compact).unwrap();
    let restored = snapshot::from_json(&json, &registry).unwrap();
    assert_eq!(restored.format_version(), Some(&FormatVersion::PAGE_2013_07_15));
    assert!(restored.layout().metadata.items().is_empty());
    assert_eq!(PageSnapshot::from_page(&restored), PageSnapshot::from_page(&page));
}

#[test]
fn test_malformed_json() {
    let result = snapshot::from_json("{ not json", &registry());
    assert!(matches!(result, Err(Error::Json(_))));
}
