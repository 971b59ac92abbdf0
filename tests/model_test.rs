//! Integration tests for the page model.

use std::collections::HashSet;

use pagemodel::model::{ContentVisitor, Label, Labels, Region, RelationType, VisitorAction};
use pagemodel::{
    new_page, ContentType, Error, FormatVersion, Id, IdRegister, LayoutStats, Page, RegionType,
    RoleType,
};

fn page() -> Page {
    new_page(&FormatVersion::PAGE_2019_07_15).unwrap()
}

#[test]
fn test_ids_unique_across_kinds() {
    let mut page = page();
    let layout = page.layout_mut();
    let mut ids = Vec::new();
    for _ in 0..5 {
        let region = layout.create_region(RegionType::Text, None).unwrap();
        let line = layout.create(&ContentType::TEXT_LINE, Some(&region)).unwrap();
        let word = layout.create(&ContentType::WORD, Some(&line)).unwrap();
        ids.extend([region, line, word]);
    }
    let group = layout.factory_mut().create_group(false).unwrap();
    ids.push(group.id().clone());

    let distinct: HashSet<&Id> = ids.iter().collect();
    assert_eq!(distinct.len(), ids.len());
}

#[test]
fn test_explicit_id_collisions() {
    let mut page = page();
    let layout = page.layout_mut();
    let first = layout
        .create_with_id(&ContentType::TEXT_REGION, None, "header")
        .unwrap();
    assert_eq!(first.as_str(), "header");

    let again = layout.create_with_id(&ContentType::TEXT_REGION, None, "header");
    assert!(matches!(again, Err(Error::InvalidId { .. })));

    let malformed = layout.create_with_id(&ContentType::TEXT_REGION, None, "2nd region");
    assert!(matches!(malformed, Err(Error::InvalidId { .. })));
}

#[test]
fn test_removed_ids_are_not_reused() {
    let mut register = IdRegister::new();
    let a = register.generate("r").unwrap();
    register.register("r2").unwrap();
    let b = register.generate("r").unwrap();
    assert_eq!(a.as_str(), "r1");
    assert_eq!(b.as_str(), "r3");

    let mut page = page();
    let layout = page.layout_mut();
    let region = layout.create_region(RegionType::Text, None).unwrap();
    layout.remove(&region).unwrap();
    let next = layout.create_region(RegionType::Text, None).unwrap();
    assert_ne!(region, next);
}

#[test]
fn test_attribute_types_enforced() {
    let mut page = page();
    let region = page
        .layout_mut()
        .create_region(RegionType::Text, None)
        .unwrap();
    let attributes = page.layout_mut().get_mut(&region).unwrap().attributes_mut();

    assert!(matches!(
        attributes.set("indented", "yes"),
        Err(Error::WrongVariableType { .. })
    ));
    assert!(matches!(
        attributes.set("conf", 1.5),
        Err(Error::ConstraintViolation { .. })
    ));
    assert!(matches!(
        attributes.set("primaryScript", "Latin"),
        Err(Error::ConstraintViolation { .. })
    ));
    assert!(matches!(
        attributes.set("colour", "red"),
        Err(Error::UnknownAttribute { .. })
    ));

    attributes.set("leading", 12).unwrap();
    assert!(attributes.set("leading", true).is_err());
    assert_eq!(
        attributes.value("leading").and_then(|v| v.as_i64()),
        Some(12)
    );

    // integers widen to doubles
    attributes.set("orientation", 90).unwrap();
    assert_eq!(
        attributes.value("orientation").and_then(|v| v.as_f64()),
        Some(90.0)
    );
    attributes.set("conf", 0.75).unwrap();
    attributes.set("primaryScript", "Latn - Latin").unwrap();
}

#[test]
fn test_containment_rules() {
    let mut page = page();
    let layout = page.layout_mut();
    let image = layout.create_region(RegionType::Image, None).unwrap();
    let text = layout.create_region(RegionType::Text, Some(&image)).unwrap();

    assert!(matches!(
        layout.create(&ContentType::TEXT_LINE, Some(&image)),
        Err(Error::InvalidContainment(_))
    ));
    let line = layout.create(&ContentType::TEXT_LINE, Some(&text)).unwrap();
    assert!(matches!(
        layout.create(&ContentType::GLYPH, Some(&line)),
        Err(Error::InvalidContainment(_))
    ));
    assert!(matches!(
        layout.create(&ContentType::WORD, None),
        Err(Error::InvalidContainment(_))
    ));
    assert_eq!(layout.ancestors(&line), vec![text, image]);
}

#[test]
fn test_region_nesting_stays_acyclic() {
    let mut page = page();
    let layout = page.layout_mut();
    let outer = layout.create_region(RegionType::Table, None).unwrap();
    let middle = layout.create_region(RegionType::Text, Some(&outer)).unwrap();
    let inner = layout.create_region(RegionType::Image, Some(&middle)).unwrap();

    assert!(matches!(
        layout.move_region(&outer, Some(&inner)),
        Err(Error::InvalidContainment(_))
    ));
    assert!(matches!(
        layout.move_region(&outer, Some(&outer)),
        Err(Error::InvalidContainment(_))
    ));

    layout.move_region(&inner, None).unwrap();
    assert_eq!(layout.regions(), &[outer.clone(), inner.clone()]);
    layout.move_region(&outer, Some(&inner)).unwrap();
    assert_eq!(layout.regions(), &[inner.clone()]);
    assert_eq!(layout.ancestors(&middle), vec![outer, inner]);
}

#[test]
fn test_remove_cascades() {
    let mut page = page();
    let layout = page.layout_mut();
    let a = layout.create_region(RegionType::Text, None).unwrap();
    let line = layout.create(&ContentType::TEXT_LINE, Some(&a)).unwrap();
    let b = layout.create_region(RegionType::Image, None).unwrap();

    let relation = layout
        .factory_mut()
        .create_relation(&line, &b, RelationType::Link)
        .unwrap();
    layout.relations.add(relation);
    let mut order = layout.factory_mut().create_reading_order().unwrap();
    order.root_mut().add_region_ref(a.clone());
    order.root_mut().add_region_ref(b.clone());
    layout.reading_order = Some(order);

    layout.remove(&a).unwrap();

    assert!(layout.get(&line).is_none());
    assert!(layout.relations.is_empty());
    let order = layout.reading_order.as_ref().unwrap();
    assert!(!order.contains_region(&a));
    assert!(order.contains_region(&b));
    assert_eq!(layout.object_count(), 1);
}

#[test]
fn test_roles_need_a_known_template() {
    let old = new_page(&FormatVersion::PAGE_2018_07_15).unwrap();
    assert!(old
        .layout()
        .factory()
        .create_region_role(RoleType::TableCell)
        .is_none());

    let mut page = page();
    let layout = page.layout_mut();
    let cell = layout.create_region(RegionType::Text, None).unwrap();
    let mut role = layout
        .factory()
        .create_region_role(RoleType::TableCell)
        .unwrap();
    role.attributes_mut().set("rowIndex", 2).unwrap();
    assert!(role.attributes_mut().set("rowSpan", 0).is_err());
    layout.region_mut(&cell).unwrap().add_role(role);

    let stored = layout
        .region(&cell)
        .unwrap()
        .role(RoleType::TableCell)
        .unwrap();
    assert_eq!(
        stored.attributes().value("rowIndex").and_then(|v| v.as_i64()),
        Some(2)
    );
}

#[test]
fn test_compose_text() {
    let mut page = page();
    let layout = page.layout_mut();
    let region = layout.create_region(RegionType::Text, None).unwrap();
    let line = layout.create(&ContentType::TEXT_LINE, Some(&region)).unwrap();
    for word_text in ["Hello", "world"] {
        let word = layout.create(&ContentType::WORD, Some(&line)).unwrap();
        layout
            .get_mut(&word)
            .unwrap()
            .text_variants_mut()
            .unwrap()
            .set_text(word_text);
    }

    let text = layout.compose_text(&region).unwrap();
    assert_eq!(text.as_deref(), Some("Hello world"));
    assert_eq!(layout.get(&line).unwrap().text(), Some("Hello world"));
}

#[test]
fn test_layout_stats() {
    let mut page = page();
    let layout = page.layout_mut();
    let table = layout.create_region(RegionType::Table, None).unwrap();
    let cell = layout.create_region(RegionType::Text, Some(&table)).unwrap();
    let line = layout.create(&ContentType::TEXT_LINE, Some(&cell)).unwrap();
    let word = layout.create(&ContentType::WORD, Some(&line)).unwrap();
    let glyph = layout.create(&ContentType::GLYPH, Some(&word)).unwrap();
    layout.create(&ContentType::GRAPHEME, Some(&glyph)).unwrap();
    layout
        .region_mut(&cell)
        .unwrap()
        .text_mut()
        .unwrap()
        .variants
        .set_text("a b");

    let stats = LayoutStats::collect(layout);
    assert_eq!(stats.region_count, 2);
    assert_eq!(stats.regions_by_type.get("TableRegion"), Some(&1));
    assert_eq!(stats.text_line_count, 1);
    assert_eq!(stats.word_count, 1);
    assert_eq!(stats.glyph_count, 1);
    assert_eq!(stats.grapheme_count, 1);
    assert_eq!(stats.char_count, 2);
    assert_eq!(stats.max_region_depth, 1);
}

struct RegionCollector {
    names: Vec<String>,
}

impl ContentVisitor for RegionCollector {
    fn visit_region(&mut self, region: &Region, _depth: usize) -> VisitorAction {
        self.names.push(region.region_type().name().to_string());
        if region.region_type() == &RegionType::Table {
            VisitorAction::SkipChildren
        } else {
            VisitorAction::Continue
        }
    }
}

#[test]
fn test_visitor_skips_children() {
    let mut page = page();
    let layout = page.layout_mut();
    let table = layout.create_region(RegionType::Table, None).unwrap();
    layout.create_region(RegionType::Text, Some(&table)).unwrap();
    layout.create_region(RegionType::Separator, None).unwrap();

    let mut collector = RegionCollector { names: Vec::new() };
    pagemodel::model::walk(layout, &mut collector);
    assert_eq!(collector.names, ["TableRegion", "SeparatorRegion"]);
}

#[test]
fn test_labels_on_objects() {
    let mut page = page();
    let layout = page.layout_mut();
    let region = layout.create_region(RegionType::Text, None).unwrap();
    let mut labels = Labels::new().with_external_model("layout-v1");
    labels.add(Label::new("heading").with_type("class"));
    layout.get_mut(&region).unwrap().core_mut().labels = Some(labels);

    let stored = layout.get(&region).unwrap().labels().unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored.find("heading").is_some());
}

#[test]
fn test_version_parsing_and_order() {
    let v = FormatVersion::parse(
        "http://schema.primaresearch.org/PAGE/gts/pagecontent/2013-07-15",
    )
    .unwrap();
    assert_eq!(v, FormatVersion::PAGE_2013_07_15);
    assert!(FormatVersion::PAGE_2019_07_15.is_newer_than(&v));
    assert!(FormatVersion::PAGE_2009_03_16.is_older_than(&v));
    assert!(!FormatVersion::ALTO_V4.is_newer_than(&v));
    assert!(matches!(
        FormatVersion::parse("not-a-format"),
        Err(Error::UnknownFormatVersion(_))
    ));
}
