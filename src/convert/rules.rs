//! Conversion rules and the built-in direct converters between PAGE versions.

use super::converter::{AttributeOwner, ConversionRule, Edit, LabelOwner, PlannedChange, StepConverter};
use super::message::{ConversionMessage, MessageKind};
use super::scripts;
use crate::attr::VariableMap;
use crate::model::{ContentObject, PageLayout, RegionType};
use crate::version::FormatVersion;

/// Script attributes of text regions.
const REGION_SCRIPT_ATTRIBUTES: &[&str] = &["primaryScript", "secondaryScript"];

/// Script attributes of the page and of text lines, words and glyphs.
const OBJECT_SCRIPT_ATTRIBUTES: &[&str] = &["primaryScript", "secondaryScript", "script"];

/// Direction of a script name translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptDirection {
    LegacyToIso,
    IsoToLegacy,
}

impl ScriptDirection {
    /// Translation needed between two PAGE versions, if the step crosses
    /// the 2016-07-15 switch to ISO 15924 names.
    pub fn between(source: &FormatVersion, target: &FormatVersion) -> Option<Self> {
        if !source.is_page() || !target.is_page() {
            return None;
        }
        let iso = &FormatVersion::PAGE_2016_07_15;
        match (source.is_older_than(iso), target.is_older_than(iso)) {
            (true, false) => Some(ScriptDirection::LegacyToIso),
            (false, true) => Some(ScriptDirection::IsoToLegacy),
            _ => None,
        }
    }
}

/// Which objects a [`ScriptRule`] looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptScope {
    /// `primaryScript` and `secondaryScript` of text regions
    TextRegions,
    /// Page attributes plus text lines, words and glyphs
    PageAndTextObjects,
}

/// Rewrites script attribute values between the legacy and ISO 15924 naming.
///
/// Values without a counterpart become `"other"`.
#[derive(Debug, Clone, Copy)]
pub struct ScriptRule {
    direction: ScriptDirection,
    scope: ScriptScope,
}

impl ScriptRule {
    /// Rule for text regions, as used by the built-in converters.
    pub fn new(direction: ScriptDirection) -> Self {
        Self {
            direction,
            scope: ScriptScope::TextRegions,
        }
    }

    /// Rule for the page and low-level text objects.
    pub fn text_objects(direction: ScriptDirection) -> Self {
        Self {
            direction,
            scope: ScriptScope::PageAndTextObjects,
        }
    }

    pub fn scope(&self) -> ScriptScope {
        self.scope
    }

    fn translate(&self, name: &str) -> &'static str {
        match self.direction {
            ScriptDirection::LegacyToIso => scripts::legacy_to_iso(name),
            ScriptDirection::IsoToLegacy => scripts::iso_to_legacy(name),
        }
    }

    fn detect_in(
        &self,
        owner: AttributeOwner,
        attributes: &VariableMap,
        names: &[&str],
        out: &mut Vec<PlannedChange>,
    ) {
        for name in names {
            let Some(old) = attributes.get(name).and_then(|v| v.as_str()) else {
                continue;
            };
            let new = self.translate(old);
            if new == old {
                continue;
            }
            out.push(PlannedChange::new(
                ConversionMessage::new(
                    format!(
                        "Changed content of script attribute from '{}' to '{}'",
                        old, new
                    ),
                    MessageKind::ValueChanged,
                ),
                Edit::SetText {
                    owner: owner.clone(),
                    name: name.to_string(),
                    value: new.to_string(),
                },
            ));
        }
    }
}

impl ConversionRule for ScriptRule {
    fn detect(&self, layout: &PageLayout) -> Vec<PlannedChange> {
        let mut out = Vec::new();
        match self.scope {
            ScriptScope::TextRegions => {
                for id in layout.region_ids() {
                    let Some(region) = layout.region(&id) else {
                        continue;
                    };
                    if region.region_type().is_text() {
                        let attributes = region.core().attributes();
                        let owner = AttributeOwner::Object(id.clone());
                        self.detect_in(owner, attributes, REGION_SCRIPT_ATTRIBUTES, &mut out);
                    }
                }
            }
            ScriptScope::PageAndTextObjects => {
                let page = layout.attributes();
                self.detect_in(AttributeOwner::Page, page, OBJECT_SCRIPT_ATTRIBUTES, &mut out);
                for id in layout.ids() {
                    if let Some(ContentObject::Text(text)) = layout.get(&id) {
                        let attributes = text.core().attributes();
                        let owner = AttributeOwner::Object(id.clone());
                        self.detect_in(owner, attributes, OBJECT_SCRIPT_ATTRIBUTES, &mut out);
                    }
                }
            }
        }
        out
    }
}

/// Re-types regions of the listed types to `UnknownRegion`.
#[derive(Debug, Clone)]
pub struct RetypeRegionsRule {
    types: Vec<RegionType>,
}

impl RetypeRegionsRule {
    pub fn new(types: impl IntoIterator<Item = RegionType>) -> Self {
        Self {
            types: types.into_iter().collect(),
        }
    }
}

impl ConversionRule for RetypeRegionsRule {
    fn detect(&self, layout: &PageLayout) -> Vec<PlannedChange> {
        layout
            .region_ids()
            .into_iter()
            .filter_map(|id| {
                let region = layout.region(&id)?;
                if !self.types.contains(region.region_type()) {
                    return None;
                }
                let message = ConversionMessage::new(
                    format!(
                        "Changed type of region '{}' from {} to {}",
                        id,
                        region.region_type().name(),
                        RegionType::Unknown.name()
                    ),
                    MessageKind::TypeChanged,
                );
                Some(PlannedChange::new(
                    message,
                    Edit::Retype {
                        region: id,
                        region_type: RegionType::Unknown,
                    },
                ))
            })
            .collect()
    }
}

/// Removes grapheme elements below glyphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropGraphemesRule;

impl ConversionRule for DropGraphemesRule {
    fn detect(&self, layout: &PageLayout) -> Vec<PlannedChange> {
        layout
            .ids_of_type(&crate::model::ContentType::GLYPH)
            .into_iter()
            .filter_map(|id| {
                let count = layout.text_object(&id)?.children().len();
                (count > 0).then(|| {
                    PlannedChange::new(
                        ConversionMessage::new(
                            format!("Removed {} grapheme element(s) from glyph '{}'", count, id),
                            MessageKind::ContentRemoved,
                        ),
                        Edit::ClearGraphemes { glyph: id },
                    )
                })
            })
            .collect()
    }
}

/// Removes alternative images from regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropAlternativeImagesRule;

impl ConversionRule for DropAlternativeImagesRule {
    fn detect(&self, layout: &PageLayout) -> Vec<PlannedChange> {
        layout
            .region_ids()
            .into_iter()
            .filter_map(|id| {
                let count = layout.region(&id)?.alternative_images.len();
                (count > 0).then(|| {
                    PlannedChange::new(
                        ConversionMessage::new(
                            format!("Removed {} alternative image(s) from region '{}'", count, id),
                            MessageKind::ContentRemoved,
                        ),
                        Edit::ClearAlternativeImages { region: id },
                    )
                })
            })
            .collect()
    }
}

/// Removes labels from content objects and relations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropLabelsRule;

impl ConversionRule for DropLabelsRule {
    fn detect(&self, layout: &PageLayout) -> Vec<PlannedChange> {
        let mut out: Vec<PlannedChange> = layout
            .ids()
            .into_iter()
            .filter(|id| layout.get(id).and_then(ContentObject::labels).is_some())
            .map(|id| {
                PlannedChange::new(
                    ConversionMessage::new(
                        format!("Removed labels from '{}'", id),
                        MessageKind::ContentRemoved,
                    ),
                    Edit::ClearLabels(LabelOwner::Object(id)),
                )
            })
            .collect();
        out.extend(
            layout
                .relations
                .iter()
                .filter(|r| r.labels.is_some())
                .map(|r| {
                    PlannedChange::new(
                        ConversionMessage::new(
                            format!("Removed labels from relation '{}'", r.id()),
                            MessageKind::ContentRemoved,
                        ),
                        Edit::ClearLabels(LabelOwner::Relation {
                            object1: r.object1().clone(),
                            object2: r.object2().clone(),
                        }),
                    )
                }),
        );
        out
    }
}

/// Removes all metadata items.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropMetadataItemsRule;

impl ConversionRule for DropMetadataItemsRule {
    fn detect(&self, layout: &PageLayout) -> Vec<PlannedChange> {
        let count = layout.metadata.items().len();
        if count == 0 {
            return Vec::new();
        }
        vec![PlannedChange::new(
            ConversionMessage::new(
                format!("Removed {} metadata item(s)", count),
                MessageKind::ContentRemoved,
            ),
            Edit::ClearMetadataItems,
        )]
    }
}

/// Removes region roles.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropRolesRule;

impl ConversionRule for DropRolesRule {
    fn detect(&self, layout: &PageLayout) -> Vec<PlannedChange> {
        let mut out = Vec::new();
        for id in layout.region_ids() {
            let Some(region) = layout.region(&id) else {
                continue;
            };
            for role in region.roles() {
                out.push(PlannedChange::new(
                    ConversionMessage::new(
                        format!("Removed role {} from region '{}'", role.role_type().name(), id),
                        MessageKind::ContentRemoved,
                    ),
                    Edit::RemoveRole {
                        region: id.clone(),
                        role_type: role.role_type(),
                    },
                ));
            }
        }
        out
    }
}

/// The direct converters between adjacent PAGE versions.
///
/// New to old: 2010-03-19 to 2010-01-12, 2010-01-12 to 2009-03-16,
/// 2013 to 2010-03-19, 2016 to 2013, 2017 to 2016, 2018 to 2017, 2019 to
/// 2018. Old to new: 2018 to 2019, 2017 to 2018, 2016 to 2017, 2013 to 2016
/// and 2009-03-16 to 2016.
pub fn direct_converters() -> Vec<StepConverter> {
    use FormatVersion as V;

    vec![
        // New to old
        StepConverter::new(V::PAGE_2010_03_19, V::PAGE_2010_01_12),
        StepConverter::new(V::PAGE_2010_01_12, V::PAGE_2009_03_16),
        StepConverter::new(V::PAGE_2013_07_15, V::PAGE_2010_03_19).with_rule(
            RetypeRegionsRule::new([RegionType::Advert, RegionType::Chem, RegionType::Music]),
        ),
        StepConverter::new(V::PAGE_2016_07_15, V::PAGE_2013_07_15)
            .with_rule(ScriptRule::new(ScriptDirection::IsoToLegacy))
            .with_rule(RetypeRegionsRule::new([RegionType::Map])),
        StepConverter::new(V::PAGE_2017_07_15, V::PAGE_2016_07_15)
            .with_rule(DropGraphemesRule)
            .with_rule(DropAlternativeImagesRule),
        StepConverter::new(V::PAGE_2018_07_15, V::PAGE_2017_07_15)
            .with_rule(RetypeRegionsRule::new([RegionType::Custom]))
            .with_rule(DropLabelsRule)
            .with_rule(DropMetadataItemsRule),
        StepConverter::new(V::PAGE_2019_07_15, V::PAGE_2018_07_15).with_rule(DropRolesRule),
        // Old to new
        StepConverter::new(V::PAGE_2018_07_15, V::PAGE_2019_07_15),
        StepConverter::new(V::PAGE_2017_07_15, V::PAGE_2018_07_15),
        StepConverter::new(V::PAGE_2016_07_15, V::PAGE_2017_07_15),
        StepConverter::new(V::PAGE_2013_07_15, V::PAGE_2016_07_15)
            .with_rule(ScriptRule::new(ScriptDirection::LegacyToIso)),
        StepConverter::new(V::PAGE_2009_03_16, V::PAGE_2016_07_15)
            .with_rule(ScriptRule::new(ScriptDirection::LegacyToIso)),
    ]
}
