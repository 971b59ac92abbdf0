//! The converter trait and the rule-driven single-step converter.

use super::message::ConversionMessage;
use crate::error::{Error, Result};
use crate::ident::Id;
use crate::model::{PageLayout, RegionType, RoleType};
use crate::version::FormatVersion;
use std::fmt;

/// Converts a page layout from one format version to another.
///
/// `convert` changes the layout and reports what it did;
/// `check_for_compliance` reports what `convert` would do without touching
/// the layout. Both return the same messages for the same input.
pub trait LayoutConverter: Send + Sync {
    fn source_version(&self) -> &FormatVersion;

    fn target_version(&self) -> &FormatVersion;

    /// Convert the layout in place.
    fn convert(&self, layout: &mut PageLayout) -> Vec<ConversionMessage>;

    /// Report the changes a conversion would make.
    fn check_for_compliance(&self, layout: &PageLayout) -> Vec<ConversionMessage>;

    /// Number of direct conversion steps this converter performs.
    fn stage_count(&self) -> usize {
        1
    }

    /// Source and target versions of every direct step, in order.
    fn stages(&self) -> Vec<(FormatVersion, FormatVersion)> {
        vec![(self.source_version().clone(), self.target_version().clone())]
    }
}

impl fmt::Debug for dyn LayoutConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source_version(), self.target_version())
    }
}

/// Owner of an attribute map that a rule edits.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeOwner {
    /// Page-level attributes
    Page,
    Object(Id),
}

/// Owner of a label set that a rule clears.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelOwner {
    Object(Id),
    Relation { object1: Id, object2: Id },
}

/// A single change to a layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Overwrite a string attribute, ignoring its current constraint.
    SetText {
        owner: AttributeOwner,
        name: String,
        value: String,
    },

    /// Change the type of a region.
    Retype { region: Id, region_type: RegionType },

    /// Remove all grapheme elements of a glyph.
    ClearGraphemes { glyph: Id },

    /// Remove the alternative images of a region.
    ClearAlternativeImages { region: Id },

    ClearLabels(LabelOwner),

    ClearMetadataItems,

    /// Remove one role of a region.
    RemoveRole { region: Id, role_type: RoleType },
}

impl Edit {
    /// Apply the edit to a layout.
    pub fn apply(self, layout: &mut PageLayout) -> Result<()> {
        match self {
            Edit::SetText { owner, name, value } => {
                let attributes = match &owner {
                    AttributeOwner::Page => layout.attributes_mut(),
                    AttributeOwner::Object(id) => layout
                        .get_mut(id)
                        .ok_or_else(|| Error::ObjectNotFound(id.to_string()))?
                        .attributes_mut(),
                };
                let type_name = attributes.type_name().to_string();
                let variable = attributes.get_mut(&name).ok_or(Error::UnknownAttribute {
                    owner: type_name,
                    name,
                })?;
                variable.force_string(value);
            }
            Edit::Retype {
                region,
                region_type,
            } => layout.retype_region(&region, region_type)?,
            Edit::ClearGraphemes { glyph } => {
                layout.clear_graphemes(&glyph)?;
            }
            Edit::ClearAlternativeImages { region } => {
                region_mut(layout, &region)?.alternative_images.clear();
            }
            Edit::ClearLabels(LabelOwner::Object(id)) => {
                layout
                    .get_mut(&id)
                    .ok_or_else(|| Error::ObjectNotFound(id.to_string()))?
                    .core_mut()
                    .labels = None;
            }
            Edit::ClearLabels(LabelOwner::Relation { object1, object2 }) => {
                layout
                    .relations
                    .get_mut(&object1, &object2)
                    .ok_or_else(|| {
                        Error::ObjectNotFound(format!("relation {} - {}", object1, object2))
                    })?
                    .labels = None;
            }
            Edit::ClearMetadataItems => {
                layout.metadata.clear_items();
            }
            Edit::RemoveRole { region, role_type } => {
                region_mut(layout, &region)?.remove_role(role_type);
            }
        }
        Ok(())
    }
}

fn region_mut<'a>(layout: &'a mut PageLayout, id: &Id) -> Result<&'a mut crate::model::Region> {
    layout
        .region_mut(id)
        .ok_or_else(|| Error::ObjectNotFound(id.to_string()))
}

/// A change found by a rule, with the message describing it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChange {
    pub message: ConversionMessage,
    pub edit: Edit,
}

impl PlannedChange {
    pub fn new(message: ConversionMessage, edit: Edit) -> Self {
        Self { message, edit }
    }
}

/// Detects the changes one aspect of a conversion needs.
pub trait ConversionRule: Send + Sync + fmt::Debug {
    /// Find all changes in the layout, in document order.
    fn detect(&self, layout: &PageLayout) -> Vec<PlannedChange>;
}

/// Converter for a single step between two adjacent versions.
///
/// The converter asks each rule for its planned changes, in rule order, and
/// then applies them. A compliance check only collects the plans.
#[derive(Debug)]
pub struct StepConverter {
    source: FormatVersion,
    target: FormatVersion,
    rules: Vec<Box<dyn ConversionRule>>,
}

impl StepConverter {
    pub fn new(source: FormatVersion, target: FormatVersion) -> Self {
        Self {
            source,
            target,
            rules: Vec::new(),
        }
    }

    /// Add a rule.
    pub fn with_rule(mut self, rule: impl ConversionRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Collect the planned changes of all rules.
    pub fn plan(&self, layout: &PageLayout) -> Vec<PlannedChange> {
        self.rules
            .iter()
            .flat_map(|rule| rule.detect(layout))
            .collect()
    }
}

impl LayoutConverter for StepConverter {
    fn source_version(&self) -> &FormatVersion {
        &self.source
    }

    fn target_version(&self) -> &FormatVersion {
        &self.target
    }

    fn convert(&self, layout: &mut PageLayout) -> Vec<ConversionMessage> {
        let changes = self.plan(layout);
        let mut messages = Vec::with_capacity(changes.len());
        for change in changes {
            if let Err(e) = change.edit.apply(layout) {
                log::warn!(
                    "{} -> {}: could not apply change ({}): {}",
                    self.source,
                    self.target,
                    change.message,
                    e
                );
            }
            messages.push(change.message);
        }
        log::debug!(
            "Converted layout {} -> {} with {} change(s)",
            self.source,
            self.target,
            messages.len()
        );
        messages
    }

    fn check_for_compliance(&self, layout: &PageLayout) -> Vec<ConversionMessage> {
        self.plan(layout).into_iter().map(|c| c.message).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::FormatModel;
    use crate::convert::MessageKind;
    use std::sync::Arc;

    #[derive(Debug)]
    struct RenameRegions;

    impl ConversionRule for RenameRegions {
        fn detect(&self, layout: &PageLayout) -> Vec<PlannedChange> {
            layout
                .region_ids()
                .into_iter()
                .filter(|id| layout.get(id).is_some_and(|o| o.attributes().contains("custom")))
                .map(|id| {
                    PlannedChange::new(
                        ConversionMessage::new(format!("Renamed {}", id), MessageKind::ValueChanged),
                        Edit::SetText {
                            owner: AttributeOwner::Object(id),
                            name: "custom".to_string(),
                            value: "renamed".to_string(),
                        },
                    )
                })
                .collect()
        }
    }

    fn layout() -> PageLayout {
        let model = FormatModel::page_xml(&FormatVersion::PAGE_2019_07_15).unwrap();
        let mut l = PageLayout::new(Arc::new(model));
        l.create_region(RegionType::Text, None).unwrap();
        l.create_region(RegionType::Image, None).unwrap();
        l
    }

    #[test]
    fn test_check_does_not_mutate() {
        let converter = StepConverter::new(
            FormatVersion::PAGE_2019_07_15,
            FormatVersion::PAGE_2018_07_15,
        )
        .with_rule(RenameRegions);
        let l = layout();
        let messages = converter.check_for_compliance(&l);
        assert_eq!(messages.len(), 2);
        assert!(l.find("r1").unwrap().attributes().str_value("custom").is_none());
    }

    #[test]
    fn test_convert_matches_check() {
        let converter = StepConverter::new(
            FormatVersion::PAGE_2019_07_15,
            FormatVersion::PAGE_2018_07_15,
        )
        .with_rule(RenameRegions);
        let mut l = layout();
        let checked = converter.check_for_compliance(&l);
        let converted = converter.convert(&mut l);
        assert_eq!(checked, converted);
        assert_eq!(
            l.find("r2").unwrap().attributes().str_value("custom"),
            Some("renamed")
        );
        assert_eq!(converter.stages().len(), 1);
    }

    #[test]
    fn test_edit_unknown_attribute() {
        let mut l = layout();
        let edit = Edit::SetText {
            owner: AttributeOwner::Page,
            name: "nonsense".to_string(),
            value: "x".to_string(),
        };
        assert!(matches!(edit.apply(&mut l), Err(Error::UnknownAttribute { .. })));
    }
}
