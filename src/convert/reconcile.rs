//! Attribute reconciliation against the templates of a target version.
//!
//! For every attribute map whose type has a template in the target model:
//! attributes missing from the template are removed, shared attributes keep
//! their value and take over a copy of the template's constraint, and
//! template attributes the map lacks are added as copies. Maps whose type has
//! no template are left alone.

use crate::attr::{FormatModel, VariableMap};
use crate::model::{ContentObject, PageLayout};

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Attribute maps that had a template
    pub maps: usize,
    pub removed: usize,
    pub added: usize,
}

impl ReconcileStats {
    fn merge(&mut self, other: ReconcileStats) {
        self.maps += other.maps;
        self.removed += other.removed;
        self.added += other.added;
    }
}

/// Reconcile one attribute map.
pub fn reconcile_attributes(attributes: &mut VariableMap, model: &FormatModel) -> ReconcileStats {
    let Some(template) = model.template(attributes.type_name()) else {
        return ReconcileStats::default();
    };

    let before = attributes.len();
    attributes.retain(|v| template.contains(v.name()));
    let removed = before - attributes.len();

    for variable in attributes.iter_mut() {
        let constraint = template
            .get(variable.name())
            .and_then(|t| t.constraint())
            .cloned();
        variable.replace_constraint(constraint);
    }

    let mut added = 0;
    for template_var in template {
        if !attributes.contains(template_var.name()) {
            attributes.insert(template_var.clone());
            added += 1;
        }
    }

    ReconcileStats {
        maps: 1,
        removed,
        added,
    }
}

/// Reconcile the page attributes and every attribute map reachable from the
/// layout: content objects, region roles and metadata items.
pub fn reconcile_layout(layout: &mut PageLayout, model: &FormatModel) -> ReconcileStats {
    let mut stats = reconcile_attributes(&mut layout.attributes, model);

    for object in layout.objects_mut() {
        stats.merge(reconcile_attributes(object.attributes_mut(), model));
        if let ContentObject::Region(region) = object {
            for role in region.roles_mut() {
                stats.merge(reconcile_attributes(role.attributes_mut(), model));
            }
        }
    }

    for item in layout.metadata.items_mut() {
        stats.merge(reconcile_attributes(item.attributes_mut(), model));
    }

    log::debug!(
        "Reconciled {} attribute map(s) with {}: {} removed, {} added",
        stats.maps,
        model.version(),
        stats.removed,
        stats.added
    );
    stats
}
