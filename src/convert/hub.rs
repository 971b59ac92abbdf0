//! Registry of layout converters and the page-level conversion entry points.

use super::chain::ChainConverter;
use super::converter::{LayoutConverter, StepConverter};
use super::message::ConversionMessage;
use super::options::{ConvertOptions, MissingRoute};
use super::reconcile;
use super::rules::{self, ScriptDirection, ScriptRule};
use crate::attr::{AttributeFactory, FormatModel};
use crate::error::{Error, Result};
use crate::model::{Page, PageLayout};
use crate::version::FormatVersion;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Converters keyed by source and target version.
///
/// Direct converters are registered explicitly. Every other reachable pair
/// gets a [`ChainConverter`] along the shortest path of direct converters;
/// when several neighbours are possible the older version is tried first.
///
/// # Example
///
/// ```no_run
/// use pagemodel::{ConverterHub, FormatModel, FormatVersion, Page};
/// use std::sync::Arc;
///
/// fn main() -> pagemodel::Result<()> {
///     let hub = ConverterHub::with_defaults()?;
///     let mut page = Page::new(Arc::new(FormatModel::page_xml(&FormatVersion::PAGE_2013_07_15)?));
///     let target = Arc::new(FormatModel::page_xml(&FormatVersion::PAGE_2019_07_15)?);
///
///     if let Some(messages) = hub.convert(&mut page, &target) {
///         for message in messages {
///             println!("{}", message);
///         }
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct ConverterHub {
    direct: Vec<Arc<dyn LayoutConverter>>,
    converters: HashMap<FormatVersion, HashMap<FormatVersion, Arc<dyn LayoutConverter>>>,
}

impl ConverterHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hub with the built-in PAGE converters and their chains.
    pub fn with_defaults() -> Result<Self> {
        let mut hub = Self::new();
        for converter in rules::direct_converters() {
            hub.register(Arc::new(converter));
        }
        hub.build_chains()?;
        Ok(hub)
    }

    /// Register a direct converter, replacing one for the same version pair.
    ///
    /// Call [`ConverterHub::build_chains`] afterwards to route through it.
    pub fn register(&mut self, converter: Arc<dyn LayoutConverter>) {
        let source = converter.source_version().clone();
        let target = converter.target_version().clone();
        self.direct
            .retain(|c| !(c.source_version() == &source && c.target_version() == &target));
        self.direct.push(converter.clone());
        self.converters
            .entry(source)
            .or_default()
            .insert(target, converter);
    }

    /// Recompute all chain converters from the direct converters.
    ///
    /// Returns the number of chains created.
    pub fn build_chains(&mut self) -> Result<usize> {
        self.converters.clear();
        for converter in &self.direct {
            self.converters
                .entry(converter.source_version().clone())
                .or_default()
                .insert(converter.target_version().clone(), converter.clone());
        }

        let mut adjacency: HashMap<FormatVersion, Vec<Arc<dyn LayoutConverter>>> = HashMap::new();
        for converter in &self.direct {
            adjacency
                .entry(converter.source_version().clone())
                .or_default()
                .push(converter.clone());
        }
        for edges in adjacency.values_mut() {
            edges.sort_by(|a, b| chronological(a.target_version(), b.target_version()));
        }

        let mut sources: Vec<FormatVersion> = adjacency.keys().cloned().collect();
        sources.sort_by(chronological);

        let mut created = 0;
        for source in &sources {
            for path in shortest_paths(source, &adjacency) {
                if path.len() < 2 {
                    continue;
                }
                let chain = ChainConverter::new(path)?;
                let target = chain.target_version().clone();
                log::debug!(
                    "Chained converter {} -> {} ({} stages)",
                    source,
                    target,
                    chain.stage_count()
                );
                self.converters
                    .entry(source.clone())
                    .or_default()
                    .insert(target, Arc::new(chain));
                created += 1;
            }
        }
        Ok(created)
    }

    /// Converter between two versions, direct or chained.
    pub fn find_converter(
        &self,
        source: &FormatVersion,
        target: &FormatVersion,
    ) -> Option<Arc<dyn LayoutConverter>> {
        self.converters.get(source)?.get(target).cloned()
    }

    /// Like [`ConverterHub::find_converter`], failing with
    /// [`Error::UnsupportedConversionRoute`] if there is none.
    pub fn route(
        &self,
        source: &FormatVersion,
        target: &FormatVersion,
    ) -> Result<Arc<dyn LayoutConverter>> {
        self.find_converter(source, target)
            .ok_or_else(|| Error::UnsupportedConversionRoute {
                from: source.to_string(),
                to: target.to_string(),
            })
    }

    /// All version pairs with a converter, sorted.
    pub fn routes(&self) -> Vec<(FormatVersion, FormatVersion)> {
        let mut routes: Vec<_> = self
            .converters
            .iter()
            .flat_map(|(s, targets)| targets.keys().map(move |t| (s.clone(), t.clone())))
            .collect();
        routes.sort_by(|a, b| chronological(&a.0, &b.0).then_with(|| chronological(&a.1, &b.1)));
        routes
    }

    /// Number of direct converters.
    pub fn direct_count(&self) -> usize {
        self.direct.len()
    }

    /// Number of converters, chains included.
    pub fn len(&self) -> usize {
        self.converters.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert a page to the version of `target`.
    ///
    /// Returns `None` without touching the page if it has no version or is
    /// already at the target. Otherwise the layout is converted, all
    /// attributes are reconciled with the target templates, and the page is
    /// re-tagged. The result holds the converter messages, or `None` when no
    /// conversion route exists (attributes are still reconciled).
    pub fn convert(&self, page: &mut Page, target: &Arc<FormatModel>) -> Option<Vec<ConversionMessage>> {
        match self.convert_with_options(page, target, &ConvertOptions::default()) {
            Ok(messages) => messages,
            Err(e) => {
                log::warn!("Conversion to {} failed: {}", target.version(), e);
                None
            }
        }
    }

    /// Convert a page with explicit options.
    pub fn convert_with_options(
        &self,
        page: &mut Page,
        target: &Arc<FormatModel>,
        options: &ConvertOptions,
    ) -> Result<Option<Vec<ConversionMessage>>> {
        let Some(source) = page.format_version().cloned() else {
            return Ok(None);
        };
        let target_version = target.version();
        if &source == target_version {
            return Ok(None);
        }

        let messages = match self.find_converter(&source, target_version) {
            Some(converter) => Some(run(converter.as_ref(), page.layout_mut(), options)),
            None if options.missing_route == MissingRoute::Fail => {
                return Err(Error::UnsupportedConversionRoute {
                    from: source.to_string(),
                    to: target_version.to_string(),
                });
            }
            None => {
                log::warn!(
                    "No converter from {} to {}, adapting attributes only",
                    source,
                    target_version
                );
                None
            }
        };

        if options.adapt_attributes {
            reconcile::reconcile_layout(page.layout_mut(), target);
        }

        page.set_format_version(Some(target_version.clone()));
        let factory: Arc<dyn AttributeFactory> = target.clone();
        page.layout_mut().factory_mut().set_attribute_factory(factory);

        log::debug!(
            "Converted page {} -> {} ({} message(s))",
            source,
            target_version,
            messages.as_ref().map_or(0, Vec::len)
        );
        Ok(messages)
    }

    /// Report what converting the page to `target` would change.
    ///
    /// Same `None` rules as [`ConverterHub::convert`]; never modifies the page.
    pub fn check_for_compliance(
        &self,
        page: &Page,
        target: &FormatVersion,
    ) -> Option<Vec<ConversionMessage>> {
        self.check_with_options(page, target, &ConvertOptions::default())
    }

    /// Compliance check matching
    /// [`ConverterHub::convert_with_options`] with the same options.
    ///
    /// Extra script translation is simulated on a copy of the layout.
    pub fn check_with_options(
        &self,
        page: &Page,
        target: &FormatVersion,
        options: &ConvertOptions,
    ) -> Option<Vec<ConversionMessage>> {
        let source = page.format_version()?;
        if source == target {
            return None;
        }
        let converter = self.find_converter(source, target)?;
        if !options.text_object_scripts {
            return Some(converter.check_for_compliance(page.layout()));
        }
        let mut scratch = page.layout().clone();
        Some(run(converter.as_ref(), &mut scratch, options))
    }

    /// Convert many pages, in parallel when the `parallel` feature is on.
    pub fn convert_all(
        &self,
        pages: &mut [Page],
        target: &Arc<FormatModel>,
    ) -> Vec<Option<Vec<ConversionMessage>>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            pages
                .par_iter_mut()
                .map(|page| self.convert(page, target))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            pages
                .iter_mut()
                .map(|page| self.convert(page, target))
                .collect()
        }
    }
}

/// Run a converter, then the optional script translation for every stage
/// that crosses the legacy/ISO boundary.
fn run(
    converter: &dyn LayoutConverter,
    layout: &mut PageLayout,
    options: &ConvertOptions,
) -> Vec<ConversionMessage> {
    let mut messages = converter.convert(layout);
    if options.text_object_scripts {
        for (source, target) in converter.stages() {
            if let Some(direction) = ScriptDirection::between(&source, &target) {
                let step = StepConverter::new(source, target)
                    .with_rule(ScriptRule::text_objects(direction));
                messages.extend(step.convert(layout));
            }
        }
    }
    messages
}

/// Order versions oldest first; versions of different families by name.
fn chronological(a: &FormatVersion, b: &FormatVersion) -> Ordering {
    a.partial_cmp(b)
        .unwrap_or_else(|| a.name().cmp(b.name()))
}

/// Breadth-first search from `source`, returning for every reachable version
/// the converters along the shortest path to it.
fn shortest_paths(
    source: &FormatVersion,
    adjacency: &HashMap<FormatVersion, Vec<Arc<dyn LayoutConverter>>>,
) -> Vec<Vec<Arc<dyn LayoutConverter>>> {
    let mut via: HashMap<FormatVersion, Arc<dyn LayoutConverter>> = HashMap::new();
    let mut seen: HashSet<FormatVersion> = HashSet::from([source.clone()]);
    let mut order = Vec::new();
    let mut queue = VecDeque::from([source.clone()]);

    while let Some(current) = queue.pop_front() {
        let Some(edges) = adjacency.get(&current) else {
            continue;
        };
        for edge in edges {
            let next = edge.target_version();
            if seen.insert(next.clone()) {
                via.insert(next.clone(), edge.clone());
                order.push(next.clone());
                queue.push_back(next.clone());
            }
        }
    }

    order
        .into_iter()
        .map(|target| {
            let mut path = Vec::new();
            let mut current = target;
            while let Some(edge) = via.get(&current) {
                path.push(edge.clone());
                current = edge.source_version().clone();
            }
            path.reverse();
            path
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions_of(converter: &dyn LayoutConverter) -> Vec<String> {
        let stages = converter.stages();
        let mut out = vec![stages[0].0.to_string()];
        out.extend(stages.iter().map(|(_, t)| t.to_string()));
        out
    }

    #[test]
    fn test_all_page_pairs_reachable() {
        let hub = ConverterHub::with_defaults().unwrap();
        assert_eq!(hub.direct_count(), 12);
        for source in crate::version::PAGE_VERSIONS.iter() {
            for target in crate::version::PAGE_VERSIONS.iter() {
                if source != target {
                    assert!(
                        hub.find_converter(source, target).is_some(),
                        "{} -> {}",
                        source,
                        target
                    );
                }
            }
        }
        assert_eq!(hub.len(), 8 * 7);
    }

    #[test]
    fn test_chain_goes_through_2016() {
        let hub = ConverterHub::with_defaults().unwrap();
        let chain = hub
            .find_converter(&FormatVersion::PAGE_2010_03_19, &FormatVersion::PAGE_2019_07_15)
            .unwrap();
        assert_eq!(
            versions_of(chain.as_ref()),
            vec![
                "2010-03-19",
                "2010-01-12",
                "2009-03-16",
                "2016-07-15",
                "2017-07-15",
                "2018-07-15",
                "2019-07-15"
            ]
        );
    }

    #[test]
    fn test_route_missing() {
        let hub = ConverterHub::with_defaults().unwrap();
        let err = hub
            .route(&FormatVersion::PAGE_2019_07_15, &FormatVersion::ALTO_V4)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedConversionRoute { .. }));
    }

    #[test]
    fn test_text_object_scripts_are_opt_in() {
        let hub = ConverterHub::with_defaults().unwrap();
        let registry = crate::attr::ModelRegistry::with_defaults().unwrap();
        let page = || {
            let mut page = Page::new(registry.require(&FormatVersion::PAGE_2013_07_15).unwrap());
            let layout = page.layout_mut();
            layout.attributes_mut().set("primaryScript", "Cyrillic").unwrap();
            let region = layout.create_region(crate::model::RegionType::Text, None).unwrap();
            let line = layout
                .create(&crate::model::ContentType::TEXT_LINE, Some(&region))
                .unwrap();
            layout
                .get_mut(&line)
                .unwrap()
                .attributes_mut()
                .set("primaryScript", "Latin")
                .unwrap();
            page
        };
        let target = registry.require(&FormatVersion::PAGE_2019_07_15).unwrap();

        let mut plain = page();
        assert_eq!(hub.convert(&mut plain, &target), Some(Vec::new()));
        assert_eq!(
            plain.layout().attributes().str_value("primaryScript"),
            Some("Cyrillic")
        );

        let options = ConvertOptions::new().with_text_object_scripts(true);
        let mut extended = page();
        let checked = hub
            .check_with_options(&extended, &FormatVersion::PAGE_2019_07_15, &options)
            .unwrap();
        let converted = hub
            .convert_with_options(&mut extended, &target, &options)
            .unwrap()
            .unwrap();
        assert_eq!(checked, converted);
        assert_eq!(converted.len(), 2);
        let layout = extended.layout();
        assert_eq!(layout.attributes().str_value("primaryScript"), Some("Cyrl - Cyrillic"));
        assert_eq!(
            layout.find("l1").unwrap().attributes().str_value("primaryScript"),
            Some("Latn - Latin")
        );
    }

    #[test]
    fn test_register_replaces_and_rebuilds() {
        let mut hub = ConverterHub::new();
        hub.register(Arc::new(StepConverter::new(
            FormatVersion::PAGE_2019_07_15,
            FormatVersion::PAGE_2018_07_15,
        )));
        hub.register(Arc::new(StepConverter::new(
            FormatVersion::PAGE_2018_07_15,
            FormatVersion::PAGE_2017_07_15,
        )));
        hub.register(Arc::new(StepConverter::new(
            FormatVersion::PAGE_2018_07_15,
            FormatVersion::PAGE_2017_07_15,
        )));
        assert_eq!(hub.direct_count(), 2);
        assert_eq!(hub.build_chains().unwrap(), 1);
        assert_eq!(hub.len(), 3);
        assert_eq!(
            hub.routes().first(),
            Some(&(FormatVersion::PAGE_2018_07_15, FormatVersion::PAGE_2017_07_15))
        );
    }
}
