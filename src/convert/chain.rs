//! Converters composed of several steps.

use super::converter::LayoutConverter;
use super::message::ConversionMessage;
use crate::error::{Error, Result};
use crate::model::PageLayout;
use crate::version::FormatVersion;
use std::sync::Arc;

/// Runs a sequence of converters, each picking up where the previous one
/// left off. Messages are concatenated in stage order.
#[derive(Debug, Clone)]
pub struct ChainConverter {
    stages: Vec<Arc<dyn LayoutConverter>>,
}

impl ChainConverter {
    /// Build a chain. Fails if `stages` is empty or two neighbouring stages
    /// do not meet at the same version.
    pub fn new(stages: Vec<Arc<dyn LayoutConverter>>) -> Result<Self> {
        if stages.is_empty() {
            return Err(Error::Other("a converter chain needs at least one stage".into()));
        }
        for pair in stages.windows(2) {
            if pair[0].target_version() != pair[1].source_version() {
                return Err(Error::Other(format!(
                    "converter chain is broken between {} and {}",
                    pair[0].target_version(),
                    pair[1].source_version()
                )));
            }
        }
        Ok(Self { stages })
    }

    pub fn stage_converters(&self) -> &[Arc<dyn LayoutConverter>] {
        &self.stages
    }
}

impl LayoutConverter for ChainConverter {
    fn source_version(&self) -> &FormatVersion {
        // non-empty by construction
        self.stages[0].source_version()
    }

    fn target_version(&self) -> &FormatVersion {
        self.stages[self.stages.len() - 1].target_version()
    }

    fn convert(&self, layout: &mut PageLayout) -> Vec<ConversionMessage> {
        let mut messages = Vec::new();
        for stage in &self.stages {
            messages.extend(stage.convert(layout));
        }
        messages
    }

    /// Later stages must see what earlier stages changed, so the check runs
    /// the whole chain on a copy of the layout.
    fn check_for_compliance(&self, layout: &PageLayout) -> Vec<ConversionMessage> {
        let mut scratch = layout.clone();
        self.convert(&mut scratch)
    }

    fn stage_count(&self) -> usize {
        self.stages.iter().map(|s| s.stage_count()).sum()
    }

    fn stages(&self) -> Vec<(FormatVersion, FormatVersion)> {
        self.stages.iter().flat_map(|s| s.stages()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::StepConverter;

    fn step(from: FormatVersion, to: FormatVersion) -> Arc<dyn LayoutConverter> {
        Arc::new(StepConverter::new(from, to))
    }

    #[test]
    fn test_chain_versions() {
        let chain = ChainConverter::new(vec![
            step(FormatVersion::PAGE_2019_07_15, FormatVersion::PAGE_2018_07_15),
            step(FormatVersion::PAGE_2018_07_15, FormatVersion::PAGE_2017_07_15),
        ])
        .unwrap();
        assert_eq!(chain.source_version(), &FormatVersion::PAGE_2019_07_15);
        assert_eq!(chain.target_version(), &FormatVersion::PAGE_2017_07_15);
        assert_eq!(chain.stage_count(), 2);
    }

    #[test]
    fn test_broken_chain_rejected() {
        assert!(ChainConverter::new(Vec::new()).is_err());
        assert!(ChainConverter::new(vec![
            step(FormatVersion::PAGE_2019_07_15, FormatVersion::PAGE_2018_07_15),
            step(FormatVersion::PAGE_2017_07_15, FormatVersion::PAGE_2016_07_15),
        ])
        .is_err());
    }
}
