//! Options for page conversion.

/// What to do when no converter exists between two versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingRoute {
    /// Log a warning and only reconcile attributes
    #[default]
    Proceed,

    /// Return an error and leave the page untouched
    Fail,
}

/// Options for [`ConverterHub::convert_with_options`](super::ConverterHub::convert_with_options).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Behaviour for versions without a conversion route
    pub missing_route: MissingRoute,

    /// Reconcile attributes against the target templates after conversion
    pub adapt_attributes: bool,

    /// Also translate script names on the page and on text lines, words and
    /// glyphs; the built-in converters only touch text regions
    pub text_object_scripts: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            missing_route: MissingRoute::Proceed,
            adapt_attributes: true,
            text_object_scripts: false,
        }
    }
}

impl ConvertOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that fail on a missing route.
    pub fn strict() -> Self {
        Self::default().with_missing_route(MissingRoute::Fail)
    }

    /// Set the missing-route behaviour.
    pub fn with_missing_route(mut self, missing_route: MissingRoute) -> Self {
        self.missing_route = missing_route;
        self
    }

    /// Enable or disable attribute reconciliation.
    pub fn with_attribute_adaptation(mut self, adapt: bool) -> Self {
        self.adapt_attributes = adapt;
        self
    }

    /// Enable or disable script translation beyond text regions.
    pub fn with_text_object_scripts(mut self, enabled: bool) -> Self {
        self.text_object_scripts = enabled;
        self
    }
}
