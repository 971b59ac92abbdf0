//! Format versions.
//!
//! PAGE XML versions are identified by their schema release date and are
//! totally ordered. Foreign layout formats (ALTO, ABBYY FineReader, hOCR,
//! Google Vision) are recognised so that pages read from them can be tagged,
//! but they only order against versions of their own family.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

const PAGE_NAMESPACE_PREFIX: &str = "http://schema.primaresearch.org/PAGE/gts/pagecontent/";

/// Family a format version belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatFamily {
    /// PAGE XML, versioned by schema date
    PageXml,
    /// ALTO, versioned by namespace
    Alto,
    /// ABBYY FineReader XML
    Abbyy,
    /// hOCR (HTML microformat)
    Hocr,
    /// Google Cloud Vision JSON
    GoogleVision,
    /// Anything else
    Other,
}

/// An opaque, comparable format version token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FormatVersion {
    family: FormatFamily,
    name: Cow<'static, str>,
}

impl FormatVersion {
    const fn known(family: FormatFamily, name: &'static str) -> Self {
        Self {
            family,
            name: Cow::Borrowed(name),
        }
    }

    pub const PAGE_2009_03_16: FormatVersion = Self::known(FormatFamily::PageXml, "2009-03-16");
    pub const PAGE_2010_01_12: FormatVersion = Self::known(FormatFamily::PageXml, "2010-01-12");
    pub const PAGE_2010_03_19: FormatVersion = Self::known(FormatFamily::PageXml, "2010-03-19");
    pub const PAGE_2013_07_15: FormatVersion = Self::known(FormatFamily::PageXml, "2013-07-15");
    pub const PAGE_2016_07_15: FormatVersion = Self::known(FormatFamily::PageXml, "2016-07-15");
    pub const PAGE_2017_07_15: FormatVersion = Self::known(FormatFamily::PageXml, "2017-07-15");
    pub const PAGE_2018_07_15: FormatVersion = Self::known(FormatFamily::PageXml, "2018-07-15");
    pub const PAGE_2019_07_15: FormatVersion = Self::known(FormatFamily::PageXml, "2019-07-15");

    pub const ALTO_CCS: FormatVersion =
        Self::known(FormatFamily::Alto, "http://schema.ccs-gmbh.com/ALTO");
    pub const ALTO_V2: FormatVersion =
        Self::known(FormatFamily::Alto, "http://www.loc.gov/standards/alto/ns-v2#");
    pub const ALTO_V3: FormatVersion =
        Self::known(FormatFamily::Alto, "http://www.loc.gov/standards/alto/ns-v3#");
    pub const ALTO_V4: FormatVersion =
        Self::known(FormatFamily::Alto, "http://www.loc.gov/standards/alto/ns-v4#");
    pub const ABBYY_FR10: FormatVersion = Self::known(
        FormatFamily::Abbyy,
        "http://www.abbyy.com/FineReader_xml/FineReader10-schema-v1.xml",
    );
    pub const HOCR: FormatVersion = Self::known(FormatFamily::Hocr, "hOCR");
    pub const GOOGLE_VISION: FormatVersion = Self::known(FormatFamily::GoogleVision, "GoogleVision");

    /// Latest PAGE XML version.
    pub const LATEST_PAGE: FormatVersion = Self::PAGE_2019_07_15;

    /// Create a PAGE XML version from its schema date.
    pub fn page(date: impl Into<String>) -> Self {
        Self {
            family: FormatFamily::PageXml,
            name: Cow::Owned(date.into()),
        }
    }

    /// Create a version of an unrecognised format.
    pub fn other(name: impl Into<String>) -> Self {
        Self {
            family: FormatFamily::Other,
            name: Cow::Owned(name.into()),
        }
    }

    /// Resolve a version string.
    ///
    /// Accepts PAGE schema dates, full PAGE namespace URIs, the known ALTO
    /// and ABBYY namespace URIs, `hOCR` and `GoogleVision`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let date = s.strip_prefix(PAGE_NAMESPACE_PREFIX).unwrap_or(s);
        if let Some(v) = PAGE_VERSIONS.iter().find(|v| v.name == date) {
            return Ok(v.clone());
        }
        if is_schema_date(date) {
            return Ok(Self::page(date));
        }
        FOREIGN_VERSIONS
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(s))
            .cloned()
            .ok_or_else(|| Error::UnknownFormatVersion(s.to_string()))
    }

    /// Version family.
    pub fn family(&self) -> FormatFamily {
        self.family
    }

    /// Version name (schema date or namespace).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether this is a PAGE XML version.
    pub fn is_page(&self) -> bool {
        self.family == FormatFamily::PageXml
    }

    /// Namespace URI of this version.
    pub fn namespace(&self) -> Cow<'_, str> {
        match self.family {
            FormatFamily::PageXml => Cow::Owned(format!("{}{}", PAGE_NAMESPACE_PREFIX, self.name)),
            _ => Cow::Borrowed(&self.name),
        }
    }

    /// Strictly newer, same family.
    pub fn is_newer_than(&self, other: &FormatVersion) -> bool {
        self.partial_cmp(other) == Some(Ordering::Greater)
    }

    /// Strictly older, same family.
    pub fn is_older_than(&self, other: &FormatVersion) -> bool {
        self.partial_cmp(other) == Some(Ordering::Less)
    }

    fn rank(&self) -> Option<usize> {
        match self.family {
            FormatFamily::Alto => FOREIGN_VERSIONS[..4].iter().position(|v| v == self),
            _ => None,
        }
    }
}

impl PartialOrd for FormatVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.family != other.family {
            return None;
        }
        match self.family {
            // ISO dates order lexicographically
            FormatFamily::PageXml => Some(self.name.cmp(&other.name)),
            FormatFamily::Alto => Some(self.rank()?.cmp(&other.rank()?)),
            _ => (self.name == other.name).then_some(Ordering::Equal),
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Names [`FormatVersion::parse`] does not recognise become
/// [`FormatFamily::Other`] versions.
impl From<String> for FormatVersion {
    fn from(s: String) -> Self {
        Self::parse(&s).unwrap_or_else(|_| Self::other(s))
    }
}

impl From<FormatVersion> for String {
    fn from(v: FormatVersion) -> Self {
        v.name.into_owned()
    }
}

/// All PAGE XML versions, oldest first.
pub const PAGE_VERSIONS: [FormatVersion; 8] = [
    FormatVersion::PAGE_2009_03_16,
    FormatVersion::PAGE_2010_01_12,
    FormatVersion::PAGE_2010_03_19,
    FormatVersion::PAGE_2013_07_15,
    FormatVersion::PAGE_2016_07_15,
    FormatVersion::PAGE_2017_07_15,
    FormatVersion::PAGE_2018_07_15,
    FormatVersion::PAGE_2019_07_15,
];

/// Recognised foreign format versions. ALTO entries come first, oldest first.
pub const FOREIGN_VERSIONS: [FormatVersion; 7] = [
    FormatVersion::ALTO_CCS,
    FormatVersion::ALTO_V2,
    FormatVersion::ALTO_V3,
    FormatVersion::ALTO_V4,
    FormatVersion::ABBYY_FR10,
    FormatVersion::HOCR,
    FormatVersion::GOOGLE_VISION,
];

fn is_schema_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}
