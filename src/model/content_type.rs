//! Content type tags.

use crate::error::{Error, Result};
use crate::ident::prefix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Region subtype.
///
/// Region types outside the built-in set are represented by
/// [`RegionType::Generic`] and compare equal by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegionType {
    Text,
    Image,
    Graphic,
    LineDrawing,
    Chart,
    Separator,
    Maths,
    Advert,
    Chem,
    Music,
    Map,
    Table,
    Noise,
    Custom,
    Unknown,
    Generic(Arc<str>),
}

static BUILTIN_REGION_TYPES: [RegionType; 15] = [
    RegionType::Text,
    RegionType::Image,
    RegionType::Graphic,
    RegionType::LineDrawing,
    RegionType::Chart,
    RegionType::Separator,
    RegionType::Maths,
    RegionType::Advert,
    RegionType::Chem,
    RegionType::Music,
    RegionType::Map,
    RegionType::Table,
    RegionType::Noise,
    RegionType::Custom,
    RegionType::Unknown,
];

impl RegionType {
    /// Schema element name, e.g. `TextRegion`.
    pub fn name(&self) -> &str {
        match self {
            RegionType::Text => "TextRegion",
            RegionType::Image => "ImageRegion",
            RegionType::Graphic => "GraphicRegion",
            RegionType::LineDrawing => "LineDrawingRegion",
            RegionType::Chart => "ChartRegion",
            RegionType::Separator => "SeparatorRegion",
            RegionType::Maths => "MathsRegion",
            RegionType::Advert => "AdvertRegion",
            RegionType::Chem => "ChemRegion",
            RegionType::Music => "MusicRegion",
            RegionType::Map => "MapRegion",
            RegionType::Table => "TableRegion",
            RegionType::Noise => "NoiseRegion",
            RegionType::Custom => "CustomRegion",
            RegionType::Unknown => "UnknownRegion",
            RegionType::Generic(name) => name,
        }
    }

    /// Resolve a type name. Built-in names yield the built-in variant.
    pub fn from_name(name: &str) -> Self {
        BUILTIN_REGION_TYPES
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .unwrap_or_else(|| RegionType::Generic(name.into()))
    }

    /// All built-in region types.
    pub fn builtin() -> &'static [RegionType] {
        &BUILTIN_REGION_TYPES
    }

    pub fn is_text(&self) -> bool {
        *self == RegionType::Text
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for RegionType {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<RegionType> for String {
    fn from(t: RegionType) -> Self {
        t.name().to_string()
    }
}

/// Kind of a low-level text object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LowLevelTextType {
    TextLine,
    Word,
    Glyph,
}

impl LowLevelTextType {
    pub fn name(&self) -> &'static str {
        match self {
            LowLevelTextType::TextLine => "TextLine",
            LowLevelTextType::Word => "Word",
            LowLevelTextType::Glyph => "Glyph",
        }
    }

    /// Kind of the children this kind holds, if any.
    pub fn child_kind(&self) -> Option<LowLevelTextType> {
        match self {
            LowLevelTextType::TextLine => Some(LowLevelTextType::Word),
            LowLevelTextType::Word => Some(LowLevelTextType::Glyph),
            LowLevelTextType::Glyph => None,
        }
    }
}

/// Kind of a grapheme element inside a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphemeType {
    Grapheme,
    GraphemeGroup,
    NonPrintingCharacter,
}

impl GraphemeType {
    pub fn name(&self) -> &'static str {
        match self {
            GraphemeType::Grapheme => "Grapheme",
            GraphemeType::GraphemeGroup => "GraphemeGroup",
            GraphemeType::NonPrintingCharacter => "NonPrintingChar",
        }
    }
}

/// Tag of any content object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Region(RegionType),
    LowLevelText(LowLevelTextType),
    Grapheme(GraphemeType),
    MetadataItem,
}

impl ContentType {
    pub const TEXT_REGION: ContentType = ContentType::Region(RegionType::Text);
    pub const TEXT_LINE: ContentType = ContentType::LowLevelText(LowLevelTextType::TextLine);
    pub const WORD: ContentType = ContentType::LowLevelText(LowLevelTextType::Word);
    pub const GLYPH: ContentType = ContentType::LowLevelText(LowLevelTextType::Glyph);
    pub const GRAPHEME: ContentType = ContentType::Grapheme(GraphemeType::Grapheme);
    pub const GRAPHEME_GROUP: ContentType = ContentType::Grapheme(GraphemeType::GraphemeGroup);
    pub const NON_PRINTING_CHAR: ContentType =
        ContentType::Grapheme(GraphemeType::NonPrintingCharacter);

    /// Attribute template name.
    pub fn name(&self) -> &str {
        match self {
            ContentType::Region(t) => t.name(),
            ContentType::LowLevelText(t) => t.name(),
            ContentType::Grapheme(t) => t.name(),
            ContentType::MetadataItem => "MetadataItem",
        }
    }

    /// Id prefix for generated ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ContentType::Region(_) => prefix::REGION,
            ContentType::LowLevelText(LowLevelTextType::TextLine) => prefix::TEXT_LINE,
            ContentType::LowLevelText(LowLevelTextType::Word) => prefix::WORD,
            ContentType::LowLevelText(LowLevelTextType::Glyph) => prefix::GLYPH,
            ContentType::Grapheme(GraphemeType::Grapheme) => prefix::GRAPHEME,
            ContentType::Grapheme(GraphemeType::GraphemeGroup) => prefix::GRAPHEME_GROUP,
            ContentType::Grapheme(GraphemeType::NonPrintingCharacter) => prefix::NON_PRINTING_CHAR,
            ContentType::MetadataItem => prefix::METADATA_ITEM,
        }
    }

    /// Resolve a template name to a content type.
    pub fn from_name(name: &str) -> Self {
        match name {
            "TextLine" => Self::TEXT_LINE,
            "Word" => Self::WORD,
            "Glyph" => Self::GLYPH,
            "Grapheme" => Self::GRAPHEME,
            "GraphemeGroup" => Self::GRAPHEME_GROUP,
            "NonPrintingChar" => Self::NON_PRINTING_CHAR,
            "MetadataItem" => ContentType::MetadataItem,
            other => ContentType::Region(RegionType::from_name(other)),
        }
    }

    /// Whether objects of this type carry text content.
    pub fn is_text_bearing(&self) -> bool {
        matches!(
            self,
            ContentType::Region(RegionType::Text)
                | ContentType::LowLevelText(_)
                | ContentType::Grapheme(_)
        )
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Region role type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleType {
    TableCell,
}

impl RoleType {
    /// Attribute template name.
    pub fn name(&self) -> &'static str {
        match self {
            RoleType::TableCell => "TableCellRole",
        }
    }

    /// Resolve a role name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "TableCellRole" | "TableCell" => Ok(RoleType::TableCell),
            other => Err(Error::UnknownRoleType(other.to_string())),
        }
    }
}
