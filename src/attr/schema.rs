//! Attribute catalogue of the PAGE XML schema versions.
//!
//! Each entry names the owning content types, the value type, an optional
//! constraint and the range of schema versions (by index into
//! [`PAGE_VERSIONS`](crate::version::PAGE_VERSIONS)) in which the attribute
//! exists. Entries for the same attribute with non-overlapping version ranges
//! describe how its constraint changed over time.

use super::VariableType;

pub(crate) const V2009: usize = 0;
pub(crate) const V2010_01: usize = 1;
pub(crate) const V2010_03: usize = 2;
pub(crate) const V2013: usize = 3;
pub(crate) const V2016: usize = 4;
pub(crate) const V2017: usize = 5;
pub(crate) const V2018: usize = 6;
pub(crate) const V2019: usize = 7;
const LAST: usize = V2019;

#[derive(Debug, Clone, Copy)]
pub(crate) enum ConstraintSpec {
    None,
    Values(&'static [&'static str]),
    Range(Option<f64>, Option<f64>),
    Pattern(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AttributeSpec {
    pub owners: &'static [&'static str],
    pub name: &'static str,
    pub kind: VariableType,
    pub constraint: ConstraintSpec,
    pub since: usize,
    pub until: usize,
}

impl AttributeSpec {
    pub fn applies_to(&self, version: usize) -> bool {
        self.since <= version && version <= self.until
    }
}

/// First schema version that knows each content type.
pub(crate) const TYPE_SINCE: &[(&str, usize)] = &[
    ("Page", V2009),
    ("TextRegion", V2009),
    ("ImageRegion", V2009),
    ("LineDrawingRegion", V2009),
    ("GraphicRegion", V2009),
    ("TableRegion", V2009),
    ("ChartRegion", V2009),
    ("SeparatorRegion", V2009),
    ("MathsRegion", V2009),
    ("NoiseRegion", V2009),
    ("UnknownRegion", V2009),
    ("AdvertRegion", V2013),
    ("ChemRegion", V2013),
    ("MusicRegion", V2013),
    ("MapRegion", V2016),
    ("CustomRegion", V2018),
    ("TextLine", V2009),
    ("Word", V2009),
    ("Glyph", V2009),
    ("Grapheme", V2017),
    ("GraphemeGroup", V2017),
    ("NonPrintingChar", V2017),
    ("MetadataItem", V2018),
    ("TableCellRole", V2019),
];

pub(crate) fn type_since(type_name: &str) -> Option<usize> {
    TYPE_SINCE
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, since)| *since)
}

const ORIENTED_REGIONS: &[&str] = &[
    "TextRegion",
    "ImageRegion",
    "LineDrawingRegion",
    "GraphicRegion",
    "TableRegion",
    "ChartRegion",
    "SeparatorRegion",
    "MathsRegion",
    "AdvertRegion",
    "ChemRegion",
    "MusicRegion",
    "MapRegion",
];
const BG_REGIONS: &[&str] = &[
    "TextRegion",
    "ImageRegion",
    "LineDrawingRegion",
    "TableRegion",
    "ChartRegion",
    "MathsRegion",
    "AdvertRegion",
    "ChemRegion",
    "MusicRegion",
];
const EMB_TEXT_REGIONS: &[&str] = &[
    "ImageRegion",
    "LineDrawingRegion",
    "GraphicRegion",
    "TableRegion",
    "ChartRegion",
];
const TEXT_OBJECTS: &[&str] = &["TextRegion", "TextLine", "Word", "Glyph"];
const LANG_OBJECTS: &[&str] = &["TextRegion", "TextLine"];
const SCRIPT_OBJECTS: &[&str] = &["Page", "TextRegion", "TextLine", "Word"];
const GRAPHEME_ELEMENTS: &[&str] = &["Grapheme", "GraphemeGroup", "NonPrintingChar"];
const ALL_OBJECTS: &[&str] = &[
    "TextRegion",
    "ImageRegion",
    "LineDrawingRegion",
    "GraphicRegion",
    "TableRegion",
    "ChartRegion",
    "SeparatorRegion",
    "MathsRegion",
    "NoiseRegion",
    "UnknownRegion",
    "AdvertRegion",
    "ChemRegion",
    "MusicRegion",
    "MapRegion",
    "CustomRegion",
    "TextLine",
    "Word",
    "Glyph",
    "Grapheme",
    "GraphemeGroup",
    "NonPrintingChar",
];

/// Script names used up to the 2013 schema.
pub const LEGACY_SCRIPTS: &[&str] = &[
    "Arabic",
    "Bengali",
    "Cyrillic",
    "Devangari",
    "Ethiopic",
    "Greek",
    "Gujarati",
    "Gurmukhi",
    "Chinese-simplified",
    "Chinese-traditional",
    "Hebrew",
    "Latin",
    "Thai",
    "other",
];

/// ISO 15924 based script names used from the 2016 schema on.
pub const ISO_SCRIPTS: &[&str] = &[
    "Arab - Arabic",
    "Beng - Bengali",
    "Cyrl - Cyrillic",
    "Deva - Devanagari (Nagari)",
    "Ethi - Ethiopic",
    "Grek - Greek",
    "Gujr - Gujarati",
    "Guru - Gurmukhi",
    "Hans - Han (Simplified variant)",
    "Hant - Han (Traditional variant)",
    "Hebr - Hebrew",
    "Latn - Latin",
    "Thai - Thai",
    "other",
];

const READING_DIRECTIONS: &[&str] = &[
    "left-to-right",
    "right-to-left",
    "top-to-bottom",
    "bottom-to-top",
];
const TEXT_LINE_ORDERS: &[&str] = &["top-to-bottom", "bottom-to-top", "left-to-right", "right-to-left"];
const PRODUCTION: &[&str] = &[
    "printed",
    "typewritten",
    "handwritten-cursive",
    "handwritten-printscript",
    "medieval-manuscript",
    "other",
];
const COLOURS: &[&str] = &[
    "black", "blue", "brown", "cyan", "green", "grey", "indigo", "magenta", "orange", "pink",
    "red", "turquoise", "violet", "white", "yellow", "other",
];
const TEXT_TYPES_OLD: &[&str] = &[
    "paragraph",
    "heading",
    "caption",
    "header",
    "footer",
    "page-number",
    "drop-capital",
    "credit",
    "floating",
    "signature-mark",
    "catch-word",
    "marginalia",
    "footnote",
    "footnote-continued",
    "TOC-entry",
    "other",
];
const TEXT_TYPES_NEW: &[&str] = &[
    "paragraph",
    "heading",
    "caption",
    "header",
    "footer",
    "page-number",
    "drop-capital",
    "credit",
    "floating",
    "signature-mark",
    "catch-word",
    "marginalia",
    "footnote",
    "footnote-continued",
    "endnote",
    "TOC-entry",
    "list-label",
    "other",
];
const PAGE_TYPES: &[&str] = &[
    "front-cover",
    "back-cover",
    "title",
    "table-of-contents",
    "index",
    "content",
    "blank",
    "other",
];
const GRAPHIC_TYPES: &[&str] = &[
    "logo",
    "letterhead",
    "decoration",
    "frame",
    "handwritten-annotation",
    "stamp",
    "signature",
    "barcode",
    "paper-grow",
    "punch-hole",
    "other",
];
const CHART_TYPES: &[&str] = &["bar", "line", "pie", "scatter", "surface", "other"];
const COLOUR_DEPTHS: &[&str] = &["bilevel", "greyscale", "colour", "other"];
const ALIGNMENTS: &[&str] = &["left", "centre", "right", "justify"];
const RESOLUTION_UNITS: &[&str] = &["PPI", "PPCM", "other"];
const CHAR_TYPES: &[&str] = &["base", "combining"];
const METADATA_ITEM_TYPES: &[&str] = &["author", "imageProperties", "processingStep", "other"];

const CONFIDENCE: ConstraintSpec = ConstraintSpec::Range(Some(0.0), Some(1.0));
const ANGLE: ConstraintSpec = ConstraintSpec::Range(Some(-179.999), Some(180.0));
const NON_NEGATIVE: ConstraintSpec = ConstraintSpec::Range(Some(0.0), None);
const POSITIVE: ConstraintSpec = ConstraintSpec::Range(Some(1.0), None);

const fn attr(
    owners: &'static [&'static str],
    name: &'static str,
    kind: VariableType,
    constraint: ConstraintSpec,
    since: usize,
    until: usize,
) -> AttributeSpec {
    AttributeSpec {
        owners,
        name,
        kind,
        constraint,
        since,
        until,
    }
}

use ConstraintSpec::{None as Free, Pattern, Values};
use VariableType::{Boolean, Double, Integer, String as Str};

/// The catalogue. Order within an owner is the attribute order of its template.
pub(crate) const ATTRIBUTES: &[AttributeSpec] = &[
    // Page
    attr(&["Page"], "imageFilename", Str, Free, V2009, LAST),
    attr(&["Page"], "imageWidth", Integer, NON_NEGATIVE, V2009, LAST),
    attr(&["Page"], "imageHeight", Integer, NON_NEGATIVE, V2009, LAST),
    attr(&["Page"], "imageXResolution", Double, NON_NEGATIVE, V2016, LAST),
    attr(&["Page"], "imageYResolution", Double, NON_NEGATIVE, V2016, LAST),
    attr(&["Page"], "imageResolutionUnit", Str, Values(RESOLUTION_UNITS), V2016, LAST),
    attr(&["Page"], "type", Str, Values(PAGE_TYPES), V2013, LAST),
    attr(&["Page"], "orientation", Double, ANGLE, V2016, LAST),
    attr(&["Page"], "primaryLanguage", Str, Free, V2013, LAST),
    attr(&["Page"], "secondaryLanguage", Str, Free, V2013, LAST),
    attr(&["Page"], "readingDirection", Str, Values(READING_DIRECTIONS), V2013, LAST),
    attr(&["Page"], "textLineOrder", Str, Values(TEXT_LINE_ORDERS), V2013, LAST),
    attr(&["Page"], "conf", Double, CONFIDENCE, V2017, LAST),
    attr(&["Page"], "custom", Str, Free, V2013, LAST),
    // Scripts
    attr(SCRIPT_OBJECTS, "primaryScript", Str, Values(LEGACY_SCRIPTS), V2009, V2013),
    attr(SCRIPT_OBJECTS, "primaryScript", Str, Values(ISO_SCRIPTS), V2016, LAST),
    attr(SCRIPT_OBJECTS, "secondaryScript", Str, Values(LEGACY_SCRIPTS), V2010_03, V2013),
    attr(SCRIPT_OBJECTS, "secondaryScript", Str, Values(ISO_SCRIPTS), V2016, LAST),
    attr(&["Glyph"], "script", Str, Values(LEGACY_SCRIPTS), V2013, V2013),
    attr(&["Glyph"], "script", Str, Values(ISO_SCRIPTS), V2016, LAST),
    // Regions, shared
    attr(ORIENTED_REGIONS, "orientation", Double, ANGLE, V2009, LAST),
    attr(BG_REGIONS, "bgColour", Str, Values(COLOURS), V2009, LAST),
    attr(EMB_TEXT_REGIONS, "embText", Boolean, Free, V2009, LAST),
    // TextRegion
    attr(&["TextRegion"], "type", Str, Values(TEXT_TYPES_OLD), V2009, V2013),
    attr(&["TextRegion"], "type", Str, Values(TEXT_TYPES_NEW), V2016, LAST),
    attr(&["TextRegion"], "leading", Integer, Free, V2009, LAST),
    attr(&["TextRegion"], "readingDirection", Str, Values(READING_DIRECTIONS), V2009, LAST),
    attr(&["TextRegion"], "textLineOrder", Str, Values(TEXT_LINE_ORDERS), V2013, LAST),
    attr(&["TextRegion"], "readingOrientation", Double, ANGLE, V2013, LAST),
    attr(&["TextRegion"], "indented", Boolean, Free, V2009, LAST),
    attr(&["TextRegion"], "align", Str, Values(ALIGNMENTS), V2013, LAST),
    attr(LANG_OBJECTS, "primaryLanguage", Str, Free, V2009, LAST),
    attr(&["TextRegion"], "secondaryLanguage", Str, Free, V2010_01, LAST),
    attr(&["Word"], "language", Str, Free, V2009, LAST),
    attr(&["TextRegion"], "continuation", Boolean, Free, V2016, LAST),
    // Text lines
    attr(&["TextLine"], "readingDirection", Str, Values(READING_DIRECTIONS), V2013, LAST),
    attr(&["TextLine"], "index", Integer, NON_NEGATIVE, V2018, LAST),
    attr(&["Word"], "readingDirection", Str, Values(READING_DIRECTIONS), V2013, LAST),
    attr(&["Glyph"], "ligature", Boolean, Free, V2009, LAST),
    attr(&["Glyph"], "symbol", Boolean, Free, V2009, LAST),
    attr(TEXT_OBJECTS, "production", Str, Values(PRODUCTION), V2013, LAST),
    // Text style
    attr(TEXT_OBJECTS, "fontFamily", Str, Free, V2009, LAST),
    attr(TEXT_OBJECTS, "fontSize", Double, NON_NEGATIVE, V2009, LAST),
    attr(TEXT_OBJECTS, "textColour", Str, Values(COLOURS), V2009, LAST),
    attr(TEXT_OBJECTS, "textColourRgb", Str, Pattern("#[0-9a-fA-F]{6}"), V2018, LAST),
    attr(TEXT_OBJECTS, "bold", Boolean, Free, V2009, LAST),
    attr(TEXT_OBJECTS, "italic", Boolean, Free, V2009, LAST),
    attr(TEXT_OBJECTS, "underlined", Boolean, Free, V2009, LAST),
    attr(TEXT_OBJECTS, "subscript", Boolean, Free, V2009, LAST),
    attr(TEXT_OBJECTS, "superscript", Boolean, Free, V2009, LAST),
    attr(TEXT_OBJECTS, "strikethrough", Boolean, Free, V2013, LAST),
    attr(TEXT_OBJECTS, "smallCaps", Boolean, Free, V2009, LAST),
    attr(TEXT_OBJECTS, "letterSpaced", Boolean, Free, V2009, LAST),
    attr(TEXT_OBJECTS, "serif", Boolean, Free, V2009, LAST),
    attr(TEXT_OBJECTS, "monospace", Boolean, Free, V2009, LAST),
    // Other regions
    attr(&["ImageRegion"], "colourDepth", Str, Values(COLOUR_DEPTHS), V2009, LAST),
    attr(&["LineDrawingRegion"], "penColour", Str, Values(COLOURS), V2009, LAST),
    attr(&["GraphicRegion"], "type", Str, Values(GRAPHIC_TYPES), V2009, LAST),
    attr(&["GraphicRegion", "ChartRegion"], "numColours", Integer, NON_NEGATIVE, V2009, LAST),
    attr(&["ChartRegion"], "type", Str, Values(CHART_TYPES), V2009, LAST),
    attr(&["SeparatorRegion"], "colour", Str, Values(COLOURS), V2009, LAST),
    attr(&["TableRegion"], "rows", Integer, NON_NEGATIVE, V2009, LAST),
    attr(&["TableRegion"], "columns", Integer, NON_NEGATIVE, V2009, LAST),
    attr(&["TableRegion"], "lineColour", Str, Values(COLOURS), V2009, LAST),
    attr(&["TableRegion"], "lineSeparators", Boolean, Free, V2009, LAST),
    attr(&["CustomRegion"], "type", Str, Free, V2018, LAST),
    // Grapheme elements
    attr(GRAPHEME_ELEMENTS, "index", Integer, NON_NEGATIVE, V2017, LAST),
    attr(GRAPHEME_ELEMENTS, "ligature", Boolean, Free, V2017, LAST),
    attr(GRAPHEME_ELEMENTS, "charType", Str, Values(CHAR_TYPES), V2017, LAST),
    // Common
    attr(ALL_OBJECTS, "custom", Str, Free, V2013, LAST),
    attr(ALL_OBJECTS, "comments", Str, Free, V2013, LAST),
    attr(ALL_OBJECTS, "conf", Double, CONFIDENCE, V2017, LAST),
    // Roles
    attr(&["TableCellRole"], "rowIndex", Integer, NON_NEGATIVE, V2019, LAST),
    attr(&["TableCellRole"], "columnIndex", Integer, NON_NEGATIVE, V2019, LAST),
    attr(&["TableCellRole"], "rowSpan", Integer, POSITIVE, V2019, LAST),
    attr(&["TableCellRole"], "colSpan", Integer, POSITIVE, V2019, LAST),
    attr(&["TableCellRole"], "header", Boolean, Free, V2019, LAST),
    // Metadata items
    attr(&["MetadataItem"], "type", Str, Values(METADATA_ITEM_TYPES), V2018, LAST),
    attr(&["MetadataItem"], "name", Str, Free, V2018, LAST),
    attr(&["MetadataItem"], "value", Str, Free, V2018, LAST),
    attr(&["MetadataItem"], "date", Str, Free, V2018, LAST),
];
