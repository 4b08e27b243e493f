//! Named color palette offered to the stroke and fill pickers.
//!
//! The palette is an immutable table built once and passed by reference to
//! whoever needs it. It always contains `Black` and `Transparent`, which
//! are the default stroke and fill of new shapes.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Name of the default stroke color.
pub const BLACK: &str = "Black";
/// Name of the default fill color.
pub const TRANSPARENT: &str = "Transparent";

/// Palette errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Unknown color: {0}")]
    UnknownColor(String),
    #[error("Palette is missing required color: {0}")]
    MissingDefault(&'static str),
    #[error("Duplicate color name: {0}")]
    DuplicateName(String),
}

/// Stored color value (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorValue {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Fully transparent white, matching the `Transparent` palette entry.
    pub const fn transparent() -> Self {
        Self::new(255, 255, 255, 0)
    }

    /// Whether this color paints nothing.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl From<Color> for ColorValue {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<ColorValue> for Color {
    fn from(color: ColorValue) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A single named palette color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub name: String,
    pub color: ColorValue,
}

impl PaletteEntry {
    pub fn new(name: impl Into<String>, color: ColorValue) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Immutable, enumerable set of named colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    entries: Vec<PaletteEntry>,
    stroke_default: ColorValue,
    fill_default: ColorValue,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::named_colors()
    }
}

impl ColorPalette {
    /// The full table of named colors, in alphabetical order.
    pub fn named_colors() -> Self {
        let entries = NAMED_COLORS
            .iter()
            .map(|&(name, argb)| PaletteEntry::new(name, ColorValue::from_argb(argb)))
            .collect();
        Self {
            entries,
            stroke_default: ColorValue::black(),
            fill_default: ColorValue::transparent(),
        }
    }

    /// Build a custom palette.
    ///
    /// Entry order is kept as given and decides which name wins a reverse
    /// lookup when two names share a value.
    pub fn from_entries(entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(PaletteError::DuplicateName(entry.name.clone()));
            }
        }

        let find = |name: &'static str| {
            entries
                .iter()
                .find(|e| e.name == name)
                .map(|e| e.color)
                .ok_or(PaletteError::MissingDefault(name))
        };
        let stroke_default = find(BLACK)?;
        let fill_default = find(TRANSPARENT)?;

        Ok(Self {
            entries,
            stroke_default,
            fill_default,
        })
    }

    /// All entries in enumeration order.
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its exact name.
    pub fn by_name(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Look up the first entry carrying `color`.
    pub fn by_color(&self, color: ColorValue) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.color == color)
    }

    /// Resolve a color name, failing on unknown names.
    pub fn color(&self, name: &str) -> Result<ColorValue, PaletteError> {
        self.by_name(name)
            .map(|e| e.color)
            .ok_or_else(|| PaletteError::UnknownColor(name.to_string()))
    }

    /// Name of a color value, if the palette has one.
    pub fn name_of(&self, color: ColorValue) -> Option<&str> {
        self.by_color(color).map(|e| e.name.as_str())
    }

    pub fn default_stroke(&self) -> ColorValue {
        self.stroke_default
    }

    pub fn default_fill(&self) -> ColorValue {
        self.fill_default
    }
}

// Named colors as 0xAARRGGBB.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("AliceBlue", 0xFFF0F8FF),
    ("AntiqueWhite", 0xFFFAEBD7),
    ("Aqua", 0xFF00FFFF),
    ("Aquamarine", 0xFF7FFFD4),
    ("Azure", 0xFFF0FFFF),
    ("Beige", 0xFFF5F5DC),
    ("Bisque", 0xFFFFE4C4),
    ("Black", 0xFF000000),
    ("BlanchedAlmond", 0xFFFFEBCD),
    ("Blue", 0xFF0000FF),
    ("BlueViolet", 0xFF8A2BE2),
    ("Brown", 0xFFA52A2A),
    ("BurlyWood", 0xFFDEB887),
    ("CadetBlue", 0xFF5F9EA0),
    ("Chartreuse", 0xFF7FFF00),
    ("Chocolate", 0xFFD2691E),
    ("Coral", 0xFFFF7F50),
    ("CornflowerBlue", 0xFF6495ED),
    ("Cornsilk", 0xFFFFF8DC),
    ("Crimson", 0xFFDC143C),
    ("Cyan", 0xFF00FFFF),
    ("DarkBlue", 0xFF00008B),
    ("DarkCyan", 0xFF008B8B),
    ("DarkGoldenrod", 0xFFB8860B),
    ("DarkGray", 0xFFA9A9A9),
    ("DarkGreen", 0xFF006400),
    ("DarkKhaki", 0xFFBDB76B),
    ("DarkMagenta", 0xFF8B008B),
    ("DarkOliveGreen", 0xFF556B2F),
    ("DarkOrange", 0xFFFF8C00),
    ("DarkOrchid", 0xFF9932CC),
    ("DarkRed", 0xFF8B0000),
    ("DarkSalmon", 0xFFE9967A),
    ("DarkSeaGreen", 0xFF8FBC8F),
    ("DarkSlateBlue", 0xFF483D8B),
    ("DarkSlateGray", 0xFF2F4F4F),
    ("DarkTurquoise", 0xFF00CED1),
    ("DarkViolet", 0xFF9400D3),
    ("DeepPink", 0xFFFF1493),
    ("DeepSkyBlue", 0xFF00BFFF),
    ("DimGray", 0xFF696969),
    ("DodgerBlue", 0xFF1E90FF),
    ("Firebrick", 0xFFB22222),
    ("FloralWhite", 0xFFFFFAF0),
    ("ForestGreen", 0xFF228B22),
    ("Fuchsia", 0xFFFF00FF),
    ("Gainsboro", 0xFFDCDCDC),
    ("GhostWhite", 0xFFF8F8FF),
    ("Gold", 0xFFFFD700),
    ("Goldenrod", 0xFFDAA520),
    ("Gray", 0xFF808080),
    ("Green", 0xFF008000),
    ("GreenYellow", 0xFFADFF2F),
    ("Honeydew", 0xFFF0FFF0),
    ("HotPink", 0xFFFF69B4),
    ("IndianRed", 0xFFCD5C5C),
    ("Indigo", 0xFF4B0082),
    ("Ivory", 0xFFFFFFF0),
    ("Khaki", 0xFFF0E68C),
    ("Lavender", 0xFFE6E6FA),
    ("LavenderBlush", 0xFFFFF0F5),
    ("LawnGreen", 0xFF7CFC00),
    ("LemonChiffon", 0xFFFFFACD),
    ("LightBlue", 0xFFADD8E6),
    ("LightCoral", 0xFFF08080),
    ("LightCyan", 0xFFE0FFFF),
    ("LightGoldenrodYellow", 0xFFFAFAD2),
    ("LightGray", 0xFFD3D3D3),
    ("LightGreen", 0xFF90EE90),
    ("LightPink", 0xFFFFB6C1),
    ("LightSalmon", 0xFFFFA07A),
    ("LightSeaGreen", 0xFF20B2AA),
    ("LightSkyBlue", 0xFF87CEFA),
    ("LightSlateGray", 0xFF778899),
    ("LightSteelBlue", 0xFFB0C4DE),
    ("LightYellow", 0xFFFFFFE0),
    ("Lime", 0xFF00FF00),
    ("LimeGreen", 0xFF32CD32),
    ("Linen", 0xFFFAF0E6),
    ("Magenta", 0xFFFF00FF),
    ("Maroon", 0xFF800000),
    ("MediumAquamarine", 0xFF66CDAA),
    ("MediumBlue", 0xFF0000CD),
    ("MediumOrchid", 0xFFBA55D3),
    ("MediumPurple", 0xFF9370DB),
    ("MediumSeaGreen", 0xFF3CB371),
    ("MediumSlateBlue", 0xFF7B68EE),
    ("MediumSpringGreen", 0xFF00FA9A),
    ("MediumTurquoise", 0xFF48D1CC),
    ("MediumVioletRed", 0xFFC71585),
    ("MidnightBlue", 0xFF191970),
    ("MintCream", 0xFFF5FFFA),
    ("MistyRose", 0xFFFFE4E1),
    ("Moccasin", 0xFFFFE4B5),
    ("NavajoWhite", 0xFFFFDEAD),
    ("Navy", 0xFF000080),
    ("OldLace", 0xFFFDF5E6),
    ("Olive", 0xFF808000),
    ("OliveDrab", 0xFF6B8E23),
    ("Orange", 0xFFFFA500),
    ("OrangeRed", 0xFFFF4500),
    ("Orchid", 0xFFDA70D6),
    ("PaleGoldenrod", 0xFFEEE8AA),
    ("PaleGreen", 0xFF98FB98),
    ("PaleTurquoise", 0xFFAFEEEE),
    ("PaleVioletRed", 0xFFDB7093),
    ("PapayaWhip", 0xFFFFEFD5),
    ("PeachPuff", 0xFFFFDAB9),
    ("Peru", 0xFFCD853F),
    ("Pink", 0xFFFFC0CB),
    ("Plum", 0xFFDDA0DD),
    ("PowderBlue", 0xFFB0E0E6),
    ("Purple", 0xFF800080),
    ("Red", 0xFFFF0000),
    ("RosyBrown", 0xFFBC8F8F),
    ("RoyalBlue", 0xFF4169E1),
    ("SaddleBrown", 0xFF8B4513),
    ("Salmon", 0xFFFA8072),
    ("SandyBrown", 0xFFF4A460),
    ("SeaGreen", 0xFF2E8B57),
    ("SeaShell", 0xFFFFF5EE),
    ("Sienna", 0xFFA0522D),
    ("Silver", 0xFFC0C0C0),
    ("SkyBlue", 0xFF87CEEB),
    ("SlateBlue", 0xFF6A5ACD),
    ("SlateGray", 0xFF708090),
    ("Snow", 0xFFFFFAFA),
    ("SpringGreen", 0xFF00FF7F),
    ("SteelBlue", 0xFF4682B4),
    ("Tan", 0xFFD2B48C),
    ("Teal", 0xFF008080),
    ("Thistle", 0xFFD8BFD8),
    ("Tomato", 0xFFFF6347),
    ("Transparent", 0x00FFFFFF),
    ("Turquoise", 0xFF40E0D0),
    ("Violet", 0xFFEE82EE),
    ("Wheat", 0xFFF5DEB3),
    ("White", 0xFFFFFFFF),
    ("WhiteSmoke", 0xFFF5F5F5),
    ("Yellow", 0xFFFFFF00),
    ("YellowGreen", 0xFF9ACD32),
];
