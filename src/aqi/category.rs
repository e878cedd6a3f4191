//! AQI severity categories and the classification table.
//!
//! | Range    | Category     | Colour          |
//! |----------|--------------|-----------------|
//! | 0–50     | Good         | green           |
//! | 51–100   | Satisfactory | lime            |
//! | 101–200  | Moderate     | amber           |
//! | 201–300  | Poor         | orange          |
//! | 301–400  | Very Poor    | red             |
//! | 401+     | Severe       | gray / purple   |
//!
//! Upper bounds are inclusive.  The Severe colour is a [`Palette`] setting,
//! not part of the table.

use serde::{Deserialize, Serialize};

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

// ---------------------------------------------------------------------------
// Colour tokens
// ---------------------------------------------------------------------------

/// Named colour used to render a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourToken {
    Green,
    Lime,
    Amber,
    Orange,
    Red,
    Gray,
    Purple,
}

impl ColourToken {
    /// CSS hex string, e.g. `#16A34A`.
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Green => "#16A34A",
            Self::Lime => "#84CC16",
            Self::Amber => "#F59E0B",
            Self::Orange => "#F97316",
            Self::Red => "#DC2626",
            Self::Gray => "#6B7280",
            Self::Purple => "#7E22CE",
        }
    }

    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Green => (0x16, 0xA3, 0x4A),
            Self::Lime => (0x84, 0xCC, 0x16),
            Self::Amber => (0xF5, 0x9E, 0x0B),
            Self::Orange => (0xF9, 0x73, 0x16),
            Self::Red => (0xDC, 0x26, 0x26),
            Self::Gray => (0x6B, 0x72, 0x80),
            Self::Purple => (0x7E, 0x22, 0xCE),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Lime => "lime",
            Self::Amber => "amber",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Gray => "gray",
            Self::Purple => "purple",
        }
    }
}

impl core::fmt::Display for ColourToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// The two Severe colours seen across deployments of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SevereColour {
    #[default]
    Gray,
    Purple,
}

impl From<SevereColour> for ColourToken {
    fn from(c: SevereColour) -> Self {
        match c {
            SevereColour::Gray => Self::Gray,
            SevereColour::Purple => Self::Purple,
        }
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// AQI severity bucket, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    Good = 0,
    Satisfactory = 1,
    Moderate = 2,
    Poor = 3,
    VeryPoor = 4,
    Severe = 5,
}

/// Inclusive upper bound of every category except the last, in ascending
/// order.  Severe is everything above the final bound.
const UPPER_BOUNDS: [(u32, Category); 5] = [
    (50, Category::Good),
    (100, Category::Satisfactory),
    (200, Category::Moderate),
    (300, Category::Poor),
    (400, Category::VeryPoor),
];

impl Category {
    /// Every category, best first.
    pub const ALL: [Self; 6] = [
        Self::Good,
        Self::Satisfactory,
        Self::Moderate,
        Self::Poor,
        Self::VeryPoor,
        Self::Severe,
    ];

    /// Classify a non-negative AQI value.
    pub fn classify(aqi: u32) -> Self {
        UPPER_BOUNDS
            .iter()
            .find(|(upper, _)| aqi <= *upper)
            .map_or(Self::Severe, |(_, cat)| *cat)
    }

    /// Classify a raw numeric value (e.g. straight off the wire).
    ///
    /// Returns `None` for negative or non-finite input.  Fractional values
    /// round up, so `50.3` is past the Good bound just as `50.3 <= 50` is
    /// false.
    pub fn from_value(value: f64) -> Option<Self> {
        ceil_aqi(value).map(Self::classify)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Satisfactory => "Satisfactory",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Severe => "Severe",
        }
    }

    /// Inclusive AQI range covered by this category.  `None` upper bound
    /// means open-ended.
    pub const fn range(self) -> (u32, Option<u32>) {
        match self {
            Self::Good => (0, Some(50)),
            Self::Satisfactory => (51, Some(100)),
            Self::Moderate => (101, Some(200)),
            Self::Poor => (201, Some(300)),
            Self::VeryPoor => (301, Some(400)),
            Self::Severe => (401, None),
        }
    }

    /// Legend text for the range, e.g. `51-100` or `401+`.
    pub const fn range_label(self) -> &'static str {
        match self {
            Self::Good => "0-50",
            Self::Satisfactory => "51-100",
            Self::Moderate => "101-200",
            Self::Poor => "201-300",
            Self::VeryPoor => "301-400",
            Self::Severe => "401+",
        }
    }

    pub fn contains(self, aqi: u32) -> bool {
        let (lo, hi) = self.range();
        aqi >= lo && hi.is_none_or(|hi| aqi <= hi)
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an AQI value.  Shorthand for [`Category::classify`].
pub fn classify(aqi: u32) -> Category {
    Category::classify(aqi)
}

/// Integer AQI for a raw value, rounding fractions up.
///
/// Every band bound is an integer, so `v <= bound` holds exactly when
/// `ceil(v) <= bound`.  `None` for negative or non-finite input.
pub fn ceil_aqi(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.ceil().min(f64::from(u32::MAX)) as u32)
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Maps categories to colour tokens.  Only the Severe colour varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    pub severe: SevereColour,
}

impl Palette {
    pub const fn new(severe: SevereColour) -> Self {
        Self { severe }
    }

    pub fn colour(&self, category: Category) -> ColourToken {
        match category {
            Category::Good => ColourToken::Green,
            Category::Satisfactory => ColourToken::Lime,
            Category::Moderate => ColourToken::Amber,
            Category::Poor => ColourToken::Orange,
            Category::VeryPoor => ColourToken::Red,
            Category::Severe => self.severe.into(),
        }
    }

    /// Resolve a category into its (label, colour) pair.
    pub fn band(&self, category: Category) -> Band {
        Band {
            category,
            label: category.label(),
            colour: self.colour(category),
        }
    }
}

/// A category with its resolved presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub category: Category,
    pub label: &'static str,
    pub colour: ColourToken,
}

// ---------------------------------------------------------------------------
// Legend
// ---------------------------------------------------------------------------

/// One row of the category legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub category: Category,
    pub label: &'static str,
    pub range: &'static str,
    pub colour: ColourToken,
    /// True for the category of the current prediction.
    pub active: bool,
}

/// Build the six-row legend, marking `active` if given.
pub fn legend(palette: &Palette, active: Option<Category>) -> [LegendEntry; 6] {
    Category::ALL.map(|category| LegendEntry {
        category,
        label: category.label(),
        range: category.range_label(),
        colour: palette.colour(category),
        active: active == Some(category),
    })
}
