//! Crossing categories, panel fallbacks, and the marker style resolver.

use crate::geojson::Feature;

pub const NAME_KEY: &str = "name";
pub const DESCRIPTION_KEY: &str = "description";
pub const CATEGORY_KEY: &str = "category";

/// Panel text when a crossing has no `name` property.
pub const UNNAMED_CROSSING: &str = "Unnamed crossing";
/// Panel text when a crossing has no `description` property.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Categorical crossing attribute, as written by the offline pipeline.
/// Values outside the known set parse to `Unknown` so the style resolver
/// always has a deterministic answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossingCategory {
    UnderConstruction,
    FormalCrossing,
    InformalCrossing,
    #[default]
    Unknown,
}

/// Known categories, in legend display order.
pub const LEGEND_CATEGORIES: [CrossingCategory; 3] = [
    CrossingCategory::FormalCrossing,
    CrossingCategory::InformalCrossing,
    CrossingCategory::UnderConstruction,
];

impl CrossingCategory {
    /// Parse the raw attribute value. Matching is exact; anything else is
    /// `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Under_Construction" => Self::UnderConstruction,
            "Formal_Crossing" => Self::FormalCrossing,
            "Informal_Crossing" => Self::InformalCrossing,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label for the legend and info panel.
    pub fn label(self) -> &'static str {
        match self {
            Self::UnderConstruction => "Under construction",
            Self::FormalCrossing => "Formal crossing",
            Self::InformalCrossing => "Informal crossing",
            Self::Unknown => "Uncategorized",
        }
    }
}

/// Attributes of one crossing point, with panel fallbacks already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossingInfo {
    pub name: String,
    pub description: String,
    pub category: CrossingCategory,
}

impl CrossingInfo {
    pub fn from_feature(feature: &Feature) -> Self {
        let name = feature
            .property_str(NAME_KEY)
            .unwrap_or(UNNAMED_CROSSING)
            .to_string();
        let description = feature
            .property_str(DESCRIPTION_KEY)
            .unwrap_or(NO_DESCRIPTION)
            .to_string();
        let category = feature
            .property_str(CATEGORY_KEY)
            .map(CrossingCategory::parse)
            .unwrap_or_default();
        Self {
            name,
            description,
            category,
        }
    }
}

/// Renderer-agnostic marker style; the rendering crate converts the RGB
/// triples to its own color type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill_color: [u8; 3],
    pub stroke_color: [u8; 3],
    pub stroke_weight: f32,
    pub fill_opacity: f32,
    pub stroke_opacity: f32,
    pub radius: f32,
}

/// Resolve the marker style for a category. Every category, including
/// `Unknown`, yields a fully populated style.
pub fn marker_style(category: CrossingCategory) -> MarkerStyle {
    let fill_color = match category {
        CrossingCategory::FormalCrossing => [46, 125, 50],
        CrossingCategory::InformalCrossing => [239, 108, 0],
        CrossingCategory::UnderConstruction => [198, 40, 40],
        CrossingCategory::Unknown => [120, 120, 120],
    };
    MarkerStyle {
        fill_color,
        stroke_color: [255, 255, 255],
        stroke_weight: 1.5,
        fill_opacity: 0.9,
        stroke_opacity: 1.0,
        radius: 7.0,
    }
}
