//! Static option catalogs shown on the generation forms.
//!
//! Each catalog maps a short identifier (what the client submits) to the
//! label used in prompts and in the UI. Identifiers that are not in a catalog
//! are still accepted and rendered verbatim.

use serde::Serialize;
use utoipa::ToSchema;

/// A selectable option with a stable id and a display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogOption {
    pub id: &'static str,
    pub label: &'static str,
}

/// A selectable time limit, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimeOption {
    pub minutes: u32,
    pub label: &'static str,
}

const fn opt(id: &'static str, label: &'static str) -> CatalogOption {
    CatalogOption { id, label }
}

pub const EQUIPMENT: &[CatalogOption] = &[
    opt("hob", "Hob / Stovetop"),
    opt("microwave", "Microwave"),
    opt("oven", "Oven"),
    opt("kettle", "Kettle"),
    opt("rice_cooker", "Rice Cooker"),
    opt("toaster", "Toaster"),
];

pub const LIMITATIONS: &[CatalogOption] = &[
    opt("one_pot", "Only one pot/pan"),
    opt("limited_knife", "Limited knife/cutting"),
    opt("no_fridge", "No fridge access"),
];

pub const DIETS: &[CatalogOption] = &[
    opt("vegetarian", "Vegetarian"),
    opt("vegan", "Vegan"),
    opt("halal", "Halal"),
    opt("kosher", "Kosher"),
];

pub const ALLERGIES: &[CatalogOption] = &[
    opt("nuts", "Nuts"),
    opt("dairy", "Dairy"),
    opt("gluten", "Gluten"),
    opt("seafood", "Seafood"),
    opt("eggs", "Eggs"),
    opt("soy", "Soy"),
];

pub const PREFERENCES: &[CatalogOption] = &[
    opt("spicy", "Spicy"),
    opt("mild", "Mild"),
    opt("high_protein", "High Protein"),
    opt("comfort", "Comfort Food"),
    opt("fresh", "Fresh & Light"),
];

pub const TIME_LIMITS: &[TimeOption] = &[
    TimeOption {
        minutes: 10,
        label: "10 min",
    },
    TimeOption {
        minutes: 20,
        label: "20 min",
    },
    TimeOption {
        minutes: 30,
        label: "30 min",
    },
    TimeOption {
        minutes: 45,
        label: "45 min",
    },
];

/// Staples offered as one-click additions to the ingredient list.
pub const QUICK_STAPLES: &[&str] = &[
    "rice",
    "pasta",
    "eggs",
    "onion",
    "garlic",
    "canned beans",
    "olive oil",
    "salt",
    "pepper",
];

/// Look up the label for an id.
pub fn label_for(options: &[CatalogOption], id: &str) -> Option<&'static str> {
    options.iter().find(|o| o.id == id).map(|o| o.label)
}

/// Label for an id, or the id itself when the catalog doesn't know it.
pub fn display_label<'a>(options: &[CatalogOption], id: &'a str) -> &'a str {
    label_for(options, id).unwrap_or(id)
}

/// Catalog options whose id is not in `selected`, in catalog order.
pub fn unavailable<'a>(
    options: &'a [CatalogOption],
    selected: &'a [String],
) -> impl Iterator<Item = &'a CatalogOption> + 'a {
    options
        .iter()
        .filter(move |o| !selected.iter().any(|s| s == o.id))
}

/// Every catalog, as served to the forms.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Catalogs {
    pub equipment: Vec<CatalogOption>,
    pub limitations: Vec<CatalogOption>,
    pub diets: Vec<CatalogOption>,
    pub allergies: Vec<CatalogOption>,
    pub preferences: Vec<CatalogOption>,
    pub time_limits: Vec<TimeOption>,
    pub quick_staples: Vec<&'static str>,
}

pub fn all() -> Catalogs {
    Catalogs {
        equipment: EQUIPMENT.to_vec(),
        limitations: LIMITATIONS.to_vec(),
        diets: DIETS.to_vec(),
        allergies: ALLERGIES.to_vec(),
        preferences: PREFERENCES.to_vec(),
        time_limits: TIME_LIMITS.to_vec(),
        quick_staples: QUICK_STAPLES.to_vec(),
    }
}
