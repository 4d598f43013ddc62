//! Domain records for the meal-curation catalog.
//!
//! These mirror the rows the hosted backend returns; the cache layer treats
//! them as opaque serializable data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pinggang Pinoy nutrition categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodGroup {
    /// Energy-giving (rice, root crops)
    Go,
    /// Body-building (meat, fish, legumes)
    Grow,
    /// Glow: protective fruits and vegetables
    Glow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: u64,
    pub name: String,
    pub food_group: FoodGroup,
    pub ingredient_ids: Vec<u64>,
    pub dietary_tags: Vec<String>,
    pub archived: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u64,
    pub name: String,
    pub food_group: FoodGroup,
    pub archived: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condiment {
    pub id: u64,
    pub name: String,
    /// Sodium per serving, used by the curation guidelines panel
    pub sodium_mg: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietaryTag {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}

/// A cook awaiting or holding verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookProfile {
    pub id: u64,
    pub name: String,
    pub verified: bool,
    pub submitted_at: DateTime<Utc>,
}

/// The signed-in dashboard operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorProfile {
    pub id: u64,
    pub display_name: String,
    pub role: String,
}

/// One audit-trail row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: u64,
    pub actor: String,
    pub action: String,
    pub subject: String,
    pub at: DateTime<Utc>,
}

/// Aggregate counts shown on the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_meals: usize,
    pub total_ingredients: usize,
    pub total_condiments: usize,
    pub pending_cooks: usize,
}

// == Filters ==
// Filters double as cache-key arguments: both sides derive Serialize, and
// `None` fields always serialize (as null), so equivalent filters share a
// cache entry.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealFilter {
    pub food_group: Option<FoodGroup>,
    pub search: Option<String>,
    pub include_archived: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientFilter {
    pub food_group: Option<FoodGroup>,
    pub include_archived: Option<bool>,
}

// == Drafts ==

/// Payload for creating or replacing a meal.
#[derive(Debug, Clone, Deserialize)]
pub struct MealDraft {
    pub name: String,
    pub food_group: FoodGroup,
    #[serde(default)]
    pub ingredient_ids: Vec<u64>,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
}

impl MealDraft {
    /// Returns an error message if the draft is not acceptable, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Meal name cannot be empty".to_string());
        }
        if self.name.len() > 120 {
            return Some("Meal name exceeds maximum length of 120 characters".to_string());
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngredientDraft {
    pub name: String,
    pub food_group: FoodGroup,
}

impl IngredientDraft {
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Ingredient name cannot be empty".to_string());
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CondimentDraft {
    pub name: String,
    pub sodium_mg: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DietaryTagDraft {
    pub name: String,
    pub description: Option<String>,
}
