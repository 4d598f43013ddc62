//! Backend boundary.
//!
//! The dashboard's data lives in a hosted backend service; this trait is the
//! seam the cache layer wraps. Any implementation is acceptable as long as
//! its methods behave like remote calls: asynchronous, fallible, returning
//! plain serializable records.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::catalog::types::{
    ActivityEntry, Condiment, CondimentDraft, CookProfile, DashboardStats, DietaryTag,
    DietaryTagDraft, FoodGroup, Ingredient, IngredientDraft, IngredientFilter, Meal, MealDraft,
    MealFilter, OperatorProfile,
};

// == Backend Trait ==
/// Remote data-access functions the cache layer memoizes.
///
/// Reads return the full matching set; writes return the stored record, or
/// `None` when the target row does not exist (the caller maps that to a
/// not-found response and must not invalidate anything).
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    // Reads
    async fn fetch_meals(&self, filter: MealFilter) -> Result<Vec<Meal>>;
    async fn fetch_meal(&self, id: u64) -> Result<Option<Meal>>;
    async fn fetch_ingredients(&self, filter: IngredientFilter) -> Result<Vec<Ingredient>>;
    async fn fetch_ingredient(&self, id: u64) -> Result<Option<Ingredient>>;
    async fn fetch_condiments(&self) -> Result<Vec<Condiment>>;
    async fn fetch_dietary_tags(&self) -> Result<Vec<DietaryTag>>;
    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats>;
    async fn fetch_recent_activities(&self, limit: usize) -> Result<Vec<ActivityEntry>>;
    async fn fetch_pending_cooks(&self) -> Result<Vec<CookProfile>>;
    async fn fetch_operator_profile(&self, operator_id: u64) -> Result<Option<OperatorProfile>>;

    // Writes
    async fn insert_meal(&self, draft: MealDraft) -> Result<Meal>;
    async fn update_meal(&self, id: u64, draft: MealDraft) -> Result<Option<Meal>>;
    async fn archive_meal(&self, id: u64) -> Result<Option<Meal>>;
    async fn insert_ingredient(&self, draft: IngredientDraft) -> Result<Ingredient>;
    async fn archive_ingredient(&self, id: u64) -> Result<Option<Ingredient>>;
    async fn upsert_condiment(&self, draft: CondimentDraft) -> Result<Condiment>;
    async fn upsert_dietary_tag(&self, draft: DietaryTagDraft) -> Result<DietaryTag>;
    async fn verify_cook(&self, id: u64) -> Result<Option<CookProfile>>;
    async fn update_operator_profile(
        &self,
        operator_id: u64,
        display_name: String,
    ) -> Result<Option<OperatorProfile>>;
}

// == Fixture Backend ==
/// In-memory stand-in for the hosted backend, used by the binary and by
/// tests. Every write records an audit-trail entry, newest first.
#[derive(Debug, Default)]
pub struct FixtureBackend {
    state: Mutex<FixtureState>,
}

#[derive(Debug, Default)]
struct FixtureState {
    meals: Vec<Meal>,
    ingredients: Vec<Ingredient>,
    condiments: Vec<Condiment>,
    dietary_tags: Vec<DietaryTag>,
    cooks: Vec<CookProfile>,
    operators: Vec<OperatorProfile>,
    activities: Vec<ActivityEntry>,
    next_id: u64,
}

impl FixtureState {
    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn record(&mut self, action: &str, subject: String) {
        let id = self.alloc_id();
        self.activities.push(ActivityEntry {
            id,
            actor: "dashboard".to_string(),
            action: action.to_string(),
            subject,
            at: Utc::now(),
        });
    }
}

impl FixtureBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-populated with representative catalog data.
    pub fn seeded() -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state.try_lock().expect("fresh backend is uncontended");
            state.next_id = 100;

            state.ingredients = vec![
                Ingredient {
                    id: 1,
                    name: "Brown rice".to_string(),
                    food_group: FoodGroup::Go,
                    archived: false,
                },
                Ingredient {
                    id: 2,
                    name: "Chicken breast".to_string(),
                    food_group: FoodGroup::Grow,
                    archived: false,
                },
                Ingredient {
                    id: 3,
                    name: "Malunggay leaves".to_string(),
                    food_group: FoodGroup::Glow,
                    archived: false,
                },
            ];
            state.meals = vec![
                Meal {
                    id: 10,
                    name: "Chicken Tinola".to_string(),
                    food_group: FoodGroup::Grow,
                    ingredient_ids: vec![2, 3],
                    dietary_tags: vec!["high-protein".to_string()],
                    archived: false,
                },
                Meal {
                    id: 11,
                    name: "Arroz Caldo".to_string(),
                    food_group: FoodGroup::Go,
                    ingredient_ids: vec![1, 2],
                    dietary_tags: vec![],
                    archived: false,
                },
            ];
            state.condiments = vec![Condiment {
                id: 20,
                name: "Patis".to_string(),
                sodium_mg: 1_500,
            }];
            state.dietary_tags = vec![DietaryTag {
                id: 30,
                name: "high-protein".to_string(),
                description: Some("At least 20g protein per serving".to_string()),
            }];
            state.cooks = vec![
                CookProfile {
                    id: 40,
                    name: "Aling Nena".to_string(),
                    verified: false,
                    submitted_at: Utc::now(),
                },
                CookProfile {
                    id: 41,
                    name: "Mang Ramon".to_string(),
                    verified: true,
                    submitted_at: Utc::now(),
                },
            ];
            state.operators = vec![OperatorProfile {
                id: 1,
                display_name: "Curation Admin".to_string(),
                role: "admin".to_string(),
            }];
        }
        backend
    }
}

fn matches_search(name: &str, search: &Option<String>) -> bool {
    match search {
        Some(needle) => name.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

#[async_trait]
impl CatalogBackend for FixtureBackend {
    async fn fetch_meals(&self, filter: MealFilter) -> Result<Vec<Meal>> {
        let state = self.state.lock().await;
        Ok(state
            .meals
            .iter()
            .filter(|m| filter.include_archived.unwrap_or(false) || !m.archived)
            .filter(|m| filter.food_group.map_or(true, |g| m.food_group == g))
            .filter(|m| matches_search(&m.name, &filter.search))
            .cloned()
            .collect())
    }

    async fn fetch_meal(&self, id: u64) -> Result<Option<Meal>> {
        let state = self.state.lock().await;
        Ok(state.meals.iter().find(|m| m.id == id).cloned())
    }

    async fn fetch_ingredients(&self, filter: IngredientFilter) -> Result<Vec<Ingredient>> {
        let state = self.state.lock().await;
        Ok(state
            .ingredients
            .iter()
            .filter(|i| filter.include_archived.unwrap_or(false) || !i.archived)
            .filter(|i| filter.food_group.map_or(true, |g| i.food_group == g))
            .cloned()
            .collect())
    }

    async fn fetch_ingredient(&self, id: u64) -> Result<Option<Ingredient>> {
        let state = self.state.lock().await;
        Ok(state.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn fetch_condiments(&self) -> Result<Vec<Condiment>> {
        Ok(self.state.lock().await.condiments.clone())
    }

    async fn fetch_dietary_tags(&self) -> Result<Vec<DietaryTag>> {
        Ok(self.state.lock().await.dietary_tags.clone())
    }

    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats> {
        let state = self.state.lock().await;
        Ok(DashboardStats {
            total_meals: state.meals.iter().filter(|m| !m.archived).count(),
            total_ingredients: state.ingredients.iter().filter(|i| !i.archived).count(),
            total_condiments: state.condiments.len(),
            pending_cooks: state.cooks.iter().filter(|c| !c.verified).count(),
        })
    }

    async fn fetch_recent_activities(&self, limit: usize) -> Result<Vec<ActivityEntry>> {
        let state = self.state.lock().await;
        Ok(state.activities.iter().rev().take(limit).cloned().collect())
    }

    async fn fetch_pending_cooks(&self) -> Result<Vec<CookProfile>> {
        let state = self.state.lock().await;
        Ok(state.cooks.iter().filter(|c| !c.verified).cloned().collect())
    }

    async fn fetch_operator_profile(&self, operator_id: u64) -> Result<Option<OperatorProfile>> {
        let state = self.state.lock().await;
        Ok(state.operators.iter().find(|o| o.id == operator_id).cloned())
    }

    async fn insert_meal(&self, draft: MealDraft) -> Result<Meal> {
        let mut state = self.state.lock().await;
        let meal = Meal {
            id: state.alloc_id(),
            name: draft.name,
            food_group: draft.food_group,
            ingredient_ids: draft.ingredient_ids,
            dietary_tags: draft.dietary_tags,
            archived: false,
        };
        state.meals.push(meal.clone());
        state.record("meal.created", meal.name.clone());
        Ok(meal)
    }

    async fn update_meal(&self, id: u64, draft: MealDraft) -> Result<Option<Meal>> {
        let mut state = self.state.lock().await;
        let Some(index) = state.meals.iter().position(|m| m.id == id) else {
            return Ok(None);
        };
        let meal = &mut state.meals[index];
        meal.name = draft.name;
        meal.food_group = draft.food_group;
        meal.ingredient_ids = draft.ingredient_ids;
        meal.dietary_tags = draft.dietary_tags;
        let updated = meal.clone();
        state.record("meal.updated", updated.name.clone());
        Ok(Some(updated))
    }

    async fn archive_meal(&self, id: u64) -> Result<Option<Meal>> {
        let mut state = self.state.lock().await;
        let Some(index) = state.meals.iter().position(|m| m.id == id) else {
            return Ok(None);
        };
        state.meals[index].archived = true;
        let archived = state.meals[index].clone();
        state.record("meal.archived", archived.name.clone());
        Ok(Some(archived))
    }

    async fn insert_ingredient(&self, draft: IngredientDraft) -> Result<Ingredient> {
        let mut state = self.state.lock().await;
        let ingredient = Ingredient {
            id: state.alloc_id(),
            name: draft.name,
            food_group: draft.food_group,
            archived: false,
        };
        state.ingredients.push(ingredient.clone());
        state.record("ingredient.created", ingredient.name.clone());
        Ok(ingredient)
    }

    async fn archive_ingredient(&self, id: u64) -> Result<Option<Ingredient>> {
        let mut state = self.state.lock().await;
        let Some(index) = state.ingredients.iter().position(|i| i.id == id) else {
            return Ok(None);
        };
        state.ingredients[index].archived = true;
        let archived = state.ingredients[index].clone();
        state.record("ingredient.archived", archived.name.clone());
        Ok(Some(archived))
    }

    async fn upsert_condiment(&self, draft: CondimentDraft) -> Result<Condiment> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.condiments.iter_mut().find(|c| c.name == draft.name) {
            existing.sodium_mg = draft.sodium_mg;
            let updated = existing.clone();
            state.record("condiment.saved", updated.name.clone());
            return Ok(updated);
        }
        let condiment = Condiment {
            id: state.alloc_id(),
            name: draft.name,
            sodium_mg: draft.sodium_mg,
        };
        state.condiments.push(condiment.clone());
        state.record("condiment.saved", condiment.name.clone());
        Ok(condiment)
    }

    async fn upsert_dietary_tag(&self, draft: DietaryTagDraft) -> Result<DietaryTag> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.dietary_tags.iter_mut().find(|t| t.name == draft.name) {
            existing.description = draft.description;
            let updated = existing.clone();
            state.record("dietary_tag.saved", updated.name.clone());
            return Ok(updated);
        }
        let tag = DietaryTag {
            id: state.alloc_id(),
            name: draft.name,
            description: draft.description,
        };
        state.dietary_tags.push(tag.clone());
        state.record("dietary_tag.saved", tag.name.clone());
        Ok(tag)
    }

    async fn verify_cook(&self, id: u64) -> Result<Option<CookProfile>> {
        let mut state = self.state.lock().await;
        let Some(index) = state.cooks.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        state.cooks[index].verified = true;
        let verified = state.cooks[index].clone();
        state.record("cook.verified", verified.name.clone());
        Ok(Some(verified))
    }

    async fn update_operator_profile(
        &self,
        operator_id: u64,
        display_name: String,
    ) -> Result<Option<OperatorProfile>> {
        let mut state = self.state.lock().await;
        let Some(index) = state.operators.iter().position(|o| o.id == operator_id) else {
            return Ok(None);
        };
        state.operators[index].display_name = display_name;
        let updated = state.operators[index].clone();
        state.record("profile.updated", updated.display_name.clone());
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::FoodGroup;

    #[tokio::test]
    async fn test_seeded_backend_has_catalog_data() {
        let backend = FixtureBackend::seeded();

        let meals = backend.fetch_meals(MealFilter::default()).await.unwrap();
        assert_eq!(meals.len(), 2);

        let stats = backend.fetch_dashboard_stats().await.unwrap();
        assert_eq!(stats.total_meals, 2);
        assert_eq!(stats.pending_cooks, 1);
    }

    #[tokio::test]
    async fn test_meal_filter_by_food_group_and_search() {
        let backend = FixtureBackend::seeded();

        let go_meals = backend
            .fetch_meals(MealFilter {
                food_group: Some(FoodGroup::Go),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(go_meals.len(), 1);
        assert_eq!(go_meals[0].name, "Arroz Caldo");

        let tinola = backend
            .fetch_meals(MealFilter {
                search: Some("tinola".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(tinola.len(), 1);
    }

    #[tokio::test]
    async fn test_archived_meals_hidden_by_default() {
        let backend = FixtureBackend::seeded();

        backend.archive_meal(10).await.unwrap().unwrap();

        let visible = backend.fetch_meals(MealFilter::default()).await.unwrap();
        assert_eq!(visible.len(), 1);

        let all = backend
            .fetch_meals(MealFilter {
                include_archived: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_writes_record_audit_entries() {
        let backend = FixtureBackend::seeded();

        backend
            .insert_ingredient(IngredientDraft {
                name: "Kalabasa".to_string(),
                food_group: FoodGroup::Glow,
            })
            .await
            .unwrap();
        backend.verify_cook(40).await.unwrap().unwrap();

        let activities = backend.fetch_recent_activities(10).await.unwrap();
        assert_eq!(activities.len(), 2);
        // Newest first.
        assert_eq!(activities[0].action, "cook.verified");
        assert_eq!(activities[1].action, "ingredient.created");
    }

    #[tokio::test]
    async fn test_update_missing_meal_returns_none() {
        let backend = FixtureBackend::seeded();
        let outcome = backend
            .update_meal(
                999,
                MealDraft {
                    name: "Ghost".to_string(),
                    food_group: FoodGroup::Go,
                    ingredient_ids: vec![],
                    dietary_tags: vec![],
                },
            )
            .await
            .unwrap();
        assert!(outcome.is_none());
    }
}
