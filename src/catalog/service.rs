//! Catalog service.
//!
//! The dashboard's data-access layer: every read is a memoized backend fetch
//! bound to a volatility-class store, and every write notifies the
//! invalidation router and the change feed after the backend mutation
//! succeeds.

use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheRegistry, Memoized};
use crate::catalog::backend::CatalogBackend;
use crate::catalog::types::{
    ActivityEntry, Condiment, CondimentDraft, CookProfile, DashboardStats, DietaryTag,
    DietaryTagDraft, Ingredient, IngredientDraft, IngredientFilter, Meal, MealDraft, MealFilter,
    OperatorProfile,
};
use crate::error::FetchError;
use crate::events::ChangeFeed;

/// Builds one memoized read bound to a store, a name and the shared backend.
/// The second arm covers nullary fetches, which are keyed on unit.
macro_rules! memoized_read {
    ($store:expr, $name:literal, $backend:expr, $method:ident, $args:ty) => {{
        let backend = $backend.clone();
        Memoized::new($store, $name, None, move |args: $args| {
            let backend = backend.clone();
            async move { backend.$method(args).await }
        })
    }};
    ($store:expr, $name:literal, $backend:expr, $method:ident) => {{
        let backend = $backend.clone();
        Memoized::new($store, $name, None, move |(): ()| {
            let backend = backend.clone();
            async move { backend.$method().await }
        })
    }};
}

// == Catalog Service ==
/// Read/write front for the meal-curation catalog.
pub struct CatalogService {
    registry: Arc<CacheRegistry>,
    backend: Arc<dyn CatalogBackend>,
    changes: ChangeFeed,

    get_all_meals: Memoized<MealFilter, Vec<Meal>>,
    get_meal: Memoized<u64, Option<Meal>>,
    get_all_ingredients: Memoized<IngredientFilter, Vec<Ingredient>>,
    get_ingredient: Memoized<u64, Option<Ingredient>>,
    get_all_condiments: Memoized<(), Vec<Condiment>>,
    get_dietary_tags: Memoized<(), Vec<DietaryTag>>,
    get_dashboard_stats: Memoized<(), DashboardStats>,
    get_recent_activities: Memoized<usize, Vec<ActivityEntry>>,
    get_pending_cooks: Memoized<(), Vec<CookProfile>>,
    get_operator_profile: Memoized<u64, Option<OperatorProfile>>,
}

impl CatalogService {
    // == Constructor ==
    /// Wires each read function to its volatility class: listings and
    /// aggregates go to the dynamic store, reference data to the reference
    /// store, operator data to the user store.
    pub fn new(registry: Arc<CacheRegistry>, backend: Arc<dyn CatalogBackend>) -> Self {
        let dynamic = registry.dynamic_store();
        let reference = registry.reference_store();
        let user = registry.user_store();

        let get_all_meals =
            memoized_read!(dynamic.clone(), "get_all_meals", backend, fetch_meals, MealFilter);
        let get_meal = memoized_read!(dynamic.clone(), "get_meal", backend, fetch_meal, u64);
        let get_all_ingredients = memoized_read!(
            dynamic.clone(),
            "get_all_ingredients",
            backend,
            fetch_ingredients,
            IngredientFilter
        );
        let get_ingredient =
            memoized_read!(dynamic.clone(), "get_ingredient", backend, fetch_ingredient, u64);
        let get_recent_activities = memoized_read!(
            dynamic.clone(),
            "get_recent_activities",
            backend,
            fetch_recent_activities,
            usize
        );
        let get_operator_profile = memoized_read!(
            user.clone(),
            "get_operator_profile",
            backend,
            fetch_operator_profile,
            u64
        );

        let get_all_condiments =
            memoized_read!(reference.clone(), "get_all_condiments", backend, fetch_condiments);
        let get_dietary_tags =
            memoized_read!(reference.clone(), "get_dietary_tags", backend, fetch_dietary_tags);
        let get_dashboard_stats = memoized_read!(
            dynamic.clone(),
            "get_dashboard_stats",
            backend,
            fetch_dashboard_stats
        );
        let get_pending_cooks =
            memoized_read!(dynamic.clone(), "get_pending_cooks", backend, fetch_pending_cooks);

        Self {
            registry,
            backend,
            changes: ChangeFeed::default(),
            get_all_meals,
            get_meal,
            get_all_ingredients,
            get_ingredient,
            get_all_condiments,
            get_dietary_tags,
            get_dashboard_stats,
            get_recent_activities,
            get_pending_cooks,
            get_operator_profile,
        }
    }

    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    // == Reads ==

    pub async fn all_meals(&self, filter: MealFilter) -> Result<Vec<Meal>, FetchError> {
        self.get_all_meals.call(filter).await
    }

    pub async fn meal(&self, id: u64) -> Result<Option<Meal>, FetchError> {
        self.get_meal.call(id).await
    }

    pub async fn all_ingredients(
        &self,
        filter: IngredientFilter,
    ) -> Result<Vec<Ingredient>, FetchError> {
        self.get_all_ingredients.call(filter).await
    }

    pub async fn ingredient(&self, id: u64) -> Result<Option<Ingredient>, FetchError> {
        self.get_ingredient.call(id).await
    }

    pub async fn all_condiments(&self) -> Result<Vec<Condiment>, FetchError> {
        self.get_all_condiments.call(()).await
    }

    pub async fn dietary_tags(&self) -> Result<Vec<DietaryTag>, FetchError> {
        self.get_dietary_tags.call(()).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, FetchError> {
        self.get_dashboard_stats.call(()).await
    }

    pub async fn recent_activities(&self, limit: usize) -> Result<Vec<ActivityEntry>, FetchError> {
        self.get_recent_activities.call(limit).await
    }

    pub async fn pending_cooks(&self) -> Result<Vec<CookProfile>, FetchError> {
        self.get_pending_cooks.call(()).await
    }

    pub async fn operator_profile(&self, id: u64) -> Result<Option<OperatorProfile>, FetchError> {
        self.get_operator_profile.call(id).await
    }

    // == Writes ==
    // Each write mutates the backend first; only a successful mutation
    // reaches the router and the change feed.

    pub async fn create_meal(&self, draft: MealDraft) -> anyhow::Result<Meal> {
        let meal = self.backend.insert_meal(draft).await?;
        info!(meal = %meal.name, "meal created");
        self.after_write("meal_created", Some(meal.name.clone())).await;
        Ok(meal)
    }

    pub async fn update_meal(&self, id: u64, draft: MealDraft) -> anyhow::Result<Option<Meal>> {
        let updated = self.backend.update_meal(id, draft).await?;
        if let Some(meal) = &updated {
            self.after_write("meal_updated", Some(meal.name.clone())).await;
        }
        Ok(updated)
    }

    pub async fn archive_meal(&self, id: u64) -> anyhow::Result<Option<Meal>> {
        let archived = self.backend.archive_meal(id).await?;
        if let Some(meal) = &archived {
            self.after_write("meal_archived", Some(meal.name.clone())).await;
        }
        Ok(archived)
    }

    pub async fn create_ingredient(&self, draft: IngredientDraft) -> anyhow::Result<Ingredient> {
        let ingredient = self.backend.insert_ingredient(draft).await?;
        self.after_write("ingredient_created", Some(ingredient.name.clone()))
            .await;
        Ok(ingredient)
    }

    pub async fn archive_ingredient(&self, id: u64) -> anyhow::Result<Option<Ingredient>> {
        let archived = self.backend.archive_ingredient(id).await?;
        if let Some(ingredient) = &archived {
            self.after_write("ingredient_archived", Some(ingredient.name.clone()))
                .await;
        }
        Ok(archived)
    }

    pub async fn save_condiment(&self, draft: CondimentDraft) -> anyhow::Result<Condiment> {
        let condiment = self.backend.upsert_condiment(draft).await?;
        self.after_write("condiment_saved", Some(condiment.name.clone()))
            .await;
        Ok(condiment)
    }

    pub async fn save_dietary_tag(&self, draft: DietaryTagDraft) -> anyhow::Result<DietaryTag> {
        let tag = self.backend.upsert_dietary_tag(draft).await?;
        self.after_write("dietary_tag_saved", Some(tag.name.clone())).await;
        Ok(tag)
    }

    pub async fn verify_cook(&self, id: u64) -> anyhow::Result<Option<CookProfile>> {
        let verified = self.backend.verify_cook(id).await?;
        if let Some(cook) = &verified {
            self.after_write("cook_verified", Some(cook.name.clone())).await;
        }
        Ok(verified)
    }

    pub async fn update_operator_profile(
        &self,
        id: u64,
        display_name: String,
    ) -> anyhow::Result<Option<OperatorProfile>> {
        let updated = self.backend.update_operator_profile(id, display_name).await?;
        if let Some(profile) = &updated {
            self.after_write("profile_updated", Some(profile.display_name.clone()))
                .await;
        }
        Ok(updated)
    }

    /// Invalidation + notification shared by every write path.
    ///
    /// Backend writes also append an audit entry, so the activity feed is
    /// purged alongside the operation's own patterns.
    async fn after_write(&self, operation: &'static str, detail: Option<String>) {
        self.registry.invalidate(operation).await;
        self.registry.invalidate("activity_logged").await;
        self.changes.publish(operation, detail);
    }
}
