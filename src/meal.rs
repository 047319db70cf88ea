//! Meal records as returned by the remote recipe API.
//!
//! The API flattens ingredients into numbered fields (`strIngredient1`,
//! `strMeasure1`, ... up to 20). Only the fields the UI relies on are typed;
//! everything else is kept verbatim so the numbered slots stay reachable.

use crate::defaults::MAX_INGREDIENTS;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque identifier of a meal (`idMeal`).
pub type MealId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: MealId,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    /// Remaining API fields, including the numbered ingredient/measure slots.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.measure)
    }
}

impl MealRecord {
    pub fn thumbnail_url(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or_default()
    }

    fn slot(&self, prefix: &str, index: usize) -> Option<&str> {
        self.extra
            .get(&format!("{prefix}{index}"))
            .and_then(Value::as_str)
    }

    /// Extract the ingredient list.
    ///
    /// Slots are not dense: the first missing, null or empty ingredient ends
    /// the list even if later slots carry values.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        let mut ingredients = Vec::new();
        for i in 1..=MAX_INGREDIENTS {
            let name = match self.slot("strIngredient", i) {
                Some(name) if !name.is_empty() => name,
                _ => break,
            };
            let measure = self.slot("strMeasure", i).unwrap_or_default();
            ingredients.push(Ingredient {
                name: name.to_owned(),
                measure: measure.to_owned(),
            });
        }
        ingredients
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_api_payload() {
        let meal: MealRecord = serde_json::from_value(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
            "strInstructions": "Preheat oven to 350 F.",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strTags": "Meat,Casserole",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
        }))
        .unwrap();

        assert_eq!(meal.id, "52772");
        assert_eq!(meal.name, "Teriyaki Chicken Casserole");
        assert_eq!(meal.area.as_deref(), Some("Japanese"));
        assert_eq!(meal.extra.get("strTags"), Some(&json!("Meat,Casserole")));
    }

    #[test]
    fn ingredients_stop_at_first_empty_slot() {
        let meal: MealRecord = serde_json::from_value(json!({
            "idMeal": "1",
            "strMeal": "Toast",
            "strIngredient1": "Bread",
            "strMeasure1": "2 slices",
            "strIngredient2": "Butter",
            "strMeasure2": "1 tbsp",
            "strIngredient3": "",
            "strMeasure3": "",
            "strIngredient4": "Jam",
            "strMeasure4": "to taste",
        }))
        .unwrap();

        let lines: Vec<String> = meal.ingredients().iter().map(|i| i.to_string()).collect();
        assert_eq!(lines, vec!["Bread - 2 slices", "Butter - 1 tbsp"]);
    }

    #[test]
    fn null_ingredient_ends_list_and_missing_measure_is_blank() {
        let meal: MealRecord = serde_json::from_value(json!({
            "idMeal": "2",
            "strMeal": "Salt",
            "strIngredient1": "Salt",
            "strMeasure1": null,
            "strIngredient2": null,
        }))
        .unwrap();

        let ingredients = meal.ingredients();
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].to_string(), "Salt - ");
    }

    #[test]
    fn ingredients_capped_at_twenty() {
        let mut payload = json!({ "idMeal": "3", "strMeal": "Everything" });
        for i in 1..=25 {
            payload[format!("strIngredient{i}")] = json!(format!("item {i}"));
            payload[format!("strMeasure{i}")] = json!("1");
        }
        let meal: MealRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(meal.ingredients().len(), MAX_INGREDIENTS);
    }
}
