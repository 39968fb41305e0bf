#![allow(dead_code)]

use mcp_mealdb::MealDbClient;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

/// A mock catalog plus a client pointed at it.
pub struct TestCatalog {
    pub server: ServerGuard,
    pub client: MealDbClient,
}

impl TestCatalog {
    pub async fn new() -> Self {
        let server = mockito::Server::new_async().await;
        let client = MealDbClient::new(server.url());
        Self { server, client }
    }

    pub async fn mock_list(&mut self, key: &str, field: &str, names: &[&str]) -> Mock {
        let meals: Vec<Value> = names
            .iter()
            .map(|name| {
                let mut row = serde_json::Map::new();
                row.insert(field.to_string(), json!(name));
                Value::Object(row)
            })
            .collect();
        self.server
            .mock("GET", "/list.php")
            .match_query(Matcher::UrlEncoded(key.into(), "list".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "meals": meals }).to_string())
            .create_async()
            .await
    }

    /// `filter.php?{key}={value}` answering with summaries for `ids`.
    pub async fn mock_filter(&mut self, key: &str, value: &str, ids: &[&str]) -> Mock {
        let meals: Value = if ids.is_empty() {
            Value::Null
        } else {
            Value::Array(ids.iter().map(|id| summary_json(id)).collect())
        };
        self.server
            .mock("GET", "/filter.php")
            .match_query(Matcher::UrlEncoded(key.into(), value.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "meals": meals }).to_string())
            .create_async()
            .await
    }

    pub async fn mock_lookup(&mut self, meal: Value) -> Mock {
        let id = meal["idMeal"].as_str().unwrap_or_default().to_string();
        self.server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::UrlEncoded("i".into(), id))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "meals": [meal] }).to_string())
            .create_async()
            .await
    }

    pub async fn mock_lookup_failure(&mut self, id: &str) -> Mock {
        self.server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::UrlEncoded("i".into(), id.into()))
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await
    }

    pub async fn mock_search(&mut self, name: &str, meals: Vec<Value>) -> Mock {
        let meals = if meals.is_empty() { Value::Null } else { Value::Array(meals) };
        self.server
            .mock("GET", "/search.php")
            .match_query(Matcher::UrlEncoded("s".into(), name.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "meals": meals }).to_string())
            .create_async()
            .await
    }

    pub async fn mock_random(&mut self, body: Value) -> Mock {
        self.server
            .mock("GET", "/random.php")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }
}

pub fn summary_json(id: &str) -> Value {
    json!({
        "strMeal": format!("Meal {}", id),
        "strMealThumb": format!("https://example.com/{}.jpg", id),
        "idMeal": id
    })
}

/// A full catalog record with the given ingredients in slots 1.., padded to 20 slots.
pub fn meal_json(
    id: &str,
    name: &str,
    area: &str,
    category: &str,
    ingredients: &[(&str, &str)],
) -> Value {
    let mut meal = json!({
        "idMeal": id,
        "strMeal": name,
        "strDrinkAlternate": null,
        "strCategory": category,
        "strArea": area,
        "strInstructions": "Boil water. Add salt.\r\nServe hot",
        "strMealThumb": format!("https://example.com/{}.jpg", id),
        "strTags": "Pasta,Curry",
        "strYoutube": "",
        "strSource": null,
        "dateModified": null
    });
    let object = meal.as_object_mut().expect("meal is an object");
    for slot in 1..=20 {
        let (ingredient, measure) = ingredients
            .get(slot - 1)
            .copied()
            .unwrap_or(("", ""));
        object.insert(format!("strIngredient{}", slot), json!(ingredient));
        object.insert(format!("strMeasure{}", slot), json!(measure));
    }
    meal
}
