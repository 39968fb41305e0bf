mod common;

use common::{meal_json, TestCatalog};
use mcp_mealdb::client::{MealDetail, MealId};
use mcp_mealdb::filter::{aggregate, intersect, matches_facets, Aggregation, FacetSelection};
use mockito::Matcher;
use pretty_assertions::assert_eq;

fn ids(raw: &[&str]) -> Vec<MealId> {
    raw.iter().map(|id| MealId::new(*id)).collect()
}

fn detail(id: &str, area: &str, category: &str, ingredients: &[(&str, &str)]) -> MealDetail {
    serde_json::from_value(meal_json(id, &format!("Meal {}", id), area, category, ingredients))
        .expect("fixture should parse")
}

fn sorted_ids(aggregation: &Aggregation) -> Vec<String> {
    let mut out: Vec<String> = aggregation
        .meals()
        .iter()
        .map(|meal| meal.id().to_string())
        .collect();
    out.sort();
    out
}

#[test]
fn test_intersect_keeps_first_set_order() {
    let result = intersect(vec![ids(&["3", "1", "2", "1"]), ids(&["1", "2", "9"])]);
    assert_eq!(result, ids(&["1", "2"]));
}

#[test]
fn test_intersect_is_order_independent_as_a_set() {
    let a = ids(&["1", "2", "3", "4"]);
    let b = ids(&["4", "3", "7"]);
    let c = ids(&["3", "4", "8", "1"]);

    let mut abc = intersect(vec![a.clone(), b.clone(), c.clone()]);
    let mut cba = intersect(vec![c.clone(), b.clone(), a.clone()]);
    let mut nested = intersect(vec![intersect(vec![b, c]), a]);
    abc.sort_by(|x, y| x.as_str().cmp(y.as_str()));
    cba.sort_by(|x, y| x.as_str().cmp(y.as_str()));
    nested.sort_by(|x, y| x.as_str().cmp(y.as_str()));

    assert_eq!(abc, ids(&["3", "4"]));
    assert_eq!(abc, cba);
    assert_eq!(abc, nested);
}

#[test]
fn test_intersect_with_empty_set_is_empty() {
    assert!(intersect(vec![ids(&["1", "2"]), vec![], ids(&["1"])]).is_empty());
    assert!(intersect(vec![]).is_empty());
}

#[test]
fn test_selection_treats_blank_as_unset() {
    let selection = FacetSelection::new(
        Some("".to_string()),
        Some("  ".to_string()),
        None,
        Some("   ".to_string()),
    );
    assert!(selection.is_empty());

    let named = FacetSelection::default().with_name("  Arrabiata ");
    assert_eq!(named.name.as_deref(), Some("Arrabiata"));
    assert!(!named.has_server_facets());
}

#[test]
fn test_region_and_category_match_exact_case() {
    let meal = detail("1", "Italian", "Pasta", &[]);

    let exact = FacetSelection::default().with_region("Italian").with_category("Pasta");
    let lowered = FacetSelection::default().with_region("italian");
    let wrong_category = FacetSelection::default().with_category("pasta");

    assert!(matches_facets(&meal, &exact));
    assert!(!matches_facets(&meal, &lowered));
    assert!(!matches_facets(&meal, &wrong_category));
}

#[test]
fn test_ingredient_matches_ignoring_case() {
    let meal = detail("1", "Italian", "Pasta", &[("Penne Rigate", "1 pound"), ("Olive Oil", "1/4 cup")]);

    assert!(matches_facets(&meal, &FacetSelection::default().with_ingredient("olive oil")));
    assert!(matches_facets(&meal, &FacetSelection::default().with_ingredient("PENNE RIGATE")));
    assert!(!matches_facets(&meal, &FacetSelection::default().with_ingredient("olive")));
}

#[test_log::test(tokio::test)]
async fn test_no_facets_makes_no_requests() {
    let mut catalog = TestCatalog::new().await;
    let mock = catalog
        .server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = aggregate(&catalog.client, &FacetSelection::default()).await;

    mock.assert_async().await;
    assert_eq!(result, Aggregation::NoFilters);
}

#[test_log::test(tokio::test)]
async fn test_region_and_category_are_intersected() {
    let mut catalog = TestCatalog::new().await;
    catalog.mock_filter("a", "British", &["10", "11", "12"]).await;
    catalog.mock_filter("c", "Dessert", &["12", "11", "13"]).await;
    catalog.mock_lookup(meal_json("11", "Eton Mess", "British", "Dessert", &[])).await;
    catalog.mock_lookup(meal_json("12", "Treacle Tart", "British", "Dessert", &[])).await;

    let selection = FacetSelection::default().with_region("British").with_category("Dessert");
    let result = aggregate(&catalog.client, &selection).await;

    // Region is fetched first, so its arrival order wins.
    let names: Vec<&str> = result.meals().iter().map(|m| m.summary.name.as_str()).collect();
    assert_eq!(names, vec!["Eton Mess", "Treacle Tart"]);
}

#[test_log::test(tokio::test)]
async fn test_all_three_facets_intersect() {
    let mut catalog = TestCatalog::new().await;
    catalog.mock_filter("a", "Indian", &["1", "2", "3"]).await;
    catalog.mock_filter("c", "Vegetarian", &["2", "3", "4"]).await;
    catalog.mock_filter("i", "Garlic", &["3", "5"]).await;
    catalog.mock_lookup(meal_json("3", "Dal fry", "Indian", "Vegetarian", &[("Garlic", "2 cloves")])).await;

    let selection = FacetSelection::default()
        .with_region("Indian")
        .with_category("Vegetarian")
        .with_ingredient("Garlic");
    let result = aggregate(&catalog.client, &selection).await;

    assert_eq!(sorted_ids(&result), vec!["3"]);
}

#[test_log::test(tokio::test)]
async fn test_empty_facet_gives_no_results() {
    let mut catalog = TestCatalog::new().await;
    catalog.mock_filter("a", "Martian", &[]).await;
    catalog.mock_filter("c", "Beef", &["1", "2"]).await;
    let lookups = catalog
        .server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let selection = FacetSelection::default().with_region("Martian").with_category("Beef");
    let result = aggregate(&catalog.client, &selection).await;

    lookups.assert_async().await;
    assert_eq!(result, Aggregation::NoResults);
}

#[test_log::test(tokio::test)]
async fn test_failed_lookup_is_dropped() {
    let mut catalog = TestCatalog::new().await;
    catalog.mock_filter("c", "Seafood", &["1", "2", "3"]).await;
    catalog.mock_lookup(meal_json("1", "Fish pie", "British", "Seafood", &[])).await;
    catalog.mock_lookup_failure("2").await;
    catalog.mock_lookup(meal_json("3", "Kedgeree", "British", "Seafood", &[])).await;

    let result = aggregate(&catalog.client, &FacetSelection::default().with_category("Seafood")).await;

    assert_eq!(sorted_ids(&result), vec!["1", "3"]);
}

#[test_log::test(tokio::test)]
async fn test_name_only_uses_search_results() {
    let mut catalog = TestCatalog::new().await;
    catalog
        .mock_search(
            "Arrabiata",
            vec![meal_json("52771", "Spicy Arrabiata Penne", "Italian", "Vegetarian", &[])],
        )
        .await;
    let filters = catalog
        .server
        .mock("GET", "/filter.php")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = aggregate(&catalog.client, &FacetSelection::default().with_name("Arrabiata")).await;

    filters.assert_async().await;
    assert_eq!(sorted_ids(&result), vec!["52771"]);
}

#[test_log::test(tokio::test)]
async fn test_name_and_region_keep_exact_region_only() {
    let mut catalog = TestCatalog::new().await;
    catalog
        .mock_search(
            "Pie",
            vec![
                meal_json("1", "Fish Pie", "British", "Seafood", &[]),
                meal_json("2", "Apple Pie", "american", "Dessert", &[]),
                meal_json("3", "Key Lime Pie", "American", "Dessert", &[]),
            ],
        )
        .await;

    let selection = FacetSelection::default().with_name("Pie").with_region("American");
    let result = aggregate(&catalog.client, &selection).await;

    assert_eq!(sorted_ids(&result), vec!["3"]);
    assert!(result
        .meals()
        .iter()
        .all(|meal| meal.summary.area.as_deref() == Some("American")));
}

#[test_log::test(tokio::test)]
async fn test_name_and_ingredient_match_any_slot() {
    let mut catalog = TestCatalog::new().await;
    catalog
        .mock_search(
            "Chicken",
            vec![
                meal_json("1", "Chicken Handi", "Indian", "Chicken", &[("Chicken", "1.2 kg"), ("Onion", "5 thinly sliced")]),
                meal_json("2", "Chicken Congee", "Chinese", "Chicken", &[("Chicken", "8 oz"), ("Salt", "pinch")]),
            ],
        )
        .await;

    let selection = FacetSelection::default().with_name("Chicken").with_ingredient("onion");
    let result = aggregate(&catalog.client, &selection).await;

    assert_eq!(sorted_ids(&result), vec!["1"]);
    assert!(result.meals().iter().all(|meal| meal.uses_ingredient("ONION")));
}

#[test_log::test(tokio::test)]
async fn test_name_filter_emptying_candidates_gives_no_results() {
    let mut catalog = TestCatalog::new().await;
    catalog
        .mock_search("Pie", vec![meal_json("1", "Fish Pie", "British", "Seafood", &[])])
        .await;

    let selection = FacetSelection::default().with_name("Pie").with_category("Dessert");
    let result = aggregate(&catalog.client, &selection).await;

    assert_eq!(result, Aggregation::NoResults);
}
