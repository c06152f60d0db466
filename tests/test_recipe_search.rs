use brokebuthungry::clients::RecipeApiClient;
use brokebuthungry::fetchers::RequestFetcher;
use brokebuthungry::{AppConfig, BrokeButHungry, ClientError, Lookup, RecipeFlow, RecipeSummary};
use mockito::{Matcher, Mock, Server};

fn app(server: &Server, search_limit: u32) -> BrokeButHungry {
    let mut config = AppConfig::default();
    config.recipes.search_limit = search_limit;

    BrokeButHungry::builder()
        .config(config)
        .recipes_base_url(server.url())
        .recipes_api_key("test-key")
        .build()
        .unwrap()
}

fn search_body(ids: &[u32]) -> String {
    let results: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"id": {id}, "title": "Recipe {id}", "image": "https://img.example/{id}.jpg"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"results": [{}], "offset": 0, "number": {}, "totalResults": {}}}"#,
        results.join(","),
        ids.len(),
        ids.len()
    )
}

fn information_body(ingredients: usize) -> String {
    let ingredients: Vec<String> = (0..ingredients)
        .map(|i| format!(r#"{{"original": "ingredient {i}"}}"#))
        .collect();
    format!(
        r#"{{"title": "Recipe", "extendedIngredients": [{}], "analyzedInstructions": []}}"#,
        ingredients.join(",")
    )
}

async fn mock_information(server: &mut Server, id: u32, ingredients: usize) -> Mock {
    server
        .mock("GET", format!("/recipes/{id}/information").as_str())
        .match_query(Matcher::UrlEncoded("apiKey".into(), "test-key".into()))
        .with_status(200)
        .with_body(information_body(ingredients))
        .create_async()
        .await
}

fn ids(summaries: &[RecipeSummary]) -> Vec<&str> {
    summaries.iter().map(|s| s.id.as_str()).collect()
}

#[tokio::test]
async fn test_search_sorted_by_ingredient_count() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "chicken soup".into()),
            Matcher::UrlEncoded("number".into(), "6".into()),
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_body(search_body(&[1, 2, 3]))
        .create_async()
        .await;
    let _info_1 = mock_information(&mut server, 1, 9).await;
    let _info_2 = mock_information(&mut server, 2, 3).await;
    let _info_3 = mock_information(&mut server, 3, 6).await;

    let result = app(&server, 6).recipes().search("  chicken soup ").await;

    let summaries = result.found().expect("recipes");
    assert_eq!(ids(&summaries), vec!["2", "3", "1"]);
    assert_eq!(summaries[0].ingredient_count, 3);
    assert_eq!(summaries[0].title, "Recipe 2");
    assert_eq!(summaries[0].image_url, "https://img.example/2.jpg");
    search.assert_async().await;
}

#[tokio::test]
async fn test_equal_counts_keep_api_order() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(search_body(&[10, 20, 30]))
        .create_async()
        .await;
    let _info_10 = mock_information(&mut server, 10, 5).await;
    let _info_20 = mock_information(&mut server, 20, 2).await;
    let _info_30 = mock_information(&mut server, 30, 5).await;

    let summaries = app(&server, 6)
        .recipes()
        .search("pasta")
        .await
        .found()
        .expect("recipes");

    assert_eq!(ids(&summaries), vec!["20", "10", "30"]);
}

#[tokio::test]
async fn test_results_capped_at_limit() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::UrlEncoded("number".into(), "2".into()))
        .with_status(200)
        .with_body(search_body(&[1, 2, 3]))
        .create_async()
        .await;
    let _info_1 = mock_information(&mut server, 1, 4).await;
    let _info_2 = mock_information(&mut server, 2, 1).await;
    let skipped = server
        .mock("GET", "/recipes/3/information")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let summaries = app(&server, 2)
        .recipes()
        .search("pasta")
        .await
        .found()
        .expect("recipes");

    assert_eq!(ids(&summaries), vec!["2", "1"]);
    skipped.assert_async().await;
}

#[tokio::test]
async fn test_one_failed_count_fails_search() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(search_body(&[1, 2]))
        .create_async()
        .await;
    let _info_1 = mock_information(&mut server, 1, 4).await;
    let _failing = server
        .mock("GET", "/recipes/2/information")
        .match_query(Matcher::Any)
        .with_status(402)
        .with_body(r#"{"status": "failure", "code": 402}"#)
        .create_async()
        .await;

    let result = app(&server, 6).recipes().search("pasta").await;

    assert!(matches!(result, Lookup::Failed(_)));
}

#[tokio::test]
async fn test_no_results_is_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(search_body(&[]))
        .create_async()
        .await;

    let result = app(&server, 6).recipes().search("xyzzy").await;

    assert_eq!(result, Lookup::NotFound);
}

#[tokio::test]
async fn test_empty_query_makes_no_request() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = app(&server, 6).recipes().search("   ").await;

    assert_eq!(
        result,
        Lookup::Failed("Search query cannot be empty".to_string())
    );
    search.assert_async().await;
}

#[tokio::test]
async fn test_missing_results_array_fails() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status": "failure", "message": "Daily quota used up"}"#)
        .create_async()
        .await;

    let result = app(&server, 6).recipes().search("pasta").await;

    assert!(matches!(result, Lookup::Failed(_)));
}

#[tokio::test]
async fn test_zero_limit_yields_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::UrlEncoded("number".into(), "0".into()))
        .with_status(200)
        .with_body(search_body(&[1]))
        .create_async()
        .await;
    let skipped = server
        .mock("GET", "/recipes/1/information")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut config = AppConfig::default();
    config.recipes.base_url = server.url();
    config.recipes.api_key = Some("test-key".to_string());
    config.recipes.search_limit = 0;
    let client = RecipeApiClient::new(RequestFetcher::new(None).unwrap(), &config);

    let result = RecipeFlow::new(client).search("pasta").await;

    assert_eq!(result, Lookup::NotFound);
    skipped.assert_async().await;
}

#[test]
fn test_builder_rejects_zero_limit() {
    let mut config = AppConfig::default();
    config.recipes.search_limit = 0;

    let result = BrokeButHungry::builder().config(config).build();

    assert!(matches!(result, Err(ClientError::BuilderError(_))));
}
