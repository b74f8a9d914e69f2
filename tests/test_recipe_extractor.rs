use foodscrape::{DatasetBuilder, HttpFetcher, LexiconTagger, PageFetcher, RecipeExtractor, Tagger};
use std::sync::Arc;
use std::time::Duration;

fn recipe_page(title: &str, rating_attr: &str, ingredients: &[&str]) -> String {
    let items: String = ingredients
        .iter()
        .map(|line| format!(r#"<li><span class="ingredients-item-name">{line}</span></li>"#))
        .collect();
    format!(
        r#"<!DOCTYPE html>
        <html>
        <body>
            <h1 class="headline heading-content">{title}</h1>
            <div class="recipe-ratings" {rating_attr}></div>
            <ul class="ingredients-section">{items}</ul>
            <div class="nutrition-section">
                <span class="nutrient-name">Calories:</span><span class="nutrient-value">320</span>
                <span class="nutrient-name">Fat:</span><span class="nutrient-value">14.2g</span>
                <span class="nutrient-name">Sodium:</span><span class="nutrient-value">410mg</span>
            </div>
        </body>
        </html>"#
    )
}

fn parts() -> (Arc<dyn PageFetcher>, Arc<dyn Tagger>) {
    (
        Arc::new(HttpFetcher::new(Some(Duration::from_secs(5))).unwrap()),
        Arc::new(LexiconTagger::new()),
    )
}

#[tokio::test]
async fn test_extracts_every_field() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe/1/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(recipe_page(
            "Garlic Asparagus",
            r#"data-ratings-average="4.38""#,
            &[
                "1 pound asparagus, trimmed",
                "3 cloves garlic, minced",
                "2 tablespoons olive oil",
            ],
        ))
        .create_async()
        .await;

    let (fetcher, tagger) = parts();
    let record = RecipeExtractor::new(fetcher, tagger)
        .extract(&format!("{}/recipe/1/", server.url()))
        .await
        .unwrap();

    assert!(record.is_complete());
    assert_eq!(record.name.as_deref(), Some("Garlic Asparagus"));
    assert_eq!(record.rating, Some(4.38));

    let ingredients = record.ingredients.unwrap();
    assert!(ingredients.contains("asparagus "));
    assert!(ingredients.contains("garlic "));
    assert!(ingredients.contains("olive oil "));

    let nutrition = record.nutrition.unwrap();
    assert_eq!(nutrition.len(), 2);
    assert_eq!(nutrition.get("Total Fat").map(String::as_str), Some("14.2g"));
    assert_eq!(nutrition.get("Sodium").map(String::as_str), Some("410mg"));
}

#[tokio::test]
async fn test_missing_rating_is_excluded_from_dataset() {
    let mut server = mockito::Server::new_async().await;
    let _rated = server
        .mock("GET", "/recipe/1/")
        .with_status(200)
        .with_body(recipe_page(
            "Pancakes",
            r#"data-ratings-average="4.5""#,
            &["1 ½ cups all-purpose flour", "1 egg, beaten"],
        ))
        .create_async()
        .await;
    let _unrated = server
        .mock("GET", "/recipe/2/")
        .with_status(200)
        .with_body(recipe_page("Waffles", "", &["2 cups all-purpose flour"]))
        .create_async()
        .await;
    let _gone = server
        .mock("GET", "/recipe/3/")
        .with_status(404)
        .create_async()
        .await;

    let links: Vec<String> = (1..=3)
        .map(|i| format!("{}/recipe/{}/", server.url(), i))
        .collect();
    let (fetcher, tagger) = parts();
    let dataset = DatasetBuilder::new(fetcher, tagger)
        .with_workers(3)
        .build_from_links(&links, 0)
        .await
        .unwrap();

    assert_eq!(dataset.rows.len(), 1);
    assert_eq!(dataset.rows[0].title, "Pancakes");
    assert!(dataset.rows[0].ingredients.contains("all-purpose flour "));
    assert!(dataset.rows[0].ingredients.contains("egg "));
    assert_eq!(dataset.failed, vec![1, 2]);
}

#[tokio::test]
async fn test_crawl_then_extract() {
    let mut server = mockito::Server::new_async().await;
    let _root = server
        .mock("GET", "/recipes/")
        .with_status(200)
        .with_body(
            r#"<a class="card__titleLink manual-link-behavior" href="/recipe/1/">One</a>
               <a class="card__titleLink manual-link-behavior" href="/recipe/2/">Two</a>"#,
        )
        .create_async()
        .await;
    let _one = server
        .mock("GET", "/recipe/1/")
        .with_status(200)
        .with_body(recipe_page("One", r#"data-ratings-average="3""#, &["salt"]))
        .create_async()
        .await;
    let _two = server
        .mock("GET", "/recipe/2/")
        .with_status(200)
        .with_body(recipe_page("Two", r#"data-ratings-average="5""#, &["1 cup milk"]))
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut store = foodscrape::LinkStore::open(dir.path().join("links.txt")).unwrap();
    let (fetcher, tagger) = parts();
    let dataset = DatasetBuilder::new(fetcher, tagger)
        .build(&format!("{}/recipes/", server.url()), None, &mut store)
        .await
        .unwrap();

    let titles: Vec<&str> = dataset.rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two"]);
    assert!(dataset.rows[1].ingredients.contains("milk "));
    assert_eq!(store.len(), 2);
}
