use async_trait::async_trait;
use gazon_service::clients::ProductClient;
use gazon_service::model::{Product, ProductCreate, ProductId, ProductView};
use gazon_service::product_actor::{self, ProductError};
use gazon_service::search::{FuzzyIndex, ProductSearch};

async fn catalog(names: &[&str]) -> (ProductClient, Vec<ProductId>) {
    let (actor, client) = product_actor::new(16);
    tokio::spawn(actor.run(()));
    let mut ids = Vec::new();
    for name in names {
        let id = client
            .create_product(ProductCreate {
                name: name.to_string(),
                price: 20.0,
                stock: 3,
            })
            .await
            .unwrap();
        ids.push(id);
    }
    (client, ids)
}

fn ids(views: &[ProductView]) -> Vec<ProductId> {
    views.iter().map(|view| view.id).collect()
}

#[tokio::test]
async fn test_typo_and_substring_hits_are_merged() {
    let (products, catalog_ids) =
        catalog(&["Mechanical Keyboard", "Keyboard Cover", "Coffee Mug", "Keyring"]).await;
    let search = ProductSearch::with_edit_distance(products);

    let hits = search.search("keybaord").await.unwrap();
    assert_eq!(ids(&hits), vec![catalog_ids[0], catalog_ids[1]]);

    let hits = search.search("KEY").await.unwrap();
    assert_eq!(
        ids(&hits),
        vec![catalog_ids[0], catalog_ids[1], catalog_ids[3]]
    );
}

#[tokio::test]
async fn test_inactive_products_are_hidden() {
    let (products, catalog_ids) = catalog(&["Desk Lamp", "Desk Lamp Pro"]).await;
    products.deactivate(catalog_ids[1]).await.unwrap();
    let search = ProductSearch::with_edit_distance(products);

    let hits = search.search("desk lamp").await.unwrap();
    assert_eq!(
        hits,
        vec![ProductView {
            id: catalog_ids[0],
            name: "Desk Lamp".to_string(),
            price: 20.0,
            stock: 3,
        }]
    );
}

#[tokio::test]
async fn test_blank_query_finds_nothing() {
    let (products, _) = catalog(&["Desk Lamp"]).await;
    let search = ProductSearch::with_edit_distance(products);

    assert!(search.search("").await.unwrap().is_empty());
    assert!(search.search("   ").await.unwrap().is_empty());
}

/// Stands in for an external full-text engine that ranks its own results.
struct Ranked(Vec<Product>);

#[async_trait]
impl FuzzyIndex for Ranked {
    async fn fuzzy_match(&self, _text: &str) -> Result<Vec<Product>, ProductError> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn test_substring_hit_replaces_stale_index_entry() {
    let (products, catalog_ids) = catalog(&["Lamp", "Lamp Shade"]).await;

    // The index still has an old copy of the shade and an unrelated product first.
    let stale_shade = Product::new(catalog_ids[1], "Lamp Shade", 99.0, 0);
    let unrelated = Product::new(ProductId(77), "Clamp", 5.0, 1);
    let search = ProductSearch::new(Ranked(vec![unrelated, stale_shade]), products);

    let hits = search.search("lamp").await.unwrap();

    assert_eq!(
        ids(&hits),
        vec![ProductId(77), catalog_ids[1], catalog_ids[0]]
    );
    assert_eq!(hits[1].price, 20.0);
    assert_eq!(hits[1].stock, 3);
}

#[test]
fn test_product_view_serializes_flat() {
    let view = ProductView {
        id: ProductId(3),
        name: "Mug".to_string(),
        price: 7.5,
        stock: 12,
    };
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "id": 3, "name": "Mug", "price": 7.5, "stock": 12 })
    );
}
