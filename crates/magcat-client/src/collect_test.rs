use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::json;

use super::*;

fn test_config(page_size: u64) -> CollectorConfig {
    CollectorConfig {
        store_code: "770344".to_string(),
        category_id: 4459,
        city_id: "1".to_string(),
        page_size,
        inter_request_delay_ms: 0,
        request_timeout_secs: 5,
        output_path: PathBuf::from("output.json"),
    }
}

/// In-memory catalog source. Offsets and product ids absent from the maps
/// fail their requests, which is how the tests simulate outages.
#[derive(Default)]
struct FakeSource {
    pages: HashMap<u64, serde_json::Value>,
    details: HashMap<i64, serde_json::Value>,
    search_offsets: Mutex<Vec<u64>>,
    detail_requests: Mutex<Vec<(i64, String)>>,
}

fn unavailable(context: &str) -> ClientError {
    ClientError::UnexpectedStatus {
        status: 503,
        url: format!("https://fake.invalid/{context}"),
    }
}

impl CatalogSource for FakeSource {
    async fn search_page(
        &self,
        _config: &CollectorConfig,
        offset: u64,
    ) -> Result<SearchPage, ClientError> {
        self.search_offsets.lock().unwrap().push(offset);
        let value = self
            .pages
            .get(&offset)
            .cloned()
            .ok_or_else(|| unavailable("search"))?;
        Ok(serde_json::from_value(value).expect("page fixture should deserialize"))
    }

    async fn product_detail(
        &self,
        product_id: i64,
        store_code: &str,
    ) -> Result<ProductDetail, ClientError> {
        self.detail_requests
            .lock()
            .unwrap()
            .push((product_id, store_code.to_string()));
        let value = self
            .details
            .get(&product_id)
            .cloned()
            .ok_or_else(|| unavailable("detail"))?;
        Ok(serde_json::from_value(value).expect("detail fixture should deserialize"))
    }
}

fn page(total: u64, ids: &[i64]) -> serde_json::Value {
    json!({
        "pagination": { "totalCount": total },
        "items": ids
            .iter()
            .map(|id| json!({
                "id": id,
                "name": format!("product {id}"),
                "price": 10_000 + id,
            }))
            .collect::<Vec<_>>(),
    })
}

fn branded_detail(brand: &str) -> serde_json::Value {
    json!({ "brand": { "name": brand } })
}

#[tokio::test]
async fn walks_offsets_by_page_size_up_to_the_first_total() {
    let mut source = FakeSource::default();
    source.pages.insert(0, page(5, &[1, 2]));
    source.pages.insert(2, page(5, &[3, 4]));
    source.pages.insert(4, page(5, &[5]));
    for id in 1..=5 {
        source.details.insert(id, branded_detail("Acme"));
    }

    let products = collect_catalog(&source, &test_config(2)).await;

    // Probe at offset 0, then the loop re-walks 0, 2, 4.
    assert_eq!(*source.search_offsets.lock().unwrap(), vec![0, 0, 2, 4]);
    assert_eq!(products.len(), 5);
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(products.iter().all(|p| p.brand.as_deref() == Some("Acme")));
}

#[tokio::test]
async fn failed_page_is_skipped_without_halting_the_run() {
    let mut source = FakeSource::default();
    source.pages.insert(0, page(5, &[1, 2]));
    // Offset 2 has no fixture, so that page fails.
    source.pages.insert(4, page(5, &[5]));
    for id in [1, 2, 5] {
        source.details.insert(id, branded_detail("Acme"));
    }

    let products = collect_catalog(&source, &test_config(2)).await;

    assert_eq!(*source.search_offsets.lock().unwrap(), vec![0, 0, 2, 4]);
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 5], "the failed page contributes no records");
}

#[tokio::test]
async fn empty_page_is_skipped_without_detail_lookups() {
    let mut source = FakeSource::default();
    source.pages.insert(0, page(4, &[1, 2]));
    source.pages.insert(2, page(4, &[]));
    for id in [1, 2] {
        source.details.insert(id, branded_detail("Acme"));
    }

    let products = collect_catalog(&source, &test_config(2)).await;

    assert_eq!(products.len(), 2);
    let detail_ids: Vec<i64> = source
        .detail_requests
        .lock()
        .unwrap()
        .iter()
        .map(|(id, _)| *id)
        .collect();
    assert_eq!(detail_ids, vec![1, 2], "no detail lookups for the empty page");
}

#[tokio::test]
async fn total_from_the_first_page_bounds_the_walk_even_when_later_pages_disagree() {
    let mut source = FakeSource::default();
    source.pages.insert(0, page(3, &[1, 2]));
    // The later page claims a much larger catalog; the walk must not grow.
    source.pages.insert(2, page(100, &[3]));
    for id in 1..=3 {
        source.details.insert(id, branded_detail("Acme"));
    }

    let products = collect_catalog(&source, &test_config(2)).await;

    assert_eq!(*source.search_offsets.lock().unwrap(), vec![0, 0, 2]);
    assert_eq!(products.len(), 3);
}

#[tokio::test]
async fn failed_probe_yields_an_empty_run() {
    let source = FakeSource::default();

    let products = collect_catalog(&source, &test_config(2)).await;

    assert!(products.is_empty());
    assert_eq!(*source.search_offsets.lock().unwrap(), vec![0]);
}

#[tokio::test]
async fn failed_detail_lookup_keeps_the_record_with_no_brand() {
    let mut source = FakeSource::default();
    source.pages.insert(0, page(2, &[1, 2]));
    // Only product 1 has a detail fixture; product 2's lookup fails.
    source.details.insert(1, branded_detail("Acme"));

    let products = collect_catalog(&source, &test_config(2)).await;

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].brand.as_deref(), Some("Acme"));
    assert!(products[1].brand.is_none());
}

#[tokio::test]
async fn item_store_code_overrides_the_configured_default() {
    let mut source = FakeSource::default();
    source.pages.insert(
        0,
        json!({
            "pagination": { "totalCount": 2 },
            "items": [
                { "id": 1, "name": "a", "storeCode": "555000" },
                { "id": 2, "name": "b" }
            ]
        }),
    );
    source.details.insert(1, branded_detail("Acme"));
    source.details.insert(2, branded_detail("Acme"));

    collect_catalog(&source, &test_config(2)).await;

    let requests = source.detail_requests.lock().unwrap();
    assert_eq!(requests[0], (1, "555000".to_string()));
    assert_eq!(requests[1], (2, "770344".to_string()));
}

#[tokio::test]
async fn prices_are_converted_to_major_units() {
    let mut source = FakeSource::default();
    source.pages.insert(
        0,
        json!({
            "pagination": { "totalCount": 1 },
            "items": [{
                "id": 1,
                "name": "Молоко",
                "price": 8999,
                "promotion": { "oldPrice": 10999 }
            }]
        }),
    );
    source.details.insert(1, branded_detail("Простоквашино"));

    let products = collect_catalog(&source, &test_config(20)).await;

    assert_eq!(products.len(), 1);
    let product = &products[0];
    assert_eq!(product.price.map(|p| p.to_string()).as_deref(), Some("89.99"));
    assert_eq!(
        product.old_price.map(|p| p.to_string()).as_deref(),
        Some("109.99")
    );
    assert_eq!(product.name.as_deref(), Some("Молоко"));
    assert_eq!(product.brand.as_deref(), Some("Простоквашино"));
}
