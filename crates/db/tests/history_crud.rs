//! Integration tests for history entry creation, lookup, and the favorite
//! flag, exercised against a real database.

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use atelier_core::params::{ApiImage, GenerationParameters, ImageSize};
use atelier_db::models::history_entry::{CreateHistoryEntry, HistoryQuery};
use atelier_db::repositories::HistoryRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_entry(model_id: &str, model_name: &str, prompt: &str) -> CreateHistoryEntry {
    CreateHistoryEntry {
        model_id: model_id.to_string(),
        model_name: model_name.to_string(),
        image: ApiImage {
            url: format!("https://cdn.example/{model_id}/{prompt}.png"),
            content_type: "image/png".to_string(),
            width: 1024,
            height: 768,
        },
        parameters: GenerationParameters::from_prompt(prompt),
    }
}

// ---------------------------------------------------------------------------
// Test: create assigns an id and round-trips through page 1
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_then_fetch_returns_entry_first(pool: PgPool) {
    let created = HistoryRepo::create(&pool, &new_entry("fal-ai/flux-lora", "Flux LoRA", "cat"))
        .await
        .unwrap();
    assert!(!created.is_favorite, "new entries start unfavorited");
    assert!(!created.is_deleted);

    let (rows, total) = HistoryRepo::list_page(&pool, &HistoryQuery::first_page(12))
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(
        rows.first().map(|r| r.id),
        Some(created.id),
        "a freshly created entry must lead page 1 under descending sort"
    );
}

// ---------------------------------------------------------------------------
// Test: parameters round-trip, extension keys included
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_parameters_round_trip_with_extension_keys(pool: PgPool) {
    let mut input = new_entry("fal-ai/flux-pro", "Flux Pro", "a red fox");
    input.parameters.image_size = Some(ImageSize::Preset("landscape_16_9".to_string()));
    input.parameters.seed = Some(9_007_199_254_740_993);
    input.parameters.num_inference_steps = Some(25);
    input
        .parameters
        .extra
        .insert("sampler".to_string(), json!("euler_a"));
    // A hand-built collision with a fixed column must not survive the write.
    input.parameters.extra.insert("seed".to_string(), json!(1));

    let row = HistoryRepo::create(&pool, &input).await.unwrap();
    let entry = HistoryRepo::find_by_id(&pool, row.id)
        .await
        .unwrap()
        .expect("created entry should be findable")
        .into_client()
        .unwrap();

    assert_eq!(entry.parameters.prompt, "a red fox");
    assert_eq!(
        entry.parameters.image_size,
        Some(ImageSize::Preset("landscape_16_9".to_string()))
    );
    assert_eq!(
        entry.parameters.seed,
        Some(9_007_199_254_740_993),
        "wide seeds must not lose precision"
    );
    assert_eq!(entry.parameters.extra["sampler"], json!("euler_a"));
    assert!(
        !entry.parameters.extra.contains_key("seed"),
        "a colliding extension key must not shadow the seed column"
    );
}

// ---------------------------------------------------------------------------
// Test: favorite toggle updates exactly that field, idempotently
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_set_favorite_is_idempotent(pool: PgPool) {
    let created = HistoryRepo::create(&pool, &new_entry("m1", "Model One", "cat"))
        .await
        .unwrap();

    let updated = HistoryRepo::set_favorite(&pool, created.id, true)
        .await
        .unwrap()
        .expect("entry exists");
    assert!(updated.is_favorite);

    // Writing the same value again succeeds and changes nothing.
    let again = HistoryRepo::set_favorite(&pool, created.id, true)
        .await
        .unwrap()
        .expect("entry still exists");
    assert!(again.is_favorite);
    assert_eq!(again.prompt, created.prompt, "only the flag may change");
}

// ---------------------------------------------------------------------------
// Test: favorite toggle on an unknown id reports not found
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_set_favorite_unknown_id_returns_none(pool: PgPool) {
    let missing = HistoryRepo::set_favorite(&pool, Uuid::now_v7(), true)
        .await
        .unwrap();
    assert!(missing.is_none());
}
