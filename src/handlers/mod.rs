use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::data::models::LookupError;
use crate::features::lookup::DictionaryService;

pub mod anki;
pub mod meta;
pub mod search;

pub fn build_router(service: Arc<DictionaryService>) -> Router {
    Router::new()
        .route("/", get(search::index))
        .route("/metaData", get(meta::meta_data))
        .route("/meta", get(meta::meta_page))
        .route("/search/{*key}", get(search::search))
        .route("/search-r/{*key}", get(search::search_recursive))
        .route("/search-api/{key}", get(anki::search_api))
        .route("/search-anki/{key}", get(anki::search_anki))
        .route("/search-anki-table/{key}", get(anki::search_anki_table))
        .route("/convert-data", post(anki::convert_data))
        .with_state(service)
}

/// Runs a store-bound call on the blocking pool; diesel connections block.
pub(crate) async fn run_blocking<T, F>(
    service: &Arc<DictionaryService>,
    call: F,
) -> Result<T, LookupError>
where
    T: Send + 'static,
    F: FnOnce(&DictionaryService) -> Result<T, LookupError> + Send + 'static,
{
    let service = Arc::clone(service);
    tokio::task::spawn_blocking(move || call(service.as_ref())).await?
}
