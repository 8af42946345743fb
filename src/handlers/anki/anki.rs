use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Html,
    Json,
};

use crate::data::models::{FlashcardRecord, LookupError, SemanticEntry};
use crate::features::lookup::DictionaryService;
use crate::handlers::run_blocking;

pub async fn search_api(
    State(service): State<Arc<DictionaryService>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<SemanticEntry>>, LookupError> {
    let entries = run_blocking(&service, move |service| service.search_api(&key)).await?;
    Ok(Json(entries))
}

pub async fn search_anki(
    State(service): State<Arc<DictionaryService>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<FlashcardRecord>>, LookupError> {
    let cards = run_blocking(&service, move |service| service.search_cards(&key)).await?;
    Ok(Json(cards))
}

pub async fn search_anki_table(
    State(service): State<Arc<DictionaryService>>,
    Path(key): Path<String>,
) -> Result<Html<String>, LookupError> {
    let tables = run_blocking(&service, move |service| service.search_card_tables(&key)).await?;
    Ok(Html(tables.join("\n")))
}

pub async fn convert_data(
    State(service): State<Arc<DictionaryService>>,
    payload: Result<Json<SemanticEntry>, JsonRejection>,
) -> Result<Json<FlashcardRecord>, LookupError> {
    let Json(entry) = payload.map_err(|rejection| {
        log::warn!("Rejected convert-data payload: {}", rejection.body_text());
        LookupError::InvalidPayload(rejection.body_text())
    })?;
    Ok(Json(service.convert(entry)?))
}
