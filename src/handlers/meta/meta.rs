use std::sync::Arc;

use axum::{extract::State, response::Html, Json};
use tera::Context;

use crate::data::models::{LookupError, MetaRow};
use crate::features::lookup::DictionaryService;
use crate::handlers::run_blocking;
use crate::utils::{render_template, META_TEMPLATE};

pub async fn meta_data(
    State(service): State<Arc<DictionaryService>>,
) -> Result<Json<Vec<MetaRow>>, LookupError> {
    let rows = run_blocking(&service, |service| service.metadata()).await?;
    Ok(Json(rows))
}

pub async fn meta_page(
    State(service): State<Arc<DictionaryService>>,
) -> Result<Html<String>, LookupError> {
    let rows = run_blocking(&service, |service| service.metadata()).await?;

    let mut context = Context::new();
    context.insert("name", &service.config().name);
    context.insert("rows", &rows);
    Ok(render_template(service.templates(), META_TEMPLATE, context))
}
