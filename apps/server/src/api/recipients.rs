use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::Recipient};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

async fn list_recipients(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Recipient>>> {
    let recipients = state.organizer.get_all_recipients()?;
    Ok(Json(Recipient::from_core_list(
        recipients,
        state.organizer.tax_rate(),
    )))
}

async fn get_recipient(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Recipient>> {
    let recipient = state.organizer.get_recipient(&name)?;
    Ok(Json(Recipient::from_core(
        recipient,
        state.organizer.tax_rate(),
    )))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipients", get(list_recipients))
        .route("/recipients/{name}", get(get_recipient))
}
