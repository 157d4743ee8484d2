//! HTML pages and the form/link actions behind them.

use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::Recipient,
};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use giftlist_core::{recipients::Recipient as CoreRecipient, utils::money_utils, Error};
use serde::Deserialize;
use tera::Context;

#[derive(Deserialize, Debug, Default)]
struct UsernameQuery {
    username: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GiftActionQuery {
    giftid: Option<String>,
    #[serde(default)]
    username: String,
}

#[derive(Deserialize, Debug)]
struct DeleteUserQuery {
    userid: Option<String>,
    #[serde(default)]
    username: String,
}

#[derive(Deserialize, Debug)]
struct InsertForm {
    #[serde(default)]
    rcptname: String,
    #[serde(default)]
    giftname: String,
    /// Dollars, e.g. `199.99`.
    #[serde(default)]
    price: String,
    #[serde(default)]
    url: String,
}

fn parse_id(raw: Option<&str>, field: &str) -> ApiResult<i32> {
    let raw = raw.ok_or_else(|| ApiError::BadRequest(format!("missing {}", field)))?;
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid {} '{}'", field, raw)))
}

/// 302 Found, the status browsers follow with a plain GET.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn giftlist_location(username: &str) -> String {
    format!("/giftlist?username={}", urlencoding::encode(username))
}

fn render_page(
    state: &AppState,
    template: &str,
    recipients: Vec<CoreRecipient>,
) -> ApiResult<Html<String>> {
    let views = Recipient::from_core_list(recipients, state.organizer.tax_rate());
    let mut context = Context::new();
    context.insert("recipients", &views);
    Ok(Html(state.templates.render(template, &context)?))
}

async fn index(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let recipients = state.organizer.get_all_recipients()?;
    render_page(&state, "index.html", recipients)
}

async fn add_gift_form(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    Ok(Html(state.templates.render("addgift.html", &Context::new())?))
}

async fn insert(
    State(state): State<Arc<AppState>>,
    Form(form): Form<InsertForm>,
) -> ApiResult<Response> {
    let price = money_utils::parse_price_cents(&form.price)?;
    state
        .organizer
        .add_gift(form.rcptname.trim(), form.giftname.trim(), price, form.url.trim())
        .await?;
    Ok(found("/addgift"))
}

async fn gift_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> ApiResult<Html<String>> {
    let username = query.username.unwrap_or_default();
    let recipients = if username.is_empty() {
        state.organizer.get_all_recipients()?
    } else {
        match state.organizer.get_recipient(&username) {
            Ok(recipient) => vec![recipient],
            Err(Error::NotFound(_)) => {
                tracing::info!("got query for user {} but user not found", username);
                state.organizer.get_all_recipients()?
            }
            Err(e) => return Err(e.into()),
        }
    };
    render_page(&state, "giftlist.html", recipients)
}

async fn purchased(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GiftActionQuery>,
) -> ApiResult<Response> {
    let gift_id = parse_id(query.giftid.as_deref(), "giftid")?;
    state.organizer.set_purchased(gift_id).await?;
    Ok(found(&giftlist_location(&query.username)))
}

async fn delete_gift(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GiftActionQuery>,
) -> ApiResult<Response> {
    let gift_id = parse_id(query.giftid.as_deref(), "giftid")?;
    state.organizer.drop_gift(gift_id).await?;
    Ok(found(&giftlist_location(&query.username)))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeleteUserQuery>,
) -> ApiResult<Response> {
    let recipient_id = parse_id(query.userid.as_deref(), "userid")?;
    state
        .organizer
        .drop_recipient(recipient_id, &query.username)
        .await?;
    Ok(found("/"))
}

async fn export(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> ApiResult<Response> {
    let target = query.username.as_deref().filter(|name| !name.is_empty());
    let text = state.organizer.export_txt(target)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/addgift", get(add_gift_form))
        .route("/insert", post(insert))
        .route("/giftlist", get(gift_list))
        .route("/purchased", get(purchased))
        .route("/deletegift", get(delete_gift))
        .route("/deleteuser", get(delete_user))
        .route("/export", get(export))
}
