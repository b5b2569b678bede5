/*
 * Responsibility
 * - /api/offers 系 handler (一覧 / 取得 / 作成 / 削除)
 * - 認証・認可は middleware (Request Gate) で済んでいる前提。ここでは判定しない
 * - 業務エラーは AppError (404 / 409 / 400) で返す
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    api::{
        dto::offers::{CreateOfferRequest, OfferResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

fn offer_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Offer with id {id} was not found"))
}

/// path の id が UUID でない場合も「存在しない」として扱う
fn parse_offer_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| offer_not_found(id))
}

pub async fn list_offers(
    State(state): State<AppState>,
) -> Result<Json<Vec<OfferResponse>>, AppError> {
    let rows = state.offers.list().await?;
    Ok(Json(rows.into_iter().map(OfferResponse::from).collect()))
}

pub async fn get_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OfferResponse>, AppError> {
    let offer_id = parse_offer_id(&id)?;

    let row = state
        .offers
        .get(offer_id)
        .await?
        .ok_or_else(|| offer_not_found(&id))?;

    Ok(Json(row.into()))
}

pub async fn create_offer(
    State(state): State<AppState>,
    AuthCtxExtractor(principal): AuthCtxExtractor,
    payload: Result<Json<CreateOfferRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|errors| AppError::BadRequest(errors.join(", ")))?;

    let offer = req.into_new_offer();
    let offer_url = offer.offer_url.clone();

    let row = state.offers.create(offer).await.map_err(|e| match e {
        crate::repos::error::RepoError::Conflict => {
            AppError::Conflict(format!("Offer with url '{offer_url}' already exists"))
        }
        other => other.into(),
    })?;

    tracing::info!(
        offer_id = %row.offer_id,
        created_at = %row.created_at,
        created_by = %principal.username,
        "offer created"
    );

    let location = format!("/api/offers/{}", row.offer_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(OfferResponse::from(row)),
    )
        .into_response())
}

pub async fn delete_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let offer_id = parse_offer_id(&id)?;

    if state.offers.delete(offer_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(offer_not_found(&id))
    }
}
