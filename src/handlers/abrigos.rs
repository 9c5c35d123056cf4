// src/handlers/abrigos.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AdminAutenticado,
    models::abrigo::{AbrigoTemporario, AtualizarAbrigoPayload, CriarAbrigoPayload},
};

pub async fn listar(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<AbrigoTemporario>>, AppError> {
    let abrigos = app_state.abrigo_service.listar().await?;
    Ok(Json(abrigos))
}

pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AbrigoTemporario>, AppError> {
    let abrigo = app_state.abrigo_service.buscar_por_id(id).await?;
    Ok(Json(abrigo))
}

// Cadastro de abrigo; também publica o alerta correspondente.
pub async fn criar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Json(payload): Json<CriarAbrigoPayload>,
) -> Result<(StatusCode, Json<AbrigoTemporario>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let abrigo = app_state.abrigo_service.criar(payload).await?;
    Ok((StatusCode::CREATED, Json(abrigo)))
}

pub async fn atualizar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Path(id): Path<i32>,
    Json(payload): Json<AtualizarAbrigoPayload>,
) -> Result<Json<AbrigoTemporario>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let abrigo = app_state.abrigo_service.atualizar(id, &payload).await?;
    Ok(Json(abrigo))
}

pub async fn deletar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.abrigo_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
