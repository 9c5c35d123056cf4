// src/handlers/alertas.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AdminAutenticado, UsuarioAutenticado},
    models::{
        alerta::{Alerta, AtualizarAlertaPayload, CriarAlertaPayload, FiltroCidade},
        visualizacao::VisualizacaoAlerta,
    },
};

// Listagem pública; ?cidade= filtra por igualdade (sem diferenciar caixa).
pub async fn listar(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroCidade>,
) -> Result<Json<Vec<Alerta>>, AppError> {
    let alertas = app_state
        .alerta_service
        .listar(filtro.cidade.as_deref())
        .await?;
    Ok(Json(alertas))
}

pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Alerta>, AppError> {
    let alerta = app_state.alerta_service.buscar_por_id(id).await?;
    Ok(Json(alerta))
}

// Publicação manual (somente administradores)
pub async fn criar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Json(payload): Json<CriarAlertaPayload>,
) -> Result<(StatusCode, Json<Alerta>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let alerta = app_state.alerta_service.criar_manual(payload).await?;
    Ok((StatusCode::CREATED, Json(alerta)))
}

pub async fn atualizar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Path(id): Path<i32>,
    Json(payload): Json<AtualizarAlertaPayload>,
) -> Result<Json<Alerta>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let alerta = app_state.alerta_service.atualizar(id, &payload).await?;
    Ok(Json(alerta))
}

pub async fn deletar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.alerta_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Feed do usuário: alertas que ele ainda não descartou.
pub async fn feed(
    State(app_state): State<AppState>,
    UsuarioAutenticado(usuario): UsuarioAutenticado,
    Query(filtro): Query<FiltroCidade>,
) -> Result<Json<Vec<Alerta>>, AppError> {
    let alertas = app_state
        .alerta_service
        .feed(usuario.id, filtro.cidade.as_deref())
        .await?;
    Ok(Json(alertas))
}

pub async fn descartar(
    State(app_state): State<AppState>,
    UsuarioAutenticado(usuario): UsuarioAutenticado,
    Path(id): Path<i32>,
) -> Result<Json<VisualizacaoAlerta>, AppError> {
    let visualizacao = app_state.alerta_service.descartar(usuario.id, id).await?;
    Ok(Json(visualizacao))
}
