// src/handlers/usuarios.rs

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
    middleware::auth::{AdminAutenticado, UsuarioAutenticado},
    models::usuario::{AtualizarUsuarioPayload, Usuario},
};

// ---
// Rotas do próprio usuário (/me)
// ---

pub async fn get_me(UsuarioAutenticado(usuario): UsuarioAutenticado) -> Json<Usuario> {
    Json(usuario)
}

pub async fn atualizar_me(
    State(app_state): State<AppState>,
    UsuarioAutenticado(usuario): UsuarioAutenticado,
    Json(payload): Json<AtualizarUsuarioPayload>,
) -> Result<Json<Usuario>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let atualizado = app_state
        .usuario_service
        .atualizar(usuario.id, &payload)
        .await?;

    Ok(Json(atualizado))
}

pub async fn deletar_me(
    State(app_state): State<AppState>,
    UsuarioAutenticado(usuario): UsuarioAutenticado,
) -> Result<StatusCode, AppError> {
    app_state.usuario_service.deletar(usuario.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Rotas administrativas
// ---

pub async fn listar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
) -> Result<Json<Vec<Usuario>>, AppError> {
    let usuarios = app_state.usuario_service.listar().await?;
    Ok(Json(usuarios))
}

pub async fn buscar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Path(id): Path<i32>,
) -> Result<Json<Usuario>, AppError> {
    let usuario = app_state.usuario_service.buscar_por_id(id).await?;
    Ok(Json(usuario))
}

pub async fn deletar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.usuario_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
