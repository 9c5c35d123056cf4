// src/handlers/admins.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        admin::{RegistrarAdminPayload, RegistroAdminResposta},
        auth::{EsqueciSenhaPayload, LoginPayload, TokenResposta},
    },
};

pub async fn registrar(
    State(app_state): State<AppState>,
    Json(payload): Json<RegistrarAdminPayload>,
) -> Result<(StatusCode, Json<RegistroAdminResposta>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (admin, token) = app_state.admin_service.registrar(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistroAdminResposta { token, admin }),
    ))
}

pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenResposta>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .admin_service
        .login(&payload.email, &payload.senha)
        .await?;

    Ok(Json(TokenResposta { token }))
}

pub async fn esqueci_senha(
    State(app_state): State<AppState>,
    Json(payload): Json<EsqueciSenhaPayload>,
) -> Result<StatusCode, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    payload.validar_consistencia().map_err(|e| {
        let mut erros = validator::ValidationErrors::new();
        erros.add("confirmacaoSenha".into(), e);
        AppError::ValidationError(erros)
    })?;

    app_state.admin_service.esqueci_senha(&payload).await?;

    Ok(StatusCode::NO_CONTENT)
}
