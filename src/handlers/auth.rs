// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        auth::{EsqueciSenhaPayload, LoginGooglePayload, LoginPayload, TokenResposta},
        usuario::{RegistrarUsuarioPayload, RegistroUsuarioResposta},
    },
};

// Handler de registro de usuário
pub async fn registrar(
    State(app_state): State<AppState>,
    Json(payload): Json<RegistrarUsuarioPayload>,
) -> Result<(StatusCode, Json<RegistroUsuarioResposta>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // Regra que o Validator não cobre: precisa de senha OU googleUserId.
    payload.validar_consistencia().map_err(|e| {
        let mut erros = validator::ValidationErrors::new();
        erros.add("senha".into(), e);
        AppError::ValidationError(erros)
    })?;

    let (usuario, token) = app_state.usuario_service.registrar(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistroUsuarioResposta { token, usuario }),
    ))
}

// Handler de login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenResposta>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .usuario_service
        .login(&payload.email, &payload.senha)
        .await?;

    Ok(Json(TokenResposta { token }))
}

// Login via conta Google já vinculada no registro
pub async fn login_google(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginGooglePayload>,
) -> Result<Json<TokenResposta>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .usuario_service
        .login_google(&payload.google_user_id)
        .await?;

    Ok(Json(TokenResposta { token }))
}

// Troca de senha por e-mail (sem verificação fora de banda)
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

    app_state.usuario_service.esqueci_senha(&payload).await?;

    Ok(StatusCode::NO_CONTENT)
}
