// src/middleware/auth.rs

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{admin::Admin, auth::Realm, usuario::Usuario},
    services::auth,
};

// Extrai o token do header `Authorization: Bearer <token>`.
fn extrair_bearer(parts: &Parts) -> Result<&str, AppError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|valor| valor.to_str().ok())
        .and_then(|valor| valor.strip_prefix("Bearer "))
        .ok_or(AppError::TokenInvalido)
}

/// Extrator para rotas de usuário autenticado. Valida o token, confere o
/// realm e carrega o usuário do banco.
pub struct UsuarioAutenticado(pub Usuario);

impl FromRequestParts<AppState> for UsuarioAutenticado {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extrair_bearer(parts)?;
        let claims = auth::decodificar_token(token, &state.jwt_secret)?;

        if claims.realm != Realm::Usuario.as_str() {
            return Err(AppError::AcessoNegado);
        }

        let usuario = state.usuario_service.buscar_por_id(claims.sub).await?;
        Ok(UsuarioAutenticado(usuario))
    }
}

/// Idem para rotas administrativas: token do realm `admin`.
pub struct AdminAutenticado(pub Admin);

impl FromRequestParts<AppState> for AdminAutenticado {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extrair_bearer(parts)?;
        let claims = auth::decodificar_token(token, &state.jwt_secret)?;

        if claims.realm != Realm::Admin.as_str() {
            return Err(AppError::AcessoNegado);
        }

        let admin = state.admin_service.buscar_por_id(claims.sub).await?;
        Ok(AdminAutenticado(admin))
    }
}
