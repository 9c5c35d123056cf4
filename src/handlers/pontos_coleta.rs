// src/handlers/pontos_coleta.rs

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
        alerta::FiltroCidade,
        ponto_coleta::{
            AtualizarPontoColetaPayload, CriarParticipacaoPayload, CriarPontoColetaPayload,
            ParticipacaoPontoColeta, PontoDeColetaDeDoacoes,
        },
    },
};

// Listagem pública; ?cidade= filtra por substring (sem diferenciar caixa).
pub async fn listar(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroCidade>,
) -> Result<Json<Vec<PontoDeColetaDeDoacoes>>, AppError> {
    let pontos = app_state
        .ponto_coleta_service
        .listar(filtro.cidade.as_deref())
        .await?;
    Ok(Json(pontos))
}

pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PontoDeColetaDeDoacoes>, AppError> {
    let ponto = app_state.ponto_coleta_service.buscar_por_id(id).await?;
    Ok(Json(ponto))
}

// Cadastro de ponto de coleta; também publica o alerta correspondente.
pub async fn criar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Json(payload): Json<CriarPontoColetaPayload>,
) -> Result<(StatusCode, Json<PontoDeColetaDeDoacoes>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let ponto = app_state.ponto_coleta_service.criar(payload).await?;
    Ok((StatusCode::CREATED, Json(ponto)))
}

pub async fn atualizar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Path(id): Path<i32>,
    Json(payload): Json<AtualizarPontoColetaPayload>,
) -> Result<Json<PontoDeColetaDeDoacoes>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let ponto = app_state.ponto_coleta_service.atualizar(id, &payload).await?;
    Ok(Json(ponto))
}

pub async fn deletar(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.ponto_coleta_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Participações
// ---

pub async fn criar_participacao(
    State(app_state): State<AppState>,
    UsuarioAutenticado(usuario): UsuarioAutenticado,
    Path(id): Path<i32>,
    Json(payload): Json<CriarParticipacaoPayload>,
) -> Result<(StatusCode, Json<ParticipacaoPontoColeta>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let participacao = app_state
        .ponto_coleta_service
        .criar_participacao(id, usuario.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(participacao)))
}

// Os dados de contato dos participantes são visíveis só para administradores.
pub async fn listar_participacoes(
    State(app_state): State<AppState>,
    _admin: AdminAutenticado,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ParticipacaoPontoColeta>>, AppError> {
    let participacoes = app_state
        .ponto_coleta_service
        .listar_participacoes(id)
        .await?;
    Ok(Json(participacoes))
}

pub async fn deletar_participacao(
    State(app_state): State<AppState>,
    UsuarioAutenticado(usuario): UsuarioAutenticado,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state
        .ponto_coleta_service
        .deletar_participacao(id, usuario.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
