// src/services/alerta_service.rs

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        id_unico::{inserir_com_retentativa, GeradorDeIds},
    },
    db::{AlertaRepository, VisualizacaoRepository},
    models::{
        alerta::{Alerta, AtualizarAlertaPayload, CriarAlertaPayload, NovoAlerta, TipoOrigemAlerta},
        visualizacao::VisualizacaoAlerta,
    },
};

#[derive(Clone)]
pub struct AlertaService {
    alerta_repo: AlertaRepository,
    visualizacao_repo: VisualizacaoRepository,
    gerador_ids: GeradorDeIds,
    pool: PgPool,
}

impl AlertaService {
    pub fn new(
        alerta_repo: AlertaRepository,
        visualizacao_repo: VisualizacaoRepository,
        gerador_ids: GeradorDeIds,
        pool: PgPool,
    ) -> Self {
        Self {
            alerta_repo,
            visualizacao_repo,
            gerador_ids,
            pool,
        }
    }

    // Publicação manual por um administrador.
    pub async fn criar_manual(&self, payload: CriarAlertaPayload) -> Result<Alerta, AppError> {
        let novo = NovoAlerta {
            tipo: payload.tipo,
            titulo: payload.titulo,
            descricao: payload.descricao,
            cidade: payload.cidade,
            bairro: payload.bairro,
            logradouro: payload.logradouro,
            data_hora: payload.data_hora.unwrap_or_else(Utc::now),
            origem_id: None,
            tipo_origem: Some(TipoOrigemAlerta::Manual),
        };

        inserir_com_retentativa(&self.gerador_ids, "alertas", async |id| {
            self.alerta_repo.inserir(&self.pool, id, &novo).await
        })
        .await
    }

    pub async fn listar(&self, cidade: Option<&str>) -> Result<Vec<Alerta>, AppError> {
        self.alerta_repo.listar(cidade).await
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Alerta, AppError> {
        self.alerta_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::AlertaNaoEncontrado)
    }

    pub async fn atualizar(
        &self,
        id: i32,
        payload: &AtualizarAlertaPayload,
    ) -> Result<Alerta, AppError> {
        self.alerta_repo
            .atualizar(
                id,
                &payload.tipo,
                &payload.titulo,
                &payload.descricao,
                &payload.cidade,
                payload.bairro.as_deref(),
                payload.logradouro.as_deref(),
            )
            .await?
            .ok_or(AppError::AlertaNaoEncontrado)
    }

    pub async fn deletar(&self, id: i32) -> Result<(), AppError> {
        if !self.alerta_repo.deletar(id).await? {
            return Err(AppError::AlertaNaoEncontrado);
        }
        Ok(())
    }

    // Feed do usuário autenticado: só alertas ainda não descartados.
    pub async fn feed(
        &self,
        usuario_id: i32,
        cidade: Option<&str>,
    ) -> Result<Vec<Alerta>, AppError> {
        self.alerta_repo
            .listar_nao_descartados(usuario_id, cidade)
            .await
    }

    pub async fn descartar(
        &self,
        usuario_id: i32,
        alerta_id: i32,
    ) -> Result<VisualizacaoAlerta, AppError> {
        // 404 limpo quando o alerta não existe; a FK cobre a corrida restante.
        self.alerta_repo
            .buscar_por_id(alerta_id)
            .await?
            .ok_or(AppError::AlertaNaoEncontrado)?;

        self.visualizacao_repo.descartar(usuario_id, alerta_id).await
    }
}
