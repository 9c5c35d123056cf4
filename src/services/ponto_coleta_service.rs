// src/services/ponto_coleta_service.rs

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        id_unico::{inserir_com_retentativa, GeradorDeIds},
    },
    db::{AlertaRepository, ParticipacaoRepository, PontoColetaRepository},
    models::{
        alerta::{NovoAlerta, TipoOrigemAlerta},
        ponto_coleta::{
            AtualizarPontoColetaPayload, CriarParticipacaoPayload, CriarPontoColetaPayload,
            ParticipacaoPontoColeta, PontoDeColetaDeDoacoes,
        },
    },
};

#[derive(Clone)]
pub struct PontoColetaService {
    ponto_repo: PontoColetaRepository,
    participacao_repo: ParticipacaoRepository,
    alerta_repo: AlertaRepository,
    gerador_ids: GeradorDeIds,
    pool: PgPool,
}

impl PontoColetaService {
    pub fn new(
        ponto_repo: PontoColetaRepository,
        participacao_repo: ParticipacaoRepository,
        alerta_repo: AlertaRepository,
        gerador_ids: GeradorDeIds,
        pool: PgPool,
    ) -> Self {
        Self {
            ponto_repo,
            participacao_repo,
            alerta_repo,
            gerador_ids,
            pool,
        }
    }

    // Assim como nos abrigos, ponto e alerta nascem na mesma transação.
    pub async fn criar(
        &self,
        payload: CriarPontoColetaPayload,
    ) -> Result<PontoDeColetaDeDoacoes, AppError> {
        let data_inicio = payload.data_inicio.unwrap_or_else(Utc::now);

        let mut tx = self.pool.begin().await?;

        let ponto = inserir_com_retentativa(&self.gerador_ids, "pontos_de_coleta", async |id| {
            self.ponto_repo.inserir(&mut *tx, id, &payload, data_inicio).await
        })
        .await?;

        let novo_alerta = NovoAlerta::de_ponto_coleta(&ponto);
        inserir_com_retentativa(&self.gerador_ids, "alertas", async |id| {
            self.alerta_repo.inserir(&mut *tx, id, &novo_alerta).await
        })
        .await?;

        tx.commit().await?;

        tracing::info!(
            "📦 Ponto de coleta {} cadastrado em {} com alerta publicado.",
            ponto.id,
            ponto.cidade
        );
        Ok(ponto)
    }

    pub async fn listar(
        &self,
        cidade: Option<&str>,
    ) -> Result<Vec<PontoDeColetaDeDoacoes>, AppError> {
        self.ponto_repo.listar(cidade).await
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<PontoDeColetaDeDoacoes, AppError> {
        self.ponto_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::PontoColetaNaoEncontrado)
    }

    pub async fn atualizar(
        &self,
        id: i32,
        payload: &AtualizarPontoColetaPayload,
    ) -> Result<PontoDeColetaDeDoacoes, AppError> {
        self.ponto_repo
            .atualizar(id, payload)
            .await?
            .ok_or(AppError::PontoColetaNaoEncontrado)
    }

    // Participações caem via ON DELETE CASCADE; o alerta sai na transação.
    pub async fn deletar(&self, id: i32) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.alerta_repo
            .deletar_por_origem(&mut *tx, id, TipoOrigemAlerta::PontoColeta)
            .await?;

        let existia = self.ponto_repo.deletar(&mut *tx, id).await?;
        if !existia {
            return Err(AppError::PontoColetaNaoEncontrado);
        }

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Participações
    // ---

    pub async fn criar_participacao(
        &self,
        ponto_coleta_id: i32,
        id_usuario: i32,
        payload: CriarParticipacaoPayload,
    ) -> Result<ParticipacaoPontoColeta, AppError> {
        // 404 quando o ponto não existe; nada é inserido.
        self.ponto_repo
            .buscar_por_id(ponto_coleta_id)
            .await?
            .ok_or(AppError::PontoColetaNaoEncontrado)?;

        inserir_com_retentativa(&self.gerador_ids, "participacoes_ponto_coleta", async |id| {
            self.participacao_repo
                .inserir(id, ponto_coleta_id, id_usuario, &payload)
                .await
        })
        .await
    }

    pub async fn listar_participacoes(
        &self,
        ponto_coleta_id: i32,
    ) -> Result<Vec<ParticipacaoPontoColeta>, AppError> {
        self.ponto_repo
            .buscar_por_id(ponto_coleta_id)
            .await?
            .ok_or(AppError::PontoColetaNaoEncontrado)?;

        self.participacao_repo.listar_por_ponto(ponto_coleta_id).await
    }

    // Só o autor pode desistir da própria participação.
    pub async fn deletar_participacao(
        &self,
        participacao_id: i32,
        id_usuario: i32,
    ) -> Result<(), AppError> {
        let participacao = self
            .participacao_repo
            .buscar_por_id(participacao_id)
            .await?
            .ok_or(AppError::ParticipacaoNaoEncontrada)?;

        if participacao.id_usuario != id_usuario {
            return Err(AppError::AcessoNegado);
        }

        if !self.participacao_repo.deletar(participacao_id).await? {
            return Err(AppError::ParticipacaoNaoEncontrada);
        }
        Ok(())
    }
}
