// src/services/abrigo_service.rs

use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        id_unico::{inserir_com_retentativa, GeradorDeIds},
    },
    db::{AbrigoRepository, AlertaRepository},
    models::{
        abrigo::{AbrigoTemporario, AtualizarAbrigoPayload, CriarAbrigoPayload},
        alerta::{NovoAlerta, TipoOrigemAlerta},
    },
};

#[derive(Clone)]
pub struct AbrigoService {
    abrigo_repo: AbrigoRepository,
    alerta_repo: AlertaRepository,
    gerador_ids: GeradorDeIds,
    pool: PgPool,
}

impl AbrigoService {
    pub fn new(
        abrigo_repo: AbrigoRepository,
        alerta_repo: AlertaRepository,
        gerador_ids: GeradorDeIds,
        pool: PgPool,
    ) -> Self {
        Self {
            abrigo_repo,
            alerta_repo,
            gerador_ids,
            pool,
        }
    }

    // Cadastro de abrigo: o abrigo e o alerta correspondente nascem na mesma
    // transação. Se qualquer um falhar, nenhum dos dois aparece no banco.
    pub async fn criar(&self, payload: CriarAbrigoPayload) -> Result<AbrigoTemporario, AppError> {
        let mut tx = self.pool.begin().await?;

        let abrigo = inserir_com_retentativa(&self.gerador_ids, "abrigos_temporarios", async |id| {
            self.abrigo_repo.inserir(&mut *tx, id, &payload).await
        })
        .await?;

        let novo_alerta = NovoAlerta::de_abrigo(&abrigo);
        inserir_com_retentativa(&self.gerador_ids, "alertas", async |id| {
            self.alerta_repo.inserir(&mut *tx, id, &novo_alerta).await
        })
        .await?;

        tx.commit().await?;

        tracing::info!(
            "🏠 Abrigo {} cadastrado em {} com alerta publicado.",
            abrigo.id,
            abrigo.cidade_municipio
        );
        Ok(abrigo)
    }

    pub async fn listar(&self) -> Result<Vec<AbrigoTemporario>, AppError> {
        self.abrigo_repo.listar().await
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<AbrigoTemporario, AppError> {
        self.abrigo_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::AbrigoNaoEncontrado)
    }

    pub async fn atualizar(
        &self,
        id: i32,
        payload: &AtualizarAbrigoPayload,
    ) -> Result<AbrigoTemporario, AppError> {
        self.abrigo_repo
            .atualizar(id, payload)
            .await?
            .ok_or(AppError::AbrigoNaoEncontrado)
    }

    // Remoção espelha a criação: alerta de origem e abrigo saem juntos.
    pub async fn deletar(&self, id: i32) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.alerta_repo
            .deletar_por_origem(&mut *tx, id, TipoOrigemAlerta::AbrigoTemporario)
            .await?;

        let existia = self.abrigo_repo.deletar(&mut *tx, id).await?;
        if !existia {
            // Rollback implícito quando a transação sai de escopo.
            return Err(AppError::AbrigoNaoEncontrado);
        }

        tx.commit().await?;
        Ok(())
    }
}
