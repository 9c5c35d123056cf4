// src/db/ponto_coleta_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::ponto_coleta::{
        AtualizarPontoColetaPayload, CriarPontoColetaPayload, PontoDeColetaDeDoacoes,
    },
};

const COLUNAS: &str =
    "id, tipo, descricao, data_inicio, cidade, bairro, logradouro, estoque, imagem_urls";

#[derive(Clone)]
pub struct PontoColetaRepository {
    pool: PgPool,
}

impl PontoColetaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        id: i32,
        payload: &CriarPontoColetaPayload,
        data_inicio: DateTime<Utc>,
    ) -> Result<PontoDeColetaDeDoacoes, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO pontos_de_coleta (id, tipo, descricao, data_inicio, cidade, bairro, logradouro, estoque, imagem_urls)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUNAS}
            "#
        );

        let ponto = sqlx::query_as::<_, PontoDeColetaDeDoacoes>(&sql)
            .bind(id)
            .bind(&payload.tipo)
            .bind(&payload.descricao)
            .bind(data_inicio)
            .bind(&payload.cidade)
            .bind(&payload.bairro)
            .bind(&payload.logradouro)
            .bind(&payload.estoque)
            .bind(&payload.imagem_urls)
            .fetch_one(executor)
            .await
            .map_err(|e| match AppError::constraint_violada(&e).as_deref() {
                Some("pontos_de_coleta_pkey") => AppError::IdJaEmUso,
                _ => e.into(),
            })?;

        Ok(ponto)
    }

    // Filtro de cidade por substring, ignorando maiúsculas/minúsculas.
    // (Alertas filtram por igualdade exata; a assimetria é proposital.)
    pub async fn listar(
        &self,
        cidade: Option<&str>,
    ) -> Result<Vec<PontoDeColetaDeDoacoes>, AppError> {
        let pontos = match cidade {
            Some(cidade) => {
                let sql = format!(
                    "SELECT {COLUNAS} FROM pontos_de_coleta WHERE cidade ILIKE '%' || $1 || '%' ORDER BY data_inicio DESC"
                );
                sqlx::query_as::<_, PontoDeColetaDeDoacoes>(&sql)
                    .bind(cidade)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql =
                    format!("SELECT {COLUNAS} FROM pontos_de_coleta ORDER BY data_inicio DESC");
                sqlx::query_as::<_, PontoDeColetaDeDoacoes>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(pontos)
    }

    pub async fn buscar_por_id(
        &self,
        id: i32,
    ) -> Result<Option<PontoDeColetaDeDoacoes>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM pontos_de_coleta WHERE id = $1");
        let ponto = sqlx::query_as::<_, PontoDeColetaDeDoacoes>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ponto)
    }

    pub async fn atualizar(
        &self,
        id: i32,
        payload: &AtualizarPontoColetaPayload,
    ) -> Result<Option<PontoDeColetaDeDoacoes>, AppError> {
        let sql = format!(
            r#"
            UPDATE pontos_de_coleta
            SET tipo = $2, descricao = $3, cidade = $4, bairro = $5,
                logradouro = $6, estoque = $7, imagem_urls = $8
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );

        let ponto = sqlx::query_as::<_, PontoDeColetaDeDoacoes>(&sql)
            .bind(id)
            .bind(&payload.tipo)
            .bind(&payload.descricao)
            .bind(&payload.cidade)
            .bind(&payload.bairro)
            .bind(&payload.logradouro)
            .bind(&payload.estoque)
            .bind(&payload.imagem_urls)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ponto)
    }

    // As participações do ponto somem via ON DELETE CASCADE; o alerta de
    // origem é removido pelo service, na mesma transação.
    pub async fn deletar<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM pontos_de_coleta WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
