// src/db/abrigo_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::abrigo::{AbrigoTemporario, AtualizarAbrigoPayload, CriarAbrigoPayload, STATUS_INICIAL},
};

const COLUNAS: &str = "id, nome, descricao, cidade_municipio, bairro, logradouro, capacidade, imagem_urls, data_cadastro, status";

#[derive(Clone)]
pub struct AbrigoRepository {
    pool: PgPool,
}

impl AbrigoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Executor genérico: o abrigo e o seu alerta nascem na mesma transação.
    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        id: i32,
        payload: &CriarAbrigoPayload,
    ) -> Result<AbrigoTemporario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO abrigos_temporarios (id, nome, descricao, cidade_municipio, bairro, logradouro, capacidade, imagem_urls, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUNAS}
            "#
        );

        let abrigo = sqlx::query_as::<_, AbrigoTemporario>(&sql)
            .bind(id)
            .bind(&payload.nome)
            .bind(&payload.descricao)
            .bind(&payload.cidade_municipio)
            .bind(&payload.bairro)
            .bind(&payload.logradouro)
            .bind(payload.capacidade)
            .bind(&payload.imagem_urls)
            .bind(STATUS_INICIAL)
            .fetch_one(executor)
            .await
            .map_err(|e| match AppError::constraint_violada(&e).as_deref() {
                Some("abrigos_temporarios_pkey") => AppError::IdJaEmUso,
                _ => e.into(),
            })?;

        Ok(abrigo)
    }

    pub async fn listar(&self) -> Result<Vec<AbrigoTemporario>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM abrigos_temporarios ORDER BY data_cadastro DESC");
        let abrigos = sqlx::query_as::<_, AbrigoTemporario>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(abrigos)
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Option<AbrigoTemporario>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM abrigos_temporarios WHERE id = $1");
        let abrigo = sqlx::query_as::<_, AbrigoTemporario>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(abrigo)
    }

    pub async fn atualizar(
        &self,
        id: i32,
        payload: &AtualizarAbrigoPayload,
    ) -> Result<Option<AbrigoTemporario>, AppError> {
        let sql = format!(
            r#"
            UPDATE abrigos_temporarios
            SET nome = $2, descricao = $3, cidade_municipio = $4, bairro = $5,
                logradouro = $6, capacidade = $7, imagem_urls = $8, status = $9
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );

        let abrigo = sqlx::query_as::<_, AbrigoTemporario>(&sql)
            .bind(id)
            .bind(&payload.nome)
            .bind(&payload.descricao)
            .bind(&payload.cidade_municipio)
            .bind(&payload.bairro)
            .bind(&payload.logradouro)
            .bind(payload.capacidade)
            .bind(&payload.imagem_urls)
            .bind(&payload.status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(abrigo)
    }

    // Na mesma transação, o service remove antes o alerta de origem.
    pub async fn deletar<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM abrigos_temporarios WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
