// src/db/alerta_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::alerta::{Alerta, NovoAlerta, TipoOrigemAlerta},
};

const COLUNAS: &str =
    "id, tipo, titulo, descricao, cidade, bairro, logradouro, data_hora, origem_id, tipo_origem";

#[derive(Clone)]
pub struct AlertaRepository {
    pool: PgPool,
}

impl AlertaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Recebe um executor genérico: os alertas de abrigos e pontos de coleta
    // nascem dentro da transação da entidade de origem.
    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        id: i32,
        novo: &NovoAlerta,
    ) -> Result<Alerta, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO alertas (id, tipo, titulo, descricao, cidade, bairro, logradouro, data_hora, origem_id, tipo_origem)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COLUNAS}
            "#
        );

        let alerta = sqlx::query_as::<_, Alerta>(&sql)
            .bind(id)
            .bind(&novo.tipo)
            .bind(&novo.titulo)
            .bind(&novo.descricao)
            .bind(&novo.cidade)
            .bind(&novo.bairro)
            .bind(&novo.logradouro)
            .bind(novo.data_hora)
            .bind(novo.origem_id)
            .bind(novo.tipo_origem)
            .fetch_one(executor)
            .await
            .map_err(|e| match AppError::constraint_violada(&e).as_deref() {
                Some("alertas_pkey") => AppError::IdJaEmUso,
                _ => e.into(),
            })?;

        Ok(alerta)
    }

    // Filtro de cidade por igualdade, ignorando maiúsculas/minúsculas.
    // (Pontos de coleta filtram por substring; a assimetria é proposital.)
    pub async fn listar(&self, cidade: Option<&str>) -> Result<Vec<Alerta>, AppError> {
        let alertas = match cidade {
            Some(cidade) => {
                let sql = format!(
                    "SELECT {COLUNAS} FROM alertas WHERE LOWER(cidade) = LOWER($1) ORDER BY data_hora DESC"
                );
                sqlx::query_as::<_, Alerta>(&sql)
                    .bind(cidade)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {COLUNAS} FROM alertas ORDER BY data_hora DESC");
                sqlx::query_as::<_, Alerta>(&sql).fetch_all(&self.pool).await?
            }
        };
        Ok(alertas)
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Option<Alerta>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM alertas WHERE id = $1");
        let alerta = sqlx::query_as::<_, Alerta>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(alerta)
    }

    pub async fn atualizar(
        &self,
        id: i32,
        tipo: &str,
        titulo: &str,
        descricao: &str,
        cidade: &str,
        bairro: Option<&str>,
        logradouro: Option<&str>,
    ) -> Result<Option<Alerta>, AppError> {
        let sql = format!(
            r#"
            UPDATE alertas
            SET tipo = $2, titulo = $3, descricao = $4, cidade = $5, bairro = $6, logradouro = $7
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );

        let alerta = sqlx::query_as::<_, Alerta>(&sql)
            .bind(id)
            .bind(tipo)
            .bind(titulo)
            .bind(descricao)
            .bind(cidade)
            .bind(bairro)
            .bind(logradouro)
            .fetch_optional(&self.pool)
            .await?;
        Ok(alerta)
    }

    // As visualizações do alerta somem via ON DELETE CASCADE.
    pub async fn deletar(&self, id: i32) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM alertas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    // Remove o alerta gerado automaticamente para um abrigo/ponto de coleta.
    // Roda na mesma transação que apaga a entidade de origem.
    pub async fn deletar_por_origem<'e, E>(
        &self,
        executor: E,
        origem_id: i32,
        tipo_origem: TipoOrigemAlerta,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado =
            sqlx::query("DELETE FROM alertas WHERE origem_id = $1 AND tipo_origem = $2")
                .bind(origem_id)
                .bind(tipo_origem)
                .execute(executor)
                .await?;
        Ok(resultado.rows_affected())
    }

    // Feed do usuário: alertas que ele ainda não descartou.
    pub async fn listar_nao_descartados(
        &self,
        usuario_id: i32,
        cidade: Option<&str>,
    ) -> Result<Vec<Alerta>, AppError> {
        let alertas = match cidade {
            Some(cidade) => {
                let sql = format!(
                    r#"
                    SELECT {COLUNAS} FROM alertas a
                    WHERE LOWER(a.cidade) = LOWER($2)
                      AND NOT EXISTS (
                        SELECT 1 FROM visualizacoes_alerta v
                        WHERE v.alerta_id = a.id AND v.usuario_id = $1
                      )
                    ORDER BY a.data_hora DESC
                    "#
                );
                sqlx::query_as::<_, Alerta>(&sql)
                    .bind(usuario_id)
                    .bind(cidade)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    r#"
                    SELECT {COLUNAS} FROM alertas a
                    WHERE NOT EXISTS (
                        SELECT 1 FROM visualizacoes_alerta v
                        WHERE v.alerta_id = a.id AND v.usuario_id = $1
                    )
                    ORDER BY a.data_hora DESC
                    "#
                );
                sqlx::query_as::<_, Alerta>(&sql)
                    .bind(usuario_id)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(alertas)
    }
}
