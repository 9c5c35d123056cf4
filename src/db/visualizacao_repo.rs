// src/db/visualizacao_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::visualizacao::VisualizacaoAlerta};

#[derive(Clone)]
pub struct VisualizacaoRepository {
    pool: PgPool,
}

impl VisualizacaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Upsert: descartar duas vezes só atualiza a data do descarte.
    pub async fn descartar(
        &self,
        usuario_id: i32,
        alerta_id: i32,
    ) -> Result<VisualizacaoAlerta, AppError> {
        let visualizacao = sqlx::query_as::<_, VisualizacaoAlerta>(
            r#"
            INSERT INTO visualizacoes_alerta (usuario_id, alerta_id)
            VALUES ($1, $2)
            ON CONFLICT (usuario_id, alerta_id)
            DO UPDATE SET data_descarte = now()
            RETURNING usuario_id, alerta_id, data_descarte
            "#,
        )
        .bind(usuario_id)
        .bind(alerta_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::chave_estrangeira_violada(&e).as_deref() {
            Some("visualizacoes_alerta_alerta_id_fkey") => AppError::AlertaNaoEncontrado,
            Some("visualizacoes_alerta_usuario_id_fkey") => AppError::UsuarioNaoEncontrado,
            _ => e.into(),
        })?;

        Ok(visualizacao)
    }
}
