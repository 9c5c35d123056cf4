// src/db/participacao_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::ponto_coleta::{CriarParticipacaoPayload, ParticipacaoPontoColeta},
};

const COLUNAS: &str =
    "id, ponto_coleta_id, id_usuario, forma_de_ajuda, mensagem, contato, telefone, data_hora";

#[derive(Clone)]
pub struct ParticipacaoRepository {
    pool: PgPool,
}

impl ParticipacaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // O service confere antes se o ponto existe (para um 404 limpo); as
    // chaves estrangeiras ficam como última linha de defesa contra corridas.
    pub async fn inserir(
        &self,
        id: i32,
        ponto_coleta_id: i32,
        id_usuario: i32,
        payload: &CriarParticipacaoPayload,
    ) -> Result<ParticipacaoPontoColeta, AppError> {
        let sql = format!(
            r#"
            INSERT INTO participacoes_ponto_coleta (id, ponto_coleta_id, id_usuario, forma_de_ajuda, mensagem, contato, telefone)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUNAS}
            "#
        );

        let participacao = sqlx::query_as::<_, ParticipacaoPontoColeta>(&sql)
            .bind(id)
            .bind(ponto_coleta_id)
            .bind(id_usuario)
            .bind(&payload.forma_de_ajuda)
            .bind(&payload.mensagem)
            .bind(&payload.contato)
            .bind(&payload.telefone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(constraint) = AppError::constraint_violada(&e) {
                    if constraint == "participacoes_ponto_coleta_pkey" {
                        return AppError::IdJaEmUso;
                    }
                }
                match AppError::chave_estrangeira_violada(&e).as_deref() {
                    Some("participacoes_ponto_coleta_ponto_coleta_id_fkey") => {
                        AppError::PontoColetaNaoEncontrado
                    }
                    Some("participacoes_ponto_coleta_id_usuario_fkey") => {
                        AppError::UsuarioNaoEncontrado
                    }
                    _ => e.into(),
                }
            })?;

        Ok(participacao)
    }

    pub async fn listar_por_ponto(
        &self,
        ponto_coleta_id: i32,
    ) -> Result<Vec<ParticipacaoPontoColeta>, AppError> {
        let sql = format!(
            "SELECT {COLUNAS} FROM participacoes_ponto_coleta WHERE ponto_coleta_id = $1 ORDER BY data_hora DESC"
        );
        let participacoes = sqlx::query_as::<_, ParticipacaoPontoColeta>(&sql)
            .bind(ponto_coleta_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(participacoes)
    }

    pub async fn buscar_por_id(
        &self,
        id: i32,
    ) -> Result<Option<ParticipacaoPontoColeta>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM participacoes_ponto_coleta WHERE id = $1");
        let participacao = sqlx::query_as::<_, ParticipacaoPontoColeta>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(participacao)
    }

    pub async fn deletar(&self, id: i32) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM participacoes_ponto_coleta WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
