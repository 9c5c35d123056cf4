// src/db/usuario_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::usuario::Usuario};

const COLUNAS: &str =
    "id, nome, email, senha_hash, google_user_id, pais, estado, municipio, bairro, criado_em, atualizado_em";

// O repositório de usuários, responsável por todas as interações com a
// tabela 'usuarios'.
#[derive(Clone)]
pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Insere com o ID de 4 dígitos proposto pelo service. Colisão de chave
    // primária vira `IdJaEmUso` para o laço de retentativa; e-mail repetido
    // vira `EmailJaCadastrado`.
    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        id: i32,
        nome: &str,
        email: &str,
        senha_hash: Option<&str>,
        google_user_id: Option<&str>,
        pais: Option<&str>,
        estado: Option<&str>,
        municipio: Option<&str>,
        bairro: Option<&str>,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO usuarios (id, nome, email, senha_hash, google_user_id, pais, estado, municipio, bairro)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUNAS}
            "#
        );

        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(id)
            .bind(nome)
            .bind(email)
            .bind(senha_hash)
            .bind(google_user_id)
            .bind(pais)
            .bind(estado)
            .bind(municipio)
            .bind(bairro)
            .fetch_one(executor)
            .await
            .map_err(|e| match AppError::constraint_violada(&e).as_deref() {
                Some("usuarios_pkey") => AppError::IdJaEmUso,
                Some("usuarios_email_key") => AppError::EmailJaCadastrado,
                _ => e.into(),
            })?;

        Ok(usuario)
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Option<Usuario>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM usuarios WHERE id = $1");
        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    pub async fn buscar_por_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM usuarios WHERE email = $1");
        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    pub async fn buscar_por_google_id(
        &self,
        google_user_id: &str,
    ) -> Result<Option<Usuario>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM usuarios WHERE google_user_id = $1");
        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(google_user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    pub async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM usuarios ORDER BY nome");
        let usuarios = sqlx::query_as::<_, Usuario>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(usuarios)
    }

    pub async fn atualizar(
        &self,
        id: i32,
        nome: &str,
        pais: Option<&str>,
        estado: Option<&str>,
        municipio: Option<&str>,
        bairro: Option<&str>,
    ) -> Result<Option<Usuario>, AppError> {
        let sql = format!(
            r#"
            UPDATE usuarios
            SET nome = $2, pais = $3, estado = $4, municipio = $5, bairro = $6,
                atualizado_em = now()
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );

        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(id)
            .bind(nome)
            .bind(pais)
            .bind(estado)
            .bind(municipio)
            .bind(bairro)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    // Usada pelo fluxo de "esqueci minha senha".
    pub async fn atualizar_senha_por_email(
        &self,
        email: &str,
        senha_hash: &str,
    ) -> Result<bool, AppError> {
        let resultado = sqlx::query(
            "UPDATE usuarios SET senha_hash = $2, atualizado_em = now() WHERE email = $1",
        )
        .bind(email)
        .bind(senha_hash)
        .execute(&self.pool)
        .await?;
        Ok(resultado.rows_affected() > 0)
    }

    // Participações e visualizações do usuário somem via ON DELETE CASCADE.
    pub async fn deletar(&self, id: i32) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
