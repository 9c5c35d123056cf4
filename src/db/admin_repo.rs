// src/db/admin_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::admin::Admin};

const COLUNAS: &str = "id, nome, email, senha_hash, data_criacao";

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        id: i32,
        nome: &str,
        email: &str,
        senha_hash: &str,
    ) -> Result<Admin, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO admins (id, nome, email, senha_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUNAS}
            "#
        );

        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(id)
            .bind(nome)
            .bind(email)
            .bind(senha_hash)
            .fetch_one(executor)
            .await
            .map_err(|e| match AppError::constraint_violada(&e).as_deref() {
                Some("admins_pkey") => AppError::IdJaEmUso,
                Some("admins_email_key") => AppError::EmailJaCadastrado,
                _ => e.into(),
            })?;

        Ok(admin)
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Option<Admin>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM admins WHERE id = $1");
        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    pub async fn buscar_por_email(&self, email: &str) -> Result<Option<Admin>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM admins WHERE email = $1");
        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    pub async fn atualizar_senha_por_email(
        &self,
        email: &str,
        senha_hash: &str,
    ) -> Result<bool, AppError> {
        let resultado = sqlx::query("UPDATE admins SET senha_hash = $2 WHERE email = $1")
            .bind(email)
            .bind(senha_hash)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }
}
