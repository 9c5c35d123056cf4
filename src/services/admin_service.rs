// src/services/admin_service.rs

use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        id_unico::{inserir_com_retentativa, GeradorDeIds},
    },
    db::AdminRepository,
    models::{
        admin::{Admin, RegistrarAdminPayload},
        auth::{EsqueciSenhaPayload, Realm},
    },
    services::auth,
};

#[derive(Clone)]
pub struct AdminService {
    admin_repo: AdminRepository,
    gerador_ids: GeradorDeIds,
    jwt_secret: String,
    pool: PgPool,
}

impl AdminService {
    pub fn new(
        admin_repo: AdminRepository,
        gerador_ids: GeradorDeIds,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            admin_repo,
            gerador_ids,
            jwt_secret,
            pool,
        }
    }

    pub async fn registrar(
        &self,
        payload: RegistrarAdminPayload,
    ) -> Result<(Admin, String), AppError> {
        let senha_hash = auth::gerar_hash_de_senha(&payload.senha).await?;

        let mut tx = self.pool.begin().await?;

        let admin = inserir_com_retentativa(&self.gerador_ids, "admins", async |id| {
            self.admin_repo
                .inserir(&mut *tx, id, &payload.nome, &payload.email, &senha_hash)
                .await
        })
        .await?;

        tx.commit().await?;

        let token = auth::gerar_token(admin.id, Realm::Admin, &self.jwt_secret)?;
        Ok((admin, token))
    }

    pub async fn login(&self, email: &str, senha: &str) -> Result<String, AppError> {
        let admin = self
            .admin_repo
            .buscar_por_email(email)
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        if !auth::verificar_senha(senha, &admin.senha_hash).await? {
            return Err(AppError::CredenciaisInvalidas);
        }

        auth::gerar_token(admin.id, Realm::Admin, &self.jwt_secret)
    }

    // Mesmo fluxo frágil do realm de usuário; mesma pendência de verificação.
    pub async fn esqueci_senha(&self, payload: &EsqueciSenhaPayload) -> Result<(), AppError> {
        if payload.nova_senha != payload.confirmacao_senha {
            return Err(AppError::SenhasNaoConferem);
        }

        self.admin_repo
            .buscar_por_email(&payload.email)
            .await?
            .ok_or(AppError::AdminNaoEncontrado)?;

        let senha_hash = auth::gerar_hash_de_senha(&payload.nova_senha).await?;

        let atualizado = self
            .admin_repo
            .atualizar_senha_por_email(&payload.email, &senha_hash)
            .await?;
        if !atualizado {
            return Err(AppError::AdminNaoEncontrado);
        }

        Ok(())
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Admin, AppError> {
        self.admin_repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::AdminNaoEncontrado)
    }
}
