//src/main.rs

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger. RUST_LOG controla o nível; "info" é o padrão.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Autenticação de usuários (rotas públicas)
    let rotas_auth = Router::new()
        .route("/registrar", post(handlers::auth::registrar))
        .route("/login", post(handlers::auth::login))
        .route("/login-google", post(handlers::auth::login_google))
        .route("/esqueci-senha", post(handlers::auth::esqueci_senha));

    // Autenticação de administradores (realm separado)
    let rotas_admins = Router::new()
        .route("/registrar", post(handlers::admins::registrar))
        .route("/login", post(handlers::admins::login))
        .route("/esqueci-senha", post(handlers::admins::esqueci_senha));

    // Perfil do próprio usuário + gestão administrativa de contas
    let rotas_usuarios = Router::new()
        .route("/", get(handlers::usuarios::listar))
        .route(
            "/me",
            get(handlers::usuarios::get_me)
                .put(handlers::usuarios::atualizar_me)
                .delete(handlers::usuarios::deletar_me),
        )
        .route(
            "/{id}",
            get(handlers::usuarios::buscar).delete(handlers::usuarios::deletar),
        );

    // Leitura pública; escrita só para administradores; feed/descarte por usuário
    let rotas_alertas = Router::new()
        .route(
            "/",
            get(handlers::alertas::listar).post(handlers::alertas::criar),
        )
        .route("/feed", get(handlers::alertas::feed))
        .route(
            "/{id}",
            get(handlers::alertas::buscar)
                .put(handlers::alertas::atualizar)
                .delete(handlers::alertas::deletar),
        )
        .route("/{id}/descartar", post(handlers::alertas::descartar));

    let rotas_abrigos = Router::new()
        .route(
            "/",
            get(handlers::abrigos::listar).post(handlers::abrigos::criar),
        )
        .route(
            "/{id}",
            get(handlers::abrigos::buscar)
                .put(handlers::abrigos::atualizar)
                .delete(handlers::abrigos::deletar),
        );

    let rotas_pontos_coleta = Router::new()
        .route(
            "/",
            get(handlers::pontos_coleta::listar).post(handlers::pontos_coleta::criar),
        )
        .route(
            "/{id}",
            get(handlers::pontos_coleta::buscar)
                .put(handlers::pontos_coleta::atualizar)
                .delete(handlers::pontos_coleta::deletar),
        )
        .route(
            "/{id}/participacoes",
            post(handlers::pontos_coleta::criar_participacao)
                .get(handlers::pontos_coleta::listar_participacoes),
        )
        .route(
            "/participacoes/{id}",
            delete(handlers::pontos_coleta::deletar_participacao),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", rotas_auth)
        .nest("/api/admins", rotas_admins)
        .nest("/api/usuarios", rotas_usuarios)
        .nest("/api/alertas", rotas_alertas)
        .nest("/api/abrigos", rotas_abrigos)
        .nest("/api/pontos-coleta", rotas_pontos_coleta)
        .with_state(app_state);

    // Inicia o servidor
    let porta = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", porta);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
