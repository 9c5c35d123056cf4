pub mod auth;
pub mod usuario_service;
pub use usuario_service::UsuarioService;
pub mod admin_service;
pub use admin_service::AdminService;
pub mod alerta_service;
pub use alerta_service::AlertaService;
pub mod abrigo_service;
pub use abrigo_service::AbrigoService;
pub mod ponto_coleta_service;
pub use ponto_coleta_service::PontoColetaService;
