pub mod abrigo;
pub mod admin;
pub mod alerta;
pub mod auth;
pub mod ponto_coleta;
pub mod usuario;
pub mod visualizacao;
