pub mod config_manager;
pub mod error;
pub mod form;
pub mod handlers;
pub mod llm;
pub mod page;
pub mod prompt;
pub mod routes;
pub mod state;
pub mod translator;
