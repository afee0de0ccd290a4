pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod routes;
pub mod state;
pub mod translate;

pub use config::Config;
pub use envelope::ResponseEnvelope;
pub use error::AppError;
pub use routes::build_router;
pub use state::AppState;
