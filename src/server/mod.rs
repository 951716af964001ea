pub mod dto;
mod links;
pub mod response;
mod router;
mod session;
mod settings;
mod status;
pub mod validation;

pub use router::{AppState, create_router};
