//! Server-rendered todo list whose accounts and documents live in Appwrite.

pub mod backend;
pub mod config;
pub mod csrf;
pub mod error;
pub mod extract;
pub mod htmx;
pub mod router;
pub mod session_store;
pub mod state;
pub mod views;

pub mod models {
    pub mod account;
    pub mod session;
    pub mod todo;
}

pub mod repositories {
    pub mod account;
    pub mod schema;
    pub mod todo;
}

pub mod services {
    pub mod auth;
    pub mod todos;
}

pub mod handlers {
    pub mod auth;
    pub mod health;
    pub mod todos;
}

pub mod middleware_layer {
    pub mod auth;
    pub mod csrf;
}

pub mod validation {
    pub mod auth;
    pub mod todo;
}

pub use config::Config;
pub use router::build_router;
pub use state::AppState;
