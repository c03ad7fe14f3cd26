//! # Dukaan API
//!
//! REST server over the JSON record store.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Surface                                    │
//! │                                                                         │
//! │  GET    /api/ping                     health check                     │
//! │  GET    /api/products                 list products                    │
//! │  GET    /api/products/{id}            one product                      │
//! │  POST   /api/products                 create (201)                     │
//! │  PUT    /api/products/{id}            update                           │
//! │  DELETE /api/products/{id}            delete (204)                     │
//! │  POST   /api/signup                   create account (201)            │
//! │  POST   /api/login                    check credentials               │
//! │  POST   /api/transactions             record an order (permissive)    │
//! │  GET    /api/transactions?userId=&phone=   order history              │
//! │  GET    /api/transactions/{phone}     order history (path form)       │
//! │                                                                         │
//! │  Errors: {"error": "<code>"} with codes invalid_id, invalid_input,     │
//! │  invalid_phone, invalid_password, exists, not_found, wrong_password,   │
//! │  server_error.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - listen port (default: 5000)
//! - `DUKAAN_DATA_DIR` - collection file directory (default: `database`)

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

// Re-exports
pub use config::ApiConfig;
pub use error::ApiError;
pub use state::AppState;
