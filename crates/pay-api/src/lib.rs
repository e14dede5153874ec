//! # pay-api
//!
//! HTTP layer for the hosted checkout server.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Checkout page |
//! | POST | `/checkout` | Create checkout session |
//! | GET | `/success` | Payment succeeded |
//! | GET | `/cancel` | Payment cancelled |
//! | POST | `/webhook` | Stripe webhook |
//! | GET | `/health` | Health check |

pub mod handlers;
pub mod page;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
