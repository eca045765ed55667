//! # FooBars
//!
//! HTTP resource API for `FooBar` entities, built on axum.
//!
//! The [`FooBarsController`] maps HTTP verbs onto an injected
//! [`Repository`] and turns the outcome into status codes:
//!
//! | Route | Result |
//! |---|---|
//! | `GET /api/FooBars/{id}` | `200` with the entity, `404` if `id < 1` or missing |
//! | `HEAD /api/FooBars/{id}` | `204` |
//! | `POST /api/FooBars` | `201` with `Location` |
//! | `PUT /api/FooBars` | `201` for key `0`, else `200` |
//! | `PATCH /api/FooBars/{id}` | `200`, `404` when missing, `400` when the patch leaves it invalid |
//! | `DELETE /api/FooBars/{id}` | `200` |
//!
//! ## Wiring
//!
//! ```rust,no_run
//! use foobars::module::{FooBarsModule, Module};
//! use foobars::{Container, app};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut container = Container::new();
//!     FooBarsModule::register(&mut container)?;
//!
//!     let router = app::router(&container)?;
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

// `#[derive(Injectable)]` expands to `::foobars::...` paths.
extern crate self as foobars;

pub mod app;
pub mod common;
pub mod config;
pub mod controller;
pub mod di;
pub mod entity;
pub mod error;
pub mod extract;
pub mod interceptor;
pub mod lifecycle;
pub mod module;
pub mod patch;
pub mod repository;
pub mod validation;

// Re-export core types
pub use controller::FooBarsController;
pub use di::{Container, ContainerBuilder, Injectable};
pub use entity::{Entity, EntityKey, FooBar};
pub use error::{FooBarsError, Result};
pub use module::{FooBarsModule, Module};
pub use patch::PatchDocument;
pub use repository::{MemoryRepository, Repository, RepositoryError};

// Re-export macros
pub use foobars_macro::Injectable;

pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use foobars::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ErrorBody, ErrorCode, Saved};
    pub use crate::controller::FooBarsController;
    pub use crate::di::{Container, ContainerBuilder, Injectable};
    pub use crate::entity::{Entity, EntityKey, FooBar};
    pub use crate::error::{FooBarsError, Result};
    pub use crate::extract::{JsonBody, KeyPath};
    pub use crate::interceptor::{Interceptor, InterceptorLayer, InterceptorResult, LoggingInterceptor, Next};
    pub use crate::lifecycle::shutdown_signal;
    pub use crate::module::{FooBarsModule, Module};
    pub use crate::patch::{PatchDocument, PatchOperation};
    pub use crate::repository::{MemoryRepository, Repository, RepositoryError};
    pub use crate::validation::{ModelState, Validate};
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use foobars_macro::Injectable;
    pub use std::sync::Arc;
}
