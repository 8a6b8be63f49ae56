//! # till-db: Persistence and Service Layer for Till
//!
//! This crate stores finalized sales in SQLite via sqlx and exposes the
//! [`SalesService`] API that outer surfaces build on. All money math lives
//! in `till-core`; this crate persists and aggregates what core computed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Data Flow                                 │
//! │                                                                         │
//! │  Caller (API handler, CLI, seed tool)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      till-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │  SalesService │    │  Repository   │    │  Migrations  │   │   │
//! │  │   │ (service.rs)  │───►│  (sale.rs)    │    │  (embedded)  │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ create_sale   │    │ insert_sale   │    │ 001_initial_ │   │   │
//! │  │   │ summaries     │    │ sum_and_count │    │ schema.sql   │   │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘   │   │
//! │  │           │                    │                               │   │
//! │  │           ▼                    ▼                               │   │
//! │  │   ┌──────────────────────────────────────┐                    │   │
//! │  │   │        Database (pool.rs)            │                    │   │
//! │  │   │   SqlitePool, WAL, foreign keys      │                    │   │
//! │  │   └──────────────────────────────────────┘                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (sale)
//! - [`service`] - [`SalesService`]: creation, lookup, summaries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use till_db::{Database, DbConfig, SalesService};
//!
//! let db = Database::new(DbConfig::new("path/to/till.db")).await?;
//! let sales = SalesService::new(db);
//!
//! let detail = sales.create_sale(new_sale).await?;
//! let today = sales.daily_summary().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use service::{SalesService, ServiceError, ServiceResult};

// Repository re-export for callers that need raw access (seed tool, tests)
pub use repository::sale::SaleRepository;
