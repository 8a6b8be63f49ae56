//! # Repository Module
//!
//! Database repository implementations for Till.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  SalesService                                                          │
//! │       │                                                                 │
//! │       │  db.sales().insert_sale(&sale, &items)                         │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── insert_sale(&self, sale, items)   ← single transaction            │
//! │  ├── get_by_id / get_by_sale_id                                        │
//! │  ├── list(&self)                       ← summary projection            │
//! │  ├── update_status / delete                                            │
//! │  └── sum_and_count(&self, status, from, to)                            │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                        │
//! │  • Repository is the only layer that sees partial state                │
//! │  • Can swap database implementations                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod sale;
