//! # Shule Admissions API
//!
//! A REST API built with Rust, Axum and SQLite that runs admissions for a
//! school spanning kindergarten to A-Level.
//!
//! ## Overview
//!
//! - **Applications**: anyone can apply for one of four levels (KG, Primary,
//!   O-Level, A-Level) and receives a control number for paying the fee
//! - **Review**: the secretary approves or rejects applications; approval
//!   provisions a student with a registration number such as `25PL003`
//! - **Communication**: announcements per level and direct messages to a
//!   student's parent
//! - **Dashboards**: secretary reports, a headmaster summary and a parent view
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Caller extraction and rate limiting
//! ├── modules/          # Feature modules
//! │   ├── applications/ # Submission, payment, approval, rejection
//! │   ├── registration/ # Registration number allocation
//! │   ├── students/     # Student listing and lookup
//! │   ├── auth/         # Staff and parent login
//! │   ├── announcements/
//! │   ├── messages/
//! │   ├── reports/      # Secretary report, headmaster dashboard
//! │   └── parents/      # Parent dashboard
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Request logging and subscriber setup
//! ├── metrics.rs        # Prometheus metrics
//! ├── router.rs         # Route tree
//! └── state.rs          # Shared application state
//! ```
//!
//! Each feature module has a `controller.rs` (HTTP handlers), `service.rs`
//! (business logic), `model.rs` (types re-exported from `shule-models`) and
//! `router.rs`.
//!
//! ## Roles
//!
//! | Role | How | Can |
//! |------|-----|-----|
//! | Anonymous | no token | submit applications, complete payment |
//! | Parent | registration number + PIN | view their dashboard |
//! | Secretary | username + password | review, approve, reject, report, communicate |
//! | Headmaster | username + password | view dashboard, post announcements, send messages |
//!
//! ## Quick Start
//!
//! ```bash
//! DATABASE_URL=sqlite://shule.db
//! JWT_SECRET=change-me
//! PARENT_DEFAULT_PASSWORD=2525
//! cargo run --bin shule-cli -- seed-staff
//! cargo run
//! ```
//!
//! API documentation is served at `/scalar` and `/api-docs/openapi.json`.

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use shule_auth;
pub use shule_config;
pub use shule_core;
pub use shule_db;
pub use shule_models;
