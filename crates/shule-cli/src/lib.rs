//! # Shule CLI
//!
//! Staff account creation and database seeding for development and demos.
//!
//! The server also calls [`seeder::ensure_default_staff`] at startup so a
//! fresh database gets its secretary and headmaster accounts.
//!
//! ```ignore
//! use shule_cli::seeder;
//!
//! seeder::ensure_default_staff(&pool).await?;
//! seeder::seed_demo_applications(&pool, 20).await?;
//! ```

pub mod seeder;
