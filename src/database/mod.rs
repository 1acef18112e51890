//! Postgres connection pool, schema migrations and catalog seeding.

pub mod pool;
pub mod seed;

pub use pool::{create_pool, run_migrations, Database, DatabaseError, MIGRATOR};
pub use seed::{sample_menu, seed_catalog};
