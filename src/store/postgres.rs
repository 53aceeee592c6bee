//! Connection-pool plumbing for the `PostgreSQL` adapters.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool shared by the repository adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;
