use sqlx::PgPool;

/// Executes SQL query objects against the connection pool.
///
/// Each query is a plain struct with a `kanau::processor::Processor`
/// impl on this type.
#[derive(Clone)]
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
