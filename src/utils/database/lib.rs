use crate::utils::error::ApiError;
use sqlx::{postgres::PgPoolOptions, PgPool};
use ulid::Ulid;

#[derive(Clone)]
pub struct DatabaseConnection {
    pub pool: PgPool,
}

pub async fn connect(database_url: &str) -> Result<DatabaseConnection, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(database_url)
        .await
        .map_err(|err| {
            tracing::error!("Error connecting to database: {}", err);
            err
        })?;

    tracing::info!("Database connected");

    Ok(DatabaseConnection { pool })
}

pub async fn migrate(db_conn: &DatabaseConnection) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(&db_conn.pool).await.map_err(|err| {
        tracing::error!("{}", err);
        err
    })
}

pub fn new_id() -> String {
    Ulid::new().to_string()
}

/// Identifiers are ULIDs; anything else can never match a stored document.
pub fn parse_id(raw: &str) -> Result<String, ApiError> {
    Ulid::from_string(raw)
        .map(|id| id.to_string())
        .map_err(|_| ApiError::MalformedId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_parse() {
        let id = new_id();
        assert_eq!(parse_id(&id).unwrap(), id);
    }

    #[test]
    fn malformed_id_is_rejected() {
        match parse_id("5d713995b721c3bb38c1f5d0") {
            Err(ApiError::MalformedId(id)) => assert_eq!(id, "5d713995b721c3bb38c1f5d0"),
            _ => panic!("expected a malformed id error"),
        }
    }

    #[test]
    fn lowercase_ids_are_canonicalized() {
        let id = new_id();
        assert_eq!(parse_id(&id.to_lowercase()).unwrap(), id);
    }
}
