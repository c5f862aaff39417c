use mindhaven_domain::shared::DomainError;

/// Maps storage and encoding errors onto the domain taxonomy.
pub trait ResultExt<T> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError>;
}

impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| map_sqlx_error(e, context))
    }
}

impl<T> ResultExt<T> for Result<T, serde_json::Error> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Serialization(format!("{}: {}", context, e)))
    }
}

fn map_sqlx_error(error: sqlx::Error, context: &str) -> DomainError {
    match error {
        sqlx::Error::RowNotFound => DomainError::NotFound(context.to_string()),
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            DomainError::Conflict(format!("{}: {}", context, error))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            DomainError::Serialization(format!("{}: {}", context, error))
        }
        other => DomainError::StoreUnavailable(format!("{}: {}", context, other)),
    }
}
