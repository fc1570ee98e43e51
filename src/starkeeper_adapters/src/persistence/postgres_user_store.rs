use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, postgres::PgPoolOptions};
use starkeeper_core::{
    Email, NewAccount, Password, UserAccount, UserId, UserStore, UserStoreError, normalize_email,
};
use uuid::Uuid;

use super::duplicate_email;
use super::password_hash::compute_password_hash;
use super::password_policy::PasswordPolicy;

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
    policy: PasswordPolicy,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool, policy: PasswordPolicy) -> Self {
        PostgresUserStore { pool, policy }
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    async fn email_taken(&self, normalized_email: &str) -> Result<bool, UserStoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE normalized_email = $1)",
        )
        .bind(normalized_email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
    }
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &Secret<String>) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
}

impl UserRow {
    fn into_account(self) -> Result<UserAccount, UserStoreError> {
        let email = Email::try_from(Secret::from(self.email))
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        Ok(NewAccount::for_email(email).into_account(UserId::from(self.id)))
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email
                FROM users
                WHERE normalized_email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.map(UserRow::into_account).transpose()
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.map(UserRow::into_account).transpose()
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create(
        &self,
        account: NewAccount,
        password: Password,
    ) -> Result<UserId, UserStoreError> {
        let mut errors = self.policy.violations(password.as_ref().expose_secret());
        if self.email_taken(account.normalized_email()).await? {
            errors.push(duplicate_email(&account));
        }
        if !errors.is_empty() {
            return Err(UserStoreError::Rejected(errors));
        }

        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let id = UserId::new();
        let query = sqlx::query(
            r#"
                INSERT INTO users (id, email, normalized_email, user_name, password_hash)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*id.as_uuid())
        .bind(account.email().as_ref().expose_secret())
        .bind(account.normalized_email())
        .bind(account.user_name())
        .bind(password_hash.expose_secret());

        // A concurrent registration can still win between the check and the insert.
        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserStoreError::Rejected(vec![duplicate_email(&account)]);
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(id)
    }
}
