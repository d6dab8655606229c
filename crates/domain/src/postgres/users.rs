use async_trait::async_trait;
use sea_query::{Expr, Iden, PostgresQueryBuilder, Query, SelectStatement};
use sea_query_binder::SqlxBinder;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{corrupt, unique_violation};
use crate::auth::{Provider, Role};
use crate::user::{NewUser, User, UserStore};
use crate::StoreError;

/// Schema definition for the users table
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    Username,
    Role,
    Provider,
    CreatedAt,
    UpdatedAt,
}

const COLUMNS: [Users; 7] = [
    Users::Id,
    Users::Email,
    Users::Username,
    Users::Role,
    Users::Provider,
    Users::CreatedAt,
    Users::UpdatedAt,
];

/// Raw user row from database
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    username: String,
    role: String,
    provider: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role).ok_or_else(|| corrupt("users", "role", &row.role))?;
        let provider = Provider::parse(&row.provider)
            .ok_or_else(|| corrupt("users", "provider", &row.provider))?;

        Ok(User {
            id: row.id,
            email: row.email,
            username: row.username,
            role,
            provider,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Postgres-backed [`UserStore`]
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select() -> SelectStatement {
        Query::select().columns(COLUMNS).from(Users::Table).to_owned()
    }

    async fn fetch_optional(&self, query: SelectStatement) -> Result<Option<User>, StoreError> {
        let (sql, values) = query.build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let now = OffsetDateTime::now_utc();

        let (sql, values) = Query::insert()
            .into_table(Users::Table)
            .columns(COLUMNS)
            .values_panic([
                Uuid::new_v4().into(),
                user.email.into(),
                user.username.into(),
                user.role.as_str().into(),
                user.provider.as_str().into(),
                now.into(),
                now.into(),
            ])
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_one(&self.pool)
            .await
            .map_err(unique_violation)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.fetch_optional(
            Self::select()
                .and_where(Expr::col(Users::Id).eq(id))
                .to_owned(),
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.fetch_optional(
            Self::select()
                .and_where(Expr::col(Users::Email).eq(email))
                .to_owned(),
        )
        .await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.fetch_optional(
            Self::select()
                .and_where(Expr::col(Users::Username).eq(username))
                .to_owned(),
        )
        .await
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let (sql, values) = Self::select()
            .order_by(Users::CreatedAt, sea_query::Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_username(
        &self,
        id: Uuid,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        let now = OffsetDateTime::now_utc();

        let (sql, values) = Query::update()
            .table(Users::Table)
            .values([
                (Users::Username, username.into()),
                (Users::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(Users::Id).eq(id))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await
            .map_err(unique_violation)?;

        row.map(User::try_from).transpose()
    }
}
