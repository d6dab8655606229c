use async_trait::async_trait;
use sea_query::{Expr, Iden, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{corrupt, unique_violation};
use crate::StoreError;
use crate::invitation::{Invitation, InvitationData, InvitationStatus, InvitationStore};

/// Schema definition for the invitations table
#[derive(Iden)]
enum Invitations {
    Table,
    Id,
    TeamId,
    Email,
    InvitedBy,
    Status,
    CreatedAt,
    UpdatedAt,
}

const COLUMNS: [Invitations; 7] = [
    Invitations::Id,
    Invitations::TeamId,
    Invitations::Email,
    Invitations::InvitedBy,
    Invitations::Status,
    Invitations::CreatedAt,
    Invitations::UpdatedAt,
];

#[derive(Debug, Clone, FromRow)]
struct InvitationRow {
    id: Uuid,
    team_id: Uuid,
    email: String,
    invited_by: Uuid,
    status: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<InvitationRow> for Invitation {
    type Error = StoreError;

    fn try_from(row: InvitationRow) -> Result<Self, Self::Error> {
        let status = InvitationStatus::parse(&row.status)
            .ok_or_else(|| corrupt("invitations", "status", &row.status))?;

        Ok(Invitation {
            id: row.id,
            team_id: row.team_id,
            email: row.email,
            invited_by: row.invited_by,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Postgres-backed [`InvitationStore`]
#[derive(Clone)]
pub struct PgInvitationRepository {
    pool: PgPool,
}

impl PgInvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationStore for PgInvitationRepository {
    async fn insert(&self, data: InvitationData) -> Result<Invitation, StoreError> {
        let now = OffsetDateTime::now_utc();

        let (sql, values) = Query::insert()
            .into_table(Invitations::Table)
            .columns(COLUMNS)
            .values_panic([
                Uuid::new_v4().into(),
                data.team_id.into(),
                data.email.into(),
                data.invited_by.into(),
                InvitationStatus::Pending.as_str().into(),
                now.into(),
                now.into(),
            ])
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, InvitationRow, _>(&sql, values)
            .fetch_one(&self.pool)
            .await
            .map_err(unique_violation)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invitation>, StoreError> {
        let (sql, values) = Query::select()
            .columns(COLUMNS)
            .from(Invitations::Table)
            .and_where(Expr::col(Invitations::Id).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, InvitationRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Invitation::try_from).transpose()
    }

    async fn find_pending(
        &self,
        team_id: Uuid,
        email: &str,
    ) -> Result<Option<Invitation>, StoreError> {
        let (sql, values) = Query::select()
            .columns(COLUMNS)
            .from(Invitations::Table)
            .and_where(Expr::col(Invitations::TeamId).eq(team_id))
            .and_where(Expr::col(Invitations::Email).eq(email))
            .and_where(Expr::col(Invitations::Status).eq(InvitationStatus::Pending.as_str()))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, InvitationRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Invitation::try_from).transpose()
    }

    async fn list_for_team(&self, team_id: Uuid) -> Result<Vec<Invitation>, StoreError> {
        let (sql, values) = Query::select()
            .columns(COLUMNS)
            .from(Invitations::Table)
            .and_where(Expr::col(Invitations::TeamId).eq(team_id))
            .order_by(Invitations::CreatedAt, sea_query::Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, InvitationRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Invitation::try_from).collect()
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: InvitationStatus,
    ) -> Result<Option<Invitation>, StoreError> {
        let now = OffsetDateTime::now_utc();

        let (sql, values) = Query::update()
            .table(Invitations::Table)
            .values([
                (Invitations::Status, status.as_str().into()),
                (Invitations::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(Invitations::Id).eq(id))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, InvitationRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Invitation::try_from).transpose()
    }
}
