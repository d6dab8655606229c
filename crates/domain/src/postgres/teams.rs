use async_trait::async_trait;
use sea_query::{Expr, Iden, OnConflict, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::corrupt;
use crate::StoreError;
use crate::team::{Team, TeamData, TeamMember, TeamRole, TeamStore};

/// Schema definition for the teams table
#[derive(Iden)]
enum Teams {
    Table,
    Id,
    Name,
    Description,
    LeaderId,
    CreatedAt,
    UpdatedAt,
}

/// Schema definition for the team_members table
#[derive(Iden)]
enum TeamMembers {
    Table,
    TeamId,
    UserId,
    Role,
    JoinedAt,
}

const TEAM_COLUMNS: [Teams; 6] = [
    Teams::Id,
    Teams::Name,
    Teams::Description,
    Teams::LeaderId,
    Teams::CreatedAt,
    Teams::UpdatedAt,
];

const MEMBER_COLUMNS: [TeamMembers; 4] = [
    TeamMembers::TeamId,
    TeamMembers::UserId,
    TeamMembers::Role,
    TeamMembers::JoinedAt,
];

#[derive(Debug, Clone, FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
    description: String,
    leader_id: Option<Uuid>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: row.id,
            name: row.name,
            description: row.description,
            leader_id: row.leader_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
struct TeamMemberRow {
    team_id: Uuid,
    user_id: Uuid,
    role: String,
    joined_at: OffsetDateTime,
}

impl TryFrom<TeamMemberRow> for TeamMember {
    type Error = StoreError;

    fn try_from(row: TeamMemberRow) -> Result<Self, Self::Error> {
        let role = TeamRole::parse(&row.role)
            .ok_or_else(|| corrupt("team_members", "role", &row.role))?;

        Ok(TeamMember {
            team_id: row.team_id,
            user_id: row.user_id,
            role,
            joined_at: row.joined_at,
        })
    }
}

/// Postgres-backed [`TeamStore`]
#[derive(Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
}

impl PgTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamStore for PgTeamRepository {
    async fn insert(&self, data: TeamData) -> Result<Team, StoreError> {
        let now = OffsetDateTime::now_utc();

        let (sql, values) = Query::insert()
            .into_table(Teams::Table)
            .columns(TEAM_COLUMNS)
            .values_panic([
                Uuid::new_v4().into(),
                data.name.into(),
                data.description.into(),
                data.leader_id.into(),
                now.into(),
                now.into(),
            ])
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, TeamRow, _>(&sql, values)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, StoreError> {
        let (sql, values) = Query::select()
            .columns(TEAM_COLUMNS)
            .from(Teams::Table)
            .and_where(Expr::col(Teams::Id).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, TeamRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Team>, StoreError> {
        let (sql, values) = Query::select()
            .columns(TEAM_COLUMNS)
            .from(Teams::Table)
            .order_by(Teams::CreatedAt, sea_query::Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, TeamRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, data: TeamData) -> Result<Option<Team>, StoreError> {
        let now = OffsetDateTime::now_utc();

        let (sql, values) = Query::update()
            .table(Teams::Table)
            .values([
                (Teams::Name, data.name.into()),
                (Teams::Description, data.description.into()),
                (Teams::LeaderId, data.leader_id.into()),
                (Teams::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(Teams::Id).eq(id))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, TeamRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn add_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<TeamMember, StoreError> {
        // Re-adding an existing member updates the role and keeps joined_at
        let (sql, values) = Query::insert()
            .into_table(TeamMembers::Table)
            .columns(MEMBER_COLUMNS)
            .values_panic([
                team_id.into(),
                user_id.into(),
                role.as_str().into(),
                OffsetDateTime::now_utc().into(),
            ])
            .on_conflict(
                OnConflict::columns([TeamMembers::TeamId, TeamMembers::UserId])
                    .update_column(TeamMembers::Role)
                    .to_owned(),
            )
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, TeamMemberRow, _>(&sql, values)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn find_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TeamMember>, StoreError> {
        let (sql, values) = Query::select()
            .columns(MEMBER_COLUMNS)
            .from(TeamMembers::Table)
            .and_where(Expr::col(TeamMembers::TeamId).eq(team_id))
            .and_where(Expr::col(TeamMembers::UserId).eq(user_id))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, TeamMemberRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TeamMember::try_from).transpose()
    }

    async fn members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, StoreError> {
        let (sql, values) = Query::select()
            .columns(MEMBER_COLUMNS)
            .from(TeamMembers::Table)
            .and_where(Expr::col(TeamMembers::TeamId).eq(team_id))
            .order_by(TeamMembers::JoinedAt, sea_query::Order::Asc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, TeamMemberRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TeamMember::try_from).collect()
    }
}
