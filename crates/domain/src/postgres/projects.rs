use async_trait::async_trait;
use sea_query::{Expr, Iden, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::StoreError;
use crate::project::{Project, ProjectData, ProjectStore};

/// Schema definition for the projects table
#[derive(Iden)]
enum Projects {
    Table,
    Id,
    TeamId,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

const COLUMNS: [Projects; 6] = [
    Projects::Id,
    Projects::TeamId,
    Projects::Name,
    Projects::Description,
    Projects::CreatedAt,
    Projects::UpdatedAt,
];

#[derive(Debug, Clone, FromRow)]
struct ProjectRow {
    id: Uuid,
    team_id: Uuid,
    name: String,
    description: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            team_id: row.team_id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres-backed [`ProjectStore`]
#[derive(Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectRepository {
    async fn insert(&self, data: ProjectData) -> Result<Project, StoreError> {
        let now = OffsetDateTime::now_utc();

        let (sql, values) = Query::insert()
            .into_table(Projects::Table)
            .columns(COLUMNS)
            .values_panic([
                Uuid::new_v4().into(),
                data.team_id.into(),
                data.name.into(),
                data.description.into(),
                now.into(),
                now.into(),
            ])
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, ProjectRow, _>(&sql, values)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let (sql, values) = Query::select()
            .columns(COLUMNS)
            .from(Projects::Table)
            .and_where(Expr::col(Projects::Id).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, ProjectRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_team(&self, team_id: Uuid) -> Result<Vec<Project>, StoreError> {
        let (sql, values) = Query::select()
            .columns(COLUMNS)
            .from(Projects::Table)
            .and_where(Expr::col(Projects::TeamId).eq(team_id))
            .order_by(Projects::CreatedAt, sea_query::Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, ProjectRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
