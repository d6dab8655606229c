use domain::postgres::{PgTeamRepository, PgUserRepository};
use domain::{NewUser, Provider, Role, StoreError, TeamData, TeamRole, TeamStore, User, UserStore};
use sqlx::PgPool;
use uuid::Uuid;

async fn create_user(pool: &PgPool, name: &str) -> Result<User, StoreError> {
    PgUserRepository::new(pool.clone())
        .insert(NewUser {
            email: format!("{name}@example.com"),
            username: name.to_string(),
            role: Role::User,
            provider: Provider::Local,
        })
        .await
}

fn team_data(name: &str, leader_id: Option<Uuid>) -> TeamData {
    TeamData {
        name: name.to_string(),
        description: format!("{name} team"),
        leader_id,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_and_find_team(pool: PgPool) -> Result<(), StoreError> {
    let leader = create_user(&pool, "lead").await?;
    let repo = PgTeamRepository::new(pool);

    let team = repo.insert(team_data("core", Some(leader.id))).await?;

    assert_eq!(team.name, "core");
    assert_eq!(team.leader_id, Some(leader.id));
    assert_eq!(repo.find_by_id(team.id).await?, Some(team));
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_team_without_leader(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgTeamRepository::new(pool);

    let team = repo.insert(team_data("orphan", None)).await?;

    assert_eq!(team.leader_id, None);
    assert!(repo.find_by_id(Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_is_newest_first(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgTeamRepository::new(pool.clone());
    let older = repo.insert(team_data("older", None)).await?;
    let newer = repo.insert(team_data("newer", None)).await?;
    sqlx::query("UPDATE teams SET created_at = created_at - interval '1 hour' WHERE id = $1")
        .bind(older.id)
        .execute(&pool)
        .await?;

    let ids: Vec<Uuid> = repo.list().await?.iter().map(|t| t.id).collect();

    assert_eq!(ids, vec![newer.id, older.id]);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_team(pool: PgPool) -> Result<(), StoreError> {
    let leader = create_user(&pool, "lead").await?;
    let repo = PgTeamRepository::new(pool);
    let team = repo.insert(team_data("before", None)).await?;

    let updated = repo
        .update(team.id, team_data("after", Some(leader.id)))
        .await?
        .expect("team should exist");

    assert_eq!(updated.name, "after");
    assert_eq!(updated.leader_id, Some(leader.id));
    assert_eq!(updated.created_at, team.created_at);
    assert!(repo.update(Uuid::new_v4(), team_data("ghost", None)).await?.is_none());
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_re_adding_member_updates_role_and_keeps_joined_at(
    pool: PgPool,
) -> Result<(), StoreError> {
    let member = create_user(&pool, "member").await?;
    let repo = PgTeamRepository::new(pool);
    let team = repo.insert(team_data("core", None)).await?;

    let first = repo.add_member(team.id, member.id, TeamRole::Member).await?;
    let second = repo.add_member(team.id, member.id, TeamRole::Admin).await?;

    assert_eq!(first.role, TeamRole::Member);
    assert_eq!(second.role, TeamRole::Admin);
    assert_eq!(second.joined_at, first.joined_at);
    let members = repo.members(team.id).await?;
    assert_eq!(members, vec![second]);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_members_are_oldest_first(pool: PgPool) -> Result<(), StoreError> {
    let early = create_user(&pool, "early").await?;
    let late = create_user(&pool, "late").await?;
    let repo = PgTeamRepository::new(pool.clone());
    let team = repo.insert(team_data("core", None)).await?;
    repo.add_member(team.id, late.id, TeamRole::Member).await?;
    repo.add_member(team.id, early.id, TeamRole::Owner).await?;
    sqlx::query(
        "UPDATE team_members SET joined_at = joined_at - interval '1 hour' WHERE user_id = $1",
    )
    .bind(early.id)
    .execute(&pool)
    .await?;

    let ids: Vec<Uuid> = repo.members(team.id).await?.iter().map(|m| m.user_id).collect();

    assert_eq!(ids, vec![early.id, late.id]);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_member(pool: PgPool) -> Result<(), StoreError> {
    let member = create_user(&pool, "member").await?;
    let outsider = create_user(&pool, "outsider").await?;
    let repo = PgTeamRepository::new(pool);
    let team = repo.insert(team_data("core", None)).await?;
    let added = repo.add_member(team.id, member.id, TeamRole::Member).await?;

    assert_eq!(repo.find_member(team.id, member.id).await?, Some(added));
    assert!(repo.find_member(team.id, outsider.id).await?.is_none());
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_member_role_is_corrupt_row(pool: PgPool) -> Result<(), StoreError> {
    let member = create_user(&pool, "member").await?;
    let repo = PgTeamRepository::new(pool.clone());
    let team = repo.insert(team_data("core", None)).await?;
    sqlx::query(
        "INSERT INTO team_members (team_id, user_id, role, joined_at) \
         VALUES ($1, $2, 'JANITOR', now())",
    )
    .bind(team.id)
    .bind(member.id)
    .execute(&pool)
    .await?;

    let result = repo.find_member(team.id, member.id).await;

    assert!(matches!(
        result,
        Err(StoreError::CorruptRow { table: "team_members", .. })
    ));
    Ok(())
}
