use domain::postgres::PgUserRepository;
use domain::{ErrorCode, NewUser, Provider, Role, StoreError, UserStore};
use sqlx::PgPool;
use uuid::Uuid;

fn new_user(email: &str, username: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        username: username.to_string(),
        role: Role::User,
        provider: Provider::Local,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_user(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgUserRepository::new(pool);

    let user = repo.insert(new_user("test@example.com", "tester")).await?;

    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.username, "tester");
    assert_eq!(user.role, Role::User);
    assert_eq!(user.provider, Provider::Local);
    assert!(user.created_at <= user.updated_at);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_duplicate_email_is_conflict(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgUserRepository::new(pool);
    repo.insert(new_user("duplicate@example.com", "first")).await?;

    let result = repo.insert(new_user("duplicate@example.com", "second")).await;

    assert!(matches!(
        result,
        Err(StoreError::Conflict(ErrorCode::EmailConflict))
    ));
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_duplicate_username_is_conflict(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgUserRepository::new(pool);
    repo.insert(new_user("first@example.com", "taken")).await?;

    let result = repo.insert(new_user("second@example.com", "taken")).await;

    assert!(matches!(
        result,
        Err(StoreError::Conflict(ErrorCode::UsernameConflict))
    ));
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_id(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgUserRepository::new(pool);
    let created = repo.insert(new_user("find@example.com", "findme")).await?;

    let found = repo.find_by_id(created.id).await?;

    assert_eq!(found, Some(created));
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_id_not_found(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgUserRepository::new(pool);

    assert!(repo.find_by_id(Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_email_and_username(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgUserRepository::new(pool);
    let created = repo.insert(new_user("lookup@example.com", "lookup")).await?;

    let by_email = repo.find_by_email("lookup@example.com").await?;
    let by_username = repo.find_by_username("lookup").await?;

    assert_eq!(by_email.map(|u| u.id), Some(created.id));
    assert_eq!(by_username.map(|u| u.id), Some(created.id));
    assert!(repo.find_by_email("missing@example.com").await?.is_none());
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_is_newest_first(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgUserRepository::new(pool.clone());
    let older = repo.insert(new_user("older@example.com", "older")).await?;
    let newer = repo.insert(new_user("newer@example.com", "newer")).await?;
    sqlx::query("UPDATE users SET created_at = created_at - interval '1 hour' WHERE id = $1")
        .bind(older.id)
        .execute(&pool)
        .await?;

    let users = repo.list().await?;

    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_username(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgUserRepository::new(pool);
    let created = repo.insert(new_user("rename@example.com", "before")).await?;

    let updated = repo
        .update_username(created.id, "after")
        .await?
        .expect("user should exist");

    assert_eq!(updated.username, "after");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_username_onto_taken_is_conflict(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgUserRepository::new(pool);
    repo.insert(new_user("holder@example.com", "taken")).await?;
    let other = repo.insert(new_user("other@example.com", "other")).await?;

    let result = repo.update_username(other.id, "taken").await;

    assert!(matches!(
        result,
        Err(StoreError::Conflict(ErrorCode::UsernameConflict))
    ));
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_username_missing_user(pool: PgPool) -> Result<(), StoreError> {
    let repo = PgUserRepository::new(pool);

    assert!(repo.update_username(Uuid::new_v4(), "ghost").await?.is_none());
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_role_is_corrupt_row(pool: PgPool) -> Result<(), StoreError> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO users (id, email, username, role, provider, created_at, updated_at) \
         VALUES ($1, 'odd@example.com', 'odd', 'SUPERUSER', 'LOCAL', now(), now())",
    )
    .bind(id)
    .execute(&pool)
    .await?;
    let repo = PgUserRepository::new(pool);

    let result = repo.find_by_id(id).await;

    assert!(matches!(
        result,
        Err(StoreError::CorruptRow { table: "users", .. })
    ));
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_provider_is_corrupt_row(pool: PgPool) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO users (id, email, username, role, provider, created_at, updated_at) \
         VALUES ($1, 'odd@example.com', 'odd', 'USER', 'MYSPACE', now(), now())",
    )
    .bind(Uuid::new_v4())
    .execute(&pool)
    .await?;
    let repo = PgUserRepository::new(pool);

    let err = repo.list().await.unwrap_err();

    match err {
        StoreError::CorruptRow { table, reason } => {
            assert_eq!(table, "users");
            assert!(reason.contains("MYSPACE"));
        }
        other => panic!("expected a corrupt row, got {other:?}"),
    }
    Ok(())
}
