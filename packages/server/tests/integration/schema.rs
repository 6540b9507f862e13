use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, EntityTrait, Set, SqlErr};
use serde_json::json;
use uuid::Uuid;

use link_server::entity::{link, user};

use crate::common::{TestApp, routes};

fn new_user(email: &str, api_key: &str) -> user::ActiveModel {
    let now = Utc::now();
    user::ActiveModel {
        id: Set(Uuid::now_v7()),
        email: Set(email.to_string()),
        api_key: Set(api_key.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

fn new_link(owner: Uuid, url: &str) -> link::ActiveModel {
    let now = Utc::now();
    link::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(owner),
        url: Set(url.to_string()),
        title: Set(None),
        description: Set(None),
        text: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[tokio::test]
async fn migrations_roll_back_and_reapply() {
    let app = TestApp::spawn().await;

    assert!(Migrator::get_pending_migrations(&app.db).await.unwrap().is_empty());

    Migrator::down(&app.db, None).await.unwrap();
    assert_eq!(
        Migrator::get_pending_migrations(&app.db).await.unwrap().len(),
        Migrator::migrations().len()
    );

    Migrator::up(&app.db, None).await.unwrap();
    assert!(Migrator::get_pending_migrations(&app.db).await.unwrap().is_empty());

    let user = app.create_user("after@example.com").await;
    app.create_link(&user.api_key, json!({ "url": "https://example.com/ok", "text": "t" }))
        .await;
}

#[tokio::test]
async fn database_enforces_unique_email() {
    let app = TestApp::spawn().await;
    new_user("u@example.com", "key-1").insert(&app.db).await.unwrap();

    let err = new_user("u@example.com", "key-2")
        .insert(&app.db)
        .await
        .unwrap_err();

    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            assert!(detail.contains(user::EMAIL_UNIQUE_INDEX), "{detail}");
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[tokio::test]
async fn database_enforces_unique_api_key() {
    let app = TestApp::spawn().await;
    new_user("a@example.com", "same").insert(&app.db).await.unwrap();

    let err = new_user("b@example.com", "same")
        .insert(&app.db)
        .await
        .unwrap_err();

    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            assert!(!detail.contains(user::EMAIL_UNIQUE_INDEX), "{detail}");
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[tokio::test]
async fn database_enforces_unique_url_per_owner() {
    let app = TestApp::spawn().await;
    let owner = new_user("o@example.com", "k").insert(&app.db).await.unwrap();
    new_link(owner.id, "https://example.com/a")
        .insert(&app.db)
        .await
        .unwrap();

    let err = new_link(owner.id, "https://example.com/a")
        .insert(&app.db)
        .await
        .unwrap_err();

    assert!(matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))));
}

#[tokio::test]
async fn links_require_an_existing_owner() {
    let app = TestApp::spawn().await;

    let err = new_link(Uuid::now_v7(), "https://example.com/orphan")
        .insert(&app.db)
        .await
        .unwrap_err();

    assert!(matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))));
}

#[tokio::test]
async fn deleting_a_user_removes_their_links() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let bob = app.create_user("bob@example.com").await;
    for url in ["https://example.com/1", "https://example.com/2"] {
        app.create_link(&alice.api_key, json!({ "url": url })).await;
    }
    app.create_link(&bob.api_key, json!({ "url": "https://example.com/1" }))
        .await;

    let alice_id: Uuid = alice.id.parse().unwrap();
    user::Entity::delete_by_id(alice_id)
        .exec(&app.db)
        .await
        .unwrap();

    assert_eq!(app.count_rows("links").await, 1);
    let remaining = app.get_with_key(routes::LINKS, &bob.api_key).await;
    assert_eq!(remaining.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::spawn().await;

    let res = app.get_without_key(routes::HEALTH).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["app"], "Link API Test");
}

#[tokio::test]
async fn openapi_document_lists_endpoints() {
    let app = TestApp::spawn().await;

    let res = app.get_without_key(routes::OPENAPI).await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().expect("paths should be an object");
    for path in ["/health", "/api/users/me", "/api/links/{id}"] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    for collection in ["/api/users", "/api/links"] {
        assert!(
            paths.contains_key(collection) || paths.contains_key(&format!("{collection}/")),
            "missing {collection}"
        );
    }
    assert!(res.body["components"]["securitySchemes"]["api_key"].is_object());
}
