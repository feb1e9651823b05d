
use photoshare_backend::auth::jwt::JwtService;
use reqwest::StatusCode;
use serde_json::Value;
use test_utils::*;

#[actix_rt::test]
async fn register_returns_201_and_creates_an_empty_profile() {
    let app = TestApp::spawn().await;

    let response = app.register_user("newcomer").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    let user_id = body["id"].as_str().unwrap();

    // the profile row is created synchronously with the user
    let profiles: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM profiles WHERE user_id = (SELECT id FROM users WHERE username = ?)",
    )
    .bind("newcomer")
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(profiles, 1);
    assert!(!user_id.is_empty());
}

#[actix_rt::test]
async fn register_rejects_duplicate_email_with_conflict() {
    let app = TestApp::spawn().await;

    assert_eq!(app.register_user("twin").await.status(), StatusCode::CREATED);

    let response = app.client
        .post(format!("{}/auth/register", app.address))
        .json(&serde_json::json!({
            "username": "twin_two",
            "email": "twin@example.com",
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn register_rejects_duplicate_username_with_conflict() {
    let app = TestApp::spawn().await;

    assert_eq!(app.register_user("original").await.status(), StatusCode::CREATED);

    let response = app.client
        .post(format!("{}/auth/register", app.address))
        .json(&serde_json::json!({
            "username": "original",
            "email": "different@example.com",
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn register_rejects_weak_passwords() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(format!("{}/auth/register", app.address))
        .json(&serde_json::json!({
            "username": "weakling",
            "email": "weakling@example.com",
            "password": "password",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn login_returns_bearer_tokens() {
    let app = TestApp::spawn().await;
    app.register_user("entrant").await;

    let response = app.client
        .post(format!("{}/auth/login", app.address))
        .json(&serde_json::json!({
            "email": "entrant@example.com",
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let auth: Value = response.json().await.unwrap();
    assert!(!auth["access_token"].as_str().unwrap().is_empty());
    assert!(!auth["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(auth["token_type"], "Bearer");
}

#[actix_rt::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;
    app.register_user("cautious").await;

    let response = app.client
        .post(format!("{}/auth/login", app.address))
        .json(&serde_json::json!({
            "email": "cautious@example.com",
            "password": "Wr0ng&Password!9",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn refresh_token_rotates_the_pair() {
    let app = TestApp::spawn().await;
    app.register_user("rotator").await;

    let login: Value = app.client
        .post(format!("{}/auth/login", app.address))
        .json(&serde_json::json!({
            "email": "rotator@example.com",
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = app.client
        .post(format!("{}/auth/refresh-token", app.address))
        .json(&serde_json::json!({ "refresh_token": login["refresh_token"] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let refreshed: Value = response.json().await.unwrap();
    assert!(!refreshed["access_token"].as_str().unwrap().is_empty());
}

#[actix_rt::test]
async fn profile_me_requires_authentication() {
    let app = TestApp::spawn().await;

    let response = app.client
        .get(format!("{}/profile/me", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn profile_update_changes_names_and_bio() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("editable").await;

    let response = app.client
        .patch(format!("{}/profile/me", app.address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "first_name": "Edie",
            "last_name": "Table",
            "bio": "pictures of tables, mostly",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = response.json().await.unwrap();
    assert_eq!(profile["first_name"], "Edie");
    assert_eq!(profile["display_name"], "Edie Table");
    assert_eq!(profile["bio"], "pictures of tables, mostly");

    // partial update leaves other fields alone
    let response = app.client
        .patch(format!("{}/profile/me", app.address))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "bio": "tables and chairs now" }))
        .send()
        .await
        .unwrap();

    let profile: Value = response.json().await.unwrap();
    assert_eq!(profile["first_name"], "Edie");
    assert_eq!(profile["bio"], "tables and chairs now");
}

#[actix_rt::test]
async fn password_reset_answers_identically_for_unknown_emails() {
    let app = TestApp::spawn().await;
    app.register_user("resettable").await;

    let known = app.client
        .post(format!("{}/auth/password-reset", app.address))
        .json(&serde_json::json!({ "email": "resettable@example.com" }))
        .send()
        .await
        .unwrap();
    let unknown = app.client
        .post(format!("{}/auth/password-reset", app.address))
        .json(&serde_json::json!({ "email": "nobody-here@example.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(known.status(), StatusCode::OK);
    assert_eq!(unknown.status(), StatusCode::OK);

    let known_body: Value = known.json().await.unwrap();
    let unknown_body: Value = unknown.json().await.unwrap();
    assert_eq!(known_body, unknown_body);
}

#[actix_rt::test]
async fn password_reset_confirm_sets_a_new_password() {
    let app = TestApp::spawn().await;
    let (user_id, _) = app.register_and_login("forgetful").await;

    // the delivery seam would normally mail this token
    let token = JwtService::new(&app.config).create_reset_jwt(&user_id).unwrap();

    let response = app.client
        .post(format!("{}/auth/password-reset/confirm", app.address))
        .json(&serde_json::json!({
            "token": token,
            "new_password": "Gl4cier&Moth!x91",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let old_login = app.client
        .post(format!("{}/auth/login", app.address))
        .json(&serde_json::json!({
            "email": "forgetful@example.com",
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(old_login.status(), StatusCode::UNAUTHORIZED);

    let new_login = app.client
        .post(format!("{}/auth/login", app.address))
        .json(&serde_json::json!({
            "email": "forgetful@example.com",
            "password": "Gl4cier&Moth!x91",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(new_login.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn access_tokens_cannot_be_used_as_reset_tokens() {
    let app = TestApp::spawn().await;
    let (_, access_token) = app.register_and_login("sneaky_reset").await;

    let response = app.client
        .post(format!("{}/auth/password-reset/confirm", app.address))
        .json(&serde_json::json!({
            "token": access_token,
            "new_password": "Gl4cier&Moth!x91",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
