
use reqwest::StatusCode;
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn like_toggle_flips_between_liked_and_unliked() {
    let app = TestApp::spawn().await;
    let (_, owner_token) = app.register_and_login("frida").await;
    let (_, viewer_token) = app.register_and_login("diego").await;
    let photo_id = app.upload_photo(&owner_token, "studio wall").await;

    assert_eq!(app.toggle(&viewer_token, photo_id, "like-toggle").await, "liked");
    assert_eq!(app.count_rows("likes", photo_id).await, 1);

    assert_eq!(app.toggle(&viewer_token, photo_id, "like-toggle").await, "unliked");
    assert_eq!(app.count_rows("likes", photo_id).await, 0);
}

#[actix_rt::test]
async fn save_toggle_flips_between_saved_and_unsaved() {
    let app = TestApp::spawn().await;
    let (_, owner_token) = app.register_and_login("marta").await;
    let photo_id = app.upload_photo(&owner_token, "rooftops").await;

    assert_eq!(app.toggle(&owner_token, photo_id, "save-toggle").await, "saved");
    assert_eq!(app.toggle(&owner_token, photo_id, "save-toggle").await, "unsaved");
    assert_eq!(app.count_rows("bookmarks", photo_id).await, 0);
}

#[actix_rt::test]
async fn like_and_bookmark_lifecycles_are_independent() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("janek").await;
    let photo_id = app.upload_photo(&token, "fog bank").await;

    app.toggle(&token, photo_id, "like-toggle").await;
    app.toggle(&token, photo_id, "save-toggle").await;
    app.toggle(&token, photo_id, "like-toggle").await;

    assert_eq!(app.count_rows("likes", photo_id).await, 0);
    assert_eq!(app.count_rows("bookmarks", photo_id).await, 1);
}

#[actix_rt::test]
async fn toggling_a_missing_photo_is_not_found() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("sven").await;

    let response = app.client
        .post(format!("{}/photos/{}/like-toggle", app.address, Uuid::new_v4()))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn toggling_requires_authentication() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("lotte").await;
    let photo_id = app.upload_photo(&token, "harbor").await;

    let response = app.client
        .post(format!("{}/photos/{}/like-toggle", app.address, photo_id))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Any interleaving of concurrent toggles must leave at most one row, and
/// the net of reported transitions must match whether the row exists.
#[actix_rt::test]
async fn concurrent_like_toggles_never_duplicate_rows() {
    let app = TestApp::spawn().await;
    let (_, owner_token) = app.register_and_login("nadia").await;
    let (_, viewer_token) = app.register_and_login("ravi").await;
    let photo_id = app.upload_photo(&owner_token, "switchbacks").await;

    let mut handles = Vec::new();
    for _ in 0..6 {
        let client = app.client.clone();
        let address = app.address.clone();
        let token = viewer_token.clone();
        handles.push(tokio::spawn(async move {
            let response = client
                .post(format!("{}/photos/{}/like-toggle", address, photo_id))
                .bearer_auth(&token)
                .send()
                .await
                .unwrap();
            assert!(response.status().is_success());
            let body: serde_json::Value = response.json().await.unwrap();
            body["status"].as_str().unwrap().to_string()
        }));
    }

    let mut liked = 0i64;
    let mut unliked = 0i64;
    for handle in handles {
        match handle.await.unwrap().as_str() {
            "liked" => liked += 1,
            "unliked" => unliked += 1,
            other => panic!("Unexpected toggle status: {}", other),
        }
    }

    let rows = app.count_rows("likes", photo_id).await;
    assert!(rows == 0 || rows == 1, "Duplicate like rows survived: {}", rows);
    assert_eq!(
        liked - unliked,
        rows,
        "Reported transitions ({} liked / {} unliked) disagree with final row count {}",
        liked,
        unliked,
        rows
    );
}

#[actix_rt::test]
async fn spec_scenario_like_unlike_then_delete() {
    let app = TestApp::spawn().await;
    let (_, a_token) = app.register_and_login("user_a").await;
    let (_, b_token) = app.register_and_login("user_b").await;

    let photo_id = app.upload_photo(&a_token, "the one that gets deleted").await;

    assert_eq!(app.toggle(&b_token, photo_id, "like-toggle").await, "liked");
    assert_eq!(app.get_photo_json(photo_id).await["like_count"], 1);

    assert_eq!(app.toggle(&b_token, photo_id, "like-toggle").await, "unliked");
    assert_eq!(app.get_photo_json(photo_id).await["like_count"], 0);

    let response = app.client
        .delete(format!("{}/photos/{}/edit", app.address, photo_id))
        .bearer_auth(&a_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(app.get_photo(photo_id).await.status(), StatusCode::NOT_FOUND);
}
