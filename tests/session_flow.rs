mod common;

use alumni_web::{
    app_lib::{AppError, Navigation, paths},
    features::{
        auth::{
            client as auth_client,
            guards::{self, GuardOutcome},
            types::{LoginRequest, UserRecord},
        },
        profile::{ProfilePicture, ProfileUpdate, client as profile_client},
    },
};
use anyhow::{Result, bail};
use common::{api_for, browser_like_storage, can_bind_localhost};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string_contains, header, method, path},
};

fn login_request() -> LoginRequest {
    LoginRequest {
        email: "ada@example.com".to_string(),
        password: SecretString::from("correct horse"),
    }
}

#[tokio::test]
async fn login_persists_session_and_opens_guarded_views() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/login/"))
        .and(body_json(json!({"email": "ada@example.com", "password": "correct horse"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "user": {"name": "Ada", "email": "ada@example.com", "role": "student"}
        })))
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    let (store, _) = browser_like_storage();
    assert!(matches!(
        guards::check(&store, paths::PROFILE),
        GuardOutcome::Denied(_)
    ));

    let session = auth_client::login(&api, &login_request()).await?;
    store.store(&session);

    assert_eq!(
        store.get_token().map(|token| token.expose_secret().to_string()),
        Some("tok-1".to_string())
    );
    assert_eq!(store.user().as_ref().and_then(UserRecord::name), Some("Ada"));
    assert_eq!(guards::check(&store, paths::PROFILE), GuardOutcome::Allowed);
    assert_eq!(
        guards::check(&store, paths::UPDATE_PROFILE),
        GuardOutcome::Allowed
    );
    Ok(())
}

#[tokio::test]
async fn login_without_token_is_reported() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {}})))
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    match auth_client::login(&api, &login_request()).await {
        Ok(_) => bail!("login without a token must fail"),
        Err(err) => assert_eq!(
            auth_client::login_error_message(&err),
            "Backend did not return token!"
        ),
    }
    Ok(())
}

#[tokio::test]
async fn rejected_credentials_surface_backend_text() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/login/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "non_field_errors": ["Invalid email or password."]
        })))
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    let (store, _) = browser_like_storage();
    match auth_client::login(&api, &login_request()).await {
        Ok(_) => bail!("login should have been rejected"),
        Err(err) => {
            assert!(!err.is_unauthorized());
            assert_eq!(
                auth_client::login_error_message(&err),
                "Invalid email or password."
            );
        }
    }
    assert!(!store.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn profile_forbidden_clears_session_and_redirects_to_login() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/accounts/me/"))
        .and(header("authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    let (store, _) = browser_like_storage();
    store.set_session(
        &SecretString::from("stale-token"),
        &UserRecord(json!({"name": "Ada"})),
    );

    let err = match profile_client::fetch_profile(&api, &store).await {
        Ok(_) => bail!("stale token must be rejected"),
        Err(err) => err,
    };
    assert_eq!(err, AppError::Unauthorized { status: 403 });
    assert!(store.get_token().is_none());
    assert!(store.user().is_none());

    assert_eq!(
        guards::session_expired(&store, &err),
        Some(Navigation::replace(paths::LOGIN))
    );
    assert!(!guards::check(&store, paths::PROFILE).is_allowed());
    Ok(())
}

#[tokio::test]
async fn profile_server_error_keeps_session() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/accounts/me/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    let (store, _) = browser_like_storage();
    store.set_session(&SecretString::from("tok-1"), &UserRecord::default());

    let err = match profile_client::fetch_profile(&api, &store).await {
        Ok(_) => bail!("server error must surface"),
        Err(err) => err,
    };
    assert_eq!(guards::session_expired(&store, &err), None);
    assert!(store.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn profile_is_fetched_with_bearer_token() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/accounts/me/"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "student_id": "2019-0042",
            "role": "student",
            "department": {"id": 3, "name": "Computer Science"},
            "batch": 2019,
            "is_verified": true,
            "is_active": true,
            "profile_picture": null
        })))
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    let (store, _) = browser_like_storage();
    store.set_session(&SecretString::from("tok-1"), &UserRecord::default());

    let profile = profile_client::fetch_profile(&api, &store).await?;
    assert_eq!(profile.display_name(), "Ada Lovelace");
    assert_eq!(profile.department_label(), "Computer Science");
    assert_eq!(profile.batch_label(), "2019");
    assert!(profile.is_verified);
    assert_eq!(profile.profile_picture, None);
    Ok(())
}

#[tokio::test]
async fn missing_token_skips_the_request() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/accounts/me/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    let (store, _) = browser_like_storage();
    let result = profile_client::fetch_profile(&api, &store).await;
    assert_eq!(result.err(), Some(AppError::Unauthorized { status: 401 }));
    Ok(())
}

#[tokio::test]
async fn profile_update_sends_multipart_form() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/accounts/me/"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_string_contains("name=\"batch\""))
        .and(body_string_contains("2019"))
        .and(body_string_contains("filename=\"me.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Ada"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    let (store, _) = browser_like_storage();
    store.set_session(&SecretString::from("tok-1"), &UserRecord::default());

    let update = ProfileUpdate {
        name: "Ada".to_string(),
        department: "CSE".to_string(),
        batch: "2019".to_string(),
        picture: Some(ProfilePicture {
            file_name: "me.png".to_string(),
            mime: "image/png".to_string(),
            bytes: b"not-really-a-png".to_vec(),
        }),
    };
    profile_client::update_profile(&api, &store, &update).await?;
    assert!(store.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn profile_update_unauthorized_clears_session() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/accounts/me/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    let (store, _) = browser_like_storage();
    store.set_session(&SecretString::from("tok-1"), &UserRecord::default());

    let update = ProfileUpdate {
        name: "Ada".to_string(),
        ..ProfileUpdate::default()
    };
    let result = profile_client::update_profile(&api, &store, &update).await;
    assert_eq!(result, Err(AppError::Unauthorized { status: 401 }));
    assert!(!store.is_authenticated());
    Ok(())
}

#[test]
fn logout_clears_session_and_returns_to_login() {
    let (store, _) = browser_like_storage();
    store.set_session(&SecretString::from("tok-1"), &UserRecord::default());

    assert_eq!(guards::logout(&store), Navigation::push(paths::LOGIN));
    assert!(!store.is_authenticated());
    assert!(!guards::check(&store, paths::PROFILE).is_allowed());
}
