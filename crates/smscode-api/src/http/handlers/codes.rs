//! The codes page: recent verification code messages as HTML.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use smscode_core::render::{RenderContext, render_page};
use smscode_core::service::listing::ListingMode;

use crate::http::BASIC_CHALLENGE;
use crate::http::error::AppError;
use crate::http::extractors::admission::Admitted;
use crate::http::extractors::auth::Authenticated;
use crate::http::extractors::query::CodesQuery;
use crate::state::AppState;

/// ANY / - List recent code messages (or every message with `all=1`).
///
/// Extractor order is the pipeline order: `Admitted` may reject with 429 or
/// sleep, `Authenticated` may reject with 401.
pub async fn show_codes(
    _admitted: Admitted,
    user: Authenticated,
    State(state): State<AppState>,
    query: CodesQuery,
) -> Result<Response, AppError> {
    let mode = ListingMode::from_all_flag(query.all.as_deref());

    let messages = state.listing.collect(mode).await.map_err(|err| {
        tracing::error!(error = %err, "Failed to load messages");
        AppError::Storage(err)
    })?;

    tracing::debug!(
        user = %user.username,
        ?mode,
        count = messages.len(),
        "Serving messages"
    );

    let ctx = RenderContext {
        app_title: user
            .app_title
            .unwrap_or_else(|| state.app_title.to_string()),
        messages,
    };

    let html = render_page(&ctx).map_err(|err| {
        tracing::error!(error = %err, "Failed to render page");
        AppError::Render(err)
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::WWW_AUTHENTICATE, BASIC_CHALLENGE),
        ],
        html,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use reqwest::StatusCode;
    use smscode_core::admission::BucketConfig;
    use smscode_core::service::listing::ListingService;
    use smscode_infra::sqlite::fixture::{StoreFixture, sms_time};
    use smscode_infra::sqlite::store::SqliteMessageStore;
    use smscode_types::config::AppConfig;
    use tempfile::TempDir;

    use crate::http::router::build_router;
    use crate::state::AppState;

    const CONFIG: &str = r#"{
        "app_title": "Family Codes",
        "users": {
            "alice": { "password": "wonderland" },
            "bob": { "app_title": "Bob's Codes", "password": "builder" },
            "carol": { "password": "" }
        }
    }"#;

    fn roomy_bucket() -> BucketConfig {
        BucketConfig {
            capacity: 1_000,
            refill_interval: Duration::from_millis(1),
            max_wait: Duration::from_secs(3),
        }
    }

    async fn spawn_app(store_path: &Path, bucket: BucketConfig) -> String {
        let config: AppConfig = serde_json::from_str(CONFIG).unwrap();
        let listing = ListingService::new(SqliteMessageStore::open(store_path));
        let state = AppState::with_bucket(&config, listing, bucket);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn seeded_store(dir: &TempDir) -> StoreFixture {
        let fixture = StoreFixture::create(&dir.path().join("chat.db")).await.unwrap();
        fixture
            .insert_sms("+79001234567", "Привет! Как дела?", sms_time(2024, 5, 17, 7, 0))
            .await
            .unwrap();
        fixture
            .insert_sms("Bank", "Код 4821. Never <share> it", sms_time(2024, 5, 17, 6, 42))
            .await
            .unwrap();
        fixture
            .insert_sms("Shop", "Kod: 5521", sms_time(2024, 5, 16, 21, 3))
            .await
            .unwrap();
        fixture
    }

    #[tokio::test]
    async fn test_missing_credentials_is_401_with_challenge() {
        let dir = TempDir::new().unwrap();
        let fixture = seeded_store(&dir).await;
        let base = spawn_app(fixture.path(), roomy_bucket()).await;

        let response = reqwest::get(format!("{base}/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()["www-authenticate"],
            r#"Basic realm="Login Required", charset="utf-8""#
        );
        let body = response.text().await.unwrap();
        assert!(!body.contains("4821"));
        assert!(!body.contains("Bank"));
    }

    #[tokio::test]
    async fn test_wrong_password_is_401() {
        let dir = TempDir::new().unwrap();
        let fixture = seeded_store(&dir).await;
        let base = spawn_app(fixture.path(), roomy_bucket()).await;
        let client = reqwest::Client::new();

        for (user, password) in [("alice", "wonderlanD"), ("alice", "wonder"), ("mallory", "x"), ("carol", "")] {
            let response = client
                .get(format!("{base}/"))
                .basic_auth(user, Some(password))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{user}:{password}");
            assert!(!response.text().await.unwrap().contains("4821"));
        }
    }

    #[tokio::test]
    async fn test_authenticated_request_lists_codes() {
        let dir = TempDir::new().unwrap();
        let fixture = seeded_store(&dir).await;
        let base = spawn_app(fixture.path(), roomy_bucket()).await;

        let response = reqwest::Client::new()
            .get(format!("{base}/"))
            .basic_auth("alice", Some("wonderland"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/html; charset=utf-8");
        assert!(response.headers().contains_key("www-authenticate"));

        let body = response.text().await.unwrap();
        assert!(body.contains("<title>Family Codes</title>"));
        assert!(body.contains("[2024-05-17 06:42] <b>Bank:</b> Код 4821. Never &lt;share&gt; it"));
        assert!(body.contains("[2024-05-16 21:03] <b>Shop:</b> Kod: 5521"));
        assert!(!body.contains("Как дела"));
        assert!(body.find("Bank").unwrap() < body.find("Shop").unwrap());
    }

    #[tokio::test]
    async fn test_user_title_override() {
        let dir = TempDir::new().unwrap();
        let fixture = seeded_store(&dir).await;
        let base = spawn_app(fixture.path(), roomy_bucket()).await;

        let body = reqwest::Client::new()
            .get(format!("{base}/"))
            .basic_auth("bob", Some("builder"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("<title>Bob&#39;s Codes</title>"));
    }

    #[tokio::test]
    async fn test_all_flag_lists_every_message() {
        let dir = TempDir::new().unwrap();
        let fixture = seeded_store(&dir).await;
        let base = spawn_app(fixture.path(), roomy_bucket()).await;

        let body = reqwest::Client::new()
            .get(format!("{base}/?all=1"))
            .basic_auth("alice", Some("wonderland"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        let first = body.find("Как дела").unwrap();
        let second = body.find("Bank").unwrap();
        let third = body.find("Shop").unwrap();
        assert!(first < second && second < third);
    }

    #[tokio::test]
    async fn test_repeated_all_flag_uses_first_value() {
        let dir = TempDir::new().unwrap();
        let fixture = seeded_store(&dir).await;
        let base = spawn_app(fixture.path(), roomy_bucket()).await;
        let client = reqwest::Client::new();

        let response = client
            .get(format!("{base}/?all=1&all=1"))
            .basic_auth("alice", Some("wonderland"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("www-authenticate"));
        assert!(response.text().await.unwrap().contains("Как дела"));

        let body = client
            .get(format!("{base}/?all=0&all=1"))
            .basic_auth("alice", Some("wonderland"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(!body.contains("Как дела"));
        assert!(body.contains("Bank"));
    }

    #[tokio::test]
    async fn test_filtered_listing_caps_at_ten() {
        let dir = TempDir::new().unwrap();
        let fixture = StoreFixture::create(&dir.path().join("chat.db")).await.unwrap();
        for minute in 0..15 {
            fixture
                .insert_sms("900", &format!("Код {minute}"), sms_time(2024, 1, 1, 12, minute))
                .await
                .unwrap();
        }
        let base = spawn_app(fixture.path(), roomy_bucket()).await;

        let body = reqwest::Client::new()
            .get(format!("{base}/"))
            .basic_auth("alice", Some("wonderland"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert_eq!(body.matches("<p>").count(), 10);
        // Newest first: minutes 14 down to 5.
        assert!(body.contains("Код 14<"));
        assert!(body.contains("Код 5<"));
        assert!(!body.contains("Код 4<"));
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let dir = TempDir::new().unwrap();
        let base = spawn_app(&dir.path().join("missing.db"), roomy_bucket()).await;

        let response = reqwest::Client::new()
            .get(format!("{base}/"))
            .basic_auth("alice", Some("wonderland"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key("www-authenticate"));
        let body = response.text().await.unwrap();
        assert!(body.starts_with("cannot open message store"), "{body}");
    }

    #[tokio::test]
    async fn test_burst_beyond_bucket_is_429() {
        let dir = TempDir::new().unwrap();
        let fixture = seeded_store(&dir).await;
        // Refill is slow enough that the sixth request's wait exceeds the cap.
        let bucket = BucketConfig {
            capacity: 5,
            refill_interval: Duration::from_secs(10),
            max_wait: Duration::from_secs(3),
        };
        let base = spawn_app(fixture.path(), bucket).await;
        let client = reqwest::Client::new();

        for _ in 0..5 {
            let response = client
                .get(format!("{base}/"))
                .basic_auth("alice", Some("wonderland"))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = client
            .get(format!("{base}/"))
            .basic_auth("alice", Some("wonderland"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.text().await.unwrap(), "Too Many Requests");

        // Admission runs before authentication.
        let response = client.get(format!("{base}/")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_any_path_and_method_is_served() {
        let dir = TempDir::new().unwrap();
        let fixture = seeded_store(&dir).await;
        let base = spawn_app(fixture.path(), roomy_bucket()).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/codes"))
            .basic_auth("alice", Some("wonderland"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
