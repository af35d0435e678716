use std::path::Path;

use axum::Router;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::state::AppState;
use crate::{auth, bias};

pub fn build_app(state: AppState) -> Router {
    let config = state.config.clone();

    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.session.secure_cookie)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            config.session.ttl_seconds,
        )));

    let static_dir = Path::new(&config.static_dir);

    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(bias::router(config.max_upload_bytes)),
        )
        .route_service("/analytics", ServeFile::new(static_dir.join("analytics.html")))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(sessions)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, addr: &str) -> anyhow::Result<()> {
    let addr: std::net::SocketAddr = addr.parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::repo::InMemoryUserRepo;
    use crate::bias::random::fake::ScriptedRandom;
    use crate::config::AppConfig;

    const BOUNDARY: &str = "biasmeterboundary";

    fn app() -> Router {
        build_app(AppState::fake(ScriptedRandom::new(&[0.5, 0.25, 0.75, 0.5], &[400])))
    }

    async fn body_json(res: Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn session_cookie(res: &Response) -> String {
        let raw = res
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie set")
            .to_str()
            .unwrap();
        raw.split(';').next().unwrap().to_string()
    }

    fn multipart(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: text/csv\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::post("/api/bias/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn health_returns_up() {
        let res = app()
            .oneshot(Request::get("/api/bias/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["status"], "UP");
        assert_eq!(body["service"], "BiasMeter AI API");
        assert!(body["timestamp"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn format_endpoint_falls_back() {
        let res = app()
            .oneshot(
                Request::get("/api/bias/format/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["industry"], "nonexistent");
        assert_eq!(body["format"], "Gender,Feature1,Feature2,Selected");
        assert_eq!(body["description"], "Analyzes bias in decision-making systems");
    }

    #[tokio::test]
    async fn analyze_merges_report_and_upload_info() {
        let csv = "Gender,Experience,Position,Selected\nM,3,Eng,1";
        let res = app()
            .oneshot(multipart(&[
                ("industry", None, "hiring"),
                ("file", Some("data.csv"), csv),
            ]))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["fileName"], "data.csv");
        assert_eq!(body["fileSize"], csv.len() as u64);
        assert_eq!(body["industry"], "hiring");
        assert_eq!(body["biasScore"], 37.5);
        assert_eq!(body["status"], "Moderate Bias");
        assert_eq!(body["maleRate"], 40.0);
        assert_eq!(body["femaleRate"], 60.0);
        assert_eq!(body["otherRate"], 12.5);
        assert_eq!(body["metrics"]["riskLevel"], "Medium");
        assert_eq!(body["metrics"]["sampleSize"], 500);
        assert_eq!(body["metrics"]["confidence"], 76.3);
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 5);
        assert!(body["analysisTime"].as_i64().is_some());
    }

    #[tokio::test]
    async fn analyze_without_file_is_bad_request() {
        let res = app()
            .oneshot(multipart(&[("industry", None, "finance")]))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["error"], true);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to analyze file:"));
        assert_eq!(body["suggestion"], "Please check if the file is a valid CSV format");
    }

    #[tokio::test]
    async fn analyze_with_non_multipart_body_is_json_error() {
        let res = app()
            .oneshot(post_json("/api/bias/analyze", json!({})))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["error"], true);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to analyze file:"));
        assert_eq!(body["suggestion"], "Please check if the file is a valid CSV format");
    }

    #[tokio::test]
    async fn analyze_over_upload_limit_is_json_error() {
        let config = AppConfig {
            max_upload_bytes: 64,
            ..AppConfig::default()
        };
        let state = AppState::from_parts(
            Arc::new(config),
            Arc::new(InMemoryUserRepo::seeded()),
            Arc::new(ScriptedRandom::new(&[0.5], &[0])),
        );
        let big = "x".repeat(1000);
        let res = build_app(state)
            .oneshot(multipart(&[
                ("industry", None, "hiring"),
                ("file", Some("big.csv"), big.as_str()),
            ]))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["error"], true);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to analyze file:"));
        assert_eq!(body["suggestion"], "Please check if the file is a valid CSV format");
    }

    #[tokio::test]
    async fn register_validates_and_rejects_duplicates() {
        let app = app();

        let res = app
            .clone()
            .oneshot(post_json(
                "/api/auth/register",
                json!({"email": "no-at-sign", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["message"], "Valid email is required");

        let res = app
            .clone()
            .oneshot(post_json(
                "/api/auth/register",
                json!({"email": "new@corp.io", "password": "123"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await["message"],
            "Password must be at least 6 characters"
        );

        let res = app
            .clone()
            .oneshot(post_json(
                "/api/auth/register",
                json!({"email": "new@corp.io", "password": "secret1", "name": "Nia"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["name"], "Nia");
        assert_eq!(body["user"]["company"], "Personal");
        assert_eq!(body["user"]["role"], "user");

        let res = app
            .oneshot(post_json(
                "/api/auth/register",
                json!({"email": "new@corp.io", "password": "secret2"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "User with this email already exists");
    }

    #[tokio::test]
    async fn register_with_malformed_body_is_json_error() {
        let res = app()
            .oneshot(
                Request::post("/api/auth/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["success"], false);
    }

    #[tokio::test]
    async fn login_failures_do_not_reveal_which_part_was_wrong() {
        let app = app();
        let wrong_pw = app
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                json!({"email": "demo@biasmeter.ai", "password": "nope"}),
            ))
            .await
            .unwrap();
        let unknown = app
            .oneshot(post_json(
                "/api/auth/login",
                json!({"email": "ghost@biasmeter.ai", "password": "demo123"}),
            ))
            .await
            .unwrap();
        assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(wrong_pw).await, body_json(unknown).await);
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let app = app();

        let res = app
            .clone()
            .oneshot(Request::get("/api/auth/check").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(res).await;
        assert_eq!(body["authenticated"], false);
        assert!(body["user"].is_null());

        let res = app
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                json!({"email": "admin@biasmeter.ai", "password": "admin123"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);
        let body = body_json(res).await;
        assert_eq!(body["redirect"], "/");
        assert_eq!(body["user"]["role"], "admin");

        let res = app
            .clone()
            .oneshot(
                Request::get("/api/auth/check")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(res).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["user"]["email"], "admin@biasmeter.ai");

        let res = app
            .clone()
            .oneshot(
                Request::post("/api/auth/logout")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["message"], "Logged out successfully");

        let res = app
            .oneshot(
                Request::get("/api/auth/check")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(res).await["authenticated"], false);
    }

    #[tokio::test]
    async fn users_endpoint_lists_seeded_accounts() {
        let res = app()
            .oneshot(Request::get("/api/auth/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(res).await;
        assert_eq!(body["totalUsers"], 2);
        assert_eq!(
            body["userEmails"],
            json!(["admin@biasmeter.ai", "demo@biasmeter.ai"])
        );
    }

    #[tokio::test]
    async fn analytics_page_is_served() {
        let res = app()
            .oneshot(Request::get("/analytics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let res = app()
            .oneshot(
                Request::get("/api/bias/health")
                    .header(header::ORIGIN, "https://judge.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(res
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
