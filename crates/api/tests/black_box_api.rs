use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use cowing_accounts::{InMemoryUserService, PortfolioEntry};
use cowing_api::ApiConfig;
use cowing_auth::JwtClaims;
use cowing_core::Username;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{Value, json};

const JWT_SECRET: &str = "test-secret";
const PASSWORD: &str = "s3cretpass";

struct TestServer {
    base_url: String,
    users: Arc<InMemoryUserService>,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let config = ApiConfig::for_tests(JWT_SECRET);
        let users = Arc::new(InMemoryUserService::default());
        let app = cowing_api::app::build_app(&config, users.clone());

        let listener = tokio::net::TcpListener::bind(config.bind_addr())
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            users,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn signup(&self, username: &str, email: &str) -> reqwest::Response {
        self.client
            .post(self.url("/signup"))
            .json(&json!({
                "email": email,
                "passwd": PASSWORD,
                "nickname": "코잉",
                "username": username,
            }))
            .send()
            .await
            .unwrap()
    }

    async fn get(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap()
    }

    async fn post(&self, path: &str, token: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(username: &str) -> String {
    let now = Utc::now();
    let claims = JwtClaims::new(username, now, now + ChronoDuration::minutes(10));

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

async fn registered(srv: &TestServer, username: &str) -> String {
    let res = srv.signup(username, &format!("{username}@example.com")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    mint_jwt(username)
}

async fn body(res: reqwest::Response) -> Value {
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = srv
        .client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn signup_returns_201_envelope() {
    let srv = TestServer::spawn().await;

    let res = srv.signup("trader_01", "t1@example.com").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body(res).await;
    assert_eq!(body["code"], 201);
    assert_eq!(body["message"], "회원가입에 성공하였습니다. 축하드립니다!");
}

#[tokio::test]
async fn duplicate_signup_fails_with_the_same_envelope_shape() {
    let srv = TestServer::spawn().await;
    srv.signup("trader_01", "t1@example.com").await;

    let res = srv.signup("trader_01", "other@example.com").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body(res).await;
    assert_eq!(body["code"], 400);
    assert_eq!(body["error"], "duplicate_account");
    assert!(body["message"].as_str().unwrap().starts_with("회원가입에 실패했습니다: "));
}

#[tokio::test]
async fn invalid_signup_input_is_rejected() {
    let srv = TestServer::spawn().await;
    let res = srv.signup("trader_01", "not-an-email").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(res).await["error"], "validation_error");
}

#[tokio::test]
async fn malformed_json_gets_the_failure_envelope() {
    let srv = TestServer::spawn().await;
    let res = srv
        .client
        .post(srv.url("/signup"))
        .json(&json!({ "email": "t1@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body(res).await;
    assert_eq!(body["code"], 400);
    assert_eq!(body["error"], "invalid_body");
}

#[tokio::test]
async fn protected_endpoints_require_a_token() {
    let srv = TestServer::spawn().await;

    let res = srv.client.get(srv.url("/portfolio")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = body(res).await;
    assert_eq!(body["code"], 401);
    assert_eq!(body["error"], "unauthorized");

    let res = srv.get("/asset", "garbage-token").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let srv = TestServer::spawn().await;
    registered(&srv, "trader_01").await;

    let issued = Utc::now() - ChronoDuration::minutes(20);
    let claims = JwtClaims::new("trader_01", issued, issued + ChronoDuration::minutes(10));
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let res = srv.get("/asset", &token).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_issues_a_usable_token() {
    let srv = TestServer::spawn().await;
    srv.signup("trader_01", "t1@example.com").await;

    let res = srv
        .client
        .post(srv.url("/login"))
        .json(&json!({ "username": "trader_01", "passwd": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body(res).await;
    assert_eq!(body["tokenType"], "Bearer");
    let token = body["token"].as_str().unwrap().to_string();

    let res = srv.get("/asset", &token).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let srv = TestServer::spawn().await;
    srv.signup("trader_01", "t1@example.com").await;

    let res = srv
        .client
        .post(srv.url("/login"))
        .json(&json!({ "username": "trader_01", "passwd": "wrongpass1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(res).await["error"], "invalid_credential");
}

#[tokio::test]
async fn password_change_success_and_failure() {
    let srv = TestServer::spawn().await;
    let token = registered(&srv, "trader_01").await;

    let res = srv
        .post("/change/passwd", &token, json!({ "currentPwd": "wrongpass1", "newPwd": "n3wpassword" }))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let failed = body(res).await;
    assert_eq!(failed["code"], 400);
    assert_eq!(failed["message"], "비밀번호 변경에 실패했습니다: invalid credentials");

    let res = srv
        .post("/change/passwd", &token, json!({ "currentPwd": PASSWORD, "newPwd": "n3wpassword" }))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let ok = body(res).await;
    assert_eq!(ok["code"], 201);
    assert_eq!(ok["message"], "비밀번호가 변경되었습니다!");
}

#[tokio::test]
async fn nickname_change_success_and_failure() {
    let srv = TestServer::spawn().await;
    let token = registered(&srv, "trader_01").await;

    let res = srv.post("/change/nickname", &token, json!({ "nickname": "x" })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let failed = body(res).await;
    assert!(failed["message"].as_str().unwrap().starts_with("닉네임 변경에 실패했습니다: invalid nickname"));

    let res = srv.post("/change/nickname", &token, json!({ "nickname": "새닉네임" })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let info = body(srv.get("/infos", &token).await).await;
    assert_eq!(info["nickname"], "새닉네임");
}

#[tokio::test]
async fn empty_portfolio_is_200_with_empty_data() {
    let srv = TestServer::spawn().await;
    let token = registered(&srv, "trader_01").await;

    let res = srv.get("/portfolio", &token).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body(res).await;
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "포트폴리오가 존재하지 않습니다.");
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn non_empty_portfolio_uses_the_success_message() {
    let srv = TestServer::spawn().await;
    let token = registered(&srv, "trader_01").await;
    let user = Username::parse("trader_01").unwrap();
    srv.users
        .record_holding(&user, PortfolioEntry::new("KRW-BTC", 0.5, 90_000_000))
        .unwrap();

    let body = body(srv.get("/portfolio", &token).await).await;
    assert_eq!(body["message"], "포트폴리오 조회 성공");
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["market"], "KRW-BTC");
    assert_eq!(data[0]["totalCost"], 45_000_000);
}

#[tokio::test]
async fn asset_is_numeric_even_when_zero() {
    let config = ApiConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some(JWT_SECRET.to_string()),
        "INITIAL_KRW_ASSET" => Some("0".to_string()),
        "BIND_ADDR" => Some("127.0.0.1:0".to_string()),
        _ => None,
    })
    .unwrap();
    let users = Arc::new(InMemoryUserService::new(config.initial_krw_asset()));
    let app = cowing_api::app::build_app(&config, users);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{base_url}/api/v1/signup"))
        .json(&json!({
            "email": "zero@example.com",
            "passwd": PASSWORD,
            "nickname": "zero",
            "username": "zero_user",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{base_url}/api/v1/asset"))
        .bearer_auth(mint_jwt("zero_user"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body(res).await;
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "원화 자산 조회 성공");
    assert_eq!(body["asset"], 0);

    handle.abort();
}

#[tokio::test]
async fn infos_returns_the_raw_object() {
    let srv = TestServer::spawn().await;
    let token = registered(&srv, "trader_01").await;

    let res = srv.get("/infos", &token).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body(res).await;
    assert_eq!(body["username"], "trader_01");
    assert_eq!(body["email"], "trader_01@example.com");
    assert_eq!(body["asset"], 100_000_000);
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn deletion_and_bankruptcy_always_return_200() {
    let srv = TestServer::spawn().await;
    let token = registered(&srv, "trader_01").await;
    let user = Username::parse("trader_01").unwrap();
    srv.users
        .record_holding(&user, PortfolioEntry::new("KRW-ETH", 3.0, 4_000_000))
        .unwrap();

    for _ in 0..2 {
        let res = srv.post("/bankrupt", &token, json!({})).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body(res).await["message"], "파산 신청이 완료되었습니다.");
    }
    assert_eq!(body(srv.get("/portfolio", &token).await).await["data"], json!([]));

    for _ in 0..2 {
        let res = srv.post("/deletion", &token, json!({})).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body(res).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["message"], "탈퇴 처리 되었습니다.");
    }
    assert!(srv.users.is_deleted(&user).unwrap());

    // Bankruptcy after deletion is still accepted.
    let res = srv.post("/bankrupt", &token, json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn token_for_unknown_account_is_404() {
    let srv = TestServer::spawn().await;
    let res = srv.get("/asset", &mint_jwt("ghost_user")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(res).await["error"], "account_not_found");
}

#[tokio::test]
async fn unknown_paths_are_404_not_401() {
    let srv = TestServer::spawn().await;
    let res = srv.client.get(srv.url("/nope")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served_without_a_token() {
    let srv = TestServer::spawn().await;
    let res = srv
        .client
        .get(format!("{}/api-docs/openapi.json", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let doc = body(res).await;
    let signup = &doc["paths"]["/api/v1/signup"]["post"];
    assert_eq!(signup["summary"], "회원가입");
    assert!(signup["responses"]["201"].is_object());
    assert!(signup["responses"]["400"].is_object());
    assert_eq!(doc["paths"]["/api/v1/portfolio"]["get"]["summary"], "포트폴리오 조회");
    assert!(doc["components"]["securitySchemes"]["bearer_jwt"].is_object());
}
