use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test::{self, TestRequest};
use actix_web::App;
use app_api::handlers;
use app_api::middleware::AuthMiddleware;
use biz_service::BizContext;
use serde_json::{Value, json};

macro_rules! init_app {
    () => {{
        let ctx = BizContext::in_memory("test-key", 600);
        test::init_service(App::new().wrap(AuthMiddleware::new(ctx.auth.clone())).configure(|cfg| handlers::configure(cfg, &ctx))).await
    }};
}

/// 发送请求，返回 (状态码, JSON body)
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

/// 注册并返回 (token, id)
macro_rules! register {
    ($app:expr, $name:expr) => {{
        let (status, body) = call!($app, json_req("/auth/register", None, json!({"username": $name, "password": "secret"})));
        assert_eq!(status, StatusCode::OK, "{}", body);
        (body["token"].as_str().unwrap().to_string(), body["id"].as_str().unwrap().to_string())
    }};
}

fn with_token(req: TestRequest, token: Option<&str>) -> TestRequest {
    match token {
        Some(token) => req.insert_header((AUTHORIZATION, format!("Bearer {}", token))),
        None => req,
    }
}

fn json_req(path: &str, token: Option<&str>, body: Value) -> TestRequest {
    with_token(TestRequest::post().uri(path).set_json(body), token)
}

fn form_req(path: &str, token: Option<&str>, body: &[(&str, &str)]) -> TestRequest {
    with_token(TestRequest::post().uri(path).set_form(body), token)
}

fn empty_req(path: &str, token: Option<&str>) -> TestRequest {
    with_token(TestRequest::post().uri(path), token)
}

#[actix_web::test]
async fn test_status_and_openapi_are_public() {
    let app = init_app!();
    let (status, body) = call!(app, TestRequest::get().uri("/status"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = call!(app, TestRequest::get().uri("/openapi.json"));
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/friend/request/send"].is_object());
    assert!(body["paths"]["/auth/login"].is_object());

    // 每个接口的 tag 都已在文档中声明
    let declared: Vec<&str> = body["tags"].as_array().unwrap().iter().filter_map(|t| t["name"].as_str()).collect();
    for (_, item) in body["paths"].as_object().unwrap() {
        for (_, op) in item.as_object().unwrap() {
            for tag in op["tags"].as_array().into_iter().flatten() {
                let tag = tag.as_str().unwrap();
                assert!(declared.contains(&tag), "undeclared tag {}", tag);
            }
        }
    }
}

#[actix_web::test]
async fn test_friend_routes_require_token() {
    let app = init_app!();
    let (status, body) = call!(app, empty_req("/friend/list", None));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = call!(app, empty_req("/friend/list", Some("bogus")));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_non_post_is_method_not_allowed() {
    let app = init_app!();
    let (token, _) = register!(app, "alice");

    let (status, body) = call!(app, with_token(TestRequest::get().uri("/friend/list"), Some(token.as_str())));
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body["error"].is_string());

    let (status, _) = call!(app, TestRequest::get().uri("/auth/login"));
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn test_register_login_logout() {
    let app = init_app!();
    let (status, body) = call!(app, form_req("/auth/register", None, &[("username", "alice"), ("password", "secret")]));
    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].is_string());
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = call!(app, form_req("/auth/register", None, &[("username", "alice"), ("password", "other")]));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call!(app, json_req("/auth/login", None, json!({"username": "alice", "password": "wrong"})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = call!(app, json_req("/auth/login", None, json!({"username": "alice", "password": "secret"})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = call!(app, empty_req("/friend/list", Some(token.as_str())));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"friends": []}));

    let (status, body) = call!(app, empty_req("/auth/logout", Some(token.as_str())));
    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].is_string());
    let (status, _) = call!(app, empty_req("/friend/list", Some(token.as_str())));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 未携带 token 的注销也成功
    let (status, _) = call!(app, empty_req("/auth/logout", None));
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_send_accept_and_list() {
    let app = init_app!();
    let (alice, alice_id) = register!(app, "alice");
    let (bob, bob_id) = register!(app, "bob");

    let (status, body) = call!(app, form_req("/friend/request/send", Some(alice.as_str()), &[("to_user_id", bob_id.as_str())]));
    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].is_string());

    let (status, body) = call!(app, empty_req("/friend/request/list", Some(bob.as_str())));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["incoming_requests"], json!([{"id": alice_id, "username": "alice", "status": "pending"}]));
    assert_eq!(body["outgoing_requests"], json!([]));

    let (status, body) = call!(app, json_req("/friend/status", Some(alice.as_str()), json!({"friend_id": bob_id})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"friend": bob_id, "status": "pending"}));

    let (status, _) = call!(app, json_req("/friend/request/accept", Some(bob.as_str()), json!({"friend_id": alice_id})));
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call!(app, empty_req("/friend/list", Some(alice.as_str())));
    assert_eq!(body, json!({"friends": [{"id": bob_id, "username": "bob"}]}));
    let (_, body) = call!(app, empty_req("/friend/list", Some(bob.as_str())));
    assert_eq!(body, json!({"friends": [{"id": alice_id, "username": "alice"}]}));

    let (_, body) = call!(app, json_req("/friend/status", Some(bob.as_str()), json!({"friend_id": alice_id})));
    assert_eq!(body, json!({"friend": alice_id, "status": "accepted"}));
}

#[actix_web::test]
async fn test_mutual_request_auto_accepts() {
    let app = init_app!();
    let (alice, alice_id) = register!(app, "alice");
    let (bob, bob_id) = register!(app, "bob");

    let (status, _) = call!(app, json_req("/friend/request/send", Some(bob.as_str()), json!({"to_user_id": alice_id})));
    assert_eq!(status, StatusCode::OK);
    let (status, body) = call!(app, json_req("/friend/request/send", Some(alice.as_str()), json!({"to_user_id": bob_id})));
    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].is_string());

    let (_, body) = call!(app, json_req("/friend/status", Some(alice.as_str()), json!({"friend_id": bob_id})));
    assert_eq!(body["status"], "accepted");
    let (_, body) = call!(app, json_req("/friend/status", Some(bob.as_str()), json!({"friend_id": alice_id})));
    assert_eq!(body["status"], "accepted");

    // 双向记录只算一个好友
    let (_, body) = call!(app, empty_req("/friend/list", Some(alice.as_str())));
    assert_eq!(body["friends"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_domain_errors_have_distinct_codes() {
    let app = init_app!();
    let (alice, alice_id) = register!(app, "alice");
    let (_, bob_id) = register!(app, "bob");
    let (_, carol_id) = register!(app, "carol");

    let (status, body) = call!(app, json_req("/friend/request/send", Some(alice.as_str()), json!({"to_user_id": alice_id})));
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (status, _) = call!(app, json_req("/friend/request/send", Some(alice.as_str()), json!({"to_user_id": "missing"})));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call!(app, json_req("/friend/request/send", Some(alice.as_str()), json!({"to_user_id": bob_id})));
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call!(app, json_req("/friend/request/send", Some(alice.as_str()), json!({"to_user_id": bob_id})));
    assert_eq!(status, StatusCode::CONFLICT);

    // alice 自己发出的申请不能由 alice 接受
    let (status, _) = call!(app, json_req("/friend/request/accept", Some(alice.as_str()), json!({"friend_id": bob_id})));
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    let (status, _) = call!(app, json_req("/friend/request/reject", Some(alice.as_str()), json!({"friend_id": carol_id})));
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);

    let (status, _) = call!(app, json_req("/friend/status", Some(alice.as_str()), json!({"friend_id": carol_id})));
    assert_eq!(status, StatusCode::GONE);
    let (status, _) = call!(app, json_req("/friend/remove", Some(alice.as_str()), json!({"friend_id": carol_id})));
    assert_eq!(status, StatusCode::GONE);
}

#[actix_web::test]
async fn test_reject_is_terminal_until_removed() {
    let app = init_app!();
    let (alice, alice_id) = register!(app, "alice");
    let (bob, bob_id) = register!(app, "bob");

    call!(app, json_req("/friend/request/send", Some(alice.as_str()), json!({"to_user_id": bob_id})));
    let (status, _) = call!(app, form_req("/friend/request/reject", Some(bob.as_str()), &[("friend_id", alice_id.as_str())]));
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call!(app, empty_req("/friend/request/list", Some(alice.as_str())));
    assert_eq!(body["outgoing_requests"], json!([{"id": bob_id, "username": "bob", "status": "rejected"}]));

    let (status, _) = call!(app, json_req("/friend/request/send", Some(alice.as_str()), json!({"to_user_id": bob_id})));
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call!(app, form_req("/friend/remove", Some(bob.as_str()), &[("friend_id", alice_id.as_str())]));
    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].is_string());
    let (status, _) = call!(app, json_req("/friend/status", Some(alice.as_str()), json!({"friend_id": bob_id})));
    assert_eq!(status, StatusCode::GONE);

    let (status, _) = call!(app, json_req("/friend/request/send", Some(alice.as_str()), json!({"to_user_id": bob_id})));
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let app = init_app!();
    let (alice, _) = register!(app, "alice");

    let (status, body) = call!(app, json_req("/friend/request/send", Some(alice.as_str()), json!({"friend_id": "x"})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = call!(app, empty_req("/friend/status", Some(alice.as_str())));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call!(app, json_req("/auth/register", None, json!({"username": "", "password": "pw"})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_form_error_names_form_problem() {
    let app = init_app!();
    let (alice, _) = register!(app, "alice");

    let (status, body) = call!(app, form_req("/friend/request/send", Some(alice.as_str()), &[("friend_id", "x")]));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let msg = body["error"].as_str().unwrap();
    assert!(!msg.contains("Content type"), "{}", msg);

    let (status, body) = call!(app, json_req("/friend/request/send", Some(alice.as_str()), json!({"friend_id": "x"})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let msg = body["error"].as_str().unwrap();
    assert!(!msg.contains("Content type"), "{}", msg);
}
