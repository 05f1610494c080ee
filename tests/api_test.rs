//! Integration tests for HTTP endpoints.
//!
//! The router runs over in-memory fakes, so neither a database nor the
//! public cocktail API is needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use barkeep::admin::AdminSite;
use barkeep::api::{create_router, AppState};
use barkeep::config::AdminConfig;
use barkeep::domain::{
    AdminUser, Article, Author, CreateAdminUser, FullDrink, Product, ProductInput, Tag,
    TaggedArticles, UpdateAdminUser,
};
use barkeep::errors::{AppError, AppResult};
use barkeep::infra::CocktailApi;
use barkeep::services::{
    AdminAuthService, AdminSession, AdminUserService, ArticleService, Bartender, ProductService,
    ServiceContainer, WebhookService,
};
use barkeep::types::{Paginated, PaginationParams};

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "correct horse";
const VALID_TOKEN: &str = "valid-session";

// =============================================================================
// Fakes
// =============================================================================

/// Cocktail API answering from a fixed menu
struct FakeCocktails;

#[async_trait]
impl CocktailApi for FakeCocktails {
    async fn random_drink(&self) -> AppResult<FullDrink> {
        Ok(FullDrink::named("11007", "Margarita"))
    }

    async fn search_by_name(&self, name: &str) -> AppResult<Vec<FullDrink>> {
        Ok(match name {
            "mojito" => vec![FullDrink::named("11000", "Mojito")],
            _ => Vec::new(),
        })
    }

    async fn lookup_by_id(&self, _id: &str) -> AppResult<Option<FullDrink>> {
        Ok(None)
    }
}

fn admin_user() -> AdminUser {
    let now = Utc::now();
    AdminUser {
        id: 1,
        email: ADMIN_EMAIL.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        password_hash: "hashed".to_string(),
        last_login: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

struct FakeAuth;

#[async_trait]
impl AdminAuthService for FakeAuth {
    async fn login(&self, email: &str, password: &str) -> AppResult<AdminSession> {
        if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            Ok(AdminSession {
                token: VALID_TOKEN.to_string(),
                expires_in: 3600,
                user: admin_user(),
            })
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    async fn current_user(&self, token: &str) -> AppResult<AdminUser> {
        if token == VALID_TOKEN {
            Ok(admin_user())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

struct FakeProducts;

#[async_trait]
impl ProductService for FakeProducts {
    async fn list_products(&self, params: PaginationParams) -> AppResult<Paginated<Product>> {
        let product = Product::new("Lamp".to_string(), 1200, vec!["home".to_string()]);
        Ok(Paginated::new(vec![product], params.page, params.limit(), 1))
    }

    async fn get_product(&self, _id: Uuid) -> AppResult<Product> {
        Err(AppError::NotFound)
    }

    async fn create_product(&self, input: ProductInput) -> AppResult<Product> {
        let tags = input.parsed_tags();
        Ok(Product::new(input.name, input.price, tags))
    }

    async fn update_product(&self, _id: Uuid, _input: ProductInput) -> AppResult<Product> {
        Err(AppError::NotFound)
    }

    async fn delete_product(&self, _id: Uuid) -> AppResult<()> {
        Ok(())
    }
}

struct FakeAdminUsers;

#[async_trait]
impl AdminUserService for FakeAdminUsers {
    async fn list_admins(&self, params: PaginationParams) -> AppResult<Paginated<AdminUser>> {
        Ok(Paginated::new(vec![admin_user()], params.page, params.limit(), 1))
    }

    async fn get_admin(&self, id: i32) -> AppResult<AdminUser> {
        if id == 1 {
            Ok(admin_user())
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn create_admin(&self, input: CreateAdminUser) -> AppResult<AdminUser> {
        Err(AppError::Conflict(input.email))
    }

    async fn update_admin(&self, _id: i32, _input: UpdateAdminUser) -> AppResult<AdminUser> {
        Err(AppError::NotFound)
    }

    async fn delete_admin(&self, _id: i32) -> AppResult<()> {
        Ok(())
    }
}

fn hello_world() -> Article {
    let now = Utc::now();
    Article {
        id: 1,
        title: "Hello World".to_string(),
        slug: "hello-world".to_string(),
        body: "This is an hello world article".to_string(),
        author: Some(Author {
            id: 1,
            name: "Ada".to_string(),
        }),
        tags: vec![
            Tag {
                id: 1,
                name: "dev".to_string(),
            },
            Tag {
                id: 2,
                name: "go".to_string(),
            },
        ],
        created_at: now,
        updated_at: now,
    }
}

struct FakeArticles;

#[async_trait]
impl ArticleService for FakeArticles {
    async fn get_article(&self, id: i32) -> AppResult<Article> {
        if id == 1 {
            Ok(hello_world())
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn get_tag(&self, name: &str) -> AppResult<TaggedArticles> {
        let article = hello_world();
        match article.tags.iter().find(|t| t.name == name).cloned() {
            Some(tag) => Ok(TaggedArticles {
                tag,
                articles: vec![article],
            }),
            None => Err(AppError::NotFound),
        }
    }
}

struct FakeServices {
    webhook: Arc<dyn WebhookService>,
}

impl FakeServices {
    fn new() -> Self {
        Self {
            webhook: Arc::new(Bartender::new(Arc::new(FakeCocktails))),
        }
    }
}

impl ServiceContainer for FakeServices {
    fn webhook(&self) -> Arc<dyn WebhookService> {
        self.webhook.clone()
    }

    fn admin_auth(&self) -> Arc<dyn AdminAuthService> {
        Arc::new(FakeAuth)
    }

    fn products(&self) -> Arc<dyn ProductService> {
        Arc::new(FakeProducts)
    }

    fn admin_users(&self) -> Arc<dyn AdminUserService> {
        Arc::new(FakeAdminUsers)
    }

    fn articles(&self) -> Arc<dyn ArticleService> {
        Arc::new(FakeArticles)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn app_with_prefix(prefix: &str) -> Router {
    let mut config = AdminConfig::default();
    config.prefix = prefix.to_string();
    config.site_name = "Barkeep Admin".to_string();

    create_router(AppState::new(
        Arc::new(FakeServices::new()),
        AdminSite::new(&config),
    ))
}

fn app() -> Router {
    app_with_prefix("")
}

async fn send(app: Router, request: Request<Body>) -> axum::response::Response {
    app.oneshot(request).await.unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_session(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, format!("admsession={}", token))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn webhook_call(action: &str, parameters: Value) -> String {
    json!({
        "responseId": "resp-1",
        "session": "projects/bar/agent/sessions/abc",
        "queryResult": {
            "queryText": "give me a drink",
            "action": action,
            "parameters": parameters
        }
    })
    .to_string()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_alive() {
    let response = send(app(), get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"alive": true}));
}

// =============================================================================
// Webhook
// =============================================================================

#[tokio::test]
async fn webhook_random_names_the_drink() {
    let response = send(app(), post_json("/webhook", &webhook_call("random", json!({})))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["fulfillmentMessages"][0]["text"]["text"][0],
        "I found that cocktail : Margarita"
    );
    assert_eq!(body["payload"]["drinks"][0]["strDrink"], "Margarita");
}

#[tokio::test]
async fn webhook_search_without_results() {
    let call = webhook_call("search", json!({"drink": "unknown"}));
    let response = send(app(), post_json("/webhook", &call)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["fulfillmentMessages"][0]["text"]["text"][0],
        "I couldn't find any cocktail named unknown"
    );
}

#[tokio::test]
async fn webhook_search_without_name_sets_followup_context() {
    let response = send(app(), post_json("/webhook", &webhook_call("search", json!({})))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["outputContexts"][0]["name"],
        "projects/bar/agent/sessions/abc/contexts/search-followup"
    );
}

#[tokio::test]
async fn webhook_unknown_action_is_not_found() {
    let response = send(app(), post_json("/webhook", &webhook_call("dance", json!({})))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn webhook_rejects_malformed_json() {
    let response = send(app(), post_json("/webhook", "{not json")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// =============================================================================
// Admin session
// =============================================================================

#[tokio::test]
async fn login_page_renders_form() {
    let response = send(app(), get("/login")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Barkeep Admin"));
    assert!(html.contains(r#"action="/login""#));
}

#[tokio::test]
async fn login_page_skips_to_admin_when_signed_in() {
    let response = send(app(), get_with_session("/login", VALID_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");
}

#[tokio::test]
async fn blank_login_goes_back_to_login() {
    let response = send(app(), post_form("/login", "email=&password=")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn wrong_password_goes_back_to_login() {
    let response = send(
        app(),
        post_form("/login", "email=admin%40example.com&password=nope"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn non_form_login_goes_back_to_login() {
    let response = send(
        app(),
        post_json("/login", r#"{"email":"admin@example.com","password":"correct horse"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn successful_login_sets_session_cookie() {
    let response = send(
        app(),
        post_form("/login", "email=admin%40example.com&password=correct+horse"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("admsession=valid-session"));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn logout_clears_cookie() {
    let response = send(app(), get_with_session("/logout", VALID_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("admsession="));
    assert!(cookie.contains("Max-Age=0"));
}

// =============================================================================
// Admin resources
// =============================================================================

#[tokio::test]
async fn admin_without_session_redirects_to_login() {
    let response = send(app(), get("/admin")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn admin_with_forged_session_redirects_to_login() {
    let response = send(app(), get_with_session("/admin/products", "forged")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn admin_home_describes_site() {
    let response = send(app(), get_with_session("/admin", VALID_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["site_name"], "Barkeep Admin");
    assert_eq!(body["current_user"]["display_name"], "Ada Lovelace");

    let names: Vec<&str> = body["resources"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Product", "AdminUser"]);
}

#[tokio::test]
async fn admin_lists_products_with_badges() {
    let response = send(app(), get_with_session("/admin/products", VALID_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Lamp");
    assert!(body["data"][0]["tag_badges"]
        .as_str()
        .unwrap()
        .contains(">home</span>"));
    assert_eq!(body["meta"]["total"], 1);
}

#[tokio::test]
async fn admin_users_never_expose_password() {
    let response = send(app(), get_with_session("/admin/admin_users/1", VALID_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], ADMIN_EMAIL);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn admin_routes_follow_prefix() {
    let app = app_with_prefix("/backoffice");

    let response = send(app.clone(), get("/backoffice/admin")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/backoffice/login");

    let response = send(app, get_with_session("/backoffice/admin", VALID_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Articles
// =============================================================================

#[tokio::test]
async fn article_includes_author_and_tags() {
    let response = send(app(), get("/api/articles/1")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["slug"], "hello-world");
    assert_eq!(body["author"]["name"], "Ada");
    assert_eq!(body["tags"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_article_is_not_found() {
    let response = send(app(), get("/api/articles/42")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tag_lists_its_articles() {
    let response = send(app(), get("/api/tags/go")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tag"]["name"], "go");
    assert_eq!(body["articles"][0]["title"], "Hello World");
}
