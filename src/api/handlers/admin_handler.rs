//! Admin site description and the registered resources' JSON endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::admin::{AdminPaths, AdminSite, ADMIN_USERS_SLUG, PRODUCTS_SLUG};
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentAdmin;
use crate::api::AppState;
use crate::domain::{
    AdminUserResponse, CreateAdminUser, ProductInput, ProductResponse, UpdateAdminUser,
};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Admin home: the site layout and who is signed in
#[derive(Debug, Serialize)]
pub struct AdminHome {
    #[serde(flatten)]
    pub site: AdminSite,
    pub current_user: AdminUserResponse,
}

/// Routes behind the session gate.
pub fn admin_routes(paths: &AdminPaths) -> Router<AppState> {
    let products = paths.resource(PRODUCTS_SLUG);
    let admin_users = paths.resource(ADMIN_USERS_SLUG);

    Router::new()
        .route(&paths.admin, get(admin_home))
        .route(&products, get(list_products).post(create_product))
        .route(
            &format!("{}/:id", products),
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(&admin_users, get(list_admin_users).post(create_admin_user))
        .route(
            &format!("{}/:id", admin_users),
            get(get_admin_user)
                .put(update_admin_user)
                .delete(delete_admin_user),
        )
}

pub async fn admin_home(
    State(state): State<AppState>,
    Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>,
) -> Json<AdminHome> {
    Json(AdminHome {
        site: state.admin.as_ref().clone(),
        current_user: admin.into(),
    })
}

/// List products
#[utoipa::path(
    get,
    path = "/admin/products",
    tag = "Admin",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of products"),
        (status = 303, description = "No admin session, redirect to login")
    ),
    security(("admin_session" = []))
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<ProductResponse>>> {
    let page = state.services.products().list_products(params).await?;
    Ok(Json(page.map(ProductResponse::from)))
}

/// Get a product
#[utoipa::path(
    get,
    path = "/admin/products/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found")
    ),
    security(("admin_session" = []))
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services.products().get_product(id).await?;
    Ok(Json(product.into()))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/admin/products",
    tag = "Admin",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error")
    ),
    security(("admin_session" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> AppResult<Created<ProductResponse>> {
    let product = state.services.products().create_product(input).await?;
    Ok(Created(product.into()))
}

/// Replace a product's editable fields
#[utoipa::path(
    put,
    path = "/admin/products/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    ),
    security(("admin_session" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services.products().update_product(id, input).await?;
    Ok(Json(product.into()))
}

/// Soft delete a product
#[utoipa::path(
    delete,
    path = "/admin/products/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    ),
    security(("admin_session" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.services.products().delete_product(id).await?;
    Ok(NoContent)
}

/// List admin users
#[utoipa::path(
    get,
    path = "/admin/admin_users",
    tag = "Admin",
    params(PaginationParams),
    responses((status = 200, description = "One page of admin users")),
    security(("admin_session" = []))
)]
pub async fn list_admin_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<AdminUserResponse>>> {
    let page = state.services.admin_users().list_admins(params).await?;
    Ok(Json(page.map(AdminUserResponse::from)))
}

/// Get an admin user
#[utoipa::path(
    get,
    path = "/admin/admin_users/{id}",
    tag = "Admin",
    params(("id" = i32, Path, description = "Admin user ID")),
    responses(
        (status = 200, description = "Admin user found", body = AdminUserResponse),
        (status = 404, description = "Admin user not found")
    ),
    security(("admin_session" = []))
)]
pub async fn get_admin_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AdminUserResponse>> {
    let admin = state.services.admin_users().get_admin(id).await?;
    Ok(Json(admin.into()))
}

/// Create an admin user
#[utoipa::path(
    post,
    path = "/admin/admin_users",
    tag = "Admin",
    request_body = CreateAdminUser,
    responses(
        (status = 201, description = "Admin user created", body = AdminUserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already used")
    ),
    security(("admin_session" = []))
)]
pub async fn create_admin_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateAdminUser>,
) -> AppResult<Created<AdminUserResponse>> {
    let admin = state.services.admin_users().create_admin(input).await?;
    Ok(Created(admin.into()))
}

/// Edit an admin user; a blank password keeps the current one
#[utoipa::path(
    put,
    path = "/admin/admin_users/{id}",
    tag = "Admin",
    params(("id" = i32, Path, description = "Admin user ID")),
    request_body = UpdateAdminUser,
    responses(
        (status = 200, description = "Admin user updated", body = AdminUserResponse),
        (status = 404, description = "Admin user not found"),
        (status = 409, description = "Email already used")
    ),
    security(("admin_session" = []))
)]
pub async fn update_admin_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<UpdateAdminUser>,
) -> AppResult<Json<AdminUserResponse>> {
    let admin = state.services.admin_users().update_admin(id, input).await?;
    Ok(Json(admin.into()))
}

/// Soft delete an admin user
#[utoipa::path(
    delete,
    path = "/admin/admin_users/{id}",
    tag = "Admin",
    params(("id" = i32, Path, description = "Admin user ID")),
    responses(
        (status = 204, description = "Admin user deleted"),
        (status = 404, description = "Admin user not found")
    ),
    security(("admin_session" = []))
)]
pub async fn delete_admin_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.admin_users().delete_admin(id).await?;
    Ok(NoContent)
}
