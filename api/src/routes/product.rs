//! Product Endpoints
//!
//! 고객용 상품 목록/상세와 레스토랑용 상품 관리.
//! 조회자 식별은 `x-member-id` 헤더로 받는다 (인증은 이 계층 밖).

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::{
    db::{Product, ProductInput, ProductUpdateInput},
    error::ApiError,
    services::ProductInquiry,
    types::MemberRef,
    AppState,
};

/// 조회자 id 헤더
pub const MEMBER_HEADER: &str = "x-member-id";

fn viewer(headers: &HeaderMap) -> Result<Option<MemberRef>, ApiError> {
    match headers.get(MEMBER_HEADER) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|id| Some(MemberRef::new(id)))
            .map_err(|_| ApiError::ValidationError(format!("Invalid {} header", MEMBER_HEADER))),
    }
}

// ============ Customer ============

/// GET /product/all?page=1&limit=8&order=createdAt&search=pizza&productCollection=DISH
pub async fn get_products(
    State(state): State<AppState>,
    Query(inquiry): Query<ProductInquiry>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.get_products(&inquiry).await?;
    Ok(Json(products))
}

/// GET /product/:id
///
/// 회원이 처음 조회하면 조회수 +1 된 문서를 반환
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Product>, ApiError> {
    let member = viewer(&headers)?;
    let product = state.products.get_product(member.as_ref(), &id).await?;
    Ok(Json(product))
}

// ============ Admin ============

/// GET /admin/product/all
pub async fn get_all_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.get_all_products().await?;
    Ok(Json(products))
}

/// POST /admin/product/create
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create_product(input).await?;
    tracing::info!(product = %product.id, name = %product.product_name, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// POST /admin/product/:id
pub async fn update_chosen_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProductUpdateInput>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.update_chosen_product(&id, input).await?;
    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::ServiceExt;

    use crate::routes::{create_router, test_support};
    use crate::types::RecordId;

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn create_request(name: &str, price: i64) -> Request<Body> {
        let body = serde_json::json!({
            "productCollection": "DISH",
            "productName": name,
            "productPrice": price,
            "productLeftCount": 3
        });
        Request::post("/admin/product/create")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_view_counts_once() {
        let app = create_router(test_support::state());

        let res = app.clone().oneshot(create_request("Pizza", 10)).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let created = body_json(res).await;
        let id = created["_id"].as_str().unwrap().to_string();
        assert_eq!(created["productViews"], 0);
        assert_eq!(created["productSize"], "NORMAL");

        let member = RecordId::new().to_string();
        for expected in [1, 1] {
            let req = Request::get(format!("/product/{id}"))
                .header(MEMBER_HEADER, &member)
                .body(Body::empty())
                .unwrap();
            let res = app.clone().oneshot(req).await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(body_json(res).await["productViews"], expected);
        }

        // 비회원 조회는 집계하지 않음
        let req = Request::get(format!("/product/{id}")).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(body_json(res).await["productViews"], 1);
    }

    #[tokio::test]
    async fn test_product_list_query() {
        let app = create_router(test_support::state());
        for (name, price) in [("A", 30), ("B", 10), ("C", 20)] {
            app.clone().oneshot(create_request(name, price)).await.unwrap();
        }

        let req = Request::get("/product/all?page=1&limit=2&order=productPrice&productCollection=DISH")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = body_json(res).await;
        let prices: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["productPrice"].as_i64().unwrap())
            .collect();
        assert_eq!(prices, vec![10, 20]);
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let app = create_router(test_support::state());

        let res = app
            .clone()
            .oneshot(Request::get("/product/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["code"], "VALIDATION_ERROR");

        let res = app
            .clone()
            .oneshot(Request::get("/admin/product/all").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        app.clone().oneshot(create_request("Pizza", 10)).await.unwrap();
        let res = app.oneshot(create_request("Pizza", 11)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["code"], "CREATE_FAILED");
    }

    #[tokio::test]
    async fn test_update_product_route() {
        let app = create_router(test_support::state());
        let res = app.clone().oneshot(create_request("Pizza", 10)).await.unwrap();
        let id = body_json(res).await["_id"].as_str().unwrap().to_string();

        let req = Request::post(format!("/admin/product/{id}"))
            .header("content-type", "application/json")
            .body(Body::from(r#"{"productStatus":"SOLD_OUT","productLeftCount":0}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = body_json(res).await;
        assert_eq!(body["productStatus"], "SOLD_OUT");
        assert_eq!(body["productLeftCount"], 0);
    }
}
