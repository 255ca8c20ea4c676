//! Restaurant Member Endpoints
//!
//! 가입 요청은 항상 RESTAURANT 유형으로 처리된다.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    db::{LoginInput, Member, MemberInput},
    error::ApiError,
    types::ApiResponse,
    AppState,
};

/// POST /admin/signup
pub async fn process_signup(
    State(state): State<AppState>,
    Json(input): Json<MemberInput>,
) -> Result<(StatusCode, Json<ApiResponse<Member>>), ApiError> {
    let member = state.restaurant.process_signup(input).await?;
    tracing::info!(member = %member.id, "restaurant signed up");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(member))))
}

/// POST /admin/login
pub async fn process_login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<ApiResponse<Member>>, ApiError> {
    let member = state.restaurant.process_login(input).await?;
    Ok(Json(ApiResponse::success(member)))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::routes::{create_router, test_support};

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let app = create_router(test_support::state());

        let res = app
            .clone()
            .oneshot(post_json(
                "/admin/signup",
                serde_json::json!({
                    "memberNick": "burak",
                    "memberPhone": "010-1234-5678",
                    "memberPassword": "secret99",
                    "memberType": "USER"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["memberType"], "RESTAURANT");
        assert!(body["data"].get("memberPassword").is_none());

        let res = app
            .clone()
            .oneshot(post_json(
                "/admin/login",
                serde_json::json!({ "memberNick": "burak", "memberPassword": "secret99" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(post_json(
                "/admin/login",
                serde_json::json!({ "memberNick": "burak", "memberPassword": "nope" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
