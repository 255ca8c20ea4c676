//! Product Catalog Service
//!
//! # Interview Q&A
//!
//! Q: 상품 조회수는 어떻게 중복 없이 집계하는가?
//! A: 회원 조회일 때만 View Ledger에 첫 조회를 기록하고,
//!    기록에 성공한 경우에만 조회수를 +1 한다.
//!
//!    ```text
//!    getProduct(member, id)
//!      ├─ find product ──────────── 없으면 404
//!      └─ member 있음?
//!           └─ record_first_view ── 삽입됨 → increment → 증가된 문서 반환
//!                                  이미 있음 → 처음 읽은 문서 반환
//!    ```
//!
//!    재조회 시 반환값은 처음 읽은 스냅샷이므로 최신 조회수가 아닐 수 있다.
//!
//! Q: 왜 가격 정렬만 오름차순인가?
//! A: "싼 것부터" 보여주는 것이 가격 정렬의 기대 동작.
//!    나머지 필드(최신순, 조회수순 등)는 내림차순.

use std::sync::Arc;

use serde::Deserialize;

use crate::{
    db::{
        Product, ProductCollection, ProductFilter, ProductInput, ProductRepository,
        ProductSortField, ProductStatus, ProductUpdateInput, SortDirection, ViewGroup, ViewInput,
    },
    error::ApiError,
    services::ViewService,
    types::{MemberRef, RecordId},
};

/// 상품 목록 조회 조건
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInquiry {
    /// 페이지 (1부터 시작)
    pub page: u32,
    /// 페이지 크기
    pub limit: u32,
    /// 정렬 필드 (camelCase, 예: "productPrice", "createdAt")
    pub order: String,
    /// 상품명 검색어 (대소문자 무시, 부분 일치)
    pub search: Option<String>,
    pub product_collection: Option<ProductCollection>,
}

/// 상품 서비스
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    views: ViewService,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, views: ViewService) -> Self {
        Self { products, views }
    }

    /// 단일 상품 조회 (회원 조회 시 조회수 중복 제거 후 증가)
    pub async fn get_product(
        &self,
        member: Option<&MemberRef>,
        id: &str,
    ) -> Result<Product, ApiError> {
        let product_id = RecordId::parse(id)?;

        let product = self
            .products
            .find_product(product_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product".to_string()))?;

        let Some(member) = member else {
            return Ok(product);
        };

        let input = ViewInput {
            member_id: RecordId::parse(&member.id)?,
            view_ref_id: product_id,
            view_group: ViewGroup::Product,
        };

        if !self.views.record_first_view(&input).await? {
            tracing::debug!(product = %product_id, member = %input.member_id, "repeat view, count unchanged");
            return Ok(product);
        }

        tracing::debug!(product = %product_id, member = %input.member_id, "first view, incrementing");
        self.products
            .increment_product_views(product_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product".to_string()))
    }

    /// 판매 중(PROCESS) 상품 목록 (필터/정렬/페이지네이션)
    ///
    /// 결과가 비어 있어도 에러가 아니다.
    pub async fn get_products(&self, inquiry: &ProductInquiry) -> Result<Vec<Product>, ApiError> {
        let filter = build_filter(inquiry)?;
        Ok(self.products.find_products(&filter).await?)
    }

    /// 전체 상품 (관리자용). 0건이면 404
    pub async fn get_all_products(&self) -> Result<Vec<Product>, ApiError> {
        let products = self.products.find_all_products().await?;
        if products.is_empty() {
            return Err(ApiError::NotFound("Product".to_string()));
        }
        Ok(products)
    }

    /// 상품 생성
    ///
    /// 유니크 (name, size, volume) 위반 포함 모든 저장 실패는 `CreateFailed`
    pub async fn create_product(&self, input: ProductInput) -> Result<Product, ApiError> {
        self.products.insert_product(&input).await.map_err(|err| {
            tracing::error!("createProduct failed: {}", err);
            ApiError::CreateFailed(err.to_string())
        })
    }

    /// 상품 부분 수정
    ///
    /// - 잘못된 id: `ValidationError`
    /// - 일치하는 상품 없음: `NotFound`
    /// - 그 외 저장 실패: `UpdateFailed`
    pub async fn update_chosen_product(
        &self,
        id: &str,
        input: ProductUpdateInput,
    ) -> Result<Product, ApiError> {
        let product_id = RecordId::parse(id)?;

        let updated = if input.is_empty() {
            self.products.find_product(product_id).await
        } else {
            self.products.update_product(product_id, &input).await
        };

        match updated {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(ApiError::NotFound("Product".to_string())),
            Err(err) => {
                tracing::error!("updateChosenProduct failed: {}", err);
                Err(ApiError::UpdateFailed(err.to_string()))
            }
        }
    }
}

/// 조회 조건 → 저장소 필터
///
/// 가격 정렬만 오름차순, 나머지는 내림차순
fn build_filter(inquiry: &ProductInquiry) -> Result<ProductFilter, ApiError> {
    if inquiry.page < 1 || inquiry.limit < 1 {
        return Err(ApiError::ValidationError(
            "page and limit must be at least 1".to_string(),
        ));
    }

    let sort_field = ProductSortField::from_order(&inquiry.order).ok_or_else(|| {
        ApiError::ValidationError(format!("Unsupported order field: {}", inquiry.order))
    })?;

    let sort_direction = if sort_field == ProductSortField::ProductPrice {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };

    let search = inquiry
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(ProductFilter {
        status: ProductStatus::Process,
        collection: inquiry.product_collection,
        search,
        sort_field,
        sort_direction,
        offset: (i64::from(inquiry.page) - 1) * i64::from(inquiry.limit),
        limit: i64::from(inquiry.limit),
    })
}
