//! Database Models
//!
//! Products, view records and members as persisted in PostgreSQL.
//! Enumerations are stored as SCREAMING_SNAKE text and serialized the same way.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::types::RecordId;

/// 문자열로 저장되는 enum 정의
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!("unknown {} value: {}", stringify!($name), other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum! {
    /// 상품 상태
    /// `getProducts`는 항상 PROCESS만 노출
    ProductStatus {
        Pause => "PAUSE",
        Process => "PROCESS",
        SoldOut => "SOLD_OUT",
    }
}

text_enum! {
    /// 상품 분류
    ProductCollection {
        Dish => "DISH",
        Salad => "SALAD",
        Dessert => "DESSERT",
        Drink => "DRINK",
        Other => "OTHER",
    }
}

text_enum! {
    ProductSize {
        Small => "SMALL",
        Normal => "NORMAL",
        Large => "LARGE",
        Set => "SET",
    }
}

text_enum! {
    /// 음료 용량 (리터)
    ProductVolume {
        Half => "HALF",
        One => "ONE",
        OnePointFive => "ONE_POINT_FIVE",
        Two => "TWO",
    }
}

text_enum! {
    /// 조회 기록 그룹
    ViewGroup {
        Member => "MEMBER",
        Article => "ARTICLE",
        Product => "PRODUCT",
    }
}

text_enum! {
    MemberType {
        User => "USER",
        Admin => "ADMIN",
        Restaurant => "RESTAURANT",
    }
}

text_enum! {
    MemberStatus {
        Active => "ACTIVE",
        Block => "BLOCK",
        Delete => "DELETE",
    }
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Process
    }
}

impl Default for ProductSize {
    fn default() -> Self {
        ProductSize::Normal
    }
}

impl Default for ProductVolume {
    fn default() -> Self {
        ProductVolume::One
    }
}

fn decode_text<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = row.try_get(column)?;
    raw.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: e.into(),
    })
}

// ============ Product ============

/// 상품
///
/// (product_name, product_size, product_volume) 조합은 유일
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub product_status: ProductStatus,
    pub product_collection: ProductCollection,
    pub product_name: String,
    /// 가격 (원 단위, 0 이상)
    pub product_price: i64,
    /// 재고 수량
    pub product_left_count: i32,
    pub product_size: ProductSize,
    pub product_volume: ProductVolume,
    pub product_desc: Option<String>,
    pub product_images: Vec<String>,
    /// 조회수 (중복 제거된 회원 조회만 증가)
    pub product_views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: RecordId::from(row.try_get::<uuid::Uuid, _>("id")?),
            product_status: decode_text(row, "product_status")?,
            product_collection: decode_text(row, "product_collection")?,
            product_name: row.try_get("product_name")?,
            product_price: row.try_get("product_price")?,
            product_left_count: row.try_get("product_left_count")?,
            product_size: decode_text(row, "product_size")?,
            product_volume: decode_text(row, "product_volume")?,
            product_desc: row.try_get("product_desc")?,
            product_images: row.try_get("product_images")?,
            product_views: row.try_get("product_views")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// 상품 생성 입력
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default)]
    pub product_status: ProductStatus,
    pub product_collection: ProductCollection,
    pub product_name: String,
    pub product_price: i64,
    pub product_left_count: i32,
    #[serde(default)]
    pub product_size: ProductSize,
    #[serde(default)]
    pub product_volume: ProductVolume,
    pub product_desc: Option<String>,
    #[serde(default)]
    pub product_images: Vec<String>,
}

/// 상품 부분 수정 입력 (None 필드는 유지)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateInput {
    pub product_status: Option<ProductStatus>,
    pub product_collection: Option<ProductCollection>,
    pub product_name: Option<String>,
    pub product_price: Option<i64>,
    pub product_left_count: Option<i32>,
    pub product_size: Option<ProductSize>,
    pub product_volume: Option<ProductVolume>,
    pub product_desc: Option<String>,
    pub product_images: Option<Vec<String>>,
}

impl ProductUpdateInput {
    pub fn is_empty(&self) -> bool {
        self.product_status.is_none()
            && self.product_collection.is_none()
            && self.product_name.is_none()
            && self.product_price.is_none()
            && self.product_left_count.is_none()
            && self.product_size.is_none()
            && self.product_volume.is_none()
            && self.product_desc.is_none()
            && self.product_images.is_none()
    }
}

/// 정렬 가능한 상품 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    CreatedAt,
    UpdatedAt,
    ProductPrice,
    ProductViews,
    ProductName,
    ProductLeftCount,
}

impl ProductSortField {
    /// 요청의 `order` 값 (camelCase 필드명)
    pub fn from_order(order: &str) -> Option<Self> {
        match order {
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            "productPrice" => Some(Self::ProductPrice),
            "productViews" => Some(Self::ProductViews),
            "productName" => Some(Self::ProductName),
            "productLeftCount" => Some(Self::ProductLeftCount),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::ProductPrice => "product_price",
            Self::ProductViews => "product_views",
            Self::ProductName => "product_name",
            Self::ProductLeftCount => "product_left_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// 저장소에 전달되는 목록 조회 조건
///
/// 상태/정렬 방향/offset 결정은 서비스 레이어 책임
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub status: ProductStatus,
    pub collection: Option<ProductCollection>,
    pub search: Option<String>,
    pub sort_field: ProductSortField,
    pub sort_direction: SortDirection,
    pub offset: i64,
    pub limit: i64,
}

// ============ View ============

/// 조회 기록
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRecord {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub member_id: RecordId,
    pub view_ref_id: RecordId,
    pub view_group: ViewGroup,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for ViewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: RecordId::from(row.try_get::<uuid::Uuid, _>("id")?),
            member_id: RecordId::from(row.try_get::<uuid::Uuid, _>("member_id")?),
            view_ref_id: RecordId::from(row.try_get::<uuid::Uuid, _>("view_ref_id")?),
            view_group: decode_text(row, "view_group")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// 조회 기록 키 (member, 대상, 그룹)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewInput {
    pub member_id: RecordId,
    pub view_ref_id: RecordId,
    pub view_group: ViewGroup,
}

// ============ Member ============

/// 회원
///
/// 비밀번호 해시는 직렬화하지 않음
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub member_type: MemberType,
    pub member_status: MemberStatus,
    pub member_nick: String,
    pub member_phone: String,
    #[serde(skip_serializing)]
    pub member_password: String,
    pub member_address: Option<String>,
    pub member_desc: Option<String>,
    pub member_image: Option<String>,
    pub member_points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Member {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: RecordId::from(row.try_get::<uuid::Uuid, _>("id")?),
            member_type: decode_text(row, "member_type")?,
            member_status: decode_text(row, "member_status")?,
            member_nick: row.try_get("member_nick")?,
            member_phone: row.try_get("member_phone")?,
            member_password: row.try_get("member_password")?,
            member_address: row.try_get("member_address")?,
            member_desc: row.try_get("member_desc")?,
            member_image: row.try_get("member_image")?,
            member_points: row.try_get("member_points")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// 회원가입 입력
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub member_type: Option<MemberType>,
    pub member_nick: String,
    pub member_phone: String,
    pub member_password: String,
    pub member_address: Option<String>,
    pub member_desc: Option<String>,
    pub member_image: Option<String>,
}

/// 로그인 입력
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub member_nick: String,
    pub member_password: String,
}

/// 저장 직전의 회원 (해시된 비밀번호)
#[derive(Debug, Clone)]
pub struct NewMember {
    pub member_type: MemberType,
    pub member_nick: String,
    pub member_phone: String,
    pub password_hash: String,
    pub member_address: Option<String>,
    pub member_desc: Option<String>,
    pub member_image: Option<String>,
}
