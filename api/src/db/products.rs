//! PostgreSQL 상품 쿼리

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use super::{
    models::{Product, ProductFilter, ProductInput, ProductUpdateInput},
    repository::{ProductRepository, RepositoryError},
    Database,
};
use crate::types::RecordId;

const PRODUCT_COLUMNS: &str = "id, product_status, product_collection, product_name, \
    product_price, product_left_count, product_size, product_volume, product_desc, \
    product_images, product_views, created_at, updated_at";

/// ILIKE 패턴 문자 이스케이프 (기본 escape 문자는 `\`)
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ProductRepository for Database {
    async fn find_product(&self, id: RecordId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_status = "
        ));
        qb.push_bind(filter.status.as_str());

        if let Some(collection) = filter.collection {
            qb.push(" AND product_collection = ");
            qb.push_bind(collection.as_str());
        }

        if let Some(search) = &filter.search {
            qb.push(" AND product_name ILIKE ");
            qb.push_bind(format!("%{}%", escape_like(search)));
        }

        // 정렬 컬럼은 ProductSortField 화이트리스트에서만 옴
        // id 보조 정렬로 페이지 경계를 안정화
        qb.push(format!(
            " ORDER BY {} {}, id ASC",
            filter.sort_field.column(),
            filter.sort_direction.as_sql()
        ));
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset);
        qb.push(" LIMIT ");
        qb.push_bind(filter.limit);

        let products = qb
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn find_all_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn increment_product_views(&self, id: RecordId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET product_views = product_views + 1
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn insert_product(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (
                id, product_status, product_collection, product_name, product_price,
                product_left_count, product_size, product_volume, product_desc, product_images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(RecordId::new().as_uuid())
        .bind(input.product_status.as_str())
        .bind(input.product_collection.as_str())
        .bind(&input.product_name)
        .bind(input.product_price)
        .bind(input.product_left_count)
        .bind(input.product_size.as_str())
        .bind(input.product_volume.as_str())
        .bind(&input.product_desc)
        .bind(&input.product_images)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update_product(
        &self,
        id: RecordId,
        input: &ProductUpdateInput,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products SET
                product_status     = COALESCE($2, product_status),
                product_collection = COALESCE($3, product_collection),
                product_name       = COALESCE($4, product_name),
                product_price      = COALESCE($5, product_price),
                product_left_count = COALESCE($6, product_left_count),
                product_size       = COALESCE($7, product_size),
                product_volume     = COALESCE($8, product_volume),
                product_desc       = COALESCE($9, product_desc),
                product_images     = COALESCE($10, product_images),
                updated_at         = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(input.product_status.map(|v| v.as_str()))
        .bind(input.product_collection.map(|v| v.as_str()))
        .bind(&input.product_name)
        .bind(input.product_price)
        .bind(input.product_left_count)
        .bind(input.product_size.map(|v| v.as_str()))
        .bind(input.product_volume.map(|v| v.as_str()))
        .bind(&input.product_desc)
        .bind(&input.product_images)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("pizza"), "pizza");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
