//! View Ledger
//!
//! "회원 M이 그룹 G의 대상 E를 이미 조회했는가?"에 답하고 첫 조회를 기록한다.
//! 조회수 증가 여부 판단은 `ProductService`가 이 결과를 보고 결정한다.

use std::sync::Arc;

use crate::{
    db::{ViewInput, ViewRecord, ViewRepository},
    error::ApiError,
};

/// 조회 기록 서비스
#[derive(Clone)]
pub struct ViewService {
    views: Arc<dyn ViewRepository>,
}

impl ViewService {
    pub fn new(views: Arc<dyn ViewRepository>) -> Self {
        Self { views }
    }

    /// (member, 대상, 그룹)이 정확히 일치하는 기록이 있는지 확인 (부수효과 없음)
    pub async fn check_existence(&self, input: &ViewInput) -> Result<bool, ApiError> {
        Ok(self.views.view_exists(input).await?)
    }

    /// 조회 기록 삽입 (무조건)
    ///
    /// 호출자가 먼저 `check_existence`를 확인해야 한다.
    /// 두 호출 사이에는 경쟁이 있으므로 조회수 증가 경로는 `record_first_view`를 사용한다.
    pub async fn record_view(&self, input: &ViewInput) -> Result<ViewRecord, ApiError> {
        Ok(self.views.insert_view(input).await?)
    }

    /// 첫 조회일 때만 기록하고 true 반환 (원자적)
    pub async fn record_first_view(&self, input: &ViewInput) -> Result<bool, ApiError> {
        let inserted = self.views.insert_view_if_absent(input).await?;
        Ok(inserted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{mock::MockViewRepository, ViewGroup};
    use crate::types::RecordId;

    fn input() -> ViewInput {
        ViewInput {
            member_id: RecordId::new(),
            view_ref_id: RecordId::new(),
            view_group: ViewGroup::Product,
        }
    }

    #[tokio::test]
    async fn test_check_then_record() {
        let repo = Arc::new(MockViewRepository::new());
        let service = ViewService::new(repo.clone());
        let input = input();

        assert!(!service.check_existence(&input).await.unwrap());

        let record = service.record_view(&input).await.unwrap();
        assert_eq!(record.member_id, input.member_id);
        assert_eq!(record.view_ref_id, input.view_ref_id);
        assert_eq!(record.view_group, ViewGroup::Product);

        assert!(service.check_existence(&input).await.unwrap());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_existence_matches_all_three_fields() {
        let service = ViewService::new(Arc::new(MockViewRepository::new()));
        let input = input();
        service.record_view(&input).await.unwrap();

        let other_group = ViewInput { view_group: ViewGroup::Article, ..input };
        let other_member = ViewInput { member_id: RecordId::new(), ..input };

        assert!(!service.check_existence(&other_group).await.unwrap());
        assert!(!service.check_existence(&other_member).await.unwrap());
    }

    #[tokio::test]
    async fn test_record_first_view_only_once() {
        let repo = Arc::new(MockViewRepository::new());
        let service = ViewService::new(repo.clone());
        let input = input();

        assert!(service.record_first_view(&input).await.unwrap());
        assert!(!service.record_first_view(&input).await.unwrap());
        assert_eq!(repo.len(), 1);
    }
}
