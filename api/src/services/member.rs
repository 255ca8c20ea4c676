//! Member Management
//!
//! - `MemberService`: 회원가입/로그인 (비밀번호 해시 + 저장)
//! - `RestaurantSignup`: 가입 요청에 RESTAURANT 유형을 붙여 위임하는 어댑터
//!
//! 비밀번호는 `salt$digest` 형태로 저장한다.
//! digest = Keccak256(salt || password), 둘 다 hex.

use std::sync::Arc;

use async_trait::async_trait;
use sha3::{Digest, Keccak256};

use crate::{
    db::{
        LoginInput, Member, MemberInput, MemberRepository, MemberStatus, MemberType, NewMember,
        RepositoryError,
    },
    error::ApiError,
};

/// 회원 관리 인터페이스
#[async_trait]
pub trait MemberManagement: Send + Sync {
    async fn process_signup(&self, input: MemberInput) -> Result<Member, ApiError>;
    async fn process_login(&self, input: LoginInput) -> Result<Member, ApiError>;
}

/// 회원 서비스 (PostgreSQL 저장소 기반)
pub struct MemberService {
    members: Arc<dyn MemberRepository>,
}

impl MemberService {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }
}

#[async_trait]
impl MemberManagement for MemberService {
    async fn process_signup(&self, input: MemberInput) -> Result<Member, ApiError> {
        if input.member_nick.trim().is_empty() || input.member_phone.trim().is_empty() {
            return Err(ApiError::ValidationError(
                "memberNick and memberPhone are required".to_string(),
            ));
        }
        if input.member_password.is_empty() {
            return Err(ApiError::ValidationError("memberPassword is required".to_string()));
        }

        let new_member = NewMember {
            member_type: input.member_type.unwrap_or(MemberType::User),
            member_nick: input.member_nick,
            member_phone: input.member_phone,
            password_hash: hash_password(&input.member_password),
            member_address: input.member_address,
            member_desc: input.member_desc,
            member_image: input.member_image,
        };

        self.members
            .insert_member(&new_member)
            .await
            .map_err(|err| match err {
                RepositoryError::AlreadyExists => {
                    ApiError::CreateFailed("Nick or phone is already used".to_string())
                }
                other => {
                    tracing::error!("processSignup failed: {}", other);
                    ApiError::CreateFailed(other.to_string())
                }
            })
    }

    async fn process_login(&self, input: LoginInput) -> Result<Member, ApiError> {
        let member = self
            .members
            .find_member_by_nick(&input.member_nick)
            .await?
            .ok_or_else(|| ApiError::NotFound("Member".to_string()))?;

        if member.member_status != MemberStatus::Active {
            return Err(ApiError::Unauthorized("Member is blocked".to_string()));
        }

        if !verify_password(&input.member_password, &member.member_password) {
            return Err(ApiError::Unauthorized("Wrong password".to_string()));
        }

        Ok(member)
    }
}

/// 레스토랑 가입 어댑터
///
/// 입력의 회원 유형을 RESTAURANT로 덮어쓰고 위임한다. 결과는 그대로 반환.
#[derive(Clone)]
pub struct RestaurantSignup {
    members: Arc<dyn MemberManagement>,
}

impl RestaurantSignup {
    pub fn new(members: Arc<dyn MemberManagement>) -> Self {
        Self { members }
    }

    pub async fn process_signup(&self, mut input: MemberInput) -> Result<Member, ApiError> {
        input.member_type = Some(MemberType::Restaurant);
        self.members.process_signup(input).await
    }

    pub async fn process_login(&self, input: LoginInput) -> Result<Member, ApiError> {
        self.members.process_login(input).await
    }
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Keccak256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

pub(crate) fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::random();
    format!("{}${}", hex::encode(salt), hex::encode(digest(&salt, password)))
}

pub(crate) fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
        return false;
    };
    digest(&salt, password) == expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mock::MockMemberRepository;
    use std::sync::Mutex;

    fn signup_input(nick: &str, phone: &str) -> MemberInput {
        MemberInput {
            member_type: None,
            member_nick: nick.to_string(),
            member_phone: phone.to_string(),
            member_password: "secret99".to_string(),
            member_address: None,
            member_desc: None,
            member_image: None,
        }
    }

    fn login(nick: &str, password: &str) -> LoginInput {
        LoginInput {
            member_nick: nick.to_string(),
            member_password: password.to_string(),
        }
    }

    #[test]
    fn test_password_hash_round_trip() {
        let stored = hash_password("secret99");
        assert!(verify_password("secret99", &stored));
        assert!(!verify_password("secret98", &stored));
        assert!(!verify_password("secret99", "garbage"));
    }

    #[test]
    fn test_password_hash_is_salted() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[tokio::test]
    async fn test_signup_and_login() {
        let service = MemberService::new(Arc::new(MockMemberRepository::new()));

        let member = service.process_signup(signup_input("burak", "010-1111")).await.unwrap();
        assert_eq!(member.member_type, MemberType::User);
        assert_ne!(member.member_password, "secret99");

        let logged_in = service.process_login(login("burak", "secret99")).await.unwrap();
        assert_eq!(logged_in.id, member.id);
    }

    #[tokio::test]
    async fn test_login_failures() {
        let repo = Arc::new(MockMemberRepository::new());
        let service = MemberService::new(repo.clone());
        service.process_signup(signup_input("burak", "010-1111")).await.unwrap();

        let err = service.process_login(login("nobody", "x")).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");

        let err = service.process_login(login("burak", "wrong")).await.unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");

        repo.set_status("burak", MemberStatus::Block);
        let err = service.process_login(login("burak", "secret99")).await.unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_duplicate_signup_fails() {
        let service = MemberService::new(Arc::new(MockMemberRepository::new()));
        service.process_signup(signup_input("burak", "010-1111")).await.unwrap();

        let err = service
            .process_signup(signup_input("other", "010-1111"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "CREATE_FAILED");
    }

    /// 위임 대상에 전달된 입력을 기록
    struct RecordingMembers {
        inner: MemberService,
        seen: Mutex<Vec<Option<MemberType>>>,
    }

    #[async_trait]
    impl MemberManagement for RecordingMembers {
        async fn process_signup(&self, input: MemberInput) -> Result<Member, ApiError> {
            self.seen.lock().unwrap().push(input.member_type);
            self.inner.process_signup(input).await
        }

        async fn process_login(&self, input: LoginInput) -> Result<Member, ApiError> {
            self.inner.process_login(input).await
        }
    }

    #[tokio::test]
    async fn test_restaurant_signup_tags_member_type() {
        let recording = Arc::new(RecordingMembers {
            inner: MemberService::new(Arc::new(MockMemberRepository::new())),
            seen: Mutex::new(vec![]),
        });
        let adapter = RestaurantSignup::new(recording.clone());

        let mut input = signup_input("burak", "010-1111");
        input.member_type = Some(MemberType::Admin);
        let member = adapter.process_signup(input).await.unwrap();

        assert_eq!(member.member_type, MemberType::Restaurant);
        assert_eq!(*recording.seen.lock().unwrap(), vec![Some(MemberType::Restaurant)]);

        let logged_in = adapter.process_login(login("burak", "secret99")).await.unwrap();
        assert_eq!(logged_in.member_type, MemberType::Restaurant);
    }
}
