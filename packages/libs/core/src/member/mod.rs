//! 회원 레코드 및 프라이버시 설정
//!
//! # 개요
//!
//! 회원 프로필은 세 개의 tier로 나뉩니다:
//!
//! - **Public**: 사진, 벤처 정보, 전문 분야, 소개 (익명에게도 노출 가능)
//! - **MemberOnly**: 연락처, 소셜 링크, 네트워킹 관심사, 스피치/출석 진행도
//! - **Private**: 개인 목표, 임원 메모
//!
//! Public/MemberOnly tier의 각 필드는 회원 본인이 소유한 [`PrivacySettings`] 플래그로
//! 노출 여부를 결정합니다. Private tier는 소유권/role로만 결정됩니다.
//!
//! # 모듈 구조
//!
//! - `field`: 필드/tier 분류
//! - `record`: 회원 레코드
//! - `privacy`: 프라이버시 설정

mod field;
mod privacy;
mod record;

pub use field::{ProfileField, Tier};
pub use privacy::{PrivacySettings, PrivacySettingsPatch};
pub use record::{
    MemberId, MemberOnlyProfile, MemberRecord, NetworkingInterests, NewMember, PrivateProfile,
    Profile, Progress, PublicProfile, SocialLink, Venture,
};
