//! club-core: Club 공통 핵심 라이브러리
//!
//! 회원 프로필의 tier별 가시성과 role 기반 작업 권한을 판정하는 엔진입니다.
//! 디렉터리, 프로필 상세, RSVP/출석 버튼 등 모든 화면이 같은 판정을 사용합니다.
//!
//! # 모듈 구조
//!
//! - `auth`: Principal / Role / Viewer
//! - `member`: 회원 레코드, 프로필 tier, 프라이버시 설정
//! - `visibility`: 가시 projection 계산
//! - `search`: projection 기반 검색
//! - `permissions`: role × resource 권한 테이블 및 평가
//! - `store`: 회원 저장소 경계 (trait + 메모리 구현)
//! - `directory`: 저장소 경계에서 권한을 강제하는 디렉터리 서비스
//! - `error`: 공통 에러 타입

pub mod auth;
pub mod directory;
pub mod error;
pub mod member;
pub mod permissions;
pub mod search;
pub mod store;
pub mod visibility;

pub use error::{Error, Result};
