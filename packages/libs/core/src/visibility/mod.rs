//! 프로필 가시성 판정
//!
//! # 개요
//!
//! 회원 레코드와 프라이버시 설정, 조회자를 받아 **가시 projection**을 계산합니다.
//! 화면과 검색은 원본 레코드 대신 항상 projection만 사용합니다.
//!
//! # 모듈 구조
//!
//! - `projection`: 가시 projection 타입
//! - `resolver`: 가시성 판정기

mod projection;
mod resolver;

pub use projection::{ContactInfo, VisibleProjection};
pub use resolver::VisibilityResolver;
