//! 권한 테이블 및 평가
//!
//! # 개요
//!
//! role × resource → CRUD 권한 테이블과, 그 위에 얹힌 소유권 규칙을 평가합니다.
//! 판정은 에러를 내지 않으며 모든 모호한 입력은 거부로 귀결됩니다 (fail closed).
//!
//! # 모듈 구조
//!
//! - `policy`: 권한 테이블 정의 및 YAML 로딩
//! - `evaluator`: 권한 평가기 (admin 우회, officer 비대칭 규칙)

mod evaluator;
mod policy;

pub use evaluator::{Authorizer, Decision, Target, TargetAction};
pub use policy::{Action, Capabilities, Resource, RoleCapabilityTable};
