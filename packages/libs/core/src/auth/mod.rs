//! 행위 주체(Principal) 타입
//!
//! # 개요
//!
//! 인증 상태와 신원은 별개의 두 사실로 다룹니다:
//!
//! - **Principal**: 누가 요청하는가 (`id` + `role`)
//! - **is_authenticated**: 그 요청이 인증된 것으로 평가되는가
//!
//! 로그인은 되어 있지만 과도기(데모 등) 상태에서 익명으로 평가되어야 하는 경우가
//! 있기 때문에 두 값을 하나로 합치지 않습니다. 익명은 Principal이 없는 상태입니다.
//!
//! 세션/토큰 발급은 이 크레이트의 범위가 아닙니다.

mod principal;

pub use principal::{Principal, Role, Viewer};
