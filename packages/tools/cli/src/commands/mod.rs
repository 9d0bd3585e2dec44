//! CLI 명령어 구현

pub mod can;
pub mod policy;
pub mod search;
pub mod view;
