//! CLI 설정
//!
//! 환경변수(`.env` 포함)에서 기본값을 읽고, CLI 옵션이 이를 덮어씁니다.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use club_core::directory::Directory;
use club_core::permissions::RoleCapabilityTable;
use club_core::store::{InMemoryMemberStore, MemberEntry};

/// 기본 로그 필터
pub const DEFAULT_LOG_FILTER: &str = "club=info,club_core=info";

/// CLI 설정
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// 디렉터리 데이터 파일 (JSON)
    pub data_path: Option<PathBuf>,

    /// 권한 테이블 파일 (YAML, 없으면 기본 테이블)
    pub policy_path: Option<PathBuf>,

    /// 로그 필터 (tracing EnvFilter 문법)
    pub log_filter: String,
}

/// 디렉터리 데이터 파일 구조
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryFile {
    #[serde(default)]
    pub members: Vec<MemberEntry>,
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Self {
        Self {
            data_path: env::var("CLUB_DATA_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),

            policy_path: env::var("CLUB_POLICY_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),

            log_filter: env::var("CLUB_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// CLI 옵션 적용 (옵션 > 환경변수)
    pub fn with_overrides(mut self, data: Option<PathBuf>, policy: Option<PathBuf>) -> Self {
        if data.is_some() {
            self.data_path = data;
        }
        if policy.is_some() {
            self.policy_path = policy;
        }
        self
    }

    /// 권한 테이블 로드
    pub fn load_table(&self) -> anyhow::Result<RoleCapabilityTable> {
        match &self.policy_path {
            Some(path) => {
                let content = read(path)?;
                let table = RoleCapabilityTable::from_yaml(&content)
                    .with_context(|| format!("invalid capability table: {}", path.display()))?;
                tracing::debug!(path = %path.display(), "loaded capability table");
                Ok(table)
            }
            None => Ok(RoleCapabilityTable::default()),
        }
    }

    /// 디렉터리 데이터 로드
    pub fn load_entries(&self) -> anyhow::Result<Vec<MemberEntry>> {
        let path = self.data_path.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "Directory data not configured. Use --data <path> or set CLUB_DATA_PATH"
            )
        })?;

        let content = read(path)?;
        let file: DirectoryFile = serde_json::from_str(&content)
            .with_context(|| format!("invalid directory file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), members = file.members.len(), "loaded directory");
        Ok(file.members)
    }

    /// 디렉터리 서비스 구성
    pub fn load_directory(&self) -> anyhow::Result<Directory<InMemoryMemberStore>> {
        let table = self.load_table()?;
        let store = InMemoryMemberStore::from_entries(self.load_entries()?)?;
        Ok(Directory::new(store, table))
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
