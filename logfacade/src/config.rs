//! 로거 설정 관리
//!
//! 설정 구조체와 초기화 시 적용되는 기본값, 경로 대체 규칙을 담당합니다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::error::{LogError, LogResult};
use crate::level::{Level, Severity};

/// 최대 파일 크기 기본값 (MB)
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;
/// 보관할 순환 파일 개수 기본값
pub const DEFAULT_MAX_BACKUPS: usize = 10;
/// 보관 일수 기본값
pub const DEFAULT_MAX_AGE_DAYS: u64 = 7;
/// 설정 경로에 접근할 수 없을 때 사용하는 디렉토리
pub const FALLBACK_DIR: &str = ".";

/// 출력 레코드 인코딩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// 탭으로 구분된 한 줄 텍스트
    #[default]
    Console,
    /// 한 줄 JSON 객체
    Json,
}

impl FromStr for Encoding {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" | "text" => Ok(Encoding::Console),
            "json" => Ok(Encoding::Json),
            other => Err(LogError::Config(format!("알 수 없는 로그 형식: {}", other))),
        }
    }
}

/// 로거 설정
///
/// JSON 키는 기존 설정 파일과 호환되도록 `log_*` 이름을 사용합니다.
/// 숫자 항목이 0이면 초기화 시 기본값으로 대체됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// 최소 레벨 이름 (trace/debug/info/warn/error)
    #[serde(rename = "log_level")]
    pub level: String,

    /// 로그 디렉토리
    #[serde(rename = "log_path")]
    pub path: String,

    /// 로그 파일 이름 (`<path>/<name>.log`)
    #[serde(rename = "log_name")]
    pub name: String,

    /// 순환 기준 파일 크기 (MB)
    #[serde(rename = "log_max_size")]
    pub max_size: u64,

    /// 보관할 순환 파일 개수
    #[serde(rename = "log_max_backup")]
    pub max_backups: usize,

    /// 보관 일수
    #[serde(rename = "log_max_age")]
    pub max_age: u64,

    /// 순환 파일 gzip 압축 여부 (0/1)
    #[serde(rename = "log_compress")]
    pub compress: u8,

    /// 메시지 앞에 `[file:line]` 표시 여부 (0/1)
    #[serde(rename = "log_caller")]
    pub caller: u8,

    /// 출력 인코딩
    #[serde(rename = "log_format")]
    pub format: Encoding,
}

impl LoggerConfig {
    /// 디렉토리와 파일 이름만 지정한 설정
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// 환경변수에서 설정 로드
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("LOG_LEVEL") {
            config.level = val;
        }

        if let Ok(val) = std::env::var("LOG_PATH") {
            config.path = val;
        }

        if let Ok(val) = std::env::var("LOG_NAME") {
            config.name = val;
        }

        if let Ok(val) = std::env::var("LOG_MAX_SIZE") {
            if let Ok(size) = val.parse() {
                config.max_size = size;
            }
        }

        if let Ok(val) = std::env::var("LOG_MAX_BACKUP") {
            if let Ok(count) = val.parse() {
                config.max_backups = count;
            }
        }

        if let Ok(val) = std::env::var("LOG_MAX_AGE") {
            if let Ok(days) = val.parse() {
                config.max_age = days;
            }
        }

        if let Ok(val) = std::env::var("LOG_COMPRESS") {
            config.compress = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("LOG_CALLER") {
            config.caller = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("LOG_FORMAT") {
            if let Ok(format) = val.parse() {
                config.format = format;
            }
        }

        config
    }

    /// JSON 문자열에서 설정 로드
    pub fn from_json(json: &str) -> LogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 설정 유효성 검증
    ///
    /// 초기화는 검증 없이도 진행되지만, 설정 파일을 미리 점검할 때 사용합니다.
    pub fn validate(&self) -> LogResult<()> {
        if self.name.trim().is_empty() {
            return Err(LogError::Config("log_name must not be empty".to_string()));
        }

        if self.name.contains('/') || self.name.contains('\\') {
            return Err(LogError::Config(format!(
                "log_name must be a bare file name: {}",
                self.name
            )));
        }

        if self.compress > 1 || self.caller > 1 {
            return Err(LogError::Config("log_compress and log_caller must be 0 or 1".to_string()));
        }

        if !self.level.is_empty() && Level::from_config_name(&self.level).is_none() {
            return Err(LogError::Config(format!("unknown log_level: {}", self.level)));
        }

        Ok(())
    }

    /// 기본값과 경로 대체 규칙을 적용한 최종 설정 계산
    pub fn resolve(&self) -> ResolvedConfig {
        let dir = resolve_dir(&self.path);
        let file_path = dir.join(format!("{}.log", self.name));

        let max_size_mb = if self.max_size == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            self.max_size
        };
        let max_backups = if self.max_backups == 0 {
            DEFAULT_MAX_BACKUPS
        } else {
            self.max_backups
        };
        let max_age_days = if self.max_age == 0 {
            DEFAULT_MAX_AGE_DAYS
        } else {
            self.max_age
        };

        let level = match Level::from_config_name(&self.level) {
            Some(level) => level,
            None => {
                if !self.level.is_empty() {
                    warn!(level = %self.level, "알 수 없는 로그 레벨, info 사용");
                }
                Level::Info
            }
        };

        ResolvedConfig {
            file_path,
            max_size_mb,
            max_backups,
            max_age_days,
            compress: self.compress == 1,
            include_caller: self.caller == 1,
            level,
            severity: level.severity(),
            encoding: self.format,
        }
    }
}

/// 초기화에 실제로 사용되는 설정 값
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// 활성 로그 파일 경로
    pub file_path: PathBuf,
    pub max_size_mb: u64,
    pub max_backups: usize,
    pub max_age_days: u64,
    pub compress: bool,
    pub include_caller: bool,
    /// 파사드 레벨 (Trace 판단용)
    pub level: Level,
    /// 백엔드 최소 심각도
    pub severity: Severity,
    pub encoding: Encoding,
}

impl ResolvedConfig {
    /// 순환 기준 크기 (바이트)
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}

/// 설정 경로 검사
///
/// 경로가 존재하지 않으면 경고를 남기고 현재 디렉토리를 사용합니다.
/// 끝의 경로 구분자 하나는 제거합니다.
fn resolve_dir(path: &str) -> PathBuf {
    if path.is_empty() || !Path::new(path).exists() {
        warn!(
            path = %path,
            fallback = FALLBACK_DIR,
            "로그 경로가 없거나 접근할 수 없음, 기본 경로 사용"
        );
        return PathBuf::from(FALLBACK_DIR);
    }

    let trimmed = if path.len() > 1 {
        path.strip_suffix('/')
            .or_else(|| path.strip_suffix(std::path::MAIN_SEPARATOR))
            .unwrap_or(path)
    } else {
        path
    };

    PathBuf::from(trimmed)
}

fn parse_flag(val: &str) -> u8 {
    match val.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => 1,
        _ => 0,
    }
}
