//! 로깅 파사드 에러 타입
//!
//! 로그 출력 호출 자체는 에러를 반환하지 않습니다. 여기 정의된 에러는
//! 설정 로드나 순환 파일 관리처럼 실패가 의미 있는 보조 API에서만 사용됩니다.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("로그 파일 입출력 실패 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("로그 파일 압축 실패 ({path}): {source}")]
    Compress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("설정 오류: {0}")]
    Config(String),

    #[error("설정 JSON 파싱 실패: {0}")]
    Json(#[from] serde_json::Error),
}

impl LogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LogError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn compress(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LogError::Compress {
            path: path.into(),
            source,
        }
    }
}

pub type LogResult<T> = Result<T, LogError>;
