//! 로그 레벨 정의
//!
//! 파사드가 사용하는 `Level`과 백엔드가 이해하는 `Severity` 두 가지 어휘를 정의합니다.
//! 백엔드에는 Trace 단계가 없으므로 Trace는 Debug로 기록되고,
//! Trace 호출의 허용 여부는 파사드 쪽 `Level`로 따로 판단합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 파사드 로그 레벨
///
/// 가장 심각한 `Panic`부터 가장 덜 심각한 `Trace`까지 순서대로 정렬됩니다.
/// 즉 `Level::Panic < Level::Trace` 입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// 기록 후 패닉 발생
    Panic = 0,
    /// 기록 후 프로세스 종료
    Fatal = 1,
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
    /// 상세한 추적 정보 (설정 레벨이 정확히 Trace일 때만 출력)
    Trace = 6,
}

impl Level {
    /// 모든 레벨 (심각도 내림차순)
    pub const ALL: [Level; 7] = [
        Level::Panic,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    /// 레벨 이름을 대문자 문자열로 반환
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    /// 설정 파일의 레벨 이름 해석
    ///
    /// 설정에서 허용되는 이름은 trace/debug/info/warn/error 다섯 가지뿐이며
    /// 대소문자를 구분하지 않습니다. 그 외의 값은 `None`을 반환합니다.
    pub fn from_config_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" => Some(Level::Warn),
            "error" => Some(Level::Error),
            _ => None,
        }
    }

    /// 이 레벨로 설정된 로거가 `call` 레벨의 호출을 출력하는지 판단
    ///
    /// Trace 호출은 설정 레벨이 정확히 Trace일 때만 허용됩니다.
    /// 나머지는 호출 레벨이 설정 레벨보다 같거나 더 심각하면 허용됩니다.
    pub fn permits(self, call: Level) -> bool {
        match call {
            Level::Trace => self == Level::Trace,
            _ => call <= self,
        }
    }

    /// 백엔드 심각도로 변환 (Trace → Debug)
    pub fn severity(self) -> Severity {
        match self {
            Level::Panic => Severity::Panic,
            Level::Fatal => Severity::Fatal,
            Level::Error => Severity::Error,
            Level::Warn => Severity::Warn,
            Level::Info => Severity::Info,
            Level::Debug | Level::Trace => Severity::Debug,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Info
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 레벨 이름
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "알 수 없는 로그 레벨: {}", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PANIC" => Ok(Level::Panic),
            "FATAL" => Ok(Level::Fatal),
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

/// 백엔드 심각도
///
/// 백엔드 고유의 어휘로, Trace 단계가 없습니다.
/// 덜 심각한 것부터 정렬되며 `min`보다 같거나 높은 기록만 출력됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Panic = 4,
    Fatal = 5,
}

impl Severity {
    /// 대문자 레벨 표기 (출력 레코드의 `L` 값)
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Panic => "PANIC",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
