//! 구조화 로깅 파사드
//!
//! 게임 서버 전반에서 공통으로 쓰는 로깅 진입점입니다.
//! 하나의 전역 로거를 설정하고, 패키지 수준 함수나 접두사/필드가 붙은
//! 파생 로거로 기록합니다.
//!
//! # 주요 기능
//! - **레벨 필터링**: Panic, Fatal, Error, Warn, Info, Debug, Trace
//! - **접두사 체인**: `with_prefix("grpc").with_prefix("auth")` → `grpc.auth`
//! - **구조화 필드**: 파생 로거에 키/값 필드를 누적
//! - **크기 기반 순환**: 최대 크기, 백업 개수, 보관 기간, gzip 압축
//! - **호출 위치 표시**: 메시지 앞에 `[file.rs:line]` 추가 (선택)
//!
//! # 사용 예시
//! ```rust,no_run
//! use logfacade::{init_logger, Fields, LoggerConfig};
//!
//! let config = LoggerConfig::new("./logs", "server");
//! let root = init_logger(&config);
//!
//! logfacade::info("서버 시작");
//! logfacade::log_info!("포트 {} 바인딩", 50051);
//!
//! let grpc = root
//!     .with_prefix("grpc")
//!     .with_fields(Fields::single("port", 50051));
//! grpc.warnf(format_args!("요청 지연 {}ms", 250));
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod global;
pub mod level;
pub mod logger;
pub mod rotation;

pub use backend::{LogBackend, MemoryBackend, SinkBackend};
pub use config::{Encoding, LoggerConfig, ResolvedConfig};
pub use error::{LogError, LogResult};
pub use fields::{Fields, HasFields};
pub use formatter::{Record, RecordFormatter};
pub use global::{
    debug, debugf, error, errorf, fatal, fatalf, info, infof, init_logger, install,
    is_configured, logger, panic, panicf, print, printf, println, trace, tracef, warn, warnf,
};
pub use level::{Level, Severity};
pub use logger::{add_fields_from, Loggable, Logger};
pub use rotation::{Backup, RotatingSink, RotationPolicy};

/// 인자들을 공백으로 이어 붙인 문자열
///
/// ```
/// assert_eq!(logfacade::sprint!("player", 7, "joined"), "player 7 joined");
/// ```
#[macro_export]
macro_rules! sprint {
    ($($arg:expr),* $(,)?) => {{
        let parts: ::std::vec::Vec<::std::string::String> =
            ::std::vec![$(::std::string::ToString::to_string(&$arg)),*];
        parts.join(" ")
    }};
}

/// Info 레벨 (`print`과 동일)
#[macro_export]
macro_rules! log_print {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::printf(::std::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $logger.printf(::std::format_args!($fmt $(, $arg)*))
    };
}

/// Trace 레벨
#[macro_export]
macro_rules! log_trace {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::tracef(::std::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $logger.tracef(::std::format_args!($fmt $(, $arg)*))
    };
}

/// Debug 레벨
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::debugf(::std::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $logger.debugf(::std::format_args!($fmt $(, $arg)*))
    };
}

/// Info 레벨
///
/// 포맷 문자열로 시작하면 전역 로거에, 로거 표현식으로 시작하면 그 로거에 기록합니다.
///
/// ```rust,no_run
/// let root = logfacade::init_logger(&logfacade::LoggerConfig::new("./logs", "demo"));
/// logfacade::log_info!("접속자 {}", 12);
/// logfacade::log_info!(root.with_prefix("tcp"), "세션 {} 종료", 7);
/// ```
#[macro_export]
macro_rules! log_info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::infof(::std::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $logger.infof(::std::format_args!($fmt $(, $arg)*))
    };
}

/// Warn 레벨
#[macro_export]
macro_rules! log_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::warnf(::std::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $logger.warnf(::std::format_args!($fmt $(, $arg)*))
    };
}

/// Error 레벨
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::errorf(::std::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $logger.errorf(::std::format_args!($fmt $(, $arg)*))
    };
}

/// Fatal 레벨, 기록 후 프로세스 종료
#[macro_export]
macro_rules! log_fatal {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::fatalf(::std::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $logger.fatalf(::std::format_args!($fmt $(, $arg)*))
    };
}

/// Panic 레벨, 기록 후 패닉
#[macro_export]
macro_rules! log_panic {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::panicf(::std::format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $logger.panicf(::std::format_args!($fmt $(, $arg)*))
    };
}
