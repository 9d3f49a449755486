//! 전역 로거 (싱글톤)
//!
//! `init_logger`가 만든 루트 로거를 원자적 포인터에 보관하고,
//! 패키지 수준 함수들은 이 로거에 위임합니다.
//!
//! 초기화 전에는 어떤 함수도 실패하지 않으며, 메시지를 그대로 표준 출력에
//! 한 줄씩 씁니다. 초기화는 프로세스 시작 시 한 번만 호출해야 합니다.
//! 다시 호출하면 로거가 교체되지만, 동시에 로그를 쓰는 쪽은 교체 전후
//! 어느 로거든 볼 수 있습니다.

use arc_swap::ArcSwapOption;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::LoggerConfig;
use crate::logger::Logger;

static ROOT: ArcSwapOption<Logger> = ArcSwapOption::const_empty();
static CONFIGURED: AtomicBool = AtomicBool::new(false);

/// 설정으로 루트 로거를 만들어 전역으로 설치
///
/// 경로 대체, 기본값 적용, 레벨 해석은 `LoggerConfig::resolve`가 담당하며
/// 이 함수는 실패하지 않습니다. 로그 파일은 첫 기록 시점에 열립니다.
pub fn init_logger(config: &LoggerConfig) -> Logger {
    let resolved = config.resolve();
    let logger = Logger::from_config(&resolved);

    install(logger.clone());

    tracing::info!(
        path = %resolved.file_path.display(),
        level = %resolved.level,
        max_size_mb = resolved.max_size_mb,
        max_backups = resolved.max_backups,
        max_age_days = resolved.max_age_days,
        compress = resolved.compress,
        "로거 초기화 완료"
    );

    logger
}

/// 이미 만들어진 로거를 전역으로 설치
pub fn install(logger: Logger) {
    ROOT.store(Some(Arc::new(logger)));
    CONFIGURED.store(true, Ordering::SeqCst);
}

/// 전역 로거 설치 여부
pub fn is_configured() -> bool {
    CONFIGURED.load(Ordering::SeqCst)
}

/// 설치된 루트 로거 (없으면 `None`)
pub fn logger() -> Option<Logger> {
    ROOT.load_full().map(|logger| logger.as_ref().clone())
}

/// 초기화 전 대체 출력: 메시지 한 줄
fn write_fallback<W: Write>(out: &mut W, message: impl fmt::Display) {
    let _ = writeln!(out, "{}", message);
}

fn fallback(message: impl fmt::Display) {
    write_fallback(&mut io::stdout().lock(), message);
}

macro_rules! delegate {
    ($(#[$doc:meta])* $name:ident, $method:ident) => {
        $(#[$doc])*
        #[track_caller]
        pub fn $name(message: impl fmt::Display) {
            match &*ROOT.load() {
                Some(logger) => logger.$method(message),
                None => fallback(message),
            }
        }
    };
    (@args $(#[$doc:meta])* $name:ident, $method:ident) => {
        $(#[$doc])*
        #[track_caller]
        pub fn $name(args: fmt::Arguments<'_>) {
            match &*ROOT.load() {
                Some(logger) => logger.$method(args),
                None => fallback(args),
            }
        }
    };
}

delegate!(
    /// Info 레벨로 기록
    print, print
);
delegate!(@args printf, printf);
delegate!(println, println);
delegate!(trace, trace);
delegate!(@args tracef, tracef);
delegate!(debug, debug);
delegate!(@args debugf, debugf);
delegate!(info, info);
delegate!(@args infof, infof);
delegate!(warn, warn);
delegate!(@args warnf, warnf);
delegate!(error, error);
delegate!(@args errorf, errorf);

/// 기록 후 프로세스 종료
///
/// 초기화 전이면 표준 출력에 쓴 뒤 종료합니다.
#[track_caller]
pub fn fatal(message: impl fmt::Display) -> ! {
    if let Some(logger) = ROOT.load_full() {
        logger.fatal(message)
    }
    fallback(&message);
    std::process::exit(1)
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    fatal(args)
}

/// 기록 후 같은 메시지로 패닉
///
/// 초기화 전이면 표준 출력에 쓴 뒤 패닉합니다.
#[track_caller]
pub fn panic(message: impl fmt::Display) -> ! {
    if let Some(logger) = ROOT.load_full() {
        logger.panic(message)
    }
    let message = message.to_string();
    fallback(&message);
    panic!("{}", message)
}

#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    panic(args)
}
