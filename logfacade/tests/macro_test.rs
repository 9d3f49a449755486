//! 로그 매크로 테스트

use logfacade::{
    log_debug, log_error, log_info, log_print, log_trace, log_warn, sprint, Level, Logger,
    MemoryBackend, Severity,
};
use std::sync::Arc;

fn memory_logger(level: Level) -> (Logger, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new(level.severity()));
    (Logger::new(backend.clone(), level), backend)
}

#[test]
fn test_sprint_joins_with_spaces() {
    assert_eq!(sprint!("hp", 100, true), "hp 100 true");
    assert_eq!(sprint!(), "");
}

#[test]
fn test_logger_macros_format_and_route() {
    let (logger, backend) = memory_logger(Level::Debug);

    log_trace!(logger, "걸러짐 {}", 0);
    log_debug!(logger, "디버그 {}", 1);
    log_print!(logger, "출력 {}", 2);
    log_info!(logger.with_prefix("net"), "정보 {}", 3);
    log_warn!(logger, "경고 {}", 4);
    log_error!(&logger, "오류 {}", 5);

    let records = backend.records();
    let summary: Vec<(Severity, &str)> = records
        .iter()
        .map(|r| (r.severity, r.message.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Severity::Debug, "디버그 1"),
            (Severity::Info, "출력 2"),
            (Severity::Info, "정보 3"),
            (Severity::Warn, "경고 4"),
            (Severity::Error, "오류 5"),
        ]
    );
    assert_eq!(records[2].logger, "net");
}

#[test]
fn test_macro_reports_call_site() {
    let (logger, backend) = memory_logger(Level::Info);

    let line = line!() + 1;
    log_info!(logger, "위치");

    let records = backend.records();
    assert_eq!(
        records[0].caller.as_deref(),
        Some(format!("macro_test.rs:{}", line).as_str())
    );
}
