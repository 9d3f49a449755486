//! 로거 파사드
//!
//! `Logger`는 불변 값입니다. `with_*` 메서드는 항상 기존 상태에 증분을 더한
//! 새 인스턴스를 반환하며, 수신자를 변경하지 않습니다.
//!
//! 모든 출력 메서드는 `#[track_caller]`로 표시되어 있어 호출 위치(`file:line`)가
//! 내부 헬퍼가 아닌 실제 호출자를 가리킵니다.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::backend::{LogBackend, SinkBackend};
use crate::config::ResolvedConfig;
use crate::fields::{Fields, HasFields};
use crate::formatter::Record;
use crate::level::Level;

/// `with_section`이 설정하는 필드 키
pub const SECTION_KEY: &str = "section";

/// 구조화된 로거
#[derive(Clone)]
pub struct Logger {
    backend: Arc<dyn LogBackend>,
    level: Level,
    prefix: Arc<[String]>,
    fields: Arc<Fields>,
    include_caller: bool,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("prefix", &self.prefix())
            .field("fields", &self.fields)
            .field("include_caller", &self.include_caller)
            .finish()
    }
}

impl Logger {
    /// 백엔드와 최소 레벨로 루트 로거 생성
    pub fn new(backend: Arc<dyn LogBackend>, level: Level) -> Self {
        Self {
            backend,
            level,
            prefix: Arc::from(Vec::new()),
            fields: Arc::new(Fields::new()),
            include_caller: false,
        }
    }

    /// 설정으로부터 순환 파일 백엔드를 가진 루트 로거 생성
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(Arc::new(SinkBackend::rotating(config)), config.level)
            .with_caller_marker(config.include_caller)
    }

    /// 메시지 앞에 `[file:line] ` 표시 여부 설정
    ///
    /// 초기화 시점의 설정 스위치이며 호출 단위 옵션이 아닙니다.
    pub fn with_caller_marker(mut self, enabled: bool) -> Self {
        self.include_caller = enabled;
        self
    }

    pub fn includes_caller(&self) -> bool {
        self.include_caller
    }

    /// 접두사를 덧붙인 자식 로거
    pub fn with_prefix(&self, name: impl Into<String>) -> Logger {
        let mut prefix = self.prefix.to_vec();
        prefix.push(name.into());
        Logger {
            prefix: Arc::from(prefix),
            ..self.clone()
        }
    }

    /// 점으로 이어진 접두사 체인 (없으면 빈 문자열)
    pub fn prefix(&self) -> String {
        self.prefix.join(".")
    }

    /// `section=<name>` 필드를 병합한 자식 로거
    pub fn with_section(&self, name: impl Into<String>) -> Logger {
        let name: String = name.into();
        self.with_fields(Fields::single(SECTION_KEY, name))
    }

    /// 항상 빈 문자열
    ///
    /// `with_section`으로 설정한 값은 `fields()`의 `section` 키로만 확인할 수 있습니다.
    pub fn section(&self) -> String {
        String::new()
    }

    /// 필드를 병합한 자식 로거 (같은 키는 새 값으로 덮어씀)
    pub fn with_fields(&self, fields: impl Into<Fields>) -> Logger {
        Logger {
            fields: Arc::new(self.fields.merge(&fields.into())),
            ..self.clone()
        }
    }

    /// 현재 필드 집합
    pub fn fields(&self) -> Fields {
        self.fields.as_ref().clone()
    }

    /// 아무 효과 없음
    ///
    /// 최소 레벨은 생성 시점에 고정됩니다.
    pub fn set_level(&self, _level: Level) {}

    /// 설정된 최소 레벨
    pub fn level(&self) -> Level {
        self.level
    }

    /// 해당 레벨 호출이 실제로 출력되는지 여부
    pub fn is_enabled(&self, level: Level) -> bool {
        self.level.permits(level) && self.backend.enabled(level.severity())
    }

    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        self.emit(Level::Info, message);
    }

    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    #[track_caller]
    pub fn println(&self, message: impl fmt::Display) {
        self.emit(Level::Info, message);
    }

    #[track_caller]
    pub fn trace(&self, message: impl fmt::Display) {
        self.emit(Level::Trace, message);
    }

    #[track_caller]
    pub fn tracef(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Trace, args);
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(Level::Debug, message);
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.emit(Level::Info, message);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.emit(Level::Warn, message);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.emit(Level::Error, message);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    /// 기록 후 프로세스 종료 (종료 코드 1)
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        self.emit(Level::Fatal, message);
        self.backend.flush();
        std::process::exit(1)
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(args)
    }

    /// 기록 후 같은 메시지로 패닉
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        let message = message.to_string();
        self.emit(Level::Panic, &message);
        self.backend.flush();
        panic!("{}", message)
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.panic(args)
    }

    #[track_caller]
    fn emit(&self, level: Level, message: impl fmt::Display) {
        if !self.is_enabled(level) {
            return;
        }

        let location = Location::caller();
        let caller = format!("{}:{}", short_file(location.file()), location.line());

        let message = if self.include_caller {
            format!("[{}] {}", caller, message)
        } else {
            message.to_string()
        };

        let mut record = Record::new(level.severity(), message)
            .with_logger(self.prefix())
            .with_caller(caller)
            .with_fields(self.fields());

        if matches!(level, Level::Panic | Level::Fatal) {
            record = record.with_stacktrace(Backtrace::force_capture().to_string());
        }

        self.backend.write(&record);
    }
}

impl HasFields for Logger {
    fn fields(&self) -> Fields {
        Logger::fields(self)
    }
}

/// 자체 로거를 가진 타입
///
/// `add_fields_from(&base, &[thing.log()])`처럼 범위 로거의 필드를 옮길 때 사용합니다.
pub trait Loggable {
    fn log(&self) -> &Logger;
}

/// 여러 필드 제공자의 필드를 순서대로 병합한 로거
///
/// 뒤에 오는 제공자의 값이 앞의 값을 덮어씁니다.
pub fn add_fields_from(logger: &Logger, sources: &[&dyn HasFields]) -> Logger {
    sources
        .iter()
        .fold(logger.clone(), |acc, source| acc.with_fields(source.fields()))
}

/// 경로의 마지막 구성 요소
pub(crate) fn short_file(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::level::Severity;
    use serde_json::json;

    fn memory_logger(level: Level) -> (Logger, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new(level.severity()));
        let logger = Logger::new(backend.clone(), level);
        (logger, backend)
    }

    #[test]
    fn test_prefix_chain() {
        let (root, _) = memory_logger(Level::Info);
        assert_eq!(root.prefix(), "");

        let child = root.with_prefix("a").with_prefix("b");
        assert_eq!(child.prefix(), "a.b");
        // 부모는 그대로
        assert_eq!(root.prefix(), "");
    }

    #[test]
    fn test_fields_overwrite() {
        let (root, _) = memory_logger(Level::Info);
        let logger = root
            .with_fields(Fields::single("k", "1"))
            .with_fields(Fields::single("k", "2"));
        assert_eq!(logger.fields().get("k"), Some(&json!("2")));

        let again = logger.with_fields(Fields::single("k", "2"));
        assert_eq!(again.fields(), logger.fields());
        assert!(root.fields().is_empty());
    }

    #[test]
    fn test_section_sets_field_but_accessor_is_empty() {
        let (root, backend) = memory_logger(Level::Info);
        let logger = root.with_section("matchmaking").with_section("lobby");

        assert_eq!(logger.section(), "");
        assert_eq!(logger.fields().get(SECTION_KEY), Some(&json!("lobby")));

        logger.info("joined");
        let records = backend.records();
        assert_eq!(records[0].fields.get(SECTION_KEY), Some(&json!("lobby")));
    }

    #[test]
    fn test_warn_level_suppresses_info() {
        let (logger, backend) = memory_logger(Level::Warn);

        logger.info("hidden");
        logger.debug("hidden");
        logger.warn("shown");
        logger.error("shown too");

        let messages: Vec<String> = backend.records().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["shown", "shown too"]);
    }

    #[test]
    fn test_more_severe_levels_are_emitted() {
        for configured in [Level::Debug, Level::Info, Level::Warn, Level::Error] {
            let (logger, backend) = memory_logger(configured);
            logger.error("e");
            logger.warn("w");
            logger.info("i");
            logger.debug("d");

            let expected = [Level::Error, Level::Warn, Level::Info, Level::Debug]
                .iter()
                .filter(|call| **call <= configured)
                .count();
            assert_eq!(backend.len(), expected, "configured {configured}");
        }
    }

    #[test]
    fn test_trace_only_at_trace_level() {
        let (debug_logger, debug_backend) = memory_logger(Level::Debug);
        debug_logger.trace("nope");
        debug_logger.tracef(format_args!("nope {}", 1));
        assert!(debug_backend.is_empty());

        let (trace_logger, trace_backend) = memory_logger(Level::Trace);
        trace_logger.trace("yes");
        let records = trace_backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Debug);
    }

    #[test]
    fn test_formatted_variants() {
        let (logger, backend) = memory_logger(Level::Debug);
        logger.infof(format_args!("player {} joined room {}", "kim", 7));
        logger.printf(format_args!("{}+{}", 1, 2));

        let records = backend.records();
        assert_eq!(records[0].message, "player kim joined room 7");
        assert_eq!(records[1].message, "1+2");
        assert_eq!(records[1].severity, Severity::Info);
    }

    #[test]
    fn test_record_carries_name_caller_and_fields() {
        let (root, backend) = memory_logger(Level::Info);
        let logger = root.with_prefix("tcp").with_fields(Fields::single("room", 3));

        let line = line!() + 1;
        logger.info("hello");

        let record = &backend.records()[0];
        assert_eq!(record.logger, "tcp");
        assert_eq!(record.caller.as_deref(), Some(format!("logger.rs:{}", line).as_str()));
        assert_eq!(record.fields.get("room"), Some(&json!(3)));
        assert_eq!(record.message, "hello");
        assert!(record.stacktrace.is_none());
    }

    #[test]
    fn test_caller_marker() {
        let (root, backend) = memory_logger(Level::Info);

        root.info("plain");
        let tagged = root.with_caller_marker(true);
        let line = line!() + 1;
        tagged.info("tagged");

        let records = backend.records();
        assert_eq!(records[0].message, "plain");
        assert_eq!(records[1].message, format!("[logger.rs:{}] tagged", line));
    }

    #[test]
    fn test_set_level_has_no_effect() {
        let (logger, backend) = memory_logger(Level::Error);
        logger.set_level(Level::Debug);
        assert_eq!(logger.level(), Level::Error);

        logger.info("still hidden");
        assert!(backend.is_empty());
    }

    #[test]
    fn test_panic_logs_then_panics() {
        let (logger, backend) = memory_logger(Level::Info);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panicf(format_args!("invariant broken: {}", 42));
        }));

        let payload = result.expect_err("panic expected");
        let message = payload.downcast_ref::<String>().cloned().unwrap_or_default();
        assert_eq!(message, "invariant broken: 42");

        let records = backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Panic);
        assert!(records[0].stacktrace.is_some());
    }

    #[test]
    fn test_add_fields_from() {
        struct Session {
            logger: Logger,
        }

        impl Loggable for Session {
            fn log(&self) -> &Logger {
                &self.logger
            }
        }

        let (root, _) = memory_logger(Level::Info);
        let session = Session {
            logger: root.with_fields(Fields::from([("session_id", json!("s-1")), ("k", json!("a"))])),
        };
        let extra = Fields::single("k", "b");

        let logger = add_fields_from(&root, &[session.log(), &extra]);
        let fields = logger.fields();
        assert_eq!(fields.get("session_id"), Some(&json!("s-1")));
        assert_eq!(fields.get("k"), Some(&json!("b")));
    }

    #[test]
    fn test_short_file() {
        assert_eq!(short_file("src/net/session.rs"), "session.rs");
        assert_eq!(short_file("C:\\game\\main.rs"), "main.rs");
        assert_eq!(short_file("lib.rs"), "lib.rs");
    }
}
