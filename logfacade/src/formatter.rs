//! 로그 레코드 포매터
//!
//! 한 번의 로그 호출이 만들어내는 레코드와 그 인코딩을 담당합니다.
//! 레코드 키는 기존 출력 형식을 따라 `T`(시간), `L`(레벨), `N`(로거 이름),
//! `C`(호출 위치), `M`(메시지), `S`(스택 트레이스)를 사용합니다.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::config::Encoding;
use crate::fields::Fields;
use crate::level::Severity;

pub const TIME_KEY: &str = "T";
pub const LEVEL_KEY: &str = "L";
pub const NAME_KEY: &str = "N";
pub const CALLER_KEY: &str = "C";
pub const MESSAGE_KEY: &str = "M";
pub const STACKTRACE_KEY: &str = "S";

/// ISO 8601 (밀리초, UTC)
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// 구조화된 로그 레코드
#[derive(Debug, Clone)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    /// 점으로 이어진 접두사 체인
    pub logger: String,
    /// `file.rs:line`
    pub caller: Option<String>,
    pub message: String,
    /// Panic/Fatal 레코드에만 채워짐
    pub stacktrace: Option<String>,
    pub fields: Fields,
}

impl Record {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            logger: String::new(),
            caller: None,
            message: message.into(),
            stacktrace: None,
            fields: Fields::new(),
        }
    }

    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = logger.into();
        self
    }

    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: impl Into<String>) -> Self {
        self.stacktrace = Some(stacktrace.into());
        self
    }
}

/// 레코드 포매터
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFormatter {
    encoding: Encoding,
}

impl RecordFormatter {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// 레코드를 한 줄 문자열로 변환 (줄바꿈 미포함)
    pub fn format(&self, record: &Record) -> String {
        match self.encoding {
            Encoding::Console => self.format_console(record),
            Encoding::Json => self.format_json(record),
        }
    }

    /// 탭으로 구분된 텍스트
    ///
    /// 비어 있는 이름/호출 위치는 생략하고, 필드는 끝에 JSON 객체로 붙입니다.
    /// 스택 트레이스는 다음 줄부터 이어집니다.
    fn format_console(&self, record: &Record) -> String {
        let mut parts = vec![
            record.timestamp.format(TIME_FORMAT).to_string(),
            record.severity.as_str().to_string(),
        ];

        if !record.logger.is_empty() {
            parts.push(record.logger.clone());
        }
        if let Some(caller) = &record.caller {
            parts.push(caller.clone());
        }
        parts.push(record.message.clone());

        if !record.fields.is_empty() {
            let context = serde_json::to_string(&record.fields).unwrap_or_else(|_| record.fields.render());
            parts.push(context);
        }

        let mut line = parts.join("\t");
        if let Some(stacktrace) = &record.stacktrace {
            line.push('\n');
            line.push_str(stacktrace.trim_end());
        }
        line
    }

    /// 한 줄 JSON 객체
    ///
    /// 첨부 필드는 최상위 키로 펼쳐지며, 레코드 키와 겹치면 레코드 키가 우선합니다.
    fn format_json(&self, record: &Record) -> String {
        let mut object = Map::new();

        for (k, v) in &record.fields {
            object.insert(k.clone(), v.clone());
        }

        object.insert(
            TIME_KEY.to_string(),
            Value::String(record.timestamp.format(TIME_FORMAT).to_string()),
        );
        object.insert(
            LEVEL_KEY.to_string(),
            Value::String(record.severity.as_str().to_string()),
        );
        if !record.logger.is_empty() {
            object.insert(NAME_KEY.to_string(), Value::String(record.logger.clone()));
        }
        if let Some(caller) = &record.caller {
            object.insert(CALLER_KEY.to_string(), Value::String(caller.clone()));
        }
        object.insert(MESSAGE_KEY.to_string(), Value::String(record.message.clone()));
        if let Some(stacktrace) = &record.stacktrace {
            object.insert(STACKTRACE_KEY.to_string(), Value::String(stacktrace.clone()));
        }

        Value::Object(object).to_string()
    }
}
