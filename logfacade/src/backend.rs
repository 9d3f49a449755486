//! 로그 백엔드
//!
//! 파사드가 만든 레코드를 실제 출력으로 내보내는 계층입니다.
//! 최소 심각도는 생성 시점에 고정되며 이후 변경할 수 없습니다.

use parking_lot::Mutex;
use std::io::Write;
use tracing::error;

use crate::config::ResolvedConfig;
use crate::formatter::{Record, RecordFormatter};
use crate::level::Severity;
use crate::rotation::RotatingSink;

/// 구조화된 로그 백엔드
pub trait LogBackend: Send + Sync {
    /// 해당 심각도의 레코드를 기록하는지 여부
    fn enabled(&self, severity: Severity) -> bool;

    /// 레코드 기록
    ///
    /// 출력 실패는 호출자에게 전달하지 않습니다.
    fn write(&self, record: &Record);

    /// 버퍼링된 출력 비우기
    fn flush(&self) {}
}

/// 쓰기 대상에 포맷된 줄을 기록하는 백엔드
pub struct SinkBackend {
    min: Severity,
    formatter: RecordFormatter,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl SinkBackend {
    pub fn new<W>(writer: W, min: Severity, formatter: RecordFormatter) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            min,
            formatter,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// 설정에 맞는 순환 파일 싱크를 대상으로 하는 백엔드
    pub fn rotating(config: &ResolvedConfig) -> Self {
        Self::new(
            RotatingSink::from_config(config),
            config.severity,
            RecordFormatter::new(config.encoding),
        )
    }

    pub fn min_severity(&self) -> Severity {
        self.min
    }
}

impl LogBackend for SinkBackend {
    fn enabled(&self, severity: Severity) -> bool {
        severity >= self.min
    }

    fn write(&self, record: &Record) {
        if !self.enabled(record.severity) {
            return;
        }

        let mut line = self.formatter.format(record);
        line.push('\n');

        let mut writer = self.writer.lock();
        if let Err(e) = writer.write_all(line.as_bytes()) {
            error!(error = %e, "로그 작성 실패");
        }
    }

    fn flush(&self) {
        if let Err(e) = self.writer.lock().flush() {
            error!(error = %e, "로그 플러시 실패");
        }
    }
}

/// 메모리 내 백엔드 (테스트용)
///
/// 기록된 레코드를 그대로 보관하며, 포맷된 줄도 함께 조회할 수 있습니다.
pub struct MemoryBackend {
    min: Severity,
    formatter: RecordFormatter,
    records: Mutex<Vec<Record>>,
}

impl MemoryBackend {
    pub fn new(min: Severity) -> Self {
        Self {
            min,
            formatter: RecordFormatter::default(),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_formatter(mut self, formatter: RecordFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// 기록된 모든 레코드
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// 기록된 레코드를 포맷한 줄
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| self.formatter.format(record))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogBackend for MemoryBackend {
    fn enabled(&self, severity: Severity) -> bool {
        severity >= self.min
    }

    fn write(&self, record: &Record) {
        if self.enabled(record.severity) {
            self.records.lock().push(record.clone());
        }
    }
}
