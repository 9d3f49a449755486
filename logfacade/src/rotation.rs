//! 로그 파일 순환 및 보관 관리
//!
//! 활성 로그 파일이 최대 크기를 넘으면 타임스탬프가 붙은 백업 파일로 옮기고
//! 새 파일을 엽니다. 순환 후에는 압축(선택)과 보관 정책(개수, 일수)을 적용합니다.
//!
//! 백업 파일 이름은 `<name>-<YYYY-MM-DDTHH-MM-SS.mmm>.log` 형식이며
//! 압축 시 `.gz`가 추가됩니다.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::config::ResolvedConfig;
use crate::error::{LogError, LogResult};

/// 백업 파일 이름에 쓰이는 타임스탬프 형식
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const COMPRESS_SUFFIX: &str = ".gz";

/// 순환 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// 순환 기준 크기 (바이트)
    pub max_size: u64,
    /// 보관할 백업 개수
    pub max_backups: usize,
    /// 보관 일수
    pub max_age_days: u64,
    /// 백업 gzip 압축 여부
    pub compress: bool,
}

impl RotationPolicy {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            max_size: config.max_size_bytes(),
            max_backups: config.max_backups,
            max_age_days: config.max_age_days,
            compress: config.compress,
        }
    }
}

/// 백업 파일 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub path: PathBuf,
    pub timestamp: NaiveDateTime,
    pub compressed: bool,
}

#[derive(Default)]
struct SinkState {
    file: Option<File>,
    size: u64,
}

/// 크기 기반 순환 파일 싱크
///
/// 복제한 핸들은 같은 파일과 잠금을 공유하며, 쓰기는 내부 잠금으로 직렬화됩니다.
/// 파일은 첫 쓰기 시점에 열립니다.
#[derive(Clone)]
pub struct RotatingSink {
    path: PathBuf,
    policy: RotationPolicy,
    state: Arc<Mutex<SinkState>>,
}

impl RotatingSink {
    /// 새 순환 싱크 생성 (파일은 아직 열지 않음)
    pub fn new<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            policy,
            state: Arc::new(Mutex::new(SinkState::default())),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(&config.file_path, RotationPolicy::from_config(config))
    }

    /// 활성 로그 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// 바이트 쓰기
    ///
    /// 현재 파일에 더 쓰면 최대 크기를 넘는 경우 먼저 순환합니다.
    /// 비어 있는 파일에는 크기와 상관없이 씁니다.
    pub fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock();
        let incoming = buf.len() as u64;

        if state.file.is_none() {
            self.open_existing_or_new(&mut state, incoming)?;
        }

        if state.size > 0 && state.size + incoming > self.policy.max_size {
            self.rotate_locked(&mut state)?;
        }

        let file = state
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "로그 파일이 열려 있지 않음"))?;
        let written = file.write(buf)?;
        state.size += written as u64;
        Ok(written)
    }

    /// 즉시 순환
    pub fn rotate(&self) -> LogResult<()> {
        let mut state = self.state.lock();
        self.rotate_locked(&mut state)
            .map_err(|e| LogError::io(&self.path, e))
    }

    /// 열린 파일 플러시
    pub fn sync(&self) -> LogResult<()> {
        self.flush_file().map_err(|e| LogError::io(&self.path, e))
    }

    fn flush_file(&self) -> io::Result<()> {
        let mut state = self.state.lock();
        match state.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    /// 현재 남아 있는 백업 목록 (최신순)
    pub fn backups(&self) -> LogResult<Vec<Backup>> {
        let dir = self.dir();
        let (stem, ext) = self.name_parts();

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LogError::io(dir, e)),
        };

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LogError::io(&dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if let Some(backup) = parse_backup_name(name, &stem, &ext) {
                backups.push(Backup {
                    path: path.clone(),
                    timestamp: backup.0,
                    compressed: backup.1,
                });
            }
        }

        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(backups)
    }

    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// 파일 이름을 (stem, ".ext")로 분리
    fn name_parts(&self) -> (String, String) {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("log")
            .to_string();
        let ext = self
            .path
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        (stem, ext)
    }

    fn backup_path(&self, timestamp: DateTime<Utc>) -> PathBuf {
        let (stem, ext) = self.name_parts();
        let name = format!("{}-{}{}", stem, timestamp.format(BACKUP_TIME_FORMAT), ext);
        self.dir().join(name)
    }

    /// 기존 파일을 이어 쓰거나, 꽉 찼으면 순환 후 새 파일을 엶
    fn open_existing_or_new(&self, state: &mut SinkState, incoming: u64) -> io::Result<()> {
        fs::create_dir_all(self.dir())?;

        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() == 0 || meta.len() + incoming <= self.policy.max_size => {
                let file = OpenOptions::new().append(true).open(&self.path)?;
                state.file = Some(file);
                state.size = meta.len();
                self.apply_retention();
                Ok(())
            }
            Ok(_) => self.rotate_locked(state),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.open_new(state)?;
                self.apply_retention();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn open_new(&self, state: &mut SinkState) -> io::Result<()> {
        fs::create_dir_all(self.dir())?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        state.file = Some(file);
        state.size = 0;
        Ok(())
    }

    fn rotate_locked(&self, state: &mut SinkState) -> io::Result<()> {
        state.file = None;

        let mut rotated = None;
        if self.path.exists() {
            let backup = self.unused_backup_path();
            fs::rename(&self.path, &backup)?;
            debug!(
                old_path = %self.path.display(),
                new_path = %backup.display(),
                "로그 파일 순환 완료"
            );
            rotated = Some(backup);
        }

        self.open_new(state)?;

        if let Some(backup) = rotated {
            if self.policy.compress {
                if let Err(e) = compress_file(&backup) {
                    error!(error = %e, "순환 파일 압축 실패");
                }
            }
        }
        self.apply_retention();
        Ok(())
    }

    /// 같은 밀리초에 여러 번 순환해도 이름이 겹치지 않도록 조정
    fn unused_backup_path(&self) -> PathBuf {
        let mut timestamp = Utc::now();
        loop {
            let candidate = self.backup_path(timestamp);
            let mut compressed = candidate.clone().into_os_string();
            compressed.push(COMPRESS_SUFFIX);
            if !candidate.exists() && !Path::new(&compressed).exists() {
                return candidate;
            }
            timestamp += Duration::milliseconds(1);
        }
    }

    /// 보관 정책 적용 (개수 초과, 기간 초과 백업 삭제)
    fn apply_retention(&self) {
        let backups = match self.backups() {
            Ok(backups) => backups,
            Err(e) => {
                warn!(error = %e, "백업 목록 읽기 실패");
                return;
            }
        };

        let cutoff = retention_cutoff(Utc::now(), self.policy.max_age_days);

        for (index, backup) in backups.iter().enumerate() {
            let too_many = index >= self.policy.max_backups;
            let too_old = cutoff.is_some_and(|cutoff| backup.timestamp < cutoff);
            if !too_many && !too_old {
                continue;
            }

            match fs::remove_file(&backup.path) {
                Ok(()) => debug!(path = %backup.path.display(), "오래된 로그 파일 삭제됨"),
                Err(e) => warn!(
                    path = %backup.path.display(),
                    error = %e,
                    "로그 파일 삭제 실패"
                ),
            }
        }
    }
}

impl Write for &RotatingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_file()
    }
}

impl Write for RotatingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_file()
    }
}

/// 보관 기간 기준 시각
///
/// 0일이거나 표현할 수 없을 만큼 긴 기간이면 `None`이며, 기간 기준 삭제를 하지 않습니다.
fn retention_cutoff(now: DateTime<Utc>, max_age_days: u64) -> Option<NaiveDateTime> {
    if max_age_days == 0 {
        return None;
    }
    i64::try_from(max_age_days)
        .ok()
        .and_then(Duration::try_days)
        .and_then(|age| now.checked_sub_signed(age))
        .map(|cutoff| cutoff.naive_utc())
}

/// 백업 파일 이름 해석 → (타임스탬프, 압축 여부)
fn parse_backup_name(name: &str, stem: &str, ext: &str) -> Option<(NaiveDateTime, bool)> {
    let rest = name.strip_prefix(stem)?.strip_prefix('-')?;
    let (rest, compressed) = match rest.strip_suffix(COMPRESS_SUFFIX) {
        Some(rest) => (rest, true),
        None => (rest, false),
    };
    let timestamp = rest.strip_suffix(ext)?;
    let parsed = NaiveDateTime::parse_from_str(timestamp, BACKUP_TIME_FORMAT).ok()?;
    Some((parsed, compressed))
}

/// 파일을 gzip으로 압축한 뒤 원본 삭제
fn compress_file(path: &Path) -> LogResult<PathBuf> {
    let mut target = path.to_path_buf().into_os_string();
    target.push(COMPRESS_SUFFIX);
    let target = PathBuf::from(target);

    let mut source = File::open(path).map_err(|e| LogError::compress(path, e))?;
    let output = File::create(&target).map_err(|e| LogError::compress(&target, e))?;

    let mut encoder = GzEncoder::new(output, Compression::default());
    let written = io::copy(&mut source, &mut encoder).and_then(|_| encoder.finish());
    if let Err(e) = written {
        // 원본은 남아 있으므로 불완전한 압축본만 정리
        let _ = fs::remove_file(&target);
        return Err(LogError::compress(&target, e));
    }

    fs::remove_file(path).map_err(|e| LogError::io(path, e))?;
    Ok(target)
}
