//! 전역 로거 통합 테스트
//!
//! 전역 상태를 공유하므로 설치/교체 흐름은 하나의 테스트에서 순서대로 확인합니다.

use anyhow::Result;
use logfacade::{
    add_fields_from, init_logger, is_configured, log_info, log_warn, logger, Encoding, Fields,
    LoggerConfig,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_global_logger_lifecycle() -> Result<()> {
    // 초기화 전: 실패 없이 표준 출력으로 대체
    assert!(!is_configured());
    assert!(logger().is_none());
    logfacade::info("초기화 전 메시지");
    logfacade::warnf(format_args!("초기화 전 {}", 1));
    log_info!("초기화 전 매크로 {}", 2);

    // 1단계: warn 레벨, 호출 위치 표시
    let first_dir = TempDir::new()?;
    let config = LoggerConfig {
        level: "warn".to_string(),
        caller: 1,
        ..LoggerConfig::new(first_dir.path().to_string_lossy(), "game")
    };
    let root = init_logger(&config);
    let first_file = first_dir.path().join("game.log");

    assert!(is_configured());
    assert!(root.includes_caller());
    // 첫 기록 전에는 파일을 만들지 않음
    assert!(!first_file.exists());

    logfacade::info("걸러지는 정보");
    let warn_line = line!() + 1;
    logfacade::warn("방 인원 초과");
    logfacade::errorf(format_args!("매칭 실패 {}회", 3));

    let content = fs::read_to_string(&first_file)?;
    assert!(!content.contains("걸러지는 정보"));
    assert!(content.contains(&format!("[global_logger_test.rs:{}] 방 인원 초과", warn_line)));
    assert!(content.contains("매칭 실패 3회"));
    assert_eq!(content.lines().count(), 2);

    // 전역 로거에서 파생한 로거
    let room = logger()
        .expect("Test assertion failed")
        .with_prefix("room")
        .with_section("lobby")
        .with_fields(Fields::single("room_id", 42));
    assert_eq!(room.prefix(), "room");
    assert_eq!(room.section(), "");
    log_warn!(room, "대기열 {}명", 8);

    let content = fs::read_to_string(&first_file)?;
    let last = content.lines().last().expect("Test assertion failed");
    assert!(last.contains("\troom\t"));
    assert!(last.contains("대기열 8명"));
    assert!(last.contains("\"room_id\":42"));
    assert!(last.contains("\"section\":\"lobby\""));

    let merged = add_fields_from(&root, &[&room, &Fields::single("player", "p1")]);
    assert_eq!(merged.fields().len(), 3);

    // 2단계: 재초기화 (trace, JSON, 호출 위치 미표시)
    let second_dir = TempDir::new()?;
    let config = LoggerConfig {
        level: "trace".to_string(),
        format: Encoding::Json,
        ..LoggerConfig::new(second_dir.path().to_string_lossy(), "game")
    };
    init_logger(&config);
    let second_file = second_dir.path().join("game.log");

    logfacade::trace("상세 추적");
    logfacade::debug("디버그");
    logfacade::println("일반 출력");

    let lines: Vec<serde_json::Value> = fs::read_to_string(&second_file)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 3);
    // Trace는 백엔드에서 Debug로 기록
    assert_eq!(lines[0]["L"], "DEBUG");
    assert_eq!(lines[0]["M"], "상세 추적");
    assert_eq!(lines[2]["L"], "INFO");
    assert!(lines[2]["C"]
        .as_str()
        .expect("Test assertion failed")
        .starts_with("global_logger_test.rs:"));

    // 이전 로거의 파일은 더 이상 바뀌지 않음
    let before = fs::read_to_string(&first_file)?;
    logfacade::error("교체 후 오류");
    assert_eq!(fs::read_to_string(&first_file)?, before);

    Ok(())
}
