//! 로깅 파사드 사용 예제
//!
//! `.env` 또는 환경변수(`LOG_PATH`, `LOG_NAME`, `LOG_LEVEL` 등)로 설정을 읽어
//! 전역 로거를 초기화하고, 접두사/섹션/필드를 붙인 로거로 기록합니다.
//!
//! 실행: `cargo run -p logfacade --example facade_demo`

use anyhow::Result;
use dotenv::dotenv;
use logfacade::{
    add_fields_from, init_logger, log_debug, log_info, log_warn, sprint, Fields, Loggable,
    Logger, LoggerConfig,
};
use tracing_subscriber::{fmt, EnvFilter};

/// 자체 로거를 가진 세션
struct PlayerSession {
    log: Logger,
}

impl PlayerSession {
    fn new(root: &Logger, player_id: u64) -> Self {
        Self {
            log: root
                .with_prefix("session")
                .with_fields(Fields::single("player_id", player_id)),
        }
    }
}

impl Loggable for PlayerSession {
    fn log(&self) -> &Logger {
        &self.log
    }
}

fn main() -> Result<()> {
    dotenv().ok();

    // 라이브러리 내부 진단 메시지 (경로 대체, 순환 등)
    let filter = EnvFilter::from_default_env()
        .add_directive("info".parse().map_err(|e| anyhow::anyhow!("로깅 설정 파싱 실패: {e}"))?);
    fmt().with_env_filter(filter).init();

    // 초기화 전 호출은 표준 출력으로
    logfacade::println("초기화 전 메시지");

    let mut config = LoggerConfig::from_env();
    if config.name.is_empty() {
        config.name = "demo".to_string();
    }
    if config.path.is_empty() {
        std::fs::create_dir_all("./logs")?;
        config.path = "./logs".to_string();
    }
    config.validate()?;

    let root = init_logger(&config);

    logfacade::info("서버 시작");
    logfacade::print(sprint!("접속 포트", 50051, "대기 중"));
    log_debug!("설정: {:?}", config);

    let grpc = root.with_prefix("grpc").with_section("auth");
    log_info!(grpc, "토큰 검증 {}건", 3);

    let session = PlayerSession::new(&root, 1001);
    session.log().warnf(format_args!("응답 지연 {}ms", 250));

    // 세션의 필드를 방 로거로 옮김
    let room = root
        .with_prefix("room")
        .with_fields(Fields::from([("room_id", 7)]));
    let scoped = add_fields_from(&room, &[session.log()]);
    log_warn!(scoped, "방 인원 {}/{}", 4, 4);

    logfacade::errorf(format_args!("매칭 실패: {}", "timeout"));

    println!("로그 파일: {}", config.resolve().file_path.display());
    Ok(())
}
