//! 로깅 초기화 모듈
//!
//! 표준 출력은 JSON 문서 전용이므로 로그는 모두 표준 에러로 보냅니다.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 기본 로그 필터
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else if verbose {
        "paprika_extract=debug,warn"
    } else {
        "paprika_extract=info,warn"
    }
}

/// CLI용 로거 초기화 (`RUST_LOG`가 있으면 우선)
pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
