//! 통계 및 유틸리티 모듈
//!
//! 추출 통계 수집 및 포맷팅을 담당합니다.
//! 표준 출력은 JSON 문서 전용이므로 요약은 표준 에러로 출력합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

/// 추출 통계 구조체
#[derive(Debug)]
pub struct Statistics {
    /// 조건에 맞는 항목 수
    pub matched_entries: usize,
    /// 추출된 레코드 수
    pub extracted: usize,
    /// 읽은 압축 바이트
    pub compressed_bytes: u64,
    /// 압축 해제된 바이트
    pub decompressed_bytes: u64,
    /// 출력한 바이트
    pub output_bytes: u64,
    start_time: Instant,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(matched_entries: usize) -> Self {
        Self {
            matched_entries,
            extracted: 0,
            compressed_bytes: 0,
            decompressed_bytes: 0,
            output_bytes: 0,
            start_time: Instant::now(),
        }
    }

    /// 레코드 하나 추출 기록
    pub fn record_entry(&mut self, compressed: u64, decompressed: u64) {
        self.extracted += 1;
        self.compressed_bytes += compressed;
        self.decompressed_bytes += decompressed;
    }

    /// 출력 바이트 기록
    pub fn record_output(&mut self, bytes: u64) {
        self.output_bytes += bytes;
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 추출 통계 요약 출력
    pub fn print_summary(&self) {
        eprintln!("\n{}", "═".repeat(50).bright_blue());
        eprintln!("{}", " 📊 추출 통계".bright_white().bold());
        eprintln!("{}", "═".repeat(50).bright_blue());

        eprintln!(
            "  {} 대상 레시피:  {}",
            "📁".bright_cyan(),
            self.matched_entries
        );
        eprintln!(
            "  {} 추출:         {}",
            "✅".bright_green(),
            self.extracted.to_string().green()
        );
        eprintln!(
            "  {} 압축 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(self.compressed_bytes)
        );
        eprintln!(
            "  {} 해제 용량:    {}",
            "📦".bright_yellow(),
            format_bytes(self.decompressed_bytes)
        );
        eprintln!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.output_bytes)
        );
        eprintln!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        eprintln!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use paprika_extract::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
