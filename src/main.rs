//! paprika-extract - PAPRIKA RECIPE FIELD EXTRACTOR
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::ExitCode;

use paprika_extract::{
    cli::{normalize_legacy_args, Args},
    error::ExtractError,
    logger,
    output::{render, write_document, OutputTarget},
    pipeline::{extract_from, open_source},
};

fn main() -> ExitCode {
    let args = Args::parse_from(normalize_legacy_args(std::env::args_os()));

    logger::init_logger(args.verbose, args.quiet);

    // 필수 입력 확인 (안내만 하고 정상 종료)
    let input = match args.validated_input() {
        Ok(input) => input,
        Err(message) => {
            println!("{}", message.yellow());
            return ExitCode::SUCCESS;
        }
    };

    match run(&args, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{} {:#}", "❌".bright_red(), err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// 추출 실행
fn run(args: &Args, input: &Path) -> Result<()> {
    let options = args.extract_options();
    let target = args.output_target();

    if !args.quiet {
        print_header(args, input, &target);
    }

    let mut source = open_source(input, &options).context("입력 열기 실패")?;
    tracing::info!(kind = %source.kind(), entries = source.len(), "레시피 항목 탐색 완료");

    if source.is_empty() {
        tracing::warn!("추출할 레시피 항목이 없습니다");
    }

    // 드라이런 모드
    if args.dry_run {
        let names = source.entry_names().context("항목 목록 읽기 실패")?;
        print_dry_run(&names);
        return Ok(());
    }

    let pb = create_progress_bar(source.len(), args.quiet)?;

    let mut extraction = extract_from(&mut source, &options, |info| {
        pb.inc(1);
        if args.verbose {
            pb.suspend(|| eprintln!("  {} {}", "✓".green(), info.name));
        }
    })
    .context("레시피 추출 실패")?;

    pb.finish_with_message("완료!");
    drop(source);

    let document = render(&extraction.records)?;
    write_document(&target, &document)?;
    extraction.stats.record_output(document.len() as u64);

    if !args.quiet {
        extraction.stats.print_summary();
        if let OutputTarget::File(path) = &target {
            eprintln!("\n{} 저장 완료: {:?}\n", "✅".bright_green(), path);
        }
    }

    Ok(())
}

/// 에러에 대응하는 종료 코드
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ExtractError>()
        .map(ExtractError::exit_code)
        .unwrap_or(1)
}

/// 헤더 출력
fn print_header(args: &Args, input: &Path, target: &OutputTarget) {
    eprintln!("\n{}", "═".repeat(50).bright_blue());
    eprintln!(
        "{}",
        " 🍲 PAPRIKA RECIPE FIELD EXTRACTOR".bright_white().bold()
    );
    eprintln!("{}", "═".repeat(50).bright_blue());
    eprintln!("  {} 입력: {:?}", "📂".bright_cyan(), input);
    eprintln!("  {} 출력: {}", "📄".bright_green(), target);
    eprintln!(
        "  {} 필드: {} (키 순서: {})",
        "🎯".bright_cyan(),
        args.get_fields().join(", "),
        args.key_order
    );

    if let Some(ref pattern) = args.pattern {
        eprintln!("  {} 패턴 필터: {}", "🔍".bright_magenta(), pattern);
    }

    if let Some(depth) = args.max_depth {
        eprintln!("  {} 최대 깊이: {}", "📏".bright_white(), depth);
    }

    if args.dry_run {
        eprintln!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 추출 없음)".yellow()
        );
    }

    eprintln!("{}", "═".repeat(50).bright_blue());
}

/// 드라이런 출력
fn print_dry_run(names: &[String]) {
    println!("\n{}", "📋 처리 예정 항목 목록:".bright_cyan());
    for (i, name) in names.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }
    println!(
        "\n{} 총 {} 개의 레시피가 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        names.len().to_string().bright_green()
    );
}

/// 진행률 바 생성 (표준 에러에 그림)
fn create_progress_bar(total: usize, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")?
            .progress_chars("█▓▒░"),
    );
    Ok(pb)
}
