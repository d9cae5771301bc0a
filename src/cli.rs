//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.
//! 기존 스크립트 호환을 위해 `-input`, `-fields`, `-outputFile` 같은
//! 한 줄 대시 긴 옵션도 받아들입니다.

use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::output::OutputTarget;
use crate::pipeline::{parse_fields, ExtractOptions, DEFAULT_FIELDS};
use crate::recipe::KeyOrder;

/// 한 줄 대시로 쓰이던 긴 옵션과 대응하는 clap 옵션
const LEGACY_FLAGS: [(&str, &str); 3] = [
    ("input", "--input"),
    ("fields", "--fields"),
    ("outputFile", "--output-file"),
];

/// paprika-extract CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "paprika-extract",
    author = "YourName <your@email.com>",
    version,
    about = "Paprika 레시피 내보내기에서 원하는 필드만 추출해 하나의 JSON 문서로 모으는 CLI 도구",
    long_about = r#"
PAPRIKA RECIPE FIELD EXTRACTOR
==============================

.paprikarecipe 파일이 들어 있는 폴더 또는 .paprikarecipes 아카이브에서
각 레시피의 gzip을 풀고 지정한 최상위 필드만 골라
하나의 JSON 배열로 출력합니다.

특징:
  • 폴더 재귀 탐색 / 아카이브 항목 순회
  • 없는 필드는 생략 (null로 채우지 않음)
  • 오류가 하나라도 있으면 아무것도 출력하지 않고 중단
  • 출력 파일을 지정하지 않으면 표준 출력

예제:
  paprika-extract -i ./recipes
  paprika-extract -i "My Recipes.paprikarecipes" -o recipes.json
  paprika-extract -i ./recipes --fields "name,categories,rating" --key-order fields
  paprika-extract -input export.paprikarecipes -outputFile out.json
"#
)]
pub struct Args {
    /// .paprikarecipe 파일 폴더 또는 .paprikarecipes 아카이브 경로
    #[arg(short, long)]
    pub input: Option<String>,

    /// 추출할 필드 (쉼표로 구분)
    #[arg(short, long, default_value = DEFAULT_FIELDS)]
    pub fields: String,

    /// 결과를 쓸 파일 경로 (기본값: 표준 출력)
    #[arg(short, long = "output-file", visible_alias = "outputFile")]
    pub output_file: Option<String>,

    /// 출력 레코드의 키 순서
    #[arg(long, value_enum, default_value_t = KeyOrder::Source)]
    pub key_order: KeyOrder,

    /// 레시피 파일 이름 패턴 필터 (glob 형식, 예: "*Soup*")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 최대 폴더 탐색 깊이
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// 추출 없이 처리될 항목 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 상세 출력 모드
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// 헤더, 진행률, 통계를 출력하지 않음
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// 필드 목록을 파싱하여 벡터로 반환
    pub fn get_fields(&self) -> Vec<String> {
        parse_fields(&self.fields)
    }

    /// 비어 있지 않은 입력 경로
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Path::new)
    }

    /// 출력 대상
    pub fn output_target(&self) -> OutputTarget {
        OutputTarget::from_path(self.output_file.as_ref().map(PathBuf::from))
    }

    /// 필수 입력 확인
    ///
    /// 입력 경로와 필드가 모두 있으면 입력 경로를, 하나라도 빠졌으면
    /// 사용자에게 보여줄 안내 문구를 반환합니다.
    pub fn validated_input(&self) -> std::result::Result<&Path, &'static str> {
        let input = self
            .input_path()
            .ok_or("-input (또는 --input) 옵션으로 입력 경로를 지정해 주세요")?;

        if self.get_fields().is_empty() {
            return Err("-fields (또는 --fields) 옵션으로 추출할 필드를 지정해 주세요");
        }

        Ok(input)
    }

    /// 추출 옵션 생성
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::new()
            .with_fields(self.get_fields())
            .with_key_order(self.key_order)
            .with_pattern(self.pattern.clone())
            .with_max_depth(self.max_depth)
    }
}

/// 한 줄 대시 긴 옵션을 clap이 이해하는 형태로 변환
///
/// `-input x`, `-input=x` 모두 처리하며 `--` 이후 인자는 건드리지 않습니다.
///
/// # Examples
/// ```
/// use paprika_extract::cli::normalize_legacy_args;
///
/// let args = normalize_legacy_args(["paprika-extract", "-input=a", "-outputFile", "b"]);
/// assert_eq!(args, ["paprika-extract", "--input=a", "--output-file", "b"]);
/// ```
pub fn normalize_legacy_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            match arg.to_str().and_then(rewrite_legacy_flag) {
                Some(rewritten) => OsString::from(rewritten),
                None => arg,
            }
        })
        .collect()
}

fn rewrite_legacy_flag(arg: &str) -> Option<String> {
    let body = arg.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }

    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let (_, long) = LEGACY_FLAGS.iter().find(|(legacy, _)| *legacy == name)?;
    Some(match value {
        Some(value) => format!("{}={}", long, value),
        None => long.to_string(),
    })
}
