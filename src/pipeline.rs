//! 추출 파이프라인 모듈
//!
//! 소스 탐색, 레시피 추출, 결과 누적을 순서대로 연결합니다.

use std::path::Path;

use crate::error::Result;
use crate::filter::EntryFilter;
use crate::output::RecordCollector;
use crate::recipe::{extract_recipe, KeyOrder, Record};
use crate::source::{EntryInfo, RecipeSource, SourceOptions};
use crate::stats::Statistics;

/// 기본 추출 필드
pub const DEFAULT_FIELDS: &str = "name,categories";

/// 추출 옵션
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// 추출할 최상위 필드 목록
    pub fields: Vec<String>,
    /// 출력 레코드의 키 순서
    pub key_order: KeyOrder,
    /// 파일 이름 glob 패턴
    pub pattern: Option<String>,
    /// 최대 폴더 탐색 깊이
    pub max_depth: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fields: parse_fields(DEFAULT_FIELDS),
            key_order: KeyOrder::default(),
            pattern: None,
            max_depth: None,
        }
    }
}

impl ExtractOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드 목록 설정
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// 키 순서 설정
    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    /// 파일 이름 패턴 설정
    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern = pattern;
        self
    }

    /// 최대 탐색 깊이 설정
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn source_options(&self) -> Result<SourceOptions> {
        Ok(SourceOptions {
            filter: EntryFilter::new(self.pattern.clone())?,
            max_depth: self.max_depth,
        })
    }
}

/// 쉼표로 구분된 필드 목록 파싱
///
/// 앞뒤 공백을 제거하고 빈 항목은 버립니다. 중복은 그대로 둡니다.
///
/// # Examples
/// ```
/// use paprika_extract::pipeline::parse_fields;
///
/// assert_eq!(parse_fields("name, categories"), ["name", "categories"]);
/// assert!(parse_fields(" , ").is_empty());
/// ```
pub fn parse_fields(fields: &str) -> Vec<String> {
    fields
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// 입력 경로를 열어 추출 대상 소스를 준비
pub fn open_source(input: &Path, options: &ExtractOptions) -> Result<RecipeSource> {
    RecipeSource::open(input, &options.source_options()?)
}

/// 추출 결과
#[derive(Debug)]
pub struct Extraction {
    /// 발견 순서대로 추출된 레코드
    pub records: Vec<Record>,
    /// 처리 통계
    pub stats: Statistics,
}

/// 열린 소스의 모든 항목을 추출
///
/// `on_entry`는 항목 하나가 성공적으로 추출될 때마다 호출됩니다.
/// 한 항목이라도 실패하면 그때까지의 결과는 버려집니다.
pub fn extract_from<F>(
    source: &mut RecipeSource,
    options: &ExtractOptions,
    mut on_entry: F,
) -> Result<Extraction>
where
    F: FnMut(&EntryInfo),
{
    let mut stats = Statistics::new(source.len());
    let mut collector = RecordCollector::new();

    source.for_each_entry(|info, reader| {
        tracing::debug!(entry = %info.name, "레시피 추출");
        let (record, decompressed) =
            extract_recipe(reader, &info.name, &options.fields, options.key_order)?;
        stats.record_entry(info.compressed_size, decompressed);
        collector.push(record);
        on_entry(info);
        Ok(())
    })?;

    Ok(Extraction {
        records: collector.into_records(),
        stats,
    })
}

/// 입력 경로 하나를 끝까지 추출
pub fn extract_all(input: &Path, options: &ExtractOptions) -> Result<Extraction> {
    let mut source = open_source(input, options)?;
    tracing::info!(input = %input.display(), kind = %source.kind(), entries = source.len(), "입력 열기 완료");
    extract_from(&mut source, options, |_| {})
}
