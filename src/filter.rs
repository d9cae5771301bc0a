//! 항목 필터 모듈
//!
//! 레시피 확장자 검사와 선택적인 glob 파일 이름 필터를 함께 담당합니다.
//! 폴더 모드의 파일 경로와 아카이브 모드의 항목 이름 모두에 같은 규칙이 적용됩니다.

use glob::Pattern;
use std::ffi::OsStr;

use crate::error::{ExtractError, Result};

/// 레시피 하나를 담은 gzip 파일의 접미사
pub const RECIPE_SUFFIX: &str = ".paprikarecipe";

/// 레시피 여러 개를 담은 zip 아카이브의 접미사
pub const ARCHIVE_SUFFIX: &str = ".paprikarecipes";

/// 레시피 항목 선택 규칙
#[derive(Debug, Default)]
pub struct EntryFilter {
    pattern: Option<Pattern>,
}

impl EntryFilter {
    /// 새 항목 필터 생성
    ///
    /// # Arguments
    /// * `pattern` - 파일 이름에 적용할 glob 패턴 (None이면 접미사만 검사)
    ///
    /// # Examples
    /// ```
    /// use paprika_extract::filter::EntryFilter;
    ///
    /// let filter = EntryFilter::new(Some("Soup*".to_string())).unwrap();
    /// assert!(filter.matches("recipes/Soup.paprikarecipe"));
    /// assert!(!filter.matches("recipes/Cake.paprikarecipe"));
    /// assert!(!filter.matches("recipes/Soup.json"));
    /// ```
    pub fn new(pattern: Option<String>) -> Result<Self> {
        let compiled = match pattern {
            Some(ref p) => Some(
                Pattern::new(p)
                    .map_err(|_| ExtractError::InvalidPattern { pattern: p.clone() })?,
            ),
            None => None,
        };

        Ok(Self { pattern: compiled })
    }

    /// 경로 또는 아카이브 항목 이름이 추출 대상인지 확인
    ///
    /// 아카이브 항목 이름은 항상 `/` 구분자를 쓰므로 두 구분자 모두 처리합니다.
    pub fn matches(&self, name: &str) -> bool {
        self.matches_file_name(OsStr::new(file_name_of(name)))
    }

    /// 파일 시스템 이름(마지막 구성 요소)이 추출 대상인지 확인
    ///
    /// UTF-8이 아닌 이름도 접미사는 바이트 단위로 검사합니다.
    /// glob 패턴은 손실 변환한 이름에 적용합니다.
    pub fn matches_file_name(&self, file_name: &OsStr) -> bool {
        if !has_suffix(file_name, RECIPE_SUFFIX) {
            return false;
        }

        match &self.pattern {
            Some(p) => p.matches(&file_name.to_string_lossy()),
            None => true,
        }
    }
}

fn has_suffix(file_name: &OsStr, suffix: &str) -> bool {
    file_name.as_encoded_bytes().ends_with(suffix.as_bytes())
}

/// 경로 문자열의 마지막 구성 요소
fn file_name_of(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// 입력 파일 이름이 레시피 아카이브인지 확인
pub fn is_archive_name(file_name: &OsStr) -> bool {
    has_suffix(file_name, ARCHIVE_SUFFIX)
}
