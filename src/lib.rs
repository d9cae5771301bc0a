//! paprika-extract - PAPRIKA RECIPE FIELD EXTRACTOR
//!
//! Paprika 레시피 내보내기에서 원하는 최상위 필드만 추출해
//! 하나의 JSON 배열 문서로 모으는 CLI 도구입니다.
//!
//! # 입력 형식
//!
//! - `.paprikarecipe`: 레시피 JSON 객체 하나를 gzip으로 압축한 파일
//! - `.paprikarecipes`: `.paprikarecipe` 항목들을 담은 zip 아카이브
//!
//! # 주요 기능
//!
//! - 📂 **폴더 모드**: 하위 폴더까지 재귀 탐색 (이름순, 실행마다 같은 순서)
//! - 📦 **아카이브 모드**: 아카이브 항목 순서대로 순회
//! - 🎯 **필드 선택**: 지정한 최상위 필드만 추출, 없는 필드는 생략
//! - 🛑 **즉시 중단**: 오류가 하나라도 나면 아무것도 출력하지 않음
//! - 🔍 **패턴 필터링**: glob 형식의 레시피 파일 이름 필터링
//! - 🧪 **드라이런 모드**: 실제 추출 없이 처리될 항목 목록 미리 확인
//!
//! # 예제
//!
//! ```bash
//! # 폴더에서 기본 필드(name, categories) 추출
//! paprika-extract -i ./recipes
//!
//! # 아카이브에서 파일로 저장
//! paprika-extract -i "My Recipes.paprikarecipes" -o recipes.json --fields "name,rating"
//! ```

pub mod cli;
pub mod error;
pub mod filter;
pub mod logger;
pub mod output;
pub mod pipeline;
pub mod recipe;
pub mod source;
pub mod stats;

// Re-exports for convenient access
pub use cli::Args;
pub use error::{ExtractError, Result};
pub use filter::{EntryFilter, ARCHIVE_SUFFIX, RECIPE_SUFFIX};
pub use output::{render, write_document, OutputTarget};
pub use pipeline::{extract_all, parse_fields, ExtractOptions, Extraction};
pub use recipe::{KeyOrder, Record};
pub use source::{InputKind, RecipeSource};
pub use stats::{format_bytes, Statistics};
