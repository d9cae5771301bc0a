//! 에러 타입 정의 모듈
//!
//! 추출 과정에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! 어떤 에러든 발생 즉시 전체 실행을 중단합니다.

use std::path::PathBuf;
use thiserror::Error;

/// paprika-extract에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum ExtractError {
    /// 입력 경로 조회, 폴더 탐색, 아카이브/항목 열기 실패
    #[error("입력에 접근할 수 없습니다 ({path}): {reason}")]
    InputAccess { path: PathBuf, reason: String },

    /// 폴더도 아니고 .paprikarecipes 아카이브도 아닌 입력
    #[error("유효하지 않은 입력 경로입니다 (폴더 또는 .paprikarecipes 파일이어야 합니다): {path}")]
    InvalidInput { path: PathBuf },

    /// gzip 해제 또는 JSON 파싱 실패
    #[error("레시피 디코딩 실패 ({entry}): {reason}")]
    Decode { entry: String, reason: String },

    /// 최종 JSON 직렬화 실패
    #[error("JSON 직렬화 실패: {reason}")]
    Serialize { reason: String },

    /// 출력 대상 열기/쓰기 실패
    #[error("출력 쓰기 실패 ({target}): {reason}")]
    Write { target: String, reason: String },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },
}

impl ExtractError {
    /// 에러 종류별 프로세스 종료 코드
    pub fn exit_code(&self) -> u8 {
        match self {
            ExtractError::InputAccess { .. } => 2,
            ExtractError::InvalidInput { .. } => 3,
            ExtractError::Decode { .. } => 4,
            ExtractError::Serialize { .. } => 5,
            ExtractError::Write { .. } => 6,
            ExtractError::InvalidPattern { .. } => 7,
        }
    }
}

/// paprika-extract 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ExtractError>;
