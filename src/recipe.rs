//! 레시피 처리 모듈
//!
//! 압축된 레시피 스트림 하나의 gzip 해제, JSON 파싱, 필드 추출을 담당합니다.

use clap::ValueEnum;
use flate2::read::MultiGzDecoder;
use serde_json::{Map, Value};
use std::io::Read;

use crate::error::{ExtractError, Result};

/// 레시피 레코드 (키 순서 유지)
pub type Record = Map<String, Value>;

/// 추출된 레코드의 키 순서
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum KeyOrder {
    /// 원본 레시피 JSON의 키 순서 유지
    #[default]
    Source,
    /// --fields에 지정한 순서
    Fields,
}

impl std::fmt::Display for KeyOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyOrder::Source => write!(f, "source"),
            KeyOrder::Fields => write!(f, "fields"),
        }
    }
}

/// 디코딩된 레시피 하나
#[derive(Debug)]
pub struct DecodedRecipe {
    /// 파싱된 JSON 객체
    pub record: Record,
    /// 압축 해제된 바이트 수
    pub decompressed_size: u64,
}

/// 압축된 레시피 스트림을 끝까지 읽어 JSON 객체로 파싱
///
/// # Arguments
/// * `reader` - gzip으로 압축된 레시피 바이트 스트림
/// * `entry` - 에러 메시지에 쓸 항목 이름
///
/// # Returns
/// 최상위가 객체인 경우에만 성공. gzip 오류, JSON 문법 오류,
/// 객체가 아닌 최상위 값은 모두 `ExtractError::Decode`
pub fn decode_recipe<R: Read>(reader: R, entry: &str) -> Result<DecodedRecipe> {
    // 이어 붙은 gzip 멤버는 모두 해제하고, 뒤에 붙은 쓰레기 바이트는 오류
    let mut decoder = MultiGzDecoder::new(reader);
    let mut payload = Vec::new();
    decoder
        .read_to_end(&mut payload)
        .map_err(|e| ExtractError::Decode {
            entry: entry.to_string(),
            reason: format!("gzip 해제 실패: {}", e),
        })?;

    let value: Value = serde_json::from_slice(&payload).map_err(|e| ExtractError::Decode {
        entry: entry.to_string(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(record) => Ok(DecodedRecipe {
            record,
            decompressed_size: payload.len() as u64,
        }),
        other => Err(ExtractError::Decode {
            entry: entry.to_string(),
            reason: format!("최상위 값이 객체가 아닙니다 ({})", json_type_name(&other)),
        }),
    }
}

/// 레코드에서 지정한 최상위 필드만 남긴 새 레코드 생성
///
/// 원본에 없는 필드는 null로 채우지 않고 생략합니다.
pub fn project(record: Record, fields: &[String], order: KeyOrder) -> Record {
    match order {
        KeyOrder::Source => record
            .into_iter()
            .filter(|(key, _)| fields.iter().any(|f| f == key))
            .collect(),
        KeyOrder::Fields => {
            let mut projected = Map::new();
            for field in fields {
                if projected.contains_key(field) {
                    continue;
                }
                if let Some(value) = record.get(field) {
                    projected.insert(field.clone(), value.clone());
                }
            }
            projected
        }
    }
}

/// 스트림 하나를 해제, 파싱, 추출하여 레코드 하나를 반환
pub fn extract_recipe<R: Read>(
    reader: R,
    entry: &str,
    fields: &[String],
    order: KeyOrder,
) -> Result<(Record, u64)> {
    let decoded = decode_recipe(reader, entry)?;
    Ok((
        project(decoded.record, fields, order),
        decoded.decompressed_size,
    ))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
