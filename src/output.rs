//! 출력 모듈
//!
//! 추출된 레코드를 발견 순서대로 모아 들여쓰기된 JSON 배열로 직렬화하고
//! 파일 또는 표준 출력에 씁니다.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};
use crate::recipe::Record;

/// 출력 대상
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTarget {
    /// 표준 출력
    Stdout,
    /// 파일 (항상 새로 쓰기)
    File(PathBuf),
}

impl OutputTarget {
    /// 경로가 없거나 비어 있으면 표준 출력
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if !p.as_os_str().is_empty() => OutputTarget::File(p),
            _ => OutputTarget::Stdout,
        }
    }

    fn label(&self) -> String {
        match self {
            OutputTarget::Stdout => "stdout".to_string(),
            OutputTarget::File(p) => p.display().to_string(),
        }
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 추출 결과 누적기
#[derive(Debug, Default)]
pub struct RecordCollector {
    records: Vec<Record>,
}

impl RecordCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 레코드 추가 (발견 순서 유지)
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// 레코드 목록을 2칸 들여쓰기 JSON 배열로 직렬화
///
/// 빈 목록은 `[]`가 됩니다.
pub fn render(records: &[Record]) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(records).map_err(|e| ExtractError::Serialize {
        reason: e.to_string(),
    })
}

/// 직렬화된 문서를 출력 대상에 씀
pub fn write_document(target: &OutputTarget, document: &[u8]) -> Result<()> {
    let result = match target {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(document).and_then(|_| handle.flush())
        }
        OutputTarget::File(path) => write_file(path, document),
    };

    result.map_err(|e| ExtractError::Write {
        target: target.label(),
        reason: e.to_string(),
    })
}

/// 파일 생성 또는 덮어쓰기 (Unix에서는 0644 권한)
fn write_file(path: &Path, document: &[u8]) -> io::Result<()> {
    let file = open_output_file(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(document)?;
    writer.flush()?;
    Ok(())
}

fn open_output_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options.open(path)
}
