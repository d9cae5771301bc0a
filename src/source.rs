//! 입력 소스 탐색 모듈
//!
//! 입력 경로가 폴더인지 `.paprikarecipes` 아카이브인지 판별하고,
//! 조건에 맞는 레시피 항목을 발견 순서대로 하나씩 열어 넘겨줍니다.
//! 한 번에 하나의 스트림만 열려 있으며 콜백이 끝나면 바로 닫힙니다.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{ExtractError, Result};
use crate::filter::{is_archive_name, EntryFilter};

/// 입력 종류
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    /// 개별 .paprikarecipe 파일이 들어 있는 폴더
    Directory,
    /// .paprikarecipes zip 아카이브
    Archive,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Directory => write!(f, "폴더"),
            InputKind::Archive => write!(f, "아카이브"),
        }
    }
}

impl InputKind {
    /// 입력 경로의 종류 판별
    pub fn detect(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| input_access(path, e))?;

        if metadata.is_dir() {
            return Ok(InputKind::Directory);
        }

        let is_archive = path.file_name().map(is_archive_name).unwrap_or(false);

        if is_archive {
            Ok(InputKind::Archive)
        } else {
            Err(ExtractError::InvalidInput {
                path: path.to_path_buf(),
            })
        }
    }
}

/// 발견된 레시피 항목 정보
#[derive(Debug, Clone)]
pub struct EntryInfo {
    /// 폴더 모드: 파일 경로, 아카이브 모드: 항목 이름
    pub name: String,
    /// 압축된 크기 (바이트)
    pub compressed_size: u64,
}

/// 탐색 옵션
#[derive(Debug, Default)]
pub struct SourceOptions {
    /// 항목 선택 규칙
    pub filter: EntryFilter,
    /// 최대 폴더 탐색 깊이 (폴더 모드 전용)
    pub max_depth: Option<usize>,
}

/// 열린 레시피 소스
pub enum RecipeSource {
    /// 폴더 탐색으로 수집된 파일 목록
    Directory { files: Vec<PathBuf> },
    /// 열린 아카이브와 조건에 맞는 항목 인덱스
    Archive {
        path: PathBuf,
        archive: ZipArchive<BufReader<File>>,
        members: Vec<usize>,
    },
}

impl RecipeSource {
    /// 입력 경로를 열고 추출 대상 항목 목록을 확정
    pub fn open(path: &Path, options: &SourceOptions) -> Result<Self> {
        match InputKind::detect(path)? {
            InputKind::Directory => {
                let files = collect_recipe_files(path, options)?;
                Ok(RecipeSource::Directory { files })
            }
            InputKind::Archive => {
                let file = File::open(path).map_err(|e| input_access(path, e))?;
                let mut archive =
                    ZipArchive::new(BufReader::new(file)).map_err(|e| input_access(path, e))?;
                let members = matching_members(path, &mut archive, &options.filter)?;
                Ok(RecipeSource::Archive {
                    path: path.to_path_buf(),
                    archive,
                    members,
                })
            }
        }
    }

    /// 입력 종류
    pub fn kind(&self) -> InputKind {
        match self {
            RecipeSource::Directory { .. } => InputKind::Directory,
            RecipeSource::Archive { .. } => InputKind::Archive,
        }
    }

    /// 추출 대상 항목 수
    pub fn len(&self) -> usize {
        match self {
            RecipeSource::Directory { files } => files.len(),
            RecipeSource::Archive { members, .. } => members.len(),
        }
    }

    /// 추출 대상이 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 항목 이름 목록 (발견 순서)
    pub fn entry_names(&mut self) -> Result<Vec<String>> {
        match self {
            RecipeSource::Directory { files } => {
                Ok(files.iter().map(|p| p.display().to_string()).collect())
            }
            RecipeSource::Archive {
                path,
                archive,
                members,
            } => {
                let path = path.as_path();
                let mut names = Vec::with_capacity(members.len());
                for &index in members.iter() {
                    let member = archive
                        .by_index_raw(index)
                        .map_err(|e| input_access(path, e))?;
                    names.push(member.name().to_string());
                }
                Ok(names)
            }
        }
    }

    /// 각 항목을 순서대로 열어 콜백에 넘김
    ///
    /// 콜백이 에러를 반환하면 남은 항목은 열지 않고 즉시 중단합니다.
    pub fn for_each_entry<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&EntryInfo, &mut dyn Read) -> Result<()>,
    {
        match self {
            RecipeSource::Directory { files } => {
                for path in files.iter() {
                    let file = File::open(path).map_err(|e| input_access(path, e))?;
                    let info = EntryInfo {
                        name: path.display().to_string(),
                        compressed_size: file.metadata().map(|m| m.len()).unwrap_or(0),
                    };
                    let mut reader = BufReader::new(file);
                    visit(&info, &mut reader)?;
                }
            }
            RecipeSource::Archive {
                path,
                archive,
                members,
            } => {
                let path = path.as_path();
                for &index in members.iter() {
                    let mut member = archive
                        .by_index(index)
                        .map_err(|e| input_access(path, e))?;
                    let info = EntryInfo {
                        name: member.name().to_string(),
                        compressed_size: member.compressed_size(),
                    };
                    visit(&info, &mut member)?;
                }
            }
        }
        Ok(())
    }
}

/// 폴더를 재귀 탐색하여 레시피 파일 수집
///
/// 같은 단계 안에서는 파일 이름 순으로 정렬되어 실행마다 순서가 같습니다.
/// 탐색 중 하나라도 실패하면 전체가 실패합니다.
pub fn collect_recipe_files(root: &Path, options: &SourceOptions) -> Result<Vec<PathBuf>> {
    let walker = if let Some(max_depth) = options.max_depth {
        WalkDir::new(root).max_depth(max_depth)
    } else {
        WalkDir::new(root)
    };

    let mut files = Vec::new();
    for entry in walker.sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ExtractError::InputAccess {
                path,
                reason: e.to_string(),
            }
        })?;

        // 심볼릭 링크는 대상을 따라가서 판단
        if !entry.path().is_file() {
            continue;
        }

        if options.filter.matches_file_name(entry.file_name()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// 아카이브에서 조건에 맞는 항목 인덱스를 중앙 디렉토리 순서대로 수집
fn matching_members<R: Read + std::io::Seek>(
    path: &Path,
    archive: &mut ZipArchive<R>,
    filter: &EntryFilter,
) -> Result<Vec<usize>> {
    let mut members = Vec::new();
    for index in 0..archive.len() {
        let member = archive
            .by_index_raw(index)
            .map_err(|e| input_access(path, e))?;
        if !member.is_dir() && filter.matches(member.name()) {
            members.push(index);
        }
    }
    Ok(members)
}

fn input_access(path: &Path, err: impl std::fmt::Display) -> ExtractError {
    ExtractError::InputAccess {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
