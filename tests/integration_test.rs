//! 통합 테스트 모듈
//!
//! 폴더/아카이브 입력부터 JSON 출력까지 전체 흐름을 테스트합니다.

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// 레시피 JSON을 gzip으로 압축
fn gzip(payload: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

/// 테스트용 .paprikarecipe 파일 생성 헬퍼
fn create_recipe_file(dir: &Path, name: &str, payload: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, gzip(payload)).unwrap();
    path
}

/// 테스트용 .paprikarecipes 아카이브 생성 헬퍼
fn create_archive(dir: &Path, name: &str, members: &[(&str, Vec<u8>)]) -> PathBuf {
    let path = dir.join(name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    for (member, content) in members {
        zip.start_file(*member, SimpleFileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap();
    path
}

const RECIPES: [(&str, &str); 3] = [
    (
        "Soup.paprikarecipe",
        r#"{"name":"Soup","categories":["Dinner"],"rating":5}"#,
    ),
    (
        "Cake.paprikarecipe",
        r#"{"rating":4,"name":"Cake","categories":["Dessert","Baking"],"source":"Grandma"}"#,
    ),
    (
        "Toast.paprikarecipe",
        r#"{"name":"Toast","notes":null}"#,
    ),
];

/// 레시피 폴더 생성
fn setup_recipe_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("breakfast");
    fs::create_dir(&nested).unwrap();

    create_recipe_file(temp_dir.path(), RECIPES[0].0, RECIPES[0].1);
    create_recipe_file(temp_dir.path(), RECIPES[1].0, RECIPES[1].1);
    create_recipe_file(&nested, RECIPES[2].0, RECIPES[2].1);
    fs::write(temp_dir.path().join("photo.jpg"), b"\xff\xd8").unwrap();

    temp_dir
}

/// 같은 레시피를 담은 아카이브 생성
fn setup_recipe_archive(dir: &Path) -> PathBuf {
    let members: Vec<(&str, Vec<u8>)> = RECIPES
        .iter()
        .map(|(name, payload)| (*name, gzip(payload)))
        .collect();
    create_archive(dir, "export.paprikarecipes", &members)
}

fn records_as_values(records: Vec<paprika_extract::Record>) -> Vec<Value> {
    records.into_iter().map(Value::Object).collect()
}

mod extraction_tests {
    use super::*;
    use paprika_extract::{extract_all, render, ExtractError, ExtractOptions, KeyOrder};

    #[test]
    fn test_single_recipe_default_fields() {
        let temp_dir = TempDir::new().unwrap();
        create_recipe_file(temp_dir.path(), "r.paprikarecipe", RECIPES[0].1);

        let extraction = extract_all(temp_dir.path(), &ExtractOptions::new()).unwrap();
        let document = render(&extraction.records).unwrap();
        let parsed: Value = serde_json::from_slice(&document).unwrap();

        assert_eq!(parsed, json!([{"name": "Soup", "categories": ["Dinner"]}]));
        assert_eq!(
            String::from_utf8(document).unwrap(),
            "[\n  {\n    \"name\": \"Soup\",\n    \"categories\": [\n      \"Dinner\"\n    ]\n  }\n]"
        );
    }

    #[test]
    fn test_directory_order_and_count() {
        let temp_dir = setup_recipe_directory();

        let extraction = extract_all(temp_dir.path(), &ExtractOptions::new()).unwrap();

        assert_eq!(extraction.records.len(), 3);
        assert_eq!(extraction.stats.matched_entries, 3);
        assert_eq!(extraction.stats.extracted, 3);
        let names: Vec<Value> = extraction
            .records
            .iter()
            .map(|r| r["name"].clone())
            .collect();
        assert_eq!(names, [json!("Cake"), json!("Soup"), json!("Toast")]);
    }

    #[test]
    fn test_projection_key_set() {
        let temp_dir = setup_recipe_directory();
        let fields = vec![
            "name".to_string(),
            "source".to_string(),
            "notes".to_string(),
            "missing".to_string(),
        ];
        let options = ExtractOptions::new().with_fields(fields.clone());

        let extraction = extract_all(temp_dir.path(), &options).unwrap();

        for (record, (_, payload)) in extraction
            .records
            .iter()
            .zip([RECIPES[1], RECIPES[0], RECIPES[2]])
        {
            let source: Value = serde_json::from_str(payload).unwrap();
            let source = source.as_object().unwrap();
            let mut expected: Vec<&String> =
                fields.iter().filter(|f| source.contains_key(*f)).collect();
            let mut actual: Vec<&String> = record.keys().collect();
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_absent_field_is_omitted_not_null() {
        let temp_dir = setup_recipe_directory();
        let extraction = extract_all(temp_dir.path(), &ExtractOptions::new()).unwrap();

        let toast = &extraction.records[2];
        assert_eq!(toast.get("name"), Some(&json!("Toast")));
        assert!(!toast.contains_key("categories"));
    }

    #[test]
    fn test_key_order_modes() {
        let temp_dir = TempDir::new().unwrap();
        create_recipe_file(temp_dir.path(), "Cake.paprikarecipe", RECIPES[1].1);
        let fields = vec!["name".to_string(), "rating".to_string()];

        let source_order = extract_all(
            temp_dir.path(),
            &ExtractOptions::new().with_fields(fields.clone()),
        )
        .unwrap();
        let keys: Vec<&String> = source_order.records[0].keys().collect();
        assert_eq!(keys, ["rating", "name"]);

        let field_order = extract_all(
            temp_dir.path(),
            &ExtractOptions::new()
                .with_fields(fields)
                .with_key_order(KeyOrder::Fields),
        )
        .unwrap();
        let keys: Vec<&String> = field_order.records[0].keys().collect();
        assert_eq!(keys, ["name", "rating"]);
    }

    #[test]
    fn test_directory_and_archive_agree() {
        let temp_dir = setup_recipe_directory();
        let archive_dir = TempDir::new().unwrap();
        let archive = setup_recipe_archive(archive_dir.path());
        let options = ExtractOptions::new().with_fields(vec![
            "name".to_string(),
            "categories".to_string(),
            "rating".to_string(),
        ]);

        let mut from_dir =
            records_as_values(extract_all(temp_dir.path(), &options).unwrap().records);
        let mut from_archive = records_as_values(extract_all(&archive, &options).unwrap().records);

        let by_name = |a: &Value, b: &Value| a["name"].as_str().cmp(&b["name"].as_str());
        from_dir.sort_by(by_name);
        from_archive.sort_by(by_name);
        assert_eq!(from_dir, from_archive);
    }

    #[test]
    fn test_archive_keeps_member_order() {
        let temp_dir = TempDir::new().unwrap();
        let archive = setup_recipe_archive(temp_dir.path());

        let extraction = extract_all(&archive, &ExtractOptions::new()).unwrap();
        let names: Vec<Value> = extraction
            .records
            .iter()
            .map(|r| r["name"].clone())
            .collect();
        assert_eq!(names, [json!("Soup"), json!("Cake"), json!("Toast")]);
    }

    #[test]
    fn test_archive_without_recipes_is_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let archive = create_archive(
            temp_dir.path(),
            "empty.paprikarecipes",
            &[("readme.txt", b"hello".to_vec())],
        );

        let extraction = extract_all(&archive, &ExtractOptions::new()).unwrap();
        assert!(extraction.records.is_empty());
        assert_eq!(render(&extraction.records).unwrap(), b"[]");
    }

    #[test]
    fn test_pattern_filter() {
        let temp_dir = setup_recipe_directory();
        let options = ExtractOptions::new().with_pattern(Some("S*".to_string()));

        let extraction = extract_all(temp_dir.path(), &options).unwrap();
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0]["name"], json!("Soup"));
    }

    #[test]
    fn test_invalid_json_aborts() {
        let temp_dir = setup_recipe_directory();
        create_recipe_file(temp_dir.path(), "Broken.paprikarecipe", r#"{"name": "Bro"#);

        let result = extract_all(temp_dir.path(), &ExtractOptions::new());
        match result {
            Err(ExtractError::Decode { entry, .. }) => assert!(entry.contains("Broken")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_uncompressed_member_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let archive = create_archive(
            temp_dir.path(),
            "export.paprikarecipes",
            &[
                ("Soup.paprikarecipe", gzip(RECIPES[0].1)),
                ("Plain.paprikarecipe", RECIPES[1].1.as_bytes().to_vec()),
            ],
        );

        let result = extract_all(&archive, &ExtractOptions::new());
        assert!(matches!(result, Err(ExtractError::Decode { .. })));
    }

    #[test]
    fn test_trailing_garbage_after_gzip_aborts() {
        let temp_dir = setup_recipe_directory();
        let mut bytes = gzip(RECIPES[0].1);
        bytes.extend_from_slice(b"GARBAGE-NOT-GZIP");
        fs::write(temp_dir.path().join("Garbage.paprikarecipe"), bytes).unwrap();

        let result = extract_all(temp_dir.path(), &ExtractOptions::new());
        match result {
            Err(ExtractError::Decode { entry, .. }) => assert!(entry.contains("Garbage")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_recipe_name_is_extracted() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        create_recipe_file(temp_dir.path(), "ok.paprikarecipe", RECIPES[0].1);
        fs::write(
            temp_dir
                .path()
                .join(OsStr::from_bytes(b"caf\xe9.paprikarecipe")),
            gzip(RECIPES[1].1),
        )
        .unwrap();

        let extraction = extract_all(temp_dir.path(), &ExtractOptions::new()).unwrap();

        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.stats.matched_entries, 2);
    }

    #[test]
    fn test_invalid_input_kind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.zip");
        fs::write(&path, b"PK").unwrap();

        let result = extract_all(&path, &ExtractOptions::new());
        assert!(matches!(result, Err(ExtractError::InvalidInput { .. })));
    }

    #[test]
    fn test_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let result = extract_all(
            &temp_dir.path().join("nope.paprikarecipes"),
            &ExtractOptions::new(),
        );
        assert!(matches!(result, Err(ExtractError::InputAccess { .. })));
    }
}

mod cli_tests {
    use super::*;
    use std::process::{Command, Output};

    fn run_cli(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_paprika-extract"))
            .args(args)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    #[test]
    fn test_stdout_contains_only_document() {
        let temp_dir = TempDir::new().unwrap();
        create_recipe_file(temp_dir.path(), "r.paprikarecipe", RECIPES[0].1);

        let output = run_cli(&["-input", temp_dir.path().to_str().unwrap()]);

        assert!(output.status.success());
        let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(parsed, json!([{"name": "Soup", "categories": ["Dinner"]}]));
    }

    #[test]
    fn test_output_file_is_idempotent() {
        let temp_dir = setup_recipe_directory();
        let out_dir = TempDir::new().unwrap();
        let out_path = out_dir.path().join("out.json");
        let input = temp_dir.path().to_str().unwrap();
        let out = out_path.to_str().unwrap();

        let first = run_cli(&["-q", "-input", input, "-outputFile", out]);
        assert!(first.status.success());
        assert!(first.stdout.is_empty());
        let first_bytes = fs::read(&out_path).unwrap();

        let second = run_cli(&["-q", "--input", input, "--output-file", out]);
        assert!(second.status.success());
        assert_eq!(fs::read(&out_path).unwrap(), first_bytes);
    }

    #[test]
    fn test_missing_input_prints_guidance() {
        let output = run_cli(&[]);

        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("-input"));
    }

    #[test]
    fn test_empty_fields_prints_guidance_without_output() {
        let temp_dir = setup_recipe_directory();
        let out_dir = TempDir::new().unwrap();
        let out_path = out_dir.path().join("out.json");

        let output = run_cli(&[
            "-input",
            temp_dir.path().to_str().unwrap(),
            "-fields",
            "",
            "-outputFile",
            out_path.to_str().unwrap(),
        ]);

        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("-fields"));
        assert!(!out_path.exists());
    }

    #[test]
    fn test_decode_error_writes_nothing() {
        let temp_dir = setup_recipe_directory();
        create_recipe_file(temp_dir.path(), "Broken.paprikarecipe", "not json");
        let out_dir = TempDir::new().unwrap();
        let out_path = out_dir.path().join("out.json");

        let output = run_cli(&[
            "-q",
            "-input",
            temp_dir.path().to_str().unwrap(),
            "-outputFile",
            out_path.to_str().unwrap(),
        ]);

        assert_eq!(output.status.code(), Some(4));
        assert!(String::from_utf8_lossy(&output.stdout).contains("Broken.paprikarecipe"));
        assert!(!out_path.exists());
    }

    #[test]
    fn test_invalid_input_exit_code() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "hi").unwrap();

        let output = run_cli(&["-q", "-input", path.to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(3));
    }

    #[test]
    fn test_archive_with_no_recipes_prints_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let archive = create_archive(temp_dir.path(), "empty.paprikarecipes", &[]);

        let output = run_cli(&["-q", "-input", archive.to_str().unwrap()]);

        assert!(output.status.success());
        assert_eq!(output.stdout, b"[]");
    }

    #[test]
    fn test_dry_run_lists_entries() {
        let temp_dir = TempDir::new().unwrap();
        let archive = setup_recipe_archive(temp_dir.path());

        let output = run_cli(&["-q", "--dry-run", "-input", archive.to_str().unwrap()]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Soup.paprikarecipe"));
        assert!(stdout.contains("Toast.paprikarecipe"));
    }
}

mod error_tests {
    use paprika_extract::error::ExtractError;
    use std::path::PathBuf;

    #[test]
    fn test_error_display() {
        let error = ExtractError::InvalidInput {
            path: PathBuf::from("notes.txt"),
        };
        let msg = error.to_string();
        assert!(msg.contains("유효하지 않은 입력 경로"));
        assert!(msg.contains("notes.txt"));
    }

    #[test]
    fn test_decode_error_display() {
        let error = ExtractError::Decode {
            entry: "Soup.paprikarecipe".to_string(),
            reason: "unexpected token".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("레시피 디코딩 실패"));
        assert!(msg.contains("Soup.paprikarecipe"));
    }
}
