//! Command-line behaviour, run against the built binary

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const CATALOG_JSON: &str = r#"{
    "version": "1.0.0",
    "created_at": "2024-05-01T12:00:00Z",
    "items": [
        {"id": 1, "name": "AK-47 | Redline (Field-Tested)", "item_type": "skin", "price": 14.2, "price_type": "steam"},
        {"id": 2, "name": "AWP | Asiimov (Field-Tested)", "item_type": "skin"},
        {"id": 3, "name": "AWP | Asiimov (Factory New)", "item_type": "skin"},
        {"id": 4, "name": "M4A4 | Howl (Factory New)", "item_type": "skin"},
        {"id": 5, "name": "Chroma 2 Case", "item_type": "case"},
        {"id": 6}
    ]
}"#;

const CATALOG_CSV: &str = "\
# exported from the item store
id,name,item_type,price
1,AK-47 | Redline (Field-Tested),skin,14.2

2,AWP | Asiimov (Field-Tested),skin,
3,AWP | Asiimov (Battle-Scarred),skin,21.5
";

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn skin_solver() -> Command {
    Command::cargo_bin("skin-solver").unwrap()
}

#[test]
fn test_identify_text_output() {
    let catalog = write_temp(".json", CATALOG_JSON);

    skin_solver()
        .args(["identify", "AK47 Redline FT", "--catalog"])
        .arg(catalog.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("AK-47 | Redline (Field-Tested)"))
        .stdout(predicate::str::contains("LOW match"));
}

#[test]
fn test_identify_json_output() {
    let catalog = write_temp(".json", CATALOG_JSON);

    let output = skin_solver()
        .args(["identify", "AWP | Asiimov", "--format", "json", "--catalog"])
        .arg(catalog.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["report"]["status"], "matched");
    assert_eq!(json["report"]["confidence"], "high");
    assert_eq!(json["report"]["matches"][0]["strategy"], "token_prefilter");
    assert_eq!(json["listing"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["report"]["wear_variations"][0]["name"],
        "AWP | Asiimov (Factory New)"
    );
}

#[test]
fn test_identify_verbose_reports_catalog_load() {
    let catalog = write_temp(".json", CATALOG_JSON);

    skin_solver()
        .args(["--verbose", "identify", "M4A4 Howl", "--catalog"])
        .arg(catalog.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Loaded catalog with 5 items (1 rows skipped)",
        ))
        .stdout(predicate::str::contains("M4A4 | Howl (Factory New)"));
}

#[test]
fn test_quoted_csv_catalog() {
    let catalog = write_temp(
        ".csv",
        "id,name,item_type,price\n\
         1,\"Music Kit | Daniel Sadowski, Crimson Assault\",music_kit,N/A\n\
         2,AWP | Asiimov (Field-Tested),skin,31.5\n",
    );

    skin_solver()
        .args(["catalog", "list", "--format", "tsv", "--catalog"])
        .arg(catalog.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1\tMusic Kit | Daniel Sadowski, Crimson Assault\t",
        ))
        .stdout(predicate::str::contains("\tmusic_kit\t\t\t"));
}

#[test]
fn test_identify_no_match() {
    let catalog = write_temp(".json", CATALOG_JSON);

    skin_solver()
        .args(["identify", "qqqq", "--catalog"])
        .arg(catalog.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No matching items found"));
}

#[test]
fn test_invalid_threshold_is_rejected() {
    let catalog = write_temp(".json", CATALOG_JSON);

    skin_solver()
        .args(["identify", "AWP", "--threshold", "1.5", "--catalog"])
        .arg(catalog.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid threshold 1.5"));
}

#[test]
fn test_missing_catalog_file() {
    skin_solver()
        .args(["identify", "AWP", "--catalog", "/nonexistent/items.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read catalog"));
}

#[test]
fn test_batch_tsv_output() {
    let catalog = write_temp(".csv", CATALOG_CSV);
    let input = write_temp(
        ".txt",
        "Item 1: AWP | Asiimov\n[OCR failed]\nItem 3: AK-47 Redline\nzzzz\n",
    );

    skin_solver()
        .args(["batch", "--format", "tsv", "--catalog"])
        .arg(catalog.path())
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("line\toriginal\tcleaned\tstatus"))
        .stdout(predicate::str::contains("\tAWP | Asiimov\tfound\t2\t"))
        .stdout(predicate::str::contains("\tempty\t"))
        .stdout(predicate::str::contains("\tnot_found\t"));
}

#[test]
fn test_batch_from_stdin() {
    let catalog = write_temp(".json", CATALOG_JSON);

    let output = skin_solver()
        .args(["batch", "-", "--format", "json", "--catalog"])
        .arg(catalog.path())
        .write_stdin("M4A4 Howl\nChroma 2 Case\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["matches"][0]["name"], "M4A4 | Howl (Factory New)");
    assert_eq!(entries[1]["matches"][0]["item_type"], "case");
}

#[test]
fn test_score_breakdown() {
    skin_solver()
        .args(["score", "AWP | Asiimov", "awp asiimov", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "awp asiimov\tawp asiimov\t1.0000\t1.0000\t1.0000\t1.0000",
        ));
}

#[test]
fn test_catalog_stats_json() {
    let catalog = write_temp(".json", CATALOG_JSON);

    let output = skin_solver()
        .args(["catalog", "stats", "--format", "json", "--catalog"])
        .arg(catalog.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stats"]["items"], 5);
    assert_eq!(json["stats"]["by_item_type"]["case"], 1);
    assert_eq!(json["skipped_rows"], serde_json::json!([6]));
}

#[test]
fn test_catalog_list_filter() {
    let catalog = write_temp(".json", CATALOG_JSON);

    skin_solver()
        .args(["catalog", "list", "--item-type", "case", "--catalog"])
        .arg(catalog.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Chroma 2 Case"))
        .stdout(predicate::str::contains("Howl").not());
}

#[test]
fn test_catalog_variations() {
    let catalog = write_temp(".csv", CATALOG_CSV);

    skin_solver()
        .args([
            "catalog",
            "variations",
            "AWP | Asiimov (Battle-Scarred)",
            "--format",
            "tsv",
            "--catalog",
        ])
        .arg(catalog.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match("Field-Tested[^\n]*\n[^\n]*Battle-Scarred").unwrap());
}

#[test]
fn test_catalog_variations_unknown_name() {
    let catalog = write_temp(".json", CATALOG_JSON);

    skin_solver()
        .args(["catalog", "variations", "AWP | Dragon Lore", "--catalog"])
        .arg(catalog.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item not found"));
}

#[test]
fn test_catalog_export_reloads() {
    let catalog = write_temp(".csv", CATALOG_CSV);
    let dir = tempfile::tempdir().unwrap();
    let exported = dir.path().join("items.json");

    skin_solver()
        .args(["catalog", "export"])
        .arg(&exported)
        .arg("--catalog")
        .arg(catalog.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 items"));

    skin_solver()
        .args(["catalog", "list", "--format", "tsv", "--catalog"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("AWP | Asiimov (Battle-Scarred)"));
}
