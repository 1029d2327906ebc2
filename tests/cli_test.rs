#![cfg(feature = "cli")]

use anyhow::Result;
use serde_json::{json, Value};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fitcheck(closet: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_fitcheck"))
        .arg("--closet")
        .arg(closet)
        .args(args)
        .env_remove("RUST_LOG")
        .output()?;
    Ok(output)
}

#[test]
fn test_recommend_json_on_empty_closet_is_empty_object() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let output = fitcheck(temp_dir.path(), &["recommend", "--json"])?;

    assert!(output.status.success());
    let stdout: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(stdout, json!({}));
    assert!(String::from_utf8_lossy(&output.stderr).contains("closet is empty"));
    Ok(())
}

#[test]
fn test_recommend_json_is_keyed_by_slot() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("tee.json"),
        json!({"name": "Tee", "item_type": "Shirts", "color": "White", "gender": "Men's"})
            .to_string(),
    )?;

    let output = fitcheck(
        temp_dir.path(),
        &["recommend", "--gender", "Men's", "--seed", "1", "--json"],
    )?;

    assert!(output.status.success());
    let stdout: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(stdout["shirts"]["name"], "Tee");
    assert!(stdout.get("pieces").is_none());
    assert!(stdout.get("pants").is_none());
    Ok(())
}

#[test]
fn test_inventory_add_stores_tag_and_refuses_duplicate() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let closet = temp_dir.path().join("Closet");
    let tag = temp_dir.path().join("tag.json");
    std::fs::write(
        &tag,
        json!({
            "item_type": "Hats", "color": "Navy", "indoor_outdoor": "Outdoor",
            "formality": "Casual", "gender": "Unisex", "path": "temp/navy_cap.jpg"
        })
        .to_string(),
    )?;
    let tag_arg = tag.display().to_string();

    let output = fitcheck(&closet, &["inventory", "add", &tag_arg])?;
    assert!(output.status.success());
    assert!(closet.join("navy_cap.json").is_file());

    // 同名紀錄不會被默默覆蓋
    let output = fitcheck(&closet, &["inventory", "add", &tag_arg])?;
    assert_eq!(output.status.code(), Some(2));

    let output = fitcheck(&closet, &["inventory", "--item-type", "hats"])?;
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 matching items"));
    Ok(())
}
