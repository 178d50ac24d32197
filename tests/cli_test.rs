use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const INTERVAL_QUEUE: &str = r#"{
    "tx_priority": "NEXT_BLOCK",
    "consolidate_deprecated_keychains": true,
    "manual": false,
    "interval_secs": 300,
    "cpfp_payouts_after_mins": -1,
    "cpfp_payouts_after_blocks": 10,
    "force_min_change_sats": -1
}"#;

#[test]
fn build_writes_structured_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("flat.json");
    let output = dir.path().join("config.json");
    fs::write(&input, INTERVAL_QUEUE)?;

    Command::new(cargo_bin!("payout-queue"))
        .arg("build")
        .arg("--input-file")
        .arg(&input)
        .arg("--output-file")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"intervalSecs\": 300"));

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(
        written,
        serde_json::json!({
            "txPriority": 0,
            "consolidateDeprecatedKeychains": true,
            "trigger": { "intervalSecs": 300 },
            "cpfpPayoutsAfterBlocks": 10
        })
    );
    Ok(())
}

#[test]
fn build_rejects_missing_trigger() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("flat.json");
    fs::write(
        &input,
        r#"{"tx_priority":"ONE_HOUR","consolidate_deprecated_keychains":false}"#,
    )?;

    Command::new(cargo_bin!("payout-queue"))
        .args(["build", "-i"])
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "either 'manual' must be true or 'interval_secs' must be set",
        ));
    Ok(())
}

#[test]
fn build_rejects_unknown_priority() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("flat.json");
    fs::write(
        &input,
        r#"{"tx_priority":"NOT_A_PRIORITY","consolidate_deprecated_keychains":false,"manual":true}"#,
    )?;

    Command::new(cargo_bin!("payout-queue"))
        .args(["build", "-i"])
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid tx_priority value: NOT_A_PRIORITY"));
    Ok(())
}

#[test]
fn flatten_tolerates_extra_trigger_keys() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("config.json");
    fs::write(
        &input,
        r#"{"txPriority":0,"consolidateDeprecatedKeychains":true,"trigger":{"intervalSecs":60,"jitterSecs":5}}"#,
    )?;

    let output = Command::new(cargo_bin!("payout-queue"))
        .args(["flatten", "-i"])
        .arg(&input)
        .output()?;
    assert!(output.status.success());

    let flat: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(flat["interval_secs"], 60);
    assert_eq!(flat["manual"], false);
    Ok(())
}

#[test]
fn flatten_fills_sentinels() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("config.json");
    fs::write(
        &input,
        r#"{"txPriority":2,"consolidateDeprecatedKeychains":false,"trigger":{"manual":true}}"#,
    )?;

    let output = Command::new(cargo_bin!("payout-queue"))
        .args(["flatten", "-i"])
        .arg(&input)
        .output()?;
    assert!(output.status.success());

    let flat: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        flat,
        serde_json::json!({
            "tx_priority": "ONE_HOUR",
            "consolidate_deprecated_keychains": false,
            "manual": true,
            "interval_secs": 0,
            "cpfp_payouts_after_mins": -1,
            "cpfp_payouts_after_blocks": -1,
            "force_min_change_sats": -1
        })
    );
    Ok(())
}

#[test]
fn diff_reports_drift() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let desired = dir.path().join("flat.json");
    let observed = dir.path().join("config.json");
    fs::write(&desired, INTERVAL_QUEUE)?;
    fs::write(
        &observed,
        r#"{"txPriority":0,"consolidateDeprecatedKeychains":true,"trigger":{"intervalSecs":600},"cpfpPayoutsAfterBlocks":10}"#,
    )?;

    Command::new(cargo_bin!("payout-queue"))
        .arg("diff")
        .arg("--desired")
        .arg(&desired)
        .arg("--observed")
        .arg(&observed)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("interval_secs: 600 -> 300"));

    fs::write(
        &observed,
        r#"{"txPriority":0,"consolidateDeprecatedKeychains":true,"trigger":{"intervalSecs":300},"cpfpPayoutsAfterBlocks":10}"#,
    )?;
    Command::new(cargo_bin!("payout-queue"))
        .arg("diff")
        .arg("--desired")
        .arg(&desired)
        .arg("--observed")
        .arg(&observed)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}
