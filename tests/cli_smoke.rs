use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_foldview")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "foldview.exe"
            } else {
                "foldview"
            });
            p
        })
}

#[test]
fn cli_keyframes_prints_strips() {
    let output = std::process::Command::new(exe())
        .args([
            "keyframes",
            "--width",
            "300",
            "--height",
            "100",
            "--folds",
            "3",
            "--direction",
            "left",
            "--mode",
            "hide",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "hide");
    assert_eq!(report["direction"], "from_left");
    assert_eq!(report["finished"], true);

    let strips = report["strips"].as_array().unwrap();
    assert_eq!(strips.len(), 3);
    assert_eq!(strips[1]["geometry"]["region"]["x0"], 100.0);
    let keys = strips[0]["keyframes"]["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 17);
    assert_eq!(keys[0]["key_time"], 0.0);
    assert_eq!(keys[16]["key_time"], 1.0);
}

#[test]
fn cli_rejects_out_of_bounds_folds() {
    let status = std::process::Command::new(exe())
        .args(["keyframes", "--width", "300", "--height", "100", "--folds", "21"])
        .output()
        .unwrap()
        .status;
    assert!(!status.success());

    let output = std::process::Command::new(exe())
        .args([
            "keyframes",
            "--width",
            "300",
            "--height",
            "100",
            "--folds",
            "21",
            "--no-bounds-check",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["strips"].as_array().unwrap().len(), 21);
}

#[test]
fn cli_config_loads_overrides() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let cfg_path = dir.join("fold.json");
    std::fs::write(&cfg_path, r#"{ "default_folds": 5, "sample_steps": 8 }"#).unwrap();

    let output = std::process::Command::new(exe())
        .args(["config", "--config"])
        .arg(&cfg_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let cfg: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cfg["default_folds"], 5);
    assert_eq!(cfg["sample_steps"], 8);
    assert_eq!(cfg["max_folds"], 20);
}

#[test]
fn cli_out_back_show_overshoots_the_fold() {
    let output = std::process::Command::new(exe())
        .args([
            "keyframes",
            "--width",
            "200",
            "--height",
            "80",
            "--folds",
            "2",
            "--ease",
            "out-back",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "show");
    let keys = report["strips"][0]["keyframes"]["keys"].as_array().unwrap();
    let angles: Vec<f64> = keys
        .iter()
        .map(|k| k["pose"]["angle"].as_f64().unwrap())
        .collect();
    assert_eq!(angles[0], std::f64::consts::FRAC_PI_2);
    assert_eq!(angles[angles.len() - 1], 0.0);
    assert!(angles.iter().any(|a| *a > std::f64::consts::FRAC_PI_2));
}
