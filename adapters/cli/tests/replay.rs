use std::process::Command;

fn cavern(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cavern"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch cavern binary")
}

#[test]
fn scripted_run_prints_frame_status_and_snapshot() {
    let output = cavern(&[
        "--width",
        "40",
        "--height",
        "30",
        "--script",
        "n42sdd d:q",
        "--emit-snapshot",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1 + 30 + 1 + 1);
    assert!(lines[1..31].iter().all(|row| row.chars().count() == 40));
    assert!(lines[31].contains("projection overlay"));

    let snapshot: serde_json::Value = serde_json::from_str(lines[32]).expect("json snapshot");
    assert_eq!(snapshot["world"]["seed"], 42);
    assert_eq!(snapshot["world"]["switch_count"], 1);
}

#[test]
fn identical_scripts_print_identical_output() {
    let args = ["--seed", "9", "--script", "wasd wasd", "--show", "physical"];
    assert_eq!(cavern(&args).stdout, cavern(&args).stdout);
}

#[test]
fn load_scripts_are_refused() {
    let output = cavern(&["--script", "lwww"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading saved caves is not supported"));
}
