use std::process::{Command, Output};

fn gridsnake(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gridsnake"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch gridsnake binary")
}

#[test]
fn single_tick_wraps_and_reports_summary() {
    let output = gridsnake(&["--width", "8", "--spawn", "0", "--ticks", "1", "--frames"]);
    assert!(output.status.success(), "gridsnake should succeed");

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.contains("status: Playing, length: 1, ticks: 1"), "{stdout}");
    let last_row = stdout
        .lines()
        .find(|line| line.starts_with('@'))
        .expect("head row");
    assert_eq!(last_row, "@.......");
}

#[test]
fn narrow_grid_is_rejected() {
    let output = gridsnake(&["--width", "2", "--spawn", "0"]);
    assert!(!output.status.success(), "width 2 must fail");

    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("grid width 2 is below the minimum of 3"), "{stderr}");
}

#[test]
fn exported_snapshot_decodes() {
    let output = gridsnake(&[
        "--width", "6", "--spawn", "20", "--ticks", "12", "--autopilot", "--export",
    ]);
    assert!(output.status.success(), "gridsnake should succeed");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let snapshot = stdout
        .lines()
        .find(|line| line.starts_with("snake:v1:6:"))
        .expect("snapshot line");

    let decoded = gridsnake(&["--decode", snapshot]);
    assert!(decoded.status.success(), "snapshot should decode");
    let board = String::from_utf8(decoded.stdout).expect("utf-8 output");
    assert_eq!(board.lines().filter(|line| line.len() == 6).count(), 6);
    assert_eq!(board.matches('@').count(), 1);
}

#[test]
fn bad_script_is_reported() {
    let output = gridsnake(&["--script", "UUQ"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("invalid --script"), "{stderr}");
}

#[test]
fn scripted_run_follows_headings_and_gaps() {
    for food in ["first-free", "seeded"] {
        let output = gridsnake(&[
            "--width", "5", "--spawn", "12", "--ticks", "3", "--script", "R.D", "--food", food,
            "--frames",
        ]);
        assert!(output.status.success(), "gridsnake should succeed with {food}");

        let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
        assert!(stdout.contains("status: Playing"), "{stdout}");
        assert!(stdout.contains("ticks: 3"), "{stdout}");

        let board: Vec<&str> = stdout
            .lines()
            .skip_while(|line| *line != "tick 3")
            .skip(1)
            .take(5)
            .collect();
        assert_eq!(board.len(), 5, "{stdout}");
        assert_eq!(board.concat().matches('@').count(), 1, "{stdout}");
        assert_eq!(board[3].chars().nth(4), Some('@'), "{stdout}");
    }
}

#[test]
fn oversized_snapshot_is_rejected() {
    let output = gridsnake(&["--decode", "snake:v1:65535:0:AAAAAA"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("invalid frame snapshot"), "{stderr}");
}
