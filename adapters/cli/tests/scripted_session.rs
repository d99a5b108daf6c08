use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_block-world"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch block-world")
}

#[test]
fn scripted_session_prints_a_frame_per_command() {
    let output = run_cli(&["--columns", "5", "--rows", "5", "--script", "dig,dig,place:wood"]);

    assert!(output.status.success(), "cli failed: {output:?}");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert_eq!(
        stdout.matches("inventory:").count(),
        4,
        "one frame for the initial state and one per command",
    );
    assert!(stdout.contains("info: Steve enters a 5x5 world"));
    assert!(stdout.contains('@'), "the builder is drawn");
}

#[test]
fn same_seed_renders_the_same_session() {
    let args = ["--seed", "9", "--script", "north,east,south,west,dig"];

    let first = run_cli(&args);
    let second = run_cli(&args);

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn unknown_script_tokens_fail_before_playing() {
    let output = run_cli(&["--script", "north,fly"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown command 'fly'"), "stderr was: {stderr}");
}
