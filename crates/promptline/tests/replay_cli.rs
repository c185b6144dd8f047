use std::process::Command;

// Runs the real binary inside a scratch directory so `promptline.log` and
// config discovery stay local to the test.
fn promptline(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_promptline"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("spawn promptline")
}

#[test]
fn change_word_replay_prints_result() {
    let dir = tempfile::tempdir().unwrap();
    let out = promptline(
        dir.path(),
        &["--width", "20", "--text", "hello world", "0cwhi<Esc>"],
    );
    assert!(out.status.success(), "{out:?}");
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("text: \"hi world\""), "{stdout}");
    assert!(stdout.contains("cursor: 1"), "{stdout}");
    assert!(stdout.contains("mode: -- NORMAL --"), "{stdout}");
    assert!(dir.path().join("promptline.log").exists());
}

#[test]
fn local_config_is_discovered() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("promptline.toml"),
        "[vim]\nstart_mode = \"insert\"\n",
    )
    .unwrap();
    let out = promptline(dir.path(), &["--width", "20", "ok"]);
    assert!(out.status.success(), "{out:?}");
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("text: \"ok\""), "{stdout}");
    assert!(stdout.contains("mode: -- INSERT --"), "{stdout}");
}

#[test]
fn malformed_key_script_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = promptline(dir.path(), &["--width", "20", "d<Esc"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("parsing keys"), "{stderr}");
}
