use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use unfurl_cli::{Args, run};

/// Collects all .txt files from a directory
fn collect_txt_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("txt")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Samples live at the workspace root, not in the crate
fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples")
}

fn args_for(input: &Path, output_dir: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output_dir: output_dir.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_samples = collect_txt_files(samples_dir());

    assert!(
        !valid_samples.is_empty(),
        "No valid samples found in samples/"
    );

    let mut failed_samples = Vec::new();

    for sample_path in &valid_samples {
        let output_dir = temp_dir
            .path()
            .join(sample_path.file_stem().unwrap().to_string_lossy().as_ref());

        if let Err(e) = run(&args_for(sample_path, &output_dir)) {
            failed_samples.push((sample_path.clone(), e));
        }
    }

    if !failed_samples.is_empty() {
        eprintln!("\nValid samples that failed:");
        for (path, err) in &failed_samples {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid sample(s) failed unexpectedly", failed_samples.len());
    }

    println!("✅ All {} valid samples passed", valid_samples.len());
}

#[test]
fn e2e_smoke_test_error_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_samples = collect_txt_files(samples_dir().join("errors"));

    assert!(
        !error_samples.is_empty(),
        "No error samples found in samples/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for sample_path in &error_samples {
        let output_dir = temp_dir.path().join(format!(
            "error_{}",
            sample_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(sample_path, &output_dir)).is_ok() {
            unexpectedly_succeeded.push(sample_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError samples that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error sample(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error samples failed as expected",
        error_samples.len()
    );
}

#[test]
fn e2e_python_project_layout() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("extracted_repo");
    let input = samples_dir().join("python_project.txt");

    run(&args_for(&input, &output_dir)).expect("Failed to extract sample");

    assert!(output_dir.join("docs").is_dir());
    assert!(output_dir.join("src/tests").is_dir());
    assert_eq!(
        fs::read_to_string(output_dir.join("Makefile")).unwrap(),
        "test:\n\tpython -m pytest"
    );
    assert_eq!(
        fs::read_to_string(output_dir.join("src/app/__init__.py")).unwrap(),
        ""
    );
    assert_eq!(
        fs::read_to_string(output_dir.join("src/app/main.py")).unwrap(),
        "def main() -> int:\n    print(\"hello\")\n    return 0\n\n\nif __name__ == \"__main__\":\n    raise SystemExit(main())"
    );
}

#[test]
fn e2e_duplicate_block_last_wins() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");
    let input = samples_dir().join("blocks_only.txt");

    run(&args_for(&input, &output_dir)).expect("Failed to extract sample");

    assert_eq!(
        fs::read_to_string(output_dir.join("config/settings.toml")).unwrap(),
        "[server]\nport = 9090"
    );
}

#[test]
fn e2e_rerun_into_existing_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");
    let input = samples_dir().join("windows_line_endings.txt");

    run(&args_for(&input, &output_dir)).expect("First run failed");
    run(&args_for(&input, &output_dir)).expect("Second run failed");

    assert_eq!(
        fs::read_to_string(output_dir.join("lib/util.rs")).unwrap(),
        "pub fn id<T>(x: T) -> T {\n    x\n}"
    );
}

#[test]
fn e2e_missing_config_file_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut args = args_for(
        &samples_dir().join("blocks_only.txt"),
        &temp_dir.path().join("out"),
    );
    args.config = Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string());

    assert!(run(&args).is_err());
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn e2e_rerun_without_overwrite_keeps_succeeding() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");
    let input = temp_dir.path().join("dump.txt");
    let config = temp_dir.path().join("config.toml");
    let separator = "-".repeat(40);
    fs::write(
        &input,
        format!("/../x.txt:\n{separator}\n1 | escape\n\n/a.txt:\n{separator}\n1 | stay\n\n"),
    )
    .unwrap();
    fs::write(&config, "[output]\noverwrite_existing = false\n").unwrap();

    let mut args = args_for(&input, &output_dir);
    args.config = Some(config.to_string_lossy().to_string());

    run(&args).expect("First run failed");
    run(&args).expect("Second run must not report every file as rejected");

    assert_eq!(fs::read_to_string(output_dir.join("a.txt")).unwrap(), "stay");
    assert!(!temp_dir.path().join("x.txt").exists());
}
