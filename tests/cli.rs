use anyhow::Result;
use ppm_filter::{decoder, encoder, Error, Filter, FilterKind, FormatError};
use std::{fs, path::Path, process::Command};
use tempfile::tempdir;

const ROW: &str = "P3\n3 1\n255\n10 10 10\n20 20 20\n30 30 30\n";

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cli"))
        .args(args)
        .output()
        .expect("failed to spawn cli")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_pipeline_motion_blur() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("in.ppm");
    let output = dir.path().join("out.ppm");
    fs::write(&input, ROW)?;

    let mut image = decoder::read_file(&input)?;
    Filter::new(FilterKind::MotionBlur, Some(2))?.apply(&mut image);
    encoder::write_file(&image, &output)?;

    assert_eq!(
        fs::read_to_string(&output)?,
        "P3\n3 1\n255\n15 15 15\n25 25 25\n30 30 30\n"
    );
    Ok(())
}

#[test]
fn test_read_file_reports_format_error() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("short.ppm");
    fs::write(&input, "P3\n2 2\n255\n1 1 1\n2 2 2\n3 3 3\n")?;

    match decoder::read_file(&input) {
        Err(Error::Format { path, source }) => {
            assert_eq!(path, input);
            assert_eq!(
                source,
                FormatError::PixelCount {
                    expected: 4,
                    found: 3
                }
            );
        }
        other => panic!("expected format error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_cli_invert() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("in.ppm");
    let output = dir.path().join("out.ppm");
    fs::write(&input, ROW)?;

    let out = run(&[path_str(&input), path_str(&output), "invert"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fs::read_to_string(&output)?,
        "P3\n3 1\n255\n245 245 245\n235 235 235\n225 225 225\n"
    );
    Ok(())
}

#[test]
fn test_cli_emboss_ignores_strength() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("in.ppm");
    let output = dir.path().join("out.ppm");
    fs::write(&input, ROW)?;

    let out = run(&[path_str(&input), path_str(&output), "emboss", "3"]);
    assert!(out.status.success());
    assert_eq!(
        fs::read_to_string(&output)?,
        "P3\n3 1\n255\n128 128 128\n128 128 128\n128 128 128\n"
    );
    Ok(())
}

#[test]
fn test_cli_argument_errors_exit_1() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("in.ppm");
    let output = dir.path().join("out.ppm");
    fs::write(&input, ROW)?;
    let (i, o) = (path_str(&input), path_str(&output));

    for args in [
        vec![i, o],
        vec![i, o, "sepia"],
        vec![i, o, "motionblur"],
        vec![i, o, "motionblur", "0"],
        vec![i, o, "motionblur", "two"],
    ] {
        let out = run(&args);
        assert_eq!(out.status.code(), Some(1), "args {args:?}");
        assert!(!out.stderr.is_empty());
    }
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_cli_input_errors_exit_1() -> Result<()> {
    let dir = tempdir()?;
    let bad = dir.path().join("bad.ppm");
    let output = dir.path().join("out.ppm");
    fs::write(&bad, "P6\n1 1\n255\n0 0 0\n")?;

    let out = run(&[path_str(&bad), path_str(&output), "grayscale"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("P3"));

    let missing = dir.path().join("missing.ppm");
    let out = run(&[path_str(&missing), path_str(&output), "grayscale"]);
    assert_eq!(out.status.code(), Some(1));

    assert!(!output.exists());
    Ok(())
}
