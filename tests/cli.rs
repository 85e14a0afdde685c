use assert_cmd::Command;
use predicates::prelude::*;
use snapink::draw::PixelBuffer;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn snapink_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("snapink").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home).env("HOME", config_home);
    cmd
}

fn read_png(path: &Path) -> PixelBuffer {
    let bytes = fs::read(path).unwrap();
    PixelBuffer::read_png(&mut bytes.as_slice()).unwrap()
}

const MARKS: &str = r#"
[[steps]]
action = "tool"
tool = "rectangle"

[[steps]]
action = "style"
color = "blue"
line_width = 4.0

[[steps]]
action = "gesture"
points = [[10.0, 10.0], [30.0, 25.0], [60.0, 50.0]]
"#;

#[test]
fn snapink_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    snapink_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Annotate screenshots by replaying scripted pointer gestures",
        ));
}

#[test]
fn script_is_required() {
    let temp = TempDir::new().unwrap();
    snapink_cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn missing_script_reports_path() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("nope.toml");
    snapink_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(temp.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn blank_canvas_is_annotated_and_saved() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("marks.toml");
    fs::write(&script, MARKS).unwrap();
    let output = temp.path().join("out.png");

    snapink_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .args(["--width", "100", "--height", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out.png"));

    let image = read_png(&output);
    assert_eq!((image.width, image.height), (100, 80));
    assert_eq!(image.pixel(35, 10), Some([0, 0, 255, 255]));
    assert_eq!(image.pixel(35, 30), Some([51, 51, 51, 255]));
}

#[test]
fn input_image_is_cropped() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("shot.png");
    let mut encoded = Vec::new();
    PixelBuffer::filled(64, 48, [255, 255, 255, 255])
        .unwrap()
        .write_png(&mut encoded)
        .unwrap();
    fs::write(&input, encoded).unwrap();

    let script = temp.path().join("crop.toml");
    fs::write(
        &script,
        r#"
[[steps]]
action = "tool"
tool = "crop"

[[steps]]
action = "gesture"
points = [[4.0, 4.0], [36.0, 28.0]]

[[steps]]
action = "resize"
width = 640
height = 480
"#,
    )
    .unwrap();
    let output = temp.path().join("cropped.png");

    snapink_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let image = read_png(&output);
    assert_eq!((image.width, image.height), (32, 24));
}

#[test]
fn config_file_sets_defaults_and_save_location() {
    let temp = TempDir::new().unwrap();
    let save_dir = temp.path().join("saved");
    let config = temp.path().join("custom.toml");
    fs::write(
        &config,
        format!(
            r#"
[drawing]
default_tool = "line"
default_color = [0, 255, 0]
default_line_width = 6.0

[canvas]
background_color = [1.0, 1.0, 1.0, 1.0]

[output]
save_directory = "{}"
filename_template = "result"
"#,
            save_dir.display()
        ),
    )
    .unwrap();

    let script = temp.path().join("line.toml");
    fs::write(
        &script,
        "[[steps]]\naction = \"gesture\"\npoints = [[0.0, 20.0], [50.0, 20.0]]\n",
    )
    .unwrap();

    snapink_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .args(["--width", "50", "--height", "40"])
        .assert()
        .success();

    let image = read_png(&save_dir.join("result.png"));
    assert_eq!(image.pixel(25, 20), Some([0, 255, 0, 255]));
    assert_eq!(image.pixel(25, 5), Some([255, 255, 255, 255]));
}

#[test]
fn invalid_script_action_fails() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("bad.toml");
    fs::write(&script, "[[steps]]\naction = \"undo\"\n").unwrap();

    snapink_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(temp.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse script"));
}
