
use std::fs;

use tempfile::tempdir;

use support_single::{run_probe, run_probe_with_env, spawn_http_server};

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn failure(output: &std::process::Output) -> String {
    format!(
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_config_without_file_prints_defaults() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_probe(["config", "--strict"], dir.path())?;
    if !output.status.success() {
        return Err(failure(&output));
    }
    let stdout = stdout_of(&output);
    for expected in [
        "source: built-in defaults",
        "api.base.url = https://restcountries.com/v3.1",
        "environment = production",
        "request.timeout.ms = 5000",
        "max.retries = 3",
        "logging.enabled = true",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("missing '{}' in:\n{}", expected, stdout));
        }
    }
    Ok(())
}

#[test]
fn e2e_config_picks_up_working_directory_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    fs::write(
        dir.path().join("config.properties"),
        "environment=staging\nrequest.timeout.ms=1200\nteam=qa\n",
    )
    .map_err(|err| format!("write failed: {}", err))?;

    let output = run_probe(["config"], dir.path())?;
    if !output.status.success() {
        return Err(failure(&output));
    }
    let stdout = stdout_of(&output);
    for expected in [
        "environment = staging",
        "request.timeout.ms = 1200",
        "team = qa",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("missing '{}' in:\n{}", expected, stdout));
        }
    }
    Ok(())
}

#[test]
fn e2e_config_env_var_names_file_and_flag_wins() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let from_env = dir.path().join("env.properties");
    let from_flag = dir.path().join("flag.properties");
    fs::write(&from_env, "environment=from-env\n").map_err(|err| format!("write failed: {}", err))?;
    fs::write(&from_flag, "environment=from-flag\n")
        .map_err(|err| format!("write failed: {}", err))?;
    fs::write(dir.path().join("config.properties"), "environment=from-cwd\n")
        .map_err(|err| format!("write failed: {}", err))?;
    let env_path = from_env.to_string_lossy().into_owned();
    let flag_path = from_flag.to_string_lossy().into_owned();
    let envs = [("COUNTRIES_PROBE_CONFIG", env_path.as_str())];

    let via_env = run_probe_with_env(["config"], dir.path(), &envs)?;
    if !via_env.status.success() {
        return Err(failure(&via_env));
    }
    if !stdout_of(&via_env).contains("environment = from-env") {
        return Err(format!("env file not used:\n{}", failure(&via_env)));
    }

    let via_flag = run_probe_with_env(
        ["config", "--config", flag_path.as_str()],
        dir.path(),
        &envs,
    )?;
    if !via_flag.status.success() {
        return Err(failure(&via_flag));
    }
    if !stdout_of(&via_flag).contains("environment = from-flag") {
        return Err(format!("--config must win:\n{}", failure(&via_flag)));
    }
    Ok(())
}

#[test]
fn e2e_malformed_values_are_logged_once_logging_is_up() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    fs::write(dir.path().join("config.properties"), "logging.enabled=maybe\n")
        .map_err(|err| format!("write failed: {}", err))?;

    let output = run_probe_with_env(["config"], dir.path(), &[("RUST_LOG", "warn")])?;
    if !output.status.success() {
        return Err(failure(&output));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("logging.enabled") || !stderr.contains("maybe") {
        return Err(format!("Expected a warning for the malformed boolean:\n{}", stderr));
    }
    if !stdout_of(&output).contains("logging.enabled = true") {
        return Err(failure(&output));
    }
    Ok(())
}

#[test]
fn e2e_config_strict_rejects_malformed_values() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("broken.properties");
    fs::write(&path, "request.timeout.ms=fast\n").map_err(|err| format!("write failed: {}", err))?;
    let path_arg = path.to_string_lossy().into_owned();

    let lenient = run_probe(["config", "--config", path_arg.as_str()], dir.path())?;
    if !lenient.status.success() || !stdout_of(&lenient).contains("request.timeout.ms = 5000") {
        return Err(failure(&lenient));
    }

    let strict = run_probe(
        ["config", "--strict", "--config", path_arg.as_str()],
        dir.path(),
    )?;
    if strict.status.success() {
        return Err("strict mode must fail on a malformed timeout".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_get_prints_status_and_body() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_probe(["get", "/alpha/us", "--base-url", url.as_str()], dir.path())?;
    if !output.status.success() {
        return Err(failure(&output));
    }
    let stdout = stdout_of(&output);
    if !stdout.contains("200 OK") || !stdout.contains(r#""cca2":"US""#) {
        return Err(format!("unexpected output:\n{}", stdout));
    }

    let missing = run_probe(
        ["get", "/alpha/zz", "--body-only", "--base-url", url.as_str()],
        dir.path(),
    )?;
    if !missing.status.success() {
        return Err(format!("a 404 is not a client failure: {}", failure(&missing)));
    }
    if !stdout_of(&missing).contains(r#""status":404"#) {
        return Err(failure(&missing));
    }
    Ok(())
}

#[test]
fn e2e_request_post_sends_json_with_user_agent() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_probe(
        [
            "request",
            "post",
            "/echo",
            "--data",
            r#"{"name":"Atlantis"}"#,
            "--body-only",
            "--base-url",
            url.as_str(),
        ],
        dir.path(),
    )?;
    if !output.status.success() {
        return Err(failure(&output));
    }
    let stdout = stdout_of(&output);
    let echoed: serde_json::Value = serde_json::from_str(stdout.trim())
        .map_err(|err| format!("echo is not JSON ({}): {}", err, stdout))?;
    if echoed["request"] != "POST /echo HTTP/1.1" {
        return Err(format!("unexpected request line: {}", echoed["request"]));
    }
    if echoed["userAgent"] != "RestCountriesTestSuite/1.0" {
        return Err(format!("unexpected user agent: {}", echoed["userAgent"]));
    }
    if echoed["body"]["name"] != "Atlantis" {
        return Err(format!("unexpected body: {}", echoed["body"]));
    }
    Ok(())
}

#[test]
fn e2e_check_list_and_failures() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let listed = run_probe(["check", "--list"], dir.path())?;
    if !listed.status.success() || !stdout_of(&listed).contains("fields-filter") {
        return Err(failure(&listed));
    }

    let passing = run_probe(
        [
            "check",
            "--only",
            "alpha-code",
            "--only",
            "unknown-alpha-code",
            "--base-url",
            url.as_str(),
        ],
        dir.path(),
    )?;
    if !passing.status.success() || !stdout_of(&passing).contains("2 passed, 0 failed") {
        return Err(failure(&passing));
    }

    let failing = run_probe(
        ["check", "--only", "region-europe", "--base-url", url.as_str()],
        dir.path(),
    )?;
    if failing.status.success() {
        return Err("a failing check must fail the process".to_owned());
    }
    let failed_line = stdout_of(&failing)
        .lines()
        .any(|line| line.starts_with("FAIL") && line.contains("region-europe"));
    if !failed_line {
        return Err(failure(&failing));
    }

    let unknown = run_probe(["check", "--only", "nope"], dir.path())?;
    if unknown.status.success() {
        return Err("unknown check names must be rejected".to_owned());
    }
    Ok(())
}
