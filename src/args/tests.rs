use super::*;
use clap::Parser;
use std::time::Duration;

#[test]
fn parse_args_requires_file() -> Result<(), String> {
    if HarnessArgs::try_parse_from(["fetchplan"]).is_ok() {
        return Err("Expected missing --file to fail".to_owned());
    }
    Ok(())
}

#[test]
fn parse_args_defaults() -> Result<(), String> {
    let args = HarnessArgs::try_parse_from(["fetchplan", "-f", "plan.txt"])
        .map_err(|err| format!("Expected parse success: {}", err))?;
    if args.follow_redirects {
        return Err("Expected redirects off by default".to_owned());
    }
    if args.debug {
        return Err("Expected debug off by default".to_owned());
    }
    if args.connect_timeout != Duration::from_secs(10) {
        return Err(format!(
            "Unexpected default connect timeout: {:?}",
            args.connect_timeout
        ));
    }
    Ok(())
}

#[test]
fn parse_args_short_flags() -> Result<(), String> {
    let args = HarnessArgs::try_parse_from(["fetchplan", "-f", "plan.txt", "-r", "-d"])
        .map_err(|err| format!("Expected parse success: {}", err))?;
    if !args.follow_redirects {
        return Err("Expected -r to enable redirects".to_owned());
    }
    if !args.debug {
        return Err("Expected -d to enable debug echo".to_owned());
    }
    Ok(())
}

#[test]
fn parse_connect_timeout_millis() -> Result<(), String> {
    let args = HarnessArgs::try_parse_from([
        "fetchplan",
        "-f",
        "plan.txt",
        "--connect-timeout",
        "250ms",
    ])
    .map_err(|err| format!("Expected parse success: {}", err))?;
    if args.connect_timeout != Duration::from_millis(250) {
        return Err(format!(
            "Unexpected connect timeout: {:?}",
            args.connect_timeout
        ));
    }
    Ok(())
}

#[test]
fn parse_connect_timeout_rejects_garbage() -> Result<(), String> {
    if HarnessArgs::try_parse_from(["fetchplan", "-f", "plan.txt", "--connect-timeout", "soon"])
        .is_ok()
    {
        return Err("Expected invalid duration to fail".to_owned());
    }
    Ok(())
}

#[test]
fn parse_duration_arg_rejects_zero() -> Result<(), String> {
    if parsers::parse_duration_arg("0s").is_ok() {
        return Err("Expected zero duration to fail".to_owned());
    }
    Ok(())
}

#[test]
fn parse_duration_arg_defaults_to_seconds() -> Result<(), String> {
    let duration =
        parsers::parse_duration_arg("3").map_err(|err| format!("Expected Ok, got: {}", err))?;
    if duration != Duration::from_secs(3) {
        return Err(format!("Unexpected duration: {:?}", duration));
    }
    Ok(())
}
