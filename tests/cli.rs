use std::error::Error;
use std::process::{Command, Output};

const PACKED_SHUFFLE: &str = "192658906865088603127525391421771642279671466717216";

fn bitperm_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bitperm"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(bitperm_command().args(args).output()?)
}

fn stdout_of(output: &Output) -> Result<String, Box<dyn Error>> {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout.clone())?)
}

#[test]
fn cli_version_and_help() -> Result<(), Box<dyn Error>> {
    let version = stdout_of(&run(&["--version"])?)?;
    assert!(version.starts_with("bitperm "));
    assert!(version.contains(env!("CARGO_PKG_VERSION")));

    let help = stdout_of(&run(&[])?)?;
    assert!(help.contains("generate"));
    assert!(help.contains("info"));
    assert!(help.contains("apply"));
    Ok(())
}

#[test]
fn cli_generate_is_reproducible_with_seed() -> Result<(), Box<dyn Error>> {
    let args = ["generate", "--seed", "passphrase", "--length", "40", "--json"];
    let first = stdout_of(&run(&args)?)?;
    let second = stdout_of(&run(&args)?)?;
    assert_eq!(first, second, "seeded output must not change between runs");

    let report: serde_json::Value = serde_json::from_str(&first)?;
    assert_eq!(report["kind"], "shuffle");
    assert_eq!(report["length"], 40);

    // the packed form feeds straight back into apply
    let packed = report["packed"].as_str().ok_or("packed is not a string")?;
    let shuffled = stdout_of(&run(&["apply", packed, "2009", "-7"])?)?;
    let values: Vec<&str> = shuffled.lines().collect();
    assert_eq!(values.len(), 2);

    let restored = stdout_of(&run(&["apply", "--invert", packed, values[0], values[1]])?)?;
    assert_eq!(restored, "2009\n-7\n");
    Ok(())
}

#[test]
fn cli_generate_each_kind() -> Result<(), Box<dyn Error>> {
    for kind in ["permutation", "derangement", "involution", "inversion"] {
        let out = stdout_of(&run(&["g", "--kind", kind, "-n", "12"])?)?;
        assert!(out.contains("Length: 12"), "{}: {}", kind, out);
    }

    let derangement = stdout_of(&run(&["generate", "--kind", "derangement", "-n", "9"])?)?;
    assert!(derangement.contains("Fixed points: 0"));
    assert!(derangement.contains("Derangement: true"));
    Ok(())
}

#[test]
fn cli_info_reports_structure() -> Result<(), Box<dyn Error>> {
    let info = stdout_of(&run(&["info", "13316", "--kind", "permutation"])?)?;
    assert!(info.contains("Value: Permutation((2, 0, 3, 1))"));
    assert!(info.contains("Cycles: (0, 2, 3, 1)"));
    assert!(info.contains("Inversions: 3"));

    let identity = stdout_of(&run(&["i", "1024"])?)?;
    assert!(identity.contains("Value: (0,)"));
    assert!(identity.contains("Identity: true"));

    let json = stdout_of(&run(&["info", "0xDEADBEEF", "--kind", "xor", "--json"])?)?;
    let report: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(report["kind"], "inversion");
    assert_eq!(report["length"], 32);
    Ok(())
}

#[test]
fn cli_apply_shuffle_vector() -> Result<(), Box<dyn Error>> {
    let forward = stdout_of(&run(&["apply", PACKED_SHUFFLE, "0xDEADBEEF"])?)?;
    assert_eq!(forward.trim(), "3405691582");

    let back = stdout_of(&run(&["a", "--invert", PACKED_SHUFFLE, "3405691582"])?)?;
    assert_eq!(back.trim(), "3735928559");
    Ok(())
}

#[test]
fn cli_rejects_bad_input() -> Result<(), Box<dyn Error>> {
    let below_guard = run(&["info", "20"])?;
    assert!(!below_guard.status.success());
    assert!(String::from_utf8_lossy(&below_guard.stderr).starts_with("Error:"));

    let not_a_number = run(&["apply", "1024", "twelve"])?;
    assert!(!not_a_number.status.success());

    let too_short = run(&["generate", "--kind", "derangement", "-n", "1"])?;
    assert!(!too_short.status.success());
    Ok(())
}
