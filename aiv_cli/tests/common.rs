use assert_cmd::Command;

pub fn aiv_cmd() -> Command {
	let mut cmd = Command::cargo_bin("aiv").unwrap_or_else(|e| panic!("cargo bin: {e}"));
	cmd.env("NO_COLOR", "1");
	cmd
}
