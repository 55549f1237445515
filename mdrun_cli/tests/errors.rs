use assert_cmd::Command;
use mdrun_core::AnyEmptyResult;

#[test]
fn unterminated_command_block_fails_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let doc = tmp.path().join("doc.adoc");
	let original = "intro\n<!-- 🐖 echo hi\nstill inside the block\n";

	std::fs::write(&doc, original)?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(&doc)
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("never closed"));

	assert_eq!(std::fs::read_to_string(&doc)?, original);
	Ok(())
}

#[test]
fn unterminated_output_region_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let doc = tmp.path().join("doc.adoc");

	std::fs::write(&doc, "<!-- 🐖 echo hi -->\nstale\n")?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(&doc)
		.assert()
		.failure()
		.code(2);
	Ok(())
}

#[test]
fn missing_input_file_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(tmp.path().join("does-not-exist.adoc"))
		.assert()
		.failure()
		.code(2);
	Ok(())
}

#[test]
fn invalid_config_file_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let doc = tmp.path().join("doc.adoc");
	let config = tmp.path().join("broken.toml");

	std::fs::write(&doc, "plain\n")?;
	std::fs::write(&config, "[markers]\nnot_a_field = true\n")?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(&doc)
		.arg("--config")
		.arg(&config)
		.assert()
		.failure()
		.code(2);
	Ok(())
}
