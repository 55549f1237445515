use assert_cmd::Command;
use mdrun_core::AnyEmptyResult;

#[test]
fn update_replaces_stale_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let doc = tmp.path().join("doc.adoc");

	std::fs::write(
		&doc,
		"intro\n<!-- 🐖 echo hi -->\nstale output\n<!-- 🐓 -->\noutro\n",
	)?;

	let mut cmd = Command::cargo_bin("mdrun")?;
	cmd.env("NO_COLOR", "1")
		.arg(&doc)
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated"));

	let content = std::fs::read_to_string(&doc)?;
	assert!(content.contains("hi"));
	assert!(!content.contains("stale output"));
	assert!(content.contains("<!-- 🐖 echo hi -->"));
	assert!(content.contains("<!-- 🐓 -->"));
	Ok(())
}

#[test]
fn update_is_idempotent() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let doc = tmp.path().join("doc.adoc");

	std::fs::write(
		&doc,
		"<!-- 🐖 echo \"a|b\" -->\nold\n<!-- 🐓 -->\n",
	)?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(&doc)
		.assert()
		.success();
	let first = std::fs::read_to_string(&doc)?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(&doc)
		.assert()
		.success();
	let second = std::fs::read_to_string(&doc)?;

	assert_eq!(first, second);
	Ok(())
}

#[test]
fn update_with_output_flag_leaves_input_untouched() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let doc = tmp.path().join("doc.adoc");
	let dest = tmp.path().join("out.adoc");
	let original = "<!-- 🐖 echo hi -->\nstale\n<!-- 🐓 -->\n";

	std::fs::write(&doc, original)?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(&doc)
		.arg("--output")
		.arg(&dest)
		.assert()
		.success();

	assert_eq!(std::fs::read_to_string(&doc)?, original);
	let written = std::fs::read_to_string(&dest)?;
	assert!(written.contains("hi"));
	assert!(!written.contains("stale"));
	Ok(())
}

#[test]
fn update_noop_document_is_unchanged() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let doc = tmp.path().join("plain.adoc");
	let original = "= Title\n\nNo blocks in here, just a | pipe.\n";

	std::fs::write(&doc, original)?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(&doc)
		.assert()
		.success();

	assert_eq!(std::fs::read_to_string(&doc)?, original);
	Ok(())
}

#[test]
fn dry_run_prints_diff_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let doc = tmp.path().join("doc.adoc");
	let original = "<!-- 🐖 echo hi -->\nstale\n<!-- 🐓 -->\n";

	std::fs::write(&doc, original)?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(&doc)
		.arg("--dry-run")
		.assert()
		.success()
		.stdout(predicates::str::contains("would change"));

	assert_eq!(std::fs::read_to_string(&doc)?, original);
	Ok(())
}

#[test]
fn dry_run_reports_up_to_date_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let doc = tmp.path().join("plain.adoc");
	std::fs::write(&doc, "nothing to do here\n")?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(&doc)
		.arg("--dry-run")
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date"));
	Ok(())
}

#[test]
fn config_file_overrides_markers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let doc = tmp.path().join("doc.adoc");

	std::fs::write(
		tmp.path().join("mdrun.toml"),
		"[markers]\ncommand = \"RUN\"\noutput = \"END\"\n",
	)?;
	std::fs::write(&doc, "<!-- RUN echo hi -->\nstale\n<!-- END -->\n")?;

	Command::cargo_bin("mdrun")?
		.env("NO_COLOR", "1")
		.arg(&doc)
		.assert()
		.success();

	let content = std::fs::read_to_string(&doc)?;
	assert!(content.contains("hi"));
	assert!(!content.contains("stale"));
	Ok(())
}

#[test]
fn version_flag_prints_version() -> AnyEmptyResult {
	Command::cargo_bin("mdrun")?
		.arg("--version")
		.assert()
		.success()
		.stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
	Ok(())
}
