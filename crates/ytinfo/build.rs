use std::process::Command;

fn main() {
	// set what version string to use for the build
	// depends on what git outputs, or "unknown" if git fails
	{
		println!("cargo:rerun-if-changed=build.rs");
		println!("cargo:rerun-if-changed=.git/HEAD");

		let version = Command::new("git")
			.args(["describe", "--tags", "--always", "--dirty"])
			.output()
			.ok()
			.filter(|v| return v.status.success())
			.and_then(|v| return String::from_utf8(v.stdout).ok())
			.map(|v| return v.trim().to_owned())
			.unwrap_or(String::from("unknown"));
		println!("cargo:rustc-env=YTINFO_VERSION={version}");
	}
}
