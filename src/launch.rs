use std::path::{Path, PathBuf};

use anyhow::Context;
use starling_core::args::{build_launch_arguments, LaunchArguments};
use starling_core::io::java::classpath::Classpath;
use starling_core::io::java::install::find_java;
use starling_core::io::java::resource::ClasspathResourceLoader;
use starling_core::launch::{launch_server, JavaProcessLauncher, LaunchOutcome};
use starling_core::resolve::{resolve_config, RawLaunchConfig, ServerLaunchConfig};
use starling_shared::output::{MessageContents, MessageLevel, OutputProcess, StarlingOutput};
use starling_shared::util::merge_options;

use crate::config::LauncherConfig;

/// Inputs to a launch, gathered from the launcher config and the command line
#[derive(Debug, Clone, Default)]
pub struct LaunchParameters {
	/// The launcher config, if one was loaded
	pub launcher_config: LauncherConfig,
	/// Settings that take precedence over the launcher config
	pub overrides: RawLaunchConfig,
	/// Classpath entries added after the ones from the launcher config
	pub classpath: Vec<String>,
	/// Java executable, overriding the launcher config
	pub java: Option<PathBuf>,
	/// Working directory, overriding the launcher config
	pub dir: Option<PathBuf>,
}

/// A launch with its configuration resolved, ready to be run
#[derive(Debug)]
pub struct PreparedLaunch {
	/// The resolved server settings
	pub config: ServerLaunchConfig,
	/// The runtime classpath
	pub classpath: Classpath,
	/// Working directory for the server
	pub dir: Option<PathBuf>,
	/// Java executable to use, if one was configured
	pub java: Option<PathBuf>,
	launcher_config: LauncherConfig,
}

/// Resolve all of the configuration for a launch
pub fn prepare_launch(
	params: LaunchParameters,
	o: &mut impl StarlingOutput,
) -> anyhow::Result<PreparedLaunch> {
	let process = OutputProcess::new(o);
	process.0.display(
		MessageContents::StartProcess("Resolving server configuration".into()),
		MessageLevel::Extra,
	);

	let dir = merge_options(
		params.launcher_config.dir.as_ref().map(PathBuf::from),
		params.dir,
	);

	// Relative entries are relative to the directory the server runs in, so that the
	// properties resource is found on the same classpath the server sees
	let mut classpath = Classpath::new();
	for entry in params.launcher_config.classpath.iter().chain(params.classpath.iter()) {
		classpath
			.add_pattern(entry, dir.as_deref())
			.with_context(|| format!("Failed to add classpath entry {entry}"))?;
	}
	let java = merge_options(
		params.launcher_config.java.as_ref().map(PathBuf::from),
		params.java,
	);

	let raw = params
		.launcher_config
		.server
		.clone()
		.merge(params.overrides);
	let loader = ClasspathResourceLoader::new(&classpath);
	// Relative config files are checked against the directory the server runs in
	let base = dir.clone().unwrap_or_default();
	let exists = |path: &Path| base.join(path).exists();
	let config = resolve_config(raw, &loader, &exists, &mut *process.0)
		.context("Failed to resolve server configuration")?;

	Ok(PreparedLaunch {
		config,
		classpath,
		dir,
		java,
		launcher_config: params.launcher_config,
	})
}

impl PreparedLaunch {
	/// Get the arguments this launch would use
	pub fn arguments(&self, spawn: bool) -> LaunchArguments {
		build_launch_arguments(&self.config, spawn)
	}

	/// Find Java and start the server
	pub fn launch(self, spawn: bool, o: &mut impl StarlingOutput) -> anyhow::Result<LaunchOutcome> {
		let java = find_java(self.java.as_deref()).context("Failed to find Java")?;
		o.display(
			MessageContents::Property(
				"Using Java".into(),
				Box::new(MessageContents::Simple(java.to_string_lossy().into())),
			),
			MessageLevel::Debug,
		);

		let launch_config = self.launcher_config.create_launch_configuration(self.dir);
		let mut launcher = JavaProcessLauncher::new(java, launch_config);
		let outcome = launch_server(&self.config, &self.classpath, spawn, &mut launcher, o)
			.context("Failed to launch server")?;

		Ok(outcome)
	}
}
