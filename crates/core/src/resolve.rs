use std::path::Path;

use serde::Deserialize;
use starling_shared::output::{MessageContents, MessageLevel, StarlingOutput};
use starling_shared::util::merge_options;

use crate::error::LaunchError;
use crate::io::properties::Properties;
use crate::logging::{LogLevel, ServerLogging, DEFAULT_LOGGING};

/// Filename of the properties resource looked up inside the config directory
pub const PROPERTIES_RESOURCE: &str = "starling-maven-plugin.properties";
/// The server class that is run when none is configured
pub const DEFAULT_CLASS_NAME: &str = "com.opengamma.component.OpenGammaComponentServer";
/// Memory arguments used when none are configured
pub const DEFAULT_VM_MEMORY_ARGS: &str = "-Xms512m -Xmx1536m -XX:MaxPermSize=512M";

/// Prefix for a config file read from the filesystem
pub const FILE_PREFIX: &str = "file:";
/// Prefix for a config file read from the classpath
pub const CLASSPATH_PREFIX: &str = "classpath:";

/// Property keys that can override the launch settings
pub mod keys {
	/// The class to run
	pub const CLASS: &str = "server.main.class";
	/// The server configuration file
	pub const CONFIG_FILE: &str = "server.main.configFile";
	/// Startup logging level
	pub const STARTUP_LOGGING: &str = "server.main.startupLogging";
	/// Server logging level or file
	pub const SERVER_LOGGING: &str = "server.main.serverLogging";
	/// Memory arguments
	pub const VM_MEMORY_ARGS: &str = "server.main.vmMemoryArgs";
	/// Additional VM arguments
	pub const VM_ARGS: &str = "server.main.vmArgs";
}

/// Launch settings as given by the caller, before defaults and overrides are applied
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLaunchConfig {
	/// Classpath directory containing a properties resource that overrides the other settings
	pub config: Option<String>,
	/// The class to run
	pub class_name: Option<String>,
	/// The configuration file to pass to the server
	pub config_file: Option<String>,
	/// Logging level for server startup
	pub startup_logging: Option<String>,
	/// Logging level for the server, or the path to a logback config file
	pub server_logging: Option<String>,
	/// Memory and GC arguments for the VM
	pub vm_memory_args: Option<String>,
	/// Additional arguments for the VM
	pub vm_args: Option<String>,
}

impl RawLaunchConfig {
	/// Merge with another config, with the other one taking precedence
	pub fn merge(self, other: Self) -> Self {
		Self {
			config: merge_options(self.config, other.config),
			class_name: merge_options(self.class_name, other.class_name),
			config_file: merge_options(self.config_file, other.config_file),
			startup_logging: merge_options(self.startup_logging, other.startup_logging),
			server_logging: merge_options(self.server_logging, other.server_logging),
			vm_memory_args: merge_options(self.vm_memory_args, other.vm_memory_args),
			vm_args: merge_options(self.vm_args, other.vm_args),
		}
	}
}

/// Fully resolved launch settings. This is only read after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerLaunchConfig {
	/// The config directory the settings were loaded from, if any
	pub config: Option<String>,
	/// The class to run
	pub class_name: String,
	/// The configuration file, always starting with `file:` or `classpath:`
	pub config_file: String,
	/// Logging level for server startup
	pub startup_logging: LogLevel,
	/// Logging for the running server
	pub server_logging: ServerLogging,
	/// Memory and GC arguments for the VM
	pub vm_memory_args: Option<String>,
	/// Additional arguments for the VM
	pub vm_args: Option<String>,
}

/// Something that can find named resources, such as a classpath
pub trait ResourceLoader {
	/// Read the contents of a resource. Returns Ok(None) if the resource does not exist
	fn read_resource(&self, name: &str) -> std::io::Result<Option<Vec<u8>>>;
}

/// Something that can check if a file exists
pub trait FileExists {
	/// Checks if there is a file at the path
	fn exists(&self, path: &Path) -> bool;
}

impl<F: Fn(&Path) -> bool> FileExists for F {
	fn exists(&self, path: &Path) -> bool {
		self(path)
	}
}

/// Checks against the local filesystem
pub struct LocalFileSystem;

impl FileExists for LocalFileSystem {
	fn exists(&self, path: &Path) -> bool {
		path.exists()
	}
}

/// Resolve the launch settings. Defaults are applied first, then values from the
/// properties resource in the config directory if one is set. The config file is then
/// checked and given a `file:` or `classpath:` prefix
pub fn resolve_config(
	raw: RawLaunchConfig,
	loader: &impl ResourceLoader,
	fs: &impl FileExists,
	o: &mut impl StarlingOutput,
) -> Result<ServerLaunchConfig, LaunchError> {
	let mut class_name = raw.class_name.unwrap_or(DEFAULT_CLASS_NAME.into());
	let mut config_file = raw.config_file;
	let mut startup_logging = raw.startup_logging.unwrap_or(DEFAULT_LOGGING.into());
	let mut server_logging = raw.server_logging.unwrap_or(DEFAULT_LOGGING.into());
	let mut vm_memory_args = Some(raw.vm_memory_args.unwrap_or(DEFAULT_VM_MEMORY_ARGS.into()));
	let mut vm_args = raw.vm_args;

	if let Some(config) = &raw.config {
		let resource = get_properties_resource_name(config);
		let properties = load_properties(&resource, loader)?;
		o.display(
			MessageContents::Property(
				"Loaded settings from".into(),
				Box::new(MessageContents::Simple(resource.clone())),
			),
			MessageLevel::Debug,
		);
		for (key, value) in properties.iter() {
			o.display(
				MessageContents::ListItem(Box::new(MessageContents::Property(
					key.into(),
					Box::new(MessageContents::Simple(value.into())),
				))),
				MessageLevel::Trace,
			);
		}

		override_value(&properties, keys::CLASS, &mut class_name);
		override_option(&properties, keys::CONFIG_FILE, &mut config_file);
		override_value(&properties, keys::STARTUP_LOGGING, &mut startup_logging);
		override_value(&properties, keys::SERVER_LOGGING, &mut server_logging);
		override_option(&properties, keys::VM_MEMORY_ARGS, &mut vm_memory_args);
		override_option(&properties, keys::VM_ARGS, &mut vm_args);
	}

	let config_file = match config_file {
		Some(file) if !file.is_empty() => normalize_config_file(file, fs),
		_ => return Err(LaunchError::MissingConfigFile),
	};
	let startup_logging = LogLevel::parse_startup(&startup_logging)?;
	let server_logging = ServerLogging::parse(&server_logging);

	Ok(ServerLaunchConfig {
		config: raw.config,
		class_name,
		config_file,
		startup_logging,
		server_logging,
		vm_memory_args,
		vm_args,
	})
}

/// Get the name of the properties resource for a config directory
pub fn get_properties_resource_name(config: &str) -> String {
	format!("{config}/{PROPERTIES_RESOURCE}")
}

/// Load and parse the properties resource
fn load_properties(
	resource: &str,
	loader: &impl ResourceLoader,
) -> Result<Properties, LaunchError> {
	let contents = loader
		.read_resource(resource)
		.map_err(|e| LaunchError::resource_read(resource, e))?
		.ok_or_else(|| LaunchError::ResourceNotFound(resource.to_string()))?;

	Properties::parse(&contents).map_err(|e| LaunchError::resource_read(resource, e))
}

fn override_value(properties: &Properties, key: &str, target: &mut String) {
	if let Some(value) = properties.get(key) {
		*target = value.to_string();
	}
}

fn override_option(properties: &Properties, key: &str, target: &mut Option<String>) {
	if let Some(value) = properties.get(key) {
		*target = Some(value.to_string());
	}
}

/// Give the config file a `file:` prefix if it exists on the filesystem, or a
/// `classpath:` prefix otherwise. Files that already have one of the prefixes are left alone
pub fn normalize_config_file(config_file: String, fs: &impl FileExists) -> String {
	if config_file.starts_with(FILE_PREFIX) || config_file.starts_with(CLASSPATH_PREFIX) {
		return config_file;
	}

	if fs.exists(Path::new(&config_file)) {
		format!("{FILE_PREFIX}{config_file}")
	} else {
		format!("{CLASSPATH_PREFIX}{config_file}")
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use starling_shared::output::NoOp;

	use super::*;

	/// Loader backed by a map of resource names to contents
	#[derive(Default)]
	struct MapLoader(HashMap<String, String>);

	impl MapLoader {
		fn with(name: &str, contents: &str) -> Self {
			let mut out = Self::default();
			out.0.insert(name.into(), contents.into());
			out
		}
	}

	impl ResourceLoader for MapLoader {
		fn read_resource(&self, name: &str) -> std::io::Result<Option<Vec<u8>>> {
			Ok(self.0.get(name).map(|x| x.as_bytes().to_vec()))
		}
	}

	struct FailingLoader;

	impl ResourceLoader for FailingLoader {
		fn read_resource(&self, _name: &str) -> std::io::Result<Option<Vec<u8>>> {
			Err(std::io::Error::other("disk on fire"))
		}
	}

	fn nothing_exists(_: &Path) -> bool {
		false
	}

	fn resolve(
		raw: RawLaunchConfig,
		loader: &impl ResourceLoader,
	) -> Result<ServerLaunchConfig, LaunchError> {
		resolve_config(raw, loader, &nothing_exists, &mut NoOp)
	}

	fn raw_with_file(file: &str) -> RawLaunchConfig {
		RawLaunchConfig {
			config_file: Some(file.into()),
			..Default::default()
		}
	}

	#[test]
	fn test_defaults() {
		let config = resolve(raw_with_file("app.cfg"), &MapLoader::default()).unwrap();
		assert_eq!(config.class_name, DEFAULT_CLASS_NAME);
		assert_eq!(config.config_file, "classpath:app.cfg");
		assert_eq!(config.startup_logging, LogLevel::Warn);
		assert_eq!(config.server_logging, ServerLogging::Level(LogLevel::Warn));
		assert_eq!(config.vm_memory_args.as_deref(), Some(DEFAULT_VM_MEMORY_ARGS));
		assert_eq!(config.vm_args, None);
		assert_eq!(config.config, None);
	}

	#[test]
	fn test_config_file_normalization() {
		let exists = |_: &Path| true;
		assert_eq!(
			normalize_config_file("app.cfg".into(), &nothing_exists),
			"classpath:app.cfg"
		);
		assert_eq!(normalize_config_file("app.cfg".into(), &exists), "file:app.cfg");
		assert_eq!(
			normalize_config_file("file:app.cfg".into(), &nothing_exists),
			"file:app.cfg"
		);
		assert_eq!(
			normalize_config_file("classpath:app.cfg".into(), &exists),
			"classpath:app.cfg"
		);
	}

	#[test]
	fn test_config_file_on_local_filesystem() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("app.cfg");
		std::fs::write(&path, b"").unwrap();
		let path = path.to_string_lossy().to_string();

		assert_eq!(
			normalize_config_file(path.clone(), &LocalFileSystem),
			format!("file:{path}")
		);
		let missing = dir.path().join("missing.cfg").to_string_lossy().to_string();
		assert_eq!(
			normalize_config_file(missing.clone(), &LocalFileSystem),
			format!("classpath:{missing}")
		);
	}

	#[test]
	fn test_missing_config_file() {
		let err = resolve_config(
			RawLaunchConfig::default(),
			&MapLoader::default(),
			&nothing_exists,
			&mut NoOp,
		)
		.unwrap_err();
		assert!(matches!(err, LaunchError::MissingConfigFile));

		let err = resolve(raw_with_file(""), &MapLoader::default()).unwrap_err();
		assert!(matches!(err, LaunchError::MissingConfigFile));
	}

	#[test]
	fn test_properties_override() {
		let loader = MapLoader::with(
			"myserver/starling-maven-plugin.properties",
			"server.main.configFile=custom.cfg\n\
			 server.main.startupLogging=DEBUG\n\
			 server.main.vmArgs=-Dx=y",
		);
		let raw = RawLaunchConfig {
			config: Some("myserver".into()),
			config_file: Some("ignored.cfg".into()),
			class_name: Some("com.example.Main".into()),
			..Default::default()
		};
		let config = resolve_config(raw, &loader, &nothing_exists, &mut NoOp).unwrap();

		assert_eq!(config.config_file, "classpath:custom.cfg");
		assert_eq!(config.startup_logging, LogLevel::Debug);
		assert_eq!(config.vm_args.as_deref(), Some("-Dx=y"));
		// Keys that are not present leave the given values alone
		assert_eq!(config.class_name, "com.example.Main");
		assert_eq!(config.vm_memory_args.as_deref(), Some(DEFAULT_VM_MEMORY_ARGS));
		assert_eq!(config.config.as_deref(), Some("myserver"));
	}

	#[test]
	fn test_properties_supply_config_file() {
		let loader = MapLoader::with(
			"dev/starling-maven-plugin.properties",
			"server.main.configFile=classpath:fullstack/dev.ini",
		);
		let raw = RawLaunchConfig {
			config: Some("dev".into()),
			..Default::default()
		};
		let config = resolve_config(raw, &loader, &nothing_exists, &mut NoOp).unwrap();
		assert_eq!(config.config_file, "classpath:fullstack/dev.ini");
	}

	#[test]
	fn test_empty_property_still_overrides() {
		let loader = MapLoader::with(
			"dev/starling-maven-plugin.properties",
			"server.main.configFile=a.ini\nserver.main.vmMemoryArgs=",
		);
		let raw = RawLaunchConfig {
			config: Some("dev".into()),
			..Default::default()
		};
		let config = resolve_config(raw, &loader, &nothing_exists, &mut NoOp).unwrap();
		assert_eq!(config.vm_memory_args.as_deref(), Some(""));
	}

	#[test]
	fn test_resource_not_found() {
		let raw = RawLaunchConfig {
			config: Some("nowhere".into()),
			config_file: Some("app.cfg".into()),
			..Default::default()
		};
		let err = resolve(raw, &MapLoader::default()).unwrap_err();
		assert!(matches!(
			err,
			LaunchError::ResourceNotFound(ref x) if x == "nowhere/starling-maven-plugin.properties"
		));
	}

	#[test]
	fn test_resource_read_failures() {
		let raw = RawLaunchConfig {
			config: Some("dev".into()),
			config_file: Some("app.cfg".into()),
			..Default::default()
		};
		let err = resolve(raw.clone(), &FailingLoader).unwrap_err();
		assert!(matches!(err, LaunchError::ResourceRead { .. }));

		let loader = MapLoader::with("dev/starling-maven-plugin.properties", "bad=\\uZZ");
		let err = resolve_config(raw, &loader, &nothing_exists, &mut NoOp).unwrap_err();
		assert!(matches!(err, LaunchError::ResourceRead { .. }));
	}

	#[test]
	fn test_invalid_startup_logging() {
		let raw = RawLaunchConfig {
			startup_logging: Some("TRACE".into()),
			..raw_with_file("app.cfg")
		};
		let err = resolve(raw, &MapLoader::default()).unwrap_err();
		assert!(matches!(err, LaunchError::InvalidStartupLogging(ref x) if x == "TRACE"));
	}

	#[test]
	fn test_custom_server_logging_is_accepted() {
		let raw = RawLaunchConfig {
			server_logging: Some("/custom/path.xml".into()),
			..raw_with_file("app.cfg")
		};
		let config =
			resolve_config(raw, &MapLoader::default(), &nothing_exists, &mut NoOp).unwrap();
		assert_eq!(
			config.server_logging,
			ServerLogging::File("/custom/path.xml".into())
		);
	}

	#[test]
	fn test_raw_merge() {
		let file = RawLaunchConfig {
			class_name: Some("a.A".into()),
			vm_args: Some("-Dfile".into()),
			..Default::default()
		};
		let flags = RawLaunchConfig {
			vm_args: Some("-Dflag".into()),
			..Default::default()
		};
		let merged = file.merge(flags);
		assert_eq!(merged.class_name.as_deref(), Some("a.A"));
		assert_eq!(merged.vm_args.as_deref(), Some("-Dflag"));
	}
}
