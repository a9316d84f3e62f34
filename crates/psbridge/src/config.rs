//! Configuration for the bridge

use crate::error::{Error, Result};
use psbridge_protocol::ECHO_OPERATION;
use psbridge_transport::ChildSpec;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default interpreter
pub const DEFAULT_INTERPRETER: &str = "pwsh";

/// Default responder script, relative to the working directory
pub const DEFAULT_SCRIPT: &str = "scripts/json_echo.ps1";

/// Configuration for the bridge.
///
/// Describes which child to run and how long to wait for it. Turned into a
/// [`ChildSpec`] by [`BridgeConfig::child_spec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Interpreter or executable to launch
    pub interpreter: String,

    /// Script passed to the interpreter; `None` runs the executable directly
    pub script: Option<PathBuf>,

    /// Value of the `-Operation` argument
    pub operation: String,

    /// Kill the child after this long; `None` waits indefinitely
    pub timeout: Option<Duration>,

    /// Working directory for the child
    pub working_dir: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            script: Some(PathBuf::from(DEFAULT_SCRIPT)),
            operation: ECHO_OPERATION.to_string(),
            timeout: None,
            working_dir: None,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `PSBRIDGE_INTERPRETER` for the executable to launch
    /// - `PSBRIDGE_SCRIPT` for the script path (empty disables the script)
    /// - `PSBRIDGE_OPERATION` for the operation name
    /// - `PSBRIDGE_TIMEOUT` for the child timeout in seconds (`0` disables it)
    /// - `PSBRIDGE_WORKDIR` for the child's working directory
    ///
    /// With the `env` feature a `.env` file is loaded first, if present.
    pub fn from_env() -> Result<Self> {
        use std::env;

        #[cfg(feature = "env")]
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(interpreter) = env::var("PSBRIDGE_INTERPRETER") {
            config.interpreter = interpreter;
        }

        if let Ok(script) = env::var("PSBRIDGE_SCRIPT") {
            config.script = (!script.is_empty()).then(|| PathBuf::from(script));
        }

        if let Ok(operation) = env::var("PSBRIDGE_OPERATION") {
            config.operation = operation;
        }

        if let Ok(timeout_str) = env::var("PSBRIDGE_TIMEOUT") {
            config.timeout = parse_timeout(&timeout_str)?;
        }

        if let Ok(dir) = env::var("PSBRIDGE_WORKDIR") {
            config.working_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Whether the interpreter is PowerShell, which takes scripts via `-File`
    pub fn is_powershell(&self) -> bool {
        Path::new(&self.interpreter)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| {
                stem.eq_ignore_ascii_case("pwsh") || stem.eq_ignore_ascii_case("powershell")
            })
    }

    /// Build the child invocation:
    /// `<interpreter> [-File] [<script>] -Operation <operation>`
    pub fn child_spec(&self) -> ChildSpec {
        let mut spec = ChildSpec::new(&self.interpreter);

        if let Some(script) = &self.script {
            if self.is_powershell() {
                spec = spec.with_script_flag("-File");
            }
            spec = spec.with_script(script);
        }

        spec = spec.with_arg("-Operation").with_arg(&self.operation);

        if let Some(timeout) = self.timeout {
            spec = spec.with_timeout(timeout);
        }
        if let Some(dir) = &self.working_dir {
            spec = spec.with_working_dir(dir);
        }

        spec
    }
}

fn parse_timeout(raw: &str) -> Result<Option<Duration>> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| Error::Config(format!("PSBRIDGE_TIMEOUT must be whole seconds: {e}")))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const VARS: [&str; 5] = [
        "PSBRIDGE_INTERPRETER",
        "PSBRIDGE_SCRIPT",
        "PSBRIDGE_OPERATION",
        "PSBRIDGE_TIMEOUT",
        "PSBRIDGE_WORKDIR",
    ];

    fn with_env<R>(set: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let vars: Vec<(&str, Option<&str>)> = VARS
            .iter()
            .map(|name| {
                let value = set.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
                (*name, value)
            })
            .collect();
        temp_env::with_vars(vars, f)
    }

    #[test]
    fn test_default_matches_fixed_invocation() {
        let config = BridgeConfig::default();
        assert!(config.is_powershell());
        assert_eq!(
            config.child_spec().display(),
            "pwsh -File scripts/json_echo.ps1 -Operation echo"
        );
        assert!(config.child_spec().timeout.is_none());
    }

    #[test]
    fn test_from_env_defaults() {
        let config = with_env(&[], BridgeConfig::from_env).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_from_env_overrides() {
        let config = with_env(
            &[
                ("PSBRIDGE_INTERPRETER", "/usr/local/bin/pwsh"),
                ("PSBRIDGE_SCRIPT", "/opt/json_echo.ps1"),
                ("PSBRIDGE_OPERATION", "reverse"),
                ("PSBRIDGE_TIMEOUT", "15"),
                ("PSBRIDGE_WORKDIR", "/tmp"),
            ],
            BridgeConfig::from_env,
        )
        .unwrap();

        assert_eq!(config.interpreter, "/usr/local/bin/pwsh");
        assert_eq!(config.script, Some(PathBuf::from("/opt/json_echo.ps1")));
        assert_eq!(config.operation, "reverse");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.working_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_empty_script_disables_script() {
        let config = with_env(
            &[("PSBRIDGE_INTERPRETER", "json-echo"), ("PSBRIDGE_SCRIPT", "")],
            BridgeConfig::from_env,
        )
        .unwrap();

        assert!(config.script.is_none());
        assert_eq!(config.child_spec().display(), "json-echo -Operation echo");
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let config = with_env(&[("PSBRIDGE_TIMEOUT", "0")], BridgeConfig::from_env).unwrap();
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        let err = with_env(&[("PSBRIDGE_TIMEOUT", "soon")], BridgeConfig::from_env).unwrap_err();
        assert_matches!(err, Error::Config(ref msg) if msg.contains("PSBRIDGE_TIMEOUT"));
    }

    #[test]
    fn test_non_powershell_script_has_no_flag() {
        let config = BridgeConfig {
            interpreter: "bash".into(),
            script: Some(PathBuf::from("echo.sh")),
            ..Default::default()
        };
        assert!(!config.is_powershell());
        assert_eq!(config.child_spec().display(), "bash echo.sh -Operation echo");
    }

    #[test]
    fn test_windows_powershell_detected() {
        let config = BridgeConfig {
            interpreter: "powershell.exe".into(),
            ..Default::default()
        };
        assert!(config.is_powershell());
    }
}
