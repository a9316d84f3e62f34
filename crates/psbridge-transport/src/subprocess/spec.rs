//! Child process invocation description

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Default PowerShell executable
pub const POWERSHELL: &str = "pwsh";

/// Describes how to start the child process
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildSpec {
    /// Executable to run (looked up on `PATH` when not a path)
    pub program: String,

    /// Flag placed immediately before the script path (`-File` for PowerShell)
    pub script_flag: Option<String>,

    /// Script the interpreter should run; must exist before spawning
    pub script: Option<PathBuf>,

    /// Arguments following the script
    pub args: Vec<String>,

    /// Environment variables to set
    pub env: HashMap<String, String>,

    /// Start the child with an empty environment plus [`ChildSpec::env`]
    pub clear_env: bool,

    /// Working directory for the child
    pub working_dir: Option<PathBuf>,

    /// Kill the child after this long; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl ChildSpec {
    /// Create a spec for a bare program with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            script_flag: None,
            script: None,
            args: Vec::new(),
            env: HashMap::new(),
            clear_env: false,
            working_dir: None,
            timeout: None,
        }
    }

    /// `pwsh -File <script> -Operation <operation>`
    pub fn powershell(script: impl Into<PathBuf>, operation: impl Into<String>) -> Self {
        Self::new(POWERSHELL)
            .with_script_flag("-File")
            .with_script(script)
            .with_arg("-Operation")
            .with_arg(operation)
    }

    /// Set the interpreter flag that precedes the script path
    pub fn with_script_flag(mut self, flag: impl Into<String>) -> Self {
        self.script_flag = Some(flag.into());
        self
    }

    /// Set the script path
    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Add an argument
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add several arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Do not inherit the parent's environment
    pub fn with_clear_env(mut self, clear: bool) -> Self {
        self.clear_env = clear;
        self
    }

    /// Set the working directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full argument vector after the program name
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        if let Some(script) = &self.script {
            if let Some(flag) = &self.script_flag {
                argv.push(OsString::from(flag));
            }
            argv.push(script.clone().into_os_string());
        }
        argv.extend(self.args.iter().map(OsString::from));
        argv
    }

    /// Where the script is expected on disk, relative paths resolved
    /// against the working directory the child will run in
    pub fn resolved_script(&self) -> Option<PathBuf> {
        let script = self.script.as_deref()?;
        match &self.working_dir {
            Some(dir) if script.is_relative() => Some(dir.join(script)),
            _ => Some(script.to_path_buf()),
        }
    }

    /// The script path is set but nothing is there
    pub(crate) fn missing_script(&self) -> Option<PathBuf> {
        self.resolved_script().filter(|p| !p.is_file())
    }

    /// Command line for logs
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.argv().iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    pub(crate) fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.argv());

        if self.clear_env {
            cmd.env_clear();
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }
}
