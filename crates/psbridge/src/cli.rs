//! Command-line arguments for the `psbridge` binary

use crate::config::BridgeConfig;
use clap::Parser;
use psbridge_protocol::EchoRequest;
use std::path::PathBuf;
use std::time::Duration;

/// Send a JSON request to a child process over stdin and decode its reply.
#[derive(Debug, Parser)]
#[command(name = "psbridge")]
#[command(
    about = "Send a JSON request to a child process over stdin and decode its reply",
    long_about = None
)]
pub struct Args {
    /// Name to send
    #[arg(long, default_value = "Tibi")]
    pub name: String,

    /// Number to send
    #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
    pub number: i64,

    /// Interpreter or executable to launch [env: PSBRIDGE_INTERPRETER]
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Script for the interpreter to run [env: PSBRIDGE_SCRIPT]
    #[arg(long, conflicts_with = "no_script")]
    pub script: Option<PathBuf>,

    /// Run the executable directly, without a script
    #[arg(long)]
    pub no_script: bool,

    /// Operation to request [env: PSBRIDGE_OPERATION]
    #[arg(long)]
    pub operation: Option<String>,

    /// Kill the child after this many seconds, 0 to wait forever [env: PSBRIDGE_TIMEOUT]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Working directory for the child [env: PSBRIDGE_WORKDIR]
    #[arg(long)]
    pub working_dir: Option<PathBuf>,
}

impl Args {
    /// The request described by `--name` and `--number`
    pub fn request(&self) -> EchoRequest {
        EchoRequest::new(self.name.clone(), self.number)
    }

    /// Apply command-line overrides on top of `config`
    pub fn apply(&self, mut config: BridgeConfig) -> BridgeConfig {
        if let Some(interpreter) = &self.interpreter {
            config.interpreter = interpreter.clone();
        }
        if self.no_script {
            config.script = None;
        } else if let Some(script) = &self.script {
            config.script = Some(script.clone());
        }
        if let Some(operation) = &self.operation {
            config.operation = operation.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(dir) = &self.working_dir {
            config.working_dir = Some(dir.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("psbridge").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_build_fixed_request() {
        let args = parse(&[]);
        assert_eq!(args.request(), EchoRequest::new("Tibi", 42));
        assert_eq!(args.apply(BridgeConfig::default()), BridgeConfig::default());
    }

    #[rstest]
    #[case(&["--number", "-7"], -7)]
    #[case(&["--number=0"], 0)]
    #[case(&["--number", "9223372036854775807"], i64::MAX)]
    fn test_number_parsing(#[case] argv: &[&str], #[case] expected: i64) {
        assert_eq!(parse(argv).number, expected);
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "--name",
            "Ada",
            "--interpreter",
            "json-echo",
            "--no-script",
            "--operation",
            "shout",
            "--timeout-secs",
            "3",
            "--working-dir",
            "/tmp",
        ]);
        let config = args.apply(BridgeConfig::default());

        assert_eq!(args.request().name, "Ada");
        assert_eq!(config.interpreter, "json-echo");
        assert!(config.script.is_none());
        assert_eq!(config.operation, "shout");
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.working_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_zero_timeout_clears_configured_timeout() {
        let base = BridgeConfig {
            timeout: Some(Duration::from_secs(30)),
            ..Default::default()
        };
        let config = parse(&["--timeout-secs", "0"]).apply(base);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_script_conflicts_with_no_script() {
        let result = Args::try_parse_from(["psbridge", "--script", "a.ps1", "--no-script"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_integer_number() {
        assert!(Args::try_parse_from(["psbridge", "--number", "4.2"]).is_err());
    }
}
