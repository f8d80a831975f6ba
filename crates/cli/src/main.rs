#![deny(warnings)]

mod shell;

use anyhow::Context;
use circular_buffer_core::config::{
    resolve_capacity, Env, ShellConfig, StdEnv, DEFAULT_LOG_LEVEL, ENV_CAPACITY,
};
use clap::Parser;
use shell::Shell;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "circular-buffer")]
#[command(about = "Interactive shell over a fixed-capacity ring buffer")]
struct Args {
    /// Buffer capacity; prompted for when neither this nor the env var is set
    #[arg(long, env = ENV_CAPACITY)]
    capacity: Option<usize>,

    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let cfg = build_config(args, &env)?;

    tracing::info!(capacity = cfg.capacity.map(|c| c.get()), "config loaded");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(stdin.lock(), stdout.lock())
        .run(&cfg)
        .context("interactive shell failed")?;

    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_config(args: Args, env: &impl Env) -> anyhow::Result<ShellConfig> {
    let capacity = resolve_capacity(args.capacity, ENV_CAPACITY, env)
        .with_context(|| format!("invalid --capacity or {ENV_CAPACITY}"))?;
    Ok(ShellConfig { capacity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use circular_buffer_core::config::MapEnv;
    use clap::CommandFactory;

    #[test]
    fn args_parse_capacity_and_log_level() {
        let args = Args::try_parse_from([
            "circular-buffer",
            "--capacity",
            "4",
            "--log-level",
            "debug",
        ])
        .expect("valid args");
        assert_eq!(args.capacity, Some(4));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn build_config_reads_env_when_flag_missing() {
        let args = Args::try_parse_from(["circular-buffer"]).expect("valid args");
        let env = MapEnv::default().with_var(ENV_CAPACITY, "5");
        let cfg = build_config(args, &env).expect("valid config");
        assert_eq!(cfg.capacity.map(|c| c.get()), Some(5));
    }

    #[test]
    fn capacity_flag_is_wired_to_env_var() {
        let cmd = Args::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "capacity")
            .expect("capacity arg");
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(ENV_CAPACITY)));
    }

    #[test]
    fn build_config_rejects_zero_capacity() {
        let args =
            Args::try_parse_from(["circular-buffer", "--capacity", "0"]).expect("valid args");
        let env = MapEnv::default();
        assert!(build_config(args, &env).is_err());
    }
}
