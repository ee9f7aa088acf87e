use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use commit_analyzer::{
   Args, SystemSource,
   hook::install_hook,
   pipeline, style,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEBUG_DIRECTIVES: &str = "commit_analyzer=debug,warn";
const DEFAULT_DIRECTIVES: &str = "warn";

/// `RUST_LOG` wins, then `--debug`, then warnings only.
fn log_directives(rust_log: Option<&str>, debug: bool) -> &str {
   match rust_log.map(str::trim).filter(|d| !d.is_empty()) {
      Some(directives) => directives,
      None if debug => DEBUG_DIRECTIVES,
      None => DEFAULT_DIRECTIVES,
   }
}

/// Diagnostics go to stderr so stdout stays the message channel.
fn setup_logging(debug: bool) {
   let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
   let filter = EnvFilter::try_new(log_directives(rust_log.as_deref(), debug))
      .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

   tracing_subscriber::registry()
      .with(filter)
      .with(
         tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr),
      )
      .init();
}

fn run_install(args: &Args) -> anyhow::Result<()> {
   let binary = std::env::current_exe()
      .context("Failed to locate the running executable")?
      .to_string_lossy()
      .into_owned();
   let path = install_hook(&args.dir, &binary, args.force)
      .with_context(|| format!("Failed to install hook in {}", args.dir.display()))?;
   println!(
      "{} Installed prepare-commit-msg hook at {}",
      style::success(style::icons::SUCCESS),
      path.display()
   );
   Ok(())
}

fn main() -> ExitCode {
   let args = Args::parse();
   setup_logging(args.debug);

   if args.install_hook {
      return match run_install(&args) {
         Ok(()) => ExitCode::SUCCESS,
         Err(e) => {
            style::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
         },
      };
   }

   let source = SystemSource::load(&args.dir);
   let outcome = pipeline::run(&args, &source);
   tracing::debug!(?outcome, "finished");
   ExitCode::from(outcome.exit_code())
}
