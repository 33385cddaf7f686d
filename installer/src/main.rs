//! Ghost app CLI entrypoint.
//!
//! Parses the subcommand, wires up the real executor and terminal prompter,
//! and dispatches. All fatal errors print in red and exit with status 1.

use clap::Parser;
use ghost_installer::cli::{Cli, Command};
use ghost_installer::error::Result;
use ghost_installer::exec::SystemCommandExecutor;
use ghost_installer::install_flow::run_install;
use ghost_installer::lifecycle::{run_restart, run_start, run_stop, run_uninstall, run_update};
use ghost_installer::output::write_fatal;
use ghost_installer::prompt::TerminalPrompter;
use std::io::Write;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let executor = SystemCommandExecutor;
    let prompter = TerminalPrompter::new();
    log::debug!("dispatching {:?}", cli.command);

    match &cli.command {
        Command::Install(args) => run_install(&executor, &prompter, args, stderr),
        Command::Start => run_start(&executor, stderr),
        Command::Update => run_update(&executor, stderr),
        Command::Restart => run_restart(&executor, stderr),
        Command::Stop => {
            run_stop(stderr);
            Ok(())
        }
        Command::Uninstall => run_uninstall(&prompter, stderr),
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_fatal(stderr, format!("error: {err}"));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_installer::error::InstallerError;

    #[test]
    fn success_maps_to_exit_zero() {
        let mut sink = Vec::new();
        assert_eq!(exit_code_for_run_result(Ok(()), &mut sink), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn failure_maps_to_exit_one_with_message() {
        let mut sink = Vec::new();
        let code = exit_code_for_run_result(Err(InstallerError::NotInstalled), &mut sink);
        assert_eq!(code, 1);
        let text = String::from_utf8(sink).expect("stderr was not UTF-8");
        assert!(text.contains("error:"));
        assert!(text.contains("ghost install"));
    }
}
