pub mod cli;
pub mod gate;
pub mod normalize;
pub mod ops;
pub mod oserr;

use std::process::ExitCode;

use crate::cli::Command;

/// Parses the command line, runs exactly one hold operation, and maps its
/// outcome to the process exit status.
pub fn run(args: &[String]) -> ExitCode {
  init_logging();
  disable_fs_redirection();

  let cmd = match cli::parse(&args[1..]) {
    Some(cmd) => cmd.normalized(),
    None => {
      cli::print_usage(args.first().map(String::as_str).unwrap_or("busyhold"));
      return ExitCode::FAILURE;
    }
  };

  let result = match &cmd {
    Command::OpenService { service_name } => ops::service::open_service_and_wait(service_name),
    Command::OpenFile { path, share_mask } => ops::file::open_file_and_wait(path, *share_mask),
    Command::CopyExecute { source, dest } => ops::exec::copy_execute_and_wait(source, dest),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{e}");
      ExitCode::FAILURE
    }
  }
}

fn init_logging() {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_ansi(false)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

#[cfg(all(windows, target_arch = "x86"))]
fn disable_fs_redirection() {
  use windows::Win32::Storage::FileSystem::Wow64DisableWow64FsRedirection;

  // 32-bit builds must see the real System32, not the SysWOW64 mirror.
  let mut old_value = std::ptr::null_mut();
  // SAFETY: `old_value` outlives the call; the token it receives would only be
  // needed to re-enable redirection, which this process never does.
  let _ = unsafe { Wow64DisableWow64FsRedirection(&mut old_value) };
}

#[cfg(not(all(windows, target_arch = "x86")))]
fn disable_fs_redirection() {}
