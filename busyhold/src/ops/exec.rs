use std::fs;
use std::io;
use std::process::{Child, Command};

use crate::gate;
use crate::oserr;

/// A spawned child that keeps its own executable file open. Terminate kills it
/// in place; the process handle is released when the hold drops.
#[derive(Debug)]
pub struct ProcessHold {
  child: Child,
}

impl ProcessHold {
  #[cfg(windows)]
  fn spawn(program: &str) -> io::Result<ProcessHold> {
    use std::os::windows::process::CommandExt;
    use windows::Win32::System::Threading::CREATE_NO_WINDOW;

    // The child's thread handle is not retained; std closes it at spawn time.
    let child = Command::new(program)
      .creation_flags(CREATE_NO_WINDOW.0)
      .spawn()?;
    Ok(ProcessHold { child })
  }

  #[cfg(not(windows))]
  fn spawn(program: &str) -> io::Result<ProcessHold> {
    let child = Command::new(program).spawn()?;
    Ok(ProcessHold { child })
  }

  pub fn pid(&self) -> u32 {
    self.child.id()
  }

  /// Forcibly stops the child with exit code 0, which is what an installer
  /// probing the destination file will observe.
  #[cfg(windows)]
  pub fn terminate(&mut self) -> io::Result<()> {
    use std::os::windows::io::AsRawHandle;
    use windows::Win32::Foundation::HANDLE;
    use windows::Win32::System::Threading::TerminateProcess;

    // SAFETY: the raw handle stays valid while `self.child` is alive.
    unsafe { TerminateProcess(HANDLE(self.child.as_raw_handle() as isize), 0) }
      .map_err(|e| io::Error::from_raw_os_error(win32_code(e.code().0)))?;
    let _ = self.child.wait();
    Ok(())
  }

  #[cfg(not(windows))]
  pub fn terminate(&mut self) -> io::Result<()> {
    self.child.kill()?;
    let _ = self.child.wait();
    Ok(())
  }
}

/// FACILITY_WIN32 HRESULTs carry the original Win32 error in the low word;
/// unwrap it so the reported "os error N" is the familiar Win32 code rather
/// than a negative HRESULT.
#[cfg(any(windows, test))]
fn win32_code(hresult: i32) -> i32 {
  if (hresult as u32) & 0xFFFF_0000 == 0x8007_0000 {
    hresult & 0xFFFF
  } else {
    hresult
  }
}

fn copy_and_spawn(source: &str, dest: &str) -> anyhow::Result<ProcessHold> {
  // Unconditional overwrite; the operator already confirmed.
  if let Err(e) = fs::copy(source, dest) {
    return Err(anyhow::anyhow!("Copy failed. Error: {}", oserr::describe_io(&e)));
  }

  println!("Executing {dest}");
  // On spawn failure the copied file stays on disk; there is no rollback.
  ProcessHold::spawn(dest)
    .map_err(|e| anyhow::anyhow!("Execute failed. Error: {}", oserr::describe_io(&e)))
}

pub fn copy_execute_and_wait(source: &str, dest: &str) -> anyhow::Result<()> {
  println!("Copying {source} to {dest}");
  println!("This will overwrite {dest} if it exists - Please confirm by pressing Enter");
  gate::wait_for_enter();

  let mut hold = copy_and_spawn(source, dest)?;
  tracing::info!(pid = hold.pid(), dest = %dest, "child process launched");
  println!("Successfully executed {dest}. PID is {}", hold.pid());
  println!("Presumably it's a long-running process. Press Enter to kill it.");
  gate::wait_for_enter();

  if let Err(e) = hold.terminate() {
    // The held-file condition was already demonstrated; a failed kill does not
    // turn the run into a failure.
    eprintln!("Terminate failed. Error: {}", oserr::describe_io(&e));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("busyhold-exec-{}-{}", std::process::id(), name))
  }

  #[test]
  fn missing_source_fails_at_the_copy_step() {
    let src = temp_path("no-such-source.exe");
    let dest = temp_path("dest.exe");

    let err = copy_and_spawn(src.to_str().unwrap(), dest.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().starts_with("Copy failed"));
    // No launch was attempted and nothing was written to the destination.
    assert!(!dest.exists());
  }

  #[test]
  fn spawn_missing_program_fails() {
    let p = temp_path("not-a-program.exe");
    assert!(ProcessHold::spawn(p.to_str().unwrap()).is_err());
  }

  #[test]
  fn hresult_unwraps_to_win32_code() {
    // ERROR_ACCESS_DENIED wrapped as 0x80070005 reads back as plain 5.
    assert_eq!(win32_code(0x8007_0005_u32 as i32), 5);
    // Already-plain Win32 codes and non-Win32 facilities pass through.
    assert_eq!(win32_code(5), 5);
    assert_eq!(win32_code(0x8000_4005_u32 as i32), 0x8000_4005_u32 as i32);
  }
}
