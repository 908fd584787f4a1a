use std::fs::File;
use std::io;

use crate::gate;
use crate::oserr;

/// An open read handle with caller-chosen sharing semantics. The handle is
/// released when the hold drops, on every exit path.
#[derive(Debug)]
pub struct FileHold {
  _file: File,
}

impl FileHold {
  #[cfg(windows)]
  pub fn acquire(path: &str, share_mask: u32) -> io::Result<FileHold> {
    use std::fs::OpenOptions;
    use std::os::windows::fs::OpenOptionsExt;

    // Mask bits 1/2/4 are FILE_SHARE_READ/WRITE/DELETE; the mask goes to the
    // OS verbatim, including values outside 0..=7. Read-only open of an
    // existing file, so the target must already be present.
    let file = OpenOptions::new()
      .read(true)
      .share_mode(share_mask)
      .open(path)?;
    Ok(FileHold { _file: file })
  }

  #[cfg(not(windows))]
  pub fn acquire(path: &str, _share_mask: u32) -> io::Result<FileHold> {
    let file = File::open(path)?;
    Ok(FileHold { _file: file })
  }
}

pub fn open_file_and_wait(path: &str, share_mask: u32) -> anyhow::Result<()> {
  println!("Opening file: {path} with sharing {share_mask}");
  let hold = FileHold::acquire(path, share_mask)
    .map_err(|e| anyhow::anyhow!("Failed to open file. Error: {}", oserr::describe_io(&e)))?;

  tracing::info!(path = %path, share_mask, "file handle opened");
  println!("Successfully opened file: {path}");
  println!("Press Enter to close the file handle and exit.");
  gate::wait_for_enter();

  println!("Closing file handle.");
  drop(hold);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("busyhold-file-{}-{}", std::process::id(), name))
  }

  #[test]
  fn acquire_missing_file_fails() {
    let p = temp_path("missing.txt");
    let err = FileHold::acquire(p.to_str().unwrap(), 0).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
  }

  #[test]
  fn acquire_and_release_existing_file() {
    let p = temp_path("held.txt");
    fs::write(&p, b"contents").unwrap();

    let hold = FileHold::acquire(p.to_str().unwrap(), 7).unwrap();
    drop(hold);

    // Handle is gone: the file opens again even with an exclusive mask.
    assert!(FileHold::acquire(p.to_str().unwrap(), 0).is_ok());
    let _ = fs::remove_file(&p);
  }
}
