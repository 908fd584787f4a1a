//! Canonical-path resolution. Failure is non-fatal by contract: the caller
//! proceeds with the raw input, so every error path returns it unchanged.

#[cfg(windows)]
pub fn normalize_path(path: &str) -> String {
  use std::fs::OpenOptions;
  use std::os::windows::fs::OpenOptionsExt;
  use std::os::windows::io::AsRawHandle;
  use windows::Win32::Foundation::HANDLE;
  use windows::Win32::Storage::FileSystem::{
    GetFinalPathNameByHandleW, FILE_NAME_NORMALIZED, FILE_SHARE_DELETE, FILE_SHARE_READ,
    FILE_SHARE_WRITE,
  };

  // Existence-check open: no access rights, all share modes, so the probe
  // never contends with the operation that follows.
  let share = FILE_SHARE_READ.0 | FILE_SHARE_WRITE.0 | FILE_SHARE_DELETE.0;
  let probe = match OpenOptions::new().access_mode(0).share_mode(share).open(path) {
    Ok(f) => f,
    Err(_) => return path.to_string(),
  };

  // Long-path-capable buffer; the classic MAX_PATH is far too small here.
  let mut buf = vec![0u16; 32_768];
  // SAFETY: `probe` stays open for the duration of the call and `buf` provides
  // the advertised capacity.
  let len = unsafe {
    GetFinalPathNameByHandleW(
      HANDLE(probe.as_raw_handle() as isize),
      &mut buf,
      FILE_NAME_NORMALIZED,
    )
  } as usize;

  if !final_path_len_fits(len, buf.len()) {
    return path.to_string();
  }
  String::from_utf16_lossy(&buf[..len])
}

/// A successful query returns the character count without the trailing NUL, so
/// it is always strictly below the capacity; zero means failure and a value of
/// capacity or more is the required-size-including-NUL overflow signal.
#[cfg(any(windows, test))]
fn final_path_len_fits(len: usize, capacity: usize) -> bool {
  len != 0 && len < capacity
}

#[cfg(not(windows))]
pub fn normalize_path(path: &str) -> String {
  match std::fs::canonicalize(path) {
    Ok(p) => p.to_string_lossy().into_owned(),
    Err(_) => path.to_string(),
  }
}
