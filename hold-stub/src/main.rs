use std::thread;
use std::time::Duration;

/// Minimal long-running payload for `busyhold -e`: while it runs, the copied
/// executable file stays open. An optional numeric argument bounds the run
/// time in seconds for scripted use; otherwise it sleeps until killed.
fn main() {
  let run_for_seconds = std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok());

  match run_for_seconds {
    Some(secs) => thread::sleep(Duration::from_secs(secs)),
    None => loop {
      thread::sleep(Duration::from_secs(60));
    },
  }
}
