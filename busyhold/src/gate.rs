use std::io::{self, BufRead};

/// Blocks the calling thread until the operator presses Enter (or console
/// input reaches end-of-stream). Everything read is discarded; this exists
/// purely so a human controls when a held resource is released.
pub fn wait_for_enter() {
  let stdin = io::stdin();
  let _ = drain_line(&mut stdin.lock());
}

fn drain_line<R: BufRead>(input: &mut R) -> io::Result<usize> {
  let mut discard = Vec::new();
  input.read_until(b'\n', &mut discard)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  #[test]
  fn drains_through_the_line_terminator() {
    let mut input = Cursor::new(&b"yes please\nleftover"[..]);
    let n = drain_line(&mut input).unwrap();
    assert_eq!(n, "yes please\n".len());
    assert_eq!(input.position() as usize, n);
  }

  #[test]
  fn returns_at_end_of_stream() {
    let mut input = Cursor::new(&b""[..]);
    assert_eq!(drain_line(&mut input).unwrap(), 0);
  }
}
