/// Renders a numeric OS error code as "description (os error N)". The lookup
/// goes through `std::io::Error`, which asks the OS for the localized message
/// and substitutes a generic unknown-error string for codes it cannot name.
pub fn describe(code: i32) -> String {
  std::io::Error::from_raw_os_error(code).to_string()
}

pub fn describe_io(err: &std::io::Error) -> String {
  match err.raw_os_error() {
    Some(code) => describe(code),
    None => err.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn embeds_the_numeric_code() {
    assert!(describe(2).contains("os error 2"));
  }

  #[test]
  fn unknown_codes_still_produce_a_string() {
    assert!(describe(999_999).contains("999999"));
  }

  #[test]
  fn describe_io_without_raw_code_uses_display() {
    let err = std::io::Error::other("synthetic");
    assert_eq!(describe_io(&err), "synthetic");
  }
}
