use crate::normalize;

/// One parsed invocation. Exactly one operation runs per process; the parser
/// produces this by value so no mutable global state is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  OpenService { service_name: String },
  OpenFile { path: String, share_mask: u32 },
  CopyExecute { source: String, dest: String },
}

impl Command {
  /// Resolves captured file paths to canonical form. Service names are not
  /// paths and pass through untouched.
  pub fn normalized(self) -> Self {
    match self {
      Command::OpenFile { path, share_mask } => Command::OpenFile {
        path: normalize::normalize_path(&path),
        share_mask,
      },
      Command::CopyExecute { source, dest } => Command::CopyExecute {
        source: normalize::normalize_path(&source),
        dest: normalize::normalize_path(&dest),
      },
      other => other,
    }
  }
}

/// Scans arguments left to right. A flag with too few remaining arguments is
/// skipped without complaint, and when several flags parse successfully the
/// last one wins. Anything unrecognized is ignored.
pub fn parse(args: &[String]) -> Option<Command> {
  let mut selected = None;

  let mut i = 0;
  while i < args.len() {
    let arg = args[i].as_str();

    if arg.eq_ignore_ascii_case("-s") {
      if i + 1 < args.len() {
        i += 1;
        selected = Some(Command::OpenService {
          service_name: args[i].clone(),
        });
      }
    } else if arg.eq_ignore_ascii_case("-f") {
      if i + 1 < args.len() {
        i += 1;
        let path = args[i].clone();

        // The optional mask consumes the next token whenever one remains,
        // numeric or not; non-numeric reads as 0 (atoi semantics).
        let mut share_mask = 0;
        if i + 1 < args.len() {
          i += 1;
          share_mask = parse_share_mask(&args[i]);
        }
        selected = Some(Command::OpenFile { path, share_mask });
      }
    } else if arg.eq_ignore_ascii_case("-e") {
      if i + 2 < args.len() {
        let source = args[i + 1].clone();
        let dest = args[i + 2].clone();
        i += 2;
        selected = Some(Command::CopyExecute { source, dest });
      }
    }

    i += 1;
  }

  selected
}

fn parse_share_mask(s: &str) -> u32 {
  let t = s.trim();
  let end = t.find(|c: char| !c.is_ascii_digit()).unwrap_or(t.len());
  t[..end].parse().unwrap_or(0)
}

pub fn print_usage(prog: &str) {
  println!();
  println!(
    "busyhold {} - creates busy-resource edge conditions for installer testing",
    env!("CARGO_PKG_VERSION")
  );
  println!();
  println!("Usage: {prog} [-s][-f][-e]");
  println!("  -s <servicename> - Open service for status query and wait to close the handle");
  println!("  -f <filename> [sharing flags (1=read, 2=write, 4=delete)] - Open file for read and wait to close the handle");
  println!("  -e <exe> <filepath> - Copy exe to filepath, execute it, and wait to terminate it");
  println!();
}
