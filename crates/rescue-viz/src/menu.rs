//! Interactive mode selection

use crate::Request;
use rescue_compare::{DataFile, Discovery, FileRole, Mode};
use std::io::{self, BufRead, Write};

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn print_discovery<W: Write>(discovery: &Discovery, out: &mut W) -> io::Result<()> {
    for role in FileRole::ALL {
        let files = discovery.get(role);
        writeln!(out, "{} files: {}", role, files.len())?;
        for file in files {
            writeln!(out, "    {}", file.name())?;
        }
    }
    Ok(())
}

/// Show discovered files and modes, read one choice
///
/// `None` on exit, end of input or an invalid choice.
pub(crate) fn select<R: BufRead, W: Write>(
    discovery: &Discovery,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<Request>> {
    print_discovery(discovery, out)?;
    writeln!(out)?;
    for (i, mode) in Mode::ALL.iter().enumerate() {
        let unavailable = mode.role().is_some_and(|role| discovery.count(role) == 0);
        let note = if unavailable { " (no files)" } else { "" };
        writeln!(out, "  {}. {}{}", i + 1, mode, note)?;
    }
    writeln!(out, "  0. Exit")?;

    let Some(choice) = prompt(input, out, "Select mode: ")? else {
        return Ok(None);
    };
    if choice == "0" {
        return Ok(None);
    }
    let Some(mode) = Mode::from_choice(&choice) else {
        writeln!(out, "Invalid choice: {choice}")?;
        return Ok(None);
    };
    if mode != Mode::SingleFile {
        return Ok(Some(Request::Mode(mode)));
    }

    let files: Vec<&DataFile> = FileRole::ALL
        .iter()
        .flat_map(|role| discovery.get(*role))
        .collect();
    if files.is_empty() {
        writeln!(out, "No data files found")?;
        return Ok(None);
    }
    for (i, file) in files.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, file.name())?;
    }
    let Some(choice) = prompt(input, out, "Select file: ")? else {
        return Ok(None);
    };
    let picked = choice
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| files.get(i));
    match picked {
        Some(file) => Ok(Some(Request::File(file.path.clone()))),
        None => {
            writeln!(out, "Invalid file number: {choice}")?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn discovery() -> Discovery {
        Discovery::from_paths(
            ["robot_data_2.txt", "robot_data_1.txt", "robot_data_worker_1.txt"].map(PathBuf::from),
        )
    }

    fn run(input: &str) -> (Option<Request>, String) {
        let mut out = Vec::new();
        let request = select(&discovery(), &mut Cursor::new(input), &mut out).unwrap();
        (request, String::from_utf8(out).unwrap())
    }

    #[test]
    fn lists_files_and_flags_missing_roles() {
        let (_, out) = run("0\n");
        assert!(out.contains("snapshot files: 2"));
        assert!(out.contains("    robot_data_1.txt"));
        assert!(out.contains("5. A* baseline only (no files)"));
        assert!(!out.contains("1. Evolution grid (all snapshots side-by-side) (no files)"));
    }

    #[test]
    fn picks_mode_by_number() {
        assert_eq!(run("2\n").0, Some(Request::Mode(Mode::FitnessProgression)));
        assert_eq!(run("0\n").0, None);
        assert_eq!(run("").0, None);
    }

    #[test]
    fn invalid_choice_is_reported() {
        let (request, out) = run("42\n");
        assert_eq!(request, None);
        assert!(out.contains("Invalid choice: 42"));
    }

    #[test]
    fn single_file_asks_for_file_number() {
        let (request, _) = run("7\n3\n");
        assert_eq!(request, Some(Request::File(PathBuf::from("robot_data_worker_1.txt"))));

        let (request, out) = run("7\n9\n");
        assert_eq!(request, None);
        assert!(out.contains("Invalid file number: 9"));
    }
}
