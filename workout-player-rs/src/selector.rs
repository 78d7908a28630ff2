//! Interactive workout selection from the sample workouts directory.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::SelectionError;

pub const WORKOUT_EXTENSION: &str = "csv";

/// List workout files in `dir`, sorted by file name.
pub fn list_workouts(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut workouts: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(WORKOUT_EXTENSION))
        })
        .collect();

    workouts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    workouts
}

/// Map a 1-based selection typed by the user back to a workout path.
pub fn resolve_selection(workouts: &[PathBuf], input: &str) -> Result<PathBuf, SelectionError> {
    let input = input.trim();
    let selection: i64 = input.parse().map_err(|_| SelectionError::NotANumber {
        input: input.to_string(),
    })?;

    if selection < 1 || selection as u64 > workouts.len() as u64 {
        return Err(SelectionError::OutOfRange {
            selection,
            max: workouts.len(),
        });
    }

    Ok(workouts[(selection - 1) as usize].clone())
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_else(|| path.display().to_string())
}

/// Print the numbered workout list and read the user's choice.
pub fn prompt_selection<R: BufRead, W: Write>(
    dir: &Path,
    mut input: R,
    mut output: W,
) -> Result<PathBuf, SelectionError> {
    let workouts = list_workouts(dir);
    if workouts.is_empty() {
        return Err(SelectionError::NoWorkouts {
            dir: dir.to_path_buf(),
        });
    }

    writeln!(output)?;
    writeln!(output, "Available workouts:")?;
    writeln!(output)?;
    for (i, workout) in workouts.iter().enumerate() {
        writeln!(output, "  {}) {}", i + 1, display_name(workout))?;
    }
    writeln!(output)?;
    write!(output, "Select workout [1-{}]: ", workouts.len())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let selected = resolve_selection(&workouts, &line)?;
    writeln!(output, "Selected: {}", selected.display())?;
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for name in ["d_legs.csv", "a_core.csv", "c_full_body.csv", "b-arms.CSV"] {
            fs::write(dir.path().join(name), "order;name;duration;side;description\n").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "not a workout").unwrap();
        fs::create_dir(dir.path().join("archive.csv")).unwrap();
        dir
    }

    #[test]
    fn test_list_workouts_filters_and_sorts() {
        let dir = sample_dir();
        let names: Vec<String> = list_workouts(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a_core.csv", "b-arms.CSV", "c_full_body.csv", "d_legs.csv"]);
    }

    #[test]
    fn test_list_workouts_missing_dir() {
        assert!(list_workouts(Path::new("/nonexistent/samples")).is_empty());
    }

    #[test]
    fn test_resolve_selection() {
        let dir = sample_dir();
        let workouts = list_workouts(dir.path());
        assert_eq!(workouts.len(), 4);

        let second = resolve_selection(&workouts, "2\n").unwrap();
        assert_eq!(second, workouts[1]);

        assert!(matches!(
            resolve_selection(&workouts, "5"),
            Err(SelectionError::OutOfRange { selection: 5, max: 4 })
        ));
        assert!(matches!(
            resolve_selection(&workouts, "0"),
            Err(SelectionError::OutOfRange { .. })
        ));
        assert!(matches!(
            resolve_selection(&workouts, "-1"),
            Err(SelectionError::OutOfRange { .. })
        ));
        assert!(matches!(
            resolve_selection(&workouts, "two"),
            Err(SelectionError::NotANumber { .. })
        ));
        assert!(matches!(
            resolve_selection(&workouts, ""),
            Err(SelectionError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_prompt_selection_lists_and_resolves() {
        let dir = sample_dir();
        let mut output = Vec::new();

        let selected = prompt_selection(dir.path(), Cursor::new("2\n"), &mut output).unwrap();
        assert!(selected.ends_with("b-arms.CSV"));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("  1) a core"));
        assert!(text.contains("  3) c full body"));
        assert!(text.contains("Select workout [1-4]: "));
    }

    #[test]
    fn test_prompt_selection_out_of_range() {
        let dir = sample_dir();
        let result = prompt_selection(dir.path(), Cursor::new("5\n"), Vec::new());
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Selection out of range: expected 1-4, found 5"
        );
    }

    #[test]
    fn test_prompt_selection_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            prompt_selection(dir.path(), Cursor::new("1\n"), Vec::new()),
            Err(SelectionError::NoWorkouts { .. })
        ));
    }
}
