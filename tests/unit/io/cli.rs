//! Tests for command-line parsing, reports and batch preview processing

#[cfg(test)]
mod tests {
    use arenagrid::ArenaError;
    use arenagrid::io::cli::{Cli, Command, FileProcessor};
    use arenagrid::io::level::LevelDefinition;
    use clap::Parser;
    use std::path::{Path, PathBuf};
    use tracing::Level;

    fn write_level(dir: &Path, name: &str, rows: usize, cols: usize) -> PathBuf {
        let path = dir.join(format!("{name}.txt"));
        LevelDefinition::empty(name, rows, cols)
            .expect("valid level")
            .save(&path)
            .expect("save level");
        path
    }

    fn run(args: &[&str]) -> Result<String, ArenaError> {
        let cli = Cli::try_parse_from(args).expect("valid arguments");
        let mut out = Vec::new();
        cli.run(&mut out)?;
        Ok(String::from_utf8(out).expect("utf8 report"))
    }

    // Tests subcommand parsing with defaults
    // Verified by changing the default tolerance
    #[test]
    fn test_parse_probe_defaults() {
        let cli = Cli::try_parse_from(["arenagrid", "probe", "level.txt", "2.5", "3"])
            .expect("valid arguments");

        match cli.command {
            Command::Probe {
                level,
                x,
                y,
                tolerance,
                bullet,
            } => {
                assert_eq!(level, PathBuf::from("level.txt"));
                assert!((x - 2.5).abs() < f64::EPSILON);
                assert!((y - 3.0).abs() < f64::EPSILON);
                assert!((tolerance - 0.6).abs() < f64::EPSILON);
                assert!(!bullet);
            }
            _ => unreachable!("Expected probe command"),
        }
    }

    // Tests global verbosity flags and log level selection
    // Verified by inverting quiet flag logic
    #[test]
    fn test_log_level() {
        let default = Cli::try_parse_from(["arenagrid", "catalog"]).expect("valid arguments");
        assert_eq!(default.log_level(), Level::INFO);
        assert!(default.should_show_progress());

        let verbose =
            Cli::try_parse_from(["arenagrid", "catalog", "-v"]).expect("valid arguments");
        assert_eq!(verbose.log_level(), Level::DEBUG);

        let quiet =
            Cli::try_parse_from(["arenagrid", "--quiet", "catalog"]).expect("valid arguments");
        assert_eq!(quiet.log_level(), Level::ERROR);
        assert!(!quiet.should_show_progress());
    }

    // Tests missing subcommands and arguments are rejected
    // Verified by making the level argument optional
    #[test]
    fn test_parse_errors() {
        assert!(Cli::try_parse_from(["arenagrid"]).is_err());
        assert!(Cli::try_parse_from(["arenagrid", "show"]).is_err());
        assert!(Cli::try_parse_from(["arenagrid", "probe", "level.txt", "1"]).is_err());
    }

    // Tests the catalog report lists and validates the built-in set
    // Verified by skipping validation
    #[test]
    fn test_catalog_report() {
        let report = run(&["arenagrid", "catalog"]).expect("catalog report");

        assert!(report.contains("#1 OoOoOoOo solid"));
        assert!(report.contains("#6 XoXoXoXo pillar"));
        assert!(report.contains("15 pieces cover all reachable signatures"));
    }

    // Tests an incomplete catalog file is reported as an error
    // Verified by ignoring validation failures
    #[test]
    fn test_catalog_report_incomplete() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("walls.cat");
        std::fs::write(&path, "# only solid walls\nOoOoOoOo solid\n").expect("write catalog");
        let path = path.to_string_lossy().into_owned();

        let error = run(&["arenagrid", "catalog", "--file", &path]).expect_err("incomplete");
        match error {
            ArenaError::IncompleteCatalog { missing } => assert_eq!(missing.len(), 46),
            other => unreachable!("Expected IncompleteCatalog, got {other:?}"),
        }
    }

    // Tests the show report prints the map and piece counts
    // Verified by counting open cells as walls
    #[test]
    fn test_show_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_level(dir.path(), "box", 5, 5);
        let path = path.to_string_lossy().into_owned();

        let report = run(&["arenagrid", "show", &path]).expect("show report");

        assert!(report.starts_with("box (5 x 5)\n"));
        assert!(report.contains("XXXXX\nX   X\n"));
        assert!(report.contains("#2 face: 12"));
        assert!(report.contains("#7 inner_corner: 4"));
        assert!(!report.contains("unmatched"));
    }

    // Tests the probe report for a clear and a blocked position
    // Verified by ignoring the tolerance argument
    #[test]
    fn test_probe_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_level(dir.path(), "probe", 7, 7);
        let path = path.to_string_lossy().into_owned();

        let clear = run(&["arenagrid", "probe", &path, "3", "3"]).expect("probe report");
        assert!(clear.contains(": clear"));
        assert!(clear.contains("walkable North"));
        assert!(clear.contains("walkable West"));

        let blocked = run(&["arenagrid", "probe", &path, "1", "1"]).expect("probe report");
        assert!(blocked.contains(": blocked"));

        let bullet =
            run(&["arenagrid", "probe", &path, "1", "1", "--bullet", "--tolerance", "0"])
                .expect("probe report");
        assert!(bullet.contains(": clear"));
    }

    // Tests a negative tolerance is rejected before loading
    // Verified by removing tolerance validation
    #[test]
    fn test_probe_rejects_negative_tolerance() {
        let error = run(&["arenagrid", "probe", "missing.txt", "1", "1", "--tolerance=-1"])
            .expect_err("negative tolerance");
        assert!(matches!(
            error,
            ArenaError::InvalidParameter {
                parameter: "tolerance",
                ..
            }
        ));
    }

    // Tests preview names sit next to the level
    // Verified by dropping the suffix
    #[test]
    fn test_output_path() {
        assert_eq!(
            FileProcessor::output_path(Path::new("levels/arena.txt")),
            PathBuf::from("levels/arena_preview.png")
        );
        assert_eq!(
            FileProcessor::output_path(Path::new("arena.txt")),
            PathBuf::from("arena_preview.png")
        );
    }

    // Tests batch processing of a directory with skip logic
    // Verified by inverting boolean logic in should_process_file
    #[test]
    fn test_directory_processing() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_level(dir.path(), "first", 5, 5);
        write_level(dir.path(), "second", 6, 4);
        std::fs::write(dir.path().join("notes.md"), "not a level").expect("write file");

        let mut processor = FileProcessor::new(dir.path().to_path_buf(), true, false);
        assert_eq!(processor.process().expect("process"), 2);
        assert!(dir.path().join("first_preview.png").exists());
        assert!(dir.path().join("second_preview.png").exists());

        let mut skipping = FileProcessor::new(dir.path().to_path_buf(), true, false);
        assert_eq!(skipping.process().expect("process"), 0);

        let mut forced = FileProcessor::new(dir.path().to_path_buf(), false, false);
        assert_eq!(forced.process().expect("process"), 2);
    }

    // Tests single file targets and invalid targets
    // Verified by accepting any file extension
    #[test]
    fn test_single_file_targets() {
        let dir = tempfile::tempdir().expect("temp dir");
        let level = write_level(dir.path(), "solo", 5, 5);

        let mut processor = FileProcessor::new(level, false, false);
        assert_eq!(processor.process().expect("process"), 1);

        let other = dir.path().join("image.png");
        std::fs::write(&other, "data").expect("write file");
        let mut wrong = FileProcessor::new(other, false, false);
        assert!(wrong.process().is_err());

        let mut missing = FileProcessor::new(dir.path().join("absent"), false, false);
        assert!(missing.process().is_err());
    }

    // Tests a broken level aborts the batch with its path
    // Verified by skipping unreadable levels
    #[test]
    fn test_broken_level_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.txt");
        std::fs::write(&path, "5 x 5\nXXXXX\n").expect("write file");

        let mut processor = FileProcessor::new(dir.path().to_path_buf(), true, false);
        let error = processor.process().expect_err("broken level");
        assert!(error.to_string().contains("broken.txt"));
    }
}
