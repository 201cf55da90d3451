//! Tests for command-line parsing and headless runs

#[cfg(test)]
mod tests {
    use clap::Parser;
    use lifegrid::LifeError;
    use lifegrid::engine::neighborhood::{MOORE, VON_NEUMANN};
    use lifegrid::engine::{EdgeBehavior, Rule};
    use lifegrid::io::cli::{Cli, Runner};
    use lifegrid::io::configuration::{
        DEFAULT_CELL_SIZE, DEFAULT_GENERATIONS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
        DEFAULT_OUTPUT, DEFAULT_SEED,
    };
    use std::ffi::OsString;
    use std::path::PathBuf;

    // Tests CLI parsing with no arguments uses every default
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["lifegrid"]);

        assert_eq!(cli.width, DEFAULT_GRID_WIDTH);
        assert_eq!(cli.height, DEFAULT_GRID_HEIGHT);
        assert_eq!(cli.generations, DEFAULT_GENERATIONS);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert!((cli.density - 0.5).abs() < f32::EPSILON);
        assert_eq!(cli.rule, Rule::conway());
        assert_eq!(cli.edge, EdgeBehavior::Wrap);
        assert_eq!(cli.neighborhood, MOORE);
        assert_eq!(cli.preemptive, 0);
        assert!(!cli.threads);
        assert_eq!(cli.cell_size, DEFAULT_CELL_SIZE);
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(cli.gif, None);
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with every option spelled out
    // Verified by modifying custom parsers to ensure they're invoked
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "lifegrid",
            "--width",
            "32",
            "--height",
            "24",
            "--generations",
            "7",
            "--seed",
            "9",
            "--density",
            "0.25",
            "--rule",
            "B36/S23",
            "--edge",
            "always-on",
            "--neighborhood",
            "01011010",
            "--preemptive",
            "3",
            "--threads",
            "--cell-size",
            "2",
            "--output",
            "out/final.png",
            "--gif",
            "out/run.gif",
            "--quiet",
        ]);

        assert_eq!((cli.width, cli.height), (32, 24));
        assert_eq!(cli.generations, 7);
        assert_eq!(cli.seed, 9);
        assert_eq!(cli.rule, Rule::high_life());
        assert_eq!(cli.edge, EdgeBehavior::AlwaysOn);
        assert_eq!(cli.neighborhood, VON_NEUMANN);
        assert_eq!(cli.preemptive, 3);
        assert!(cli.threads);
        assert_eq!(cli.cell_size, 2);
        assert_eq!(cli.output, PathBuf::from("out/final.png"));
        assert_eq!(cli.gif, Some(PathBuf::from("out/run.gif")));
        assert!(!cli.should_show_progress());
    }

    // Tests short flag parsing
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "lifegrid", "-W", "10", "-H", "5", "-g", "3", "-s", "1", "-r", "B2/S", "-e", "off",
            "-n", "11110000", "-t", "-q",
        ]);

        assert_eq!((cli.width, cli.height, cli.generations, cli.seed), (10, 5, 3, 1));
        assert_eq!(cli.rule, Rule::seeds());
        assert_eq!(cli.edge, EdgeBehavior::AlwaysOff);
        assert_eq!(
            cli.neighborhood,
            [true, true, true, true, false, false, false, false]
        );
        assert!(cli.threads && cli.quiet);
    }

    // Tests malformed rule, edge and mask values are rejected by the parser
    // Verified by falling back to defaults on parse failure
    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["lifegrid", "--rule", "B9/S"]).is_err());
        assert!(Cli::try_parse_from(["lifegrid", "--edge", "mirror"]).is_err());
        assert!(Cli::try_parse_from(["lifegrid", "--neighborhood", "101"]).is_err());
        assert!(Cli::try_parse_from(["lifegrid", "--width", "-3"]).is_err());
    }

    // Tests the runner builds a session matching the arguments
    // Verified by keeping the session's default scale
    #[test]
    fn test_build_simulation_applies_arguments() {
        let cli = Cli::parse_from([
            "lifegrid", "-W", "30", "-H", "12", "-c", "3", "-r", "B36/S23", "-e", "on", "-d",
            "1.0", "-q",
        ]);
        let simulation = Runner::new(cli).build_simulation().unwrap();
        let grid = simulation.grid();

        assert_eq!((grid.width(), grid.height()), (30, 12));
        assert_eq!(simulation.scale(), 3);
        assert_eq!(grid.rule(), Rule::high_life());
        assert_eq!(grid.edge_behavior, EdgeBehavior::AlwaysOn);
        assert_eq!(grid.alive_count(), 360);
        assert_eq!(simulation.generation(), 0);
    }

    // Tests invalid sizes surface as errors instead of panics
    // Verified by unwrapping the grid construction
    #[test]
    fn test_build_simulation_rejects_bad_sizes() {
        let zero_cells = Runner::new(Cli::parse_from(["lifegrid", "-W", "0", "-q"]));
        assert!(matches!(
            zero_cells.build_simulation(),
            Err(LifeError::InvalidDimensions { .. })
        ));

        let zero_pixels = Runner::new(Cli::parse_from(["lifegrid", "-c", "0", "-q"]));
        assert!(matches!(
            zero_pixels.build_simulation(),
            Err(LifeError::InvalidParameter { .. })
        ));

        let too_wide = Runner::new(Cli::parse_from(["lifegrid", "-W", "10001", "-c", "1", "-q"]));
        assert!(too_wide.build_simulation().is_err());
    }

    // Tests a full run writes the PNG and GIF and advances every generation
    // Verified by skipping the GIF export
    #[test]
    fn test_run_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("nested").join("final.png");
        let gif = dir.path().join("run.gif");

        let args: Vec<OsString> = vec![
            "lifegrid".into(),
            "-W".into(),
            "16".into(),
            "-H".into(),
            "12".into(),
            "-g".into(),
            "6".into(),
            "-c".into(),
            "2".into(),
            "-q".into(),
            "-o".into(),
            png.clone().into_os_string(),
            "--gif".into(),
            gif.clone().into_os_string(),
        ];
        let simulation = Runner::new(Cli::parse_from(args)).run().unwrap();

        assert_eq!(simulation.generation(), 6);
        let written = image::open(&png).unwrap();
        assert_eq!((written.width(), written.height()), (32, 24));
        assert!(gif.metadata().unwrap().len() > 0);
    }

    // Tests the same seed reproduces the same final generation
    // Verified by seeding from entropy
    #[test]
    fn test_run_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let run = |name: &str, threads: bool| {
            let output = dir.path().join(name);
            let mut args = vec![
                "lifegrid".to_string(),
                "-W".to_string(),
                "20".to_string(),
                "-H".to_string(),
                "20".to_string(),
                "-g".to_string(),
                "15".to_string(),
                "-q".to_string(),
                "-o".to_string(),
                output.display().to_string(),
            ];
            if threads {
                args.push("--threads".to_string());
            }
            Runner::new(Cli::parse_from(args)).run().unwrap()
        };

        let sequential = run("a.png", false);
        let parallel = run("b.png", true);
        assert_eq!(sequential.grid().cells(), parallel.grid().cells());
    }
}
