use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use journal_core::model::{RecordId, RepertoireId, RepertoireStatus};
use journal_core::scoring::DEFAULT_TARGET_SECONDS;

/// Command-line arguments for practice-journal
#[derive(Parser, Debug)]
#[command(name = "practice-journal")]
#[command(about = "Guitar practice journal with CAGED drill scoring")]
#[command(version)]
pub struct Cli {
    /// SQLite database URL or path
    #[arg(
        long,
        global = true,
        env = "JOURNAL_DB_URL",
        default_value = "sqlite:practice-journal.sqlite3"
    )]
    pub db: String,

    /// Seconds a full CAGED run should take
    #[arg(
        long,
        global = true,
        env = "JOURNAL_TARGET_SECONDS",
        default_value_t = DEFAULT_TARGET_SECONDS
    )]
    pub target_seconds: u32,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log a practice session
    Log(LogArgs),
    /// Score a CAGED drill attempt and save it
    Drill(DrillArgs),
    /// Score a CAGED drill attempt without saving it
    Score(AttemptArgs),
    /// Timeline for one song or technique
    Progress {
        /// Song title or technique; matched case-insensitively as a substring
        #[arg(default_value = "")]
        focus: String,
    },
    /// List values accepted by `progress`
    FocusOptions,
    /// List every journal entry
    Records,
    /// Delete a journal entry
    Delete { id: RecordId },
    /// Manage the song repertoire
    #[command(subcommand)]
    Repertoire(RepertoireCommand),
    /// Fill the database with a small demo journal
    Seed,
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Minutes practiced
    #[arg(long)]
    pub minutes: u32,

    /// Practice date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Song worked on; repeat for several
    #[arg(long = "song")]
    pub songs: Vec<String>,

    /// Technique worked on; repeat for several
    #[arg(long = "technique")]
    pub techniques: Vec<String>,

    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Args, Debug)]
pub struct AttemptArgs {
    /// Shapes played, comma separated (e.g. C,A,G,E,D)
    #[arg(long, default_value = "")]
    pub shapes: String,

    /// Self-rated accuracy, 1 (many mistakes) to 5 (none)
    #[arg(long)]
    pub accuracy: u8,

    /// Seconds the attempt took
    #[arg(long)]
    pub seconds: u32,
}

#[derive(Args, Debug)]
pub struct DrillArgs {
    #[command(flatten)]
    pub attempt: AttemptArgs,

    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Subcommand, Debug)]
pub enum RepertoireCommand {
    /// Add a song
    Add {
        title: String,
        #[arg(long)]
        artist: Option<String>,
    },
    /// List songs
    List,
    /// Change a song's status (learning, polishing, mastered)
    Status {
        id: RepertoireId,
        status: RepertoireStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_log_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "practice-journal",
            "log",
            "--minutes",
            "30",
            "--date",
            "2024-01-01",
            "--song",
            "Blackbird",
            "--song",
            "Wonderwall",
            "--technique",
            "strumming",
        ])
        .unwrap();

        let Command::Log(args) = cli.command else {
            panic!("expected log");
        };
        assert_eq!(args.minutes, 30);
        assert_eq!(args.songs, vec!["Blackbird", "Wonderwall"]);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "practice-journal",
            "score",
            "--shapes",
            "C,A",
            "--accuracy",
            "1",
            "--seconds",
            "40",
            "--json",
            "--target-seconds",
            "30",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.target_seconds, 30);
    }

    #[test]
    fn repertoire_status_parses_enum() {
        let cli =
            Cli::try_parse_from(["practice-journal", "repertoire", "status", "3", "mastered"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Repertoire(RepertoireCommand::Status { status: RepertoireStatus::Mastered, .. })
        ));
    }
}
