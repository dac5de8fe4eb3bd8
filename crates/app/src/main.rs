//! practice-journal: command-line front end for the guitar practice journal.

use anyhow::{Context, Result};
use chrono::Duration;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use journal_core::ScoreEngine;
use journal_core::model::{CagedShape, DrillAttempt, RepertoireStatus, parse_shape_list};
use services::{AppServices, Clock, NewPracticeSession};
use storage::repository::Storage;

mod cli;
mod db_url;
mod render;

use cli::{AttemptArgs, Cli, Command, RepertoireCommand};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "practice_journal=info,services=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn attempt_from(args: &AttemptArgs) -> Result<DrillAttempt, journal_core::Error> {
    let shapes = parse_shape_list(&args.shapes)?;
    Ok(DrillAttempt::new(shapes, args.accuracy, args.seconds)?)
}

async fn run(cli: Cli) -> Result<()> {
    let engine = ScoreEngine::with_target_time(cli.target_seconds)?;
    let clock = Clock::default_clock();

    // Pure scoring needs no database.
    let command = match cli.command {
        Command::Score(args) => {
            let attempt = attempt_from(&args)?;
            let report = AppServices::new(&Storage::in_memory(), clock, engine)
                .drills()
                .preview(&attempt);
            println!("{}", render::drill_report(&report, cli.json)?);
            return Ok(());
        }
        other => other,
    };

    let db_url = db_url::normalize_sqlite_url(&cli.db);
    db_url::prepare_sqlite_file(&db_url)?;
    debug!(%db_url, "opening journal");
    let app = AppServices::new_sqlite(&db_url, clock, engine)
        .await
        .with_context(|| format!("opening {db_url}"))?;

    match command {
        Command::Log(args) => {
            let id = app
                .journal()
                .log_practice(NewPracticeSession {
                    date: args.date,
                    duration_minutes: args.minutes,
                    songs: args.songs,
                    techniques: args.techniques,
                    notes: args.notes,
                })
                .await?;
            println!("saved as entry {id}");
        }
        Command::Drill(args) => {
            let attempt = attempt_from(&args.attempt)?;
            let report = app.drills().record_caged(&attempt, args.notes).await?;
            println!("{}", render::drill_report(&report, cli.json)?);
        }
        // Answered above without opening the database.
        Command::Score(_) => {}
        Command::Progress { focus } => {
            let summary = app.journal().progression(&focus).await?;
            println!("{}", render::progression(&focus, &summary, cli.json)?);
        }
        Command::FocusOptions => {
            let options = app.journal().focus_options().await?;
            if cli.json {
                println!("{}", render::json(&options)?);
            } else {
                println!("{}", options.join("\n"));
            }
        }
        Command::Records => {
            let rows = app.journal().records().await?;
            println!("{}", render::records(&rows, cli.json)?);
        }
        Command::Delete { id } => {
            app.journal().delete_record(id).await?;
            println!("deleted entry {id}");
        }
        Command::Repertoire(action) => match action {
            RepertoireCommand::Add { title, artist } => {
                let id = app.repertoire().add_song(&title, artist).await?;
                println!("added song {id}");
            }
            RepertoireCommand::List => {
                let rows = app.repertoire().songs().await?;
                println!("{}", render::songs(&rows, cli.json)?);
            }
            RepertoireCommand::Status { id, status } => {
                app.repertoire().set_status(id, status).await?;
                println!("song {id} is now {status}");
            }
        },
        Command::Seed => seed(&app, clock).await?,
    }

    Ok(())
}

/// Demo data: a few songs, two weeks of sessions, some CAGED runs.
async fn seed(app: &AppServices, clock: Clock) -> Result<()> {
    let today = clock.today();
    let repertoire = app.repertoire();
    let blackbird = repertoire
        .add_song("Blackbird", Some("The Beatles".into()))
        .await?;
    repertoire
        .add_song("Wonderwall", Some("Oasis".into()))
        .await?;
    repertoire
        .add_song("Dust in the Wind", Some("Kansas".into()))
        .await?;
    repertoire
        .set_status(blackbird, RepertoireStatus::Polishing)
        .await?;

    let sessions: [(i64, u32, &[&str], &[&str]); 5] = [
        (14, 30, &["Blackbird"], &["fingerpicking"]),
        (10, 45, &["Wonderwall"], &["strumming"]),
        (7, 25, &["Blackbird (fingerstyle)"], &["fingerpicking"]),
        (3, 40, &["Dust in the Wind"], &["travis picking"]),
        (1, 20, &[], &["CAGED arpeggios"]),
    ];
    for (days_ago, minutes, songs, techniques) in sessions {
        app.journal()
            .log_practice(NewPracticeSession {
                date: Some(today - Duration::days(days_ago)),
                duration_minutes: minutes,
                songs: songs.iter().map(|s| (*s).to_string()).collect(),
                techniques: techniques.iter().map(|s| (*s).to_string()).collect(),
                notes: String::new(),
            })
            .await?;
    }

    for (shapes, accuracy, seconds) in [
        (&CagedShape::ALL[..2], 2_u8, 45_u32),
        (&CagedShape::ALL[..4], 3, 32),
        (&CagedShape::ALL[..], 4, 24),
    ] {
        let attempt = DrillAttempt::new(shapes.to_vec(), accuracy, seconds)?;
        app.drills().record_caged(&attempt, "").await?;
    }

    info!("seeded demo journal");
    println!("seeded demo journal");
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
