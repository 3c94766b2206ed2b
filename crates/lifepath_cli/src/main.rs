//! Command-line smoke entry point for the date pipeline.
//!
//! `lifepath <text...>` prints every date found in the text. With exactly one
//! date the report lines for the configured mode follow. `--portrait` also
//! generates (or loads from cache) the full portrait using `LIFEPATH_*`
//! settings.

use lifepath_core::{
    build_generator, build_report_structure, calculate, classify_turn, config, db,
    init_from_settings, DateTurn, PortraitService, ReportKey, Settings, SqliteReportCache,
};
use std::error::Error;
use std::process::ExitCode;

const CLI_USER_ID: i64 = 0;

fn main() -> ExitCode {
    let mut portrait = false;
    let mut words = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--portrait" {
            portrait = true;
        } else {
            words.push(arg);
        }
    }

    if words.is_empty() {
        eprintln!("usage: lifepath [--portrait] <text...>");
        return ExitCode::from(2);
    }

    match run(&words.join(" "), portrait) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(text: &str, portrait: bool) -> Result<(), Box<dyn Error>> {
    let date = match classify_turn(text) {
        DateTurn::NoDate => {
            println!("no date found");
            return Ok(());
        }
        DateTurn::Multiple(dates) => {
            for date in dates {
                println!("{date}");
            }
            return Ok(());
        }
        DateTurn::Single(date) => date,
    };
    println!("{date}");

    if !portrait {
        let mode = config::default_mode_from_env()?;
        for line in build_report_structure(&calculate(&date), mode) {
            println!("{line}");
        }
        return Ok(());
    }

    let settings = Settings::from_env()?;
    init_from_settings(&settings)?;
    let conn = db::open_db(&settings.db_path)?;
    let service = PortraitService::new(
        SqliteReportCache::try_new(&conn)?,
        build_generator(&settings)?,
    );
    let result = service.portrait(&ReportKey::new(CLI_USER_ID, date, settings.default_mode))?;
    if result.from_cache {
        println!("(cached)");
    }
    println!("{}", result.text);
    Ok(())
}
