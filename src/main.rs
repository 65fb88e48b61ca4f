use chrono::{Datelike, Local, NaiveDate};
use dugout::config::Settings;
use dugout::service::MlbService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        println!("{}", usage_text());
        return Ok(());
    };

    match command {
        "-h" | "--help" => {
            println!("{}", usage_text());
            return Ok(());
        }
        "-V" | "--version" => {
            println!("dugout {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let settings = Settings::load();
    let service = MlbService::from_settings(&settings);
    let today = Local::now().date_naive();
    let current_season = today.year();

    let view = match command {
        "schedule" => {
            let center = args
                .get(1)
                .and_then(|d| d.parse::<NaiveDate>().ok())
                .unwrap_or(today);
            let team_filter = args.get(2).and_then(|t| t.parse().ok());
            serde_json::to_value(service.schedule(center, 1, team_filter).await?)?
        }
        "game" => {
            let game_pk = parse_arg(&args, 1, "game_pk")?;
            serde_json::to_value(service.game_detail(game_pk).await?)?
        }
        "bracket" => {
            let season = args
                .get(1)
                .and_then(|s| s.parse().ok())
                .unwrap_or(current_season);
            let sport_id = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1);
            serde_json::to_value(service.postseason(season, sport_id, current_season).await?)?
        }
        "wildcard" => {
            let season = args
                .get(1)
                .and_then(|s| s.parse().ok())
                .unwrap_or(current_season);
            serde_json::to_value(service.wild_card_standings(season).await?)?
        }
        "standings" => {
            let sport_id = parse_arg(&args, 1, "sport_id")?;
            let season = args
                .get(2)
                .and_then(|s| s.parse().ok())
                .unwrap_or(current_season);
            serde_json::to_value(service.division_standings(sport_id, season).await?)?
        }
        "team" => {
            let team_id = parse_arg(&args, 1, "team_id")?;
            serde_json::to_value(service.team_profile(team_id).await?)?
        }
        "roster" => {
            let team_id = parse_arg(&args, 1, "team_id")?;
            serde_json::to_value(service.team_roster(team_id).await?)?
        }
        _ => {
            eprintln!("Unknown command: {command}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, name: &str) -> anyhow::Result<T> {
    args.get(index)
        .and_then(|a| a.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("{name} argument required\n\n{}", usage_text()))
}

fn usage_text() -> &'static str {
    "dugout - MLB schedules, scores, standings, and postseason brackets

Usage:
  dugout schedule [YYYY-MM-DD] [team_id]
  dugout game <game_pk>
  dugout bracket [season] [sport_id]
  dugout wildcard [season]
  dugout standings <sport_id> [season]
  dugout team <team_id>
  dugout roster <team_id>

Environment:
  DUGOUT_CACHE_DIR   Cache directory (default storage/cache)
  DUGOUT_API_BASE    Override the MLB Stats API base URL
  DUGOUT_TEAM_FILE   Team reference snapshot (default storage/teams.json)
  RUST_LOG           Log filter, e.g. debug or dugout=debug"
}
