//! BetTrackr CLI
//!
//! Thin presentation layer over the ledger: every command forwards to the
//! `LedgerController` or one of its collaborators and prints the outcome.

use anyhow::Context;
use bettrackr::analytics::{cumulative_profit_series, INSUFFICIENT_CHART_DATA_MESSAGE};
use bettrackr::models::{BetDraft, BetRecord, BetResult};
use bettrackr::services::export::{self, ExportFormat};
use bettrackr::services::SyncStatus;
use bettrackr::{AppConfig, AppError, AppResult, AppState};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

const USAGE: &str = "\
Usage: bettrackr <command> [args]

Commands:
  add --market <text> --stake <amount> --odds <decimal>
      [--result PENDING|WIN|LOSS|PUSH] [--sport <text>] [--notes <text>]
  list                      Show every bet, newest first
  stats                     Show net profit, ROI, win rate and totals
  settle <id> <result>      Change a bet's result and recompute its profit
  remove <id> [--yes]       Delete a bet
  chart                     Print the cumulative profit series
  analyze                   Ask the AI analyst for a performance report
  set-webhook <url>         Configure the spreadsheet webhook
  clear-webhook             Forget the webhook URL
  sync                      Push the ledger to the webhook
  export csv|report [path]  Write the history to a file
";

#[derive(Debug)]
enum Command {
    Add(BetDraft),
    List,
    Stats,
    Settle { id: Uuid, result: BetResult },
    Remove { id: Uuid, confirmed: bool },
    Chart,
    Analyze,
    SetWebhook(String),
    ClearWebhook,
    Sync,
    Export { format: ExportFormat, path: Option<PathBuf> },
    Help,
}

fn parse_args(args: &[String]) -> AppResult<Command> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match name.as_str() {
        "add" => parse_add(rest).map(Command::Add),
        "list" => Ok(Command::List),
        "stats" => Ok(Command::Stats),
        "settle" => match rest {
            [id, result] => Ok(Command::Settle {
                id: Uuid::parse_str(id)?,
                result: result.parse()?,
            }),
            _ => Err(AppError::Validation("usage: settle <id> <result>".into())),
        },
        "remove" => match rest {
            [id] => Ok(Command::Remove {
                id: Uuid::parse_str(id)?,
                confirmed: false,
            }),
            [id, flag] if flag == "--yes" => Ok(Command::Remove {
                id: Uuid::parse_str(id)?,
                confirmed: true,
            }),
            _ => Err(AppError::Validation("usage: remove <id> [--yes]".into())),
        },
        "chart" => Ok(Command::Chart),
        "analyze" => Ok(Command::Analyze),
        "set-webhook" => match rest {
            [url] => Ok(Command::SetWebhook(url.clone())),
            _ => Err(AppError::Validation("usage: set-webhook <url>".into())),
        },
        "clear-webhook" => Ok(Command::ClearWebhook),
        "sync" => Ok(Command::Sync),
        "export" => match rest {
            [format] => Ok(Command::Export {
                format: ExportFormat::from_str(format)?,
                path: None,
            }),
            [format, path] => Ok(Command::Export {
                format: ExportFormat::from_str(format)?,
                path: Some(PathBuf::from(path)),
            }),
            _ => Err(AppError::Validation("usage: export csv|report [path]".into())),
        },
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(AppError::Validation(format!("Unknown command: {}", other))),
    }
}

fn parse_add(args: &[String]) -> AppResult<BetDraft> {
    let mut draft = BetDraft::new("", "", "");
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| AppError::Validation(format!("Missing value for {}", flag)))?;

        match flag.as_str() {
            "--market" => draft.market = value.clone(),
            "--stake" => draft.stake = value.clone(),
            "--odds" => draft.odds = value.clone(),
            "--result" => draft.result = value.parse()?,
            "--sport" => draft.sport = value.clone(),
            "--notes" => draft.notes = Some(value.clone()),
            other => return Err(AppError::Validation(format!("Unknown flag: {}", other))),
        }
    }

    Ok(draft)
}

fn print_bet(bet: &BetRecord) {
    let sign = if bet.profit > rust_decimal::Decimal::ZERO { "+" } else { "" };
    println!(
        "{}  {}  {:<28} R$ {:>9.2}  @{:>6.2}  {:<7}  {}{:.2}",
        bet.id,
        bet.placed_at.format("%Y-%m-%d"),
        bet.market,
        bet.stake,
        bet.odds,
        bet.result,
        sign,
        bet.profit
    );
    if let Some(notes) = &bet.notes {
        println!("    {}", notes);
    }
}

async fn execute(state: &mut AppState, command: Command) -> AppResult<()> {
    match command {
        Command::Help => print!("{}", USAGE),
        Command::Add(draft) => {
            let bet = state.ledger.add(draft).await?;
            println!("Aposta registrada:");
            print_bet(&bet);
        }
        Command::List => {
            if state.ledger.is_empty() {
                println!("Nenhuma aposta registrada.");
            }
            let mut bets: Vec<&BetRecord> = state.ledger.snapshot().iter().collect();
            bets.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
            for bet in bets {
                print_bet(bet);
            }
            println!("({} registros)", state.ledger.len());
        }
        Command::Stats => {
            let stats = state.ledger.stats();
            let summary = state.ledger.quick_summary();
            println!("Lucro Líquido:    R$ {:.2}", stats.net_profit);
            println!("ROI:              {:.2}%", stats.roi);
            println!("Taxa de Acerto:   {:.1}%", stats.win_rate);
            println!("Total Apostado:   R$ {:.2}", stats.total_staked);
            println!(
                "Apostas:          {} ({} W / {} L / {} P / {} pendentes)",
                stats.total_bets, stats.wins, stats.losses, stats.pushes, stats.pending
            );
            println!("Maior Win:        R$ {:.2}", summary.biggest_win);
            println!("Maior Loss:       R$ {:.2}", summary.biggest_loss);
        }
        Command::Settle { id, result } => {
            match state.ledger.update_result(id, result).await? {
                Some(bet) => print_bet(&bet),
                None => println!("Nenhuma aposta com id {}.", id),
            }
        }
        Command::Remove { id, confirmed } => {
            if !confirmed {
                println!("Tem certeza que deseja excluir esta aposta? Repita com --yes.");
                return Ok(());
            }
            if state.ledger.remove(id).await? {
                println!("Aposta {} excluída.", id);
            } else {
                println!("Nenhuma aposta com id {}.", id);
            }
        }
        Command::Chart => match cumulative_profit_series(state.ledger.snapshot()) {
            Some(points) => {
                for point in points {
                    let label = point
                        .placed_at
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "Início".to_string());
                    println!(
                        "{:>4}  {:<10}  {:>10.2}  ({:+.2})",
                        point.index, label, point.cumulative, point.profit
                    );
                }
            }
            None => println!("{}", INSUFFICIENT_CHART_DATA_MESSAGE),
        },
        Command::Analyze => {
            println!("{}", state.analyze().await);
        }
        Command::SetWebhook(url) => {
            state.settings_repo.set_webhook_url(&url).await?;
            println!("Webhook configurado.");
        }
        Command::ClearWebhook => {
            state.settings_repo.clear_webhook_url().await?;
            println!("Webhook removido.");
        }
        Command::Sync => match state.sync_now().await? {
            SyncStatus::Success => println!("Sincronizado com sucesso."),
            SyncStatus::Error => println!("Erro ao sincronizar."),
            SyncStatus::Idle => {}
        },
        Command::Export { format, path } => {
            let path = path
                .unwrap_or_else(|| format.default_file_name(chrono::Utc::now().date_naive()));
            let bets = state.ledger.snapshot();
            match format {
                ExportFormat::Csv => export::write_csv(&path, bets).await?,
                ExportFormat::Report => {
                    export::write_report(&path, bets, &state.ledger.stats()).await?
                }
            }
            println!("Exportado para {}", path.display());
        }
    }

    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().map_err(AppError::Config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("bettrackr={},sqlx=warn", config.log_level).into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    if matches!(command, Command::Help) {
        print!("{}", USAGE);
        return Ok(());
    }

    info!("Environment: {}", config.environment);

    let mut state = AppState::bootstrap(&config)
        .await
        .with_context(|| format!("opening ledger at {}", config.database_url()))?;

    execute(&mut state, command).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        let code = e.downcast_ref::<AppError>().map(AppError::exit_code).unwrap_or(1);
        std::process::exit(code);
    }
}
