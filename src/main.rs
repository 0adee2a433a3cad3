use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::mpsc;

use quakewatch::config::Config;
use quakewatch::feed::{QuakeFeed, UsgsClient};
use quakewatch::logging::{json_log, obj, v_num, v_str};
use quakewatch::model::QuakeEvent;
use quakewatch::refresh::{RefreshGuard, RefreshToken};
use quakewatch::share::compose_share_message;
use quakewatch::view::EventView;

#[derive(Debug, PartialEq)]
enum Command {
    Refresh,
    Filter(String),
    Share(usize),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() || line == "r" || line == "refresh" {
        return Some(Command::Refresh);
    }
    if line == "q" || line == "quit" {
        return Some(Command::Quit);
    }
    if let Some(rest) = line.strip_prefix("f ").or_else(|| line.strip_prefix("filter ")) {
        return Some(Command::Filter(rest.to_string()));
    }
    if let Some(rest) = line.strip_prefix("s ").or_else(|| line.strip_prefix("share ")) {
        return rest.trim().parse::<usize>().ok().map(Command::Share);
    }
    None
}

struct FetchOutcome {
    token: RefreshToken,
    result: Result<Vec<QuakeEvent>>,
}

fn spawn_refresh(
    cfg: &Config,
    feed: &Arc<dyn QuakeFeed + Send + Sync>,
    guard: &RefreshGuard,
    tx: &mpsc::Sender<FetchOutcome>,
) {
    let token = guard.begin();
    json_log(
        "feed",
        obj(&[("event", v_str("refresh_started")), ("token", v_num(token as f64))]),
    );
    let feed = Arc::clone(feed);
    let bounds = cfg.bounds;
    let months_back = cfg.months_back;
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = feed.fetch_recent(bounds, months_back).await;
        let _ = tx.send(FetchOutcome { token, result }).await;
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let feed: Arc<dyn QuakeFeed + Send + Sync> = Arc::new(UsgsClient::new(&cfg));
    let guard = RefreshGuard::new();
    let mut view = EventView::new();

    let (fetch_tx, mut fetch_rx) = mpsc::channel::<FetchOutcome>(8);
    let (line_tx, mut line_rx) = mpsc::channel::<String>(8);

    // Stdin stays on a plain thread; lines are marshaled into the loop that
    // owns the displayed list.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut buf = String::new();
        loop {
            buf.clear();
            match stdin.read_line(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if line_tx.blocking_send(buf.clone()).is_err() {
                        break;
                    }
                }
            }
        }
    });

    json_log(
        "system",
        obj(&[
            ("event", v_str("startup")),
            ("months_back", v_num(cfg.months_back as f64)),
            ("base", v_str(&cfg.usgs_base)),
        ]),
    );
    println!("quakewatch — [enter]/r refresh, f <text> filter, s <n> share, q quit");

    spawn_refresh(&cfg, &feed, &guard, &fetch_tx);

    loop {
        tokio::select! {
            Some(outcome) = fetch_rx.recv() => {
                if !guard.is_current(outcome.token) {
                    json_log(
                        "feed",
                        obj(&[
                            ("event", v_str("stale_refresh_discarded")),
                            ("token", v_num(outcome.token as f64)),
                        ]),
                    );
                    continue;
                }
                match outcome.result {
                    Ok(events) => {
                        json_log(
                            "feed",
                            obj(&[
                                ("event", v_str("refresh_applied")),
                                ("token", v_num(outcome.token as f64)),
                                ("count", v_num(events.len() as f64)),
                            ]),
                        );
                        view.set_events(events);
                        print!("{}", view.render(Utc::now().timestamp_millis()));
                    }
                    Err(err) => {
                        // The previously displayed list stays untouched.
                        json_log(
                            "feed",
                            obj(&[
                                ("event", v_str("refresh_failed")),
                                ("error", v_str(&err.to_string())),
                            ]),
                        );
                        eprintln!("could not load earthquakes: {}", err);
                    }
                }
            }
            line = line_rx.recv() => {
                let Some(line) = line else { break };
                match parse_command(&line) {
                    Some(Command::Refresh) => spawn_refresh(&cfg, &feed, &guard, &fetch_tx),
                    Some(Command::Filter(query)) => {
                        view.apply_filter(&query);
                        json_log(
                            "view",
                            obj(&[
                                ("event", v_str("filter_applied")),
                                ("query", v_str(query.trim())),
                                ("count", v_num(view.len() as f64)),
                            ]),
                        );
                        print!("{}", view.render(Utc::now().timestamp_millis()));
                    }
                    Some(Command::Share(n)) => {
                        match n.checked_sub(1).and_then(|i| view.get(i)) {
                            Some(event) => println!("{}", compose_share_message(event)),
                            None => eprintln!("no event #{}", n),
                        }
                    }
                    Some(Command::Quit) => break,
                    None => {
                        eprintln!("commands: [enter]/r refresh, f <text> filter, s <n> share, q quit");
                    }
                }
            }
            else => break,
        }
    }

    json_log("system", obj(&[("event", v_str("shutdown"))]));
    Ok(())
}
