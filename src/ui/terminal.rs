use crate::config::ClientConfig;
use crate::search::SearchResponse;
use crate::ui::client::{ClientError, ProxyClient};
use crate::ui::controller::{FetchRequest, Phase, RequestId, SearchController, Settled, Tab};
use crate::ui::render::render;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    NewSearch,
    Retry,
    Tab(Tab),
    Quit,
    Unknown(String),
}

/// Interprets one input line. Plain text is a question on the search form;
/// everything else is a `:command`.
pub fn parse_command(phase: &Phase, line: &str) -> Command {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return match phase {
            Phase::PreSearch { .. } => Command::Query(line.to_string()),
            _ => Command::Unknown(line.to_string()),
        };
    };
    match command.trim() {
        "q" | "quit" => Command::Quit,
        "n" | "new" => Command::NewSearch,
        "r" | "retry" => Command::Retry,
        other => match other.parse::<Tab>() {
            Ok(tab) => Command::Tab(tab),
            Err(_) => Command::Unknown(line.to_string()),
        },
    }
}

/// Applies a command, returning the request to send if one is needed.
pub fn apply(controller: &mut SearchController, command: Command) -> Option<FetchRequest> {
    match command {
        Command::Query(text) => {
            controller.edit_query(&text);
            controller.submit()
        }
        Command::NewSearch => {
            controller.new_search();
            None
        }
        Command::Retry => controller.retry(),
        Command::Tab(tab) => {
            controller.select_tab(tab);
            None
        }
        Command::Quit | Command::Unknown(_) => None,
    }
}

type Outcome = (RequestId, Result<SearchResponse, String>);

fn spawn_fetch(client: Arc<ProxyClient>, request: FetchRequest, tx: mpsc::UnboundedSender<Outcome>) {
    tokio::spawn(async move {
        let outcome = client.search(&request.query).await.map_err(|e| {
            log::warn!("Search for {:?} failed: {}", request.query, e);
            e.to_string()
        });
        // The receiver only goes away on exit.
        let _ = tx.send((request.id, outcome));
    });
}

pub async fn run_terminal(config: &ClientConfig) -> Result<(), ClientError> {
    let client = Arc::new(ProxyClient::new(&config.server_url)?);
    let mut controller = SearchController::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render(&controller));
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(controller.phase(), &line) {
                    Command::Quit => break,
                    Command::Unknown(input) => {
                        println!("Unknown command {:?}. Try :new, :retry, :search, :images, :sources or :quit.", input);
                        continue;
                    }
                    command => {
                        if let Some(request) = apply(&mut controller, command) {
                            spawn_fetch(client.clone(), request, tx.clone());
                        }
                    }
                }
            }
            Some((id, outcome)) = rx.recv() => {
                if controller.settle(id, outcome) == Settled::Ignored {
                    log::debug!("Dropped reply for abandoned request {:?}", id);
                    continue;
                }
            }
        }
        println!("{}", render(&controller));
    }
    Ok(())
}
