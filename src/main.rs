use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use stickyboard::board::directory::BoardDirectory;
use stickyboard::board::notes::NoteStore;
use stickyboard::config::{ClientConfig, ConfigError};
use stickyboard::net::api::{HttpWhiteboardApi, WhiteboardApi};
use stickyboard::net::auth::{AuthClient, AuthError};
use stickyboard::net::error::ApiError;
use stickyboard::net::types::RecordId;
use stickyboard::session::{FileSessionStore, SessionError, SessionStore};
use stickyboard::shell::{HELP, ShellInput, parse_line};
use stickyboard::sync::{ReconcileMode, spawn_sync_loop};
use stickyboard::view::{BoardView, Command, Flow, TerminalRender};
use tokio::sync::mpsc;
use tracing::{info, warn};

const COMMAND_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
    #[error("login failed: {0}")]
    Auth(#[from] AuthError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("no board available; create one with `stickyboard boards create`")]
    NoBoard,
}

#[derive(Parser, Debug)]
#[command(name = "stickyboard", about = "Sticky-note whiteboard client")]
struct Cli {
    /// Whiteboard service base URL (overrides WHITEBOARD_API_URL).
    #[arg(long)]
    api_url: Option<String>,

    /// Login service base URL (overrides LOGIN_API_URL).
    #[arg(long)]
    login_url: Option<String>,

    /// Credential file (overrides STICKYBOARD_SESSION_FILE).
    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Log in and store the bearer credential.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "STICKYBOARD_PASSWORD")]
        password: String,
    },
    /// Forget the stored credential.
    Logout,
    Boards(BoardsCommand),
    Notes(NotesCommand),
    /// Interactive terminal board with periodic sync.
    Open {
        /// Reconcile sync refreshes by diff instead of full redraw.
        #[arg(long, default_value_t = false)]
        diff: bool,
    },
}

#[derive(Args, Debug)]
struct BoardsCommand {
    #[command(subcommand)]
    command: BoardsSubcommand,
}

#[derive(Subcommand, Debug)]
enum BoardsSubcommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = false)]
        public: bool,
    },
}

#[derive(Args, Debug)]
struct NotesCommand {
    #[command(subcommand)]
    command: NotesSubcommand,
}

#[derive(Subcommand, Debug)]
enum NotesSubcommand {
    List {
        /// Board to list; defaults to the resolved current board.
        #[arg(long)]
        board: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.whiteboard_api_url = stickyboard::config::base_url(Some(url), &config.whiteboard_api_url);
    }
    if let Some(url) = cli.login_url {
        config.login_api_url = stickyboard::config::base_url(Some(url), &config.login_api_url);
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }
    let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(config.session_file.clone()));

    match cli.command {
        CliCommand::Login { username, password } => run_login(&config, session, &username, &password).await,
        CliCommand::Logout => {
            session.clear()?;
            println!("Logged out");
            Ok(())
        }
        CliCommand::Boards(boards) => run_boards(&config, session, boards).await,
        CliCommand::Notes(notes) => run_notes(&config, session, notes).await,
        CliCommand::Open { diff } => {
            if diff {
                config.reconcile = ReconcileMode::Diff;
            }
            run_open(&config, session).await
        }
    }
}

async fn run_login(config: &ClientConfig, session: Arc<dyn SessionStore>, username: &str, password: &str) -> Result<(), CliError> {
    let auth = AuthClient::new(config, session)?;
    auth.login(username, password).await?;
    println!("Logged in as {username}");
    Ok(())
}

async fn run_boards(config: &ClientConfig, session: Arc<dyn SessionStore>, boards: BoardsCommand) -> Result<(), CliError> {
    let api = HttpWhiteboardApi::new(config, session)?;
    match boards.command {
        BoardsSubcommand::List => {
            for board in api.list_boards().await? {
                let visibility = if board.is_public { "public" } else { "private" };
                println!("{}\t{}\t{}\t{}", board.id, board.name, visibility, board.description.unwrap_or_default());
            }
        }
        BoardsSubcommand::Create { name, description, public } => {
            let directory = BoardDirectory::new(Arc::new(api));
            let id = directory.create(&name, &description, public).await?;
            println!("{id}");
        }
    }
    Ok(())
}

async fn run_notes(config: &ClientConfig, session: Arc<dyn SessionStore>, notes: NotesCommand) -> Result<(), CliError> {
    let api: Arc<dyn WhiteboardApi> = Arc::new(HttpWhiteboardApi::new(config, session)?);
    match notes.command {
        NotesSubcommand::List { board } => {
            let board_id = match board {
                Some(id) => RecordId::new(id),
                None => BoardDirectory::new(api.clone())
                    .resolve_current()
                    .await
                    .ok_or(CliError::NoBoard)?,
            };
            for note in NoteStore::new(api).list(&board_id).await? {
                println!("{}\t({}, {})\t{}\t{}", note.id, note.x_position, note.y_position, note.color, note.content);
            }
        }
    }
    Ok(())
}

async fn run_open(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<(), CliError> {
    let api: Arc<dyn WhiteboardApi> = Arc::new(HttpWhiteboardApi::new(config, session.clone())?);
    let render = TerminalRender::new(io::stdout());
    let mut view = BoardView::new(api, session, render, config.reconcile);

    if view.start().await == Flow::Exit {
        return Ok(());
    }
    println!("type `help` for commands");

    let (tx, mut rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
    let sync = spawn_sync_loop(tx.clone(), config.sync_interval);
    // Blocking stdin reads cannot be cancelled; a plain thread lets the process exit past it.
    std::thread::spawn(move || read_commands(&tx));

    view.run(&mut rx).await;
    sync.stop().await;
    info!("interactive session ended");
    Ok(())
}

fn read_commands(tx: &mpsc::Sender<Command>) {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        match parse_line(&line) {
            Ok(Some(ShellInput::Command(command))) => {
                if tx.blocking_send(command).is_err() {
                    return;
                }
            }
            Ok(Some(ShellInput::Help)) => println!("{HELP}"),
            Ok(None) => {}
            Err(e) => eprintln!("{e}"),
        }
    }
    let _ = tx.blocking_send(Command::Close);
}
