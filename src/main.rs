use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use stratefi_gov::chain::{BlockWatcher, ChainClient, EventWatcher, HttpRpcClient};
use stratefi_gov::config::ClientConfig;
use stratefi_gov::metrics::Metrics;
use stratefi_gov::rpc::{RpcServer, RpcState};
use stratefi_gov::session::{GovernanceSession, IntentSubmitter, Notifier};
use stratefi_gov::sync::{ChainView, SharedView, Synchronizer};
use stratefi_gov::types::VoteChoice;

#[derive(Parser, Debug)]
#[command(name = "stratefi-gov")]
#[command(about = "StrateFi governance client")]
struct Args {
    /// TOML config file (defaults are used when it does not exist)
    #[arg(short, long, env = "STRATEFI_GOV_CONFIG", default_value = "stratefi-gov.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow the chain and serve the control API (default)
    Serve,
    /// Submit a text-only proposal
    Propose { description: String },
    /// Vote on the proposal at INDEX in the current list
    Vote { index: usize, choice: VoteChoice },
    /// Print a config file with every default filled in
    ConfigTemplate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = ClientConfig::load_or_default(&args.config)?;

    if let Some(Command::ConfigTemplate) = args.command {
        print!("{}", cfg.to_toml()?);
        return Ok(());
    }

    stratefi_gov::logging::init(&cfg.logging)?;

    // 1) Metrics + chain client: built once, shared by reference below
    let metrics = Arc::new(Metrics::new());
    let client: Arc<dyn ChainClient> = Arc::new(
        HttpRpcClient::new(&cfg.chain.rpc_url, cfg.chain.request_timeout())?
            .with_metrics(metrics.clone()),
    );

    // 2) View + session
    let view = ChainView::new(cfg.chain.seconds_per_block).shared();
    let notifier = Notifier::new(cfg.notifications.max_queued);
    let submitter = IntentSubmitter::new(
        client.clone(),
        cfg.chain.contract_address,
        cfg.chain.from_address,
        notifier,
        metrics.clone(),
    );
    let session = Arc::new(GovernanceSession::new(view.clone(), submitter));

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cfg, client, view, session, metrics).await,
        Command::Propose { description } => propose(&session, description).await,
        Command::Vote { index, choice } => vote(&cfg, client.as_ref(), &session, index, choice).await,
        Command::ConfigTemplate => Ok(()),
    }
}

async fn serve(
    cfg: &ClientConfig,
    client: Arc<dyn ChainClient>,
    view: SharedView,
    session: Arc<GovernanceSession>,
    metrics: Arc<Metrics>,
) -> anyhow::Result<()> {
    info!(
        rpc_url = %cfg.chain.rpc_url,
        contract = %cfg.chain.contract_address,
        from_block = cfg.chain.from_block,
        "Starting governance client"
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // 3) Synchronizer, fed by the two watchers
    let (sync, sync_handle) =
        Synchronizer::new(view, metrics.clone(), cfg.sync.event_channel_capacity);
    let sync_task = tokio::spawn(sync.run());

    let blocks = BlockWatcher::new(
        client.clone(),
        cfg.sync.block_poll_interval(),
        sync_handle.tx.clone(),
        shutdown_rx.clone(),
    );
    let events = EventWatcher::new(
        client,
        cfg.chain.contract_address,
        cfg.chain.from_block,
        cfg.sync.event_poll_interval(),
        sync_handle.tx.clone(),
        shutdown_rx.clone(),
    );
    // watchers own the only senders; the synchronizer ends with them
    drop(sync_handle);
    let block_task = tokio::spawn(blocks.run());
    let event_task = tokio::spawn(events.run());

    // 4) Control API
    let state = Arc::new(RpcState {
        session,
        metrics,
        chain_id: cfg.chain.chain_id,
        contract_address: cfg.chain.contract_address.to_string(),
    });
    let server = RpcServer::new(
        cfg.rpc.listen_addr.clone(),
        cfg.observability.metrics_enabled,
        state,
    );
    info!(addr = %cfg.rpc.listen_addr, "Starting control API");
    let mut server_task = tokio::spawn(server.run(shutdown_rx));

    // 5) Run until Ctrl-C or the API dies
    let server_outcome = tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("Shutting down");
            None
        }
        res = &mut server_task => Some(res),
    };

    let _ = shutdown_tx.send(true);
    let server_outcome = match server_outcome {
        Some(res) => res,
        None => server_task.await,
    };
    join_task("block watcher", block_task).await;
    join_task("event watcher", event_task).await;
    join_task("synchronizer", sync_task).await;

    match server_outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!(error = %e, "Control API failed");
            Err(e.context("control API failed"))
        }
        Err(e) => anyhow::bail!("control API task panicked: {}", e),
    }
}

async fn join_task(name: &str, task: JoinHandle<()>) {
    if let Err(e) = task.await {
        error!(task = name, error = %e, "Task ended abnormally");
    }
}

async fn propose(session: &GovernanceSession, description: String) -> anyhow::Result<()> {
    session.handle_input_change(description);
    match session.add_proposal().await {
        Some(tx) => {
            println!("{}", tx);
            Ok(())
        }
        None => anyhow::bail!("proposal submission failed (see log)"),
    }
}

async fn vote(
    cfg: &ClientConfig,
    client: &dyn ChainClient,
    session: &GovernanceSession,
    index: usize,
    choice: VoteChoice,
) -> anyhow::Result<()> {
    // One-shot sync so INDEX refers to the same list `serve` would show
    let head = client.block_number().await?;
    let logs = client
        .proposal_created_logs(cfg.chain.contract_address, cfg.chain.from_block)
        .await?;
    {
        let mut v = session.view().write().await;
        v.on_block_number(head);
        v.on_proposal_events(logs);
    }

    session.handle_vote_selection(index, choice);
    let outcome = match session.submit_vote(index).await {
        Ok(pending) => pending.await?,
        Err(e) => Err(e),
    };
    for n in session.take_notifications() {
        eprintln!("{} {}", n.title, n.description);
    }
    let tx = outcome?;
    println!("{}", tx);
    Ok(())
}
