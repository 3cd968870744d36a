//! Command-line front end for the staking dashboard core.
//!
//! # Responsibility
//! - Drive `stakeboard_core` use-cases from a terminal: chain catalogue,
//!   watched accounts, dashboard loading and sign document preparation.
//! - Print machine-readable JSON for anything richer than a line of text.
//!
//! # Invariants
//! - Flags override `STAKEBOARD_*` environment values.
//! - No key material is read or produced; signatures come from a wallet.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use stakeboard_core::chain::parse_chain_key;
use stakeboard_core::{
    all_chains, chain_config, core_version, init_logging, open_db, ping, AccountService,
    AminoSignDoc, ChainKey, ClaimAllOutcome, DashboardService, FetchMode, HttpLcdClient,
    MsgBuilder, SqliteAccountRepository, SqliteSnapshotRepository, StakeboardConfig, StakingMsg,
    TxService, TxSignature,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "stakeboard")]
#[command(about = "Multi-chain Cosmos staking dashboard", version)]
struct Cli {
    /// SQLite database file (overrides STAKEBOARD_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides STAKEBOARD_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides STAKEBOARD_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// LCD request timeout in seconds (overrides STAKEBOARD_LCD_TIMEOUT_SECS)
    #[arg(long, global = true)]
    lcd_timeout_secs: Option<u64>,

    /// LCD endpoint override, `<chain>=<url>`; repeatable
    #[arg(long = "lcd-url", global = true, value_name = "CHAIN=URL")]
    lcd_urls: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core linkage and version
    Ping,
    /// List supported chains
    Chains,
    /// Show the constants of one chain as JSON
    Chain { chain: String },
    /// Manage watched accounts
    #[command(subcommand)]
    Accounts(AccountsCommand),
    /// Load the delegation dashboard of an address
    Dashboard {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        cache: CacheFlags,
    },
    /// List active validators of a chain, e.g. to pick a redelegation target
    Validators {
        chain: String,
        /// Operator address to leave out, usually the redelegation source
        #[arg(long)]
        exclude: Option<String>,
        #[command(flatten)]
        cache: CacheFlags,
    },
    /// Prepare a withdrawal from the validators with the largest rewards
    ClaimAll {
        #[command(flatten)]
        target: Target,
        #[arg(long, default_value = "")]
        memo: String,
    },
    /// Prepare a withdrawal from one validator
    Claim {
        #[command(flatten)]
        target: Target,
        validator: String,
        #[arg(long, default_value = "")]
        memo: String,
    },
    /// Prepare a staking transaction sign document
    #[command(subcommand)]
    Tx(TxCommand),
    /// Broadcast a signed sign document
    Broadcast {
        chain: String,
        /// File holding the sign document JSON
        #[arg(long)]
        sign_doc: PathBuf,
        /// Base64 compressed secp256k1 public key
        #[arg(long)]
        pub_key: String,
        /// Base64 signature over the sign document
        #[arg(long)]
        signature: String,
    },
}

#[derive(Args, Debug)]
struct Target {
    chain: String,
    address: String,
}

#[derive(Args, Debug)]
struct CacheFlags {
    /// Read cached data only
    #[arg(long, conflicts_with = "no_cache")]
    offline: bool,
    /// Fail instead of falling back to cached data
    #[arg(long)]
    no_cache: bool,
}

impl CacheFlags {
    fn mode(&self) -> FetchMode {
        if self.offline {
            FetchMode::CacheOnly
        } else if self.no_cache {
            FetchMode::Network
        } else {
            FetchMode::NetworkWithCacheFallback
        }
    }
}

#[derive(Subcommand, Debug)]
enum AccountsCommand {
    Add {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        label: Option<String>,
    },
    List {
        #[arg(long)]
        chain: Option<String>,
    },
    Rename {
        id: String,
        /// New label; omit to clear
        #[arg(long)]
        label: Option<String>,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum TxCommand {
    Delegate {
        #[command(flatten)]
        target: Target,
        validator: String,
        /// Amount in display units, e.g. `1.5`
        amount: String,
        #[arg(long, default_value = "")]
        memo: String,
    },
    Undelegate {
        #[command(flatten)]
        target: Target,
        validator: String,
        amount: String,
        #[arg(long, default_value = "")]
        memo: String,
    },
    Redelegate {
        #[command(flatten)]
        target: Target,
        src_validator: String,
        dst_validator: String,
        amount: String,
        #[arg(long, default_value = "")]
        memo: String,
    },
    ModifyWithdrawAddress {
        #[command(flatten)]
        target: Target,
        withdraw_address: String,
        #[arg(long, default_value = "")]
        memo: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }
    info!(
        "event=cli_start module=cli status=ok command={}",
        command_name(&cli.command)
    );

    run(cli.command, &config)
}

fn resolve_config(cli: &Cli) -> Result<StakeboardConfig> {
    let mut config = StakeboardConfig::from_env()?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if let Some(secs) = cli.lcd_timeout_secs {
        if secs == 0 {
            bail!("--lcd-timeout-secs must be positive");
        }
        config.lcd_timeout = Duration::from_secs(secs);
    }
    for pair in &cli.lcd_urls {
        let (chain, url) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("--lcd-url expects CHAIN=URL, got `{pair}`"))?;
        config.set_lcd_override(parse_chain_key(chain)?, url)?;
    }
    Ok(config)
}

fn run(command: Command, config: &StakeboardConfig) -> Result<()> {
    match command {
        Command::Ping => {
            println!("stakeboard_core ping={}", ping());
            println!("stakeboard_core version={}", core_version());
        }
        Command::Chains => {
            for chain in all_chains() {
                println!(
                    "{:<12} {:<16} {:<8} {}",
                    chain.path(),
                    chain.chain_id,
                    chain.symbol_name,
                    chain.name
                );
            }
        }
        Command::Chain { chain } => {
            let constants = chain_config(parse_chain_key(&chain)?);
            println!("{}", serde_json::to_string_pretty(constants)?);
        }
        Command::Accounts(command) => run_accounts(command, config)?,
        Command::Dashboard { target, cache } => {
            let chain = parse_chain_key(&target.chain)?;
            let conn = open_db(&config.db_path)?;
            let service =
                DashboardService::new(lcd_client(config)?, SqliteSnapshotRepository::new(&conn));
            let view = service.load(chain, &target.address, cache.mode())?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Command::Validators {
            chain,
            exclude,
            cache,
        } => {
            let chain = parse_chain_key(&chain)?;
            let conn = open_db(&config.db_path)?;
            let service =
                DashboardService::new(lcd_client(config)?, SqliteSnapshotRepository::new(&conn));
            let list = service.validator_list(chain, exclude.as_deref(), cache.mode())?;
            for validator in &list.validators {
                println!(
                    "{}  {:>7}%  {:>6}%  {}",
                    validator.operator_address,
                    validator.voting_power_percent,
                    validator.commission_percent,
                    validator.moniker
                );
            }
        }
        Command::ClaimAll { target, memo } => {
            let chain = parse_chain_key(&target.chain)?;
            let conn = open_db(&config.db_path)?;
            let lcd = lcd_client(config)?;
            let dashboard = DashboardService::new(&lcd, SqliteSnapshotRepository::new(&conn));
            let view = dashboard.load(chain, &target.address, FetchMode::Network)?;
            let plan = match view.claim_all {
                ClaimAllOutcome::Ready { plan } => plan,
                ClaimAllOutcome::NoRewards => bail!("there are no rewards to claim"),
                ClaimAllOutcome::RewardBelowFee { reward, fee } => {
                    bail!("reward to claim ({reward}) is lower than the transaction fee ({fee})")
                }
            };
            let builder = MsgBuilder::new(chain_config(chain), &view.address)?;
            let msgs = builder.withdraw_rewards(&plan)?;
            print_sign_doc(&TxService::new(&lcd), chain, &view.address, &msgs, &memo)?;
        }
        Command::Claim {
            target,
            validator,
            memo,
        } => {
            let chain = parse_chain_key(&target.chain)?;
            let conn = open_db(&config.db_path)?;
            let lcd = lcd_client(config)?;
            let dashboard = DashboardService::new(&lcd, SqliteSnapshotRepository::new(&conn));
            let view = dashboard.load(chain, &target.address, FetchMode::Network)?;
            let plan = view.claim_one_plan(&validator)?;
            let builder = MsgBuilder::new(chain_config(chain), &view.address)?;
            let msgs = builder.withdraw_rewards(&plan)?;
            print_sign_doc(&TxService::new(&lcd), chain, &view.address, &msgs, &memo)?;
        }
        Command::Tx(command) => run_tx(command, config)?,
        Command::Broadcast {
            chain,
            sign_doc,
            pub_key,
            signature,
        } => {
            let chain = parse_chain_key(&chain)?;
            let text = std::fs::read_to_string(&sign_doc)
                .with_context(|| format!("failed to read {}", sign_doc.display()))?;
            let doc: AminoSignDoc =
                serde_json::from_str(&text).context("sign document is not valid JSON")?;
            let service = TxService::new(lcd_client(config)?);
            let result = service.broadcast(chain, &doc, &TxSignature { pub_key, signature })?;
            println!("{}", result.txhash);
        }
    }
    Ok(())
}

fn run_accounts(command: AccountsCommand, config: &StakeboardConfig) -> Result<()> {
    let conn = open_db(&config.db_path)?;
    let service = AccountService::new(SqliteAccountRepository::new(&conn));

    match command {
        AccountsCommand::Add { target, label } => {
            let chain = parse_chain_key(&target.chain)?;
            let account = service.add_account(chain, &target.address, label.as_deref())?;
            println!("{}", account.uuid);
        }
        AccountsCommand::List { chain } => {
            let chain = chain.as_deref().map(parse_chain_key).transpose()?;
            for account in service.list_accounts(chain)? {
                println!(
                    "{}  {:<12} {}  {}",
                    account.uuid,
                    account.chain,
                    account.address,
                    account.label.as_deref().unwrap_or("-")
                );
            }
        }
        AccountsCommand::Rename { id, label } => {
            service.rename_account(id.trim().parse()?, label.as_deref())?;
        }
        AccountsCommand::Remove { id } => {
            let removed = service.remove_account(id.trim().parse()?)?;
            println!("removed {}", removed.display_name());
        }
    }
    Ok(())
}

fn run_tx(command: TxCommand, config: &StakeboardConfig) -> Result<()> {
    let (target, memo) = command.target_and_memo();
    let chain = parse_chain_key(&target.chain)?;
    let builder = MsgBuilder::new(chain_config(chain), &target.address)?;

    let msg = match &command {
        TxCommand::Delegate {
            validator, amount, ..
        } => builder.delegate(validator, amount)?,
        TxCommand::Undelegate {
            validator, amount, ..
        } => builder.undelegate(validator, amount)?,
        TxCommand::Redelegate {
            src_validator,
            dst_validator,
            amount,
            ..
        } => builder.redelegate(src_validator, dst_validator, amount)?,
        TxCommand::ModifyWithdrawAddress {
            withdraw_address, ..
        } => builder.modify_withdraw_address(withdraw_address)?,
    };

    let service = TxService::new(lcd_client(config)?);
    print_sign_doc(&service, chain, &target.address, &[msg], memo)
}

impl TxCommand {
    fn target_and_memo(&self) -> (&Target, &str) {
        match self {
            Self::Delegate { target, memo, .. }
            | Self::Undelegate { target, memo, .. }
            | Self::Redelegate { target, memo, .. }
            | Self::ModifyWithdrawAddress { target, memo, .. } => (target, memo),
        }
    }
}

fn print_sign_doc<L: stakeboard_core::LcdSource>(
    service: &TxService<L>,
    chain: ChainKey,
    signer: &str,
    msgs: &[StakingMsg],
    memo: &str,
) -> Result<()> {
    let doc = service.prepare_sign_doc(chain, signer, msgs, memo)?;
    let bytes = doc.to_sign_bytes()?;
    println!("{}", String::from_utf8(bytes)?);
    Ok(())
}

fn lcd_client(config: &StakeboardConfig) -> Result<HttpLcdClient> {
    Ok(HttpLcdClient::new(config.lcd_timeout)?.with_overrides(config.lcd_overrides.clone()))
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Ping => "ping",
        Command::Chains => "chains",
        Command::Chain { .. } => "chain",
        Command::Accounts(_) => "accounts",
        Command::Dashboard { .. } => "dashboard",
        Command::Validators { .. } => "validators",
        Command::ClaimAll { .. } => "claim-all",
        Command::Claim { .. } => "claim",
        Command::Tx(_) => "tx",
        Command::Broadcast { .. } => "broadcast",
    }
}
