//! # Dukaan Admin Console
//!
//! CLI for catalog management against a running API server.
//!
//! ## Offline behavior
//! `products add` and `products update` try the server first; when it cannot
//! be reached (or refuses), the edit is parked on the local queue and the
//! command still succeeds. `sync` replays the queue; `pending` inspects it.
//!
//! ```bash
//! dukaan-admin products add --name "Desk Lamp" --price 499
//! dukaan-admin products list --query lamp
//! dukaan-admin sync
//! dukaan-admin orders place --phone 1234567890 --item 3:2 --item 7 --cod
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;

use dukaan_core::{Cart, PaymentInfo, ProductDraft, Transaction, TransactionRequest};
use dukaan_core::{STATUS_PAID, STATUS_PLACED};
use dukaan_sync::{SaveOutcome, SyncAgent, SyncConfig, SyncOutcome};

// =============================================================================
// CLI Definition
// =============================================================================

#[derive(Parser)]
#[command(name = "dukaan-admin", about = "Admin console for the Dukaan shop", version)]
struct Cli {
    /// Path to sync.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL (e.g. http://localhost:5000/api)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check server health
    Ping,

    /// Product catalog operations
    #[command(subcommand)]
    Products(ProductsCmd),

    /// Replay queued offline edits against the server
    Sync,

    /// Show (or drop entries from) the offline queue
    Pending {
        /// Drop the entry at this position (as shown by `pending`)
        #[arg(long)]
        drop: Option<usize>,
    },

    /// Account operations
    #[command(subcommand)]
    Account(AccountCmd),

    /// Order history and test orders
    #[command(subcommand)]
    Orders(OrdersCmd),
}

#[derive(Subcommand)]
enum ProductsCmd {
    /// List products, optionally filtered by name or id
    List {
        #[arg(long)]
        query: Option<String>,
    },
    /// Add a product (queued locally if the server is unreachable)
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        image: Option<String>,
    },
    /// Update a product (queued locally if the server is unreachable)
    Update {
        id: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product (no offline fallback)
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum AccountCmd {
    /// Create an account
    Signup {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Check credentials
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum OrdersCmd {
    /// Show order history for a phone or account
    List {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Place a test order: --item <product-id>[:<quantity>] ...
    Place {
        #[arg(long)]
        phone: String,
        #[arg(long = "item", value_parser = parse_item, required = true)]
        items: Vec<(u64, i64)>,
        /// Cash on delivery (records the order as PLACED instead of PAID)
        #[arg(long)]
        cod: bool,
    },
}

/// Parses `--item 3:2` (product 3, quantity 2); a bare `--item 3` means one.
fn parse_item(raw: &str) -> Result<(u64, i64), String> {
    let (id, qty) = match raw.split_once(':') {
        Some((id, qty)) => (id, qty),
        None => (raw, "1"),
    };
    let id = id.parse().map_err(|_| format!("bad product id: {id}"))?;
    let qty = qty.parse().map_err(|_| format!("bad quantity: {qty}"))?;
    Ok((id, qty))
}

// =============================================================================
// Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SyncConfig::load(cli.config.clone()).context("loading sync config")?;
    if let Some(api_url) = cli.api_url.clone() {
        config.api_base_url = api_url;
    }

    let mut agent = SyncAgent::from_config(&config)?;

    match cli.command {
        Command::Ping => {
            let pong = agent.client().ping().await?;
            println!("server ok, time {}", pong.time);
        }

        Command::Products(cmd) => run_products(&mut agent, cmd).await?,

        Command::Sync => match agent.sync().await {
            Ok(SyncOutcome::NothingToSync) => println!("nothing to sync"),
            Ok(SyncOutcome::Completed { synced }) => println!("sync complete: {synced} item(s)"),
            Err(err) => {
                // queue untouched; the next `sync` retries everything
                bail!("sync failed: {err} ({} item(s) still queued)", agent.pending_count());
            }
        },

        Command::Pending { drop } => match drop {
            Some(index) => match agent.drop_pending(index)? {
                Some(entry) => println!("dropped {}", entry.label()),
                None => bail!("no queue entry at position {index}"),
            },
            None => {
                if agent.pending_count() == 0 {
                    println!("queue is empty");
                }
                for (index, entry) in agent.pending().iter().enumerate() {
                    println!("{index:>3}  {}", entry.label());
                }
            }
        },

        Command::Account(AccountCmd::Signup { phone, password, name }) => {
            let account = agent.client().signup(&phone, &password, &name).await?;
            println!("account {} created for {}", account.id, account.phone);
        }

        Command::Account(AccountCmd::Login { phone, password }) => {
            let account = agent.client().login(&phone, &password).await?;
            let name = if account.name.is_empty() { "(no name)" } else { account.name.as_str() };
            println!("logged in: {} {}", account.phone, name);
        }

        Command::Orders(cmd) => run_orders(&mut agent, cmd).await?,
    }

    Ok(())
}

// =============================================================================
// Subcommand Bodies
// =============================================================================

async fn run_products(agent: &mut SyncAgent, cmd: ProductsCmd) -> anyhow::Result<()> {
    match cmd {
        ProductsCmd::List { query } => {
            agent.refresh_products().await?;
            let products = agent.search(query.as_deref().unwrap_or(""));
            if products.is_empty() {
                println!("no products");
            }
            for p in products {
                println!("#{:<4} {:<28} ₹{:<10} {}", p.id, p.name, p.price, p.image);
            }
        }

        ProductsCmd::Add { name, price, image } => {
            let draft = ProductDraft { name, price, image };
            match agent.save_product(draft).await? {
                SaveOutcome::Saved(p) => println!("created #{} {}", p.id, p.name),
                SaveOutcome::Queued => {
                    println!(
                        "server unreachable - saved locally ({} pending). run `sync` later",
                        agent.pending_count()
                    );
                }
            }
        }

        ProductsCmd::Update { id, name, price, image } => {
            let draft = ProductDraft { name, price, image };
            match agent.update_product(id, draft).await? {
                SaveOutcome::Saved(p) => println!("updated #{} {}", p.id, p.name),
                SaveOutcome::Queued => {
                    println!(
                        "server unreachable - update queued ({} pending). run `sync` later",
                        agent.pending_count()
                    );
                }
            }
        }

        ProductsCmd::Delete { id } => {
            agent.delete_product(id).await?;
            println!("deleted #{id}");
        }
    }
    Ok(())
}

async fn run_orders(agent: &mut SyncAgent, cmd: OrdersCmd) -> anyhow::Result<()> {
    match cmd {
        OrdersCmd::List { phone, user_id } => {
            let orders = if let Some(user_id) = user_id {
                agent.client().transactions_for_user(user_id).await?
            } else if let Some(phone) = phone {
                agent.client().transactions_for_phone(&phone).await?
            } else {
                bail!("pass --phone or --user-id");
            };

            if orders.is_empty() {
                println!("no orders");
            }
            for order in orders {
                print_order(&order);
            }
        }

        OrdersCmd::Place { phone, items, cod } => {
            agent.refresh_products().await?;

            let mut cart = Cart::new();
            for (id, qty) in items {
                cart.set_quantity(id, qty);
            }

            let line_items = cart.line_items(agent.products());
            if line_items.is_empty() {
                bail!("none of the given product ids exist");
            }
            let total = cart.total(agent.products());

            let request = TransactionRequest {
                phone: Some(Value::String(phone)),
                items: line_items,
                total: Some(total),
                payment: Some(PaymentInfo {
                    method: if cod { "COD".into() } else { "UPI".into() },
                    details: None,
                }),
                status: Some(if cod { STATUS_PLACED } else { STATUS_PAID }.to_string()),
                ..Default::default()
            };

            let order = agent.client().create_transaction(&request).await?;
            println!("order placed:");
            print_order(&order);
        }
    }
    Ok(())
}

fn print_order(order: &Transaction) {
    println!(
        "order #{:<4} {}  {:<7} ₹{:<10} {}",
        order.id, order.date, order.status, order.total, order.phone
    );
    for item in &order.items {
        println!("      {} × {} @ ₹{}", item.quantity, item.name, item.price);
    }
}
