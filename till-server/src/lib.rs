//! Till Server - offline-tolerant restaurant point-of-sale service
//!
//! # Architecture Overview
//!
//! The till keeps the whole working set (menu, inventory, order history)
//! in memory and treats the hosted relational store as the source of
//! truth it synchronizes against:
//!
//! - **Store layer** (`store`): [`store::DataSource`] abstraction with a
//!   remote PostgREST-backed implementation and a seeded local fallback,
//!   plus a redb snapshot cache for instant warm launches
//! - **Sync** (`sync`): warmup with three-tier fallback and a background
//!   refresh loop
//! - **Catalog** (`catalog`): the in-memory working set served to every
//!   request
//! - **Cart / Checkout** (`cart`, `checkout`): per-location active carts
//!   and the order placement saga with stock deduction
//! - **HTTP API** (`api`): RESTful surface for the till front end
//!
//! # Module Structure
//!
//! ```text
//! till-server/src/
//! ├── core/       # Config, state, server
//! ├── store/      # DataSource trait, remote/local stores, snapshot cache
//! ├── catalog/    # In-memory working set
//! ├── sync/       # Warmup + background refresh
//! ├── stock/      # Stock resolution and availability
//! ├── cart/       # Per-location active carts
//! ├── pricing/    # Order totals
//! ├── checkout/   # Order placement + deductions
//! ├── reporting/  # Daily sales aggregation
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # Errors, logging
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod pricing;
pub mod reporting;
pub mod seed;
pub mod stock;
pub mod store;
pub mod sync;
pub mod utils;

pub use cart::CartManager;
pub use catalog::Catalog;
pub use checkout::CheckoutService;
pub use core::{Config, Server, ServerState};
pub use store::{DataSource, LocalStore, RemoteStore, SnapshotCache};
pub use sync::SyncService;
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Set up the process environment: dotenv, then logging.
pub fn setup_environment() -> std::io::Result<()> {
    // .env is optional; env vars win either way
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ______ _ __ __
 /_  __/(_) / /
  / /  / / / /
 /_/  /_/_/_/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
