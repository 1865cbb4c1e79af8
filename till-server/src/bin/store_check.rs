//! Probe every hosted store table and report reachability, row counts
//! and latency. Exits non-zero if any table fails.
//!
//! ```text
//! STORE_URL=... STORE_API_KEY=... cargo run --bin store-check [-- --json]
//! ```

use anyhow::Context;

use till_server::store::{DataSource, RemoteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let url = std::env::var("STORE_URL").context("STORE_URL must be set")?;
    let key = std::env::var("STORE_API_KEY").context("STORE_API_KEY must be set")?;
    let as_json = std::env::args().any(|a| a == "--json");

    let store = RemoteStore::new(&url, &key);
    let probes = store.probe().await;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&probes)?);
    } else {
        println!("Store: {url}");
        for p in &probes {
            match (&p.ok, &p.error) {
                (true, _) => println!(
                    "  ✅ {:<22} {:>6} rows  {:>5} ms",
                    p.table,
                    p.rows.map(|r| r.to_string()).unwrap_or_else(|| "?".into()),
                    p.latency_ms
                ),
                (false, Some(err)) => println!("  ❌ {:<22} {err}", p.table),
                (false, None) => println!("  ❌ {:<22} unknown error", p.table),
            }
        }
    }

    if probes.iter().any(|p| !p.ok) {
        std::process::exit(1);
    }
    Ok(())
}
