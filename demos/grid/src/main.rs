//! grid — road-closure impact demo for the traffic-impact engine.
//!
//! Samples origin-destination pairs on a synthetic 12 × 12 city grid (or a
//! network loaded from CSV), closes every street at the intersection
//! nearest the city centre, slows one arterial, and prints the resulting
//! impact statistics as JSON.
//!
//! ```text
//! cargo run -p grid --release
//! cargo run -p grid --release -- nodes.csv edges.csv
//! RUST_LOG=debug cargo run -p grid
//! ```

mod network;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ti_core::NodeId;
use ti_impact::{EdgeModification, ImpactService, ServiceConfig};
use ti_network::{load_network_csv, GraphView, RoadNetwork};

use network::build_grid;

// ── Constants ─────────────────────────────────────────────────────────────────

const PAIR_COUNT:     usize = 500;
const SEED:           u64   = 42;
const RADIUS_KM:      f64   = 2.0;
const SLOWDOWN_KPH:   f64   = 10.0;
const TOP_EDGE_COUNT: usize = 5;

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn load_network(args: &[String]) -> Result<RoadNetwork> {
    match args {
        [nodes, edges] => load_network_csv(Path::new(nodes), Path::new(edges))
            .with_context(|| format!("loading network from {nodes} and {edges}")),
        [] => Ok(build_grid()),
        _ => anyhow::bail!("usage: grid [NODES_CSV EDGES_CSV]"),
    }
}

/// Close every street touching `node`, in both directions.
fn close_intersection(network: &RoadNetwork, node: NodeId) -> Vec<EdgeModification> {
    let mut mods = Vec::new();
    for e in network.out_edges(node) {
        let other = network.edge_target(e);
        mods.push(EdgeModification::remove(node, other));
        if network.find_edge(other, node).is_some() {
            mods.push(EdgeModification::remove(other, node));
        }
    }
    mods
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    println!("=== grid — traffic impact analysis ===");
    println!("Pairs: {PAIR_COUNT}  |  Radius: {RADIUS_KM} km  |  Seed: {SEED}");
    println!();

    // 1. Service and network.
    let config = ServiceConfig {
        default_pair_count: PAIR_COUNT,
        default_pair_seed:  Some(SEED),
        sample_radius_km:   Some(RADIUS_KM),
        ..ServiceConfig::default()
    };
    let service = ImpactService::with_config(config)?;
    service.load_network(load_network(&args)?);

    let info = service.network_info()?;
    println!("Road network: {} nodes, {} edges", info.node_count, info.edge_count);

    // 2. Default sample; pre-warms the baseline cache.
    let t0 = Instant::now();
    let pairs = service.generate_default_pairs(None, None, None)?;
    println!("Sampled {} pairs, baseline in {:.1?}", pairs.len(), t0.elapsed());

    // 3. Modifications: close the centre intersection, slow one arterial.
    let network = service.network()?;
    let centre = network
        .bbox_center()
        .and_then(|c| network.snap_to_node(c))
        .context("network has no nodes")?;
    let mut mods = close_intersection(&network, centre);
    let closures = mods.len();
    if let Some(e) = network.out_edges(NodeId(0)).next() {
        mods.push(EdgeModification::set_speed(NodeId(0), network.edge_target(e), SLOWDOWN_KPH));
    }
    println!("Closing {centre} ({closures} directed edges), {} slowdown(s)", mods.len() - closures);

    // 4. Recalculate.
    let t0 = Instant::now();
    let result = service.recalculate(None, &mods, None)?;
    println!(
        "Recalculated in {:.1?}: {} applied, {} comparisons, {} routes",
        t0.elapsed(),
        result.applied_modifications.len(),
        result.comparisons.len(),
        result.routes.len(),
    );
    let stats = service.cache_stats();
    println!("Route cache: {} hits, {} misses", stats.hits, stats.misses);
    println!();

    // 5. Report.
    println!("Impact statistics:");
    println!("{}", serde_json::to_string_pretty(&result.impact_statistics)?);
    println!();

    println!("Top {TOP_EDGE_COUNT} edges after modification:");
    let top: Vec<_> = result.new_edge_usage.iter().take(TOP_EDGE_COUNT).collect();
    println!("{}", serde_json::to_string_pretty(&top)?);

    Ok(())
}
