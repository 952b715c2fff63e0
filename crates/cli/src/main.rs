use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use roomgraph::api::{Dir, GraphCfg, Preset, Session, SessionCfg, Turn};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod summary;

use provenance::{write_sidecar, Payload};
use summary::{edge_table, write_table, GraphSummary, Input, WalkTrace};

#[derive(Parser)]
#[command(name = "roomgraph-cli")]
#[command(about = "Build, walk, and export oriented room graphs")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Graph selection shared by every graph-producing subcommand.
#[derive(Args, Clone, Debug)]
struct GraphArgs {
    /// mobius | klein | projective | mobius2 | random | fan (alias B)
    #[arg(long, default_value = "mobius")]
    preset: String,
    /// Mini-language edge list; overrides --preset
    #[arg(long)]
    code: Option<String>,
    /// Allow one-way edges instead of failing on occupied back slots
    #[arg(long)]
    relaxed: bool,
    /// Start with every room visited
    #[arg(long)]
    god_mode: bool,
    /// Seed for the random preset
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl GraphArgs {
    fn preset(&self) -> Result<Preset> {
        match &self.code {
            Some(code) => Ok(Preset::Custom(code.clone())),
            None => Ok(self.preset.parse()?),
        }
    }

    fn cfg(&self) -> SessionCfg {
        SessionCfg {
            graph: GraphCfg {
                enforce_bidirectional: !self.relaxed,
            },
            god_mode: self.god_mode,
            seed: self.seed,
        }
    }

    fn session(&self) -> Result<Session> {
        let preset = self.preset()?;
        Session::new(preset.clone(), self.cfg())
            .with_context(|| format!("building {preset} graph"))
    }

    fn params(&self) -> serde_json::Value {
        json!({
            "preset": self.preset,
            "code": self.code,
            "relaxed": self.relaxed,
            "god_mode": self.god_mode,
            "seed": self.seed,
        })
    }
}

#[derive(Subcommand)]
enum Action {
    /// Build a graph and print a JSON summary
    Build {
        #[command(flatten)]
        graph: GraphArgs,
    },
    /// Drive the observer with a move script and print the trace
    Walk {
        #[command(flatten)]
        graph: GraphArgs,
        /// Letters W/N/E/S move; `<` and `>` turn left and right
        #[arg(long)]
        moves: String,
    },
    /// Write the edge table (.csv or .parquet) plus a provenance sidecar
    Export {
        #[command(flatten)]
        graph: GraphArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Build { graph } => build(&graph),
        Action::Walk { graph, moves } => walk(&graph, &moves),
        Action::Export { graph, out } => export(&graph, &out),
        Action::Report => report(),
    }
}

fn build(args: &GraphArgs) -> Result<()> {
    tracing::info!(preset = %args.preset, code = ?args.code, relaxed = args.relaxed, "build");
    let session = args.session()?;
    let summary = GraphSummary::of(session.preset(), session.graph());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn walk(args: &GraphArgs, moves: &str) -> Result<()> {
    tracing::info!(preset = %args.preset, moves, "walk");
    let mut session = args.session()?;
    let script = parse_moves(moves)?;
    let trace = WalkTrace::run(&mut session, &script);
    println!("{}", serde_json::to_string_pretty(&trace)?);
    Ok(())
}

fn export(args: &GraphArgs, out: &Path) -> Result<()> {
    tracing::info!(preset = %args.preset, out = %out.display(), "export");
    let session = args.session()?;
    let mut df = edge_table(session.graph())?;
    write_table(&mut df, out)?;
    tracing::info!(rows = df.height(), cols = df.width(), "edge_table_written");
    let summary = GraphSummary::of(session.preset(), session.graph());
    let payload = Payload::new(args.params()).with_summary(serde_json::to_value(&summary)?);
    let prov = write_sidecar(out, payload)?;
    tracing::info!(sidecar = %prov.display(), "provenance_written");
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "roomgraph_version": roomgraph::VERSION,
        "presets": Preset::NAMES,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// `W`/`N`/`E`/`S` (any case) move, `<` turns left, `>` turns right;
/// whitespace and commas are skipped.
fn parse_moves(script: &str) -> Result<Vec<Input>> {
    let mut out = Vec::with_capacity(script.len());
    for c in script.chars() {
        match c {
            '<' => out.push(Input::Turn(Turn::Left)),
            '>' => out.push(Input::Turn(Turn::Right)),
            c if c.is_whitespace() || c == ',' => {}
            c => match Dir::from_letter(c) {
                Some(d) => out.push(Input::Move(d)),
                None => bail!("unexpected character {c:?} in move script"),
            },
        }
    }
    Ok(out)
}
