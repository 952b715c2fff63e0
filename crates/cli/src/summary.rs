//! JSON summaries and the tabular edge export.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use roomgraph::api::{
    is_orientable, non_flat_corners, Dir, EdgeRef, Frame, Graph, Preset, Session, Turn,
};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Shape and health of a built graph.
#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub preset: String,
    pub rooms: usize,
    pub edges: usize,
    pub consistent: bool,
    /// Edges without a matching back-edge, as `"<from><dir>-><to>"`.
    pub one_way_edges: Vec<String>,
    pub non_flat_corners: usize,
    pub orientable: bool,
}

impl GraphSummary {
    pub fn of(preset: &Preset, graph: &Graph) -> Self {
        let one_way: Vec<String> = graph.one_way_edges().iter().map(edge_label).collect();
        Self {
            preset: preset.to_string(),
            rooms: graph.len(),
            edges: graph.edge_count(),
            consistent: one_way.is_empty(),
            one_way_edges: one_way,
            non_flat_corners: non_flat_corners(graph).len(),
            orientable: is_orientable(graph),
        }
    }
}

fn edge_label(e: &EdgeRef) -> String {
    format!("{}{}->{}", e.from, e.dir, e.to)
}

/// One input of a move script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Dir),
    Turn(Turn),
}

#[derive(Debug, Serialize)]
pub struct Step {
    pub input: String,
    /// `false` when a move hit a wall.
    pub moved: bool,
    pub room: usize,
    pub frame: String,
}

/// Result of replaying a move script against a session.
#[derive(Debug, Serialize)]
pub struct WalkTrace {
    pub steps: Vec<Step>,
    pub room: usize,
    pub frame: String,
    pub remaining: usize,
    pub status: String,
}

impl WalkTrace {
    pub fn run(session: &mut Session, script: &[Input]) -> Self {
        let steps = script
            .iter()
            .map(|&input| {
                let (label, moved) = match input {
                    Input::Move(d) => (d.to_string(), session.move_player(d)),
                    Input::Turn(t) => {
                        session.turn(t);
                        let label = if t == Turn::Left { "<" } else { ">" };
                        (label.to_string(), true)
                    }
                };
                let cur = session.cursor();
                Step {
                    input: label,
                    moved,
                    room: cur.room.number(),
                    frame: frame_label(cur.transform),
                }
            })
            .collect();
        let cur = session.cursor();
        Self {
            steps,
            room: cur.room.number(),
            frame: frame_label(cur.transform),
            remaining: session.remaining().len(),
            status: session.status(),
        }
    }
}

fn frame_label(f: Frame) -> String {
    f.name().map(str::to_string).unwrap_or_else(|| f.to_string())
}

/// One row per directed edge: endpoints (1-based), slot letters, frame, and
/// whether the matching back-edge exists.
pub fn edge_table(graph: &Graph) -> Result<DataFrame> {
    let edges: Vec<EdgeRef> = graph.edges().collect();
    let from: Vec<u64> = edges.iter().map(|e| e.from.number() as u64).collect();
    let dir: Vec<String> = edges.iter().map(|e| e.dir.to_string()).collect();
    let to: Vec<u64> = edges.iter().map(|e| e.to.number() as u64).collect();
    let back: Vec<String> = edges.iter().map(|e| e.back_dir().to_string()).collect();
    let frame: Vec<String> = edges.iter().map(|e| frame_label(e.frame)).collect();
    let reflect: Vec<bool> = edges
        .iter()
        .map(|e| !e.frame.is_orientation_preserving())
        .collect();
    let two_way: Vec<bool> = edges.iter().map(|e| graph.is_two_way(e)).collect();
    let df = DataFrame::new(vec![
        Series::new("from".into(), from),
        Series::new("dir".into(), dir),
        Series::new("to".into(), to),
        Series::new("back_dir".into(), back),
        Series::new("frame".into(), frame),
        Series::new("reflect".into(), reflect),
        Series::new("two_way".into(), two_way),
    ])?;
    Ok(df)
}

/// Write `df` as CSV or Parquet, chosen by the extension of `out`.
pub fn write_table(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let ext = out.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext != "csv" && ext != "parquet" {
        bail!("unsupported output extension {ext:?}; use .csv or .parquet");
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    if ext == "csv" {
        CsvWriter::new(&mut file).finish(df)?;
    } else {
        ParquetWriter::new(&mut file).finish(df)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomgraph::api::{GraphCfg, SessionCfg, Topology};

    #[test]
    fn summary_reports_mobius_shape() {
        let g = Topology::MOBIUS.build(GraphCfg::default()).unwrap();
        let s = GraphSummary::of(&Preset::Mobius, &g);
        assert_eq!((s.rooms, s.edges), (30, 100));
        assert!(s.consistent);
        assert!(!s.orientable);
        assert_eq!(s.non_flat_corners, 0);
    }

    #[test]
    fn summary_lists_one_way_edges() {
        let cfg = GraphCfg {
            enforce_bidirectional: false,
        };
        let g = roomgraph::api::load_code("1E2 3E2", cfg).unwrap();
        let s = GraphSummary::of(&Preset::Custom(String::new()), &g);
        assert!(!s.consistent);
        assert_eq!(s.one_way_edges, vec!["3E->2".to_string()]);
    }

    #[test]
    fn walk_trace_records_each_input() {
        let mut session = Session::new(Preset::Mobius, SessionCfg::default()).unwrap();
        let script = [
            Input::Move(Dir::N),
            Input::Move(Dir::E),
            Input::Turn(Turn::Right),
        ];
        let trace = WalkTrace::run(&mut session, &script);
        assert_eq!(trace.steps.len(), 3);
        assert!(!trace.steps[0].moved);
        assert_eq!(trace.steps[1].room, 2);
        assert_eq!(trace.steps[2].frame, "rotate_cw");
        assert_eq!(trace.remaining, 28);
    }

    #[test]
    fn edge_table_has_a_row_per_directed_edge() {
        let g = Topology::KLEIN.build(GraphCfg::default()).unwrap();
        let df = edge_table(&g).unwrap();
        assert_eq!(df.shape(), (64, 7));
        let reflect = df.column("reflect").unwrap().bool().unwrap();
        assert_eq!(reflect.into_iter().filter(|r| *r == Some(true)).count(), 8);
    }

    #[test]
    fn write_table_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let g = Topology::FAN.build(GraphCfg::default()).unwrap();
        let mut df = edge_table(&g).unwrap();
        assert!(write_table(&mut df, &dir.path().join("edges.txt")).is_err());
        let pq = dir.path().join("edges.parquet");
        write_table(&mut df, &pq).unwrap();
        assert!(pq.metadata().unwrap().len() > 0);
    }
}
