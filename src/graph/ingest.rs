//! Raw dataset ingestion.
//!
//! Datasets arrive as JSON with bracketed string tokens such as
//! `"[(0,10): (1,2,3,4)]"` for positions and `"[0,10]"` for presence. Tokens
//! are parsed by stripping bracket characters, then splitting on `:` and `,`.
//! A malformed token only costs its own sample.

use super::Graph;
use crate::builder::GraphBuilder;
use crate::error::{ChronoError, Result};
use chronograph_types::EntityId;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One position record: the entity moved from `from` at `t0` to `to` at `t1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub t0: f64,
    pub t1: f64,
    pub from: Point<f64>,
    pub to: Point<f64>,
}

impl IntervalRecord {
    pub fn new(t0: f64, t1: f64, from: Point<f64>, to: Point<f64>) -> Self {
        Self { t0, t1, from, to }
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.t0,
            self.t1,
            self.from.x(),
            self.from.y(),
            self.to.x(),
            self.to.y(),
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(ChronoError::InvalidInput(
                "Interval record values must be finite".into(),
            ));
        }
        if self.t0 > self.t1 {
            return Err(ChronoError::InvalidInput(format!(
                "Interval start {} is after its end {}",
                self.t0, self.t1
            )));
        }
        Ok(())
    }
}

/// Node or edge identifier as found in raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl RawId {
    /// Sanitized identity, or `None` when nothing survives sanitization.
    pub fn to_entity_id(&self) -> Option<EntityId> {
        let id = match self {
            RawId::Number(n) => sanitize_id(&n.to_string()),
            RawId::Text(s) => sanitize_id(s),
        };
        (!id.is_empty()).then(|| EntityId::new(id))
    }
}

/// A node position entry, either a combined token or split fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPosition {
    Token(String),
    Fields {
        #[serde(alias = "timeString", alias = "t")]
        time: String,
        #[serde(alias = "coordString", alias = "coords")]
        coordinates: String,
    },
}

impl RawPosition {
    pub fn parse(&self) -> Result<IntervalRecord> {
        match self {
            RawPosition::Token(token) => parse_interval_record(token),
            RawPosition::Fields { time, coordinates } => {
                let (t0, t1) = parse_time_pair(time)?;
                let [x0, y0, x1, y1] = parse_coordinates(coordinates)?;
                let record = IntervalRecord::new(t0, t1, Point::new(x0, y0), Point::new(x1, y1));
                record.validate()?;
                Ok(record)
            }
        }
    }
}

/// An edge presence entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPresence {
    Token(String),
    Fields {
        #[serde(alias = "timeString", alias = "t")]
        time: String,
    },
}

impl RawPresence {
    pub fn parse(&self) -> Result<(f64, f64)> {
        match self {
            RawPresence::Token(token) => parse_time_pair(token),
            RawPresence::Fields { time } => parse_time_pair(time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub id: RawId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub position: Vec<RawPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    pub id: RawId,
    pub source: RawId,
    pub target: RawId,
    #[serde(default)]
    pub presence: Vec<RawPresence>,
}

/// A dataset as delivered by the loading layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDataset {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

impl RawDataset {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Graph {
    /// Build a graph from a raw dataset, skipping malformed entries.
    pub fn from_raw(raw: &RawDataset) -> Graph {
        let mut builder = GraphBuilder::new();

        for node in &raw.nodes {
            let Some(id) = node.id.to_entity_id() else {
                log::warn!("Skipping node with empty id {:?}", node.id);
                continue;
            };
            let label = node.label.clone().unwrap_or_else(|| id.to_string());

            for (index, position) in node.position.iter().enumerate() {
                let added = position.parse().and_then(|record| {
                    builder.add_node_record(id.clone(), label.clone(), record)?;
                    Ok(())
                });
                if let Err(e) = added {
                    log::warn!(
                        "Skipping malformed position {} of node '{}': {}",
                        index,
                        id,
                        e
                    );
                }
            }
        }

        for edge in &raw.edges {
            let (Some(id), Some(source), Some(target)) = (
                edge.id.to_entity_id(),
                edge.source.to_entity_id(),
                edge.target.to_entity_id(),
            ) else {
                log::warn!("Skipping edge with empty id or endpoint {:?}", edge.id);
                continue;
            };

            for (index, presence) in edge.presence.iter().enumerate() {
                let added = presence.parse().and_then(|pair| {
                    builder.add_edge_presence(id.clone(), source.clone(), target.clone(), pair)?;
                    Ok(())
                });
                if let Err(e) = added {
                    log::warn!(
                        "Skipping malformed presence {} of edge '{}': {}",
                        index,
                        id,
                        e
                    );
                }
            }
        }

        builder.build()
    }
}

/// Strip ASCII punctuation and whitespace from an identifier.
///
/// ```
/// use chronograph::graph::ingest::sanitize_id;
///
/// assert_eq!(sanitize_id(" node-1.a "), "node1a");
/// ```
pub fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_ascii_punctuation() && !c.is_whitespace())
        .collect()
}

fn strip_brackets(token: &str) -> String {
    token
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '(' | ')' | '{' | '}') && !c.is_whitespace())
        .collect()
}

fn parse_numbers(list: &str, expected: usize, what: &str) -> Result<Vec<f64>> {
    let values = list
        .split(',')
        .map(|part| {
            part.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    ChronoError::InvalidInput(format!("Invalid number '{}' in {}", part, what))
                })
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() != expected {
        return Err(ChronoError::InvalidInput(format!(
            "Expected {} values in {}, got {}",
            expected,
            what,
            values.len()
        )));
    }
    Ok(values)
}

/// Parse a `"[t0,t1]"` token into an ordered pair.
pub fn parse_time_pair(token: &str) -> Result<(f64, f64)> {
    let stripped = strip_brackets(token);
    let values = parse_numbers(&stripped, 2, "time pair")?;
    let (t0, t1) = (values[0], values[1]);
    if t0 > t1 {
        return Err(ChronoError::InvalidInput(format!(
            "Time pair is not ordered: [{}, {}]",
            t0, t1
        )));
    }
    Ok((t0, t1))
}

/// Parse a `"[x0,y0,x1,y1]"` token.
pub fn parse_coordinates(token: &str) -> Result<[f64; 4]> {
    let stripped = strip_brackets(token);
    let values = parse_numbers(&stripped, 4, "coordinates")?;
    Ok([values[0], values[1], values[2], values[3]])
}

/// Parse a combined `"[(t0,t1): (x0,y0,x1,y1)]"` token.
///
/// ```
/// use chronograph::graph::ingest::parse_interval_record;
///
/// let record = parse_interval_record("[(0, 10): (1, 2, 3, 4)]").unwrap();
/// assert_eq!(record.t1, 10.0);
/// assert_eq!(record.to.y(), 4.0);
/// ```
pub fn parse_interval_record(token: &str) -> Result<IntervalRecord> {
    let stripped = strip_brackets(token);
    let (time, coordinates) = stripped.split_once(':').ok_or_else(|| {
        ChronoError::InvalidInput(format!("Missing ':' separator in '{}'", token))
    })?;

    let (t0, t1) = parse_time_pair(time)?;
    let [x0, y0, x1, y1] = parse_coordinates(coordinates)?;
    Ok(IntervalRecord::new(
        t0,
        t1,
        Point::new(x0, y0),
        Point::new(x1, y1),
    ))
}
