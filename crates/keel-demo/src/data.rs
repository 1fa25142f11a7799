//! Generated demo data and the simulated remote server.

use keel_widgets::table::filter::contains_ci;
use keel_widgets::table::sort::sort_by_rules;
use keel_widgets::table::{CellValue, ColumnDefinition, FetchRequest, Record};

const REGIONS: [&str; 3] = ["us-east-1", "eu-west-1", "ap-south-1"];
const KINDS: [&str; 4] = ["t3.micro", "m5.large", "c5.xlarge", "r5.2xlarge"];
const STATES: [&str; 3] = ["running", "stopped", "pending"];

/// A compute instance; some carry attached volumes as children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// Numeric id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Instance type.
    pub kind: String,
    /// Region.
    pub region: String,
    /// Lifecycle state.
    pub state: String,
    /// Attached volumes.
    pub volumes: Vec<Instance>,
}

impl Record for Instance {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "kind" => self.kind.as_str().into(),
            "region" => self.region.as_str().into(),
            "state" => self.state.as_str().into(),
            _ => CellValue::Null,
        }
    }

    fn sub_rows(&self) -> &[Self] {
        &self.volumes
    }
}

impl Instance {
    fn matches(&self, text: &str) -> bool {
        [&self.name, &self.kind, &self.region, &self.state]
            .iter()
            .any(|s| contains_ci(s, text))
    }
}

/// `n` deterministic instances. Every fourth one has two volumes.
pub fn instances(n: usize) -> Vec<Instance> {
    (0..n)
        .map(|i| {
            let id = u32::try_from(i).unwrap_or(u32::MAX);
            let volumes = if i % 4 == 3 {
                (0..2)
                    .map(|j| Instance {
                        id: id * 10 + j,
                        name: format!("vol-{i:03}-{j}"),
                        kind: "gp3".to_string(),
                        region: REGIONS[i % REGIONS.len()].to_string(),
                        state: "attached".to_string(),
                        volumes: Vec::new(),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            Instance {
                id,
                name: format!("web-{i:03}"),
                kind: KINDS[i % KINDS.len()].to_string(),
                region: REGIONS[i % REGIONS.len()].to_string(),
                state: STATES[(i / 2) % STATES.len()].to_string(),
                volumes,
            }
        })
        .collect()
}

/// Columns of the instance table.
pub fn columns() -> Vec<ColumnDefinition<Instance>> {
    vec![
        ColumnDefinition::new("id", "Id").width(4),
        ColumnDefinition::new("name", "Name"),
        ColumnDefinition::new("kind", "Type"),
        ColumnDefinition::new("region", "Region"),
        ColumnDefinition::new("state", "State"),
    ]
}

/// One answer of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Rows of the requested window.
    pub items: Vec<Instance>,
    /// Rows matching the request in total.
    pub row_count: usize,
}

/// In-process stand-in for a paging backend.
#[derive(Debug, Clone)]
pub struct InventoryServer {
    rows: Vec<Instance>,
}

impl InventoryServer {
    /// A server holding `rows`.
    pub const fn new(rows: Vec<Instance>) -> Self {
        Self { rows }
    }

    /// Rows held.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the server holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Filter, sort and slice the rows the way `request` describes.
    pub fn answer(&self, request: &FetchRequest) -> Page {
        let mut matching: Vec<Instance> = self
            .rows
            .iter()
            .filter(|r| r.matches(&request.filter_text))
            .cloned()
            .collect();
        sort_by_rules(&mut matching, &request.sort_by, |r: &Instance, col: &str| r.field(col));
        let row_count = matching.len();
        let start = request.page_index.saturating_mul(request.page_size).min(row_count);
        let end = start.saturating_add(request.page_size).min(row_count);
        tracing::debug!(start, end, row_count, "server answered");
        Page {
            items: matching.drain(start..end).collect(),
            row_count,
        }
    }
}
