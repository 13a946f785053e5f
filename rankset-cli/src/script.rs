use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use rankset::{DisjointSet, IntDoubleHash, SetError};

pub type Crew = DisjointSet<i64, String, IntDoubleHash>;

/// One facade call in a replay script.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    MakeSet { key: i64, value: String },
    Find { key: i64 },
    Unite { a: i64, b: i64 },
    Absorb { senior: i64, junior: i64 },
    Connected { a: i64, b: i64 },
    Size { key: i64 },
    Rank { key: i64 },
    Members { key: i64 },
}

impl Op {
    fn name(&self) -> &'static str {
        match self {
            Op::MakeSet { .. } => "make_set",
            Op::Find { .. } => "find",
            Op::Unite { .. } => "unite",
            Op::Absorb { .. } => "absorb",
            Op::Connected { .. } => "connected",
            Op::Size { .. } => "size",
            Op::Rank { .. } => "rank",
            Op::Members { .. } => "members",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OpResult {
    pub op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn run_op(crew: &mut Crew, op: &Op) -> Result<Value, SetError> {
    Ok(match op {
        Op::MakeSet { key, value } => {
            crew.make_set(*key, value.clone())?;
            Value::Null
        }
        Op::Find { key } => json!(crew.find(key)?),
        Op::Unite { a, b } => json!(crew.unite(a, b)?),
        Op::Absorb { senior, junior } => json!(crew.absorb(senior, junior)?),
        Op::Connected { a, b } => json!(crew.connected(a, b)?),
        Op::Size { key } => json!(crew.set_size(key)?),
        Op::Rank { key } => json!(crew.rank(key)?),
        Op::Members { key } => json!(crew.members(key)?),
    })
}

/// Run every op in order. A failing op is recorded and the replay goes on.
pub fn replay(crew: &mut Crew, ops: &[Op]) -> Vec<OpResult> {
    ops.iter()
        .map(|op| match run_op(crew, op) {
            Ok(value) => OpResult {
                op: op.name(),
                ok: Some(value),
                error: None,
            },
            Err(e) => {
                log::debug!("{} failed: {e}", op.name());
                OpResult {
                    op: op.name(),
                    ok: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect()
}
