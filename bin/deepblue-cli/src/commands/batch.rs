// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `deepblue batch` command: run many calls concurrently.
//!
//! Each non-blank input line is one JSON object:
//! ```text
//! {"op": "vec_mat", "args": ["[1, 2]", "[1, 2, 3, 4]"]}
//! {"op": "dot", "args": [[1, 2], [3, 4]]}
//! {"op": "relu", "args": {"tensor": "[-1, 1]"}}
//! ```
//! String arguments are passed through as text; any other JSON value is
//! passed as its JSON text. An object of arguments is matched by
//! parameter name or position letter. Results are printed one per line in
//! input order.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use runtime::{Runtime, RuntimeConfig};
use serde_json::Value;
use tensor_core::Input;

#[derive(Debug, serde::Deserialize)]
struct BatchCall {
    op: String,
    #[serde(default)]
    args: Value,
}

enum Arguments {
    Positional(Vec<Input>),
    Named(HashMap<String, Input>),
}

fn to_input(value: Value) -> Input {
    match value {
        Value::String(s) => Input::Text(s),
        other => Input::Text(other.to_string()),
    }
}

fn arguments(args: Value) -> anyhow::Result<Arguments> {
    Ok(match args {
        Value::Null => Arguments::Positional(Vec::new()),
        Value::Array(items) => Arguments::Positional(items.into_iter().map(to_input).collect()),
        Value::Object(map) => {
            Arguments::Named(map.into_iter().map(|(k, v)| (k, to_input(v))).collect())
        }
        other => anyhow::bail!("'args' must be an array or object, got {other}"),
    })
}

fn read_source(file: &Path) -> anyhow::Result<String> {
    if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("cannot read '{}': {e}", file.display()))
}

pub async fn execute(config: RuntimeConfig, file: PathBuf) -> anyhow::Result<()> {
    let source = read_source(&file)?;
    let rt = Arc::new(Runtime::new(config));
    let start = Instant::now();

    let mut pending = Vec::new();
    let mut rejected = 0usize;
    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let parsed = serde_json::from_str::<BatchCall>(line)
            .map_err(anyhow::Error::from)
            .and_then(|call| Ok((call.op, arguments(call.args)?)));
        let (op, args) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "skipping malformed line");
                rejected += 1;
                continue;
            }
        };

        let rt = Arc::clone(&rt);
        let handle = tokio::task::spawn_blocking(move || match args {
            Arguments::Positional(inputs) => rt.call(&op, &inputs),
            Arguments::Named(named) => rt.call_named(&op, &named).text,
        });
        pending.push((line_no, handle));
    }

    for (line_no, handle) in pending {
        let text = handle.await?;
        println!("{line_no}\t{text}");
    }

    let metrics = rt.metrics();
    eprintln!();
    eprintln!("  {}", metrics.summary());
    if rejected > 0 {
        eprintln!("  {rejected} malformed line(s) skipped");
    }
    eprintln!("  Wall time: {:.3} ms", start.elapsed().as_secs_f64() * 1000.0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_positional() {
        let Arguments::Positional(inputs) = arguments(serde_json::json!(["[1]", [2, 3], 4])).unwrap()
        else {
            panic!("expected positional arguments");
        };
        assert_eq!(
            inputs,
            vec![Input::from("[1]"), Input::from("[2,3]"), Input::from("4")]
        );
    }

    #[test]
    fn test_arguments_named_and_invalid() {
        assert!(matches!(
            arguments(serde_json::json!({"tensor": "[1]"})).unwrap(),
            Arguments::Named(_)
        ));
        assert!(arguments(serde_json::json!(5)).is_err());
    }
}
