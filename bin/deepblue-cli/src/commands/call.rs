// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `deepblue call` command: run one operation and print its result.

use std::sync::Arc;

use runtime::{Runtime, RuntimeConfig};
use tensor_core::Input;

pub async fn execute(
    config: RuntimeConfig,
    op: String,
    args: Vec<String>,
    detailed: bool,
) -> anyhow::Result<()> {
    let rt = Arc::new(Runtime::new(config));
    let inputs: Vec<Input> = args.into_iter().map(Input::from).collect();

    if !detailed {
        let text = rt.call_async(op, inputs).await?;
        println!("{text}");
        return Ok(());
    }

    let worker = Arc::clone(&rt);
    let outcome = tokio::task::spawn_blocking(move || worker.call_detailed(&op, &inputs)).await?;
    println!("{}", outcome.text);
    eprintln!();
    eprintln!(
        "  Operation: {}",
        outcome.op.map_or("<unknown>", |op| op.name())
    );
    eprintln!("  Duration:  {:.3} ms", outcome.duration.as_secs_f64() * 1000.0);
    match &outcome.error {
        Some(e) => eprintln!("  Sentinel:  {e}"),
        None => eprintln!("  Status:    ok"),
    }
    Ok(())
}
