// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `deepblue list` command: print the operation table.

use runtime::OpCode;

use super::truncate;

pub async fn execute() -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              deepblue · Operation Table             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    println!(
        "  {:<24} {:<32} {:<46} {}",
        "Name", "Block", "Parameters", "Sentinel",
    );
    println!("  {}", "-".repeat(118));

    for op in OpCode::ALL {
        println!(
            "  {:<24} {:<32} {:<46} {}",
            op.name(),
            truncate(op.block_opcode(), 32),
            truncate(&op.params().join(", "), 46),
            op.sentinel().text("<input>"),
        );
    }
    println!();
    println!("  {} operations", OpCode::ALL.len());
    Ok(())
}
