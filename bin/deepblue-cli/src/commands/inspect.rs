// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `deepblue inspect` command: describe a single operation.

use runtime::menu::{LookupMode, MatchMode, MergeMode, OptimizerKind, ShellMode, TensorOpMode};
use runtime::OpCode;

pub async fn execute(name: String) -> anyhow::Result<()> {
    let op = OpCode::from_str_loose(&name)
        .ok_or_else(|| anyhow::anyhow!("unknown operation '{name}' (see `deepblue list`)"))?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             deepblue · Operation Inspector          ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    println!("  Name:      {}", op.name());
    println!("  Block:     {}", op.block_opcode());
    println!("  Arity:     {}", op.arity());
    println!("  Sentinel:  {}", op.sentinel().text("<first argument>"));
    println!();

    println!("  Parameters:");
    for (i, param) in op.params().iter().enumerate() {
        let letter = char::from(b'A' + i as u8);
        println!("   {letter}  {param}");
    }
    println!();

    if let Some(choices) = menu_choices(op) {
        println!("  Mode labels:");
        for (label, aliases) in choices {
            println!("   {label:<14} {aliases}");
        }
        println!();
    }
    Ok(())
}

/// The closed label set an operation's mode argument accepts.
fn menu_choices(op: OpCode) -> Option<Vec<(&'static str, &'static str)>> {
    let choices = match op {
        OpCode::TensorOp => vec![
            (TensorOpMode::Add.as_str(), "add, +, 加法"),
            (TensorOpMode::Multiply.as_str(), "multiply, mul, matmul, *, 乘法"),
        ],
        OpCode::MergeSplit => vec![
            (MergeMode::Merge.as_str(), "merge, 合并"),
            (MergeMode::Split.as_str(), "split, 拆分"),
        ],
        OpCode::Shell => vec![
            (ShellMode::AddShell.as_str(), "add, add_shell, wrap, 加壳"),
            (ShellMode::RemoveShell.as_str(), "remove, remove_shell, unwrap, 拆壳"),
        ],
        OpCode::DictLookup => vec![
            (LookupMode::KeyToValue.as_str(), "0, key, 键找值"),
            (LookupMode::ValueToKey.as_str(), "1, value, 值找键"),
        ],
        OpCode::FindReplace => vec![
            (MatchMode::Global.as_str(), "global, all, 全局"),
            (MatchMode::Single.as_str(), "anything else"),
        ],
        OpCode::UpdateWeights => vec![
            (OptimizerKind::Sgd.as_str(), "sgd (default)"),
            (OptimizerKind::Adam.as_str(), "adam"),
        ],
        _ => return None,
    };
    Some(choices)
}
