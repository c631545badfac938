// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Argument coercion and per-operation execution.
//!
//! [`execute`] turns loosely-typed positional arguments into the typed
//! inputs each library function expects, runs it, and renders the result
//! in canonical text. Numeric arguments follow one convention throughout:
//! a missing, unparseable or zero value takes the operation's default.
//! Failures come back as [`RuntimeError`]; mapping them to sentinels is
//! the engine's job.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use serde_json::Value;

use encoding::{dict, onehot, text, tokenizer, DecodeMode};
use neural_ops::{dropout, loss, mutation, pruning, quantize, vector};
use neural_ops::{Activation, Loss, NormKind};
use optimizer::{OptimizerConfig, OptimizerKind, DEFAULT_LEARNING_RATE};
use tensor_core::canonical::{format_number, to_text, vector_to_text};
use tensor_core::ops::{self, ParallelConfig};
use tensor_core::{Input, Shape, Tensor};

use crate::menu::{LookupMode, MatchMode, MergeMode, ShellMode, TensorOpMode};
use crate::{OpCode, RuntimeError};

/// Upper bound on elements an operation may allocate from a size argument.
pub const MAX_ELEMENTS: usize = 1 << 24;

static MISSING: Input = Input::Text(String::new());

/// Shared resources a call may need.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    rng: &'a Mutex<StdRng>,
    parallel: &'a ParallelConfig,
}

impl<'a> CallContext<'a> {
    pub fn new(rng: &'a Mutex<StdRng>, parallel: &'a ParallelConfig) -> Self {
        Self { rng, parallel }
    }

    /// Runs `f` with the shared generator locked. A poisoned lock is
    /// recovered; the generator has no invariant a panic could break.
    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}

// ── Argument coercion ──────────────────────────────────────────

fn arg(args: &[Input], index: usize) -> &Input {
    args.get(index).unwrap_or(&MISSING)
}

/// `max(0, floor(x))` as an index; NaN is `0`.
fn index_of(x: f64) -> usize {
    x.floor().max(0.0) as usize
}

fn invalid(op: OpCode, detail: impl Into<String>) -> RuntimeError {
    RuntimeError::InvalidArgument {
        op: op.name(),
        detail: detail.into(),
    }
}

/// A sequence argument. Bare scalars are rejected.
fn sequence_arg(op: OpCode, input: &Input) -> Result<Tensor, RuntimeError> {
    let tensor = input.to_tensor();
    if tensor.is_scalar() {
        return Err(invalid(op, "expected an array"));
    }
    Ok(tensor)
}

/// A dimension vector: a non-empty array of positive numbers, floored,
/// describing at most [`MAX_ELEMENTS`] elements.
fn dims_arg(op: OpCode, input: &Input) -> Result<Vec<usize>, RuntimeError> {
    let tensor = input.to_tensor();
    let items = tensor
        .as_seq()
        .filter(|items| !items.is_empty())
        .ok_or_else(|| invalid(op, "dimensions must be a non-empty array"))?;

    let mut dims = Vec::with_capacity(items.len());
    for item in items {
        match item.as_scalar() {
            Some(d) if d.is_finite() && d >= 1.0 => dims.push(d.floor() as usize),
            _ => return Err(invalid(op, format!("bad dimension in {}", to_text(&tensor)))),
        }
    }
    element_budget(op, &dims)?;
    Ok(dims)
}

fn element_budget(op: OpCode, dims: &[usize]) -> Result<usize, RuntimeError> {
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .filter(|&n| n <= MAX_ELEMENTS)
        .ok_or_else(|| invalid(op, format!("{dims:?} exceeds {MAX_ELEMENTS} elements")))
}

fn json(value: &impl serde::Serialize) -> Result<String, RuntimeError> {
    Ok(serde_json::to_string(value)?)
}

// ── Execution ──────────────────────────────────────────────────

/// Executes `op` over `args`. Missing trailing arguments read as empty
/// text.
pub fn execute(op: OpCode, args: &[Input], ctx: &CallContext<'_>) -> Result<String, RuntimeError> {
    let a = |i: usize| arg(args, i);
    match op {
        OpCode::VecMat => {
            let out = ops::vec_mat_parallel(&a(0).to_vector(), &a(1).to_vector(), ctx.parallel)?;
            Ok(vector_to_text(&out))
        }
        OpCode::DenseForward => {
            let input = a(0).to_vector();
            let size = a(2).to_number().map_or(0, |x| x.abs().floor() as usize);
            element_budget(op, &[input.len(), size])?;
            let out = ops::dense_forward(&input, &a(1).to_vector(), size)?;
            Ok(vector_to_text(&out))
        }
        OpCode::MatrixReshape => {
            let matrix = sequence_arg(op, a(0))?;
            let target = dims_arg(op, a(1))?;
            Ok(to_text(&ops::reshape(&matrix, &target)?))
        }
        OpCode::TensorCreate => {
            let dims = dims_arg(op, a(0))?;
            let fill = a(1).to_number().unwrap_or(0.0);
            Ok(to_text(&ops::create(&dims, fill)?))
        }
        OpCode::TensorOp => tensor_op(op, args, ctx),
        OpCode::Transpose => {
            let tensor = sequence_arg(op, a(0))?;
            let axis1 = index_of(a(1).number_or(0.0));
            let axis2 = index_of(a(2).number_or(0.0));
            Ok(to_text(&ops::transpose(&tensor, axis1, axis2)?))
        }
        OpCode::MergeSplit => {
            let mode = MergeMode::from_str_loose(&a(0).as_text())
                .ok_or_else(|| invalid(op, format!("unknown mode '{}'", a(0).as_text())))?;
            let first = a(1).to_tensor();
            let out = match mode {
                MergeMode::Merge => {
                    if a(2).as_text().trim().is_empty() {
                        return Err(invalid(op, "nothing to merge with"));
                    }
                    ops::merge(&first, &a(2).to_tensor())
                }
                MergeMode::Split => ops::split(&first, index_of(a(3).number_or(0.0))),
            };
            Ok(to_text(&out))
        }
        OpCode::Shell => {
            let mode = ShellMode::from_str_loose(&a(0).as_text())
                .ok_or_else(|| invalid(op, format!("unknown mode '{}'", a(0).as_text())))?;
            let tensor = a(1).to_tensor();
            let layers = index_of(a(2).number_or(1.0));
            let out = match mode {
                ShellMode::AddShell => ops::add_shell(&tensor, layers),
                ShellMode::RemoveShell => ops::remove_shell(&tensor, layers),
            };
            Ok(to_text(&out))
        }
        OpCode::RandomVariation => {
            let tensor = a(0).to_tensor();
            let strength = a(1).number_or(mutation::DEFAULT_STRENGTH);
            let probability = a(2).number_or(mutation::DEFAULT_PROBABILITY);
            let out = ctx.with_rng(|rng| {
                mutation::random_variation(&tensor, strength, probability, rng)
            });
            Ok(to_text(&out))
        }
        OpCode::UpdateWeights => {
            let kind = OptimizerKind::from_str_loose(&a(2).as_text()).unwrap_or_default();
            let lr = a(3).number_or(DEFAULT_LEARNING_RATE);
            let config = OptimizerConfig::from_text(&a(4).as_text());
            let update =
                optimizer::update_weights(&a(0).to_tensor(), &a(1).to_tensor(), kind, lr, &config)?;
            json(&update)
        }
        OpCode::UpdateBias => {
            let lr = a(2).number_or(DEFAULT_LEARNING_RATE);
            let out = optimizer::update_bias(&a(0).to_tensor(), &a(1).to_tensor(), lr)?;
            Ok(to_text(&out))
        }
        OpCode::BiasGradient => {
            let out = match ops::bias_gradient(&a(0).to_tensor()) {
                scalar @ Tensor::Scalar(_) => scalar.wrapped(),
                seq => seq,
            };
            Ok(to_text(&out))
        }
        OpCode::Quantize => {
            let bits = a(1)
                .number_or(f64::from(quantize::DEFAULT_BITS))
                .floor()
                .clamp(1.0, f64::from(quantize::MAX_BITS)) as u32;
            Ok(to_text(&quantize::quantize(&a(0).to_tensor(), bits)))
        }
        OpCode::FloatPrecision => {
            let tensor = sequence_arg(op, a(0))?;
            let decimals = index_of(a(1).number_or(f64::from(quantize::DEFAULT_DECIMALS)))
                .min(quantize::MAX_DECIMALS as usize) as u32;
            Ok(to_text(&quantize::limit_precision(&tensor, decimals)))
        }
        OpCode::WeightPruning => {
            let threshold =
                pruning::clamp_threshold(a(1).number_or(pruning::DEFAULT_WEIGHT_THRESHOLD));
            Ok(to_text(&pruning::weight_pruning(&a(0).to_tensor(), threshold)))
        }
        OpCode::ActivationPruning => {
            let threshold =
                pruning::clamp_threshold(a(1).number_or(pruning::DEFAULT_ACTIVATION_THRESHOLD));
            let mode = pruning::PruningMode::from_code(a(2).number_or(0.0));
            json(&pruning::activation_pruning(&a(0).to_tensor(), threshold, mode)?)
        }
        OpCode::StructuredPruning => {
            let w_thr = pruning::clamp_threshold(a(2).number_or(pruning::DEFAULT_WEIGHT_THRESHOLD));
            let a_thr =
                pruning::clamp_threshold(a(3).number_or(pruning::DEFAULT_ACTIVATION_THRESHOLD));
            let report =
                pruning::structured_pruning(&a(0).to_tensor(), &a(1).to_tensor(), w_thr, a_thr)?;
            json(&report)
        }
        OpCode::MseGradient => gradient(Loss::Mse, args),
        OpCode::CrossEntropyGradient => gradient(Loss::BinaryCrossEntropy, args),
        OpCode::HuberGradient => {
            let delta = a(2).number_or(loss::DEFAULT_HUBER_DELTA).max(0.1);
            gradient(Loss::Huber { delta }, args)
        }
        OpCode::OneHot | OpCode::OneHotBatch | OpCode::OneHotSmooth | OpCode::MultiLabelOneHot => {
            one_hot(op, args)
        }
        OpCode::OneHotDecode => {
            let rows = onehot::encoded_rows(&a(0).to_tensor());
            let mode = DecodeMode::from_code(a(1).number_or(0.0));
            Ok(vector_to_text(&onehot::decode(&rows, mode)?))
        }
        OpCode::Relu => activate(Activation::Relu, args),
        OpCode::Elu => activate(Activation::Elu, args),
        OpCode::Swish => activate(Activation::Swish, args),
        OpCode::Sigmoid => activate(Activation::Sigmoid, args),
        OpCode::MseLoss => loss_value(Loss::Mse, args),
        OpCode::BceLoss => loss_value(Loss::BinaryCrossEntropy, args),
        OpCode::HuberLoss => {
            let delta = a(2).number_or(loss::DEFAULT_HUBER_DELTA);
            loss_value(Loss::Huber { delta }, args)
        }
        OpCode::DropoutTrain => {
            let values = a(0).to_vector();
            let rate = a(1).to_number().unwrap_or(0.0);
            let out = ctx.with_rng(|rng| dropout::dropout_train(&values, rate, rng));
            Ok(vector_to_text(&out))
        }
        OpCode::AlphaDropout => {
            let values = a(0).to_vector();
            let rate = a(1).to_number().unwrap_or(0.0);
            let out = ctx.with_rng(|rng| dropout::alpha_dropout(&values, rate, rng));
            Ok(vector_to_text(&out))
        }
        OpCode::DropoutEval => Ok(vector_to_text(&dropout::dropout_eval(&a(0).to_vector()))),
        OpCode::DropoutWithMask => {
            let values = a(0).to_vector();
            let rate = a(1).to_number().unwrap_or(0.0);
            let out = ctx.with_rng(|rng| dropout::dropout_with_mask(&values, rate, rng));
            json(&out)
        }
        OpCode::Dot => metric(vector::dot, args),
        OpCode::Euclidean => metric(vector::euclidean, args),
        OpCode::Manhattan => metric(vector::manhattan, args),
        OpCode::Cosine => metric(vector::cosine, args),
        OpCode::Cross => {
            let out = vector::cross(&a(0).to_vector(), &a(1).to_vector())?;
            Ok(vector_to_text(&out))
        }
        OpCode::Normalize => {
            let kind = NormKind::from_code(a(1).number_or(0.0));
            Ok(vector_to_text(&vector::normalize(&a(0).to_vector(), kind)?))
        }
        OpCode::CharTokenize => Ok(tokenizer::char_tokenize_json(&a(0).as_text())),
        OpCode::ArrayToDict => {
            let keys = dict::parse_loose_list(&a(0).as_text());
            let values = dict::parse_loose_list(&a(1).as_text());
            json(&Value::Object(dict::array_to_dict(&keys, &values)?))
        }
        OpCode::DictToArray => {
            let parsed = dict::parse_loose_dict(&a(0).as_text());
            json(&dict::dict_to_array(&parsed)?)
        }
        OpCode::DictLookup => {
            let parsed = dict::parse_loose_dict(&a(0).as_text());
            let mode = LookupMode::from_str_loose(&a(2).as_text())
                .ok_or_else(|| invalid(op, format!("unknown lookup mode '{}'", a(2).as_text())))?;
            match dict::dict_lookup(&parsed, &a(1).as_text(), mode)? {
                Some(found) => json(&found),
                None => Ok("[]".into()),
            }
        }
        OpCode::FindReplace => {
            let mode = MatchMode::from_str_loose(&a(3).as_text());
            Ok(text::find_replace(
                &a(0).as_text(),
                &a(1).as_text(),
                &a(2).as_text(),
                mode,
            ))
        }
    }
}

fn tensor_op(op: OpCode, args: &[Input], ctx: &CallContext<'_>) -> Result<String, RuntimeError> {
    let label = arg(args, 4).as_text();
    let mode = TensorOpMode::from_str_loose(&label)
        .ok_or_else(|| invalid(op, format!("unknown operation '{label}'")))?;
    let lhs = arg(args, 0).to_tensor();
    let lhs_shape = Shape::new(dims_arg(op, arg(args, 1))?);
    let rhs = arg(args, 2).to_tensor();
    let rhs_shape = Shape::new(dims_arg(op, arg(args, 3))?);

    let out = match mode {
        TensorOpMode::Add => ops::add_shaped(&lhs, &lhs_shape, &rhs, &rhs_shape)?,
        TensorOpMode::Multiply => {
            let mut out_dims = lhs_shape.dims().to_vec();
            if let (Some(last), Some(cols)) = (out_dims.last_mut(), rhs_shape.last()) {
                *last = cols;
            }
            element_budget(op, &out_dims)?;
            ops::matmul_parallel(&lhs, &lhs_shape, &rhs, &rhs_shape, ctx.parallel)?
        }
    };
    Ok(to_text(&out))
}

fn gradient(kind: Loss, args: &[Input]) -> Result<String, RuntimeError> {
    let grad = loss::gradient(kind, &arg(args, 0).to_tensor(), &arg(args, 1).to_tensor())?;
    Ok(to_text(&grad))
}

fn loss_value(kind: Loss, args: &[Input]) -> Result<String, RuntimeError> {
    let value = loss::loss(kind, &arg(args, 0).to_tensor(), &arg(args, 1).to_tensor());
    Ok(format_number(value))
}

fn activate(kind: Activation, args: &[Input]) -> Result<String, RuntimeError> {
    Ok(to_text(&kind.apply_tensor(&arg(args, 0).to_tensor())))
}

fn metric(
    f: fn(&[f64], &[f64]) -> Result<f64, neural_ops::NeuralError>,
    args: &[Input],
) -> Result<String, RuntimeError> {
    let value = f(&arg(args, 0).to_vector(), &arg(args, 1).to_vector())?;
    Ok(format_number(value))
}

fn one_hot(op: OpCode, args: &[Input]) -> Result<String, RuntimeError> {
    let classes = onehot::class_count(arg(args, 1).to_number().unwrap_or(0.0));
    let out = match op {
        OpCode::MultiLabelOneHot => {
            let label_sets = onehot::label_rows(&arg(args, 0).to_tensor());
            element_budget(op, &[label_sets.len(), classes])?;
            onehot::multi_label(&label_sets, classes)?
        }
        OpCode::OneHot | OpCode::OneHotBatch | OpCode::OneHotSmooth => {
            let indices = arg(args, 0).to_vector();
            element_budget(op, &[indices.len(), classes])?;
            match op {
                OpCode::OneHot => onehot::one_hot(&indices, classes)?,
                OpCode::OneHotBatch => onehot::one_hot_batch(&indices, classes)?,
                _ => {
                    let smoothing = arg(args, 2).to_number().unwrap_or(0.0);
                    onehot::one_hot_smooth(&indices, classes, smoothing)?
                }
            }
        }
        other => return Err(invalid(other, "not a one-hot operation")),
    };
    Ok(to_text(&out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn run(op: OpCode, args: &[&str]) -> Result<String, RuntimeError> {
        let rng = Mutex::new(StdRng::seed_from_u64(7));
        let parallel = ParallelConfig::sequential();
        let ctx = CallContext::new(&rng, &parallel);
        let inputs: Vec<Input> = args.iter().map(|s| Input::from(*s)).collect();
        execute(op, &inputs, &ctx)
    }

    #[test]
    fn test_missing_arguments_read_as_empty() {
        assert_eq!(run(OpCode::Relu, &[]).unwrap(), "[]");
        assert_eq!(run(OpCode::MseLoss, &["[1]"]).unwrap(), "0");
    }

    #[test]
    fn test_dims_validation() {
        assert!(run(OpCode::TensorCreate, &["[]", "1"]).is_err());
        assert!(run(OpCode::TensorCreate, &["[2, 0]", "1"]).is_err());
        assert!(run(OpCode::TensorCreate, &["[4096, 4096, 4096]", "1"]).is_err());
        assert_eq!(run(OpCode::TensorCreate, &["[2, 1]", "3"]).unwrap(), "[[3],[3]]");
    }

    #[test]
    fn test_dense_forward_size_argument() {
        assert_eq!(
            run(OpCode::DenseForward, &["[1, 2]", "[1, 2, 3, 4]", "-2.9"]).unwrap(),
            "[7,10]"
        );
        assert!(run(OpCode::DenseForward, &["[1, 2]", "[1]", "abc"]).is_err());
    }

    #[test]
    fn test_unknown_mode_is_invalid() {
        let err = run(OpCode::Shell, &["sideways", "[1]", "1"]).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidArgument { op: "shell", .. }));
    }

    #[test]
    fn test_one_hot_output_is_within_element_budget() {
        let indices = format!("[{}]", vec!["1"; 400].join(","));
        for op in [OpCode::OneHot, OpCode::OneHotBatch, OpCode::OneHotSmooth] {
            let err = run(op, &[&indices, "1048576", "0.1"]).unwrap_err();
            assert!(matches!(err, RuntimeError::InvalidArgument { .. }), "{op:?}");
        }
        let err = run(OpCode::MultiLabelOneHot, &[&indices, "1048576"]).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidArgument { .. }));
        assert!(run(OpCode::OneHot, &["[1, 2]", "4096"]).is_ok());
    }

    #[test]
    fn test_index_of() {
        assert_eq!(index_of(2.7), 2);
        assert_eq!(index_of(-3.0), 0);
        assert_eq!(index_of(f64::NAN), 0);
    }
}
