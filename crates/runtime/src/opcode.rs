// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The operation registry: names, parameter lists and sentinels.

/// What a call returns when it cannot produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// `[]`
    EmptyArray,
    /// `0`
    Zero,
    /// `{}`
    EmptyObject,
    /// `{"output":[],"mask":[]}`
    MaskedDropout,
    /// `{"weights":"[]","state":null}`
    WeightUpdate,
    /// The first argument's text, unchanged.
    InputText,
}

impl Sentinel {
    /// The sentinel text. `input` is the first argument, used by
    /// [`Sentinel::InputText`].
    pub fn text(&self, input: &str) -> String {
        match self {
            Self::EmptyArray => "[]".into(),
            Self::Zero => "0".into(),
            Self::EmptyObject => "{}".into(),
            Self::MaskedDropout => r#"{"output":[],"mask":[]}"#.into(),
            Self::WeightUpdate => r#"{"weights":"[]","state":null}"#.into(),
            Self::InputText => input.to_string(),
        }
    }
}

macro_rules! opcodes {
    ($( $variant:ident => $name:literal, $block:literal, [$($param:literal),*], $sentinel:ident; )*) => {
        /// Every operation the runtime can dispatch.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum OpCode {
            $( $variant, )*
        }

        impl OpCode {
            /// All operations, in registry order.
            pub const ALL: &'static [OpCode] = &[ $( OpCode::$variant, )* ];

            /// The dispatch name, e.g. `"vec_mat"`.
            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }

            /// The block opcode the host editor registers for this operation.
            pub fn block_opcode(&self) -> &'static str {
                match self {
                    $( Self::$variant => $block, )*
                }
            }

            /// Positional parameter names.
            pub fn params(&self) -> &'static [&'static str] {
                match self {
                    $( Self::$variant => &[$($param),*], )*
                }
            }

            pub fn sentinel(&self) -> Sentinel {
                match self {
                    $( Self::$variant => Sentinel::$sentinel, )*
                }
            }
        }
    };
}

opcodes! {
    VecMat => "vec_mat", "awbw_block", ["vector", "matrix"], EmptyArray;
    DenseForward => "dense_forward", "awbws_block", ["input", "weights", "output_size"], EmptyArray;
    MatrixReshape => "matrix_reshape", "MATRIX_RESHAPE_block", ["matrix", "shape"], EmptyArray;
    TensorCreate => "tensor_create", "MATRIX_ND_CREATE_block", ["dims", "fill"], EmptyArray;
    TensorOp => "tensor_op", "MATRIX_ND_OP_block", ["a", "dims_a", "b", "dims_b", "operation"], EmptyArray;
    Transpose => "transpose", "TENSOR_TRANSPOSE_block", ["tensor", "axis1", "axis2"], EmptyArray;
    MergeSplit => "merge_split", "ARRAY_MERGE_SPLIT_block", ["mode", "a", "b", "index"], EmptyArray;
    Shell => "shell", "ARRAY_SHELL_block", ["mode", "tensor", "layers"], EmptyArray;
    RandomVariation => "random_variation", "RandomVariation_block", ["tensor", "strength", "probability"], EmptyArray;
    UpdateWeights => "update_weights", "UPDATE_WEIGHTS_block", ["weights", "grads", "optimizer", "lr", "config"], WeightUpdate;
    UpdateBias => "update_bias", "UPDATE_BIAS_block", ["bias", "grad", "lr"], EmptyArray;
    BiasGradient => "bias_gradient", "BIAS_GRADIENT_block", ["error"], EmptyArray;
    Quantize => "quantize", "WEIGHT_QUANTIZE_block", ["weights", "bits"], EmptyArray;
    FloatPrecision => "float_precision", "FLOAT_PRECISION_block", ["tensor", "decimals"], EmptyArray;
    WeightPruning => "weight_pruning", "WEIGHT_PRUNING_block", ["weights", "threshold"], EmptyArray;
    ActivationPruning => "activation_pruning", "ACTIVATION_PRUNING_block", ["activations", "threshold", "mode"], EmptyArray;
    StructuredPruning => "structured_pruning", "STRUCTURED_PRUNING_block", ["weights", "activations", "w_thr", "a_thr"], EmptyArray;
    MseGradient => "mse_gradient", "MSE_GRADIENT_block", ["pred", "actual"], EmptyArray;
    CrossEntropyGradient => "cross_entropy_gradient", "CROSS_ENTROPY_GRADIENT_block", ["pred", "actual"], EmptyArray;
    HuberGradient => "huber_gradient", "HUBER_GRADIENT_block", ["pred", "actual", "delta"], EmptyArray;
    OneHot => "one_hot", "ONE_HOT_block", ["indices", "classes"], EmptyArray;
    OneHotBatch => "one_hot_batch", "ONE_HOT_BATCH_block", ["indices", "classes"], EmptyArray;
    OneHotSmooth => "one_hot_smooth", "ONE_HOT_SMOOTH_block", ["indices", "classes", "smoothing"], EmptyArray;
    MultiLabelOneHot => "multi_label_one_hot", "MULTI_LABEL_ONE_HOT_block", ["indices", "classes"], EmptyArray;
    OneHotDecode => "one_hot_decode", "ONE_HOT_DECODE_block", ["encoded", "mode"], EmptyArray;
    Relu => "relu", "RELU_block", ["tensor"], EmptyArray;
    Elu => "elu", "ELU_block", ["tensor"], EmptyArray;
    Swish => "swish", "SWISH_block", ["tensor"], EmptyArray;
    Sigmoid => "sigmoid", "SIGMOID_block", ["tensor"], EmptyArray;
    MseLoss => "mse_loss", "MSE_LOSS_block", ["pred", "actual"], Zero;
    BceLoss => "bce_loss", "BINARY_CROSS_ENTROPY_LOSS_block", ["pred", "actual"], Zero;
    HuberLoss => "huber_loss", "HUBER_LOSS_block", ["pred", "actual", "delta"], Zero;
    DropoutTrain => "dropout_train", "DROPOUT_TRAIN_block", ["vector", "rate"], EmptyArray;
    DropoutEval => "dropout_eval", "DROPOUT_EVAL_block", ["vector"], EmptyArray;
    DropoutWithMask => "dropout_with_mask", "DROPOUT_WITH_MASK_block", ["vector", "rate"], MaskedDropout;
    AlphaDropout => "alpha_dropout", "ALPHA_DROPOUT_block", ["vector", "rate"], EmptyArray;
    Dot => "dot", "DOT_PRODUCT_block", ["a", "b"], Zero;
    Cross => "cross", "CROSS_PRODUCT_block", ["a", "b"], EmptyArray;
    Euclidean => "euclidean", "EUCLIDEAN_DISTANCE_block", ["a", "b"], Zero;
    Manhattan => "manhattan", "MANHATTAN_DISTANCE_block", ["a", "b"], Zero;
    Cosine => "cosine", "COSINE_SIMILARITY_block", ["a", "b"], Zero;
    Normalize => "normalize", "NORMALIZE_VECTOR_block", ["vector", "norm"], EmptyArray;
    CharTokenize => "char_tokenize", "CHARACTER_TOKENIZER_block", ["text"], EmptyArray;
    ArrayToDict => "array_to_dict", "ARRAY_TO_DICT_block", ["keys", "values"], EmptyObject;
    DictToArray => "dict_to_array", "DICT_TO_ARRAY_block", ["dict"], EmptyArray;
    DictLookup => "dict_lookup", "DICT_LOOKUP_block", ["dict", "needle", "mode"], EmptyArray;
    FindReplace => "find_replace", "FIND_REPLACE_block", ["text", "find", "replace", "mode"], InputText;
}

impl OpCode {
    /// Looks an operation up by dispatch name or block opcode. Dispatch
    /// names match case-insensitively and accept `-` for `_`.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let normalized = trimmed.to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.name() == normalized || op.block_opcode() == trimmed)
    }

    pub fn arity(&self) -> usize {
        self.params().len()
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
