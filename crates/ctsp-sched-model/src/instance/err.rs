// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::num::{ParseFloatError, ParseIntError};

#[derive(Debug)]
pub enum InstanceError {
    Io(std::io::Error),
    ParseInt(ParseIntError),
    ParseFloat(ParseFloatError),
    UnexpectedEof,
    UnknownKeyword(String),
    UnknownEdgeWeightType(String),
    UnknownEdgeWeightFormat(String),
    EdgeWeightTypeUndefined,
    EdgeWeightFormatUndefined,
    DimensionUndefined,
    NumDaysUndefined,
    /// NODE_COORD_SECTION present although the weights are explicit.
    CoordsWithExplicitWeights,
    /// EDGE_WEIGHT_SECTION present although the weights are implicit.
    WeightsWithImplicitType,
    /// A CTSP extension keyword required by the model is absent.
    MissingExtension(&'static str),
    /// A data row names a node outside `1..=dimension`.
    InvalidNodeId(usize),
}

impl From<std::io::Error> for InstanceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseIntError> for InstanceError {
    fn from(e: ParseIntError) -> Self {
        Self::ParseInt(e)
    }
}

impl From<ParseFloatError> for InstanceError {
    fn from(e: ParseFloatError) -> Self {
        Self::ParseFloat(e)
    }
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use InstanceError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            ParseInt(e) => write!(f, "parse-int error: {e}"),
            ParseFloat(e) => write!(f, "parse-float error: {e}"),
            UnexpectedEof => write!(f, "unexpected end of file while parsing instance"),
            UnknownKeyword(k) => write!(f, "unknown instance keyword: {k}"),
            UnknownEdgeWeightType(t) => write!(f, "unsupported edge weight type: {t}"),
            UnknownEdgeWeightFormat(t) => write!(f, "unsupported edge weight format: {t}"),
            EdgeWeightTypeUndefined => write!(f, "edge weight type not defined"),
            EdgeWeightFormatUndefined => write!(f, "edge weight format not defined"),
            DimensionUndefined => write!(f, "DIMENSION must precede the data sections"),
            NumDaysUndefined => write!(f, "NUM_DAYS must precede the demand section"),
            CoordsWithExplicitWeights => {
                write!(f, "node coordinates given although edge weights are explicit")
            }
            WeightsWithImplicitType => {
                write!(f, "edge weight section given although edge weights are implicit")
            }
            MissingExtension(k) => write!(f, "instance is missing the {k} extension"),
            InvalidNodeId(id) => write!(f, "node id {id} is outside the instance dimension"),
        }
    }
}

impl std::error::Error for InstanceError {}
