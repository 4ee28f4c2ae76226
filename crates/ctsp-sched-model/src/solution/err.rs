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

use std::num::ParseIntError;

/// Failures while reading or writing a routing solution file.
#[derive(Debug)]
pub enum SolutionError {
    Io(std::io::Error),
    ParseInt(ParseIntError),
    UnexpectedEof,
    Empty,
    /// A customer id of 0 appeared; solution files are 1-based.
    ZeroId,
}

impl From<std::io::Error> for SolutionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseIntError> for SolutionError {
    fn from(e: ParseIntError) -> Self {
        Self::ParseInt(e)
    }
}

impl std::fmt::Display for SolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SolutionError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            ParseInt(e) => write!(f, "parse-int error: {e}"),
            UnexpectedEof => write!(f, "unexpected end of file while parsing solution"),
            Empty => write!(f, "solution file is empty"),
            ZeroId => write!(f, "solution files carry 1-based ids; found 0"),
        }
    }
}

impl std::error::Error for SolutionError {}

/// Failures while translating between route lists and the Model-A arc
/// vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The routing references an operation absent from the model.
    MissingOperation { customer: usize, depot: usize },
    /// The routing uses an operation pair without a routing arc.
    MissingArc { from: usize, to: usize },
    /// Route count does not match the model's depot count.
    RouteCount { expected: usize, found: usize },
    /// A route does not begin and end at the depot.
    MalformedRoute { depot: usize },
    /// The reconstruction walk did not reach the depot's return.
    WalkDidNotTerminate { depot: usize },
}

impl std::fmt::Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use EncodingError::*;
        match self {
            MissingOperation { customer, depot } => {
                write!(f, "no operation for customer {customer} on depot {depot}")
            }
            MissingArc { from, to } => {
                write!(f, "no routing arc between operations {from} and {to}")
            }
            RouteCount { expected, found } => {
                write!(f, "expected {expected} routes, found {found}")
            }
            MalformedRoute { depot } => {
                write!(f, "route of depot {depot} does not begin and end at the depot")
            }
            WalkDidNotTerminate { depot } => {
                write!(
                    f,
                    "arc walk of depot {depot} did not terminate at its return operation"
                )
            }
        }
    }
}

impl std::error::Error for EncodingError {}
