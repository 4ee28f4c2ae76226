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

//! TSPLIB reader with the multi-day extensions used by CTSP instances
//! (`NUM_DAYS`, `DISTANCE`, `MAXIMUM_ALLOWABLE_DIFFERENTIAL`, per-day
//! demand rows, known optima in the comment).
//!
//! Distance computations follow the TSPLIB conventions bit-exactly for
//! integer outputs.

use crate::instance::err::InstanceError;
use ctsp_sched_core::prelude::Matrix;
use std::{fs, io::Read, path::Path};

const TSPLIB_PI: f64 = 3.141592;
const GEO_RADIUS: f64 = 6378.388;

/// Distance placed on the matrix diagonal so self-arcs never look cheap.
const DIAGONAL_DISTANCE: f64 = 100_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeWeightType {
    Explicit,
    Euc2d,
    Max2d,
    Man2d,
    Ceil2d,
    Geo,
    Att,
}

impl EdgeWeightType {
    fn parse(token: &str) -> Result<Self, InstanceError> {
        match token {
            "EXPLICIT" => Ok(Self::Explicit),
            "EUC_2D" => Ok(Self::Euc2d),
            "MAX_2D" => Ok(Self::Max2d),
            "MAN_2D" => Ok(Self::Man2d),
            "CEIL_2D" => Ok(Self::Ceil2d),
            "GEO" => Ok(Self::Geo),
            "ATT" => Ok(Self::Att),
            other => Err(InstanceError::UnknownEdgeWeightType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeWeightFormat {
    UpperRow,
    LowerRow,
    UpperDiagRow,
    LowerDiagRow,
    UpperCol,
    LowerCol,
    UpperDiagCol,
    LowerDiagCol,
    FullMatrix,
}

impl EdgeWeightFormat {
    fn parse(token: &str) -> Result<Self, InstanceError> {
        match token {
            "UPPER_ROW" => Ok(Self::UpperRow),
            "LOWER_ROW" => Ok(Self::LowerRow),
            "UPPER_DIAG_ROW" => Ok(Self::UpperDiagRow),
            "LOWER_DIAG_ROW" => Ok(Self::LowerDiagRow),
            "UPPER_COL" => Ok(Self::UpperCol),
            "LOWER_COL" => Ok(Self::LowerCol),
            "UPPER_DIAG_COL" => Ok(Self::UpperDiagCol),
            "LOWER_DIAG_COL" => Ok(Self::LowerDiagCol),
            "FULL_MATRIX" => Ok(Self::FullMatrix),
            other => Err(InstanceError::UnknownEdgeWeightFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Name,
    Type,
    Comment,
    Dimension,
    Capacity,
    EdgeWeightType,
    EdgeWeightFormat,
    DisplayDataType,
    EdgeWeightSection,
    DisplayDataSection,
    NodeCoordSection,
    NodeCoordType,
    DepotSection,
    CapacityVol,
    DemandSection,
    TimeWindowSection,
    StandtimeSection,
    PickupSection,
    Eof,
    NumberOfTrucks,
    NumDays,
    Distance,
    MaximumAllowableDifferential,
}

impl Keyword {
    fn parse(token: &str) -> Result<Self, InstanceError> {
        match token {
            "NAME" => Ok(Self::Name),
            "TYPE" => Ok(Self::Type),
            "COMMENT" => Ok(Self::Comment),
            "DIMENSION" => Ok(Self::Dimension),
            "CAPACITY" => Ok(Self::Capacity),
            "EDGE_WEIGHT_TYPE" => Ok(Self::EdgeWeightType),
            "EDGE_WEIGHT_FORMAT" => Ok(Self::EdgeWeightFormat),
            "DISPLAY_DATA_TYPE" => Ok(Self::DisplayDataType),
            "EDGE_WEIGHT_SECTION" => Ok(Self::EdgeWeightSection),
            "DISPLAY_DATA_SECTION" => Ok(Self::DisplayDataSection),
            "NODE_COORD_SECTION" => Ok(Self::NodeCoordSection),
            "NODE_COORD_TYPE" => Ok(Self::NodeCoordType),
            "DEPOT_SECTION" => Ok(Self::DepotSection),
            "CAPACITY_VOL" => Ok(Self::CapacityVol),
            "DEMAND_SECTION" => Ok(Self::DemandSection),
            "TIME_WINDOW_SECTION" => Ok(Self::TimeWindowSection),
            "STANDTIME_SECTION" => Ok(Self::StandtimeSection),
            "PICKUP_SECTION" => Ok(Self::PickupSection),
            "EOF" => Ok(Self::Eof),
            "NUMBER_OF_TRUCKS" => Ok(Self::NumberOfTrucks),
            "NUM_DAYS" => Ok(Self::NumDays),
            "DISTANCE" => Ok(Self::Distance),
            "MAXIMUM_ALLOWABLE_DIFFERENTIAL" => Ok(Self::MaximumAllowableDifferential),
            other => Err(InstanceError::UnknownKeyword(other.to_string())),
        }
    }
}

/// Raw parse result of a TSPLIB file with CTSP extensions.
#[derive(Debug, Clone)]
pub struct TsplibData {
    name: String,
    type_tag: String,
    optima: (f64, f64),
    dimension: usize,
    edge_weight_type: Option<EdgeWeightType>,
    edge_weight_format: Option<EdgeWeightFormat>,
    num_days: Option<usize>,
    max_distance: Option<f64>,
    maximum_allowable_differential: Option<f64>,
    coords: Vec<(f64, f64)>,
    demands: Vec<Vec<i32>>,
    weights: Vec<f64>,
}

impl TsplibData {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Known optima from the comment: (no waiting allowed, waiting allowed).
    #[inline]
    pub fn optima(&self) -> (f64, f64) {
        self.optima
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn num_days(&self) -> Option<usize> {
        self.num_days
    }

    #[inline]
    pub fn max_distance(&self) -> Option<f64> {
        self.max_distance
    }

    #[inline]
    pub fn maximum_allowable_differential(&self) -> Option<f64> {
        self.maximum_allowable_differential
    }

    #[inline]
    pub fn demands(&self) -> &[Vec<i32>] {
        &self.demands
    }

    /// Full distance matrix with the diagonal forced to a prohibitive value.
    pub fn distance_matrix(&self) -> Matrix<f64> {
        let n = self.dimension;
        let mut m = Matrix::new(n, n, 0.0);
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    m.set(i, j, DIAGONAL_DISTANCE);
                } else {
                    m.set(i, j, self.weights[i * n + j]);
                }
            }
        }
        m
    }
}

/// Token scanner over the colon-stripped file contents.
#[derive(Debug)]
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn next_token(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < bytes.len() && !bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        Some(&self.text[start..self.pos])
    }

    fn expect_token(&mut self) -> Result<&'a str, InstanceError> {
        self.next_token().ok_or(InstanceError::UnexpectedEof)
    }

    fn next_usize(&mut self) -> Result<usize, InstanceError> {
        Ok(self.expect_token()?.parse::<usize>()?)
    }

    fn next_i64(&mut self) -> Result<i64, InstanceError> {
        Ok(self.expect_token()?.parse::<i64>()?)
    }

    fn next_f64(&mut self) -> Result<f64, InstanceError> {
        Ok(self.expect_token()?.parse::<f64>()?)
    }

    /// Rest of the current line, without the trailing newline.
    fn rest_of_line(&mut self) -> &'a str {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
        let line = &self.text[start..self.pos];
        if self.pos < bytes.len() {
            self.pos += 1;
        }
        line
    }
}

/// Reader for TSPLIB instances with CTSP extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsplibReader;

impl TsplibReader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<TsplibData, InstanceError> {
        let contents = fs::read_to_string(path)?;
        self.from_str(&contents)
    }

    pub fn from_reader<R: Read>(&self, mut r: R) -> Result<TsplibData, InstanceError> {
        let mut contents = String::new();
        r.read_to_string(&mut contents)?;
        self.from_str(&contents)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, contents: &str) -> Result<TsplibData, InstanceError> {
        // Keyword lines may or may not carry a colon separator; strip every
        // colon up front so the token stream is uniform.
        let cleaned: String = contents.replace(':', " ");
        let mut sc = Scanner::new(&cleaned);

        let mut data = TsplibData {
            name: String::new(),
            type_tag: String::new(),
            optima: (0.0, 0.0),
            dimension: 0,
            edge_weight_type: None,
            edge_weight_format: None,
            num_days: None,
            max_distance: None,
            maximum_allowable_differential: None,
            coords: Vec::new(),
            demands: Vec::new(),
            weights: Vec::new(),
        };

        while let Some(token) = sc.next_token() {
            match Keyword::parse(token)? {
                Keyword::Name => {
                    data.name = sc.expect_token()?.to_string();
                    tracing::debug!(name = %data.name, "reading instance");
                }
                Keyword::Type => {
                    data.type_tag = sc.expect_token()?.to_string();
                }
                Keyword::Comment => {
                    data.optima = Self::read_comment(sc.rest_of_line())?;
                }
                Keyword::Dimension => {
                    data.dimension = sc.next_usize()?;
                    data.coords = vec![(0.0, 0.0); data.dimension];
                    data.demands = vec![Vec::new(); data.dimension];
                    data.weights = vec![0.0; data.dimension * data.dimension];
                }
                Keyword::Capacity | Keyword::CapacityVol | Keyword::StandtimeSection
                | Keyword::PickupSection => {
                    Self::require_dimension(&data)?;
                    for _ in 0..data.dimension {
                        sc.next_i64()?;
                        sc.next_i64()?;
                    }
                }
                Keyword::TimeWindowSection => {
                    Self::require_dimension(&data)?;
                    for _ in 0..data.dimension {
                        sc.next_i64()?;
                        sc.next_i64()?;
                        sc.next_i64()?;
                    }
                }
                Keyword::EdgeWeightType => {
                    data.edge_weight_type = Some(EdgeWeightType::parse(sc.expect_token()?)?);
                }
                Keyword::EdgeWeightFormat => {
                    data.edge_weight_format = Some(EdgeWeightFormat::parse(sc.expect_token()?)?);
                }
                Keyword::DisplayDataType | Keyword::NodeCoordType => {
                    sc.expect_token()?;
                }
                Keyword::DisplayDataSection => {
                    Self::require_dimension(&data)?;
                    for _ in 0..data.dimension {
                        sc.next_i64()?;
                        sc.next_f64()?;
                        sc.next_f64()?;
                    }
                }
                Keyword::NodeCoordSection => {
                    Self::require_dimension(&data)?;
                    Self::read_node_coords(&mut sc, &mut data)?;
                }
                Keyword::EdgeWeightSection => {
                    Self::require_dimension(&data)?;
                    Self::read_edge_weights(&mut sc, &mut data)?;
                }
                Keyword::DepotSection => {
                    sc.next_i64()?;
                    sc.expect_token()?;
                }
                Keyword::DemandSection => {
                    Self::require_dimension(&data)?;
                    let num_days = data.num_days.ok_or(InstanceError::NumDaysUndefined)?;
                    for _ in 0..data.dimension {
                        let num = sc.next_usize()?;
                        if num == 0 || num > data.dimension {
                            return Err(InstanceError::InvalidNodeId(num));
                        }
                        let mut row = Vec::with_capacity(num_days);
                        for _ in 0..num_days {
                            row.push(sc.next_i64()? as i32);
                        }
                        data.demands[num - 1] = row;
                    }
                }
                Keyword::NumberOfTrucks => {
                    sc.next_i64()?;
                }
                Keyword::NumDays => {
                    data.num_days = Some(sc.next_usize()?);
                }
                Keyword::Distance => {
                    data.max_distance = Some(sc.next_f64()?);
                }
                Keyword::MaximumAllowableDifferential => {
                    data.maximum_allowable_differential = Some(sc.next_f64()?);
                }
                Keyword::Eof => break,
            }
        }

        Ok(data)
    }

    fn require_dimension(data: &TsplibData) -> Result<(), InstanceError> {
        if data.dimension == 0 {
            return Err(InstanceError::DimensionUndefined);
        }
        Ok(())
    }

    /// The comment carries the two known optima, comma separated.
    fn read_comment(line: &str) -> Result<(f64, f64), InstanceError> {
        let mut parts = line.splitn(2, ',');
        let first = parts.next().unwrap_or("").trim();
        let second = parts.next().unwrap_or("").trim();
        let second = second.split_whitespace().next().unwrap_or("");
        Ok((first.parse::<f64>()?, second.parse::<f64>()?))
    }

    fn read_node_coords(sc: &mut Scanner<'_>, data: &mut TsplibData) -> Result<(), InstanceError> {
        let ewt = data
            .edge_weight_type
            .ok_or(InstanceError::EdgeWeightTypeUndefined)?;
        if ewt == EdgeWeightType::Explicit {
            return Err(InstanceError::CoordsWithExplicitWeights);
        }

        for i in 0..data.dimension {
            sc.next_i64()?;
            let x = sc.next_f64()?;
            let y = sc.next_f64()?;
            data.coords[i] = (x, y);
        }

        Self::compute_implicit_weights(data, ewt);
        tracing::debug!(dimension = data.dimension, "read node coordinates");
        Ok(())
    }

    fn read_edge_weights(sc: &mut Scanner<'_>, data: &mut TsplibData) -> Result<(), InstanceError> {
        let ewt = data
            .edge_weight_type
            .ok_or(InstanceError::EdgeWeightTypeUndefined)?;
        if ewt != EdgeWeightType::Explicit {
            return Err(InstanceError::WeightsWithImplicitType);
        }
        let format = data
            .edge_weight_format
            .ok_or(InstanceError::EdgeWeightFormatUndefined)?;

        let n = data.dimension;
        let symmetric_entry = |weights: &mut Vec<f64>, i: usize, j: usize, v: f64| {
            weights[i * n + j] = v;
            weights[j * n + i] = v;
        };

        match format {
            EdgeWeightFormat::UpperRow => {
                for i in 0..n {
                    for j in i + 1..n {
                        let v = sc.next_i64()? as f64;
                        symmetric_entry(&mut data.weights, i, j, v);
                    }
                }
            }
            EdgeWeightFormat::LowerRow
            | EdgeWeightFormat::UpperCol
            | EdgeWeightFormat::LowerCol => {
                for i in 0..n {
                    for j in 0..i {
                        let v = sc.next_i64()? as f64;
                        symmetric_entry(&mut data.weights, i, j, v);
                    }
                }
            }
            EdgeWeightFormat::UpperDiagRow
            | EdgeWeightFormat::LowerDiagRow
            | EdgeWeightFormat::UpperDiagCol
            | EdgeWeightFormat::LowerDiagCol => {
                for i in 0..n {
                    for j in 0..=i {
                        let v = sc.next_i64()? as f64;
                        symmetric_entry(&mut data.weights, i, j, v);
                    }
                }
            }
            EdgeWeightFormat::FullMatrix => {
                for i in 0..n {
                    for j in 0..n {
                        data.weights[i * n + j] = sc.next_i64()? as f64;
                    }
                }
            }
        }

        tracing::debug!(dimension = n, "read explicit distances");
        Ok(())
    }

    fn compute_implicit_weights(data: &mut TsplibData, ewt: EdgeWeightType) {
        let n = data.dimension;
        for i in 0..n {
            for j in 0..n {
                let a = data.coords[i];
                let b = data.coords[j];
                data.weights[i * n + j] = match ewt {
                    EdgeWeightType::Euc2d => euc_2d(a, b),
                    EdgeWeightType::Max2d => max_2d(a, b),
                    EdgeWeightType::Man2d => man_2d(a, b),
                    EdgeWeightType::Ceil2d => ceil_2d(a, b),
                    EdgeWeightType::Geo => geo(a, b),
                    EdgeWeightType::Att => att(a, b),
                    EdgeWeightType::Explicit => unreachable!(),
                };
            }
        }
    }
}

#[inline]
fn nint(x: f64) -> i64 {
    (x + 0.5) as i64
}

#[inline]
fn dtrunc(x: f64) -> f64 {
    (x as i64) as f64
}

fn euc_2d(a: (f64, f64), b: (f64, f64)) -> f64 {
    let xd = a.0 - b.0;
    let yd = a.1 - b.1;
    nint((xd * xd + yd * yd).sqrt()) as f64
}

fn max_2d(a: (f64, f64), b: (f64, f64)) -> f64 {
    let xd = (a.0 - b.0).abs();
    let yd = (a.1 - b.1).abs();
    nint(xd).max(nint(yd)) as f64
}

fn man_2d(a: (f64, f64), b: (f64, f64)) -> f64 {
    let xd = (a.0 - b.0).abs();
    let yd = (a.1 - b.1).abs();
    nint(xd + yd) as f64
}

fn ceil_2d(a: (f64, f64), b: (f64, f64)) -> f64 {
    let xd = a.0 - b.0;
    let yd = a.1 - b.1;
    (xd * xd + yd * yd).sqrt().ceil()
}

fn radian_coords(a: (f64, f64)) -> (f64, f64) {
    let deg_x = dtrunc(a.0);
    let min_x = a.0 - deg_x;
    let latitude = TSPLIB_PI * (deg_x + 5.0 * min_x / 3.0) / 180.0;

    let deg_y = dtrunc(a.1);
    let min_y = a.1 - deg_y;
    let longitude = TSPLIB_PI * (deg_y + 5.0 * min_y / 3.0) / 180.0;

    (longitude, latitude)
}

fn geo(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (longitude_a, latitude_a) = radian_coords(a);
    let (longitude_b, latitude_b) = radian_coords(b);

    let q1 = (longitude_a - longitude_b).cos();
    let q2 = (latitude_a - latitude_b).cos();
    let q3 = (latitude_a + latitude_b).cos();

    let acos_arg = 0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3);
    (GEO_RADIUS * acos_arg.acos() + 1.0) as i64 as f64
}

fn att(a: (f64, f64), b: (f64, f64)) -> f64 {
    let xd = a.0 - b.0;
    let yd = a.1 - b.1;
    let rij = ((xd * xd + yd * yd) / 10.0).sqrt();
    let tij = nint(rij) as f64;
    if tij < rij {
        tij + 1.0
    } else {
        tij
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EUC_INSTANCE: &str = "\
NAME: tiny3
TYPE: CTSP
COMMENT: 123.5, 120.0
DIMENSION: 3
EDGE_WEIGHT_TYPE: EUC_2D
NUM_DAYS: 2
DISTANCE: 100
MAXIMUM_ALLOWABLE_DIFFERENTIAL: 30
NODE_COORD_SECTION
1 0.0 0.0
2 3.0 4.0
3 0.0 8.0
DEMAND_SECTION
1 0 0
2 1 0
3 0 1
EOF
";

    #[test]
    fn parses_header_and_extensions() {
        let data = TsplibReader::new().from_str(EUC_INSTANCE).unwrap();
        assert_eq!(data.name(), "tiny3");
        assert_eq!(data.type_tag(), "CTSP");
        assert_eq!(data.optima(), (123.5, 120.0));
        assert_eq!(data.dimension(), 3);
        assert_eq!(data.num_days(), Some(2));
        assert_eq!(data.max_distance(), Some(100.0));
        assert_eq!(data.maximum_allowable_differential(), Some(30.0));
        assert_eq!(data.demands()[1], vec![1, 0]);
        assert_eq!(data.demands()[2], vec![0, 1]);
    }

    #[test]
    fn euc_2d_distances_are_rounded_integers() {
        let data = TsplibReader::new().from_str(EUC_INSTANCE).unwrap();
        let d = data.distance_matrix();
        assert_eq!(d.at(0, 1), 5.0);
        assert_eq!(d.at(1, 2), 5.0);
        assert_eq!(d.at(0, 2), 8.0);
        assert_eq!(d.at(1, 1), 100_000_000.0);
    }

    #[test]
    fn explicit_full_matrix_round_trips() {
        let text = "\
NAME m
TYPE CTSP
COMMENT 1, 2
DIMENSION 2
EDGE_WEIGHT_TYPE EXPLICIT
EDGE_WEIGHT_FORMAT FULL_MATRIX
NUM_DAYS 1
EDGE_WEIGHT_SECTION
0 7
9 0
DEMAND_SECTION
1 0
2 1
EOF
";
        let data = TsplibReader::new().from_str(text).unwrap();
        let d = data.distance_matrix();
        assert_eq!(d.at(0, 1), 7.0);
        assert_eq!(d.at(1, 0), 9.0);
    }

    #[test]
    fn explicit_upper_row_is_mirrored() {
        let text = "\
NAME m
TYPE CTSP
COMMENT 0, 0
DIMENSION 3
EDGE_WEIGHT_TYPE EXPLICIT
EDGE_WEIGHT_FORMAT UPPER_ROW
EDGE_WEIGHT_SECTION
1 2
3
EOF
";
        let data = TsplibReader::new().from_str(text).unwrap();
        let d = data.distance_matrix();
        assert_eq!(d.at(0, 1), 1.0);
        assert_eq!(d.at(1, 0), 1.0);
        assert_eq!(d.at(0, 2), 2.0);
        assert_eq!(d.at(1, 2), 3.0);
    }

    #[test]
    fn att_distance_rounds_up_when_truncated() {
        assert_eq!(att((0.0, 0.0), (10.0, 0.0)), 4.0);
    }

    #[test]
    fn ceil_2d_takes_ceiling() {
        assert_eq!(ceil_2d((0.0, 0.0), (1.0, 1.0)), 2.0);
    }

    #[test]
    fn max_and_man_distances() {
        assert_eq!(max_2d((0.0, 0.0), (3.0, 4.0)), 4.0);
        assert_eq!(man_2d((0.0, 0.0), (3.0, 4.0)), 7.0);
    }

    #[test]
    fn missing_edge_weight_type_is_an_error() {
        let text = "\
NAME m
DIMENSION 2
NODE_COORD_SECTION
1 0 0
2 1 1
EOF
";
        let err = TsplibReader::new().from_str(text).unwrap_err();
        assert!(matches!(err, InstanceError::EdgeWeightTypeUndefined));
    }

    #[test]
    fn demand_section_requires_num_days() {
        let text = "\
NAME m
DIMENSION 2
DEMAND_SECTION
1 0
2 1
EOF
";
        let err = TsplibReader::new().from_str(text).unwrap_err();
        assert!(matches!(err, InstanceError::NumDaysUndefined));
    }

    #[test]
    fn unknown_keyword_is_reported() {
        let err = TsplibReader::new().from_str("WHATEVER 3\n").unwrap_err();
        assert!(matches!(err, InstanceError::UnknownKeyword(_)));
    }
}
