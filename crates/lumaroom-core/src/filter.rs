//! Convolution filter kernels: parsing, composition and output.
//!
//! ## Text format
//!
//! ```text
//! xdim ydim
//! scale
//! w00 w10 ... w(xdim-1)0
//! ...
//! ```
//!
//! All tokens are whitespace separated, so line breaks are cosmetic. Weights
//! are row-major. `scale` multiplies every weight when the filter is used.
//!
//! Composing two filters convolves their weight grids (full convolution, so
//! the result is `(ax + bx - 1) x (ay + by - 1)`) and multiplies their scales.
//! Applying the composed filter once is equivalent to applying both in turn.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors from parsing a filter description.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Missing {0}")]
    MissingToken(&'static str),

    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("Invalid filter dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Expected {expected} weights, found {actual}")]
    MissingWeights { expected: usize, actual: usize },
}

/// A 2D weight grid with an output scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    width: usize,
    height: usize,
    scale: f32,
    weights: Vec<f32>,
}

impl Filter {
    /// Build a filter from row-major weights.
    pub fn new(
        width: usize,
        height: usize,
        scale: f32,
        weights: Vec<f32>,
    ) -> Result<Self, FilterError> {
        let expected = cell_count(width, height).ok_or(FilterError::InvalidDimensions {
            width: i64::try_from(width).unwrap_or(i64::MAX),
            height: i64::try_from(height).unwrap_or(i64::MAX),
        })?;
        if weights.len() != expected {
            return Err(FilterError::MissingWeights {
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self {
            width,
            height,
            scale,
            weights,
        })
    }

    /// Parse the text format described in the module docs.
    ///
    /// Tokens after the last weight are ignored.
    pub fn parse(text: &str) -> Result<Self, FilterError> {
        let mut tokens = text.split_whitespace();

        let width = parse_dimension(tokens.next().ok_or(FilterError::MissingToken("width"))?)?;
        let height = parse_dimension(tokens.next().ok_or(FilterError::MissingToken("height"))?)?;
        let invalid = FilterError::InvalidDimensions { width, height };
        let (Ok(cols), Ok(rows)) = (usize::try_from(width), usize::try_from(height)) else {
            return Err(invalid);
        };
        let expected = cell_count(cols, rows).ok_or(invalid)?;
        let scale = parse_number(tokens.next().ok_or(FilterError::MissingToken("scale"))?)?;

        let weights = tokens
            .take(expected)
            .map(parse_number)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(cols, rows, scale, weights)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at `(x, y)`, zero outside the grid.
    #[inline]
    pub fn weight(&self, x: i64, y: i64) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0.0;
        }
        self.weights[y as usize * self.width + x as usize]
    }

    /// Full 2D convolution of `self` with `other`.
    pub fn convolve(&self, other: &Filter) -> Filter {
        let width = self.width + other.width - 1;
        let height = self.height + other.height - 1;

        let mut weights = Vec::with_capacity(width * height);
        for y in 0..height as i64 {
            for x in 0..width as i64 {
                let mut sum = 0.0;
                for j in 0..self.height as i64 {
                    for i in 0..self.width as i64 {
                        sum += self.weight(i, j) * other.weight(x - i, y - j);
                    }
                }
                weights.push(sum);
            }
        }

        Filter {
            width,
            height,
            scale: self.scale * other.scale,
            weights,
        }
    }

    /// Render in the text format, each row right-aligned to the widest entry.
    pub fn to_filter_text(&self) -> String {
        let entries: Vec<String> = self.weights.iter().map(|&w| format_number(w)).collect();
        let column = entries.iter().map(String::len).max().unwrap_or(0) + 1;

        let mut out = format!(
            "{} {}\n{}\n",
            self.width,
            self.height,
            format_number(self.scale)
        );
        for row in entries.chunks(self.width) {
            for entry in row {
                out.push_str(&format!("{:>column$}", entry));
            }
            out.push('\n');
        }
        out
    }

    /// Render as gnuplot data: `index value` for a 1D filter, `i j value`
    /// otherwise. Values include the scale.
    pub fn plot_points(&self) -> String {
        let mut out = String::new();
        for j in 0..self.height {
            for i in 0..self.width {
                let value = format_number(self.weights[j * self.width + i] * self.scale);
                let line = if self.width == 1 {
                    format!("{} {}\n", j, value)
                } else if self.height == 1 {
                    format!("{} {}\n", i, value)
                } else {
                    format!("{} {} {}\n", i, j, value)
                };
                out.push_str(&line);
            }
        }
        out
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::parse(s)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_filter_text())
    }
}

/// Number of cells in a `width x height` grid, `None` if either side is zero
/// or the product does not fit in `usize`.
fn cell_count(width: usize, height: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    width.checked_mul(height)
}

/// Format like a C++ stream with default settings (`%g`, six significant
/// digits, trailing zeros dropped).
fn format_number(value: f32) -> String {
    const PRECISION: i32 = 6;

    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // Round to the final precision first so the exponent reflects carries.
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

fn parse_dimension(token: &str) -> Result<i64, FilterError> {
    token
        .parse::<i64>()
        .map_err(|_| FilterError::InvalidNumber(token.to_string()))
}

fn parse_number(token: &str) -> Result<f32, FilterError> {
    token
        .parse::<f32>()
        .map_err(|_| FilterError::InvalidNumber(token.to_string()))
}
