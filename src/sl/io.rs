//! Plain-text form of an [`SL`] element: one matrix row per line, entries
//! separated by single spaces. Reading accepts any whitespace layout and
//! passes the parsed matrix through [`SL::coerce`], so rounded output of a
//! group element is pulled back onto determinant one.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context};
use nalgebra::{RealField, SMatrix};

use super::SL;
use crate::error::AlgebraError;

impl<const N: usize, T: RealField + Copy> fmt::Display for SL<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..N {
            for c in 0..N {
                if c > 0 {
                    f.write_str(" ")?;
                }
                match f.precision() {
                    Some(precision) => write!(f, "{:.*}", precision, self.matrix[(r, c)])?,
                    None => write!(f, "{}", self.matrix[(r, c)])?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Writes `element` in its text form.
pub fn write<const N: usize, T, W>(writer: &mut W, element: &SL<N, T>) -> anyhow::Result<()>
where
    T: RealField + Copy,
    W: Write,
{
    write!(writer, "{}", element).context("Failed to write SL element")?;
    Ok(())
}

/// Reads `N * N` numbers in row-major order and coerces them with [`SL::coerce`].
///
/// Lines are consumed until enough numbers have been collected; a line that
/// carries more numbers than needed is rejected.
pub fn read<const N: usize, T, R>(reader: &mut R) -> anyhow::Result<SL<N, T>>
where
    T: RealField + Copy + FromStr,
    R: BufRead,
{
    let expected = N * N;
    let mut values = Vec::with_capacity(expected);
    let mut line = String::new();

    while values.len() < expected {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .context("Failed to read matrix row")?;
        if bytes_read == 0 {
            bail!(AlgebraError::Parse(format!(
                "expected {} values, found {}",
                expected,
                values.len()
            )));
        }

        for token in line.split_whitespace() {
            if values.len() == expected {
                bail!(AlgebraError::Parse(format!(
                    "unexpected value '{}' after {} values",
                    token, expected
                )));
            }
            let value = token
                .parse::<T>()
                .map_err(|_| AlgebraError::Parse(format!("invalid number '{}'", token)))?;
            values.push(value);
        }
    }

    SL::from_matrix(&SMatrix::<T, N, N>::from_row_slice(&values))
}

impl<const N: usize, T> FromStr for SL<N, T>
where
    T: RealField + Copy + FromStr,
{
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = s.as_bytes();
        let element = read(&mut bytes)?;
        if !bytes.iter().all(|b| b.is_ascii_whitespace()) {
            bail!(AlgebraError::Parse("trailing input after matrix".to_string()));
        }
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{DVector, Matrix2, Matrix3};

    type SL2 = SL<2>;
    type SL3 = SL<3>;

    fn parse_error(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<AlgebraError>(), Some(AlgebraError::Parse(_)))
    }

    #[test]
    fn test_display() {
        assert_eq!(SL2::identity().to_string(), "1 0\n0 1\n");

        let element = SL2::from_matrix(&Matrix2::new(4.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(format!("{:.2}", element), "1.00 0.00\n0.00 0.25\n");
    }

    #[test]
    fn test_write_then_read() {
        let element = SL3::from_algebra(&DVector::from_fn(8, |i, _| 0.1 * i as f64 - 0.3)).unwrap();

        let mut buffer = Vec::new();
        write(&mut buffer, &element).unwrap();
        let restored: SL3 = read(&mut buffer.as_slice()).unwrap();

        assert_relative_eq!(restored.matrix(), element.matrix(), epsilon = 1e-14);
    }

    #[test]
    fn test_rounded_text_is_coerced() {
        let element = SL3::from_algebra(&DVector::from_fn(8, |i, _| 0.2 - 0.05 * i as f64)).unwrap();
        let rounded = format!("{:.3}", element);

        let restored: SL3 = rounded.parse().unwrap();

        let values: Vec<f64> = rounded
            .split_whitespace()
            .map(|token| token.parse().unwrap())
            .collect();
        let parsed = Matrix3::from_row_slice(&values);
        assert_relative_eq!(
            restored.matrix(),
            &(parsed / parsed.determinant()),
            epsilon = 1e-14
        );
        assert_abs_diff_eq!(restored.determinant(), 1.0, epsilon = 5e-2);
        assert_abs_diff_eq!(restored.matrix(), element.matrix(), epsilon = 5e-2);
    }

    #[test]
    fn test_read_ignores_layout() {
        let text = "  2 0 0\n\n0   0.5\t0 0 0 1\n";
        let element: SL3 = text.parse().unwrap();
        assert_relative_eq!(
            element.matrix(),
            &Matrix3::new(2.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 1.0),
            epsilon = 1e-15
        );

        // a stream may carry more data after the element
        let mut stream = "1 0\n0 1\nnext record\n".as_bytes();
        let element: SL2 = read(&mut stream).unwrap();
        assert_eq!(element, SL2::identity());
        assert_eq!(stream, b"next record\n");
    }

    #[test]
    fn test_read_coerces() {
        let element: SL2 = "2 0\n0 2\n".parse().unwrap();
        assert_eq!(element.matrix(), &Matrix2::new(0.5, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_read_errors() {
        let err = "1 0\n0\n".parse::<SL2>().unwrap_err();
        assert!(parse_error(&err));

        let err = "1 0\n0 one\n".parse::<SL2>().unwrap_err();
        assert!(parse_error(&err));

        let err = "1 0\n0 1 7\n".parse::<SL2>().unwrap_err();
        assert!(parse_error(&err));

        let err = "1 0\n0 1\n5\n".parse::<SL2>().unwrap_err();
        assert!(parse_error(&err));

        let err = "1 1\n1 1\n".parse::<SL2>().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AlgebraError>(),
            Some(AlgebraError::DegenerateMatrix { .. })
        ));
    }
}
