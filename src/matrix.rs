//! Rectangular and square matrices over a generic entry type.
//!
//! Entries are usually plain numbers, but any [`Ring`] works: the cross product in
//! [`crate::vector`] expands a determinant whose first row holds vectors.

use crate::errors::{MathError, MathResult};
use crate::types::Ring;
use num_traits::{One, Zero};
use std::fmt::{Display, Formatter};
use std::ops::{Deref, Index};

/// A single row of a matrix (a `1 x n` shape).
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    entries: Vec<T>,
}

/// A single column of a matrix (an `n x 1` shape).
#[derive(Debug, Clone, PartialEq)]
pub struct Column<T> {
    entries: Vec<T>,
}

macro_rules! impl_slice_type {
    ($name:ident, $other:ident) => {
        impl<T> $name<T> {
            /// Make from a list of entries.
            pub fn new(entries: Vec<T>) -> Self {
                Self { entries }
            }

            /// Number of entries.
            pub fn len(&self) -> usize {
                self.entries.len()
            }

            /// True if there are no entries.
            pub fn is_empty(&self) -> bool {
                self.entries.is_empty()
            }

            /// The entries in order.
            pub fn entries(&self) -> &[T] {
                &self.entries
            }

            /// Get the entry at `index`.
            pub fn get(&self, index: usize) -> Option<&T> {
                self.entries.get(index)
            }

            /// Take the entries out.
            pub fn into_vec(self) -> Vec<T> {
                self.entries
            }

            /// Flip the orientation.
            pub fn transpose(self) -> $other<T> {
                $other::new(self.entries)
            }
        }

        impl<T> From<Vec<T>> for $name<T> {
            fn from(entries: Vec<T>) -> Self {
                Self::new(entries)
            }
        }

        impl<T> Index<usize> for $name<T> {
            type Output = T;

            fn index(&self, index: usize) -> &T {
                &self.entries[index]
            }
        }
    };
}

impl_slice_type!(Row, Column);
impl_slice_type!(Column, Row);

impl<T: Display> Display for Row<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_bracketed(f, &self.entries)
    }
}

impl<T: Display> Display for Column<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{}]", entry)?;
        }
        Ok(())
    }
}

fn write_bracketed<T: Display>(f: &mut Formatter<'_>, entries: &[T]) -> std::fmt::Result {
    write!(f, "[")?;
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", entry)?;
    }
    write!(f, "]")
}

/// A rectangular grid of entries, stored row-major.
///
/// Matrices are values: every operation returns a new matrix and leaves its inputs untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Make a matrix from a list of rows. Fails with [`MathError::Shape`] if the rows do not all
    /// have the same length.
    ///
    /// # Example
    /// ```
    /// use qmath::matrix::Matrix;
    ///
    /// assert!(Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).is_ok());
    /// assert!(Matrix::new(vec![vec![1.0, 2.0, 3.0], vec![5.0, 6.0, 7.0, 8.0]]).is_err());
    /// ```
    pub fn new(rows: Vec<Vec<T>>) -> MathResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(MathError::Shape {
                row,
                expected: ncols,
                actual: r.len(),
            });
        }
        let data = rows.into_iter().flatten().collect();
        Ok(Self {
            rows: nrows,
            cols: ncols,
            data,
        })
    }

    /// Make a matrix from row-major `data`.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<T>) -> MathResult<Self> {
        if data.len() != rows * cols {
            let message = format!(
                "Matrix data has {:?} entries versus expected {:?}x{:?}",
                data.len(),
                rows,
                cols
            );
            Err(MathError::new(message))
        } else {
            Ok(Self { rows, cols, data })
        }
    }

    /// Make a matrix by evaluating `f(row, col)` for each entry.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let data = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| f(row, col))
            .collect();
        Self { rows, cols, data }
    }

    /// A `1 x n` matrix.
    pub fn from_row(row: Row<T>) -> Self {
        let cols = row.len();
        Self {
            rows: 1,
            cols,
            data: row.into_vec(),
        }
    }

    /// An `n x 1` matrix.
    pub fn from_column(column: Column<T>) -> Self {
        let rows = column.len();
        Self {
            rows,
            cols: 1,
            data: column.into_vec(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True if rows == cols.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major entries.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// The entries as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![vec![]; self.rows];
        }
        self.data.chunks(self.cols).map(<[T]>::to_vec).collect()
    }

    /// Extract row `index`.
    pub fn row(&self, index: usize) -> MathResult<Row<T>> {
        if index >= self.rows {
            return Err(out_of_range("Row", index, self.rows));
        }
        let start = index * self.cols;
        Ok(Row::new(self.data[start..start + self.cols].to_vec()))
    }

    /// Extract column `index`.
    pub fn column(&self, index: usize) -> MathResult<Column<T>> {
        if index >= self.cols {
            return Err(out_of_range("Column", index, self.cols));
        }
        Ok(Column::new(
            (0..self.rows)
                .map(|row| self.data[row * self.cols + index].clone())
                .collect(),
        ))
    }

    /// A copy of this matrix with row `index` substituted by `row`.
    pub fn replace_row(&self, index: usize, row: Row<T>) -> MathResult<Self> {
        if index >= self.rows {
            return Err(out_of_range("Row", index, self.rows));
        }
        if row.len() != self.cols {
            return Err(MathError::Arity {
                expected: self.cols,
                actual: row.len(),
            });
        }
        let mut data = self.data.clone();
        let start = index * self.cols;
        data.splice(start..start + self.cols, row.into_vec());
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// A copy of this matrix with column `index` substituted by `column`.
    pub fn replace_column(&self, index: usize, column: Column<T>) -> MathResult<Self> {
        if index >= self.cols {
            return Err(out_of_range("Column", index, self.cols));
        }
        if column.len() != self.rows {
            return Err(MathError::Arity {
                expected: self.rows,
                actual: column.len(),
            });
        }
        let mut data = self.data.clone();
        column
            .into_vec()
            .into_iter()
            .enumerate()
            .for_each(|(row, entry)| data[row * self.cols + index] = entry);
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |row, col| {
            self.data[col * self.cols + row].clone()
        })
    }

    /// Apply `f` to each entry.
    pub fn map<U, F>(&self, f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Check that this matrix is square.
    pub fn into_square(self) -> MathResult<SquareMatrix<T>> {
        if self.is_square() {
            Ok(SquareMatrix(self))
        } else {
            Err(MathError::MatrixDimension {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

fn out_of_range(what: &str, index: usize, len: usize) -> MathError {
    MathError::new(format!(
        "{} index {:?} out of range for length {:?}",
        what, index, len
    ))
}

impl<T: Clone + Zero> Matrix<T> {
    /// Block diagonal combination: `self` in the top-left block, `other` in the bottom-right,
    /// zeros elsewhere.
    ///
    /// # Example
    /// ```
    /// use qmath::matrix::Matrix;
    ///
    /// let a = Matrix::new(vec![vec![1.0]]).unwrap();
    /// let b = Matrix::new(vec![vec![2.0]]).unwrap();
    /// let c = a.direct_sum(&b);
    /// assert_eq!(c.to_rows(), vec![vec![1.0, 0.0], vec![0.0, 2.0]]);
    /// ```
    pub fn direct_sum(&self, other: &Self) -> Self {
        let (ar, ac) = self.shape();
        Self::from_fn(ar + other.rows, ac + other.cols, |row, col| {
            match (row < ar, col < ac) {
                (true, true) => self.data[row * ac + col].clone(),
                (false, false) => other.data[(row - ar) * other.cols + (col - ac)].clone(),
                _ => T::zero(),
            }
        })
    }

    /// An all zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, |_, _| T::zero())
    }
}

impl<T: Clone + Zero + One> Matrix<T> {
    /// The `n x n` identity matrix.
    pub fn eye(n: usize) -> SquareMatrix<T> {
        SquareMatrix::eye(n)
    }
}

impl<T: Ring> Matrix<T> {
    /// Entry-wise sum.
    pub fn checked_add(&self, other: &Self) -> MathResult<Self> {
        if self.shape() != other.shape() {
            let message = format!(
                "Cannot add a {:?} matrix to a {:?} matrix",
                self.shape(),
                other.shape()
            );
            return Err(MathError::new(message));
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a.try_add(b))
            .collect::<MathResult<Vec<_>>>()?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Multiply each entry by `k` (on the left).
    pub fn scale(&self, k: &T) -> MathResult<Self> {
        let data = self
            .data
            .iter()
            .map(|x| k.try_mul(x))
            .collect::<MathResult<Vec<_>>>()?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Matrix product `self * other`.
    pub fn matmul(&self, other: &Self) -> MathResult<Self> {
        if self.cols != other.rows {
            let message = format!(
                "Cannot multiply a {:?} matrix by a {:?} matrix",
                self.shape(),
                other.shape()
            );
            return Err(MathError::new(message));
        }
        let data = (0..self.rows)
            .flat_map(|row| (0..other.cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                dot_entries(
                    (0..self.cols).map(|k| &self.data[row * self.cols + k]),
                    (0..self.cols).map(|k| &other.data[k * other.cols + col]),
                )
            })
            .collect::<MathResult<Vec<_>>>()?;
        Ok(Self {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    /// Product `self * column`.
    pub fn mul_column(&self, column: &Column<T>) -> MathResult<Column<T>> {
        if self.cols != column.len() {
            return Err(MathError::Arity {
                expected: self.cols,
                actual: column.len(),
            });
        }
        let entries = (0..self.rows)
            .map(|row| {
                dot_entries(
                    self.data[row * self.cols..(row + 1) * self.cols].iter(),
                    column.entries().iter(),
                )
            })
            .collect::<MathResult<Vec<_>>>()?;
        Ok(Column::new(entries))
    }

    /// Determinant, if this matrix is square.
    pub fn determinant(&self) -> MathResult<T> {
        self.clone().into_square()?.determinant()
    }
}

/// Sum of pairwise products, starting from the first product so no zero is required.
fn dot_entries<'a, T, A, B>(a: A, b: B) -> MathResult<T>
where
    T: Ring + 'a,
    A: Iterator<Item = &'a T>,
    B: Iterator<Item = &'a T>,
{
    a.zip(b)
        .try_fold(None, |acc: Option<T>, (x, y)| {
            let p = x.try_mul(y)?;
            match acc {
                None => Ok(Some(p)),
                Some(acc) => acc.try_add(&p).map(Some),
            }
        })?
        .ok_or_else(|| MathError::new("Cannot take a product over an empty dimension"))
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(col < self.cols, "Column index out of range");
        &self.data[row * self.cols + col]
    }
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            write_bracketed(f, &self.data[row * self.cols..(row + 1) * self.cols])?;
        }
        Ok(())
    }
}

/// A matrix with as many rows as columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix<T>(Matrix<T>);

impl<T: Clone> SquareMatrix<T> {
    /// Make a square matrix from a list of rows. Ragged rows fail with [`MathError::Shape`],
    /// non-square input with [`MathError::MatrixDimension`].
    ///
    /// # Example
    /// ```
    /// use qmath::errors::MathError;
    /// use qmath::matrix::SquareMatrix;
    ///
    /// let err = SquareMatrix::new(vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]]).unwrap_err();
    /// assert_eq!(err, MathError::MatrixDimension { rows: 2, cols: 4 });
    /// ```
    pub fn new(rows: Vec<Vec<T>>) -> MathResult<Self> {
        Matrix::new(rows)?.into_square()
    }

    /// Side length.
    pub fn dim(&self) -> usize {
        self.0.rows
    }

    /// The underlying matrix.
    pub fn into_matrix(self) -> Matrix<T> {
        self.0
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// A copy with row `index` substituted.
    pub fn replace_row(&self, index: usize, row: Row<T>) -> MathResult<Self> {
        self.0.replace_row(index, row).map(Self)
    }

    /// A copy with column `index` substituted.
    pub fn replace_column(&self, index: usize, column: Column<T>) -> MathResult<Self> {
        self.0.replace_column(index, column).map(Self)
    }

    /// Apply `f` to each entry.
    pub fn map<U, F>(&self, f: F) -> SquareMatrix<U>
    where
        F: FnMut(&T) -> U,
    {
        SquareMatrix(self.0.map(f))
    }

    /// The matrix with row `row` and column `col` removed.
    pub fn minor(&self, row: usize, col: usize) -> MathResult<Self> {
        let n = self.dim();
        if row >= n || col >= n {
            return Err(out_of_range("Minor", row.max(col), n));
        }
        let data = (0..n)
            .filter(|r| *r != row)
            .flat_map(|r| {
                (0..n)
                    .filter(|c| *c != col)
                    .map(move |c| self.0.data[r * n + c].clone())
            })
            .collect();
        Ok(Self(Matrix {
            rows: n - 1,
            cols: n - 1,
            data,
        }))
    }
}

impl<T> SquareMatrix<T> {
    /// Wrap `n * n` row-major entries produced by a kernel which guarantees the length.
    pub(crate) fn from_raw(n: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), n * n);
        Self(Matrix {
            rows: n,
            cols: n,
            data,
        })
    }
}

impl<T: Clone + Zero> SquareMatrix<T> {
    /// Block diagonal combination, see [`Matrix::direct_sum`].
    pub fn direct_sum(&self, other: &Self) -> Self {
        Self(self.0.direct_sum(&other.0))
    }
}

impl<T: Clone + Zero + One> SquareMatrix<T> {
    /// The `n x n` identity matrix.
    pub fn eye(n: usize) -> Self {
        Self(Matrix::from_fn(n, n, |row, col| {
            if row == col {
                T::one()
            } else {
                T::zero()
            }
        }))
    }
}

impl<T: Ring> SquareMatrix<T> {
    /// Determinant by cofactor expansion along the first row.
    ///
    /// The expansion only ever multiplies an entry of the first row by the determinant of a
    /// minor, so the first row may hold a different kind of entry than the rest (vectors over
    /// scalars, for the cross product).
    ///
    /// # Example
    /// ```
    /// use qmath::matrix::SquareMatrix;
    ///
    /// let m = SquareMatrix::new(vec![vec![1.0, 3.0], vec![1.0, 4.0]]).unwrap();
    /// assert_eq!(m.determinant().unwrap(), 1.0);
    /// ```
    pub fn determinant(&self) -> MathResult<T> {
        let n = self.dim();
        let d = &self.0.data;
        match n {
            0 => Err(MathError::new("Cannot take the determinant of an empty matrix")),
            1 => Ok(d[0].clone()),
            2 => d[0].try_mul(&d[3])?.try_sub(&d[1].try_mul(&d[2])?),
            _ => (0..n).try_fold(None, |acc: Option<T>, col| {
                let term = d[col].try_mul(&self.minor(0, col)?.determinant()?)?;
                match acc {
                    None => Ok(Some(term)),
                    Some(acc) if col % 2 == 0 => acc.try_add(&term).map(Some),
                    Some(acc) => acc.try_sub(&term).map(Some),
                }
            })?
            .ok_or_else(|| MathError::new("Cannot take the determinant of an empty matrix")),
        }
    }
}

impl<T> Deref for SquareMatrix<T> {
    type Target = Matrix<T>;

    fn deref(&self) -> &Matrix<T> {
        &self.0
    }
}

impl<T> From<SquareMatrix<T>> for Matrix<T> {
    fn from(m: SquareMatrix<T>) -> Self {
        m.0
    }
}

impl<T: Display> Display for SquareMatrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}
