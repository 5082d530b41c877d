//! Signed sparse incidence matrix.
//!
//! A resizable compressed-row matrix storing, for each row, an ordered list
//! of signed column references. The sign (`+1`/`-1`) carries the relative
//! orientation between a simplex and one of its sub-simplices. Positional
//! order within a row is semantically meaningful for the primary matrices
//! (edge rows store from/to, face rows store the oriented edge cycle).
//!
//! Each entry packs column and sign into one `i32` as `(col + 1) * sign`;
//! the `+1` shift lets column 0 carry a sign. Decode with
//! `unsigned_abs() - 1` for the column and the integer's sign for the
//! orientation (0 is never stored).

use smallvec::SmallVec;
use std::fmt;

/// Live rows never exceed 4 entries (a tet has 4 faces), so row storage is
/// inline. Transpose rows (a vertex's edges, an edge's faces) may spill.
type Row = SmallVec<[i32; 4]>;

#[inline]
fn pack(col: usize, sign: i8) -> i32 {
    debug_assert!(sign == 1 || sign == -1);
    (col as i32 + 1) * sign as i32
}

#[inline]
fn unpack_col(entry: i32) -> usize {
    debug_assert!(entry != 0, "empty entry in incidence row");
    (entry.unsigned_abs() - 1) as usize
}

#[inline]
fn unpack_sign(entry: i32) -> i8 {
    if entry < 0 { -1 } else { 1 }
}

/// A sparse matrix of signed incidence entries with per-row ordered storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IncidenceMatrix {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<Row>,
}

impl IncidenceMatrix {
    /// Creates an empty 0x0 matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a matrix with the given dimensions and all rows empty.
    pub fn with_dims(rows: usize, cols: usize) -> Self {
        Self {
            n_rows: rows,
            n_cols: cols,
            rows: vec![Row::new(); rows],
        }
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.n_cols
    }

    /// Grow the matrix by `rows` empty rows.
    pub fn add_rows(&mut self, rows: usize) {
        self.n_rows += rows;
        self.rows.resize(self.n_rows, Row::new());
    }

    /// Grow the matrix by `cols` columns. Existing rows are unaffected.
    pub fn add_cols(&mut self, cols: usize) {
        self.n_cols += cols;
    }

    /// Number of entries stored in row `i`.
    #[inline]
    pub fn row_len(&self, i: usize) -> usize {
        debug_assert!(i < self.n_rows);
        self.rows[i].len()
    }

    /// Write entry `(i, j) = val`. `val == 0` removes the entry. If the
    /// entry already exists it is replaced in place, preserving its row
    /// position; otherwise it is appended at the end of the row.
    pub fn set(&mut self, i: usize, j: usize, val: i8) {
        debug_assert!(i < self.n_rows && j < self.n_cols);
        if val == 0 {
            self.remove(i, j);
            return;
        }
        debug_assert!(val == 1 || val == -1);
        let shifted = j as i32 + 1;
        let row = &mut self.rows[i];
        for entry in row.iter_mut() {
            if entry.abs() == shifted {
                *entry = shifted * val as i32;
                return;
            }
        }
        row.push(shifted * val as i32);
    }

    /// The sign at `(i, j)`, or 0 if the entry is absent. O(row length).
    pub fn get(&self, i: usize, j: usize) -> i8 {
        debug_assert!(i < self.n_rows && j < self.n_cols);
        let shifted = j as i32 + 1;
        for &entry in &self.rows[i] {
            if entry.abs() == shifted {
                return unpack_sign(entry);
            }
        }
        0
    }

    /// Whether `(i, j)` holds an entry.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.get(i, j) != 0
    }

    /// Remove the entry at `(i, j)` if present, preserving the order of the
    /// remaining entries. No-op otherwise.
    pub fn remove(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.n_rows && j < self.n_cols);
        let shifted = j as i32 + 1;
        let row = &mut self.rows[i];
        if let Some(pos) = row.iter().position(|e| e.abs() == shifted) {
            row.remove(pos);
        }
    }

    /// Empty row `i`.
    pub fn zero_row(&mut self, i: usize) {
        debug_assert!(i < self.n_rows);
        self.rows[i].clear();
    }

    /// Empty every row.
    pub fn zero_all(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }

    /// Rotate row `i` left by one: the head entry moves to the tail. Used to
    /// bring face rows into canonical rotation.
    pub fn cycle_row(&mut self, i: usize) {
        debug_assert!(i < self.n_rows);
        let row = &mut self.rows[i];
        if row.len() > 1 {
            row.rotate_left(1);
        }
    }

    /// Column of the entry at row position `pos`. O(1).
    #[inline]
    pub fn col_by_index(&self, i: usize, pos: usize) -> usize {
        debug_assert!(i < self.n_rows);
        debug_assert!(pos < self.rows[i].len());
        unpack_col(self.rows[i][pos])
    }

    /// Sign of the entry at row position `pos`. O(1).
    #[inline]
    pub fn value_by_index(&self, i: usize, pos: usize) -> i8 {
        debug_assert!(i < self.n_rows);
        debug_assert!(pos < self.rows[i].len());
        unpack_sign(self.rows[i][pos])
    }

    /// Write column `j` with sign `val` at row position `pos`, growing the
    /// row if needed. Unlike [`set`](Self::set) this addresses the row by
    /// position, so callers control the semantic ordering of entries.
    pub fn set_by_index(&mut self, i: usize, pos: usize, j: usize, val: i8) {
        debug_assert!(i < self.n_rows && j < self.n_cols);
        debug_assert!(val == 1 || val == -1);
        let row = &mut self.rows[i];
        if pos >= row.len() {
            row.resize(pos + 1, 0);
        }
        row[pos] = pack(j, val);
    }
}

impl fmt::Display for IncidenceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dimensions ({},{}):", self.n_rows, self.n_cols)?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{i}:")?;
            for &entry in row {
                write!(
                    f,
                    " {}{}",
                    if entry > 0 { '+' } else { '-' },
                    unpack_col(entry)
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
