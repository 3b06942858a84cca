use std::{fs::File, io::Read, path::Path};

use log::info;
use ndarray::Array2;

use crate::{
    error::{DetectErr, Result},
    label::binarize_label,
};

/// Fields read as missing besides the empty one.
const MISSING_TOKENS: [&str; 8] = ["NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None"];

/// A single value of a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f32),
    Missing,
}

impl Cell {
    /// Interprets a raw field: empty fields and the usual missing markers (`NA`, `null`...) are
    /// missing, numeric ones become numbers and anything else stays as text.
    pub fn parse(field: &str) -> Self {
        if field.is_empty() || MISSING_TOKENS.contains(&field) {
            return Cell::Missing;
        }

        match field.parse() {
            Ok(value) => Cell::Number(value),
            Err(_) => Cell::Text(field.to_string()),
        }
    }
}

/// An in memory table of named columns, all of them of the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates a new `Table` out of named columns.
    ///
    /// # Returns
    /// The table or an error if the columns differ in length.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Cell>)>,
        S: Into<String>,
    {
        let (names, columns): (Vec<String>, Vec<Vec<Cell>>) = columns
            .into_iter()
            .map(|(name, cells)| (name.into(), cells))
            .unzip();

        let expected = columns.first().map_or(0, Vec::len);
        for (name, column) in names.iter().zip(&columns) {
            if column.len() != expected {
                return Err(DetectErr::RaggedColumns {
                    column: name.clone(),
                    len: column.len(),
                    expected,
                });
            }
        }

        Ok(Self { names, columns })
    }

    /// Reads a table from CSV data with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);

        let names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut columns = vec![Vec::new(); names.len()];

        for record in rdr.records() {
            let record = record?;

            for (column, field) in columns.iter_mut().zip(record.iter()) {
                column.push(Cell::parse(field));
            }
        }

        Ok(Self { names, columns })
    }

    /// Returns the amount of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Result<&[Cell]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| DetectErr::MissingColumn(name.to_string()))
    }

    /// Replaces every cell of a column.
    fn map_column<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: Fn(&Cell) -> Cell,
    {
        let i = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| DetectErr::MissingColumn(name.to_string()))?;

        for cell in self.columns[i].iter_mut() {
            *cell = f(cell);
        }

        Ok(())
    }

    /// Gathers the given columns into a matrix, one row per table row.
    ///
    /// Missing cells become `NaN`.
    ///
    /// # Returns
    /// The matrix or an error if a column doesn't exist or holds text.
    pub fn numeric_matrix(&self, names: &[&str]) -> Result<Array2<f32>> {
        let columns = names
            .iter()
            .map(|name| self.column(name))
            .collect::<Result<Vec<_>>>()?;

        let mut matrix = Array2::zeros((self.len(), names.len()));

        for (j, (name, column)) in names.iter().zip(columns).enumerate() {
            for (i, cell) in column.iter().enumerate() {
                matrix[[i, j]] = match cell {
                    Cell::Number(value) => *value,
                    Cell::Missing => f32::NAN,
                    Cell::Text(value) => {
                        return Err(DetectErr::NonNumeric {
                            column: name.to_string(),
                            row: i,
                            value: value.clone(),
                        });
                    }
                };
            }
        }

        Ok(matrix)
    }
}

/// Loads the CSV dataset at `path`, binarizing its `label` column in place.
///
/// # Arguments
/// * `path` - The path of the CSV file.
/// * `label` - The name of the label column.
pub fn load_dataset<P: AsRef<Path>>(path: P, label: &str) -> Result<Table> {
    let path = path.as_ref();
    let mut table = Table::from_reader(File::open(path)?)?;

    table.map_column(label, |cell| Cell::Number(binarize_label(cell) as f32))?;

    info!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}
