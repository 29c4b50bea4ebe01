//! Row source over an in-memory polars `DataFrame`.

use super::{Chunk, RowSource};
use crate::error::{Result, ResultExt};
use polars::prelude::*;

/// Hands out consecutive slices of a `DataFrame` as chunks.
///
/// Every column is cast to strings, so numbers are profiled through their
/// textual form just like CSV input. Polars nulls become absent values.
pub struct DataFrameRowSource {
    df: DataFrame,
    columns: Vec<String>,
    offset: usize,
}

impl DataFrameRowSource {
    pub fn new(df: DataFrame) -> Self {
        let columns = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self {
            df,
            columns,
            offset: 0,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn column_as_strings(slice: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
        let series = slice
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::String)
            .context(format!("Failed to cast column '{}' to strings", name))?;
        let values = series
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(values)
    }
}

impl RowSource for DataFrameRowSource {
    fn next_chunk(&mut self, max_rows: usize) -> Result<Option<Chunk>> {
        let height = self.df.height();
        if self.offset >= height || self.columns.is_empty() {
            return Ok(None);
        }

        let len = max_rows.min(height - self.offset);
        let slice = self.df.slice(self.offset as i64, len);
        self.offset += len;

        let mut columns_values = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            columns_values.push(Self::column_as_strings(&slice, name)?.into_iter());
        }

        let rows = (0..len)
            .map(|_| {
                columns_values
                    .iter_mut()
                    .map(|values| values.next().flatten())
                    .collect()
            })
            .collect();

        Chunk::new(self.columns.clone(), rows).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_dataframe_into_chunks() {
        let df = df!(
            "id" => &[1i64, 2, 3],
            "name" => &[Some("a"), None, Some("c")]
        )
        .unwrap();
        let mut source = DataFrameRowSource::new(df);
        assert_eq!(source.columns(), ["id", "name"]);

        let first = source.next_chunk(2).unwrap().unwrap();
        assert_eq!(first.num_rows(), 2);
        assert_eq!(
            first.rows()[1],
            vec![Some("2".to_string()), None]
        );

        let second = source.next_chunk(2).unwrap().unwrap();
        assert_eq!(second.num_rows(), 1);
        assert_eq!(second.rows()[0][1], Some("c".to_string()));

        assert!(source.next_chunk(2).unwrap().is_none());
    }

    #[test]
    fn test_empty_dataframe_yields_nothing() {
        let df = df!("a" => Vec::<i64>::new()).unwrap();
        let mut source = DataFrameRowSource::new(df);
        assert!(source.next_chunk(10).unwrap().is_none());
    }
}
