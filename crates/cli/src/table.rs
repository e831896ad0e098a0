//! Long-format result table: one row per polyline vertex.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use polycraft::ResultSet;
use std::fs::File;
use std::path::Path;

/// Columns `rank, length, closed, vertex, x, y`; `rank` and `vertex` are 0-based.
pub fn result_frame(set: &ResultSet) -> PolarsResult<DataFrame> {
    let rows: usize = set.iter().map(|p| p.points.len()).sum();
    let mut rank = Vec::with_capacity(rows);
    let mut length = Vec::with_capacity(rows);
    let mut closed = Vec::with_capacity(rows);
    let mut vertex = Vec::with_capacity(rows);
    let mut xs = Vec::with_capacity(rows);
    let mut ys = Vec::with_capacity(rows);
    for (r, line) in set.iter().enumerate() {
        for (v, p) in line.points.iter().enumerate() {
            rank.push(r as u32);
            length.push(line.length);
            closed.push(line.closed);
            vertex.push(v as u32);
            xs.push(p.x);
            ys.push(p.y);
        }
    }
    df!(
        "rank" => rank,
        "length" => length,
        "closed" => closed,
        "vertex" => vertex,
        "x" => xs,
        "y" => ys
    )
}

/// Writes CSV or Parquet depending on the extension of `path`.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match ext.as_deref() {
        Some("csv") => {
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
        }
        Some("parquet") => {
            ParquetWriter::new(file).finish(df)?;
        }
        _ => bail!(
            "unsupported table extension for {} (expected .csv or .parquet)",
            path.display()
        ),
    }
    tracing::info!(path = %path.display(), rows = df.height(), "table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polycraft::api::{craft, DecomposeCfg, Segment};
    use tempfile::tempdir;

    fn sample() -> ResultSet {
        let segs: Vec<Segment> = [(0, 0, 1, 1), (2, 0, 1, 1), (1, 1, 1, 2)]
            .into_iter()
            .map(Segment::from)
            .collect();
        craft(&segs, DecomposeCfg::default()).unwrap()
    }

    #[test]
    fn one_row_per_vertex() {
        let df = result_frame(&sample()).unwrap();
        assert_eq!(df.shape(), (6, 6));
        let ranks = df.column("rank").unwrap().u32().unwrap();
        assert_eq!(ranks.get(0), Some(0));
        assert_eq!(ranks.get(5), Some(2));
        let xs = df.column("x").unwrap().i64().unwrap();
        assert_eq!(xs.get(0), Some(1));
    }

    #[test]
    fn csv_and_parquet_round_trip_shape() {
        let dir = tempdir().unwrap();
        let mut df = result_frame(&sample()).unwrap();

        let csv = dir.path().join("t.csv");
        write_table(&mut df, &csv).unwrap();
        let back = LazyCsvReader::new(&csv).finish().unwrap().collect().unwrap();
        assert_eq!(back.shape(), df.shape());

        let pq = dir.path().join("t.parquet");
        write_table(&mut df, &pq).unwrap();
        let back = ParquetReader::new(File::open(&pq).unwrap()).finish().unwrap();
        assert_eq!(back.shape(), df.shape());

        assert!(write_table(&mut df, &dir.path().join("t.xlsx")).is_err());
    }
}
