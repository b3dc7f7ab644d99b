//! Parquet dataset loading
//!
//! Reads only the question and answer columns, casting each to UTF-8 so
//! `Utf8`, `LargeUtf8`, dictionary-encoded strings and plain scalars all load
//! the same way.

use crate::config::SourceConfig;
use crate::dataset::{Dataset, Row};
use crate::error::{LoadError, LoadResult};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Load every row of the configured source file.
///
/// Fails if the file is missing, is not Parquet, or lacks one of the
/// configured columns.
pub fn load_dataset(source: &SourceConfig) -> LoadResult<Dataset> {
    let path = source.path.as_path();

    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| LoadError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);

    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| LoadError::Parquet {
            path: path.to_path_buf(),
            source: e,
        })?;

    let schema = builder.schema().clone();
    let columns: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
    debug!(path = %path.display(), columns = ?columns, "Opened Parquet file");

    let question_idx = text_column_index(&schema, &columns, &source.question_column)?;
    let answer_idx = text_column_index(&schema, &columns, &source.answer_column)?;

    let mask = ProjectionMask::roots(builder.parquet_schema(), [question_idx, answer_idx]);
    let reader = builder
        .with_projection(mask)
        .build()
        .map_err(|e| LoadError::Parquet {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|e| LoadError::Arrow {
            path: path.to_path_buf(),
            source: e,
        })?;
        append_rows(&batch, source, path, &mut rows)?;
    }

    info!(path = %path.display(), rows = rows.len(), "Loaded dataset");

    Ok(Dataset {
        columns,
        rows,
        file_size,
    })
}

/// Position of `name` in the file schema, if it can be read as text
fn text_column_index(schema: &Schema, columns: &[String], name: &str) -> LoadResult<usize> {
    let idx = columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| LoadError::MissingColumn {
            column: name.to_string(),
            available: columns.to_vec(),
        })?;

    let data_type = schema.field(idx).data_type();
    if !can_cast_types(data_type, &DataType::Utf8) {
        return Err(LoadError::UnsupportedColumn {
            column: name.to_string(),
            data_type: data_type.to_string(),
        });
    }

    Ok(idx)
}

/// Convert one projected batch to rows
fn append_rows(
    batch: &RecordBatch,
    source: &SourceConfig,
    path: &Path,
    rows: &mut Vec<Row>,
) -> LoadResult<()> {
    let questions = text_column(batch, &source.question_column, path)?;
    let answers = text_column(batch, &source.answer_column, path)?;
    let questions = questions.as_string::<i32>();
    let answers = answers.as_string::<i32>();

    rows.reserve(batch.num_rows());
    for i in 0..batch.num_rows() {
        let question = (!questions.is_null(i)).then(|| questions.value(i));
        let answer = (!answers.is_null(i)).then(|| answers.value(i));
        rows.push(Row::new(question, answer));
    }

    Ok(())
}

/// Column `name` of `batch` cast to `Utf8`
fn text_column(batch: &RecordBatch, name: &str, path: &Path) -> LoadResult<ArrayRef> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn {
            column: name.to_string(),
            available: batch
                .schema()
                .fields()
                .iter()
                .map(|f| f.name().clone())
                .collect(),
        })?;

    cast(column, &DataType::Utf8).map_err(|e| LoadError::Arrow {
        path: path.to_path_buf(),
        source: e,
    })
}
