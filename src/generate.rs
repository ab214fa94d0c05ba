use std::{
    env,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::Encoding;
use itertools::Itertools;
use log::{debug, info};
use thiserror::Error;

use crate::{
    cli::GenerateArgs,
    io_utils,
    rows::RowReader,
    schema::Dataset,
    script::{Script, TransformedRow},
};

pub const OUTPUT_FILE_NAME: &str = "db_init.sql";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Missing input files: {}", join_names(.0))]
    MissingInputs(Vec<Dataset>),
}

fn join_names(datasets: &[Dataset]) -> String {
    datasets.iter().map(Dataset::table_name).join(", ")
}

pub fn execute(args: &GenerateArgs) -> Result<()> {
    let data_dir = resolve_data_dir(args.data_dir.as_deref())?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| data_dir.join(OUTPUT_FILE_NAME));
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Generating script from {:?} -> {:?} (input encoding {})",
        data_dir,
        output,
        encoding.name()
    );

    ensure_inputs_present(&data_dir)?;
    let script = build_script(&data_dir, encoding)?;
    write_script(&script.render(), &output)?;
    if !io_utils::is_dash(&output) {
        info!("Script written to {:?}", output);
    }
    Ok(())
}

/// Defaults to the directory holding the running executable.
pub fn resolve_data_dir(provided: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = provided {
        return Ok(dir.to_path_buf());
    }
    let exe = env::current_exe().context("Locating the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Executable path {exe:?} has no parent directory"))
}

pub fn input_path(data_dir: &Path, dataset: Dataset) -> PathBuf {
    data_dir.join(dataset.file_name())
}

pub fn missing_inputs(data_dir: &Path) -> Vec<Dataset> {
    Dataset::ALL
        .into_iter()
        .filter(|dataset| !input_path(data_dir, *dataset).exists())
        .collect()
}

pub fn ensure_inputs_present(data_dir: &Path) -> Result<(), GenerateError> {
    let missing = missing_inputs(data_dir);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(GenerateError::MissingInputs(missing))
    }
}

pub fn load_dataset(
    dataset: Dataset,
    path: &Path,
    encoding: &'static Encoding,
) -> Result<Vec<TransformedRow>> {
    debug!(
        "Reading {} from {:?} with delimiter '{}'",
        dataset,
        path,
        dataset.delimiter() as char
    );
    let reader = RowReader::open(path, dataset.delimiter(), encoding)?;
    let mut rows = Vec::new();
    for raw in reader {
        rows.push(dataset.transform_row(raw?));
    }
    if rows.is_empty() {
        info!("{dataset}: no data rows; table is created without an INSERT");
    } else {
        info!("{dataset}: {} row(s) read from {:?}", rows.len(), path);
    }
    Ok(rows)
}

pub fn build_script(data_dir: &Path, encoding: &'static Encoding) -> Result<Script> {
    let mut script = Script::new();
    for dataset in Dataset::ALL {
        let path = input_path(data_dir, dataset);
        let rows = load_dataset(dataset, &path, encoding)
            .with_context(|| format!("Loading {dataset} from {path:?}"))?;
        script.set_rows(dataset, rows);
    }
    Ok(script)
}

pub fn write_script(sql: &str, output: &Path) -> Result<()> {
    let mut writer = io_utils::open_output_writer(output)?;
    writer
        .write_all(sql.as_bytes())
        .with_context(|| format!("Writing script to {output:?}"))?;
    writer
        .flush()
        .with_context(|| format!("Flushing script to {output:?}"))
}
