// ==========================================
// Logistica ASN - ASN split menu
// ==========================================
// <file>.xlsx -> <file>_processed.xlsx next to it
// Default input: x.xlsx on the desktop
// ==========================================

use crate::app::client_menu::clean_path;
use crate::app::AppResult;
use crate::config::settings_reader::SettingsReader;
use crate::engine::asn_split::split_asn_rows;
use crate::export::sheets::raw_sheet;
use crate::export::xlsx_writer::write_workbook;
use crate::i18n::t_with_args;
use crate::importer::file_parser::UniversalFileParser;
use crate::prompt::Prompter;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_ASN_FILE: &str = "x.xlsx";

/// Desktop x.xlsx, or ./x.xlsx when no desktop directory is known.
pub fn default_asn_path() -> PathBuf {
    dirs::desktop_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_ASN_FILE)
}

/// `dir/name.xlsx` -> `dir/name_processed.xlsx`
pub fn processed_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "asn".to_string());
    input.with_file_name(format!("{}_processed.xlsx", stem))
}

/// Splits an ASN sheet and writes the processed copy.
pub fn split_asn_file(
    input: &Path,
    settings: &dyn SettingsReader,
) -> AppResult<(PathBuf, usize, usize)> {
    let table = UniversalFileParser.parse(input)?;
    let rules = settings.asn_split_rules()?;
    let split = split_asn_rows(&table, &rules)?;

    let output = processed_path(input);
    write_workbook(&output, &[raw_sheet(&split)])?;
    info!(input = %input.display(), rows_in = table.len(), rows_out = split.len(), "ASN split written");
    Ok((output, table.len(), split.len()))
}

pub fn run_asn_menu(settings: &dyn SettingsReader, prompter: &mut dyn Prompter) -> AppResult<()> {
    let default = default_asn_path();
    let typed = prompter.prompt_text(&t_with_args(
        "asn.path",
        &[("default", &default.display().to_string())],
    ))?;
    let input = clean_path(&typed).unwrap_or(default);

    if !input.exists() {
        prompter.show(&t_with_args("asn.not_found", &[("path", &input.display().to_string())]));
        return Ok(());
    }

    let (output, rows_in, rows_out) = split_asn_file(&input, settings)?;
    prompter.show(&t_with_args(
        "asn.done",
        &[
            ("path", &output.display().to_string()),
            ("rows_in", &rows_in.to_string()),
            ("rows_out", &rows_out.to_string()),
        ],
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processed_path() {
        assert_eq!(
            processed_path(Path::new("/tmp/x.xlsx")),
            PathBuf::from("/tmp/x_processed.xlsx")
        );
    }
}
