// ==========================================
// Logistica ASN - retail import process (Sodimac, Tottus)
// ==========================================
// Purchase-order extract -> output/JAL/importar <client>.xlsx
// An existing output file is reused as template (header order kept)
// ==========================================

use crate::clients::{ClientContext, ClientInput, ClientProcess, ProcessError, ProcessResult};
use crate::engine::retail_order::{build_retail_order, DateStyle, COL_LOGISTIC_UNITS};
use crate::export::sheets::retail_sheet;
use crate::export::xlsx_writer::{write_with_template, write_workbook};
use crate::i18n::{t, t_with_args};
use crate::prompt::Prompter;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

pub const RETAIL_OUTPUT_SUBDIR: &str = "JAL";

pub struct RetailProcess {
    name: &'static str,
}

impl RetailProcess {
    pub fn sodimac() -> Self {
        Self { name: "Sodimac" }
    }

    pub fn tottus() -> Self {
        Self { name: "Tottus" }
    }

    /// `output/JAL/importar <client>.xlsx`
    pub fn output_path(&self, output_dir: &std::path::Path) -> PathBuf {
        output_dir
            .join(RETAIL_OUTPUT_SUBDIR)
            .join(format!("importar {}.xlsx", self.name.to_lowercase()))
    }
}

impl ClientProcess for RetailProcess {
    fn name(&self) -> &str {
        self.name
    }

    #[instrument(skip_all, fields(client = self.name))]
    fn run(
        &self,
        ctx: &ClientContext<'_>,
        input: &ClientInput,
        prompter: &mut dyn Prompter,
    ) -> ProcessResult<Vec<PathBuf>> {
        let nro_orden_salida = prompter.prompt_no_spaces(&t("retail.orden_salida"))?;

        let index = ctx.settings.client_index(self.name)?.ok_or_else(|| {
            ProcessError::Config(format!("sin índice de cliente para {}", self.name))
        })?;
        let client = ctx.clients.client_at(index)?;
        info!(index, cod_cliente = %client.cod_cliente, "client record resolved");

        let order = build_retail_order(&input.wms, &client, &nro_orden_salida)?;
        match order.totals() {
            Some(totals) => prompter.show(&t_with_args(
                "retail.totals",
                &[
                    ("bultos", &format!("{:.0}", totals.bultos)),
                    ("units", &format!("{:.0}", totals.units)),
                ],
            )),
            None => prompter.show(&t_with_args(
                "retail.no_logistic_units",
                &[("column", COL_LOGISTIC_UNITS)],
            )),
        }

        let path = self.output_path(&ctx.output_dir);
        if path.exists() {
            write_with_template(&path, &retail_sheet(&order, DateStyle::Template))?;
            prompter.show(&t_with_args("retail.template_written", &[("client", self.name)]));
        } else {
            warn!(path = %path.display(), "import template not found, writing plain workbook");
            prompter.show(&t_with_args(
                "retail.template_missing",
                &[("path", &path.display().to_string())],
            ));
            write_workbook(&path, &[retail_sheet(&order, DateStyle::Plain)])?;
            prompter.show(&t_with_args(
                "output.file_written",
                &[("path", &path.display().to_string())],
            ));
        }

        info!(rows = order.len(), "retail import written");
        Ok(vec![path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_output_path() {
        let p = RetailProcess::tottus().output_path(Path::new("out"));
        assert_eq!(p, Path::new("out").join("JAL").join("importar tottus.xlsx"));
    }
}
