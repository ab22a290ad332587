// ==========================================
// Sodimac / Tottus import and ASN split tests
// ==========================================

mod test_helpers;

use logistica_asn::app::asn_menu::split_asn_file;
use logistica_asn::clients::retail::RetailProcess;
use logistica_asn::clients::{process_for, run_client, ClientContext, ClientInput, ProcessOutcome};
use logistica_asn::domain::catalog::BoxCatalog;
use logistica_asn::export::xlsx_writer::{write_workbook, SheetTable};
use logistica_asn::importer::UniversalFileParser;
use logistica_asn::prompt::ScriptedPrompter;
use logistica_asn::repository::{JsonClientRepository, JsonItemCatalogRepository};
use test_helpers::{read_sheet, sheet_names, TestWorkspace};

const ORDER_CSV: &str = "Número OC,Tax id proveedor,Razón social,Fecha de emisión,Fecha fin recepción,SKU,Unidades compradas,Unidades dimensión logística\n\
OC-501,76000000-1,CSI SPA,05-03-2024,12-03-2024,3650138.0,12,6\n\
OC-501,76000000-1,CSI SPA,05-03-2024,12-03-2024,7641117,8,4\n";

fn order_input(ws: &TestWorkspace) -> ClientInput {
    let path = ws.write_csv("orden.csv", ORDER_CSV);
    ClientInput {
        wms: UniversalFileParser.parse(&path).unwrap(),
        boxes: BoxCatalog::default(),
    }
}

#[test]
fn test_sodimac_writes_plain_workbook() {
    let ws = TestWorkspace::new();
    ws.write_clients();
    let config = ws.config();
    let items = JsonItemCatalogRepository::new(ws.data_dir.join("coditem_db.json"));
    let clients = JsonClientRepository::in_data_dir(&ws.data_dir);
    let ctx = ClientContext::new(&ws.output_dir, &config, &items, &clients);
    let input = order_input(&ws);

    let mut prompter = ScriptedPrompter::new(["SAL-77"]);
    let process = process_for("sodimac").unwrap();
    let outcome = run_client(process.as_ref(), &ctx, &input, &mut prompter).unwrap();

    let path = RetailProcess::sodimac().output_path(&ws.output_dir);
    assert_eq!(
        outcome,
        ProcessOutcome::Completed {
            outputs: vec![path.clone()]
        }
    );
    // 4 bultos (12/6 + 8/4), 20 units
    assert!(prompter.saw("4"));
    assert!(prompter.saw("20"));

    let rows = read_sheet(&path, "Sheet1");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].len(), 28);
    assert_eq!(rows[0][27], "Bultos");
    assert_eq!(rows[1][0], "OC-501");
    assert_eq!(rows[1][2], "96792430");
    assert_eq!(rows[1][3], "SODIMAC S.A.");
    assert_eq!(rows[1][6], "2024-03-05 00:00:00");
    assert_eq!(rows[1][7], "2024-03-12 00:00:00");
    assert_eq!(rows[1][18], "3650138");
    assert_eq!(rows[1][19], "12");
    assert_eq!(rows[1][25], "SAL-77");
    assert_eq!(rows[1][27], "2");
    assert_eq!(rows[2][27], "2");
}

#[test]
fn test_tottus_reuses_existing_template() {
    let ws = TestWorkspace::new();
    ws.write_clients();
    let config = ws.config();
    let items = JsonItemCatalogRepository::new(ws.data_dir.join("coditem_db.json"));
    let clients = JsonClientRepository::in_data_dir(&ws.data_dir);
    let ctx = ClientContext::new(&ws.output_dir, &config, &items, &clients);
    let input = order_input(&ws);

    let path = RetailProcess::tottus().output_path(&ws.output_dir);
    let template = SheetTable::new(
        "Hoja1",
        &["SKU Item", "FechaEmision", "CodCliente", "NroOrdenSalida", "Observacion"],
    );
    write_workbook(&path, &[template]).unwrap();

    let mut prompter = ScriptedPrompter::new(["SAL-78"]);
    let process = process_for("Tottus").unwrap();
    run_client(process.as_ref(), &ctx, &input, &mut prompter).unwrap();

    assert_eq!(sheet_names(&path), vec!["Hoja1"]);
    let rows = read_sheet(&path, "Hoja1");
    assert_eq!(
        rows[0],
        vec!["SKU Item", "FechaEmision", "CodCliente", "NroOrdenSalida", "Observacion"]
    );
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], "3650138");
    assert_eq!(rows[1][1], "20240305");
    assert_eq!(rows[1][2], "78627210");
    assert_eq!(rows[2][3], "SAL-78");
}

#[test]
fn test_retail_missing_column_fails() {
    let ws = TestWorkspace::new();
    ws.write_clients();
    let config = ws.config();
    let items = JsonItemCatalogRepository::new(ws.data_dir.join("coditem_db.json"));
    let clients = JsonClientRepository::in_data_dir(&ws.data_dir);
    let ctx = ClientContext::new(&ws.output_dir, &config, &items, &clients);
    let path = ws.write_csv("orden.csv", "Número OC,SKU\nOC-1,1\n");
    let input = ClientInput {
        wms: UniversalFileParser.parse(&path).unwrap(),
        boxes: BoxCatalog::default(),
    };

    let mut prompter = ScriptedPrompter::new(["SAL-1"]);
    let process = process_for("sodimac").unwrap();
    assert!(run_client(process.as_ref(), &ctx, &input, &mut prompter).is_err());
    assert!(!RetailProcess::sodimac().output_path(&ws.output_dir).exists());
}

#[test]
fn test_split_asn_file_writes_processed_copy() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    let input = ws.write_csv(
        "asn.csv",
        "SKU,Unidades a despachar,CantidadSolicitada,Unidades dimensión logística\n\
         3650138,5,10,5\n\
         999,7,7,7\n",
    );

    let (output, rows_in, rows_out) = split_asn_file(&input, &config).unwrap();
    assert_eq!(output, ws.dir.path().join("asn_processed.xlsx"));
    assert_eq!((rows_in, rows_out), (2, 4));

    let rows = read_sheet(&output, "Sheet1");
    assert_eq!(rows[0].last().map(String::as_str), Some("Bultos"));
    let units: Vec<&str> = rows[1..].iter().map(|r| r[1].as_str()).collect();
    assert_eq!(units, vec!["2", "2", "1", "7"]);
    assert_eq!(rows[4][0], "999");
    assert_eq!(rows[1][4], "2");
    assert_eq!(rows[4][4], "1");
}
