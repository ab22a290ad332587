// ==========================================
// Collahuasi process end-to-end tests
// ==========================================

mod test_helpers;

use logistica_asn::clients::collahuasi::{LABELS_FILE, SUMMARY_FILE};
use logistica_asn::clients::{process_for, run_client, ClientContext, ClientInput, ProcessOutcome};
use logistica_asn::importer::UniversalFileParser;
use logistica_asn::prompt::ScriptedPrompter;
use logistica_asn::repository::{
    BoxCatalogRepository, ItemCatalogRepository, JsonClientRepository, JsonItemCatalogRepository,
    PipeFileBoxCatalogRepository,
};
use test_helpers::{read_sheet, sheet_names, TestWorkspace, WMS_CSV};

fn input(ws: &TestWorkspace) -> ClientInput {
    let wms_path = ws.write_csv("wms.csv", WMS_CSV);
    ClientInput {
        wms: UniversalFileParser.parse(&wms_path).unwrap(),
        boxes: PipeFileBoxCatalogRepository::new(ws.write_boxes()).load().unwrap(),
    }
}

#[test]
fn test_collahuasi_full_run_with_restart_guides_and_labels() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    let items = JsonItemCatalogRepository::new(ws.data_dir.join("coditem_db.json"));
    let clients = JsonClientRepository::in_data_dir(&ws.data_dir);
    let ctx = ClientContext::new(&ws.output_dir, &config, &items, &clients);
    let input = input(&ws);

    let mut prompter = ScriptedPrompter::new([
        // pallet 1 = L2, no more pallets
        "1", "2", "300", "110", "100", "90", "2",
        // L1 (two lines) first, then L3 goes back: restart
        "8", "1", "2", "v",
        // second pass
        "1", "2", "300", "110", "100", "90", "2",
        "8", "1", "8.2", "1",
        // guide: NItem / NroParte for 1001, 1002, 1003
        "1", "10", "NP-1", "20", "NP-2", "30", "NP-3",
        // labels
        "1", "OC-1", "G-9", "ASN-5",
    ]);

    let process = process_for("collahuasi").unwrap();
    let outcome = run_client(process.as_ref(), &ctx, &input, &mut prompter).unwrap();
    assert_eq!(prompter.remaining(), 0);
    match outcome {
        ProcessOutcome::Completed { outputs } => assert_eq!(outputs.len(), 2),
        other => panic!("unexpected outcome {:?}", other),
    }

    let summary = ws.output_dir.join(SUMMARY_FILE);
    assert_eq!(sheet_names(&summary), vec!["Pallets", "Cajas", "ASN", "detalle"]);

    let pallets = read_sheet(&summary, "Pallets");
    assert_eq!(pallets[1], vec!["Pallet1", "L2", "300", "110", "100", "90"]);

    let boxes = read_sheet(&summary, "Cajas");
    assert_eq!(boxes.len(), 3);
    assert_eq!(boxes[1][0], "L1");
    assert_eq!(boxes[2][0], "L3");

    let asn = read_sheet(&summary, "ASN");
    assert_eq!(asn.len(), 3);
    assert_eq!(asn[1], vec!["CAJA CHICA", "2", "8.1", "20", "25", "30"]);
    assert_eq!(asn[2], vec!["Pallet", "1", "300", "110", "90", "100"]);

    assert_eq!(read_sheet(&summary, "detalle").len(), 5);

    let catalog = items.load().unwrap();
    assert_eq!(catalog.get("1002").unwrap().n_item, Some(20));
    assert_eq!(catalog.nro_parte("1003"), Some("NP-3"));
    assert!(prompter.saw("Guía Pallet1"));
    assert!(prompter.saw("Guía Bultos"));

    let labels = ws.output_dir.join(LABELS_FILE);
    let small = read_sheet(&labels, "etiqueta_peq");
    // L1: 2 items x 2 total labels + 5 unit labels; L2 and L3: 2 each
    assert_eq!(small.len(), 1 + 9 + 2 + 2);
    assert_eq!(small[1], vec!["OC-1", "10", "1001", "NP-1", "3", "L1"]);

    let large = read_sheet(&labels, "etiqueta_grande");
    assert_eq!(large.len(), 4);
    assert_eq!(large[1][6], "01 DE 02");
    assert_eq!(large[2][8], "L3");
    assert_eq!(large[3][6], "01 DE 01");
    assert_eq!(large[3][8], "Pallet1");
    assert_eq!(large[3][9], "PALLET");
    assert_eq!(large[1][1], "BODEGA ROSARIO");
}

#[test]
fn test_collahuasi_without_pallets_keeps_stored_numbers() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    let items = JsonItemCatalogRepository::new(ws.data_dir.join("coditem_db.json"));
    std::fs::write(
        items.path(),
        r#"{"1001": {"NomItem": "PERNO", "NItem": 1, "NroParte": "P1"},
            "1002": {"NomItem": "TUERCA", "NItem": 2, "NroParte": "P2"}}"#,
    )
    .unwrap();
    let clients = JsonClientRepository::in_data_dir(&ws.data_dir);
    let ctx = ClientContext::new(&ws.output_dir, &config, &items, &clients);
    let input = input(&ws);

    let mut prompter = ScriptedPrompter::new([
        "2",
        "1", "1", "2", "1", "3", "2",
        // guide: 1001 ok, 1002 corrected, 1003 new
        "1", "1", "2", "22", "P22", "3", "P3",
        // no labels
        "2",
    ]);
    let process = process_for("Collahuasi").unwrap();
    let outcome = run_client(process.as_ref(), &ctx, &input, &mut prompter).unwrap();
    assert!(matches!(outcome, ProcessOutcome::Completed { ref outputs } if outputs.len() == 1));

    let summary = ws.output_dir.join(SUMMARY_FILE);
    assert_eq!(sheet_names(&summary), vec!["Cajas", "ASN", "detalle"]);
    assert!(!ws.output_dir.join(LABELS_FILE).exists());

    let catalog = items.load().unwrap();
    assert_eq!(catalog.get("1001").unwrap().n_item, Some(1));
    assert_eq!(catalog.nro_parte("1002"), Some("P22"));
    assert_eq!(catalog.get("1003").unwrap().nom_item, "GOLILLA");
}

#[test]
fn test_collahuasi_exit_cancels() {
    let ws = TestWorkspace::new();
    let config = ws.config();
    let items = JsonItemCatalogRepository::new(ws.data_dir.join("coditem_db.json"));
    let clients = JsonClientRepository::in_data_dir(&ws.data_dir);
    let ctx = ClientContext::new(&ws.output_dir, &config, &items, &clients);
    let input = input(&ws);

    let mut prompter = ScriptedPrompter::new(["3"]);
    let process = process_for("collahuasi").unwrap();
    let outcome = run_client(process.as_ref(), &ctx, &input, &mut prompter).unwrap();
    assert_eq!(outcome, ProcessOutcome::Cancelled);
    assert!(!ws.output_dir.join(SUMMARY_FILE).exists());
}
