// ==========================================
// Test helpers
// ==========================================
// Temporary data/output directories, fixture files,
// and reading generated workbooks back with calamine
// ==========================================
#![allow(dead_code)]

use calamine::{open_workbook_auto, Data, Reader};
use logistica_asn::config::ConfigManager;
use logistica_asn::db::{ensure_schema, open_sqlite_connection};
use logistica_asn::logging;
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::{NamedTempFile, TempDir};
use tracing_subscriber::fmt::MakeWriter;

/// Creates a temporary SQLite database with the schema applied.
///
/// # Returns
/// - NamedTempFile: keep it alive for the duration of the test
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    logging::init_test();
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("non UTF-8 temp path")?
        .to_string();
    let conn = open_sqlite_connection(&db_path)?;
    ensure_schema(&conn)?;
    Ok((temp_file, db_path))
}

/// Data + output directories under one TempDir.
pub struct TestWorkspace {
    pub dir: TempDir,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TestWorkspace {
    /// Also installs the test log subscriber.
    pub fn new() -> Self {
        logging::init_test();
        let dir = TempDir::new().expect("temp dir");
        let data_dir = dir.path().join("data");
        let output_dir = dir.path().join("output");
        fs::create_dir_all(&data_dir).expect("data dir");
        Self {
            dir,
            data_dir,
            output_dir,
        }
    }

    /// Settings stored in data/logistica.db.
    pub fn config(&self) -> ConfigManager {
        let db = self.data_dir.join("logistica.db");
        ConfigManager::new(db.to_str().expect("utf-8 path")).expect("config db")
    }

    /// Writes data/cajas.txt with two boxes.
    pub fn write_boxes(&self) -> PathBuf {
        let path = self.data_dir.join("cajas.txt");
        fs::write(
            &path,
            "# code | name | alto | largo | ancho\n\
             C1 | CAJA CHICA | 20 | 30 | 25\n\
             C2 | CAJA GRANDE | 40 | 60 | 50\n",
        )
        .expect("cajas.txt");
        path
    }

    /// Writes client_db.json and database_db.json.
    pub fn write_clients(&self) {
        fs::write(
            self.data_dir.join("client_db.json"),
            r#"[
  {"CodCliente": "61704000", "NomCliente": "CODELCO", "CodSucursal": "1", "NomSucursal": "CASA MATRIZ"},
  {"CodCliente": "78627210", "NomCliente": "HIPERMERCADOS TOTTUS S.A.", "CodSucursal": "10", "NomSucursal": "CD TOTTUS"},
  {"CodCliente": "96792430", "NomCliente": "SODIMAC S.A.", "CodSucursal": "20", "NomSucursal": "CD LO ESPEJO"}
]"#,
        )
        .expect("client_db.json");
        fs::write(
            self.data_dir.join("database_db.json"),
            r#"{"Owners": {"CSI": ["Codelco", "Collahuasi"], "JAL": ["Sodimac", "Tottus"]}}"#,
        )
        .expect("database_db.json");
    }

    /// Writes a CSV file under the workspace root.
    pub fn write_csv(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("csv");
        path
    }
}

/// WMS extract: L1 has two items, L2 and L3 one each.
pub const WMS_CSV: &str = "LPN,CodItem,NomItem,Unidades\n\
L1,1001,PERNO,3\n\
L1,1002,TUERCA,2\n\
L2,1001,PERNO,5\n\
L3,1003,GOLILLA,1\n";

/// Cell as text: numbers without a trailing ".0".
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// All rows of a sheet (header included) as text.
pub fn read_sheet(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let mut wb = open_workbook_auto(path).expect("open workbook");
    let range = wb.worksheet_range(sheet).expect("sheet");
    range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect()
}

/// Sheet names of a workbook, in order.
pub fn sheet_names(path: &Path) -> Vec<String> {
    let wb = open_workbook_auto(path).expect("open workbook");
    wb.sheet_names().to_vec()
}

// ==========================================
// Log capture
// ==========================================

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer")).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a WARN-level subscriber scoped to this thread and
/// returns its result together with the captured log text.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
