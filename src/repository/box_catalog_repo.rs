// ==========================================
// Logistica ASN - box catalog repository
// ==========================================
// Storage: data/cajas.txt, one box per line
//   code | name | alto | largo | ancho
// '#' lines are comments; malformed lines are skipped
// ==========================================

use crate::domain::catalog::{BoxCatalog, BoxType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

// ==========================================
// BoxCatalogRepository trait
// ==========================================
pub trait BoxCatalogRepository {
    /// Loads the catalog. A missing store yields an empty catalog.
    fn load(&self) -> RepositoryResult<BoxCatalog>;

    /// Replaces the stored catalog.
    fn save(&self, catalog: &BoxCatalog) -> RepositoryResult<()>;
}

// ==========================================
// PipeFileBoxCatalogRepository
// ==========================================
pub struct PipeFileBoxCatalogRepository {
    path: PathBuf,
}

impl PipeFileBoxCatalogRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses one `code | name | h | l | w` line.
fn parse_line(line: &str) -> Option<BoxType> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    let [code, name, height, length, width] = parts.as_slice() else {
        return None;
    };
    Some(BoxType {
        code: code.to_string(),
        name: name.to_string(),
        height_cm: height.parse().ok()?,
        length_cm: length.parse().ok()?,
        width_cm: width.parse().ok()?,
    })
}

fn format_line(b: &BoxType) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        b.code, b.name, b.height_cm, b.length_cm, b.width_cm
    )
}

impl BoxCatalogRepository for PipeFileBoxCatalogRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> RepositoryResult<BoxCatalog> {
        if !self.path.exists() {
            debug!("box catalog file not found, starting empty");
            return Ok(BoxCatalog::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| RepositoryError::io(&self.path, e))?;

        let mut boxes = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Some(b) => boxes.push(b),
                None => warn!(line = idx + 1, "skipping malformed box line"),
            }
        }

        debug!(boxes = boxes.len(), "box catalog loaded");
        Ok(BoxCatalog::new(boxes))
    }

    #[instrument(skip(self, catalog), fields(path = %self.path.display(), boxes = catalog.len()))]
    fn save(&self, catalog: &BoxCatalog) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| RepositoryError::io(parent, e))?;
        }
        let mut content = String::new();
        for b in catalog.boxes() {
            content.push_str(&format_line(b));
            content.push('\n');
        }
        fs::write(&self.path, content).map_err(|e| RepositoryError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_skips_comments_and_invalid_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cajas.txt");
        fs::write(
            &path,
            "# codigo | nombre | alto | largo | ancho\nC1 | CAJA CHICA | 20 | 30 | 40\n\nC2 | SIN MEDIDAS\nC3 | MALA | x | 1 | 1\nC4|GRANDE|50|60|70\n",
        )
        .unwrap();

        let catalog = PipeFileBoxCatalogRepository::new(&path).load().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.boxes()[0].name, "CAJA CHICA");
        assert_eq!(catalog.boxes()[1].width_cm, 70.0);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let repo = PipeFileBoxCatalogRepository::new(dir.path().join("cajas.txt"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = PipeFileBoxCatalogRepository::new(dir.path().join("data").join("cajas.txt"));
        let mut catalog = BoxCatalog::default();
        catalog.add(BoxType {
            code: "C9".to_string(),
            name: "TUBO".to_string(),
            height_cm: 10.0,
            length_cm: 120.0,
            width_cm: 10.5,
        });
        repo.save(&catalog).unwrap();

        let text = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(text, "C9 | TUBO | 10 | 120 | 10.5\n");
        assert_eq!(repo.load().unwrap(), catalog);
    }
}
