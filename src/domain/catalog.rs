// ==========================================
// Logistica ASN - catalog domain model
// ==========================================
// Boxes (cajas.txt), items (coditem_db), clients (client_db / database_db)
// ==========================================

use crate::domain::order::WmsLine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// BoxType - a registered box format
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxType {
    pub code: String,
    pub name: String,
    pub height_cm: f64,
    pub length_cm: f64,
    pub width_cm: f64,
}

impl BoxType {
    /// "NAME - HxLxW", as shown in box selection menus.
    pub fn menu_label(&self) -> String {
        format!(
            "{} - {}x{}x{}",
            self.name, self.height_cm, self.length_cm, self.width_cm
        )
    }
}

/// Partial update for a box. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxChanges {
    pub name: Option<String>,
    pub height_cm: Option<f64>,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
}

impl BoxChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.height_cm.is_none()
            && self.length_cm.is_none()
            && self.width_cm.is_none()
    }
}

// ==========================================
// BoxCatalog - ordered list of boxes
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxCatalog {
    boxes: Vec<BoxType>,
}

impl BoxCatalog {
    pub fn new(boxes: Vec<BoxType>) -> Self {
        Self { boxes }
    }

    pub fn boxes(&self) -> &[BoxType] {
        &self.boxes
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Boxes sorted by code (menu order).
    pub fn sorted_by_code(&self) -> Vec<BoxType> {
        let mut sorted = self.boxes.clone();
        sorted.sort_by(|a, b| a.code.cmp(&b.code));
        sorted
    }

    pub fn find(&self, code: &str) -> Option<&BoxType> {
        self.boxes.iter().find(|b| b.code == code)
    }

    pub fn add(&mut self, box_type: BoxType) {
        self.boxes.push(box_type);
    }

    /// Applies changes to the box with `code`. Returns false when not found.
    pub fn edit(&mut self, code: &str, changes: &BoxChanges) -> bool {
        let Some(target) = self.boxes.iter_mut().find(|b| b.code == code) else {
            return false;
        };
        if let Some(name) = &changes.name {
            target.name = name.clone();
        }
        if let Some(h) = changes.height_cm {
            target.height_cm = h;
        }
        if let Some(l) = changes.length_cm {
            target.length_cm = l;
        }
        if let Some(w) = changes.width_cm {
            target.width_cm = w;
        }
        true
    }

    /// Removes the first box with `code`. Returns false when not found.
    pub fn remove(&mut self, code: &str) -> bool {
        match self.boxes.iter().position(|b| b.code == code) {
            Some(idx) => {
                self.boxes.remove(idx);
                true
            }
            None => false,
        }
    }
}

// ==========================================
// ItemRecord - per-CodItem metadata
// ==========================================
// JSON field names follow coditem_db.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "NomItem", default)]
    pub nom_item: String,
    #[serde(rename = "Material", default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(rename = "NItem", default, skip_serializing_if = "Option::is_none")]
    pub n_item: Option<i64>,
    #[serde(rename = "NroParte", default, skip_serializing_if = "Option::is_none")]
    pub nro_parte: Option<String>,
}

// ==========================================
// ItemCatalog - CodItem -> ItemRecord
// ==========================================
// Keys are always the textual CodItem ("123", never 123.0)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCatalog {
    items: BTreeMap<String, ItemRecord>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cod_item: &str) -> Option<&ItemRecord> {
        self.items.get(cod_item)
    }

    pub fn get_mut(&mut self, cod_item: &str) -> Option<&mut ItemRecord> {
        self.items.get_mut(cod_item)
    }

    pub fn contains(&self, cod_item: &str) -> bool {
        self.items.contains_key(cod_item)
    }

    pub fn upsert(&mut self, cod_item: impl Into<String>, record: ItemRecord) {
        self.items.insert(cod_item.into(), record);
    }

    /// Entry for `cod_item`, created empty when missing.
    pub fn entry(&mut self, cod_item: &str) -> &mut ItemRecord {
        self.items.entry(cod_item.to_string()).or_default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ItemRecord)> {
        self.items.iter()
    }

    /// NomItem for a material: the record keyed by it, else the first record
    /// whose Material equals it.
    pub fn nom_item_for_material(&self, material: &str) -> Option<&str> {
        if let Some(record) = self.items.get(material) {
            return Some(record.nom_item.as_str());
        }
        self.items
            .values()
            .find(|r| r.material.as_deref() == Some(material))
            .map(|r| r.nom_item.as_str())
    }

    /// NroParte of the given CodItem when known.
    pub fn nro_parte(&self, cod_item: &str) -> Option<&str> {
        self.items
            .get(cod_item)
            .and_then(|r| r.nro_parte.as_deref())
    }

    /// Adds the CodItems of the extract that are not catalogued yet.
    ///
    /// Each new record takes the first non-empty NomItem seen for its CodItem.
    /// Running it twice over the same lines adds nothing the second time.
    ///
    /// # Returns
    /// The CodItems added, in extract order.
    pub fn merge_new_items(&mut self, lines: &[WmsLine]) -> Vec<String> {
        let mut added: Vec<String> = Vec::new();
        for line in lines {
            if self.items.contains_key(&line.cod_item) {
                if added.contains(&line.cod_item) {
                    let record = self.entry(&line.cod_item);
                    if record.nom_item.is_empty() {
                        record.nom_item = line.nom_item.clone();
                    }
                }
                continue;
            }
            self.items.insert(
                line.cod_item.clone(),
                ItemRecord {
                    nom_item: line.nom_item.clone(),
                    ..Default::default()
                },
            );
            added.push(line.cod_item.clone());
        }
        added
    }

    /// Refreshes the stored NomItem. Returns true when it changed.
    pub fn refresh_nom_item(&mut self, cod_item: &str, nom_item: &str) -> bool {
        let record = self.entry(cod_item);
        if record.nom_item == nom_item {
            return false;
        }
        record.nom_item = nom_item.to_string();
        true
    }
}

// ==========================================
// ClientRecord - client_db.json entry
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(rename = "CodCliente", default)]
    pub cod_cliente: String,
    #[serde(rename = "NomCliente", default)]
    pub nom_cliente: String,
    #[serde(rename = "CodSucursal", default)]
    pub cod_sucursal: String,
    #[serde(rename = "NomSucursal", default)]
    pub nom_sucursal: String,
}

// ==========================================
// OwnerDirectory - database_db.json
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnerDirectory {
    #[serde(rename = "Owners", default)]
    pub owners: BTreeMap<String, Vec<String>>,
}

impl OwnerDirectory {
    pub fn owner_names(&self) -> Vec<String> {
        self.owners.keys().cloned().collect()
    }

    pub fn clients_of(&self, owner: &str) -> &[String] {
        self.owners.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caja(code: &str, name: &str) -> BoxType {
        BoxType {
            code: code.to_string(),
            name: name.to_string(),
            height_cm: 30.0,
            length_cm: 40.0,
            width_cm: 50.0,
        }
    }

    #[test]
    fn test_box_catalog_edit_and_remove() {
        let mut catalog = BoxCatalog::new(vec![caja("B", "Mediana"), caja("A", "Chica")]);
        let changes = BoxChanges {
            height_cm: Some(35.5),
            ..Default::default()
        };
        assert!(catalog.edit("A", &changes));
        assert_eq!(catalog.find("A").unwrap().height_cm, 35.5);
        assert_eq!(catalog.find("A").unwrap().name, "Chica");
        assert!(!catalog.edit("Z", &changes));

        assert_eq!(catalog.sorted_by_code()[0].code, "A");
        assert!(catalog.remove("B"));
        assert!(!catalog.remove("B"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_item_catalog_json_shape() {
        let raw = r#"{"1001": {"NomItem": "PERNO", "Material": "M-1", "NItem": 10, "NroParte": "NP-9"}, "1002": {"NomItem": "TUERCA"}}"#;
        let catalog: ItemCatalog = serde_json::from_str(raw).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("1001").unwrap().n_item, Some(10));
        assert_eq!(catalog.get("1002").unwrap().material, None);

        let out = serde_json::to_value(&catalog).unwrap();
        assert!(out["1002"].get("Material").is_none());
    }

    #[test]
    fn test_merge_new_items_is_idempotent() {
        let line = |cod: &str, nom: &str| WmsLine {
            lpn: "L1".to_string(),
            cod_item: cod.to_string(),
            nom_item: nom.to_string(),
            units: 1,
        };
        let lines = vec![line("1", ""), line("1", "PERNO"), line("2", "TUERCA"), line("3", "ARANDELA")];
        let mut catalog = ItemCatalog::new();
        catalog.upsert(
            "3",
            ItemRecord {
                nom_item: "ARANDELA".to_string(),
                material: Some("M3".to_string()),
                ..Default::default()
            },
        );

        let added = catalog.merge_new_items(&lines);
        assert_eq!(added, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(catalog.get("1").unwrap().nom_item, "PERNO");
        assert_eq!(catalog.get("3").unwrap().material.as_deref(), Some("M3"));

        let snapshot = catalog.clone();
        assert!(catalog.merge_new_items(&lines).is_empty());
        assert_eq!(catalog, snapshot);
    }

    #[test]
    fn test_nom_item_for_material_falls_back_to_material_field() {
        let mut catalog = ItemCatalog::new();
        catalog.upsert(
            "1001",
            ItemRecord {
                nom_item: "PERNO".to_string(),
                material: Some("MAT-7".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(catalog.nom_item_for_material("1001"), Some("PERNO"));
        assert_eq!(catalog.nom_item_for_material("MAT-7"), Some("PERNO"));
        assert_eq!(catalog.nom_item_for_material("X"), None);
    }
}
