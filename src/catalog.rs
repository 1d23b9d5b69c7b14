/*
 * Copyright (C) 2025 The PharmaStudy Authors
 *
 * This file is part of PharmaStudy.
 *
 * PharmaStudy is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * PharmaStudy is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with PharmaStudy.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::{
    ffi::OsStr,
    fmt::{Debug, Display},
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

///The kind of study item. Closed set; every consumer matches exhaustively.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Molecule,
    Enzyme,
    Medication,
}

impl ItemType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Molecule => "molecule",
            Self::Enzyme => "enzyme",
            Self::Medication => "medication",
        }
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();

        if s == "molecule" {
            Ok(Self::Molecule)
        } else if s == "enzyme" {
            Ok(Self::Enzyme)
        } else if s == "medication" {
            Ok(Self::Medication)
        } else {
            Err(format!("Item type not recognized: {s}"))
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

///A single flashcard/quiz atom. The descriptive fields are opaque to the
///session core; only `name` participates in quiz answer synthesis.
///
///Example:
///```
///# use pharmastudy::catalog::StudyItem;
///let json = r#"{
///  "id": "item-1",
///  "topic_id": "topic-1",
///  "type": "medication",
///  "name": "Aspirin",
///  "mechanism_description": "Irreversible COX inhibition"
///}"#;
///assert!(serde_json::from_str::<StudyItem>(json)
///  .is_ok_and(|item| item.name == "Aspirin"));
///```
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct StudyItem {
    pub id: String,
    pub topic_id: String,
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<String>,
}

///Belongs to exactly one chapter; `order_index` orders siblings.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Topic {
    pub id: String,
    pub chapter_id: String,
    pub title: String,
    #[serde(default)]
    pub order_index: i64,
}

///Top-level grouping. `color` is a display hex string, opaque to the core.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Serialize, Deserialize, Default)]
pub struct Catalog {
    pub chapters: Vec<Chapter>,
    pub topics: Vec<Topic>,
    pub items: Vec<StudyItem>,
}

impl Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("chapters", &self.chapters.len())
            .field("topics", &self.topics.len())
            .field("items", &self.items.len())
            .finish()
    }
}

impl Catalog {
    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|chapter| chapter.id == id)
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == id)
    }

    ///Topics of a chapter, in their explicit sibling order.
    pub fn topics_of(&self, chapter_id: &str) -> Vec<&Topic> {
        let mut topics = self
            .topics
            .iter()
            .filter(|topic| topic.chapter_id == chapter_id)
            .collect::<Vec<_>>();
        topics.sort_by_key(|topic| topic.order_index);
        topics
    }

    fn merge(&mut self, other: Catalog) {
        self.chapters.extend(other.chapters);
        self.topics.extend(other.topics);
        self.items.extend(other.items);
    }
}

#[derive(Debug)]
pub enum CatalogError {
    IoError(PathBuf, std::io::Error),
    SerdeError(PathBuf, serde_json::Error),
    DuplicateId(String),
    UnknownChapter { topic: String, chapter: String },
    UnknownTopic { item: String, topic: String },
    EmptyItemName(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(path, err) => f.write_fmt(format_args!(
                "IoError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::SerdeError(path, err) => f.write_fmt(format_args!(
                "SerdeError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::DuplicateId(id) => f.write_fmt(format_args!(
                "DuplicateId: At least two catalog entries share the id \"{id}\""
            )),
            Self::UnknownChapter { topic, chapter } => f.write_fmt(format_args!(
                "UnknownChapter: Topic \"{topic}\" references chapter \"{chapter}\", which does not exist"
            )),
            Self::UnknownTopic { item, topic } => f.write_fmt(format_args!(
                "UnknownTopic: Item \"{item}\" references topic \"{topic}\", which does not exist"
            )),
            Self::EmptyItemName(id) => {
                f.write_fmt(format_args!("EmptyItemName: Item \"{id}\" has an empty name"))
            }
        }
    }
}

pub fn load_catalog<P: Into<PathBuf>>(
    paths: impl IntoIterator<Item = P>,
) -> Result<Catalog, CatalogError> {
    let catalog = paths
        .into_iter()
        .try_fold(Catalog::default(), |mut catalog, path| {
            if let Some(loaded) = load_catalog_from_path(path.into())? {
                catalog.merge(loaded);
            }
            Ok(catalog)
        })?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn load_catalog_from_path(path: PathBuf) -> Result<Option<Catalog>, CatalogError> {
    let metadata =
        std::fs::metadata(&path).map_err(|err| CatalogError::IoError(path.clone(), err))?;

    if metadata.is_dir() {
        load_catalog_from_dir(path).map(Some)
    } else if file_extension(&path).is_some_and(|ext| ext.to_lowercase() == "json") {
        load_catalog_from_file(path).map(Some)
    } else {
        Ok(None)
    }
}

fn file_extension(path: &PathBuf) -> Option<&str> {
    let path = Path::new(path);
    path.extension().and_then(OsStr::to_str)
}

fn load_catalog_from_dir(path: PathBuf) -> Result<Catalog, CatalogError> {
    let files = fs::read_dir(&path)
        .map_err(|err| CatalogError::IoError(path, err))?
        .filter_map(|file| file.ok())
        .collect::<Vec<_>>();

    files
        .into_iter()
        .try_fold(Catalog::default(), |mut catalog, file| {
            if let Some(loaded) = load_catalog_from_path(file.path())? {
                catalog.merge(loaded);
            }
            Ok(catalog)
        })
}

fn load_catalog_from_file(path: PathBuf) -> Result<Catalog, CatalogError> {
    let json =
        std::fs::read_to_string(&path).map_err(|err| CatalogError::IoError(path.clone(), err))?;
    serde_json::from_str(&json).map_err(|err| CatalogError::SerdeError(path, err))
}

fn validate_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::new();

    let ids = catalog
        .chapters
        .iter()
        .map(|chapter| &chapter.id)
        .chain(catalog.topics.iter().map(|topic| &topic.id))
        .chain(catalog.items.iter().map(|item| &item.id));

    for id in ids {
        if !seen_ids.insert(id) {
            return Err(CatalogError::DuplicateId(id.clone()));
        }
    }

    if let Some(topic) = catalog
        .topics
        .iter()
        .find(|topic| catalog.chapter(&topic.chapter_id).is_none())
    {
        return Err(CatalogError::UnknownChapter {
            topic: topic.id.clone(),
            chapter: topic.chapter_id.clone(),
        });
    }

    if let Some(item) = catalog
        .items
        .iter()
        .find(|item| catalog.topic(&item.topic_id).is_none())
    {
        return Err(CatalogError::UnknownTopic {
            item: item.id.clone(),
            topic: item.topic_id.clone(),
        });
    }

    if let Some(item) = catalog.items.iter().find(|item| item.name.is_empty()) {
        return Err(CatalogError::EmptyItemName(item.id.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_catalog, Catalog, CatalogError, ItemType};

    #[test]
    fn deserialize_catalog() {
        let json = r##"
        {
            "chapters": [
                { "id": "ch-1", "title": "Autonomic Pharmacology", "color": "#0070a0" }
            ],
            "topics": [
                { "id": "tp-1", "chapter_id": "ch-1", "title": "Cholinergics", "order_index": 0 }
            ],
            "items": [
                {
                    "id": "it-1",
                    "topic_id": "tp-1",
                    "type": "medication",
                    "name": "Atropine",
                    "uses": "Bradycardia, organophosphate poisoning"
                }
            ]
        }"##;

        let catalog: Catalog =
            serde_json::from_str(json).expect("Unable to parse catalog from example string");
        assert_eq!(catalog.chapters.len(), 1);
        assert_eq!(catalog.chapters[0].color.as_deref(), Some("#0070a0"));
        assert_eq!(catalog.topics.len(), 1);
        assert_eq!(catalog.items.len(), 1);
        assert_eq!(catalog.items[0].kind, ItemType::Medication);
        assert!(catalog.items[0].description.is_none());
    }

    #[test]
    fn load_catalog_from_files() {
        let catalog = load_catalog(vec!["./tests/catalog.json", "./tests/dir"])
            .expect("Unable to load catalogs from files");
        assert_eq!(catalog.chapters.len(), 3);
        assert!(catalog.items.len() >= 7);
    }

    #[test]
    fn load_catalog_from_non_catalog_file() {
        let catalog = load_catalog(vec!["./tests/dir/notes.txt"])
            .expect("Unable to load catalog from random file");
        assert!(catalog.items.is_empty());
    }

    #[test]
    fn topics_ordered_by_index() {
        let catalog =
            load_catalog(vec!["./tests/catalog.json"]).expect("Unable to load test catalog");
        let topics = catalog.topics_of("ch-pk");
        assert!(topics
            .windows(2)
            .all(|pair| pair[0].order_index <= pair[1].order_index));
    }

    #[test]
    fn load_catalog_duplicate_ids() {
        assert!(load_catalog(vec!["./tests/duplicate_ids.json"])
            .is_err_and(|err| matches!(err, CatalogError::DuplicateId(_))));
    }

    #[test]
    fn load_catalog_unknown_topic() {
        assert!(load_catalog(vec!["./tests/unknown_topic.json"])
            .is_err_and(|err| matches!(err, CatalogError::UnknownTopic { .. })));
    }

    #[test]
    fn load_catalog_empty_item_name() {
        assert!(load_catalog(vec!["./tests/empty_name.json"])
            .is_err_and(|err| matches!(err, CatalogError::EmptyItemName(_))));
    }

    #[test]
    fn item_type_from_str() {
        assert_eq!("Molecule".parse::<ItemType>(), Ok(ItemType::Molecule));
        assert_eq!("enzyme".parse::<ItemType>(), Ok(ItemType::Enzyme));
        assert!("vitamin".parse::<ItemType>().is_err());
    }
}
