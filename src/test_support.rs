//! Constructors shared by the session and filter tests.

use crate::catalog::{ItemType, StudyItem, Topic};

pub(crate) fn item(id: &str, topic_id: &str, kind: ItemType, name: &str) -> StudyItem {
    StudyItem {
        id: id.to_owned(),
        topic_id: topic_id.to_owned(),
        kind,
        name: name.to_owned(),
        description: None,
        image_url: None,
        structure_description: None,
        mechanism_description: None,
        uses: None,
        effects: None,
    }
}

pub(crate) fn topic(id: &str, chapter_id: &str, order_index: i64) -> Topic {
    Topic {
        id: id.to_owned(),
        chapter_id: chapter_id.to_owned(),
        title: id.to_owned(),
        order_index,
    }
}

///Five-item mixed-type pool over two chapters, the shape most session
///tests want.
pub(crate) fn pool() -> (Vec<StudyItem>, Vec<Topic>) {
    let topics = vec![
        topic("tp-1", "ch-1", 0),
        topic("tp-2", "ch-1", 1),
        topic("tp-3", "ch-2", 0),
    ];
    let items = vec![
        item("a", "tp-1", ItemType::Molecule, "Acetylcholine"),
        item("b", "tp-1", ItemType::Enzyme, "Acetylcholinesterase"),
        item("c", "tp-2", ItemType::Medication, "Atropine"),
        item("d", "tp-3", ItemType::Molecule, "Dopamine"),
        item("e", "tp-3", ItemType::Enzyme, "CYP2C9"),
    ];
    (items, topics)
}
