use hashbrown::HashSet;

use crate::catalog::{ItemType, StudyItem, Topic};

///Narrows the item pool for a session. `None` fields mean "all", matching
///the selector defaults in the UI layer. Filters compose as a logical AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub chapter: Option<String>,
    pub topic: Option<String>,
    pub kind: Option<ItemType>,
}

impl SessionFilter {
    pub fn chapter(mut self, id: impl Into<String>) -> Self {
        self.chapter = Some(id.into());
        self
    }

    pub fn topic(mut self, id: impl Into<String>) -> Self {
        self.topic = Some(id.into());
        self
    }

    pub fn kind(mut self, kind: ItemType) -> Self {
        self.kind = Some(kind);
        self
    }
}

///Derives the working subset of `items` in pool insertion order.
///
///Chapter narrowing resolves transitively: items only reference topics, so
///the chapter filter first collects the ids of topics belonging to that
///chapter and keeps items whose topic is among them. An empty result is a
///valid outcome, reported to the caller rather than treated as an error.
pub fn filter_items(items: &[StudyItem], topics: &[Topic], filter: &SessionFilter) -> Vec<StudyItem> {
    let chapter_topics: Option<HashSet<&str>> = filter.chapter.as_ref().map(|chapter_id| {
        topics
            .iter()
            .filter(|topic| topic.chapter_id == *chapter_id)
            .map(|topic| topic.id.as_str())
            .collect()
    });

    items
        .iter()
        .filter(|item| {
            chapter_topics
                .as_ref()
                .map(|ids| ids.contains(item.topic_id.as_str()))
                .unwrap_or(true)
        })
        .filter(|item| {
            filter
                .topic
                .as_ref()
                .map(|topic_id| item.topic_id == *topic_id)
                .unwrap_or(true)
        })
        .filter(|item| filter.kind.map(|kind| item.kind == kind).unwrap_or(true))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{catalog::ItemType, test_support::pool};

    use super::{filter_items, SessionFilter};

    #[test]
    fn no_filter_keeps_everything_in_order() {
        let (items, topics) = pool();
        let filtered = filter_items(&items, &topics, &SessionFilter::default());
        assert_eq!(filtered, items);
    }

    #[test]
    fn chapter_filter_resolves_topic_membership() {
        let (items, topics) = pool();
        let filtered = filter_items(&items, &topics, &SessionFilter::default().chapter("ch-1"));
        assert_eq!(
            filtered.iter().map(|item| item.id.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn filters_compose_as_and() {
        let (items, topics) = pool();
        let filter = SessionFilter::default()
            .chapter("ch-1")
            .topic("tp-1")
            .kind(ItemType::Enzyme);
        let filtered = filter_items(&items, &topics, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "b");
    }

    #[test]
    fn subset_agrees_with_manual_refilter() {
        let (items, topics) = pool();
        let filter = SessionFilter::default().kind(ItemType::Molecule);
        let filtered = filter_items(&items, &topics, &filter);

        assert!(filtered.iter().all(|f| items.contains(f)));
        assert!(filtered.iter().all(|f| f.kind == ItemType::Molecule));
        assert_eq!(
            filtered.len(),
            items.iter().filter(|i| i.kind == ItemType::Molecule).count()
        );
    }

    #[test]
    fn empty_result_is_valid() {
        let (items, topics) = pool();
        let filter = SessionFilter::default().topic("tp-3").kind(ItemType::Medication);
        assert!(filter_items(&items, &topics, &filter).is_empty());
    }

    #[test]
    fn unknown_chapter_yields_empty() {
        let (items, topics) = pool();
        let filter = SessionFilter::default().chapter("ch-404");
        assert!(filter_items(&items, &topics, &filter).is_empty());
    }
}
