use crate::annotation_sets::AnnotationSetStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::documents::DocumentStore;
use crate::error::Result;
use crate::model::{AnnotationSet, Document};
use crate::store::KeyValueStore;

/// Sets whose document no longer exists. Removing a document never removes
/// its sets, so these accumulate until pruned.
pub fn find_orphans<'a>(
    sets: &'a [AnnotationSet],
    documents: &[Document],
) -> Vec<&'a AnnotationSet> {
    sets.iter()
        .filter(|set| !documents.iter().any(|doc| doc.id == set.document_id))
        .collect()
}

pub fn run<S: KeyValueStore>(
    kv: &mut S,
    documents: &DocumentStore,
    sets: &mut AnnotationSetStore,
    prune: bool,
) -> Result<CmdResult> {
    let orphans: Vec<AnnotationSet> = find_orphans(sets.all_sets(), documents.documents())
        .into_iter()
        .cloned()
        .collect();
    let mut result = CmdResult::default();

    if orphans.is_empty() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    }

    if prune {
        for orphan in &orphans {
            sets.remove_annotation_set(kv, &orphan.id)?;
        }
        result.add_message(CmdMessage::success(format!(
            "Removed {} orphaned annotation set(s).",
            orphans.len()
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Found {} annotation set(s) whose document no longer exists:",
            orphans.len()
        )));
        for orphan in &orphans {
            result.add_message(CmdMessage::info(format!(
                "  - {} ({}), document {}",
                orphan.name, orphan.id, orphan.document_id
            )));
        }
        result.add_message(CmdMessage::info("Run `craic doctor --prune` to remove them."));
    }
    result.affected_sets = orphans;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn stores(kv: &InMemoryStore) -> (DocumentStore, AnnotationSetStore) {
        (
            DocumentStore::open(kv, "documents").unwrap(),
            AnnotationSetStore::open(kv, "annotationSets", None).unwrap(),
        )
    }

    #[test]
    fn clean_store_reports_nothing() {
        let mut kv = StoreFixture::new()
            .with_document("d1", "a.md", "hello")
            .with_set("s1", "d1", "Set 1")
            .build();
        let (docs, mut sets) = stores(&kv);

        let result = run(&mut kv, &docs, &mut sets, false).unwrap();

        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("No inconsistencies"));
    }

    #[test]
    fn reports_orphans_without_removing() {
        let mut kv = StoreFixture::new()
            .with_document("d1", "a.md", "hello")
            .with_set("s1", "d1", "Kept")
            .with_set("s2", "gone", "Orphan")
            .build();
        let (docs, mut sets) = stores(&kv);

        let result = run(&mut kv, &docs, &mut sets, false).unwrap();

        assert_eq!(result.affected_sets.len(), 1);
        assert_eq!(result.affected_sets[0].id, "s2");
        assert_eq!(sets.all_sets().len(), 2);
    }

    #[test]
    fn prune_removes_only_orphans() {
        let mut kv = StoreFixture::new()
            .with_document("d1", "a.md", "hello")
            .with_set("s1", "d1", "Kept")
            .with_set("s2", "gone", "Orphan")
            .with_set("s3", "gone-too", "Orphan 2")
            .build();
        let (docs, mut sets) = stores(&kv);

        let result = run(&mut kv, &docs, &mut sets, true).unwrap();

        assert!(result.messages[0].content.contains("Removed 2"));
        let stored: Vec<AnnotationSet> = kv.get("annotationSets", Vec::new()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "s1");
    }
}
