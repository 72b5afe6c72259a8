//! Grouping stubs into duplicate buckets

use std::collections::{HashMap, HashSet};

use curation_domain::StudyStub;

use super::keys::{derive_keys, DuplicateKey};

/// Stubs bucketed by duplicate key
///
/// A stub appears once in the bucket of every key it carries, so it can be
/// found by any of its DOI, PMID or title. Buckets keep input order and are
/// iterated in first-seen key order.
#[derive(Debug, Clone)]
pub struct DuplicateGroups<T> {
    order: Vec<DuplicateKey>,
    mapping: HashMap<DuplicateKey, Vec<T>>,
    /// Input positions of each bucket's members, parallel to `mapping`
    positions: HashMap<DuplicateKey, Vec<usize>>,
}

impl<T> Default for DuplicateGroups<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            mapping: HashMap::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: AsRef<StudyStub> + Clone> DuplicateGroups<T> {
    fn insert(&mut self, key: DuplicateKey, position: usize, item: T) {
        match self.mapping.get_mut(&key) {
            Some(bucket) => {
                bucket.push(item);
                self.positions.entry(key).or_default().push(position);
            }
            None => {
                self.order.push(key.clone());
                self.positions.insert(key.clone(), vec![position]);
                self.mapping.insert(key, vec![item]);
            }
        }
    }

    /// Members sharing `key`
    pub fn get(&self, key: &DuplicateKey) -> Option<&[T]> {
        self.mapping.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &DuplicateKey) -> bool {
        self.mapping.contains_key(key)
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &DuplicateKey> {
        self.order.iter()
    }

    /// Buckets in first-seen key order
    pub fn buckets(&self) -> impl Iterator<Item = (&DuplicateKey, &[T])> {
        self.order
            .iter()
            .filter_map(|key| self.mapping.get(key).map(|bucket| (key, bucket.as_slice())))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Distinct bucket contents, singletons included
    ///
    /// Two buckets holding the same input entries (e.g. a pair that shares
    /// both DOI and title) are reported once. Entries are compared by input
    /// position, so stubs lacking an id never merge unrelated buckets.
    pub fn duplicates_list(&self) -> Vec<Vec<T>> {
        let mut seen: HashSet<&[usize]> = HashSet::new();
        let mut list = Vec::new();

        for key in &self.order {
            let (Some(bucket), Some(positions)) = (self.mapping.get(key), self.positions.get(key))
            else {
                continue;
            };
            if seen.insert(positions.as_slice()) {
                list.push(bucket.clone());
            }
        }

        list
    }

    /// Distinct buckets with at least two members
    pub fn clusters(&self) -> Vec<Vec<T>> {
        self.duplicates_list()
            .into_iter()
            .filter(|bucket| bucket.len() > 1)
            .collect()
    }
}

/// Group stubs by every duplicate key they carry
///
/// Works on anything that can be viewed as a stub, so annotated project
/// stubs can be grouped without unwrapping them.
pub fn group_by_duplicate_key<T: AsRef<StudyStub> + Clone>(items: &[T]) -> DuplicateGroups<T> {
    let mut groups = DuplicateGroups::default();

    for (position, item) in items.iter().enumerate() {
        for key in derive_keys(item.as_ref()) {
            groups.insert(key, position, item.clone());
        }
    }

    tracing::debug!(
        stubs = items.len(),
        keys = groups.len(),
        "grouped stubs by duplicate key"
    );

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(id: &str, title: &str, doi: &str) -> StudyStub {
        StudyStub::new(title).with_id(id).with_doi(doi)
    }

    #[test]
    fn test_stub_indexed_under_every_key() {
        let a = stub("a", "Foo", "10.1/x").with_pmid("42");
        let groups = group_by_duplicate_key(&[a]);

        assert_eq!(groups.len(), 3);
        for key in [
            DuplicateKey::Doi("10.1/x".to_string()),
            DuplicateKey::Pmid("42".to_string()),
            DuplicateKey::Title("foo".to_string()),
        ] {
            assert_eq!(groups.get(&key).map(|b| b[0].id.as_str()), Some("a"));
        }
    }

    #[test]
    fn test_first_seen_key_order() {
        let groups = group_by_duplicate_key(&[stub("a", "Foo", "10.1/x"), stub("b", "Bar", "")]);
        let keys: Vec<String> = groups.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["doi:10.1/x", "title:foo", "title:bar"]);
    }

    #[test]
    fn test_clusters_skip_singletons() {
        let groups = group_by_duplicate_key(&[
            stub("a", "Foo", "10.1/x"),
            stub("b", "Foo Bar", "10.1/x"),
            stub("c", "Other", ""),
        ]);

        let clusters = groups.clusters();
        assert_eq!(clusters.len(), 1);
        let ids: Vec<&str> = clusters[0].iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        // singletons stay available for lookup
        assert_eq!(groups.duplicates_list().len(), 4);
    }

    #[test]
    fn test_identical_buckets_reported_once() {
        let groups = group_by_duplicate_key(&[
            stub("a", "Same Title", "10.1/x"),
            stub("b", "same title", "10.1/x"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.clusters().len(), 1);
    }

    #[test]
    fn test_same_stub_twice_is_grouped() {
        let a = stub("a", "Foo", "");
        let groups = group_by_duplicate_key(&[a.clone(), a]);
        assert_eq!(groups.clusters()[0].len(), 2);
    }

    #[test]
    fn test_stubs_without_ids_keep_separate_clusters() {
        let groups = group_by_duplicate_key(&[
            stub("", "A", "10.1/a"),
            stub("", "B", "10.1/a"),
            stub("", "C", "10.1/c"),
            stub("", "D", "10.1/c"),
        ]);

        let clusters = groups.clusters();
        let titles: Vec<Vec<&str>> = clusters
            .iter()
            .map(|c| c.iter().map(|s| s.title.as_str()).collect())
            .collect();
        assert_eq!(titles, vec![vec!["A", "B"], vec!["C", "D"]]);
    }

    #[test]
    fn test_empty_input() {
        let groups = group_by_duplicate_key::<StudyStub>(&[]);
        assert!(groups.is_empty());
        assert!(groups.clusters().is_empty());
    }
}
