use crate::model::{AnnotationUid, ContourAnnotation};
use std::collections::BTreeMap;

/// Persistence layer the tool writes contours into.
pub trait AnnotationStore {
    /// Store a new annotation and return its freshly assigned uid.
    fn add(&mut self, annotation: ContourAnnotation) -> AnnotationUid;
    /// Store under the annotation's own uid, replacing any previous entry.
    fn insert(&mut self, annotation: ContourAnnotation);
    fn remove(&mut self, uid: AnnotationUid) -> Option<ContourAnnotation>;
    fn get(&self, uid: AnnotationUid) -> Option<&ContourAnnotation>;
    fn get_mut(&mut self, uid: AnnotationUid) -> Option<&mut ContourAnnotation>;
    fn uids(&self) -> Vec<AnnotationUid>;
}

#[derive(Clone, Debug)]
pub struct MemoryAnnotationStore {
    annotations: BTreeMap<AnnotationUid, ContourAnnotation>,
    next_uid: AnnotationUid,
}

impl Default for MemoryAnnotationStore {
    fn default() -> Self {
        MemoryAnnotationStore {
            annotations: BTreeMap::new(),
            next_uid: 1,
        }
    }
}

impl MemoryAnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContourAnnotation> {
        self.annotations.values()
    }
}

impl AnnotationStore for MemoryAnnotationStore {
    fn add(&mut self, mut annotation: ContourAnnotation) -> AnnotationUid {
        let uid = self.next_uid;
        self.next_uid = self.next_uid.saturating_add(1);
        annotation.uid = uid;
        self.annotations.insert(uid, annotation);
        uid
    }

    fn insert(&mut self, annotation: ContourAnnotation) {
        self.next_uid = self.next_uid.max(annotation.uid.saturating_add(1));
        self.annotations.insert(annotation.uid, annotation);
    }

    fn remove(&mut self, uid: AnnotationUid) -> Option<ContourAnnotation> {
        self.annotations.remove(&uid)
    }

    fn get(&self, uid: AnnotationUid) -> Option<&ContourAnnotation> {
        self.annotations.get(&uid)
    }

    fn get_mut(&mut self, uid: AnnotationUid) -> Option<&mut ContourAnnotation> {
        self.annotations.get_mut(&uid)
    }

    fn uids(&self) -> Vec<AnnotationUid> {
        self.annotations.keys().copied().collect()
    }
}
