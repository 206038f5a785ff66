//! Ordered list of committed annotations

use crate::domain::Annotation;

/// Committed annotations in drawing order
///
/// Insertion order is z-order. Only the tail can be removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationList {
    annotations: Vec<Annotation>,
}

impl AnnotationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, annotation: Annotation) {
        log::debug!("committed {} annotation", annotation.kind_name());
        self.annotations.push(annotation);
    }

    /// Remove and return the most recent annotation
    pub fn undo(&mut self) -> Option<Annotation> {
        let removed = self.annotations.pop();
        if let Some(annotation) = &removed {
            log::debug!("undo removed {} annotation", annotation.kind_name());
        }
        removed
    }

    pub fn clear_all(&mut self) {
        self.annotations.clear();
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn last(&self) -> Option<&Annotation> {
        self.annotations.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl<'a> IntoIterator for &'a AnnotationList {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Annotation> for AnnotationList {
    fn extend<T: IntoIterator<Item = Annotation>>(&mut self, iter: T) {
        for annotation in iter {
            self.add(annotation);
        }
    }
}
