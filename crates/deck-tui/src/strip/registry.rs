//! Segment registry — ordered ids with a stable id→index mapping.
//!
//! Indices are assigned in registration order and stay contiguous from 0
//! until the next `reset`. Segments are never removed individually.

use std::collections::HashMap;

use super::StripError;

#[derive(Debug, Default)]
pub struct SegmentRegistry {
    ids: Vec<String>,
    index_by_id: HashMap<String, usize>,
}

impl SegmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every registered segment. Any layout computed against the old
    /// indices is invalid after this.
    pub fn reset(&mut self) {
        self.ids.clear();
        self.index_by_id.clear();
    }

    /// Register `id` at the next index. Registering the same id twice is a
    /// caller bug; the registry is left unchanged.
    pub fn add_segment(&mut self, id: &str) -> Result<usize, StripError> {
        if self.index_by_id.contains_key(id) {
            return Err(StripError::InvariantViolation(format!(
                "segment {id} already registered"
            )));
        }
        let index = self.ids.len();
        self.ids.push(id.to_string());
        self.index_by_id.insert(id.to_string(), index);
        Ok(index)
    }

    pub fn index_of(&self, id: &str) -> Result<usize, StripError> {
        self.index_by_id
            .get(id)
            .copied()
            .ok_or_else(|| StripError::UnknownSegment(id.to_string()))
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_index_of_round_trips() {
        let mut reg = SegmentRegistry::new();
        assert_eq!(reg.add_segment("a").unwrap(), 0);
        assert_eq!(reg.add_segment("b").unwrap(), 1);
        assert_eq!(reg.index_of("a").unwrap(), 0);
        assert_eq!(reg.index_of("b").unwrap(), 1);
        assert_eq!(reg.id_at(1), Some("b"));
    }

    #[test]
    fn test_duplicate_add_is_rejected_and_noop() {
        let mut reg = SegmentRegistry::new();
        reg.add_segment("a").unwrap();
        assert!(matches!(
            reg.add_segment("a"),
            Err(StripError::InvariantViolation(_))
        ));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut reg = SegmentRegistry::new();
        reg.add_segment("a").unwrap();
        reg.reset();
        assert!(reg.is_empty());
        assert!(matches!(
            reg.index_of("a"),
            Err(StripError::UnknownSegment(_))
        ));
    }

    #[test]
    fn test_indices_stay_contiguous_after_reset() {
        let mut reg = SegmentRegistry::new();
        reg.add_segment("a").unwrap();
        reg.add_segment("b").unwrap();
        reg.reset();
        assert_eq!(reg.add_segment("c").unwrap(), 0);
    }
}
