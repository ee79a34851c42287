use std::collections::BTreeMap;

use crate::shared::table_id::{TableId, FIRST_TABLE};

use super::frame_signature::FrameSignature;
use super::signature_comparator::SignatureComparator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneChange {
    pub changed: bool,
    pub table_id: TableId,
}

/// Splits the frame stream into tables by comparing each sampled frame
/// with the one before it.
///
/// Table ids start at 1 and grow by exactly one per detected change.
pub struct SceneSegmenter {
    comparator: Box<dyn SignatureComparator>,
    threshold: f64,
    previous: Option<FrameSignature>,
    current_table: TableId,
    table_start: usize,
    durations: BTreeMap<TableId, usize>,
}

impl SceneSegmenter {
    pub fn new(comparator: Box<dyn SignatureComparator>, threshold: f64) -> Self {
        Self {
            comparator,
            threshold,
            previous: None,
            current_table: FIRST_TABLE,
            table_start: 0,
            durations: BTreeMap::new(),
        }
    }

    pub fn on_frame(&mut self, signature: FrameSignature, frame_index: usize) -> SceneChange {
        let changed = match &self.previous {
            Some(prev) => self.comparator.dissimilarity(prev, &signature) > self.threshold,
            None => false,
        };

        if changed {
            self.close(frame_index);
            self.current_table += 1;
            self.table_start = frame_index;
            log::info!(
                "Table change detected at frame {frame_index}: now table {}",
                self.current_table
            );
        }
        self.previous = Some(signature);

        SceneChange {
            changed,
            table_id: self.current_table,
        }
    }

    pub fn current_table(&self) -> TableId {
        self.current_table
    }

    /// Records the span of the current table as ending at `frame_index`.
    pub fn close(&mut self, frame_index: usize) {
        let span = frame_index.saturating_sub(self.table_start);
        self.durations.insert(self.current_table, span);
    }

    /// Frame span of every table that has ended.
    pub fn table_durations(&self) -> &BTreeMap<TableId, usize> {
        &self.durations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::infrastructure::bhattacharyya_comparator::BhattacharyyaComparator;

    fn segmenter() -> SceneSegmenter {
        SceneSegmenter::new(Box::new(BhattacharyyaComparator), 0.40)
    }

    fn dark() -> FrameSignature {
        FrameSignature::new(vec![1.0, 0.0, 0.0])
    }

    fn bright() -> FrameSignature {
        FrameSignature::new(vec![0.0, 0.0, 1.0])
    }

    #[test]
    fn test_first_frame_never_changes() {
        let mut seg = segmenter();
        let change = seg.on_frame(bright(), 0);
        assert_eq!(
            change,
            SceneChange {
                changed: false,
                table_id: 1
            }
        );
    }

    #[test]
    fn test_similar_frames_stay_on_table() {
        let mut seg = segmenter();
        seg.on_frame(dark(), 0);
        let change = seg.on_frame(FrameSignature::new(vec![0.95, 0.05, 0.0]), 30);
        assert!(!change.changed);
        assert_eq!(change.table_id, 1);
    }

    #[test]
    fn test_ids_increase_without_gaps() {
        let mut seg = segmenter();
        let mut ids = Vec::new();
        for (i, sig) in [dark(), bright(), bright(), dark(), bright()].into_iter().enumerate() {
            ids.push(seg.on_frame(sig, i * 30).table_id);
        }
        assert_eq!(ids, vec![1, 2, 2, 3, 4]);
    }

    #[test]
    fn test_durations_recorded_on_change_and_close() {
        let mut seg = segmenter();
        seg.on_frame(dark(), 0);
        seg.on_frame(dark(), 30);
        seg.on_frame(bright(), 60);
        seg.on_frame(bright(), 90);
        assert_eq!(seg.table_durations().get(&1), Some(&60));
        assert_eq!(seg.table_durations().get(&2), None);

        seg.close(120);
        assert_eq!(seg.table_durations().get(&2), Some(&60));
    }

    #[test]
    fn test_close_before_start_saturates() {
        let mut seg = segmenter();
        seg.on_frame(dark(), 0);
        seg.on_frame(bright(), 90);
        seg.close(10);
        assert_eq!(seg.table_durations().get(&2), Some(&0));
    }
}
