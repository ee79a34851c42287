use crate::scene::domain::signature_comparator::SignatureComparator;
use crate::shared::config::ComparatorKind;

use super::bhattacharyya_comparator::BhattacharyyaComparator;
use super::correlation_comparator::CorrelationComparator;

/// Creates the signature comparator selected by configuration.
pub fn create_comparator(kind: ComparatorKind) -> Box<dyn SignatureComparator> {
    log::info!("Using {kind} histogram comparison for table changes");
    match kind {
        ComparatorKind::Bhattacharyya => Box::new(BhattacharyyaComparator),
        ComparatorKind::Correlation => Box::new(CorrelationComparator),
    }
}
