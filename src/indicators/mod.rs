// =============================================================================
// Indicator Module
// =============================================================================
//
// Pure, side-effect-free implementations of the derived series behind the
// chart. Every function returns a vector index-aligned with its input, with
// `None` marking positions where the indicator is undefined, so the pipeline
// can merge columns without re-indexing.

pub mod momentum;
pub mod rsi;
pub mod sma;
