//! Sequential and independent application of an operation list.
//!
//! One run produces two kinds of result from the same source:
//!
//! - the **sequential** variant, where each operation feeds the next in the
//!   order given;
//! - one **independent** variant per known operation, each applied on its own
//!   fresh copy of the source.
//!
//! The source is only ever read. Every branch clones it and owns its copy.

use std::collections::BTreeMap;

use image::DynamicImage;
use tracing::debug;

use crate::format::EncodingFormat;
use crate::operations::{apply, Applied, OperationId};

/// An image together with the format it should be encoded in.
#[derive(Debug, Clone)]
pub struct Variant {
    pub image: DynamicImage,
    pub format: EncodingFormat,
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// All operations composed in order.
    pub sequential: Variant,
    /// Operations that contributed to `sequential`, in application order.
    pub applied: Vec<OperationId>,
    /// Names that matched no operation, in input order.
    pub skipped: Vec<String>,
    /// One result per distinct known operation, each from the pristine source.
    pub independent: BTreeMap<OperationId, Variant>,
}

/// Run `operations` against `source`.
///
/// Unknown names are skipped in both branches. A repeated name is applied
/// repeatedly in the sequential branch. In the independent branch each
/// occurrence is run against the source and the last one is kept, so a
/// repeated name still yields a single entry.
/// An empty list gives an unmodified copy of the source and no independent
/// results.
pub fn run<S: AsRef<str>>(
    source: &DynamicImage,
    source_format: EncodingFormat,
    operations: &[S],
) -> PipelineResult {
    let mut image = source.clone();
    let mut format = source_format;
    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    let mut independent = BTreeMap::new();

    for name in operations {
        let name = name.as_ref();
        match apply(image, name, format) {
            Applied::Transformed {
                image: next,
                format: next_format,
            } => {
                image = next;
                format = next_format;
                // Only known names transform, so the parse always succeeds
                if let Ok(id) = name.parse::<OperationId>() {
                    applied.push(id);
                }
            }
            Applied::Skipped { image: unchanged } => {
                image = unchanged;
                skipped.push(name.to_string());
            }
        }
    }

    // Every occurrence runs from the source; a repeat replaces the earlier entry
    for &id in &applied {
        if let Applied::Transformed { image, format } =
            apply(source.clone(), id.as_str(), source_format)
        {
            independent.insert(id, Variant { image, format });
        }
    }

    debug!(
        applied = applied.len(),
        skipped = skipped.len(),
        independent = independent.len(),
        width = image.width(),
        height = image.height(),
        %format,
        "pipeline finished"
    );

    PipelineResult {
        sequential: Variant { image, format },
        applied,
        skipped,
        independent,
    }
}
