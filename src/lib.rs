//! StarMatch locates a constellation outline inside a sky image by exhaustive
//! template matching.
//!
//! Every pattern is scored at every placement with six classic similarity
//! methods (cross-correlation, correlation coefficient and squared difference,
//! each raw and normalized). The best placement per method is reported and all
//! results are ranked. Optional features add a rayon row-parallel kernel
//! (`rayon`), an FFT kernel (`fft`) and tracing spans (`tracing`); file I/O
//! lives behind the default `image-io` feature.

mod trace;

pub mod category;
pub mod image;
pub mod kernel;
pub mod method;
pub mod report;
pub mod search;
pub mod template;
pub mod util;

#[cfg(feature = "image-io")]
pub mod catalog;
#[cfg(feature = "image-io")]
pub mod session;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use category::{CategorySelector, TargetVariant};
pub use crate::image::{ImageView, OwnedImage};
pub use kernel::{Backend, Kernel};
pub use method::{Direction, MatchMethod};
pub use report::rank::{sort_by_score_desc, top_k};
pub use search::{BatchOutcome, MatchConfig, MatchResult, Peak, ScoreSurface, SimilarityEngine};
pub use template::{Pattern, PatternPlan};
pub use util::{ErrorKind, StarMatchError, StarMatchResult};

#[cfg(feature = "image-io")]
pub use catalog::{CandidateCatalog, CatalogLoad};
#[cfg(feature = "image-io")]
pub use report::MatchReporter;
#[cfg(feature = "image-io")]
pub use session::{SearchOutcome, SearchSettings, Session};
