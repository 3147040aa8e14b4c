//! The six scoring methods and how their scores are interpreted.

use std::fmt;

/// Which extremum of a score surface marks the best placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Higher scores are better.
    Maximize,
    /// Lower scores are better.
    Minimize,
}

impl Direction {
    /// Returns `true` when `candidate` beats `incumbent` under this direction.
    ///
    /// Equal scores never win, so the first placement in scan order is kept.
    #[inline]
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Direction::Maximize => candidate > incumbent,
            Direction::Minimize => candidate < incumbent,
        }
    }
}

/// Similarity metric evaluated at every placement of a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchMethod {
    /// Correlation of mean-subtracted pattern and window.
    Ccoeff,
    /// `Ccoeff` divided by the product of the mean-subtracted norms.
    CcoeffNormed,
    /// Raw cross-correlation.
    Ccorr,
    /// `Ccorr` divided by the product of the raw norms.
    CcorrNormed,
    /// Sum of squared differences.
    Sqdiff,
    /// `Sqdiff` divided by the product of the raw norms.
    SqdiffNormed,
}

impl MatchMethod {
    /// Every method in evaluation order.
    pub const ALL: [MatchMethod; 6] = [
        MatchMethod::Ccoeff,
        MatchMethod::CcoeffNormed,
        MatchMethod::Ccorr,
        MatchMethod::CcorrNormed,
        MatchMethod::Sqdiff,
        MatchMethod::SqdiffNormed,
    ];

    /// Identifier used in progress lines and output file names.
    pub fn name(self) -> &'static str {
        match self {
            MatchMethod::Ccoeff => "TM_CCOEFF",
            MatchMethod::CcoeffNormed => "TM_CCOEFF_NORMED",
            MatchMethod::Ccorr => "TM_CCORR",
            MatchMethod::CcorrNormed => "TM_CCORR_NORMED",
            MatchMethod::Sqdiff => "TM_SQDIFF",
            MatchMethod::SqdiffNormed => "TM_SQDIFF_NORMED",
        }
    }

    /// Which extremum of the surface is the best match.
    pub fn direction(self) -> Direction {
        match self {
            MatchMethod::Sqdiff | MatchMethod::SqdiffNormed => Direction::Minimize,
            _ => Direction::Maximize,
        }
    }

    /// Whether the pattern is mean-subtracted before correlating.
    pub fn is_zero_mean(self) -> bool {
        matches!(self, MatchMethod::Ccoeff | MatchMethod::CcoeffNormed)
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
