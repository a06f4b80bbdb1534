pub mod pick;
pub mod result;
pub mod structural;

pub use pick::{MatchOutcome, MatchPick, MatchResult, Prediction, ScoreLine};
pub use result::{record_result, PublishedResult, ResultCorrection};
pub use structural::{
    GroupStandings, GroupStandingsPick, GroupStandingsResult, KnockoutAdvance, KnockoutPick,
    KnockoutResult, StructuralResult, StructuralSelections, UserStructuralPick,
};
