pub const SCORE_ATOM: i32 = -5;
pub const SCORE_EXIT: i32 = -3;
pub const SCORE_REFLECTED: i32 = -2;
pub const SCORE_ABSORBED: i32 = -1;

/// One row of the final score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreLine {
    pub label: &'static str,
    pub count: u32,
    pub weight: i32,
}

impl ScoreLine {
    pub fn points(&self) -> i32 {
        self.count as i32 * self.weight
    }
}

/// Event counters for one game. Every classified event bumps exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreCard {
    pub missed_atoms: u32,
    pub absorbed: u32,
    pub reflected: u32,
    pub exited: u32,
}

impl ScoreCard {
    pub fn beams(&self) -> u32 {
        self.absorbed + self.reflected + self.exited
    }

    /// Rows in display order: missed, exited, reflected, absorbed.
    pub fn lines(&self) -> [ScoreLine; 4] {
        [
            ScoreLine { label: "Missed Atoms", count: self.missed_atoms, weight: SCORE_ATOM },
            ScoreLine { label: "Exited beams", count: self.exited, weight: SCORE_EXIT },
            ScoreLine { label: "Reflected beams", count: self.reflected, weight: SCORE_REFLECTED },
            ScoreLine { label: "Absorbed beams", count: self.absorbed, weight: SCORE_ABSORBED },
        ]
    }

    pub fn total(&self) -> i32 {
        self.lines().iter().map(ScoreLine::points).sum()
    }
}
