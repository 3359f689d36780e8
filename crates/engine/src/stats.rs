//! Session statistics collection and reporting.
//!
//! Tracks what a quiz session generated and how the user did. It provides:
//! 1. **Generation counts:** exercises produced, per scenario kind.
//! 2. **Grading counts:** submissions graded, fully correct answers, and
//!    per-field miss counts.
//! 3. **Streaks:** current and best runs of fully correct submissions.

use std::collections::HashMap;

use crate::exercise::scenario::ExerciseKind;
use crate::grade::Field;

/// Counters for one quiz session.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// TLB-hit exercises generated.
    pub generated_tlb_hit: u64,
    /// Page-hit exercises generated.
    pub generated_page_hit: u64,
    /// Page-fault exercises generated.
    pub generated_page_fault: u64,

    /// Submissions graded.
    pub graded: u64,
    /// Submissions with every graded field correct.
    pub fully_correct: u64,
    /// Miss counts per field.
    pub field_misses: HashMap<Field, u64>,

    /// Current run of fully correct submissions.
    pub streak: u64,
    /// Best run of fully correct submissions.
    pub best_streak: u64,
}

impl SessionStats {
    /// Creates a zeroed statistics block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one generated exercise.
    pub fn record_generated(&mut self, kind: ExerciseKind) {
        match kind {
            ExerciseKind::TlbHit => self.generated_tlb_hit += 1,
            ExerciseKind::PageHit => self.generated_page_hit += 1,
            ExerciseKind::PageFault => self.generated_page_fault += 1,
        }
    }

    /// Records one graded submission and the fields it missed.
    pub fn record_graded(&mut self, correct: bool, missed_fields: &[Field]) {
        self.graded += 1;
        for &field in missed_fields {
            *self.field_misses.entry(field).or_insert(0) += 1;
        }
        if correct {
            self.fully_correct += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
    }

    /// Total exercises generated.
    pub fn generated(&self) -> u64 {
        self.generated_tlb_hit + self.generated_page_hit + self.generated_page_fault
    }

    /// Prints a session summary to stdout.
    pub fn print(&self) {
        println!("Session summary");
        println!(
            "  Exercises: {} (TLB hit {}, page hit {}, page fault {})",
            self.generated(),
            self.generated_tlb_hit,
            self.generated_page_hit,
            self.generated_page_fault
        );
        println!(
            "  Graded: {}  Correct: {}  Best streak: {}",
            self.graded, self.fully_correct, self.best_streak
        );
        let mut misses: Vec<(Field, u64)> = Field::ALL
            .iter()
            .filter_map(|&f| self.field_misses.get(&f).map(|&n| (f, n)))
            .collect();
        misses.retain(|&(_, n)| n > 0);
        if !misses.is_empty() {
            println!("  Misses by field:");
            for (field, count) in misses {
                println!("    {field}: {count}");
            }
        }
    }
}
