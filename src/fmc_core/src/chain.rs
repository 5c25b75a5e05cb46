//! Chains of submissions, each one extending the skeleton of its parent.
//!
//! Submissions live in an arena and point at their parent by index. Nothing
//! derived from a submission is stored: move counts, phases and statuses are
//! replayed from the root every time they are asked for.

use std::fmt;

use cube_sim::{Algorithm, Cube};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    accounting::{self, Accounting, MoveCount, SolutionForm},
    notation,
    phase::{self, Phase},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub usize);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrambleId(pub usize);

impl fmt::Display for ScrambleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scramble {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scramble {
    pub id: ScrambleId,
    pub scramble: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    /// The moves this submission adds to its parent's skeleton.
    pub solution: String,
    /// The phase the submitter claims to have reached.
    pub phase: Phase,
    pub parent: Option<SubmissionId>,
    pub scramble: ScrambleId,
}

/// Every submission of every chain, indexed by [`SubmissionId`].
#[derive(Debug, Clone, Default)]
pub struct SubmissionStore {
    submissions: Vec<Submission>,
}

impl SubmissionStore {
    #[must_use]
    pub fn new() -> SubmissionStore {
        SubmissionStore::default()
    }

    /// Adds a submission below `parent`, or as a new root.
    ///
    /// # Errors
    ///
    /// If `parent` is not in the store.
    pub fn insert(
        &mut self,
        scramble: ScrambleId,
        parent: Option<SubmissionId>,
        solution: impl Into<String>,
        phase: Phase,
    ) -> Result<SubmissionId> {
        if let Some(parent) = parent {
            self.get(parent)?;
        }

        let id = SubmissionId(self.submissions.len());
        self.submissions.push(Submission {
            id,
            solution: solution.into(),
            phase,
            parent,
            scramble,
        });

        Ok(id)
    }

    /// # Errors
    ///
    /// If `id` is not in the store.
    pub fn get(&self, id: SubmissionId) -> Result<&Submission> {
        self.submissions
            .get(id.0)
            .ok_or(Error::UnknownSubmission(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Submission> {
        self.submissions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    /// The submissions from the root of `leaf`'s chain down to `leaf`.
    /// Parents always precede their children in the arena, so this ends.
    ///
    /// # Errors
    ///
    /// If a submission on the way is not in the store.
    pub fn path(&self, leaf: Option<SubmissionId>) -> Result<Vec<&Submission>> {
        let mut path = Vec::new();
        let mut next = leaf;

        while let Some(id) = next {
            let submission = self.get(id)?;
            next = submission.parent;
            path.push(submission);
        }

        path.reverse();
        Ok(path)
    }
}

/// The skeleton from the root down to `leaf`, one line per submission.
/// Empty for no leaf.
///
/// # Errors
///
/// If a submission on the way is not in the store.
pub fn flatten_skeleton(store: &SubmissionStore, leaf: Option<SubmissionId>) -> Result<String> {
    Ok(notation::join_skeleton(
        store
            .path(leaf)?
            .into_iter()
            .map(|submission| submission.solution.as_str()),
    ))
}

/// One row of a flattened chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseEntry {
    pub submission: SubmissionId,
    pub solution: String,
    pub phase: Phase,
    pub status: String,
    #[serde(flatten)]
    pub accounting: Accounting,
}

/// Replays a chain from the root, accounting every submission against the
/// skeleton above it.
///
/// # Errors
///
/// If any text is invalid notation, a submission is missing, or cancellation
/// removed a negative number of moves.
pub fn flatten_phases(
    store: &SubmissionStore,
    scramble: &Scramble,
    leaf: Option<SubmissionId>,
) -> Result<Vec<PhaseEntry>> {
    let scramble_algorithm = notation::parse(&scramble.scramble)?;

    let mut parts = Vec::new();
    let mut cumulative = MoveCount::ZERO;
    let mut phases = Vec::new();

    for submission in store.path(leaf)? {
        parts.push(submission.solution.as_str());

        let moves = accounting::count_moves(&submission.solution)?;
        let skeleton = accounting::cancelled(&notation::join_skeleton(parts.iter().copied()))?;

        let mut cube = Cube::from(&scramble_algorithm);
        cube.twist(&skeleton);

        let accounting = Accounting::new(moves, cumulative, MoveCount::from_moves(skeleton.len()))?;
        cumulative = accounting.cumulative_moves;

        phases.push(PhaseEntry {
            submission: submission.id,
            solution: submission.solution.clone(),
            phase: submission.phase,
            status: phase::status(&cube, submission.phase),
            accounting,
        });
    }

    debug!("Flattened {} submissions of {}", phases.len(), scramble.id);

    Ok(phases)
}

/// Everything shown for a contribution before it is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedPhase {
    /// The scramble followed by the new skeleton.
    pub cube: Cube,
    pub solution: Algorithm,
    pub phase: Phase,
    pub accounting: Accounting,
    pub status: String,
}

/// Accounts and classifies a new contribution below `tree`.
///
/// # Errors
///
/// If any text is invalid notation, `tree` is not in the store, an insert
/// place is out of range, or cancellation removed a negative number of moves.
pub fn compute_contribution(
    scramble: &Scramble,
    store: &SubmissionStore,
    tree: Option<SubmissionId>,
    form: &SolutionForm,
) -> Result<ComputedPhase> {
    let parent_skeleton = flatten_skeleton(store, tree)?;
    let contribution = accounting::account(&parent_skeleton, form)?;

    let mut cube = Cube::from(&notation::parse(&scramble.scramble)?);
    cube.twist(&contribution.skeleton);

    let phase = phase::classify(&cube);
    let status = phase::status(&cube, phase);

    Ok(ComputedPhase {
        cube,
        solution: contribution.solution,
        phase,
        accounting: contribution.accounting,
        status,
    })
}
