//! Chain files: a scramble and the submissions made on it, in TOML.
//!
//! ```toml
//! scramble = "R2 B2 D2 L2 F2 U2 R2 U F2 R2 U' R U' R' F'"
//!
//! [[submissions]]
//! solution = "F // eo"
//! phase = "EO"
//!
//! [[submissions]]
//! solution = "R U R'"
//! phase = "DR"
//! parent = 0
//! ```

use std::{fs, path::Path};

use color_eyre::eyre::{Result, eyre};
use fmc_core::{
    Phase,
    chain::{Scramble, ScrambleId, SubmissionId, SubmissionStore},
};
use log::info;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChainFile {
    pub scramble: String,
    #[serde(default)]
    pub submissions: Vec<SubmissionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionEntry {
    pub solution: String,
    pub phase: String,
    /// Position of the parent in the file. Parents come first.
    pub parent: Option<usize>,
}

pub struct Chain {
    pub scramble: Scramble,
    pub store: SubmissionStore,
}

impl ChainFile {
    pub fn load(path: &Path) -> Result<ChainFile> {
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn into_chain(self) -> Result<Chain> {
        let scramble = Scramble {
            id: ScrambleId(0),
            scramble: self.scramble,
        };
        let mut store = SubmissionStore::new();

        for (i, entry) in self.submissions.into_iter().enumerate() {
            let phase = entry
                .phase
                .parse::<Phase>()
                .map_err(|()| eyre!("Submission {i} has an unknown phase {:?}", entry.phase))?;

            if entry.parent.is_some_and(|parent| parent >= i) {
                return Err(eyre!("Submission {i} must come after its parent"));
            }

            store.insert(scramble.id, entry.parent.map(SubmissionId), entry.solution, phase)?;
        }

        info!("Loaded {} submissions", store.len());

        Ok(Chain { scramble, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(text: &str) -> Result<Chain> {
        toml::from_str::<ChainFile>(text)?.into_chain()
    }

    #[test]
    fn branches() {
        let chain = chain(
            r#"
            scramble = "R U F"

            [[submissions]]
            solution = "F'"
            phase = "eo"

            [[submissions]]
            solution = "U'"
            phase = "DR"
            parent = 0

            [[submissions]]
            solution = "B"
            phase = "EO"
            "#,
        )
        .unwrap();

        assert_eq!(chain.store.len(), 3);
        assert_eq!(
            chain.store.get(SubmissionId(1)).unwrap().parent,
            Some(SubmissionId(0))
        );
        assert_eq!(chain.store.get(SubmissionId(2)).unwrap().parent, None);
    }

    #[test]
    fn rejects_bad_entries() {
        assert!(
            chain(
                r#"
                scramble = "R"
                [[submissions]]
                solution = "R'"
                phase = "nearly"
                "#
            )
            .is_err()
        );
        assert!(
            chain(
                r#"
                scramble = "R"
                [[submissions]]
                solution = "R'"
                phase = "EO"
                parent = 0
                "#
            )
            .is_err()
        );
    }
}
