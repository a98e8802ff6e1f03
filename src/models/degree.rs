// src/models/degree.rs
//! Academic degree payload kept off-ledger by the issuing university.
//!
//! The registry never sees this structure. The issuer hashes its JSON form
//! into a commitment, and discloses the document itself out-of-band to
//! verifiers who recompute the same commitment.

use serde::{Deserialize, Serialize};

/// Off-ledger degree data.
///
/// # Serialization
/// Fields serialize in declaration order as compact JSON. Any change to
/// that order changes every derived commitment, so it is part of the format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DegreeRecord {
    /// Full name of the graduate
    /// Example: "María Rodríguez"
    pub name: String,

    /// Degree programme
    /// Example: "Computer Science"
    pub program: String,

    /// Awarding institution
    pub institution: String,

    /// Award date, ISO-8601
    /// Example: "2023-06-15"
    pub date: String,

    /// Institution-internal reference
    /// Example: "CS-2023-001"
    pub id: String,
}

#[cfg(test)]
impl DegreeRecord {
    /// Degree shared by the test suites.
    pub(crate) fn sample() -> Self {
        DegreeRecord {
            name: "María Rodríguez".into(),
            program: "Computer Science".into(),
            institution: "Universidad Ejemplo".into(),
            date: "2023-06-15".into(),
            id: "CS-2023-001".into(),
        }
    }
}
