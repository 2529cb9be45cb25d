//! Checksum algorithm lookup between internal names and graph tags.
//!
//! Internal records name algorithms the way the portal stores them
//! (`SHA1`, `SHA3_256`, `BLAKE2b_256`); the graph uses tags such as
//! `"SHA1:"` and `"SHA3-256:"`. Lookups of internal names ignore case and
//! treat `-` and `_` alike, so differently spelled records map to the same
//! algorithm. Anything outside the table is an error in both directions.

use crate::error::{InterchangeError, MappingErrorKind, Result};
use crate::graph::{Checksum, ChecksumAlgorithm};
use crate::model::ChecksumRecord;

const ALGORITHMS: [(&str, ChecksumAlgorithm); 17] = [
    ("SHA1", ChecksumAlgorithm::Sha1),
    ("SHA224", ChecksumAlgorithm::Sha224),
    ("SHA256", ChecksumAlgorithm::Sha256),
    ("SHA384", ChecksumAlgorithm::Sha384),
    ("SHA512", ChecksumAlgorithm::Sha512),
    ("SHA3_256", ChecksumAlgorithm::Sha3_256),
    ("SHA3_384", ChecksumAlgorithm::Sha3_384),
    ("SHA3_512", ChecksumAlgorithm::Sha3_512),
    ("BLAKE2b_256", ChecksumAlgorithm::Blake2b256),
    ("BLAKE2b_384", ChecksumAlgorithm::Blake2b384),
    ("BLAKE2b_512", ChecksumAlgorithm::Blake2b512),
    ("BLAKE3", ChecksumAlgorithm::Blake3),
    ("MD2", ChecksumAlgorithm::Md2),
    ("MD4", ChecksumAlgorithm::Md4),
    ("MD5", ChecksumAlgorithm::Md5),
    ("MD6", ChecksumAlgorithm::Md6),
    ("ADLER32", ChecksumAlgorithm::Adler32),
];

/// Internal names of every supported algorithm.
pub fn internal_names() -> impl Iterator<Item = &'static str> {
    ALGORITHMS.iter().map(|(name, _)| *name)
}

pub fn algorithm_from_internal(name: &str) -> Result<ChecksumAlgorithm> {
    let wanted = fold(name);
    ALGORITHMS
        .iter()
        .find(|(internal, _)| fold(internal) == wanted)
        .map(|(_, algorithm)| *algorithm)
        .ok_or_else(|| {
            InterchangeError::mapping(
                "resolving checksum algorithm",
                MappingErrorKind::UnknownChecksumAlgorithm(name.to_string()),
            )
        })
}

pub fn internal_name(algorithm: ChecksumAlgorithm) -> &'static str {
    ALGORITHMS
        .iter()
        .find(|(_, candidate)| *candidate == algorithm)
        .map_or("", |(name, _)| *name)
}

/// Internal name to graph tag, e.g. `SHA3_256` to `"SHA3-256:"`.
pub fn to_graph_tag(name: &str) -> Result<&'static str> {
    algorithm_from_internal(name).map(ChecksumAlgorithm::tag)
}

/// Graph tag to internal name, e.g. `"SHA3-256:"` to `SHA3_256`.
pub fn from_graph_tag(tag: &str) -> Result<&'static str> {
    ChecksumAlgorithm::from_tag(tag)
        .map(internal_name)
        .ok_or_else(|| {
            InterchangeError::mapping(
                "resolving checksum tag",
                MappingErrorKind::UnknownChecksumTag(tag.to_string()),
            )
        })
}

pub fn checksum_to_graph(record: &ChecksumRecord) -> Result<Checksum> {
    Ok(Checksum::new(
        algorithm_from_internal(&record.algorithm)?,
        record.value.clone(),
    ))
}

pub fn checksum_from_graph(checksum: &Checksum, index: usize) -> ChecksumRecord {
    ChecksumRecord {
        algorithm: internal_name(checksum.algorithm).to_string(),
        value: checksum.value.clone(),
        index,
    }
}

fn fold(name: &str) -> String {
    name.trim().to_uppercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_algorithm() {
        for algorithm in ChecksumAlgorithm::ALL {
            assert!(
                !internal_name(algorithm).is_empty(),
                "{algorithm} has no internal name"
            );
        }
    }

    #[test]
    fn test_spellings_collapse() {
        assert_eq!(to_graph_tag("SHA3_256").unwrap(), "SHA3-256:");
        assert_eq!(to_graph_tag("sha3-256").unwrap(), "SHA3-256:");
        assert_eq!(to_graph_tag("BLAKE2B_512").unwrap(), "BLAKE2b-512:");
        assert_eq!(from_graph_tag("BLAKE2b-512:").unwrap(), "BLAKE2b_512");
    }

    #[test]
    fn test_unknown_names_are_errors() {
        assert!(matches!(
            to_graph_tag("CRC32"),
            Err(InterchangeError::Mapping {
                source: MappingErrorKind::UnknownChecksumAlgorithm(_),
                ..
            })
        ));
        assert!(matches!(
            from_graph_tag("SHA1"),
            Err(InterchangeError::Mapping {
                source: MappingErrorKind::UnknownChecksumTag(_),
                ..
            })
        ));
    }

    #[test]
    fn test_record_conversion() {
        let record = ChecksumRecord {
            algorithm: "SHA256".to_string(),
            value: "abc".to_string(),
            index: 0,
        };
        let checksum = checksum_to_graph(&record).unwrap();
        assert_eq!(checksum.algorithm, ChecksumAlgorithm::Sha256);
        assert_eq!(checksum_from_graph(&checksum, 0), record);
    }
}
