//! Checksum algorithms as the interchange graph names them.

use std::fmt;

/// Hash algorithms defined by SPDX 2.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    Md2,
    Md4,
    Md5,
    Md6,
    Adler32,
}

impl ChecksumAlgorithm {
    pub const ALL: [Self; 17] = [
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Blake2b256,
        Self::Blake2b384,
        Self::Blake2b512,
        Self::Blake3,
        Self::Md2,
        Self::Md4,
        Self::Md5,
        Self::Md6,
        Self::Adler32,
    ];

    /// Graph tag of the algorithm, e.g. `"SHA1:"`.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1:",
            Self::Sha224 => "SHA224:",
            Self::Sha256 => "SHA256:",
            Self::Sha384 => "SHA384:",
            Self::Sha512 => "SHA512:",
            Self::Sha3_256 => "SHA3-256:",
            Self::Sha3_384 => "SHA3-384:",
            Self::Sha3_512 => "SHA3-512:",
            Self::Blake2b256 => "BLAKE2b-256:",
            Self::Blake2b384 => "BLAKE2b-384:",
            Self::Blake2b512 => "BLAKE2b-512:",
            Self::Blake3 => "BLAKE3:",
            Self::Md2 => "MD2:",
            Self::Md4 => "MD4:",
            Self::Md5 => "MD5:",
            Self::Md6 => "MD6:",
            Self::Adler32 => "ADLER32:",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|algorithm| algorithm.tag() == tag)
    }

    /// Name used by SPDX JSON: the tag without its trailing colon.
    pub fn json_name(self) -> &'static str {
        let tag = self.tag();
        tag.strip_suffix(':').unwrap_or(tag)
    }

    pub fn from_json_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.json_name() == name)
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    pub value: String,
}

impl Checksum {
    pub fn new(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> Self {
        Self {
            algorithm,
            value: value.into(),
        }
    }
}
