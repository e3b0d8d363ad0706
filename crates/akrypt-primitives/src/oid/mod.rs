//! Registry of supported algorithms and their object identifiers.

use std::fmt;

/// Kind of cryptographic mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    HashFunction,
    HmacFunction,
    BlockCipher,
}

impl Engine {
    /// All engines, in display order.
    pub const ALL: [Engine; 3] = [Engine::HashFunction, Engine::HmacFunction, Engine::BlockCipher];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Engine::HashFunction => "hash_function",
            Engine::HmacFunction => "hmac_function",
            Engine::BlockCipher => "block_cipher",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// How an engine is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The bare algorithm.
    Algorithm,
}

impl Mode {
    /// All modes, in display order.
    pub const ALL: [Mode; 1] = [Mode::Algorithm];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Algorithm => "algorithm",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One registered object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OidInfo {
    /// Dotted object identifier.
    pub id: &'static str,
    /// Names, the first being canonical.
    pub names: &'static [&'static str],
    pub engine: Engine,
    pub mode: Mode,
}

impl OidInfo {
    /// Canonical name.
    pub fn name(&self) -> &'static str {
        self.names[0]
    }
}

static OIDS: [OidInfo; 6] = [
    OidInfo {
        id: "1.2.643.7.1.1.2.2",
        names: &["streebog256", "md_gost12_256"],
        engine: Engine::HashFunction,
        mode: Mode::Algorithm,
    },
    OidInfo {
        id: "1.2.643.7.1.1.2.3",
        names: &["streebog512", "md_gost12_512"],
        engine: Engine::HashFunction,
        mode: Mode::Algorithm,
    },
    OidInfo {
        id: "1.2.643.7.1.1.4.1",
        names: &["hmac-streebog256", "HMAC-md_gost12_256"],
        engine: Engine::HmacFunction,
        mode: Mode::Algorithm,
    },
    OidInfo {
        id: "1.2.643.7.1.1.4.2",
        names: &["hmac-streebog512", "HMAC-md_gost12_512"],
        engine: Engine::HmacFunction,
        mode: Mode::Algorithm,
    },
    OidInfo {
        id: "1.2.643.7.1.1.5.1",
        names: &["magma", "gost-89"],
        engine: Engine::BlockCipher,
        mode: Mode::Algorithm,
    },
    OidInfo {
        id: "1.2.643.7.1.1.5.2",
        names: &["kuznyechik", "kuznechik", "grasshopper"],
        engine: Engine::BlockCipher,
        mode: Mode::Algorithm,
    },
];

/// All registered identifiers.
pub fn all() -> &'static [OidInfo] {
    &OIDS
}

/// Look up an identifier by any of its names.
pub fn by_name(name: &str) -> Option<&'static OidInfo> {
    OIDS.iter().find(|oid| oid.names.iter().any(|n| n.eq_ignore_ascii_case(name)))
}

/// Look up an identifier by its dotted form.
pub fn by_id(id: &str) -> Option<&'static OidInfo> {
    OIDS.iter().find(|oid| oid.id == id)
}

/// Entries matching `pattern`.
///
/// An entry matches when the pattern is a substring of its engine name, its
/// mode name or its identifier; otherwise each of its names is tried in turn
/// and every matching name yields its own result. The returned name is the
/// one to display for the entry, preceded by the entry's index in [`all`].
pub fn find(pattern: &str) -> Vec<(usize, &'static OidInfo, &'static str)> {
    let mut found = Vec::new();
    for (idx, oid) in OIDS.iter().enumerate() {
        if oid.engine.name().contains(pattern)
            || oid.mode.name().contains(pattern)
            || oid.id.contains(pattern)
        {
            found.push((idx, oid, oid.name()));
            continue;
        }
        found.extend(
            oid.names
                .iter()
                .filter(|n| n.contains(pattern))
                .map(|n| (idx, oid, *n)),
        );
    }
    found
}
