//! Component A: the phrase dictionary and its fingerprint.
//!
//! Phrase table content, order, and the CRC32 fingerprint algorithm are
//! ported from `dict.h`'s `HPZT_DICT` / `hpzt_dict_crc32`. The older
//! FNV-1a-based checksum in `hpzt_dict.h` is not used: `dict.h`'s CRC32
//! scheme is the one that matches the fingerprint definition in this
//! crate's specification.
//!
//! IDs are 1-based and assigned in declaration order. `|D| <= 127` is
//! enforced with a debug assertion at construction time (mirrors `dict.h`'s
//! `static_assert`).

use std::sync::OnceLock;

use crate::crc32::Crc32State;

/// The canonical phrase table, in declaration order. Index `i` has ID `i+1`.
pub static PHRASES: &[&[u8]] = &[
    b"<page>", b"</page>", b"<title>", b"</title>", b"<id>", b"</id>",
    b"<revision>", b"</revision>", b"<timestamp>", b"</timestamp>",
    b"<contributor>", b"</contributor>", b"<username>", b"</username>",
    b"<minor/>", b"<minor />", b"<comment>", b"</comment>",
    b"<model>wikitext</model>", b"<format>text/x-wiki</format>",
    b"<ns>", b"</ns>", b"<siteinfo>", b"</siteinfo>",
    b"<sitename>", b"</sitename>", b"<base>", b"</base>",
    b"<generator>", b"</generator>", b"<case>", b"</case>",
    b"<namespaces>", b"</namespaces>", b"<namespace key=\"", b"</namespace>",
    b"<mediawiki", b"</mediawiki>",
    b"<text xml:space=\"preserve\">", b"</text>", b"<text ",
    b"[[", b"]]", b"{{", b"}}", b"[[Category:", b"[[File:", b"[[Image:",
    b"<ref>", b"</ref>", b"<ref", b"<!--", b"-->",
    b"==", b"===", b"====", b"{{cite", b"{{citation", b"|author", b"|title",
    b"|url", b"|publisher", b"|date", b"|accessdate", b"|work", b"|pages",
    b"|isbn", b"|doi", b"|issue", b"|volume", b"|journal", b"|language",
    b"|archiveurl", b"|archivedate", b"|quote", b"|trans-title", b"|location",
    b"|ref", b"|last", b"|first",
    b"|year", b"|month", b"|day", b"|access-date", b"|access-date=",
    b"{{Infobox", b"{{infobox", b"<redirect", b"#REDIRECT",
    b"http://", b"https://", b"://", b"en.wikipedia.org", b".wikipedia.org",
    b"<ref name=\"", b"\"/>", b"\" />",
    b"&amp;", b"&lt;", b"&gt;",
    b"== References ==", b"== External links ==", b"== See also ==",
    b"{{cite web", b"{{cite journal", b"{{cite book",
    b"{{reflist", b"{{Reflist",
    b"{{DEFAULTSORT:", b"{{Convert", b"{{convert",
    b"<br/>", b"<br />",
];

/// Maximum number of dictionary entries (one byte, reserving 0x80..0xFF for
/// control codes). See `spec.md` §3/§9.
pub const MAX_DICT_SIZE: usize = 127;

/// Per-first-byte candidate lists, sorted by descending phrase length, plus
/// the longest phrase length across the whole table.
pub struct DictIndex {
    heads: [Vec<u16>; 256],
    max_len: usize,
    fingerprint: u32,
}

impl DictIndex {
    fn build() -> Self {
        debug_assert!(
            PHRASES.len() <= MAX_DICT_SIZE,
            "dictionary has {} entries, exceeds MAX_DICT_SIZE",
            PHRASES.len()
        );
        let mut heads: [Vec<u16>; 256] = std::array::from_fn(|_| Vec::new());
        let mut max_len = 0usize;
        for (i, phrase) in PHRASES.iter().enumerate() {
            debug_assert!(!phrase.is_empty(), "dictionary phrase {i} is empty");
            debug_assert!(phrase[0] != 0x00, "dictionary phrase {i} begins with 0x00");
            debug_assert!(
                !(0x80..=0x84).contains(&phrase[0]),
                "dictionary phrase {i} begins with a control byte"
            );
            let first = phrase[0] as usize;
            heads[first].push(i as u16);
            max_len = max_len.max(phrase.len());
        }
        for bucket in heads.iter_mut() {
            bucket.sort_by(|&a, &b| {
                let la = PHRASES[a as usize].len();
                let lb = PHRASES[b as usize].len();
                lb.cmp(&la).then(a.cmp(&b))
            });
        }
        let fingerprint = compute_fingerprint();
        DictIndex { heads, max_len, fingerprint }
    }

    /// Candidate IDs (0-based index into [`PHRASES`]) for phrases that start
    /// with byte `first`, longest first.
    #[inline]
    pub fn candidates(&self, first: u8) -> &[u16] {
        &self.heads[first as usize]
    }

    /// Length in bytes of the longest phrase in the dictionary.
    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// CRC32 fingerprint binding encoder and decoder to this exact table.
    #[inline]
    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    /// Look up the phrase for a 1-based dictionary ID.
    #[inline]
    pub fn phrase(&self, id: u8) -> Option<&'static [u8]> {
        if id == 0 || id as usize > PHRASES.len() {
            None
        } else {
            Some(PHRASES[id as usize - 1])
        }
    }
}

fn compute_fingerprint() -> u32 {
    let mut h = Crc32State::new();
    for phrase in PHRASES {
        h.update(phrase);
        h.update(&[0u8]);
    }
    h.finalize()
}

static INDEX: OnceLock<DictIndex> = OnceLock::new();

/// Returns the lazily-built, process-wide dictionary index.
pub fn index() -> &'static DictIndex {
    INDEX.get_or_init(DictIndex::build)
}
