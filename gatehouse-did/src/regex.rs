use lazy_static::lazy_static;
use regex::Regex;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

lazy_static! {
    /// A pattern that matches a [DID][ref] and captures its `method` and method-specific `id`.
    ///
    /// The id is a sequence of `:`-separated parts made of `idchar`s and percent-encoded octets,
    /// and its last part must not be empty.
    ///
    /// [ref]: https://www.w3.org/TR/did-core/#did-syntax
    pub static ref RE_DID: Regex = Regex::new(&format!(
        r"^did:(?P<method>[a-z0-9]+):(?P<id>({IDCHAR}*:)*{IDCHAR}+)$",
        IDCHAR = *IDCHAR
    ))
    .unwrap();

    /// A pattern that matches the start of a DID URL, i.e. the first `/`, `?` or `#`.
    pub static ref RE_DID_URL_SUFFIX: Regex = Regex::new(r"[/?#]").unwrap();
}

lazy_static! {
    static ref IDCHAR: String = r"([A-Za-z0-9._-]|%[0-9A-Fa-f]{2})".to_string();
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_re_did() {
        assert!(RE_DID.is_match("did:cheqd:testnet:7bf81a20-633c-4cc7-bc4a-5a45801005e0"));
        assert!(RE_DID.is_match("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK"));
        assert!(RE_DID.is_match("did:web:example.com%3A8443"));

        assert!(!RE_DID.is_match("did:cheqd:"));
        assert!(!RE_DID.is_match("did:cheqd:testnet:"));
        assert!(!RE_DID.is_match("did:CHEQD:testnet:abc"));
        assert!(!RE_DID.is_match("cheqd:testnet:abc"));
        assert!(!RE_DID.is_match("did:cheqd:testnet:abc/resources"));
    }
}
